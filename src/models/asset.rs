//! Asset model with assignment lifecycle.
//!
//! An asset is a physical item (laptop, monitor, peripheral) tracked from
//! purchase through assignment, reclaim, and loss.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Available,
    Assigned,
    Lost,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Assigned => "assigned",
            Self::Lost => "lost",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "available" => Some(Self::Available),
            "assigned" => Some(Self::Assigned),
            "lost" => Some(Self::Lost),
            _ => None,
        }
    }
}

/// A tracked inventory asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    /// UUID identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Free-form category, e.g. "laptop".
    pub asset_type: String,
    /// Longer description.
    pub description: String,
    /// Manufacturer serial number.
    pub serial_no: String,
    /// Organization serial code (unique).
    pub code: String,
    /// Purchase date, if known.
    pub purchased: Option<DateTime<Utc>>,
    /// User id of whoever registered the asset.
    pub added_by: Option<String>,
    /// User id of the current assignee.
    pub assigned_to: Option<String>,
    /// Date the asset is due back from its assignee.
    pub return_date: Option<DateTime<Utc>>,
    /// Whether the asset has been reported lost.
    pub lost: bool,
    /// When the asset was registered.
    pub created_at: DateTime<Utc>,
}

impl Asset {
    /// Create a new asset with a fresh UUID.
    pub fn new(
        name: String,
        asset_type: String,
        description: String,
        serial_no: String,
        code: String,
        purchased: Option<DateTime<Utc>>,
        added_by: Option<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            asset_type,
            description,
            serial_no,
            code,
            purchased,
            added_by,
            assigned_to: None,
            return_date: None,
            lost: false,
            created_at: Utc::now(),
        }
    }

    /// Assign the asset to a user until the given return date.
    pub fn assign(&mut self, user_id: String, return_date: Option<DateTime<Utc>>) {
        self.assigned_to = Some(user_id);
        self.return_date = return_date;
    }

    /// Reclaim the asset from its assignee.
    pub fn reclaim(&mut self) {
        self.assigned_to = None;
        self.return_date = None;
    }

    /// Mark the asset lost or found.
    pub fn set_lost(&mut self, lost: bool) {
        self.lost = lost;
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_to.is_some()
    }

    /// Current lifecycle status. Lost wins over assigned.
    pub fn status(&self) -> AssetStatus {
        if self.lost {
            AssetStatus::Lost
        } else if self.is_assigned() {
            AssetStatus::Assigned
        } else {
            AssetStatus::Available
        }
    }

    /// Whether the return date has passed.
    pub fn return_date_past(&self) -> bool {
        self.return_date.is_some_and(|due| Utc::now() > due)
    }

    /// Whether the asset is due back within one day (or already overdue).
    pub fn return_date_near(&self) -> bool {
        self.return_date
            .is_some_and(|due| due - Utc::now() <= Duration::days(1))
    }

    /// Convert to display form with preformatted dates.
    pub fn display(&self) -> AssetDisplay {
        AssetDisplay {
            id: self.id.clone(),
            name: self.name.clone(),
            asset_type: self.asset_type.clone(),
            description: self.description.clone(),
            serial_no: self.serial_no.clone(),
            code: self.code.clone(),
            status: self.status(),
            purchased: self.purchased.map(format_date),
            added_by: self.added_by.clone(),
            assigned_to: self.assigned_to.clone(),
            return_date: self.return_date.map(format_date),
            overdue: self.return_date_past(),
            due_soon: self.return_date_near(),
        }
    }
}

/// Display date format used across the UI and JSON API.
fn format_date(dt: DateTime<Utc>) -> String {
    dt.format("%d, %b %Y").to_string()
}

/// Asset with dates preformatted for templates and the JSON API.
#[derive(Debug, Clone, Serialize)]
pub struct AssetDisplay {
    pub id: String,
    pub name: String,
    pub asset_type: String,
    pub description: String,
    pub serial_no: String,
    pub code: String,
    pub status: AssetStatus,
    pub purchased: Option<String>,
    pub added_by: Option<String>,
    pub assigned_to: Option<String>,
    pub return_date: Option<String>,
    pub overdue: bool,
    pub due_soon: bool,
}
