//! Static asset constants (CSS and JavaScript).

/// Stylesheet for the web interface.
pub const CSS: &str = include_str!("styles.css");

/// JavaScript asset-listing controller for the index page.
pub const JS: &str = include_str!("scripts.js");
