//! Diesel ORM models for database tables.
//!
//! These records provide compile-time type checking for database
//! operations. Datetimes are stored as RFC 3339 TEXT.

use diesel::prelude::*;

use crate::schema;

/// User record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: String,
}

/// New user for insertion or id-keyed upsert.
#[derive(Insertable, AsChangeset, Debug)]
#[diesel(table_name = schema::users)]
pub struct NewUser<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub name: &'a str,
    pub created_at: &'a str,
}

/// Asset record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::assets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AssetRecord {
    pub id: String,
    pub name: String,
    pub asset_type: String,
    pub description: String,
    pub serial_no: String,
    pub code: String,
    pub purchased: Option<String>,
    pub added_by: Option<String>,
    pub assigned_to: Option<String>,
    pub return_date: Option<String>,
    pub lost: i32,
    pub created_at: String,
}

/// New asset for insertion or id-keyed upsert.
///
/// `treat_none_as_null` so an upsert clears columns the model cleared
/// (e.g. a reclaimed assignment), instead of leaving stale values.
#[derive(Insertable, AsChangeset, Debug)]
#[diesel(table_name = schema::assets)]
#[diesel(treat_none_as_null = true)]
pub struct NewAsset<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub asset_type: &'a str,
    pub description: &'a str,
    pub serial_no: &'a str,
    pub code: &'a str,
    pub purchased: Option<&'a str>,
    pub added_by: Option<&'a str>,
    pub assigned_to: Option<&'a str>,
    pub return_date: Option<&'a str>,
    pub lost: i32,
    pub created_at: &'a str,
}
