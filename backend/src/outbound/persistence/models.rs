//! Internal Diesel row structs for the users table.
//!
//! These types never leave the persistence layer; the directory converts them
//! into domain [`User`](crate::domain::User) values.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub credential: String,
    pub admin: bool,
    #[expect(dead_code, reason = "audit column not surfaced in the domain")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating user records; `id`, `admin`, and
/// `created_at` take their column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub credential: &'a str,
}
