//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` when a migration changes the table.

diesel::table! {
    /// Registered accounts.
    ///
    /// Email uniqueness is checked by the authentication service, not by a
    /// database constraint.
    users (id) {
        /// Sequential primary key, starting at 1.
        id -> Int8,
        /// Login email, stored trimmed.
        email -> Varchar,
        /// Salted credential in `salt.digest` hex form.
        credential -> Varchar,
        /// Whether the account passes the admin gate.
        admin -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}
