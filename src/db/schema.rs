//! Database schema and migrations for itemshelf.
//!
//! Migrations are applied sequentially when the database is first opened
//! or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script executed in order. The schema_version
/// table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - items table
    r#"
-- Items pair user metadata with an uploaded blob
CREATE TABLE items (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    name           TEXT,
    description    TEXT,
    filepath       TEXT,           -- generated blob name, relative to the uploads root
    original_name  TEXT            -- client-supplied filename, used for downloads
);
"#,
];
