//! Database schema and migrations for the tattoo API.
//!
//! Migrations are applied in order when the database is opened. The
//! schema_version table records how many have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: Categories
    r#"
CREATE TABLE categories (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL UNIQUE,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: Tattoo records
    r#"
CREATE TABLE tattoos (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT NOT NULL,
    description  TEXT,
    category_id  INTEGER REFERENCES categories(id) ON DELETE SET NULL,
    image        TEXT,                    -- stored upload file name
    created_at   TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at   TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_tattoos_category_id ON tattoos(category_id);
"#,
];
