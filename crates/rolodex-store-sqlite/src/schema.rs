//! SQL schema for the Rolodex SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids from being reused after a delete.
CREATE TABLE IF NOT EXISTS Contact (
    Id            INTEGER PRIMARY KEY AUTOINCREMENT,
    FirstName     TEXT NOT NULL DEFAULT '',
    SecondName    TEXT NOT NULL DEFAULT '',
    DateOfBirth   TEXT NOT NULL,              -- ISO 8601 calendar date
    Addresses     TEXT NOT NULL DEFAULT '',
    PhoneNumbers  TEXT NOT NULL DEFAULT '',
    PersonalPhoto TEXT NOT NULL DEFAULT ''    -- blob reference URL or ''
);

CREATE INDEX IF NOT EXISTS contact_dob_idx ON Contact(DateOfBirth);

PRAGMA user_version = 1;
";
