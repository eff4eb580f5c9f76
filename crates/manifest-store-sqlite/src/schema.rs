//! SQL schema for the Manifest SQLite store.
//!
//! Executed once at connection startup. There are no migrations; the table
//! is rebuilt from the source file on every import anyway.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per passenger of the current dataset. `seq` preserves the order
-- rows were read from the source file; `passenger_id` is the file's own id.
-- Rows are only ever removed all at once, by the next import.
CREATE TABLE IF NOT EXISTS passengers (
    seq           INTEGER PRIMARY KEY,
    passenger_id  INTEGER NOT NULL UNIQUE,
    survived      INTEGER NOT NULL,
    pclass        INTEGER NOT NULL,
    name          TEXT    NOT NULL,
    sex           TEXT    NOT NULL,
    age           REAL,                -- NULL when unknown
    sibsp         INTEGER NOT NULL,
    parch         INTEGER NOT NULL,
    ticket        TEXT    NOT NULL,
    fare          REAL    NOT NULL,
    cabin         TEXT,
    embarked      TEXT                 -- 'C' | 'Q' | 'S' | NULL
);

CREATE INDEX IF NOT EXISTS passengers_pclass_idx ON passengers(pclass);
CREATE INDEX IF NOT EXISTS passengers_sex_idx    ON passengers(sex);

PRAGMA user_version = 1;
";
