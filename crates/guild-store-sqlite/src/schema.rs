//! SQL schema for the Guild SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS states (
    uf    TEXT PRIMARY KEY,
    name  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS cities (
    city_id INTEGER PRIMARY KEY,   -- id from the imported dataset, not assigned here
    uf      TEXT NOT NULL REFERENCES states(uf),
    name    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    user_id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,  -- login identifier
    phone         TEXT NOT NULL,
    tax_id        TEXT NOT NULL,
    password_hash TEXT NOT NULL,         -- argon2 PHC string
    state_uf      TEXT NOT NULL,
    city_id       INTEGER NOT NULL REFERENCES cities(city_id),
    district      TEXT NOT NULL,
    status        TEXT NOT NULL DEFAULT 'unverified',  -- 'active' | 'unverified' | 'suspended'
    created_at    TEXT NOT NULL          -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS professions (
    profession_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL UNIQUE
);

-- user_id is deliberately unconstrained: the roster does not own the
-- directory, and the matching engine must cope with users that are gone.
CREATE TABLE IF NOT EXISTS offerings (
    user_id       INTEGER NOT NULL,
    profession_id INTEGER NOT NULL REFERENCES professions(profession_id),
    status        TEXT NOT NULL DEFAULT 'active',  -- 'active' | 'suspended'
    added_at      TEXT NOT NULL,
    PRIMARY KEY (user_id, profession_id)
);

-- Reviews are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table, and there is no
-- foreign key to offerings: the ledger accepts reviews for pairs the roster
-- has never seen.
CREATE TABLE IF NOT EXISTS reviews (
    review_id       TEXT PRIMARY KEY,
    reviewer_id     INTEGER NOT NULL,
    professional_id INTEGER NOT NULL,
    profession_id   INTEGER NOT NULL,
    score           INTEGER NOT NULL CHECK (score BETWEEN 0 AND 5),
    comment         TEXT,
    recorded_at     TEXT NOT NULL      -- ISO 8601 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS offerings_profession_idx ON offerings(profession_id);
CREATE INDEX IF NOT EXISTS reviews_pair_idx         ON reviews(professional_id, profession_id);
CREATE INDEX IF NOT EXISTS cities_uf_idx            ON cities(uf);

PRAGMA user_version = 1;
";
