//! SQL schema for the parcel collection.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per parcel. `document` holds the full JSON record as supplied.
-- `created_by` / `created_at` are derived from it for filtering and
-- ordering, and are NULL when the document value can't be interpreted.
-- `seq` records insertion order for tie-breaking.
CREATE TABLE IF NOT EXISTS parcels (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    parcel_id   TEXT NOT NULL UNIQUE,
    created_by  TEXT,
    created_at  TEXT,            -- normalised RFC 3339 UTC, or NULL
    document    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS parcels_created_by_idx ON parcels(created_by);
CREATE INDEX IF NOT EXISTS parcels_created_at_idx ON parcels(created_at);

PRAGMA user_version = 1;
";
