/// Catalog entry identifiers are random v4 UUIDs assigned at creation.
pub type EntryId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date without a time component (release dates).
pub type Date = chrono::NaiveDate;
