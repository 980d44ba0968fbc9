/// Asset primary keys are application-generated UUIDs (v7, time-ordered).
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
