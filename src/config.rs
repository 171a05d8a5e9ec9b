// Configuration constants for the blog tag reconciler
// This module centralizes all magic numbers and hardcoded strings to improve maintainability

/// Application configuration constants
pub mod app {
    /// Name of the application data directory
    pub const DATA_DIR_NAME: &str = "Blog_Demo";

    /// Database file name
    pub const DATABASE_FILENAME: &str = "blog_demo.db";
}

/// Tag-related configuration constants
pub mod tags {
    /// Field delimiter accepted in the tags input
    pub const DELIMITER: char = ',';

    /// Separator used when rendering tags back into a single field
    pub const JOIN_SEPARATOR: &str = ",";

    /// Maximum allowed length for tag names
    pub const MAX_TAG_LENGTH: usize = 50;

    /// Form field name used in validation errors
    pub const FIELD_NAME: &str = "tags";
}

/// Database schema constants
pub mod database {
    /// Tags table name
    pub const TAGS_TABLE: &str = "tags";

    /// Names bound per `IN (...)` lookup, kept below SQLite's variable limit
    pub const LOOKUP_CHUNK_SIZE: usize = 500;
}
