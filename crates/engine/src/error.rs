use std::fmt;

#[derive(Debug)]
pub enum EngineError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (zero cap, bad threshold, etc.).
    ConfigValidation(String),
    /// A person record with no stable id reached the engine boundary.
    MissingPersonId { index: usize },
    /// Missing required column in roster data.
    MissingColumn { column: String },
    /// Age column value is not a non-negative integer.
    AgeParse { record_id: String, value: String },
    /// Date-of-birth column value is not an ISO date.
    DateParse { record_id: String, value: String },
    /// Relationship feed is neither a bare array nor a paginated envelope.
    FeedParse(String),
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingPersonId { index } => {
                write!(f, "person record at index {index} has no id; filter invalid records before running")
            }
            Self::MissingColumn { column } => write!(f, "roster: missing column '{column}'"),
            Self::AgeParse { record_id, value } => {
                write!(f, "record '{record_id}': cannot parse age '{value}'")
            }
            Self::DateParse { record_id, value } => {
                write!(f, "record '{record_id}': cannot parse date '{value}'")
            }
            Self::FeedParse(msg) => write!(f, "relationship feed parse error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
