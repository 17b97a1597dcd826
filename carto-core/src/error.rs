use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("malformed input at line {line}: `{input}`: {reason}")]
    MalformedInput {
        line: usize,
        input: String,
        reason: String,
    },

    #[error("row `{path}` references missing parent `{parent}`")]
    InconsistentTree { path: String, parent: String },

    #[error("invalid configuration: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, MapError>;
