use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeapError {
    #[error("Out of memory: no free block can hold {requested} bytes")]
    OutOfMemory { requested: usize },

    #[error("Invalid address: {0}")]
    InvalidAddress(usize),

    #[error("Malformed command: {0}")]
    MalformedCommand(String),

    #[error("Encoding overflow: block size {0} does not fit in a one-byte tag")]
    EncodingOverflow(usize),

    #[error("Invalid arena size: {0} (must be between 2 and 127)")]
    InvalidArenaSize(usize),

    #[error("Heap corrupted at offset {offset}: {reason}")]
    Corrupted { offset: usize, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for HeapError {
    fn from(err: toml::de::Error) -> Self {
        HeapError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HeapError>;
