pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed plot document: {message}")]
    MalformedDocument { message: String },

    #[error("Category {category:?} references index {index}, but values has length {len}")]
    IndexOutOfRange {
        category: String,
        index: i128,
        len: usize,
    },

    #[error("No category has any observations")]
    EmptyDataset,

    #[error("Dimension {dimension} is out of range (dataset has {count} dimensions)")]
    DimensionOutOfRange { dimension: usize, count: usize },
}

impl Error {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::malformed(value.to_string())
    }
}
