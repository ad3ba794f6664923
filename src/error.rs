use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatstatError {
    #[error("record source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("record source yielded zero records where a non-zero denominator is required")]
    EmptyInput,

    #[error("field '{path}' in record {index} is not numeric (found {found})")]
    MalformedValue {
        path: String,
        index: usize,
        found: String,
    },

    #[error("Invalid JSON input: {0}")]
    InvalidJson(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
