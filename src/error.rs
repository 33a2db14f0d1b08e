use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(csv::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown class index: {0}")]
    UnknownClass(u32),

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
}

/// I/O failures under the CSV layer surface as `Io`
impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        let io_kind = match err.kind() {
            csv::ErrorKind::Io(io) => Some(io.kind()),
            _ => None,
        };

        match io_kind {
            Some(kind) => Error::Io(std::io::Error::new(kind, err)),
            None => Error::Csv(err),
        }
    }
}
