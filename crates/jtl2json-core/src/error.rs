use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum Jtl2JsonError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Empty series: label '{0}' has no recorded samples")]
    EmptySeries(String),

    #[error("Empty input: no rows to derive a timestamp from")]
    EmptyInput,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<csv::Error> for Jtl2JsonError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io_err) => Jtl2JsonError::Io(io_err),
                other => Jtl2JsonError::Parse(format!("{other:?}")),
            }
        } else {
            Jtl2JsonError::Parse(err.to_string())
        }
    }
}

impl Serialize for Jtl2JsonError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
