use thiserror::Error;

#[derive(Debug, Error)]
pub enum FirmentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request decode error: {0}")]
    DecodeError(String),

    #[error("Encode error: {0}")]
    EncodeError(String),

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Unresolved enum {enum_name} referenced by field {message}.{field}")]
    UnresolvedEnum {
        enum_name: String,
        message:   String,
        field:     String,
    },
}
