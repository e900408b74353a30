use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Year selector is not `YY` or `YY-YY`.
    #[error("invalid year filter '{value}': expected YY or YY-YY (e.g. 25 or 25-20)")]
    InvalidFilterFormat { value: String },
    /// A record cannot be built without its identifier.
    #[error("record has no ID")]
    MissingIdentifier,
}

pub type Result<T> = std::result::Result<T, ModelError>;
