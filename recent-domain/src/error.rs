use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A fetched stat block lacks a canonical field or carries a value of the wrong shape.
    #[error("malformed stats in mode {mode}: field `{field}` is missing or invalid")]
    MalformedStats { mode: String, field: String },
    /// A stored record cannot be read as canonical data, even after migration.
    #[error("schema violation: {0}")]
    SchemaViolation(String),
}

impl DomainError {
    pub fn malformed(mode: impl Into<String>, field: impl Into<String>) -> Self {
        DomainError::MalformedStats {
            mode: mode.into(),
            field: field.into(),
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        DomainError::SchemaViolation(message.into())
    }
}
