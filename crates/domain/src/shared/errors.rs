use thiserror::Error;

/// Returned when a stored string does not match any variant of a domain enum
#[derive(Error, Debug, PartialEq)]
#[error("Unknown {kind}: `{value}`")]
pub struct UnknownVariantError {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariantError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
