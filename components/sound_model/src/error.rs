use sound_primitives::GeoLocationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Payload is not valid JSON: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field '{field}' is not a {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Malformed geotag: {0}")]
    MalformedGeotag(#[from] GeoLocationError),
}
