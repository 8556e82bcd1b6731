use thiserror::Error;

#[derive(Error, Debug)]
pub enum WireError {
    #[error("Buffer ended in the middle of a field")]
    UnexpectedEof,

    #[error("String field is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Presence flag must be 0 or 1, got {0}")]
    InvalidPresenceFlag(u8),

    #[error("Timestamp outside the representable range: {secs}s {nanos}ns")]
    InvalidTimestamp { secs: i64, nanos: u32 },

    #[error("{0} byte(s) left over after one decoded sound")]
    TrailingBytes(usize),
}
