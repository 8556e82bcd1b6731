//! Binary transfer codec for Sound values
//!
//! Used for handing a decoded [`sound_model::Sound`] between two components
//! of the same process boundary, e.g. across an IPC channel. The buffer is
//! never persisted and carries no version marker; both ends are built from
//! the same revision.

mod codec;
mod error;

pub use codec::{decode_sound, encode_sound};
pub use error::WireError;
