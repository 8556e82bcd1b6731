mod decode;
mod error;
mod sound;

pub use error::DecodeError;
pub use sound::{Image, Preview, Sound};
pub use sound_primitives::{GeoLocation, GeoLocationError, SoundId};
