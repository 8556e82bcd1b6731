mod geo;
mod id;

pub use geo::{GeoLocation, GeoLocationError};
pub use id::SoundId;
