use chrono::NaiveDateTime;
use serde::Serialize;
use sound_primitives::{GeoLocation, SoundId};

/// One uploaded sound and its metadata, as returned by the remote service
///
/// Immutable value object: construct it by decoding a JSON response body
/// ([`Sound::from_json`]) or a binary transfer buffer; a change produces a
/// new value. Serializing with serde reproduces the API's wire field names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sound {
    pub id: SoundId,

    /// The URI for this sound on the service's website
    pub url: String,

    /// The name the uploader gave to the sound
    pub name: String,

    /// Tags the uploader gave to the sound, may be empty
    pub tags: Vec<String>,

    /// The description the uploader gave to the sound, may be empty
    pub description: String,

    /// Where the sound was recorded, only for geotagged sounds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geotag: Option<GeoLocation>,

    /// The username of the uploader
    pub username: String,

    /// Thumbnail image URLs of the waveform/spectral plots
    pub images: Image,

    /// Preview sound URLs
    pub previews: Preview,

    /// Duration in seconds
    pub duration: f32,

    /// Upload timestamp (the API emits zone-less ISO-8601 date-times)
    pub created: NaiveDateTime,
}

/// URLs to precomputed waveform and spectrogram renderings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    #[serde(rename = "waveform_m")]
    pub med_size_waveform_url: String,

    #[serde(rename = "waveform_l")]
    pub large_size_waveform_url: String,

    #[serde(rename = "spectral_m")]
    pub med_size_spectral_url: String,

    /// Not generated for all sounds
    #[serde(rename = "spectral_l", skip_serializing_if = "Option::is_none")]
    pub large_size_spectral_url: Option<String>,
}

/// Streamable low-bitrate renditions, two codecs in two quality tiers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    #[serde(rename = "preview-lq-mp3")]
    pub low_quality_mp3_url: String,

    #[serde(rename = "preview-hq-mp3")]
    pub high_quality_mp3_url: String,

    #[serde(rename = "preview-lq-ogg")]
    pub low_quality_ogg_url: String,

    #[serde(rename = "preview-hq-ogg")]
    pub high_quality_ogg_url: String,
}
