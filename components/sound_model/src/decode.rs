//! JSON decoding for the Sound resource
//!
//! The decoder walks a parsed [`serde_json::Value`] by hand rather than
//! deriving `Deserialize`: the API contract calls for errors that name the
//! offending field and distinguish a missing key from a mistyped one, which
//! derive-generated code cannot surface structurally. Field names are fixed
//! by the remote API and listed in [`fields`].

use crate::error::DecodeError;
use crate::sound::{Image, Preview, Sound};
use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use sound_primitives::{GeoLocation, SoundId};

/// Wire field names, exactly as the remote API emits them
mod fields {
    pub const ID: &str = "id";
    pub const URL: &str = "url";
    pub const NAME: &str = "name";
    pub const TAGS: &str = "tags";
    pub const DESCRIPTION: &str = "description";
    pub const GEOTAG: &str = "geotag";
    pub const USERNAME: &str = "username";
    pub const IMAGES: &str = "images";
    pub const PREVIEWS: &str = "previews";
    pub const DURATION: &str = "duration";
    pub const CREATED: &str = "created";

    pub const WAVEFORM_M: &str = "waveform_m";
    pub const WAVEFORM_L: &str = "waveform_l";
    pub const SPECTRAL_M: &str = "spectral_m";
    pub const SPECTRAL_L: &str = "spectral_l";

    pub const PREVIEW_LQ_MP3: &str = "preview-lq-mp3";
    pub const PREVIEW_HQ_MP3: &str = "preview-hq-mp3";
    pub const PREVIEW_LQ_OGG: &str = "preview-lq-ogg";
    pub const PREVIEW_HQ_OGG: &str = "preview-hq-ogg";
}

impl Sound {
    /// Decode one sound from an API response body
    ///
    /// Either returns a fully populated value or fails on the first
    /// offending field; there are no partial results.
    ///
    /// # Examples
    /// ```
    /// # use sound_model::{DecodeError, Sound};
    /// let payload = r#"{
    ///     "id": 214239,
    ///     "url": "https://example.org/sounds/214239/",
    ///     "name": "Rain on tent",
    ///     "tags": ["rain", "field-recording"],
    ///     "description": "Light rain recorded from inside a tent.",
    ///     "username": "glasgowbury",
    ///     "images": {
    ///         "waveform_m": "https://example.org/d/214239_wave_M.png",
    ///         "waveform_l": "https://example.org/d/214239_wave_L.png",
    ///         "spectral_m": "https://example.org/d/214239_spec_M.jpg"
    ///     },
    ///     "previews": {
    ///         "preview-lq-mp3": "https://example.org/p/214239-lq.mp3",
    ///         "preview-hq-mp3": "https://example.org/p/214239-hq.mp3",
    ///         "preview-lq-ogg": "https://example.org/p/214239-lq.ogg",
    ///         "preview-hq-ogg": "https://example.org/p/214239-hq.ogg"
    ///     },
    ///     "duration": 64.5,
    ///     "created": "2013-11-03T09:14:28"
    /// }"#;
    /// let sound = Sound::from_json(payload)?;
    /// assert_eq!(sound.name, "Rain on tent");
    /// # Ok::<(), DecodeError>(())
    /// ```
    pub fn from_json(payload: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(payload)?;
        Self::from_value(&value)
    }

    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let obj = as_object(value, "payload")?;

        Ok(Self {
            id: SoundId::new(require_i64(obj, fields::ID)?),
            url: require_string(obj, fields::URL)?,
            name: require_string(obj, fields::NAME)?,
            tags: require_string_list(obj, fields::TAGS)?,
            description: require_string(obj, fields::DESCRIPTION)?,
            geotag: optional_geotag(obj)?,
            username: require_string(obj, fields::USERNAME)?,
            images: Image::from_value(require(obj, fields::IMAGES)?)?,
            previews: Preview::from_value(require(obj, fields::PREVIEWS)?)?,
            duration: require_f64(obj, fields::DURATION)? as f32,
            created: require_timestamp(obj, fields::CREATED)?,
        })
    }
}

impl Image {
    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let obj = as_object(value, fields::IMAGES)?;

        Ok(Self {
            med_size_waveform_url: require_string(obj, fields::WAVEFORM_M)?,
            large_size_waveform_url: require_string(obj, fields::WAVEFORM_L)?,
            med_size_spectral_url: require_string(obj, fields::SPECTRAL_M)?,
            large_size_spectral_url: optional_string(obj, fields::SPECTRAL_L)?,
        })
    }
}

impl Preview {
    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let obj = as_object(value, fields::PREVIEWS)?;

        Ok(Self {
            low_quality_mp3_url: require_string(obj, fields::PREVIEW_LQ_MP3)?,
            high_quality_mp3_url: require_string(obj, fields::PREVIEW_HQ_MP3)?,
            low_quality_ogg_url: require_string(obj, fields::PREVIEW_LQ_OGG)?,
            high_quality_ogg_url: require_string(obj, fields::PREVIEW_HQ_OGG)?,
        })
    }
}

fn as_object<'a>(
    value: &'a Value,
    field: &'static str,
) -> Result<&'a Map<String, Value>, DecodeError> {
    value.as_object().ok_or(DecodeError::TypeMismatch {
        field,
        expected: "object",
    })
}

/// A key that is absent or explicitly `null` counts as missing; the API
/// uses the two interchangeably.
fn require<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, DecodeError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(DecodeError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

fn require_string(obj: &Map<String, Value>, field: &'static str) -> Result<String, DecodeError> {
    require(obj, field)?
        .as_str()
        .map(str::to_string)
        .ok_or(DecodeError::TypeMismatch {
            field,
            expected: "string",
        })
}

fn optional_string(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, DecodeError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or(DecodeError::TypeMismatch {
                field,
                expected: "string",
            }),
    }
}

fn require_i64(obj: &Map<String, Value>, field: &'static str) -> Result<i64, DecodeError> {
    require(obj, field)?
        .as_i64()
        .ok_or(DecodeError::TypeMismatch {
            field,
            expected: "integer",
        })
}

fn require_f64(obj: &Map<String, Value>, field: &'static str) -> Result<f64, DecodeError> {
    require(obj, field)?
        .as_f64()
        .ok_or(DecodeError::TypeMismatch {
            field,
            expected: "number",
        })
}

fn require_string_list(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Vec<String>, DecodeError> {
    let items = require(obj, field)?
        .as_array()
        .ok_or(DecodeError::TypeMismatch {
            field,
            expected: "array",
        })?;

    let mut strings = Vec::with_capacity(items.len());
    for item in items {
        let s = item.as_str().ok_or(DecodeError::TypeMismatch {
            field,
            expected: "array of strings",
        })?;
        strings.push(s.to_string());
    }
    Ok(strings)
}

fn require_timestamp(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<NaiveDateTime, DecodeError> {
    require(obj, field)?
        .as_str()
        .and_then(|s| s.parse::<NaiveDateTime>().ok())
        .ok_or(DecodeError::TypeMismatch {
            field,
            expected: "ISO-8601 timestamp",
        })
}

fn optional_geotag(obj: &Map<String, Value>) -> Result<Option<GeoLocation>, DecodeError> {
    match obj.get(fields::GEOTAG) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.parse()?)),
        Some(_) => Err(DecodeError::TypeMismatch {
            field: fields::GEOTAG,
            expected: "string",
        }),
    }
}
