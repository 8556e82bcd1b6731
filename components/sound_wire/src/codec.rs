//! Sequential field encoding, little-endian throughout
//!
//! Field order: id, url, name, tags, description, geotag, username, images,
//! previews, duration, created. Strings carry a u32 byte-length prefix, the
//! tag list a u32 count, optional values a one-byte presence flag (0 or 1)
//! so an absent value stays distinguishable from an empty string.

use crate::error::WireError;
use chrono::{DateTime, Utc};
use sound_model::{Image, Preview, Sound};
use sound_primitives::{GeoLocation, SoundId};

/// Encode one sound into a transfer buffer. Never fails.
pub fn encode_sound(sound: &Sound) -> Vec<u8> {
    let mut w = Writer::new();

    w.put_i64(sound.id.value());
    w.put_str(&sound.url);
    w.put_str(&sound.name);
    w.put_str_list(&sound.tags);
    w.put_str(&sound.description);

    match &sound.geotag {
        Some(geo) => {
            w.put_flag(true);
            w.put_f64(geo.latitude());
            w.put_f64(geo.longitude());
        }
        None => w.put_flag(false),
    }

    w.put_str(&sound.username);

    w.put_str(&sound.images.med_size_waveform_url);
    w.put_str(&sound.images.large_size_waveform_url);
    w.put_str(&sound.images.med_size_spectral_url);
    w.put_opt_str(sound.images.large_size_spectral_url.as_deref());

    w.put_str(&sound.previews.low_quality_mp3_url);
    w.put_str(&sound.previews.high_quality_mp3_url);
    w.put_str(&sound.previews.low_quality_ogg_url);
    w.put_str(&sound.previews.high_quality_ogg_url);

    w.put_f32(sound.duration);

    let created = sound.created.and_utc();
    w.put_i64(created.timestamp());
    w.put_u32(created.timestamp_subsec_nanos());

    w.into_bytes()
}

/// Decode one sound from a transfer buffer
///
/// The buffer must contain exactly one encoded sound; leftover bytes are
/// reported as [`WireError::TrailingBytes`].
pub fn decode_sound(bytes: &[u8]) -> Result<Sound, WireError> {
    let mut r = Reader::new(bytes);

    let id = SoundId::new(r.take_i64()?);
    let url = r.take_str()?;
    let name = r.take_str()?;
    let tags = r.take_str_list()?;
    let description = r.take_str()?;

    let geotag = if r.take_flag()? {
        let latitude = r.take_f64()?;
        let longitude = r.take_f64()?;
        Some(GeoLocation::new(latitude, longitude))
    } else {
        None
    };

    let username = r.take_str()?;

    let images = Image {
        med_size_waveform_url: r.take_str()?,
        large_size_waveform_url: r.take_str()?,
        med_size_spectral_url: r.take_str()?,
        large_size_spectral_url: r.take_opt_str()?,
    };

    let previews = Preview {
        low_quality_mp3_url: r.take_str()?,
        high_quality_mp3_url: r.take_str()?,
        low_quality_ogg_url: r.take_str()?,
        high_quality_ogg_url: r.take_str()?,
    };

    let duration = r.take_f32()?;

    let secs = r.take_i64()?;
    let nanos = r.take_u32()?;
    let created = DateTime::<Utc>::from_timestamp(secs, nanos)
        .ok_or(WireError::InvalidTimestamp { secs, nanos })?
        .naive_utc();

    r.finish()?;

    Ok(Sound {
        id,
        url,
        name,
        tags,
        description,
        geotag,
        username,
        images,
        previews,
        duration,
        created,
    })
}

struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn new() -> Self {
        Self { buf: Vec::new() }
    }

    fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn put_flag(&mut self, present: bool) {
        self.buf.push(present as u8);
    }

    fn put_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn put_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn put_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn put_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn put_str(&mut self, s: &str) {
        self.put_u32(s.len() as u32);
        self.buf.extend_from_slice(s.as_bytes());
    }

    fn put_opt_str(&mut self, s: Option<&str>) {
        match s {
            Some(s) => {
                self.put_flag(true);
                self.put_str(s);
            }
            None => self.put_flag(false),
        }
    }

    fn put_str_list(&mut self, items: &[String]) {
        self.put_u32(items.len() as u32);
        for item in items {
            self.put_str(item);
        }
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        let end = self.pos.checked_add(n).ok_or(WireError::UnexpectedEof)?;
        if end > self.bytes.len() {
            return Err(WireError::UnexpectedEof);
        }
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let mut arr = [0u8; N];
        arr.copy_from_slice(self.take(N)?);
        Ok(arr)
    }

    fn take_flag(&mut self) -> Result<bool, WireError> {
        match self.take_array::<1>()?[0] {
            0 => Ok(false),
            1 => Ok(true),
            flag => Err(WireError::InvalidPresenceFlag(flag)),
        }
    }

    fn take_u32(&mut self) -> Result<u32, WireError> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    fn take_i64(&mut self) -> Result<i64, WireError> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    fn take_f32(&mut self) -> Result<f32, WireError> {
        Ok(f32::from_le_bytes(self.take_array()?))
    }

    fn take_f64(&mut self) -> Result<f64, WireError> {
        Ok(f64::from_le_bytes(self.take_array()?))
    }

    fn take_str(&mut self) -> Result<String, WireError> {
        let len = self.take_u32()? as usize;
        let bytes = self.take(len)?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    fn take_opt_str(&mut self) -> Result<Option<String>, WireError> {
        if self.take_flag()? {
            Ok(Some(self.take_str()?))
        } else {
            Ok(None)
        }
    }

    fn take_str_list(&mut self) -> Result<Vec<String>, WireError> {
        let count = self.take_u32()?;
        let mut items = Vec::new();
        for _ in 0..count {
            items.push(self.take_str()?);
        }
        Ok(items)
    }

    fn finish(&self) -> Result<(), WireError> {
        let remaining = self.bytes.len() - self.pos;
        if remaining > 0 {
            return Err(WireError::TrailingBytes(remaining));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDateTime;

    fn full_sound() -> Sound {
        Sound {
            id: SoundId::new(214239),
            url: "https://example.org/people/glasgowbury/sounds/214239/".to_string(),
            name: "Bosphorus ferry horn".to_string(),
            tags: vec![
                "ferry".to_string(),
                "horn".to_string(),
                "istanbul".to_string(),
            ],
            description: "Recorded from the Karakoy pier at dusk.".to_string(),
            geotag: Some(GeoLocation::new(41.0082325664, 28.9731252193)),
            username: "glasgowbury".to_string(),
            images: Image {
                med_size_waveform_url: "https://example.org/d/214239_wave_M.png".to_string(),
                large_size_waveform_url: "https://example.org/d/214239_wave_L.png".to_string(),
                med_size_spectral_url: "https://example.org/d/214239_spec_M.jpg".to_string(),
                large_size_spectral_url: Some(
                    "https://example.org/d/214239_spec_L.jpg".to_string(),
                ),
            },
            previews: Preview {
                low_quality_mp3_url: "https://example.org/p/214239-lq.mp3".to_string(),
                high_quality_mp3_url: "https://example.org/p/214239-hq.mp3".to_string(),
                low_quality_ogg_url: "https://example.org/p/214239-lq.ogg".to_string(),
                high_quality_ogg_url: "https://example.org/p/214239-hq.ogg".to_string(),
            },
            duration: 27.86,
            created: "2013-11-03T09:14:28".parse::<NaiveDateTime>().unwrap(),
        }
    }

    fn minimal_sound() -> Sound {
        let mut sound = full_sound();
        sound.tags = Vec::new();
        sound.geotag = None;
        sound.images.large_size_spectral_url = None;
        sound
    }

    #[test]
    fn round_trip_full_sound() {
        let sound = full_sound();
        let decoded = decode_sound(&encode_sound(&sound)).unwrap();
        assert_eq!(decoded, sound);
    }

    #[test]
    fn round_trip_without_optional_fields() {
        let sound = minimal_sound();
        let decoded = decode_sound(&encode_sound(&sound)).unwrap();
        assert_eq!(decoded, sound);
        assert_eq!(decoded.geotag, None);
        assert_eq!(decoded.images.large_size_spectral_url, None);
        assert!(decoded.tags.is_empty());
    }

    #[test]
    fn round_trip_preserves_subsecond_timestamp() {
        let mut sound = full_sound();
        sound.created = "2013-11-03T09:14:28.250".parse::<NaiveDateTime>().unwrap();
        let decoded = decode_sound(&encode_sound(&sound)).unwrap();
        assert_eq!(decoded.created, sound.created);
    }

    #[test]
    fn empty_optional_string_stays_distinct_from_absent() {
        let mut sound = minimal_sound();
        sound.images.large_size_spectral_url = Some(String::new());
        let decoded = decode_sound(&encode_sound(&sound)).unwrap();
        assert_eq!(decoded.images.large_size_spectral_url, Some(String::new()));
    }

    #[test]
    fn truncated_buffer_is_unexpected_eof() {
        let bytes = encode_sound(&full_sound());
        let err = decode_sound(&bytes[..bytes.len() - 1]).unwrap_err();
        assert_matches!(err, WireError::UnexpectedEof);
    }

    #[test]
    fn empty_buffer_is_unexpected_eof() {
        assert_matches!(decode_sound(&[]), Err(WireError::UnexpectedEof));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = encode_sound(&full_sound());
        bytes.push(0);
        let err = decode_sound(&bytes).unwrap_err();
        assert_matches!(err, WireError::TrailingBytes(1));
    }

    #[test]
    fn presence_flag_other_than_zero_or_one_is_rejected() {
        let sound = minimal_sound();
        let mut bytes = encode_sound(&sound);

        // Offset of the geotag presence byte: id, then three
        // length-prefixed strings and the empty tag-list count.
        let flag_at = 8
            + 4 + sound.url.len()
            + 4 + sound.name.len()
            + 4
            + 4 + sound.description.len();
        assert_eq!(bytes[flag_at], 0);

        bytes[flag_at] = 2;
        let err = decode_sound(&bytes).unwrap_err();
        assert_matches!(err, WireError::InvalidPresenceFlag(2));
    }

    #[test]
    fn non_utf8_string_bytes_are_rejected() {
        let sound = minimal_sound();
        let mut bytes = encode_sound(&sound);

        // First byte of the url string, right after the id and length prefix.
        bytes[12] = 0xFF;
        let err = decode_sound(&bytes).unwrap_err();
        assert_matches!(err, WireError::InvalidUtf8(_));
    }
}
