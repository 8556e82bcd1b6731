use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity key of one uploaded sound
///
/// Assigned by the remote service and globally unique there; nothing is
/// enforced locally beyond the 64-bit width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct SoundId(pub i64);

impl SoundId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_equality() {
        assert_eq!(SoundId::new(9), SoundId::new(9));
        assert_ne!(SoundId::new(9), SoundId::new(10));
    }

    #[test]
    fn id_serializes_as_bare_number() {
        let json = serde_json::to_string(&SoundId::new(214239)).unwrap();
        assert_eq!(json, "214239");

        let id: SoundId = serde_json::from_str(&json).unwrap();
        assert_eq!(id.value(), 214239);
    }
}
