/// Centralized axis naming utilities
///
/// Provides consistent axis names across the analysis stages and the report.
use serde::Serialize;

/// Number of control axes (Roll, Pitch, Yaw)
pub const AXIS_COUNT: usize = 3;

/// Get all axis names as a static array
pub const AXIS_NAMES: [&str; AXIS_COUNT] = ["Roll", "Pitch", "Yaw"];

/// Lowercase keys used in the JSON report
pub const AXIS_KEYS: [&str; AXIS_COUNT] = ["roll", "pitch", "yaw"];

/// A control axis. Discriminants match the axis index used throughout the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Roll = 0,
    Pitch = 1,
    Yaw = 2,
}

impl Axis {
    pub const ALL: [Axis; AXIS_COUNT] = [Axis::Roll, Axis::Pitch, Axis::Yaw];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Axis for a positional index, `None` past Yaw
    pub fn from_index(index: usize) -> Option<Axis> {
        Self::ALL.get(index).copied()
    }

    /// Display name ("Roll")
    pub fn name(self) -> &'static str {
        AXIS_NAMES[self.index()]
    }

    /// Report key ("roll")
    pub fn key(self) -> &'static str {
        AXIS_KEYS[self.index()]
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_from_index() {
        assert_eq!(Axis::from_index(0), Some(Axis::Roll));
        assert_eq!(Axis::from_index(1), Some(Axis::Pitch));
        assert_eq!(Axis::from_index(2), Some(Axis::Yaw));
        assert_eq!(Axis::from_index(3), None);
    }

    #[test]
    fn test_axis_names_and_keys() {
        assert_eq!(Axis::Roll.name(), "Roll");
        assert_eq!(Axis::Pitch.key(), "pitch");
        assert_eq!(Axis::Yaw.to_string(), "Yaw");
        assert_eq!(serde_json::to_string(&Axis::Yaw).unwrap(), "\"yaw\"");
    }
}
