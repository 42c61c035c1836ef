// src/types.rs
// Per-axis containers shared by the analysis stages and the report.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::axis_names::{Axis, AXIS_COUNT};

/// One optional value per axis, indexed Roll, Pitch, Yaw.
///
/// Serializes as a map keyed by the lowercase axis name in axis order,
/// leaving out axes without a value.
#[derive(Debug, Clone, PartialEq)]
pub struct PerAxis<T>(pub [Option<T>; AXIS_COUNT]);

impl<T> Default for PerAxis<T> {
    fn default() -> Self {
        PerAxis([None, None, None])
    }
}

impl<T> PerAxis<T> {
    pub fn get(&self, axis: Axis) -> Option<&T> {
        self.0[axis.index()].as_ref()
    }

    pub fn set(&mut self, axis: Axis, value: T) {
        self.0[axis.index()] = Some(value);
    }

    pub fn contains(&self, axis: Axis) -> bool {
        self.0[axis.index()].is_some()
    }

    /// Present entries in axis order
    pub fn iter(&self) -> impl Iterator<Item = (Axis, &T)> {
        Axis::ALL
            .into_iter()
            .filter_map(move |axis| self.get(axis).map(|value| (axis, value)))
    }

    pub fn len(&self) -> usize {
        self.0.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Builds a fully-populated set by evaluating `f` for every axis
    pub fn from_fn(mut f: impl FnMut(Axis) -> T) -> Self {
        PerAxis(Axis::ALL.map(|axis| Some(f(axis))))
    }
}

impl<T: Serialize> Serialize for PerAxis<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (axis, value) in self.iter() {
            map.serialize_entry(axis.key(), value)?;
        }
        map.end()
    }
}
