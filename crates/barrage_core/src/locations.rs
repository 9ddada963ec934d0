//! Named spawn locations.
//!
//! An ordered list of positions addressable by index. Stage files may also
//! refer to a location by name; names are resolved to indices at load time.

use barrage_shared::Vec2;

use crate::error::{PoolError, PoolResult};

/// A single named spawn point.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnLocation {
    /// Name used by stage files.
    pub name: String,
    /// World position.
    pub position: Vec2,
}

/// Ordered list of spawn points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpawnLocations {
    locations: Vec<SpawnLocation>,
}

impl SpawnLocations {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a location and returns its index.
    pub fn push(&mut self, name: impl Into<String>, position: Vec2) -> usize {
        self.locations.push(SpawnLocation {
            name: name.into(),
            position,
        });
        self.locations.len() - 1
    }

    /// Builder form of [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, position: Vec2) -> Self {
        self.push(name, position);
        self
    }

    /// Position at `index`.
    ///
    /// # Errors
    ///
    /// [`PoolError::IndexOutOfRange`] if `index` is past the end.
    #[inline]
    pub fn resolve(&self, index: usize) -> PoolResult<Vec2> {
        self.locations
            .get(index)
            .map(|l| l.position)
            .ok_or(PoolError::IndexOutOfRange {
                index,
                len: self.locations.len(),
            })
    }

    /// Index of the first location called `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.locations.iter().position(|l| l.name == name)
    }

    /// Number of locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// True if there are no locations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Locations in index order.
    pub fn iter(&self) -> impl Iterator<Item = &SpawnLocation> {
        self.locations.iter()
    }
}

impl FromIterator<(String, Vec2)> for SpawnLocations {
    fn from_iter<T: IntoIterator<Item = (String, Vec2)>>(iter: T) -> Self {
        let mut locations = Self::new();
        for (name, position) in iter {
            locations.push(name, position);
        }
        locations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_index_and_name() {
        let locations = SpawnLocations::new()
            .with("left", Vec2::new(-4.0, 3.0))
            .with("right", Vec2::new(4.0, 3.0));

        assert_eq!(locations.resolve(1).unwrap(), Vec2::new(4.0, 3.0));
        assert_eq!(locations.index_of("left"), Some(0));
        assert_eq!(locations.index_of("center"), None);
    }

    #[test]
    fn test_out_of_range() {
        let locations = SpawnLocations::new().with("only", Vec2::ZERO);
        assert_eq!(
            locations.resolve(5),
            Err(PoolError::IndexOutOfRange { index: 5, len: 1 })
        );
    }
}
