use std::fmt;

/// Handle of a live entity instance (creature index, object handle, ground-item handle).
///
/// Instance handles are only meaningful for the tick they were read on; hosts may
/// recycle them once the entity disappears.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Item definition identifier, shared by every stack of the same item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub u32);

impl From<ItemId> for u32 {
    fn from(id: ItemId) -> u32 {
        id.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item:{}", self.0)
    }
}

/// One discrete world-simulation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Ticks elapsed since `earlier` (zero if `earlier` is in the future).
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// World tile coordinate. `plane` is the floor level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub plane: u8,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y, plane: 0 }
    }

    pub const fn on_plane(x: i32, y: i32, plane: u8) -> Self {
        Self { x, y, plane }
    }

    /// Chebyshev (king-move) distance, or `None` across planes.
    pub fn chebyshev(self, other: Position) -> Option<u32> {
        if self.plane != other.plane {
            return None;
        }
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        Some(dx.max(dy))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.plane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chebyshev_uses_the_larger_axis() {
        let a = Position::new(10, 10);
        assert_eq!(a.chebyshev(Position::new(13, 11)), Some(3));
        assert_eq!(a.chebyshev(Position::new(8, 4)), Some(6));
        assert_eq!(a.chebyshev(a), Some(0));
    }

    #[test]
    fn chebyshev_is_undefined_across_planes() {
        let ground = Position::on_plane(3208, 3220, 0);
        let upstairs = Position::on_plane(3208, 3220, 2);
        assert_eq!(ground.chebyshev(upstairs), None);
    }

    #[test]
    fn chebyshev_handles_extreme_coordinates() {
        let low = Position::new(i32::MIN, 0);
        let high = Position::new(i32::MAX, 0);
        assert_eq!(low.chebyshev(high), Some(u32::MAX));
    }

    #[test]
    fn tick_since_saturates() {
        assert_eq!(Tick(10).since(Tick(4)), 6);
        assert_eq!(Tick(4).since(Tick(10)), 0);
    }
}
