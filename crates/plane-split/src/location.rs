//! Point and edge classification tags relative to a plane.

use bitflags::bitflags;

bitflags! {
    /// Where a point lies relative to a plane, or the union of several such
    /// classifications (for an edge or a whole polygon).
    ///
    /// The empty set is [`Where::NOWHERE`]: the point has not been classified yet.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Where: u8 {
        /// Strictly on the positive side of the normal (beyond epsilon).
        const ABOVE = 1;
        /// Within epsilon of the plane.
        const ON = 1 << 1;
        /// Strictly on the negative side of the normal (beyond epsilon).
        const BELOW = 1 << 2;

        /// An edge whose endpoints lie on opposite sides with nothing on the plane.
        const ABOVE_BELOW = Self::ABOVE.bits() | Self::BELOW.bits();
        const ON_ABOVE = Self::ON.bits() | Self::ABOVE.bits();
        const ON_BELOW = Self::ON.bits() | Self::BELOW.bits();
        /// Points on both sides plus points on the plane.
        const CROSS = Self::ABOVE.bits() | Self::ON.bits() | Self::BELOW.bits();
    }
}

impl Where {
    /// Not classified.
    pub const NOWHERE: Where = Where::empty();

    /// Returns `true` if the set holds points on both sides of the plane.
    #[inline]
    pub fn straddles(self) -> bool {
        self.contains(Where::ABOVE_BELOW)
    }

    /// Sort rank used to order coincident points along a cut line:
    /// `BELOW` first, then `ON`, then `ABOVE`.
    pub(crate) fn rank(self) -> u8 {
        if self == Where::BELOW {
            0
        } else if self == Where::ABOVE {
            2
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combinations_are_unions() {
        assert_eq!(Where::ABOVE | Where::BELOW, Where::ABOVE_BELOW);
        assert_eq!(Where::ON | Where::ABOVE, Where::ON_ABOVE);
        assert_eq!(Where::ON | Where::BELOW, Where::ON_BELOW);
        assert_eq!(Where::ON_ABOVE | Where::BELOW, Where::CROSS);
    }

    #[test]
    fn nowhere_is_identity() {
        assert_eq!(Where::default(), Where::NOWHERE);
        assert_eq!(Where::NOWHERE | Where::ON, Where::ON);
    }

    #[test]
    fn straddles_requires_both_sides() {
        assert!(Where::CROSS.straddles());
        assert!(Where::ABOVE_BELOW.straddles());
        assert!(!Where::ON_ABOVE.straddles());
        assert!(!Where::ON_BELOW.straddles());
    }

    #[test]
    fn rank_orders_below_before_above() {
        assert!(Where::BELOW.rank() < Where::ON.rank());
        assert!(Where::ON.rank() < Where::ABOVE.rank());
    }
}
