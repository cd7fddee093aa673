//! Recoverable construction errors.

use thiserror::Error;

/// Errors reported by the fallible constructors ([`Plane::try_from_points`],
/// [`Polygon::try_new`]).
///
/// The asserting constructors panic on the same conditions.
///
/// [`Plane::try_from_points`]: crate::Plane::try_from_points
/// [`Polygon::try_new`]: crate::Polygon::try_new
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PolygonError {
    /// A plane or polygon needs at least three points.
    #[error("a polygon needs at least 3 points, got {count}")]
    TooFewPoints {
        /// Number of points that were supplied.
        count: usize,
    },

    /// The points are collinear or coincident, so no normal can be derived.
    #[error("points do not span a plane (Newell normal has zero length)")]
    DegenerateNormal,
}
