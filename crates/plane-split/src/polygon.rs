//! Polygon represented as a cycle of directed edges on a support plane.

use nalgebra::Point3;

use crate::edge::{EdgeCycle, EdgeRef};
use crate::{Plane, PolygonError, Where};

/// A simple planar polygon in 3D space.
///
/// The boundary is a closed cycle of directed edges. The support plane is
/// computed once from the input vertices (Newell's method) and is inherited
/// unchanged by every piece the polygon is split into.
#[derive(Debug, Clone)]
pub struct Polygon {
    plane: Plane,
    cycle: EdgeCycle,
}

impl Polygon {
    /// Creates a polygon from an ordered list of coplanar vertices.
    ///
    /// Coplanarity is not checked; the support plane's tolerance grows to
    /// cover any deviation.
    ///
    /// # Panics
    /// Panics if fewer than 3 points are given or the points are collinear.
    pub fn new(points: &[Point3<f64>]) -> Self {
        let plane = Plane::from_points(points);
        Self {
            plane,
            cycle: EdgeCycle::from_points(points),
        }
    }

    /// Fallible form of [`Polygon::new`].
    pub fn try_new(points: &[Point3<f64>]) -> Result<Self, PolygonError> {
        let plane = Plane::try_from_points(points)?;
        Ok(Self {
            plane,
            cycle: EdgeCycle::from_points(points),
        })
    }

    /// Builds a piece of a split polygon around an already closed cycle.
    pub(crate) fn from_cycle(plane: Plane, cycle: EdgeCycle) -> Self {
        debug_assert!(cycle.is_closed(), "split produced an open cycle");
        Self { plane, cycle }
    }

    /// Returns the support plane.
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Returns the number of vertices (and edges).
    #[inline]
    pub fn n_points(&self) -> usize {
        self.cycle.len()
    }

    /// Returns the edge boundary traversal starts from.
    #[inline]
    pub fn first(&self) -> EdgeRef<'_> {
        EdgeRef::new(&self.cycle, self.cycle.anchor())
    }

    /// Iterates over the boundary edges, starting at [`Polygon::first`].
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        self.cycle
            .walk(self.cycle.anchor())
            .map(|id| EdgeRef::new(&self.cycle, id))
    }

    /// Iterates over the vertices in boundary order.
    pub fn points(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.cycle
            .walk(self.cycle.anchor())
            .map(|id| self.cycle.src_point(id))
    }

    /// Returns `true` if the edge cycle is closed and consistent.
    pub fn is_closed(&self) -> bool {
        self.cycle.is_closed()
    }

    /// Returns the union of the classifications of every vertex against
    /// `plane`, without touching the edge tags.
    pub fn classify(&self, plane: &Plane) -> Where {
        self.points()
            .fold(Where::NOWHERE, |acc, p| acc | plane.which_side(&p))
    }

    pub(crate) fn cycle_mut(&mut self) -> &mut EdgeCycle {
        &mut self.cycle
    }

    pub(crate) fn into_parts(self) -> (Plane, EdgeCycle) {
        (self.plane, self.cycle)
    }
}
