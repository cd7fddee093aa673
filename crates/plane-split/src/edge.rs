//! Directed edges linked into a circular doubly-linked cycle.
//!
//! Edges live in an arena ([`EdgeCycle`]) and refer to each other through
//! [`EdgeId`] indices. An edge stores only its source point; its destination
//! is the source of its successor. The same holds for classification tags:
//! writing an edge's source tag also sets its predecessor's destination tag.

use nalgebra::Point3;

use crate::Where;

/// Index of an edge inside its [`EdgeCycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
    /// Position of the edge in its arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One boundary segment of a polygon.
#[derive(Debug, Clone)]
pub(crate) struct DirectedEdge {
    src: Point3<f64>,
    src_where: Where,
    /// Projected position along the current cut line. Only meaningful while a
    /// complex cut is sorting and bridging.
    dist: f64,
    next: EdgeId,
    prev: EdgeId,
    removed: bool,
}

impl DirectedEdge {
    fn new(src: Point3<f64>, id: EdgeId) -> Self {
        Self {
            src,
            src_where: Where::NOWHERE,
            dist: 0.0,
            next: id,
            prev: id,
            removed: false,
        }
    }

    /// Source point of the edge.
    #[inline]
    fn src_point(&self) -> Point3<f64> {
        self.src
    }

    /// Classification of the source point against the last cut.
    #[inline]
    fn src_where(&self) -> Where {
        self.src_where
    }
}

/// Arena owning one closed cycle of directed edges.
///
/// Edges unlinked from the cycle keep their slot (marked removed) until the
/// cycle is rebuilt by [`EdgeCycle::extract`].
#[derive(Debug, Clone)]
pub struct EdgeCycle {
    edges: Vec<DirectedEdge>,
    anchor: EdgeId,
    len: usize,
}

impl EdgeCycle {
    /// Creates a cycle of one edge pointing at itself.
    pub fn singleton(point: Point3<f64>) -> Self {
        let id = EdgeId(0);
        Self {
            edges: vec![DirectedEdge::new(point, id)],
            anchor: id,
            len: 1,
        }
    }

    /// Creates a closed cycle with one edge per point, in array order.
    ///
    /// # Panics
    /// Panics if `points` is empty.
    pub fn from_points(points: &[Point3<f64>]) -> Self {
        assert!(!points.is_empty(), "Edge cycle needs at least one point");
        let mut cycle = Self::singleton(points[0]);
        let mut last = cycle.anchor;
        for p in &points[1..] {
            last = cycle.insert_after(last, *p);
        }
        cycle
    }

    /// Number of live edges in the cycle.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false for a cycle built through the public constructors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The edge iteration starts from. Any edge of the cycle is an equally
    /// valid anchor.
    #[inline]
    pub fn anchor(&self) -> EdgeId {
        self.anchor
    }

    /// Number of arena slots, including removed edges.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn next(&self, id: EdgeId) -> EdgeId {
        self.edges[id.0].next
    }

    #[inline]
    pub fn prev(&self, id: EdgeId) -> EdgeId {
        self.edges[id.0].prev
    }

    #[inline]
    pub fn src_point(&self, id: EdgeId) -> Point3<f64> {
        self.edges[id.0].src_point()
    }

    /// Destination point: the source point of the successor.
    #[inline]
    pub fn dst_point(&self, id: EdgeId) -> Point3<f64> {
        self.src_point(self.next(id))
    }

    #[inline]
    pub fn src_where(&self, id: EdgeId) -> Where {
        self.edges[id.0].src_where()
    }

    /// Sets the source tag of `id`, which is also the destination tag of its
    /// predecessor.
    #[inline]
    pub fn set_src_where(&mut self, id: EdgeId, location: Where) {
        self.edges[id.0].src_where = location;
    }

    /// Destination tag: the source tag of the successor.
    #[inline]
    pub fn dst_where(&self, id: EdgeId) -> Where {
        self.src_where(self.next(id))
    }

    /// Union of the source and destination tags.
    #[inline]
    pub fn edge_where(&self, id: EdgeId) -> Where {
        self.src_where(id) | self.dst_where(id)
    }

    #[inline]
    pub(crate) fn dist(&self, id: EdgeId) -> f64 {
        self.edges[id.0].dist
    }

    #[inline]
    pub(crate) fn set_dist(&mut self, id: EdgeId, dist: f64) {
        self.edges[id.0].dist = dist;
    }

    #[inline]
    pub(crate) fn is_removed(&self, id: EdgeId) -> bool {
        self.edges[id.0].removed
    }

    /// Inserts a new edge starting at `point` right after `after`.
    pub fn insert_after(&mut self, after: EdgeId, point: Point3<f64>) -> EdgeId {
        let id = self.push_detached(point);
        let next = self.next(after);
        self.link(after, id);
        self.link(id, next);
        self.len += 1;
        id
    }

    /// Cuts `edge` in two at `point`, returning the new second half. Its
    /// source tag is left [`Where::NOWHERE`] for the caller to set.
    #[inline]
    pub fn split(&mut self, edge: EdgeId, point: Point3<f64>) -> EdgeId {
        self.insert_after(edge, point)
    }

    /// Allocates an edge that is not part of the cycle yet. It must be spliced
    /// in with [`EdgeCycle::link`] before the cycle is traversed again.
    pub(crate) fn push_detached(&mut self, point: Point3<f64>) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(DirectedEdge::new(point, id));
        id
    }

    /// Makes `to` the successor of `from`.
    #[inline]
    pub(crate) fn link(&mut self, from: EdgeId, to: EdgeId) {
        self.edges[from.0].next = to;
        self.edges[to.0].prev = from;
    }

    /// Records that `count` detached edges were spliced into the arena's cycles.
    #[inline]
    pub(crate) fn grow(&mut self, count: usize) {
        self.len += count;
    }

    /// Removes `id` from its cycle, joining its neighbours directly. The
    /// predecessor's edge now runs to the removed edge's destination.
    pub(crate) fn unlink(&mut self, id: EdgeId) {
        let prev = self.prev(id);
        let next = self.next(id);
        debug_assert!(prev != id, "cannot unlink the last edge of a cycle");
        self.link(prev, next);
        let edge = &mut self.edges[id.0];
        edge.removed = true;
        edge.next = id;
        edge.prev = id;
        self.len -= 1;
        if self.anchor == id {
            self.anchor = prev;
        }
    }

    /// Iterates over the edge ids of the cycle that contains `start`.
    pub fn walk(&self, start: EdgeId) -> Walk<'_> {
        Walk {
            cycle: self,
            start,
            current: Some(start),
        }
    }

    /// Copies the cycle reachable from `anchor` into a fresh, compact arena
    /// anchored at the same edge. Tags are carried over; scratch distances
    /// are reset.
    pub(crate) fn extract(&self, anchor: EdgeId) -> EdgeCycle {
        let mut cycle = EdgeCycle::singleton(self.src_point(anchor));
        cycle.set_src_where(cycle.anchor, self.src_where(anchor));
        let mut last = cycle.anchor;
        for id in self.walk(anchor).skip(1) {
            last = cycle.insert_after(last, self.src_point(id));
            cycle.set_src_where(last, self.src_where(id));
        }
        cycle
    }

    /// Checks that following `next` exactly `len()` times from the anchor
    /// returns to it, and that `prev` mirrors `next` along the way.
    pub fn is_closed(&self) -> bool {
        if self.len == 0 {
            return false;
        }
        let mut id = self.anchor;
        for step in 0..self.len {
            let next = self.next(id);
            if self.prev(next) != id || self.is_removed(next) {
                return false;
            }
            id = next;
            if id == self.anchor && step + 1 != self.len {
                return false;
            }
        }
        id == self.anchor
    }
}

/// Iterator over the edge ids of one cycle, produced by [`EdgeCycle::walk`].
pub struct Walk<'a> {
    cycle: &'a EdgeCycle,
    start: EdgeId,
    current: Option<EdgeId>,
}

impl Iterator for Walk<'_> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        let id = self.current?;
        let next = self.cycle.next(id);
        self.current = (next != self.start).then_some(next);
        Some(id)
    }
}

/// Read-only view of one edge, used to navigate a polygon's boundary.
#[derive(Clone, Copy)]
pub struct EdgeRef<'a> {
    cycle: &'a EdgeCycle,
    id: EdgeId,
}

impl<'a> EdgeRef<'a> {
    pub(crate) fn new(cycle: &'a EdgeCycle, id: EdgeId) -> Self {
        Self { cycle, id }
    }

    #[inline]
    pub fn id(&self) -> EdgeId {
        self.id
    }

    #[inline]
    pub fn next(&self) -> EdgeRef<'a> {
        Self::new(self.cycle, self.cycle.next(self.id))
    }

    #[inline]
    pub fn prev(&self) -> EdgeRef<'a> {
        Self::new(self.cycle, self.cycle.prev(self.id))
    }

    #[inline]
    pub fn src_point(&self) -> Point3<f64> {
        self.cycle.src_point(self.id)
    }

    #[inline]
    pub fn dst_point(&self) -> Point3<f64> {
        self.cycle.dst_point(self.id)
    }

    #[inline]
    pub fn src_where(&self) -> Where {
        self.cycle.src_where(self.id)
    }

    #[inline]
    pub fn dst_where(&self) -> Where {
        self.cycle.dst_where(self.id)
    }

    #[inline]
    pub fn edge_where(&self) -> Where {
        self.cycle.edge_where(self.id)
    }
}

impl PartialEq for EdgeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.cycle, other.cycle) && self.id == other.id
    }
}

impl std::fmt::Debug for EdgeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgeRef")
            .field("id", &self.id)
            .field("src", &self.src_point())
            .field("src_where", &self.src_where())
            .finish()
    }
}
