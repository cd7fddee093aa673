//! Splitting a polygon by a plane into above, on and below pieces.
//!
//! A polygon whose vertices all lie on one side (or on the plane) is routed
//! whole. Otherwise every edge that crosses the plane is split at the
//! crossing, the on-plane vertices are sorted along the cut line, and each
//! stretch of the cut line that runs through the polygon's interior becomes
//! a *bridge*: two new edges that close one loop on each side. The result is
//! a set of simple loops, each entirely above or entirely below the plane.

use nalgebra::Vector3;

use crate::edge::{EdgeCycle, EdgeId};
use crate::{BelowRouting, List, Plane, Polygon, SplitConfig, Where};

/// The three groups of pieces produced by [`Polygon::partition`].
#[derive(Debug, Default)]
pub struct Partition {
    /// Pieces with every vertex above or on the cut, at least one above.
    pub above: List<Polygon>,
    /// Pieces lying in the cut plane.
    pub on: List<Polygon>,
    /// Pieces with every vertex below or on the cut, at least one below.
    pub below: List<Polygon>,
}

impl Partition {
    /// Creates an empty partition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of pieces in all three groups.
    pub fn len(&self) -> usize {
        self.above.len() + self.on.len() + self.below.len()
    }

    /// Returns `true` if no piece has been collected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Polygon {
    /// Splits the polygon by `cut` and returns the pieces.
    pub fn partition(self, cut: &Plane) -> Partition {
        self.partition_with_config(cut, &SplitConfig::default())
    }

    /// Splits the polygon by `cut` with explicit options.
    pub fn partition_with_config(self, cut: &Plane, config: &SplitConfig) -> Partition {
        let mut partition = Partition::new();
        split_with_config(
            self,
            cut,
            config,
            &mut partition.above,
            &mut partition.on,
            &mut partition.below,
        );
        partition
    }
}

/// Splits `polygon` by `cut`, pushing the pieces onto `above`, `on` and
/// `below`.
///
/// The polygon is consumed: it either lands whole in one of the lists or its
/// edges are redistributed among new pieces that share its support plane.
///
/// # Panics
/// Panics if the cut crosses the polygon in a way no simple polygon can
/// (a crossing into the interior without a matching crossing out).
pub fn split(
    polygon: Polygon,
    cut: &Plane,
    above: &mut List<Polygon>,
    on: &mut List<Polygon>,
    below: &mut List<Polygon>,
) {
    split_with_config(polygon, cut, &SplitConfig::default(), above, on, below);
}

/// [`split`] with explicit options.
pub fn split_with_config(
    mut polygon: Polygon,
    cut: &Plane,
    config: &SplitConfig,
    above: &mut List<Polygon>,
    on: &mut List<Polygon>,
    below: &mut List<Polygon>,
) {
    let n_points = polygon.n_points();
    let (summary, on_edges) = classify(polygon.cycle_mut(), cut);
    log::debug!(
        "split: {} vertices, summary {:?}, {} on-plane vertices after crossing splits",
        n_points,
        summary,
        on_edges.len()
    );

    if summary == Where::ON {
        on.push(polygon);
    } else if !summary.contains(Where::BELOW) {
        above.push(polygon);
    } else if !summary.contains(Where::ABOVE) {
        match config.below_routing {
            BelowRouting::Below => below.push(polygon),
            BelowRouting::On => on.push(polygon),
        }
    } else {
        complex_cut(polygon, cut, on_edges, config, above, on, below);
    }
}

/// Tags every vertex against `cut` and splits each edge whose endpoints lie
/// strictly on opposite sides.
///
/// Returns the union of all tags and the edges whose source lies on the plane
/// (pre-existing ones and the ones created by splitting).
fn classify(cycle: &mut EdgeCycle, cut: &Plane) -> (Where, Vec<EdgeId>) {
    let first = cycle.anchor();
    let first_where = cut.which_side(&cycle.src_point(first));
    cycle.set_src_where(first, first_where);

    let mut summary = first_where;
    let mut on_edges = Vec::new();
    let mut id = first;
    loop {
        let next = cycle.next(id);
        if next != first {
            // Also completes `id`'s destination tag.
            let location = cut.which_side(&cycle.src_point(next));
            cycle.set_src_where(next, location);
            summary |= location;
        }

        if cycle.src_where(id) == Where::ON {
            on_edges.push(id);
        } else if cycle.edge_where(id) == Where::ABOVE_BELOW {
            let point = cut.on_point(&cycle.src_point(id), &cycle.dst_point(id));
            let crossing = cycle.split(id, point);
            cycle.set_src_where(crossing, Where::ON);
            on_edges.push(crossing);
            summary |= Where::ON;
        }

        if next == first {
            break;
        }
        id = next;
    }

    (summary, on_edges)
}

/// How the boundary passes through an on-plane vertex, seen along the cut
/// direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Crossing {
    /// Arrives from above and leaves below: the interior starts here.
    Start,
    /// Arrives from below and leaves above: the interior ends here.
    End,
    /// Stays on one side.
    Touch,
}

/// Side the boundary comes from when it reaches `id`'s source.
///
/// An edge lying in the cut plane counts as above when it runs along the cut
/// direction (the interior is then above it) and as below otherwise.
fn arrival_side(cycle: &EdgeCycle, id: EdgeId) -> Where {
    let prev = cycle.prev(id);
    side_of(cycle, prev, id, cycle.src_where(prev))
}

/// Side the boundary leaves to from `id`'s source.
fn departure_side(cycle: &EdgeCycle, id: EdgeId) -> Where {
    side_of(cycle, id, cycle.next(id), cycle.dst_where(id))
}

/// Side of the edge `from -> to`; `tag` is the tag of its far endpoint.
fn side_of(cycle: &EdgeCycle, from: EdgeId, to: EdgeId, tag: Where) -> Where {
    if tag != Where::ON {
        tag
    } else if cycle.dist(from) < cycle.dist(to) {
        Where::ABOVE
    } else {
        Where::BELOW
    }
}

fn crossing(cycle: &EdgeCycle, id: EdgeId) -> Crossing {
    let arrival = arrival_side(cycle, id);
    let departure = departure_side(cycle, id);
    if arrival == Where::ABOVE && departure == Where::BELOW {
        Crossing::Start
    } else if arrival == Where::BELOW && departure == Where::ABOVE {
        Crossing::End
    } else {
        Crossing::Touch
    }
}

/// One stretch of the cut line to bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bridge {
    start: EdgeId,
    end: EdgeId,
    /// Side the boundary touches the cut from when `end` is a touch vertex
    /// inside the stretch rather than its true end.
    touch: Option<Where>,
}

/// Scan position over the sorted on-plane edges, carried from one bridge to
/// the next within a single complex cut.
#[derive(Debug, Default)]
struct BridgeCursor {
    position: usize,
    /// Start of the next bridge when the previous one stopped at a touch
    /// vertex.
    resume: Option<EdgeId>,
}

impl BridgeCursor {
    /// Finds the next start vertex and the vertex that closes its interior
    /// stretch of the cut line: either the matching end, or a vertex where
    /// the boundary touches the cut without crossing it.
    fn next_bridge(&mut self, cycle: &EdgeCycle, sorted: &[EdgeId]) -> Option<Bridge> {
        let resumed = self
            .resume
            .take()
            .filter(|&id| !cycle.is_removed(id) && crossing(cycle, id) == Crossing::Start);

        let start = match resumed {
            Some(id) => id,
            None => loop {
                let &id = sorted.get(self.position)?;
                self.position += 1;
                if cycle.is_removed(id) {
                    continue;
                }
                match crossing(cycle, id) {
                    Crossing::Start => break id,
                    Crossing::End => panic!("cut line leaves the polygon before entering it"),
                    Crossing::Touch => {}
                }
            },
        };

        while let Some(&id) = sorted.get(self.position) {
            self.position += 1;
            if cycle.is_removed(id) {
                continue;
            }
            match crossing(cycle, id) {
                Crossing::End => {
                    return Some(Bridge {
                        start,
                        end: id,
                        touch: None,
                    });
                }
                Crossing::Start => panic!("cut line enters the polygon twice without leaving"),
                Crossing::Touch => {
                    return Some(Bridge {
                        start,
                        end: id,
                        touch: Some(arrival_side(cycle, id)),
                    });
                }
            }
        }
        panic!("cut line enters the polygon without leaving it");
    }

    /// Records where the scan continues once `bridge` has been added.
    ///
    /// After stopping at a touch vertex the stretch is still open: one copy
    /// of the vertex stays on the unbridged loop and starts the next bridge.
    /// For a touch from below that is the vertex's own edge; for a touch
    /// from above it is the new `below` bridge edge.
    fn bridged(&mut self, bridge: &Bridge, below: EdgeId) {
        self.resume = match bridge.touch {
            None => None,
            Some(side) if side == Where::BELOW => Some(bridge.end),
            Some(_) => Some(below),
        };
    }
}

/// Stores each on-plane vertex's position along `direction` (relative to the
/// first one) and sorts the edges by it. Coincident vertices are ordered by
/// their destination tag, below first.
fn sort_along(cycle: &mut EdgeCycle, on_edges: &mut [EdgeId], direction: &Vector3<f64>) {
    let origin = cycle.src_point(on_edges[0]);
    for &id in on_edges.iter() {
        let dist = direction.dot(&(cycle.src_point(id) - origin));
        cycle.set_dist(id, dist);
    }

    on_edges.sort_by(|&a, &b| {
        cycle
            .dist(a)
            .total_cmp(&cycle.dist(b))
            .then_with(|| cycle.dst_where(a).rank().cmp(&cycle.dst_where(b).rank()))
    });
}

/// Connects `start` and `end` across the interior with two new on-plane
/// edges, splitting their cycle in two.
///
/// Returns `(below, above)`: the edge closing the loop that leaves `start`
/// downwards, and the edge closing the loop that leaves `end` upwards.
fn add_bridge(cycle: &mut EdgeCycle, start: EdgeId, end: EdgeId) -> (EdgeId, EdgeId) {
    let start_prev = cycle.prev(start);
    let end_prev = cycle.prev(end);

    let below = cycle.push_detached(cycle.src_point(end));
    let above = cycle.push_detached(cycle.src_point(start));
    for (id, twin) in [(below, end), (above, start)] {
        cycle.set_src_where(id, Where::ON);
        cycle.set_dist(id, cycle.dist(twin));
    }

    cycle.link(end_prev, below);
    cycle.link(below, start);
    cycle.link(start_prev, above);
    cycle.link(above, end);
    cycle.grow(2);

    (below, above)
}

/// Returns `true` if `id` and both its neighbours lie on the plane and `id`
/// sits strictly between them along the cut line.
fn is_redundant(cycle: &EdgeCycle, id: EdgeId) -> bool {
    let prev = cycle.prev(id);
    let next = cycle.next(id);
    if prev == id || prev == next {
        return false;
    }
    if [prev, id, next]
        .iter()
        .any(|&e| cycle.src_where(e) != Where::ON)
    {
        return false;
    }

    let (a, b, c) = (cycle.dist(prev), cycle.dist(id), cycle.dist(next));
    (a < b && b < c) || (a > b && b > c)
}

/// Removes redundant on-plane vertices among `candidates`. Returns how many
/// were removed.
fn maximize(cycle: &mut EdgeCycle, candidates: &[EdgeId]) -> usize {
    let mut merged = 0;
    for &id in candidates {
        if !cycle.is_removed(id) && is_redundant(cycle, id) {
            log::trace!("merging collinear vertex {:?}", cycle.src_point(id));
            cycle.unlink(id);
            merged += 1;
        }
    }
    merged
}

fn complex_cut(
    polygon: Polygon,
    cut: &Plane,
    mut on_edges: Vec<EdgeId>,
    config: &SplitConfig,
    above: &mut List<Polygon>,
    on: &mut List<Polygon>,
    below: &mut List<Polygon>,
) {
    assert!(
        !on_edges.is_empty(),
        "polygon straddles the cut but has no vertex on it"
    );

    let (plane, mut cycle) = polygon.into_parts();
    let direction = cut.normal().cross(&plane.normal());
    assert!(
        direction.norm() > 0.0,
        "cut plane is parallel to the polygon's support plane"
    );

    sort_along(&mut cycle, &mut on_edges, &direction);

    let mut cursor = BridgeCursor::default();
    let mut anchors = on_edges.clone();
    let mut bridges = 0;
    let mut merged = 0;
    while let Some(bridge) = cursor.next_bridge(&cycle, &on_edges) {
        let Bridge { start, end, touch } = bridge;
        let start_prev = cycle.prev(start);
        let end_prev = cycle.prev(end);
        let (below_edge, above_edge) = add_bridge(&mut cycle, start, end);
        cursor.bridged(&bridge, below_edge);
        log::trace!(
            "bridge {:?} -> {:?}, touch {:?}",
            cycle.src_point(start),
            cycle.src_point(end),
            touch
        );
        anchors.push(below_edge);
        anchors.push(above_edge);
        bridges += 1;

        if config.merge_collinear {
            merged += maximize(
                &mut cycle,
                &[start, end, below_edge, above_edge, start_prev, end_prev],
            );
        }
    }
    assert!(bridges > 0, "polygon straddles the cut but no bridge was found");

    let mut visited = vec![false; cycle.capacity()];
    let mut pieces = 0;
    for id in anchors {
        if cycle.is_removed(id) || visited[id.index()] {
            continue;
        }

        let mut side = Where::NOWHERE;
        let mut n_points = 0;
        for e in cycle.walk(id) {
            visited[e.index()] = true;
            side |= cycle.src_where(e);
            n_points += 1;
        }
        debug_assert!(!side.straddles(), "bridged loop still crosses the cut");
        debug_assert!(n_points >= 3, "bridged loop has only {n_points} vertices");

        let piece = Polygon::from_cycle(plane.clone(), cycle.extract(id));
        if side.contains(Where::ABOVE) {
            above.push(piece);
        } else if side.contains(Where::BELOW) {
            below.push(piece);
        } else {
            on.push(piece);
        }
        pieces += 1;
    }

    log::debug!(
        "complex cut: {} bridges, {} collinear merges, {} pieces",
        bridges,
        merged,
        pieces
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn make_polygon(points: &[[f64; 2]]) -> Polygon {
        let points: Vec<_> = points
            .iter()
            .map(|p| Point3::new(p[0], p[1], 0.0))
            .collect();
        Polygon::new(&points)
    }

    fn unit_square() -> Polygon {
        make_polygon(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]])
    }

    /// Comb with seven teeth hanging from a roofed strip. Teeth 0, 1, 3, 5
    /// and 6 cross y = 3, tooth 2 stops above it and tooth 4 rests on it.
    fn comb() -> Polygon {
        let bottoms = [0.0, 0.0, 3.5, 0.0, 3.0, 0.0, 2.0];
        let mut points = Vec::new();
        for (i, &y) in bottoms.iter().enumerate() {
            let x = 2.0 * i as f64;
            points.push([x, y]);
            points.push([x + 1.0, y]);
            if i + 1 < bottoms.len() {
                points.push([x + 1.0, 4.0]);
                points.push([x + 2.0, 4.0]);
            }
        }
        points.extend([[13.0, 6.0], [9.0, 7.0], [4.0, 7.0], [0.0, 6.0]]);
        make_polygon(&points)
    }

    fn horizontal(y: f64) -> Plane {
        Plane::new(Vector3::new(0.0, 1.0, 0.0), -y)
    }

    fn area(polygon: &Polygon) -> f64 {
        let points: Vec<_> = polygon.points().collect();
        let mut sum = Vector3::zeros();
        for (i, p) in points.iter().enumerate() {
            sum += p.coords.cross(&points[(i + 1) % points.len()].coords);
        }
        sum.norm() / 2.0
    }

    fn total_points(list: &List<Polygon>) -> usize {
        list.iter().map(Polygon::n_points).sum()
    }

    fn sorted_points(polygon: &Polygon) -> Vec<[i64; 2]> {
        let mut points: Vec<_> = polygon
            .points()
            .map(|p| [(p.x * 1000.0).round() as i64, (p.y * 1000.0).round() as i64])
            .collect();
        points.sort();
        points
    }

    fn distance_to_segment(p: &Point3<f64>, a: &Point3<f64>, b: &Point3<f64>) -> f64 {
        let ab = b - a;
        let t = ((p - a).dot(&ab) / ab.norm_squared()).clamp(0.0, 1.0);
        (p - (a + ab * t)).norm()
    }

    /// No vertex lies on an edge it does not bound.
    fn is_simple(polygon: &Polygon) -> bool {
        let points: Vec<_> = polygon.points().collect();
        let n = points.len();
        (0..n).all(|i| {
            (0..n)
                .filter(|&j| j != i && (j + 1) % n != i)
                .all(|j| distance_to_segment(&points[i], &points[j], &points[(j + 1) % n]) > 1e-9)
        })
    }

    #[test]
    fn square_split_in_half() {
        let cut = Plane::new(Vector3::new(1.0, 0.0, 0.0), -0.5);
        let result = unit_square().partition(&cut);

        assert_eq!(result.above.len(), 1);
        assert_eq!(result.below.len(), 1);
        assert!(result.on.is_empty());

        let right = result.above.peek().unwrap();
        let left = result.below.peek().unwrap();
        assert_eq!(right.n_points(), 4);
        assert_eq!(left.n_points(), 4);
        assert!(right.is_closed());
        assert!(left.is_closed());

        assert_eq!(
            sorted_points(right),
            vec![[500, 0], [500, 1000], [1000, 0], [1000, 1000]]
        );
        assert_eq!(
            sorted_points(left),
            vec![[0, 0], [0, 1000], [500, 0], [500, 1000]]
        );

        for piece in [right, left] {
            let on_count = piece
                .points()
                .filter(|p| cut.which_side(p) == Where::ON)
                .count();
            assert_eq!(on_count, 2);
            assert_relative_eq!(area(piece), 0.5);
        }
    }

    #[test]
    fn pieces_keep_the_support_plane() {
        let square = unit_square();
        let support = square.plane().clone();
        let cut = Plane::new(Vector3::new(1.0, 1.0, 0.0), -1.0);
        let result = square.partition(&cut);
        for piece in result.above.iter().chain(result.below.iter()) {
            assert_eq!(piece.plane(), &support);
        }
    }

    #[test]
    fn comb_cut_at_three() {
        let cut = horizontal(3.0);
        let polygon = comb();
        assert_eq!(polygon.n_points(), 30);
        let original_area = area(&polygon);

        let result = polygon.partition(&cut);
        assert_eq!(result.above.len(), 1);
        assert_eq!(result.below.len(), 5);
        assert!(result.on.is_empty());

        // 10 crossing splits plus 2 edges for each of the 5 bridges.
        assert_eq!(total_points(&result.above) + total_points(&result.below), 50);
        assert_eq!(result.above.peek().unwrap().n_points(), 30);

        for tooth in &result.below {
            assert_eq!(tooth.n_points(), 4);
            let at_cut = tooth.points().filter(|p| p.y == 3.0).count();
            assert_eq!(at_cut, 2);
            assert!(tooth.points().all(|p| p.y <= 3.0));
        }

        let pieces_area: f64 = result
            .above
            .iter()
            .chain(result.below.iter())
            .map(area)
            .sum();
        assert_relative_eq!(pieces_area, original_area, epsilon = 1e-9);

        // Every new vertex sits exactly on the cut.
        let above = result.above.peek().unwrap();
        let on_line: Vec<_> = above
            .points()
            .filter(|p| cut.which_side(p) == Where::ON)
            .map(|p| p.x)
            .collect();
        assert_eq!(on_line.len(), 12);
        assert!(on_line.iter().all(|&x| x.fract() == 0.0));
    }

    #[test]
    fn split_outputs_are_consistent() {
        let cut = horizontal(3.0);
        let mut above = List::new();
        let mut on = List::new();
        let mut below = List::new();
        split(comb(), &cut, &mut above, &mut on, &mut below);

        for piece in &above {
            assert!(piece.is_closed());
            let summary = piece.classify(&cut);
            assert!(summary.contains(Where::ABOVE));
            assert!(!summary.contains(Where::BELOW));
        }
        for piece in &below {
            assert!(piece.is_closed());
            let summary = piece.classify(&cut);
            assert!(summary.contains(Where::BELOW));
            assert!(!summary.contains(Where::ABOVE));
        }
        assert!(on.is_empty());
    }

    #[test]
    fn resplitting_an_above_piece_is_stable() {
        let cut = horizontal(3.0);
        let mut result = comb().partition(&cut);
        let piece = result.above.pop().unwrap();
        let before = sorted_points(&piece);

        let again = piece.partition(&cut);
        assert_eq!(again.above.len(), 1);
        assert!(again.on.is_empty());
        assert!(again.below.is_empty());
        assert_eq!(sorted_points(again.above.peek().unwrap()), before);
    }

    #[test]
    fn trivial_routing() {
        let cut = horizontal(-1.0);
        let result = unit_square().partition(&cut);
        assert_eq!((result.above.len(), result.on.len(), result.below.len()), (1, 0, 0));

        // Resting on the plane from above.
        let cut = horizontal(0.0);
        let result = unit_square().partition(&cut);
        assert_eq!((result.above.len(), result.on.len(), result.below.len()), (1, 0, 0));
        assert_eq!(result.above.peek().unwrap().n_points(), 4);

        let cut = horizontal(2.0);
        let result = unit_square().partition(&cut);
        assert_eq!((result.above.len(), result.on.len(), result.below.len()), (0, 0, 1));

        // Resting on the plane from below.
        let cut = horizontal(1.0);
        let result = unit_square().partition(&cut);
        assert_eq!((result.above.len(), result.on.len(), result.below.len()), (0, 0, 1));

        let cut = Plane::new(Vector3::z(), 0.0);
        let result = unit_square().partition(&cut);
        assert_eq!((result.above.len(), result.on.len(), result.below.len()), (0, 1, 0));
    }

    #[test]
    fn below_can_be_routed_to_on() {
        let config = SplitConfig::new().with_below_routing(BelowRouting::On);

        let result = unit_square().partition_with_config(&horizontal(2.0), &config);
        assert_eq!((result.above.len(), result.on.len(), result.below.len()), (0, 1, 0));

        let result = unit_square().partition_with_config(&horizontal(1.0), &config);
        assert_eq!((result.above.len(), result.on.len(), result.below.len()), (0, 1, 0));

        // Crossing polygons are unaffected.
        let result = unit_square().partition_with_config(&horizontal(0.5), &config);
        assert_eq!((result.above.len(), result.on.len(), result.below.len()), (1, 0, 1));
    }

    #[test]
    fn crossing_through_vertices() {
        let diamond = make_polygon(&[[0.0, -1.0], [1.0, 0.0], [0.0, 1.0], [-1.0, 0.0]]);
        let result = diamond.partition(&horizontal(0.0));

        assert_eq!(result.above.len(), 1);
        assert_eq!(result.below.len(), 1);
        let top = result.above.peek().unwrap();
        let bottom = result.below.peek().unwrap();
        assert_eq!(sorted_points(top), vec![[-1000, 0], [0, 1000], [1000, 0]]);
        assert_eq!(sorted_points(bottom), vec![[-1000, 0], [0, -1000], [1000, 0]]);
    }

    #[test]
    fn collinear_bridge_vertex_is_merged() {
        // The bottom-left edge lies on y = 0 and runs into the bridge.
        let shape = || {
            make_polygon(&[
                [0.0, 0.0],
                [1.0, 0.0],
                [1.0, -1.0],
                [3.0, -1.0],
                [3.0, 1.0],
                [0.0, 1.0],
            ])
        };
        let cut = horizontal(0.0);

        let result = shape().partition(&cut);
        assert_eq!(result.above.len(), 1);
        assert_eq!(result.below.len(), 1);
        assert_eq!(
            sorted_points(result.above.peek().unwrap()),
            vec![[0, 0], [0, 1000], [3000, 0], [3000, 1000]]
        );
        assert_eq!(
            sorted_points(result.below.peek().unwrap()),
            vec![[1000, -1000], [1000, 0], [3000, -1000], [3000, 0]]
        );

        let config = SplitConfig::new().with_merge_collinear(false);
        let result = shape().partition_with_config(&cut, &config);
        assert_eq!(result.above.peek().unwrap().n_points(), 5);
        assert!(result.above.peek().unwrap().is_closed());
    }

    #[test]
    fn notch_touching_from_below_splits_the_bottom() {
        let notched = make_polygon(&[
            [0.0, -2.0],
            [1.0, -2.0],
            [1.5, 0.0],
            [2.0, -2.0],
            [3.0, -2.0],
            [3.0, 1.0],
            [0.0, 1.0],
        ]);
        let original_area = area(&notched);
        let result = notched.partition(&horizontal(0.0));

        assert_eq!(result.above.len(), 1);
        assert_eq!(result.below.len(), 2);
        assert!(result.on.is_empty());
        assert_eq!(
            sorted_points(result.above.peek().unwrap()),
            vec![[0, 0], [0, 1000], [3000, 0], [3000, 1000]]
        );

        let mut bottoms: Vec<_> = result.below.iter().map(sorted_points).collect();
        bottoms.sort();
        assert_eq!(
            bottoms,
            vec![
                vec![[0, -2000], [0, 0], [1000, -2000], [1500, 0]],
                vec![[1500, 0], [2000, -2000], [3000, -2000], [3000, 0]],
            ]
        );

        let pieces: Vec<_> = result.above.iter().chain(result.below.iter()).collect();
        assert!(pieces.iter().all(|p| p.is_closed() && is_simple(p)));
        let pieces_area: f64 = pieces.iter().map(|p| area(p)).sum();
        assert_relative_eq!(pieces_area, original_area, epsilon = 1e-9);
    }

    #[test]
    fn spike_touching_from_above_splits_the_top() {
        let spiked = make_polygon(&[
            [0.0, -2.0],
            [3.0, -2.0],
            [3.0, 2.0],
            [2.0, 2.0],
            [1.5, 0.0],
            [1.0, 2.0],
            [0.0, 2.0],
        ]);
        let result = spiked.partition(&horizontal(0.0));

        assert_eq!(result.above.len(), 2);
        assert_eq!(result.below.len(), 1);
        assert!(result.on.is_empty());
        assert_eq!(
            sorted_points(result.below.peek().unwrap()),
            vec![[0, -2000], [0, 0], [3000, -2000], [3000, 0]]
        );

        let mut tops: Vec<_> = result.above.iter().map(sorted_points).collect();
        tops.sort();
        assert_eq!(
            tops,
            vec![
                vec![[0, 0], [0, 2000], [1000, 2000], [1500, 0]],
                vec![[1500, 0], [2000, 2000], [3000, 0], [3000, 2000]],
            ]
        );
        for piece in result.above.iter().chain(result.below.iter()) {
            assert!(piece.is_closed());
            assert!(is_simple(piece));
        }
    }

    #[test]
    fn several_touches_in_one_stretch() {
        // Two notches from below, each touching y = 0.
        let polygon = make_polygon(&[
            [0.0, -1.0],
            [1.0, -1.0],
            [1.5, 0.0],
            [2.0, -1.0],
            [3.0, -1.0],
            [3.5, 0.0],
            [4.0, -1.0],
            [5.0, -1.0],
            [5.0, 1.0],
            [0.0, 1.0],
        ]);
        let result = polygon.partition(&horizontal(0.0));

        assert_eq!(result.above.len(), 1);
        assert_eq!(result.below.len(), 3);
        assert_eq!(result.above.peek().unwrap().n_points(), 4);
        for piece in &result.below {
            assert_eq!(piece.n_points(), 4);
            assert!(is_simple(piece));
        }
    }

    #[test]
    fn flipped_cut_swaps_groups() {
        let cut = horizontal(3.0);
        let result = comb().partition(&cut);
        let flipped = comb().partition(&cut.flipped());

        assert_eq!(result.above.len(), flipped.below.len());
        assert_eq!(result.below.len(), flipped.above.len());

        let mut teeth: Vec<_> = result.below.iter().map(sorted_points).collect();
        let mut flipped_teeth: Vec<_> = flipped.above.iter().map(sorted_points).collect();
        teeth.sort();
        flipped_teeth.sort();
        assert_eq!(teeth, flipped_teeth);
    }

    #[test]
    fn bridge_scan_pairs_starts_with_ends() {
        let mut polygon = comb();
        let cut = horizontal(3.0);
        let (_, mut on_edges) = classify(polygon.cycle_mut(), &cut);
        let direction = cut.normal().cross(&polygon.plane().normal());
        let cycle = polygon.cycle_mut();
        sort_along(cycle, &mut on_edges, &direction);
        let cycle = &*cycle;

        let xs: Vec<_> = on_edges.iter().map(|&id| cycle.src_point(id).x).collect();
        assert_eq!(
            xs,
            vec![0.0, 1.0, 2.0, 3.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0]
        );

        let kinds: Vec<_> = on_edges.iter().map(|&id| crossing(cycle, id)).collect();
        assert_eq!(kinds[0], Crossing::Start);
        assert_eq!(kinds[1], Crossing::End);
        assert_eq!(kinds[6], Crossing::Touch);
        assert_eq!(kinds[7], Crossing::Touch);

        let mut cursor = BridgeCursor::default();
        let mut pairs = Vec::new();
        while let Some(bridge) = cursor.next_bridge(cycle, &on_edges) {
            assert_eq!(bridge.touch, None);
            pairs.push((cycle.src_point(bridge.start).x, cycle.src_point(bridge.end).x));
        }
        assert_eq!(
            pairs,
            vec![(0.0, 1.0), (2.0, 3.0), (6.0, 7.0), (10.0, 11.0), (12.0, 13.0)]
        );
    }

    fn random_star_polygon(rng: &mut StdRng) -> (Vec<Point3<f64>>, Point3<f64>) {
        let normal: Vector3<f64> = Vector3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        )
        .try_normalize(1e-3)
        .unwrap_or_else(Vector3::z);
        let helper = if normal.x.abs() < 0.9 { Vector3::x() } else { Vector3::y() };
        let u = normal.cross(&helper).normalize();
        let v = normal.cross(&u);
        let center = Point3::new(
            rng.random_range(-5.0..5.0),
            rng.random_range(-5.0..5.0),
            rng.random_range(-5.0..5.0),
        );

        let n = rng.random_range(3..14);
        let step = std::f64::consts::TAU / n as f64;
        let convex = rng.random_bool(0.5);
        let points = (0..n)
            .map(|i| {
                let angle = i as f64 * step + rng.random_range(0.0..0.4 * step);
                let radius = if convex { 2.0 } else { rng.random_range(0.5..3.0) };
                center + (u * angle.cos() + v * angle.sin()) * radius
            })
            .collect();
        (points, center)
    }

    #[test]
    fn random_polygons_split_consistently() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let (points, center) = random_star_polygon(&mut rng);
            let polygon = Polygon::new(&points);
            let original_area = area(&polygon);

            let cut_normal: Vector3<f64> = Vector3::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            )
            .try_normalize(1e-3)
            .unwrap_or_else(Vector3::x);
            let through = center
                + Vector3::new(
                    rng.random_range(-1.5..1.5),
                    rng.random_range(-1.5..1.5),
                    rng.random_range(-1.5..1.5),
                );
            let cut = Plane::from_point_and_normal(through, cut_normal);

            let crossings = points
                .iter()
                .enumerate()
                .filter(|&(i, p)| {
                    let q = &points[(i + 1) % points.len()];
                    (cut.which_side(p) | cut.which_side(q)) == Where::ABOVE_BELOW
                })
                .count();

            let result = polygon.partition(&cut);
            let pieces = result.above.len() + result.below.len();
            assert!(result.on.is_empty());

            for piece in &result.above {
                assert!(piece.is_closed());
                assert!(piece.n_points() >= 3);
                assert!(piece.points().all(|p| cut.signed_distance(&p) > -1e-9));
                assert!(piece.points().any(|p| cut.which_side(&p) == Where::ABOVE));
            }
            for piece in &result.below {
                assert!(piece.is_closed());
                assert!(piece.n_points() >= 3);
                assert!(piece.points().all(|p| cut.signed_distance(&p) < 1e-9));
                assert!(piece.points().any(|p| cut.which_side(&p) == Where::BELOW));
            }

            // Each bridge adds one piece and two vertices.
            let total = total_points(&result.above) + total_points(&result.below);
            assert_eq!(total, points.len() + crossings + 2 * (pieces - 1));

            let pieces_area: f64 = result
                .above
                .iter()
                .chain(result.below.iter())
                .map(area)
                .sum();
            assert_relative_eq!(pieces_area, original_area, epsilon = 1e-9, max_relative = 1e-9);
        }
    }

    /// Star polygon in z = 0 around a center off the line y = 0. Some of the
    /// vertices facing the line are pulled along their ray onto it, so the
    /// boundary runs along, touches and crosses the line at vertices.
    fn snapped_star_polygon(rng: &mut StdRng) -> Vec<Point3<f64>> {
        let sign: f64 = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let center: Point3<f64> = Point3::new(
            rng.random_range(-2.0..2.0),
            sign * rng.random_range(0.3..1.5),
            0.0,
        );

        let n = rng.random_range(3..16);
        let step = std::f64::consts::TAU / n as f64;
        (0..n)
            .map(|i| {
                let angle = i as f64 * step + rng.random_range(0.0..0.4 * step);
                let dir: Vector3<f64> = Vector3::new(angle.cos(), angle.sin(), 0.0);
                let point = center + dir * rng.random_range(0.5..3.0);
                let faces_line = dir.y * sign < -0.2;
                if faces_line && (point.y.abs() < 0.05 || rng.random_bool(0.4)) {
                    let t = -center.y / dir.y;
                    Point3::new(center.x + dir.x * t, 0.0, 0.0)
                } else if point.y.abs() < 0.05 {
                    center + dir * 0.5
                } else {
                    point
                }
            })
            .collect()
    }

    #[test]
    fn vertices_on_the_cut_yield_simple_pieces() {
        let mut rng = StdRng::seed_from_u64(0x70c4);
        let cut = horizontal(0.0);
        for _ in 0..2000 {
            let points = snapped_star_polygon(&mut rng);
            let polygon = Polygon::new(&points);
            let original_area = area(&polygon);

            let result = polygon.partition(&cut);
            assert!(result.on.is_empty());

            for piece in &result.above {
                assert!(piece.is_closed());
                assert!(piece.n_points() >= 3);
                assert!(
                    is_simple(piece),
                    "above piece is not simple: {:?}",
                    piece.points().collect::<Vec<_>>()
                );
                assert!(piece.points().all(|p| p.y > -1e-9));
            }
            for piece in &result.below {
                assert!(piece.is_closed());
                assert!(piece.n_points() >= 3);
                assert!(
                    is_simple(piece),
                    "below piece is not simple: {:?}",
                    piece.points().collect::<Vec<_>>()
                );
                assert!(piece.points().all(|p| p.y < 1e-9));
            }

            let pieces_area: f64 = result
                .above
                .iter()
                .chain(result.below.iter())
                .map(area)
                .sum();
            assert_relative_eq!(pieces_area, original_area, epsilon = 1e-9, max_relative = 1e-9);
        }
    }
}
