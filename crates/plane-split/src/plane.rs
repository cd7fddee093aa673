//! Plane representation with a self-calibrating coincidence tolerance.

use nalgebra::{Point3, Vector3};

use crate::{PolygonError, Where};

/// A plane in 3D space, represented as `normal · point + d = 0`.
///
/// The plane carries its own classification tolerance `epsilon`. It starts at
/// zero (or at a caller-supplied floor) and is widened every time a point that
/// is known to lie on the plane is registered with [`Plane::update_epsilon`].
/// A plane built from a polygon's vertices therefore classifies those vertices
/// as [`Where::ON`] no matter how noisy they are. The tolerance never shrinks.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    normal: Vector3<f64>,
    d: f64,
    epsilon: f64,
}

impl Plane {
    /// Creates a plane from a normal vector and offset term `d`.
    ///
    /// Both are scaled so that the normal has unit length; the plane itself is
    /// unchanged. The tolerance starts at zero.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn new(normal: Vector3<f64>, d: f64) -> Self {
        let norm = normal.norm();
        assert!(norm > 0.0, "Plane normal cannot be zero");
        Self {
            normal: normal / norm,
            d: d / norm,
            epsilon: 0.0,
        }
    }

    /// Creates a plane through `point` with the given normal.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn from_point_and_normal(point: Point3<f64>, normal: Vector3<f64>) -> Self {
        let norm = normal.norm();
        assert!(norm > 0.0, "Plane normal cannot be zero");
        let unit_normal = normal / norm;
        Self {
            normal: unit_normal,
            d: -unit_normal.dot(&point.coords),
            epsilon: 0.0,
        }
    }

    /// Creates the support plane of an ordered point list using Newell's method.
    ///
    /// The normal is the normalized sum of `pᵢ × pᵢ₊₁` over consecutive pairs
    /// (wrapping around), so it follows the right-hand rule of the winding. The
    /// plane passes through the average of the points, and every point is
    /// registered with [`Plane::update_epsilon`].
    ///
    /// # Panics
    /// Panics if fewer than three points are given or the points are collinear.
    pub fn from_points(points: &[Point3<f64>]) -> Self {
        assert!(
            points.len() >= 3,
            "Plane needs at least 3 points, got {}",
            points.len()
        );
        match Self::try_from_points(points) {
            Ok(plane) => plane,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible form of [`Plane::from_points`].
    pub fn try_from_points(points: &[Point3<f64>]) -> Result<Self, PolygonError> {
        if points.len() < 3 {
            return Err(PolygonError::TooFewPoints {
                count: points.len(),
            });
        }

        let mut normal = Vector3::zeros();
        let mut sum = Vector3::zeros();
        for (i, p) in points.iter().enumerate() {
            let q = &points[(i + 1) % points.len()];
            normal += p.coords.cross(&q.coords);
            sum += p.coords;
        }

        let norm = normal.norm();
        if norm <= 0.0 || !norm.is_finite() {
            return Err(PolygonError::DegenerateNormal);
        }

        let normal = normal / norm;
        let centroid = sum / points.len() as f64;
        let mut plane = Self {
            normal,
            d: -normal.dot(&centroid),
            epsilon: 0.0,
        };
        for p in points {
            plane.update_epsilon(p);
        }
        Ok(plane)
    }

    /// Raises the tolerance to at least `epsilon`.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = self.epsilon.max(epsilon.abs());
        self
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Returns the offset term `d` of `normal · point + d = 0`.
    #[inline]
    pub fn d(&self) -> f64 {
        self.d
    }

    /// Returns the current classification tolerance.
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Computes the signed distance from a point to the plane.
    /// Positive on the side the normal points to.
    #[inline]
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        self.normal.dot(&point.coords) + self.d
    }

    /// Classifies which side of the plane a point lies on, within the
    /// plane's tolerance.
    pub fn which_side(&self, point: &Point3<f64>) -> Where {
        let dist = self.signed_distance(point);
        if dist < -self.epsilon {
            Where::BELOW
        } else if dist > self.epsilon {
            Where::ABOVE
        } else {
            Where::ON
        }
    }

    /// Registers a point known to lie on the plane, widening the tolerance
    /// so that the point classifies as [`Where::ON`].
    pub fn update_epsilon(&mut self, point: &Point3<f64>) {
        let dist = self.signed_distance(point).abs();
        if dist > self.epsilon {
            log::trace!("plane epsilon widened from {} to {}", self.epsilon, dist);
            self.epsilon = dist;
        }
    }

    /// Returns the point where segment `pq` crosses the plane.
    ///
    /// The caller must have checked (with [`Plane::which_side`]) that `p` and `q`
    /// lie strictly on opposite sides.
    ///
    /// # Panics
    /// Panics if the segment is parallel to the plane.
    pub fn on_point(&self, p: &Point3<f64>, q: &Point3<f64>) -> Point3<f64> {
        let direction = q - p;
        let denom = self.normal.dot(&direction);
        assert!(denom != 0.0, "Segment is parallel to the plane");

        let t = -self.signed_distance(p) / denom;
        p + direction * t
    }

    /// Returns the same plane with the normal flipped; above and below swap.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            d: -self.d,
            epsilon: self.epsilon,
        }
    }
}
