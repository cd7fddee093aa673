//! Shared visualization utilities for the plane split viewer.

use macroquad::prelude::*;
use nalgebra::{Point3, Vector3};
use plane_split::{Partition, Plane, Polygon};

pub mod navigator;
pub use navigator::{Group, PieceNavigator};

/// Bottom heights of the seven comb teeth.
const TOOTH_BOTTOMS: [f64; 7] = [0.0, 0.0, 3.5, 0.0, 3.0, 0.0, 2.0];

/// Height of the gaps between teeth.
const GAP_HEIGHT: f64 = 4.0;

/// Vertices of the comb: seven unit-wide teeth hanging from a roofed strip,
/// 30 vertices in the z = 0 plane, counter-clockwise.
pub fn comb_points() -> Vec<Point3<f64>> {
    let mut points = Vec::with_capacity(30);
    for (i, &bottom) in TOOTH_BOTTOMS.iter().enumerate() {
        let x = 2.0 * i as f64;
        points.push(Point3::new(x, bottom, 0.0));
        points.push(Point3::new(x + 1.0, bottom, 0.0));
        if i + 1 < TOOTH_BOTTOMS.len() {
            points.push(Point3::new(x + 1.0, GAP_HEIGHT, 0.0));
            points.push(Point3::new(x + 2.0, GAP_HEIGHT, 0.0));
        }
    }
    points.extend([
        Point3::new(13.0, 6.0, 0.0),
        Point3::new(9.0, 7.0, 0.0),
        Point3::new(4.0, 7.0, 0.0),
        Point3::new(0.0, 6.0, 0.0),
    ]);
    points
}

/// The comb as a polygon.
pub fn comb_polygon() -> Polygon {
    Polygon::new(&comb_points())
}

/// The plane `y = height`, with `ABOVE` towards +y.
pub fn horizontal_cut(height: f64) -> Plane {
    Plane::new(Vector3::y(), -height)
}

/// Draw color of a group.
pub fn group_color(group: Group) -> Color {
    match group {
        Group::Above => Color::from_rgba(90, 170, 255, 255),
        Group::On => Color::from_rgba(240, 200, 60, 255),
        Group::Below => Color::from_rgba(240, 90, 90, 255),
    }
}

/// Maps the z = 0 plane of world space onto the screen.
///
/// World +y points up on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    /// World point drawn at the screen center.
    pub center: Vec2,
    /// Pixels per world unit.
    pub scale: f32,
    /// Multiplier applied per scroll wheel step.
    pub zoom_speed: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl View {
    pub fn new(center: Vec2, scale: f32) -> Self {
        Self {
            center,
            scale,
            zoom_speed: 1.1,
            min_scale: 10.0,
            max_scale: 400.0,
        }
    }

    /// Sets the zoom configuration (step factor and scale limits).
    pub fn with_zoom(mut self, speed: f32, min: f32, max: f32) -> Self {
        self.zoom_speed = speed;
        self.min_scale = min;
        self.max_scale = max;
        self
    }

    /// Applies `steps` wheel steps; positive zooms in.
    pub fn zoom(&mut self, steps: f32) {
        self.scale = (self.scale * self.zoom_speed.powf(steps)).clamp(self.min_scale, self.max_scale);
    }

    /// Updates the zoom from the mouse wheel.
    pub fn update(&mut self) {
        let scroll = mouse_wheel().1;
        if scroll != 0.0 {
            self.zoom(scroll.signum());
        }
    }

    /// Projects a world point, given the screen size in pixels.
    pub fn project(&self, point: &Point3<f64>, screen: Vec2) -> Vec2 {
        let offset = vec2(point.x as f32, point.y as f32) - self.center;
        vec2(
            screen.x / 2.0 + offset.x * self.scale,
            screen.y / 2.0 - offset.y * self.scale,
        )
    }

    /// Projects a world point onto the current window.
    pub fn to_screen(&self, point: &Point3<f64>) -> Vec2 {
        self.project(point, vec2(screen_width(), screen_height()))
    }
}

/// Draws the outline and vertices of a polygon.
pub fn draw_polygon(view: &View, polygon: &Polygon, color: Color, thickness: f32) {
    let points: Vec<Vec2> = polygon.points().map(|p| view.to_screen(&p)).collect();
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        draw_line(a.x, a.y, b.x, b.y, thickness, color);
    }
    for p in &points {
        draw_circle(p.x, p.y, thickness + 1.0, color);
    }
}

/// Draws every piece of a partition in its group color, the highlighted
/// piece (if any) thicker.
pub fn draw_partition(view: &View, partition: &Partition, highlighted: Option<usize>) {
    for (index, (group, polygon)) in navigator::pieces(partition).enumerate() {
        let thickness = if Some(index) == highlighted { 4.0 } else { 1.5 };
        draw_polygon(view, polygon, group_color(group), thickness);
    }
}

/// Draws the trace of the plane `y = height` across the window.
pub fn draw_cut(view: &View, height: f64) {
    let y = view.to_screen(&Point3::new(0.0, height, 0.0)).y;
    draw_line(0.0, y, screen_width(), y, 1.0, Color::from_rgba(200, 200, 200, 120));
}
