//! Shared visualization utilities for the solid-BSP demo.

use macroquad::prelude::*;
use nalgebra::Point2;
use solid_bsp::{PointClass, Segment, Simplex};

/// Maps world coordinates to screen pixels (y up in world, y down on screen).
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Screen position of the world origin.
    pub origin: Vec2,
    /// Pixels per world unit.
    pub scale: f32,
}

impl Viewport {
    /// Creates a viewport with the world origin at `origin` screen pixels.
    pub fn new(origin: Vec2, scale: f32) -> Self {
        Self { origin, scale }
    }

    /// Converts a world point to screen pixels.
    pub fn to_screen(&self, p: Point2<f32>) -> Vec2 {
        vec2(
            self.origin.x + p.x * self.scale,
            self.origin.y - p.y * self.scale,
        )
    }

    /// Converts a screen position back to world coordinates.
    pub fn to_world(&self, screen: Vec2) -> Point2<f32> {
        Point2::new(
            (screen.x - self.origin.x) / self.scale,
            (self.origin.y - screen.y) / self.scale,
        )
    }
}

/// Builds the closed outline through `points`, one segment per edge.
///
/// Wind the points counter-clockwise for an outer boundary (outward normals)
/// and clockwise for a hole.
pub fn outline_segments(points: &[Point2<f32>]) -> Vec<Segment> {
    (0..points.len())
        .map(|i| Segment::new(points[i], points[(i + 1) % points.len()]))
        .collect()
}

/// An L-shaped solid with a square hole in its lower arm.
///
/// The outer outline is counter-clockwise, the hole clockwise, so every
/// normal points out of the solid.
pub fn l_shape_with_hole() -> Vec<Segment> {
    let outer = [
        Point2::new(0.0, 0.0),
        Point2::new(6.0, 0.0),
        Point2::new(6.0, 2.5),
        Point2::new(2.5, 2.5),
        Point2::new(2.5, 6.0),
        Point2::new(0.0, 6.0),
    ];
    let hole = [
        Point2::new(3.5, 0.75),
        Point2::new(3.5, 1.75),
        Point2::new(5.0, 1.75),
        Point2::new(5.0, 0.75),
    ];

    let mut segments = outline_segments(&outer);
    segments.extend(outline_segments(&hole));
    segments
}

/// Color for a classification result: solid red-ish, empty blue-ish,
/// boundary yellow.
pub fn classification_color(class: PointClass) -> Color {
    match class {
        PointClass::InSolid => Color::from_rgba(230, 90, 70, 255),
        PointClass::InEmptySpace => Color::from_rgba(60, 90, 140, 255),
        PointClass::OnBoundary => YELLOW,
    }
}

/// Draws a boundary segment, optionally with a tick showing its normal.
pub fn draw_segment(segment: &Segment, viewport: &Viewport, show_normal: bool) {
    let a = viewport.to_screen(segment.start());
    let b = viewport.to_screen(segment.end());
    draw_line(a.x, a.y, b.x, b.y, 2.0, WHITE);

    if show_normal {
        let mid = viewport.to_screen(segment.midpoint());
        let n = segment.normal().normalize();
        // World +y is screen -y, so the tick flips vertically.
        let tick = vec2(n.x, -n.y) * 12.0;
        draw_line(mid.x, mid.y, mid.x + tick.x, mid.y + tick.y, 1.0, GREEN);
    }
}
