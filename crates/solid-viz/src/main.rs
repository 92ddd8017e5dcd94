//! Interactive demo: point classification and ray casting against a solid.
//!
//! Controls: move the mouse to aim the ray, left-click to move the ray
//! origin, G toggles the sample grid, N toggles boundary normals.

use macroquad::prelude::*;
use nalgebra::{Point2, Vector2};
use solid_bsp::{BalancedSplits, PointClass, Ray, SolidBsp, Tolerance};
use solid_viz::{classification_color, draw_segment, l_shape_with_hole, Viewport};

const GRID_STEP: f32 = 0.25;

#[macroquad::main("Solid BSP")]
async fn main() {
    let tol = Tolerance::default();
    let boundary = l_shape_with_hole();
    let tree = SolidBsp::from_simplices(boundary, &BalancedSplits::default(), tol);

    let mut ray_origin = Point2::new(-1.5, 3.0);
    let mut show_grid = true;
    let mut show_normals = false;

    loop {
        clear_background(BLACK);
        let viewport = Viewport::new(vec2(120.0, screen_height() - 100.0), 60.0);

        if is_key_pressed(KeyCode::G) {
            show_grid = !show_grid;
        }
        if is_key_pressed(KeyCode::N) {
            show_normals = !show_normals;
        }

        let mouse = viewport.to_world(mouse_position().into());
        if is_mouse_button_pressed(MouseButton::Left) {
            ray_origin = mouse;
        }

        if show_grid {
            let mut probe = Point2::new(-1.0, -1.0);
            while probe.y <= 7.0 {
                probe.x = -1.0;
                while probe.x <= 7.0 {
                    let class = tree.classify(&probe, tol);
                    let p = viewport.to_screen(probe);
                    draw_circle(p.x, p.y, 2.5, classification_color(class));
                    probe.x += GRID_STEP;
                }
                probe.y += GRID_STEP;
            }
        }

        for id in 0..tree.simplex_count() {
            draw_segment(tree.simplex(id as u32), &viewport, show_normals);
        }

        // Ray from the origin toward the mouse, drawn to its first hit.
        let aim: Vector2<f32> = mouse - ray_origin;
        let hit_text = if aim.norm() > 1e-3 {
            let ray = Ray::new(ray_origin, aim);
            let from = viewport.to_screen(ray_origin);
            match tree.cast_ray(&ray, tol) {
                Some(hit) => {
                    let to = viewport.to_screen(hit.point);
                    draw_line(from.x, from.y, to.x, to.y, 2.0, ORANGE);
                    draw_circle(to.x, to.y, 5.0, YELLOW);
                    format!("hit: distance {:.3}, segment #{}", hit.t, hit.simplex)
                }
                None => {
                    let to = viewport.to_screen(ray.at(20.0));
                    draw_line(from.x, from.y, to.x, to.y, 1.0, DARKGRAY);
                    "no hit".to_string()
                }
            }
        } else {
            String::new()
        };
        let o = viewport.to_screen(ray_origin);
        draw_circle(o.x, o.y, 4.0, ORANGE);

        let class = tree.classify(&mouse, tol);
        let class_text = match class {
            PointClass::InSolid => "in solid",
            PointClass::InEmptySpace => "in empty space",
            PointClass::OnBoundary => "on boundary",
        };

        draw_text("Solid BSP: classification + ray casting", 20.0, 30.0, 28.0, WHITE);
        draw_text(
            &format!(
                "{} nodes, depth {}, {} simplices",
                tree.node_count(),
                tree.depth(),
                tree.simplex_count()
            ),
            20.0,
            55.0,
            18.0,
            DARKGRAY,
        );
        draw_text(
            &format!("mouse: ({:.2}, {:.2}) {}", mouse.x, mouse.y, class_text),
            20.0,
            75.0,
            18.0,
            classification_color(class),
        );
        if !hit_text.is_empty() {
            draw_text(&hit_text, 20.0, 95.0, 18.0, ORANGE);
        }
        draw_text(
            "[click] move ray origin | [G] grid | [N] normals",
            20.0,
            screen_height() - 20.0,
            16.0,
            DARKGRAY,
        );

        next_frame().await
    }
}
