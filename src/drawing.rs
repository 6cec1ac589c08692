use crate::camera::Camera;
use cgmath::{InnerSpace, Vector2};
use eframe::egui::{Color32, Pos2, Shape, Stroke, Vec2};
use orbit_sandbox::{BodyId, World};

const PALETTE: [Color32; 6] = [
    Color32::from_rgb(0, 255, 255),
    Color32::from_rgb(144, 238, 144),
    Color32::from_rgb(255, 160, 122),
    Color32::from_rgb(221, 160, 221),
    Color32::from_rgb(135, 206, 250),
    Color32::from_rgb(240, 230, 140),
];
const STATIC_COLOR: Color32 = Color32::from_rgb(255, 215, 0);
const SELECTED_COLOR: Color32 = Color32::WHITE;
const VELOCITY_COLOR: Color32 = Color32::from_rgb(0, 200, 0);
const ACCELERATION_COLOR: Color32 = Color32::from_rgb(230, 60, 60);
const COM_COLOR: Color32 = Color32::from_rgb(255, 0, 255);

/// World units drawn per unit of velocity / acceleration.
const VELOCITY_SCALE: f64 = 10.0;
const ACCELERATION_SCALE: f64 = 500.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct Overlays {
    pub velocity: bool,
    pub acceleration: bool,
    pub center_of_mass: bool,
}

pub fn body_color(id: BodyId, is_static: bool) -> Color32 {
    if is_static {
        STATIC_COLOR
    } else {
        PALETTE[(id.get() % PALETTE.len() as u64) as usize]
    }
}

pub struct DrawHandler {
    pub shapes: Vec<Shape>,
    origin: Vec2,
}

impl DrawHandler {
    /// `origin` is the canvas' top left corner in egui coordinates.
    pub fn new(origin: Pos2) -> DrawHandler {
        DrawHandler {
            shapes: vec![],
            origin: origin.to_vec2(),
        }
    }

    fn to_pos(&self, screen: Vector2<f64>) -> Pos2 {
        Pos2::new(screen.x as f32, screen.y as f32) + self.origin
    }

    pub fn circle(&mut self, pos: Vector2<f64>, radius: f32, color: Color32) {
        self.shapes
            .push(Shape::circle_filled(self.to_pos(pos), radius, color));
    }

    pub fn ring(&mut self, pos: Vector2<f64>, radius: f32, thickness: f32, color: Color32) {
        self.shapes.push(Shape::circle_stroke(
            self.to_pos(pos),
            radius,
            Stroke::new(thickness, color),
        ));
    }

    pub fn line(&mut self, start: Vector2<f64>, end: Vector2<f64>, thickness: f32, color: Color32) {
        self.shapes.push(Shape::line_segment(
            [self.to_pos(start), self.to_pos(end)],
            Stroke::new(thickness, color),
        ));
    }

    pub fn arrow(&mut self, start: Vector2<f64>, end: Vector2<f64>, head: f64, color: Color32) {
        self.line(start, end, 2.0, color);
        let along = end - start;
        if along.magnitude() < head {
            return;
        }
        let back = along.normalize() * head;
        let side = Vector2::new(-back.y, back.x) * 0.5;
        let base = end - back;
        self.shapes.push(Shape::convex_polygon(
            vec![
                self.to_pos(end),
                self.to_pos(base + side),
                self.to_pos(base - side),
            ],
            color,
            Stroke::NONE,
        ));
    }
}

pub fn draw_world(d: &mut DrawHandler, world: &World, camera: &Camera, overlays: &Overlays) {
    let zoom = camera.zoom;

    for (id, body) in world.bodies().iter() {
        let center = camera.world_to_screen(body.position());
        let radius = (body.radius() * zoom).max(1.0) as f32;
        d.circle(center, radius, body_color(id, body.is_static()));

        if world.selected() == Some(id) {
            d.ring(center, radius + 5.0, 2.0, SELECTED_COLOR);
        }

        // Screen y points down, world y up.
        let flip = |v: Vector2<f64>| Vector2::new(v.x, -v.y);
        if overlays.velocity {
            let tip = center + flip(body.velocity()) * (VELOCITY_SCALE * zoom);
            d.arrow(center, tip, 5.0, VELOCITY_COLOR);
        }
        if overlays.acceleration {
            let tip = center + flip(body.acceleration()) * (ACCELERATION_SCALE * zoom);
            d.arrow(center, tip, 5.0, ACCELERATION_COLOR);
        }
    }

    if overlays.center_of_mass && !world.bodies().is_empty() {
        let com = camera.world_to_screen(world.center_of_mass());
        let size = 8.0;
        d.line(com - Vector2::new(size, 0.0), com + Vector2::new(size, 0.0), 1.5, COM_COLOR);
        d.line(com - Vector2::new(0.0, size), com + Vector2::new(0.0, size), 1.5, COM_COLOR);
    }
}
