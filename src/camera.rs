use cgmath::*;

pub const MIN_ZOOM: f64 = 0.05;
pub const MAX_ZOOM: f64 = 20.0;

/// Maps canvas pixels (origin top left, y down) to world units (y up).
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// World point shown at the centre of the canvas.
    pub pos: Vector2<f64>,
    /// Pixels per world unit.
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Camera {
    pub fn new(pos: Vector2<f64>, zoom: f64) -> Camera {
        Self {
            pos,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn screen_to_world(&self, pos: Vector2<f64>) -> Vector2<f64> {
        Vector2 {
            x: (pos.x - self.width * 0.5) / self.zoom + self.pos.x,
            y: -(pos.y - self.height * 0.5) / self.zoom + self.pos.y,
        }
    }

    pub fn world_to_screen(&self, pos: Vector2<f64>) -> Vector2<f64> {
        Vector2 {
            x: (pos.x - self.pos.x) * self.zoom + self.width * 0.5,
            y: -(pos.y - self.pos.y) * self.zoom + self.height * 0.5,
        }
    }

    /// Drags the view along with the pointer.
    pub fn pan(&mut self, screen_delta: Vector2<f64>) {
        self.pos.x -= screen_delta.x / self.zoom;
        self.pos.y += screen_delta.y / self.zoom;
    }

    /// Zooms keeping the world point under `screen_pos` fixed.
    pub fn zoom_about(&mut self, screen_pos: Vector2<f64>, factor: f64) {
        let anchor = self.screen_to_world(screen_pos);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let moved = self.screen_to_world(screen_pos);
        self.pos += anchor - moved;
    }

    /// How far from the view centre new planets may appear.
    pub fn spawn_radius(&self) -> f64 {
        let radius = self.width.min(self.height) * 0.4 / self.zoom;
        if radius > 0.0 { radius } else { 200.0 }
    }
}
