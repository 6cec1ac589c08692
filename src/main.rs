use crate::{
    camera::Camera,
    drawing::{DrawHandler, Overlays},
};
use anyhow::Context;
use cgmath::{Vector2, Zero};
use eframe::egui;
use orbit_sandbox::{SimulationConfig, World};

mod camera;
mod drawing;

struct App {
    world: World,
    camera: Camera,
    last_time: Option<std::time::Instant>,
    stats_open: bool,
    help_open: bool,
    overlays: Overlays,
    pointer: PointerAction,
}

enum PointerAction {
    None,
    Pan,
    Drag,
}

impl App {
    fn new(world: World) -> Self {
        Self {
            world,
            camera: Camera::new(Vector2::zero(), 1.0),
            last_time: None,
            stats_open: true,
            help_open: false,
            overlays: Overlays::default(),
            pointer: PointerAction::None,
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Simulation");
        ui.horizontal(|ui| {
            if ui
                .button(if self.world.is_running() { "Pause" } else { "Resume" })
                .clicked()
            {
                self.world.toggle_pause();
            }
            if ui.button("Reset").clicked() {
                if let Err(err) = self.world.reset() {
                    log::error!("reset failed: {err}");
                }
                self.camera = Camera::new(Vector2::zero(), 1.0);
            }
        });
        ui.horizontal(|ui| {
            if ui.button("Add Planet").clicked() {
                let center = self.camera.pos;
                let radius = self.camera.spawn_radius();
                self.world.add_random_body(center, radius).ok();
            }
            let has_selection = self.world.selected().is_some();
            if ui
                .add_enabled(has_selection, egui::Button::new("Remove Selected"))
                .clicked()
            {
                self.world.remove_selected();
            }
        });

        ui.separator();
        let mut gravity = self.world.params().gravity();
        if ui
            .add(egui::Slider::new(&mut gravity, 0.1..=10.0).text("G"))
            .changed()
        {
            self.world.set_gravity(gravity).ok();
        }
        let mut time_step = self.world.params().time_step();
        if ui
            .add(egui::Slider::new(&mut time_step, 0.01..=1.0).text("dt"))
            .changed()
        {
            self.world.set_time_step(time_step).ok();
        }

        ui.separator();
        ui.checkbox(&mut self.overlays.velocity, "Velocity vectors");
        ui.checkbox(&mut self.overlays.acceleration, "Acceleration vectors");
        ui.checkbox(&mut self.overlays.center_of_mass, "Center of mass");

        ui.separator();
        ui.heading("Selected");
        match self.world.selected_body() {
            Some((id, body)) => {
                ui.label(format!("Id: {id}"));
                ui.label(format!("Mass: {:.1}", body.mass()));
                ui.label(format!(
                    "Position: ({:.1}, {:.1})",
                    body.position().x,
                    body.position().y
                ));
                ui.label(format!(
                    "Velocity: ({:.2}, {:.2})",
                    body.velocity().x,
                    body.velocity().y
                ));
                if body.is_static() {
                    ui.label("Static");
                }
            }
            None => {
                ui.label("Nothing selected");
            }
        }
    }

    fn canvas_input(&mut self, response: &egui::Response, rect: egui::Rect, ui: &egui::Ui) {
        self.camera.width = rect.width() as f64;
        self.camera.height = rect.height() as f64;

        let to_canvas = |pos: egui::Pos2| {
            Vector2::new((pos.x - rect.left()) as f64, (pos.y - rect.top()) as f64)
        };
        let pointer = response
            .interact_pointer_pos()
            .or_else(|| ui.ctx().pointer_hover_pos())
            .map(to_canvas);

        if response.hovered()
            && let Some(pointer) = pointer
        {
            let scroll = ui.input(|i| i.raw_scroll_delta.y) as f64;
            if scroll != 0.0 {
                self.camera.zoom_about(pointer, (scroll * 0.002).exp());
            }
        }

        if response.drag_started_by(egui::PointerButton::Primary) {
            let origin = ui
                .input(|i| i.pointer.press_origin())
                .map(to_canvas)
                .or(pointer);
            let picked =
                origin.and_then(|origin| self.world.pick(self.camera.screen_to_world(origin)));
            self.pointer = match picked {
                Some(id) if self.world.begin_drag(id).is_ok() => PointerAction::Drag,
                _ => PointerAction::Pan,
            };
        }

        if response.dragged() {
            match self.pointer {
                PointerAction::Drag => {
                    if let Some(pointer) = pointer {
                        let target = self.camera.screen_to_world(pointer);
                        self.world.drag_to(target).ok();
                    }
                }
                PointerAction::Pan => {
                    let delta = response.drag_delta();
                    self.camera.pan(Vector2::new(delta.x as f64, delta.y as f64));
                }
                PointerAction::None => {}
            }
        }

        if response.drag_stopped() {
            if let PointerAction::Drag = self.pointer {
                self.world.end_drag();
            }
            self.pointer = PointerAction::None;
        }

        if response.clicked()
            && let Some(pointer) = pointer
        {
            self.world.select_at(self.camera.screen_to_world(pointer));
        }

        if !ui.ctx().wants_keyboard_input() {
            let (toggle, delete) = ui.input(|i| {
                (
                    i.key_pressed(egui::Key::Space),
                    i.key_pressed(egui::Key::Delete),
                )
            });
            if toggle {
                self.world.toggle_pause();
            }
            if delete {
                self.world.remove_selected();
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let time = std::time::Instant::now();
        let dt = time - self.last_time.unwrap_or(time);
        self.last_time = Some(time);

        let dt = dt.as_secs_f64();

        egui::TopBottomPanel::top("Menu").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.menu_button("Windows", |ui| {
                    self.stats_open |= ui.button("Stats").clicked();
                });
                self.help_open |= ui.button("Help").clicked();
            });
        });

        egui::SidePanel::left("Controls")
            .resizable(false)
            .show(ctx, |ui| self.controls(ui));

        let energy = self.world.energy();
        egui::Window::new("Stats")
            .open(&mut self.stats_open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Time: {:.1}", self.world.time()));
                ui.label(format!("Bodies: {}", self.world.body_count()));
                ui.label(format!("Kinetic: {:.1}", energy.kinetic));
                ui.label(format!("Potential: {:.1}", energy.potential));
                ui.label(format!("Total: {:.1}", energy.total));
                ui.label(format!("Frame Time: {:.3}ms", 1000.0 * dt));
            });

        egui::Window::new("Guide")
            .open(&mut self.help_open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("How to use:");
                ui.label(
                    "- Scroll to zoom around the cursor\n\
                     - Drag empty space to pan\n\
                     - Click a body to select it, click empty space to deselect\n\
                     - Drag a body to move it; the simulation pauses while you hold it\n\
                     - Space pauses, Delete removes the selected body\n\
                     - Static bodies (yellow) pull on others but never move",
                );
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::from_rgb(10, 10, 25)))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
                let rect = response.rect;

                self.canvas_input(&response, rect, ui);
                self.world.update();

                let mut d = DrawHandler::new(rect.min);
                drawing::draw_world(&mut d, &self.world, &self.camera, &self.overlays);
                painter.extend(d.shapes);
            });

        ctx.request_repaint();
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::load(&path)?,
        None => SimulationConfig::default(),
    };
    let world = World::new(config).context("could not build the initial world")?;

    eframe::run_native(
        "Orbit Sandbox",
        eframe::NativeOptions {
            renderer: eframe::Renderer::Wgpu,
            viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 750.0]),
            ..Default::default()
        },
        Box::new(|_cc| Ok(Box::new(App::new(world)))),
    )
    .map_err(|err| anyhow::anyhow!("{err}"))
}
