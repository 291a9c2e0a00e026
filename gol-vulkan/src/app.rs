use std::sync::Arc;
use std::time::{Duration, Instant};

use gol_core::{Halt, Simulation, Status};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::renderer::{CellInstance, Renderer, Vertex};
use crate::ui::{self, Rect};

pub const TITLE: &str = "Game of Life";
pub const UI_HEIGHT: f32 = 90.0;
const BUTTON_WIDTH: f32 = 180.0;
const BUTTON_HEIGHT: f32 = 44.0;
const BUTTON_PADDING: f32 = 24.0;
const BUTTON_VERTICAL_OFFSET: f32 = 12.0;
const TEXT_SCALE_HEADING: f32 = 6.0;
const TEXT_SCALE_STATUS: f32 = 3.0;
const TEXT_SCALE_BUTTON: f32 = 5.0;
const DEAD_COLOR: [f32; 3] = [0.96, 0.96, 0.96];

/// How long each generation stays on screen.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    pub initial: Duration,
    pub step: Duration,
}

/// Simulation state plus the per-frame geometry built from it.
struct GameOfLifeApp {
    simulation: Simulation,
    pacing: Pacing,
    last_step: Instant,
    window_size: PhysicalSize<u32>,
    cursor_position: Option<[f32; 2]>,
    cells: Vec<CellInstance>,
    ui_vertices: Vec<Vertex>,
}

impl GameOfLifeApp {
    fn new(simulation: Simulation, pacing: Pacing, window_size: PhysicalSize<u32>) -> Self {
        let size = simulation.grid().size();
        Self {
            simulation,
            pacing,
            last_step: Instant::now(),
            window_size,
            cursor_position: None,
            cells: Vec::with_capacity(size * size + 1),
            ui_vertices: Vec::with_capacity(2048),
        }
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.window_size = size;
    }

    /// Advances one generation when its display time is up. Returns the halt
    /// reason on the generation that ends the run.
    fn update(&mut self) -> Option<Halt> {
        let delay = if self.simulation.steps() == 0 {
            self.pacing.initial
        } else {
            self.pacing.step
        };
        if self.simulation.halted().is_some() || self.last_step.elapsed() < delay {
            return None;
        }
        self.last_step = Instant::now();
        match self.simulation.step() {
            Status::Running => None,
            Status::Halted(halt) => Some(halt),
        }
    }

    fn randomize(&mut self) {
        self.simulation.reseed_random();
        self.last_step = Instant::now();
    }

    fn handle_click(&mut self, position: [f32; 2]) {
        if self.button_rect().contains(position) {
            self.randomize();
        }
    }

    fn button_rect(&self) -> Rect {
        let width = self.window_size.width.max(1) as f32;
        Rect {
            min: [width - BUTTON_PADDING - BUTTON_WIDTH, BUTTON_PADDING + BUTTON_VERTICAL_OFFSET],
            max: [width - BUTTON_PADDING, BUTTON_PADDING + BUTTON_VERTICAL_OFFSET + BUTTON_HEIGHT],
        }
    }

    fn status_line(&self) -> String {
        let state = match self.simulation.halted() {
            None => "",
            Some(Halt::Cycle) => "cycle ",
            Some(Halt::Extinct) => "extinct ",
        };
        format!(
            "{state}gen {} pop {}",
            self.simulation.steps(),
            self.simulation.alive()
        )
    }

    fn build_frame(&mut self) -> (&[CellInstance], &[Vertex]) {
        self.cells.clear();
        self.ui_vertices.clear();

        let width = self.window_size.width.max(1) as f32;
        let height = self.window_size.height.max(1) as f32;
        let window = [width, height];

        let grid = self.simulation.grid();
        let side = grid.size() as f32;
        let usable_height = (height - UI_HEIGHT).max(1.0);
        let cell_size = (width / side).min(usable_height / side);
        let board = Rect {
            min: [(width - cell_size * side) * 0.5, UI_HEIGHT + (usable_height - cell_size * side) * 0.5],
            max: [(width + cell_size * side) * 0.5, UI_HEIGHT + (usable_height + cell_size * side) * 0.5],
        };
        // dead cells are the board itself, drawn before the live ones
        self.cells.push(CellInstance {
            min: [ui::to_ndc(board.min[0], width), ui::to_ndc_y(board.min[1], height)],
            max: [ui::to_ndc(board.max[0], width), ui::to_ndc_y(board.max[1], height)],
            color: DEAD_COLOR,
            _pad: 0.0,
        });

        for (x, y) in grid.alive_cells() {
            let left = board.min[0] + x as f32 * cell_size;
            let top = board.min[1] + y as f32 * cell_size;
            self.cells.push(CellInstance {
                min: [ui::to_ndc(left, width), ui::to_ndc_y(top, height)],
                max: [ui::to_ndc(left + cell_size, width), ui::to_ndc_y(top + cell_size, height)],
                color: ui::neighbor_color(grid.neighbor_count_at(x, y)),
                _pad: 0.0,
            });
        }

        let header_line = Rect {
            min: [0.0, UI_HEIGHT - 4.0],
            max: [width, UI_HEIGHT],
        };
        ui::push_rect(&mut self.ui_vertices, header_line, [0.15, 0.15, 0.2], window);

        let button_rect = self.button_rect();
        let hovered = self.cursor_position.is_some_and(|pos| button_rect.contains(pos));
        let button_color = if hovered { [0.35, 0.45, 0.75] } else { [0.25, 0.33, 0.55] };
        ui::push_rect(&mut self.ui_vertices, button_rect, button_color, window);

        ui::draw_text(
            &mut self.ui_vertices,
            TITLE,
            [BUTTON_PADDING, BUTTON_PADDING],
            TEXT_SCALE_HEADING,
            [0.9, 0.9, 0.95],
            window,
        );
        let status = self.status_line();
        ui::draw_text(
            &mut self.ui_vertices,
            &status,
            [BUTTON_PADDING, BUTTON_PADDING + ui::text_pixel_height() * TEXT_SCALE_HEADING + 8.0],
            TEXT_SCALE_STATUS,
            [0.7, 0.7, 0.78],
            window,
        );

        let button_text = "Randomize";
        let text_width = ui::text_pixel_width(button_text) * TEXT_SCALE_BUTTON;
        let text_height = ui::text_pixel_height() * TEXT_SCALE_BUTTON;
        let origin_x = button_rect.min[0] + (button_rect.width() - text_width) * 0.5;
        let origin_y = button_rect.min[1] + (button_rect.height() - text_height) * 0.5;
        ui::draw_text(
            &mut self.ui_vertices,
            button_text,
            [origin_x, origin_y],
            TEXT_SCALE_BUTTON,
            [0.95, 0.95, 0.98],
            window,
        );

        (&self.cells, &self.ui_vertices)
    }
}

fn key_matches(event: &KeyEvent, target: &str) -> bool {
    match &event.logical_key {
        Key::Named(NamedKey::Space) => target.eq_ignore_ascii_case("SPACE"),
        Key::Named(NamedKey::Escape) => target.eq_ignore_ascii_case("ESCAPE"),
        Key::Character(text) => text.eq_ignore_ascii_case(target),
        _ => false,
    }
}

/// winit handler that owns the window, the renderer and the simulation.
pub struct VulkanApp {
    window_attrs: WindowAttributes,
    window: Option<Arc<Window>>,
    window_id: Option<WindowId>,
    renderer: Option<Renderer>,
    app: Option<GameOfLifeApp>,
    pending: Option<Simulation>,
    pacing: Pacing,
    last_cursor: [f32; 2],
    frame_count: u32,
    last_fps_log: Instant,
}

impl VulkanApp {
    pub fn new(simulation: Simulation, pacing: Pacing, fullscreen: bool) -> Self {
        let side = (simulation.grid().size() as u32 * 3).clamp(512, 1024);
        let mut attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(PhysicalSize::new(side, side + UI_HEIGHT as u32));
        if fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        Self {
            window_attrs: attrs,
            window: None,
            window_id: None,
            renderer: None,
            app: None,
            pending: Some(simulation),
            pacing,
            last_cursor: [0.0, 0.0],
            frame_count: 0,
            last_fps_log: Instant::now(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(app)) = (self.renderer.as_mut(), self.app.as_mut()) else {
            return;
        };

        if app.update().is_some() {
            let summary = app.simulation.summary();
            println!("{summary}");
            if let Some(window) = &self.window {
                window.set_title(&format!("{TITLE}: {summary}"));
            }
        }

        let (cells, ui_vertices) = app.build_frame();
        match renderer.render(cells, ui_vertices) {
            Ok(()) => {
                self.frame_count += 1;
                let elapsed = self.last_fps_log.elapsed();
                if elapsed >= Duration::from_secs(1) {
                    let fps = self.frame_count as f64 / elapsed.as_secs_f64();
                    log::info!("fps: {:.1}", fps);
                    self.frame_count = 0;
                    self.last_fps_log = Instant::now();
                }
            }
            Err(wgpu::SurfaceError::Lost) => renderer.resize(renderer.size()),
            Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
            Err(err) => log::warn!("dropped frame: {err}"),
        }
    }
}

impl ApplicationHandler<()> for VulkanApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(simulation) = self.pending.take() else {
            return;
        };
        let window = match event_loop.create_window(self.window_attrs.clone()) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };
        let cell_capacity = simulation.grid().size().pow(2) + 1;
        let renderer = match pollster::block_on(Renderer::new(window.clone(), cell_capacity)) {
            Ok(renderer) => renderer,
            Err(err) => {
                log::error!("failed to create GPU state: {err:#}");
                event_loop.exit();
                return;
            }
        };
        let app = GameOfLifeApp::new(simulation, self.pacing, renderer.size());
        window.request_redraw();

        self.window_id = Some(window.id());
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.app = Some(app);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if Some(window_id) != self.window_id {
            return;
        }
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size);
                }
                if let Some(app) = self.app.as_mut() {
                    app.resize(size);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.last_cursor = [position.x as f32, position.y as f32];
                if let Some(app) = self.app.as_mut() {
                    app.cursor_position = Some(self.last_cursor);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left && state == ElementState::Released {
                    if let Some(app) = self.app.as_mut() {
                        app.handle_click(self.last_cursor);
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if key_matches(&event, "ESCAPE") {
                        event_loop.exit();
                    } else if let Some(app) = self.app.as_mut() {
                        if key_matches(&event, "R") || key_matches(&event, "SPACE") {
                            app.randomize();
                        }
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::Poll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gol_core::{PatternSource, SimulationConfig, Topology};

    fn app(pacing: Pacing) -> GameOfLifeApp {
        let simulation =
            Simulation::new(SimulationConfig::new(64, Topology::Torus), &PatternSource::default()).unwrap();
        GameOfLifeApp::new(simulation, pacing, PhysicalSize::new(640, 730))
    }

    #[test]
    fn first_generation_waits_for_the_initial_delay() {
        let mut app = app(Pacing {
            initial: Duration::from_secs(3600),
            step: Duration::ZERO,
        });
        assert_eq!(app.update(), None);
        assert_eq!(app.simulation.steps(), 0);
    }

    #[test]
    fn later_generations_follow_the_step_delay() {
        let mut app = app(Pacing {
            initial: Duration::ZERO,
            step: Duration::ZERO,
        });
        for _ in 0..5 {
            app.update();
        }
        assert_eq!(app.simulation.steps(), 5);
        assert_eq!(app.status_line(), format!("gen 5 pop {}", app.simulation.alive()));
    }

    #[test]
    fn frame_has_the_board_plus_one_instance_per_live_cell() {
        let mut app = app(Pacing {
            initial: Duration::ZERO,
            step: Duration::ZERO,
        });
        let alive = app.simulation.grid().population();
        let (cells, ui_vertices) = app.build_frame();
        assert_eq!(cells.len(), alive + 1);
        assert!(!ui_vertices.is_empty());
    }

    #[test]
    fn clicking_the_button_reseeds() {
        let mut app = app(Pacing {
            initial: Duration::ZERO,
            step: Duration::ZERO,
        });
        app.update();
        let button = app.button_rect();
        app.handle_click([button.min[0] + 1.0, button.min[1] + 1.0]);
        assert_eq!(app.simulation.steps(), 0);
    }
}
