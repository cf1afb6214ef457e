use arboard::Clipboard;
use log::{error, info, warn};
use macroquad::prelude::*;
use navgrid::config::Config;
use navgrid::geometry::{Obstacle, WorldPoint};
use navgrid::{Navigator, Scenario, OBSTACLE_BUFFER};

const SCENARIO_SAVE_PATH: &str = "scenario.json";
/// How far one arrow key press moves the obstacle, in world units
const OBSTACLE_STEP: f32 = 0.5;

/// Demo host: owns the agent, target and obstacle and draws the path between them
struct DemoState {
    navigator: Navigator,
    agent: WorldPoint,
    target: WorldPoint,
    path: Option<Vec<WorldPoint>>,
    pixels_per_unit: f32,
    background: Color,
    show_grid: bool,
}

impl DemoState {
    fn new(config: &Config) -> navgrid::Result<Self> {
        let navigator = Navigator::new(config.grid_settings(), config.obstacle())?;

        let mut state = DemoState {
            navigator,
            agent: config.agent.to_point(),
            target: config.target.to_point(),
            path: None,
            pixels_per_unit: config.visual.pixels_per_unit,
            background: Color::from_rgba(
                config.visual.background_r,
                config.visual.background_g,
                config.visual.background_b,
                255,
            ),
            show_grid: config.visual.show_grid,
        };
        state.update_path();
        Ok(state)
    }

    fn world_to_screen(&self, p: WorldPoint) -> (f32, f32) {
        let (width, depth) = self.navigator.grid().world_size();
        (
            (p.x + width / 2.0) * self.pixels_per_unit,
            (depth / 2.0 - p.z) * self.pixels_per_unit,
        )
    }

    fn screen_to_world(&self, sx: f32, sy: f32) -> WorldPoint {
        let (width, depth) = self.navigator.grid().world_size();
        WorldPoint::new(
            sx / self.pixels_per_unit - width / 2.0,
            depth / 2.0 - sy / self.pixels_per_unit,
        )
    }

    fn update_path(&mut self) {
        self.path = self.navigator.find_path(self.agent, self.target);
        if self.path.is_none() {
            info!(
                "No path from ({:.2},{:.2}) to ({:.2},{:.2})",
                self.agent.x, self.agent.z, self.target.x, self.target.z
            );
        }
    }

    fn move_obstacle(&mut self, obstacle: Obstacle) {
        match self.navigator.rebuild(obstacle) {
            Ok(()) => self.update_path(),
            Err(e) => warn!("Obstacle change ignored: {}", e),
        }
    }

    fn handle_click(&mut self, mouse_x: f32, mouse_y: f32) {
        let point = self.screen_to_world(mouse_x, mouse_y);

        // Left click: move target
        if is_mouse_button_pressed(MouseButton::Left) {
            self.target = point;
            self.update_path();
        }
        // Right click: move agent
        else if is_mouse_button_pressed(MouseButton::Right) {
            self.agent = point;
            self.update_path();
        }
    }

    fn obstacle(&self) -> Obstacle {
        *self.navigator.grid().obstacle()
    }

    fn handle_keys(&mut self) {
        let (dx, dz) = if is_key_pressed(KeyCode::Left) {
            (-OBSTACLE_STEP, 0.0)
        } else if is_key_pressed(KeyCode::Right) {
            (OBSTACLE_STEP, 0.0)
        } else if is_key_pressed(KeyCode::Up) {
            (0.0, OBSTACLE_STEP)
        } else if is_key_pressed(KeyCode::Down) {
            (0.0, -OBSTACLE_STEP)
        } else {
            (0.0, 0.0)
        };
        if dx != 0.0 || dz != 0.0 {
            self.move_obstacle(self.obstacle().translated(dx, dz));
        }

        if is_key_pressed(KeyCode::Equal) || is_key_pressed(KeyCode::KpAdd) {
            self.move_obstacle(self.obstacle().resized(OBSTACLE_STEP));
        }
        if is_key_pressed(KeyCode::Minus) || is_key_pressed(KeyCode::KpSubtract) {
            self.move_obstacle(self.obstacle().resized(-OBSTACLE_STEP));
        }

        if is_key_pressed(KeyCode::C) {
            self.copy_to_clipboard();
        }
        if is_key_pressed(KeyCode::S) {
            self.save_scenario();
        }
    }

    fn copy_to_clipboard(&self) {
        let waypoints = self.path.clone().unwrap_or_default();
        let text = match serde_json::to_string_pretty(&waypoints) {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to serialize path: {}", e);
                return;
            }
        };

        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(text) {
                    warn!("Failed to copy to clipboard: {}", e);
                } else {
                    info!("Path ({} waypoints) copied to clipboard", waypoints.len());
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                warn!("Failed to access clipboard: {}", e);
            }
        }
    }

    fn save_scenario(&self) {
        let scenario = Scenario {
            name: "demo".to_string(),
            world: *self.navigator.settings(),
            obstacle: self.obstacle(),
            start: self.agent,
            goal: self.target,
            expected: None,
        };
        match scenario.save_to_file(SCENARIO_SAVE_PATH) {
            Ok(()) => info!("Scenario saved to {}", SCENARIO_SAVE_PATH),
            Err(e) => error!("Failed to save scenario: {}", e),
        }
    }

    fn draw(&self) {
        clear_background(self.background);

        let grid = self.navigator.grid();
        let size = grid.cell_diameter() * self.pixels_per_unit;

        // Unwalkable cells, plus walkable ones when the lattice is shown
        for cell in grid.cells() {
            if cell.walkable && !self.show_grid {
                continue;
            }
            let (cx, cy) = self.world_to_screen(cell.world_position);
            let color = if cell.walkable {
                Color::from_rgba(60, 60, 60, 255)
            } else {
                Color::from_rgba(140, 40, 40, 255)
            };
            draw_rectangle(cx - size / 2.0, cy - size / 2.0, size - 1.0, size - 1.0, color);
        }

        // Obstacle footprint and its buffer
        let (min, max) = self.obstacle().inflated_bounds(0.0);
        let (x0, y0) = self.world_to_screen(WorldPoint::new(min.x, max.z));
        let (x1, y1) = self.world_to_screen(WorldPoint::new(max.x, min.z));
        draw_rectangle(x0, y0, x1 - x0, y1 - y0, RED);

        let (min, max) = self.obstacle().inflated_bounds(OBSTACLE_BUFFER);
        let (x0, y0) = self.world_to_screen(WorldPoint::new(min.x, max.z));
        let (x1, y1) = self.world_to_screen(WorldPoint::new(max.x, min.z));
        draw_rectangle_lines(x0, y0, x1 - x0, y1 - y0, 2.0, ORANGE);

        // Path from the agent through every waypoint
        if let Some(path) = &self.path {
            let mut prev = self.world_to_screen(self.agent);
            for &waypoint in path {
                let next = self.world_to_screen(waypoint);
                draw_line(prev.0, prev.1, next.0, next.1, 2.0, GREEN);
                prev = next;
            }
        }

        let (ax, ay) = self.world_to_screen(self.agent);
        draw_circle(ax, ay, 6.0, BLUE);
        let (tx, ty) = self.world_to_screen(self.target);
        draw_circle(tx, ty, 6.0, YELLOW);

        let status = match &self.path {
            Some(path) => format!("Path: {} waypoints", path.len()),
            None => "Path: none".to_string(),
        };
        let info = [
            format!("Grid: {}x{} (rev {})", grid.cols(), grid.rows(), self.navigator.revision()),
            status,
            "Left click: move target  Right click: move agent".to_string(),
            "Arrows: move obstacle  +/-: resize obstacle".to_string(),
            "C: copy path  S: save scenario  Esc: quit".to_string(),
        ];
        for (i, line) in info.iter().enumerate() {
            draw_text(line, 10.0, 20.0 + i as f32 * 20.0, 20.0, WHITE);
        }
    }
}

#[macroquad::main("navgrid - A* around an obstacle")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Config::load();

    let mut state = match DemoState::new(&config) {
        Ok(state) => state,
        Err(e) => {
            error!("Cannot start demo: {}", e);
            return;
        }
    };

    let (width, depth) = state.navigator.grid().world_size();
    request_new_screen_size(width * state.pixels_per_unit, depth * state.pixels_per_unit);

    loop {
        // Handle input
        if is_mouse_button_pressed(MouseButton::Left) || is_mouse_button_pressed(MouseButton::Right)
        {
            let (mouse_x, mouse_y) = mouse_position();
            state.handle_click(mouse_x, mouse_y);
        }
        state.handle_keys();

        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.draw();

        next_frame().await
    }
}
