use macroquad::prelude::*;
use macroquad::ui::{hash, root_ui, widgets};

use drag_compare::core::simulator::{
    DragState, LaunchInputs, SimulationConfig, SimulationResult, advance, drag_step_s,
    launch_state, simulate,
};
use drag_compare::core::window::axis_window_for;

const INITIAL_WINDOW_WIDTH: i32 = 1280;
const INITIAL_WINDOW_HEIGHT: i32 = 720;
const MSAA_SAMPLES: i32 = 4;

const LEFT_MARGIN: f32 = 60.0;
const RIGHT_MARGIN: f32 = 30.0;
const TOP_MARGIN: f32 = 110.0;
const BOTTOM_MARGIN: f32 = 120.0;

const TITLE_Y: f32 = 40.0;
const CONTROLS_Y: f32 = 78.0;
const X_GRID_LINES: usize = 10;
const Y_GRID_LINES: usize = 8;

// Cap on how much wall time one frame may consume, so a dragged window or
// debugger pause does not fast-forward the shot.
const MAX_FRAME_DT_S: f64 = 0.05;

const IDEAL_COLOR: Color = Color::new(0.21, 0.48, 0.96, 0.55);
const DRAG_PREVIEW_COLOR: Color = Color::new(1.0, 0.65, 0.0, 0.35);
const TRAIL_COLOR: Color = Color::new(1.0, 0.65, 0.0, 1.0);

#[derive(Clone, Copy, PartialEq, Eq)]
enum FlightPhase {
    Aiming,
    Flying,
    Landed,
}

struct Shot {
    state: DragState,
    trail: Vec<(f64, f64)>,
    dt_s: f64,
    accumulator_s: f64,
}

impl Shot {
    fn launch(inputs: LaunchInputs, config: SimulationConfig) -> Self {
        let state = launch_state(inputs);
        Self {
            state,
            trail: vec![(state.x_m, state.y_m)],
            dt_s: drag_step_s(inputs, config),
            accumulator_s: 0.0,
        }
    }

    // Steps the shot with the same fixed dt the batch simulation uses; the
    // accumulator converts variable frame time into whole steps, so the
    // animated trajectory is sample-for-sample the batch one.
    fn tick(&mut self, inputs: LaunchInputs, config: SimulationConfig, frame_dt_s: f64) -> bool {
        self.accumulator_s += frame_dt_s.min(MAX_FRAME_DT_S);
        while self.accumulator_s >= self.dt_s {
            self.accumulator_s -= self.dt_s;
            advance(&mut self.state, inputs, config.gravity_mps2, self.dt_s);
            self.trail.push((self.state.x_m, self.state.y_m));
            if self.state.y_m < 0.0 {
                return true;
            }
        }
        false
    }
}

fn slider_inputs(angle_deg: f32, speed_mps: f32, mass_kg: f32, drag_kgps: f32) -> LaunchInputs {
    LaunchInputs {
        speed_mps: speed_mps as f64,
        angle_deg: angle_deg as f64,
        mass_kg: mass_kg as f64,
        drag_coeff_kgps: drag_kgps as f64,
    }
}

fn world_to_screen(
    world: (f64, f64),
    world_max_x: f32,
    world_max_y: f32,
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
) -> Vec2 {
    let plot_w = (right - left).max(1.0);
    let plot_h = (bottom - top).max(1.0);
    let x = left + (world.0 as f32 / world_max_x.max(1.0)) * plot_w;
    let y = bottom - (world.1 as f32 / world_max_y.max(1.0)) * plot_h;
    vec2(x, y)
}

fn format_axis_value(value: f32, axis_max: f32) -> String {
    if axis_max >= 1000.0 {
        format!("{value:.0}")
    } else if axis_max >= 100.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

fn draw_grid(left: f32, right: f32, top: f32, bottom: f32, color: Color) {
    for i in 0..=X_GRID_LINES {
        let t = i as f32 / X_GRID_LINES as f32;
        let x = left + t * (right - left);
        draw_line(x, top, x, bottom, 1.0, color);
    }
    for i in 0..=Y_GRID_LINES {
        let t = i as f32 / Y_GRID_LINES as f32;
        let y = bottom - t * (bottom - top);
        draw_line(left, y, right, y, 1.0, color);
    }
}

fn draw_axis_tick_labels(
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    world_max_x: f32,
    world_max_y: f32,
) {
    let label_color = Color::from_rgba(105, 113, 124, 255);
    let tick_font_size: u16 = 16;

    for i in 0..=X_GRID_LINES {
        let t = i as f32 / X_GRID_LINES as f32;
        let x = left + t * (right - left);
        let label = format_axis_value(t * world_max_x, world_max_x);
        let size = measure_text(&label, None, tick_font_size, 1.0);
        draw_text(
            &label,
            x - (size.width * 0.5),
            bottom + 22.0,
            tick_font_size as f32,
            label_color,
        );
    }

    for i in 0..=Y_GRID_LINES {
        let t = i as f32 / Y_GRID_LINES as f32;
        let y = bottom - t * (bottom - top);
        let label = format_axis_value(t * world_max_y, world_max_y);
        let size = measure_text(&label, None, tick_font_size, 1.0);
        draw_text(
            &label,
            (left - 8.0) - size.width,
            y + (size.height * 0.35),
            tick_font_size as f32,
            label_color,
        );
    }

    draw_text("Distance (m)", right - 120.0, bottom + 46.0, 18.0, label_color);
    draw_text("Height (m)", left + 8.0, top - 8.0, 18.0, label_color);
}

fn draw_world_path(
    points: impl Iterator<Item = (f64, f64)>,
    world_max_x: f32,
    world_max_y: f32,
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    thickness: f32,
    color: Color,
) {
    let mut prev: Option<Vec2> = None;
    for point in points {
        let cur = world_to_screen(point, world_max_x, world_max_y, left, right, top, bottom);
        if let Some(prev) = prev {
            draw_line(prev.x, prev.y, cur.x, cur.y, thickness, color);
        }
        prev = Some(cur);
    }
}

fn draw_comparison(
    result: &SimulationResult,
    show_preview: bool,
    world_max_x: f32,
    world_max_y: f32,
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
) {
    draw_world_path(
        result
            .ideal
            .iter()
            .filter(|s| s.y_m >= 0.0)
            .map(|s| (s.x_m, s.y_m)),
        world_max_x,
        world_max_y,
        left,
        right,
        top,
        bottom,
        2.0,
        IDEAL_COLOR,
    );

    if show_preview {
        draw_world_path(
            result.drag.iter().map(|s| (s.x_m, s.y_m.max(0.0))),
            world_max_x,
            world_max_y,
            left,
            right,
            top,
            bottom,
            2.0,
            DRAG_PREVIEW_COLOR,
        );
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Drag Compare - Animated".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = SimulationConfig::default();

    let mut angle_deg: f32 = 45.0;
    let mut speed_mps: f32 = 20.0;
    let mut mass_kg: f32 = 1.0;
    let mut drag_kgps: f32 = 0.1;

    let mut phase = FlightPhase::Aiming;
    let mut shot: Option<Shot> = None;
    let mut paused = false;
    let mut show_preview = true;
    let mut status_line = "Ready".to_string();

    loop {
        let frame_dt = get_frame_time() as f64;
        let screen_w = screen_width();
        let screen_h = screen_height();

        let left = LEFT_MARGIN;
        let right = screen_w - RIGHT_MARGIN;
        let top = TOP_MARGIN;
        let bottom = screen_h - BOTTOM_MARGIN;

        let inputs = slider_inputs(angle_deg, speed_mps, mass_kg, drag_kgps);
        let result = match simulate(inputs) {
            Ok(result) => result,
            Err(err) => {
                status_line = err.to_string();
                next_frame().await;
                continue;
            }
        };

        let mut launch_clicked = false;
        let mut reset_clicked = false;
        widgets::Window::new(hash!(), vec2(18.0, 110.0), vec2(340.0, 240.0))
            .label("Launch Parameters")
            .ui(&mut *root_ui(), |ui| {
                ui.slider(hash!(), "Angle (deg)", 1.0..89.0, &mut angle_deg);
                ui.slider(hash!(), "Velocity (m/s)", 1.0..100.0, &mut speed_mps);
                ui.slider(hash!(), "Mass (kg)", 0.1..20.0, &mut mass_kg);
                ui.slider(hash!(), "Drag (kg/s)", 0.0..3.0, &mut drag_kgps);
                ui.separator();
                if ui.button(None, "Launch (Space)") {
                    launch_clicked = true;
                }
                if ui.button(None, "Reset (R)") {
                    reset_clicked = true;
                }
                if ui.button(None, "Toggle Preview") {
                    show_preview = !show_preview;
                }
            });

        if is_key_pressed(KeyCode::Space) {
            launch_clicked = true;
        }
        if is_key_pressed(KeyCode::R) {
            reset_clicked = true;
        }

        if launch_clicked {
            match phase {
                FlightPhase::Flying => {
                    paused = !paused;
                    status_line = if paused { "Paused" } else { "Resumed" }.to_string();
                }
                _ => {
                    shot = Some(Shot::launch(inputs, config));
                    phase = FlightPhase::Flying;
                    paused = false;
                    status_line = "Shot launched".to_string();
                }
            }
        }
        if reset_clicked {
            shot = None;
            phase = FlightPhase::Aiming;
            paused = false;
            status_line = "Reset".to_string();
        }

        if phase == FlightPhase::Flying && !paused {
            if let Some(shot) = shot.as_mut() {
                if shot.tick(inputs, config, frame_dt) {
                    phase = FlightPhase::Landed;
                    status_line = format!(
                        "Landed at x = {:.2} m after {:.2} s",
                        shot.state.x_m, shot.state.elapsed_s
                    );
                }
            }
        }

        let (world_max_x, world_max_y) = axis_window_for(&result);
        let world_max_x = world_max_x as f32;
        let world_max_y = world_max_y as f32;

        clear_background(Color::from_rgba(250, 251, 253, 255));
        draw_grid(left, right, top, bottom, Color::from_rgba(227, 231, 236, 255));
        draw_line(left, bottom, right, bottom, 2.0, DARKGRAY);
        draw_line(left, top, left, bottom, 2.0, DARKGRAY);
        draw_axis_tick_labels(left, right, top, bottom, world_max_x, world_max_y);
        draw_comparison(
            &result,
            show_preview,
            world_max_x,
            world_max_y,
            left,
            right,
            top,
            bottom,
        );

        if let Some(shot) = &shot {
            draw_world_path(
                shot.trail.iter().map(|&(x, y)| (x, y.max(0.0))),
                world_max_x,
                world_max_y,
                left,
                right,
                top,
                bottom,
                3.0,
                TRAIL_COLOR,
            );

            let p = world_to_screen(
                (shot.state.x_m, shot.state.y_m.max(0.0)),
                world_max_x,
                world_max_y,
                left,
                right,
                top,
                bottom,
            );
            draw_circle(p.x, p.y, 6.0, RED);
            draw_circle_lines(p.x, p.y, 6.0, 2.0, MAROON);
        }

        draw_text(
            "Drag Compare - Ideal vs Air Resistance",
            left,
            TITLE_Y,
            30.0,
            Color::from_rgba(30, 30, 35, 255),
        );
        draw_text(
            "Controls: Space launch/pause | R reset | Sliders in panel",
            left,
            CONTROLS_Y,
            20.0,
            DARKGRAY,
        );

        draw_text(
            &format!(
                "No drag:  max height {:.2} m | range {:.2} m | flight {:.2} s",
                result.max_height_ideal_m, result.range_ideal_m, result.flight_time_ideal_s
            ),
            left,
            screen_h - 78.0,
            20.0,
            BLUE,
        );
        draw_text(
            &format!(
                "With drag: max height {:.2} m | range {:.2} m | flight {:.2} s",
                result.max_height_drag_m, result.range_drag_m, result.flight_time_drag_s
            ),
            left,
            screen_h - 52.0,
            20.0,
            ORANGE,
        );
        draw_text(
            &format!(
                "Angle {:.1} deg | Velocity {:.1} m/s | Mass {:.2} kg | Drag {:.2} kg/s | {}",
                angle_deg, speed_mps, mass_kg, drag_kgps, status_line
            ),
            left,
            screen_h - 22.0,
            20.0,
            DARKGRAY,
        );

        next_frame().await;
    }
}
