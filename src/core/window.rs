use crate::core::simulator::SimulationResult;

pub const DISTANCE_TO_HEIGHT_RATIO: f64 = 2.0; // x:y data window ratio

const X_PADDING_RATIO: f64 = 0.06;
const Y_PADDING_RATIO: f64 = 0.10;

pub fn fixed_ratio_axis_window(raw_max_x: f64, raw_max_y: f64) -> (f64, f64) {
    let raw_x_span = raw_max_x.max(1.0);
    let raw_y_span = raw_max_y.max(1.0);
    let x_pad = raw_x_span * X_PADDING_RATIO;
    let y_pad = raw_y_span * Y_PADDING_RATIO;

    let mut x_span = (raw_max_x + x_pad).max(1.0);
    let mut y_span = (raw_max_y + y_pad).max(1.0);

    if x_span / y_span < DISTANCE_TO_HEIGHT_RATIO {
        x_span = y_span * DISTANCE_TO_HEIGHT_RATIO;
    } else {
        y_span = x_span / DISTANCE_TO_HEIGHT_RATIO;
    }

    (x_span, y_span)
}

// Frames both curves in one window so the chart and the animation agree on
// the visible extents. Below-ground samples only contribute their x; the
// below-ground tail of the ideal curve is an artifact of its overshot
// time window.
pub fn axis_window_for(result: &SimulationResult) -> (f64, f64) {
    let mut raw_max_x = 1.0f64;
    let mut raw_max_y = 1.0f64;
    for sample in result.ideal.iter().chain(result.drag.iter()) {
        if sample.y_m >= 0.0 {
            raw_max_x = raw_max_x.max(sample.x_m);
        }
        raw_max_y = raw_max_y.max(sample.y_m);
    }
    fixed_ratio_axis_window(raw_max_x, raw_max_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::simulator::{LaunchInputs, simulate};

    #[test]
    fn window_keeps_the_configured_aspect_ratio() {
        let (x_span, y_span) = fixed_ratio_axis_window(120.0, 10.0);
        assert!((x_span / y_span - DISTANCE_TO_HEIGHT_RATIO).abs() < 1e-9);

        let (x_span, y_span) = fixed_ratio_axis_window(10.0, 120.0);
        assert!((x_span / y_span - DISTANCE_TO_HEIGHT_RATIO).abs() < 1e-9);
    }

    #[test]
    fn window_covers_padded_extents() {
        let (x_span, y_span) = fixed_ratio_axis_window(100.0, 40.0);
        assert!(x_span >= 106.0);
        assert!(y_span >= 44.0);
    }

    #[test]
    fn window_for_result_contains_both_trajectories() {
        let result = simulate(LaunchInputs {
            speed_mps: 30.0,
            angle_deg: 45.0,
            mass_kg: 1.0,
            drag_coeff_kgps: 0.2,
        })
        .expect("simulation should succeed");

        let (x_span, y_span) = axis_window_for(&result);
        assert!(x_span >= result.range_ideal_m);
        assert!(x_span >= result.range_drag_m);
        assert!(y_span >= result.max_height_ideal_m);
        assert!(y_span >= result.max_height_drag_m);
    }
}
