use std::error::Error;

use chrono::Local;
use plotters::prelude::*;

use crate::core::simulator::SimulationResult;
use crate::core::window::axis_window_for;

const CHART_WIDTH_PX: u32 = 1000;
const CHART_HEIGHT_PX: u32 = 600;

const IDEAL_COLOR: RGBColor = RGBColor(54, 123, 245);
const DRAG_COLOR: RGBColor = RGBColor(255, 165, 0);

pub fn default_chart_path() -> String {
    format!("trajectory_{}.png", Local::now().format("%Y%m%d_%H%M%S"))
}

pub fn render_comparison_png(result: &SimulationResult, path: &str) -> Result<(), Box<dyn Error>> {
    let (x_span, y_span) = axis_window_for(result);

    let root = BitMapBackend::new(path, (CHART_WIDTH_PX, CHART_HEIGHT_PX)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Projectile Motion Simulation", ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(44)
        .y_label_area_size(54)
        .build_cartesian_2d(0.0..x_span, 0.0..y_span)?;

    chart
        .configure_mesh()
        .x_desc("Distance (m)")
        .y_desc("Height (m)")
        .draw()?;

    let ideal_style = ShapeStyle::from(&IDEAL_COLOR).stroke_width(2);
    chart
        .draw_series(LineSeries::new(
            result
                .ideal
                .iter()
                .filter(|s| s.y_m >= 0.0)
                .map(|s| (s.x_m, s.y_m)),
            ideal_style,
        ))?
        .label(format!(
            "No drag: max height {:.2} m, range {:.2} m",
            result.max_height_ideal_m, result.range_ideal_m
        ))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], ideal_style));

    let drag_style = ShapeStyle::from(&DRAG_COLOR).stroke_width(2);
    chart
        .draw_series(LineSeries::new(
            // The final sample sits just below ground; clamp it so the
            // curve visually ends on the axis.
            result.drag.iter().map(|s| (s.x_m, s.y_m.max(0.0))),
            drag_style,
        ))?
        .label(format!(
            "With drag: max height {:.2} m, range {:.2} m",
            result.max_height_drag_m, result.range_drag_m
        ))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], drag_style));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.85))
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::default_chart_path;

    #[test]
    fn default_path_is_a_timestamped_png() {
        let path = default_chart_path();
        assert!(path.starts_with("trajectory_"));
        assert!(path.ends_with(".png"));
        assert_eq!(path.len(), "trajectory_YYYYmmdd_HHMMSS.png".len());
    }
}
