use std::env;
use std::io::{self, Write};

use drag_compare::chart::{default_chart_path, render_comparison_png};
use drag_compare::core::simulator::{LaunchInputs, SimulationResult, parse_field, simulate};

fn read_field(prompt: &str, label: &'static str) -> Result<f64, String> {
    loop {
        print!("{prompt}");
        io::stdout()
            .flush()
            .map_err(|e| format!("Failed to flush stdout: {e}"))?;

        let mut line = String::new();
        let bytes = io::stdin()
            .read_line(&mut line)
            .map_err(|e| format!("Could not read input: {e}"))?;

        if bytes == 0 {
            return Err("Input ended unexpectedly (EOF).".to_string());
        }

        match parse_field(&line, label) {
            Ok(v) => return Ok(v),
            Err(_) => eprintln!("Please enter a valid number (e.g., 45 or 12.5)."),
        }
    }
}

fn get_inputs_from_user() -> Result<LaunchInputs, String> {
    Ok(LaunchInputs {
        speed_mps: read_field("Initial velocity (m/s): ", "velocity")?,
        angle_deg: read_field("Launch angle (degrees): ", "angle")?,
        mass_kg: read_field("Mass (kg): ", "mass")?,
        drag_coeff_kgps: read_field("Drag coefficient (kg/s): ", "drag coefficient")?,
    })
}

fn get_inputs_from_args(args: &[String]) -> Result<LaunchInputs, String> {
    if args.len() != 4 {
        return Err(
            "Expected exactly 4 arguments: <velocity_mps> <angle_deg> <mass_kg> <drag_kgps>."
                .to_string(),
        );
    }

    Ok(LaunchInputs {
        speed_mps: parse_field(&args[0], "velocity").map_err(|e| e.to_string())?,
        angle_deg: parse_field(&args[1], "angle").map_err(|e| e.to_string())?,
        mass_kg: parse_field(&args[2], "mass").map_err(|e| e.to_string())?,
        drag_coeff_kgps: parse_field(&args[3], "drag coefficient").map_err(|e| e.to_string())?,
    })
}

// Splits off an optional `--plot [FILE]` and returns the remaining
// positional arguments.
fn split_plot_flag(args: &[String]) -> (Vec<String>, Option<String>) {
    let mut positional = Vec::new();
    let mut plot = None;
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--plot" {
            if i + 1 < args.len() && !args[i + 1].starts_with('-') {
                plot = Some(args[i + 1].clone());
                i += 2;
            } else {
                plot = Some(default_chart_path());
                i += 1;
            }
        } else {
            positional.push(args[i].clone());
            i += 1;
        }
    }
    (positional, plot)
}

fn print_summary(result: &SimulationResult) {
    println!();
    println!("No drag:");
    println!("  Max height:  {:.2} m", result.max_height_ideal_m);
    println!("  Range:       {:.2} m", result.range_ideal_m);
    println!("  Flight time: {:.2} s", result.flight_time_ideal_s);
    println!("With drag:");
    println!("  Max height:  {:.2} m", result.max_height_drag_m);
    println!("  Range:       {:.2} m", result.range_drag_m);
    println!("  Flight time: {:.2} s", result.flight_time_drag_s);
}

fn print_usage(program: &str) {
    println!("Usage:");
    println!("  {program} [--plot [FILE]]");
    println!("  {program} <velocity_mps> <angle_deg> <mass_kg> <drag_kgps> [--plot [FILE]]");
    println!();
    println!("Examples:");
    println!("  {program}");
    println!("  {program} 20 45 1.0 0.1");
    println!("  {program} 20 45 1.0 0.1 --plot comparison.png");
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage(&args[0]);
        return Ok(());
    }

    let (positional, plot) = split_plot_flag(&args[1..]);

    let inputs = if positional.is_empty() {
        get_inputs_from_user()?
    } else {
        get_inputs_from_args(&positional)?
    };

    let result = simulate(inputs).map_err(|e| e.to_string())?;
    print_summary(&result);

    if let Some(path) = plot {
        render_comparison_png(&result, &path)
            .map_err(|e| format!("Failed to render chart '{path}': {e}"))?;
        println!("\nChart written to {path}");
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        print_usage("cargo run --");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{get_inputs_from_args, split_plot_flag};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn parses_four_positional_arguments() {
        let inputs =
            get_inputs_from_args(&args(&["20", "45", "1.0", "0.1"])).expect("should parse");
        assert_eq!(inputs.speed_mps, 20.0);
        assert_eq!(inputs.angle_deg, 45.0);
        assert_eq!(inputs.mass_kg, 1.0);
        assert_eq!(inputs.drag_coeff_kgps, 0.1);
    }

    #[test]
    fn rejects_wrong_argument_count() {
        let err = get_inputs_from_args(&args(&["20", "45"])).expect_err("should fail");
        assert!(err.contains("Expected exactly 4 arguments"));
    }

    #[test]
    fn rejects_non_numeric_argument() {
        let err =
            get_inputs_from_args(&args(&["fast", "45", "1.0", "0.1"])).expect_err("should fail");
        assert!(err.contains("velocity"));
    }

    #[test]
    fn plot_flag_takes_an_optional_filename() {
        let (positional, plot) = split_plot_flag(&args(&["20", "45", "1", "0", "--plot"]));
        assert_eq!(positional.len(), 4);
        let plot = plot.expect("plot should be requested");
        assert!(plot.ends_with(".png"));

        let (positional, plot) =
            split_plot_flag(&args(&["--plot", "out.png", "20", "45", "1", "0"]));
        assert_eq!(positional.len(), 4);
        assert_eq!(plot.as_deref(), Some("out.png"));
    }

    #[test]
    fn no_plot_flag_means_no_chart() {
        let (positional, plot) = split_plot_flag(&args(&["20", "45", "1", "0"]));
        assert_eq!(positional.len(), 4);
        assert!(plot.is_none());
    }
}
