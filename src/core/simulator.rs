use thiserror::Error;

pub const EARTH_GRAVITY_MPS2: f64 = 9.81;

// The drag integration step is derived from the spacing of these samples,
// so one knob controls the resolution of both curves.
pub const DEFAULT_IDEAL_SAMPLES: usize = 500;

// Overshoot past the analytic flight time so the sampled window crosses
// ground level instead of stopping exactly on it.
const FLIGHT_TIME_MARGIN: f64 = 1.2;

// Lower bound on the integration step; keeps the drag loop moving when a
// flat or downward launch angle makes the analytic flight time collapse.
const MIN_DRAG_STEP_S: f64 = 1e-4;

const MAX_DRAG_STEPS: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error("Invalid {label}: '{value}'. Expected a number.")]
    ParseFailure { label: &'static str, value: String },
    #[error("{0}")]
    DomainViolation(String),
}

#[derive(Clone, Copy, Debug)]
pub struct LaunchInputs {
    pub speed_mps: f64,
    pub angle_deg: f64,
    pub mass_kg: f64,
    pub drag_coeff_kgps: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct SimulationConfig {
    pub gravity_mps2: f64,
    pub ideal_samples: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity_mps2: EARTH_GRAVITY_MPS2,
            ideal_samples: DEFAULT_IDEAL_SAMPLES,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Sample {
    pub time_s: f64,
    pub x_m: f64,
    pub y_m: f64,
    pub vx_mps: f64,
    pub vy_mps: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct DragState {
    pub x_m: f64,
    pub y_m: f64,
    pub vx_mps: f64,
    pub vy_mps: f64,
    pub elapsed_s: f64,
}

impl DragState {
    pub fn sample(&self) -> Sample {
        Sample {
            time_s: self.elapsed_s,
            x_m: self.x_m,
            y_m: self.y_m,
            vx_mps: self.vx_mps,
            vy_mps: self.vy_mps,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SimulationResult {
    pub ideal: Vec<Sample>,
    pub drag: Vec<Sample>,
    pub max_height_ideal_m: f64,
    pub range_ideal_m: f64,
    pub flight_time_ideal_s: f64,
    pub max_height_drag_m: f64,
    pub range_drag_m: f64,
    pub flight_time_drag_s: f64,
}

pub fn velocity_components(inputs: LaunchInputs) -> (f64, f64) {
    let theta = inputs.angle_deg.to_radians();
    let vx = inputs.speed_mps * theta.cos();
    let vy = inputs.speed_mps * theta.sin();
    (vx, vy)
}

pub fn parse_field(value: &str, label: &'static str) -> Result<f64, SimulationError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| SimulationError::ParseFailure {
            label,
            value: value.trim().to_string(),
        })
}

pub fn parse_inputs(
    speed: &str,
    angle: &str,
    mass: &str,
    drag: &str,
) -> Result<LaunchInputs, SimulationError> {
    Ok(LaunchInputs {
        speed_mps: parse_field(speed, "velocity")?,
        angle_deg: parse_field(angle, "angle")?,
        mass_kg: parse_field(mass, "mass")?,
        drag_coeff_kgps: parse_field(drag, "drag coefficient")?,
    })
}

fn validate(inputs: LaunchInputs) -> Result<(), SimulationError> {
    if !inputs.speed_mps.is_finite()
        || !inputs.angle_deg.is_finite()
        || !inputs.mass_kg.is_finite()
        || !inputs.drag_coeff_kgps.is_finite()
    {
        return Err(SimulationError::DomainViolation(
            "Inputs must be finite numbers.".to_string(),
        ));
    }
    if inputs.speed_mps <= 0.0 {
        return Err(SimulationError::DomainViolation(
            "Velocity must be positive.".to_string(),
        ));
    }
    if inputs.mass_kg <= 0.0 {
        return Err(SimulationError::DomainViolation(
            "Mass must be positive.".to_string(),
        ));
    }
    if inputs.drag_coeff_kgps < 0.0 {
        return Err(SimulationError::DomainViolation(
            "Drag coefficient cannot be negative.".to_string(),
        ));
    }
    Ok(())
}

pub fn launch_state(inputs: LaunchInputs) -> DragState {
    let (v0x, v0y) = velocity_components(inputs);
    DragState {
        x_m: 0.0,
        y_m: 0.0,
        vx_mps: v0x,
        vy_mps: v0y,
        elapsed_s: 0.0,
    }
}

pub fn drag_step_s(inputs: LaunchInputs, config: SimulationConfig) -> f64 {
    let (_, v0y) = velocity_components(inputs);
    let t_max_s = FLIGHT_TIME_MARGIN * (2.0 * v0y / config.gravity_mps2);
    let sample_count = config.ideal_samples.max(2);
    (t_max_s / (sample_count - 1) as f64).max(MIN_DRAG_STEP_S)
}

// One explicit Euler step under gravity plus linear drag. Both the batch
// driver below and the frame-by-frame animation call this, so the two
// execution paths stay numerically identical for a given step size.
pub fn advance(state: &mut DragState, inputs: LaunchInputs, gravity_mps2: f64, dt_s: f64) {
    let ax = -(inputs.drag_coeff_kgps * state.vx_mps) / inputs.mass_kg;
    let ay = -gravity_mps2 - (inputs.drag_coeff_kgps * state.vy_mps) / inputs.mass_kg;
    state.vx_mps += ax * dt_s;
    state.vy_mps += ay * dt_s;
    state.x_m += state.vx_mps * dt_s;
    state.y_m += state.vy_mps * dt_s;
    state.elapsed_s += dt_s;
}

pub fn simulate(inputs: LaunchInputs) -> Result<SimulationResult, SimulationError> {
    simulate_with(inputs, SimulationConfig::default())
}

pub fn simulate_with(
    inputs: LaunchInputs,
    config: SimulationConfig,
) -> Result<SimulationResult, SimulationError> {
    validate(inputs)?;

    let g = config.gravity_mps2;
    let (v0x, v0y) = velocity_components(inputs);
    let theta = inputs.angle_deg.to_radians();

    let flight_time_ideal_s = 2.0 * v0y / g;
    let t_max_s = FLIGHT_TIME_MARGIN * flight_time_ideal_s;
    let sample_count = config.ideal_samples.max(2);

    let mut ideal = Vec::with_capacity(sample_count);
    for i in 0..sample_count {
        let t = (i as f64 * t_max_s) / (sample_count - 1) as f64;
        ideal.push(Sample {
            time_s: t,
            x_m: v0x * t,
            y_m: (v0y * t) - (0.5 * g * t * t),
            vx_mps: v0x,
            vy_mps: v0y - (g * t),
        });
    }

    let max_height_ideal_m = (v0y * v0y) / (2.0 * g);
    let range_ideal_m = inputs.speed_mps * inputs.speed_mps * (2.0 * theta).sin() / g;

    let dt_s = drag_step_s(inputs, config);
    let mut state = launch_state(inputs);
    let mut drag = vec![state.sample()];

    // The initial height is exactly 0, so the loop always takes at least
    // one step before the first sample with negative height ends it.
    while drag.last().is_some_and(|s| s.y_m >= 0.0) && drag.len() <= MAX_DRAG_STEPS {
        advance(&mut state, inputs, g, dt_s);
        drag.push(state.sample());
    }

    let max_height_drag_m = drag.iter().fold(0.0f64, |acc, s| acc.max(s.y_m));
    // Range is read at the first sample below ground, not interpolated to
    // the exact crossing; the error this leaves is proportional to dt.
    let last = drag.last().copied().unwrap_or_else(|| state.sample());
    let range_drag_m = last.x_m;
    let flight_time_drag_s = last.time_s;

    Ok(SimulationResult {
        ideal,
        drag,
        max_height_ideal_m,
        range_ideal_m,
        flight_time_ideal_s,
        max_height_drag_m,
        range_drag_m,
        flight_time_drag_s,
    })
}
