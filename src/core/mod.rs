pub mod simulator;
pub mod window;
