//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - recorded step size and the number of integrator sub-steps per record,
//! - coupling constant `G` applied to every potential,
//! - `min_dist`, added to pair distances to keep the singular laws finite,
//! - `damping`, the drag strength of the damped system

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub dt: f64, // recorded step size
    pub substeps: usize, // integrator steps per recorded step
    pub G: f64, // coupling constant
    pub min_dist: f64, // singularity guard
    pub damping: f64, // drag strength
}

impl Parameters {
    /// Parameters for a preset time step, with the standard physical constants
    pub fn with_dt(dt: f64) -> Self {
        Self {
            dt,
            ..Self::default()
        }
    }

    /// Integrator step size
    pub fn h(&self) -> f64 {
        self.dt / self.substeps as f64
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            dt: 1e-2,
            substeps: 4,
            G: 1.0,
            min_dist: 1e-2,
            damping: 1.0,
        }
    }
}
