//! Physical systems and their standard simulation sets
//!
//! Each system has a hand-tuned time step, since the potentials live on
//! very different scales. The table also lists the particle counts and
//! dimensions that make up the standard dataset sweep.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// The interaction law an episode is simulated under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimKind {
    R1, // logarithmic gravity
    R2, // 1/r gravity
    Spring, // all-pairs springs with unit rest length
    String, // chain of springs under uniform weight
    Charge, // Coulomb interaction with +/-1 charges
    Superposition, // charge + r2
    Damped, // springs with velocity drag
    Discontinuous, // spring that only acts beyond distance 2
}

impl SimKind {
    pub const ALL: [SimKind; 8] = [
        SimKind::R1,
        SimKind::R2,
        SimKind::Spring,
        SimKind::String,
        SimKind::Charge,
        SimKind::Superposition,
        SimKind::Damped,
        SimKind::Discontinuous,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SimKind::R1 => "r1",
            SimKind::R2 => "r2",
            SimKind::Spring => "spring",
            SimKind::String => "string",
            SimKind::Charge => "charge",
            SimKind::Superposition => "superposition",
            SimKind::Damped => "damped",
            SimKind::Discontinuous => "discontinuous",
        }
    }

    /// Preset entry for this system
    pub fn preset(self) -> &'static SimPreset {
        match self {
            SimKind::R1 => &R1_SET,
            SimKind::R2 => &R2_SET,
            SimKind::Spring => &SPRING_SET,
            SimKind::String => &STRING_SET,
            SimKind::Charge => &CHARGE_SET,
            SimKind::Superposition => &SUPERPOSITION_SET,
            SimKind::Damped => &DAMPED_SET,
            SimKind::Discontinuous => &DISCONTINUOUS_SET,
        }
    }

    /// Comma separated list of every known name, for error messages
    pub fn known_names() -> String {
        Self::ALL.iter().map(|s| s.name()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for SimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|sim| sim.name() == s)
            .ok_or_else(|| SimError::UnknownSimulation {
                name: s.to_string(),
                known: Self::known_names(),
            })
    }
}

/// One row of the standard simulation sets
#[derive(Debug, Clone, Copy)]
pub struct SimPreset {
    pub sim: SimKind,
    pub dt: f64, // hand-tuned time step
    pub nt: usize, // nominal step count of the standard set
    pub n: &'static [usize], // particle counts in the standard set
    pub dims: &'static [usize], // spatial dimensions in the standard set
}

impl SimPreset {
    /// Steps recorded per episode when the caller does not ask for a count
    pub fn default_steps(&self) -> usize {
        self.nt / 2
    }
}

const N_SET: &[usize] = &[4, 8];
const DIM_SET: &[usize] = &[2, 3];

const R1_SET: SimPreset = SimPreset { sim: SimKind::R1, dt: 5e-3, nt: 1000, n: N_SET, dims: DIM_SET };
const R2_SET: SimPreset = SimPreset { sim: SimKind::R2, dt: 1e-3, nt: 1000, n: N_SET, dims: DIM_SET };
const SPRING_SET: SimPreset = SimPreset { sim: SimKind::Spring, dt: 1e-2, nt: 1000, n: N_SET, dims: DIM_SET };
const STRING_SET: SimPreset = SimPreset { sim: SimKind::String, dt: 1e-2, nt: 1000, n: &[30], dims: &[2] };
const CHARGE_SET: SimPreset = SimPreset { sim: SimKind::Charge, dt: 1e-3, nt: 1000, n: N_SET, dims: DIM_SET };
const SUPERPOSITION_SET: SimPreset =
    SimPreset { sim: SimKind::Superposition, dt: 1e-3, nt: 1000, n: N_SET, dims: DIM_SET };
const DAMPED_SET: SimPreset = SimPreset { sim: SimKind::Damped, dt: 2e-2, nt: 1000, n: N_SET, dims: DIM_SET };
const DISCONTINUOUS_SET: SimPreset =
    SimPreset { sim: SimKind::Discontinuous, dt: 1e-2, nt: 1000, n: N_SET, dims: DIM_SET };

pub const SIM_SETS: [SimPreset; 8] = [
    R1_SET,
    R2_SET,
    SPRING_SET,
    STRING_SET,
    CHARGE_SET,
    SUPERPOSITION_SET,
    DAMPED_SET,
    DISCONTINUOUS_SET,
];
