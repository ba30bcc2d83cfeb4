//! Force / acceleration contributors for the n-body engine
//!
//! Every physical system is a sum of acceleration terms. Pair terms are
//! written as the derivative of a radial potential `U(d)`; the pair helper
//! turns that into equal and opposite forces and divides by each body's mass.

use crate::configuration::presets::SimKind;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec, System};

/// Collection of acceleration terms (gravity, springs, drag, etc.)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet<const D: usize> {
    terms: Vec<Box<dyn Acceleration<D> + Send + Sync>>,
}

impl<const D: usize> Default for AccelSet<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize> AccelSet<D> {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration<D> + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// The force law of a physical system
    pub fn for_sim(sim: SimKind, p: &Parameters) -> Self {
        let (g, eps) = (p.G, p.min_dist);
        let set = Self::new();
        match sim {
            SimKind::R1 => set.with(LogGravity { G: g, min_dist: eps }),
            SimKind::R2 => set.with(Gravity { G: g, min_dist: eps }),
            SimKind::Spring => set.with(Spring::all_pairs(g, eps)),
            SimKind::Damped => set
                .with(Spring::all_pairs(g, eps))
                .with(Drag { G: g, damping: p.damping }),
            SimKind::String => set
                .with(Spring::chain(g, eps))
                .with(ChainWeight { G: g }),
            SimKind::Charge => set.with(Coulomb { G: g, min_dist: eps }),
            SimKind::Superposition => set
                .with(Coulomb { G: g, min_dist: eps })
                .with(Gravity { G: g, min_dist: eps }),
            SimKind::Discontinuous => set.with(FarSpring {
                G: g,
                rest_length: 1.0,
                cutoff: 2.0,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total accelerations at time `t` for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, t: f64, sys: &System<D>, out: &mut [NVec<D>]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec::<D>::zeros();
        }
        for term in &self.terms {
            term.acceleration(t, sys, out);
        }
    }
}

/// Trait for acceleration sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration<const D: usize> {
    fn acceleration(&self, t: f64, sys: &System<D>, out: &mut [NVec<D>]);
}

/// Which pairs of bodies interact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pairing {
    All, // every unordered pair (i, j), i < j
    Chain, // neighbours (i, i + 1) only
}

/// Accumulate accelerations of a radial pair potential.
///
/// `du(bi, bj, d)` returns dU/dd for the pair at separation `d`. With
/// `r = x_i - x_j`, body i feels `-dU/dd * r / d` and body j the opposite.
/// Coincident bodies have no direction and are skipped.
fn pair_accels<const D: usize, F>(sys: &System<D>, out: &mut [NVec<D>], pairing: Pairing, du: F)
where
    F: Fn(&Body<D>, &Body<D>, f64) -> f64,
{
    let n = sys.len();
    for i in 0..n {
        let bi = &sys.bodies[i];
        let last = match pairing {
            Pairing::All => n,
            Pairing::Chain => (i + 2).min(n),
        };

        for j in (i + 1)..last {
            let bj = &sys.bodies[j];
            let r = bi.x - bj.x;
            let d = r.norm();
            if d == 0.0 {
                continue;
            }

            let f = (-du(bi, bj, d) / d) * r;
            out[i] += f / bi.m;
            out[j] -= f / bj.m;
        }
    }
}

/// 1/r gravity, `U = -G m_i m_j / (d + min_dist)`
#[allow(non_snake_case)]
pub struct Gravity {
    pub G: f64,
    pub min_dist: f64,
}

impl<const D: usize> Acceleration<D> for Gravity {
    fn acceleration(&self, _t: f64, sys: &System<D>, out: &mut [NVec<D>]) {
        pair_accels(sys, out, Pairing::All, |bi, bj, d| {
            let bounded = d + self.min_dist;
            self.G * bi.m * bj.m / (bounded * bounded)
        });
    }
}

/// Logarithmic gravity, `U = G m_i m_j ln(d + min_dist)`
#[allow(non_snake_case)]
pub struct LogGravity {
    pub G: f64,
    pub min_dist: f64,
}

impl<const D: usize> Acceleration<D> for LogGravity {
    fn acceleration(&self, _t: f64, sys: &System<D>, out: &mut [NVec<D>]) {
        pair_accels(sys, out, Pairing::All, |bi, bj, d| {
            self.G * bi.m * bj.m / (d + self.min_dist)
        });
    }
}

/// Harmonic spring, `U = G (d + min_dist - rest_length)^2`
#[allow(non_snake_case)]
pub struct Spring {
    pub G: f64,
    pub min_dist: f64,
    pub rest_length: f64,
    pub pairing: Pairing,
}

impl Spring {
    pub fn all_pairs(g: f64, min_dist: f64) -> Self {
        Self { G: g, min_dist, rest_length: 1.0, pairing: Pairing::All }
    }

    pub fn chain(g: f64, min_dist: f64) -> Self {
        Self { G: g, min_dist, rest_length: 1.0, pairing: Pairing::Chain }
    }
}

impl<const D: usize> Acceleration<D> for Spring {
    fn acceleration(&self, _t: f64, sys: &System<D>, out: &mut [NVec<D>]) {
        pair_accels(sys, out, self.pairing, |_, _, d| {
            2.0 * self.G * (d + self.min_dist - self.rest_length)
        });
    }
}

/// Coulomb interaction, `U = G q_i q_j / (d + min_dist)`
#[allow(non_snake_case)]
pub struct Coulomb {
    pub G: f64,
    pub min_dist: f64,
}

impl<const D: usize> Acceleration<D> for Coulomb {
    fn acceleration(&self, _t: f64, sys: &System<D>, out: &mut [NVec<D>]) {
        pair_accels(sys, out, Pairing::All, |bi, bj, d| {
            let bounded = d + self.min_dist;
            -self.G * bi.q * bj.q / (bounded * bounded)
        });
    }
}

/// Spring that is switched off below `cutoff`:
/// `U = 0` for `d < cutoff`, `G (d - rest_length)^2` otherwise
#[allow(non_snake_case)]
pub struct FarSpring {
    pub G: f64,
    pub rest_length: f64,
    pub cutoff: f64,
}

impl<const D: usize> Acceleration<D> for FarSpring {
    fn acceleration(&self, _t: f64, sys: &System<D>, out: &mut [NVec<D>]) {
        pair_accels(sys, out, Pairing::All, |_, _, d| {
            if d < self.cutoff {
                0.0
            } else {
                2.0 * self.G * (d - self.rest_length)
            }
        });
    }
}

/// Linear drag. Every pair (i, j > i) slows body i by `G damping v_i / n`,
/// so body i carries `n - 1 - i` shares of the drag.
#[allow(non_snake_case)]
pub struct Drag {
    pub G: f64,
    pub damping: f64,
}

impl<const D: usize> Acceleration<D> for Drag {
    fn acceleration(&self, _t: f64, sys: &System<D>, out: &mut [NVec<D>]) {
        let n = sys.len();
        for (i, b) in sys.bodies.iter().enumerate() {
            let shares = (n - 1 - i) as f64;
            out[i] -= (self.G * self.damping * shares / (n as f64 * b.m)) * b.v;
        }
    }
}

/// Uniform weight along axis 1 for every body that has a right-hand
/// neighbour in the chain (all but the last)
#[allow(non_snake_case)]
pub struct ChainWeight {
    pub G: f64,
}

impl<const D: usize> Acceleration<D> for ChainWeight {
    fn acceleration(&self, _t: f64, sys: &System<D>, out: &mut [NVec<D>]) {
        let n = sys.len();
        for a in out.iter_mut().take(n.saturating_sub(1)) {
            // force G m_i over mass m_i
            a[1] -= self.G;
        }
    }
}
