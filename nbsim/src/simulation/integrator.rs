//! Fixed-step time integrators for the N-body system
//!
//! Provides velocity-Verlet and classical RK4, both driven by an
//! [`AccelSet`] and a step size `h`. RK4 integrates the full (x, v) state,
//! so it stays exact to fourth order when a term depends on velocity.

use super::forces::AccelSet;
use super::states::{NVec, System};
use crate::configuration::config::IntegratorConfig;

/// Advance the system by one step using velocity-Verlet
/// Uses two force evaluations per step and updates positions, velocities,
/// and `sys.t` in-place
pub fn verlet_integrator<const D: usize>(sys: &mut System<D>, forces: &AccelSet<D>, h: f64) {
    let n = sys.len();
    if n == 0 { // no bodies, return
        return;
    }
    let half_h = 0.5 * h;

    // a_n from x_n at time t_n
    let mut a_old = vec![NVec::<D>::zeros(); n];
    forces.accumulate_accels(sys.t, &*sys, &mut a_old);

    // Kick: v_n+1/2 = v_n + (h/2) a_n
    for (b, a) in sys.bodies.iter_mut().zip(a_old.iter()) {
        b.v += half_h * *a;
    }

    // Drift: x_n+1 = x_n + h v_n+1/2
    for b in sys.bodies.iter_mut() {
        b.x += h * b.v;
    }

    sys.t += h;

    // a_n+1 from x_n+1 at time t_n+1
    let mut a_new = vec![NVec::<D>::zeros(); n];
    forces.accumulate_accels(sys.t, &*sys, &mut a_new);

    // Second kick: v_n+1 = v_n+1/2 + (h/2) a_n+1
    for (b, a) in sys.bodies.iter_mut().zip(a_new.iter()) {
        b.v += half_h * *a;
    }
}

/// Derivative of the state at `stage`: (dx/dt, dv/dt) = (v, a)
fn derivative<const D: usize>(
    stage: &System<D>,
    forces: &AccelSet<D>,
) -> (Vec<NVec<D>>, Vec<NVec<D>>) {
    let mut a = vec![NVec::<D>::zeros(); stage.len()];
    forces.accumulate_accels(stage.t, stage, &mut a);
    let v = stage.bodies.iter().map(|b| b.v).collect();
    (v, a)
}

/// `base` advanced along a derivative by `scale`
fn offset<const D: usize>(
    base: &System<D>,
    k: &(Vec<NVec<D>>, Vec<NVec<D>>),
    scale: f64,
) -> System<D> {
    let mut stage = base.clone();
    for ((b, dx), dv) in stage.bodies.iter_mut().zip(k.0.iter()).zip(k.1.iter()) {
        b.x += scale * *dx;
        b.v += scale * *dv;
    }
    stage.t += scale;
    stage
}

/// Advance the system by one step using classical 4th-order Runge-Kutta
/// Uses four force evaluations per step
pub fn rk4_integrator<const D: usize>(sys: &mut System<D>, forces: &AccelSet<D>, h: f64) {
    if sys.is_empty() {
        return;
    }
    let half_h = 0.5 * h;

    let k1 = derivative(sys, forces);
    let k2 = derivative(&offset(sys, &k1, half_h), forces);
    let k3 = derivative(&offset(sys, &k2, half_h), forces);
    let k4 = derivative(&offset(sys, &k3, h), forces);

    // y_n+1 = y_n + h/6 (k1 + 2 k2 + 2 k3 + k4)
    let w = h / 6.0;
    for (i, b) in sys.bodies.iter_mut().enumerate() {
        b.x += w * (k1.0[i] + 2.0 * k2.0[i] + 2.0 * k3.0[i] + k4.0[i]);
        b.v += w * (k1.1[i] + 2.0 * k2.1[i] + 2.0 * k3.1[i] + k4.1[i]);
    }
    sys.t += h;
}

/// One step of the configured integrator
pub fn step<const D: usize>(
    integrator: IntegratorConfig,
    sys: &mut System<D>,
    forces: &AccelSet<D>,
    h: f64,
) {
    match integrator {
        IntegratorConfig::Verlet => verlet_integrator(sys, forces, h),
        IntegratorConfig::Rk4 => rk4_integrator(sys, forces, h),
    }
}
