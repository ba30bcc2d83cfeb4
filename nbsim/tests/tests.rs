use approx::assert_relative_eq;

use nbsim::simulation::forces::{
    AccelSet, ChainWeight, Coulomb, Drag, FarSpring, Gravity, Spring,
};
use nbsim::simulation::integrator::{rk4_integrator, verlet_integrator};
use nbsim::simulation::params::Parameters;
use nbsim::simulation::states::{Body, NVec2, NVec3, System};
use nbsim::SimKind;

fn body2(x: [f64; 2], v: [f64; 2], q: f64, m: f64) -> Body<2> {
    Body {
        x: x.into(),
        v: v.into(),
        q,
        m,
    }
}

/// Build a simple 2-body system separated along the x-axis
pub fn two_body_system(dist: f64, m1: f64, m2: f64) -> System<3> {
    let b1 = Body {
        x: [-dist / 2.0, 0.0, 0.0].into(),
        v: [0.0, 0.0, 0.0].into(),
        q: 1.0,
        m: m1,
    };
    let b2 = Body {
        x: [dist / 2.0, 0.0, 0.0].into(),
        v: [0.0, 0.0, 0.0].into(),
        q: 1.0,
        m: m2,
    };
    System::new(vec![b1, b2])
}

/// Gravity without the singularity guard
pub fn gravity_set() -> AccelSet<3> {
    AccelSet::new().with(Gravity { G: 1.0, min_dist: 0.0 })
}

fn accels<const D: usize>(forces: &AccelSet<D>, sys: &System<D>) -> Vec<nbsim::NVec<D>> {
    let mut acc = vec![nbsim::NVec::<D>::zeros(); sys.len()];
    forces.accumulate_accels(sys.t, sys, &mut acc);
    acc
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let sys = two_body_system(1.0, 2.0, 3.0);
    let acc = accels(&gravity_set(), &sys);

    let net = acc[0] * sys.bodies[0].m + acc[1] * sys.bodies[1].m;

    assert!(net.norm() < 1e-12, "Net momentum not zero: {:?}", net);
}

#[test]
fn gravity_points_toward_other_body() {
    let sys = two_body_system(2.0, 1.0, 1.0);
    let acc = accels(&gravity_set(), &sys);

    let dx = sys.bodies[1].x - sys.bodies[0].x;
    assert!(acc[0].dot(&dx) > 0.0, "Acceleration is not toward second body");
    assert!(acc[1].dot(&dx) < 0.0, "Acceleration is not toward first body");
}

#[test]
fn gravity_inverse_square_law() {
    let acc_r = accels(&gravity_set(), &two_body_system(1.0, 1.0, 1.0));
    let acc_2r = accels(&gravity_set(), &two_body_system(2.0, 1.0, 1.0));

    let ratio = acc_r[0].norm() / acc_2r[0].norm();

    assert_relative_eq!(ratio, 4.0, epsilon = 1e-9);
}

#[test]
fn min_dist_bounds_close_encounters() {
    let sys = two_body_system(1e-9, 1.0, 1.0);
    let forces = AccelSet::new().with(Gravity { G: 1.0, min_dist: 1e-2 });
    let acc = accels(&forces, &sys);

    // at most 1 / min_dist^2
    assert!(acc[0].norm() <= 1e4 + 1e-6, "Guard failed; acceleration too large");
}

#[test]
fn coincident_bodies_feel_no_pair_force() {
    let sys = two_body_system(0.0, 1.0, 1.0);
    let acc = accels(&gravity_set(), &sys);

    assert_eq!(acc[0], NVec3::zeros());
    assert_eq!(acc[1], NVec3::zeros());
}

// ==================================================================================
// Other potentials
// ==================================================================================

#[test]
fn like_charges_repel_and_opposite_charges_attract() {
    let forces = AccelSet::new().with(Coulomb { G: 1.0, min_dist: 1e-2 });

    let like = System::new(vec![
        body2([0.0, 0.0], [0.0, 0.0], 1.0, 1.0),
        body2([1.0, 0.0], [0.0, 0.0], 1.0, 1.0),
    ]);
    let acc = accels(&forces, &like);
    assert!(acc[0].x < 0.0 && acc[1].x > 0.0);

    let opposite = System::new(vec![
        body2([0.0, 0.0], [0.0, 0.0], 1.0, 1.0),
        body2([1.0, 0.0], [0.0, 0.0], -1.0, 1.0),
    ]);
    let acc = accels(&forces, &opposite);
    assert!(acc[0].x > 0.0 && acc[1].x < 0.0);
}

#[test]
fn spring_is_relaxed_at_rest_length() {
    let forces = AccelSet::new().with(Spring {
        G: 1.0,
        min_dist: 0.0,
        rest_length: 1.0,
        pairing: nbsim::Pairing::All,
    });

    let relaxed = System::new(vec![
        body2([0.0, 0.0], [0.0, 0.0], 0.0, 1.0),
        body2([0.0, 1.0], [0.0, 0.0], 0.0, 1.0),
    ]);
    let acc = accels(&forces, &relaxed);
    assert!(acc[0].norm() < 1e-12);

    let stretched = System::new(vec![
        body2([0.0, 0.0], [0.0, 0.0], 0.0, 1.0),
        body2([0.0, 2.0], [0.0, 0.0], 0.0, 2.0),
    ]);
    let acc = accels(&forces, &stretched);
    // U = (d - 1)^2, |F| = 2 at d = 2
    assert_relative_eq!(acc[0].y, 2.0, epsilon = 1e-12);
    assert_relative_eq!(acc[1].y, -1.0, epsilon = 1e-12);

    let squeezed = System::new(vec![
        body2([0.0, 0.0], [0.0, 0.0], 0.0, 1.0),
        body2([0.0, 0.5], [0.0, 0.0], 0.0, 1.0),
    ]);
    let acc = accels(&forces, &squeezed);
    assert!(acc[0].y < 0.0, "Compressed spring should push apart");
}

#[test]
fn far_spring_only_acts_beyond_cutoff() {
    let forces = AccelSet::new().with(FarSpring {
        G: 1.0,
        rest_length: 1.0,
        cutoff: 2.0,
    });

    let near = System::new(vec![
        body2([0.0, 0.0], [0.0, 0.0], 0.0, 1.0),
        body2([1.9, 0.0], [0.0, 0.0], 0.0, 1.0),
    ]);
    assert_eq!(accels(&forces, &near)[0], NVec2::zeros());

    let far = System::new(vec![
        body2([0.0, 0.0], [0.0, 0.0], 0.0, 1.0),
        body2([3.0, 0.0], [0.0, 0.0], 0.0, 1.0),
    ]);
    // 2 (d - 1) = 4 toward the other body
    assert_relative_eq!(accels(&forces, &far)[0].x, 4.0, epsilon = 1e-12);
}

#[test]
fn chain_spring_only_couples_neighbours() {
    let forces = AccelSet::new().with(Spring {
        G: 1.0,
        min_dist: 0.0,
        rest_length: 1.0,
        pairing: nbsim::Pairing::Chain,
    });

    // 0-1 relaxed; 2 is far from 0 but only bound to 1
    let sys = System::new(vec![
        body2([0.0, 0.0], [0.0, 0.0], 0.0, 1.0),
        body2([1.0, 0.0], [0.0, 0.0], 0.0, 1.0),
        body2([5.0, 0.0], [0.0, 0.0], 0.0, 1.0),
    ]);
    let acc = accels(&forces, &sys);

    assert!(acc[0].norm() < 1e-12);
    // U = (d - 1)^2 at d = 4 gives |F| = 6
    assert_relative_eq!(acc[2].x, -6.0, epsilon = 1e-12);
    assert_relative_eq!(acc[1].x, 6.0, epsilon = 1e-12);
}

#[test]
fn chain_weight_skips_last_body() {
    let forces = AccelSet::new().with(ChainWeight { G: 1.0 });
    let sys = System::new(vec![
        body2([0.0, 0.0], [0.0, 0.0], 0.0, 3.0),
        body2([1.0, 0.0], [0.0, 0.0], 0.0, 1.0),
        body2([2.0, 0.0], [0.0, 0.0], 0.0, 1.0),
    ]);
    let acc = accels(&forces, &sys);

    assert_eq!(acc[0], NVec2::new(0.0, -1.0));
    assert_eq!(acc[1], NVec2::new(0.0, -1.0));
    assert_eq!(acc[2], NVec2::zeros());
}

#[test]
fn drag_opposes_velocity_in_shares() {
    let forces = AccelSet::new().with(Drag { G: 1.0, damping: 1.0 });
    let sys = System::new(vec![
        body2([0.0, 0.0], [1.0, 0.0], 0.0, 1.0),
        body2([1.0, 0.0], [0.0, 2.0], 0.0, 1.0),
        body2([2.0, 0.0], [1.0, 1.0], 0.0, 1.0),
    ]);
    let acc = accels(&forces, &sys);

    // body i carries (n - 1 - i) / n of the drag
    assert_relative_eq!(acc[0].x, -2.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(acc[1].y, -2.0 / 3.0, epsilon = 1e-12);
    assert_eq!(acc[2], NVec2::zeros());
}

#[test]
fn composite_systems_sum_their_terms() {
    let p = Parameters::default();
    let expected = [
        (SimKind::R1, 1),
        (SimKind::R2, 1),
        (SimKind::Spring, 1),
        (SimKind::String, 2),
        (SimKind::Charge, 1),
        (SimKind::Superposition, 2),
        (SimKind::Damped, 2),
        (SimKind::Discontinuous, 1),
    ];
    for (sim, terms) in expected {
        assert_eq!(AccelSet::<2>::for_sim(sim, &p).len(), terms, "{sim}");
    }
}

// ==================================================================================
// Integrator tests
// ==================================================================================

fn spring_pair() -> (System<2>, AccelSet<2>) {
    let sys = System::new(vec![
        body2([-1.0, 0.0], [0.0, 0.0], 0.0, 1.0),
        body2([1.0, 0.0], [0.0, 0.0], 0.0, 1.0),
    ]);
    let forces = AccelSet::new().with(Spring {
        G: 1.0,
        min_dist: 0.0,
        rest_length: 1.0,
        pairing: nbsim::Pairing::All,
    });
    (sys, forces)
}

fn spring_energy(sys: &System<2>) -> f64 {
    let kinetic: f64 = sys.bodies.iter().map(|b| 0.5 * b.m * b.v.norm_squared()).sum();
    let d = (sys.bodies[0].x - sys.bodies[1].x).norm();
    kinetic + (d - 1.0) * (d - 1.0)
}

#[test]
fn free_bodies_drift_in_straight_lines() {
    let forces = AccelSet::<2>::new();
    let integrators: [fn(&mut System<2>, &AccelSet<2>, f64); 2] =
        [verlet_integrator::<2>, rk4_integrator::<2>];
    for integrate in integrators {
        let mut sys = System::new(vec![body2([1.0, 2.0], [0.5, -0.25], 0.0, 1.0)]);
        for _ in 0..100 {
            integrate(&mut sys, &forces, 0.01);
        }
        assert_relative_eq!(sys.t, 1.0, epsilon = 1e-12);
        assert_relative_eq!(sys.bodies[0].x.x, 1.5, epsilon = 1e-12);
        assert_relative_eq!(sys.bodies[0].x.y, 1.75, epsilon = 1e-12);
    }
}

#[test]
fn rk4_conserves_spring_energy() {
    let (mut sys, forces) = spring_pair();
    let e0 = spring_energy(&sys);
    for _ in 0..1000 {
        rk4_integrator(&mut sys, &forces, 1e-3);
    }
    assert!((spring_energy(&sys) - e0).abs() < 1e-8);
}

#[test]
fn verlet_conserves_spring_energy() {
    let (mut sys, forces) = spring_pair();
    let e0 = spring_energy(&sys);
    for _ in 0..1000 {
        verlet_integrator(&mut sys, &forces, 1e-3);
    }
    assert!((spring_energy(&sys) - e0).abs() < 1e-4);
}

#[test]
fn rk4_keeps_momentum_of_symmetric_forces() {
    let mut sys = System::new(vec![
        body2([0.0, 0.0], [0.3, 0.0], 0.0, 2.0),
        body2([1.0, 0.5], [0.0, -0.2], 0.0, 1.0),
        body2([-1.0, 0.7], [0.1, 0.1], 0.0, 0.5),
    ]);
    let forces = AccelSet::for_sim(SimKind::R2, &Parameters::default());
    let momentum = |s: &System<2>| s.bodies.iter().map(|b| b.m * b.v).sum::<NVec2>();

    let p0 = momentum(&sys);
    for _ in 0..200 {
        rk4_integrator(&mut sys, &forces, 1e-3);
    }
    assert!((momentum(&sys) - p0).norm() < 1e-10);
}
