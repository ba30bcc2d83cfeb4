//! Core state types for the N-body simulation.
//!
//! Bodies and systems are generic over the spatial dimension `D`, so the
//! 2D and 3D datasets share one implementation. `NVec2`/`NVec3` name the
//! two dimensions the generator supports.
//!
//! Each system holds the list of bodies and the current simulation time `t`.

use nalgebra::SVector;

pub type NVec<const D: usize> = SVector<f64, D>;
pub type NVec2 = NVec<2>;
pub type NVec3 = NVec<3>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body<const D: usize> {
    pub x: NVec<D>, // position
    pub v: NVec<D>, // velocity
    pub q: f64, // charge
    pub m: f64, // mass
}

impl<const D: usize> Body<D> {
    /// Width of a packed row: position, velocity, charge, mass
    pub const PACKED_LEN: usize = 2 * D + 2;

    /// Unpack a row laid out as `[x.., v.., q, m]`
    pub fn from_packed(row: &[f64]) -> Self {
        debug_assert_eq!(row.len(), Self::PACKED_LEN);
        Self {
            x: NVec::<D>::from_column_slice(&row[..D]),
            v: NVec::<D>::from_column_slice(&row[D..2 * D]),
            q: row[2 * D],
            m: row[2 * D + 1],
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.iter().chain(self.v.iter()).all(|c| c.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct System<const D: usize> {
    pub bodies: Vec<Body<D>>, // collection of bodies
    pub t: f64, // time
}

impl<const D: usize> System<D> {
    pub fn new(bodies: Vec<Body<D>>) -> Self {
        Self { bodies, t: 0.0 }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn is_finite(&self) -> bool {
        self.bodies.iter().all(Body::is_finite)
    }
}
