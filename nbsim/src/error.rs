use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Unknown simulation '{name}' (expected one of: {known})")]
    UnknownSimulation { name: String, known: String },

    #[error("Invalid number of dimensions (expected 2 or 3, got {dim})")]
    InvalidDimension { dim: usize },

    #[error("Need at least {min} particles, got {n}")]
    TooFewParticles { n: usize, min: usize },

    #[error("Episode count must be positive")]
    NoEpisodes,

    #[error("Step count must be positive")]
    NoSteps,

    #[error("Sub-step count must be positive")]
    NoSubsteps,

    #[error("Time step must be finite and positive, got {dt}")]
    InvalidTimeStep { dt: f64 },

    #[error("A NaN or Inf value was produced in episode {episode} at step {step}")]
    NanOrInf { episode: usize, step: usize },

    #[error("Dataset has not been simulated yet")]
    NotSimulated,

    #[error("Array shape mismatch: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write npy file {path}: {source}")]
    Npy {
        path: PathBuf,
        #[source]
        source: ndarray_npy::WriteNpyError,
    },

    #[error("{} of the sweep items failed: {}", failed.len(), failed.join(", "))]
    SweepFailed { failed: Vec<String> },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
