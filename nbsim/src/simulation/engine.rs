//! Runtime engine settings
//!
//! Selects the integrator and the worker pool used when generating a
//! dataset. Every generator receives its engine explicitly.

use crate::configuration::config::IntegratorConfig;
use crate::error::SimError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Engine {
    pub integrator: IntegratorConfig, // verlet or rk4
    pub threads: Option<usize>, // None = rayon default pool, Some(1) = calling thread
}

impl Engine {
    /// Run `job` under this engine's worker configuration.
    /// `parallel` tells the job whether it may fan out over rayon.
    pub fn install<R, F>(&self, job: F) -> Result<R, SimError>
    where
        R: Send,
        F: FnOnce(bool) -> R + Send,
    {
        match self.threads {
            Some(1) => Ok(job(false)),
            Some(k) => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(k).build()?;
                Ok(pool.install(|| job(true)))
            }
            None => Ok(job(true)),
        }
    }

    pub fn describe(&self) -> String {
        match self.threads {
            Some(1) => "cpu, sequential".to_string(),
            Some(k) => format!("cpu, {k} threads"),
            None => format!("cpu, {} threads", rayon::current_num_threads()),
        }
    }
}
