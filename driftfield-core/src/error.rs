use thiserror::Error;

/// Errors raised while building particles.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParticleError {
    /// The resolved radius was below zero.
    #[error("Particle radius {radius} pixels cannot be negative")]
    InvalidRadius { radius: f64 },
}
