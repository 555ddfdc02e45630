//! Core particle model for the driftfield effect.
//!
//! A [`Particle`] knows where it is, how large it is, and where it is heading.
//! Motion is driven entirely by the timestamps handed to
//! [`Particle::get_position`], so the same particle can be replayed
//! deterministically from a recorded tick sequence.

pub mod error;
pub mod particle;
pub mod position;

// Re-export commonly used items
pub use error::ParticleError;
pub use particle::{Direction, Particle, Radius, Status};
pub use position::Position;
