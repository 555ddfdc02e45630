//! Field controller for the wandering-dots effect.
//!
//! [`Field`] owns the particle collection and is driven once per display
//! refresh through [`Field::animate`], drawing onto anything implementing
//! [`Surface`]. With the `web` feature enabled, [`web::WebField`] wires a
//! field to an HTML canvas for use from page script.

pub mod field;
pub mod surface;
#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used items
pub use driftfield_config::{FieldConfig, StartOrigin};
pub use driftfield_core::{Particle, ParticleError, Position, Status};
pub use field::{Field, Viewport};
pub use surface::Surface;
