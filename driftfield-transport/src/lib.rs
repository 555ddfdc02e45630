//! Headless rendering for the field: record draw calls, serialize them per
//! frame and ship them somewhere (stdout, a file, or nowhere).
//!
//! - [`RecordingSurface`] implements the simulation's `Surface` trait.
//! - [`Serializer`] turns a [`Frame`] into bytes ([`JsonSerializer`]).
//! - [`Sender`] writes those bytes out ([`StdioSender`], [`FileSender`], [`NullSender`]).

use std::io::Error as IoError;
use thiserror::Error;

pub mod recorder;
pub mod sender;
pub mod serializer;

pub use recorder::{DrawCommand, Frame, RecordingSurface};
pub use sender::{FileSender, NullSender, Sender, StdioSender};
pub use serializer::{JsonSerializer, Serializer};

/// Errors that can occur while serializing or sending frames.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}
