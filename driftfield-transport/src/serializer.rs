use crate::recorder::Frame;
use crate::TransportError;

/// Turns a recorded frame into bytes ready to send.
pub trait Serializer {
    fn serialize(&self, frame: &Frame) -> Result<Vec<u8>, TransportError>;
}

/// JSON serializer implementation, one compact document per frame.
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize(&self, frame: &Frame) -> Result<Vec<u8>, TransportError> {
        Ok(serde_json::to_vec(frame)?)
    }
}
