use driftfield_simulation::Surface;
use serde::{Deserialize, Serialize};

/// One call made against a [`Surface`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Resize { width: u32, height: u32 },
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    FillStyle { style: String },
    BeginPath,
    Arc { x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64 },
    ClosePath,
    Fill,
}

/// Everything drawn during a single tick.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: u64,
    pub timestamp_ms: f64,
    pub commands: Vec<DrawCommand>,
}

/// A surface that draws nothing and remembers every call instead.
///
/// Backing-store size changes are recorded as [`DrawCommand::Resize`] so a
/// replaying client can size its own canvas.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Commands recorded since the last [`RecordingSurface::take_frame`].
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drains the recorded commands into a frame.
    pub fn take_frame(&mut self, index: u64, timestamp_ms: f64) -> Frame {
        Frame {
            index,
            timestamp_ms,
            commands: std::mem::take(&mut self.commands),
        }
    }

    fn record_resize(&mut self) {
        let (width, height) = (self.width, self.height);
        // Width and height usually change together; keep one entry per frame
        if let Some(DrawCommand::Resize { width: w, height: h }) = self.commands.last_mut() {
            *w = width;
            *h = height;
            return;
        }
        self.commands.push(DrawCommand::Resize { width, height });
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_width(&mut self, width: u32) {
        self.width = width;
        self.record_resize();
    }

    fn set_height(&mut self, height: u32) {
        self.height = height;
        self.record_resize();
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn set_fill_style(&mut self, style: &str) {
        self.commands.push(DrawCommand::FillStyle { style: style.to_string() });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.commands.push(DrawCommand::Arc {
            x,
            y,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }
}
