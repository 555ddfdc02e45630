//! Headless driver for the driftfield effect.
//!
//! Loads the field settings, then ticks the field at a fixed frame rate and
//! streams every frame's draw commands as newline-delimited JSON. Logging goes
//! to stderr so stdout stays a clean frame stream.

mod clock;

use clap::{Parser, ValueEnum};
use driftfield_config::{load_config, FieldConfig};
use driftfield_simulation::{Field, Viewport};
use driftfield_transport::{
    FileSender, JsonSerializer, NullSender, RecordingSurface, Sender, Serializer, StdioSender, TransportError,
};
use env_logger::Env;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::error::Error;
use std::path::PathBuf;

use crate::clock::FrameClock;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the field configuration file (built-in preset when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Target frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    framerate: u32,

    /// Stop after this many frames (runs until killed when omitted)
    #[arg(long)]
    frames: Option<u64>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Where to send frames
    #[arg(long, value_enum, default_value_t = Output::Stdout)]
    output: Output,

    /// Output file used with `--output file`
    #[arg(long, default_value = "frames.jsonl")]
    output_path: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Output {
    Stdout,
    File,
    Null,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Reads log level directives from RUST_LOG, defaulting to `info`
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            load_config(path)?
        }
        None => {
            info!("No configuration given, using the built-in preset");
            FieldConfig::default()
        }
    };

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let viewport = Viewport::new(args.width, args.height);
    let mut field = Field::from_config(config, viewport, rng)?;
    info!(
        "Field ready: {} particles in a {}x{} viewport",
        field.particles().len(),
        viewport.width,
        viewport.height
    );

    let mut sender = create_sender(&args)?;
    let mut clock = FrameClock::new(args.framerate);
    info!("Running at {} FPS, sending frames to {:?}", args.framerate, args.output);

    let frames = run(&mut field, &mut clock, &JsonSerializer, sender.as_mut(), args.frames)?;
    info!("Stopped after {} frames", frames);
    Ok(())
}

fn create_sender(args: &Args) -> Result<Box<dyn Sender>, TransportError> {
    Ok(match args.output {
        Output::Stdout => Box::new(StdioSender::new()),
        Output::File => {
            info!("Writing frames to {}", args.output_path.display());
            Box::new(FileSender::new(&args.output_path)?)
        }
        Output::Null => Box::new(NullSender),
    })
}

/// Ticks the field until `limit` frames have been sent (forever when `None`).
///
/// Returns the number of frames sent.
fn run<R: Rng>(
    field: &mut Field<R>,
    clock: &mut FrameClock,
    serializer: &dyn Serializer,
    sender: &mut dyn Sender,
    limit: Option<u64>,
) -> Result<u64, TransportError> {
    let mut surface = RecordingSurface::default();
    let mut index = 0u64;

    while limit.map_or(true, |limit| index < limit) {
        let timestamp = clock.tick();
        field.animate(timestamp, &mut surface);

        let frame = surface.take_frame(index, timestamp);
        sender.send(&serializer.serialize(&frame)?)?;

        index += 1;
        if index % 600 == 0 {
            let moving = field.particles().iter().filter(|p| p.is_moving()).count();
            debug!("Frame {} at {:.1}ms, {} particles moving", index, timestamp, moving);
        }
    }

    sender.flush()?;
    Ok(index)
}
