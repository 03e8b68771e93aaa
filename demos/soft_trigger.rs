//! Soft-trigger capture loop: one trigger per frame, long exposures.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{debug, info};
use svbony::mock::{MockCamera, MockDriver};
use svbony::{CameraMode, ControlType, ImageType, RoiFormat, Sdk};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Index of the camera in the connected list
    #[arg(long, default_value_t = 0)]
    index: usize,

    #[arg(long, default_value_t = 5)]
    frames: u32,

    /// Exposure in seconds
    #[arg(long, default_value_t = 10.0)]
    exposure: f64,

    /// Poll interval while waiting for the exposure to finish, in milliseconds
    #[arg(long, default_value_t = 100)]
    poll_ms: u64,

    #[arg(long, default_value = ".")]
    output: PathBuf,

    /// Use the in-memory trigger camera instead of the vendor library
    #[arg(long)]
    mock: bool,
}

#[cfg(feature = "native")]
fn native_sdk() -> Result<Sdk> {
    Ok(Sdk::new())
}

#[cfg(not(feature = "native"))]
fn native_sdk() -> Result<Sdk> {
    bail!("built without the `native` feature; rebuild with it or pass --mock")
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let sdk = if args.mock {
        Sdk::with_driver(Arc::new(MockDriver::empty().with_camera(MockCamera::mono_trigger(0))))
    } else {
        native_sdk()?
    };

    println!("SDK version: {}", sdk.version());
    let camera = sdk.open_index(args.index).context("opening camera")?;

    let modes = camera.supported_modes()?;
    if !modes.contains(CameraMode::SoftTrigger) {
        camera.close()?;
        bail!("camera does not support soft trigger mode");
    }
    if camera.camera_mode()? != CameraMode::SoftTrigger {
        info!("switching to soft trigger mode");
        camera.set_camera_mode(CameraMode::SoftTrigger)?;
    }

    let props = camera.property()?;
    camera.set_roi_format(RoiFormat::full_frame(props.max_width, props.max_height, 1))?;
    if props.supports_format(ImageType::Raw16) {
        camera.set_output_image_type(ImageType::Raw16)?;
    }
    camera.set_auto_save_param(false)?;

    let exposure_us = (args.exposure * 1_000_000.0) as i64;
    camera.set_control_value(ControlType::Exposure, exposure_us, false)?;
    println!("ROI: {}, image type: {}", camera.roi_format()?, camera.output_image_type()?);

    let poll = Some(Duration::from_millis(args.poll_ms));
    let mut capture = camera.capture()?;
    for i in 1..=args.frames {
        println!("Capture frame nr. {i}");
        let start = Instant::now();
        camera.send_soft_trigger()?;

        let frame = loop {
            match capture.next_frame(poll) {
                Ok(frame) => break frame,
                Err(err) if err.is_timeout() => {
                    debug!("waiting, {:.1}s elapsed", start.elapsed().as_secs_f64());
                }
                Err(err) => return Err(err.into()),
            }
        };

        let path = args.output.join(format!("SVB_image_{i}.raw"));
        frame.save_raw(&path)?;
        println!("\tsaved {} after {:.1}s", path.display(), start.elapsed().as_secs_f64());
        println!("\tdropped frames: {}", camera.dropped_frames()?);
    }
    capture.stop()?;

    println!("Close camera");
    camera.close()?;
    Ok(())
}
