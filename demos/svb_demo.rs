//! Enumerate cameras, print their properties and controls, then grab a few
//! frames from the last one.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use svbony::mock::MockDriver;
use svbony::{CameraMode, ImageType, RoiFormat, Sdk};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of frames to capture
    #[arg(long, default_value_t = 2)]
    frames: u32,

    /// Frame wait timeout in milliseconds
    #[arg(long, default_value_t = 100)]
    wait_ms: u64,

    /// ROI width after binning; the full sensor when omitted
    #[arg(long)]
    width: Option<i32>,

    /// ROI height after binning; the full sensor when omitted
    #[arg(long)]
    height: Option<i32>,

    #[arg(long, default_value_t = 1)]
    bin: i32,

    /// Save PNG files next to the raw dumps
    #[arg(long)]
    png: bool,

    #[arg(long, default_value = ".")]
    output: PathBuf,

    /// Use the in-memory camera instead of the vendor library
    #[arg(long)]
    mock: bool,
}

#[cfg(feature = "native")]
fn native_sdk() -> Result<Sdk> {
    Ok(Sdk::new())
}

#[cfg(not(feature = "native"))]
fn native_sdk() -> Result<Sdk> {
    anyhow::bail!("built without the `native` feature; rebuild with it or pass --mock")
}

fn separator(c: char, len: usize) {
    println!("\n{}\n", c.to_string().repeat(len));
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let sdk = if args.mock {
        Sdk::with_driver(Arc::new(MockDriver::new()))
    } else {
        native_sdk()?
    };

    println!("SDK version: {}", sdk.version());
    let cameras = sdk.cameras().context("listing cameras")?;
    println!("Connected camera(s): {}", cameras.len());

    for info in &cameras {
        separator('-', 50);
        println!("Friendly name: {}", info.friendly_name);
        println!("Port type:     {}", info.port_type);
        println!("Serial number: {}", info.camera_sn);
        println!("Device ID:     {:#x}", info.device_id);
        println!("Camera ID:     {}", info.camera_id);
    }

    let Some(last) = cameras.last() else {
        warn!("no camera connected");
        return Ok(());
    };

    info!("opening camera {}", last.camera_id);
    let camera = sdk.open(last.camera_id)?;

    separator('-', 50);
    let props = camera.property()?;
    println!("Camera properties:");
    println!("\tmaximum size:   {}x{}", props.max_width, props.max_height);
    println!("\tcolor space:    {}", if props.is_color_cam { "color" } else { "mono" });
    println!("\tbayer pattern:  {}", props.bayer_pattern);
    println!("\tsupported bins: {:?}", props.supported_bins);
    let formats: Vec<String> = props.supported_video_format.iter().map(ToString::to_string).collect();
    println!("\timage types:    {}", formats.join(", "));
    println!("\tmax bit depth:  {}", props.max_bit_depth);
    println!("\ttrigger camera: {}", props.is_trigger_cam);

    let ex = camera.property_ex()?;
    println!("\tcontrol temp:   {}", ex.supports_control_temp);
    println!("\tpulse guide:    {}", ex.supports_pulse_guide);
    println!("\tfirmware:       {}", camera.firmware_version()?);
    println!("\tserial number:  {}", camera.serial_number()?);

    separator('-', 50);
    let controls = camera.controls()?;
    println!("Num of controls: {}", controls.len());
    for caps in &controls {
        let (value, auto) = camera.control_value(caps.control_type)?;
        separator('=', 40);
        println!("\ttype:        {}", caps.control_type);
        println!("\tname:        {}", caps.name);
        println!("\tdescription: {}", caps.description);
        println!("\trange:       {}..={} (default {})", caps.min_value, caps.max_value, caps.default_value);
        println!("\tauto:        {}", if caps.is_auto_supported { "YES" } else { "NO" });
        println!("\twritable:    {}", if caps.is_writable { "YES" } else { "NO" });
        println!("\tcurrent:     {value} (auto: {auto})");
    }

    separator('-', 50);
    let modes = camera.supported_modes()?;
    println!("Supported modes: {:?}", modes.modes);
    let mode = camera.camera_mode()?;
    println!("Current mode: {mode}");
    if mode != CameraMode::Normal {
        info!("switching to normal mode");
        camera.set_camera_mode(CameraMode::Normal)?;
    }

    let full = RoiFormat::full_frame(props.max_width, props.max_height, args.bin);
    let roi = RoiFormat {
        width: args.width.unwrap_or(full.width),
        height: args.height.unwrap_or(full.height),
        ..full
    };
    camera.set_roi_format(roi)?;
    println!("ROI: {}", camera.roi_format()?);

    camera.set_auto_save_param(false)?;
    println!("Pixel size: {} um", camera.sensor_pixel_size()?);

    let image_type = camera.output_image_type()?;
    if image_type == ImageType::Rgb32 {
        camera.set_output_image_type(ImageType::Rgb24)?;
    }

    separator('=', 50);
    let mut capture = camera.capture()?;
    let wait = Some(Duration::from_millis(args.wait_ms));
    for i in 1..=args.frames {
        let frame = match capture.next_frame(wait) {
            Ok(frame) => frame,
            Err(err) if err.is_timeout() => {
                warn!("frame {i}: timeout");
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        let raw = args.output.join(format!("SVB_image_{i}.raw"));
        frame.save_raw(&raw)?;
        println!("\tframe {i}: {}x{} {} -> {}", frame.width, frame.height, frame.image_type, raw.display());
        if args.png {
            frame.save(args.output.join(format!("SVB_image_{i}.png")))?;
        }
        println!("\tdropped frames: {}", capture.camera().dropped_frames()?);
    }
    capture.stop()?;

    println!("Close camera");
    camera.close()?;
    Ok(())
}
