//! Safe Rust bindings for SVBONY astronomy and industrial cameras.
//!
//! ```no_run
//! # fn main() -> svbony::Result<()> {
//! let sdk = svbony::Sdk::new();
//! for info in sdk.cameras()? {
//!     println!("{} ({})", info.friendly_name, info.camera_sn);
//! }
//! let camera = sdk.open_index(0)?;
//! let mut capture = camera.capture()?;
//! let frame = capture.next_frame(Some(std::time::Duration::from_secs(2)))?;
//! frame.save("frame.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! Linking against the vendor library requires the `native` feature. Without
//! it the crate still builds, and [`mock::MockDriver`] stands in for the SDK.

pub mod capture;
pub mod common;
pub mod config;
pub mod control;
pub mod device;
pub mod device_info;
pub mod driver;
pub mod error;
pub mod frame;
pub mod misc;
pub mod mock;
pub mod trigger;

pub use svbony_sys as bindings;

// Re-export main types for convenience
pub use crate::capture::{VideoCapture, frame_buffer_size};
pub use crate::common::{
    BayerPattern, CameraMode, ControlType, ExposureStatus, FlipStatus, GuideDirection, ImageType, RoiFormat,
    TriggerOutputPin,
};
pub use crate::config::{CameraConfig, ControlSetting};
pub use crate::control::ControlCaps;
pub use crate::device::{Camera, Sdk};
pub use crate::device_info::{CameraInfo, CameraProperty, CameraPropertyEx, SerialNumber, SupportedModes, UpgradeStatus};
#[cfg(feature = "native")]
pub use crate::driver::NativeDriver;
pub use crate::driver::Driver;
pub use crate::error::{BINDING_ERROR_CODE, ErrorCode, Result, SvbError};
pub use crate::frame::Frame;
pub use crate::trigger::TriggerOutputConfig;
