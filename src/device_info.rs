//! Typed copies of the SDK's camera description structs.
//!
//! Serialized field names follow the vendor header so a JSON dump reads the
//! same as the struct documentation.

use serde::{Deserialize, Serialize};
use svbony_sys as sys;

use crate::common::{BayerPattern, CameraMode, ImageType, known};
use crate::error::Result;
use crate::misc::{fixed_bytes_to_string, fixed_cstr_to_string, take_until_sentinel};

/// Entry of the connected camera list (`SVB_CAMERA_INFO`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CameraInfo {
    #[serde(rename = "FriendlyName")]
    pub friendly_name: String,
    #[serde(rename = "CameraSN")]
    pub camera_sn: String,
    #[serde(rename = "PortType")]
    pub port_type: String,
    #[serde(rename = "DeviceID")]
    pub device_id: u32,
    /// Handle to pass to every other call for this camera.
    #[serde(rename = "CameraID")]
    pub camera_id: i32,
}

impl CameraInfo {
    pub fn from_native(info: &sys::SVB_CAMERA_INFO) -> Self {
        Self {
            friendly_name: fixed_cstr_to_string(&info.FriendlyName),
            camera_sn: fixed_cstr_to_string(&info.CameraSN),
            port_type: fixed_cstr_to_string(&info.PortType),
            device_id: info.DeviceID,
            camera_id: info.CameraID,
        }
    }
}

/// Sensor capabilities (`SVB_CAMERA_PROPERTY`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraProperty {
    #[serde(rename = "MaxHeight")]
    pub max_height: i64,
    #[serde(rename = "MaxWidth")]
    pub max_width: i64,
    #[serde(rename = "IsColorCam")]
    pub is_color_cam: bool,
    #[serde(rename = "BayerPattern")]
    pub bayer_pattern: BayerPattern,
    /// Supported binning factors, e.g. `[1, 2]`.
    #[serde(rename = "SupportedBins")]
    pub supported_bins: Vec<i32>,
    #[serde(rename = "SupportedVideoFormat")]
    pub supported_video_format: Vec<ImageType>,
    #[serde(rename = "MaxBitDepth")]
    pub max_bit_depth: i32,
    #[serde(rename = "IsTriggerCam")]
    pub is_trigger_cam: bool,
}

impl CameraProperty {
    /// Fails with `UnknownValue` if the SDK reports a bayer pattern or image
    /// format newer than this crate.
    pub fn from_native(props: &sys::SVB_CAMERA_PROPERTY) -> Result<Self> {
        let supported_video_format = take_until_sentinel(&props.SupportedVideoFormat, sys::SVB_IMG_END)
            .into_iter()
            .map(|raw| known(ImageType::from_raw(raw), "image type", raw))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            max_height: i64::from(props.MaxHeight),
            max_width: i64::from(props.MaxWidth),
            is_color_cam: props.IsColorCam != sys::SVB_FALSE,
            bayer_pattern: known(
                BayerPattern::from_raw(props.BayerPattern),
                "bayer pattern",
                props.BayerPattern,
            )?,
            supported_bins: take_until_sentinel(&props.SupportedBins, 0),
            supported_video_format,
            max_bit_depth: props.MaxBitDepth,
            is_trigger_cam: props.IsTriggerCam != sys::SVB_FALSE,
        })
    }

    pub fn supports_bin(&self, bin: i32) -> bool {
        self.supported_bins.contains(&bin)
    }

    pub fn supports_format(&self, image_type: ImageType) -> bool {
        self.supported_video_format.contains(&image_type)
    }
}

/// Extra capabilities (`SVB_CAMERA_PROPERTY_EX`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CameraPropertyEx {
    #[serde(rename = "bSupportPulseGuide")]
    pub supports_pulse_guide: bool,
    #[serde(rename = "bSupportControlTemp")]
    pub supports_control_temp: bool,
}

impl CameraPropertyEx {
    pub fn from_native(props: &sys::SVB_CAMERA_PROPERTY_EX) -> Self {
        Self {
            supports_pulse_guide: props.bSupportPulseGuide != sys::SVB_FALSE,
            supports_control_temp: props.bSupportControlTemp != sys::SVB_FALSE,
        }
    }
}

/// Acquisition modes a camera accepts (`SVB_SUPPORTED_MODE`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SupportedModes {
    #[serde(rename = "SupportedCameraMode")]
    pub modes: Vec<CameraMode>,
}

impl SupportedModes {
    pub fn from_native(modes: &sys::SVB_SUPPORTED_MODE) -> Result<Self> {
        let modes = take_until_sentinel(&modes.SupportedCameraMode, sys::SVB_MODE_END)
            .into_iter()
            .map(|raw| known(CameraMode::from_raw(raw), "camera mode", raw))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { modes })
    }

    pub fn contains(&self, mode: CameraMode) -> bool {
        self.modes.contains(&mode)
    }

    /// `true` when anything beyond free-running video is available.
    pub fn has_trigger_modes(&self) -> bool {
        self.modes.iter().any(|m| m.is_triggered())
    }
}

/// Camera serial number (`SVB_SN`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SerialNumber {
    pub id: String,
}

impl SerialNumber {
    pub fn from_native(sn: &sys::SVB_SN) -> Self {
        Self {
            id: fixed_bytes_to_string(&sn.id),
        }
    }
}

impl std::fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}

/// Result of the firmware upgrade check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpgradeStatus {
    pub needs_upgrade: bool,
    /// Minimum firmware version required; empty when no upgrade is needed.
    pub min_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SvbError;
    use std::os::raw::c_char;

    fn fill(dst: &mut [c_char], s: &str) {
        for (d, b) in dst.iter_mut().zip(s.bytes()) {
            *d = b as c_char;
        }
    }

    #[test]
    fn camera_info_strings() {
        let mut raw = sys::SVB_CAMERA_INFO::default();
        fill(&mut raw.FriendlyName, "SVBONY SV405CC");
        fill(&mut raw.CameraSN, "0123456789ABCDEF0123456789ABCDEF");
        raw.CameraID = 3;
        let info = CameraInfo::from_native(&raw);
        assert_eq!(info.friendly_name, "SVBONY SV405CC");
        // Unterminated array is taken whole, never read past its bound.
        assert_eq!(info.camera_sn.len(), 32);
        assert_eq!(info.port_type, "");
        assert_eq!(info.camera_id, 3);
    }

    #[test]
    fn property_truncates_arrays() {
        let mut raw = sys::SVB_CAMERA_PROPERTY::default();
        raw.MaxWidth = 3008;
        raw.MaxHeight = 3008;
        raw.SupportedBins[..3].copy_from_slice(&[1, 2, 4]);
        raw.SupportedBins[5] = 8;
        raw.SupportedVideoFormat[..2].copy_from_slice(&[sys::SVB_IMG_RAW8, sys::SVB_IMG_RAW16]);
        raw.IsColorCam = sys::SVB_TRUE;
        let props = CameraProperty::from_native(&raw).unwrap();
        assert_eq!(props.supported_bins, vec![1, 2, 4]);
        assert_eq!(props.supported_video_format, vec![ImageType::Raw8, ImageType::Raw16]);
        assert!(props.is_color_cam);
        assert!(props.supports_bin(4));
        assert!(!props.supports_bin(8));
    }

    #[test]
    fn property_with_unknown_format_fails() {
        let mut raw = sys::SVB_CAMERA_PROPERTY::default();
        raw.SupportedVideoFormat[0] = 42;
        match CameraProperty::from_native(&raw) {
            Err(SvbError::UnknownValue { kind: "image type", value: 42 }) => {}
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn serializes_with_vendor_names() {
        let ex = CameraPropertyEx {
            supports_pulse_guide: true,
            supports_control_temp: false,
        };
        let json = serde_json::to_value(ex).unwrap();
        assert_eq!(json["bSupportPulseGuide"], true);
        assert_eq!(json["bSupportControlTemp"], false);
    }

    #[test]
    fn modes_stop_at_end_marker() {
        let mut raw = sys::SVB_SUPPORTED_MODE::default();
        raw.SupportedCameraMode[..2].copy_from_slice(&[sys::SVB_MODE_NORMAL, sys::SVB_MODE_TRIG_SOFT]);
        let modes = SupportedModes::from_native(&raw).unwrap();
        assert_eq!(modes.modes, vec![CameraMode::Normal, CameraMode::SoftTrigger]);
        assert!(modes.has_trigger_modes());
    }

    #[test]
    fn serial_number_is_bounded() {
        let sn = sys::SVB_SN { id: *b"ABCDEFGH" };
        assert_eq!(SerialNumber::from_native(&sn).id, "ABCDEFGH");
        let sn = sys::SVB_SN { id: *b"1234\0\0\0\0" };
        assert_eq!(SerialNumber::from_native(&sn).to_string(), "1234");
    }
}
