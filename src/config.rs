//! Camera settings that can be stored as JSON and applied in one go.

use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::common::{CameraMode, ControlType, ImageType, RoiFormat};
use crate::device::Camera;
use crate::error::Result;

/// Value for one control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSetting {
    pub control: ControlType,
    pub value: i64,
    #[serde(default)]
    pub auto: bool,
}

/// A set of camera settings. Missing fields are left untouched when applied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roi: Option<RoiFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_type: Option<ImageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<CameraMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_save_param: Option<bool>,
    pub controls: Vec<ControlSetting>,
}

impl CameraConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builder-style helper for adding a control value.
    #[must_use]
    pub fn with_control(mut self, control: ControlType, value: i64, auto: bool) -> Self {
        self.controls.push(ControlSetting { control, value, auto });
        self
    }
}

impl Camera {
    /// Apply `config` in the order ROI, image type, mode, controls, auto-save.
    /// Stops at the first failing call.
    pub fn apply_config(&self, config: &CameraConfig) -> Result<()> {
        if let Some(roi) = config.roi {
            self.set_roi_format(roi)?;
        }
        if let Some(image_type) = config.image_type {
            self.set_output_image_type(image_type)?;
        }
        if let Some(mode) = config.mode {
            self.set_camera_mode(mode)?;
        }
        for setting in &config.controls {
            debug!("camera {}: {} = {} (auto: {})", self.id(), setting.control, setting.value, setting.auto);
            self.set_control_value(setting.control, setting.value, setting.auto)?;
        }
        if let Some(enable) = config.auto_save_param {
            self.set_auto_save_param(enable)?;
        }
        info!("camera {}: applied {} control settings", self.id(), config.controls.len());
        Ok(())
    }

    /// Read the current ROI, image type, mode (trigger cameras only) and every
    /// writable control.
    pub fn snapshot_config(&self) -> Result<CameraConfig> {
        let property = self.property()?;
        let mode = if property.is_trigger_cam {
            Some(self.camera_mode()?)
        } else {
            None
        };

        let mut controls = Vec::new();
        for caps in self.controls()?.into_iter().filter(|c| c.is_writable) {
            let (value, auto) = self.control_value(caps.control_type)?;
            controls.push(ControlSetting {
                control: caps.control_type,
                value,
                auto,
            });
        }

        Ok(CameraConfig {
            roi: Some(self.roi_format()?),
            image_type: Some(self.output_image_type()?),
            mode,
            auto_save_param: None,
            controls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_config() {
        let config = CameraConfig::from_json_str(
            r#"{
                "image_type": "Raw16",
                "controls": [
                    {"control": "Exposure", "value": 100000},
                    {"control": "Gain", "value": 30, "auto": true}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.image_type, Some(ImageType::Raw16));
        assert_eq!(config.roi, None);
        assert_eq!(config.controls.len(), 2);
        assert!(!config.controls[0].auto);
        assert!(config.controls[1].auto);
    }

    #[test]
    fn json_round_trip() {
        let config = CameraConfig {
            roi: Some(RoiFormat::new(0, 0, 800, 600, 1)),
            mode: Some(CameraMode::SoftTrigger),
            ..Default::default()
        }
        .with_control(ControlType::Gain, 50, false);
        let json = config.to_json_string().unwrap();
        assert!(!json.contains("auto_save_param"));
        assert_eq!(CameraConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn bad_json_is_config_error() {
        let err = CameraConfig::from_json_str("{\"controls\": 5}").unwrap_err();
        assert!(matches!(err, crate::error::SvbError::Config(_)));
    }
}
