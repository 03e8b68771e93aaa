use std::fmt;

use serde::{Deserialize, Serialize};
use svbony_sys as sys;

use crate::error::{Result, SvbError};

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BayerPattern {
    RG = sys::SVB_BAYER_RG,
    BG = sys::SVB_BAYER_BG,
    GR = sys::SVB_BAYER_GR,
    GB = sys::SVB_BAYER_GB,
}

impl BayerPattern {
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    pub fn from_raw(value: i32) -> Option<Self> {
        match value {
            sys::SVB_BAYER_RG => Some(BayerPattern::RG),
            sys::SVB_BAYER_BG => Some(BayerPattern::BG),
            sys::SVB_BAYER_GR => Some(BayerPattern::GR),
            sys::SVB_BAYER_GB => Some(BayerPattern::GB),
            _ => None,
        }
    }
}

impl fmt::Display for BayerPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Pixel format of the frames delivered by `SVBGetVideoData`.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageType {
    Raw8 = sys::SVB_IMG_RAW8,
    Raw10 = sys::SVB_IMG_RAW10,
    Raw12 = sys::SVB_IMG_RAW12,
    Raw14 = sys::SVB_IMG_RAW14,
    Raw16 = sys::SVB_IMG_RAW16,
    Y8 = sys::SVB_IMG_Y8,
    Y10 = sys::SVB_IMG_Y10,
    Y12 = sys::SVB_IMG_Y12,
    Y14 = sys::SVB_IMG_Y14,
    Y16 = sys::SVB_IMG_Y16,
    Rgb24 = sys::SVB_IMG_RGB24,
    Rgb32 = sys::SVB_IMG_RGB32,
}

impl ImageType {
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    pub fn from_raw(value: i32) -> Option<Self> {
        use ImageType::*;
        match value {
            sys::SVB_IMG_RAW8 => Some(Raw8),
            sys::SVB_IMG_RAW10 => Some(Raw10),
            sys::SVB_IMG_RAW12 => Some(Raw12),
            sys::SVB_IMG_RAW14 => Some(Raw14),
            sys::SVB_IMG_RAW16 => Some(Raw16),
            sys::SVB_IMG_Y8 => Some(Y8),
            sys::SVB_IMG_Y10 => Some(Y10),
            sys::SVB_IMG_Y12 => Some(Y12),
            sys::SVB_IMG_Y14 => Some(Y14),
            sys::SVB_IMG_Y16 => Some(Y16),
            sys::SVB_IMG_RGB24 => Some(Rgb24),
            sys::SVB_IMG_RGB32 => Some(Rgb32),
            _ => None,
        }
    }

    /// Nominal bit depth of one pixel.
    pub fn bits_per_pixel(self) -> u32 {
        use ImageType::*;
        match self {
            Raw8 | Y8 => 8,
            Raw10 | Y10 => 10,
            Raw12 | Y12 => 12,
            Raw14 | Y14 => 14,
            Raw16 | Y16 => 16,
            Rgb24 => 24,
            Rgb32 => 32,
        }
    }

    /// Bytes one pixel occupies in a frame buffer. Depths between 9 and 16
    /// bits are stored in two little-endian bytes.
    pub fn bytes_per_pixel(self) -> usize {
        use ImageType::*;
        match self {
            Raw8 | Y8 => 1,
            Raw10 | Raw12 | Raw14 | Raw16 | Y10 | Y12 | Y14 | Y16 => 2,
            Rgb24 => 3,
            Rgb32 => 4,
        }
    }

    pub fn is_color(self) -> bool {
        matches!(self, ImageType::Rgb24 | ImageType::Rgb32)
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageType::Raw8 => "RAW8",
            ImageType::Raw10 => "RAW10",
            ImageType::Raw12 => "RAW12",
            ImageType::Raw14 => "RAW14",
            ImageType::Raw16 => "RAW16",
            ImageType::Y8 => "Y8",
            ImageType::Y10 => "Y10",
            ImageType::Y12 => "Y12",
            ImageType::Y14 => "Y14",
            ImageType::Y16 => "Y16",
            ImageType::Rgb24 => "RGB24",
            ImageType::Rgb32 => "RGB32",
        };
        f.write_str(name)
    }
}

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuideDirection {
    North = sys::SVB_GUIDE_NORTH,
    South = sys::SVB_GUIDE_SOUTH,
    East = sys::SVB_GUIDE_EAST,
    West = sys::SVB_GUIDE_WEST,
}

impl GuideDirection {
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    pub fn from_raw(value: i32) -> Option<Self> {
        match value {
            sys::SVB_GUIDE_NORTH => Some(GuideDirection::North),
            sys::SVB_GUIDE_SOUTH => Some(GuideDirection::South),
            sys::SVB_GUIDE_EAST => Some(GuideDirection::East),
            sys::SVB_GUIDE_WEST => Some(GuideDirection::West),
            _ => None,
        }
    }
}

impl fmt::Display for GuideDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Value of the [`ControlType::Flip`] control.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlipStatus {
    #[default]
    None = sys::SVB_FLIP_NONE,
    Horizontal = sys::SVB_FLIP_HORIZ,
    Vertical = sys::SVB_FLIP_VERT,
    Both = sys::SVB_FLIP_BOTH,
}

impl FlipStatus {
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    pub fn from_raw(value: i32) -> Option<Self> {
        match value {
            sys::SVB_FLIP_NONE => Some(FlipStatus::None),
            sys::SVB_FLIP_HORIZ => Some(FlipStatus::Horizontal),
            sys::SVB_FLIP_VERT => Some(FlipStatus::Vertical),
            sys::SVB_FLIP_BOTH => Some(FlipStatus::Both),
            _ => None,
        }
    }
}

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CameraMode {
    #[default]
    Normal = sys::SVB_MODE_NORMAL,
    SoftTrigger = sys::SVB_MODE_TRIG_SOFT,
    RiseEdge = sys::SVB_MODE_TRIG_RISE_EDGE,
    FallEdge = sys::SVB_MODE_TRIG_FALL_EDGE,
    DoubleEdge = sys::SVB_MODE_TRIG_DOUBLE_EDGE,
    HighLevel = sys::SVB_MODE_TRIG_HIGH_LEVEL,
    LowLevel = sys::SVB_MODE_TRIG_LOW_LEVEL,
}

impl CameraMode {
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    pub fn from_raw(value: i32) -> Option<Self> {
        use CameraMode::*;
        match value {
            sys::SVB_MODE_NORMAL => Some(Normal),
            sys::SVB_MODE_TRIG_SOFT => Some(SoftTrigger),
            sys::SVB_MODE_TRIG_RISE_EDGE => Some(RiseEdge),
            sys::SVB_MODE_TRIG_FALL_EDGE => Some(FallEdge),
            sys::SVB_MODE_TRIG_DOUBLE_EDGE => Some(DoubleEdge),
            sys::SVB_MODE_TRIG_HIGH_LEVEL => Some(HighLevel),
            sys::SVB_MODE_TRIG_LOW_LEVEL => Some(LowLevel),
            _ => None,
        }
    }

    /// Any mode other than free-running video waits for a trigger.
    pub fn is_triggered(self) -> bool {
        self != CameraMode::Normal
    }
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerOutputPin {
    PinA = sys::SVB_TRIG_OUTPUT_PINA,
    PinB = sys::SVB_TRIG_OUTPUT_PINB,
    None = sys::SVB_TRIG_OUTPUT_NONE,
}

impl TriggerOutputPin {
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    pub fn from_raw(value: i32) -> Option<Self> {
        match value {
            sys::SVB_TRIG_OUTPUT_PINA => Some(TriggerOutputPin::PinA),
            sys::SVB_TRIG_OUTPUT_PINB => Some(TriggerOutputPin::PinB),
            sys::SVB_TRIG_OUTPUT_NONE => Some(TriggerOutputPin::None),
            _ => None,
        }
    }
}

impl fmt::Display for TriggerOutputPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlType {
    Gain = sys::SVB_GAIN,
    Exposure = sys::SVB_EXPOSURE,
    Gamma = sys::SVB_GAMMA,
    GammaContrast = sys::SVB_GAMMA_CONTRAST,
    WbR = sys::SVB_WB_R,
    WbG = sys::SVB_WB_G,
    WbB = sys::SVB_WB_B,
    Flip = sys::SVB_FLIP,
    FrameSpeedMode = sys::SVB_FRAME_SPEED_MODE,
    Contrast = sys::SVB_CONTRAST,
    Sharpness = sys::SVB_SHARPNESS,
    Saturation = sys::SVB_SATURATION,
    AutoTargetBrightness = sys::SVB_AUTO_TARGET_BRIGHTNESS,
    BlackLevel = sys::SVB_BLACK_LEVEL,
    CoolerEnable = sys::SVB_COOLER_ENABLE,
    TargetTemperature = sys::SVB_TARGET_TEMPERATURE,
    CurrentTemperature = sys::SVB_CURRENT_TEMPERATURE,
    CoolerPower = sys::SVB_COOLER_POWER,
    BadPixelCorrectionEnable = sys::SVB_BAD_PIXEL_CORRECTION_ENABLE,
}

impl ControlType {
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    pub fn from_raw(value: i32) -> Option<Self> {
        use ControlType::*;
        match value {
            sys::SVB_GAIN => Some(Gain),
            sys::SVB_EXPOSURE => Some(Exposure),
            sys::SVB_GAMMA => Some(Gamma),
            sys::SVB_GAMMA_CONTRAST => Some(GammaContrast),
            sys::SVB_WB_R => Some(WbR),
            sys::SVB_WB_G => Some(WbG),
            sys::SVB_WB_B => Some(WbB),
            sys::SVB_FLIP => Some(Flip),
            sys::SVB_FRAME_SPEED_MODE => Some(FrameSpeedMode),
            sys::SVB_CONTRAST => Some(Contrast),
            sys::SVB_SHARPNESS => Some(Sharpness),
            sys::SVB_SATURATION => Some(Saturation),
            sys::SVB_AUTO_TARGET_BRIGHTNESS => Some(AutoTargetBrightness),
            sys::SVB_BLACK_LEVEL => Some(BlackLevel),
            sys::SVB_COOLER_ENABLE => Some(CoolerEnable),
            sys::SVB_TARGET_TEMPERATURE => Some(TargetTemperature),
            sys::SVB_CURRENT_TEMPERATURE => Some(CurrentTemperature),
            sys::SVB_COOLER_POWER => Some(CoolerPower),
            sys::SVB_BAD_PIXEL_CORRECTION_ENABLE => Some(BadPixelCorrectionEnable),
            _ => None,
        }
    }
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExposureStatus {
    Idle = sys::SVB_EXP_IDLE,
    Working = sys::SVB_EXP_WORKING,
    Success = sys::SVB_EXP_SUCCESS,
    Failed = sys::SVB_EXP_FAILED,
}

impl ExposureStatus {
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    pub fn from_raw(value: i32) -> Option<Self> {
        match value {
            sys::SVB_EXP_IDLE => Some(ExposureStatus::Idle),
            sys::SVB_EXP_WORKING => Some(ExposureStatus::Working),
            sys::SVB_EXP_SUCCESS => Some(ExposureStatus::Success),
            sys::SVB_EXP_FAILED => Some(ExposureStatus::Failed),
            _ => None,
        }
    }
}

/// Region of interest as the SDK sees it: start offsets in binned pixels,
/// output width and height after binning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoiFormat {
    pub start_x: i32,
    pub start_y: i32,
    pub width: i32,
    pub height: i32,
    pub bin: i32,
}

impl RoiFormat {
    pub fn new(start_x: i32, start_y: i32, width: i32, height: i32, bin: i32) -> Self {
        Self {
            start_x,
            start_y,
            width,
            height,
            bin,
        }
    }

    /// Whole sensor at the given binning.
    pub fn full_frame(max_width: i64, max_height: i64, bin: i32) -> Self {
        let bin = bin.max(1);
        Self::new(
            0,
            0,
            (max_width / i64::from(bin)) as i32,
            (max_height / i64::from(bin)) as i32,
            bin,
        )
    }
}

impl fmt::Display for RoiFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}+{}+{} bin{}",
            self.width, self.height, self.start_x, self.start_y, self.bin
        )
    }
}

/// Turn the `Option` of a `from_raw` lookup into a typed error naming the enum.
pub(crate) fn known<T>(parsed: Option<T>, kind: &'static str, value: i32) -> Result<T> {
    parsed.ok_or(SvbError::UnknownValue { kind, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_type_depths() {
        assert_eq!(ImageType::Raw8.bits_per_pixel(), 8);
        assert_eq!(ImageType::Y12.bits_per_pixel(), 12);
        assert_eq!(ImageType::Rgb24.bits_per_pixel(), 24);
        assert_eq!(ImageType::Raw10.bytes_per_pixel(), 2);
        assert_eq!(ImageType::Rgb32.bytes_per_pixel(), 4);
    }

    #[test]
    fn sentinels_are_not_values() {
        assert_eq!(ImageType::from_raw(sys::SVB_IMG_END), None);
        assert_eq!(CameraMode::from_raw(sys::SVB_MODE_END), None);
        assert_eq!(TriggerOutputPin::from_raw(-1), Some(TriggerOutputPin::None));
    }

    #[test]
    fn raw_values_match_header() {
        assert_eq!(ControlType::Exposure.as_raw(), 1);
        assert_eq!(ControlType::BadPixelCorrectionEnable.as_raw(), 18);
        assert_eq!(CameraMode::from_raw(1), Some(CameraMode::SoftTrigger));
        assert_eq!(GuideDirection::West.as_raw(), 3);
        assert_eq!(ImageType::Y16.to_string(), "Y16");
    }

    #[test]
    fn full_frame_roi_divides_by_bin() {
        let roi = RoiFormat::full_frame(1920, 1080, 2);
        assert_eq!(roi, RoiFormat::new(0, 0, 960, 540, 2));
        assert_eq!(roi.to_string(), "960x540+0+0 bin2");
    }

    #[test]
    fn known_reports_kind() {
        match known(ImageType::from_raw(77), "image type", 77) {
            Err(SvbError::UnknownValue { kind, value }) => {
                assert_eq!(kind, "image type");
                assert_eq!(value, 77);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
