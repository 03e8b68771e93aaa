//! Raw bindings to the SVBONY camera SDK (`SVBCameraSDK.h`).
//!
//! Struct layouts and enum values follow the vendor header. Enumerations are
//! plain `c_int` aliases with constants so that values the SDK adds in newer
//! releases never produce an invalid Rust enum.
//!
//! The function declarations are only compiled with the `native` feature,
//! which is also what makes the build script link the vendor library.

#![allow(non_camel_case_types, non_upper_case_globals, non_snake_case)]

use std::os::raw::{c_char, c_int, c_long, c_uchar, c_uint};

pub mod string_utils;

pub const SVBCAMERA_ID_MAX: c_int = 128;

pub type SVB_BOOL = c_int;
pub const SVB_FALSE: SVB_BOOL = 0;
pub const SVB_TRUE: SVB_BOOL = 1;

pub type SVB_BAYER_PATTERN = c_int;
pub const SVB_BAYER_RG: SVB_BAYER_PATTERN = 0;
pub const SVB_BAYER_BG: SVB_BAYER_PATTERN = 1;
pub const SVB_BAYER_GR: SVB_BAYER_PATTERN = 2;
pub const SVB_BAYER_GB: SVB_BAYER_PATTERN = 3;

pub type SVB_IMG_TYPE = c_int;
pub const SVB_IMG_RAW8: SVB_IMG_TYPE = 0;
pub const SVB_IMG_RAW10: SVB_IMG_TYPE = 1;
pub const SVB_IMG_RAW12: SVB_IMG_TYPE = 2;
pub const SVB_IMG_RAW14: SVB_IMG_TYPE = 3;
pub const SVB_IMG_RAW16: SVB_IMG_TYPE = 4;
pub const SVB_IMG_Y8: SVB_IMG_TYPE = 5;
pub const SVB_IMG_Y10: SVB_IMG_TYPE = 6;
pub const SVB_IMG_Y12: SVB_IMG_TYPE = 7;
pub const SVB_IMG_Y14: SVB_IMG_TYPE = 8;
pub const SVB_IMG_Y16: SVB_IMG_TYPE = 9;
pub const SVB_IMG_RGB24: SVB_IMG_TYPE = 10;
pub const SVB_IMG_RGB32: SVB_IMG_TYPE = 11;
pub const SVB_IMG_END: SVB_IMG_TYPE = -1;

pub type SVB_GUIDE_DIRECTION = c_int;
pub const SVB_GUIDE_NORTH: SVB_GUIDE_DIRECTION = 0;
pub const SVB_GUIDE_SOUTH: SVB_GUIDE_DIRECTION = 1;
pub const SVB_GUIDE_EAST: SVB_GUIDE_DIRECTION = 2;
pub const SVB_GUIDE_WEST: SVB_GUIDE_DIRECTION = 3;

pub type SVB_FLIP_STATUS = c_int;
pub const SVB_FLIP_NONE: SVB_FLIP_STATUS = 0;
pub const SVB_FLIP_HORIZ: SVB_FLIP_STATUS = 1;
pub const SVB_FLIP_VERT: SVB_FLIP_STATUS = 2;
pub const SVB_FLIP_BOTH: SVB_FLIP_STATUS = 3;

pub type SVB_CAMERA_MODE = c_int;
pub const SVB_MODE_NORMAL: SVB_CAMERA_MODE = 0;
pub const SVB_MODE_TRIG_SOFT: SVB_CAMERA_MODE = 1;
pub const SVB_MODE_TRIG_RISE_EDGE: SVB_CAMERA_MODE = 2;
pub const SVB_MODE_TRIG_FALL_EDGE: SVB_CAMERA_MODE = 3;
pub const SVB_MODE_TRIG_DOUBLE_EDGE: SVB_CAMERA_MODE = 4;
pub const SVB_MODE_TRIG_HIGH_LEVEL: SVB_CAMERA_MODE = 5;
pub const SVB_MODE_TRIG_LOW_LEVEL: SVB_CAMERA_MODE = 6;
pub const SVB_MODE_END: SVB_CAMERA_MODE = -1;

pub type SVB_TRIG_OUTPUT_PIN = c_int;
pub const SVB_TRIG_OUTPUT_PINA: SVB_TRIG_OUTPUT_PIN = 0;
pub const SVB_TRIG_OUTPUT_PINB: SVB_TRIG_OUTPUT_PIN = 1;
pub const SVB_TRIG_OUTPUT_NONE: SVB_TRIG_OUTPUT_PIN = -1;

pub type SVB_ERROR_CODE = c_int;
pub const SVB_SUCCESS: SVB_ERROR_CODE = 0;
pub const SVB_ERROR_INVALID_INDEX: SVB_ERROR_CODE = 1;
pub const SVB_ERROR_INVALID_ID: SVB_ERROR_CODE = 2;
pub const SVB_ERROR_INVALID_CONTROL_TYPE: SVB_ERROR_CODE = 3;
pub const SVB_ERROR_CAMERA_CLOSED: SVB_ERROR_CODE = 4;
pub const SVB_ERROR_CAMERA_REMOVED: SVB_ERROR_CODE = 5;
pub const SVB_ERROR_INVALID_PATH: SVB_ERROR_CODE = 6;
pub const SVB_ERROR_INVALID_FILEFORMAT: SVB_ERROR_CODE = 7;
pub const SVB_ERROR_INVALID_SIZE: SVB_ERROR_CODE = 8;
pub const SVB_ERROR_INVALID_IMGTYPE: SVB_ERROR_CODE = 9;
pub const SVB_ERROR_OUTOF_BOUNDARY: SVB_ERROR_CODE = 10;
pub const SVB_ERROR_TIMEOUT: SVB_ERROR_CODE = 11;
pub const SVB_ERROR_INVALID_SEQUENCE: SVB_ERROR_CODE = 12;
pub const SVB_ERROR_BUFFER_TOO_SMALL: SVB_ERROR_CODE = 13;
pub const SVB_ERROR_VIDEO_MODE_ACTIVE: SVB_ERROR_CODE = 14;
pub const SVB_ERROR_EXPOSURE_IN_PROGRESS: SVB_ERROR_CODE = 15;
pub const SVB_ERROR_GENERAL_ERROR: SVB_ERROR_CODE = 16;
pub const SVB_ERROR_INVALID_MODE: SVB_ERROR_CODE = 17;
pub const SVB_ERROR_INVALID_DIRECTION: SVB_ERROR_CODE = 18;
pub const SVB_ERROR_UNKNOW_SENSOR_TYPE: SVB_ERROR_CODE = 19;
pub const SVB_ERROR_END: SVB_ERROR_CODE = 20;

pub type SVB_CONTROL_TYPE = c_int;
pub const SVB_GAIN: SVB_CONTROL_TYPE = 0;
pub const SVB_EXPOSURE: SVB_CONTROL_TYPE = 1;
pub const SVB_GAMMA: SVB_CONTROL_TYPE = 2;
pub const SVB_GAMMA_CONTRAST: SVB_CONTROL_TYPE = 3;
pub const SVB_WB_R: SVB_CONTROL_TYPE = 4;
pub const SVB_WB_G: SVB_CONTROL_TYPE = 5;
pub const SVB_WB_B: SVB_CONTROL_TYPE = 6;
pub const SVB_FLIP: SVB_CONTROL_TYPE = 7;
pub const SVB_FRAME_SPEED_MODE: SVB_CONTROL_TYPE = 8;
pub const SVB_CONTRAST: SVB_CONTROL_TYPE = 9;
pub const SVB_SHARPNESS: SVB_CONTROL_TYPE = 10;
pub const SVB_SATURATION: SVB_CONTROL_TYPE = 11;
pub const SVB_AUTO_TARGET_BRIGHTNESS: SVB_CONTROL_TYPE = 12;
pub const SVB_BLACK_LEVEL: SVB_CONTROL_TYPE = 13;
pub const SVB_COOLER_ENABLE: SVB_CONTROL_TYPE = 14;
pub const SVB_TARGET_TEMPERATURE: SVB_CONTROL_TYPE = 15;
pub const SVB_CURRENT_TEMPERATURE: SVB_CONTROL_TYPE = 16;
pub const SVB_COOLER_POWER: SVB_CONTROL_TYPE = 17;
pub const SVB_BAD_PIXEL_CORRECTION_ENABLE: SVB_CONTROL_TYPE = 18;

pub type SVB_EXPOSURE_STATUS = c_int;
pub const SVB_EXP_IDLE: SVB_EXPOSURE_STATUS = 0;
pub const SVB_EXP_WORKING: SVB_EXPOSURE_STATUS = 1;
pub const SVB_EXP_SUCCESS: SVB_EXPOSURE_STATUS = 2;
pub const SVB_EXP_FAILED: SVB_EXPOSURE_STATUS = 3;

/// Size of the firmware / minimum-version strings the SDK writes into
/// caller-provided buffers.
pub const SVB_VERSION_BUFFER_LEN: usize = 64;

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SVB_CAMERA_INFO {
    pub FriendlyName: [c_char; 32],
    pub CameraSN: [c_char; 32],
    pub PortType: [c_char; 32],
    pub DeviceID: c_uint,
    pub CameraID: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SVB_CAMERA_PROPERTY {
    pub MaxHeight: c_long,
    pub MaxWidth: c_long,
    pub IsColorCam: SVB_BOOL,
    pub BayerPattern: SVB_BAYER_PATTERN,
    /// Terminated by the first `0` entry.
    pub SupportedBins: [c_int; 16],
    /// Terminated by [`SVB_IMG_END`].
    pub SupportedVideoFormat: [SVB_IMG_TYPE; 8],
    pub MaxBitDepth: c_int,
    pub IsTriggerCam: SVB_BOOL,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SVB_CAMERA_PROPERTY_EX {
    pub bSupportPulseGuide: SVB_BOOL,
    pub bSupportControlTemp: SVB_BOOL,
    pub Unused: [c_int; 64],
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SVB_CONTROL_CAPS {
    pub Name: [c_char; 64],
    pub Description: [c_char; 128],
    pub MaxValue: c_long,
    pub MinValue: c_long,
    pub DefaultValue: c_long,
    pub IsAutoSupported: SVB_BOOL,
    pub IsWritable: SVB_BOOL,
    pub ControlType: SVB_CONTROL_TYPE,
    pub Unused: [c_char; 32],
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SVB_SUPPORTED_MODE {
    /// Terminated by [`SVB_MODE_END`].
    pub SupportedCameraMode: [SVB_CAMERA_MODE; 16],
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SVB_ID {
    pub id: [c_uchar; 8],
}

pub type SVB_SN = SVB_ID;

// Zeroed values are what the SDK expects as scratch storage for its
// out-parameters.
impl Default for SVB_CAMERA_INFO {
    fn default() -> Self {
        Self {
            FriendlyName: [0; 32],
            CameraSN: [0; 32],
            PortType: [0; 32],
            DeviceID: 0,
            CameraID: 0,
        }
    }
}

impl Default for SVB_CAMERA_PROPERTY {
    fn default() -> Self {
        Self {
            MaxHeight: 0,
            MaxWidth: 0,
            IsColorCam: SVB_FALSE,
            BayerPattern: SVB_BAYER_RG,
            SupportedBins: [0; 16],
            SupportedVideoFormat: [SVB_IMG_END; 8],
            MaxBitDepth: 0,
            IsTriggerCam: SVB_FALSE,
        }
    }
}

impl Default for SVB_CAMERA_PROPERTY_EX {
    fn default() -> Self {
        Self {
            bSupportPulseGuide: SVB_FALSE,
            bSupportControlTemp: SVB_FALSE,
            Unused: [0; 64],
        }
    }
}

impl Default for SVB_CONTROL_CAPS {
    fn default() -> Self {
        Self {
            Name: [0; 64],
            Description: [0; 128],
            MaxValue: 0,
            MinValue: 0,
            DefaultValue: 0,
            IsAutoSupported: SVB_FALSE,
            IsWritable: SVB_FALSE,
            ControlType: SVB_GAIN,
            Unused: [0; 32],
        }
    }
}

impl Default for SVB_SUPPORTED_MODE {
    fn default() -> Self {
        Self {
            SupportedCameraMode: [SVB_MODE_END; 16],
        }
    }
}

impl Default for SVB_ID {
    fn default() -> Self {
        Self { id: [0; 8] }
    }
}

#[cfg(feature = "native")]
unsafe extern "C" {
    pub fn SVBGetNumOfConnectedCameras() -> c_int;

    pub fn SVBGetCameraInfo(pCameraInfo: *mut SVB_CAMERA_INFO, iCameraIndex: c_int) -> SVB_ERROR_CODE;

    pub fn SVBGetCameraProperty(iCameraID: c_int, pCameraProperty: *mut SVB_CAMERA_PROPERTY) -> SVB_ERROR_CODE;

    pub fn SVBGetCameraPropertyEx(
        iCameraID: c_int,
        pCameraPropertyEx: *mut SVB_CAMERA_PROPERTY_EX,
    ) -> SVB_ERROR_CODE;

    pub fn SVBOpenCamera(iCameraID: c_int) -> SVB_ERROR_CODE;

    pub fn SVBCloseCamera(iCameraID: c_int) -> SVB_ERROR_CODE;

    pub fn SVBGetNumOfControls(iCameraID: c_int, piNumberOfControls: *mut c_int) -> SVB_ERROR_CODE;

    pub fn SVBGetControlCaps(
        iCameraID: c_int,
        iControlIndex: c_int,
        pControlCaps: *mut SVB_CONTROL_CAPS,
    ) -> SVB_ERROR_CODE;

    pub fn SVBGetControlValue(
        iCameraID: c_int,
        ControlType: SVB_CONTROL_TYPE,
        plValue: *mut c_long,
        pbAuto: *mut SVB_BOOL,
    ) -> SVB_ERROR_CODE;

    pub fn SVBSetControlValue(
        iCameraID: c_int,
        ControlType: SVB_CONTROL_TYPE,
        lValue: c_long,
        bAuto: SVB_BOOL,
    ) -> SVB_ERROR_CODE;

    pub fn SVBGetOutputImageType(iCameraID: c_int, pImageType: *mut SVB_IMG_TYPE) -> SVB_ERROR_CODE;

    pub fn SVBSetOutputImageType(iCameraID: c_int, ImageType: SVB_IMG_TYPE) -> SVB_ERROR_CODE;

    pub fn SVBSetROIFormat(
        iCameraID: c_int,
        iStartX: c_int,
        iStartY: c_int,
        iWidth: c_int,
        iHeight: c_int,
        iBin: c_int,
    ) -> SVB_ERROR_CODE;

    pub fn SVBGetROIFormat(
        iCameraID: c_int,
        piStartX: *mut c_int,
        piStartY: *mut c_int,
        piWidth: *mut c_int,
        piHeight: *mut c_int,
        piBin: *mut c_int,
    ) -> SVB_ERROR_CODE;

    pub fn SVBGetDroppedFrames(iCameraID: c_int, piDropFrames: *mut c_int) -> SVB_ERROR_CODE;

    pub fn SVBStartVideoCapture(iCameraID: c_int) -> SVB_ERROR_CODE;

    pub fn SVBStopVideoCapture(iCameraID: c_int) -> SVB_ERROR_CODE;

    /// `pBuffer` must hold at least `lBuffSize` bytes; `iWaitms == -1` waits forever.
    pub fn SVBGetVideoData(
        iCameraID: c_int,
        pBuffer: *mut c_uchar,
        lBuffSize: c_long,
        iWaitms: c_int,
    ) -> SVB_ERROR_CODE;

    pub fn SVBWhiteBalanceOnce(iCameraID: c_int) -> SVB_ERROR_CODE;

    /// `pCameraFirmwareVersion` must hold at least [`SVB_VERSION_BUFFER_LEN`] bytes.
    pub fn SVBGetCameraFirmwareVersion(iCameraID: c_int, pCameraFirmwareVersion: *mut c_char) -> SVB_ERROR_CODE;

    pub fn SVBGetSDKVersion() -> *const c_char;

    pub fn SVBGetCameraSupportMode(iCameraID: c_int, pSupportedMode: *mut SVB_SUPPORTED_MODE) -> SVB_ERROR_CODE;

    pub fn SVBGetCameraMode(iCameraID: c_int, mode: *mut SVB_CAMERA_MODE) -> SVB_ERROR_CODE;

    pub fn SVBSetCameraMode(iCameraID: c_int, mode: SVB_CAMERA_MODE) -> SVB_ERROR_CODE;

    pub fn SVBSendSoftTrigger(iCameraID: c_int) -> SVB_ERROR_CODE;

    pub fn SVBGetSerialNumber(iCameraID: c_int, pSN: *mut SVB_SN) -> SVB_ERROR_CODE;

    pub fn SVBSetTriggerOutputIOConf(
        iCameraID: c_int,
        pin: SVB_TRIG_OUTPUT_PIN,
        bPinHigh: SVB_BOOL,
        lDelay: c_long,
        lDuration: c_long,
    ) -> SVB_ERROR_CODE;

    pub fn SVBGetTriggerOutputIOConf(
        iCameraID: c_int,
        pin: SVB_TRIG_OUTPUT_PIN,
        bPinHigh: *mut SVB_BOOL,
        lDelay: *mut c_long,
        lDuration: *mut c_long,
    ) -> SVB_ERROR_CODE;

    pub fn SVBPulseGuide(iCameraID: c_int, direction: SVB_GUIDE_DIRECTION, duration: c_int) -> SVB_ERROR_CODE;

    pub fn SVBGetSensorPixelSize(iCameraID: c_int, fPixelSize: *mut f32) -> SVB_ERROR_CODE;

    pub fn SVBCanPulseGuide(iCameraID: c_int, pCanPulseGuide: *mut SVB_BOOL) -> SVB_ERROR_CODE;

    pub fn SVBSetAutoSaveParam(iCameraID: c_int, enable: SVB_BOOL) -> SVB_ERROR_CODE;

    /// `pNeedToUpgradeMinVersion` must hold at least [`SVB_VERSION_BUFFER_LEN`] bytes.
    pub fn SVBIsCameraNeedToUpgrade(
        iCameraID: c_int,
        pIsNeedToUpgrade: *mut SVB_BOOL,
        pNeedToUpgradeMinVersion: *mut c_char,
    ) -> SVB_ERROR_CODE;

    pub fn SVBRestoreDefaultParam(iCameraID: c_int) -> SVB_ERROR_CODE;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn fixed_arrays_match_header() {
        let info = SVB_CAMERA_INFO::default();
        assert_eq!(info.FriendlyName.len(), 32);
        let props = SVB_CAMERA_PROPERTY::default();
        assert_eq!(props.SupportedBins.len(), 16);
        assert_eq!(props.SupportedVideoFormat.len(), 8);
        let modes = SVB_SUPPORTED_MODE::default();
        assert_eq!(modes.SupportedCameraMode.len(), 16);
        assert_eq!(size_of::<SVB_SN>(), 8);
    }

    #[test]
    fn defaults_are_already_terminated() {
        let props = SVB_CAMERA_PROPERTY::default();
        assert_eq!(props.SupportedBins[0], 0);
        assert_eq!(props.SupportedVideoFormat[0], SVB_IMG_END);
        assert_eq!(SVB_SUPPORTED_MODE::default().SupportedCameraMode[0], SVB_MODE_END);
    }
}
