//! Error handling for the SVBONY bindings

use std::os::raw::c_int;

use svbony_sys as sys;
use thiserror::Error;

/// Result type for SVBONY operations
pub type Result<T> = std::result::Result<T, SvbError>;

/// Error code reported for failures that happen in the binding itself,
/// before or after the SDK call (bad arguments, unknown enum values, ...).
pub const BINDING_ERROR_CODE: i32 = -1;

/// Error codes returned by the vendor SDK.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorCode {
    #[error("no camera connected or index value out of boundary")]
    InvalidIndex = sys::SVB_ERROR_INVALID_INDEX,
    #[error("invalid ID")]
    InvalidId = sys::SVB_ERROR_INVALID_ID,
    #[error("invalid control type")]
    InvalidControlType = sys::SVB_ERROR_INVALID_CONTROL_TYPE,
    #[error("camera didn't open")]
    CameraClosed = sys::SVB_ERROR_CAMERA_CLOSED,
    #[error("failed to find the camera, maybe the camera has been removed")]
    CameraRemoved = sys::SVB_ERROR_CAMERA_REMOVED,
    #[error("cannot find the path of the file")]
    InvalidPath = sys::SVB_ERROR_INVALID_PATH,
    #[error("invalid file format")]
    InvalidFileFormat = sys::SVB_ERROR_INVALID_FILEFORMAT,
    #[error("wrong video format size")]
    InvalidSize = sys::SVB_ERROR_INVALID_SIZE,
    #[error("unsupported image format")]
    InvalidImgType = sys::SVB_ERROR_INVALID_IMGTYPE,
    #[error("the start position is out of boundary")]
    OutOfBoundary = sys::SVB_ERROR_OUTOF_BOUNDARY,
    #[error("timeout")]
    Timeout = sys::SVB_ERROR_TIMEOUT,
    #[error("stop capture first")]
    InvalidSequence = sys::SVB_ERROR_INVALID_SEQUENCE,
    #[error("buffer size is not big enough")]
    BufferTooSmall = sys::SVB_ERROR_BUFFER_TOO_SMALL,
    #[error("video mode active")]
    VideoModeActive = sys::SVB_ERROR_VIDEO_MODE_ACTIVE,
    #[error("exposure in progress")]
    ExposureInProgress = sys::SVB_ERROR_EXPOSURE_IN_PROGRESS,
    #[error("general error, eg: value is out of valid range")]
    GeneralError = sys::SVB_ERROR_GENERAL_ERROR,
    #[error("the current mode is wrong")]
    InvalidMode = sys::SVB_ERROR_INVALID_MODE,
    #[error("invalid guide direction")]
    InvalidDirection = sys::SVB_ERROR_INVALID_DIRECTION,
    #[error("unknown sensor type")]
    UnknownSensorType = sys::SVB_ERROR_UNKNOW_SENSOR_TYPE,
    #[error("end of error codes")]
    End = sys::SVB_ERROR_END,
}

impl ErrorCode {
    /// Map a raw SDK return value. `SVB_SUCCESS` and unknown values give `None`.
    pub fn from_raw(code: i32) -> Option<Self> {
        use ErrorCode::*;
        match code {
            sys::SVB_ERROR_INVALID_INDEX => Some(InvalidIndex),
            sys::SVB_ERROR_INVALID_ID => Some(InvalidId),
            sys::SVB_ERROR_INVALID_CONTROL_TYPE => Some(InvalidControlType),
            sys::SVB_ERROR_CAMERA_CLOSED => Some(CameraClosed),
            sys::SVB_ERROR_CAMERA_REMOVED => Some(CameraRemoved),
            sys::SVB_ERROR_INVALID_PATH => Some(InvalidPath),
            sys::SVB_ERROR_INVALID_FILEFORMAT => Some(InvalidFileFormat),
            sys::SVB_ERROR_INVALID_SIZE => Some(InvalidSize),
            sys::SVB_ERROR_INVALID_IMGTYPE => Some(InvalidImgType),
            sys::SVB_ERROR_OUTOF_BOUNDARY => Some(OutOfBoundary),
            sys::SVB_ERROR_TIMEOUT => Some(Timeout),
            sys::SVB_ERROR_INVALID_SEQUENCE => Some(InvalidSequence),
            sys::SVB_ERROR_BUFFER_TOO_SMALL => Some(BufferTooSmall),
            sys::SVB_ERROR_VIDEO_MODE_ACTIVE => Some(VideoModeActive),
            sys::SVB_ERROR_EXPOSURE_IN_PROGRESS => Some(ExposureInProgress),
            sys::SVB_ERROR_GENERAL_ERROR => Some(GeneralError),
            sys::SVB_ERROR_INVALID_MODE => Some(InvalidMode),
            sys::SVB_ERROR_INVALID_DIRECTION => Some(InvalidDirection),
            sys::SVB_ERROR_UNKNOW_SENSOR_TYPE => Some(UnknownSensorType),
            sys::SVB_ERROR_END => Some(End),
            _ => None,
        }
    }

    pub fn as_raw(self) -> i32 {
        self as i32
    }

    /// Vendor constant name, e.g. `SVB_ERROR_TIMEOUT`.
    pub fn name(self) -> &'static str {
        use ErrorCode::*;
        match self {
            InvalidIndex => "SVB_ERROR_INVALID_INDEX",
            InvalidId => "SVB_ERROR_INVALID_ID",
            InvalidControlType => "SVB_ERROR_INVALID_CONTROL_TYPE",
            CameraClosed => "SVB_ERROR_CAMERA_CLOSED",
            CameraRemoved => "SVB_ERROR_CAMERA_REMOVED",
            InvalidPath => "SVB_ERROR_INVALID_PATH",
            InvalidFileFormat => "SVB_ERROR_INVALID_FILEFORMAT",
            InvalidSize => "SVB_ERROR_INVALID_SIZE",
            InvalidImgType => "SVB_ERROR_INVALID_IMGTYPE",
            OutOfBoundary => "SVB_ERROR_OUTOF_BOUNDARY",
            Timeout => "SVB_ERROR_TIMEOUT",
            InvalidSequence => "SVB_ERROR_INVALID_SEQUENCE",
            BufferTooSmall => "SVB_ERROR_BUFFER_TOO_SMALL",
            VideoModeActive => "SVB_ERROR_VIDEO_MODE_ACTIVE",
            ExposureInProgress => "SVB_ERROR_EXPOSURE_IN_PROGRESS",
            GeneralError => "SVB_ERROR_GENERAL_ERROR",
            InvalidMode => "SVB_ERROR_INVALID_MODE",
            InvalidDirection => "SVB_ERROR_INVALID_DIRECTION",
            UnknownSensorType => "SVB_ERROR_UNKNOW_SENSOR_TYPE",
            End => "SVB_ERROR_END",
        }
    }
}

/// Errors that can occur when working with SVBONY cameras
#[derive(Debug, Error)]
pub enum SvbError {
    /// The SDK returned a documented error code
    #[error("SVBONY SDK error: {0}")]
    Sdk(#[from] ErrorCode),
    /// The SDK returned a code this crate does not know
    #[error("SVBONY SDK returned unknown error code {0}")]
    Unknown(i32),
    /// A video buffer size that cannot be handed to the SDK
    #[error("invalid video buffer size: {0} bytes")]
    InvalidBufferSize(i64),
    /// An argument was rejected before reaching the SDK
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The SDK returned an enum value this crate does not know
    #[error("unknown {kind} value {value} returned by the SDK")]
    UnknownValue { kind: &'static str, value: i32 },
    /// Camera configuration could not be (de)serialized
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Frame data could not be turned into an image
    #[error("image conversion failed: {0}")]
    Image(String),
}

impl SvbError {
    /// Numeric code for host surfaces that report `(data, code)` pairs.
    ///
    /// SDK errors keep their vendor value; everything raised by the binding
    /// itself reports [`BINDING_ERROR_CODE`].
    pub fn code(&self) -> i32 {
        match self {
            SvbError::Sdk(code) => code.as_raw(),
            SvbError::Unknown(code) => *code,
            _ => BINDING_ERROR_CODE,
        }
    }

    /// `true` for `SVB_ERROR_TIMEOUT`, the one error callers usually retry on.
    pub fn is_timeout(&self) -> bool {
        matches!(self, SvbError::Sdk(ErrorCode::Timeout))
    }
}

/// Convert a raw SDK return code into a `Result`.
pub fn check(code: c_int) -> Result<()> {
    if code == sys::SVB_SUCCESS {
        return Ok(());
    }
    match ErrorCode::from_raw(code) {
        Some(err) => Err(SvbError::Sdk(err)),
        None => Err(SvbError::Unknown(code)),
    }
}
