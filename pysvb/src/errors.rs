//! Python exceptions for SDK error codes.
//!
//! Every exception derives from `SvbonyCameraError` and is also reachable as
//! an attribute of it (`SvbonyCameraError.Timeout`).

use std::os::raw::c_int;

use pyo3::create_exception;
use pyo3::exceptions::{PyException, PyKeyError};
use pyo3::prelude::*;
use pyo3::types::PyType;

use svbony::bindings as sys;
use svbony::{BINDING_ERROR_CODE, ErrorCode, ImageType};

create_exception!(
    pysvb.svbcamerasdk,
    SvbonyCameraError,
    PyException,
    "Base class of all SVBONY camera errors."
);

macro_rules! camera_errors {
    ($($name:ident => $doc:literal,)*) => {
        $(create_exception!(pysvb.svbcamerasdk, $name, SvbonyCameraError, $doc);)*

        fn add_error_types(m: &Bound<'_, PyModule>, base: &Bound<'_, PyType>) -> PyResult<()> {
            let py = m.py();
            $(
                let ty = py.get_type_bound::<$name>();
                base.setattr(stringify!($name), &ty)?;
                m.add(stringify!($name), ty)?;
            )*
            Ok(())
        }
    };
}

camera_errors! {
    InvalidIndex => "No camera connected or index value out of boundary.",
    InvalidId => "Invalid camera ID.",
    InvalidControlType => "Invalid control type.",
    CameraClosed => "The camera is not open.",
    CameraRemoved => "The camera was not found, it may have been removed.",
    InvalidPath => "Cannot find the path of the file.",
    InvalidFileFormat => "Invalid file format.",
    InvalidSize => "Wrong video format size.",
    InvalidImgType => "Unsupported image format.",
    OutOfBoundary => "The start position is out of boundary.",
    Timeout => "Timeout.",
    InvalidSequence => "Stop capture first.",
    BufferTooSmall => "The buffer is not big enough.",
    VideoModeActive => "Not allowed while video capture is running.",
    ExposureInProgress => "Exposure in progress.",
    GeneralError => "General error, for example a value out of its valid range.",
    InvalidMode => "The current camera mode is wrong.",
    InvalidDirection => "Invalid guide direction.",
    UnknowSensorType => "Unknown sensor type.",
    ErrorEnd => "SVB_ERROR_END was returned.",
    PyInternalError => "The Python arguments did not match the call.",
    UnknownError => "An error code this module does not know.",
}

/// Exception class for a raw SDK return code.
pub(crate) fn exception_type(py: Python<'_>, code: c_int) -> Bound<'_, PyType> {
    match ErrorCode::from_raw(code) {
        Some(ErrorCode::InvalidIndex) => py.get_type_bound::<InvalidIndex>(),
        Some(ErrorCode::InvalidId) => py.get_type_bound::<InvalidId>(),
        Some(ErrorCode::InvalidControlType) => py.get_type_bound::<InvalidControlType>(),
        Some(ErrorCode::CameraClosed) => py.get_type_bound::<CameraClosed>(),
        Some(ErrorCode::CameraRemoved) => py.get_type_bound::<CameraRemoved>(),
        Some(ErrorCode::InvalidPath) => py.get_type_bound::<InvalidPath>(),
        Some(ErrorCode::InvalidFileFormat) => py.get_type_bound::<InvalidFileFormat>(),
        Some(ErrorCode::InvalidSize) => py.get_type_bound::<InvalidSize>(),
        Some(ErrorCode::InvalidImgType) => py.get_type_bound::<InvalidImgType>(),
        Some(ErrorCode::OutOfBoundary) => py.get_type_bound::<OutOfBoundary>(),
        Some(ErrorCode::Timeout) => py.get_type_bound::<Timeout>(),
        Some(ErrorCode::InvalidSequence) => py.get_type_bound::<InvalidSequence>(),
        Some(ErrorCode::BufferTooSmall) => py.get_type_bound::<BufferTooSmall>(),
        Some(ErrorCode::VideoModeActive) => py.get_type_bound::<VideoModeActive>(),
        Some(ErrorCode::ExposureInProgress) => py.get_type_bound::<ExposureInProgress>(),
        Some(ErrorCode::GeneralError) => py.get_type_bound::<GeneralError>(),
        Some(ErrorCode::InvalidMode) => py.get_type_bound::<InvalidMode>(),
        Some(ErrorCode::InvalidDirection) => py.get_type_bound::<InvalidDirection>(),
        Some(ErrorCode::UnknownSensorType) => py.get_type_bound::<UnknowSensorType>(),
        Some(ErrorCode::End) => py.get_type_bound::<ErrorEnd>(),
        None if code == BINDING_ERROR_CODE => py.get_type_bound::<PyInternalError>(),
        None => py.get_type_bound::<UnknownError>(),
    }
}

/// Vendor name of a raw code, as `SVB_CAMERA_ERRORS` spells it.
pub(crate) fn error_code_name(code: c_int) -> String {
    match ErrorCode::from_raw(code) {
        Some(known) => known.name().to_owned(),
        None if code == sys::SVB_SUCCESS => "SVB_SUCCESS".to_owned(),
        None if code == BINDING_ERROR_CODE => "SVB_PYINTERNAL_ERROR".to_owned(),
        None => format!("SVB_ERROR_UNKNOWN({code})"),
    }
}

/// The exception raised for a failed call.
pub(crate) fn error_for(py: Python<'_>, code: c_int) -> PyErr {
    let message = match ErrorCode::from_raw(code) {
        Some(known) => format!("{}: {known}", known.name()),
        None => error_code_name(code),
    };
    PyErr::from_type_bound(exception_type(py, code), message)
}

/// `SVB_ERROR_CODE_TO_EXC(code)`: the exception class for `code`.
#[pyfunction]
#[pyo3(name = "SVB_ERROR_CODE_TO_EXC")]
fn error_code_to_exc(py: Python<'_>, code: c_int) -> Bound<'_, PyType> {
    exception_type(py, code)
}

/// Significant bits per pixel of an `SVB_IMG_TYPE`.
#[pyfunction]
pub(crate) fn image_type_to_bpp(image_type: c_int) -> PyResult<u32> {
    ImageType::from_raw(image_type)
        .map(ImageType::bits_per_pixel)
        .ok_or_else(|| PyKeyError::new_err(image_type))
}

pub(crate) fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let base = m.py().get_type_bound::<SvbonyCameraError>();
    add_error_types(m, &base)?;
    m.add("SvbonyCameraError", base)?;
    m.add_function(wrap_pyfunction!(error_code_to_exc, m)?)?;
    m.add_function(wrap_pyfunction!(image_type_to_bpp, m)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_their_exceptions() {
        Python::with_gil(|py| {
            assert!(exception_type(py, sys::SVB_ERROR_TIMEOUT).is(&py.get_type_bound::<Timeout>()));
            assert!(
                exception_type(py, sys::SVB_ERROR_EXPOSURE_IN_PROGRESS).is(&py.get_type_bound::<ExposureInProgress>())
            );
            assert!(exception_type(py, sys::SVB_ERROR_UNKNOW_SENSOR_TYPE).is(&py.get_type_bound::<UnknowSensorType>()));
            assert!(exception_type(py, -1).is(&py.get_type_bound::<PyInternalError>()));
            assert!(exception_type(py, 99).is(&py.get_type_bound::<UnknownError>()));

            let err = error_for(py, sys::SVB_ERROR_CAMERA_CLOSED);
            assert!(err.is_instance_of::<CameraClosed>(py));
            assert!(err.is_instance_of::<SvbonyCameraError>(py));
            assert!(err.value_bound(py).to_string().contains("SVB_ERROR_CAMERA_CLOSED"));
        });
    }

    #[test]
    fn names_follow_vendor_constants() {
        assert_eq!(error_code_name(sys::SVB_SUCCESS), "SVB_SUCCESS");
        assert_eq!(error_code_name(sys::SVB_ERROR_TIMEOUT), "SVB_ERROR_TIMEOUT");
        assert_eq!(error_code_name(-1), "SVB_PYINTERNAL_ERROR");
        assert_eq!(error_code_name(42), "SVB_ERROR_UNKNOWN(42)");
    }

    #[test]
    fn bits_per_pixel() {
        assert_eq!(image_type_to_bpp(sys::SVB_IMG_RAW10).unwrap(), 10);
        assert_eq!(image_type_to_bpp(sys::SVB_IMG_Y16).unwrap(), 16);
        assert_eq!(image_type_to_bpp(sys::SVB_IMG_RGB24).unwrap(), 24);
        Python::with_gil(|py| {
            assert!(image_type_to_bpp(sys::SVB_IMG_END).unwrap_err().is_instance_of::<PyKeyError>(py));
        });
    }

    #[test]
    fn subclasses_hang_off_the_base_class() {
        Python::with_gil(|py| {
            let m = PyModule::new_bound(py, "svbcamerasdk").unwrap();
            register(&m).unwrap();
            let base = m.getattr("SvbonyCameraError").unwrap();
            assert!(base.getattr("InvalidMode").unwrap().is(&py.get_type_bound::<InvalidMode>()));
            assert!(m.getattr("Timeout").unwrap().is(&py.get_type_bound::<Timeout>()));
        });
    }
}
