//! The `SVB*` functions, one per vendor entry point, over the linked SDK.

use std::os::raw::{c_int, c_long};

use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict, PyTuple};

use svbony::bindings as sys;
use svbony::driver::{Driver, NativeDriver};

use crate::marshal::{self, parse};

const SDK: NativeDriver = NativeDriver;

type DictResult<'py> = PyResult<(Bound<'py, PyDict>, c_int)>;

#[pyfunction]
#[pyo3(name = "SVBGetNumOfConnectedCameras")]
fn num_connected_cameras() -> c_int {
    SDK.num_connected_cameras()
}

#[pyfunction]
#[pyo3(name = "SVBGetCameraInfo", signature = (*args))]
fn camera_info<'py>(py: Python<'py>, args: &Bound<'py, PyTuple>) -> DictResult<'py> {
    marshal::camera_info(py, &SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBGetCameraProperty", signature = (*args))]
fn camera_property<'py>(py: Python<'py>, args: &Bound<'py, PyTuple>) -> DictResult<'py> {
    marshal::camera_property(py, &SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBGetCameraPropertyEx", signature = (*args))]
fn camera_property_ex<'py>(py: Python<'py>, args: &Bound<'py, PyTuple>) -> DictResult<'py> {
    marshal::camera_property_ex(py, &SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBOpenCamera", signature = (*args))]
fn open_camera(args: &Bound<'_, PyTuple>) -> c_int {
    marshal::open_camera(&SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBCloseCamera", signature = (*args))]
fn close_camera(args: &Bound<'_, PyTuple>) -> c_int {
    marshal::close_camera(&SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBGetNumOfControls", signature = (*args))]
fn num_controls(args: &Bound<'_, PyTuple>) -> (c_int, c_int) {
    marshal::num_controls(&SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBGetControlCaps", signature = (*args))]
fn control_caps<'py>(py: Python<'py>, args: &Bound<'py, PyTuple>) -> DictResult<'py> {
    marshal::control_caps(py, &SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBGetControlValue", signature = (*args))]
fn control_value(args: &Bound<'_, PyTuple>) -> (c_long, sys::SVB_BOOL, c_int) {
    marshal::control_value(&SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBSetControlValue", signature = (*args))]
fn set_control_value(args: &Bound<'_, PyTuple>) -> c_int {
    marshal::set_control_value(&SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBGetOutputImageType", signature = (*args))]
fn output_image_type(args: &Bound<'_, PyTuple>) -> (sys::SVB_IMG_TYPE, c_int) {
    marshal::output_image_type(&SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBSetOutputImageType", signature = (*args))]
fn set_output_image_type(args: &Bound<'_, PyTuple>) -> c_int {
    marshal::set_output_image_type(&SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBSetROIFormat", signature = (*args))]
fn set_roi_format(args: &Bound<'_, PyTuple>) -> c_int {
    marshal::set_roi_format(&SDK, parse(args))
}

/// `(start_x, start_y, width, height, bin, err)`
#[pyfunction]
#[pyo3(name = "SVBGetROIFormat", signature = (*args))]
fn roi_format(args: &Bound<'_, PyTuple>) -> (c_int, c_int, c_int, c_int, c_int, c_int) {
    let ((x, y, w, h, bin), err) = marshal::roi_format(&SDK, parse(args));
    (x, y, w, h, bin, err)
}

#[pyfunction]
#[pyo3(name = "SVBGetDroppedFrames", signature = (*args))]
fn dropped_frames(args: &Bound<'_, PyTuple>) -> (c_int, c_int) {
    marshal::dropped_frames(&SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBStartVideoCapture", signature = (*args))]
fn start_video_capture(args: &Bound<'_, PyTuple>) -> c_int {
    marshal::start_video_capture(&SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBStopVideoCapture", signature = (*args))]
fn stop_video_capture(args: &Bound<'_, PyTuple>) -> c_int {
    marshal::stop_video_capture(&SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBGetVideoData", signature = (*args))]
fn video_data<'py>(py: Python<'py>, args: &Bound<'py, PyTuple>) -> (Bound<'py, PyBytes>, c_int) {
    marshal::video_data(py, &SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBWhiteBalanceOnce", signature = (*args))]
fn white_balance_once(args: &Bound<'_, PyTuple>) -> c_int {
    marshal::white_balance_once(&SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBGetSDKVersion")]
fn sdk_version() -> String {
    SDK.sdk_version()
}

#[pyfunction]
#[pyo3(name = "SVBGetCameraFirmwareVersion", signature = (*args))]
fn firmware_version(args: &Bound<'_, PyTuple>) -> (String, c_int) {
    marshal::firmware_version(&SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBGetCameraSupportMode", signature = (*args))]
fn camera_support_mode<'py>(py: Python<'py>, args: &Bound<'py, PyTuple>) -> DictResult<'py> {
    marshal::camera_support_mode(py, &SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBGetCameraMode", signature = (*args))]
fn camera_mode(args: &Bound<'_, PyTuple>) -> (sys::SVB_CAMERA_MODE, c_int) {
    marshal::camera_mode(&SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBSetCameraMode", signature = (*args))]
fn set_camera_mode(args: &Bound<'_, PyTuple>) -> c_int {
    marshal::set_camera_mode(&SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBSendSoftTrigger", signature = (*args))]
fn send_soft_trigger(args: &Bound<'_, PyTuple>) -> c_int {
    marshal::send_soft_trigger(&SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBGetSerialNumber", signature = (*args))]
fn serial_number<'py>(py: Python<'py>, args: &Bound<'py, PyTuple>) -> DictResult<'py> {
    marshal::serial_number(py, &SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBSetTriggerOutputIOConf", signature = (*args))]
fn set_trigger_output_io_conf(args: &Bound<'_, PyTuple>) -> c_int {
    marshal::set_trigger_output_io_conf(&SDK, parse(args))
}

/// `(pin_high, delay, duration, err)`
#[pyfunction]
#[pyo3(name = "SVBGetTriggerOutputIOConf", signature = (*args))]
fn trigger_output_io_conf(args: &Bound<'_, PyTuple>) -> (sys::SVB_BOOL, c_long, c_long, c_int) {
    let ((pin_high, delay, duration), err) = marshal::trigger_output_io_conf(&SDK, parse(args));
    (pin_high, delay, duration, err)
}

#[pyfunction]
#[pyo3(name = "SVBPulseGuide", signature = (*args))]
fn pulse_guide(args: &Bound<'_, PyTuple>) -> c_int {
    marshal::pulse_guide(&SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBGetSensorPixelSize", signature = (*args))]
fn sensor_pixel_size(args: &Bound<'_, PyTuple>) -> (f32, c_int) {
    marshal::sensor_pixel_size(&SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBCanPulseGuide", signature = (*args))]
fn can_pulse_guide(args: &Bound<'_, PyTuple>) -> (sys::SVB_BOOL, c_int) {
    marshal::can_pulse_guide(&SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBSetAutoSaveParam", signature = (*args))]
fn set_auto_save_param(args: &Bound<'_, PyTuple>) -> c_int {
    marshal::set_auto_save_param(&SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBIsCameraNeedToUpgrade", signature = (*args))]
fn is_camera_need_to_upgrade(args: &Bound<'_, PyTuple>) -> (sys::SVB_BOOL, String, c_int) {
    marshal::is_camera_need_to_upgrade(&SDK, parse(args))
}

#[pyfunction]
#[pyo3(name = "SVBRestoreDefaultParam", signature = (*args))]
fn restore_default_param(args: &Bound<'_, PyTuple>) -> c_int {
    marshal::restore_default_param(&SDK, parse(args))
}

pub(crate) fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(num_connected_cameras, m)?)?;
    m.add_function(wrap_pyfunction!(camera_info, m)?)?;
    m.add_function(wrap_pyfunction!(camera_property, m)?)?;
    m.add_function(wrap_pyfunction!(camera_property_ex, m)?)?;
    m.add_function(wrap_pyfunction!(open_camera, m)?)?;
    m.add_function(wrap_pyfunction!(close_camera, m)?)?;
    m.add_function(wrap_pyfunction!(num_controls, m)?)?;
    m.add_function(wrap_pyfunction!(control_caps, m)?)?;
    m.add_function(wrap_pyfunction!(control_value, m)?)?;
    m.add_function(wrap_pyfunction!(set_control_value, m)?)?;
    m.add_function(wrap_pyfunction!(output_image_type, m)?)?;
    m.add_function(wrap_pyfunction!(set_output_image_type, m)?)?;
    m.add_function(wrap_pyfunction!(set_roi_format, m)?)?;
    m.add_function(wrap_pyfunction!(roi_format, m)?)?;
    m.add_function(wrap_pyfunction!(dropped_frames, m)?)?;
    m.add_function(wrap_pyfunction!(start_video_capture, m)?)?;
    m.add_function(wrap_pyfunction!(stop_video_capture, m)?)?;
    m.add_function(wrap_pyfunction!(video_data, m)?)?;
    m.add_function(wrap_pyfunction!(white_balance_once, m)?)?;
    m.add_function(wrap_pyfunction!(sdk_version, m)?)?;
    m.add_function(wrap_pyfunction!(firmware_version, m)?)?;
    m.add_function(wrap_pyfunction!(camera_support_mode, m)?)?;
    m.add_function(wrap_pyfunction!(camera_mode, m)?)?;
    m.add_function(wrap_pyfunction!(set_camera_mode, m)?)?;
    m.add_function(wrap_pyfunction!(send_soft_trigger, m)?)?;
    m.add_function(wrap_pyfunction!(serial_number, m)?)?;
    m.add_function(wrap_pyfunction!(set_trigger_output_io_conf, m)?)?;
    m.add_function(wrap_pyfunction!(trigger_output_io_conf, m)?)?;
    m.add_function(wrap_pyfunction!(pulse_guide, m)?)?;
    m.add_function(wrap_pyfunction!(sensor_pixel_size, m)?)?;
    m.add_function(wrap_pyfunction!(can_pulse_guide, m)?)?;
    m.add_function(wrap_pyfunction!(set_auto_save_param, m)?)?;
    m.add_function(wrap_pyfunction!(is_camera_need_to_upgrade, m)?)?;
    m.add_function(wrap_pyfunction!(restore_default_param, m)?)?;
    Ok(())
}
