//! SDK calls turned into the Python return shapes.
//!
//! Each function takes the driver and the already parsed positional
//! arguments. `None` stands for arguments that did not parse: the call is
//! skipped, the error code is [`ARG_ERROR`] and the outputs keep their
//! defaults, exactly as for a failed SDK call.

use std::os::raw::{c_char, c_int, c_long};

use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict, PyList, PyTuple};

use svbony::bindings as sys;
use svbony::driver::Driver;
use svbony::misc::{fixed_bytes_to_string, fixed_cstr_to_string, take_until_sentinel};

/// Error code reported when the Python arguments do not match.
pub(crate) const ARG_ERROR: c_int = -1;

pub(crate) fn parse<'py, T: FromPyObject<'py>>(args: &Bound<'py, PyTuple>) -> Option<T> {
    args.extract().ok()
}

fn call<A>(args: Option<A>, f: impl FnOnce(A) -> c_int) -> c_int {
    args.map_or(ARG_ERROR, f)
}

/// Fill `out` through `f`; on any failure `out` is reset so that only
/// defaults reach Python.
fn fill<A, T: Default>(args: Option<A>, out: &mut T, f: impl FnOnce(A, &mut T) -> c_int) -> c_int {
    let err = match args {
        Some(a) => f(a, out),
        None => ARG_ERROR,
    };
    if err != sys::SVB_SUCCESS {
        *out = T::default();
    }
    err
}

fn camera_info_dict<'py>(py: Python<'py>, info: &sys::SVB_CAMERA_INFO) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("FriendlyName", fixed_cstr_to_string(&info.FriendlyName))?;
    dict.set_item("CameraSN", fixed_cstr_to_string(&info.CameraSN))?;
    dict.set_item("PortType", fixed_cstr_to_string(&info.PortType))?;
    dict.set_item("DeviceID", info.DeviceID)?;
    dict.set_item("CameraID", info.CameraID)?;
    Ok(dict)
}

fn property_dict<'py>(py: Python<'py>, props: &sys::SVB_CAMERA_PROPERTY) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("MaxHeight", props.MaxHeight)?;
    dict.set_item("MaxWidth", props.MaxWidth)?;
    dict.set_item("IsColorCam", props.IsColorCam)?;
    dict.set_item("BayerPattern", props.BayerPattern)?;
    dict.set_item(
        "SupportedBins",
        PyList::new_bound(py, take_until_sentinel(&props.SupportedBins, 0)),
    )?;
    dict.set_item(
        "SupportedVideoFormat",
        PyList::new_bound(py, take_until_sentinel(&props.SupportedVideoFormat, sys::SVB_IMG_END)),
    )?;
    dict.set_item("MaxBitDepth", props.MaxBitDepth)?;
    dict.set_item("IsTriggerCam", props.IsTriggerCam)?;
    Ok(dict)
}

fn control_caps_dict<'py>(py: Python<'py>, caps: &sys::SVB_CONTROL_CAPS) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("Name", fixed_cstr_to_string(&caps.Name))?;
    dict.set_item("Description", fixed_cstr_to_string(&caps.Description))?;
    dict.set_item("MaxValue", caps.MaxValue)?;
    dict.set_item("MinValue", caps.MinValue)?;
    dict.set_item("DefaultValue", caps.DefaultValue)?;
    dict.set_item("IsAutoSupported", caps.IsAutoSupported)?;
    dict.set_item("IsWritable", caps.IsWritable)?;
    dict.set_item("ControlType", caps.ControlType)?;
    Ok(dict)
}

pub(crate) type Dict<'py> = PyResult<(Bound<'py, PyDict>, c_int)>;

pub(crate) fn camera_info<'py>(py: Python<'py>, sdk: &dyn Driver, args: Option<(c_int,)>) -> Dict<'py> {
    let mut info = sys::SVB_CAMERA_INFO::default();
    let err = fill(args, &mut info, |(index,), out| sdk.camera_info(index, out));
    Ok((camera_info_dict(py, &info)?, err))
}

pub(crate) fn camera_property<'py>(py: Python<'py>, sdk: &dyn Driver, args: Option<(c_int,)>) -> Dict<'py> {
    let mut props = sys::SVB_CAMERA_PROPERTY::default();
    let err = fill(args, &mut props, |(id,), out| sdk.camera_property(id, out));
    Ok((property_dict(py, &props)?, err))
}

pub(crate) fn camera_property_ex<'py>(py: Python<'py>, sdk: &dyn Driver, args: Option<(c_int,)>) -> Dict<'py> {
    let mut props = sys::SVB_CAMERA_PROPERTY_EX::default();
    let err = fill(args, &mut props, |(id,), out| sdk.camera_property_ex(id, out));
    let dict = PyDict::new_bound(py);
    dict.set_item("bSupportPulseGuide", props.bSupportPulseGuide)?;
    dict.set_item("bSupportControlTemp", props.bSupportControlTemp)?;
    Ok((dict, err))
}

pub(crate) fn open_camera(sdk: &dyn Driver, args: Option<(c_int,)>) -> c_int {
    call(args, |(id,)| sdk.open_camera(id))
}

pub(crate) fn close_camera(sdk: &dyn Driver, args: Option<(c_int,)>) -> c_int {
    call(args, |(id,)| sdk.close_camera(id))
}

/// `(count, err)`
pub(crate) fn num_controls(sdk: &dyn Driver, args: Option<(c_int,)>) -> (c_int, c_int) {
    let mut count = ARG_ERROR;
    let err = call(args, |(id,)| sdk.num_controls(id, &mut count));
    (count, err)
}

pub(crate) fn control_caps<'py>(py: Python<'py>, sdk: &dyn Driver, args: Option<(c_int, c_int)>) -> Dict<'py> {
    let mut caps = sys::SVB_CONTROL_CAPS::default();
    let err = fill(args, &mut caps, |(id, index), out| sdk.control_caps(id, index, out));
    Ok((control_caps_dict(py, &caps)?, err))
}

/// `(value, auto, err)`
pub(crate) fn control_value(sdk: &dyn Driver, args: Option<(c_int, c_int)>) -> (c_long, sys::SVB_BOOL, c_int) {
    let mut value: c_long = -1;
    let mut auto: sys::SVB_BOOL = -1;
    let err = call(args, |(id, control)| sdk.control_value(id, control, &mut value, &mut auto));
    (value, auto, err)
}

pub(crate) fn set_control_value(sdk: &dyn Driver, args: Option<(c_int, c_int, c_long, sys::SVB_BOOL)>) -> c_int {
    call(args, |(id, control, value, auto)| sdk.set_control_value(id, control, value, auto))
}

/// `(image_type, err)`
pub(crate) fn output_image_type(sdk: &dyn Driver, args: Option<(c_int,)>) -> (sys::SVB_IMG_TYPE, c_int) {
    let mut image_type: sys::SVB_IMG_TYPE = -1;
    let err = call(args, |(id,)| sdk.output_image_type(id, &mut image_type));
    (image_type, err)
}

pub(crate) fn set_output_image_type(sdk: &dyn Driver, args: Option<(c_int, sys::SVB_IMG_TYPE)>) -> c_int {
    call(args, |(id, image_type)| sdk.set_output_image_type(id, image_type))
}

pub(crate) type Roi = (c_int, c_int, c_int, c_int, c_int);

pub(crate) fn set_roi_format(sdk: &dyn Driver, args: Option<(c_int, c_int, c_int, c_int, c_int, c_int)>) -> c_int {
    call(args, |(id, start_x, start_y, width, height, bin)| {
        sdk.set_roi_format(id, start_x, start_y, width, height, bin)
    })
}

/// `((start_x, start_y, width, height, bin), err)`
pub(crate) fn roi_format(sdk: &dyn Driver, args: Option<(c_int,)>) -> (Roi, c_int) {
    let (mut x, mut y, mut w, mut h, mut bin) = (-1, -1, -1, -1, -1);
    let err = call(args, |(id,)| sdk.roi_format(id, &mut x, &mut y, &mut w, &mut h, &mut bin));
    ((x, y, w, h, bin), err)
}

/// `(dropped, err)`
pub(crate) fn dropped_frames(sdk: &dyn Driver, args: Option<(c_int,)>) -> (c_int, c_int) {
    let mut dropped = ARG_ERROR;
    let err = call(args, |(id,)| sdk.dropped_frames(id, &mut dropped));
    (dropped, err)
}

pub(crate) fn start_video_capture(sdk: &dyn Driver, args: Option<(c_int,)>) -> c_int {
    call(args, |(id,)| sdk.start_video_capture(id))
}

pub(crate) fn stop_video_capture(sdk: &dyn Driver, args: Option<(c_int,)>) -> c_int {
    call(args, |(id,)| sdk.stop_video_capture(id))
}

/// `(frame: bytes, err)`. A buffer size below 1 returns `(b"", -1)` without
/// touching the camera.
pub(crate) fn video_data<'py>(
    py: Python<'py>,
    sdk: &dyn Driver,
    args: Option<(c_int, c_int, c_int)>,
) -> (Bound<'py, PyBytes>, c_int) {
    let Some((id, size, wait_ms)) = args else {
        return (PyBytes::new_bound(py, b""), ARG_ERROR);
    };
    let len = match usize::try_from(size) {
        Ok(len) if len > 0 => len,
        _ => return (PyBytes::new_bound(py, b""), ARG_ERROR),
    };

    let mut buffer = vec![0u8; len];
    // Release the GIL while the SDK blocks.
    let err = py.allow_threads(|| sdk.video_data(id, &mut buffer, wait_ms));
    (PyBytes::new_bound(py, &buffer), err)
}

pub(crate) fn white_balance_once(sdk: &dyn Driver, args: Option<(c_int,)>) -> c_int {
    call(args, |(id,)| sdk.white_balance_once(id))
}

fn version_buffer() -> [c_char; sys::SVB_VERSION_BUFFER_LEN] {
    [0; sys::SVB_VERSION_BUFFER_LEN]
}

/// `(version: str, err)`. `buff_size` must be positive; the SDK always
/// writes into a buffer of its own fixed size.
pub(crate) fn firmware_version(sdk: &dyn Driver, args: Option<(c_int, c_int)>) -> (String, c_int) {
    let mut version = version_buffer();
    let err = match args {
        Some((id, buff_size)) if buff_size > 0 => sdk.firmware_version(id, &mut version),
        _ => ARG_ERROR,
    };
    if err != sys::SVB_SUCCESS {
        return (String::new(), err);
    }
    (fixed_cstr_to_string(&version), err)
}

/// `({"SupportedCameraMode": [int]}, err)`
pub(crate) fn camera_support_mode<'py>(py: Python<'py>, sdk: &dyn Driver, args: Option<(c_int,)>) -> Dict<'py> {
    let mut modes = sys::SVB_SUPPORTED_MODE::default();
    let err = fill(args, &mut modes, |(id,), out| sdk.supported_modes(id, out));
    let dict = PyDict::new_bound(py);
    dict.set_item(
        "SupportedCameraMode",
        PyList::new_bound(py, take_until_sentinel(&modes.SupportedCameraMode, sys::SVB_MODE_END)),
    )?;
    Ok((dict, err))
}

/// `(mode, err)`
pub(crate) fn camera_mode(sdk: &dyn Driver, args: Option<(c_int,)>) -> (sys::SVB_CAMERA_MODE, c_int) {
    let mut mode: sys::SVB_CAMERA_MODE = -1;
    let err = call(args, |(id,)| sdk.camera_mode(id, &mut mode));
    (mode, err)
}

pub(crate) fn set_camera_mode(sdk: &dyn Driver, args: Option<(c_int, sys::SVB_CAMERA_MODE)>) -> c_int {
    call(args, |(id, mode)| sdk.set_camera_mode(id, mode))
}

pub(crate) fn send_soft_trigger(sdk: &dyn Driver, args: Option<(c_int,)>) -> c_int {
    call(args, |(id,)| sdk.send_soft_trigger(id))
}

/// `({"id": str}, err)`
pub(crate) fn serial_number<'py>(py: Python<'py>, sdk: &dyn Driver, args: Option<(c_int,)>) -> Dict<'py> {
    let mut serial = sys::SVB_SN::default();
    let err = fill(args, &mut serial, |(id,), out| sdk.serial_number(id, out));
    let dict = PyDict::new_bound(py);
    dict.set_item("id", fixed_bytes_to_string(&serial.id))?;
    Ok((dict, err))
}

pub(crate) type TriggerConf = (sys::SVB_BOOL, c_long, c_long);

pub(crate) fn set_trigger_output_io_conf(
    sdk: &dyn Driver,
    args: Option<(c_int, sys::SVB_TRIG_OUTPUT_PIN, sys::SVB_BOOL, c_long, c_long)>,
) -> c_int {
    call(args, |(id, pin, pin_high, delay, duration)| {
        sdk.set_trigger_output(id, pin, pin_high, delay, duration)
    })
}

/// `((pin_high, delay, duration), err)`
pub(crate) fn trigger_output_io_conf(
    sdk: &dyn Driver,
    args: Option<(c_int, sys::SVB_TRIG_OUTPUT_PIN)>,
) -> (TriggerConf, c_int) {
    let mut pin_high: sys::SVB_BOOL = -1;
    let (mut delay, mut duration): (c_long, c_long) = (0, 0);
    let err = call(args, |(id, pin)| {
        sdk.trigger_output(id, pin, &mut pin_high, &mut delay, &mut duration)
    });
    ((pin_high, delay, duration), err)
}

pub(crate) fn pulse_guide(sdk: &dyn Driver, args: Option<(c_int, sys::SVB_GUIDE_DIRECTION, c_int)>) -> c_int {
    call(args, |(id, direction, duration)| sdk.pulse_guide(id, direction, duration))
}

/// `(pixel_size_um, err)`
pub(crate) fn sensor_pixel_size(sdk: &dyn Driver, args: Option<(c_int,)>) -> (f32, c_int) {
    let mut size = 0.0f32;
    let err = call(args, |(id,)| sdk.sensor_pixel_size(id, &mut size));
    (size, err)
}

/// `(can_guide, err)`
pub(crate) fn can_pulse_guide(sdk: &dyn Driver, args: Option<(c_int,)>) -> (sys::SVB_BOOL, c_int) {
    let mut can_guide = sys::SVB_FALSE;
    let err = call(args, |(id,)| sdk.can_pulse_guide(id, &mut can_guide));
    (can_guide, err)
}

pub(crate) fn set_auto_save_param(sdk: &dyn Driver, args: Option<(c_int, sys::SVB_BOOL)>) -> c_int {
    call(args, |(id, enable)| sdk.set_auto_save_param(id, enable))
}

/// `(needs_upgrade, min_version: str, err)`
pub(crate) fn is_camera_need_to_upgrade(sdk: &dyn Driver, args: Option<(c_int, c_int)>) -> (sys::SVB_BOOL, String, c_int) {
    let mut needed = sys::SVB_FALSE;
    let mut min_version = version_buffer();
    let err = match args {
        Some((id, buff_size)) if buff_size > 0 => sdk.needs_upgrade(id, &mut needed, &mut min_version),
        _ => ARG_ERROR,
    };
    if err != sys::SVB_SUCCESS {
        return (sys::SVB_FALSE, String::new(), err);
    }
    (needed, fixed_cstr_to_string(&min_version), err)
}

pub(crate) fn restore_default_param(sdk: &dyn Driver, args: Option<(c_int,)>) -> c_int {
    call(args, |(id,)| sdk.restore_default_param(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use svbony::mock::{MockCamera, MockDriver};

    fn item<'py, T: FromPyObject<'py>>(dict: &Bound<'py, PyDict>, key: &str) -> T {
        dict.get_item(key).unwrap().expect(key).extract().unwrap()
    }

    fn opened(driver: MockDriver) -> MockDriver {
        assert_eq!(driver.open_camera(0), sys::SVB_SUCCESS);
        driver
    }

    #[test]
    fn camera_info_dict_has_vendor_keys() {
        Python::with_gil(|py| {
            let driver = MockDriver::new();
            let (info, err) = camera_info(py, &driver, Some((0,))).unwrap();
            assert_eq!(err, sys::SVB_SUCCESS);
            assert_eq!(item::<String>(&info, "FriendlyName"), "SVBONY SV305");
            assert_eq!(item::<String>(&info, "PortType"), "USB2.0");
            assert_eq!(item::<i32>(&info, "CameraID"), 0);
        });
    }

    #[test]
    fn mismatched_arguments_give_defaults() {
        Python::with_gil(|py| {
            let driver = MockDriver::new();
            let args = PyTuple::new_bound(py, ["zero"]);
            let (info, err) = camera_info(py, &driver, parse(&args)).unwrap();
            assert_eq!(err, ARG_ERROR);
            assert_eq!(item::<String>(&info, "FriendlyName"), "");
            assert_eq!(item::<u32>(&info, "DeviceID"), 0);

            let none = PyTuple::empty_bound(py);
            assert_eq!(open_camera(&driver, parse(&none)), ARG_ERROR);
            assert!(!driver.is_open(0));
            assert_eq!(num_controls(&driver, parse(&none)), (ARG_ERROR, ARG_ERROR));
            assert_eq!(roi_format(&driver, parse(&none)), ((-1, -1, -1, -1, -1), ARG_ERROR));
        });
    }

    #[test]
    fn sdk_failure_resets_property_to_defaults() {
        Python::with_gil(|py| {
            let driver = MockDriver::new();
            driver.fail("SVBGetCameraProperty", sys::SVB_ERROR_CAMERA_REMOVED);
            let (props, err) = camera_property(py, &driver, Some((0,))).unwrap();
            assert_eq!(err, sys::SVB_ERROR_CAMERA_REMOVED);
            assert_eq!(item::<i64>(&props, "MaxWidth"), 0);
            assert!(item::<Vec<i32>>(&props, "SupportedVideoFormat").is_empty());
            assert!(item::<Vec<i32>>(&props, "SupportedBins").is_empty());
        });
    }

    #[test]
    fn property_lists_stop_at_sentinels() {
        Python::with_gil(|py| {
            let driver = MockDriver::new();
            let (props, err) = camera_property(py, &driver, Some((0,))).unwrap();
            assert_eq!(err, sys::SVB_SUCCESS);
            assert_eq!(item::<Vec<i32>>(&props, "SupportedBins"), vec![1, 2]);
            assert_eq!(
                item::<Vec<i32>>(&props, "SupportedVideoFormat"),
                vec![
                    sys::SVB_IMG_RAW8,
                    sys::SVB_IMG_RAW12,
                    sys::SVB_IMG_RGB24,
                    sys::SVB_IMG_RGB32,
                    sys::SVB_IMG_Y8
                ]
            );
            assert_eq!(item::<i32>(&props, "IsColorCam"), sys::SVB_TRUE);
        });
    }

    #[test]
    fn full_length_lists_without_sentinel() {
        Python::with_gil(|py| {
            let mut spec = MockCamera::mono_trigger(0);
            spec.bins = (1..=16).collect();
            spec.modes = std::iter::repeat(svbony::CameraMode::SoftTrigger).take(16).collect();
            let driver = opened(MockDriver::empty().with_camera(spec));

            let (props, _) = camera_property(py, &driver, Some((0,))).unwrap();
            assert_eq!(item::<Vec<i32>>(&props, "SupportedBins"), (1..=16).collect::<Vec<_>>());

            let (modes, err) = camera_support_mode(py, &driver, Some((0,))).unwrap();
            assert_eq!(err, sys::SVB_SUCCESS);
            assert_eq!(item::<Vec<i32>>(&modes, "SupportedCameraMode"), vec![sys::SVB_MODE_TRIG_SOFT; 16]);
        });
    }

    #[test]
    fn video_data_rejects_non_positive_sizes() {
        Python::with_gil(|py| {
            let driver = opened(MockDriver::new().with_call_log());
            assert_eq!(start_video_capture(&driver, Some((0,))), sys::SVB_SUCCESS);
            for size in [0, -1, c_int::MIN] {
                let (data, err) = video_data(py, &driver, Some((0, size, 100)));
                assert_eq!(err, ARG_ERROR);
                assert!(data.as_bytes().is_empty());
            }
            let (data, err) = video_data(py, &driver, None);
            assert_eq!((data.as_bytes().len(), err), (0, ARG_ERROR));
            assert_eq!(driver.call_count("SVBGetVideoData"), 0);
        });
    }

    #[test]
    fn video_data_returns_frame_bytes() {
        Python::with_gil(|py| {
            let driver = opened(MockDriver::new());
            assert_eq!(set_roi_format(&driver, Some((0, 0, 0, 16, 8, 1))), sys::SVB_SUCCESS);
            assert_eq!(start_video_capture(&driver, Some((0,))), sys::SVB_SUCCESS);
            let (data, err) = video_data(py, &driver, Some((0, 16 * 8, 100)));
            assert_eq!(err, sys::SVB_SUCCESS);
            assert_eq!(data.as_bytes().len(), 16 * 8);
            assert_eq!(data.as_bytes()[3], MockDriver::expected_pixel(0, 3));

            let (_, err) = video_data(py, &driver, Some((0, 4, 100)));
            assert_eq!(err, sys::SVB_ERROR_BUFFER_TOO_SMALL);
        });
    }

    #[test]
    fn version_strings_need_positive_buffer() {
        let driver = opened(MockDriver::new());
        assert_eq!(firmware_version(&driver, Some((0, 64))), ("1.0.2".to_owned(), sys::SVB_SUCCESS));
        assert_eq!(firmware_version(&driver, Some((0, 0))), (String::new(), ARG_ERROR));
        assert_eq!(
            is_camera_need_to_upgrade(&driver, Some((0, -5))),
            (sys::SVB_FALSE, String::new(), ARG_ERROR)
        );
        assert_eq!(
            is_camera_need_to_upgrade(&driver, Some((0, 64))),
            (sys::SVB_FALSE, String::new(), sys::SVB_SUCCESS)
        );
    }

    #[test]
    fn control_round_trip() {
        Python::with_gil(|py| {
            let driver = opened(MockDriver::new());
            let (caps, err) = control_caps(py, &driver, Some((0, 0))).unwrap();
            assert_eq!(err, sys::SVB_SUCCESS);
            assert_eq!(item::<String>(&caps, "Name"), "Gain");
            let control = item::<c_int>(&caps, "ControlType");

            assert_eq!(set_control_value(&driver, Some((0, control, 42, sys::SVB_TRUE))), sys::SVB_SUCCESS);
            assert_eq!(control_value(&driver, Some((0, control))), (42, sys::SVB_TRUE, sys::SVB_SUCCESS));

            let (caps, err) = control_caps(py, &driver, Some((0, 99))).unwrap();
            assert_eq!(err, sys::SVB_ERROR_INVALID_INDEX);
            assert_eq!(item::<String>(&caps, "Name"), "");
        });
    }

    #[test]
    fn serial_and_trigger_output() {
        Python::with_gil(|py| {
            let driver = opened(MockDriver::empty().with_camera(MockCamera::mono_trigger(0)));
            let (serial, err) = serial_number(py, &driver, Some((0,))).unwrap();
            assert_eq!(err, sys::SVB_SUCCESS);
            assert_eq!(item::<String>(&serial, "id"), "SV305M00");

            let pin = sys::SVB_TRIG_OUTPUT_PINA;
            assert_eq!(
                set_trigger_output_io_conf(&driver, Some((0, pin, sys::SVB_TRUE, 10, 200))),
                sys::SVB_SUCCESS
            );
            assert_eq!(
                trigger_output_io_conf(&driver, Some((0, pin))),
                ((sys::SVB_TRUE, 10, 200), sys::SVB_SUCCESS)
            );
            assert_eq!(trigger_output_io_conf(&driver, None), ((-1, 0, 0), ARG_ERROR));
        });
    }
}
