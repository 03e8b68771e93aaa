//! `PySVBCameraSDK`, the object-style layer over the module functions.
//!
//! Each method makes one SDK call and records its return code in
//! `last_error_code`. With `raise_exc` (the default) a failing code raises the
//! matching `SvbonyCameraError` subclass instead of returning.

use std::os::raw::{c_int, c_long};
use std::sync::Arc;

use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict};

use svbony::bindings as sys;
use svbony::driver::Driver;

use crate::errors;
use crate::marshal;

/// ROI settings as used by `set_roi_format` / `get_roi_format`.
#[pyclass(name = "SVB_ROI_FORMAT", module = "pysvb.svbcamerasdk", get_all, set_all)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoiFormat {
    pub start_x: c_int,
    pub start_y: c_int,
    pub width: c_int,
    pub height: c_int,
    pub bin: c_int,
}

#[pymethods]
impl RoiFormat {
    #[new]
    #[pyo3(signature = (start_x=-1, start_y=-1, width=-1, height=-1, bin=-1))]
    fn new(start_x: c_int, start_y: c_int, width: c_int, height: c_int, bin: c_int) -> Self {
        Self {
            start_x,
            start_y,
            width,
            height,
            bin,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SVB_ROI_FORMAT(start_x={}, start_y={}, width={}, height={}, bin={})",
            self.start_x, self.start_y, self.width, self.height, self.bin
        )
    }

    fn __eq__(&self, other: &Self) -> bool {
        self == other
    }
}

#[pyclass(name = "SVB_TRIGGER_OUTPUT_IO_CONF", module = "pysvb.svbcamerasdk", get_all, set_all)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerOutputConf {
    pub pin_high: bool,
    pub delay: c_long,
    pub duration: c_long,
}

#[pymethods]
impl TriggerOutputConf {
    #[new]
    #[pyo3(signature = (pin_high=false, delay=0, duration=0))]
    fn new(pin_high: bool, delay: c_long, duration: c_long) -> Self {
        Self {
            pin_high,
            delay,
            duration,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SVB_TRIGGER_OUTPUT_IO_CONF(pin_high={}, delay={}, duration={})",
            if self.pin_high { "True" } else { "False" },
            self.delay,
            self.duration
        )
    }
}

#[pyclass(name = "SVB_CAMERA_UPGRADE_STATUS", module = "pysvb.svbcamerasdk", get_all)]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpgradeStatus {
    pub needed: bool,
    pub min_version: String,
}

#[pymethods]
impl UpgradeStatus {
    fn __repr__(&self) -> String {
        format!(
            "SVB_CAMERA_UPGRADE_STATUS(needed={}, min_version={:?})",
            if self.needed { "True" } else { "False" },
            self.min_version
        )
    }
}

fn svb_bool(value: bool) -> sys::SVB_BOOL {
    if value { sys::SVB_TRUE } else { sys::SVB_FALSE }
}

#[cfg(feature = "native")]
fn default_driver() -> PyResult<Arc<dyn Driver>> {
    Ok(Arc::new(svbony::NativeDriver))
}

#[cfg(not(feature = "native"))]
fn default_driver() -> PyResult<Arc<dyn Driver>> {
    Err(pyo3::exceptions::PyRuntimeError::new_err(
        "pysvb was built without the native SVBONY SDK",
    ))
}

#[pyclass(name = "PySVBCameraSDK", module = "pysvb.svbcamerasdk")]
pub struct PySvbCameraSdk {
    sdk: Arc<dyn Driver>,
    raise_exc: bool,
    last_error_code: c_int,
}

impl PySvbCameraSdk {
    pub fn with_driver(sdk: Arc<dyn Driver>, raise_exc: bool) -> Self {
        Self {
            sdk,
            raise_exc,
            last_error_code: sys::SVB_SUCCESS,
        }
    }

    fn record(&mut self, py: Python<'_>, code: c_int) -> PyResult<()> {
        self.last_error_code = code;
        if self.raise_exc && code != sys::SVB_SUCCESS {
            return Err(errors::error_for(py, code));
        }
        Ok(())
    }

    fn checked<T>(&mut self, py: Python<'_>, (value, code): (T, c_int)) -> PyResult<T> {
        self.record(py, code)?;
        Ok(value)
    }
}

#[pymethods]
impl PySvbCameraSdk {
    #[new]
    #[pyo3(signature = (raise_exc=true))]
    fn new(raise_exc: bool) -> PyResult<Self> {
        Ok(Self::with_driver(default_driver()?, raise_exc))
    }

    #[getter]
    fn last_error_code(&self) -> c_int {
        self.last_error_code
    }

    #[getter]
    fn last_error_code_str(&self) -> String {
        errors::error_code_name(self.last_error_code)
    }

    #[getter]
    fn sdk_version(&self) -> String {
        self.sdk.sdk_version()
    }

    fn get_num_of_connected_cameras(&self) -> c_int {
        self.sdk.num_connected_cameras()
    }

    fn get_camera_info<'py>(&mut self, py: Python<'py>, camera_index: c_int) -> PyResult<Bound<'py, PyDict>> {
        let result = marshal::camera_info(py, self.sdk.as_ref(), Some((camera_index,)))?;
        self.checked(py, result)
    }

    fn get_camera_property<'py>(&mut self, py: Python<'py>, camera_id: c_int) -> PyResult<Bound<'py, PyDict>> {
        let result = marshal::camera_property(py, self.sdk.as_ref(), Some((camera_id,)))?;
        self.checked(py, result)
    }

    fn get_camera_property_ex<'py>(&mut self, py: Python<'py>, camera_id: c_int) -> PyResult<Bound<'py, PyDict>> {
        let result = marshal::camera_property_ex(py, self.sdk.as_ref(), Some((camera_id,)))?;
        self.checked(py, result)
    }

    fn open_camera(&mut self, py: Python<'_>, camera_id: c_int) -> PyResult<()> {
        let code = marshal::open_camera(self.sdk.as_ref(), Some((camera_id,)));
        self.record(py, code)
    }

    fn close_camera(&mut self, py: Python<'_>, camera_id: c_int) -> PyResult<()> {
        let code = marshal::close_camera(self.sdk.as_ref(), Some((camera_id,)));
        self.record(py, code)
    }

    fn get_num_of_controls(&mut self, py: Python<'_>, camera_id: c_int) -> PyResult<c_int> {
        let result = marshal::num_controls(self.sdk.as_ref(), Some((camera_id,)));
        self.checked(py, result)
    }

    fn get_control_caps<'py>(
        &mut self,
        py: Python<'py>,
        camera_id: c_int,
        control_index: c_int,
    ) -> PyResult<Bound<'py, PyDict>> {
        let result = marshal::control_caps(py, self.sdk.as_ref(), Some((camera_id, control_index)))?;
        self.checked(py, result)
    }

    /// `(value, auto)`
    fn get_control_value(&mut self, py: Python<'_>, camera_id: c_int, control_type: c_int) -> PyResult<(c_long, bool)> {
        let (value, auto, code) = marshal::control_value(self.sdk.as_ref(), Some((camera_id, control_type)));
        self.record(py, code)?;
        Ok((value, auto == sys::SVB_TRUE))
    }

    fn set_control_value(
        &mut self,
        py: Python<'_>,
        camera_id: c_int,
        control_type: c_int,
        control_value: c_long,
        b_auto: bool,
    ) -> PyResult<()> {
        let code = marshal::set_control_value(
            self.sdk.as_ref(),
            Some((camera_id, control_type, control_value, svb_bool(b_auto))),
        );
        self.record(py, code)
    }

    fn get_output_image_type(&mut self, py: Python<'_>, camera_id: c_int) -> PyResult<c_int> {
        let result = marshal::output_image_type(self.sdk.as_ref(), Some((camera_id,)));
        self.checked(py, result)
    }

    fn set_output_image_type(&mut self, py: Python<'_>, camera_id: c_int, image_type: c_int) -> PyResult<()> {
        let code = marshal::set_output_image_type(self.sdk.as_ref(), Some((camera_id, image_type)));
        self.record(py, code)
    }

    /// `roi_format` is any object with `start_x`, `start_y`, `width`,
    /// `height` and `bin` attributes, such as `SVB_ROI_FORMAT`.
    fn set_roi_format(&mut self, py: Python<'_>, camera_id: c_int, roi_format: &Bound<'_, PyAny>) -> PyResult<()> {
        let field = |name: &str| -> PyResult<c_int> { roi_format.getattr(name)?.extract() };
        let args = (
            camera_id,
            field("start_x")?,
            field("start_y")?,
            field("width")?,
            field("height")?,
            field("bin")?,
        );
        let code = marshal::set_roi_format(self.sdk.as_ref(), Some(args));
        self.record(py, code)
    }

    fn get_roi_format(&mut self, py: Python<'_>, camera_id: c_int) -> PyResult<RoiFormat> {
        let ((start_x, start_y, width, height, bin), code) = marshal::roi_format(self.sdk.as_ref(), Some((camera_id,)));
        self.record(py, code)?;
        Ok(RoiFormat::new(start_x, start_y, width, height, bin))
    }

    fn get_dropped_frames(&mut self, py: Python<'_>, camera_id: c_int) -> PyResult<c_int> {
        let result = marshal::dropped_frames(self.sdk.as_ref(), Some((camera_id,)));
        self.checked(py, result)
    }

    fn start_video_capture(&mut self, py: Python<'_>, camera_id: c_int) -> PyResult<()> {
        let code = marshal::start_video_capture(self.sdk.as_ref(), Some((camera_id,)));
        self.record(py, code)
    }

    fn stop_video_capture(&mut self, py: Python<'_>, camera_id: c_int) -> PyResult<()> {
        let code = marshal::stop_video_capture(self.sdk.as_ref(), Some((camera_id,)));
        self.record(py, code)
    }

    fn get_video_data<'py>(
        &mut self,
        py: Python<'py>,
        camera_id: c_int,
        buff_size: c_int,
        wait_ms: c_int,
    ) -> PyResult<Bound<'py, PyBytes>> {
        let result = marshal::video_data(py, self.sdk.as_ref(), Some((camera_id, buff_size, wait_ms)));
        self.checked(py, result)
    }

    fn white_balance_once(&mut self, py: Python<'_>, camera_id: c_int) -> PyResult<()> {
        let code = marshal::white_balance_once(self.sdk.as_ref(), Some((camera_id,)));
        self.record(py, code)
    }

    #[pyo3(signature = (camera_id, buff_size=64))]
    fn get_camera_firmware_version(&mut self, py: Python<'_>, camera_id: c_int, buff_size: c_int) -> PyResult<String> {
        let (version, code) = marshal::firmware_version(self.sdk.as_ref(), Some((camera_id, buff_size)));
        self.record(py, code)?;
        Ok(version.trim().to_owned())
    }

    fn get_camera_support_mode<'py>(&mut self, py: Python<'py>, camera_id: c_int) -> PyResult<Bound<'py, PyDict>> {
        let result = marshal::camera_support_mode(py, self.sdk.as_ref(), Some((camera_id,)))?;
        self.checked(py, result)
    }

    fn get_camera_mode(&mut self, py: Python<'_>, camera_id: c_int) -> PyResult<c_int> {
        let result = marshal::camera_mode(self.sdk.as_ref(), Some((camera_id,)));
        self.checked(py, result)
    }

    fn set_camera_mode(&mut self, py: Python<'_>, camera_id: c_int, mode: c_int) -> PyResult<()> {
        let code = marshal::set_camera_mode(self.sdk.as_ref(), Some((camera_id, mode)));
        self.record(py, code)
    }

    fn send_soft_trigger(&mut self, py: Python<'_>, camera_id: c_int) -> PyResult<()> {
        let code = marshal::send_soft_trigger(self.sdk.as_ref(), Some((camera_id,)));
        self.record(py, code)
    }

    fn get_serial_number<'py>(&mut self, py: Python<'py>, camera_id: c_int) -> PyResult<Bound<'py, PyDict>> {
        let result = marshal::serial_number(py, self.sdk.as_ref(), Some((camera_id,)))?;
        self.checked(py, result)
    }

    /// `trigger_conf` is any object with `pin_high`, `delay` and `duration`
    /// attributes, such as `SVB_TRIGGER_OUTPUT_IO_CONF`.
    fn set_trigger_output_io_conf(
        &mut self,
        py: Python<'_>,
        camera_id: c_int,
        pin: c_int,
        trigger_conf: &Bound<'_, PyAny>,
    ) -> PyResult<()> {
        let pin_high: bool = trigger_conf.getattr("pin_high")?.is_truthy()?;
        let delay: c_long = trigger_conf.getattr("delay")?.extract()?;
        let duration: c_long = trigger_conf.getattr("duration")?.extract()?;
        let code = marshal::set_trigger_output_io_conf(
            self.sdk.as_ref(),
            Some((camera_id, pin, svb_bool(pin_high), delay, duration)),
        );
        self.record(py, code)
    }

    fn get_trigger_output_io_conf(&mut self, py: Python<'_>, camera_id: c_int, pin: c_int) -> PyResult<TriggerOutputConf> {
        let ((pin_high, delay, duration), code) = marshal::trigger_output_io_conf(self.sdk.as_ref(), Some((camera_id, pin)));
        self.record(py, code)?;
        Ok(TriggerOutputConf::new(pin_high == sys::SVB_TRUE, delay, duration))
    }

    fn pulse_guide(&mut self, py: Python<'_>, camera_id: c_int, direction: c_int, duration: c_int) -> PyResult<()> {
        let code = marshal::pulse_guide(self.sdk.as_ref(), Some((camera_id, direction, duration)));
        self.record(py, code)
    }

    fn get_sensor_pixel_size(&mut self, py: Python<'_>, camera_id: c_int) -> PyResult<f32> {
        let result = marshal::sensor_pixel_size(self.sdk.as_ref(), Some((camera_id,)));
        self.checked(py, result)
    }

    fn can_pulse_guide(&mut self, py: Python<'_>, camera_id: c_int) -> PyResult<bool> {
        let (can_guide, code) = marshal::can_pulse_guide(self.sdk.as_ref(), Some((camera_id,)));
        self.record(py, code)?;
        Ok(can_guide == sys::SVB_TRUE)
    }

    fn set_autosave_param(&mut self, py: Python<'_>, camera_id: c_int, enable: bool) -> PyResult<()> {
        let code = marshal::set_auto_save_param(self.sdk.as_ref(), Some((camera_id, svb_bool(enable))));
        self.record(py, code)
    }

    #[pyo3(signature = (camera_id, buff_size=64))]
    fn is_camera_need_to_upgrade(&mut self, py: Python<'_>, camera_id: c_int, buff_size: c_int) -> PyResult<UpgradeStatus> {
        let (needed, min_version, code) = marshal::is_camera_need_to_upgrade(self.sdk.as_ref(), Some((camera_id, buff_size)));
        self.record(py, code)?;
        Ok(UpgradeStatus {
            needed: needed == sys::SVB_TRUE,
            min_version: min_version.trim().to_owned(),
        })
    }

    fn restore_default_param(&mut self, py: Python<'_>, camera_id: c_int) -> PyResult<()> {
        let code = marshal::restore_default_param(self.sdk.as_ref(), Some((camera_id,)));
        self.record(py, code)
    }
}

pub(crate) fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySvbCameraSdk>()?;
    m.add_class::<RoiFormat>()?;
    m.add_class::<TriggerOutputConf>()?;
    m.add_class::<UpgradeStatus>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use svbony::mock::{MockCamera, MockDriver};

    fn sdk_over(driver: MockDriver, raise_exc: bool) -> (PySvbCameraSdk, Arc<MockDriver>) {
        let driver = Arc::new(driver);
        (PySvbCameraSdk::with_driver(driver.clone(), raise_exc), driver)
    }

    #[test]
    fn failing_call_raises_mapped_exception() {
        Python::with_gil(|py| {
            let (mut sdk, _) = sdk_over(MockDriver::new(), true);
            let err = sdk.get_num_of_controls(py, 0).unwrap_err();
            assert!(err.is_instance_of::<errors::CameraClosed>(py));
            assert_eq!(sdk.last_error_code(), sys::SVB_ERROR_CAMERA_CLOSED);
            assert_eq!(sdk.last_error_code_str(), "SVB_ERROR_CAMERA_CLOSED");

            sdk.open_camera(py, 0).unwrap();
            assert_eq!(sdk.get_num_of_controls(py, 0).unwrap(), 10);
            assert_eq!(sdk.last_error_code_str(), "SVB_SUCCESS");
        });
    }

    #[test]
    fn without_raise_exc_defaults_come_back() {
        Python::with_gil(|py| {
            let (mut sdk, driver) = sdk_over(MockDriver::new(), false);
            driver.fail("SVBGetCameraProperty", sys::SVB_ERROR_CAMERA_REMOVED);
            let props = sdk.get_camera_property(py, 0).unwrap();
            assert_eq!(sdk.last_error_code(), sys::SVB_ERROR_CAMERA_REMOVED);
            let formats: Vec<i32> = props.get_item("SupportedVideoFormat").unwrap().unwrap().extract().unwrap();
            assert!(formats.is_empty());

            let roi = sdk.get_roi_format(py, 0).unwrap();
            assert_eq!(roi, RoiFormat::new(-1, -1, -1, -1, -1));
            assert_eq!(sdk.last_error_code(), sys::SVB_ERROR_CAMERA_CLOSED);
        });
    }

    #[test]
    fn roi_round_trip_through_value_class() {
        Python::with_gil(|py| {
            let (mut sdk, _) = sdk_over(MockDriver::new(), true);
            sdk.open_camera(py, 0).unwrap();
            let roi = Bound::new(py, RoiFormat::new(0, 0, 640, 480, 2)).unwrap();
            sdk.set_roi_format(py, 0, roi.as_any()).unwrap();
            assert_eq!(sdk.get_roi_format(py, 0).unwrap(), RoiFormat::new(0, 0, 640, 480, 2));

            let outside = Bound::new(py, RoiFormat::new(900, 0, 640, 480, 2)).unwrap();
            let err = sdk.set_roi_format(py, 0, outside.as_any()).unwrap_err();
            assert!(err.is_instance_of::<errors::OutOfBoundary>(py));
        });
    }

    #[test]
    fn video_data_and_trigger_flow() {
        Python::with_gil(|py| {
            let (mut sdk, _) = sdk_over(MockDriver::empty().with_camera(MockCamera::mono_trigger(0)), true);
            sdk.open_camera(py, 0).unwrap();
            sdk.set_camera_mode(py, 0, sys::SVB_MODE_TRIG_SOFT).unwrap();
            let roi = Bound::new(py, RoiFormat::new(0, 0, 32, 16, 1)).unwrap();
            sdk.set_roi_format(py, 0, roi.as_any()).unwrap();
            sdk.start_video_capture(py, 0).unwrap();

            let err = sdk.get_video_data(py, 0, 32 * 16, 10).unwrap_err();
            assert!(err.is_instance_of::<errors::Timeout>(py));

            sdk.send_soft_trigger(py, 0).unwrap();
            let frame = sdk.get_video_data(py, 0, 32 * 16, 10).unwrap();
            assert_eq!(frame.as_bytes().len(), 32 * 16);

            let err = sdk.get_video_data(py, 0, 0, 10).unwrap_err();
            assert!(err.is_instance_of::<errors::PyInternalError>(py));
            sdk.stop_video_capture(py, 0).unwrap();
        });
    }

    #[test]
    fn typed_helpers() {
        Python::with_gil(|py| {
            let mut spec = MockCamera::mono_trigger(0);
            spec.upgrade_min_version = Some("2.4.0".to_owned());
            let (mut sdk, _) = sdk_over(MockDriver::empty().with_camera(spec).with_sdk_version("1.13.4"), true);
            assert_eq!(sdk.sdk_version(), "1.13.4");
            assert_eq!(sdk.get_num_of_connected_cameras(), 1);
            sdk.open_camera(py, 0).unwrap();

            assert!(sdk.can_pulse_guide(py, 0).unwrap());
            assert_eq!(sdk.get_camera_firmware_version(py, 0, 64).unwrap(), "2.3.0");
            let status = sdk.is_camera_need_to_upgrade(py, 0, 64).unwrap();
            assert!(status.needed);
            assert_eq!(status.min_version, "2.4.0");

            let conf = Bound::new(py, TriggerOutputConf::new(true, 5, 50)).unwrap();
            sdk.set_trigger_output_io_conf(py, 0, sys::SVB_TRIG_OUTPUT_PINB, conf.as_any()).unwrap();
            assert_eq!(
                sdk.get_trigger_output_io_conf(py, 0, sys::SVB_TRIG_OUTPUT_PINB).unwrap(),
                TriggerOutputConf::new(true, 5, 50)
            );

            sdk.set_control_value(py, 0, sys::SVB_GAIN, 100, true).unwrap();
            assert_eq!(sdk.get_control_value(py, 0, sys::SVB_GAIN).unwrap(), (100, true));
        });
    }
}
