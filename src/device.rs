use std::fmt;
use std::os::raw::{c_char, c_int, c_long};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use svbony_sys as sys;

use crate::capture::validate_buffer_size;
use crate::common::{CameraMode, ControlType, GuideDirection, ImageType, RoiFormat, TriggerOutputPin, known};
use crate::control::ControlCaps;
use crate::device_info::{CameraInfo, CameraProperty, CameraPropertyEx, SerialNumber, SupportedModes, UpgradeStatus};
use crate::driver::Driver;
use crate::error::{Result, SvbError, check};
use crate::misc::fixed_cstr_to_string;
use crate::trigger::TriggerOutputConfig;

/// Log the outcome of one SDK call and turn its code into a `Result`.
fn checked(call: &str, camera_id: c_int, code: c_int) -> Result<()> {
    debug!("{call}(camera {camera_id}) -> {code}");
    check(code)
}

fn to_bool(value: bool) -> sys::SVB_BOOL {
    if value { sys::SVB_TRUE } else { sys::SVB_FALSE }
}

fn to_c_long(value: i64, what: &str) -> Result<c_long> {
    c_long::try_from(value).map_err(|_| SvbError::InvalidArgument(format!("{what} {value} does not fit a C long")))
}

/// Milliseconds for `SVBGetVideoData`: `None` waits forever (`-1`), longer
/// waits are clamped to `i32::MAX`.
pub(crate) fn wait_to_ms(wait: Option<Duration>) -> c_int {
    match wait {
        None => -1,
        Some(wait) => c_int::try_from(wait.as_millis()).unwrap_or(c_int::MAX),
    }
}

/// Entry point to the SDK. Cheap to clone; every clone talks to the same driver.
#[derive(Clone)]
pub struct Sdk {
    driver: Arc<dyn Driver>,
}

impl fmt::Debug for Sdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sdk").finish_non_exhaustive()
    }
}

#[cfg(feature = "native")]
impl Default for Sdk {
    fn default() -> Self {
        Self::new()
    }
}

impl Sdk {
    /// SDK backed by the linked vendor library.
    #[cfg(feature = "native")]
    pub fn new() -> Self {
        Self::with_driver(Arc::new(crate::driver::NativeDriver))
    }

    pub fn with_driver(driver: Arc<dyn Driver>) -> Self {
        Sdk { driver }
    }

    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    /// Number of cameras the SDK sees. Must be called before any other
    /// camera function to refresh the device list.
    pub fn num_connected_cameras(&self) -> usize {
        let count = self.driver.num_connected_cameras();
        debug!("SVBGetNumOfConnectedCameras() -> {count}");
        usize::try_from(count).unwrap_or(0)
    }

    pub fn camera_info(&self, index: usize) -> Result<CameraInfo> {
        let index = c_int::try_from(index)
            .map_err(|_| SvbError::InvalidArgument(format!("camera index {index} out of range")))?;
        let mut info = sys::SVB_CAMERA_INFO::default();
        let code = self.driver.camera_info(index, &mut info);
        debug!("SVBGetCameraInfo(index {index}) -> {code}");
        check(code)?;
        Ok(CameraInfo::from_native(&info))
    }

    /// Refresh the device list and describe every connected camera.
    pub fn cameras(&self) -> Result<Vec<CameraInfo>> {
        (0..self.num_connected_cameras()).map(|i| self.camera_info(i)).collect()
    }

    pub fn version(&self) -> String {
        self.driver.sdk_version()
    }

    pub fn open(&self, camera_id: i32) -> Result<Camera> {
        checked("SVBOpenCamera", camera_id, self.driver.open_camera(camera_id))?;
        Ok(Camera {
            sdk: self.clone(),
            id: camera_id,
            closed: false,
        })
    }

    /// Open the camera at position `index` of the connected camera list.
    pub fn open_index(&self, index: usize) -> Result<Camera> {
        let info = self.camera_info(index)?;
        self.open(info.camera_id)
    }
}

/// An opened camera. The camera is closed when this handle is dropped.
pub struct Camera {
    sdk: Sdk,
    id: i32,
    closed: bool,
}

impl fmt::Debug for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Camera").field("id", &self.id).finish()
    }
}

impl Camera {
    pub fn id(&self) -> i32 {
        self.id
    }

    pub(crate) fn driver(&self) -> &dyn Driver {
        self.sdk.driver.as_ref()
    }

    pub(crate) fn checked(&self, call: &str, code: c_int) -> Result<()> {
        checked(call, self.id, code)
    }

    /// Close the camera and report the SDK result instead of only logging it.
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.checked("SVBCloseCamera", self.driver().close_camera(self.id))
    }

    pub fn property(&self) -> Result<CameraProperty> {
        let mut props = sys::SVB_CAMERA_PROPERTY::default();
        self.checked("SVBGetCameraProperty", self.driver().camera_property(self.id, &mut props))?;
        CameraProperty::from_native(&props)
    }

    pub fn property_ex(&self) -> Result<CameraPropertyEx> {
        let mut props = sys::SVB_CAMERA_PROPERTY_EX::default();
        self.checked("SVBGetCameraPropertyEx", self.driver().camera_property_ex(self.id, &mut props))?;
        Ok(CameraPropertyEx::from_native(&props))
    }

    pub fn num_controls(&self) -> Result<usize> {
        let mut count: c_int = 0;
        self.checked("SVBGetNumOfControls", self.driver().num_controls(self.id, &mut count))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    pub fn control_caps(&self, index: usize) -> Result<ControlCaps> {
        let index = c_int::try_from(index)
            .map_err(|_| SvbError::InvalidArgument(format!("control index {index} out of range")))?;
        let mut caps = sys::SVB_CONTROL_CAPS::default();
        self.checked("SVBGetControlCaps", self.driver().control_caps(self.id, index, &mut caps))?;
        ControlCaps::from_native(&caps)
    }

    /// Capabilities of every control the camera exposes.
    pub fn controls(&self) -> Result<Vec<ControlCaps>> {
        (0..self.num_controls()?).map(|i| self.control_caps(i)).collect()
    }

    /// Current value and auto flag of a control.
    pub fn control_value(&self, control: ControlType) -> Result<(i64, bool)> {
        let mut value: c_long = 0;
        let mut auto = sys::SVB_FALSE;
        self.checked(
            "SVBGetControlValue",
            self.driver().control_value(self.id, control.as_raw(), &mut value, &mut auto),
        )?;
        Ok((i64::from(value), auto != sys::SVB_FALSE))
    }

    pub fn set_control_value(&self, control: ControlType, value: i64, auto: bool) -> Result<()> {
        let value = to_c_long(value, "control value")?;
        self.checked(
            "SVBSetControlValue",
            self.driver().set_control_value(self.id, control.as_raw(), value, to_bool(auto)),
        )
    }

    pub fn output_image_type(&self) -> Result<ImageType> {
        let mut raw = sys::SVB_IMG_END;
        self.checked("SVBGetOutputImageType", self.driver().output_image_type(self.id, &mut raw))?;
        known(ImageType::from_raw(raw), "image type", raw)
    }

    pub fn set_output_image_type(&self, image_type: ImageType) -> Result<()> {
        self.checked(
            "SVBSetOutputImageType",
            self.driver().set_output_image_type(self.id, image_type.as_raw()),
        )
    }

    /// Set the ROI. Capture must be stopped first.
    pub fn set_roi_format(&self, roi: RoiFormat) -> Result<()> {
        self.checked(
            "SVBSetROIFormat",
            self.driver()
                .set_roi_format(self.id, roi.start_x, roi.start_y, roi.width, roi.height, roi.bin),
        )
    }

    pub fn roi_format(&self) -> Result<RoiFormat> {
        let mut roi = RoiFormat::new(0, 0, 0, 0, 0);
        self.checked(
            "SVBGetROIFormat",
            self.driver().roi_format(
                self.id,
                &mut roi.start_x,
                &mut roi.start_y,
                &mut roi.width,
                &mut roi.height,
                &mut roi.bin,
            ),
        )?;
        Ok(roi)
    }

    pub fn dropped_frames(&self) -> Result<i32> {
        let mut dropped: c_int = 0;
        self.checked("SVBGetDroppedFrames", self.driver().dropped_frames(self.id, &mut dropped))?;
        Ok(dropped)
    }

    pub fn start_video_capture(&self) -> Result<()> {
        self.checked("SVBStartVideoCapture", self.driver().start_video_capture(self.id))
    }

    pub fn stop_video_capture(&self) -> Result<()> {
        self.checked("SVBStopVideoCapture", self.driver().stop_video_capture(self.id))
    }

    /// Read one frame into a freshly allocated buffer of `buffer_size` bytes.
    ///
    /// A non-positive size or one that does not fit a C `long` is rejected
    /// without calling the SDK. `None` waits forever. The SDK does not report
    /// how many bytes it wrote, so on success the whole buffer is returned.
    pub fn video_data(&self, buffer_size: i64, wait: Option<Duration>) -> Result<Vec<u8>> {
        let len = validate_buffer_size(buffer_size)?;
        let mut buffer = vec![0u8; len];
        self.checked(
            "SVBGetVideoData",
            self.driver().video_data(self.id, &mut buffer, wait_to_ms(wait)),
        )?;
        Ok(buffer)
    }

    pub fn white_balance_once(&self) -> Result<()> {
        self.checked("SVBWhiteBalanceOnce", self.driver().white_balance_once(self.id))
    }

    pub fn firmware_version(&self) -> Result<String> {
        let mut buffer: [c_char; sys::SVB_VERSION_BUFFER_LEN] = [0; sys::SVB_VERSION_BUFFER_LEN];
        self.checked("SVBGetCameraFirmwareVersion", self.driver().firmware_version(self.id, &mut buffer))?;
        Ok(fixed_cstr_to_string(&buffer))
    }

    pub fn supported_modes(&self) -> Result<SupportedModes> {
        let mut modes = sys::SVB_SUPPORTED_MODE::default();
        self.checked("SVBGetCameraSupportMode", self.driver().supported_modes(self.id, &mut modes))?;
        SupportedModes::from_native(&modes)
    }

    pub fn camera_mode(&self) -> Result<CameraMode> {
        let mut raw = sys::SVB_MODE_END;
        self.checked("SVBGetCameraMode", self.driver().camera_mode(self.id, &mut raw))?;
        known(CameraMode::from_raw(raw), "camera mode", raw)
    }

    pub fn set_camera_mode(&self, mode: CameraMode) -> Result<()> {
        self.checked("SVBSetCameraMode", self.driver().set_camera_mode(self.id, mode.as_raw()))
    }

    pub fn send_soft_trigger(&self) -> Result<()> {
        self.checked("SVBSendSoftTrigger", self.driver().send_soft_trigger(self.id))
    }

    pub fn serial_number(&self) -> Result<SerialNumber> {
        let mut sn = sys::SVB_SN::default();
        self.checked("SVBGetSerialNumber", self.driver().serial_number(self.id, &mut sn))?;
        Ok(SerialNumber::from_native(&sn))
    }

    pub fn set_trigger_output(&self, pin: TriggerOutputPin, config: TriggerOutputConfig) -> Result<()> {
        let delay = to_c_long(config.delay, "trigger delay")?;
        let duration = to_c_long(config.duration, "trigger duration")?;
        self.checked(
            "SVBSetTriggerOutputIOConf",
            self.driver()
                .set_trigger_output(self.id, pin.as_raw(), to_bool(config.pin_high), delay, duration),
        )
    }

    pub fn trigger_output(&self, pin: TriggerOutputPin) -> Result<TriggerOutputConfig> {
        let mut pin_high = sys::SVB_FALSE;
        let mut delay: c_long = 0;
        let mut duration: c_long = 0;
        self.checked(
            "SVBGetTriggerOutputIOConf",
            self.driver()
                .trigger_output(self.id, pin.as_raw(), &mut pin_high, &mut delay, &mut duration),
        )?;
        Ok(TriggerOutputConfig::new(
            pin_high != sys::SVB_FALSE,
            i64::from(delay),
            i64::from(duration),
        ))
    }

    /// Send a guide pulse through the ST4 port. Resolution is one millisecond.
    pub fn pulse_guide(&self, direction: GuideDirection, duration: Duration) -> Result<()> {
        let ms = c_int::try_from(duration.as_millis())
            .map_err(|_| SvbError::InvalidArgument(format!("pulse of {duration:?} is too long")))?;
        self.checked("SVBPulseGuide", self.driver().pulse_guide(self.id, direction.as_raw(), ms))
    }

    /// Pixel pitch in micrometres.
    pub fn sensor_pixel_size(&self) -> Result<f32> {
        let mut size = 0.0f32;
        self.checked("SVBGetSensorPixelSize", self.driver().sensor_pixel_size(self.id, &mut size))?;
        Ok(size)
    }

    pub fn can_pulse_guide(&self) -> Result<bool> {
        let mut can_guide = sys::SVB_FALSE;
        self.checked("SVBCanPulseGuide", self.driver().can_pulse_guide(self.id, &mut can_guide))?;
        Ok(can_guide != sys::SVB_FALSE)
    }

    /// Let the SDK persist parameter changes on the host.
    pub fn set_auto_save_param(&self, enable: bool) -> Result<()> {
        self.checked("SVBSetAutoSaveParam", self.driver().set_auto_save_param(self.id, to_bool(enable)))
    }

    pub fn needs_upgrade(&self) -> Result<UpgradeStatus> {
        let mut needs_upgrade = sys::SVB_FALSE;
        let mut min_version: [c_char; sys::SVB_VERSION_BUFFER_LEN] = [0; sys::SVB_VERSION_BUFFER_LEN];
        self.checked(
            "SVBIsCameraNeedToUpgrade",
            self.driver().needs_upgrade(self.id, &mut needs_upgrade, &mut min_version),
        )?;
        Ok(UpgradeStatus {
            needs_upgrade: needs_upgrade != sys::SVB_FALSE,
            min_version: fixed_cstr_to_string(&min_version),
        })
    }

    pub fn restore_default_param(&self) -> Result<()> {
        self.checked("SVBRestoreDefaultParam", self.driver().restore_default_param(self.id))
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(err) = self.checked("SVBCloseCamera", self.driver().close_camera(self.id)) {
            warn!("closing camera {} failed: {err}", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockCamera, MockDriver};

    fn sdk_with(driver: MockDriver) -> (Sdk, Arc<MockDriver>) {
        let driver = Arc::new(driver);
        (Sdk::with_driver(driver.clone()), driver)
    }

    #[test]
    fn wait_conversion() {
        assert_eq!(wait_to_ms(None), -1);
        assert_eq!(wait_to_ms(Some(Duration::from_millis(500))), 500);
        assert_eq!(wait_to_ms(Some(Duration::from_secs(u64::MAX))), i32::MAX);
    }

    #[test]
    fn negative_camera_count_clamps_to_zero() {
        let (sdk, _) = sdk_with(MockDriver::empty().with_reported_count(-3));
        assert_eq!(sdk.num_connected_cameras(), 0);
        assert!(sdk.cameras().unwrap().is_empty());
    }

    #[test]
    fn drop_closes_camera() {
        let (sdk, driver) = sdk_with(MockDriver::new().with_call_log());
        {
            let _camera = sdk.open(0).unwrap();
            assert!(driver.is_open(0));
        }
        assert!(!driver.is_open(0));
        assert_eq!(driver.call_count("SVBCloseCamera"), 1);
    }

    #[test]
    fn explicit_close_reports_error_once() {
        let (sdk, driver) = sdk_with(MockDriver::new().with_call_log());
        let camera = sdk.open(0).unwrap();
        driver.fail("SVBCloseCamera", sys::SVB_ERROR_CAMERA_REMOVED);
        let err = camera.close().unwrap_err();
        assert_eq!(err.code(), sys::SVB_ERROR_CAMERA_REMOVED);
        assert_eq!(driver.call_count("SVBCloseCamera"), 1);
    }

    #[test]
    fn control_value_round_trip() {
        let (sdk, _) = sdk_with(MockDriver::new());
        let camera = sdk.open(0).unwrap();
        camera.set_control_value(ControlType::Gain, 120, false).unwrap();
        assert_eq!(camera.control_value(ControlType::Gain).unwrap(), (120, false));
        camera.set_control_value(ControlType::Exposure, 50_000, true).unwrap();
        assert_eq!(camera.control_value(ControlType::Exposure).unwrap(), (50_000, true));
    }

    #[test]
    fn pulse_guide_sends_milliseconds() {
        let (sdk, driver) = sdk_with(MockDriver::empty().with_camera(MockCamera::mono_trigger(4)));
        let camera = sdk.open(4).unwrap();
        camera.pulse_guide(GuideDirection::East, Duration::from_millis(250)).unwrap();
        assert_eq!(driver.pulses(4), vec![(sys::SVB_GUIDE_EAST, 250)]);
    }
}
