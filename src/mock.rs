//! Scripted in-memory camera for testing without hardware.
//!
//! [`MockDriver`] implements [`Driver`] with a small model of the vendor
//! library: cameras must be opened before use, ROI and image type are checked
//! against the camera properties, trigger modes wait for a soft trigger, and
//! any entry point can be told to fail with a given error code.

use std::collections::HashMap;
use std::os::raw::{c_char, c_int, c_long};
use std::sync::{Mutex, MutexGuard};

use svbony_sys as sys;

use crate::common::{BayerPattern, CameraMode, ControlType, ImageType};
use crate::driver::Driver;

/// One control exposed by a [`MockCamera`].
#[derive(Debug, Clone)]
pub struct MockControl {
    pub control: ControlType,
    pub name: String,
    pub description: String,
    pub min: i64,
    pub max: i64,
    pub default: i64,
    pub auto_supported: bool,
    pub writable: bool,
}

impl MockControl {
    pub fn new(control: ControlType, name: &str, min: i64, max: i64, default: i64) -> Self {
        Self {
            control,
            name: name.to_owned(),
            description: name.to_owned(),
            min,
            max,
            default,
            auto_supported: false,
            writable: true,
        }
    }

    #[must_use]
    pub fn with_auto(mut self) -> Self {
        self.auto_supported = true;
        self
    }

    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }
}

/// Static description of a simulated camera.
#[derive(Debug, Clone)]
pub struct MockCamera {
    pub name: String,
    pub serial: String,
    pub port_type: String,
    pub device_id: u32,
    pub camera_id: i32,
    pub max_width: i64,
    pub max_height: i64,
    pub is_color: bool,
    pub bayer_pattern: BayerPattern,
    pub bins: Vec<i32>,
    pub formats: Vec<ImageType>,
    pub max_bit_depth: i32,
    pub is_trigger_cam: bool,
    pub supports_pulse_guide: bool,
    pub supports_control_temp: bool,
    pub controls: Vec<MockControl>,
    pub modes: Vec<CameraMode>,
    pub firmware_version: String,
    pub pixel_size: f32,
    /// Minimum firmware version to report through the upgrade check, if any.
    pub upgrade_min_version: Option<String>,
}

impl MockCamera {
    /// A colour camera modelled on the SV305.
    pub fn color(camera_id: i32) -> Self {
        Self {
            name: "SVBONY SV305".to_owned(),
            serial: format!("SV305{camera_id:03}"),
            port_type: "USB2.0".to_owned(),
            device_id: 0x1234_0305,
            camera_id,
            max_width: 1920,
            max_height: 1080,
            is_color: true,
            bayer_pattern: BayerPattern::GR,
            bins: vec![1, 2],
            formats: vec![
                ImageType::Raw8,
                ImageType::Raw12,
                ImageType::Rgb24,
                ImageType::Rgb32,
                ImageType::Y8,
            ],
            max_bit_depth: 12,
            is_trigger_cam: false,
            supports_pulse_guide: false,
            supports_control_temp: false,
            controls: vec![
                MockControl::new(ControlType::Gain, "Gain", 0, 720, 10).with_auto(),
                MockControl::new(ControlType::Exposure, "Exposure", 29, 2_000_000_000, 30_000).with_auto(),
                MockControl::new(ControlType::Gamma, "Gamma", 0, 1000, 100),
                MockControl::new(ControlType::WbR, "WB_R", 0, 255, 128).with_auto(),
                MockControl::new(ControlType::WbG, "WB_G", 0, 255, 128).with_auto(),
                MockControl::new(ControlType::WbB, "WB_B", 0, 255, 128).with_auto(),
                MockControl::new(ControlType::Flip, "Flip", 0, 3, 0),
                MockControl::new(ControlType::FrameSpeedMode, "FrameSpeedMode", 0, 2, 1),
                MockControl::new(ControlType::Saturation, "Saturation", 0, 255, 128),
                MockControl::new(ControlType::BlackLevel, "BlackLevel", 0, 255, 10),
            ],
            modes: vec![CameraMode::Normal],
            firmware_version: "1.0.2".to_owned(),
            pixel_size: 2.9,
            upgrade_min_version: None,
        }
    }

    /// A monochrome guide camera with trigger input and an ST4 port.
    pub fn mono_trigger(camera_id: i32) -> Self {
        Self {
            name: "SVBONY SV305M Pro".to_owned(),
            serial: format!("SV305M{camera_id:02}"),
            port_type: "USB3.0".to_owned(),
            device_id: 0x1234_0306,
            camera_id,
            max_width: 1280,
            max_height: 960,
            is_color: false,
            bayer_pattern: BayerPattern::RG,
            bins: vec![1, 2, 4],
            formats: vec![ImageType::Raw8, ImageType::Raw16, ImageType::Y8, ImageType::Y16],
            max_bit_depth: 16,
            is_trigger_cam: true,
            supports_pulse_guide: true,
            supports_control_temp: true,
            controls: vec![
                MockControl::new(ControlType::Gain, "Gain", 0, 480, 0).with_auto(),
                MockControl::new(ControlType::Exposure, "Exposure", 32, 1_000_000_000, 10_000).with_auto(),
                MockControl::new(ControlType::BlackLevel, "BlackLevel", 0, 255, 5),
                MockControl::new(ControlType::CoolerEnable, "CoolerEnable", 0, 1, 0),
                MockControl::new(ControlType::TargetTemperature, "TargetTemperature", -200, 300, 0),
                MockControl::new(ControlType::CurrentTemperature, "CurrentTemperature", -500, 1000, 215).read_only(),
                MockControl::new(ControlType::BadPixelCorrectionEnable, "BadPixelCorrectionEnable", 0, 1, 1),
            ],
            modes: vec![
                CameraMode::Normal,
                CameraMode::SoftTrigger,
                CameraMode::RiseEdge,
                CameraMode::FallEdge,
            ],
            firmware_version: "2.3.0".to_owned(),
            pixel_size: 3.75,
            upgrade_min_version: None,
        }
    }
}

struct CameraState {
    spec: MockCamera,
    open: bool,
    capturing: bool,
    roi: (c_int, c_int, c_int, c_int, c_int),
    image_type: ImageType,
    mode: CameraMode,
    values: HashMap<i32, (i64, bool)>,
    trigger_outputs: HashMap<i32, (bool, i64, i64)>,
    pending_triggers: u32,
    frames: u64,
    dropped: i32,
    auto_save: bool,
    pulses: Vec<(c_int, c_int)>,
}

impl CameraState {
    fn new(spec: MockCamera) -> Self {
        let mut state = Self {
            open: false,
            capturing: false,
            roi: (0, 0, 0, 0, 1),
            image_type: ImageType::Raw8,
            mode: CameraMode::Normal,
            values: HashMap::new(),
            trigger_outputs: HashMap::new(),
            pending_triggers: 0,
            frames: 0,
            dropped: 0,
            auto_save: false,
            pulses: Vec::new(),
            spec,
        };
        state.restore_defaults();
        state
    }

    fn restore_defaults(&mut self) {
        self.roi = (0, 0, self.spec.max_width as c_int, self.spec.max_height as c_int, 1);
        self.image_type = self.spec.formats.first().copied().unwrap_or(ImageType::Raw8);
        self.mode = CameraMode::Normal;
        self.values = self
            .spec
            .controls
            .iter()
            .map(|c| (c.control.as_raw(), (c.default, false)))
            .collect();
    }

    /// Bytes of one frame for the current ROI and image type.
    fn frame_len(&self) -> usize {
        let (_, _, w, h, _) = self.roi;
        (w.max(0) as usize) * (h.max(0) as usize) * self.image_type.bytes_per_pixel()
    }

    fn control(&self, control: c_int) -> Option<&MockControl> {
        self.spec.controls.iter().find(|c| c.control.as_raw() == control)
    }
}

struct MockState {
    cameras: Vec<CameraState>,
    failures: HashMap<&'static str, c_int>,
    calls: Option<Vec<&'static str>>,
    reported_count: Option<c_int>,
    sdk_version: String,
}

impl MockState {
    fn record(&mut self, call: &'static str) {
        if let Some(calls) = self.calls.as_mut() {
            calls.push(call);
        }
    }

    /// Record the call; returns the injected error code if there is one.
    fn enter(&mut self, call: &'static str) -> Option<c_int> {
        self.record(call);
        self.failures.get(call).copied()
    }

    fn camera(&mut self, camera_id: c_int) -> Result<&mut CameraState, c_int> {
        self.cameras
            .iter_mut()
            .find(|c| c.spec.camera_id == camera_id)
            .ok_or(sys::SVB_ERROR_INVALID_ID)
    }
}

/// In-memory [`Driver`] for tests and offline development.
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDriver {
    /// A driver with a single colour camera at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self::empty().with_camera(MockCamera::color(0))
    }

    /// A driver that reports no connected cameras.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            state: Mutex::new(MockState {
                cameras: Vec::new(),
                failures: HashMap::new(),
                calls: None,
                reported_count: None,
                sdk_version: "1.13.4".to_owned(),
            }),
        }
    }

    #[must_use]
    pub fn with_camera(self, camera: MockCamera) -> Self {
        self.lock().cameras.push(CameraState::new(camera));
        self
    }

    /// Keep a log of every vendor function called, for [`calls`](Self::calls).
    #[must_use]
    pub fn with_call_log(self) -> Self {
        self.lock().calls = Some(Vec::new());
        self
    }

    #[must_use]
    pub fn with_sdk_version(self, version: &str) -> Self {
        self.lock().sdk_version = version.to_owned();
        self
    }

    /// Override the value returned by `SVBGetNumOfConnectedCameras`.
    #[must_use]
    pub fn with_reported_count(self, count: c_int) -> Self {
        self.lock().reported_count = Some(count);
        self
    }

    /// Make every later call to `call` (a vendor function name such as
    /// `"SVBGetVideoData"`) return `code`.
    pub fn fail(&self, call: &'static str, code: c_int) {
        self.lock().failures.insert(call, code);
    }

    pub fn clear_failures(&self) {
        self.lock().failures.clear();
    }

    /// Vendor function names in call order. Empty unless the driver was
    /// built with [`with_call_log`](Self::with_call_log).
    pub fn calls(&self) -> Vec<&'static str> {
        self.lock().calls.clone().unwrap_or_default()
    }

    pub fn call_count(&self, call: &str) -> usize {
        self.lock()
            .calls
            .as_ref()
            .map_or(0, |calls| calls.iter().filter(|c| **c == call).count())
    }

    pub fn is_open(&self, camera_id: i32) -> bool {
        self.inspect(camera_id, |c| c.open).unwrap_or(false)
    }

    pub fn is_capturing(&self, camera_id: i32) -> bool {
        self.inspect(camera_id, |c| c.capturing).unwrap_or(false)
    }

    pub fn auto_save(&self, camera_id: i32) -> bool {
        self.inspect(camera_id, |c| c.auto_save).unwrap_or(false)
    }

    /// Pulse-guide requests as raw `(direction, duration_ms)` pairs.
    pub fn pulses(&self, camera_id: i32) -> Vec<(c_int, c_int)> {
        self.inspect(camera_id, |c| c.pulses.clone()).unwrap_or_default()
    }

    /// Pretend the camera lost `count` frames.
    pub fn drop_frames(&self, camera_id: i32, count: i32) {
        let mut state = self.lock();
        if let Ok(camera) = state.camera(camera_id) {
            camera.dropped += count;
        }
    }

    /// Byte `i` of frame `n` (counting from zero) holds `(n + i) as u8`.
    pub fn expected_pixel(frame: u64, offset: usize) -> u8 {
        frame.wrapping_add(offset as u64) as u8
    }

    fn inspect<T>(&self, camera_id: i32, f: impl FnOnce(&CameraState) -> T) -> Option<T> {
        let mut state = self.lock();
        state.camera(camera_id).ok().map(|c| f(c))
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn with_camera_state(
        &self,
        call: &'static str,
        camera_id: c_int,
        f: impl FnOnce(&mut CameraState) -> c_int,
    ) -> c_int {
        let mut state = self.lock();
        if let Some(code) = state.enter(call) {
            return code;
        }
        match state.camera(camera_id) {
            Ok(camera) => f(camera),
            Err(code) => code,
        }
    }

    fn with_open_camera(
        &self,
        call: &'static str,
        camera_id: c_int,
        f: impl FnOnce(&mut CameraState) -> c_int,
    ) -> c_int {
        self.with_camera_state(call, camera_id, |camera| {
            if !camera.open {
                return sys::SVB_ERROR_CAMERA_CLOSED;
            }
            f(camera)
        })
    }
}

fn write_chars(dst: &mut [c_char], src: &str) {
    dst.fill(0);
    let len = src.len().min(dst.len().saturating_sub(1));
    for (d, b) in dst.iter_mut().zip(src.as_bytes()[..len].iter()) {
        *d = *b as c_char;
    }
}

fn to_bool(value: bool) -> sys::SVB_BOOL {
    if value { sys::SVB_TRUE } else { sys::SVB_FALSE }
}

impl Driver for MockDriver {
    fn num_connected_cameras(&self) -> c_int {
        let mut state = self.lock();
        state.record("SVBGetNumOfConnectedCameras");
        state.reported_count.unwrap_or(state.cameras.len() as c_int)
    }

    fn camera_info(&self, index: c_int, info: &mut sys::SVB_CAMERA_INFO) -> c_int {
        let mut state = self.lock();
        if let Some(code) = state.enter("SVBGetCameraInfo") {
            return code;
        }
        let Some(camera) = usize::try_from(index).ok().and_then(|i| state.cameras.get(i)) else {
            return sys::SVB_ERROR_INVALID_INDEX;
        };
        let spec = &camera.spec;
        write_chars(&mut info.FriendlyName, &spec.name);
        write_chars(&mut info.CameraSN, &spec.serial);
        write_chars(&mut info.PortType, &spec.port_type);
        info.DeviceID = spec.device_id;
        info.CameraID = spec.camera_id;
        sys::SVB_SUCCESS
    }

    fn camera_property(&self, camera_id: c_int, property: &mut sys::SVB_CAMERA_PROPERTY) -> c_int {
        self.with_camera_state("SVBGetCameraProperty", camera_id, |camera| {
            let spec = &camera.spec;
            property.MaxWidth = spec.max_width as c_long;
            property.MaxHeight = spec.max_height as c_long;
            property.IsColorCam = to_bool(spec.is_color);
            property.BayerPattern = spec.bayer_pattern.as_raw();
            property.SupportedBins = [0; 16];
            for (slot, bin) in property.SupportedBins.iter_mut().zip(&spec.bins) {
                *slot = *bin;
            }
            property.SupportedVideoFormat = [sys::SVB_IMG_END; 8];
            for (slot, format) in property.SupportedVideoFormat.iter_mut().zip(&spec.formats) {
                *slot = format.as_raw();
            }
            property.MaxBitDepth = spec.max_bit_depth;
            property.IsTriggerCam = to_bool(spec.is_trigger_cam);
            sys::SVB_SUCCESS
        })
    }

    fn camera_property_ex(&self, camera_id: c_int, property: &mut sys::SVB_CAMERA_PROPERTY_EX) -> c_int {
        self.with_camera_state("SVBGetCameraPropertyEx", camera_id, |camera| {
            property.bSupportPulseGuide = to_bool(camera.spec.supports_pulse_guide);
            property.bSupportControlTemp = to_bool(camera.spec.supports_control_temp);
            sys::SVB_SUCCESS
        })
    }

    fn open_camera(&self, camera_id: c_int) -> c_int {
        self.with_camera_state("SVBOpenCamera", camera_id, |camera| {
            camera.open = true;
            sys::SVB_SUCCESS
        })
    }

    fn close_camera(&self, camera_id: c_int) -> c_int {
        self.with_camera_state("SVBCloseCamera", camera_id, |camera| {
            camera.open = false;
            camera.capturing = false;
            sys::SVB_SUCCESS
        })
    }

    fn num_controls(&self, camera_id: c_int, count: &mut c_int) -> c_int {
        self.with_open_camera("SVBGetNumOfControls", camera_id, |camera| {
            *count = camera.spec.controls.len() as c_int;
            sys::SVB_SUCCESS
        })
    }

    fn control_caps(&self, camera_id: c_int, index: c_int, caps: &mut sys::SVB_CONTROL_CAPS) -> c_int {
        self.with_open_camera("SVBGetControlCaps", camera_id, |camera| {
            let Some(control) = usize::try_from(index).ok().and_then(|i| camera.spec.controls.get(i)) else {
                return sys::SVB_ERROR_INVALID_INDEX;
            };
            write_chars(&mut caps.Name, &control.name);
            write_chars(&mut caps.Description, &control.description);
            caps.MaxValue = control.max as c_long;
            caps.MinValue = control.min as c_long;
            caps.DefaultValue = control.default as c_long;
            caps.IsAutoSupported = to_bool(control.auto_supported);
            caps.IsWritable = to_bool(control.writable);
            caps.ControlType = control.control.as_raw();
            sys::SVB_SUCCESS
        })
    }

    fn control_value(
        &self,
        camera_id: c_int,
        control: sys::SVB_CONTROL_TYPE,
        value: &mut c_long,
        auto: &mut sys::SVB_BOOL,
    ) -> c_int {
        self.with_open_camera("SVBGetControlValue", camera_id, |camera| match camera.values.get(&control) {
            Some(&(current, is_auto)) => {
                *value = current as c_long;
                *auto = to_bool(is_auto);
                sys::SVB_SUCCESS
            }
            None => sys::SVB_ERROR_INVALID_CONTROL_TYPE,
        })
    }

    fn set_control_value(
        &self,
        camera_id: c_int,
        control: sys::SVB_CONTROL_TYPE,
        value: c_long,
        auto: sys::SVB_BOOL,
    ) -> c_int {
        self.with_open_camera("SVBSetControlValue", camera_id, |camera| {
            let Some(caps) = camera.control(control) else {
                return sys::SVB_ERROR_INVALID_CONTROL_TYPE;
            };
            let value = value as i64;
            if !caps.writable || value < caps.min || value > caps.max {
                return sys::SVB_ERROR_GENERAL_ERROR;
            }
            let is_auto = caps.auto_supported && auto != sys::SVB_FALSE;
            camera.values.insert(control, (value, is_auto));
            sys::SVB_SUCCESS
        })
    }

    fn output_image_type(&self, camera_id: c_int, image_type: &mut sys::SVB_IMG_TYPE) -> c_int {
        self.with_open_camera("SVBGetOutputImageType", camera_id, |camera| {
            *image_type = camera.image_type.as_raw();
            sys::SVB_SUCCESS
        })
    }

    fn set_output_image_type(&self, camera_id: c_int, image_type: sys::SVB_IMG_TYPE) -> c_int {
        self.with_open_camera("SVBSetOutputImageType", camera_id, |camera| {
            if camera.capturing {
                return sys::SVB_ERROR_VIDEO_MODE_ACTIVE;
            }
            match ImageType::from_raw(image_type) {
                Some(t) if camera.spec.formats.contains(&t) => {
                    camera.image_type = t;
                    sys::SVB_SUCCESS
                }
                _ => sys::SVB_ERROR_INVALID_IMGTYPE,
            }
        })
    }

    fn set_roi_format(
        &self,
        camera_id: c_int,
        start_x: c_int,
        start_y: c_int,
        width: c_int,
        height: c_int,
        bin: c_int,
    ) -> c_int {
        self.with_open_camera("SVBSetROIFormat", camera_id, |camera| {
            if camera.capturing {
                return sys::SVB_ERROR_VIDEO_MODE_ACTIVE;
            }
            if !camera.spec.bins.contains(&bin) || width <= 0 || height <= 0 {
                return sys::SVB_ERROR_INVALID_SIZE;
            }
            let max_w = camera.spec.max_width / i64::from(bin);
            let max_h = camera.spec.max_height / i64::from(bin);
            if i64::from(width) > max_w || i64::from(height) > max_h {
                return sys::SVB_ERROR_INVALID_SIZE;
            }
            if start_x < 0
                || start_y < 0
                || i64::from(start_x) + i64::from(width) > max_w
                || i64::from(start_y) + i64::from(height) > max_h
            {
                return sys::SVB_ERROR_OUTOF_BOUNDARY;
            }
            camera.roi = (start_x, start_y, width, height, bin);
            sys::SVB_SUCCESS
        })
    }

    fn roi_format(
        &self,
        camera_id: c_int,
        start_x: &mut c_int,
        start_y: &mut c_int,
        width: &mut c_int,
        height: &mut c_int,
        bin: &mut c_int,
    ) -> c_int {
        self.with_open_camera("SVBGetROIFormat", camera_id, |camera| {
            (*start_x, *start_y, *width, *height, *bin) = camera.roi;
            sys::SVB_SUCCESS
        })
    }

    fn dropped_frames(&self, camera_id: c_int, dropped: &mut c_int) -> c_int {
        self.with_open_camera("SVBGetDroppedFrames", camera_id, |camera| {
            *dropped = camera.dropped;
            sys::SVB_SUCCESS
        })
    }

    fn start_video_capture(&self, camera_id: c_int) -> c_int {
        self.with_open_camera("SVBStartVideoCapture", camera_id, |camera| {
            camera.capturing = true;
            camera.pending_triggers = 0;
            sys::SVB_SUCCESS
        })
    }

    fn stop_video_capture(&self, camera_id: c_int) -> c_int {
        self.with_open_camera("SVBStopVideoCapture", camera_id, |camera| {
            camera.capturing = false;
            sys::SVB_SUCCESS
        })
    }

    fn video_data(&self, camera_id: c_int, buffer: &mut [u8], _wait_ms: c_int) -> c_int {
        self.with_open_camera("SVBGetVideoData", camera_id, |camera| {
            if !camera.capturing {
                return sys::SVB_ERROR_INVALID_SEQUENCE;
            }
            let frame_len = camera.frame_len();
            if buffer.len() < frame_len {
                return sys::SVB_ERROR_BUFFER_TOO_SMALL;
            }
            if camera.mode.is_triggered() {
                if camera.pending_triggers == 0 {
                    return sys::SVB_ERROR_TIMEOUT;
                }
                camera.pending_triggers -= 1;
            }
            let frame = camera.frames;
            for (i, byte) in buffer[..frame_len].iter_mut().enumerate() {
                *byte = MockDriver::expected_pixel(frame, i);
            }
            camera.frames += 1;
            sys::SVB_SUCCESS
        })
    }

    fn white_balance_once(&self, camera_id: c_int) -> c_int {
        self.with_open_camera("SVBWhiteBalanceOnce", camera_id, |camera| {
            if !camera.spec.is_color {
                return sys::SVB_ERROR_GENERAL_ERROR;
            }
            for control in [ControlType::WbR, ControlType::WbG, ControlType::WbB] {
                if let Some(default) = camera.control(control.as_raw()).map(|c| c.default) {
                    camera.values.insert(control.as_raw(), (default, false));
                }
            }
            sys::SVB_SUCCESS
        })
    }

    fn firmware_version(&self, camera_id: c_int, version: &mut [c_char; sys::SVB_VERSION_BUFFER_LEN]) -> c_int {
        self.with_open_camera("SVBGetCameraFirmwareVersion", camera_id, |camera| {
            write_chars(version, &camera.spec.firmware_version);
            sys::SVB_SUCCESS
        })
    }

    fn sdk_version(&self) -> String {
        let mut state = self.lock();
        state.record("SVBGetSDKVersion");
        state.sdk_version.clone()
    }

    fn supported_modes(&self, camera_id: c_int, modes: &mut sys::SVB_SUPPORTED_MODE) -> c_int {
        self.with_open_camera("SVBGetCameraSupportMode", camera_id, |camera| {
            modes.SupportedCameraMode = [sys::SVB_MODE_END; 16];
            for (slot, mode) in modes.SupportedCameraMode.iter_mut().zip(&camera.spec.modes) {
                *slot = mode.as_raw();
            }
            sys::SVB_SUCCESS
        })
    }

    fn camera_mode(&self, camera_id: c_int, mode: &mut sys::SVB_CAMERA_MODE) -> c_int {
        self.with_open_camera("SVBGetCameraMode", camera_id, |camera| {
            *mode = camera.mode.as_raw();
            sys::SVB_SUCCESS
        })
    }

    fn set_camera_mode(&self, camera_id: c_int, mode: sys::SVB_CAMERA_MODE) -> c_int {
        self.with_open_camera("SVBSetCameraMode", camera_id, |camera| match CameraMode::from_raw(mode) {
            Some(m) if camera.spec.modes.contains(&m) => {
                camera.mode = m;
                sys::SVB_SUCCESS
            }
            _ => sys::SVB_ERROR_INVALID_MODE,
        })
    }

    fn send_soft_trigger(&self, camera_id: c_int) -> c_int {
        self.with_open_camera("SVBSendSoftTrigger", camera_id, |camera| {
            if camera.mode != CameraMode::SoftTrigger {
                return sys::SVB_ERROR_INVALID_MODE;
            }
            camera.pending_triggers += 1;
            sys::SVB_SUCCESS
        })
    }

    fn serial_number(&self, camera_id: c_int, serial: &mut sys::SVB_SN) -> c_int {
        self.with_open_camera("SVBGetSerialNumber", camera_id, |camera| {
            serial.id = [0; 8];
            for (slot, b) in serial.id.iter_mut().zip(camera.spec.serial.bytes()) {
                *slot = b;
            }
            sys::SVB_SUCCESS
        })
    }

    fn set_trigger_output(
        &self,
        camera_id: c_int,
        pin: sys::SVB_TRIG_OUTPUT_PIN,
        pin_high: sys::SVB_BOOL,
        delay: c_long,
        duration: c_long,
    ) -> c_int {
        self.with_open_camera("SVBSetTriggerOutputIOConf", camera_id, |camera| {
            if !camera.spec.is_trigger_cam || pin == sys::SVB_TRIG_OUTPUT_NONE {
                return sys::SVB_ERROR_GENERAL_ERROR;
            }
            camera
                .trigger_outputs
                .insert(pin, (pin_high != sys::SVB_FALSE, delay as i64, duration as i64));
            sys::SVB_SUCCESS
        })
    }

    fn trigger_output(
        &self,
        camera_id: c_int,
        pin: sys::SVB_TRIG_OUTPUT_PIN,
        pin_high: &mut sys::SVB_BOOL,
        delay: &mut c_long,
        duration: &mut c_long,
    ) -> c_int {
        self.with_open_camera("SVBGetTriggerOutputIOConf", camera_id, |camera| {
            if !camera.spec.is_trigger_cam || pin == sys::SVB_TRIG_OUTPUT_NONE {
                return sys::SVB_ERROR_GENERAL_ERROR;
            }
            let (high, d, dur) = camera.trigger_outputs.get(&pin).copied().unwrap_or((false, 0, 0));
            *pin_high = to_bool(high);
            *delay = d as c_long;
            *duration = dur as c_long;
            sys::SVB_SUCCESS
        })
    }

    fn pulse_guide(&self, camera_id: c_int, direction: sys::SVB_GUIDE_DIRECTION, duration_ms: c_int) -> c_int {
        self.with_open_camera("SVBPulseGuide", camera_id, |camera| {
            if !camera.spec.supports_pulse_guide {
                return sys::SVB_ERROR_GENERAL_ERROR;
            }
            if !(sys::SVB_GUIDE_NORTH..=sys::SVB_GUIDE_WEST).contains(&direction) {
                return sys::SVB_ERROR_INVALID_DIRECTION;
            }
            camera.pulses.push((direction, duration_ms));
            sys::SVB_SUCCESS
        })
    }

    fn sensor_pixel_size(&self, camera_id: c_int, pixel_size: &mut f32) -> c_int {
        self.with_open_camera("SVBGetSensorPixelSize", camera_id, |camera| {
            *pixel_size = camera.spec.pixel_size;
            sys::SVB_SUCCESS
        })
    }

    fn can_pulse_guide(&self, camera_id: c_int, can_guide: &mut sys::SVB_BOOL) -> c_int {
        self.with_open_camera("SVBCanPulseGuide", camera_id, |camera| {
            *can_guide = to_bool(camera.spec.supports_pulse_guide);
            sys::SVB_SUCCESS
        })
    }

    fn set_auto_save_param(&self, camera_id: c_int, enable: sys::SVB_BOOL) -> c_int {
        self.with_open_camera("SVBSetAutoSaveParam", camera_id, |camera| {
            camera.auto_save = enable != sys::SVB_FALSE;
            sys::SVB_SUCCESS
        })
    }

    fn needs_upgrade(
        &self,
        camera_id: c_int,
        needs_upgrade: &mut sys::SVB_BOOL,
        min_version: &mut [c_char; sys::SVB_VERSION_BUFFER_LEN],
    ) -> c_int {
        self.with_open_camera("SVBIsCameraNeedToUpgrade", camera_id, |camera| {
            match &camera.spec.upgrade_min_version {
                Some(version) => {
                    *needs_upgrade = sys::SVB_TRUE;
                    write_chars(min_version, version);
                }
                None => {
                    *needs_upgrade = sys::SVB_FALSE;
                    min_version.fill(0);
                }
            }
            sys::SVB_SUCCESS
        })
    }

    fn restore_default_param(&self, camera_id: c_int) -> c_int {
        self.with_open_camera("SVBRestoreDefaultParam", camera_id, |camera| {
            if camera.capturing {
                return sys::SVB_ERROR_VIDEO_MODE_ACTIVE;
            }
            camera.restore_defaults();
            sys::SVB_SUCCESS
        })
    }
}
