//! The seam between the safe wrapper and the vendor library.
//!
//! Every method maps to exactly one SDK entry point, keeps its out-parameter
//! shape and returns the raw `SVB_ERROR_CODE`. Interpretation of the codes and
//! the marshaling of the returned structs happen in the callers.

use std::os::raw::{c_char, c_int, c_long};

use svbony_sys as sys;

/// Low-level access to the SVBONY SDK.
pub trait Driver: Send + Sync {
    fn num_connected_cameras(&self) -> c_int;

    fn camera_info(&self, index: c_int, info: &mut sys::SVB_CAMERA_INFO) -> c_int;

    fn camera_property(&self, camera_id: c_int, property: &mut sys::SVB_CAMERA_PROPERTY) -> c_int;

    fn camera_property_ex(&self, camera_id: c_int, property: &mut sys::SVB_CAMERA_PROPERTY_EX) -> c_int;

    fn open_camera(&self, camera_id: c_int) -> c_int;

    fn close_camera(&self, camera_id: c_int) -> c_int;

    fn num_controls(&self, camera_id: c_int, count: &mut c_int) -> c_int;

    fn control_caps(&self, camera_id: c_int, index: c_int, caps: &mut sys::SVB_CONTROL_CAPS) -> c_int;

    fn control_value(
        &self,
        camera_id: c_int,
        control: sys::SVB_CONTROL_TYPE,
        value: &mut c_long,
        auto: &mut sys::SVB_BOOL,
    ) -> c_int;

    fn set_control_value(
        &self,
        camera_id: c_int,
        control: sys::SVB_CONTROL_TYPE,
        value: c_long,
        auto: sys::SVB_BOOL,
    ) -> c_int;

    fn output_image_type(&self, camera_id: c_int, image_type: &mut sys::SVB_IMG_TYPE) -> c_int;

    fn set_output_image_type(&self, camera_id: c_int, image_type: sys::SVB_IMG_TYPE) -> c_int;

    fn set_roi_format(
        &self,
        camera_id: c_int,
        start_x: c_int,
        start_y: c_int,
        width: c_int,
        height: c_int,
        bin: c_int,
    ) -> c_int;

    fn roi_format(
        &self,
        camera_id: c_int,
        start_x: &mut c_int,
        start_y: &mut c_int,
        width: &mut c_int,
        height: &mut c_int,
        bin: &mut c_int,
    ) -> c_int;

    fn dropped_frames(&self, camera_id: c_int, dropped: &mut c_int) -> c_int;

    fn start_video_capture(&self, camera_id: c_int) -> c_int;

    fn stop_video_capture(&self, camera_id: c_int) -> c_int;

    /// Fill `buffer` with the next frame. `wait_ms == -1` waits forever.
    fn video_data(&self, camera_id: c_int, buffer: &mut [u8], wait_ms: c_int) -> c_int;

    fn white_balance_once(&self, camera_id: c_int) -> c_int;

    fn firmware_version(&self, camera_id: c_int, version: &mut [c_char; sys::SVB_VERSION_BUFFER_LEN]) -> c_int;

    /// The SDK version string. A null pointer from the library becomes "".
    fn sdk_version(&self) -> String;

    fn supported_modes(&self, camera_id: c_int, modes: &mut sys::SVB_SUPPORTED_MODE) -> c_int;

    fn camera_mode(&self, camera_id: c_int, mode: &mut sys::SVB_CAMERA_MODE) -> c_int;

    fn set_camera_mode(&self, camera_id: c_int, mode: sys::SVB_CAMERA_MODE) -> c_int;

    fn send_soft_trigger(&self, camera_id: c_int) -> c_int;

    fn serial_number(&self, camera_id: c_int, serial: &mut sys::SVB_SN) -> c_int;

    fn set_trigger_output(
        &self,
        camera_id: c_int,
        pin: sys::SVB_TRIG_OUTPUT_PIN,
        pin_high: sys::SVB_BOOL,
        delay: c_long,
        duration: c_long,
    ) -> c_int;

    fn trigger_output(
        &self,
        camera_id: c_int,
        pin: sys::SVB_TRIG_OUTPUT_PIN,
        pin_high: &mut sys::SVB_BOOL,
        delay: &mut c_long,
        duration: &mut c_long,
    ) -> c_int;

    fn pulse_guide(&self, camera_id: c_int, direction: sys::SVB_GUIDE_DIRECTION, duration_ms: c_int) -> c_int;

    fn sensor_pixel_size(&self, camera_id: c_int, pixel_size: &mut f32) -> c_int;

    fn can_pulse_guide(&self, camera_id: c_int, can_guide: &mut sys::SVB_BOOL) -> c_int;

    fn set_auto_save_param(&self, camera_id: c_int, enable: sys::SVB_BOOL) -> c_int;

    fn needs_upgrade(
        &self,
        camera_id: c_int,
        needs_upgrade: &mut sys::SVB_BOOL,
        min_version: &mut [c_char; sys::SVB_VERSION_BUFFER_LEN],
    ) -> c_int;

    fn restore_default_param(&self, camera_id: c_int) -> c_int;
}

#[cfg(feature = "native")]
pub use native::NativeDriver;

#[cfg(feature = "native")]
mod native {
    use super::*;
    use svbony_sys::string_utils::c_str_to_string;

    /// Calls straight into the linked `SVBCameraSDK` library.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct NativeDriver;

    impl Driver for NativeDriver {
        fn num_connected_cameras(&self) -> c_int {
            unsafe { sys::SVBGetNumOfConnectedCameras() }
        }

        fn camera_info(&self, index: c_int, info: &mut sys::SVB_CAMERA_INFO) -> c_int {
            unsafe { sys::SVBGetCameraInfo(info, index) }
        }

        fn camera_property(&self, camera_id: c_int, property: &mut sys::SVB_CAMERA_PROPERTY) -> c_int {
            unsafe { sys::SVBGetCameraProperty(camera_id, property) }
        }

        fn camera_property_ex(&self, camera_id: c_int, property: &mut sys::SVB_CAMERA_PROPERTY_EX) -> c_int {
            unsafe { sys::SVBGetCameraPropertyEx(camera_id, property) }
        }

        fn open_camera(&self, camera_id: c_int) -> c_int {
            unsafe { sys::SVBOpenCamera(camera_id) }
        }

        fn close_camera(&self, camera_id: c_int) -> c_int {
            unsafe { sys::SVBCloseCamera(camera_id) }
        }

        fn num_controls(&self, camera_id: c_int, count: &mut c_int) -> c_int {
            unsafe { sys::SVBGetNumOfControls(camera_id, count) }
        }

        fn control_caps(&self, camera_id: c_int, index: c_int, caps: &mut sys::SVB_CONTROL_CAPS) -> c_int {
            unsafe { sys::SVBGetControlCaps(camera_id, index, caps) }
        }

        fn control_value(
            &self,
            camera_id: c_int,
            control: sys::SVB_CONTROL_TYPE,
            value: &mut c_long,
            auto: &mut sys::SVB_BOOL,
        ) -> c_int {
            unsafe { sys::SVBGetControlValue(camera_id, control, value, auto) }
        }

        fn set_control_value(
            &self,
            camera_id: c_int,
            control: sys::SVB_CONTROL_TYPE,
            value: c_long,
            auto: sys::SVB_BOOL,
        ) -> c_int {
            unsafe { sys::SVBSetControlValue(camera_id, control, value, auto) }
        }

        fn output_image_type(&self, camera_id: c_int, image_type: &mut sys::SVB_IMG_TYPE) -> c_int {
            unsafe { sys::SVBGetOutputImageType(camera_id, image_type) }
        }

        fn set_output_image_type(&self, camera_id: c_int, image_type: sys::SVB_IMG_TYPE) -> c_int {
            unsafe { sys::SVBSetOutputImageType(camera_id, image_type) }
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
            unsafe { sys::SVBSetROIFormat(camera_id, start_x, start_y, width, height, bin) }
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
            unsafe { sys::SVBGetROIFormat(camera_id, start_x, start_y, width, height, bin) }
        }

        fn dropped_frames(&self, camera_id: c_int, dropped: &mut c_int) -> c_int {
            unsafe { sys::SVBGetDroppedFrames(camera_id, dropped) }
        }

        fn start_video_capture(&self, camera_id: c_int) -> c_int {
            unsafe { sys::SVBStartVideoCapture(camera_id) }
        }

        fn stop_video_capture(&self, camera_id: c_int) -> c_int {
            unsafe { sys::SVBStopVideoCapture(camera_id) }
        }

        fn video_data(&self, camera_id: c_int, buffer: &mut [u8], wait_ms: c_int) -> c_int {
            // Callers validate the length against c_long before allocating.
            let len = buffer.len() as c_long;
            unsafe { sys::SVBGetVideoData(camera_id, buffer.as_mut_ptr(), len, wait_ms) }
        }

        fn white_balance_once(&self, camera_id: c_int) -> c_int {
            unsafe { sys::SVBWhiteBalanceOnce(camera_id) }
        }

        fn firmware_version(&self, camera_id: c_int, version: &mut [c_char; sys::SVB_VERSION_BUFFER_LEN]) -> c_int {
            unsafe { sys::SVBGetCameraFirmwareVersion(camera_id, version.as_mut_ptr()) }
        }

        fn sdk_version(&self) -> String {
            unsafe { c_str_to_string(sys::SVBGetSDKVersion()) }
        }

        fn supported_modes(&self, camera_id: c_int, modes: &mut sys::SVB_SUPPORTED_MODE) -> c_int {
            unsafe { sys::SVBGetCameraSupportMode(camera_id, modes) }
        }

        fn camera_mode(&self, camera_id: c_int, mode: &mut sys::SVB_CAMERA_MODE) -> c_int {
            unsafe { sys::SVBGetCameraMode(camera_id, mode) }
        }

        fn set_camera_mode(&self, camera_id: c_int, mode: sys::SVB_CAMERA_MODE) -> c_int {
            unsafe { sys::SVBSetCameraMode(camera_id, mode) }
        }

        fn send_soft_trigger(&self, camera_id: c_int) -> c_int {
            unsafe { sys::SVBSendSoftTrigger(camera_id) }
        }

        fn serial_number(&self, camera_id: c_int, serial: &mut sys::SVB_SN) -> c_int {
            unsafe { sys::SVBGetSerialNumber(camera_id, serial) }
        }

        fn set_trigger_output(
            &self,
            camera_id: c_int,
            pin: sys::SVB_TRIG_OUTPUT_PIN,
            pin_high: sys::SVB_BOOL,
            delay: c_long,
            duration: c_long,
        ) -> c_int {
            unsafe { sys::SVBSetTriggerOutputIOConf(camera_id, pin, pin_high, delay, duration) }
        }

        fn trigger_output(
            &self,
            camera_id: c_int,
            pin: sys::SVB_TRIG_OUTPUT_PIN,
            pin_high: &mut sys::SVB_BOOL,
            delay: &mut c_long,
            duration: &mut c_long,
        ) -> c_int {
            unsafe { sys::SVBGetTriggerOutputIOConf(camera_id, pin, pin_high, delay, duration) }
        }

        fn pulse_guide(&self, camera_id: c_int, direction: sys::SVB_GUIDE_DIRECTION, duration_ms: c_int) -> c_int {
            unsafe { sys::SVBPulseGuide(camera_id, direction, duration_ms) }
        }

        fn sensor_pixel_size(&self, camera_id: c_int, pixel_size: &mut f32) -> c_int {
            unsafe { sys::SVBGetSensorPixelSize(camera_id, pixel_size) }
        }

        fn can_pulse_guide(&self, camera_id: c_int, can_guide: &mut sys::SVB_BOOL) -> c_int {
            unsafe { sys::SVBCanPulseGuide(camera_id, can_guide) }
        }

        fn set_auto_save_param(&self, camera_id: c_int, enable: sys::SVB_BOOL) -> c_int {
            unsafe { sys::SVBSetAutoSaveParam(camera_id, enable) }
        }

        fn needs_upgrade(
            &self,
            camera_id: c_int,
            needs_upgrade: &mut sys::SVB_BOOL,
            min_version: &mut [c_char; sys::SVB_VERSION_BUFFER_LEN],
        ) -> c_int {
            unsafe { sys::SVBIsCameraNeedToUpgrade(camera_id, needs_upgrade, min_version.as_mut_ptr()) }
        }

        fn restore_default_param(&self, camera_id: c_int) -> c_int {
            unsafe { sys::SVBRestoreDefaultParam(camera_id) }
        }
    }
}
