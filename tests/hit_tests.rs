#![cfg(feature = "hit")]

/// Hardware integration tests. They need an SVBONY camera on the bus and the
/// vendor library, and run one at a time since they share the device.
#[cfg(test)]
mod hardware_integration_tests {
    use std::time::Duration;

    use serial_test::serial;
    use svbony::{ControlType, ImageType, RoiFormat, Sdk};

    fn sdk_with_camera() -> Sdk {
        let sdk = Sdk::new();
        assert!(
            sdk.num_connected_cameras() > 0,
            "No SVBONY camera found - ensure one is connected"
        );
        sdk
    }

    #[test]
    #[serial]
    fn test_enumerate_and_open() {
        let sdk = sdk_with_camera();
        println!("SDK version: {}", sdk.version());
        let info = sdk.camera_info(0).expect("camera info");
        assert!(!info.friendly_name.is_empty());

        let camera = sdk.open(info.camera_id).expect("open camera");
        let property = camera.property().expect("property");
        assert!(property.max_width > 0 && property.max_height > 0);
        assert!(property.supports_bin(1));
        println!("{} {}x{}", info.friendly_name, property.max_width, property.max_height);
        camera.close().expect("close camera");
    }

    #[test]
    #[serial]
    fn test_controls_are_readable() {
        let sdk = sdk_with_camera();
        let camera = sdk.open_index(0).expect("open camera");
        for caps in camera.controls().expect("controls") {
            let (value, auto) = camera.control_value(caps.control_type).expect("control value");
            println!("{:<24} {value} (auto: {auto})", caps.name);
        }
        camera.set_control_value(ControlType::Exposure, 10_000, false).expect("set exposure");
    }

    #[test]
    #[serial]
    fn test_capture_one_frame() {
        let sdk = sdk_with_camera();
        let camera = sdk.open_index(0).expect("open camera");
        let property = camera.property().expect("property");

        camera
            .set_roi_format(RoiFormat::full_frame(property.max_width, property.max_height, 1))
            .expect("set ROI");
        camera.set_output_image_type(ImageType::Raw8).expect("set image type");
        camera.set_control_value(ControlType::Exposure, 10_000, false).expect("set exposure");

        let mut capture = camera.capture().expect("start capture");
        let frame = capture.next_frame(Some(Duration::from_secs(5))).expect("frame");
        assert_eq!(frame.width as i64, property.max_width);
        assert_eq!(frame.data.len(), (property.max_width * property.max_height) as usize);
        capture.stop().expect("stop capture");
    }

    #[test]
    #[serial]
    fn test_invalid_buffer_never_reaches_sdk() {
        let sdk = sdk_with_camera();
        let camera = sdk.open_index(0).expect("open camera");
        assert!(camera.video_data(0, Some(Duration::from_millis(10))).is_err());
        assert!(camera.video_data(-1, Some(Duration::from_millis(10))).is_err());
    }
}
