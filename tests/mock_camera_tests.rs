/// End-to-end tests of the safe API against the in-memory driver.
#[cfg(test)]
mod mock_camera_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use svbony::bindings as sys;
    use svbony::mock::{MockCamera, MockDriver};
    use svbony::{
        CameraConfig, CameraMode, ControlType, ErrorCode, ImageType, RoiFormat, Sdk, SvbError, TriggerOutputConfig,
        TriggerOutputPin,
    };

    fn setup(driver: MockDriver) -> (Sdk, Arc<MockDriver>) {
        let driver = Arc::new(driver);
        (Sdk::with_driver(driver.clone()), driver)
    }

    fn two_cameras() -> MockDriver {
        MockDriver::empty()
            .with_camera(MockCamera::color(0))
            .with_camera(MockCamera::mono_trigger(1))
    }

    #[test]
    fn test_enumerate_cameras() {
        let (sdk, _) = setup(two_cameras());
        let cameras = sdk.cameras().expect("enumerate");
        assert_eq!(cameras.len(), 2);
        assert_eq!(cameras[0].friendly_name, "SVBONY SV305");
        assert_eq!(cameras[1].camera_id, 1);
        assert_eq!(cameras[1].port_type, "USB3.0");
    }

    #[test]
    fn test_camera_info_out_of_range() {
        let (sdk, _) = setup(MockDriver::new());
        match sdk.camera_info(5) {
            Err(SvbError::Sdk(ErrorCode::InvalidIndex)) => {}
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_sdk_version() {
        let (sdk, _) = setup(MockDriver::new().with_sdk_version("1.12.0"));
        assert_eq!(sdk.version(), "1.12.0");
    }

    #[test]
    fn test_property_marshaling() {
        let (sdk, _) = setup(two_cameras());
        let camera = sdk.open(1).unwrap();
        let property = camera.property().unwrap();
        assert_eq!(property.max_width, 1280);
        assert_eq!(property.supported_bins, vec![1, 2, 4]);
        assert_eq!(
            property.supported_video_format,
            vec![ImageType::Raw8, ImageType::Raw16, ImageType::Y8, ImageType::Y16]
        );
        assert!(property.is_trigger_cam);
        assert!(!property.is_color_cam);

        let ex = camera.property_ex().unwrap();
        assert!(ex.supports_pulse_guide);
        assert!(ex.supports_control_temp);

        let json = serde_json::to_value(&property).unwrap();
        assert_eq!(json["MaxWidth"], 1280);
        assert_eq!(json["SupportedBins"], serde_json::json!([1, 2, 4]));
    }

    #[test]
    fn test_controls_listing() {
        let (sdk, _) = setup(MockDriver::new());
        let camera = sdk.open(0).unwrap();
        let controls = camera.controls().unwrap();
        assert_eq!(controls.len(), camera.num_controls().unwrap());
        let exposure = controls
            .iter()
            .find(|c| c.control_type == ControlType::Exposure)
            .expect("exposure control");
        assert_eq!(exposure.name, "Exposure");
        assert!(exposure.is_auto_supported);
    }

    #[test]
    fn test_out_of_range_control_is_rejected_by_sdk() {
        let (sdk, _) = setup(MockDriver::new());
        let camera = sdk.open(0).unwrap();
        let err = camera.set_control_value(ControlType::Gain, 10_000, false).unwrap_err();
        assert_eq!(err.code(), sys::SVB_ERROR_GENERAL_ERROR);
    }

    #[test]
    fn test_video_data_rejects_bad_sizes_before_sdk_call() {
        let (sdk, driver) = setup(MockDriver::new().with_call_log());
        let camera = sdk.open(0).unwrap();
        camera.start_video_capture().unwrap();
        for size in [0, -1, -4096] {
            match camera.video_data(size, Some(Duration::from_millis(10))) {
                Err(SvbError::InvalidBufferSize(s)) => assert_eq!(s, size),
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(driver.call_count("SVBGetVideoData"), 0);
    }

    #[test]
    fn test_video_data_buffer_too_small() {
        let (sdk, _) = setup(MockDriver::new());
        let camera = sdk.open(0).unwrap();
        camera.start_video_capture().unwrap();
        let err = camera.video_data(16, None).unwrap_err();
        assert!(matches!(err, SvbError::Sdk(ErrorCode::BufferTooSmall)));
    }

    #[test]
    fn test_capture_frames_with_roi() {
        let (sdk, driver) = setup(MockDriver::new());
        let camera = sdk.open(0).unwrap();
        camera.set_roi_format(RoiFormat::new(8, 4, 64, 32, 2)).unwrap();
        camera.set_output_image_type(ImageType::Rgb24).unwrap();

        {
            let mut capture = camera.capture().unwrap();
            assert!(driver.is_capturing(0));
            for n in 0..3u64 {
                let frame = capture.next_frame(Some(Duration::from_millis(100))).unwrap();
                assert_eq!((frame.width, frame.height), (64, 32));
                assert_eq!(frame.data.len(), 64 * 32 * 3);
                assert_eq!(frame.data[5], MockDriver::expected_pixel(n, 5));
            }
        }
        assert!(!driver.is_capturing(0));
    }

    #[test]
    fn test_capture_reads_geometry_once() {
        let (sdk, driver) = setup(MockDriver::new().with_call_log());
        let camera = sdk.open(0).unwrap();
        camera.set_roi_format(RoiFormat::new(0, 0, 320, 240, 1)).unwrap();
        camera.set_output_image_type(ImageType::Raw12).unwrap();

        let mut capture = camera.capture().unwrap();
        assert_eq!(capture.geometry(), (320, 240, ImageType::Raw12));
        for _ in 0..5 {
            let frame = capture.next_frame(Some(Duration::from_millis(10))).unwrap();
            assert_eq!(frame.len(), 320 * 240 * 2);
        }
        capture.stop().unwrap();

        assert_eq!(driver.call_count("SVBGetVideoData"), 5);
        assert_eq!(driver.call_count("SVBGetROIFormat"), 1);
        assert_eq!(driver.call_count("SVBGetOutputImageType"), 1);
    }

    #[test]
    fn test_roi_change_refused_while_capturing() {
        let (sdk, _) = setup(MockDriver::new());
        let camera = sdk.open(0).unwrap();
        let capture = camera.capture().unwrap();
        let err = camera.set_roi_format(RoiFormat::new(0, 0, 640, 480, 1)).unwrap_err();
        assert!(matches!(err, SvbError::Sdk(ErrorCode::VideoModeActive)));
        capture.stop().unwrap();
        camera.set_roi_format(RoiFormat::new(0, 0, 640, 480, 1)).unwrap();
        assert_eq!(camera.roi_format().unwrap(), RoiFormat::new(0, 0, 640, 480, 1));
    }

    #[test]
    fn test_soft_trigger_flow() {
        let (sdk, _) = setup(two_cameras());
        let camera = sdk.open(1).unwrap();
        let modes = camera.supported_modes().unwrap();
        assert!(modes.contains(CameraMode::SoftTrigger));
        assert!(!modes.contains(CameraMode::LowLevel));

        camera.set_camera_mode(CameraMode::SoftTrigger).unwrap();
        assert_eq!(camera.camera_mode().unwrap(), CameraMode::SoftTrigger);
        camera.set_roi_format(RoiFormat::new(0, 0, 320, 240, 4)).unwrap();

        let mut capture = capture_with_timeout_check(&camera);
        camera.send_soft_trigger().unwrap();
        let frame = capture.next_frame(Some(Duration::from_millis(100))).unwrap();
        assert_eq!(frame.image_type, ImageType::Raw8);
    }

    fn capture_with_timeout_check(camera: &svbony::Camera) -> svbony::VideoCapture<'_> {
        let mut capture = camera.capture().unwrap();
        let err = capture.next_frame(Some(Duration::from_millis(1))).unwrap_err();
        assert!(err.is_timeout());
        capture
    }

    #[test]
    fn test_unsupported_mode() {
        let (sdk, _) = setup(MockDriver::new());
        let camera = sdk.open(0).unwrap();
        let err = camera.set_camera_mode(CameraMode::RiseEdge).unwrap_err();
        assert_eq!(err.code(), sys::SVB_ERROR_INVALID_MODE);
    }

    #[test]
    fn test_trigger_output_round_trip() {
        let (sdk, _) = setup(two_cameras());
        let camera = sdk.open(1).unwrap();
        let config = TriggerOutputConfig::new(true, 1_000, 20_000);
        camera.set_trigger_output(TriggerOutputPin::PinA, config).unwrap();
        assert_eq!(camera.trigger_output(TriggerOutputPin::PinA).unwrap(), config);
        assert_eq!(
            camera.trigger_output(TriggerOutputPin::PinB).unwrap(),
            TriggerOutputConfig::disabled()
        );
    }

    #[test]
    fn test_serial_firmware_and_upgrade() {
        let mut cam = MockCamera::color(0);
        cam.upgrade_min_version = Some("1.1.0".to_owned());
        let (sdk, _) = setup(MockDriver::empty().with_camera(cam));
        let camera = sdk.open(0).unwrap();
        assert_eq!(camera.serial_number().unwrap().id, "SV305000");
        assert_eq!(camera.firmware_version().unwrap(), "1.0.2");
        let status = camera.needs_upgrade().unwrap();
        assert!(status.needs_upgrade);
        assert_eq!(status.min_version, "1.1.0");
        assert!((camera.sensor_pixel_size().unwrap() - 2.9).abs() < f32::EPSILON);
        assert!(!camera.can_pulse_guide().unwrap());
    }

    #[test]
    fn test_restore_default_param() {
        let (sdk, _) = setup(MockDriver::new());
        let camera = sdk.open(0).unwrap();
        camera.set_control_value(ControlType::Gain, 300, false).unwrap();
        camera.set_output_image_type(ImageType::Rgb32).unwrap();
        camera.restore_default_param().unwrap();
        assert_eq!(camera.control_value(ControlType::Gain).unwrap(), (10, false));
        assert_eq!(camera.output_image_type().unwrap(), ImageType::Raw8);
    }

    #[test]
    fn test_apply_config_order_and_stop_on_error() {
        let (sdk, driver) = setup(MockDriver::new().with_call_log());
        let camera = sdk.open(0).unwrap();
        let config = CameraConfig {
            roi: Some(RoiFormat::new(0, 0, 800, 600, 1)),
            image_type: Some(ImageType::Raw12),
            auto_save_param: Some(true),
            ..Default::default()
        }
        .with_control(ControlType::Exposure, 20_000, false)
        .with_control(ControlType::Gain, 99_999, false);

        assert!(camera.apply_config(&config).is_err());
        let calls: Vec<_> = driver
            .calls()
            .into_iter()
            .filter(|c| c.starts_with("SVBSet"))
            .collect();
        assert_eq!(
            calls,
            vec![
                "SVBSetROIFormat",
                "SVBSetOutputImageType",
                "SVBSetControlValue",
                "SVBSetControlValue"
            ]
        );
        assert!(!driver.auto_save(0));
    }

    #[test]
    fn test_snapshot_then_apply() {
        let (sdk, _) = setup(two_cameras());
        let camera = sdk.open(1).unwrap();
        camera.set_control_value(ControlType::Gain, 200, false).unwrap();
        let snapshot = camera.snapshot_config().unwrap();
        assert_eq!(snapshot.mode, Some(CameraMode::Normal));
        assert!(
            snapshot
                .controls
                .iter()
                .all(|c| c.control != ControlType::CurrentTemperature)
        );

        camera.restore_default_param().unwrap();
        camera.apply_config(&snapshot).unwrap();
        assert_eq!(camera.control_value(ControlType::Gain).unwrap(), (200, false));
    }

    #[test]
    fn test_dropped_frames() {
        let (sdk, driver) = setup(MockDriver::new());
        let camera = sdk.open(0).unwrap();
        driver.drop_frames(0, 3);
        assert_eq!(camera.dropped_frames().unwrap(), 3);
    }

    #[test]
    fn test_closed_camera_reports_sdk_error() {
        let (sdk, driver) = setup(MockDriver::new());
        let camera = sdk.open(0).unwrap();
        driver.fail("SVBGetOutputImageType", sys::SVB_ERROR_CAMERA_REMOVED);
        match camera.output_image_type() {
            Err(SvbError::Sdk(ErrorCode::CameraRemoved)) => {}
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_full_length_bins_and_modes_without_sentinel() {
        let all_modes = [
            CameraMode::Normal,
            CameraMode::SoftTrigger,
            CameraMode::RiseEdge,
            CameraMode::FallEdge,
            CameraMode::DoubleEdge,
            CameraMode::HighLevel,
            CameraMode::LowLevel,
        ];
        let mut spec = MockCamera::mono_trigger(0);
        spec.bins = (1..=16).collect();
        spec.modes = all_modes.iter().copied().cycle().take(16).collect();
        let (sdk, _) = setup(MockDriver::empty().with_camera(spec.clone()));
        let camera = sdk.open(0).unwrap();

        let property = camera.property().unwrap();
        assert_eq!(property.supported_bins, spec.bins);
        assert!(property.supports_bin(16));

        let modes = camera.supported_modes().unwrap();
        assert_eq!(modes.modes.len(), 16);
        assert_eq!(modes.modes, spec.modes);
        assert_eq!(modes.modes[15], CameraMode::SoftTrigger);
    }
}
