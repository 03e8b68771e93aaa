use std::os::raw::c_long;
use std::time::Duration;

use log::{debug, warn};

use crate::common::ImageType;
use crate::device::Camera;
use crate::error::{Result, SvbError};
use crate::frame::Frame;

/// Check a caller-supplied video buffer size and return it as a length.
pub fn validate_buffer_size(buffer_size: i64) -> Result<usize> {
    if buffer_size <= 0 || c_long::try_from(buffer_size).is_err() {
        return Err(SvbError::InvalidBufferSize(buffer_size));
    }
    usize::try_from(buffer_size).map_err(|_| SvbError::InvalidBufferSize(buffer_size))
}

/// Bytes needed for one `width` x `height` frame of `image_type`.
///
/// Fails with `InvalidBufferSize` when the size does not fit in `usize`.
pub fn frame_buffer_size(width: u32, height: u32, image_type: ImageType) -> Result<usize> {
    let bytes_per_pixel = image_type.bytes_per_pixel();
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(bytes_per_pixel))
        .ok_or_else(|| {
            let wanted = (u64::from(width) * u64::from(height)).saturating_mul(bytes_per_pixel as u64);
            SvbError::InvalidBufferSize(i64::try_from(wanted).unwrap_or(i64::MAX))
        })
}

fn roi_dimension(value: i32, what: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| SvbError::InvalidArgument(format!("ROI {what} {value}")))
}

/// Running video capture. Capture is stopped when the guard is dropped.
///
/// The frame geometry is read once when capture starts; the SDK refuses ROI
/// and image type changes until capture is stopped.
pub struct VideoCapture<'a> {
    camera: &'a Camera,
    width: u32,
    height: u32,
    image_type: ImageType,
    buffer_size: i64,
    stopped: bool,
}

impl Camera {
    /// Start video capture and return a guard that reads frames.
    pub fn capture(&self) -> Result<VideoCapture<'_>> {
        let roi = self.roi_format()?;
        let image_type = self.output_image_type()?;
        let width = roi_dimension(roi.width, "width")?;
        let height = roi_dimension(roi.height, "height")?;
        let size = frame_buffer_size(width, height, image_type)?;
        let buffer_size = i64::try_from(size).map_err(|_| SvbError::InvalidBufferSize(i64::MAX))?;

        self.start_video_capture()?;
        Ok(VideoCapture {
            camera: self,
            width,
            height,
            image_type,
            buffer_size,
            stopped: false,
        })
    }
}

impl VideoCapture<'_> {
    pub fn camera(&self) -> &Camera {
        self.camera
    }

    /// `(width, height, image_type)` of the frames this capture returns.
    pub fn geometry(&self) -> (u32, u32, ImageType) {
        (self.width, self.height, self.image_type)
    }

    /// Wait for the next frame.
    pub fn next_frame(&mut self, wait: Option<Duration>) -> Result<Frame> {
        let data = self.camera.video_data(self.buffer_size, wait)?;
        debug!(
            "camera {}: frame {}x{} {}",
            self.camera.id(),
            self.width,
            self.height,
            self.image_type
        );
        Frame::new(self.width, self.height, self.image_type, data)
    }

    /// Stop capture and report the SDK result.
    pub fn stop(mut self) -> Result<()> {
        self.stopped = true;
        self.camera.stop_video_capture()
    }
}

impl Drop for VideoCapture<'_> {
    fn drop(&mut self) {
        if self.stopped {
            return;
        }
        if let Err(err) = self.camera.stop_video_capture() {
            warn!("stopping capture on camera {} failed: {err}", self.camera.id());
        }
    }
}
