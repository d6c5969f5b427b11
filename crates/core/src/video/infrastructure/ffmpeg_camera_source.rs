/// Live capture from a local camera through ffmpeg's `avdevice` inputs.
///
/// The capture backend is chosen per platform: `v4l2` on Linux,
/// `avfoundation` on macOS and `dshow` on Windows.
use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;

use super::ffmpeg_decoder::FfmpegDecoder;

#[cfg(target_os = "linux")]
const CAPTURE_FORMAT: &str = "v4l2";
#[cfg(target_os = "linux")]
const DEFAULT_DEVICE: Option<&str> = Some("/dev/video0");

#[cfg(target_os = "macos")]
const CAPTURE_FORMAT: &str = "avfoundation";
#[cfg(target_os = "macos")]
const DEFAULT_DEVICE: Option<&str> = Some("0");

#[cfg(target_os = "windows")]
const CAPTURE_FORMAT: &str = "dshow";
// dshow needs a device name such as "video=Integrated Camera".
#[cfg(target_os = "windows")]
const DEFAULT_DEVICE: Option<&str> = None;

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
const CAPTURE_FORMAT: &str = "v4l2";
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
const DEFAULT_DEVICE: Option<&str> = None;

/// Requested capture rate; some backends refuse to open without one.
const CAPTURE_FRAMERATE: &str = "30";

pub struct FfmpegCameraSource {
    device: String,
    decoder: Option<FfmpegDecoder>,
}

impl FfmpegCameraSource {
    /// Opens `device`, or the platform default camera when `None`.
    pub fn open(device: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;
        ffmpeg_next::device::register_all();

        let device = device
            .or(DEFAULT_DEVICE)
            .ok_or("No default camera on this platform; pass --camera")?
            .to_string();

        let format = ffmpeg_next::device::input::video()
            .find(|f| matches_format_name(f.name(), CAPTURE_FORMAT))
            .ok_or_else(|| format!("Capture backend '{CAPTURE_FORMAT}' is not available"))?;

        let mut options = ffmpeg_next::Dictionary::new();
        options.set("framerate", CAPTURE_FRAMERATE);

        log::info!("Starting video stream from {device} ({CAPTURE_FORMAT})");
        let ctx = ffmpeg_next::format::open_with(
            &device,
            &ffmpeg_next::format::Format::Input(format),
            options,
        )?;
        let ictx = match ctx {
            ffmpeg_next::format::context::Context::Input(ictx) => ictx,
            ffmpeg_next::format::context::Context::Output(_) => {
                return Err(format!("{device} did not open as a capture input").into())
            }
        };

        let decoder = FfmpegDecoder::new(ictx)?;
        Ok(Self {
            device,
            decoder: Some(decoder),
        })
    }
}

impl FrameSource for FfmpegCameraSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        match self.decoder.as_mut() {
            Some(decoder) => decoder.next_frame(),
            None => Ok(None),
        }
    }

    fn release(&mut self) {
        if self.decoder.take().is_some() {
            log::info!("Stopped video stream from {}", self.device);
        }
    }
}

/// ffmpeg registers some inputs under comma-separated aliases
/// (e.g. `"video4linux2,v4l2"`).
fn matches_format_name(registered: &str, wanted: &str) -> bool {
    registered.split(',').any(|alias| alias.trim() == wanted)
}
