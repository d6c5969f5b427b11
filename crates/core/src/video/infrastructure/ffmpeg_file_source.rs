use std::path::{Path, PathBuf};

use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;

use super::ffmpeg_decoder::FfmpegDecoder;

/// Frames from a video file decoded via ffmpeg-next.
pub struct FfmpegFileSource {
    path: PathBuf,
    decoder: Option<FfmpegDecoder>,
}

impl FfmpegFileSource {
    pub fn open(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;
        let ictx = ffmpeg_next::format::input(path)?;
        let decoder = FfmpegDecoder::new(ictx)?;
        log::info!("Opened video file {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            decoder: Some(decoder),
        })
    }
}

impl FrameSource for FfmpegFileSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        match self.decoder.as_mut() {
            Some(decoder) => decoder.next_frame(),
            None => Ok(None),
        }
    }

    fn release(&mut self) {
        if self.decoder.take().is_some() {
            log::debug!("Closed video file {}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::infrastructure::ffmpeg_decoder::test_support::create_test_video;

    #[test]
    fn test_yields_frames_then_end_of_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.mp4");
        create_test_video(&path, 3, 160, 120, 30);

        let mut source = FfmpegFileSource::open(&path).unwrap();
        for i in 0..3 {
            let frame = source.next_frame().unwrap().unwrap();
            assert_eq!(frame.index(), i);
            assert_eq!((frame.width(), frame.height()), (160, 120));
        }
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_open_nonexistent_is_error() {
        assert!(FfmpegFileSource::open(Path::new("/nonexistent/test.mp4")).is_err());
    }

    #[test]
    fn test_released_source_reports_end_of_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.mp4");
        create_test_video(&path, 2, 32, 32, 30);

        let mut source = FfmpegFileSource::open(&path).unwrap();
        source.release();
        source.release();
        assert!(source.next_frame().unwrap().is_none());
    }
}
