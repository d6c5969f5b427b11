use crate::display::domain::display::{Display, Key};
use crate::recognition::identity_matcher::LazyIdentityMatcher;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::constants::{DEFAULT_KEY_DELAY_MS, DEFAULT_PROCESSING_WIDTH};
use crate::shared::frame::Frame;
use crate::tracking::domain::tracker_kind::TrackerKind;
use crate::tracking::tracker_set::TrackerSet;
use crate::video::domain::frame_source::FrameSource;

use super::background_recognizer::BackgroundRecognizer;

/// Settings for one interactive session.
#[derive(Clone, Debug)]
pub struct TrackingConfig {
    /// Algorithm used for every tracker added during the session.
    pub tracker_kind: TrackerKind,
    pub processing_width: u32,
    pub key_delay_ms: i32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            tracker_kind: TrackerKind::default(),
            processing_width: DEFAULT_PROCESSING_WIDTH,
            key_delay_ms: DEFAULT_KEY_DELAY_MS,
        }
    }
}

/// Counters reported when the loop ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames: usize,
    pub trackers_added: usize,
    pub recognition_runs: usize,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} frame(s), {} tracker(s) added, {} recognition run(s)",
            self.frames, self.trackers_added, self.recognition_runs
        )
    }
}

/// How `r` is served: inline on the loop thread, or on a worker. Either way
/// the models are only loaded on the first request.
pub enum Recognition {
    Blocking(LazyIdentityMatcher),
    Background(BackgroundRecognizer),
}

/// Keyboard-driven tracking loop.
///
/// Each iteration reads a frame, advances every tracker, shows the frame with
/// their boxes and polls one key: `s` adds a tracker from a drawn rectangle, `r` adds
/// trackers from known-identity matches, `q` quits. The frame source and the
/// window are released however the loop ends.
pub struct InteractiveTrackingUseCase {
    source: Box<dyn FrameSource>,
    display: Box<dyn Display>,
    trackers: TrackerSet,
    recognition: Recognition,
    config: TrackingConfig,
}

impl InteractiveTrackingUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        display: Box<dyn Display>,
        trackers: TrackerSet,
        recognition: Recognition,
        config: TrackingConfig,
    ) -> Self {
        Self {
            source,
            display,
            trackers,
            recognition,
            config,
        }
    }

    pub fn execute(&mut self) -> Result<SessionSummary, Box<dyn std::error::Error>> {
        let mut summary = SessionSummary::default();
        let result = self.run_loop(&mut summary);

        if let Recognition::Background(ref mut worker) = self.recognition {
            worker.shutdown();
        }
        self.source.release();
        self.display.close();

        result.map(|()| summary)
    }

    fn run_loop(&mut self, summary: &mut SessionSummary) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            let Some(raw) = self.source.next_frame()? else {
                log::info!("End of stream");
                return Ok(());
            };
            let frame = raw.resized_to_width(self.config.processing_width)?;

            self.apply_background_results(summary)?;

            // Boxes are drawn by the display only; trackers see clean pixels.
            let update = self.trackers.update(&frame)?;
            self.display.show(&frame, &update.boxes)?;
            summary.frames += 1;

            match self.display.poll_key(self.config.key_delay_ms)? {
                Some(Key::Select) => self.select(&frame, &update.boxes, summary)?,
                Some(Key::Recognize) => self.recognize(&frame, summary)?,
                Some(Key::Quit) => {
                    log::info!("Quit requested");
                    return Ok(());
                }
                Some(Key::Other(_)) | None => {}
            }
        }
    }

    fn select(
        &mut self,
        frame: &Frame,
        shown: &[BoundingBox],
        summary: &mut SessionSummary,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let bbox = self.display.select_box(frame, shown)?;
        if bbox.is_empty() {
            log::info!("Selection cancelled");
            return Ok(());
        }
        self.add_trackers(frame, &[bbox], summary)
    }

    fn recognize(
        &mut self,
        frame: &Frame,
        summary: &mut SessionSummary,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match self.recognition {
            Recognition::Blocking(ref mut matcher) => {
                summary.recognition_runs += 1;
                let boxes = matcher.recognize(frame)?;
                self.add_trackers(frame, &boxes, summary)
            }
            Recognition::Background(ref mut worker) => {
                if worker.submit(frame.clone())? {
                    summary.recognition_runs += 1;
                    log::info!("Recognition started on frame {}", frame.index());
                } else {
                    log::info!("Recognition already running, ignoring request");
                }
                Ok(())
            }
        }
    }

    fn apply_background_results(
        &mut self,
        summary: &mut SessionSummary,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let Recognition::Background(ref mut worker) = self.recognition else {
            return Ok(());
        };
        let Some(outcome) = worker.try_take() else {
            return Ok(());
        };
        let boxes = outcome.boxes.map_err(|e| e.to_string())?;
        self.add_trackers(&outcome.frame, &boxes, summary)
    }

    fn add_trackers(
        &mut self,
        frame: &Frame,
        boxes: &[BoundingBox],
        summary: &mut SessionSummary,
    ) -> Result<(), Box<dyn std::error::Error>> {
        for &bbox in boxes {
            self.trackers.add(self.config.tracker_kind, frame, bbox)?;
            summary.trackers_added += 1;
        }
        if !boxes.is_empty() {
            log::info!("Tracking {} object(s)", self.trackers.len());
        }
        Ok(())
    }
}
