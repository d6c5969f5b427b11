use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::recognition::identity_matcher::LazyIdentityMatcher;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

type SendError = Box<dyn std::error::Error + Send + Sync>;

/// Boxes found by a finished background run, paired with the frame they
/// were found in so trackers can be initialized on the right pixels.
pub struct RecognitionOutcome {
    pub frame: Frame,
    pub boxes: Result<Vec<BoundingBox>, SendError>,
}

/// Runs identity matching on a worker thread, one request at a time.
///
/// Layout: `controller → request channel → worker → result channel → controller`
///
/// Tracker state never leaves the controller thread; the worker only turns
/// frames into boxes.
pub struct BackgroundRecognizer {
    request_tx: Option<crossbeam_channel::Sender<Frame>>,
    result_rx: crossbeam_channel::Receiver<RecognitionOutcome>,
    cancelled: Arc<AtomicBool>,
    handle: Option<JoinHandle<LazyIdentityMatcher>>,
    in_flight: bool,
}

impl BackgroundRecognizer {
    /// Starts the worker. A lazy matcher is built on the worker thread when
    /// the first request arrives.
    pub fn spawn(matcher: LazyIdentityMatcher) -> Self {
        let (request_tx, request_rx) = crossbeam_channel::bounded::<Frame>(1);
        let (result_tx, result_rx) = crossbeam_channel::bounded::<RecognitionOutcome>(1);
        let cancelled = Arc::new(AtomicBool::new(false));
        let handle = spawn_worker(matcher, request_rx, result_tx, cancelled.clone());

        Self {
            request_tx: Some(request_tx),
            result_rx,
            cancelled,
            handle: Some(handle),
            in_flight: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Queues `frame` for matching. Returns `false` without queueing when a
    /// request is already in flight.
    pub fn submit(&mut self, frame: Frame) -> Result<bool, Box<dyn std::error::Error>> {
        if self.in_flight {
            return Ok(false);
        }
        let tx = self
            .request_tx
            .as_ref()
            .ok_or("background recognizer already shut down")?;
        tx.send(frame)
            .map_err(|_| "background recognition worker exited")?;
        self.in_flight = true;
        Ok(true)
    }

    /// Takes a finished result if one is ready. Never blocks.
    pub fn try_take(&mut self) -> Option<RecognitionOutcome> {
        let outcome = self.result_rx.try_recv().ok()?;
        self.in_flight = false;
        Some(outcome)
    }

    /// Cancels pending work and joins the worker. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
        self.request_tx.take();
        // Unblock a worker waiting to hand over its last result.
        while self.result_rx.try_recv().is_ok() {}
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Background recognition worker panicked");
            }
        }
        self.in_flight = false;
    }
}

impl Drop for BackgroundRecognizer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn spawn_worker(
    mut matcher: LazyIdentityMatcher,
    request_rx: crossbeam_channel::Receiver<Frame>,
    result_tx: crossbeam_channel::Sender<RecognitionOutcome>,
    cancelled: Arc<AtomicBool>,
) -> JoinHandle<LazyIdentityMatcher> {
    std::thread::spawn(move || {
        for frame in request_rx {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            let boxes = matcher
                .recognize(&frame)
                .map_err(|e| -> SendError { e.to_string().into() });
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            if result_tx.send(RecognitionOutcome { frame, boxes }).is_err() {
                break;
            }
        }
        matcher
    })
}
