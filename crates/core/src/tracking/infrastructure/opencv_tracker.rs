/// Visual object trackers backed by OpenCV's `tracking` and `video` modules.
///
/// CSRT, KCF and MIL use the current tracker API directly. Boosting, TLD,
/// MedianFlow and MOSSE only exist in the legacy API and are wrapped with
/// `upgrade_tracking_api` so every kind exposes the same interface.
use opencv::core::{Ptr, Rect};
use opencv::prelude::*;
use opencv::{tracking, video};

use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;
use crate::shared::opencv_mat::frame_to_bgr_mat;
use crate::tracking::domain::object_tracker::{ObjectTracker, TrackerFactory};
use crate::tracking::domain::tracker_kind::TrackerKind;

pub struct OpenCvTracker {
    inner: Ptr<video::Tracker>,
    kind: TrackerKind,
    initialized: bool,
}

impl OpenCvTracker {
    pub fn new(kind: TrackerKind) -> Result<Self, Box<dyn std::error::Error>> {
        let inner = create_tracker(kind)?;
        Ok(Self {
            inner,
            kind,
            initialized: false,
        })
    }

    pub fn kind(&self) -> TrackerKind {
        self.kind
    }
}

impl ObjectTracker for OpenCvTracker {
    fn init(&mut self, frame: &Frame, bbox: BoundingBox) -> Result<(), Box<dyn std::error::Error>> {
        let mat = frame_to_bgr_mat(frame)?;
        self.inner.init(&mat, Rect::from(bbox))?;
        self.initialized = true;
        Ok(())
    }

    fn update(&mut self, frame: &Frame) -> Result<(bool, BoundingBox), Box<dyn std::error::Error>> {
        if !self.initialized {
            return Err(format!("{} tracker updated before init", self.kind).into());
        }
        let mat = frame_to_bgr_mat(frame)?;
        let mut rect = Rect::default();
        let ok = self.inner.update(&mat, &mut rect)?;
        Ok((ok, BoundingBox::from(rect)))
    }
}

/// Creates [`OpenCvTracker`]s on demand for the tracker set.
#[derive(Default)]
pub struct OpenCvTrackerFactory;

impl OpenCvTrackerFactory {
    pub fn new() -> Self {
        Self
    }
}

impl TrackerFactory for OpenCvTrackerFactory {
    fn create(&self, kind: TrackerKind) -> Result<Box<dyn ObjectTracker>, Box<dyn std::error::Error>> {
        Ok(Box::new(OpenCvTracker::new(kind)?))
    }
}

fn create_tracker(kind: TrackerKind) -> opencv::Result<Ptr<video::Tracker>> {
    match kind {
        TrackerKind::Csrt => {
            let params = tracking::TrackerCSRT_Params::default()?;
            Ok(tracking::TrackerCSRT::create(&params)?.into())
        }
        TrackerKind::Kcf => {
            let params = tracking::TrackerKCF_Params::default()?;
            Ok(tracking::TrackerKCF::create(params)?.into())
        }
        TrackerKind::Mil => {
            let params = video::TrackerMIL_Params::default()?;
            Ok(video::TrackerMIL::create(params)?.into())
        }
        TrackerKind::Boosting => {
            let params = tracking::legacy_TrackerBoosting_Params::default()?;
            upgrade(tracking::legacy_TrackerBoosting::create(&params)?.into())
        }
        TrackerKind::Tld => {
            let params = tracking::legacy_TrackerTLD_Params::default()?;
            upgrade(tracking::legacy_TrackerTLD::create(&params)?.into())
        }
        TrackerKind::MedianFlow => {
            let params = tracking::legacy_TrackerMedianFlow_Params::default()?;
            upgrade(tracking::legacy_TrackerMedianFlow::create(&params)?.into())
        }
        TrackerKind::Mosse => upgrade(tracking::legacy_TrackerMOSSE::create()?.into()),
    }
}

fn upgrade(legacy: Ptr<tracking::legacy_Tracker>) -> opencv::Result<Ptr<video::Tracker>> {
    tracking::upgrade_tracking_api(&legacy)
}
