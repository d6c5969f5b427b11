use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

use super::domain::object_tracker::{ObjectTracker, TrackerFactory};
use super::domain::tracker_kind::TrackerKind;

/// What happens to a tracker after it reports a lost target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Lost trackers keep their slot for the rest of the session.
    #[default]
    Keep,
    /// Lost trackers are removed right after the update that lost them.
    DropLost,
}

/// Outcome of advancing every tracker by one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackerUpdate {
    /// True only if every tracker succeeded (vacuously true when empty).
    pub success: bool,
    /// One box per surviving tracker, in insertion order.
    pub boxes: Vec<BoundingBox>,
    pub evicted: usize,
}

struct TrackerSlot {
    tracker: Box<dyn ObjectTracker>,
    kind: TrackerKind,
    last_box: BoundingBox,
}

/// Insertion-ordered collection of independent trackers.
///
/// Owned by the controller; there is no global tracker state.
pub struct TrackerSet {
    factory: Box<dyn TrackerFactory>,
    slots: Vec<TrackerSlot>,
    eviction: EvictionPolicy,
}

impl TrackerSet {
    pub fn new(factory: Box<dyn TrackerFactory>, eviction: EvictionPolicy) -> Self {
        Self {
            factory,
            slots: Vec::new(),
            eviction,
        }
    }

    /// Creates a tracker of `kind` anchored at `bbox` within `frame`.
    ///
    /// The box is not checked against the frame bounds; whatever the
    /// tracking library makes of it is reported as an error.
    pub fn add(
        &mut self,
        kind: TrackerKind,
        frame: &Frame,
        bbox: BoundingBox,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut tracker = self.factory.create(kind)?;
        tracker.init(frame, bbox)?;
        self.slots.push(TrackerSlot {
            tracker,
            kind,
            last_box: bbox,
        });
        log::debug!(
            "Added {kind} tracker #{} at {bbox} on frame {}",
            self.slots.len(),
            frame.index()
        );
        Ok(())
    }

    pub fn update(&mut self, frame: &Frame) -> Result<TrackerUpdate, Box<dyn std::error::Error>> {
        let mut success = true;
        let mut lost = vec![false; self.slots.len()];

        for (i, slot) in self.slots.iter_mut().enumerate() {
            let (ok, bbox) = slot.tracker.update(frame)?;
            if ok {
                slot.last_box = bbox;
            } else {
                success = false;
                lost[i] = true;
                log::trace!("{} tracker #{} lost its target", slot.kind, i + 1);
            }
        }

        let mut evicted = 0;
        if self.eviction == EvictionPolicy::DropLost && lost.contains(&true) {
            let before = self.slots.len();
            let mut flags = lost.iter();
            self.slots.retain(|_| !flags.next().copied().unwrap_or(false));
            evicted = before - self.slots.len();
            log::info!("Dropped {evicted} lost tracker(s), {} remaining", self.slots.len());
        }

        Ok(TrackerUpdate {
            success,
            boxes: self.slots.iter().map(|s| s.last_box).collect(),
            evicted,
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    /// Moves its box one pixel right per frame; fails on the listed frames.
    struct DriftingTracker {
        bbox: Option<BoundingBox>,
        fail_on: Vec<usize>,
    }

    impl ObjectTracker for DriftingTracker {
        fn init(
            &mut self,
            _frame: &Frame,
            bbox: BoundingBox,
        ) -> Result<(), Box<dyn std::error::Error>> {
            self.bbox = Some(bbox);
            Ok(())
        }

        fn update(
            &mut self,
            frame: &Frame,
        ) -> Result<(bool, BoundingBox), Box<dyn std::error::Error>> {
            let current = self.bbox.ok_or("not initialized")?;
            if self.fail_on.contains(&frame.index()) {
                return Ok((false, BoundingBox::default()));
            }
            let next = BoundingBox {
                left: current.left + 1,
                ..current
            };
            self.bbox = Some(next);
            Ok((true, next))
        }
    }

    struct StubFactory {
        fail_on: Vec<usize>,
        created: Arc<Mutex<Vec<TrackerKind>>>,
    }

    impl StubFactory {
        fn new(fail_on: Vec<usize>) -> Self {
            Self {
                fail_on,
                created: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl TrackerFactory for StubFactory {
        fn create(
            &self,
            kind: TrackerKind,
        ) -> Result<Box<dyn ObjectTracker>, Box<dyn std::error::Error>> {
            self.created.lock().unwrap().push(kind);
            Ok(Box::new(DriftingTracker {
                bbox: None,
                fail_on: self.fail_on.clone(),
            }))
        }
    }

    struct FailingFactory;

    impl TrackerFactory for FailingFactory {
        fn create(
            &self,
            kind: TrackerKind,
        ) -> Result<Box<dyn ObjectTracker>, Box<dyn std::error::Error>> {
            Err(format!("{kind} is not available").into())
        }
    }

    /// Shares its update counter through `Rc`, so it is not `Send`.
    struct SharedCounterTracker {
        updates: Rc<Cell<usize>>,
    }

    impl ObjectTracker for SharedCounterTracker {
        fn init(
            &mut self,
            _frame: &Frame,
            _bbox: BoundingBox,
        ) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }

        fn update(
            &mut self,
            _frame: &Frame,
        ) -> Result<(bool, BoundingBox), Box<dyn std::error::Error>> {
            self.updates.set(self.updates.get() + 1);
            Ok((true, BoundingBox::new(0, 0, 1, 1)))
        }
    }

    struct SharedCounterFactory {
        updates: Rc<Cell<usize>>,
    }

    impl TrackerFactory for SharedCounterFactory {
        fn create(
            &self,
            _kind: TrackerKind,
        ) -> Result<Box<dyn ObjectTracker>, Box<dyn std::error::Error>> {
            Ok(Box::new(SharedCounterTracker {
                updates: self.updates.clone(),
            }))
        }
    }

    // --- Helpers ---

    fn make_frame(index: usize) -> Frame {
        Frame::new(vec![0; 8 * 8 * 3], 8, 8, 3, index)
    }

    // --- Tests ---

    #[test]
    fn test_empty_set_update_succeeds_with_no_boxes() {
        let mut set = TrackerSet::new(Box::new(StubFactory::new(vec![])), EvictionPolicy::Keep);
        let result = set.update(&make_frame(0)).unwrap();
        assert!(result.success);
        assert!(result.boxes.is_empty());
        assert!(set.is_empty());
    }

    #[test]
    fn test_update_returns_one_box_per_tracker_in_insertion_order() {
        let mut set = TrackerSet::new(Box::new(StubFactory::new(vec![])), EvictionPolicy::Keep);
        let frame = make_frame(0);
        set.add(TrackerKind::Csrt, &frame, BoundingBox::new(10, 20, 30, 40))
            .unwrap();
        set.add(TrackerKind::Kcf, &frame, BoundingBox::new(100, 0, 5, 5))
            .unwrap();

        let result = set.update(&make_frame(1)).unwrap();
        assert!(result.success);
        assert_eq!(
            result.boxes,
            vec![BoundingBox::new(11, 20, 30, 40), BoundingBox::new(101, 0, 5, 5)]
        );
    }

    #[test]
    fn test_add_uses_requested_kind() {
        let factory = StubFactory::new(vec![]);
        let created = factory.created.clone();
        let mut set = TrackerSet::new(Box::new(factory), EvictionPolicy::Keep);
        let frame = make_frame(0);
        for kind in TrackerKind::ALL {
            set.add(kind, &frame, BoundingBox::new(0, 0, 4, 4)).unwrap();
        }
        assert_eq!(*created.lock().unwrap(), TrackerKind::ALL.to_vec());
        assert_eq!(set.update(&make_frame(1)).unwrap().boxes.len(), 7);
    }

    #[test]
    fn test_factory_failure_propagates_and_adds_nothing() {
        let mut set = TrackerSet::new(Box::new(FailingFactory), EvictionPolicy::Keep);
        let err = set
            .add(TrackerKind::Tld, &make_frame(0), BoundingBox::new(0, 0, 4, 4))
            .unwrap_err();
        assert!(err.to_string().contains("tld"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_lost_tracker_keeps_slot_and_last_box() {
        let mut set = TrackerSet::new(Box::new(StubFactory::new(vec![2])), EvictionPolicy::Keep);
        set.add(TrackerKind::Kcf, &make_frame(0), BoundingBox::new(0, 0, 10, 10))
            .unwrap();

        let first = set.update(&make_frame(1)).unwrap();
        assert_eq!(first.boxes, vec![BoundingBox::new(1, 0, 10, 10)]);

        let lost = set.update(&make_frame(2)).unwrap();
        assert!(!lost.success);
        assert_eq!(lost.boxes, vec![BoundingBox::new(1, 0, 10, 10)]);
        assert_eq!(lost.evicted, 0);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_single_failure_clears_aggregate_success() {
        let mut set = TrackerSet::new(Box::new(StubFactory::new(vec![1])), EvictionPolicy::Keep);
        let frame = make_frame(0);
        set.add(TrackerKind::Kcf, &frame, BoundingBox::new(0, 0, 10, 10))
            .unwrap();
        let result = set.update(&make_frame(1)).unwrap();
        assert!(!result.success);
        assert_eq!(result.boxes.len(), 1);
    }

    #[test]
    fn test_drop_lost_evicts_failed_trackers() {
        let mut set = TrackerSet::new(
            Box::new(StubFactory::new(vec![1])),
            EvictionPolicy::DropLost,
        );
        set.add(TrackerKind::Mil, &make_frame(0), BoundingBox::new(0, 0, 10, 10))
            .unwrap();

        let result = set.update(&make_frame(1)).unwrap();
        assert!(!result.success);
        assert!(result.boxes.is_empty());
        assert_eq!(result.evicted, 1);
        assert!(set.is_empty());
    }

    #[test]
    fn test_drop_lost_keeps_order_of_survivors() {
        let mut set = TrackerSet::new(Box::new(StubFactory::new(vec![])), EvictionPolicy::DropLost);
        let frame = make_frame(0);
        set.add(TrackerKind::Kcf, &frame, BoundingBox::new(0, 0, 5, 5)).unwrap();
        set.add(TrackerKind::Kcf, &frame, BoundingBox::new(50, 0, 5, 5)).unwrap();

        let result = set.update(&make_frame(1)).unwrap();
        assert_eq!(result.evicted, 0);
        assert_eq!(result.boxes[0].left, 1);
        assert_eq!(result.boxes[1].left, 51);
    }

    #[test]
    fn test_trackers_need_not_be_send() {
        let updates = Rc::new(Cell::new(0));
        let factory = SharedCounterFactory {
            updates: updates.clone(),
        };
        let mut set = TrackerSet::new(Box::new(factory), EvictionPolicy::Keep);
        set.add(TrackerKind::Mosse, &make_frame(0), BoundingBox::new(0, 0, 4, 4))
            .unwrap();
        set.add(TrackerKind::Tld, &make_frame(0), BoundingBox::new(4, 4, 4, 4))
            .unwrap();

        assert_eq!(set.update(&make_frame(1)).unwrap().boxes.len(), 2);
        assert_eq!(updates.get(), 2);
    }
}
