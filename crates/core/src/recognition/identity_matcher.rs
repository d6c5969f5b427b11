use crate::recognition::domain::face_distance::{identity_score, ranks};
use crate::recognition::domain::face_encoder::FaceEncoder;
use crate::recognition::domain::face_locator::FaceLocator;
use crate::recognition::domain::known_identities::{identity_name, KnownIdentityStore};
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;
use crate::video::domain::image_loader::ImageLoader;

/// Finds, for every known-identity file, the face in a frame that best
/// matches it.
///
/// Each reference file is judged on its own: a face's score is its distance
/// to the farthest embedding found in that file, and the lowest-scoring face
/// wins. N files therefore produce up to N boxes, possibly on the same face.
pub struct IdentityMatcher {
    locator: Box<dyn FaceLocator>,
    encoder: Box<dyn FaceEncoder>,
    loader: Box<dyn ImageLoader>,
    store: KnownIdentityStore,
}

impl IdentityMatcher {
    pub fn new(
        locator: Box<dyn FaceLocator>,
        encoder: Box<dyn FaceEncoder>,
        loader: Box<dyn ImageLoader>,
        store: KnownIdentityStore,
    ) -> Self {
        Self {
            locator,
            encoder,
            loader,
            store,
        }
    }

    /// Boxes to seed trackers with, one per reference file that yielded
    /// embeddings, in file-name order.
    pub fn recognize(
        &mut self,
        frame: &Frame,
    ) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
        let locations = self.locator.locate(frame)?;
        if locations.is_empty() {
            log::info!("No faces found");
            return Ok(Vec::new());
        }
        let embeddings = self.encoder.encode(frame, &locations)?;

        let files = self.store.reference_files()?;
        let mut boxes = Vec::with_capacity(files.len());

        for path in &files {
            let name = identity_name(path);
            let reference = self.loader.load(path)?;
            let known_locations = self.locator.locate(&reference)?;
            let known = self.encoder.encode(&reference, &known_locations)?;
            log::info!("Found {} instance(s) of {name}", known.len());

            if known.is_empty() {
                log::warn!("Skipping {}: no detectable face", path.display());
                continue;
            }

            let scores: Vec<f64> = embeddings
                .iter()
                .map(|face| identity_score(&known, face).unwrap_or(f64::INFINITY))
                .collect();
            let Some(best) = ranks(&scores).iter().position(|&r| r == 0) else {
                continue;
            };

            let bbox = BoundingBox::from(locations[best]);
            log::info!(
                "Best match for {name}: face #{} at {bbox} (score {:.3})",
                best + 1,
                scores[best]
            );
            boxes.push(bbox);
        }

        Ok(boxes)
    }
}

/// Builds the matcher; typically resolves and loads the face models.
pub type MatcherBuilder =
    Box<dyn FnOnce() -> Result<IdentityMatcher, Box<dyn std::error::Error>> + Send>;

/// Defers building an [`IdentityMatcher`] until the first recognition.
///
/// Model download and session creation only happen once recognition is
/// actually requested, so manual tracking works without them.
pub struct LazyIdentityMatcher {
    builder: Option<MatcherBuilder>,
    matcher: Option<IdentityMatcher>,
}

impl LazyIdentityMatcher {
    pub fn new(builder: MatcherBuilder) -> Self {
        Self {
            builder: Some(builder),
            matcher: None,
        }
    }

    /// Wraps a matcher that is already built.
    pub fn ready(matcher: IdentityMatcher) -> Self {
        Self {
            builder: None,
            matcher: Some(matcher),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.matcher.is_some()
    }

    pub fn recognize(
        &mut self,
        frame: &Frame,
    ) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
        if self.matcher.is_none() {
            let build = self
                .builder
                .take()
                .ok_or("face recognition failed to load earlier")?;
            log::info!("Loading face recognition models");
            self.matcher = Some(build()?);
        }
        match self.matcher.as_mut() {
            Some(matcher) => matcher.recognize(frame),
            None => Err("face recognition is not available".into()),
        }
    }
}
