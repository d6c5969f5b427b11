use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use facetrack_core::display::infrastructure::highgui_display::HighguiDisplay;
use facetrack_core::pipeline::background_recognizer::BackgroundRecognizer;
use facetrack_core::pipeline::interactive_tracking_use_case::{
    InteractiveTrackingUseCase, Recognition, TrackingConfig,
};
use facetrack_core::recognition::domain::known_identities::KnownIdentityStore;
use facetrack_core::recognition::identity_matcher::{IdentityMatcher, LazyIdentityMatcher};
use facetrack_core::recognition::infrastructure::model_resolver;
use facetrack_core::recognition::infrastructure::onnx_face_encoder::OnnxFaceEncoder;
use facetrack_core::recognition::infrastructure::onnx_face_locator::OnnxFaceLocator;
use facetrack_core::shared::constants::{
    DEFAULT_KNOWN_IDENTITIES_DIR, EMBEDDING_MODEL_NAME, EMBEDDING_MODEL_URL,
    FACE_DETECTOR_MODEL_NAME, FACE_DETECTOR_MODEL_URL, WINDOW_NAME,
};
use facetrack_core::tracking::domain::tracker_kind::TrackerKind;
use facetrack_core::tracking::infrastructure::opencv_tracker::OpenCvTrackerFactory;
use facetrack_core::tracking::tracker_set::{EvictionPolicy, TrackerSet};
use facetrack_core::video::domain::frame_source::FrameSource;
use facetrack_core::video::infrastructure::ffmpeg_camera_source::FfmpegCameraSource;
use facetrack_core::video::infrastructure::ffmpeg_file_source::FfmpegFileSource;
use facetrack_core::video::infrastructure::image_file_loader::ImageFileLoader;

/// Track objects in a live camera feed or a video file.
///
/// Press `s` to draw a box around an object, `r` to track every known
/// identity found in the frame, `q` to quit.
#[derive(Parser)]
#[command(name = "facetrack")]
struct Cli {
    /// Video file to read instead of the camera.
    #[arg(short = 'v', long)]
    video: Option<PathBuf>,

    /// Tracker algorithm: csrt, kcf, boosting, mil, tld, medianflow or mosse.
    #[arg(short = 't', long, default_value = "kcf")]
    tracker: String,

    /// Directory of reference images, one identity per file.
    #[arg(long, default_value = DEFAULT_KNOWN_IDENTITIES_DIR)]
    known_identities: PathBuf,

    /// Width frames are resized to before tracking.
    #[arg(long, default_value = "600")]
    width: u32,

    /// Camera device (platform-specific; e.g. /dev/video1 or 1).
    #[arg(long)]
    camera: Option<String>,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value = "0.5")]
    confidence: f64,

    /// Remove trackers as soon as they lose their target.
    #[arg(long)]
    drop_lost: bool,

    /// Run recognition on a worker thread so the video keeps playing.
    #[arg(long)]
    background_recognition: bool,

    /// Milliseconds to wait for a key press each frame.
    #[arg(long, default_value = "20")]
    key_delay: i32,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let tracker_kind = validate(&cli)?;

    let matcher = lazy_matcher(&cli);
    let recognition = if cli.background_recognition {
        Recognition::Background(BackgroundRecognizer::spawn(matcher))
    } else {
        Recognition::Blocking(matcher)
    };

    let eviction = if cli.drop_lost {
        EvictionPolicy::DropLost
    } else {
        EvictionPolicy::Keep
    };
    let trackers = TrackerSet::new(Box::new(OpenCvTrackerFactory::new()), eviction);

    let source = open_source(cli.video.as_deref(), cli.camera.as_deref())?;
    let display = Box::new(HighguiDisplay::new(WINDOW_NAME));

    let config = TrackingConfig {
        tracker_kind,
        processing_width: cli.width,
        key_delay_ms: cli.key_delay,
    };
    log::info!("Using {tracker_kind} tracker, press s to select, r to recognize, q to quit");

    let mut use_case =
        InteractiveTrackingUseCase::new(source, display, trackers, recognition, config);
    let summary = use_case.execute()?;
    log::info!("Session finished: {summary}");

    Ok(())
}

/// Defers model download and session creation until the first `r`.
fn lazy_matcher(cli: &Cli) -> LazyIdentityMatcher {
    let known_identities = cli.known_identities.clone();
    let confidence = cli.confidence;
    LazyIdentityMatcher::new(Box::new(move || {
        build_matcher(&known_identities, confidence)
    }))
}

fn build_matcher(
    known_identities: &Path,
    confidence: f64,
) -> Result<IdentityMatcher, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {FACE_DETECTOR_MODEL_NAME}");
    let locator_path = model_resolver::resolve(
        FACE_DETECTOR_MODEL_NAME,
        FACE_DETECTOR_MODEL_URL,
        Some(Box::new(|d: u64, t: u64| download_progress("face detection", d, t))),
    )?;
    log::info!("Resolving model: {EMBEDDING_MODEL_NAME}");
    let encoder_path = model_resolver::resolve(
        EMBEDDING_MODEL_NAME,
        EMBEDDING_MODEL_URL,
        Some(Box::new(|d: u64, t: u64| download_progress("face embedding", d, t))),
    )?;

    let locator = OnnxFaceLocator::new(&locator_path, confidence)?;
    let encoder = OnnxFaceEncoder::new(&encoder_path)?;

    Ok(IdentityMatcher::new(
        Box::new(locator),
        Box::new(encoder),
        Box::new(ImageFileLoader::new()),
        KnownIdentityStore::new(known_identities),
    ))
}

fn open_source(
    video: Option<&Path>,
    camera: Option<&str>,
) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    match video {
        Some(path) => Ok(Box::new(FfmpegFileSource::open(path)?)),
        None => Ok(Box::new(FfmpegCameraSource::open(camera)?)),
    }
}

/// Checks arguments before any model or device is opened.
fn validate(cli: &Cli) -> Result<TrackerKind, Box<dyn std::error::Error>> {
    let kind: TrackerKind = cli.tracker.parse()?;
    if let Some(ref video) = cli.video {
        if !video.exists() {
            return Err(format!("Video file not found: {}", video.display()).into());
        }
    }
    if cli.width == 0 {
        return Err("Width must be positive".into());
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if cli.key_delay < 1 {
        return Err(format!("Key delay must be at least 1 ms, got {}", cli.key_delay).into());
    }
    Ok(kind)
}

fn download_progress(what: &str, downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading {what} model... {pct}%");
        if downloaded >= total {
            eprintln!();
        }
    } else {
        eprint!("\rDownloading {what} model... {downloaded} bytes");
    }
}
