pub const FACE_DETECTOR_MODEL_NAME: &str = "yolo11n-pose_widerface.onnx";
pub const FACE_DETECTOR_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/yolo11n-pose_widerface.onnx";

pub const EMBEDDING_MODEL_NAME: &str = "w600k_r50.onnx";
pub const EMBEDDING_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/w600k_r50.onnx";

/// Frames are resized to this width before tracking (aspect ratio kept).
pub const DEFAULT_PROCESSING_WIDTH: u32 = 600;

/// Key polling timeout; doubles as the frame-rate throttle.
pub const DEFAULT_KEY_DELAY_MS: i32 = 20;

pub const DEFAULT_KNOWN_IDENTITIES_DIR: &str = "known_identities";

pub const WINDOW_NAME: &str = "Frame";

/// Overlay color (RGB) and stroke width for tracked boxes.
pub const BOX_COLOR: [u8; 3] = [0, 255, 0];
pub const BOX_THICKNESS: i32 = 2;
