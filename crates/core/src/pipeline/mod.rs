pub mod background_recognizer;
pub mod interactive_tracking_use_case;
