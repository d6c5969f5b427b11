pub mod frame_source;
pub mod image_loader;
