pub mod ffmpeg_camera_source;
pub mod ffmpeg_decoder;
pub mod ffmpeg_file_source;
pub mod image_file_loader;
