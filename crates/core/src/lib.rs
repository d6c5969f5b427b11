pub mod display;
pub mod pipeline;
pub mod recognition;
pub mod shared;
pub mod tracking;
pub mod video;
