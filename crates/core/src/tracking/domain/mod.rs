pub mod object_tracker;
pub mod tracker_kind;
