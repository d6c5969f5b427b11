pub mod domain;
pub mod identity_matcher;
pub mod infrastructure;
