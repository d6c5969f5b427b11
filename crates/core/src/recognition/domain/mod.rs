pub mod face_distance;
pub mod face_encoder;
pub mod face_locator;
pub mod known_identities;
