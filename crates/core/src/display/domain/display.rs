use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// A key press the interactive loop reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// `s`: draw a box around an object to track.
    Select,
    /// `r`: seed trackers from known identities.
    Recognize,
    /// `q`: leave the loop.
    Quit,
    Other(char),
}

impl Key {
    pub fn from_char(c: char) -> Self {
        match c {
            's' => Key::Select,
            'r' => Key::Recognize,
            'q' => Key::Quit,
            other => Key::Other(other),
        }
    }
}

/// Domain interface for the on-screen window.
pub trait Display {
    /// Shows `frame` with `boxes` outlined. The frame itself is left clean.
    fn show(&mut self, frame: &Frame, boxes: &[BoundingBox])
        -> Result<(), Box<dyn std::error::Error>>;

    /// Waits up to `delay_ms` for a key press.
    fn poll_key(&mut self, delay_ms: i32) -> Result<Option<Key>, Box<dyn std::error::Error>>;

    /// Blocks until the user draws a rectangle on `frame` and confirms it.
    /// `boxes` stay visible while selecting.
    ///
    /// A cancelled selection comes back as an empty box.
    fn select_box(
        &mut self,
        frame: &Frame,
        boxes: &[BoundingBox],
    ) -> Result<BoundingBox, Box<dyn std::error::Error>>;

    /// Closes every window. Must be safe to call more than once.
    fn close(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case('s', Key::Select)]
    #[case('r', Key::Recognize)]
    #[case('q', Key::Quit)]
    #[case('x', Key::Other('x'))]
    #[case('S', Key::Other('S'))]
    fn test_key_from_char(#[case] c: char, #[case] expected: Key) {
        assert_eq!(Key::from_char(c), expected);
    }
}
