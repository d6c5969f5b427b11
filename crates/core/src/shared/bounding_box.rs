/// Axis-aligned rectangle in pixel coordinates: `(left, top, width, height)`.
///
/// Created once (manual selection or face match) and consumed to initialize
/// a tracker; trackers report their estimates back in the same shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Converts a face-location tuple ordered `(top, right, bottom, left)`.
    pub fn from_trbl(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// A box with no area. Cancelled selections come back this way.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_from_trbl_converts_to_ltwh() {
        let b = BoundingBox::from_trbl(20, 40, 60, 10);
        assert_eq!(b, BoundingBox::new(10, 20, 30, 40));
    }

    #[test]
    fn test_right_and_bottom() {
        let b = BoundingBox::new(10, 20, 30, 40);
        assert_eq!(b.right(), 40);
        assert_eq!(b.bottom(), 60);
    }

    #[rstest]
    #[case::zero_width(BoundingBox::new(0, 0, 0, 10), true)]
    #[case::zero_height(BoundingBox::new(0, 0, 10, 0), true)]
    #[case::negative(BoundingBox::new(5, 5, -1, 3), true)]
    #[case::cancelled_selection(BoundingBox::default(), true)]
    #[case::regular(BoundingBox::new(0, 0, 1, 1), false)]
    fn test_is_empty(#[case] b: BoundingBox, #[case] expected: bool) {
        assert_eq!(b.is_empty(), expected);
    }

    #[test]
    fn test_display_matches_tuple_form() {
        assert_eq!(BoundingBox::new(1, 2, 3, 4).to_string(), "(1, 2, 3, 4)");
    }
}
