//! Edge sizes and padding shorthand

/// Edge sizes (top, right, bottom, left)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeSizes {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl EdgeSizes {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Expand 1-4 values with CSS `padding` shorthand rules
    ///
    /// No values means zero on every side; values past the fourth are
    /// ignored. Negative sides clamp to zero.
    pub fn from_shorthand(values: &[f32]) -> Self {
        let edges = match *values {
            [] => Self::default(),
            [all] => Self::uniform(all),
            [vertical, horizontal] => Self::new(vertical, horizontal, vertical, horizontal),
            [top, horizontal, bottom] => Self::new(top, horizontal, bottom, horizontal),
            [top, right, bottom, left, ..] => Self::new(top, right, bottom, left),
        };
        edges.clamped()
    }

    /// Every side raised to at least zero
    pub fn clamped(self) -> Self {
        // f32::max also maps NaN to zero
        Self::new(
            self.top.max(0.0),
            self.right.max(0.0),
            self.bottom.max(0.0),
            self.left.max(0.0),
        )
    }

    /// left + right
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// top + bottom
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}
