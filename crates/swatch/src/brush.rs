use std::sync::Arc;

use crate::color::Color;

/// A shared handle to a frozen [`SolidBrush`]. Clones are cheap and refer
/// to the same underlying resource.
pub type Brush = Arc<SolidBrush>;

/// A single-color drawing resource.
///
/// A brush starts out mutable and becomes permanently read-only once
/// [`freeze`](SolidBrush::freeze) is called. The cache only ever publishes
/// frozen brushes; an unfrozen brush is a purely local, uncached value.
#[derive(Debug)]
pub struct SolidBrush {
    color: Color,
    frozen: bool,
}

impl SolidBrush {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            frozen: false,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Replaces the brush color. Returns `false` without changing anything
    /// if the brush has been frozen.
    pub fn set_color(&mut self, color: Color) -> bool {
        if self.frozen {
            return false;
        }
        self.color = color;
        true
    }

    /// Marks the brush read-only. There is no way back.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }
}

impl From<&SolidBrush> for peniko::Brush {
    fn from(brush: &SolidBrush) -> Self {
        peniko::Brush::Solid(brush.color.into())
    }
}
