//! Scrollable viewport over the tile column
//!
//! A [`Viewport`] is the window-sized band the user currently sees. The
//! scroll offset is clamped to the content: there is no bouncing past the
//! top or bottom, and scrolling a column shorter than the viewport is a
//! no-op.

use crate::layout::LayoutError;

/// A fixed-size view onto the tile column with a clamped scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
    offset: u64,
}

impl Viewport {
    /// Default viewport width in pixels (a 375×667 phone screen).
    pub const DEFAULT_WIDTH: u32 = 375;

    /// Default viewport height in pixels.
    pub const DEFAULT_HEIGHT: u32 = 667;

    /// Creates a viewport at scroll offset zero, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, LayoutError> {
        if width == 0 || height == 0 {
            return Err(LayoutError::ZeroViewportDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            offset: 0,
        })
    }

    /// Returns the viewport width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the viewport height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the current scroll offset from the top of the content.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the largest valid scroll offset for the given content
    /// height.
    ///
    /// Content shorter than the viewport cannot scroll at all, so the
    /// maximum is zero.
    pub fn max_offset(&self, content_height: u64) -> u64 {
        content_height.saturating_sub(self.height as u64)
    }

    /// Scrolls to an absolute offset, clamped to `[0, max_offset]`.
    pub fn scroll_to(&mut self, offset: u64, content_height: u64) {
        self.offset = offset.min(self.max_offset(content_height));
    }

    /// Scrolls by a signed pixel delta, clamped to `[0, max_offset]`.
    ///
    /// Positive deltas move toward the bottom of the content.
    pub fn scroll_by(&mut self, delta: i64, content_height: u64) {
        let target = if delta >= 0 {
            self.offset.saturating_add(delta as u64)
        } else {
            self.offset.saturating_sub(delta.unsigned_abs())
        };
        self.scroll_to(target, content_height);
    }

    /// Returns the half-open vertical band `[top, bottom)` of content the
    /// viewport currently covers, trimmed to the content itself.
    pub fn visible_band(&self, content_height: u64) -> (u64, u64) {
        let top = self.offset.min(content_height);
        let bottom = self
            .offset
            .saturating_add(self.height as u64)
            .min(content_height);
        (top, bottom)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            offset: 0,
        }
    }
}
