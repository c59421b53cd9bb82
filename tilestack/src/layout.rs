//! Tile column geometry
//!
//! Pure math for the fixed-size tile column: slot offsets, total content
//! height, and which slots intersect a vertical pixel band. Vertical
//! positions are computed in `u64` so a large tile count cannot overflow
//! the pixel space.

use std::fmt;
use std::ops::Range;

use thiserror::Error;

/// Errors from validating layout geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Tile dimensions must both be non-zero.
    #[error("tile dimensions must be non-zero (got {width}×{height})")]
    ZeroTileDimension { width: u32, height: u32 },
    /// Viewport dimensions must both be non-zero.
    #[error("viewport dimensions must be non-zero (got {width}×{height})")]
    ZeroViewportDimension { width: u32, height: u32 },
}

/// Size of a single tile slot in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSize {
    width: u32,
    height: u32,
}

impl TileSize {
    /// The default 100×100 slot size.
    pub const DEFAULT: TileSize = TileSize {
        width: 100,
        height: 100,
    };

    /// Creates a tile size, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, LayoutError> {
        if width == 0 || height == 0 {
            return Err(LayoutError::ZeroTileDimension { width, height });
        }
        Ok(Self { width, height })
    }

    /// Creates a square tile size.
    pub fn square(side: u32) -> Result<Self, LayoutError> {
        Self::new(side, side)
    }

    /// Returns the tile width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the tile height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for TileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}

/// Geometry of a vertical column of `count` equally sized tile slots.
///
/// Slot `i` occupies the half-open band `[i * tile_height, (i + 1) *
/// tile_height)`. There are no gaps: each slot starts exactly where the
/// previous one ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayout {
    tile: TileSize,
    count: u32,
}

impl TileLayout {
    /// Creates the layout for `count` slots of size `tile`.
    pub fn new(tile: TileSize, count: u32) -> Self {
        Self { tile, count }
    }

    /// Returns the slot size.
    pub fn tile(&self) -> TileSize {
        self.tile
    }

    /// Returns the number of slots.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Returns `true` when the column has no slots.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the vertical offset of slot `index` from the top of the
    /// column.
    ///
    /// The offset is exact for any `u32` index; the widest possible column
    /// (`u32::MAX` slots of `u32::MAX` pixels) still fits in `u64`.
    #[inline]
    pub fn slot_y(&self, index: u32) -> u64 {
        index as u64 * self.tile.height() as u64
    }

    /// Returns the column width in pixels (every slot is flush left).
    pub fn content_width(&self) -> u32 {
        self.tile.width()
    }

    /// Returns the total column height in pixels.
    pub fn content_height(&self) -> u64 {
        self.count as u64 * self.tile.height() as u64
    }

    /// Returns the slots intersecting the half-open vertical band
    /// `[band.0, band.1)`.
    ///
    /// An inverted or empty band yields an empty range, as does a band
    /// entirely below the column.
    pub fn visible_range(&self, band: (u64, u64)) -> Range<u32> {
        let (top, bottom) = band;
        if bottom <= top || self.count == 0 {
            return 0..0;
        }

        let height = self.tile.height() as u64;
        let first = (top / height).min(self.count as u64) as u32;
        let last = bottom.div_ceil(height).min(self.count as u64) as u32;
        if first >= last {
            return 0..0;
        }

        first..last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(side: u32, count: u32) -> TileLayout {
        TileLayout::new(TileSize::square(side).unwrap(), count)
    }

    #[test]
    fn test_tile_size_rejects_zero_width() {
        let result = TileSize::new(0, 100);
        assert!(matches!(
            result.unwrap_err(),
            LayoutError::ZeroTileDimension { width: 0, height: 100 }
        ));
    }

    #[test]
    fn test_tile_size_rejects_zero_height() {
        assert!(TileSize::new(100, 0).is_err());
    }

    #[test]
    fn test_tile_size_display() {
        let size = TileSize::new(100, 100).unwrap();
        assert_eq!(size.to_string(), "100×100");
    }

    #[test]
    fn test_slot_y_is_index_times_height() {
        let layout = layout(100, 500);
        assert_eq!(layout.slot_y(0), 0);
        assert_eq!(layout.slot_y(1), 100);
        assert_eq!(layout.slot_y(499), 49_900);
    }

    #[test]
    fn test_slots_are_contiguous() {
        // Each slot starts exactly where the previous one ends
        let layout = layout(100, 1000);
        for index in 0..999 {
            assert_eq!(
                layout.slot_y(index + 1),
                layout.slot_y(index) + 100,
                "gap or overlap at slot {}",
                index
            );
        }
    }

    #[test]
    fn test_content_height_scales_with_count() {
        assert_eq!(layout(100, 500).content_height(), 50_000);
        assert_eq!(layout(100, 1000).content_height(), 100_000);
        assert_eq!(layout(100, 0).content_height(), 0);
    }

    #[test]
    fn test_content_height_does_not_overflow_u32() {
        // u32::MAX slots of u32::MAX pixels each still fits in u64
        let layout = TileLayout::new(
            TileSize::new(100, u32::MAX).unwrap(),
            u32::MAX,
        );
        assert_eq!(
            layout.content_height(),
            u32::MAX as u64 * u32::MAX as u64
        );
        assert_eq!(layout.slot_y(u32::MAX - 1), (u32::MAX as u64 - 1) * u32::MAX as u64);
    }

    #[test]
    fn test_visible_range_at_top() {
        // A 667px band over 100px slots touches slots 0 through 6
        let layout = layout(100, 1000);
        assert_eq!(layout.visible_range((0, 667)), 0..7);
    }

    #[test]
    fn test_visible_range_mid_column() {
        let layout = layout(100, 1000);
        // Band starting mid-slot still includes that slot
        assert_eq!(layout.visible_range((250, 450)), 2..5);
        // Band aligned on slot boundaries excludes the slot it ends on
        assert_eq!(layout.visible_range((200, 400)), 2..4);
    }

    #[test]
    fn test_visible_range_single_slot() {
        let layout = layout(100, 10);
        assert_eq!(layout.visible_range((600, 700)), 6..7);
    }

    #[test]
    fn test_visible_range_empty_band() {
        let layout = layout(100, 10);
        assert_eq!(layout.visible_range((300, 300)), 0..0);
        assert_eq!(layout.visible_range((400, 300)), 0..0);
    }

    #[test]
    fn test_visible_range_clamps_past_column_end() {
        let layout = layout(100, 5);
        // Band extends well past the 500px column
        assert_eq!(layout.visible_range((350, 10_000)), 3..5);
        // Band entirely below the column
        assert_eq!(layout.visible_range((600, 900)), 0..0);
    }

    #[test]
    fn test_visible_range_on_empty_column() {
        let layout = layout(100, 0);
        assert_eq!(layout.visible_range((0, 667)), 0..0);
    }

    // Property-based tests using proptest
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_slot_offsets_never_overlap(
                side in 1u32..512,
                count in 1u32..5000,
                index in 0u32..4999
            ) {
                prop_assume!(index + 1 < count);
                let layout = TileLayout::new(TileSize::square(side)?, count);

                // Strictly increasing, adjacent slots exactly abut
                prop_assert_eq!(
                    layout.slot_y(index + 1),
                    layout.slot_y(index) + side as u64
                );
            }

            #[test]
            fn test_last_slot_ends_at_content_height(
                side in 1u32..512,
                count in 1u32..5000
            ) {
                let layout = TileLayout::new(TileSize::square(side)?, count);
                prop_assert_eq!(
                    layout.slot_y(count - 1) + side as u64,
                    layout.content_height()
                );
            }

            #[test]
            fn test_visible_range_within_bounds(
                side in 1u32..512,
                count in 0u32..5000,
                top in 0u64..1_000_000,
                len in 0u64..10_000
            ) {
                let layout = TileLayout::new(TileSize::square(side)?, count);
                let range = layout.visible_range((top, top + len));

                prop_assert!(range.end <= count);
                prop_assert!(range.start <= range.end);
            }

            #[test]
            fn test_visible_slots_actually_intersect_band(
                side in 1u32..512,
                count in 1u32..2000,
                top in 0u64..1_000_000,
                len in 1u64..10_000
            ) {
                let layout = TileLayout::new(TileSize::square(side)?, count);
                let bottom = top + len;
                let range = layout.visible_range((top, bottom));

                for index in range {
                    let slot_top = layout.slot_y(index);
                    let slot_bottom = slot_top + side as u64;
                    prop_assert!(
                        slot_top < bottom && slot_bottom > top,
                        "slot {} [{}, {}) does not intersect band [{}, {})",
                        index, slot_top, slot_bottom, top, bottom
                    );
                }
            }

            #[test]
            fn test_slots_outside_range_do_not_intersect(
                side in 1u32..128,
                count in 1u32..500,
                top in 0u64..100_000,
                len in 1u64..5_000
            ) {
                let layout = TileLayout::new(TileSize::square(side)?, count);
                let bottom = top + len;
                let range = layout.visible_range((top, bottom));

                for index in 0..count {
                    if range.contains(&index) {
                        continue;
                    }
                    let slot_top = layout.slot_y(index);
                    let slot_bottom = slot_top + side as u64;
                    prop_assert!(
                        slot_top >= bottom || slot_bottom <= top,
                        "slot {} [{}, {}) intersects band [{}, {}) but is not in range",
                        index, slot_top, slot_bottom, top, bottom
                    );
                }
            }
        }
    }
}
