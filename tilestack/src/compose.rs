//! Rasterizing the tile column
//!
//! Turns a loaded [`Screen`] into RGBA pixels: either the band a
//! [`Viewport`] currently covers (what the window shows) or the entire
//! column as one tall image (what `render --full` writes). Tiles all blit
//! the same scaled bitmap, so callers scale once and reuse the result
//! across repaints.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::asset::ImageAsset;
use crate::layout::TileSize;
use crate::screen::Screen;
use crate::viewport::Viewport;

/// Background color behind and around the tiles.
pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

const BYTES_PER_PIXEL: usize = 4;

/// Scales the decoded asset to the tile slot size.
///
/// Returns a plain clone when the asset already matches, which is the
/// common case for pre-sized sources.
pub fn scale_asset(asset: &ImageAsset, size: TileSize) -> RgbaImage {
    if asset.width() == size.width() && asset.height() == size.height() {
        return asset.pixels().clone();
    }
    imageops::resize(
        asset.pixels(),
        size.width(),
        size.height(),
        FilterType::Triangle,
    )
}

/// Fills an RGBA frame buffer with the background color.
pub fn paint_background(frame: &mut [u8]) {
    for pixel in frame.chunks_exact_mut(BYTES_PER_PIXEL) {
        pixel.copy_from_slice(&BACKGROUND.0);
    }
}

/// Paints the band the viewport currently covers into `frame`.
///
/// `frame` must hold exactly `viewport.width() * viewport.height()` RGBA
/// pixels. The background goes down first, then every visible tile row
/// that lands inside the frame, clipped on both axes. `tile_bitmap` is
/// the asset already scaled to the slot size (see [`scale_asset`]).
pub fn paint_viewport(
    screen: &Screen,
    tile_bitmap: &RgbaImage,
    viewport: &Viewport,
    frame: &mut [u8],
) {
    paint_background(frame);

    let frame_width = viewport.width() as usize;
    let frame_height = viewport.height() as usize;
    let offset = viewport.offset();
    let copy_width = (tile_bitmap.width() as usize).min(frame_width);
    if copy_width == 0 {
        return;
    }

    for tile in screen.visible_tiles(viewport) {
        for row in 0..tile_bitmap.height() as u64 {
            let content_y = tile.y() + row;
            if content_y < offset {
                continue;
            }
            let frame_y = (content_y - offset) as usize;
            if frame_y >= frame_height {
                break;
            }

            let src = row_bytes(tile_bitmap, row as u32, copy_width);
            let dst_start = frame_y * frame_width * BYTES_PER_PIXEL;
            frame[dst_start..dst_start + copy_width * BYTES_PER_PIXEL].copy_from_slice(src);
        }
    }
}

/// Composes the viewport band into a fresh image.
///
/// An empty screen composes to a solid background, matching the blank
/// scroll view a failed load leaves behind.
pub fn compose_viewport(screen: &Screen, viewport: &Viewport) -> RgbaImage {
    let mut image = RgbaImage::new(viewport.width(), viewport.height());
    let frame: &mut [u8] = &mut image;

    match screen.asset() {
        Some(asset) => {
            let tile_bitmap = scale_asset(asset, screen.layout().tile());
            paint_viewport(screen, &tile_bitmap, viewport, frame);
        }
        None => paint_background(frame),
    }

    image
}

/// Composes the entire column as one image, top to bottom.
///
/// Returns `None` for an empty screen, and for columns taller than
/// `u32::MAX` pixels, which cannot be expressed as a single image.
pub fn compose_column(screen: &Screen) -> Option<RgbaImage> {
    let asset = screen.asset()?;
    let layout = screen.layout();
    let height = u32::try_from(layout.content_height()).ok()?;

    let tile_bitmap = scale_asset(asset, layout.tile());
    let mut image = RgbaImage::new(layout.content_width(), height);
    for tile in screen.tiles() {
        imageops::replace(&mut image, &tile_bitmap, 0, tile.y() as i64);
    }

    Some(image)
}

fn row_bytes(bitmap: &RgbaImage, row: u32, copy_width: usize) -> &[u8] {
    let stride = bitmap.width() as usize * BYTES_PER_PIXEL;
    let start = row as usize * stride;
    &bitmap.as_raw()[start..start + copy_width * BYTES_PER_PIXEL]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetFetcher;
    use crate::fetch::tests::MockHttpClient;
    use crate::fetch::FetchError;
    use crate::screen::ScreenConfig;
    use std::io::Cursor;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    /// A 4×4 PNG whose top two rows are red and bottom two rows are blue,
    /// so row alignment mistakes show up in assertions.
    fn striped_png() -> Vec<u8> {
        let image = RgbaImage::from_fn(4, 4, |_, y| {
            if y < 2 {
                Rgba(RED)
            } else {
                Rgba(BLUE)
            }
        });
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("encoding a fresh image buffer cannot fail");
        bytes
    }

    fn striped_screen(count: u32) -> Screen {
        let fetcher = AssetFetcher::new(MockHttpClient {
            response: Ok(striped_png()),
        });
        let config = ScreenConfig::new(
            "https://example.com/striped.png",
            TileSize::square(4).unwrap(),
            count,
        );
        Screen::load(&fetcher, &config)
    }

    fn empty_screen() -> Screen {
        let fetcher = AssetFetcher::new(MockHttpClient {
            response: Err(FetchError::Transport("offline".to_string())),
        });
        let config = ScreenConfig::new(
            "https://example.com/striped.png",
            TileSize::square(4).unwrap(),
            3,
        );
        Screen::load(&fetcher, &config)
    }

    fn pixel(image: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
        image.get_pixel(x, y).0
    }

    #[test]
    fn test_scale_asset_is_identity_at_matching_size() {
        let screen = striped_screen(1);
        let asset = screen.asset().unwrap();

        let scaled = scale_asset(asset, TileSize::square(4).unwrap());
        assert_eq!(scaled.as_raw(), asset.pixels().as_raw());
    }

    #[test]
    fn test_scale_asset_resizes_to_slot() {
        let screen = striped_screen(1);
        let asset = screen.asset().unwrap();

        let scaled = scale_asset(asset, TileSize::new(10, 6).unwrap());
        assert_eq!((scaled.width(), scaled.height()), (10, 6));
    }

    #[test]
    fn test_paint_background_fills_white() {
        let mut frame = vec![0u8; 3 * 2 * 4];
        paint_background(&mut frame);
        assert!(frame.chunks_exact(4).all(|px| px == WHITE));
    }

    #[test]
    fn test_compose_viewport_repeats_stripes_down_the_column() {
        // Content: tiles of red,red,blue,blue rows, stacked without gaps
        let screen = striped_screen(3);
        let viewport = Viewport::new(4, 8).unwrap();

        let image = compose_viewport(&screen, &viewport);
        for y in 0..8 {
            let expected = if y % 4 < 2 { RED } else { BLUE };
            assert_eq!(pixel(&image, 0, y), expected, "wrong color at row {}", y);
        }
    }

    #[test]
    fn test_compose_viewport_honors_scroll_offset() {
        let screen = striped_screen(3);
        let mut viewport = Viewport::new(4, 4).unwrap();
        // Band [6, 10): bottom half of tile 1, top half of tile 2
        viewport.scroll_to(6, screen.layout().content_height());

        let image = compose_viewport(&screen, &viewport);
        assert_eq!(pixel(&image, 0, 0), BLUE);
        assert_eq!(pixel(&image, 0, 1), BLUE);
        assert_eq!(pixel(&image, 0, 2), RED);
        assert_eq!(pixel(&image, 0, 3), RED);
    }

    #[test]
    fn test_compose_viewport_leaves_background_right_of_tiles() {
        // Tiles are 4px wide, viewport 6px: columns 4 and 5 stay background
        let screen = striped_screen(3);
        let viewport = Viewport::new(6, 4).unwrap();

        let image = compose_viewport(&screen, &viewport);
        assert_eq!(pixel(&image, 3, 0), RED);
        assert_eq!(pixel(&image, 4, 0), WHITE);
        assert_eq!(pixel(&image, 5, 3), WHITE);
    }

    #[test]
    fn test_compose_viewport_leaves_background_below_short_content() {
        // Two 4px tiles (8px of content) in a 12px-tall viewport
        let screen = striped_screen(2);
        let viewport = Viewport::new(4, 12).unwrap();

        let image = compose_viewport(&screen, &viewport);
        assert_eq!(pixel(&image, 0, 7), BLUE);
        assert_eq!(pixel(&image, 0, 8), WHITE);
        assert_eq!(pixel(&image, 0, 11), WHITE);
    }

    #[test]
    fn test_compose_viewport_of_empty_screen_is_blank() {
        let screen = empty_screen();
        let viewport = Viewport::new(4, 8).unwrap();

        let image = compose_viewport(&screen, &viewport);
        assert!(image.pixels().all(|px| px.0 == WHITE));
    }

    #[test]
    fn test_compose_viewport_is_deterministic() {
        let screen = striped_screen(3);
        let mut viewport = Viewport::new(4, 8).unwrap();
        viewport.scroll_to(3, screen.layout().content_height());

        let first = compose_viewport(&screen, &viewport);
        let second = compose_viewport(&screen, &viewport);
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn test_compose_column_stacks_every_tile() {
        let screen = striped_screen(3);

        let image = compose_column(&screen).unwrap();
        assert_eq!((image.width(), image.height()), (4, 12));
        for y in 0..12 {
            let expected = if y % 4 < 2 { RED } else { BLUE };
            assert_eq!(pixel(&image, 2, y), expected, "wrong color at row {}", y);
        }
    }

    #[test]
    fn test_compose_column_of_empty_screen_is_none() {
        assert!(compose_column(&empty_screen()).is_none());
    }

    #[test]
    fn test_paint_viewport_scrolled_to_bottom() {
        let screen = striped_screen(3);
        let mut viewport = Viewport::new(4, 8).unwrap();
        viewport.scroll_to(u64::MAX, screen.layout().content_height());
        assert_eq!(viewport.offset(), 4);

        let image = compose_viewport(&screen, &viewport);
        // Band [4, 12): tiles 1 and 2 in full
        for y in 0..8 {
            let expected = if y % 4 < 2 { RED } else { BLUE };
            assert_eq!(pixel(&image, 0, y), expected, "wrong color at row {}", y);
        }
    }
}
