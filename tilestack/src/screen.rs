//! The materialized tile column
//!
//! A [`Screen`] is one load of the app: fetch the configured image once,
//! then stack `tile_count` copies of it in a vertical column. Every tile
//! is materialized eagerly at load time; nothing is created or destroyed
//! while scrolling.
//!
//! A failed fetch or decode aborts the load silently: the screen simply
//! has no tiles and no content height, and no error surfaces to the user.
//! The failure is recorded at debug level for anyone running with logging
//! turned up.

use std::sync::Arc;

use crate::asset::{AssetFetcher, AsyncAssetFetcher, ImageAsset};
use crate::config;
use crate::fetch::{AsyncHttpClient, HttpClient};
use crate::layout::{TileLayout, TileSize};
use crate::viewport::Viewport;

/// What to fetch and how to tile it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenConfig {
    url: String,
    tile_size: TileSize,
    tile_count: u32,
}

impl ScreenConfig {
    /// Creates a screen configuration.
    pub fn new(url: impl Into<String>, tile_size: TileSize, tile_count: u32) -> Self {
        Self {
            url: url.into(),
            tile_size,
            tile_count,
        }
    }

    /// Returns the asset URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the tile slot size.
    pub fn tile_size(&self) -> TileSize {
        self.tile_size
    }

    /// Returns the number of tiles to materialize.
    pub fn tile_count(&self) -> u32 {
        self.tile_count
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            url: config::DEFAULT_IMAGE_URL.to_string(),
            tile_size: TileSize::DEFAULT,
            tile_count: config::DEFAULT_TILE_COUNT,
        }
    }
}

/// One slot in the column: its index, vertical offset, and a handle on
/// the shared asset.
#[derive(Debug, Clone)]
pub struct Tile {
    index: u32,
    y: u64,
    asset: Arc<ImageAsset>,
}

impl Tile {
    /// Returns the tile's position in the column, counting from the top.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Returns the tile's vertical offset from the top of the content.
    pub fn y(&self) -> u64 {
        self.y
    }

    /// Returns the shared decoded asset.
    pub fn asset(&self) -> &Arc<ImageAsset> {
        &self.asset
    }
}

/// The loaded tile column.
///
/// Invariant: `tiles.len() == layout.count()`. A screen whose load failed
/// has a zero-count layout, so the column is empty and its content height
/// is zero.
#[derive(Debug)]
pub struct Screen {
    config: ScreenConfig,
    layout: TileLayout,
    tiles: Vec<Tile>,
}

impl Screen {
    /// Fetches the asset and materializes every tile eagerly.
    ///
    /// Any fetch or decode failure produces an empty screen instead of an
    /// error: the user sees a blank scroll view, nothing retries, and
    /// nothing is reported.
    pub fn load<C: HttpClient>(fetcher: &AssetFetcher<C>, config: &ScreenConfig) -> Screen {
        match fetcher.fetch(config.url()) {
            Ok(asset) => Self::materialize(config.clone(), asset),
            Err(error) => {
                tracing::debug!(url = config.url(), %error, "asset load failed, screen stays empty");
                Self::empty(config.clone())
            }
        }
    }

    /// Async twin of [`Screen::load`] with the same silent-failure
    /// contract.
    pub async fn load_async<C: AsyncHttpClient>(
        fetcher: &AsyncAssetFetcher<C>,
        config: &ScreenConfig,
    ) -> Screen {
        match fetcher.fetch(config.url()).await {
            Ok(asset) => Self::materialize(config.clone(), asset),
            Err(error) => {
                tracing::debug!(url = config.url(), %error, "asset load failed, screen stays empty");
                Self::empty(config.clone())
            }
        }
    }

    /// Creates a screen with no tiles, the result of a failed load.
    pub fn empty(config: ScreenConfig) -> Screen {
        let layout = TileLayout::new(config.tile_size(), 0);
        Screen {
            config,
            layout,
            tiles: Vec::new(),
        }
    }

    fn materialize(config: ScreenConfig, asset: Arc<ImageAsset>) -> Screen {
        let layout = TileLayout::new(config.tile_size(), config.tile_count());
        let tiles = (0..layout.count())
            .map(|index| Tile {
                index,
                y: layout.slot_y(index),
                asset: Arc::clone(&asset),
            })
            .collect();

        Screen {
            config,
            layout,
            tiles,
        }
    }

    /// Returns the configuration this screen was loaded with.
    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Returns the column geometry.
    ///
    /// A failed load reports a zero-count layout regardless of the
    /// configured tile count.
    pub fn layout(&self) -> TileLayout {
        self.layout
    }

    /// Returns every materialized tile, top to bottom.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Returns `true` when the load failed or zero tiles were requested.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Returns the shared asset, or `None` for an empty screen.
    pub fn asset(&self) -> Option<&Arc<ImageAsset>> {
        self.tiles.first().map(|tile| tile.asset())
    }

    /// Returns the tiles intersecting the viewport's current band.
    pub fn visible_tiles(&self, viewport: &Viewport) -> &[Tile] {
        let band = viewport.visible_band(self.layout.content_height());
        let range = self.layout.visible_range(band);
        &self.tiles[range.start as usize..range.end as usize]
    }
}
