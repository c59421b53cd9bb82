//! Common flags and settings resolution shared across CLI commands.
//!
//! Every setting resolves CLI flag > config file > built-in default, so
//! `tilestack view` with no flags works out of the box.

use std::time::Duration;

use clap::Args;
use tilestack::asset::AssetFetcher;
use tilestack::config::ConfigFile;
use tilestack::fetch::ReqwestClient;
use tilestack::layout::TileSize;
use tilestack::screen::{Screen, ScreenConfig};
use tilestack::viewport::Viewport;

use crate::error::CliError;

/// Flags shared by commands that load a screen.
#[derive(Debug, Args)]
pub struct ScreenFlags {
    /// Image URL to fetch and tile
    #[arg(long)]
    pub url: Option<String>,

    /// Number of tiles in the column
    #[arg(long)]
    pub count: Option<u32>,

    /// Tile slot size as WIDTHxHEIGHT, or one number for a square
    #[arg(long)]
    pub tile_size: Option<String>,

    /// Viewport size as WIDTHxHEIGHT
    #[arg(long)]
    pub viewport: Option<String>,

    /// Download timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Settings for one screen run after resolution.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub screen: ScreenConfig,
    pub viewport: Viewport,
    pub timeout: Duration,
}

/// Resolve settings from CLI flags and the config file.
pub fn resolve_settings(
    flags: &ScreenFlags,
    config: &ConfigFile,
) -> Result<ResolvedSettings, CliError> {
    let url = flags.url.clone().unwrap_or_else(|| config.image.url.clone());

    let (tile_width, tile_height) = match &flags.tile_size {
        Some(spec) => parse_dimensions(spec, "--tile-size")?,
        None => (config.tiles.width, config.tiles.height),
    };
    let tile_size =
        TileSize::new(tile_width, tile_height).map_err(|e| CliError::Config(e.to_string()))?;

    let count = flags.count.unwrap_or(config.tiles.count);

    let (viewport_width, viewport_height) = match &flags.viewport {
        Some(spec) => parse_dimensions(spec, "--viewport")?,
        None => (config.viewport.width, config.viewport.height),
    };
    let viewport = Viewport::new(viewport_width, viewport_height)
        .map_err(|e| CliError::Config(e.to_string()))?;

    let timeout = Duration::from_secs(flags.timeout.unwrap_or(config.download.timeout));

    Ok(ResolvedSettings {
        screen: ScreenConfig::new(url, tile_size, count),
        viewport,
        timeout,
    })
}

/// Fetch the asset and materialize the screen.
///
/// Honors the silent-failure contract: a client, transport, or decode
/// problem yields an empty screen rather than an error.
pub fn load_screen(settings: &ResolvedSettings) -> Screen {
    match ReqwestClient::with_timeout(settings.timeout) {
        Ok(client) => Screen::load(&AssetFetcher::new(client), &settings.screen),
        Err(error) => {
            tracing::debug!(%error, "HTTP client construction failed, screen stays empty");
            Screen::empty(settings.screen.clone())
        }
    }
}

/// Parse "640x480" or a bare "100" (meaning a square) into a pair.
fn parse_dimensions(spec: &str, flag: &str) -> Result<(u32, u32), CliError> {
    let parse_side = |side: &str| {
        side.trim().parse::<u32>().map_err(|_| {
            CliError::Config(format!(
                "{} expects WIDTHxHEIGHT or a single number, got '{}'",
                flag, spec
            ))
        })
    };

    match spec.split_once(['x', 'X']) {
        Some((width, height)) => Ok((parse_side(width)?, parse_side(height)?)),
        None => {
            let side = parse_side(spec)?;
            Ok((side, side))
        }
    }
}
