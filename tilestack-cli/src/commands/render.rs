//! Render command - compose the tile column into a PNG.

use std::path::PathBuf;

use clap::Args;
use tilestack::compose;
use tilestack::config::ConfigFile;

use super::common::{self, ScreenFlags};
use crate::error::CliError;

/// Arguments for the render command.
#[derive(Debug, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub screen: ScreenFlags,

    /// Output PNG path
    #[arg(short, long, default_value = "tilestack.png")]
    pub output: PathBuf,

    /// Scroll offset in pixels from the top of the column
    #[arg(long, default_value_t = 0)]
    pub offset: u64,

    /// Compose the entire column instead of one viewport band
    #[arg(long)]
    pub full: bool,
}

/// Run the render command.
pub fn run(args: RenderArgs) -> Result<(), CliError> {
    let config = ConfigFile::load().unwrap_or_default();
    let settings = common::resolve_settings(&args.screen, &config)?;

    println!("tilestack render v{}", tilestack::VERSION);
    println!("==================");
    println!();
    println!("Source: {}", settings.screen.url());
    println!(
        "Tiles:  {} × {}",
        settings.screen.tile_count(),
        settings.screen.tile_size()
    );
    println!();

    let screen = common::load_screen(&settings);

    let image = if args.full {
        // Fall back to the viewport band when the column cannot be one
        // image: the screen is empty, or taller than u32::MAX pixels.
        match compose::compose_column(&screen) {
            Some(column) => column,
            None => compose::compose_viewport(&screen, &settings.viewport),
        }
    } else {
        let mut viewport = settings.viewport;
        viewport.scroll_to(args.offset, screen.layout().content_height());
        compose::compose_viewport(&screen, &viewport)
    };

    image.save(&args.output).map_err(|e| CliError::Output {
        path: args.output.display().to_string(),
        reason: e.to_string(),
    })?;

    println!(
        "Wrote {} ({}×{})",
        args.output.display(),
        image.width(),
        image.height()
    );

    Ok(())
}
