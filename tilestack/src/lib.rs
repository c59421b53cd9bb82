//! tilestack - tile one remote image into a scrollable column
//!
//! A small list-view stress test: download a single image over HTTPS,
//! decode it exactly once, then stack a fixed number of equally sized
//! copies of it in a vertical, scrollable column. Every tile is
//! materialized eagerly at load time, and a failed download or decode
//! leaves the column silently empty.
//!
//! The pipeline is exposed as testable pieces:
//!
//! - [`fetch`] - the HTTP transport behind injectable client traits
//! - [`asset`] - the one decoded image every tile shares
//! - [`layout`] - slot geometry for the gap-free column
//! - [`viewport`] - clamped scrolling over the column
//! - [`screen`] - eager tile materialization with the silent-abort load
//! - [`compose`] - rasterizing tiles into RGBA frames
//! - [`config`] - the INI configuration file and its typed keys
//!
//! The `tilestack` binary (in the `tilestack-cli` crate) wires these into
//! `view`, `render`, and `config` subcommands.

pub mod asset;
pub mod compose;
pub mod config;
pub mod fetch;
pub mod layout;
pub mod screen;
pub mod viewport;

/// Crate version, surfaced by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
