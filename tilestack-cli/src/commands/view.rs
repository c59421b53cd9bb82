//! View command - open the scrollable tile column in a window.
//!
//! The window is fixed at the viewport size (resizing a pixel surface is
//! a separate problem this tool does not need). Repaints happen only on
//! scroll input, so an idle window costs nothing.

use clap::Args;
use pixels::{PixelsBuilder, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{
    ElementState, Event, KeyboardInput, MouseScrollDelta, StartCause, VirtualKeyCode, WindowEvent,
};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use tilestack::compose;
use tilestack::config::ConfigFile;

use super::common::{self, ScreenFlags};
use crate::error::CliError;

/// Pixels scrolled per mouse-wheel line.
const LINE_SCROLL_PX: f32 = 40.0;

/// Pixels scrolled per arrow-key press.
const ARROW_SCROLL_PX: i64 = 40;

/// Arguments for the view command.
#[derive(Debug, Args)]
pub struct ViewArgs {
    #[command(flatten)]
    pub screen: ScreenFlags,
}

/// Run the view command.
pub fn run(args: ViewArgs) -> Result<(), CliError> {
    let config = ConfigFile::load().unwrap_or_default();
    let settings = common::resolve_settings(&args.screen, &config)?;
    let mut viewport = settings.viewport;

    println!("tilestack view v{}", tilestack::VERSION);
    println!("================");
    println!();
    println!("Source:   {}", settings.screen.url());
    println!(
        "Tiles:    {} × {}",
        settings.screen.tile_count(),
        settings.screen.tile_size()
    );
    println!("Viewport: {}×{}", viewport.width(), viewport.height());
    println!();
    println!("Scroll with the mouse wheel, arrow keys, PageUp/PageDown, Home/End.");
    println!("Press Escape or close the window to exit.");
    println!();

    let screen = common::load_screen(&settings);
    let content_height = screen.layout().content_height();
    tracing::info!(
        tiles = screen.tiles().len(),
        content_height,
        "screen loaded"
    );

    // Scale once up front; every repaint blits the same bitmap.
    let tile_bitmap = screen
        .asset()
        .map(|asset| compose::scale_asset(asset, screen.layout().tile()));

    let event_loop = EventLoop::new();
    let size = LogicalSize::new(viewport.width(), viewport.height());
    let window = WindowBuilder::new()
        .with_title("tilestack")
        .with_inner_size(size)
        .with_min_inner_size(size)
        .with_max_inner_size(size)
        .with_resizable(false)
        .build(&event_loop)
        .map_err(|e| CliError::Window(e.to_string()))?;

    let mut pixels = {
        let surface_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(surface_size.width, surface_size.height, &window);
        PixelsBuilder::new(viewport.width(), viewport.height(), surface_texture)
            .blend_state(pixels::wgpu::BlendState::REPLACE)
            .build()
            .map_err(|e| CliError::Window(e.to_string()))?
    };

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            // First paint once the window is up
            Event::NewEvents(StartCause::Init) => window.request_redraw(),

            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,

                WindowEvent::MouseWheel { delta, .. } => {
                    let pixels_moved = match delta {
                        MouseScrollDelta::LineDelta(_, lines) => lines * LINE_SCROLL_PX,
                        MouseScrollDelta::PixelDelta(position) => position.y as f32,
                    };
                    // Wheel up scrolls back toward the top of the column
                    viewport.scroll_by(-(pixels_moved.round() as i64), content_height);
                    window.request_redraw();
                }

                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(key),
                            ..
                        },
                    ..
                } => {
                    let page = viewport.height() as i64;
                    match key {
                        VirtualKeyCode::Up => viewport.scroll_by(-ARROW_SCROLL_PX, content_height),
                        VirtualKeyCode::Down => viewport.scroll_by(ARROW_SCROLL_PX, content_height),
                        VirtualKeyCode::PageUp => viewport.scroll_by(-page, content_height),
                        VirtualKeyCode::PageDown => viewport.scroll_by(page, content_height),
                        VirtualKeyCode::Home => viewport.scroll_to(0, content_height),
                        VirtualKeyCode::End => viewport.scroll_to(u64::MAX, content_height),
                        VirtualKeyCode::Escape => {
                            *control_flow = ControlFlow::Exit;
                            return;
                        }
                        _ => return,
                    }
                    window.request_redraw();
                }

                _ => {}
            },

            Event::RedrawRequested(_) => {
                let frame = pixels.get_frame_mut();
                match tile_bitmap.as_ref() {
                    Some(bitmap) => compose::paint_viewport(&screen, bitmap, &viewport, frame),
                    None => compose::paint_background(frame),
                }

                if let Err(err) = pixels.render() {
                    tracing::error!(%err, "pixels render failed");
                    *control_flow = ControlFlow::Exit;
                }
            }

            _ => {}
        }
    });
}
