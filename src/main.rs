use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use flipbook::cli::Cli;
use flipbook::config::PlayerConfig;
use flipbook::renderer::UiRenderer;
use flipbook::widget::FramePlayer;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

// === Constants ===

const WINDOW_PADDING: u32 = 32;
const CONTROLS_HEIGHT: u32 = 64;

// === Application ===

struct App {
    title: String,
    window_size: (u32, u32),
    window: Option<Arc<Window>>,
    renderer: Option<UiRenderer>,
    player: Option<FramePlayer>,
}

impl App {
    fn new(config: &PlayerConfig, player: FramePlayer) -> Self {
        Self {
            title: config.title.clone(),
            window_size: window_size(config),
            window: None,
            renderer: None,
            player: Some(player),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(window), Some(player)) =
            (&mut self.renderer, &self.window, &mut self.player)
        else {
            return;
        };

        let result = renderer.render(window, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    player.ui(ui);
                });
            });
        });

        match result {
            Ok(delay) => schedule_repaint(event_loop, window, delay),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                renderer.resize(window.inner_size());
                window.request_redraw();
            }
            Err(e) => log::warn!("Render error: {}", e),
        }
    }

    /// Tear down the player first so its refresh timer is released
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(mut player) = self.player.take() {
            player.playback_mut().stop();
        }
        self.renderer = None;
        self.window = None;
        event_loop.exit();
    }
}

/// Inner window size that fits the frame plus the controls below it
fn window_size(config: &PlayerConfig) -> (u32, u32) {
    (
        config.width.saturating_add(WINDOW_PADDING),
        config
            .height
            .saturating_add(CONTROLS_HEIGHT + WINDOW_PADDING),
    )
}

fn schedule_repaint(event_loop: &ActiveEventLoop, window: &Window, delay: Duration) {
    if delay.is_zero() {
        window.request_redraw();
        event_loop.set_control_flow(ControlFlow::Wait);
    } else if let Some(deadline) = Instant::now().checked_add(delay) {
        event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
    } else {
        event_loop.set_control_flow(ControlFlow::Wait);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let (width, height) = self.window_size;
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title(self.title.as_str())
                    .with_inner_size(winit::dpi::LogicalSize::new(width, height)),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let renderer = match pollster::block_on(UiRenderer::new(window.clone())) {
                Ok(r) => r,
                Err(e) => {
                    log::error!("Failed to initialize renderer: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            window.request_redraw();
            self.window = Some(window);
            self.renderer = Some(renderer);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return; // egui consumed the event
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.shutdown(event_loop),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        // The refresh deadline passed - redraw so the player can tick
        if let StartCause::ResumeTimeReached { .. } = cause {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = PlayerConfig::from_cli(&cli).context("invalid configuration")?;

    let sequence = config.load_sequence().context("failed to load frames")?;
    log::info!(
        "loaded {} frames ({} broken) at {} fps",
        sequence.len(),
        sequence.broken_count(),
        config.fps
    );

    let player = FramePlayer::new(sequence, config.fps)?
        .with_display_size(egui::vec2(config.width as f32, config.height as f32))
        .with_refresh_interval(config.refresh_interval())?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut app = App::new(&config, player);

    log::info!("Flipbook - hover the frame to play/pause, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
