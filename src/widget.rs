use std::time::Duration;

use egui::{Align2, Color32, FontId, Rect, RichText, Sense, TextureHandle, TextureOptions, Vec2};

use crate::core::{SystemClock, TimeSource};
use crate::error::PlayerResult;
use crate::playback::{FrameTiming, Playback, PlaybackState};
use crate::sequence::{FrameImage, FrameSequence};

pub const DEFAULT_DISPLAY_SIZE: Vec2 = Vec2::new(640.0, 480.0);

const PLAY_GLYPH: &str = "▶";
const PAUSE_GLYPH: &str = "⏸";
const TOGGLE_SIZE: Vec2 = Vec2::new(48.0, 48.0);
const PLACEHOLDER_FILL: Color32 = Color32::from_gray(32);

/// Flipbook widget: current frame, hover-revealed play/pause toggle,
/// scrub slider and `"{elapsed}s / {total}s"` readout
///
/// ```no_run
/// # fn show(ui: &mut egui::Ui) -> flipbook::PlayerResult<()> {
/// let mut player = flipbook::FramePlayer::new(flipbook::demo::demo_sequence(), 0.2)?;
/// player.ui(ui);
/// # Ok(())
/// # }
/// ```
pub struct FramePlayer<C: TimeSource = SystemClock> {
    sequence: FrameSequence,
    playback: Playback<C>,
    display_size: Vec2,
    textures: Vec<Option<TextureHandle>>,
}

impl FramePlayer<SystemClock> {
    pub fn new(sequence: FrameSequence, fps: f64) -> PlayerResult<Self> {
        Self::with_clock(sequence, fps, SystemClock)
    }
}

impl<C: TimeSource> FramePlayer<C> {
    /// Fails for a non-positive frame rate; an empty sequence is accepted
    /// and shows a placeholder with the controls disabled
    pub fn with_clock(sequence: FrameSequence, fps: f64, clock: C) -> PlayerResult<Self> {
        let timing = FrameTiming::new(sequence.len(), fps)?;
        let textures = vec![None; sequence.len()];

        Ok(Self {
            sequence,
            playback: Playback::with_clock(timing, clock),
            display_size: DEFAULT_DISPLAY_SIZE,
            textures,
        })
    }

    pub fn with_display_size(mut self, size: Vec2) -> Self {
        self.display_size = size;
        self
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> PlayerResult<Self> {
        self.playback.set_refresh_interval(interval)?;
        Ok(self)
    }

    pub fn playback(&self) -> &Playback<C> {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut Playback<C> {
        &mut self.playback
    }

    pub fn sequence(&self) -> &FrameSequence {
        &self.sequence
    }

    pub fn display_size(&self) -> Vec2 {
        self.display_size
    }

    pub fn current_frame(&self) -> Option<&FrameImage> {
        self.sequence.get(self.playback.current_frame_index())
    }

    /// Number of frames uploaded to the GPU so far
    pub fn uploaded_textures(&self) -> usize {
        self.textures.iter().filter(|t| t.is_some()).count()
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) -> egui::Response {
        self.playback.poll();
        if let Some(delay) = self.playback.next_refresh() {
            ui.ctx().request_repaint_after(delay);
        }

        ui.vertical(|ui| {
            ui.set_width(self.display_size.x);
            self.frame_ui(ui);
            self.slider_ui(ui);
            ui.label(
                RichText::new(self.playback.time_label())
                    .small()
                    .color(Color32::GRAY),
            );
        })
        .response
    }

    fn frame_ui(&mut self, ui: &mut egui::Ui) {
        let (rect, _) = ui.allocate_exact_size(self.display_size, Sense::hover());

        if self.sequence.is_empty() {
            paint_placeholder(ui, rect, "No frames");
            return;
        }

        let index = self.playback.current_frame_index();
        match self.texture(ui.ctx(), index).map(|texture| texture.id()) {
            Some(texture_id) => {
                egui::Image::new((texture_id, rect.size())).paint_at(ui, rect);
            }
            None => {
                let label = self
                    .sequence
                    .get(index)
                    .map(|frame| frame.label())
                    .unwrap_or_default();
                paint_placeholder(ui, rect, &format!("✖ {label}"));
            }
        }

        if ui.rect_contains_pointer(rect) {
            let glyph = match self.playback.state() {
                PlaybackState::Playing => PAUSE_GLYPH,
                PlaybackState::Stopped => PLAY_GLYPH,
            };
            let button = egui::Button::new(RichText::new(glyph).size(28.0))
                .fill(Color32::from_rgb(41, 37, 36))
                .corner_radius(6.0);
            let toggle_rect = Rect::from_center_size(rect.center(), TOGGLE_SIZE);
            // Child ui so the overlay does not move the parent cursor
            let mut overlay = ui.new_child(egui::UiBuilder::new().max_rect(toggle_rect));
            if overlay.put(toggle_rect, button).clicked() {
                self.playback.toggle();
            }
        }
    }

    fn slider_ui(&mut self, ui: &mut egui::Ui) {
        let mut progress = self.playback.progress_percent();
        ui.spacing_mut().slider_width = self.display_size.x;

        let slider = egui::Slider::new(&mut progress, 0.0..=100.0).show_value(false);
        let response = ui.add_enabled(!self.sequence.is_empty(), slider);
        if response.changed() {
            self.playback.scrub(progress);
        }
    }

    /// Texture for a frame, uploaded on first use; `None` for broken frames
    fn texture(&mut self, ctx: &egui::Context, index: usize) -> Option<&TextureHandle> {
        if self.textures[index].is_none() {
            let frame = self.sequence.get(index)?;
            let pixels = frame.pixels()?;
            let image = egui::ColorImage::from_rgba_unmultiplied(pixels.size(), &pixels.rgba);
            self.textures[index] = Some(ctx.load_texture(frame.label(), image, TextureOptions::LINEAR));
        }
        self.textures[index].as_ref()
    }
}

fn paint_placeholder(ui: &egui::Ui, rect: Rect, text: &str) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, PLACEHOLDER_FILL);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        text,
        FontId::proportional(16.0),
        Color32::GRAY,
    );
}
