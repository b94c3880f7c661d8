//! Desktop window showing each portrait in turn, titled with the profile name.

use crate::error::{CrawlError, Result};
use crate::viewer::Portrait;
use eframe::egui;
use std::time::{Duration, Instant};

/// Which portrait is on screen and when to move on
#[derive(Debug)]
struct Slideshow {
    len: usize,
    index: usize,
    delay: Duration,
    shown_at: Option<Instant>,
}

impl Slideshow {
    fn new(len: usize, delay: Duration) -> Self {
        Self {
            len,
            index: 0,
            delay,
            shown_at: None,
        }
    }

    fn current(&self) -> Option<usize> {
        (self.index < self.len).then_some(self.index)
    }

    /// Moves to the next portrait once the delay is up, or right away on `skip`
    fn tick(&mut self, now: Instant, skip: bool) {
        if self.current().is_none() {
            return;
        }
        let shown_at = *self.shown_at.get_or_insert(now);
        if skip || now.duration_since(shown_at) >= self.delay {
            self.index += 1;
            self.shown_at = Some(now);
        }
    }

    fn remaining(&self, now: Instant) -> Duration {
        match self.shown_at {
            Some(shown_at) => self.delay.saturating_sub(now.duration_since(shown_at)),
            None => self.delay,
        }
    }
}

struct PortraitWindow {
    portraits: Vec<Portrait>,
    slideshow: Slideshow,
    texture: Option<(usize, egui::TextureHandle)>,
}

impl eframe::App for PortraitWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let skip = ctx.input(|i| i.key_pressed(egui::Key::Space) || i.key_pressed(egui::Key::ArrowRight));
        self.slideshow.tick(now, skip);

        let Some(index) = self.slideshow.current() else {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        };

        if self.texture.as_ref().map(|(shown, _)| *shown) != Some(index) {
            let portrait = &self.portraits[index];
            let (width, height) = portrait.image.dimensions();
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [width as usize, height as usize],
                portrait.image.as_raw(),
            );
            let texture = ctx.load_texture(&portrait.name, image, egui::TextureOptions::default());
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(portrait.name.clone()));
            self.texture = Some((index, texture));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some((_, texture)) = &self.texture {
                ui.image((texture.id(), texture.size_vec2()));
            }
        });

        ctx.request_repaint_after(self.slideshow.remaining(now));
    }
}

/// Opens a window and shows the portraits in order, `delay` apiece.
///
/// Space or the right arrow skips ahead. Blocks until the last portrait is done
/// or the window is closed; must run on the main thread.
pub fn show_portraits(portraits: Vec<Portrait>, delay: Duration) -> Result<()> {
    let Some(first) = portraits.first() else {
        ::log::info!("No portraits to show");
        return Ok(());
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_title(&first.name),
        ..Default::default()
    };
    let slideshow = Slideshow::new(portraits.len(), delay);

    eframe::run_native(
        "profile-crawl",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(PortraitWindow {
                portraits,
                slideshow,
                texture: None,
            }))
        }),
    )
    .map_err(|e| CrawlError::Viewer(e.to_string()))
}
