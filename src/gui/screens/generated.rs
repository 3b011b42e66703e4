//! Gallery of memes generated this session

use super::ScreenContext;
use crate::app::AppState;
use crate::gui::theme::colors;
use eframe::egui::{self, RichText};

const GALLERY_THUMBNAIL: f32 = 150.0;

pub fn show(ctx: &egui::Context, state: &mut AppState, screen: &mut ScreenContext<'_>) {
    let urls = state.history.urls().to_vec();
    let mut open = state.show_generated;
    let mut close_clicked = false;
    let mut selected = None;

    egui::Window::new("Generated Memes")
        .open(&mut open)
        .resizable(true)
        .default_width(360.0)
        .show(ctx, |ui| {
            ui.label("List of all generated memes:");
            if urls.is_empty() {
                ui.label(RichText::new("Nothing generated yet.").color(colors::TEXT_DIM));
            }

            egui::ScrollArea::vertical().max_height(600.0).show(ui, |ui| {
                for url in &urls {
                    ui.label(url);
                    match screen.images.texture(ctx, url) {
                        Some(texture) => {
                            let image = egui::Image::new(&texture)
                                .fit_to_exact_size(egui::vec2(GALLERY_THUMBNAIL, GALLERY_THUMBNAIL));
                            if ui.add(egui::ImageButton::new(image)).clicked() {
                                selected = Some(url.clone());
                            }
                        }
                        None => super::image_placeholder(ui, screen.images, url),
                    }
                    ui.separator();
                }
            });

            if ui.button("Close").clicked() {
                close_clicked = true;
            }
        });

    state.show_generated = open && !close_clicked;
    if let Some(url) = selected {
        state.open_fullscreen(&url);
    }
}
