//! Full-size image viewer. Any click or Escape closes it.

use super::ScreenContext;
use crate::app::AppState;
use eframe::egui;

pub fn show(ctx: &egui::Context, state: &mut AppState, screen: &mut ScreenContext<'_>) {
    let Some(url) = state.fullscreen.clone() else {
        return;
    };

    let mut close = ctx.input(|i| i.key_pressed(egui::Key::Escape));

    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(egui::Color32::BLACK))
        .show(ctx, |ui| match screen.images.texture(ctx, &url) {
            Some(texture) => {
                let size = ui.available_size();
                ui.centered_and_justified(|ui| {
                    ui.add(
                        egui::Image::new(&texture)
                            .max_size(size)
                            .maintain_aspect_ratio(true),
                    );
                });
                if ctx.input(|i| i.pointer.primary_clicked()) {
                    close = true;
                }
            }
            None => {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() / 3.0);
                    super::image_placeholder(ui, screen.images, &url);
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            }
        });

    if close {
        state.close_fullscreen();
    }
}
