//! Caption form for the selected template

use super::{ScreenContext, UiAction};
use crate::app::AppState;
use crate::config::{ENV_PASSWORD, ENV_USERNAME};
use crate::gui::theme::colors;
use eframe::egui::{self, RichText};

const PREVIEW_SIZE: f32 = 320.0;

pub fn show(
    ctx: &egui::Context,
    state: &mut AppState,
    screen: &mut ScreenContext<'_>,
    actions: &mut Vec<UiAction>,
) {
    let status = state.status.clone();
    let Some(draft) = state.draft.as_mut() else {
        return;
    };

    let mut submit = false;
    let mut cancel = false;

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading(format!("Create Meme: {}", draft.template_name));
        ui.add_space(8.0);

        ui.horizontal_top(|ui| {
            match screen.images.texture(ctx, &draft.template_url) {
                Some(texture) => {
                    ui.add(
                        egui::Image::new(&texture)
                            .max_size(egui::vec2(PREVIEW_SIZE, PREVIEW_SIZE))
                            .maintain_aspect_ratio(true),
                    );
                }
                None => super::image_placeholder(ui, screen.images, &draft.template_url),
            }

            ui.vertical(|ui| {
                ui.label("Enter text for the meme:");
                if draft.captions.is_empty() {
                    ui.label(RichText::new("This template has no text areas.").color(colors::TEXT_DIM));
                }
                for (i, caption) in draft.captions.iter_mut().enumerate() {
                    ui.horizontal(|ui| {
                        ui.label(format!("Text {}", i + 1));
                        ui.add_enabled(
                            !draft.submitting,
                            egui::TextEdit::singleline(caption).desired_width(320.0),
                        );
                    });
                }

                if !screen.can_create {
                    ui.colored_label(
                        colors::ERROR,
                        format!(
                            "Set {} and {} (or the settings file) to create memes.",
                            ENV_USERNAME, ENV_PASSWORD
                        ),
                    );
                }

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let enabled = screen.can_create && !draft.submitting;
                    if ui
                        .add_enabled(enabled, egui::Button::new("Generate Meme"))
                        .clicked()
                    {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                    if draft.submitting {
                        ui.spinner();
                        ui.label("Generating…");
                    }
                });

                if let Some(status) = &status {
                    ui.label(RichText::new(status).color(colors::TEXT_DIM));
                }
            });
        });
    });

    if submit {
        actions.push(UiAction::SubmitMeme);
    }
    if cancel {
        state.cancel_draft();
    }
}
