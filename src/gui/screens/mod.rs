//! Screen modules
//!
//! Each screen is a separate module with its show function. Screens mutate
//! `AppState` directly and return the actions that need background work.

mod browse;
mod create;
mod fullscreen;
mod generated;

use crate::app::AppState;
use crate::gui::image_cache::{ImageCache, ImageState};
use crate::gui::theme::colors;
use eframe::egui;

/// Requests that the app turns into background tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    RetryCatalog,
    SubmitMeme,
}

/// Services the screens draw with
pub struct ScreenContext<'a> {
    pub images: &'a mut ImageCache,
    pub thumbnail_size: f32,
    pub can_create: bool,
}

/// Draw the current frame
pub fn show(
    ctx: &egui::Context,
    state: &mut AppState,
    screen: &mut ScreenContext<'_>,
) -> Vec<UiAction> {
    let mut actions = Vec::new();

    if state.fullscreen.is_some() {
        fullscreen::show(ctx, state, screen);
    } else if state.draft.is_some() {
        create::show(ctx, state, screen, &mut actions);
    } else {
        browse::show(ctx, state, screen, &mut actions);
        if state.show_generated {
            generated::show(ctx, state, screen);
        }
    }

    actions
}

/// Spinner while loading, or the failure with a retry button
fn image_placeholder(ui: &mut egui::Ui, images: &mut ImageCache, url: &str) {
    let failure = match images.state(url) {
        Some(ImageState::Failed { reason, .. }) => Some(reason.clone()),
        _ => None,
    };

    match failure {
        Some(reason) => {
            ui.colored_label(colors::ERROR, "Failed to load")
                .on_hover_text(reason);
            if ui
                .add_enabled(images.can_retry(url), egui::Button::new("Retry"))
                .clicked()
            {
                images.retry(url);
            }
        }
        None => {
            ui.spinner();
        }
    }
}
