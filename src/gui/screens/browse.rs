//! Catalog browser: search bar, sortable template table

use super::{ScreenContext, UiAction};
use crate::api::MemeTemplate;
use crate::app::sort::{SortColumn, SortSpecs};
use crate::app::state::{AppState, CatalogState};
use crate::gui::image_cache::ImageCache;
use crate::gui::theme::colors;
use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};

const HEADER_HEIGHT: f32 = 26.0;
const ROW_HEIGHT: f32 = 26.0;
/// Room under a thumbnail for the row buttons
const THUMBNAIL_ROW_EXTRA: f32 = 36.0;

const COLUMNS: [(&str, Option<SortColumn>); 6] = [
    ("ID", Some(SortColumn::Id)),
    ("Name", Some(SortColumn::Name)),
    ("Image", None),
    ("Width", Some(SortColumn::Width)),
    ("Height", Some(SortColumn::Height)),
    ("Text Areas", Some(SortColumn::BoxCount)),
];

enum RowAction {
    Reveal(String),
    Hide(String),
    Open(String),
    Create(MemeTemplate),
}

pub fn show(
    ctx: &egui::Context,
    state: &mut AppState,
    screen: &mut ScreenContext<'_>,
    actions: &mut Vec<UiAction>,
) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.label("Search for a meme:");
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.search)
                    .hint_text("Name contains…")
                    .desired_width(320.0),
            );
            let label = if state.show_generated {
                "Hide Generated Memes"
            } else {
                "Show Generated Memes"
            };
            if ui.button(label).clicked() {
                state.show_generated = !state.show_generated;
            }
        });

        if let Some(status) = &state.status {
            ui.label(RichText::new(status).color(colors::TEXT_DIM));
        }
        ui.add_space(6.0);

        if matches!(state.catalog, CatalogState::Ready(_)) {
            table(ui, state, screen);
        } else if let CatalogState::Failed(reason) = &state.catalog {
            ui.label(RichText::new("No data").strong());
            ui.colored_label(colors::ERROR, reason);
            if ui.button("Retry").clicked() {
                actions.push(UiAction::RetryCatalog);
            }
        } else {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading meme catalog…");
            });
        }
    });
}

fn table(ui: &mut egui::Ui, state: &mut AppState, screen: &mut ScreenContext<'_>) {
    let rows: Vec<MemeTemplate> = state.visible_templates().into_iter().cloned().collect();
    let sort = state.sort.clone();
    let additive = ui.input(|i| i.modifiers.shift);
    let thumb = screen.thumbnail_size;

    let mut clicked_column = None;
    let mut row_actions = Vec::new();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(90.0))
        .column(Column::remainder().at_least(180.0))
        .column(Column::auto().at_least(thumb + 20.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(80.0))
        .header(HEADER_HEIGHT, |mut header| {
            for (label, column) in COLUMNS {
                header.col(|ui| match column {
                    Some(column) => {
                        if sort_button(ui, label, column, &sort).clicked() {
                            clicked_column = Some(column);
                        }
                    }
                    None => {
                        ui.strong(label);
                    }
                });
            }
        })
        .body(|mut body| {
            if rows.is_empty() {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.label(format!("No meme found with the name: {}", state.search));
                    });
                });
                return;
            }

            for template in &rows {
                let revealed = state.is_revealed(&template.url);
                let height = if revealed {
                    thumb + THUMBNAIL_ROW_EXTRA
                } else {
                    ROW_HEIGHT
                };

                body.row(height, |mut row| {
                    row.col(|ui| {
                        ui.label(&template.id);
                    });
                    row.col(|ui| {
                        ui.label(&template.name);
                    });
                    row.col(|ui| {
                        image_cell(ui, template, revealed, thumb, screen.images, &mut row_actions);
                    });
                    row.col(|ui| {
                        ui.label(template.width.to_string());
                    });
                    row.col(|ui| {
                        ui.label(template.height.to_string());
                    });
                    row.col(|ui| {
                        ui.label(template.box_count.to_string());
                    });
                });
            }
        });

    if let Some(column) = clicked_column {
        state.click_sort(column, additive);
    }

    for action in row_actions {
        match action {
            RowAction::Reveal(url) => state.reveal(&url),
            RowAction::Hide(url) => state.hide(&url),
            RowAction::Open(url) => state.open_fullscreen(&url),
            RowAction::Create(template) => state.start_draft(&template),
        }
    }
}

fn sort_button(ui: &mut egui::Ui, label: &str, column: SortColumn, sort: &SortSpecs) -> egui::Response {
    let text = match sort.position(column) {
        Some((i, direction)) if sort.specs().len() > 1 => {
            format!("{} {}{}", label, direction.arrow(), i + 1)
        }
        Some((_, direction)) => format!("{} {}", label, direction.arrow()),
        None => label.to_string(),
    };

    ui.add(egui::Button::new(RichText::new(text).strong()).frame(false))
        .on_hover_text("Click to sort, Shift+click to add a sort key")
}

fn image_cell(
    ui: &mut egui::Ui,
    template: &MemeTemplate,
    revealed: bool,
    thumb: f32,
    images: &mut ImageCache,
    actions: &mut Vec<RowAction>,
) {
    if !revealed {
        if ui.button("See Image").clicked() {
            actions.push(RowAction::Reveal(template.url.clone()));
        }
        return;
    }

    let ctx = ui.ctx().clone();
    match images.texture(&ctx, &template.url) {
        Some(texture) => {
            ui.vertical(|ui| {
                let image = egui::Image::new(&texture).fit_to_exact_size(egui::vec2(thumb, thumb));
                if ui
                    .add(egui::ImageButton::new(image))
                    .on_hover_text("View full size")
                    .clicked()
                {
                    actions.push(RowAction::Open(template.url.clone()));
                }
                ui.horizontal(|ui| {
                    if ui.button("Create Meme").clicked() {
                        actions.push(RowAction::Create(template.clone()));
                    }
                    if ui.button("Close Image").clicked() {
                        actions.push(RowAction::Hide(template.url.clone()));
                    }
                });
            });
        }
        None => {
            super::image_placeholder(ui, images, &template.url);
            if ui.small_button("Close").clicked() {
                actions.push(RowAction::Hide(template.url.clone()));
            }
        }
    }
}
