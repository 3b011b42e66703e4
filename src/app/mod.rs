//! Application
//!
//! Owns the UI state, the texture cache and the channels that carry
//! background results back to the render loop.

pub mod sort;
pub mod state;

pub use state::{AppEvent, AppState, CatalogState, CreateDraft};

use crate::api::ImgflipClient;
use crate::config::Settings;
use crate::gui::image_cache::ImageCache;
use crate::gui::screens::{self, ScreenContext, UiAction};
use crate::gui::theme;
use crate::history::GeneratedMemes;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use log::{debug, info};
use std::sync::Arc;

pub struct App {
    state: AppState,
    images: ImageCache,
    api: Arc<ImgflipClient>,
    runtime: tokio::runtime::Handle,
    events_tx: Sender<AppEvent>,
    events_rx: Receiver<AppEvent>,
    thumbnail_size: f32,
}

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: &Settings,
        api: Arc<ImgflipClient>,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        theme::apply(&cc.egui_ctx);

        let (events_tx, events_rx) = crossbeam_channel::unbounded();
        let images = ImageCache::new(
            api.http().clone(),
            runtime.clone(),
            settings.max_texture_side,
        );

        let mut app = Self {
            state: AppState::new(GeneratedMemes::new(&settings.history_file)),
            images,
            api,
            runtime,
            events_tx,
            events_rx,
            thumbnail_size: settings.thumbnail_size,
        };
        app.spawn_catalog_fetch(&cc.egui_ctx);
        app
    }

    fn spawn_catalog_fetch(&mut self, ctx: &egui::Context) {
        self.state.reload_catalog();

        let api = self.api.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let result = api.fetch_catalog().await;
            if tx.send(AppEvent::CatalogLoaded(result)).is_ok() {
                ctx.request_repaint();
            }
        });
    }

    fn spawn_caption(&self, ctx: &egui::Context, template_id: String, captions: Vec<String>) {
        info!("Creating meme from template {}", template_id);

        let api = self.api.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let result = api.caption_image(&template_id, &captions).await;
            if tx.send(AppEvent::MemeCreated { template_id, result }).is_ok() {
                ctx.request_repaint();
            }
        });
    }

    /// Apply results that arrived since the last frame
    fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            debug!("Applying {:?}", event);
            self.state.apply(event);
        }
    }

    fn handle_action(&mut self, ctx: &egui::Context, action: UiAction) {
        match action {
            UiAction::RetryCatalog => self.spawn_catalog_fetch(ctx),
            UiAction::SubmitMeme => {
                if let Some((template_id, captions)) = self.state.begin_submit() {
                    self.spawn_caption(ctx, template_id, captions);
                }
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();
        self.images.update(ctx);

        let mut screen = ScreenContext {
            images: &mut self.images,
            thumbnail_size: self.thumbnail_size,
            can_create: self.api.has_credentials(),
        };
        let actions = screens::show(ctx, &mut self.state, &mut screen);

        for action in actions {
            self.handle_action(ctx, action);
        }
    }
}
