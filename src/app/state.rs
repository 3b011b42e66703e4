//! Application State
//!
//! Everything the UI shows, owned by the UI thread. Background work reports
//! back through `AppEvent`.

use super::sort::{sort_templates, SortColumn, SortSpecs};
use crate::api::{ApiError, MemeTemplate};
use crate::history::GeneratedMemes;
use log::{error, info, warn};
use std::collections::HashSet;

/// Results of background API calls
#[derive(Debug)]
pub enum AppEvent {
    CatalogLoaded(Result<Vec<MemeTemplate>, ApiError>),
    MemeCreated {
        template_id: String,
        result: Result<String, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    Loading,
    Ready(Vec<MemeTemplate>),
    /// Fetch failed; the UI shows a "no data" state with this reason
    Failed(String),
}

/// Upper bound on caption fields, whatever the catalog reports
pub const MAX_CAPTIONS: usize = 20;

/// Caption form for one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDraft {
    pub template_id: String,
    pub template_name: String,
    pub template_url: String,
    pub captions: Vec<String>,
    pub submitting: bool,
}

impl CreateDraft {
    pub fn for_template(template: &MemeTemplate) -> Self {
        Self {
            template_id: template.id.clone(),
            template_name: template.name.clone(),
            template_url: template.url.clone(),
            captions: vec![String::new(); (template.box_count as usize).min(MAX_CAPTIONS)],
            submitting: false,
        }
    }
}

pub struct AppState {
    pub catalog: CatalogState,
    pub sort: SortSpecs,
    pub search: String,
    /// Rows whose thumbnail the user asked to see
    pub revealed: HashSet<String>,
    pub show_generated: bool,
    pub draft: Option<CreateDraft>,
    pub fullscreen: Option<String>,
    pub history: GeneratedMemes,
    /// Last user-facing notice
    pub status: Option<String>,
}

impl AppState {
    pub fn new(history: GeneratedMemes) -> Self {
        Self {
            catalog: CatalogState::Loading,
            sort: SortSpecs::default(),
            search: String::new(),
            revealed: HashSet::new(),
            show_generated: false,
            draft: None,
            fullscreen: None,
            history,
            status: None,
        }
    }

    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::CatalogLoaded(Ok(mut templates)) => {
                sort_templates(&mut templates, &self.sort);
                info!("Catalog ready with {} templates", templates.len());
                self.catalog = CatalogState::Ready(templates);
            }
            AppEvent::CatalogLoaded(Err(e)) => {
                error!("Failed to fetch meme data: {}", e);
                self.catalog = CatalogState::Failed(e.to_string());
            }
            AppEvent::MemeCreated {
                template_id,
                result: Ok(url),
            } => {
                if let Err(e) = self.history.push(url.clone()) {
                    error!(
                        "Failed to save generated memes to {}: {}",
                        self.history.path().display(),
                        e
                    );
                    self.status = Some(format!("Meme created, but saving the list failed: {}", e));
                } else {
                    self.status = Some(format!("Meme created: {}", url));
                }

                if self.draft.as_ref().is_some_and(|d| d.template_id == template_id) {
                    self.draft = None;
                }
                self.fullscreen = Some(url);
            }
            AppEvent::MemeCreated {
                template_id,
                result: Err(e),
            } => {
                error!("Failed to create meme from template {}: {}", template_id, e);
                if let Some(draft) = self.draft.as_mut() {
                    if draft.template_id == template_id {
                        draft.submitting = false;
                    }
                }
                self.status = Some(format!("Failed to create meme: {}", e));
            }
        }
    }

    /// Loaded templates in current sort order; empty unless the catalog is ready
    pub fn templates(&self) -> &[MemeTemplate] {
        match &self.catalog {
            CatalogState::Ready(templates) => templates,
            _ => &[],
        }
    }

    /// Templates whose name contains the search query
    pub fn visible_templates(&self) -> Vec<&MemeTemplate> {
        self.templates()
            .iter()
            .filter(|t| t.name.contains(self.search.as_str()))
            .collect()
    }

    pub fn click_sort(&mut self, column: SortColumn, additive: bool) {
        self.sort.click(column, additive);
        if let CatalogState::Ready(templates) = &mut self.catalog {
            sort_templates(templates, &self.sort);
        }
    }

    pub fn reload_catalog(&mut self) {
        self.catalog = CatalogState::Loading;
    }

    pub fn reveal(&mut self, url: &str) {
        self.revealed.insert(url.to_string());
    }

    pub fn hide(&mut self, url: &str) {
        self.revealed.remove(url);
    }

    pub fn is_revealed(&self, url: &str) -> bool {
        self.revealed.contains(url)
    }

    pub fn start_draft(&mut self, template: &MemeTemplate) {
        self.draft = Some(CreateDraft::for_template(template));
    }

    pub fn cancel_draft(&mut self) {
        self.draft = None;
    }

    /// Mark the draft as submitting and hand back what to send.
    /// None when there is no draft or one is already in flight.
    pub fn begin_submit(&mut self) -> Option<(String, Vec<String>)> {
        let draft = self.draft.as_mut()?;
        if draft.submitting {
            warn!("Meme for template {} is already being created", draft.template_id);
            return None;
        }
        draft.submitting = true;
        Some((draft.template_id.clone(), draft.captions.clone()))
    }

    pub fn open_fullscreen(&mut self, url: &str) {
        self.fullscreen = Some(url.to_string());
    }

    pub fn close_fullscreen(&mut self) {
        self.fullscreen = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::sort::SortDirection;
    use std::fs;

    fn template(id: &str, name: &str, box_count: u32) -> MemeTemplate {
        MemeTemplate {
            id: id.to_string(),
            name: name.to_string(),
            url: format!("https://i.imgflip.com/{}.jpg", id),
            width: 500,
            height: 500,
            box_count,
        }
    }

    fn state_in(dir: &tempfile::TempDir) -> AppState {
        AppState::new(GeneratedMemes::new(dir.path().join("generated_memes.txt")))
    }

    fn loaded_state(dir: &tempfile::TempDir) -> AppState {
        let mut state = state_in(dir);
        state.apply(AppEvent::CatalogLoaded(Ok(vec![
            template("10", "Drake Hotline Bling", 2),
            template("30", "Two Buttons", 3),
            template("20", "Distracted Boyfriend", 3),
        ])));
        state
    }

    #[test]
    fn test_catalog_server_error_shows_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        assert_eq!(state.catalog, CatalogState::Loading);

        state.apply(AppEvent::CatalogLoaded(Err(ApiError::Status(500))));

        assert!(matches!(&state.catalog, CatalogState::Failed(reason) if reason.contains("500")));
        assert!(state.templates().is_empty());
        assert!(state.visible_templates().is_empty());
    }

    #[test]
    fn test_catalog_sorted_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let state = loaded_state(&dir);
        let ids: Vec<&str> = state.templates().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["30", "20", "10"]);
    }

    #[test]
    fn test_click_sort_resorts() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(&dir);
        state.click_sort(SortColumn::Name, false);
        assert_eq!(state.sort.position(SortColumn::Name), Some((0, SortDirection::Ascending)));

        let names: Vec<&str> = state.templates().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Distracted Boyfriend", "Drake Hotline Bling", "Two Buttons"]);
    }

    #[test]
    fn test_search_filters_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(&dir);

        state.search = "Dr".to_string();
        let visible: Vec<&str> = state.visible_templates().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(visible, vec!["10"]);

        state.search = "drake".to_string();
        assert!(state.visible_templates().is_empty());

        state.search.clear();
        assert_eq!(state.visible_templates().len(), 3);
    }

    #[test]
    fn test_reveal_and_hide() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        let url = "https://i.imgflip.com/10.jpg";

        assert!(!state.is_revealed(url));
        state.reveal(url);
        assert!(state.is_revealed(url));
        state.hide(url);
        assert!(!state.is_revealed(url));
    }

    #[test]
    fn test_draft_has_one_caption_per_box() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        state.start_draft(&template("30", "Two Buttons", 3));

        let draft = state.draft.as_ref().unwrap();
        assert_eq!(draft.captions.len(), 3);
        assert!(!draft.submitting);
    }

    #[test]
    fn test_draft_caption_count_is_capped() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        state.start_draft(&template("99", "Absurd", u32::MAX));

        assert_eq!(state.draft.as_ref().unwrap().captions.len(), MAX_CAPTIONS);
    }

    #[test]
    fn test_begin_submit_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        assert!(state.begin_submit().is_none());

        state.start_draft(&template("10", "Drake Hotline Bling", 2));
        state.draft.as_mut().unwrap().captions[0] = "top".to_string();

        let (id, captions) = state.begin_submit().unwrap();
        assert_eq!(id, "10");
        assert_eq!(captions, vec!["top".to_string(), String::new()]);
        assert!(state.draft.as_ref().unwrap().submitting);
        assert!(state.begin_submit().is_none());
    }

    #[test]
    fn test_rejected_creation_does_not_append() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        state.start_draft(&template("10", "Drake Hotline Bling", 2));
        state.begin_submit().unwrap();

        state.apply(AppEvent::MemeCreated {
            template_id: "10".to_string(),
            result: Err(ApiError::Rejected("No texts specified.".to_string())),
        });

        assert!(state.history.is_empty());
        assert!(!state.history.path().exists());
        assert!(state.fullscreen.is_none());
        let draft = state.draft.as_ref().unwrap();
        assert!(!draft.submitting);
    }

    #[test]
    fn test_successful_creations_persist_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);

        for i in 0..4 {
            state.start_draft(&template("10", "Drake Hotline Bling", 2));
            state.begin_submit().unwrap();
            state.apply(AppEvent::MemeCreated {
                template_id: "10".to_string(),
                result: Ok(format!("https://i.imgflip.com/gen{}.jpg", i)),
            });
            assert!(state.draft.is_none());
        }

        let contents = fs::read_to_string(state.history.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|line| url::Url::parse(line).is_ok()));
        assert_eq!(lines.last(), Some(&"https://i.imgflip.com/gen3.jpg"));
        assert_eq!(state.fullscreen.as_deref(), Some("https://i.imgflip.com/gen3.jpg"));
    }

    #[test]
    fn test_late_result_for_other_template_keeps_draft() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        state.start_draft(&template("20", "Distracted Boyfriend", 3));

        state.apply(AppEvent::MemeCreated {
            template_id: "10".to_string(),
            result: Ok("https://i.imgflip.com/late.jpg".to_string()),
        });

        assert_eq!(state.history.len(), 1);
        assert_eq!(state.draft.as_ref().map(|d| d.template_id.as_str()), Some("20"));
    }
}
