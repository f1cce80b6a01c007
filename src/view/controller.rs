//! View-state controller.
//!
//! Owns the session and exposes one transition function per user intent.
//! Fetch-like intents (initial hydration, selection change, search submit)
//! set the loading flag, yield immediately and apply their result from a
//! deferred continuation after the configured delay. Each trigger class has
//! a generation counter: a continuation commits only if no newer request of
//! the same class was issued meanwhile, otherwise its result is discarded.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::display::{render_results, ResultsView, NO_QUERY_RESULTS, NO_SIMILAR_RESULTS};
use super::mode::ViewMode;
use super::state::{SessionSnapshot, SessionState, TriggerClass};
use crate::analysis::{summarize_bestsellers, AnalysisOverview, AnalysisPanel};
use crate::catalog_store::{Bestseller, CatalogStore, GenreFilter, ItemId};
use crate::config::SessionSettings;
use crate::search::{parse_min_rating, Criteria, QueryFilterEngine};
use crate::similarity::SimilarityLookup;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("Item {0} is not in the bestseller list")]
    UnknownItem(ItemId),
    #[error("No bestseller titled {0:?}")]
    UnknownTitle(String),
    #[error("The session has ended")]
    SessionEnded,
}

/// Entry of the Similar-mode book selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorOption {
    pub id: ItemId,
    /// "title by author"
    pub label: String,
}

/// State shared between the controller and its pending continuations.
struct Shared {
    state: Mutex<SessionState>,
    updates: watch::Sender<SessionSnapshot>,
}

impl Shared {
    fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Mutate the state and publish a snapshot if anything visible changed.
    fn update<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let result = f(&mut state);
        let snapshot = state.snapshot();
        drop(state);
        self.updates.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
        result
    }
}

pub struct ViewStateController {
    shared: Arc<Shared>,
    store: Arc<dyn CatalogStore>,
    bestsellers: Vec<Bestseller>,
    query_engine: QueryFilterEngine,
    similarity: SimilarityLookup,
    settings: SessionSettings,
    runtime: Handle,
    shutdown: CancellationToken,
}

impl ViewStateController {
    /// Start a session over `store`.
    ///
    /// The session begins loading: the initial hydration and the fetch for
    /// the implicit first selection are scheduled right away. Must be called
    /// from within a Tokio runtime.
    pub fn start(store: Arc<dyn CatalogStore>, settings: SessionSettings) -> Result<Self> {
        let runtime = Handle::try_current()
            .context("ViewStateController must be started inside a Tokio runtime")?;

        let bestsellers = store.get_bestsellers().unwrap_or_else(|err| {
            warn!("Bestseller list unavailable, starting with none: {:#}", err);
            Vec::new()
        });
        let initial_selection = bestsellers.first().map(|b| b.item.id);

        let state = SessionState::new(settings.initial_mode, initial_selection);
        let (updates, _) = watch::channel(state.snapshot());
        let shared = Arc::new(Shared {
            state: Mutex::new(state),
            updates,
        });

        info!(
            "Starting session in {:?} mode with {} bestsellers",
            settings.initial_mode,
            bestsellers.len()
        );

        let controller = Self {
            shared,
            query_engine: QueryFilterEngine::new(store.clone()),
            similarity: SimilarityLookup::new(store.clone()),
            store,
            bestsellers,
            settings,
            runtime,
            shutdown: CancellationToken::new(),
        };

        controller.schedule_hydration();
        if let Some(id) = initial_selection {
            let generation = controller
                .shared
                .update(|s| s.slot_mut(TriggerClass::Selection).begin());
            controller.schedule_selection_fetch(id, generation);
        }
        Ok(controller)
    }

    // =========================================================================
    // Intents
    // =========================================================================

    pub fn switch_mode(&self, mode: ViewMode) {
        debug!("Switching to {:?} mode", mode);
        self.shared.update(|s| s.active_mode = mode);
    }

    /// Replace the criteria. Does not search.
    pub fn set_criteria(&self, criteria: Criteria) {
        self.shared.update(|s| s.criteria = criteria);
    }

    /// Set the genre from a selector label; unknown labels mean all genres.
    pub fn set_genre(&self, label: &str) {
        let genre = GenreFilter::from_label(label);
        self.shared.update(|s| s.criteria.genre = genre);
    }

    pub fn set_author(&self, author: &str) {
        self.shared.update(|s| s.criteria.author = author.to_string());
    }

    /// Set the minimum rating from raw field input; invalid input becomes 0.
    pub fn set_min_rating_input(&self, input: &str) {
        let min_rating = parse_min_rating(input);
        self.shared.update(|s| s.criteria.min_rating = min_rating);
    }

    /// Search the candidate pool with the current criteria.
    ///
    /// A newer submit supersedes a pending one.
    pub fn submit_search(&self) -> Result<(), ViewError> {
        self.ensure_active()?;
        let (criteria, generation) = self.shared.update(|s| {
            let generation = s.slot_mut(TriggerClass::Search).begin();
            (s.criteria.clone(), generation)
        });
        debug!("Search #{} submitted with {:?}", generation, criteria);

        let engine = self.query_engine.clone();
        self.spawn_continuation(
            TriggerClass::Search,
            generation,
            self.settings.search_delay,
            move || engine.run(&criteria),
            |s, results| s.query_results = results,
        );
        Ok(())
    }

    /// Select a bestseller, fetching its related items if the selection changed.
    pub fn select_item(&self, id: ItemId) -> Result<(), ViewError> {
        self.ensure_active()?;
        if !self.bestsellers.iter().any(|b| b.item.id == id) {
            return Err(ViewError::UnknownItem(id));
        }
        let generation = self.shared.update(|s| {
            if s.selected_item_id == Some(id) {
                None
            } else {
                s.selected_item_id = Some(id);
                Some(s.slot_mut(TriggerClass::Selection).begin())
            }
        });
        if let Some(generation) = generation {
            debug!("Selected {} (fetch #{})", id, generation);
            self.schedule_selection_fetch(id, generation);
        }
        Ok(())
    }

    /// Select the bestseller whose title matches, ignoring case and
    /// surrounding whitespace.
    pub fn select_by_title(&self, title: &str) -> Result<ItemId, ViewError> {
        self.ensure_active()?;
        let id = self
            .bestsellers
            .iter()
            .find(|b| b.item.title_matches(title))
            .map(|b| b.item.id)
            .ok_or_else(|| ViewError::UnknownTitle(title.to_string()))?;
        self.select_item(id)?;
        Ok(id)
    }

    /// End the session: pending continuations are dropped without committing
    /// and later fetch-like intents are refused.
    pub fn shutdown(&self) {
        info!("Shutting down session");
        self.shutdown.cancel();
        self.shared.update(|s| {
            s.hydrating = false;
            s.selection.finish();
            s.search.finish();
        });
    }

    fn ensure_active(&self) -> Result<(), ViewError> {
        if self.shutdown.is_cancelled() {
            return Err(ViewError::SessionEnded);
        }
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.read(|s| s.snapshot())
    }

    /// Receiver notified on every visible state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.shared.updates.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.shared.read(|s| s.is_loading())
    }

    pub fn active_mode(&self) -> ViewMode {
        self.shared.read(|s| s.active_mode)
    }

    /// The currently selected bestseller.
    pub fn selected_item(&self) -> Option<Bestseller> {
        let id = self.shared.read(|s| s.selected_item_id)?;
        self.bestsellers.iter().find(|b| b.item.id == id).cloned()
    }

    pub fn bestseller_options(&self) -> Vec<SelectorOption> {
        self.bestsellers
            .iter()
            .map(|b| SelectorOption {
                id: b.item.id,
                label: b.item.display_label(),
            })
            .collect()
    }

    pub fn genre_options(&self) -> Vec<GenreFilter> {
        self.store.get_genre_options()
    }

    pub fn query_results_view(&self) -> ResultsView {
        self.shared
            .read(|s| render_results(&s.query_results, NO_QUERY_RESULTS))
    }

    pub fn similar_results_view(&self) -> ResultsView {
        self.shared
            .read(|s| render_results(&s.similar_results, NO_SIMILAR_RESULTS))
    }

    pub fn analysis_overview(&self) -> AnalysisOverview {
        AnalysisOverview {
            panels: AnalysisPanel::ALL.to_vec(),
            summary: summarize_bestsellers(&self.bestsellers, self.settings.analysis_top_n),
        }
    }

    // =========================================================================
    // Continuations
    // =========================================================================

    fn schedule_hydration(&self) {
        let shared = self.shared.clone();
        let shutdown = self.shutdown.clone();
        let delay = self.settings.initial_load_delay;
        self.runtime.spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
            debug!("Initial load finished");
            shared.update(|s| s.hydrating = false);
        });
    }

    fn schedule_selection_fetch(&self, id: ItemId, generation: u64) {
        let lookup = self.similarity.clone();
        self.spawn_continuation(
            TriggerClass::Selection,
            generation,
            self.settings.selection_fetch_delay,
            move || lookup.related_to(id),
            |s, related| s.similar_results = related,
        );
    }

    /// After `delay`, run `fetch` and hand its result to `apply`, unless a
    /// newer request of `class` has superseded `generation` by then.
    fn spawn_continuation<T, F, A>(
        &self,
        class: TriggerClass,
        generation: u64,
        delay: Duration,
        fetch: F,
        apply: A,
    ) where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
        A: FnOnce(&mut SessionState, T) + Send + 'static,
    {
        let shared = self.shared.clone();
        let shutdown = self.shutdown.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }

            if !shared.read(|s| s.slot(class).is_current(generation)) {
                debug!("{:?} fetch #{} superseded, skipping", class, generation);
                return;
            }

            let result = fetch();
            shared.update(|s| {
                if s.slot(class).is_current(generation) {
                    apply(s, result);
                    s.slot_mut(class).finish();
                    debug!("{:?} fetch #{} committed", class, generation);
                } else {
                    debug!(
                        "{:?} fetch #{} superseded by #{}, discarding",
                        class,
                        generation,
                        s.slot(class).latest()
                    );
                }
            });
        });
    }
}

impl Drop for ViewStateController {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
