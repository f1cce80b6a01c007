//! Session state owned by the view controller.

use super::mode::ViewMode;
use crate::catalog_store::{ItemId, RankedBook, SimilarBook};
use crate::search::Criteria;

/// Deferred operations, each with its own generation counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerClass {
    Selection,
    Search,
}

/// Generation bookkeeping for one trigger class.
///
/// `latest` only ever grows; `pending` is the generation whose continuation
/// has not committed yet, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FetchSlot {
    latest: u64,
    pending: Option<u64>,
}

impl FetchSlot {
    /// Start a new fetch, superseding any pending one.
    pub(crate) fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.pending = Some(self.latest);
        self.latest
    }

    /// Whether a continuation of `generation` may still commit.
    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.pending == Some(generation)
    }

    pub(crate) fn finish(&mut self) {
        self.pending = None;
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn latest(&self) -> u64 {
        self.latest
    }
}

/// Point-in-time copy of the session, published to observers.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub active_mode: ViewMode,
    pub selected_item_id: Option<ItemId>,
    pub is_loading: bool,
    pub criteria: Criteria,
    pub query_results: Vec<RankedBook>,
    pub similar_results: Vec<SimilarBook>,
}

#[derive(Debug)]
pub(crate) struct SessionState {
    pub(crate) active_mode: ViewMode,
    pub(crate) selected_item_id: Option<ItemId>,
    pub(crate) criteria: Criteria,
    pub(crate) query_results: Vec<RankedBook>,
    pub(crate) similar_results: Vec<SimilarBook>,
    pub(crate) hydrating: bool,
    pub(crate) selection: FetchSlot,
    pub(crate) search: FetchSlot,
}

impl SessionState {
    pub(crate) fn new(active_mode: ViewMode, selected_item_id: Option<ItemId>) -> Self {
        Self {
            active_mode,
            selected_item_id,
            criteria: Criteria::default(),
            query_results: Vec::new(),
            similar_results: Vec::new(),
            hydrating: true,
            selection: FetchSlot::default(),
            search: FetchSlot::default(),
        }
    }

    pub(crate) fn slot(&self, class: TriggerClass) -> &FetchSlot {
        match class {
            TriggerClass::Selection => &self.selection,
            TriggerClass::Search => &self.search,
        }
    }

    pub(crate) fn slot_mut(&mut self, class: TriggerClass) -> &mut FetchSlot {
        match class {
            TriggerClass::Selection => &mut self.selection,
            TriggerClass::Search => &mut self.search,
        }
    }

    /// Loading while the initial hydration or any fetch is outstanding.
    pub(crate) fn is_loading(&self) -> bool {
        self.hydrating || self.selection.is_pending() || self.search.is_pending()
    }

    pub(crate) fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            active_mode: self.active_mode,
            selected_item_id: self.selected_item_id,
            is_loading: self.is_loading(),
            criteria: self.criteria.clone(),
            query_results: self.query_results.clone(),
            similar_results: self.similar_results.clone(),
        }
    }
}
