use std::collections::HashSet;

use crate::view_model::{CardView, CatalogViewModel};
use crate::{
    CatalogEndpoint, PageCursor, PageData, RequestId, ResultItem, NOT_FOUND_MESSAGE,
    TRANSPORT_ERROR_MESSAGE,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Fetching {
        request_id: RequestId,
        locator: String,
        /// Search text behind this request; `None` for a continuation page.
        query: Option<String>,
    },
}

/// The catalog view: accumulated results, the live cursor and the error line.
///
/// Only [`crate::update`] mutates it. `latest_request` is the generation of the
/// most recently issued fetch; completions carrying any other id are stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogState {
    endpoint: CatalogEndpoint,
    results: Vec<ResultItem>,
    cursor: PageCursor,
    error_message: Option<String>,
    count: Option<u64>,
    query: Option<String>,
    selected: Option<u64>,
    latest_request: RequestId,
    status: FetchStatus,
    dirty: bool,
}

impl CatalogState {
    pub fn new(endpoint: CatalogEndpoint) -> Self {
        let cursor = PageCursor {
            next: None,
            current: endpoint.default_locator(),
        };
        Self {
            endpoint,
            results: Vec::new(),
            cursor,
            error_message: None,
            count: None,
            query: None,
            selected: None,
            latest_request: 0,
            status: FetchStatus::Idle,
            dirty: false,
        }
    }

    pub fn endpoint(&self) -> &CatalogEndpoint {
        &self.endpoint
    }

    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn latest_request(&self) -> RequestId {
        self.latest_request
    }

    pub fn view(&self) -> CatalogViewModel {
        let cards: Vec<CardView> = self.results.iter().map(CardView::from_item).collect();
        let selected = self
            .selected
            .and_then(|id| cards.iter().find(|card| card.id == id).cloned());
        CatalogViewModel {
            shown: cards.len(),
            cards,
            error_message: self.error_message.clone(),
            load_more_enabled: self.cursor.next.is_some(),
            fetching: matches!(self.status, FetchStatus::Fetching { .. }),
            total: self.count,
            query: self.query.clone(),
            current_locator: self.cursor.current.clone(),
            selected,
            dirty: self.dirty,
        }
    }

    /// Returns whether the view changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn in_flight(&self) -> Option<(RequestId, &str)> {
        match &self.status {
            FetchStatus::Fetching {
                request_id,
                locator,
                ..
            } => Some((*request_id, locator.as_str())),
            FetchStatus::Idle => None,
        }
    }

    pub(crate) fn initialize(
        &mut self,
        results: Vec<ResultItem>,
        cursor: PageCursor,
        count: Option<u64>,
    ) {
        // Anything still in flight predates the seed and must not land on top of it.
        self.latest_request += 1;
        self.status = FetchStatus::Idle;
        self.results = dedupe_by_id(results);
        self.cursor = cursor;
        self.count = count;
        self.error_message = None;
        self.query = None;
        self.selected = None;
        self.mark_dirty();
    }

    /// Issues a new request generation for `locator`. The error line is left as is,
    /// and `query` only becomes the shown query once the request lands.
    pub(crate) fn begin_fetch(&mut self, locator: String, query: Option<String>) -> RequestId {
        self.latest_request += 1;
        self.status = FetchStatus::Fetching {
            request_id: self.latest_request,
            locator,
            query,
        };
        self.mark_dirty();
        self.latest_request
    }

    pub(crate) fn abandon_fetch(&mut self) {
        self.status = FetchStatus::Idle;
        self.mark_dirty();
    }

    fn take_pending_query(&mut self) -> Option<String> {
        match std::mem::take(&mut self.status) {
            FetchStatus::Fetching { query, .. } => query,
            FetchStatus::Idle => None,
        }
    }

    pub(crate) fn apply_page(&mut self, locator: String, page: PageData) {
        let pending_query = self.take_pending_query();
        self.error_message = None;
        self.count = page.count;
        let first_page = page.is_first_page();
        self.cursor = PageCursor {
            next: page.next,
            current: locator,
        };
        if first_page {
            if pending_query.is_some() {
                self.query = pending_query;
            }
            self.results = dedupe_by_id(page.items);
            if let Some(id) = self.selected {
                if !self.results.iter().any(|item| item.id == id) {
                    self.selected = None;
                }
            }
        } else {
            let mut seen: HashSet<u64> = self.results.iter().map(|item| item.id).collect();
            self.results
                .extend(page.items.into_iter().filter(|item| seen.insert(item.id)));
        }
        self.mark_dirty();
    }

    /// The listing stays on screen but no longer has a known total.
    pub(crate) fn apply_not_found(&mut self, locator: String) {
        if let Some(query) = self.take_pending_query() {
            self.query = Some(query);
        }
        self.error_message = Some(NOT_FOUND_MESSAGE.to_string());
        self.count = None;
        self.cursor = PageCursor {
            next: None,
            current: locator,
        };
        self.mark_dirty();
    }

    pub(crate) fn apply_transport_error(&mut self) {
        self.status = FetchStatus::Idle;
        self.error_message = Some(TRANSPORT_ERROR_MESSAGE.to_string());
        self.mark_dirty();
    }

    pub(crate) fn select(&mut self, id: u64) -> bool {
        let found = self.results.iter().any(|item| item.id == id);
        self.selected = found.then_some(id);
        self.mark_dirty();
        found
    }
}

fn dedupe_by_id(items: Vec<ResultItem>) -> Vec<ResultItem> {
    let mut seen = HashSet::with_capacity(items.len());
    items.into_iter().filter(|item| seen.insert(item.id)).collect()
}
