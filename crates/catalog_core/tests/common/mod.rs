#![allow(dead_code)]

use std::sync::Once;

use catalog_core::{
    update, CatalogEndpoint, CatalogState, Effect, FetchOutcome, Msg, PageCursor, PageData,
    RequestId, ResultItem,
};

pub const BASE: &str = "https://catalog.test/api/";
pub const FIRST: &str = "https://catalog.test/api/character/";
pub const PAGE_2: &str = "https://catalog.test/api/character/?page=2";
pub const PAGE_3: &str = "https://catalog.test/api/character/?page=3";

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(catalog_logging::initialize_for_tests);
}

pub fn item(id: u64) -> ResultItem {
    ResultItem {
        id,
        name: format!("Character {id}"),
        image_url: format!("https://catalog.test/api/character/avatar/{id}.jpeg"),
    }
}

pub fn items(ids: &[u64]) -> Vec<ResultItem> {
    ids.iter().copied().map(item).collect()
}

pub fn ids(state: &CatalogState) -> Vec<u64> {
    state.results().iter().map(|item| item.id).collect()
}

pub fn page(ids: &[u64], prev: Option<&str>, next: Option<&str>) -> FetchOutcome {
    FetchOutcome::Success(PageData {
        items: items(ids),
        next: next.map(str::to_string),
        prev: prev.map(str::to_string),
        count: Some(826),
    })
}

/// A state seeded with `[1, 2]` and a next page, as after the render-time fetch.
pub fn seeded() -> CatalogState {
    let state = CatalogState::new(CatalogEndpoint::new(BASE).unwrap());
    let (mut state, effects) = update(
        state,
        Msg::Initialize {
            results: items(&[1, 2]),
            cursor: PageCursor {
                next: Some(PAGE_2.to_string()),
                current: FIRST.to_string(),
            },
            count: Some(826),
        },
    );
    assert!(effects.is_empty());
    state.consume_dirty();
    state
}

/// Extracts the single `Fetch` effect, ignoring cancellations.
pub fn fetch_of(effects: &[Effect]) -> (RequestId, String) {
    let fetches: Vec<_> = effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Fetch {
                request_id,
                locator,
            } => Some((*request_id, locator.clone())),
            Effect::CancelFetch { .. } => None,
        })
        .collect();
    assert_eq!(fetches.len(), 1, "expected exactly one fetch in {effects:?}");
    fetches.into_iter().next().unwrap()
}

pub fn complete(
    state: CatalogState,
    request: &(RequestId, String),
    outcome: FetchOutcome,
) -> CatalogState {
    let (state, effects) = update(
        state,
        Msg::FetchCompleted {
            request_id: request.0,
            locator: request.1.clone(),
            outcome,
        },
    );
    assert!(effects.is_empty());
    state
}
