use catalog_logging::{catalog_debug, catalog_info, catalog_warn};

use crate::{CatalogState, Effect, FetchOutcome, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: CatalogState, msg: Msg) -> (CatalogState, Vec<Effect>) {
    let effects = match msg {
        Msg::Initialize {
            results,
            cursor,
            count,
        } => {
            let superseded = state.in_flight().map(|(request_id, _)| request_id);
            state.initialize(results, cursor, count);
            superseded
                .map(|request_id| vec![Effect::CancelFetch { request_id }])
                .unwrap_or_default()
        }
        Msg::BootstrapFailed { locator, not_found } => {
            if not_found {
                state.apply_not_found(locator);
            } else {
                state.apply_transport_error();
            }
            Vec::new()
        }
        Msg::LoadMoreClicked => {
            let Some(next) = state.cursor().next.clone() else {
                catalog_debug!("load more ignored: listing is exhausted");
                return (state, Vec::new());
            };
            if matches!(state.in_flight(), Some((_, locator)) if locator == next) {
                catalog_debug!("load more ignored: {next} already in flight");
                return (state, Vec::new());
            }
            set_locator(&mut state, next, None)
        }
        Msg::SearchSubmitted(raw) => {
            let query = raw.trim();
            let locator = state.endpoint().search_locator(query);
            set_locator(&mut state, locator, Some(query.to_string()))
        }
        Msg::FetchCompleted {
            request_id,
            locator,
            outcome,
        } => {
            if state.in_flight().map(|(id, _)| id) != Some(request_id) {
                catalog_debug!(
                    "discarding stale response request_id={} latest={} locator={}",
                    request_id,
                    state.latest_request(),
                    locator
                );
                return (state, Vec::new());
            }
            match outcome {
                FetchOutcome::Success(page) => {
                    catalog_debug!(
                        "request_id={} returned {} items (first_page={})",
                        request_id,
                        page.items.len(),
                        page.is_first_page()
                    );
                    state.apply_page(locator, page);
                }
                FetchOutcome::NotFound => {
                    catalog_info!("request_id={} found no results at {}", request_id, locator);
                    state.apply_not_found(locator);
                }
                FetchOutcome::TransportError(reason) => {
                    catalog_warn!("request_id={} failed at {}: {}", request_id, locator, reason);
                    state.apply_transport_error();
                }
            }
            Vec::new()
        }
        Msg::FetchCancelled { request_id } => {
            if state.in_flight().map(|(id, _)| id) == Some(request_id) {
                state.abandon_fetch();
            }
            Vec::new()
        }
        Msg::CardSelected { id } => {
            if !state.select(id) {
                catalog_debug!("card {id} is not in the current listing");
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Starts a fetch for `locator`, superseding whatever was in flight.
fn set_locator(state: &mut CatalogState, locator: String, query: Option<String>) -> Vec<Effect> {
    let superseded = state.in_flight().map(|(request_id, _)| request_id);
    let request_id = state.begin_fetch(locator.clone(), query);
    catalog_info!("Fetch request_id={} locator={}", request_id, locator);

    let mut effects = Vec::with_capacity(2);
    if let Some(old) = superseded {
        effects.push(Effect::CancelFetch { request_id: old });
    }
    effects.push(Effect::Fetch {
        request_id,
        locator,
    });
    effects
}
