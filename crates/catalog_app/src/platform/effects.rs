use std::sync::mpsc;
use std::thread;

use catalog_core::{Effect, FetchOutcome, Msg, PageCursor, PageData, ResultItem};
use catalog_engine::{CharacterPage, EngineEvent, EngineEvents, EngineHandle, FetchError};
use catalog_logging::{catalog_debug, catalog_error, catalog_warn};

use super::app::Inbox;

pub struct EffectRunner {
    engine: EngineHandle,
    inbox: mpsc::Sender<Inbox>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, events: EngineEvents, inbox: mpsc::Sender<Inbox>) -> Self {
        spawn_event_loop(events, inbox.clone());
        Self { engine, inbox }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch {
                    request_id,
                    locator,
                } => {
                    if let Err(err) = self.engine.fetch(request_id, locator.clone()) {
                        catalog_error!("Fetch request_id={} not issued: {}", request_id, err);
                        let _ = self.inbox.send(Inbox::Msg(Msg::FetchCompleted {
                            request_id,
                            locator,
                            outcome: FetchOutcome::TransportError(err.to_string()),
                        }));
                    }
                }
                Effect::CancelFetch { request_id } => {
                    if let Err(err) = self.engine.cancel(request_id) {
                        catalog_debug!("Cancel request_id={} not sent: {}", request_id, err);
                    }
                }
            }
        }
    }
}

fn spawn_event_loop(events: EngineEvents, inbox: mpsc::Sender<Inbox>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if inbox.send(Inbox::Msg(event_to_msg(event))).is_err() {
                break;
            }
        }
    });
}

pub(crate) fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::FetchCompleted {
            request_id,
            locator,
            result,
        } => Msg::FetchCompleted {
            request_id,
            locator,
            outcome: map_result(result),
        },
        EngineEvent::FetchCancelled { request_id, .. } => Msg::FetchCancelled { request_id },
    }
}

pub(crate) fn map_result(result: Result<CharacterPage, FetchError>) -> FetchOutcome {
    match result {
        Ok(page) => FetchOutcome::Success(map_page(page)),
        Err(err) if err.is_not_found() => FetchOutcome::NotFound,
        Err(err) => {
            catalog_warn!("Fetch failed: {}", err);
            FetchOutcome::TransportError(err.to_string())
        }
    }
}

pub(crate) fn map_page(page: CharacterPage) -> PageData {
    PageData {
        items: page
            .results
            .into_iter()
            .map(|character| ResultItem {
                id: character.id,
                name: character.name,
                image_url: character.image,
            })
            .collect(),
        next: page.info.next,
        prev: page.info.prev,
        count: page.info.count,
    }
}

/// Turns the render-time fetch into the message that seeds the view.
pub(crate) fn bootstrap_msg(locator: String, result: Result<CharacterPage, FetchError>) -> Msg {
    match result {
        Ok(page) => {
            let page = map_page(page);
            Msg::Initialize {
                results: page.items,
                cursor: PageCursor {
                    next: page.next,
                    current: locator,
                },
                count: page.count,
            }
        }
        Err(err) => {
            catalog_warn!("Initial fetch of {} failed: {}", locator, err);
            Msg::BootstrapFailed {
                not_found: err.is_not_found(),
                locator,
            }
        }
    }
}
