use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use catalog_logging::{catalog_debug, catalog_info};
use tokio_util::sync::CancellationToken;

use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::{CharacterPage, EngineEvent, FailureKind, FetchError, RequestId};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("failed to spawn engine thread: {0}")]
    Thread(#[source] io::Error),
    #[error("engine has stopped")]
    Stopped,
}

enum EngineCommand {
    Fetch {
        request_id: RequestId,
        locator: String,
    },
    Cancel {
        request_id: RequestId,
    },
    Bootstrap {
        locator: String,
        reply: mpsc::Sender<Result<CharacterPage, FetchError>>,
    },
}

/// Sends work to the engine thread. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving side of the engine's completion events.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineEvents {
    /// Blocks until the next event; `None` once the engine is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

impl std::fmt::Debug for EngineCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineCommand::Fetch {
                request_id,
                locator,
            } => write!(f, "Fetch({request_id}, {locator})"),
            EngineCommand::Cancel { request_id } => write!(f, "Cancel({request_id})"),
            EngineCommand::Bootstrap { locator, .. } => write!(f, "Bootstrap({locator})"),
        }
    }
}

impl EngineHandle {
    /// Starts the engine with the default `reqwest` fetcher.
    pub fn spawn(settings: FetchSettings) -> Result<(Self, EngineEvents), EngineError> {
        let fetcher = Arc::new(ReqwestFetcher::new(settings)?);
        Self::spawn_with(fetcher)
    }

    /// Starts the engine around any [`Fetcher`].
    pub fn spawn_with(fetcher: Arc<dyn Fetcher>) -> Result<(Self, EngineEvents), EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("catalog-fetch")
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;

        thread::Builder::new()
            .name("catalog-engine".to_string())
            .spawn(move || {
                run_command_loop(&runtime, fetcher, cmd_rx, event_tx);
                runtime.shutdown_background();
            })
            .map_err(EngineError::Thread)?;

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    /// Issues a fetch. Any fetch still running is cancelled first: the newest request wins.
    pub fn fetch(&self, request_id: RequestId, locator: impl Into<String>) -> Result<(), EngineError> {
        self.send(EngineCommand::Fetch {
            request_id,
            locator: locator.into(),
        })
    }

    pub fn cancel(&self, request_id: RequestId) -> Result<(), EngineError> {
        self.send(EngineCommand::Cancel { request_id })
    }

    /// Fetches `locator` and waits for the result. Used for the initial page before first render.
    pub fn bootstrap(&self, locator: impl Into<String>) -> Result<CharacterPage, FetchError> {
        let (reply, response) = mpsc::channel();
        let stopped = || FetchError::new(FailureKind::EngineStopped, "engine is not running");
        self.send(EngineCommand::Bootstrap {
            locator: locator.into(),
            reply,
        })
        .map_err(|_| stopped())?;
        response.recv().map_err(|_| stopped())?
    }

    fn send(&self, command: EngineCommand) -> Result<(), EngineError> {
        self.cmd_tx.send(command).map_err(|_| EngineError::Stopped)
    }
}

fn run_command_loop(
    runtime: &tokio::runtime::Runtime,
    fetcher: Arc<dyn Fetcher>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let mut current: Option<(RequestId, CancellationToken)> = None;

    while let Ok(command) = cmd_rx.recv() {
        catalog_debug!("engine command {:?}", command);
        match command {
            EngineCommand::Fetch {
                request_id,
                locator,
            } => {
                if let Some((superseded, token)) = current.take() {
                    catalog_debug!("request_id={} superseded by {}", superseded, request_id);
                    token.cancel();
                }
                let token = CancellationToken::new();
                current = Some((request_id, token.clone()));
                runtime.spawn(run_fetch(
                    fetcher.clone(),
                    request_id,
                    locator,
                    token,
                    event_tx.clone(),
                ));
            }
            EngineCommand::Cancel { request_id } => {
                if let Some((active, token)) = &current {
                    if *active == request_id {
                        token.cancel();
                        current = None;
                    }
                }
            }
            EngineCommand::Bootstrap { locator, reply } => {
                let fetcher = fetcher.clone();
                runtime.spawn(async move {
                    catalog_info!("Bootstrap fetch locator={}", locator);
                    let result = fetcher.fetch_page(&locator).await;
                    let _ = reply.send(result);
                });
            }
        }
    }
    catalog_debug!("engine command channel closed");
}

async fn run_fetch(
    fetcher: Arc<dyn Fetcher>,
    request_id: RequestId,
    locator: String,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let result = tokio::select! {
        _ = token.cancelled() => None,
        result = fetcher.fetch_page(&locator) => Some(result),
    };
    let event = match result {
        Some(result) => EngineEvent::FetchCompleted {
            request_id,
            locator,
            result,
        },
        None => EngineEvent::FetchCancelled {
            request_id,
            locator,
        },
    };
    let _ = event_tx.send(event);
}
