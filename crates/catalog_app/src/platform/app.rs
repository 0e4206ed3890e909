use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use catalog_core::{update, CatalogState, Msg};
use catalog_engine::EngineHandle;
use catalog_logging::{catalog_error, catalog_info, catalog_warn};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::config::AppConfig;
use super::effects::{bootstrap_msg, EffectRunner};
use super::output::{PromptPrinter, Screen};
use super::ui::commands::{parse_command, UserCommand};
use super::ui::constants::{HELP, PROMPT};
use super::ui::render::{render, render_detail};

/// Everything the main loop reacts to, from the prompt thread and the engine.
pub enum Inbox {
    Msg(Msg),
    Command(UserCommand),
    /// The prompt is up; further output must go through its printer.
    PromptReady(PromptPrinter),
    InputClosed,
}

impl std::fmt::Debug for Inbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Inbox::Msg(msg) => f.debug_tuple("Msg").field(msg).finish(),
            Inbox::Command(command) => f.debug_tuple("Command").field(command).finish(),
            Inbox::PromptReady(_) => f.write_str("PromptReady"),
            Inbox::InputClosed => f.write_str("InputClosed"),
        }
    }
}

pub fn run_app(config: &AppConfig) -> Result<()> {
    let endpoint = config.endpoint()?;
    let (engine, events) =
        EngineHandle::spawn(config.fetch_settings()).context("failed to start fetch engine")?;
    let (inbox_tx, inbox_rx) = mpsc::channel::<Inbox>();
    let runner = EffectRunner::new(engine.clone(), events, inbox_tx.clone());

    let locator = endpoint.default_locator();
    catalog_info!("Starting catalog at {}", locator);
    let initial = bootstrap_msg(locator.clone(), engine.bootstrap(locator));

    let mut screen = Screen::stdout();
    let state = dispatch(CatalogState::new(endpoint), initial, &runner, &mut screen);
    spawn_input_loop(inbox_tx)?;
    run_loop(state, &inbox_rx, &runner, &mut screen);
    Ok(())
}

/// Single consumer of the inbox: the only place state is updated.
fn run_loop(
    mut state: CatalogState,
    inbox: &mpsc::Receiver<Inbox>,
    runner: &EffectRunner,
    screen: &mut Screen,
) {
    while let Ok(event) = inbox.recv() {
        match event {
            Inbox::Msg(msg) | Inbox::Command(UserCommand::Dispatch(msg)) => {
                state = dispatch(state, msg, runner, screen);
            }
            Inbox::Command(UserCommand::Show(id)) => {
                let (mut next, effects) = update(state, Msg::CardSelected { id });
                runner.run(effects);
                next.consume_dirty();
                match next.view().selected {
                    Some(card) => screen.show(render_detail(&card)),
                    None => screen.show(format!("No character #{id} in the current listing.")),
                }
                state = next;
            }
            Inbox::Command(UserCommand::Redraw) => screen.show(render(&state.view())),
            Inbox::Command(UserCommand::Help) => screen.show(HELP.to_string()),
            Inbox::Command(UserCommand::Invalid(reason)) => screen.show(reason),
            Inbox::PromptReady(printer) => screen.attach_prompt(printer),
            Inbox::Command(UserCommand::Quit) | Inbox::InputClosed => break,
        }
    }
    catalog_info!("Catalog session closed");
}

fn dispatch(
    state: CatalogState,
    msg: Msg,
    runner: &EffectRunner,
    screen: &mut Screen,
) -> CatalogState {
    let (mut state, effects) = update(state, msg);
    runner.run(effects);
    if state.consume_dirty() {
        screen.show(render(&state.view()));
    }
    state
}

fn spawn_input_loop(inbox: mpsc::Sender<Inbox>) -> Result<()> {
    thread::Builder::new()
        .name("catalog-input".to_string())
        .spawn(move || read_commands(&inbox))
        .context("failed to spawn input thread")?;
    Ok(())
}

fn read_commands(inbox: &mpsc::Sender<Inbox>) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            catalog_error!("Failed to open terminal prompt: {}", err);
            eprintln!("Failed to open terminal prompt: {err}");
            let _ = inbox.send(Inbox::InputClosed);
            return;
        }
    };
    match editor.create_external_printer() {
        Ok(printer) => {
            if inbox.send(Inbox::PromptReady(Box::new(printer))).is_err() {
                return;
            }
        }
        Err(err) => catalog_warn!("No prompt printer, output may overwrite the prompt: {}", err),
    }

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let Some(command) = parse_command(&line) else {
                    continue;
                };
                let _ = editor.add_history_entry(line.as_str());
                let quit = command == UserCommand::Quit;
                if inbox.send(Inbox::Command(command)).is_err() || quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                let _ = inbox.send(Inbox::InputClosed);
                break;
            }
            Err(err) => {
                catalog_error!("Prompt failed: {}", err);
                let _ = inbox.send(Inbox::InputClosed);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use catalog_core::{CatalogEndpoint, FetchStatus, DEFAULT_BASE_URL};
    use catalog_engine::{Character, CharacterPage, FetchError, Fetcher, PageInfo};

    use super::*;

    struct OnePageFetcher;

    #[async_trait]
    impl Fetcher for OnePageFetcher {
        async fn fetch_page(&self, _locator: &str) -> Result<CharacterPage, FetchError> {
            Ok(CharacterPage {
                info: PageInfo {
                    count: Some(1),
                    ..PageInfo::default()
                },
                results: vec![Character {
                    id: 1,
                    name: "Rick Sanchez".to_string(),
                    image: "https://img.test/1.jpeg".to_string(),
                }],
            })
        }
    }

    #[test]
    fn dispatched_search_round_trips_through_engine() {
        catalog_logging::initialize_for_tests();
        let (engine, events) = EngineHandle::spawn_with(Arc::new(OnePageFetcher)).unwrap();
        let (inbox_tx, inbox_rx) = mpsc::channel();
        let runner = EffectRunner::new(engine, events, inbox_tx);
        let state = CatalogState::new(CatalogEndpoint::new(DEFAULT_BASE_URL).unwrap());

        let mut screen = Screen::stdout();

        let state = dispatch(
            state,
            Msg::SearchSubmitted("rick".to_string()),
            &runner,
            &mut screen,
        );
        assert!(matches!(state.status(), FetchStatus::Fetching { .. }));

        let msg = match inbox_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            Inbox::Msg(msg) => msg,
            other => panic!("unexpected inbox event {other:?}"),
        };
        let state = dispatch(state, msg, &runner, &mut screen);

        assert_eq!(state.status(), &FetchStatus::Idle);
        assert_eq!(state.results().len(), 1);
        assert_eq!(state.view().total, Some(1));
        assert!(!state.view().load_more_enabled);
    }
}
