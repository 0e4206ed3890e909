//! Terminal output that cooperates with the prompt.
//!
//! While the input thread sits in `readline`, rustyline owns the current
//! line. Text printed from the main loop must go through its external
//! printer so the prompt is redrawn underneath it.

use catalog_logging::catalog_warn;
use rustyline::ExternalPrinter;

pub type PromptPrinter = Box<dyn ExternalPrinter + Send>;

#[derive(Default)]
pub struct Screen {
    printer: Option<PromptPrinter>,
}

impl Screen {
    /// Plain stdout, used before the prompt exists.
    pub fn stdout() -> Self {
        Self::default()
    }

    pub fn attach_prompt(&mut self, printer: PromptPrinter) {
        self.printer = Some(printer);
    }

    pub fn show(&mut self, text: String) {
        let Some(printer) = self.printer.as_mut() else {
            println!("{text}");
            return;
        };
        if let Err(err) = printer.print(text.clone()) {
            catalog_warn!("Prompt printer failed, falling back to stdout: {}", err);
            self.printer = None;
            println!("{text}");
        }
    }
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("prompt_attached", &self.printer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingPrinter {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl ExternalPrinter for RecordingPrinter {
        fn print(&mut self, msg: String) -> rustyline::Result<()> {
            self.lines.lock().unwrap().push(msg);
            Ok(())
        }
    }

    #[test]
    fn attached_prompt_receives_all_output() {
        let recorder = RecordingPrinter::default();
        let mut screen = Screen::stdout();
        screen.attach_prompt(Box::new(recorder.clone()));

        screen.show("Showing 2 of 826.".to_string());
        screen.show("#1 Rick Sanchez".to_string());

        assert_eq!(
            *recorder.lines.lock().unwrap(),
            vec!["Showing 2 of 826.".to_string(), "#1 Rick Sanchez".to_string()]
        );
    }

    struct BrokenPrinter;

    impl ExternalPrinter for BrokenPrinter {
        fn print(&mut self, _msg: String) -> rustyline::Result<()> {
            Err(rustyline::error::ReadlineError::Eof)
        }
    }

    #[test]
    fn failing_printer_is_detached() {
        let mut screen = Screen::stdout();
        screen.attach_prompt(Box::new(BrokenPrinter));
        screen.show("lost".to_string());
        assert!(screen.printer.is_none());
    }
}
