use catalog_core::Msg;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Feed a message to the state machine.
    Dispatch(Msg),
    /// Show the detail view of a card.
    Show(u64),
    Redraw,
    Help,
    Quit,
    Invalid(String),
}

/// Parses one line of user input. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<UserCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "search" | "s" | "/" => UserCommand::Dispatch(Msg::SearchSubmitted(rest.to_string())),
        "more" | "m" | "next" => UserCommand::Dispatch(Msg::LoadMoreClicked),
        "show" | "open" => match rest.trim_start_matches('#').parse::<u64>() {
            Ok(id) => UserCommand::Show(id),
            Err(_) => UserCommand::Invalid(format!("`show` needs a numeric id, got {rest:?}")),
        },
        "list" | "ls" => UserCommand::Redraw,
        "help" | "?" => UserCommand::Help,
        "quit" | "exit" | "q" => UserCommand::Quit,
        _ => UserCommand::Invalid(format!("unknown command {word:?}, try `help`")),
    };
    Some(command)
}
