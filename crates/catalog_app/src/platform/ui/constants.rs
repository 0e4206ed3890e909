pub const TITLE: &str = "Welcome to Rick and Morty Character Wiki";
pub const DESCRIPTION: &str = "Feel free to search or browse characters.";
pub const PROMPT: &str = "catalog> ";
pub const NAME_WIDTH: usize = 32;

pub const HELP: &str = "\
Commands:
  search <text>   start a new search (`/ <text>` works too, empty text lists everything)
  more            load the next page of the current listing
  show <id>       show the detail view of a loaded character
  list            print the current listing again
  help            show this help
  quit            leave";
