pub mod parser;
pub mod terminal;

pub use parser::{parse_command, Command, HELP};
pub use terminal::{execute, plain_translate, printing_listener, TerminalPresenter};
