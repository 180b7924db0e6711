pub mod terminal;
pub mod traits;

pub use terminal::TerminalInterface;
pub use traits::{is_exit_phrase, Interface, EXIT_PHRASES};
