//! Terminal front end: arguments, colored output and interactive input

mod args;
mod console;
mod input;

pub use args::Cli;
pub use console::{Console, CLEAR_LINE};
pub use input::{InputManager, InputState, InterruptClassifier, InterruptEvent, DEBOUNCE_WINDOW};
