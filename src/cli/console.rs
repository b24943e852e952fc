use colored::*;
use std::io::{self, Write};

use crate::agent::{EngineEvent, LogSink};

/// Erase the current terminal line and return the cursor to column 0
pub const CLEAR_LINE: &str = "\r\u{1b}[K";

/// Console handles all terminal I/O with colored formatting
pub struct Console {
    user_color: Color,
    assistant_color: Color,
    tool_color: Color,
}

impl Console {
    /// Create a new Console with default colors
    pub fn new() -> Self {
        Self {
            user_color: Color::BrightBlue,
            assistant_color: Color::Yellow,
            tool_color: Color::Green,
        }
    }

    /// Print the welcome banner
    pub fn print_banner(&self, model: &str) {
        println!(
            "Chat with {} (single ctrl-c to clear input, double ctrl-c to quit)",
            model.bold()
        );
    }

    /// Print the input prompt (without newline)
    pub fn print_prompt(&self) {
        print!("{}: ", "You".color(self.user_color));
        let _ = io::stdout().flush();
    }

    /// Discard whatever is on the current line and prompt again
    pub fn clear_and_prompt(&self) {
        print!("{}", CLEAR_LINE);
        self.print_prompt();
    }

    /// Print a newline
    pub fn println(&self) {
        println!();
    }

    /// Print an error message
    pub fn print_error(&self, error: &str) {
        eprintln!("{} {}", "Error:".red().bold(), error);
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

/// Two spaces per nesting level, so delegated output reads as a sub-tree
fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

impl LogSink for Console {
    fn log(&self, event: &EngineEvent) {
        let pad = indent(event.depth());
        match event {
            EngineEvent::Request { .. } => {
                println!("{}{}", pad, "- Request".bright_black());
            }
            EngineEvent::AssistantText { text, .. } => {
                println!(
                    "{}{}: {}",
                    pad,
                    "Assistant".color(self.assistant_color).bold(),
                    text
                );
            }
            EngineEvent::ToolCall { name, .. } => {
                println!("{}{}: {}", pad, "Tool call".color(self.tool_color), name);
            }
            EngineEvent::IterationLimit { limit, .. } => {
                println!(
                    "{}{}",
                    pad,
                    format!("Stopped after {} requests", limit).yellow()
                );
            }
        }
    }
}
