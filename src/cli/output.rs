//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the quantumleap CLI.

use crate::types::{Message, Sender};
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the QuantumLeap banner
    pub fn banner(&self) {
        if self.colored {
            println!(
                "\n   {} {}\n   {}\n",
                "◇ QuantumLeap".bright_magenta().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed(),
                "Quantum computing meets AI".bright_cyan()
            );
        } else {
            println!(
                "\n   QuantumLeap v{}\n   Quantum computing meets AI\n",
                env!("CARGO_PKG_VERSION")
            );
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print a hint/tip message
    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "💡".dimmed(), message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// Print a table header row
    pub fn table_header(&self, columns: &[&str]) {
        let header: String = columns
            .iter()
            .map(|c| format!("{:<26}", c))
            .collect::<Vec<_>>()
            .join(" ");
        if self.colored {
            println!("    {}", header.bright_white().bold());
            println!("    {}", "─".repeat(columns.len() * 27).dimmed());
        } else {
            println!("    {}", header);
            println!("    {}", "-".repeat(columns.len() * 27));
        }
    }

    /// Print a table row
    pub fn table_row(&self, values: &[&str]) {
        let row: String = values
            .iter()
            .map(|v| format!("{:<26}", v))
            .collect::<Vec<_>>()
            .join(" ");
        println!("    {}", row);
    }

    /// Print one chat bubble
    pub fn message(&self, message: &Message) {
        let label = bubble_label(message.sender);
        if self.colored {
            match message.sender {
                Sender::User => println!("  {} {}", label.bright_cyan().bold(), message.text),
                Sender::Assistant => {
                    println!("  {} {}", label.bright_magenta().bold(), message.text)
                }
            }
        } else {
            println!("  {} {}", label, message.text);
        }
    }

    /// Print the "assistant is composing" indicator
    pub fn composing(&self) {
        if self.colored {
            println!("  {}", "QuantumAI is typing...".dimmed().italic());
        } else {
            println!("  (QuantumAI is typing...)");
        }
    }

    /// Print the input prompt without a newline
    pub fn prompt(&self) {
        if self.colored {
            print!("  {} ", "›".bright_cyan().bold());
        } else {
            print!("  > ");
        }
        io::stdout().flush().ok();
    }

    /// Print newline
    pub fn newline(&self) {
        println!();
    }
}

fn bubble_label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "You:",
        Sender::Assistant => "QuantumAI:",
    }
}
