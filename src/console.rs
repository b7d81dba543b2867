//! Console output formatting with ANSI color support.
//!
//! Provides styled terminal output with automatic TTY detection
//! and respect for the NO_COLOR environment variable.

use crate::translators::TranslationResult;
use std::io::{self, IsTerminal};

/// ANSI style codes for terminal formatting.
#[derive(Debug, Clone, Copy)]
pub enum Style {
    Bold,
    Dim,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
}

impl Style {
    /// Returns the ANSI escape code for this style.
    fn code(self) -> &'static str {
        match self {
            Style::Bold => "1",
            Style::Dim => "2",
            Style::Red => "31",
            Style::Green => "32",
            Style::Yellow => "33",
            Style::Blue => "34",
            Style::Magenta => "35",
            Style::Cyan => "36",
            Style::Gray => "90",
        }
    }
}

const RESET: &str = "\x1b[0m";

/// Console output handler with color support detection.
#[derive(Debug)]
pub struct Console {
    colors_enabled: bool,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    /// Creates a new Console instance, detecting color support.
    ///
    /// Colors are disabled if:
    /// - The `NO_COLOR` environment variable is set
    /// - stdout is not a terminal (TTY)
    pub fn new() -> Self {
        let colors_enabled = std::env::var("NO_COLOR").is_err() && io::stdout().is_terminal();

        Self { colors_enabled }
    }

    /// Creates a Console with colors explicitly enabled or disabled.
    pub fn with_colors(enabled: bool) -> Self {
        Self {
            colors_enabled: enabled,
        }
    }

    /// Applies ANSI styles to text if colors are enabled.
    pub fn style(&self, text: &str, styles: &[Style]) -> String {
        if !self.colors_enabled || styles.is_empty() {
            return text.to_string();
        }

        let codes: Vec<&str> = styles.iter().map(|s| s.code()).collect();
        format!("\x1b[{}m{}{}", codes.join(";"), text, RESET)
    }

    /// Creates a colored label like `[INFO]`.
    pub fn label(&self, label: &str, color: Style) -> String {
        let styled = self.style(label, &[color, Style::Bold]);
        format!("[{}]", styled)
    }

    /// Prints an info message with blue `[INFO]` label.
    pub fn info(&self, message: &str) {
        println!("{} {}", self.label("INFO", Style::Blue), message);
    }

    /// Prints a success message with green `[OK]` label.
    pub fn success(&self, message: &str) {
        println!("{} {}", self.label("OK", Style::Green), message);
    }

    /// Prints a warning message with yellow `[WARN]` label.
    pub fn warning(&self, message: &str) {
        println!("{} {}", self.label("WARN", Style::Yellow), message);
    }

    /// Prints an error message with red `[ERROR]` label.
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", self.label("ERROR", Style::Red), message);
    }

    /// Prints a step message with cyan `[STEP]` label.
    pub fn step(&self, message: &str) {
        println!("{} {}", self.label("STEP", Style::Cyan), message);
    }

    /// Prints a diagnostic message to stderr with a gray `[DEBUG]` label.
    pub fn debug(&self, message: &str) {
        eprintln!("{} {}", self.label("DEBUG", Style::Gray), self.muted(message));
    }

    /// Prints a section header in magenta bold.
    pub fn section(&self, message: &str) {
        println!();
        println!("{}", self.style(message, &[Style::Magenta, Style::Bold]));
    }

    /// Returns text styled as muted (dim gray).
    pub fn muted(&self, text: &str) -> String {
        self.style(text, &[Style::Gray, Style::Dim])
    }

    /// Formats a checkbox-style marker for an option's state.
    pub fn marker(&self, checked: bool) -> String {
        if checked {
            self.style("[x]", &[Style::Green, Style::Bold])
        } else {
            self.muted("[ ]")
        }
    }

    /// Renders a translation result as indented text blocks.
    pub fn format_result(&self, result: &TranslationResult) -> String {
        let mut lines = Vec::new();

        lines.push(self.style(&result.main_meaning, &[Style::Bold]));
        if let Some(ref p) = result.t_pronunciation {
            lines.push(self.muted(p));
        }

        lines.push(String::new());
        lines.push(result.original_text.clone());
        if let Some(ref p) = result.s_pronunciation {
            lines.push(self.muted(&format!("/{}/", p)));
        }

        if let Some(ref meanings) = result.detailed_meanings {
            if !meanings.is_empty() {
                lines.push(String::new());
                for meaning in meanings {
                    let pos = self.style(&meaning.pos, &[Style::Cyan]);
                    let text = meaning.meaning.replace('\n', "; ");
                    lines.push(format!("  {} {}", pos, text).trim_end().to_string());
                }
            }
        }

        if let Some(ref definitions) = result.definitions {
            if !definitions.is_empty() {
                lines.push(String::new());
                for definition in definitions {
                    let pos = self.style(&definition.pos, &[Style::Cyan]);
                    lines.push(format!("  {} {}", pos, definition.meaning));
                    if let Some(ref example) = definition.example {
                        lines.push(format!("      {}", self.muted(&format!("\"{}\"", example))));
                    }
                    if !definition.synonyms.is_empty() {
                        lines.push(format!(
                            "      = {}",
                            self.style(&definition.synonyms.join(", "), &[Style::Yellow])
                        ));
                    }
                }
            }
        }

        if let Some(ref examples) = result.examples {
            if !examples.is_empty() {
                lines.push(String::new());
                for (i, example) in examples.iter().enumerate() {
                    lines.push(format!("  {}. {}", i + 1, example.source.trim_end()));
                    lines.push(format!("     {}", self.muted(&example.target)));
                }
            }
        }

        lines.join("\n")
    }

    /// Prints a translation result.
    pub fn result(&self, result: &TranslationResult) {
        println!("{}", self.format_result(result));
    }
}
