//! # Output Configuration
//!
//! This module provides utilities for controlling CLI output appearance,
//! including color and glyph support based on terminal capabilities and
//! user preferences.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```rust
//! use pusher::output::{paint, OutputConfig, Tone};
//!
//! let config = OutputConfig::from_env_and_flag("never");
//! assert_eq!(paint(&config, Tone::Success, "done"), "done");
//! ```

use std::env;
use std::io::{self, Write};

use console::Style;

/// Output configuration for controlling colors and glyphs.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and glyphs should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Semantic tag deciding how a status line is decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Error,
    Push,
    Pull,
    Reset,
    Setup,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Tone::Success => Style::new().green().bright(),
            Tone::Warning => Style::new().yellow().bright(),
            Tone::Error => Style::new().red().bright(),
            Tone::Push => Style::new().magenta().bright(),
            Tone::Pull => Style::new().blue().bright(),
            Tone::Reset => Style::new().cyan().bright(),
            Tone::Setup => Style::new().color256(214),
        }
    }
}

/// Decorate `text` for `tone`, or return it unchanged when colors are off.
pub fn paint(config: &OutputConfig, tone: Tone, text: &str) -> String {
    if config.use_color {
        tone.style().force_styling(true).apply_to(text).to_string()
    } else {
        text.to_string()
    }
}

/// Returns the appropriate string based on color configuration.
///
/// When colors are enabled, returns the glyph. When disabled, returns
/// the plain text alternative.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Writes the status lines of a run.
pub struct Reporter {
    config: OutputConfig,
    out: Box<dyn Write>,
}

impl Reporter {
    /// A reporter writing to stdout.
    pub fn stdout(config: OutputConfig) -> Self {
        Self::new(config, Box::new(io::stdout()))
    }

    pub fn new(config: OutputConfig, out: Box<dyn Write>) -> Self {
        Self { config, out }
    }

    /// Write one decorated line, prefixed with `glyph` (or `plain` without color).
    pub fn line(&mut self, tone: Tone, glyph: &str, plain: &str, text: &str) {
        let prefix = emoji(&self.config, glyph, plain);
        let line = paint(&self.config, tone, &format!("{} {}", prefix, text));
        // A closed stdout must not abort a run halfway through its commands
        let _ = writeln!(self.out, "{}", line);
        let _ = self.out.flush();
    }

    /// Write captured output from a failed command, as-is apart from color.
    pub fn detail(&mut self, tone: Tone, text: &str) {
        let text = text.trim_end();
        if text.is_empty() {
            return;
        }
        let _ = writeln!(self.out, "{}", paint(&self.config, tone, text));
        let _ = self.out.flush();
    }

    pub fn step_done(&mut self, command: &str) {
        self.line(Tone::Success, "⌗", "[ok]", &format!("{} done!", command));
    }

    pub fn step_failed(&mut self, command: &str, stderr: &str) {
        self.line(Tone::Error, "⊗", "[error]", &format!("Error in: {}", command));
        self.detail(Tone::Error, stderr);
    }

    pub fn warning(&mut self, text: &str) {
        self.line(Tone::Warning, "⚠", "[warn]", text);
    }

    pub fn cancelled(&mut self, text: &str) {
        self.line(Tone::Warning, "⊘", "[cancel]", text);
    }

    pub fn success(&mut self, text: &str) {
        self.line(Tone::Success, "⌗", "[ok]", text);
    }
}
