//! # Output Formatting
//!
//! Formatted output functions with colors and emojis for user-facing
//! messages. Styling follows the `--colors` override and otherwise only
//! applies when the stream is a terminal. Secrets themselves are always
//! printed raw so they can be piped.

use owo_colors::{OwoColorize, Stream, Style};

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Apply the mode as the process-wide color override
  pub fn apply(self) {
    match self {
      ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
      ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
      // Leave owo_colors to detect the terminal itself
      ColorMode::Auto => {}
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!("{} {}", check.if_supports_color(Stream::Stdout, |t| t.style(Style::new().green().bold())), message);
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!("{} {}", cross.if_supports_color(Stream::Stderr, |t| t.style(Style::new().red().bold())), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!("{} {}", info.if_supports_color(Stream::Stdout, |t| t.style(Style::new().blue().bold())), message);
}

/// Print a labelled value, as used by `credcache info`
pub fn print_field(label: &str, value: &str) {
  let label = format!("{label:>10}");
  println!("{}  {}", label.if_supports_color(Stream::Stdout, |t| t.bold()), value);
}

/// Format a filesystem path
pub fn format_path(path: &str) -> String {
  path.if_supports_color(Stream::Stdout, |t| t.bright_green()).to_string()
}

/// Format a `service`/`account` pair for messages
pub fn format_key(service: &str, account: &str) -> String {
  format!(
    "{} on {}",
    account.if_supports_color(Stream::Stdout, |t| t.style(Style::new().bright_cyan().bold())),
    service.if_supports_color(Stream::Stdout, |t| t.bright_cyan())
  )
}
