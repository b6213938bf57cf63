//! # Prompts Module
//!
//! Provides a dialoguer theme for credcache's interactive prompts.

use console::Style;
use dialoguer::theme::ColorfulTheme;

/// Returns the theme used for secret prompts: cyan bold prompt text with a
/// green success prefix.
pub fn credcache_theme() -> ColorfulTheme {
  ColorfulTheme {
    prompt_style: Style::new().cyan().bold(),
    success_prefix: Style::new().green().apply_to("✔".to_string()),
    ..ColorfulTheme::default()
  }
}
