//! # Set Command
//!
//! Stores a secret, taking it from the command line, from piped stdin, or
//! from a hidden prompt.

use std::io::{self, IsTerminal, Read};

use anyhow::{Context, Result, bail};
use clap::Args;
use credcache_core::CredentialStore;
use dialoguer::Password;
use tracing::debug;

use super::KeyArgs;
use crate::output::{format_key, print_success};
use crate::prompts::credcache_theme;

/// Command for storing a secret
#[derive(Args)]
pub struct SetArgs {
  #[command(flatten)]
  pub key: KeyArgs,

  /// Secret to store; read from stdin or prompted for when omitted
  #[arg(long, value_name = "SECRET")]
  pub secret: Option<String>,
}

pub(crate) fn handle_set_command(args: SetArgs, store: &dyn CredentialStore) -> Result<()> {
  let KeyArgs { service, account } = &args.key;
  let secret = match args.secret {
    Some(ref secret) => secret.clone(),
    None => read_secret(service, account)?,
  };

  if secret.is_empty() {
    bail!("Refusing to store an empty secret for {account} on {service}");
  }

  store.set(service, account, &secret)?;
  print_success(&format!("Stored secret for {}", format_key(service, account)));
  Ok(())
}

fn read_secret(service: &str, account: &str) -> Result<String> {
  let stdin = io::stdin();

  if stdin.is_terminal() {
    return Password::with_theme(&credcache_theme())
      .with_prompt(format!("Secret for {account} on {service}"))
      .interact()
      .context("Failed to read secret from prompt");
  }

  debug!("Reading secret from stdin");
  let mut buf = String::new();
  stdin.lock().read_to_string(&mut buf).context("Failed to read secret from stdin")?;
  Ok(trim_line_ending(&buf).to_string())
}

/// Strip the newline a shell pipe or heredoc leaves behind
fn trim_line_ending(input: &str) -> &str {
  input.trim_end_matches(['\n', '\r'])
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_trim_line_ending() {
    assert_eq!(trim_line_ending("p@ss\n"), "p@ss");
    assert_eq!(trim_line_ending("p@ss\r\n"), "p@ss");
    assert_eq!(trim_line_ending("  spaced  \n"), "  spaced  ");
    assert_eq!(trim_line_ending(""), "");
  }
}
