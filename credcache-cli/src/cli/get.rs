//! # Get Command
//!
//! Prints a cached secret to stdout.

use anyhow::Result;
use clap::Args;
use credcache_core::CredentialStore;

use super::KeyArgs;

/// Command for reading a secret
#[derive(Args)]
pub struct GetArgs {
  #[command(flatten)]
  pub key: KeyArgs,
}

/// Handle the get command
///
/// Only the secret goes to stdout so the output can be captured directly;
/// a miss is returned as an error.
pub(crate) fn handle_get_command(args: GetArgs, store: &dyn CredentialStore) -> Result<()> {
  let secret = store.get(&args.key.service, &args.key.account)?;
  println!("{secret}");
  Ok(())
}
