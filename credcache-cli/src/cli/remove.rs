//! # Remove Command

use anyhow::Result;
use clap::Args;
use credcache_core::CredentialStore;

use super::KeyArgs;
use crate::output::{format_key, print_success};

/// Command for removing a secret
#[derive(Args)]
pub struct RemoveArgs {
  #[command(flatten)]
  pub key: KeyArgs,
}

pub(crate) fn handle_remove_command(args: RemoveArgs, store: &dyn CredentialStore) -> Result<()> {
  let KeyArgs { service, account } = args.key;
  store.remove(&service, &account)?;
  print_success(&format!("Removed secret for {}", format_key(&service, &account)));
  Ok(())
}
