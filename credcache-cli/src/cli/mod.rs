//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the credcache tool:
//! reading, storing, and removing cached secrets, and showing where they are
//! kept.

mod get;
mod info;
mod remove;
mod set;

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Args, Parser, Subcommand};
use credcache_core::{Backend, ConfigDirs, ConfigOverrides, StoreConfig, open_store};
use tracing::debug;

use crate::output::ColorMode;

/// Top-level CLI command for the credcache tool
#[derive(Parser)]
#[command(name = "credcache")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "A local credential cache for command-line logins")]
#[command(
  long_about = "Credcache remembers secrets per service and account so command-line tools\n\
        don't have to prompt for the same login on every invocation.\n\n\
        Secrets are kept in a JSON file in your data directory, or in the\n\
        operating system's secure store when the native backend is selected."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Where secrets are kept: 'file' or 'native'
  #[arg(long, global = true, value_name = "BACKEND")]
  pub backend: Option<Backend>,

  /// Store file to use instead of the one derived from the store name
  #[arg(long = "store", global = true, value_name = "PATH")]
  pub store_path: Option<PathBuf>,

  /// Store name; selects the store file and prefixes native entries
  #[arg(long, global = true, value_name = "NAME")]
  pub name: Option<String>,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the credcache tool
#[derive(Subcommand)]
pub enum Commands {
  /// Print the secret stored for an account
  #[command(long_about = "Prints the secret stored for an account on a service.\n\n\
            The secret is written to stdout on its own so it can be captured by\n\
            scripts. Exits with an error when nothing is stored for the pair.")]
  Get(get::GetArgs),

  /// Store or replace the secret for an account
  #[command(long_about = "Stores the secret for an account on a service, replacing any\n\
            existing one.\n\n\
            The secret is taken from --secret, from stdin when it is not a terminal,\n\
            or from a hidden interactive prompt.")]
  Set(set::SetArgs),

  /// Remove the secret stored for an account
  #[command(long_about = "Removes the secret stored for an account on a service.\n\n\
            Removing an account that has nothing stored is not an error.")]
  #[command(alias = "rm")]
  Remove(remove::RemoveArgs),

  /// Show which store is in use
  #[command(long_about = "Shows the active backend, store name, store file, and\n\
            configuration file location.")]
  Info,
}

/// The `(service, account)` pair a command operates on
#[derive(Args, Debug, Clone)]
pub struct KeyArgs {
  /// Service the secret belongs to, e.g. a host name
  pub service: String,

  /// Account on that service, e.g. a user name or email
  pub account: String,
}

impl Cli {
  /// Store settings given on the command line
  pub fn overrides(&self) -> ConfigOverrides {
    ConfigOverrides {
      name: self.name.clone(),
      backend: self.backend,
      path: self.store_path.clone(),
    }
  }
}

/// Layer command-line overrides on top of the file and environment settings
pub fn resolve_config(dirs: &ConfigDirs, overrides: ConfigOverrides) -> Result<StoreConfig> {
  let mut config = StoreConfig::load(dirs)?;
  config.merge(overrides);
  config.validate()?;
  Ok(config)
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  let dirs = ConfigDirs::new();
  let config = resolve_config(&dirs, cli.overrides())?;
  debug!("Using {} store '{}'", config.backend, config.name);

  match cli.command {
    Commands::Get(args) => get::handle_get_command(args, &*open_store(&config)),
    Commands::Set(args) => set::handle_set_command(args, &*open_store(&config)),
    Commands::Remove(args) => remove::handle_remove_command(args, &*open_store(&config)),
    Commands::Info => info::handle_info_command(&dirs, &config),
  }
}
