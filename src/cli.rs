//! Command-line interface implementation for opfill.
//! Provides argument parsing and help text formatting using clap.

use crate::config::{Config, Verbosity};
use crate::constants::{DEFAULT_TOKEN_FILE, TOKEN_ENV};
use crate::error::{Error, Result};
use crate::onepassword::OnePasswordSource;
use crate::source::{FileSource, SecretSource};
use crate::token::resolve_token;
use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser};
use log::warn;
use std::path::PathBuf;

/// Command-line arguments structure for opfill.
#[derive(Parser, Debug)]
#[command(author, version, about = "opfill: fill [[path]] tags in a template from 1Password items", long_about = None)]
pub struct Args {
    /// Template file containing [[path]] tags
    #[arg(long = "in", value_name = "FILE")]
    pub input: PathBuf,

    /// File the filled template is written to
    #[arg(long = "out", value_name = "FILE")]
    pub output: PathBuf,

    /// Local JSON file to use instead of 1Password. May be repeated;
    /// files are applied in the order given
    #[arg(long = "injson", value_name = "FILE")]
    pub injson: Vec<PathBuf>,

    /// 1Password vault name
    #[arg(long, value_name = "NAME")]
    pub vault: Option<String>,

    /// 1Password item name. May be repeated; items are applied in the order given
    #[arg(long = "item", value_name = "NAME")]
    pub items: Vec<String>,

    /// 1Password service account token
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// Token file to read when no token is given, relative to the home directory
    #[arg(long = "tokenfile", value_name = "FILE", default_value = DEFAULT_TOKEN_FILE)]
    pub token_file: PathBuf,

    /// Prefix prepended to every tag path
    #[arg(long, value_name = "PATH", default_value = "")]
    pub prefix: String,

    /// Report translated tags; repeat to include their values
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_occurrences(self.verbose)
    }

    pub fn config(&self) -> Config {
        Config::new(self.prefix.clone(), self.verbosity())
    }

    /// Builds the secret sources in the order they are folded.
    ///
    /// Local JSON files take precedence: when any are given, 1Password is not
    /// contacted and no token is needed.
    ///
    /// # Errors
    /// * `Error::MissingSource` if there are no JSON files and the vault or
    ///   items are missing
    /// * `Error::TokenError` if no token can be found for 1Password
    pub fn sources(&self) -> Result<Vec<Box<dyn SecretSource>>> {
        if !self.injson.is_empty() {
            if self.vault.is_some() || !self.items.is_empty() {
                warn!("--injson given, ignoring 1Password vault and items");
            }
            return Ok(self
                .injson
                .iter()
                .map(|path| Box::new(FileSource::new(path)) as Box<dyn SecretSource>)
                .collect());
        }

        let vault = match (&self.vault, self.items.is_empty()) {
            (Some(vault), false) => vault,
            _ => {
                return Err(Error::MissingSource(
                    "--vault <NAME> and --item <NAME> are required for 1Password".to_string(),
                ))
            }
        };

        let token = resolve_token(self.token.as_deref(), &self.token_file)?;
        Ok(self
            .items
            .iter()
            .map(|item| {
                Box::new(OnePasswordSource::new(vault, item, Some(token.clone())))
                    as Box<dyn SecretSource>
            })
            .collect())
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 and the help text if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
