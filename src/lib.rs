//! opfill fills `[[path]]` tags in a text template with values taken from
//! JSON documents, typically the `json` custom field of 1Password items.
//! Several documents can be folded into one template, each filling the
//! tags the previous ones left untouched.

/// Command-line interface module for opfill
pub mod cli;

/// Path prefix and verbosity passed to the engine
pub mod config;

/// Common constants
pub mod constants;

/// JSON validation of fetched documents
pub mod document;

/// Error types and handling for opfill
pub mod error;

/// Filling one template from one document
pub mod fill;

/// Folding several documents into one template in order
pub mod fold;

/// 1Password items fetched through the `op` CLI
pub mod onepassword;

/// gjson-style path queries
pub mod path;

/// Local and remote secret sources
pub mod source;

/// Tag scanning and expression parsing
pub mod tag;

/// Service account token lookup
pub mod token;

pub use config::{Config, Verbosity};
pub use document::Document;
pub use error::{Error, Result};
pub use fill::{Filler, LogObserver};
pub use fold::{fold, fold_sources};
