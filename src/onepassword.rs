//! 1Password items as secret sources, fetched through the `op` CLI.

use crate::constants::{OP_BINARY, PAYLOAD_FIELD, TOKEN_ENV};
use crate::document::Document;
use crate::error::{Error, Result};
use crate::source::SecretSource;
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::process::Command;

/// The parts of `op item get` output used for log lines.
#[derive(Debug, Deserialize)]
struct ItemSummary {
    id: String,
    title: Option<String>,
    vault: Option<VaultSummary>,
}

#[derive(Debug, Deserialize)]
struct VaultSummary {
    name: Option<String>,
}

/// One 1Password item whose `json` custom field holds a document.
#[derive(Debug, Clone)]
pub struct OnePasswordSource {
    vault: String,
    item: String,
    /// Service account token passed to `op` through the environment
    token: Option<String>,
    binary: String,
}

impl OnePasswordSource {
    pub fn new(vault: impl Into<String>, item: impl Into<String>, token: Option<String>) -> Self {
        Self {
            vault: vault.into(),
            item: item.into(),
            token,
            binary: OP_BINARY.to_string(),
        }
    }

    /// Runs a different executable instead of `op`.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    fn execute_op_command(&self, args: &[&str]) -> Result<Vec<u8>> {
        let mut cmd = Command::new(&self.binary);
        if let Some(token) = &self.token {
            cmd.env(TOKEN_ENV, token);
        }
        cmd.args(args);

        let output = match cmd.output() {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::SourceError(format!(
                    "1Password CLI '{}' not found on PATH. Install it from https://1password.com/downloads/command-line/",
                    self.binary
                )));
            }
            Err(e) => return Err(e.into()),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let msg = stderr.trim();
            if msg.contains("not currently signed in") {
                return Err(Error::SourceError(
                    "1Password authentication required. Provide a service account token or run 'op signin'".to_string(),
                ));
            }
            let msg = if msg.is_empty() {
                output.status.to_string()
            } else {
                msg.to_string()
            };
            return Err(Error::SourceError(format!("op item get failed: {msg}")));
        }

        Ok(output.stdout)
    }
}

impl SecretSource for OnePasswordSource {
    fn name(&self) -> String {
        format!("1Password item '{}' in vault '{}'", self.item, self.vault)
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        let stdout = self.execute_op_command(&[
            "item", "get", "--vault", &self.vault, "--format", "json", &self.item,
        ])?;

        if let Ok(summary) = serde_json::from_slice::<ItemSummary>(&stdout) {
            let vault = summary.vault.and_then(|v| v.name);
            debug!(
                "Fetched item {} ({}) from vault {}",
                summary.title.as_deref().unwrap_or(&self.item),
                summary.id,
                vault.as_deref().unwrap_or(&self.vault)
            );
        }

        let item = Document::parse(self.name(), &stdout)?;
        extract_payload(&item).map(String::into_bytes)
    }
}

/// Finds the `json` custom field in `op item get --format json` output.
///
/// Tried in order: a top-level field labelled `json`, a field with id
/// `json`, a field labelled `json` inside a section, and finally the notes
/// when they hold something that looks like JSON.
///
/// # Errors
/// * `Error::SourceError` if none of those locations holds a string
pub fn extract_payload(item: &Document) -> Result<String> {
    let paths = [
        format!(r#"fields.#(label=="{PAYLOAD_FIELD}").value"#),
        format!(r#"fields.#(id=="{PAYLOAD_FIELD}").value"#),
        format!(r#"sections.#.fields.#(label=="{PAYLOAD_FIELD}").value"#),
    ];

    for path in &paths {
        if let Some(payload) = string_at(item, path) {
            debug!("Payload found at {path}");
            return Ok(payload);
        }
    }

    if let Some(notes) = string_at(item, "notesPlain") {
        if looks_like_json(&notes) {
            debug!("Payload found in notesPlain");
            return Ok(notes);
        }
    }

    Err(Error::SourceError(format!(
        "could not find a field named \"{PAYLOAD_FIELD}\" in {}",
        item.name()
    )))
}

/// The string at `path`, or the first element when `path` yields an array.
fn string_at(item: &Document, path: &str) -> Option<String> {
    item.get(path)?.to_value().as_ref().and_then(first_string)
}

fn first_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.first().and_then(first_string),
        _ => None,
    }
}

/// Cheap shape check: a trimmed object or array literal.
pub fn looks_like_json(s: &str) -> bool {
    let s = s.trim();
    !s.is_empty()
        && ((s.starts_with('{') && s.ends_with('}')) || (s.starts_with('[') && s.ends_with(']')))
}
