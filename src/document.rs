//! Validated JSON documents used as the value source of a fold pass.

use crate::error::{Error, Result};
use crate::path::{self, Resolved};
use serde::de::IgnoredAny;

/// A syntactically valid JSON document fetched from a secret source. The
/// text is kept as received so that queries return exact slices of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    text: String,
}

impl Document {
    /// Validates `bytes` as JSON. `name` identifies the source in errors and
    /// log lines.
    ///
    /// # Errors
    /// * `Error::MalformedDocument` if the bytes are not UTF-8 or not JSON
    pub fn parse(name: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let name = name.into();
        let text = match std::str::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                return Err(Error::MalformedDocument {
                    source_name: name,
                    reason: e.to_string(),
                })
            }
        };
        match serde_json::from_str::<IgnoredAny>(text) {
            Ok(_) => Ok(Self {
                name,
                text: text.to_string(),
            }),
            Err(e) => Err(Error::MalformedDocument {
                source_name: name,
                reason: e.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves a path against this document.
    pub fn get(&self, path: &str) -> Option<Resolved> {
        path::query(&self.text, path)
    }
}
