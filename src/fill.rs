//! Filling one template from one document.
//!
//! Every tag found by the scanner is parsed, prefixed, looked up in the
//! document and, when found, substituted at every place its exact text
//! occurs. Tags that do not resolve are left verbatim so that a later pass
//! with another document can still fill them.

use crate::config::{Config, Verbosity};
use crate::document::Document;
use crate::error::Result;
use crate::tag::{self, Mode, Tag};
use log::{debug, info};
use std::collections::HashMap;

/// Observability event emitted for a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'a> {
    Translated { tag: &'a str },
    TranslatedWithValue { tag: &'a str, value: &'a str },
    NotTranslated { tag: &'a str },
}

/// Receives the events the filler emits, already filtered by verbosity.
pub trait Observer {
    fn observe(&self, event: &Event<'_>);
}

/// Writes events to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn observe(&self, event: &Event<'_>) {
        match event {
            Event::Translated { tag } => info!("Translated {tag}"),
            Event::TranslatedWithValue { tag, value } => info!("Translated {tag} => {value}"),
            Event::NotTranslated { tag } => info!("Not translated {tag}"),
        }
    }
}

/// Result of looking up one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found(String),
    NotFound,
}

/// Per-tag outcome of a fill pass, in scan order, one entry per
/// occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagReport {
    pub tag: String,
    pub outcome: Outcome,
}

/// Resolves tags against a single document.
pub struct Filler<'a> {
    config: &'a Config,
    observer: &'a dyn Observer,
}

impl<'a> Filler<'a> {
    pub fn new(config: &'a Config, observer: &'a dyn Observer) -> Self {
        Self { config, observer }
    }

    /// Fills `template` from `document` and returns the substituted text.
    pub fn fill(&self, template: &str, document: &Document) -> String {
        self.fill_with_report(template, document).0
    }

    /// Validates `bytes` as JSON before filling.
    ///
    /// # Errors
    /// * `Error::MalformedDocument` if `bytes` is not valid JSON; the
    ///   template is not touched
    pub fn fill_bytes(&self, template: &str, name: &str, bytes: &[u8]) -> Result<String> {
        let document = Document::parse(name, bytes)?;
        Ok(self.fill(template, &document))
    }

    /// Fills `template` from `document`, also returning what happened to
    /// every scanned tag occurrence.
    ///
    /// A tag text is looked up once; its later occurrences reuse that
    /// outcome and still emit their own event.
    pub fn fill_with_report(&self, template: &str, document: &Document) -> (String, Vec<TagReport>) {
        let tags = tag::scan(template);
        debug!("Found {} tag(s) to resolve against {}", tags.len(), document.name());

        let mut output = template.to_string();
        let mut resolved: HashMap<String, Outcome> = HashMap::new();
        let mut reports = Vec::with_capacity(tags.len());

        for tag in tags {
            let outcome = match resolved.get(&tag.raw).cloned() {
                Some(outcome) => outcome,
                None => {
                    let outcome = self.resolve(&tag, document);
                    if let Outcome::Found(rendered) = &outcome {
                        output = output.replace(&tag.raw, rendered);
                    }
                    resolved.insert(tag.raw.clone(), outcome.clone());
                    outcome
                }
            };

            match &outcome {
                Outcome::Found(rendered) => self.emit_translated(&tag.raw, rendered),
                Outcome::NotFound => self.emit(Event::NotTranslated { tag: &tag.raw }),
            }

            reports.push(TagReport {
                tag: tag.raw,
                outcome,
            });
        }

        (output, reports)
    }

    fn resolve(&self, tag: &Tag, document: &Document) -> Outcome {
        let expression = tag.parse();
        let path = self.config.effective_path(&expression.path);

        match document.get(&path) {
            Some(node) => Outcome::Found(match expression.mode {
                Mode::Value => node.as_scalar_string(),
                Mode::Raw => node.as_raw_json().to_string(),
            }),
            None => Outcome::NotFound,
        }
    }

    fn emit_translated(&self, tag: &str, value: &str) {
        if self.config.verbosity >= Verbosity::TranslatedWithValue {
            self.emit(Event::TranslatedWithValue { tag, value });
        } else {
            self.emit(Event::Translated { tag });
        }
    }

    fn emit(&self, event: Event<'_>) {
        if self.config.verbosity > Verbosity::Silent {
            self.observer.observe(&event);
        }
    }
}
