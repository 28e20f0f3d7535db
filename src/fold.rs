//! Folding several documents into one template.
//!
//! Each document gets one fill pass, in the order given, and the output of a
//! pass is the input of the next. A tag filled by an earlier document no
//! longer exists as tag text, so later documents cannot override it.

use crate::document::Document;
use crate::error::Result;
use crate::fill::Filler;
use log::debug;

/// Applies `filler` once per document, strictly in order.
pub fn fold(filler: &Filler<'_>, template: &str, documents: &[Document]) -> String {
    documents.iter().fold(template.to_string(), |current, document| {
        debug!("Fold pass with {}", document.name());
        filler.fill(&current, document)
    })
}

/// Validates every `(name, bytes)` source, then folds them in order.
///
/// # Errors
/// * `Error::MalformedDocument` for the first source that is not valid JSON;
///   no substitution takes place in that case
pub fn fold_sources<N, B>(filler: &Filler<'_>, template: &str, sources: &[(N, B)]) -> Result<String>
where
    N: AsRef<str>,
    B: AsRef<[u8]>,
{
    let documents = sources
        .iter()
        .map(|(name, bytes)| Document::parse(name.as_ref(), bytes.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    Ok(fold(filler, template, &documents))
}
