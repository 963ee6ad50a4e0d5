//! Memoized paragraph type lookups.

use std::collections::HashMap;

use log::trace;

use tessera_core::identifier::SourceId;

use crate::{error::BackendError, source::ParagraphTypeSource};

/// Resolves the bundle of source paragraphs, caching results by id.
///
/// A single row may reference the same paragraph several times, so every id
/// is read from the source at most once per resolver. The cache is unbounded
/// and lives as long as the resolver; absent ids are cached too.
pub struct ParagraphTypeResolver<'a> {
    source: &'a dyn ParagraphTypeSource,
    cache: HashMap<SourceId, Option<String>>,
    lookups: usize,
}

impl<'a> ParagraphTypeResolver<'a> {
    /// Creates a resolver with an empty cache.
    pub fn new(source: &'a dyn ParagraphTypeSource) -> Self {
        Self {
            source,
            cache: HashMap::new(),
            lookups: 0,
        }
    }

    /// Returns the bundle of paragraph `id`, or `None` if the source has no such paragraph.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the source read fails. Failed reads are not cached.
    pub fn resolve_type(&mut self, id: SourceId) -> Result<Option<String>, BackendError> {
        if let Some(cached) = self.cache.get(&id) {
            return Ok(cached.clone());
        }

        self.lookups += 1;
        let paragraph_type = self.source.paragraph_type(id)?;
        trace!(id = id.get(), paragraph_type:?; "Paragraph type looked up");

        self.cache.insert(id, paragraph_type.clone());
        Ok(paragraph_type)
    }

    /// Drops every cached type.
    pub fn reset(&mut self) {
        self.cache.clear();
    }

    /// Returns the number of reads issued against the source.
    pub fn lookups(&self) -> usize {
        self.lookups
    }

    /// Returns the number of cached ids.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}
