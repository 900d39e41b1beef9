//! Selector matching.
//!
//! Matching is a pure predicate over a [`Selector`] and a
//! [`ModelIdentifier`]. The only state is an optional cache of compiled
//! globs, which never changes a result.

use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};

use globset::{GlobBuilder, GlobMatcher};
use lru::LruCache;

use crate::errors::SelectorError;
use crate::identifier::{DocumentIdentifier, ModelIdentifier};
use crate::selector::{DocumentFilter, Selector, SelectorEntry};

/// Compiles a filter pattern with extended glob semantics.
///
/// `*` and `?` stop at `/`, `**` spans directories, and `{a,b}` and `[...]`
/// groups are supported.
///
/// # Errors
///
/// Returns [`SelectorError::InvalidPattern`] when the pattern does not
/// compile.
pub fn compile_pattern(pattern: &str) -> Result<GlobMatcher, SelectorError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| SelectorError::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })
}

/// Evaluates selectors, caching compiled globs when configured to.
#[derive(Debug)]
pub struct SelectorMatcher {
    globs: Option<Mutex<LruCache<String, GlobMatcher>>>,
}

impl Default for SelectorMatcher {
    fn default() -> Self {
        Self::with_capacity(tether_config::DEFAULT_GLOB_CACHE_CAPACITY)
    }
}

impl SelectorMatcher {
    /// Builds a matcher retaining up to `capacity` compiled globs. A capacity
    /// of zero compiles on every evaluation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            globs: NonZeroUsize::new(capacity).map(|size| Mutex::new(LruCache::new(size))),
        }
    }

    /// Builds a matcher that never caches.
    #[must_use]
    pub const fn uncached() -> Self {
        Self { globs: None }
    }

    /// Decides whether `model` falls under `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::InvalidPattern`] when a pattern consulted
    /// during evaluation does not compile.
    pub fn matches(
        &self,
        selector: &Selector,
        model: &ModelIdentifier,
    ) -> Result<bool, SelectorError> {
        match selector {
            Selector::Language(language) => Ok(language_matches(language, model)),
            Selector::Filter(filter) => self.filter_matches(filter, model),
            Selector::Sequence(entries) => {
                for entry in entries {
                    if self.entry_matches(entry, model)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    fn entry_matches(
        &self,
        entry: &SelectorEntry,
        model: &ModelIdentifier,
    ) -> Result<bool, SelectorError> {
        match entry {
            SelectorEntry::Language(language) => Ok(language_matches(language, model)),
            SelectorEntry::Filter(filter) => self.filter_matches(filter, model),
        }
    }

    fn filter_matches(
        &self,
        filter: &DocumentFilter,
        model: &ModelIdentifier,
    ) -> Result<bool, SelectorError> {
        if present(filter.language.as_deref())
            .is_some_and(|language| language != model.language_id())
        {
            return Ok(false);
        }
        if present(filter.scheme.as_deref()).is_some_and(|scheme| scheme != model.scheme()) {
            return Ok(false);
        }
        if let Some(pattern) = present(filter.pattern.as_deref()) {
            let path = model.path();
            return self.glob_matches(pattern, &path);
        }
        Ok(true)
    }

    fn glob_matches(&self, pattern: &str, path: &str) -> Result<bool, SelectorError> {
        let Some(cache) = &self.globs else {
            return Ok(compile_pattern(pattern)?.is_match(path));
        };

        let mut globs = cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(glob) = globs.get(pattern) {
            return Ok(glob.is_match(path));
        }
        let glob = compile_pattern(pattern)?;
        let matched = glob.is_match(path);
        globs.put(pattern.to_owned(), glob);
        Ok(matched)
    }
}

/// Decides whether a protocol-side document falls under `selector`, without
/// caching.
///
/// # Errors
///
/// Returns [`crate::BridgeError::Identifier`] when the document URI does not
/// parse and [`crate::BridgeError::Selector`] when a pattern does not compile.
pub fn match_document(
    selector: &Selector,
    document: &DocumentIdentifier,
) -> Result<bool, crate::BridgeError> {
    let model = ModelIdentifier::try_from(document)?;
    Ok(SelectorMatcher::uncached().matches(selector, &model)?)
}

fn language_matches(language: &str, model: &ModelIdentifier) -> bool {
    language == model.language_id()
}

fn present(field: Option<&str>) -> Option<&str> {
    field.filter(|value| !value.is_empty())
}
