use std::cell::RefCell;

use rustc_hash::FxHashSet;

use crate::{
    pattern::{Pattern, PatternError},
    Path, PathRef, DEFAULT_ROOT,
};

/// Every path created through a `Tag`,
/// under a common root label.
///
/// Paths are only ever added.
#[derive(Debug)]
pub struct Registry {
    root: String,
    existing: RefCell<FxHashSet<Path>>,
}

impl Registry {
    pub fn new<S>(root: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            root: root.into(),
            existing: RefCell::new(FxHashSet::default()),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.existing.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.existing.borrow().is_empty()
    }

    pub fn contains<P>(&self, path: P) -> bool
    where
        P: AsRef<PathRef>,
    {
        self.existing.borrow().contains(path.as_ref())
    }

    /// A snapshot of every registered path.
    pub fn paths(&self) -> FxHashSet<Path> {
        self.existing.borrow().clone()
    }

    /// Add `path`,
    /// returning whether it was new.
    pub(crate) fn register(&self, path: &PathRef) -> bool {
        let mut existing = self.existing.borrow_mut();
        if existing.contains(path) {
            false
        } else {
            tracing::trace!(root = %self.root, %path, "registered path");
            existing.insert(path.to_owned())
        }
    }

    /// Every registered path matching the glob `pattern`.
    pub fn query(&self, pattern: &str) -> Result<FxHashSet<Path>, PatternError> {
        Ok(self.query_pattern(&Pattern::try_from(pattern)?))
    }

    pub fn query_pattern(&self, pattern: &Pattern) -> FxHashSet<Path> {
        let matches = self
            .existing
            .borrow()
            .iter()
            .filter(|path| path.matches(pattern))
            .cloned()
            .collect::<FxHashSet<_>>();
        tracing::debug!(
            root = %self.root,
            %pattern,
            matches = matches.len(),
            "queried registry"
        );
        matches
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}
