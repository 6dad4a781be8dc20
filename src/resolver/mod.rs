//! Named-value sources consulted when expanding placeholders.
//!
//! Sources are composed by priority: the first source that returns a value
//! for a name wins and later sources are never asked about that name.
//!
//! ## Sources
//! - [`EnvResolver`] - the process environment
//! - [`EnvFileResolver`] - a `KEY=VALUE` file such as `.env`
//! - [`CompositeResolver`] - an ordered chain of other sources
//! - `HashMap<String, String>` - in-memory values

mod env;
mod env_file;

pub use env::EnvResolver;
pub use env_file::EnvFileResolver;

use std::collections::HashMap;
use std::path::Path;

/// Lookup of a variable by name.
pub trait VariableResolver {
    /// Resolve `name`, returning `None` when this source has no value.
    ///
    /// An empty string is a value, not an absence.
    fn resolve(&self, name: &str) -> Option<String>;
}

impl<S: std::hash::BuildHasher> VariableResolver for HashMap<String, String, S> {
    fn resolve(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<R: VariableResolver + ?Sized> VariableResolver for &R {
    fn resolve(&self, name: &str) -> Option<String> {
        (**self).resolve(name)
    }
}

impl<R: VariableResolver + ?Sized> VariableResolver for Box<R> {
    fn resolve(&self, name: &str) -> Option<String> {
        (**self).resolve(name)
    }
}

/// Ordered chain of resolvers, highest priority first.
#[derive(Default)]
pub struct CompositeResolver {
    sources: Vec<Box<dyn VariableResolver + Send + Sync>>,
}

impl CompositeResolver {
    /// Create an empty chain. Resolves nothing until sources are pushed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Production ordering: environment first, then the key/value file.
    pub fn with_defaults(env_file: &Path) -> Self {
        Self::new()
            .with(EnvResolver)
            .with(EnvFileResolver::load(env_file))
    }

    /// Append a lower-priority source (builder style).
    pub fn with(mut self, source: impl VariableResolver + Send + Sync + 'static) -> Self {
        self.push(source);
        self
    }

    /// Append a lower-priority source.
    pub fn push(&mut self, source: impl VariableResolver + Send + Sync + 'static) {
        self.sources.push(Box::new(source));
    }
}

impl VariableResolver for CompositeResolver {
    fn resolve(&self, name: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.resolve(name))
    }
}

impl std::fmt::Debug for CompositeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeResolver")
            .field("sources", &self.sources.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_source_wins() {
        let a = source(&[("K", "a")]);
        let b = source(&[("K", "b")]);

        let ab = CompositeResolver::new().with(a.clone()).with(b.clone());
        assert_eq!(ab.resolve("K").as_deref(), Some("a"));

        let ba = CompositeResolver::new().with(b).with(a);
        assert_eq!(ba.resolve("K").as_deref(), Some("b"));
    }

    #[test]
    fn test_falls_through_to_later_sources() {
        let chain = CompositeResolver::new()
            .with(source(&[("ONLY_A", "1")]))
            .with(source(&[("ONLY_B", "2")]));

        assert_eq!(chain.resolve("ONLY_A").as_deref(), Some("1"));
        assert_eq!(chain.resolve("ONLY_B").as_deref(), Some("2"));
        assert_eq!(chain.resolve("NEITHER"), None);
    }

    #[test]
    fn test_empty_value_stops_the_chain() {
        let chain = CompositeResolver::new()
            .with(source(&[("K", "")]))
            .with(source(&[("K", "later")]));
        assert_eq!(chain.resolve("K").as_deref(), Some(""));
    }

    #[test]
    fn test_empty_chain_resolves_nothing() {
        let chain = CompositeResolver::new();
        assert_eq!(chain.resolve("PATH"), None);
    }
}
