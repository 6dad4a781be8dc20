//! `${NAME}` / `${NAME:DEFAULT}` placeholder expansion.
//!
//! NAME is one or more characters other than `}` and `:`. DEFAULT is zero
//! or more characters other than `}`; an empty default (`${NAME:}`) still
//! counts as a default. Substituted text is never re-expanded and there is
//! no escape for a literal `${`.

use crate::resolver::VariableResolver;
use regex_lite::{Captures, Regex};
use std::collections::BTreeSet;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}:]+)(?::([^}]*))?\}").expect("placeholder pattern is valid")
});

/// Names referenced without a resolvable value and without a default.
///
/// Shared by every file of one change-set so that the caller sees all
/// offenders at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingVariables {
    names: BTreeSet<String>,
}

impl MissingVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name`. Returns false if it was already recorded.
    pub fn record(&mut self, name: &str) -> bool {
        self.names.insert(name.to_string())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &BTreeSet<String> {
        &self.names
    }

    pub fn into_names(self) -> BTreeSet<String> {
        self.names
    }
}

/// Expand every placeholder in `template`.
///
/// A placeholder with a resolver value takes that value. Otherwise its
/// default is used, or the empty string if it has none. With
/// `enforce_required`, a placeholder that has neither value nor default is
/// also recorded into `missing`.
pub fn expand(
    template: &str,
    resolver: &dyn VariableResolver,
    missing: &mut MissingVariables,
    enforce_required: bool,
) -> String {
    if !template.contains("${") {
        return template.to_string();
    }

    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let name = &caps[1];
            let default = caps.get(2).map(|m| m.as_str());

            if let Some(value) = resolver.resolve(name) {
                return value;
            }
            match default {
                Some(default) => default.to_string(),
                None => {
                    if enforce_required {
                        missing.record(name);
                    }
                    String::new()
                }
            }
        })
        .into_owned()
}

/// Expansion state for one change-set run.
///
/// Owns the missing-variable collector and borrows the resolver chain; the
/// same expander is handed to every codec in turn.
pub struct Expander<'r> {
    resolver: &'r dyn VariableResolver,
    missing: MissingVariables,
    enforce_required: bool,
}

impl<'r> Expander<'r> {
    pub fn new(resolver: &'r dyn VariableResolver, enforce_required: bool) -> Self {
        Self {
            resolver,
            missing: MissingVariables::new(),
            enforce_required,
        }
    }

    pub fn expand(&mut self, template: &str) -> String {
        expand(
            template,
            self.resolver,
            &mut self.missing,
            self.enforce_required,
        )
    }

    pub fn into_missing(self) -> MissingVariables {
        self.missing
    }
}
