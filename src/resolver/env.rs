//! Process environment source.

use super::VariableResolver;

/// Resolves names from the ambient process environment.
///
/// Unset variables and values that are not valid UTF-8 are absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvResolver;

impl VariableResolver for EnvResolver {
    fn resolve(&self, name: &str) -> Option<String> {
        std::env::var_os(name).and_then(|value| value.into_string().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_present_variable() {
        // PATH is set in any environment that can run cargo
        let expected = std::env::var("PATH").ok();
        assert_eq!(EnvResolver.resolve("PATH"), expected);
    }

    #[test]
    fn test_unset_variable_is_absent() {
        assert_eq!(
            EnvResolver.resolve("CONFIG_INJECTOR_SURELY_UNSET_VARIABLE_1234"),
            None
        );
    }
}
