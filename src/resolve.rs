//! Three-tier setting resolution.
//!
//! Every setting is resolved the same way:
//!
//! 1. **Argument**: an explicit command-line value
//! 2. **Environment variable**: a variable of the same name
//! 3. **Default**: a static or derived fallback
//!
//! Environment access goes through [`EnvLookup`] so resolution can be
//! exercised against an in-memory environment.

use std::collections::HashMap;
use std::env;
use std::fmt;

/// Read access to environment variables.
pub trait EnvLookup {
    /// Value of `name`, if set. An empty value still counts as set.
    fn get(&self, name: &str) -> Option<String>;

    /// Whether `name` exists, regardless of its value.
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }
}

/// An in-memory environment.
#[derive(Debug, Default, Clone)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl EnvLookup for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Which tier supplied a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Argument,
    Environment,
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Argument => write!(f, "argument"),
            Source::Environment => write!(f, "environment"),
            Source::Default => write!(f, "default"),
        }
    }
}

/// A resolved value together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub source: Source,
}

/// Resolve `name` from an explicit value, then the environment, then `default`.
///
/// `default` is only evaluated when neither of the first two tiers applies.
pub fn resolve<F>(name: &str, explicit: Option<&str>, env: &dyn EnvLookup, default: F) -> Resolved
where
    F: FnOnce() -> String,
{
    let resolved = if let Some(value) = explicit {
        Resolved {
            value: value.to_string(),
            source: Source::Argument,
        }
    } else if let Some(value) = env.get(name) {
        Resolved {
            value,
            source: Source::Environment,
        }
    } else {
        Resolved {
            value: default(),
            source: Source::Default,
        }
    };

    tracing::debug!(setting = name, source = %resolved.source, value = %resolved.value, "resolved");
    resolved
}

/// Resolve `name` from the first two tiers only. There is no default.
pub fn resolve_optional(name: &str, explicit: Option<&str>, env: &dyn EnvLookup) -> Option<Resolved> {
    let resolved = match explicit {
        Some(value) => Resolved {
            value: value.to_string(),
            source: Source::Argument,
        },
        None => Resolved {
            value: env.get(name)?,
            source: Source::Environment,
        },
    };

    tracing::debug!(setting = name, source = %resolved.source, value = %resolved.value, "resolved");
    Some(resolved)
}

/// Presence-style flag: set by the switch, or by `name` merely existing in the environment.
pub fn flag(name: &str, switch: bool, env: &dyn EnvLookup) -> bool {
    let set = switch || env.contains(name);
    tracing::debug!(flag = name, switch, set, "resolved flag");
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_beats_environment() {
        let env = MapEnv::new().with("CC", "/opt/cc");
        let r = resolve("CC", Some("/usr/bin/clang"), &env, || "/usr/bin/g++".into());
        assert_eq!(r.value, "/usr/bin/clang");
        assert_eq!(r.source, Source::Argument);
    }

    #[test]
    fn test_environment_beats_default() {
        let env = MapEnv::new().with("CC", "/opt/cc");
        let r = resolve("CC", None, &env, || "/usr/bin/g++".into());
        assert_eq!(r.value, "/opt/cc");
        assert_eq!(r.source, Source::Environment);
    }

    #[test]
    fn test_default_used_last() {
        let r = resolve("CC", None, &MapEnv::new(), || "/usr/bin/g++".into());
        assert_eq!(r.value, "/usr/bin/g++");
        assert_eq!(r.source, Source::Default);
    }

    #[test]
    fn test_default_not_evaluated_when_overridden() {
        let r = resolve("CC", Some("x"), &MapEnv::new(), || panic!("default evaluated"));
        assert_eq!(r.value, "x");
    }

    #[test]
    fn test_empty_environment_value_counts() {
        let env = MapEnv::new().with("VERBOSE", "");
        let r = resolve("VERBOSE", None, &env, || "@".into());
        assert_eq!(r.value, "");
        assert_eq!(r.source, Source::Environment);
    }

    #[test]
    fn test_optional_has_no_default() {
        assert!(resolve_optional("SWIG", None, &MapEnv::new()).is_none());

        let env = MapEnv::new().with("SWIG", "/usr/bin/swig");
        let r = resolve_optional("SWIG", None, &env).unwrap();
        assert_eq!(r.value, "/usr/bin/swig");
        assert_eq!(r.source, Source::Environment);
    }

    #[test]
    fn test_flag_presence() {
        assert!(!flag("REMOVE_SIM", false, &MapEnv::new()));
        assert!(flag("REMOVE_SIM", true, &MapEnv::new()));
        // Value is irrelevant, only existence matters
        assert!(flag("REMOVE_SIM", false, &MapEnv::new().with("REMOVE_SIM", "0")));
    }
}
