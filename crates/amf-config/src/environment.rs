//! Config environment variables and `$VAR` resolution.
//!
//! Configs can declare environment variables (e.g. `SHOT_LOOKS`) with
//! default values and reference them in color space or look fields as
//! `$VAR` / `${VAR}`.
//!
//! # Example
//!
//! ```
//! use amf_config::Environment;
//!
//! let mut env = Environment::new();
//! env.add("SHOT_LOOKS", "ACES2065-1");
//!
//! assert_eq!(env.resolve("$SHOT_LOOKS"), "ACES2065-1");
//! ```

use std::collections::HashMap;

/// Declared environment variables with default values.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Variable name -> default value.
    vars: HashMap<String, String>,
}

impl Environment {
    /// Creates an empty environment.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a variable, replacing any previous value.
    #[inline]
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Gets a variable's declared value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Checks if a variable is declared.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Returns all declared variables.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Resolves all `$VAR` and `${VAR}` references in a string.
    ///
    /// Unknown variables are left as-is.
    pub fn resolve(&self, input: &str) -> String {
        let mut result = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' {
                result.push(c);
                continue;
            }
            if chars.peek() == Some(&'{') {
                chars.next();
                let var_name: String = chars.by_ref().take_while(|&c| c != '}').collect();
                if let Some(value) = self.get(&var_name) {
                    result.push_str(value);
                } else {
                    result.push_str("${");
                    result.push_str(&var_name);
                    result.push('}');
                }
            } else {
                let mut var_name = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_alphanumeric() || ch == '_' {
                        var_name.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if var_name.is_empty() {
                    result.push('$');
                } else if let Some(value) = self.get(&var_name) {
                    result.push_str(value);
                } else {
                    result.push('$');
                    result.push_str(&var_name);
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_simple_var() {
        let mut env = Environment::new();
        env.add("SHOT", "sh010");
        assert_eq!(env.resolve("/path/$SHOT/file"), "/path/sh010/file");
    }

    #[test]
    fn resolve_braced_var() {
        let mut env = Environment::new();
        env.add("SEQ", "sq01");
        assert_eq!(env.resolve("/path/${SEQ}_data"), "/path/sq01_data");
    }

    #[test]
    fn unresolved_left_as_is() {
        let env = Environment::new();
        assert_eq!(env.resolve("$UNKNOWN"), "$UNKNOWN");
        assert_eq!(env.resolve("${UNKNOWN}"), "${UNKNOWN}");
    }

    #[test]
    fn reassignment_replaces() {
        let mut env = Environment::new();
        env.add("SHOT_LOOKS", "ACES2065-1");
        env.add("SHOT_LOOKS", "AMF Unapplied Look Transforms -- clip");
        assert_eq!(env.get("SHOT_LOOKS"), Some("AMF Unapplied Look Transforms -- clip"));
    }

    #[test]
    fn dollar_at_end() {
        let env = Environment::new();
        assert_eq!(env.resolve("test$"), "test$");
    }
}
