//! Theme tokens: CSS custom property overrides.

use std::collections::BTreeMap;
use std::fmt::Write;

/// Built-in token values. Names omit the leading `--`.
pub const DEFAULT_TOKENS: &[(&str, &str)] = &[
    ("c-bg", "#ffffff"),
    ("c-bg-dark", "#1b1b1f"),
    ("c-brand-1", "#3451b2"),
    ("c-brand-2", "#3a5ccc"),
    ("c-brand-3", "#5672cd"),
    ("c-divider", "#e2e2e3"),
    ("c-text-1", "#3c3c43"),
    ("c-text-dark-1", "#dfdfd6"),
    ("home-hero-name-background", "transparent"),
    ("home-hero-name-color", "var(--c-brand-1)"),
];

/// Declared theme token overrides.
///
/// Values are passed through to CSS as written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThemeTokens {
    declared: BTreeMap<String, String>,
}

impl ThemeTokens {
    /// Create from declared overrides.
    ///
    /// A leading `--` on a token name is stripped.
    #[must_use]
    pub fn new(declared: BTreeMap<String, String>) -> Self {
        let declared = declared
            .into_iter()
            .map(|(name, value)| match name.strip_prefix("--") {
                Some(stripped) => (stripped.to_owned(), value),
                None => (name, value),
            })
            .collect();
        Self { declared }
    }

    /// Tokens declared in configuration, without defaults.
    #[must_use]
    pub fn declared(&self) -> &BTreeMap<String, String> {
        &self.declared
    }

    /// Declared tokens merged over the defaults, per key.
    #[must_use]
    pub fn merged(&self) -> BTreeMap<String, String> {
        let mut tokens: BTreeMap<String, String> = DEFAULT_TOKENS
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        tokens.extend(
            self.declared
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        tokens
    }

    /// Merged tokens as a single `:root { ... }` block, keys sorted.
    #[must_use]
    pub fn css_block(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in self.merged() {
            let _ = writeln!(css, "  --{name}: {value};");
        }
        css.push_str("}\n");
        css
    }
}
