//! Message catalog for user-facing strings.

use std::fmt::Display;

use anyhow::Result;
use config::{Config, File, FileFormat};

const TRANSLATIONS: &str = include_str!("../../assets/translations.yml");

/// Looks up user-facing messages by dotted key, e.g. `mode.navigation.sheet`.
#[derive(Debug, Clone)]
pub struct Catalog {
    messages: Config,
}

impl Catalog {
    /// Load the built-in catalog.
    pub fn load() -> Result<Self> {
        Self::from_yaml(TRANSLATIONS)
    }

    /// Load a catalog from a YAML document.
    pub fn from_yaml(document: &str) -> Result<Self> {
        let messages = Config::builder()
            .add_source(File::from_str(document, FileFormat::Yaml))
            .build()?;
        Ok(Self { messages })
    }

    /// Format the message for `key`, filling each `{}` with the next argument.
    ///
    /// A missing key renders as the key itself.
    pub fn t(&self, key: &str, args: &[&dyn Display]) -> String {
        let template = self.messages.get_string(key).unwrap_or_else(|_| key.to_string());

        let mut out = String::with_capacity(template.len());
        let mut args = args.iter();
        let mut rest = template.as_str();
        while let Some(pos) = rest.find("{}") {
            out.push_str(&rest[..pos]);
            match args.next() {
                Some(arg) => out.push_str(&arg.to_string()),
                None => out.push_str("{}"),
            }
            rest = &rest[pos + 2..];
        }
        out.push_str(rest);
        out
    }
}
