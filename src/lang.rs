use std::collections::HashMap;

use crate::error::ClientError;

/// Key-based string lookup with positional arguments.
pub trait Translate {
    fn translate(&self, key: &str, args: &[String]) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str, &[String]) -> String,
{
    fn translate(&self, key: &str, args: &[String]) -> String {
        self(key, args)
    }
}

/// Flat key → template table. Templates refer to arguments as `\0`, `\1`, ...
#[derive(Debug, Default, Clone)]
pub struct LangTable {
    entries: HashMap<String, String>,
}

impl LangTable {
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        let entries = serde_json::from_str(s)?;
        Ok(Self { entries })
    }

    pub fn from_file(path: &str) -> Result<Self, ClientError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::from_json_str(&contents)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translate for LangTable {
    fn translate(&self, key: &str, args: &[String]) -> String {
        let Some(template) = self.entries.get(key) else {
            tracing::warn!("missing lang key: {key}");
            return key.to_string();
        };
        substitute(template, args)
    }
}

/// Replaces each `\N` in one left-to-right pass. `N` is the whole digit run,
/// so `\10` is argument ten. Argument text is never rescanned, and
/// placeholders past the end of `args` stay as written.
fn substitute(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(at) = rest.find('\\') {
        out.push_str(&rest[..at]);
        let after = &rest[at + 1..];
        let digits = after.len() - after.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        match after[..digits].parse::<usize>().ok().and_then(|i| args.get(i)) {
            Some(arg) => out.push_str(arg),
            None => out.push_str(&rest[at..at + 1 + digits]),
        }
        rest = &after[digits..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_substitutes_positional_arguments() {
        let table = LangTable::from_json_str(r#"{"greet": "\\1 says hi to \\0"}"#).unwrap();
        assert_eq!(
            table.translate("greet", &["Bob".into(), "Alice".into()]),
            "Alice says hi to Bob"
        );
    }

    #[test]
    fn test_argument_text_is_not_substituted_again() {
        let table = LangTable::from_json_str(r#"{"whisper": "\\0 to \\1"}"#).unwrap();
        assert_eq!(
            table.translate("whisper", &["sent \\1".into(), "Bob".into()]),
            "sent \\1 to Bob"
        );
    }

    #[test]
    fn test_multi_digit_placeholders() {
        let args: Vec<String> = (0..11).map(|i| format!("a{i}")).collect();
        let table = LangTable::from_json_str(r#"{"many": "\\1,\\10,\\12,\\x"}"#).unwrap();
        assert_eq!(table.translate("many", &args), "a1,a10,\\12,\\x");
    }

    #[test]
    fn test_missing_key_returns_key() {
        let table = LangTable::default();
        assert_eq!(table.translate("phase.Night", &[]), "phase.Night");
    }

    #[test]
    fn test_loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"phase.Night": "Night", "phase.Morning": "Morning"}}"#).unwrap();
        let table = LangTable::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.translate("phase.Night", &[]), "Night");
    }

    #[test]
    fn test_rejects_non_string_values() {
        assert!(LangTable::from_json_str(r#"{"a": 1}"#).is_err());
    }

    #[test]
    fn test_closure_translator() {
        let upper = |key: &str, _: &[String]| key.to_uppercase();
        assert_eq!(upper.translate("abc", &[]), "ABC");
    }
}
