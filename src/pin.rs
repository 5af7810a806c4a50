use crate::error::InvalidPin;
use std::path::Path;

/// First token of every pattern; stands for the wrapper's own argv[0].
pub const SENTINEL: &str = "gcloud";

/// One `PATTERN: REPLACEMENT` rule from the pins file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pin {
    /// Sub-command tokens, starting with [`SENTINEL`].
    pattern: Vec<String>,
    /// Resolved launcher path followed by any inserted arguments (release track etc).
    replacement: Vec<String>,
}

impl Pin {
    /// Both token lists must be non-empty and the pattern must open with [`SENTINEL`].
    pub fn new(pattern: Vec<String>, replacement: Vec<String>) -> Result<Self, InvalidPin> {
        match pattern.first() {
            None => return Err(InvalidPin::EmptyPattern),
            Some(first) if first != SENTINEL => {
                return Err(InvalidPin::BadSentinel {
                    expected: SENTINEL,
                    found: first.clone(),
                })
            }
            Some(_) => {}
        }
        if replacement.is_empty() {
            return Err(InvalidPin::EmptyReplacement);
        }
        Ok(Self {
            pattern,
            replacement,
        })
    }

    pub fn pattern(&self) -> &[String] {
        &self.pattern
    }

    pub fn replacement(&self) -> &[String] {
        &self.replacement
    }

    /// Pattern tokens after the sentinel.
    pub fn subcommand(&self) -> &[String] {
        self.pattern.get(1..).unwrap_or_default()
    }

    pub fn executable(&self) -> &Path {
        Path::new(self.replacement[0].as_str())
    }

    pub fn inserted_args(&self) -> &[String] {
        &self.replacement[1..]
    }
}

/// Pins in file order. Earlier pins win exact matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinList {
    pins: Vec<Pin>,
}

impl PinList {
    pub fn new(pins: Vec<Pin>) -> Self {
        Self { pins }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pin> {
        self.pins.iter()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

impl<'a> IntoIterator for &'a PinList {
    type Item = &'a Pin;
    type IntoIter = std::slice::Iter<'a, Pin>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    fn pin(pattern: &str, replacement: &str) -> Pin {
        Pin::new(tokens(pattern), tokens(replacement)).unwrap()
    }

    #[test]
    fn test_pin_accessors() {
        let p = pin("gcloud app deploy", "/sdk/102.0.0/bin/gcloud preview");
        assert_eq!(p.subcommand(), ["app", "deploy"]);
        assert_eq!(p.executable(), Path::new("/sdk/102.0.0/bin/gcloud"));
        assert_eq!(p.inserted_args(), ["preview"]);
    }

    #[test]
    fn test_sentinel_only_pattern_has_empty_subcommand() {
        let p = pin("gcloud", "/sdk/bin/gcloud");
        assert!(p.subcommand().is_empty());
        assert!(p.inserted_args().is_empty());
    }

    #[test]
    fn test_new_rejects_broken_pins() {
        assert_eq!(
            Pin::new(vec![], tokens("/sdk/bin/gcloud")),
            Err(InvalidPin::EmptyPattern)
        );
        assert_eq!(
            Pin::new(tokens("gcloud app"), vec![]),
            Err(InvalidPin::EmptyReplacement)
        );
        assert_eq!(
            Pin::new(tokens("kubectl get"), tokens("/sdk/bin/gcloud")),
            Err(InvalidPin::BadSentinel {
                expected: SENTINEL,
                found: "kubectl".into()
            })
        );
    }
}
