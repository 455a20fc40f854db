//! Compiled keyword matchers built from a layout profile.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

use crate::error::ProfileError;
use crate::models::config::LayoutProfile;

lazy_static! {
    static ref DEFAULT_FILTER: NameFilter =
        NameFilter::compile(&LayoutProfile::argentine_dni()).unwrap();
}

/// Case-insensitive "contains any of" matcher. An empty list matches nothing.
#[derive(Debug, Clone, Default)]
pub struct KeywordMatcher {
    regex: Option<Regex>,
}

impl KeywordMatcher {
    /// Build from literal keywords and raw regex fragments.
    pub fn new(
        list: &'static str,
        keywords: &[String],
        patterns: &[String],
    ) -> Result<Self, ProfileError> {
        let mut alternatives = Vec::with_capacity(keywords.len() + patterns.len());

        for keyword in keywords {
            let keyword = keyword.trim();
            if keyword.is_empty() {
                return Err(ProfileError::BlankKeyword { list });
            }
            alternatives.push(regex::escape(keyword));
        }

        for pattern in patterns {
            if pattern.trim().is_empty() {
                return Err(ProfileError::BlankKeyword { list });
            }
            // Validate each fragment on its own so the error names it.
            Regex::new(pattern).map_err(|source| ProfileError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            alternatives.push(format!("(?:{})", pattern));
        }

        if alternatives.is_empty() {
            return Ok(Self::default());
        }

        let joined = alternatives.join("|");
        let regex = RegexBuilder::new(&joined)
            .case_insensitive(true)
            .build()
            .map_err(|source| ProfileError::InvalidPattern {
                pattern: joined.clone(),
                source,
            })?;

        Ok(Self { regex: Some(regex) })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|r| r.is_match(text))
    }
}

/// Decides whether a name-like value is really a label or boilerplate.
#[derive(Debug, Clone)]
pub struct NameFilter {
    labels: KeywordMatcher,
    boilerplate: Vec<String>,
    candidates: KeywordMatcher,
}

impl NameFilter {
    pub fn compile(profile: &LayoutProfile) -> Result<Self, ProfileError> {
        let labels = KeywordMatcher::new("label_keywords", &profile.label_keywords, &[])?;

        if profile.boilerplate_keywords.iter().any(|w| w.trim().is_empty()) {
            return Err(ProfileError::BlankKeyword {
                list: "boilerplate_keywords",
            });
        }

        // Keyword lists are already checked, so only patterns can fail here.
        let mut excluded = profile.boilerplate_keywords.clone();
        excluded.extend(profile.label_keywords.iter().cloned());
        let candidates =
            KeywordMatcher::new("label_patterns", &excluded, &profile.label_patterns)?;

        let boilerplate = profile
            .boilerplate_keywords
            .iter()
            .map(|w| w.trim().to_lowercase())
            .collect();

        Ok(Self {
            labels,
            boilerplate,
            candidates,
        })
    }

    /// A value read next to (or after) a label is rejected when it contains a
    /// field label or is exactly an issuer boilerplate word.
    pub fn rejects_value(&self, value: &str) -> bool {
        if self.labels.is_match(value) {
            return true;
        }
        let lowered = value.trim().to_lowercase();
        self.boilerplate.iter().any(|w| *w == lowered)
    }

    /// A positional candidate is rejected when it contains any boilerplate,
    /// label word or label pattern.
    pub fn rejects_candidate(&self, line: &str) -> bool {
        self.candidates.is_match(line)
    }
}

impl Default for NameFilter {
    fn default() -> Self {
        DEFAULT_FILTER.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_rejects_labels() {
        let filter = NameFilter::default();

        assert!(filter.rejects_value("NACIONALIDAD"));
        assert!(filter.rejects_value("Documento"));
        assert!(filter.rejects_value("Nombre / Name"));
        assert!(filter.rejects_value("ARGENTINA"));
        assert!(!filter.rejects_value("GONZALEZ"));
        // Boilerplate only counts as an exact value match.
        assert!(!filter.rejects_value("INTERIORANO"));
    }

    #[test]
    fn test_default_filter_candidates() {
        let filter = NameFilter::default();

        assert!(filter.rejects_candidate("REPUBLICA ARGENTINA"));
        assert!(filter.rejects_candidate("MERCOSUR"));
        assert!(filter.rejects_candidate("APEIIDO"));
        assert!(!filter.rejects_candidate("GONZALEZ"));
    }

    #[test]
    fn test_empty_lists_match_nothing() {
        let profile = LayoutProfile {
            name: "empty".to_string(),
            label_keywords: vec![],
            boilerplate_keywords: vec![],
            label_patterns: vec![],
        };
        let filter = NameFilter::compile(&profile).unwrap();

        assert!(!filter.rejects_value("NOMBRE"));
        assert!(!filter.rejects_candidate("REPUBLICA"));
    }

    #[test]
    fn test_keywords_are_literal() {
        let matcher = KeywordMatcher::new("label_keywords", &["a.b".to_string()], &[]).unwrap();
        assert!(matcher.is_match("xA.By"));
        assert!(!matcher.is_match("axb"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = KeywordMatcher::new("label_patterns", &[], &["ap[eoli".to_string()]).unwrap_err();
        assert!(matches!(err, ProfileError::InvalidPattern { ref pattern, .. } if pattern == "ap[eoli"));
    }

    #[test]
    fn test_blank_keyword_is_reported() {
        let err = KeywordMatcher::new("label_keywords", &["  ".to_string()], &[]).unwrap_err();
        assert!(matches!(err, ProfileError::BlankKeyword { list: "label_keywords" }));
    }
}
