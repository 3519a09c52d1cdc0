//! Content entities as exported by the CMS pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Locale of a content item or UI surface.
///
/// Only current locales appear on content; the legacy codes (`ru`, `ua`)
/// exist solely in old URLs and are collapsed by the redirect rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Uk,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Uk => "uk",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "uk" => Ok(Language::Uk),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognized language codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl std::fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown language code: {}", self.0)
    }
}

impl std::error::Error for UnknownLanguage {}

/// Reference to a taxonomy term (category or tag).
///
/// `id` is the stable identity used for relevance comparison; `slug` is the
/// URL-facing name used by the listing entry points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRef {
    pub id: u64,
    pub slug: String,
}

/// One published post from the content snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub language: Language,
    /// Ordered: the first entry is the primary category.
    #[serde(default)]
    pub categories: Vec<TermRef>,
    /// Set semantics by id.
    #[serde(default)]
    pub tags: Vec<TermRef>,
}

impl ContentItem {
    /// The strongest relevance signal: the first category, if any.
    pub fn primary_category(&self) -> Option<&TermRef> {
        self.categories.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_round_trip() {
        assert_eq!("uk".parse::<Language>(), Ok(Language::Uk));
        assert_eq!("en".parse::<Language>(), Ok(Language::En));
        assert!("ru".parse::<Language>().is_err());
        assert_eq!(Language::Uk.as_str(), "uk");
    }

    #[test]
    fn test_item_deserializes_without_terms() {
        let json = r#"{
            "id": 7,
            "slug": "som-afrykanskyi",
            "title": "Сом африканський",
            "date": "2024-03-01T09:00:00Z",
            "language": "uk"
        }"#;
        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert!(item.categories.is_empty());
        assert!(item.tags.is_empty());
        assert!(item.primary_category().is_none());
    }
}
