use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Version of the `[thoughts]` configuration layout understood by this build
pub const THOUGHT_RULES_SCHEMA_VERSION: u32 = 1;

/// Name, accepted aliases and length bounds for one text field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Canonical name, used in error messages
    pub field: String,
    /// Other request keys accepted for this field, checked in order
    #[serde(default)]
    pub aliases: Vec<String>,
    pub min_len: usize,
    pub max_len: usize,
    /// Reject a value already stored on another thought (content only)
    #[serde(default)]
    pub unique: bool,
}

impl FieldRule {
    pub fn new(field: impl Into<String>, min_len: usize, max_len: usize) -> Self {
        Self {
            field: field.into(),
            aliases: Vec::new(),
            min_len,
            max_len,
            unique: false,
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Canonical name first, then aliases
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.field.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// Field rules for thoughts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThoughtRules {
    pub schema_version: u32,
    pub content: FieldRule,
    /// `None` disables the secondary text field entirely
    pub secondary_text: Option<FieldRule>,
}

impl Default for ThoughtRules {
    fn default() -> Self {
        Self {
            schema_version: THOUGHT_RULES_SCHEMA_VERSION,
            content: FieldRule::new("content", 5, 140).with_aliases(["message", "name"]),
            secondary_text: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("unsupported thought rules schema version {found} (expected {expected})")]
    SchemaVersion { found: u32, expected: u32 },

    #[error("field name must not be empty")]
    EmptyFieldName,

    #[error("{field}: min_len {min} is greater than max_len {max}")]
    InvertedBounds { field: String, min: usize, max: usize },

    #[error("{field}: only the content field can be unique")]
    UniqueSecondary { field: String },
}

impl ThoughtRules {
    pub fn new(content: FieldRule) -> Self {
        Self {
            content,
            ..Self::default()
        }
    }

    pub fn with_secondary_text(mut self, rule: FieldRule) -> Self {
        self.secondary_text = Some(rule);
        self
    }

    pub fn content_unique(&self) -> bool {
        self.content.unique
    }

    /// Reject configurations that could never accept a value
    pub fn check(&self) -> Result<(), RulesError> {
        if self.schema_version != THOUGHT_RULES_SCHEMA_VERSION {
            return Err(RulesError::SchemaVersion {
                found: self.schema_version,
                expected: THOUGHT_RULES_SCHEMA_VERSION,
            });
        }

        for rule in std::iter::once(&self.content).chain(self.secondary_text.iter()) {
            if rule.field.trim().is_empty() {
                return Err(RulesError::EmptyFieldName);
            }
            if rule.min_len > rule.max_len {
                return Err(RulesError::InvertedBounds {
                    field: rule.field.clone(),
                    min: rule.min_len,
                    max: rule.max_len,
                });
            }
        }

        if let Some(rule) = self.secondary_text.as_ref().filter(|rule| rule.unique) {
            return Err(RulesError::UniqueSecondary {
                field: rule.field.clone(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_pass_check() {
        let rules = ThoughtRules::default();
        assert!(rules.check().is_ok());
        assert_eq!(rules.content.field, "content");
        assert!(rules.secondary_text.is_none());
    }

    #[test]
    fn test_names_lists_canonical_first() {
        let rule = FieldRule::new("secondaryText", 2, 35).with_aliases(["description"]);
        let names: Vec<&str> = rule.names().collect();
        assert_eq!(names, vec!["secondaryText", "description"]);
    }

    #[test]
    fn test_check_rejects_inverted_bounds() {
        let rules = ThoughtRules::new(FieldRule::new("content", 10, 2));
        assert_eq!(
            rules.check(),
            Err(RulesError::InvertedBounds {
                field: "content".to_string(),
                min: 10,
                max: 2,
            })
        );
    }

    #[test]
    fn test_check_rejects_unknown_schema_version() {
        let mut rules = ThoughtRules::default();
        rules.schema_version = 7;
        assert!(matches!(rules.check(), Err(RulesError::SchemaVersion { found: 7, .. })));
    }

    #[test]
    fn test_check_rejects_unique_secondary_text() {
        let rules = ThoughtRules::default()
            .with_secondary_text(FieldRule::new("description", 2, 35).with_unique(true));
        assert_eq!(
            rules.check(),
            Err(RulesError::UniqueSecondary {
                field: "description".to_string(),
            })
        );
    }

    #[test]
    fn test_partial_rules_fill_defaults() {
        let rules: ThoughtRules = serde_json::from_value(serde_json::json!({
            "content": { "field": "name", "min_len": 2, "max_len": 15, "unique": true }
        }))
        .unwrap();

        assert_eq!(rules.schema_version, THOUGHT_RULES_SCHEMA_VERSION);
        assert_eq!(rules.content.field, "name");
        assert!(rules.content_unique());
        assert!(rules.content.aliases.is_empty());
    }
}
