use serde_json::{Map, Value};
use thiserror::Error;

use crate::rules::{FieldRule, ThoughtRules};
use crate::thought::{RawThought, ThoughtDraft};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be a string")]
    NotText { field: String },

    #[error("{field} must be at least {min} characters long (got {actual})")]
    TooShort {
        field: String,
        min: usize,
        actual: usize,
    },

    #[error("{field} must be at most {max} characters long (got {actual})")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },
}

impl ValidationError {
    /// Name of the offending field, if the error concerns one
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::NotAnObject => None,
            ValidationError::Required { field }
            | ValidationError::NotText { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. } => Some(field),
        }
    }
}

impl ThoughtRules {
    /// Pull the configured fields (or their aliases) out of a JSON body.
    ///
    /// Keys not named by a rule are ignored, as is the secondary text when
    /// the field is disabled.
    pub fn extract(&self, body: &Value) -> Result<RawThought, ValidationError> {
        let object = body.as_object().ok_or(ValidationError::NotAnObject)?;

        let content = lookup(object, &self.content)?;
        let secondary_text = match &self.secondary_text {
            Some(rule) => lookup(object, rule)?,
            None => None,
        };

        Ok(RawThought {
            content,
            secondary_text,
        })
    }

    /// Trim and bound-check raw values into a draft ready for the store
    pub fn validate(&self, raw: RawThought) -> Result<ThoughtDraft, ValidationError> {
        let content = raw
            .content
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ValidationError::Required {
                field: self.content.field.clone(),
            })?;
        check_length(&self.content, content)?;

        let secondary_text = match (&self.secondary_text, raw.secondary_text.as_deref()) {
            (Some(rule), Some(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    None
                } else {
                    check_length(rule, text)?;
                    Some(text.to_string())
                }
            }
            _ => None,
        };

        Ok(ThoughtDraft::new(content.to_string(), secondary_text))
    }

    /// `extract` followed by `validate`
    pub fn draft_from_json(&self, body: &Value) -> Result<ThoughtDraft, ValidationError> {
        let raw = self.extract(body)?;
        self.validate(raw)
    }
}

fn lookup(object: &Map<String, Value>, rule: &FieldRule) -> Result<Option<String>, ValidationError> {
    for name in rule.names() {
        match object.get(name) {
            None | Some(Value::Null) => continue,
            Some(Value::String(text)) => return Ok(Some(text.clone())),
            Some(_) => {
                return Err(ValidationError::NotText {
                    field: rule.field.clone(),
                })
            }
        }
    }
    Ok(None)
}

fn check_length(rule: &FieldRule, value: &str) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual < rule.min_len {
        return Err(ValidationError::TooShort {
            field: rule.field.clone(),
            min: rule.min_len,
            actual,
        });
    }
    if actual > rule.max_len {
        return Err(ValidationError::TooLong {
            field: rule.field.clone(),
            max: rule.max_len,
            actual,
        });
    }
    Ok(())
}
