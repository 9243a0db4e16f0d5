//! Label selector grammar.
//!
//! A selector is a comma-separated list of requirements:
//!
//! ```text
//! env=prod,tier!=frontend,region in (us,eu),region notin (ap),flag,flag exists,!legacy
//! ```
//!
//! Parsing only checks structure. Key and value grammar is checked by the
//! label-selector validator so that every offending token is reported.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Structural failures while tokenizing a selector.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LabelSelectorError {
    /// The selector is empty.
    #[error("label selector is empty")]
    Empty,

    /// Parentheses do not balance.
    #[error("label selector has unbalanced parentheses")]
    UnbalancedParentheses,

    /// A requirement does not match any accepted form.
    #[error("malformed label requirement '{0}'")]
    Malformed(String),
}

/// One clause of a label selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operator", rename_all = "snake_case")]
pub enum LabelRequirement {
    /// `key=value` or `key==value`.
    Equal {
        /// Label key.
        key: String,
        /// Required value.
        value: String,
    },
    /// `key!=value`; also matches resources without the label.
    NotEqual {
        /// Label key.
        key: String,
        /// Excluded value.
        value: String,
    },
    /// `key in (a,b)`.
    In {
        /// Label key.
        key: String,
        /// Accepted values.
        values: Vec<String>,
    },
    /// `key notin (a,b)`; also matches resources without the label.
    NotIn {
        /// Label key.
        key: String,
        /// Excluded values.
        values: Vec<String>,
    },
    /// `key` or `key exists`.
    Exists {
        /// Label key.
        key: String,
    },
    /// `!key`.
    NotExists {
        /// Label key.
        key: String,
    },
}

impl LabelRequirement {
    /// The label key the requirement applies to.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Equal { key, .. }
            | Self::NotEqual { key, .. }
            | Self::In { key, .. }
            | Self::NotIn { key, .. }
            | Self::Exists { key }
            | Self::NotExists { key } => key,
        }
    }

    /// Values referenced by the requirement.
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Equal { value, .. } | Self::NotEqual { value, .. } => vec![value.as_str()],
            Self::In { values, .. } | Self::NotIn { values, .. } => {
                values.iter().map(String::as_str).collect()
            }
            Self::Exists { .. } | Self::NotExists { .. } => Vec::new(),
        }
    }

    /// Evaluates the requirement against a resource's labels.
    #[must_use]
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        match self {
            Self::Equal { key, value } => labels.get(key) == Some(value),
            Self::NotEqual { key, value } => labels.get(key) != Some(value),
            Self::In { key, values } => labels.get(key).is_some_and(|found| values.contains(found)),
            Self::NotIn { key, values } => {
                labels.get(key).is_none_or(|found| !values.contains(found))
            }
            Self::Exists { key } => labels.contains_key(key),
            Self::NotExists { key } => !labels.contains_key(key),
        }
    }
}

/// A parsed label selector together with its original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSelector {
    raw: String,
    requirements: Vec<LabelRequirement>,
}

impl LabelSelector {
    /// Tokenizes a selector string.
    ///
    /// # Errors
    ///
    /// Returns [`LabelSelectorError`] when the text is empty, has unbalanced
    /// parentheses, or contains a requirement in no accepted form.
    ///
    /// # Examples
    ///
    /// ```
    /// use plinth::message::domain::LabelSelector;
    ///
    /// let selector = LabelSelector::parse("env=prod,region in (us,eu)").expect("valid");
    /// assert_eq!(selector.requirements().len(), 2);
    /// assert_eq!(selector.as_str(), "env=prod,region in (us,eu)");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, LabelSelectorError> {
        if raw.trim().is_empty() {
            return Err(LabelSelectorError::Empty);
        }
        let requirements = split_requirements(raw)?
            .into_iter()
            .map(parse_requirement)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            raw: raw.to_owned(),
            requirements,
        })
    }

    /// The selector text as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed requirements in request order.
    #[must_use]
    pub fn requirements(&self) -> &[LabelRequirement] {
        &self.requirements
    }

    /// Returns `true` when every requirement matches.
    #[must_use]
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        self.requirements
            .iter()
            .all(|requirement| requirement.matches(labels))
    }
}

fn split_requirements(raw: &str) -> Result<Vec<&str>, LabelSelectorError> {
    let mut requirements = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0_usize;
    for (index, character) in raw.char_indices() {
        match character {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(LabelSelectorError::UnbalancedParentheses)?;
            }
            ',' if depth == 0 => {
                requirements.push(raw.get(start..index).unwrap_or_default());
                start = index + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(LabelSelectorError::UnbalancedParentheses);
    }
    requirements.push(raw.get(start..).unwrap_or_default());
    Ok(requirements)
}

fn parse_requirement(text: &str) -> Result<LabelRequirement, LabelSelectorError> {
    let requirement = text.trim();
    let malformed = || LabelSelectorError::Malformed(requirement.to_owned());
    if requirement.is_empty() {
        return Err(malformed());
    }

    if let Some(key) = requirement.strip_prefix('!') {
        let trimmed_key = key.trim();
        if !is_token(trimmed_key) {
            return Err(malformed());
        }
        return Ok(LabelRequirement::NotExists {
            key: trimmed_key.to_owned(),
        });
    }

    if let Some((key, value)) = requirement.split_once("!=") {
        let (parsed_key, parsed_value) = equality_operands(key, value).ok_or_else(malformed)?;
        return Ok(LabelRequirement::NotEqual {
            key: parsed_key,
            value: parsed_value,
        });
    }

    let equality = requirement
        .split_once("==")
        .or_else(|| requirement.split_once('='));
    if let Some((key, value)) = equality {
        let (parsed_key, parsed_value) = equality_operands(key, value).ok_or_else(malformed)?;
        return Ok(LabelRequirement::Equal {
            key: parsed_key,
            value: parsed_value,
        });
    }

    let Some((key, rest)) = requirement.split_once(char::is_whitespace) else {
        if !is_token(requirement) {
            return Err(malformed());
        }
        return Ok(LabelRequirement::Exists {
            key: requirement.to_owned(),
        });
    };

    let operation = rest.trim();
    if !is_token(key) {
        return Err(malformed());
    }
    if operation == "exists" {
        return Ok(LabelRequirement::Exists {
            key: key.to_owned(),
        });
    }
    if let Some(set) = operation.strip_prefix("notin") {
        let values = parse_value_set(set).ok_or_else(malformed)?;
        return Ok(LabelRequirement::NotIn {
            key: key.to_owned(),
            values,
        });
    }
    if let Some(set) = operation.strip_prefix("in") {
        let values = parse_value_set(set).ok_or_else(malformed)?;
        return Ok(LabelRequirement::In {
            key: key.to_owned(),
            values,
        });
    }
    Err(malformed())
}

fn equality_operands(key: &str, value: &str) -> Option<(String, String)> {
    let trimmed_key = key.trim();
    let trimmed_value = value.trim();
    let value_ok = trimmed_value.is_empty() || is_token(trimmed_value);
    (is_token(trimmed_key) && value_ok)
        .then(|| (trimmed_key.to_owned(), trimmed_value.to_owned()))
}

fn parse_value_set(set: &str) -> Option<Vec<String>> {
    let inner = set.trim().strip_prefix('(')?.strip_suffix(')')?;
    let values: Vec<String> = inner
        .split(',')
        .map(|value| value.trim().to_owned())
        .collect();
    values
        .iter()
        .all(|value| value.is_empty() || is_token(value))
        .then_some(values)
        .filter(|parsed| !parsed.iter().all(String::is_empty))
}

fn is_token(value: &str) -> bool {
    !value.is_empty()
        && !value.chars().any(|character| {
            character.is_whitespace() || matches!(character, '(' | ')' | ',' | '=' | '!')
        })
}
