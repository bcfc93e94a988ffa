use crate::blog::{NewComment, COMMENT_NAME_MAX_CHARS};
use serde::Deserialize;
use std::collections::BTreeMap;

const REQUIRED: &str = "This field is required.";

/// Raw comment fields as submitted. Missing fields stay `None` so they can be
/// reported as field errors instead of rejecting the whole request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Field name to error messages for that field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn for_field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }
}

impl CommentForm {
    /// Both fields are trimmed before checking. `body` must be non-empty and
    /// `name` must be non-empty and at most [`COMMENT_NAME_MAX_CHARS`] characters.
    pub fn validate(&self) -> Result<NewComment, FormErrors> {
        let name = self.name.as_deref().unwrap_or_default().trim();
        let body = self.body.as_deref().unwrap_or_default().trim();
        let mut errors = FormErrors::default();

        if name.is_empty() {
            errors.add("name", REQUIRED);
        } else {
            let name_len = name.chars().count();
            if name_len > COMMENT_NAME_MAX_CHARS {
                errors.add(
                    "name",
                    format!(
                        "Ensure this value has at most {COMMENT_NAME_MAX_CHARS} characters (it has {name_len})."
                    ),
                );
            }
        }

        if body.is_empty() {
            errors.add("body", REQUIRED);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewComment {
            name: name.to_string(),
            body: body.to_string(),
        })
    }

    pub fn name_value(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn body_value(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}
