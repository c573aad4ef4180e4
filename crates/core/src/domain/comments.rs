use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored comment, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub comment: String,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied fields for create and update.
///
/// Every field is optional so that absence is reported as a validation
/// failure naming the field rather than as a body parsing error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub comment: Option<String>,
    pub post_id: Option<i64>,
}

/// What the service hands to storage. `id == None` means insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveComment {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub comment: String,
    pub post_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentField {
    Name,
    Email,
    Comment,
    PostId,
}

impl CommentField {
    pub fn as_str(self) -> &'static str {
        match self {
            CommentField::Name => "name",
            CommentField::Email => "email",
            CommentField::Comment => "comment",
            CommentField::PostId => "postId",
        }
    }
}

impl fmt::Display for CommentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three mutable text fields after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentText {
    pub name: String,
    pub email: String,
    pub comment: String,
}

impl CommentInput {
    /// Checks `name`, `email` and `comment` in that order and returns the
    /// first one that is missing or blank.
    pub fn require_text(&self) -> Result<CommentText, CommentField> {
        let name = require_non_blank(self.name.as_deref(), CommentField::Name)?;
        let email = require_non_blank(self.email.as_deref(), CommentField::Email)?;
        let comment = require_non_blank(self.comment.as_deref(), CommentField::Comment)?;
        Ok(CommentText {
            name,
            email,
            comment,
        })
    }

    pub fn require_post_id(&self) -> Result<i64, CommentField> {
        self.post_id.ok_or(CommentField::PostId)
    }
}

fn require_non_blank(value: Option<&str>, field: CommentField) -> Result<String, CommentField> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
        _ => Err(field),
    }
}

#[cfg(test)]
mod tests {
    use super::{CommentField, CommentInput};

    fn input(name: Option<&str>, email: Option<&str>, comment: Option<&str>) -> CommentInput {
        CommentInput {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
            comment: comment.map(str::to_string),
            post_id: Some(100),
        }
    }

    #[test]
    fn require_text_reports_first_missing_field() {
        let err = input(None, None, None).require_text().unwrap_err();
        assert_eq!(err, CommentField::Name);
        let err = input(Some("John"), Some("   "), None).require_text().unwrap_err();
        assert_eq!(err, CommentField::Email);
        let err = input(Some("John"), Some("john@example.com"), Some("\t\n"))
            .require_text()
            .unwrap_err();
        assert_eq!(err, CommentField::Comment);
    }

    #[test]
    fn require_text_keeps_values_untrimmed() {
        let text = input(Some(" John "), Some("john@example.com"), Some("Hello!"))
            .require_text()
            .unwrap();
        assert_eq!(text.name, " John ");
        assert_eq!(text.comment, "Hello!");
    }

    #[test]
    fn require_post_id_rejects_absent() {
        let mut value = input(Some("a"), Some("b"), Some("c"));
        value.post_id = None;
        assert_eq!(value.require_post_id(), Err(CommentField::PostId));
    }

    #[test]
    fn field_names_match_wire_keys() {
        assert_eq!(CommentField::PostId.to_string(), "postId");
        assert_eq!(CommentField::Comment.as_str(), "comment");
    }
}
