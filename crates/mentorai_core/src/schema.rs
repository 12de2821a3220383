//! crates/mentorai_core/src/schema.rs
//!
//! The schema registry: declares field names, types, optionality, defaults,
//! and range constraints for every record kind the API accepts, and validates
//! raw JSON payloads against those declarations.
//!
//! Validation is pure: it either yields a normalized document (defaults
//! applied, unknown fields dropped) or a `ValidationError` that enumerates
//! every offending field. There is no cross-field or cross-record validation.

use std::fmt;

use chrono::DateTime;
use serde::Serialize;
use serde_json::{Map, Value};

//=========================================================================================
// Record Kinds
//=========================================================================================

/// Every kind of record the backend knows how to validate and store.
///
/// Each kind maps to exactly one store collection through [`RecordKind::collection`];
/// the mapping is explicit so a typo in a collection name cannot compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Task,
    Note,
    UserProfile,
    StudySession,
    Goal,
    CreativeDraft,
    Motivation,
}

impl RecordKind {
    /// The name of the store collection backing this record kind.
    pub fn collection(self) -> &'static str {
        match self {
            RecordKind::Task => "task",
            RecordKind::Note => "note",
            RecordKind::UserProfile => "userprofile",
            RecordKind::StudySession => "studysession",
            RecordKind::Goal => "goal",
            RecordKind::CreativeDraft => "creativedraft",
            RecordKind::Motivation => "motivation",
        }
    }

    /// The declared fields of this record kind, in schema order.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            RecordKind::Task => TASK_FIELDS,
            RecordKind::Note => NOTE_FIELDS,
            RecordKind::UserProfile => USER_PROFILE_FIELDS,
            RecordKind::StudySession => STUDY_SESSION_FIELDS,
            RecordKind::Goal => GOAL_FIELDS,
            RecordKind::CreativeDraft => CREATIVE_DRAFT_FIELDS,
            RecordKind::Motivation => MOTIVATION_FIELDS,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

//=========================================================================================
// Field Declarations
//=========================================================================================

/// The accepted JSON shape of a single field.
#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    /// A JSON string.
    Text,
    /// A JSON integer within an inclusive range.
    Integer { min: i64, max: i64 },
    /// A JSON boolean.
    Boolean,
    /// An RFC 3339 timestamp, submitted as text and stored as submitted.
    Timestamp,
    /// A JSON array of strings.
    TextList,
}

/// The value substituted for a field the client omitted (or sent as `null`).
#[derive(Debug, Clone, Copy)]
pub enum FieldDefault {
    Null,
    Text(&'static str),
    Int(i64),
    Bool(bool),
    EmptyList,
}

impl FieldDefault {
    fn to_value(self) -> Value {
        match self {
            FieldDefault::Null => Value::Null,
            FieldDefault::Text(s) => Value::String(s.to_string()),
            FieldDefault::Int(n) => Value::Number(n.into()),
            FieldDefault::Bool(b) => Value::Bool(b),
            FieldDefault::EmptyList => Value::Array(Vec::new()),
        }
    }
}

/// One declared field of a record kind. A field with no default is required.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    pub default: Option<FieldDefault>,
}

impl FieldSpec {
    const fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            default: None,
        }
    }

    const fn optional(name: &'static str, ty: FieldType, default: FieldDefault) -> Self {
        Self {
            name,
            ty,
            default: Some(default),
        }
    }
}

const TASK_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", FieldType::Text),
    FieldSpec::optional("description", FieldType::Text, FieldDefault::Null),
    FieldSpec::optional("due_date", FieldType::Timestamp, FieldDefault::Null),
    FieldSpec::optional("priority", FieldType::Text, FieldDefault::Text("medium")),
    FieldSpec::optional("status", FieldType::Text, FieldDefault::Text("todo")),
    FieldSpec::optional("tags", FieldType::TextList, FieldDefault::EmptyList),
];

const NOTE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", FieldType::Text),
    FieldSpec::required("content", FieldType::Text),
    FieldSpec::optional("source", FieldType::Text, FieldDefault::Null),
];

const USER_PROFILE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", FieldType::Text),
    FieldSpec::required("email", FieldType::Text),
    FieldSpec::optional("avatar_url", FieldType::Text, FieldDefault::Null),
    FieldSpec::optional("timezone", FieldType::Text, FieldDefault::Null),
    FieldSpec::optional("focus_style", FieldType::Text, FieldDefault::Null),
];

const STUDY_SESSION_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("mode", FieldType::Text, FieldDefault::Text("pomodoro")),
    FieldSpec::optional(
        "duration_min",
        FieldType::Integer { min: 1, max: 240 },
        FieldDefault::Int(25),
    ),
    FieldSpec::optional("topic", FieldType::Text, FieldDefault::Null),
    FieldSpec::optional("completed", FieldType::Boolean, FieldDefault::Bool(false)),
];

const GOAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", FieldType::Text),
    FieldSpec::optional("description", FieldType::Text, FieldDefault::Null),
    FieldSpec::optional("target_date", FieldType::Timestamp, FieldDefault::Null),
    FieldSpec::optional(
        "progress",
        FieldType::Integer { min: 0, max: 100 },
        FieldDefault::Int(0),
    ),
];

const CREATIVE_DRAFT_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("kind", FieldType::Text, FieldDefault::Text("text")),
    FieldSpec::optional("title", FieldType::Text, FieldDefault::Null),
    FieldSpec::optional("body", FieldType::Text, FieldDefault::Text("")),
    FieldSpec::optional("tags", FieldType::TextList, FieldDefault::EmptyList),
];

const MOTIVATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("text", FieldType::Text),
    FieldSpec::optional("author", FieldType::Text, FieldDefault::Null),
];

//=========================================================================================
// Validation Errors
//=========================================================================================

/// One problem with one field of a submitted payload.
#[derive(Debug, Clone, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

/// A rejected payload, carrying one [`FieldIssue`] per offending field.
#[derive(Debug)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed: ")?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", issue.field, issue.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

//=========================================================================================
// Validation
//=========================================================================================

/// Validates a raw JSON payload against the schema of `kind`.
///
/// On success returns the normalized document: declared fields only, in
/// schema order, with defaults substituted for omitted (or `null`) optional
/// fields. On failure returns a [`ValidationError`] listing every offending
/// field, so clients can fix a payload in one round trip.
pub fn validate(kind: RecordKind, input: &Value) -> Result<Map<String, Value>, ValidationError> {
    let Some(object) = input.as_object() else {
        return Err(ValidationError {
            issues: vec![FieldIssue {
                field: "body".to_string(),
                message: "expected a JSON object".to_string(),
            }],
        });
    };

    let mut normalized = Map::new();
    let mut issues = Vec::new();

    for spec in kind.fields() {
        match (object.get(spec.name), spec.default) {
            // Omitted or null: substitute the default, or flag a required field.
            (None, Some(default)) | (Some(Value::Null), Some(default)) => {
                normalized.insert(spec.name.to_string(), default.to_value());
            }
            (None, None) | (Some(Value::Null), None) => {
                issues.push(FieldIssue {
                    field: spec.name.to_string(),
                    message: "missing required field".to_string(),
                });
            }
            (Some(value), _) => match check_type(spec.ty, value) {
                Ok(()) => {
                    normalized.insert(spec.name.to_string(), value.clone());
                }
                Err(message) => {
                    issues.push(FieldIssue {
                        field: spec.name.to_string(),
                        message,
                    });
                }
            },
        }
    }

    if issues.is_empty() {
        Ok(normalized)
    } else {
        Err(ValidationError { issues })
    }
}

fn check_type(ty: FieldType, value: &Value) -> Result<(), String> {
    match ty {
        FieldType::Text => {
            if value.is_string() {
                Ok(())
            } else {
                Err("expected text".to_string())
            }
        }
        FieldType::Integer { min, max } => match value.as_i64() {
            Some(n) if n < min || n > max => Err(format!("must be between {min} and {max}")),
            Some(_) => Ok(()),
            None => Err("expected an integer".to_string()),
        },
        FieldType::Boolean => {
            if value.is_boolean() {
                Ok(())
            } else {
                Err("expected a boolean".to_string())
            }
        }
        FieldType::Timestamp => match value.as_str() {
            Some(s) => DateTime::parse_from_rfc3339(s)
                .map(|_| ())
                .map_err(|_| "expected an RFC 3339 timestamp".to_string()),
            None => Err("expected an RFC 3339 timestamp".to_string()),
        },
        FieldType::TextList => match value.as_array() {
            Some(items) if items.iter().all(Value::is_string) => Ok(()),
            _ => Err("expected a list of text values".to_string()),
        },
    }
}
