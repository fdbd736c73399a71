//! Validation boundary between raw JSON documents and the scoring engine.
//!
//! Missing lists become `[]` and missing contact strings become `""`, so the
//! engine never sees an absent field.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::models::resume::{EducationEntry, ExperienceEntry, ProjectEntry, Resume};

type Object = Map<String, Value>;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("resume document must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("invalid resume document: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Strictly parses a resume document, applying field defaults.
pub fn parse_resume(value: Value) -> Result<Resume, SchemaError> {
    decode(&value)
}

/// Parses a stored document that may no longer validate.
///
/// Invalid documents are salvaged field by field: a field of the wrong type
/// takes its default and a malformed entry still counts as an entry, so the
/// score reflects what the document actually contains. The flag reports
/// whether salvaging was needed.
pub fn parse_resume_lenient(value: Value) -> (Resume, bool) {
    match decode(&value) {
        Ok(resume) => (resume, false),
        Err(e) => {
            warn!("Stored resume failed validation, salvaging fields: {e}");
            (salvage(&value), true)
        }
    }
}

fn decode(value: &Value) -> Result<Resume, SchemaError> {
    if !value.is_object() {
        return Err(SchemaError::NotAnObject(json_kind(value)));
    }
    Ok(Resume::deserialize(value)?)
}

fn salvage(value: &Value) -> Resume {
    let Some(doc) = value.as_object() else {
        return Resume::default();
    };

    Resume {
        id: optional_text(doc, "id"),
        name: text(doc, "name"),
        email: text(doc, "email"),
        phone: text(doc, "phone"),
        linkedin: text(doc, "linkedin"),
        github: text(doc, "github"),
        summary: text(doc, "summary"),
        experience: entries(doc, "experience", |e| ExperienceEntry {
            id: text(e, "id"),
            company: text(e, "company"),
            role: text(e, "role"),
            location: optional_text(e, "location"),
            start_date: optional_text(e, "startDate"),
            end_date: optional_text(e, "endDate"),
            bullets: strings(e.get("bullets")),
        }),
        projects: entries(doc, "projects", |e| ProjectEntry {
            id: text(e, "id"),
            name: text(e, "name"),
            bullets: strings(e.get("bullets")),
        }),
        education: entries(doc, "education", |e| EducationEntry {
            id: text(e, "id"),
            institution: text(e, "institution"),
            degree: optional_text(e, "degree"),
            field: optional_text(e, "field"),
            location: optional_text(e, "location"),
            start_date: optional_text(e, "startDate"),
            end_date: optional_text(e, "endDate"),
        }),
        skills: strings(doc.get("skills")),
    }
}

fn optional_text(obj: &Object, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn text(obj: &Object, key: &str) -> String {
    optional_text(obj, key).unwrap_or_default()
}

/// String elements of an array; anything else is dropped.
fn strings(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// One entry per array element. Non-object elements decode as empty entries.
fn entries<T>(doc: &Object, key: &str, entry: impl Fn(&Object) -> T) -> Vec<T> {
    let empty = Object::new();
    doc.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| entry(item.as_object().unwrap_or(&empty)))
                .collect()
        })
        .unwrap_or_default()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
