//! Resume shape validation for untrusted JSON (raw editor input, stored data, model output).
//!
//! `validate_resume` is a fixed sequence of checks that stops at the first violation and
//! names it. Nothing is coerced here; the only tolerant step is `normalize_resume`, which
//! is applied to previously stored data before validation.

use serde_json::{json, Map, Value};

use crate::models::resume::ResumeDocument;

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON format. Please check your syntax.";

const REQUIRED_HEADER_FIELDS: &[&str] = &["name", "title", "email", "phone", "links"];
const HEADER_STRING_FIELDS: &[&str] = &["name", "title", "email", "phone"];

fn non_empty_str(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty())
}

fn is_valid_link(link: &Value) -> bool {
    match link {
        Value::String(_) => true,
        Value::Object(obj) => {
            non_empty_str(obj.get("label")) && obj.get("url").is_some_and(|u| !u.is_null())
        }
        _ => false,
    }
}

fn validate_header(value: &Value) -> Result<(), String> {
    let header = value
        .get("header")
        .and_then(Value::as_object)
        .ok_or_else(|| "Missing \"header\" object.".to_string())?;

    if let Some(field) = REQUIRED_HEADER_FIELDS
        .iter()
        .find(|f| header.get(**f).map_or(true, Value::is_null))
    {
        return Err(format!("Header is missing \"{field}\"."));
    }

    if let Some(field) = HEADER_STRING_FIELDS
        .iter()
        .find(|f| !header.get(**f).is_some_and(Value::is_string))
    {
        return Err(format!("Header field \"{field}\" must be a string."));
    }

    let links = header
        .get("links")
        .and_then(Value::as_array)
        .ok_or_else(|| "\"header.links\" must be an array.".to_string())?;

    if !links.iter().all(is_valid_link) {
        return Err(
            "\"header.links\" items must be strings or objects with \"label\" and \"url\"."
                .to_string(),
        );
    }

    Ok(())
}

fn array_field<'a>(value: &'a Value, field: &str) -> Result<&'a Vec<Value>, String> {
    value
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| format!("\"{field}\" must be an array."))
}

fn is_valid_job(job: &Value) -> bool {
    non_empty_str(job.get("company"))
        && non_empty_str(job.get("role"))
        && job
            .get("details")
            .and_then(Value::as_array)
            .is_some_and(|details| details.iter().all(Value::is_string))
}

/// Checks `value` against the resume shape, returning the first violation found.
pub fn validate_resume(value: &Value) -> Result<(), String> {
    validate_header(value)?;

    if !value.get("summary").is_some_and(Value::is_string) {
        return Err("\"summary\" must be a string.".to_string());
    }

    let skills = array_field(value, "skills")?;
    if !skills.iter().all(|skill| {
        skill.get("category").is_some_and(Value::is_string)
            && skill.get("items").is_some_and(Value::is_string)
    }) {
        return Err("Each skill needs \"category\" and \"items\" strings.".to_string());
    }

    let experience = array_field(value, "experience")?;
    if !experience.iter().all(is_valid_job) {
        return Err(
            "Each experience needs \"company\", \"role\", and a \"details\" array.".to_string(),
        );
    }

    let education = array_field(value, "education")?;
    if !education
        .iter()
        .all(|edu| non_empty_str(edu.get("degree")) && non_empty_str(edu.get("school")))
    {
        return Err("Each education needs \"degree\" and \"school\".".to_string());
    }

    Ok(())
}

/// Validates and converts. Optional job/education fields that are present but not strings
/// are caught by deserialization.
pub fn resume_from_value(value: Value) -> Result<ResumeDocument, String> {
    validate_resume(&value)?;
    serde_json::from_value(value).map_err(|e| format!("Resume JSON has an unexpected shape: {e}"))
}

/// Parses raw editor text into a validated resume.
pub fn parse_resume_json(text: &str) -> Result<ResumeDocument, String> {
    let value: Value = serde_json::from_str(text).map_err(|_| INVALID_JSON_MESSAGE.to_string())?;
    resume_from_value(value)
}

fn string_or_empty(obj: &Map<String, Value>, key: &str) -> Value {
    match obj.get(key) {
        Some(v) if !v.is_null() => v.clone(),
        _ => Value::String(String::new()),
    }
}

fn normalize_job(job: &Value) -> Value {
    let empty = Map::new();
    let obj = job.as_object().unwrap_or(&empty);
    let details = obj
        .get("details")
        .filter(|d| d.is_array())
        .cloned()
        .unwrap_or_else(|| json!([]));

    json!({
        "company": string_or_empty(obj, "company"),
        "role": string_or_empty(obj, "role"),
        "location": string_or_empty(obj, "location"),
        "date": string_or_empty(obj, "date"),
        "details": details,
    })
}

fn normalize_education(edu: &Value) -> Value {
    let empty = Map::new();
    let obj = edu.as_object().unwrap_or(&empty);
    json!({
        "degree": string_or_empty(obj, "degree"),
        "school": string_or_empty(obj, "school"),
        "date": string_or_empty(obj, "date"),
    })
}

/// Tolerant repair of stored data: fills missing job and education fields and turns a
/// single education object into a one-element list. Never touches the header.
pub fn normalize_resume(value: Value) -> Value {
    let mut root = match value {
        Value::Object(root) => root,
        other => return other,
    };

    let experience = match root.get("experience") {
        Some(Value::Array(jobs)) => jobs.iter().map(normalize_job).collect(),
        _ => vec![],
    };

    let education = match root.get("education") {
        Some(Value::Array(entries)) => entries.iter().map(normalize_education).collect(),
        Some(v) if !v.is_null() => vec![normalize_education(v)],
        _ => vec![normalize_education(&Value::Null)],
    };

    root.insert("experience".to_string(), Value::Array(experience));
    root.insert("education".to_string(), Value::Array(education));
    Value::Object(root)
}
