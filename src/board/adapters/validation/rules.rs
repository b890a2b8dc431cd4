//! Individual document rules.
//!
//! Each rule inspects one part of the raw JSON document and appends a
//! [`FieldError`] per offence, so a single pass reports every problem.

use crate::board::domain::{
    ACTOR_LABEL, AuditAction, EstimateMinutes, FieldError, Ordinal, RubricScore, TaskPriority,
    TaskStatus, TaskTitle,
};
use chrono::DateTime;
use serde_json::{Map, Value};

type Object = Map<String, Value>;

/// Validates a whole board document.
#[must_use]
pub fn validate_board(document: &Value) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let Some(root) = document.as_object() else {
        errors.push(FieldError::new("$", "expected an object"));
        return errors;
    };

    if let Some(tasks) = required_array(root, "", "tasks", &mut errors) {
        for (index, task) in tasks.iter().enumerate() {
            validate_task(task, &format!("tasks[{index}]"), &mut errors);
        }
    }
    if let Some(entries) = required_array(root, "", "auditLog", &mut errors) {
        for (index, entry) in entries.iter().enumerate() {
            validate_audit_entry(entry, &format!("auditLog[{index}]"), &mut errors);
        }
    }
    validate_extended_mode(root, &mut errors);
    errors
}

/// Validates one task object found at `path`.
pub fn validate_task(task: &Value, path: &str, errors: &mut Vec<FieldError>) {
    let Some(object) = task.as_object() else {
        errors.push(FieldError::new(path, "expected an object"));
        return;
    };

    required_non_empty_string(object, path, "id", errors);
    if let Some(title) = required_string(object, path, "title", errors) {
        check(TaskTitle::new(title).map(drop), path, "title", errors);
    }
    optional_string(object, path, "description", errors);
    if let Some(priority) = required_string(object, path, "priority", errors) {
        check(TaskPriority::try_from(priority).map(drop), path, "priority", errors);
    }
    validate_tags(object, path, errors);
    if let Some(estimate) = required_integer(object, path, "estimateMinutes", errors) {
        check(EstimateMinutes::new(estimate).map(drop), path, "estimateMinutes", errors);
    }
    required_timestamp(object, path, "createdAt", errors);
    optional_timestamp(object, path, "dueAt", errors);
    if let Some(status) = required_string(object, path, "status", errors) {
        check(TaskStatus::try_from(status).map(drop), path, "status", errors);
    }
    if let Some(ordinal) = required_integer(object, path, "ordinal", errors) {
        check(Ordinal::new(ordinal).map(drop), path, "ordinal", errors);
    }
    if let Some(score) = object.get("rubricScore") {
        match score.as_f64() {
            Some(value) => check(RubricScore::new(value).map(drop), path, "rubricScore", errors),
            None => errors.push(field_error(path, "rubricScore", "expected a number")),
        }
    }
    optional_string(object, path, "rubricComment", errors);
    optional_string(object, path, "observations", errors);
}

/// Validates one audit entry found at `path`.
pub fn validate_audit_entry(entry: &Value, path: &str, errors: &mut Vec<FieldError>) {
    let Some(object) = entry.as_object() else {
        errors.push(FieldError::new(path, "expected an object"));
        return;
    };

    required_non_empty_string(object, path, "id", errors);
    required_timestamp(object, path, "timestamp", errors);
    required_non_empty_string(object, path, "taskId", errors);
    if let Some(label) = required_string(object, path, "actorLabel", errors) {
        if label != ACTOR_LABEL {
            errors.push(field_error(
                path,
                "actorLabel",
                &format!("must be \"{ACTOR_LABEL}\""),
            ));
        }
    }

    let action = required_string(object, path, "action", errors).and_then(|raw| {
        AuditAction::try_from(raw)
            .map_err(|err| errors.push(field_error(path, "action", &err.to_string())))
            .ok()
    });
    let diff_path = join(path, "diff");
    let sides = match object.get("diff") {
        None => Some((false, false)),
        Some(Value::Object(diff)) => diff_sides(diff, &diff_path, errors),
        Some(_) => {
            errors.push(FieldError::new(&diff_path, "expected an object"));
            None
        }
    };
    if let (Some(recorded), Some(present)) = (action, sides) {
        validate_diff_shape(recorded, present, &diff_path, errors);
    }
}

fn diff_sides(diff: &Object, path: &str, errors: &mut Vec<FieldError>) -> Option<(bool, bool)> {
    let mut valid = true;
    let mut side = |name: &str| match diff.get(name) {
        None | Some(Value::Null) => false,
        Some(Value::Object(_)) => true,
        Some(_) => {
            errors.push(field_error(path, name, "expected an object"));
            valid = false;
            false
        }
    };
    let before = side("before");
    let after = side("after");
    valid.then_some((before, after))
}

fn validate_diff_shape(
    action: AuditAction,
    (before, after): (bool, bool),
    path: &str,
    errors: &mut Vec<FieldError>,
) {
    let expected = match action {
        AuditAction::Create => (false, true),
        AuditAction::Delete => (true, false),
        AuditAction::Update | AuditAction::Move => (true, true),
    };
    if (before, after) == expected {
        return;
    }
    let message = match action {
        AuditAction::Create => "CREATE entries carry only `after`",
        AuditAction::Delete => "DELETE entries carry only `before`",
        AuditAction::Update | AuditAction::Move => "entries carry both `before` and `after`",
    };
    errors.push(FieldError::new(path, message));
}

fn validate_extended_mode(root: &Object, errors: &mut Vec<FieldError>) {
    match root.get("extendedMode") {
        None => errors.push(FieldError::new("extendedMode", "is required")),
        Some(Value::Object(mode)) => match mode.get("enabled") {
            Some(Value::Bool(_)) => {}
            Some(_) => errors.push(FieldError::new("extendedMode.enabled", "expected a boolean")),
            None => errors.push(FieldError::new("extendedMode.enabled", "is required")),
        },
        Some(_) => errors.push(FieldError::new("extendedMode", "expected an object")),
    }
}

fn validate_tags(object: &Object, path: &str, errors: &mut Vec<FieldError>) {
    let Some(tags) = required_array(object, path, "tags", errors) else {
        return;
    };
    for (index, tag) in tags.iter().enumerate() {
        if !tag.is_string() {
            errors.push(FieldError::new(
                format!("{}[{index}]", join(path, "tags")),
                "expected a string",
            ));
        }
    }
}

fn join(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_owned()
    } else {
        format!("{path}.{field}")
    }
}

fn field_error(path: &str, field: &str, message: &str) -> FieldError {
    FieldError::new(join(path, field), message)
}

fn check<E: ToString>(
    outcome: Result<(), E>,
    path: &str,
    field: &str,
    errors: &mut Vec<FieldError>,
) {
    if let Err(err) = outcome {
        errors.push(field_error(path, field, &err.to_string()));
    }
}

fn required<'a>(
    object: &'a Object,
    path: &str,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<&'a Value> {
    let value = object.get(field);
    if value.is_none() {
        errors.push(field_error(path, field, "is required"));
    }
    value
}

fn required_string<'a>(
    object: &'a Object,
    path: &str,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<&'a str> {
    let value = required(object, path, field, errors)?;
    let text = value.as_str();
    if text.is_none() {
        errors.push(field_error(path, field, "expected a string"));
    }
    text
}

fn required_non_empty_string(
    object: &Object,
    path: &str,
    field: &str,
    errors: &mut Vec<FieldError>,
) {
    if required_string(object, path, field, errors).is_some_and(str::is_empty) {
        errors.push(field_error(path, field, "must not be empty"));
    }
}

fn optional_string(object: &Object, path: &str, field: &str, errors: &mut Vec<FieldError>) {
    if object.get(field).is_some_and(|value| !value.is_string()) {
        errors.push(field_error(path, field, "expected a string"));
    }
}

fn required_integer(
    object: &Object,
    path: &str,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<i64> {
    let value = required(object, path, field, errors)?;
    let integer = value.as_i64();
    if integer.is_none() {
        errors.push(field_error(path, field, "expected an integer"));
    }
    integer
}

fn required_array<'a>(
    object: &'a Object,
    path: &str,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<&'a Vec<Value>> {
    let value = required(object, path, field, errors)?;
    let items = value.as_array();
    if items.is_none() {
        errors.push(field_error(path, field, "expected an array"));
    }
    items
}

fn required_timestamp(object: &Object, path: &str, field: &str, errors: &mut Vec<FieldError>) {
    if let Some(raw) = required_string(object, path, field, errors) {
        parse_timestamp(raw, path, field, errors);
    }
}

fn optional_timestamp(object: &Object, path: &str, field: &str, errors: &mut Vec<FieldError>) {
    match object.get(field) {
        None => {}
        Some(Value::String(raw)) => parse_timestamp(raw, path, field, errors),
        Some(_) => errors.push(field_error(path, field, "expected a string")),
    }
}

fn parse_timestamp(raw: &str, path: &str, field: &str, errors: &mut Vec<FieldError>) {
    if DateTime::parse_from_rfc3339(raw).is_err() {
        errors.push(field_error(path, field, "expected an RFC 3339 timestamp"));
    }
}
