use crate::{MAX_FIELD_NAME_LEN, MAX_PATH_LEN};

/// Ensure a record type path is `seg::seg::Ident`-shaped, ASCII, and within
/// the maximum length.
pub(crate) fn validate_record_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("record path is empty".to_string());
    }
    if path.len() > MAX_PATH_LEN {
        return Err(format!(
            "record path '{path}' exceeds max length {MAX_PATH_LEN}"
        ));
    }
    if !path.split("::").all(is_ident) {
        return Err(format!(
            "record path '{path}' must be '::'-separated identifiers"
        ));
    }

    Ok(())
}

/// Ensure a field identifier is non-empty, ASCII, and within the maximum
/// length. Field names may contain '-' as document keys often do.
pub(crate) fn validate_field_ident(ident: &str) -> Result<(), String> {
    if ident.is_empty() {
        return Err("field ident is empty".to_string());
    }
    if ident.len() > MAX_FIELD_NAME_LEN {
        return Err(format!(
            "field ident '{ident}' exceeds max length {MAX_FIELD_NAME_LEN}"
        ));
    }
    if !ident.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        || !ident
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(format!("field ident '{ident}' is not a valid identifier"));
    }

    Ok(())
}

fn is_ident(segment: &str) -> bool {
    segment.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
