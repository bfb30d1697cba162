use crate::error::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;

/// Width of a `string` column created by the migrations.
pub const MAX_STRING_LEN: usize = 255;

fn no_kk_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{16}$").expect("valid no_kk regex"))
}

fn kode_pos_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{5}$").expect("valid kode_pos regex"))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex")
    })
}

/// Trims `value` and checks it fits a non-null `string` column.
pub fn require_text(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_STRING_LEN {
        return Err(AppError::ValidationError(format!(
            "{field} must be at most {MAX_STRING_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Same as [`require_text`] for nullable columns; blank input becomes `None`.
pub fn optional_text(field: &str, value: Option<&str>) -> AppResult<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => require_text(field, v).map(Some),
    }
}

/// Nomor Kartu Keluarga: 16 digits.
pub fn validate_no_kk(no_kk: &str) -> AppResult<String> {
    let no_kk = no_kk.trim();
    if !no_kk_regex().is_match(no_kk) {
        return Err(AppError::ValidationError(
            "no_kk must be exactly 16 digits".to_string(),
        ));
    }
    Ok(no_kk.to_string())
}

/// Indonesian postal code: 5 digits.
pub fn validate_kode_pos(kode_pos: &str) -> AppResult<String> {
    let kode_pos = kode_pos.trim();
    if !kode_pos_regex().is_match(kode_pos) {
        return Err(AppError::ValidationError(
            "kode_pos must be exactly 5 digits".to_string(),
        ));
    }
    Ok(kode_pos.to_string())
}

pub fn validate_email(email: &str) -> AppResult<String> {
    let email = require_text("email", email)?.to_lowercase();
    if !email_regex().is_match(&email) {
        return Err(AppError::ValidationError("email is invalid".to_string()));
    }
    Ok(email)
}
