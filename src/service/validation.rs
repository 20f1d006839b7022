//! Request validation and normalization for the mutating routes.

use crate::error::AppError;
use crate::models::{
    KeywordParams, RegisterAccountParams, RegisterPartnerParams, UpdateAccountEmailParams,
    UpdateAccountNameParams, UpdateMemberPrivateParams, UpdateMemberPublicParams,
};
use regex::Regex;
use std::sync::OnceLock;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Loose RFC 5322 shape check: one `@`, no whitespace, a dot in the domain.
pub fn is_valid_email(s: &str) -> bool {
    email_regex().is_match(s.trim())
}

/// Stored form of a login email.
pub fn normalize_email(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Empty or whitespace-only text is stored as NULL.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let t = s.trim();
        (!t.is_empty()).then(|| t.to_string())
    })
}

fn required(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn email(field: &str, value: &str) -> Result<(), AppError> {
    required(field, value)?;
    if !is_valid_email(value) {
        return Err(AppError::Validation(format!("{} must be a valid email", field)));
    }
    Ok(())
}

pub struct RequestValidator;

impl RequestValidator {
    pub fn register_account(params: &mut RegisterAccountParams) -> Result<(), AppError> {
        email("login_email", &params.login_email)?;
        required("first_name", &params.first_name)?;
        required("last_name", &params.last_name)?;
        params.login_email = normalize_email(&params.login_email);
        params.first_name = params.first_name.trim().to_string();
        params.last_name = params.last_name.trim().to_string();
        Ok(())
    }

    pub fn register_partner(params: &mut RegisterPartnerParams) -> Result<(), AppError> {
        email("login_email", &params.login_email)?;
        required("first_name", &params.first_name)?;
        required("last_name", &params.last_name)?;
        required("org_name", &params.org_name)?;
        params.login_email = normalize_email(&params.login_email);
        params.first_name = params.first_name.trim().to_string();
        params.last_name = params.last_name.trim().to_string();
        params.org_name = params.org_name.trim().to_string();
        Ok(())
    }

    pub fn account_name(params: &mut UpdateAccountNameParams) -> Result<(), AppError> {
        required("first_name", &params.first_name)?;
        required("last_name", &params.last_name)?;
        params.first_name = params.first_name.trim().to_string();
        params.last_name = params.last_name.trim().to_string();
        Ok(())
    }

    pub fn account_email(params: &mut UpdateAccountEmailParams) -> Result<(), AppError> {
        email("login_email", &params.login_email)?;
        params.login_email = normalize_email(&params.login_email);
        Ok(())
    }

    pub fn member_public(params: &mut UpdateMemberPublicParams) -> Result<(), AppError> {
        if let Some(work_email) = params.work_email.as_deref() {
            if !work_email.trim().is_empty() && !is_valid_email(work_email) {
                return Err(AppError::Validation("work_email must be a valid email".into()));
            }
        }
        if params.add_keywords.iter().any(|id| params.remove_keywords.contains(id)) {
            return Err(AppError::Validation(
                "a keyword cannot be both added and removed".into(),
            ));
        }
        if let Some(problems) = params.problems.as_mut() {
            problems.retain(|p| !p.name_en.trim().is_empty() || !p.name_fr.trim().is_empty());
        }
        Ok(())
    }

    pub fn member_private(params: &UpdateMemberPrivateParams) -> Result<(), AppError> {
        if params.activate && params.deactivate {
            return Err(AppError::Validation(
                "activate and deactivate are mutually exclusive".into(),
            ));
        }
        Ok(())
    }

    pub fn keyword(params: &mut KeywordParams) -> Result<(), AppError> {
        params.name_en = params.name_en.trim().to_string();
        params.name_fr = params.name_fr.trim().to_string();
        if params.name_en.is_empty() && params.name_fr.is_empty() {
            return Err(AppError::Validation("a keyword needs an English or French name".into()));
        }
        Ok(())
    }
}
