//! Edit forms.
//!
//! A [`FormController`] holds the record being edited, the values it started from and the
//! current values. It is dirty while the two differ. Submitting validates every field,
//! refuses to call the API when nothing changed, and on success adopts the returned record
//! as the new starting point. While mounted it is the guard's submit handler, so navigating
//! away can save it.

mod account_settings;
mod member_insight;
mod member_private;
mod member_public;
mod register_account;

pub use account_settings::{AccountSettingsData, AccountSettingsForm, AccountSettingsModel};
pub use member_insight::{MemberInsightData, MemberInsightForm, MemberInsightModel};
pub use member_private::{
    private_params, status_label, status_warning, MemberPrivateData, MemberPrivateForm, MemberPrivateModel,
};
pub use member_public::{public_params, MemberPublicData, MemberPublicForm, MemberPublicModel};
pub use register_account::{RegisterAccountData, RegisterAccountForm};

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::guard::{FormRegistration, SaveChangesGuard, SubmitHandler};
use super::language::Language;
use super::notify::NotificationKind;
use super::services::ServiceClient;
use crate::service::validation::is_valid_email;

/// Field name to message. Empty means valid.
pub type FieldErrors = BTreeMap<&'static str, String>;

pub(crate) fn require(errors: &mut FieldErrors, field: &'static str, value: &str, lang: Language) {
    if value.trim().is_empty() {
        errors.insert(field, lang.pick("Required", "Requis").to_string());
    }
}

pub(crate) fn require_email(errors: &mut FieldErrors, field: &'static str, value: &str, lang: Language) {
    if value.trim().is_empty() {
        errors.insert(field, lang.pick("Required", "Requis").to_string());
    } else {
        optional_email(errors, field, value, lang);
    }
}

pub(crate) fn optional_email(errors: &mut FieldErrors, field: &'static str, value: &str, lang: Language) {
    if !value.trim().is_empty() && !is_valid_email(value.trim()) {
        errors.insert(field, lang.pick("Invalid email", "Courriel invalide").to_string());
    }
}

/// Confirmation must equal the email, whichever of the two was typed last.
pub(crate) fn confirm_email(
    errors: &mut FieldErrors,
    field: &'static str,
    email: &str,
    confirm: &str,
    lang: Language,
) {
    if confirm.trim().is_empty() {
        errors.insert(field, lang.pick("Required", "Requis").to_string());
    } else if !email.trim().eq_ignore_ascii_case(confirm.trim()) {
        errors.insert(
            field,
            lang.pick("Emails do not match", "Les courriels ne correspondent pas")
                .to_string(),
        );
    }
}

/// One editable record type.
#[async_trait]
pub trait FormModel: Send + Sync + 'static {
    type Record: Clone + Send + Sync + 'static;
    type Data: Clone + PartialEq + Send + Sync + 'static;

    fn initial_data(record: &Self::Record) -> Self::Data;

    fn validate(data: &Self::Data, lang: Language) -> FieldErrors;

    /// Whether `data` would send anything. Edits that normalise away (trailing blanks,
    /// email case) count as no change even though the form is dirty.
    fn has_changes(record: &Self::Record, data: &Self::Data) -> bool {
        Self::initial_data(record) != *data
    }

    /// Send the changes between `record` and `data`. None when the call failed.
    async fn save(&self, client: &ServiceClient, record: &Self::Record, data: &Self::Data) -> Option<Self::Record>;
}

struct FormState<M: FormModel> {
    record: M::Record,
    initial: M::Data,
    data: M::Data,
    errors: FieldErrors,
    loading: bool,
}

type SuccessCallback<R> = Box<dyn Fn(&R) + Send + Sync>;

pub struct FormController<M: FormModel> {
    model: M,
    client: Arc<ServiceClient>,
    guard: SaveChangesGuard,
    state: Mutex<FormState<M>>,
    on_success: SuccessCallback<M::Record>,
}

impl<M: FormModel> FormController<M> {
    pub fn new(
        model: M,
        record: M::Record,
        client: Arc<ServiceClient>,
        guard: SaveChangesGuard,
        on_success: impl Fn(&M::Record) + Send + Sync + 'static,
    ) -> Arc<Self> {
        let initial = M::initial_data(&record);
        Arc::new(FormController {
            model,
            client,
            guard,
            state: Mutex::new(FormState {
                record,
                data: initial.clone(),
                initial,
                errors: FieldErrors::new(),
                loading: false,
            }),
            on_success: Box::new(on_success),
        })
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut FormState<M>) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut state)
    }

    /// Register with the guard for as long as the returned value lives.
    pub fn mount(self: &Arc<Self>) -> FormRegistration {
        let registration = self.guard.register(self.clone());
        self.guard.set_dirty(self.is_dirty());
        registration
    }

    pub fn record(&self) -> M::Record {
        self.with_state(|s| s.record.clone())
    }

    pub fn data(&self) -> M::Data {
        self.with_state(|s| s.data.clone())
    }

    pub fn errors(&self) -> FieldErrors {
        self.with_state(|s| s.errors.clone())
    }

    pub fn is_dirty(&self) -> bool {
        self.with_state(|s| s.data != s.initial)
    }

    pub fn is_loading(&self) -> bool {
        self.with_state(|s| s.loading)
    }

    /// Edit the current values. Clears field errors and recomputes dirty.
    pub fn change(&self, edit: impl FnOnce(&mut M::Data)) {
        let dirty = self.with_state(|s| {
            edit(&mut s.data);
            s.errors.clear();
            s.data != s.initial
        });
        self.guard.set_dirty(dirty);
    }

    /// Put the starting values back.
    pub fn reset(&self) {
        self.with_state(|s| {
            s.data = s.initial.clone();
            s.errors.clear();
        });
        self.guard.set_dirty(false);
    }

    fn check(&self) -> Result<M::Data, FieldErrors> {
        let lang = self.client.language();
        self.with_state(|s| {
            s.errors = M::validate(&s.data, lang);
            if s.errors.is_empty() {
                Ok(s.data.clone())
            } else {
                Err(s.errors.clone())
            }
        })
    }

    /// Submit from the form's own button. Validation errors stay inline.
    pub async fn submit(&self) -> bool {
        match self.check() {
            Ok(data) => self.submit_validated(data).await,
            Err(_) => false,
        }
    }

    /// Submit on behalf of the guard. Validation errors also raise a warning, since the
    /// user asked to leave the page rather than to save.
    pub async fn validate_and_submit(&self) -> bool {
        match self.check() {
            Ok(data) => self.submit_validated(data).await,
            Err(errors) => {
                let lang = self.client.language();
                tracing::debug!(fields = ?errors.keys().collect::<Vec<_>>(), "form has invalid fields");
                self.client.notify(
                    NotificationKind::Warning,
                    lang.pick("A field is invalid!", "Un champ est invalide !"),
                );
                false
            }
        }
    }

    async fn submit_validated(&self, data: M::Data) -> bool {
        let record = self.with_state(|s| s.record.clone());
        if !M::has_changes(&record, &data) {
            let lang = self.client.language();
            self.client
                .notify(NotificationKind::Warning, lang.pick("No Changes", "Aucun changement"));
            return true;
        }

        self.with_state(|s| s.loading = true);
        let saved = self.model.save(&self.client, &record, &data).await;
        self.with_state(|s| s.loading = false);

        let Some(saved) = saved else {
            return false;
        };
        self.with_state(|s| {
            s.initial = M::initial_data(&saved);
            s.data = s.initial.clone();
            s.record = saved.clone();
        });
        self.guard.set_dirty(false);
        (self.on_success)(&saved);
        true
    }
}

#[async_trait]
impl<M: FormModel> SubmitHandler for FormController<M> {
    async fn save_changes(&self) -> bool {
        self.validate_and_submit().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a@b.ca", "A@B.CA", None)]
    #[case("a@b.ca", "", Some("Required"))]
    #[case("a@b.ca", "c@b.ca", Some("Emails do not match"))]
    fn confirm_email_rules(#[case] email: &str, #[case] confirm: &str, #[case] expected: Option<&str>) {
        let mut errors = FieldErrors::new();
        confirm_email(&mut errors, "confirm_email", email, confirm, Language::En);
        assert_eq!(errors.get("confirm_email").map(String::as_str), expected);
    }

    #[test]
    fn optional_email_accepts_blank() {
        let mut errors = FieldErrors::new();
        optional_email(&mut errors, "work_email", "   ", Language::En);
        assert!(errors.is_empty());
        optional_email(&mut errors, "work_email", "nope", Language::Fr);
        assert_eq!(errors["work_email"], "Courriel invalide");
    }
}
