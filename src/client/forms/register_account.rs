use super::{confirm_email, require, require_email, FieldErrors};
use crate::client::language::Language;
use crate::client::notify::NotificationKind;
use crate::client::services::ServiceClient;
use crate::models::{Account, RegisterAccountParams};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterAccountData {
    pub first_name: String,
    pub last_name: String,
    pub login_email: String,
    pub confirm_email: String,
    pub is_member: bool,
    pub is_admin: bool,
}

impl Default for RegisterAccountData {
    fn default() -> Self {
        RegisterAccountData {
            first_name: String::new(),
            last_name: String::new(),
            login_email: String::new(),
            confirm_email: String::new(),
            is_member: true,
            is_admin: false,
        }
    }
}

/// New-account form. Not registered with the navigation guard: leaving the page drops it.
#[derive(Debug, Default)]
pub struct RegisterAccountForm {
    data: RegisterAccountData,
    errors: FieldErrors,
    loading: bool,
}

impl RegisterAccountForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &RegisterAccountData {
        &self.data
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_dirty(&self) -> bool {
        self.data != RegisterAccountData::default()
    }

    pub fn change(&mut self, edit: impl FnOnce(&mut RegisterAccountData)) {
        edit(&mut self.data);
        self.errors.clear();
    }

    pub fn validate(&self, lang: Language) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "first_name", &self.data.first_name, lang);
        require(&mut errors, "last_name", &self.data.last_name, lang);
        require_email(&mut errors, "login_email", &self.data.login_email, lang);
        confirm_email(
            &mut errors,
            "confirm_email",
            &self.data.login_email,
            &self.data.confirm_email,
            lang,
        );
        errors
    }

    pub fn params(&self) -> RegisterAccountParams {
        RegisterAccountParams {
            login_email: self.data.login_email.trim().to_string(),
            first_name: self.data.first_name.trim().to_string(),
            last_name: self.data.last_name.trim().to_string(),
            is_admin: self.data.is_admin,
            is_member: self.data.is_member,
        }
    }

    /// Returns the new account and clears the form, or None on invalid input or a failed call.
    pub async fn submit(&mut self, client: &ServiceClient) -> Option<Account> {
        let lang = client.language();
        self.errors = self.validate(lang);
        if !self.errors.is_empty() {
            return None;
        }
        if !self.is_dirty() {
            client.notify(NotificationKind::Warning, lang.pick("No Changes", "Aucun changement"));
            return None;
        }
        self.loading = true;
        let created = client.register_account(&self.params()).await;
        self.loading = false;
        if created.is_some() {
            self.data = RegisterAccountData::default();
        }
        created
    }
}
