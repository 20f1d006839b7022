use async_trait::async_trait;

use super::{confirm_email, require, require_email, FieldErrors, FormController, FormModel};
use crate::client::language::Language;
use crate::client::services::ServiceClient;
use crate::models::{Account, UpdateAccountEmailParams, UpdateAccountNameParams};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountSettingsData {
    pub first_name: String,
    pub last_name: String,
    pub login_email: String,
    pub confirm_email: String,
    pub is_admin: bool,
    pub is_member: bool,
}

/// Admin view of an account: name, login email, admin role and member profile.
pub struct AccountSettingsModel;

pub type AccountSettingsForm = FormController<AccountSettingsModel>;

/// What a submit would send, one entry per endpoint.
#[derive(Debug, Default, PartialEq)]
struct AccountChanges {
    name: Option<UpdateAccountNameParams>,
    email: Option<UpdateAccountEmailParams>,
    admin: Option<bool>,
    member: Option<bool>,
}

impl AccountChanges {
    fn between(account: &Account, data: &AccountSettingsData) -> Self {
        let (first, last) = (data.first_name.trim(), data.last_name.trim());
        let email = data.login_email.trim();
        AccountChanges {
            name: (first != account.first_name || last != account.last_name).then(|| UpdateAccountNameParams {
                first_name: first.to_string(),
                last_name: last.to_string(),
            }),
            email: (!email.eq_ignore_ascii_case(&account.login_email)).then(|| UpdateAccountEmailParams {
                login_email: email.to_string(),
            }),
            admin: (account.is_admin != data.is_admin).then_some(data.is_admin),
            member: (account.is_member() != data.is_member).then_some(data.is_member),
        }
    }

    fn is_empty(&self) -> bool {
        *self == AccountChanges::default()
    }
}

#[async_trait]
impl FormModel for AccountSettingsModel {
    type Record = Account;
    type Data = AccountSettingsData;

    fn initial_data(account: &Account) -> AccountSettingsData {
        AccountSettingsData {
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            login_email: account.login_email.clone(),
            confirm_email: account.login_email.clone(),
            is_admin: account.is_admin,
            is_member: account.is_member(),
        }
    }

    fn validate(data: &AccountSettingsData, lang: Language) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "first_name", &data.first_name, lang);
        require(&mut errors, "last_name", &data.last_name, lang);
        require_email(&mut errors, "login_email", &data.login_email, lang);
        confirm_email(&mut errors, "confirm_email", &data.login_email, &data.confirm_email, lang);
        errors
    }

    fn has_changes(account: &Account, data: &AccountSettingsData) -> bool {
        !AccountChanges::between(account, data).is_empty()
    }

    /// One call per changed concern, in order. Stops at the first failure.
    async fn save(&self, client: &ServiceClient, account: &Account, data: &AccountSettingsData) -> Option<Account> {
        let changes = AccountChanges::between(account, data);
        let mut current = account.clone();
        if let Some(params) = &changes.name {
            current = client.update_account_name(account.id, params).await?;
        }
        if let Some(params) = &changes.email {
            current = client.update_account_email(account.id, params).await?;
        }
        match changes.admin {
            Some(true) => current = client.grant_admin(account.id).await?,
            Some(false) => current = client.remove_admin(account.id).await?,
            None => {}
        }
        match changes.member {
            Some(true) => current = client.register_member(account.id).await?,
            Some(false) => current = client.delete_member(account.id).await?,
            None => {}
        }
        Some(current)
    }
}
