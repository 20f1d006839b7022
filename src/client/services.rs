//! HTTP client for the portal API. One method per API route.
//!
//! Every call follows the same contract: without a bearer token nothing is sent and the
//! result is `None`. Otherwise a loading notification is shown, the request is made, and
//! the call ends in either a success notification with the parsed `data`, or an error
//! notification and `None`.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use super::credentials::CredentialProvider;
use super::language::{Language, LanguageCtx};
use super::notify::{Notification, NotificationKind, Notifier};
use crate::models::{
    Account, Faculty, Keyword, KeywordParams, MemberInsight, MemberPrivateInfo, MemberPublicInfo, MemberType,
    OrgScope, OrgType, RegisterAccountParams, RegisterPartnerParams, UpdateAccountEmailParams,
    UpdateAccountNameParams, UpdateMemberInsightParams, UpdateMemberPrivateParams, UpdateMemberPublicParams,
};
use crate::response::Envelope;
use crate::routing::api_routes as r;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid url: {0}")]
    Url(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{}", status_message(.status, .body))]
    Status { status: u16, body: String },
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// The server's error message when the body is an error envelope, else the raw body.
fn status_message(status: impl std::fmt::Display, body: &str) -> String {
    if let Ok(env) = serde_json::from_str::<ErrorEnvelope>(body) {
        return env.error.message;
    }
    if body.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        body.to_string()
    }
}

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Loading notification text, English then French.
type Label = (&'static str, &'static str);

pub struct ServiceClient {
    http: reqwest::Client,
    base: Url,
    credentials: Arc<dyn CredentialProvider>,
    notifier: Arc<dyn Notifier>,
    language: LanguageCtx,
}

impl ServiceClient {
    pub fn new(
        base_url: &str,
        credentials: Arc<dyn CredentialProvider>,
        notifier: Arc<dyn Notifier>,
        language: LanguageCtx,
    ) -> Result<Self, ClientError> {
        let base = Url::parse(base_url).map_err(|e| ClientError::Url(e.to_string()))?;
        let http = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(ServiceClient {
            http,
            base,
            credentials,
            notifier,
            language,
        })
    }

    pub fn language(&self) -> Language {
        self.language.get()
    }

    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        self.notifier.notify(Notification::new(kind, message));
    }

    async fn call<B, T>(&self, loading: Label, method: Method, path: &str, body: Option<&B>) -> Option<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.credentials.bearer_token().await?;
        let lang = self.language();
        self.notify(NotificationKind::Loading, lang.pick(loading.0, loading.1));
        match self.send(method.clone(), path, &token, body).await {
            Ok(data) => {
                self.notify(NotificationKind::Success, lang.pick("Success!", "Succès !"));
                Some(data)
            }
            Err(e) => {
                tracing::warn!(%method, path, error = %e, "api call failed");
                self.notify(NotificationKind::Error, e.to_string());
                None
            }
        }
    }

    async fn send<B, T>(&self, method: Method, path: &str, token: &str, body: Option<&B>) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.base.join(path).map_err(|e| ClientError::Url(e.to_string()))?;
        let mut req = self.http.request(method, url).bearer_auth(token);
        if let Some(b) = body {
            req = req.json(b);
        }
        let res = req.send().await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let envelope: Envelope<T> = res.json().await?;
        Ok(envelope.data)
    }

    async fn get<T: DeserializeOwned>(&self, loading: Label, path: &str) -> Option<T> {
        self.call::<(), T>(loading, Method::GET, path, None).await
    }

    async fn post<B, T>(&self, loading: Label, path: &str, body: &B) -> Option<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(loading, Method::POST, path, Some(body)).await
    }

    async fn put<B, T>(&self, loading: Label, path: &str, body: &B) -> Option<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(loading, Method::PUT, path, Some(body)).await
    }

    async fn put_empty<T: DeserializeOwned>(&self, loading: Label, path: &str) -> Option<T> {
        self.call::<(), T>(loading, Method::PUT, path, None).await
    }

    pub async fn all_members(&self) -> Option<Vec<MemberPublicInfo>> {
        self.get(("Loading Members...", "Chargement des membres..."), r::ALL_MEMBERS).await
    }

    pub async fn all_accounts(&self) -> Option<Vec<Account>> {
        self.get(("Loading Accounts...", "Chargement des comptes..."), r::ALL_ACCOUNTS).await
    }

    pub async fn register_account(&self, params: &RegisterAccountParams) -> Option<Account> {
        self.post(
            ("Registering Account...", "Enregistrement du compte..."),
            r::REGISTER_ACCOUNT,
            params,
        )
        .await
    }

    pub async fn register_partner(&self, params: &RegisterPartnerParams) -> Option<Account> {
        self.post(
            ("Registering Partner...", "Enregistrement du partenaire..."),
            r::REGISTER_PARTNER,
            params,
        )
        .await
    }

    pub async fn active_account(&self) -> Option<Account> {
        self.get(("Loading Account...", "Chargement du compte..."), r::ACTIVE_ACCOUNT).await
    }

    pub async fn update_last_login(&self) -> Option<Account> {
        self.put_empty(
            ("Updating Last Login...", "Mise à jour de la dernière connexion..."),
            r::ACTIVE_ACCOUNT_UPDATE_LAST_LOGIN,
        )
        .await
    }

    pub async fn account(&self, id: i32) -> Option<Account> {
        self.get(("Loading Account...", "Chargement du compte..."), &r::account(id)).await
    }

    pub async fn public_member_info(&self, id: i32) -> Option<MemberPublicInfo> {
        self.get(
            ("Loading Member Info...", "Chargement des informations sur le membre..."),
            &r::public_member_info(id),
        )
        .await
    }

    pub async fn private_member_info(&self, id: i32) -> Option<MemberPrivateInfo> {
        self.get(
            ("Loading Member Info...", "Chargement des informations sur le membre..."),
            &r::private_member_info(id),
        )
        .await
    }

    pub async fn member_insight(&self, id: i32) -> Option<MemberInsight> {
        self.get(
            ("Loading Member Insight...", "Chargement des notes sur le membre..."),
            &r::member_insight(id),
        )
        .await
    }

    /// Returns the account as it was before deletion.
    pub async fn delete_account(&self, id: i32) -> Option<Account> {
        self.call::<(), Account>(
            ("Deleting Account...", "Suppression du compte..."),
            Method::DELETE,
            &r::delete_account(id),
            None,
        )
        .await
    }

    pub async fn update_account_name(&self, id: i32, params: &UpdateAccountNameParams) -> Option<Account> {
        self.put(
            ("Updating Account Name...", "Mise à jour du nom du compte..."),
            &r::update_account_name(id),
            params,
        )
        .await
    }

    pub async fn update_account_email(&self, id: i32, params: &UpdateAccountEmailParams) -> Option<Account> {
        self.put(
            ("Updating Account Email...", "Mise à jour du courriel du compte..."),
            &r::update_account_email(id),
            params,
        )
        .await
    }

    pub async fn grant_admin(&self, id: i32) -> Option<Account> {
        self.put_empty(
            ("Granting Admin Role...", "Attribution du rôle d'administrateur..."),
            &r::update_account_grant_admin(id),
        )
        .await
    }

    pub async fn remove_admin(&self, id: i32) -> Option<Account> {
        self.put_empty(
            ("Removing Admin Role...", "Retrait du rôle d'administrateur..."),
            &r::update_account_remove_admin(id),
        )
        .await
    }

    pub async fn register_member(&self, id: i32) -> Option<Account> {
        self.call::<(), Account>(
            ("Registering Member Info...", "Enregistrement des informations sur le membre..."),
            Method::POST,
            &r::update_account_register_member(id),
            None,
        )
        .await
    }

    pub async fn delete_member(&self, id: i32) -> Option<Account> {
        self.call::<(), Account>(
            ("Deleting Member Info...", "Suppression des informations sur le membre..."),
            Method::DELETE,
            &r::update_account_delete_member(id),
            None,
        )
        .await
    }

    pub async fn update_member_public(&self, id: i32, params: &UpdateMemberPublicParams) -> Option<MemberPublicInfo> {
        self.put(
            ("Updating Public Info...", "Mise à jour des informations publiques..."),
            &r::update_member_public(id),
            params,
        )
        .await
    }

    pub async fn update_member_private(
        &self,
        id: i32,
        params: &UpdateMemberPrivateParams,
    ) -> Option<MemberPrivateInfo> {
        self.put(
            ("Updating Private Info...", "Mise à jour des informations privées..."),
            &r::update_member_private(id),
            params,
        )
        .await
    }

    pub async fn update_member_insight(&self, id: i32, params: &UpdateMemberInsightParams) -> Option<MemberInsight> {
        self.put(
            ("Updating Member Insight...", "Mise à jour des notes sur le membre..."),
            &r::update_member_insight(id),
            params,
        )
        .await
    }

    pub async fn update_keyword(&self, id: i32, params: &KeywordParams) -> Option<Keyword> {
        self.put(("Updating Keyword...", "Mise à jour du mot clé..."), &r::update_keyword(id), params).await
    }

    pub async fn register_keyword(&self, params: &KeywordParams) -> Option<Keyword> {
        self.post(
            ("Registering Keyword...", "Enregistrement du mot clé..."),
            r::REGISTER_KEYWORD,
            params,
        )
        .await
    }

    pub async fn all_keywords(&self) -> Option<Vec<Keyword>> {
        self.get(("Loading Keywords...", "Chargement des mots clés..."), r::ALL_KEYWORDS).await
    }

    pub async fn all_faculties(&self) -> Option<Vec<Faculty>> {
        self.get(("Loading Faculties...", "Chargement des facultés..."), r::ALL_FACULTIES).await
    }

    pub async fn all_member_types(&self) -> Option<Vec<MemberType>> {
        self.get(("Loading Member Types...", "Chargement des types de membre..."), r::ALL_MEMBER_TYPES).await
    }

    pub async fn all_org_types(&self) -> Option<Vec<OrgType>> {
        self.get(
            ("Loading Organization Types...", "Chargement des types d'organisation..."),
            r::ALL_ORG_TYPES,
        )
        .await
    }

    pub async fn all_org_scopes(&self) -> Option<Vec<OrgScope>> {
        self.get(
            ("Loading Organization Scopes...", "Chargement des portées d'organisation..."),
            r::ALL_ORG_SCOPES,
        )
        .await
    }
}
