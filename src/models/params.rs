//! Request bodies for the mutating API routes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::lookup::Problem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterAccountParams {
    pub login_email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_member: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterPartnerParams {
    pub login_email: String,
    pub first_name: String,
    pub last_name: String,
    pub org_name: String,
    #[serde(default)]
    pub org_type_id: Option<i32>,
    #[serde(default)]
    pub org_scope_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAccountNameParams {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAccountEmailParams {
    pub login_email: String,
}

/// Only present fields are written. `Some("")` clears a text field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateMemberPublicParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_me: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// `Some(None)` clears the faculty.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub member_type_id: Option<Option<i32>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add_keywords: Vec<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove_keywords: Vec<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problems: Option<Vec<Problem>>,
}

/// Distinguishes an explicit `null` (clear) from an absent key (keep).
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateMemberPublicParams {
    pub fn is_empty(&self) -> bool {
        *self == UpdateMemberPublicParams::default()
    }
}

/// Text fields are always sent; activation is a transition, never a raw flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateMemberPrivateParams {
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub mobile_phone: Option<String>,
    pub date_joined: Option<DateTime<Utc>>,
    #[serde(default)]
    pub activate: bool,
    #[serde(default)]
    pub deactivate: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateMemberInsightParams {
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordParams {
    pub name_en: String,
    pub name_fr: String,
}
