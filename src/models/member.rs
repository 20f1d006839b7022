use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lookup::{Keyword, Problem};

/// Profile visible to everyone while the member is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberPublicInfo {
    pub id: i32,
    pub account_id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub about_me: Option<String>,
    pub work_email: Option<String>,
    pub work_phone: Option<String>,
    pub website: Option<String>,
    pub faculty_id: Option<i32>,
    pub member_type_id: Option<i32>,
    pub is_active: bool,
    #[sqlx(skip)]
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    #[sqlx(skip)]
    #[serde(default)]
    pub problems: Vec<Problem>,
}

/// Contact and status data seen by the owner and administrators only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberPrivateInfo {
    pub id: i32,
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub mobile_phone: Option<String>,
    pub date_joined: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub last_active: Option<DateTime<Utc>>,
}

/// Administrator notes on a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberInsight {
    pub id: i32,
    pub notes: Option<String>,
}
