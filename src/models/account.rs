use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Login account. `member_id` links the optional member profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: i32,
    pub login_email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
    pub member_id: Option<i32>,
    pub partner_id: Option<i32>,
    pub last_login: Option<DateTime<Utc>>,
}

impl Account {
    pub fn is_member(&self) -> bool {
        self.member_id.is_some()
    }

    pub fn is_partner(&self) -> bool {
        self.partner_id.is_some()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Partner organisation attached to a non-member account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Partner {
    pub id: i32,
    pub account_id: i32,
    pub org_name: String,
    pub org_type_id: Option<i32>,
    pub org_scope_id: Option<i32>,
}
