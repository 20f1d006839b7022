//! Route tables. Templates (with `:id`) are mounted by the API router; the functions
//! build concrete paths for the client. Every path starts at the domain root.

/// Substitute the `:id` segment of a route template.
pub fn with_id(template: &str, id: i32) -> String {
    template.replacen(":id", &id.to_string(), 1)
}

pub mod api_routes {
    use super::with_id;

    pub const ALL_MEMBERS: &str = "/api/all-members";
    pub const ALL_ACCOUNTS: &str = "/api/all-accounts";
    pub const REGISTER_ACCOUNT: &str = "/api/register-account";
    pub const REGISTER_PARTNER: &str = "/api/register-partner";
    pub const ACTIVE_ACCOUNT: &str = "/api/active-account";
    pub const ACTIVE_ACCOUNT_UPDATE_LAST_LOGIN: &str = "/api/active-account/update-last-login";
    pub const ACCOUNT: &str = "/api/account/:id";
    pub const PUBLIC_MEMBER_INFO: &str = "/api/member/:id/public";
    pub const PRIVATE_MEMBER_INFO: &str = "/api/member/:id/private";
    pub const MEMBER_INSIGHT: &str = "/api/member/:id/insight";
    pub const DELETE_ACCOUNT: &str = "/api/delete-account/:id";
    pub const UPDATE_ACCOUNT_NAME: &str = "/api/update-account/:id/name";
    pub const UPDATE_ACCOUNT_EMAIL: &str = "/api/update-account/:id/email";
    pub const UPDATE_ACCOUNT_GRANT_ADMIN: &str = "/api/update-account/:id/grant-admin";
    pub const UPDATE_ACCOUNT_REMOVE_ADMIN: &str = "/api/update-account/:id/remove-admin";
    pub const UPDATE_ACCOUNT_REGISTER_MEMBER: &str = "/api/update-account/:id/register-member";
    pub const UPDATE_ACCOUNT_DELETE_MEMBER: &str = "/api/update-account/:id/delete-member";
    pub const UPDATE_MEMBER_PUBLIC: &str = "/api/update-member/:id/public";
    pub const UPDATE_MEMBER_PRIVATE: &str = "/api/update-member/:id/private";
    pub const UPDATE_MEMBER_INSIGHT: &str = "/api/update-member/:id/insight";
    pub const UPDATE_KEYWORD: &str = "/api/update-keyword/:id";
    pub const REGISTER_KEYWORD: &str = "/api/register-keyword";
    pub const ALL_KEYWORDS: &str = "/api/all-keywords";
    pub const ALL_FACULTIES: &str = "/api/all-faculties";
    pub const ALL_MEMBER_TYPES: &str = "/api/all-member-types";
    pub const ALL_ORG_TYPES: &str = "/api/all-org-types";
    pub const ALL_ORG_SCOPES: &str = "/api/all-org-scopes";

    pub fn account(id: i32) -> String {
        with_id(ACCOUNT, id)
    }

    pub fn public_member_info(id: i32) -> String {
        with_id(PUBLIC_MEMBER_INFO, id)
    }

    pub fn private_member_info(id: i32) -> String {
        with_id(PRIVATE_MEMBER_INFO, id)
    }

    pub fn member_insight(id: i32) -> String {
        with_id(MEMBER_INSIGHT, id)
    }

    pub fn delete_account(id: i32) -> String {
        with_id(DELETE_ACCOUNT, id)
    }

    pub fn update_account_name(id: i32) -> String {
        with_id(UPDATE_ACCOUNT_NAME, id)
    }

    pub fn update_account_email(id: i32) -> String {
        with_id(UPDATE_ACCOUNT_EMAIL, id)
    }

    pub fn update_account_grant_admin(id: i32) -> String {
        with_id(UPDATE_ACCOUNT_GRANT_ADMIN, id)
    }

    pub fn update_account_remove_admin(id: i32) -> String {
        with_id(UPDATE_ACCOUNT_REMOVE_ADMIN, id)
    }

    pub fn update_account_register_member(id: i32) -> String {
        with_id(UPDATE_ACCOUNT_REGISTER_MEMBER, id)
    }

    pub fn update_account_delete_member(id: i32) -> String {
        with_id(UPDATE_ACCOUNT_DELETE_MEMBER, id)
    }

    pub fn update_member_public(id: i32) -> String {
        with_id(UPDATE_MEMBER_PUBLIC, id)
    }

    pub fn update_member_private(id: i32) -> String {
        with_id(UPDATE_MEMBER_PRIVATE, id)
    }

    pub fn update_member_insight(id: i32) -> String {
        with_id(UPDATE_MEMBER_INSIGHT, id)
    }

    pub fn update_keyword(id: i32) -> String {
        with_id(UPDATE_KEYWORD, id)
    }
}

pub mod page_routes {
    use super::with_id;

    pub const HOME: &str = "/";
    pub const ALL_MEMBERS: &str = "/members";
    pub const MEMBER_PROFILE: &str = "/members/:id";
    pub const PUBLIC_MEMBER_PROFILE: &str = "/members/:id/public";
    pub const PRIVATE_MEMBER_PROFILE: &str = "/members/:id/private";
    pub const MY_PROFILE: &str = "/my-profile";
    pub const ALL_ACCOUNTS: &str = "/accounts";
    pub const PARTNERS: &str = "/partners";
    pub const PRODUCTS: &str = "/products";
    pub const ACCOUNT_PROFILE: &str = "/accounts/:id";
    pub const REGISTER: &str = "/register";
    pub const REGISTER_PARTNER: &str = "/partner/register";
    pub const NOT_FOUND: &str = "/404";

    pub fn member_profile(id: i32) -> String {
        with_id(MEMBER_PROFILE, id)
    }

    pub fn public_member_profile(id: i32) -> String {
        with_id(PUBLIC_MEMBER_PROFILE, id)
    }

    pub fn private_member_profile(id: i32) -> String {
        with_id(PRIVATE_MEMBER_PROFILE, id)
    }

    pub fn account_profile(id: i32) -> String {
        with_id(ACCOUNT_PROFILE, id)
    }
}
