//! Page declarations and the page-level authorization guard.

use crate::models::Account;
use crate::routing::page_routes as p;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Admin,
    /// Signed-in account with a member profile.
    Registered,
    Partner,
    SignedIn,
}

impl Authorization {
    pub fn allows(self, account: &Account) -> bool {
        match self {
            Authorization::Admin => account.is_admin,
            Authorization::Registered => account.is_member(),
            Authorization::Partner => account.is_partner(),
            Authorization::SignedIn => true,
        }
    }
}

/// What the client knows about the signed-in account.
#[derive(Debug, Clone, Copy)]
pub enum AccountState<'a> {
    Loading,
    SignedOut,
    SignedIn(&'a Account),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAccess {
    Render,
    /// Show a placeholder until the account has loaded.
    Loading,
    Redirect(&'static str),
}

/// Renders a page when the account holds any of `auths`. An empty set means public.
#[derive(Debug, Clone, Copy)]
pub struct PageAuthGuard {
    auths: &'static [Authorization],
}

impl PageAuthGuard {
    pub const fn new(auths: &'static [Authorization]) -> Self {
        PageAuthGuard { auths }
    }

    pub const fn public() -> Self {
        PageAuthGuard { auths: &[] }
    }

    pub fn is_public(&self) -> bool {
        self.auths.is_empty()
    }

    pub fn check(&self, state: AccountState<'_>) -> PageAccess {
        if self.is_public() {
            return PageAccess::Render;
        }
        match state {
            AccountState::Loading => PageAccess::Loading,
            AccountState::SignedOut => PageAccess::Redirect(p::HOME),
            AccountState::SignedIn(account) => {
                if self.auths.iter().any(|a| a.allows(account)) {
                    PageAccess::Render
                } else {
                    PageAccess::Redirect(p::HOME)
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub route: &'static str,
    pub guard: PageAuthGuard,
}

pub const HOME: Page = Page { route: p::HOME, guard: PageAuthGuard::public() };
pub const ALL_MEMBERS: Page = Page { route: p::ALL_MEMBERS, guard: PageAuthGuard::public() };
pub const MEMBER_PROFILE: Page = Page { route: p::MEMBER_PROFILE, guard: PageAuthGuard::public() };
pub const PUBLIC_MEMBER_PROFILE: Page = Page {
    route: p::PUBLIC_MEMBER_PROFILE,
    guard: PageAuthGuard::public(),
};
pub const PRIVATE_MEMBER_PROFILE: Page = Page {
    route: p::PRIVATE_MEMBER_PROFILE,
    guard: PageAuthGuard::new(&[Authorization::Admin]),
};
pub const MY_PROFILE: Page = Page {
    route: p::MY_PROFILE,
    guard: PageAuthGuard::new(&[Authorization::Registered]),
};
pub const ALL_ACCOUNTS: Page = Page {
    route: p::ALL_ACCOUNTS,
    guard: PageAuthGuard::new(&[Authorization::Admin]),
};
pub const ACCOUNT_PROFILE: Page = Page {
    route: p::ACCOUNT_PROFILE,
    guard: PageAuthGuard::new(&[Authorization::Admin]),
};
pub const REGISTER: Page = Page {
    route: p::REGISTER,
    guard: PageAuthGuard::new(&[Authorization::Admin]),
};
pub const REGISTER_PARTNER: Page = Page {
    route: p::REGISTER_PARTNER,
    guard: PageAuthGuard::new(&[Authorization::Admin]),
};
pub const PARTNERS: Page = Page { route: p::PARTNERS, guard: PageAuthGuard::public() };
pub const PRODUCTS: Page = Page { route: p::PRODUCTS, guard: PageAuthGuard::public() };

pub const ALL_PAGES: &[Page] = &[
    HOME,
    ALL_MEMBERS,
    MEMBER_PROFILE,
    PUBLIC_MEMBER_PROFILE,
    PRIVATE_MEMBER_PROFILE,
    MY_PROFILE,
    ALL_ACCOUNTS,
    ACCOUNT_PROFILE,
    REGISTER,
    REGISTER_PARTNER,
    PARTNERS,
    PRODUCTS,
];

/// Find the page whose route template matches `path`. `:id` matches one positive integer.
pub fn find_page(path: &str) -> Option<&'static Page> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };
    ALL_PAGES.iter().find(|page| matches_template(page.route, path))
}

fn matches_template(template: &str, path: &str) -> bool {
    let mut t = template.split('/');
    let mut s = path.split('/');
    loop {
        match (t.next(), s.next()) {
            (None, None) => return true,
            (Some(":id"), Some(seg)) => {
                if !matches!(seg.parse::<i32>(), Ok(n) if n > 0) {
                    return false;
                }
            }
            (Some(a), Some(b)) if a == b => {}
            _ => return false,
        }
    }
}
