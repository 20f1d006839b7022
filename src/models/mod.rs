//! Typed views of portal records, shared by the API handlers and the client layer.

mod account;
mod lookup;
mod member;
mod params;

pub use account::{Account, Partner};
pub use lookup::{Faculty, Keyword, Lookup, MemberType, OrgScope, OrgType, Problem};
pub use member::{MemberInsight, MemberPrivateInfo, MemberPublicInfo};
pub use params::*;
