//! Data access for the portal tables. One public function per route-level operation.

mod accounts;
mod lookups;
mod members;
pub mod validation;

pub use accounts::AccountService;
pub use lookups::{LookupService, LookupTable};
pub use members::MemberService;
pub use validation::RequestValidator;
