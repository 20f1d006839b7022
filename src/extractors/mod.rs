pub mod account;

pub use account::{CurrentAccount, MaybeAccount};
