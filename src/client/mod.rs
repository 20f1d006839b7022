//! Client side of the portal: API service calls with notifications, the unsaved-changes
//! guard, guarded navigation, edit forms and page authorization.

pub mod credentials;
pub mod display;
pub mod forms;
pub mod guard;
pub mod language;
pub mod nav;
pub mod notify;
pub mod pages;
pub mod services;

pub use credentials::{CredentialProvider, SessionCredentials};
pub use guard::{ChoicePrompt, FixedChoice, FormRegistration, NavigationOutcome, SaveChangesGuard, SaveChoice, SubmitHandler};
pub use language::{Language, LanguageCtx};
pub use nav::{navigate, Navigator, SafeLink};
pub use notify::{Notification, NotificationKind, NotificationLog, Notifier, TracingNotifier};
pub use pages::{AccountState, Authorization, Page, PageAccess, PageAuthGuard};
pub use services::{ClientError, ServiceClient};
