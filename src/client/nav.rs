//! Navigation that always goes through the unsaved-changes guard.

use super::guard::{ChoicePrompt, NavigationOutcome, SaveChangesGuard};

/// Performs the actual route change.
pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);
    fn open_external(&self, url: &str);
}

/// Navigate to an in-app path once the guard allows it.
pub async fn navigate<P: ChoicePrompt + ?Sized>(
    guard: &SaveChangesGuard,
    prompt: &P,
    navigator: &dyn Navigator,
    path: &str,
) -> NavigationOutcome {
    guard.save_changes_prompt(prompt, || navigator.push(path)).await
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafeLink {
    Internal(String),
    External(String),
}

impl SafeLink {
    pub fn internal(path: impl Into<String>) -> Self {
        SafeLink::Internal(path.into())
    }

    pub fn external(url: impl Into<String>) -> Self {
        SafeLink::External(url.into())
    }

    /// Target as rendered. External links without a scheme get `https://`.
    pub fn href(&self) -> String {
        match self {
            SafeLink::Internal(path) => path.clone(),
            SafeLink::External(url) => with_protocol(url),
        }
    }

    pub async fn follow<P: ChoicePrompt + ?Sized>(
        &self,
        guard: &SaveChangesGuard,
        prompt: &P,
        navigator: &dyn Navigator,
    ) -> NavigationOutcome {
        let href = self.href();
        match self {
            SafeLink::Internal(_) => guard.save_changes_prompt(prompt, || navigator.push(&href)).await,
            SafeLink::External(_) => {
                guard
                    .save_changes_prompt(prompt, || navigator.open_external(&href))
                    .await
            }
        }
    }
}

fn with_protocol(url: &str) -> String {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("mailto:") {
        url.to_string()
    } else {
        format!("https://{}", url.trim_start_matches('/'))
    }
}
