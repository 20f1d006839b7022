//! Unsaved-changes guard.
//!
//! One guard is shared by everything that can navigate. The form that is currently mounted
//! registers its submit handler and reports whether it is dirty; all navigation asks the
//! guard first via [`SaveChangesGuard::save_changes_prompt`].

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

/// Saves the registered form. Returns true only when the save went through.
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    async fn save_changes(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    Save,
    Discard,
    Cancel,
}

/// Asks the user what to do with unsaved changes.
#[async_trait]
pub trait ChoicePrompt: Send + Sync {
    async fn choose(&self) -> SaveChoice;
}

/// What happened to a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Nothing to save; continued immediately.
    Proceeded,
    Saved,
    SaveFailed,
    Discarded,
    Cancelled,
}

impl NavigationOutcome {
    pub fn continued(self) -> bool {
        matches!(
            self,
            NavigationOutcome::Proceeded | NavigationOutcome::Saved | NavigationOutcome::Discarded
        )
    }
}

#[derive(Default)]
struct GuardState {
    dirty: bool,
    submit: Option<Arc<dyn SubmitHandler>>,
    generation: u64,
}

#[derive(Clone, Default)]
pub struct SaveChangesGuard {
    inner: Arc<Mutex<GuardState>>,
}

impl SaveChangesGuard {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut GuardState) -> R) -> R {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut state)
    }

    /// Make `handler` the active form. Dropping the registration clears it again,
    /// unless another form has registered since.
    pub fn register(&self, handler: Arc<dyn SubmitHandler>) -> FormRegistration {
        let generation = self.with_state(|s| {
            s.generation += 1;
            s.dirty = false;
            s.submit = Some(handler);
            s.generation
        });
        FormRegistration {
            guard: self.clone(),
            generation,
        }
    }

    pub fn set_dirty(&self, dirty: bool) {
        self.with_state(|s| s.dirty = dirty);
    }

    /// Dirty only counts while a form is registered.
    pub fn is_dirty(&self) -> bool {
        self.with_state(|s| s.dirty && s.submit.is_some())
    }

    pub fn has_form(&self) -> bool {
        self.with_state(|s| s.submit.is_some())
    }

    /// Run `on_continue` now if nothing is unsaved. Otherwise ask: save (continue only if
    /// the save succeeds), discard (continue without saving) or cancel (stay).
    pub async fn save_changes_prompt<P, F>(&self, prompt: &P, on_continue: F) -> NavigationOutcome
    where
        P: ChoicePrompt + ?Sized,
        F: FnOnce(),
    {
        let submit = self.with_state(|s| match (&s.submit, s.dirty) {
            (Some(handler), true) => Some(Arc::clone(handler)),
            _ => None,
        });
        let Some(submit) = submit else {
            on_continue();
            return NavigationOutcome::Proceeded;
        };

        match prompt.choose().await {
            SaveChoice::Save => {
                if submit.save_changes().await {
                    on_continue();
                    NavigationOutcome::Saved
                } else {
                    NavigationOutcome::SaveFailed
                }
            }
            SaveChoice::Discard => {
                self.set_dirty(false);
                on_continue();
                NavigationOutcome::Discarded
            }
            SaveChoice::Cancel => NavigationOutcome::Cancelled,
        }
    }

    fn release(&self, generation: u64) {
        self.with_state(|s| {
            if s.generation == generation {
                s.submit = None;
                s.dirty = false;
            }
        });
    }
}

/// Keeps a form registered with the guard while alive.
pub struct FormRegistration {
    guard: SaveChangesGuard,
    generation: u64,
}

impl Drop for FormRegistration {
    fn drop(&mut self) {
        self.guard.release(self.generation);
    }
}

/// Always gives the same answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedChoice(pub SaveChoice);

#[async_trait]
impl ChoicePrompt for FixedChoice {
    async fn choose(&self) -> SaveChoice {
        self.0
    }
}
