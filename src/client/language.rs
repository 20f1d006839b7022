//! Display language, shared by forms, notifications and display helpers.

use std::sync::{Arc, RwLock};

/// Supported languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "en" | "en-ca" | "en-us" | "en-gb" => Some(Language::En),
            "fr" | "fr-ca" | "fr-fr" => Some(Language::Fr),
            _ => None,
        }
    }

    /// Choose the English or French variant.
    pub fn pick<'a, T: ?Sized>(self, en: &'a T, fr: &'a T) -> &'a T {
        match self {
            Language::En => en,
            Language::Fr => fr,
        }
    }

    pub fn is_en(self) -> bool {
        self == Language::En
    }
}

/// Current language for one render tree. Clones share the same setting.
#[derive(Clone, Debug, Default)]
pub struct LanguageCtx {
    current: Arc<RwLock<Language>>,
}

impl LanguageCtx {
    pub fn new(lang: Language) -> Self {
        LanguageCtx {
            current: Arc::new(RwLock::new(lang)),
        }
    }

    pub fn get(&self) -> Language {
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set(&self, lang: Language) {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = lang;
    }

    /// Switch between English and French. Returns the new language.
    pub fn toggle(&self) -> Language {
        let next = match self.get() {
            Language::En => Language::Fr,
            Language::Fr => Language::En,
        };
        self.set(next);
        next
    }
}
