use serde::{Deserialize, Serialize};

use crate::client::language::Language;

/// Bilingual reference row (faculties, member types, organisation types and scopes, keywords).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::FromRow)]
pub struct Lookup {
    pub id: i32,
    pub name_en: String,
    pub name_fr: String,
}

impl Lookup {
    pub fn name(&self, lang: Language) -> &str {
        lang.pick(&self.name_en, &self.name_fr)
    }
}

pub type Faculty = Lookup;
pub type MemberType = Lookup;
pub type OrgType = Lookup;
pub type OrgScope = Lookup;
pub type Keyword = Lookup;

/// A problem a member works on. Ids are owned by the member and replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Problem {
    pub name_en: String,
    pub name_fr: String,
}
