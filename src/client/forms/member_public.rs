use std::collections::BTreeSet;

use async_trait::async_trait;

use super::{optional_email, FieldErrors, FormController, FormModel};
use crate::client::language::Language;
use crate::client::services::ServiceClient;
use crate::models::{MemberPublicInfo, Problem, UpdateMemberPublicParams};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberPublicData {
    pub about_me: String,
    pub work_email: String,
    pub work_phone: String,
    pub website: String,
    pub faculty_id: Option<i32>,
    pub member_type_id: Option<i32>,
    pub keyword_ids: BTreeSet<i32>,
    pub problems: Vec<Problem>,
}

/// The publicly visible part of a member profile.
pub struct MemberPublicModel;

pub type MemberPublicForm = FormController<MemberPublicModel>;

fn changed_text(before: &str, after: &str) -> Option<String> {
    let after = after.trim();
    (before.trim() != after).then(|| after.to_string())
}

fn non_blank(problems: &[Problem]) -> Vec<Problem> {
    problems
        .iter()
        .filter(|p| !p.name_en.trim().is_empty() || !p.name_fr.trim().is_empty())
        .cloned()
        .collect()
}

/// Only what differs from `record`. Keywords go as additions and removals.
pub fn public_params(record: &MemberPublicInfo, data: &MemberPublicData) -> UpdateMemberPublicParams {
    let before = MemberPublicModel::initial_data(record);
    let problems = non_blank(&data.problems);
    UpdateMemberPublicParams {
        about_me: changed_text(&before.about_me, &data.about_me),
        work_email: changed_text(&before.work_email, &data.work_email),
        work_phone: changed_text(&before.work_phone, &data.work_phone),
        website: changed_text(&before.website, &data.website),
        faculty_id: (before.faculty_id != data.faculty_id).then_some(data.faculty_id),
        member_type_id: (before.member_type_id != data.member_type_id).then_some(data.member_type_id),
        add_keywords: data.keyword_ids.difference(&before.keyword_ids).copied().collect(),
        remove_keywords: before.keyword_ids.difference(&data.keyword_ids).copied().collect(),
        problems: (problems != before.problems).then_some(problems),
    }
}

#[async_trait]
impl FormModel for MemberPublicModel {
    type Record = MemberPublicInfo;
    type Data = MemberPublicData;

    fn initial_data(record: &MemberPublicInfo) -> MemberPublicData {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        MemberPublicData {
            about_me: text(&record.about_me),
            work_email: text(&record.work_email),
            work_phone: text(&record.work_phone),
            website: text(&record.website),
            faculty_id: record.faculty_id,
            member_type_id: record.member_type_id,
            keyword_ids: record.keywords.iter().map(|k| k.id).collect(),
            problems: record.problems.clone(),
        }
    }

    fn validate(data: &MemberPublicData, lang: Language) -> FieldErrors {
        let mut errors = FieldErrors::new();
        optional_email(&mut errors, "work_email", &data.work_email, lang);
        if data.website.trim().contains(char::is_whitespace) {
            errors.insert("website", lang.pick("Invalid website", "Site web invalide").to_string());
        }
        errors
    }

    fn has_changes(record: &MemberPublicInfo, data: &MemberPublicData) -> bool {
        !public_params(record, data).is_empty()
    }

    async fn save(
        &self,
        client: &ServiceClient,
        record: &MemberPublicInfo,
        data: &MemberPublicData,
    ) -> Option<MemberPublicInfo> {
        client.update_member_public(record.id, &public_params(record, data)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Keyword;

    fn keyword(id: i32) -> Keyword {
        Keyword {
            id,
            name_en: format!("k{}", id),
            name_fr: format!("m{}", id),
        }
    }

    fn record() -> MemberPublicInfo {
        MemberPublicInfo {
            id: 3,
            account_id: Some(8),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            about_me: Some("Compilers".into()),
            work_email: None,
            work_phone: None,
            website: None,
            faculty_id: Some(2),
            member_type_id: None,
            is_active: true,
            keywords: vec![keyword(1), keyword(2)],
            problems: vec![],
        }
    }

    #[test]
    fn unchanged_form_yields_empty_payload() {
        let rec = record();
        let data = MemberPublicModel::initial_data(&rec);
        assert!(public_params(&rec, &data).is_empty());
    }

    #[test]
    fn only_changed_fields_are_sent() {
        let rec = record();
        let mut data = MemberPublicModel::initial_data(&rec);
        data.website = " example.org ".into();
        data.faculty_id = None;
        data.keyword_ids.remove(&1);
        data.keyword_ids.insert(5);
        let params = public_params(&rec, &data);
        assert_eq!(params.website.as_deref(), Some("example.org"));
        assert_eq!(params.faculty_id, Some(None));
        assert_eq!(params.about_me, None);
        assert_eq!(params.member_type_id, None);
        assert_eq!(params.add_keywords, vec![5]);
        assert_eq!(params.remove_keywords, vec![1]);
        assert_eq!(params.problems, None);
    }

    #[test]
    fn blank_problems_are_dropped() {
        let rec = record();
        let mut data = MemberPublicModel::initial_data(&rec);
        data.problems = vec![
            Problem { name_en: "Water".into(), name_fr: "Eau".into() },
            Problem { name_en: " ".into(), name_fr: String::new() },
        ];
        let params = public_params(&rec, &data);
        assert_eq!(params.problems.map(|p| p.len()), Some(1));
    }

    #[test]
    fn whitespace_only_edit_is_not_a_change() {
        let rec = record();
        let mut data = MemberPublicModel::initial_data(&rec);
        data.about_me = "Compilers  ".into();
        assert!(public_params(&rec, &data).about_me.is_none());
        assert!(!MemberPublicModel::has_changes(&rec, &data));
        data.keyword_ids.insert(9);
        assert!(MemberPublicModel::has_changes(&rec, &data));
    }
}
