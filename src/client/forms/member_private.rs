use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

use super::{FieldErrors, FormController, FormModel};
use crate::client::language::Language;
use crate::client::services::ServiceClient;
use crate::models::{MemberPrivateInfo, UpdateMemberPrivateParams};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberPrivateData {
    pub address: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub postal_code: String,
    pub mobile_phone: String,
    pub date_joined: Option<NaiveDate>,
    pub is_active: bool,
}

/// The address, contact and activation part of a member profile.
pub struct MemberPrivateModel;

pub type MemberPrivateForm = FormController<MemberPrivateModel>;

/// Update payload. Activation is sent as the transition, never as the raw flag.
pub fn private_params(record: &MemberPrivateInfo, data: &MemberPrivateData) -> UpdateMemberPrivateParams {
    UpdateMemberPrivateParams {
        address: Some(data.address.trim().to_string()),
        city: Some(data.city.trim().to_string()),
        province: Some(data.province.trim().to_string()),
        country: Some(data.country.trim().to_string()),
        postal_code: Some(data.postal_code.trim().to_string()),
        mobile_phone: Some(data.mobile_phone.trim().to_string()),
        date_joined: data
            .date_joined
            .map(|d| Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN))),
        activate: !record.is_active && data.is_active,
        deactivate: record.is_active && !data.is_active,
    }
}

pub fn status_label(is_active: bool, lang: Language) -> &'static str {
    if is_active {
        lang.pick("Status: Active", "Statut : Actif")
    } else {
        lang.pick("Status: Inactive", "Statut : Inactif")
    }
}

/// Shown next to the switch while it is off.
pub fn status_warning(is_active: bool, lang: Language) -> Option<&'static str> {
    (!is_active).then(|| lang.pick("Your public profile will be hidden", "Votre profil public sera caché"))
}

#[async_trait]
impl FormModel for MemberPrivateModel {
    type Record = MemberPrivateInfo;
    type Data = MemberPrivateData;

    fn initial_data(record: &MemberPrivateInfo) -> MemberPrivateData {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        MemberPrivateData {
            address: text(&record.address),
            city: text(&record.city),
            province: text(&record.province),
            country: text(&record.country),
            postal_code: text(&record.postal_code),
            mobile_phone: text(&record.mobile_phone),
            date_joined: record.date_joined.map(|d| d.date_naive()),
            is_active: record.is_active,
        }
    }

    fn validate(data: &MemberPrivateData, lang: Language) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(date) = data.date_joined {
            if date > Utc::now().date_naive() {
                errors.insert(
                    "date_joined",
                    lang.pick("Date cannot be in the future", "La date ne peut pas être dans le futur")
                        .to_string(),
                );
            }
        }
        if data.mobile_phone.chars().any(|c| c.is_alphabetic()) {
            errors.insert(
                "mobile_phone",
                lang.pick("Invalid phone number", "Numéro de téléphone invalide").to_string(),
            );
        }
        errors
    }

    async fn save(
        &self,
        client: &ServiceClient,
        record: &MemberPrivateInfo,
        data: &MemberPrivateData,
    ) -> Option<MemberPrivateInfo> {
        client
            .update_member_private(record.id, &private_params(record, data))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(is_active: bool) -> MemberPrivateInfo {
        MemberPrivateInfo {
            id: 7,
            address: None,
            city: Some("Ottawa".into()),
            province: None,
            country: None,
            postal_code: None,
            mobile_phone: None,
            date_joined: None,
            is_active,
            last_active: None,
        }
    }

    #[rstest]
    #[case(true, true, false, false)]
    #[case(true, false, false, true)]
    #[case(false, true, true, false)]
    #[case(false, false, false, false)]
    fn activation_is_a_transition(
        #[case] was: bool,
        #[case] now: bool,
        #[case] activate: bool,
        #[case] deactivate: bool,
    ) {
        let rec = record(was);
        let mut data = MemberPrivateModel::initial_data(&rec);
        data.is_active = now;
        let params = private_params(&rec, &data);
        assert_eq!((params.activate, params.deactivate), (activate, deactivate));
    }

    #[test]
    fn warning_follows_switch() {
        assert_eq!(status_label(false, Language::Fr), "Statut : Inactif");
        assert_eq!(status_label(true, Language::En), "Status: Active");
        assert!(status_warning(true, Language::En).is_none());
        assert_eq!(status_warning(false, Language::En), Some("Your public profile will be hidden"));
        assert_eq!(status_warning(false, Language::Fr), Some("Votre profil public sera caché"));
    }

    #[test]
    fn date_joined_is_midnight_utc() {
        let rec = record(true);
        let mut data = MemberPrivateModel::initial_data(&rec);
        data.date_joined = NaiveDate::from_ymd_opt(2020, 2, 29);
        let params = private_params(&rec, &data);
        assert_eq!(
            params.date_joined.map(|d| d.to_rfc3339()),
            Some("2020-02-29T00:00:00+00:00".to_string())
        );
    }

    #[test]
    fn rejects_future_join_date() {
        let data = MemberPrivateData {
            date_joined: Some(Utc::now().date_naive() + chrono::Days::new(3)),
            ..Default::default()
        };
        let errors = MemberPrivateModel::validate(&data, Language::En);
        assert!(errors.contains_key("date_joined"));
    }
}
