//! Read-only descriptions of member records.

use chrono::{DateTime, Utc};

use super::language::Language;
use crate::models::{Lookup, MemberPrivateInfo, MemberPublicInfo};

/// Label and value pairs, in display order.
pub type Description = Vec<(&'static str, String)>;

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Non-blank address parts joined with ", ".
pub fn address_line(info: &MemberPrivateInfo) -> String {
    [&info.address, &info.city, &info.province, &info.country, &info.postal_code]
        .into_iter()
        .filter_map(|part| part.as_deref().map(str::trim).filter(|s| !s.is_empty()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn active_status(info: &MemberPrivateInfo, lang: Language) -> String {
    if info.is_active {
        return lang.pick("Yes", "Oui").to_string();
    }
    let no = lang.pick("No", "Non");
    match &info.last_active {
        Some(date) => format!("{}, {}: {}", no, lang.pick("Last Active", "Dernière activité"), format_date(date)),
        None => no.to_string(),
    }
}

/// `tel:` link target for a phone number, keeping only digits and a leading `+`.
pub fn phone_href(phone: &str) -> String {
    let phone = phone.trim();
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if phone.starts_with('+') {
        format!("tel:+{}", digits)
    } else {
        format!("tel:{}", digits)
    }
}

pub fn private_description(info: &MemberPrivateInfo, lang: Language) -> Description {
    vec![
        (lang.pick("Address", "Adresse"), address_line(info)),
        (lang.pick("Active Member", "Membre actif"), active_status(info, lang)),
        (
            lang.pick("Date Joined", "Date d'adhésion"),
            info.date_joined.as_ref().map(format_date).unwrap_or_default(),
        ),
        (
            lang.pick("Mobile Phone", "Téléphone mobile"),
            info.mobile_phone.clone().unwrap_or_default(),
        ),
    ]
}

fn lookup_name(options: &[Lookup], id: Option<i32>, lang: Language) -> String {
    id.and_then(|id| options.iter().find(|o| o.id == id))
        .map(|o| o.name(lang).to_string())
        .unwrap_or_default()
}

pub fn public_description(
    info: &MemberPublicInfo,
    faculties: &[Lookup],
    member_types: &[Lookup],
    lang: Language,
) -> Description {
    let keywords = info
        .keywords
        .iter()
        .map(|k| k.name(lang))
        .collect::<Vec<_>>()
        .join(", ");
    vec![
        (lang.pick("Name", "Nom"), format!("{} {}", info.first_name, info.last_name)),
        (lang.pick("Faculty", "Faculté"), lookup_name(faculties, info.faculty_id, lang)),
        (
            lang.pick("Member Type", "Type de membre"),
            lookup_name(member_types, info.member_type_id, lang),
        ),
        (lang.pick("About Me", "À propos de moi"), info.about_me.clone().unwrap_or_default()),
        (lang.pick("Email", "Courriel"), info.work_email.clone().unwrap_or_default()),
        (lang.pick("Telephone", "Téléphone"), info.work_phone.clone().unwrap_or_default()),
        (lang.pick("Website", "Site web"), info.website.clone().unwrap_or_default()),
        (lang.pick("Keywords", "Mots clés"), keywords),
    ]
}
