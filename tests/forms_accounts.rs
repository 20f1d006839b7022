mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use membership_portal::client::forms::{AccountSettingsForm, AccountSettingsModel, MemberPublicForm, MemberPublicModel};
use membership_portal::client::{NotificationKind, NotificationLog, SaveChangesGuard, SessionCredentials};
use membership_portal::models::{Account, Keyword, MemberPublicInfo};
use membership_portal::routing::api_routes as r;
use serde_json::{json, Value};

use common::{client, spawn, MockApi};

fn account_json(member_id: Option<i32>) -> Value {
    json!({
        "id": 2,
        "login_email": "ada@uottawa.ca",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "is_admin": false,
        "member_id": member_id,
        "partner_id": null,
        "last_login": null
    })
}

fn counter() -> (Arc<AtomicUsize>, impl Fn(&Account) + Send + Sync + 'static) {
    let calls = Arc::new(AtomicUsize::new(0));
    let c = calls.clone();
    (calls, move |_: &Account| {
        c.fetch_add(1, Ordering::SeqCst);
    })
}

type AccountFixture = (MockApi, NotificationLog, Arc<AccountSettingsForm>, Arc<AtomicUsize>);

async fn account_form(member_id: Option<i32>) -> AccountFixture {
    let mock = MockApi::default();
    let account = account_json(member_id);
    mock.set_account(account.clone());
    let base = spawn(mock.clone()).await;
    let log = NotificationLog::new();
    let api = client(&base, SessionCredentials::signed_in("token"), &log);
    let record: Account = serde_json::from_value(account).unwrap();
    let (saved, on_success) = counter();
    let form = AccountSettingsForm::new(AccountSettingsModel, record, api, SaveChangesGuard::new(), on_success);
    (mock, log, form, saved)
}

#[tokio::test]
async fn account_save_stops_at_first_failed_call() {
    let (mock, log, form, saved) = account_form(Some(4)).await;
    mock.fail_route(r::UPDATE_ACCOUNT_EMAIL);
    form.change(|d| {
        d.first_name = "Augusta".into();
        d.login_email = "augusta@uottawa.ca".into();
        d.confirm_email = "augusta@uottawa.ca".into();
        d.is_admin = true;
    });

    assert!(!form.submit().await);

    assert_eq!(mock.routes_called(), vec![r::UPDATE_ACCOUNT_NAME, r::UPDATE_ACCOUNT_EMAIL]);
    assert_eq!(
        log.kinds(),
        vec![
            NotificationKind::Loading,
            NotificationKind::Success,
            NotificationKind::Loading,
            NotificationKind::Error,
        ]
    );
    assert!(form.is_dirty());
    assert_eq!(form.record().first_name, "Ada");
    assert_eq!(form.data().first_name, "Augusta");
    assert_eq!(saved.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn admin_grant_and_member_registration_are_two_calls() {
    let (mock, _log, form, saved) = account_form(None).await;
    form.change(|d| {
        d.is_admin = true;
        d.is_member = true;
    });

    assert!(form.submit().await);

    assert_eq!(
        mock.routes_called(),
        vec![r::UPDATE_ACCOUNT_GRANT_ADMIN, r::UPDATE_ACCOUNT_REGISTER_MEMBER]
    );
    let record = form.record();
    assert!(record.is_admin);
    assert_eq!(record.member_id, Some(40));
    assert!(!form.is_dirty());
    assert_eq!(saved.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn email_case_change_is_not_a_change() {
    let (mock, log, form, saved) = account_form(Some(4)).await;
    form.change(|d| {
        d.login_email = "Ada@uottawa.ca".into();
        d.confirm_email = "Ada@uottawa.ca".into();
    });

    assert!(form.submit().await);

    assert_eq!(mock.hits(), 0);
    let last = log.last().unwrap();
    assert_eq!(last.kind, NotificationKind::Warning);
    assert_eq!(last.message, "No Changes");
    assert_eq!(saved.load(Ordering::SeqCst), 0);
}

fn keyword(id: i32, en: &str, fr: &str) -> Keyword {
    Keyword {
        id,
        name_en: en.into(),
        name_fr: fr.into(),
    }
}

fn public_member() -> MemberPublicInfo {
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
        keywords: vec![keyword(1, "Health", "Santé"), keyword(2, "Energy", "Énergie")],
        problems: vec![],
    }
}

async fn public_form() -> (MockApi, NotificationLog, Arc<MemberPublicForm>) {
    let mock = MockApi::default();
    let base = spawn(mock.clone()).await;
    let log = NotificationLog::new();
    let api = client(&base, SessionCredentials::signed_in("token"), &log);
    let form = MemberPublicForm::new(MemberPublicModel, public_member(), api, SaveChangesGuard::new(), |_| {});
    (mock, log, form)
}

#[tokio::test]
async fn public_update_sends_only_the_diff() {
    let (mock, _log, form) = public_form().await;
    form.change(|d| {
        d.about_me = "Compilers ".into();
        d.faculty_id = None;
        d.keyword_ids.remove(&1);
        d.keyword_ids.insert(5);
    });

    assert!(form.submit().await);

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, r::UPDATE_MEMBER_PUBLIC);
    assert_eq!(
        requests[0].1,
        json!({ "faculty_id": null, "add_keywords": [5], "remove_keywords": [1] })
    );
    assert!(!form.is_dirty());
    assert_eq!(form.record().faculty_id, None);
}

#[tokio::test]
async fn whitespace_only_public_edit_warns_no_changes() {
    let (mock, log, form) = public_form().await;
    form.change(|d| d.about_me = "Compilers ".into());
    assert!(form.is_dirty());

    assert!(form.submit().await);

    assert_eq!(mock.hits(), 0);
    assert_eq!(log.last().unwrap().message, "No Changes");
}
