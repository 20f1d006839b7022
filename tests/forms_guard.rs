mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use membership_portal::client::forms::{MemberPrivateForm, MemberPrivateModel};
use membership_portal::client::{
    navigate, FixedChoice, NavigationOutcome, Navigator, NotificationKind, NotificationLog, SaveChangesGuard,
    SaveChoice, ServiceClient, SessionCredentials,
};
use membership_portal::models::MemberPrivateInfo;

use common::{client, spawn, MockApi};

#[derive(Default)]
struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, path: &str) {
        self.visited.lock().unwrap().push(path.to_string());
    }

    fn open_external(&self, url: &str) {
        self.visited.lock().unwrap().push(url.to_string());
    }
}

fn member(is_active: bool) -> MemberPrivateInfo {
    MemberPrivateInfo {
        id: 11,
        address: Some("75 Laurier Ave E".into()),
        city: Some("Ottawa".into()),
        province: Some("ON".into()),
        country: Some("Canada".into()),
        postal_code: None,
        mobile_phone: None,
        date_joined: None,
        is_active,
        last_active: None,
    }
}

struct Fixture {
    mock: MockApi,
    log: NotificationLog,
    guard: SaveChangesGuard,
    form: Arc<MemberPrivateForm>,
    saved: Arc<AtomicUsize>,
}

async fn fixture(is_active: bool) -> Fixture {
    let mock = MockApi::default();
    let base = spawn(mock.clone()).await;
    let log = NotificationLog::new();
    let api: Arc<ServiceClient> = client(&base, SessionCredentials::signed_in("token"), &log);
    let guard = SaveChangesGuard::new();
    let saved = Arc::new(AtomicUsize::new(0));
    let counter = saved.clone();
    let form = MemberPrivateForm::new(MemberPrivateModel, member(is_active), api, guard.clone(), move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    Fixture {
        mock,
        log,
        guard,
        form,
        saved,
    }
}

#[tokio::test]
async fn unchanged_submit_warns_and_sends_nothing() {
    let f = fixture(true).await;
    let _mounted = f.form.mount();

    assert!(f.form.submit().await);

    assert_eq!(f.mock.hits(), 0);
    let last = f.log.last().unwrap();
    assert_eq!(last.kind, NotificationKind::Warning);
    assert_eq!(last.message, "No Changes");
    assert_eq!(f.saved.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn deactivation_is_sent_as_transition() {
    let f = fixture(true).await;
    let _mounted = f.form.mount();
    f.form.change(|d| d.is_active = false);
    assert!(f.guard.is_dirty());

    let nav = RecordingNavigator::default();
    let outcome = navigate(&f.guard, &FixedChoice(SaveChoice::Save), &nav, "/members").await;

    assert_eq!(outcome, NavigationOutcome::Saved);
    assert_eq!(nav.visited(), vec!["/members".to_string()]);
    let bodies = f.mock.private_bodies();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["deactivate"], true);
    assert_eq!(bodies[0]["activate"], false);
    assert!(!f.form.is_dirty());
    assert!(!f.guard.is_dirty());
    assert!(!f.form.record().is_active);
    assert_eq!(f.saved.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_save_keeps_changes_and_stays() {
    let f = fixture(true).await;
    f.mock.set_failing(true);
    let _mounted = f.form.mount();
    f.form.change(|d| d.city = "Gatineau".into());

    let nav = RecordingNavigator::default();
    let outcome = navigate(&f.guard, &FixedChoice(SaveChoice::Save), &nav, "/").await;

    assert_eq!(outcome, NavigationOutcome::SaveFailed);
    assert!(nav.visited().is_empty());
    assert!(f.form.is_dirty());
    assert!(f.guard.is_dirty());
    assert_eq!(f.form.data().city, "Gatineau");
    assert_eq!(f.log.last().unwrap().kind, NotificationKind::Error);
    assert_eq!(f.saved.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn cancel_neither_saves_nor_navigates() {
    let f = fixture(false).await;
    let _mounted = f.form.mount();
    f.form.change(|d| d.is_active = true);

    let nav = RecordingNavigator::default();
    let outcome = navigate(&f.guard, &FixedChoice(SaveChoice::Cancel), &nav, "/").await;

    assert_eq!(outcome, NavigationOutcome::Cancelled);
    assert!(nav.visited().is_empty());
    assert_eq!(f.mock.hits(), 0);
    assert!(f.guard.is_dirty());
}

#[tokio::test]
async fn discard_navigates_without_saving() {
    let f = fixture(true).await;
    let _mounted = f.form.mount();
    f.form.change(|d| d.mobile_phone = "613-555-0199".into());

    let nav = RecordingNavigator::default();
    let outcome = navigate(&f.guard, &FixedChoice(SaveChoice::Discard), &nav, "/accounts").await;

    assert_eq!(outcome, NavigationOutcome::Discarded);
    assert_eq!(nav.visited(), vec!["/accounts".to_string()]);
    assert_eq!(f.mock.hits(), 0);
}

#[tokio::test]
async fn invalid_fields_block_guard_save() {
    let f = fixture(true).await;
    let _mounted = f.form.mount();
    f.form.change(|d| d.mobile_phone = "call me".into());

    let nav = RecordingNavigator::default();
    let outcome = navigate(&f.guard, &FixedChoice(SaveChoice::Save), &nav, "/").await;

    assert_eq!(outcome, NavigationOutcome::SaveFailed);
    assert_eq!(f.mock.hits(), 0);
    assert!(f.form.errors().contains_key("mobile_phone"));
    assert_eq!(f.log.last().unwrap().kind, NotificationKind::Warning);
}

#[tokio::test]
async fn unmounted_form_no_longer_blocks_navigation() {
    let f = fixture(true).await;
    let mounted = f.form.mount();
    f.form.change(|d| d.city = "Gatineau".into());
    drop(mounted);

    let nav = RecordingNavigator::default();
    let outcome = navigate(&f.guard, &FixedChoice(SaveChoice::Cancel), &nav, "/").await;

    assert_eq!(outcome, NavigationOutcome::Proceeded);
    assert_eq!(nav.visited(), vec!["/".to_string()]);
}
