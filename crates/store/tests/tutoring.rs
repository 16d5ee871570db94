//! Tutoring ledger flows against the fake gateway.

mod common;

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use common::FakeGateway;
use store::StoreError;
use store::records::PaymentStatus;
use store::tutoring::{StudentDraft, TutoringLedger};

fn draft(name: &str, hourly_rate_minor: i64) -> StudentDraft {
    StudentDraft {
        name: name.to_string(),
        hourly_rate_minor,
        ..Default::default()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn session_total_derives_from_rate_and_minutes() {
    let gateway = FakeGateway::new();
    let mut ledger = TutoringLedger::new(Uuid::new_v4());

    // 45.00/h for 90 minutes comes to 67.50.
    let student = ledger
        .create_student(&gateway, &draft("Giulia", 4500))
        .await
        .unwrap();
    let session = ledger
        .log_session(
            &gateway,
            student,
            date(2026, 3, 14),
            NaiveTime::from_hms_opt(16, 30, 0).unwrap(),
            90,
            "",
        )
        .await
        .unwrap();

    let logged = ledger.sessions.get(session).unwrap();
    assert_eq!(logged.rate_minor, 4500);
    assert_eq!(logged.total_amount_minor, 6750);
    assert_eq!(logged.payment_status, PaymentStatus::Pending);
}

#[tokio::test]
async fn rate_changes_do_not_rewrite_logged_sessions() {
    let gateway = FakeGateway::new();
    let mut ledger = TutoringLedger::new(Uuid::new_v4());

    let student = ledger
        .create_student(&gateway, &draft("Giulia", 4500))
        .await
        .unwrap();
    let session = ledger
        .log_session(
            &gateway,
            student,
            date(2026, 3, 14),
            NaiveTime::from_hms_opt(16, 30, 0).unwrap(),
            60,
            "",
        )
        .await
        .unwrap();

    ledger
        .update_student(&gateway, student, &draft("Giulia", 6000))
        .await
        .unwrap();
    assert_eq!(ledger.sessions.get(session).unwrap().rate_minor, 4500);
}

#[tokio::test]
async fn marking_paid_clears_the_outstanding_balance() {
    let gateway = FakeGateway::new();
    let mut ledger = TutoringLedger::new(Uuid::new_v4());

    let student = ledger
        .create_student(&gateway, &draft("Marco", 4000))
        .await
        .unwrap();
    let session = ledger
        .log_session(
            &gateway,
            student,
            date(2026, 3, 14),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            60,
            "",
        )
        .await
        .unwrap();
    assert_eq!(ledger.outstanding_minor(student), 4000);

    ledger
        .mark_paid(&gateway, session, date(2026, 3, 20), "cash")
        .await
        .unwrap();
    assert_eq!(ledger.outstanding_minor(student), 0);
    let paid = ledger.sessions.get(session).unwrap();
    assert_eq!(paid.payment_status, PaymentStatus::Paid);
    assert_eq!(paid.payment_method.as_deref(), Some("cash"));

    ledger.mark_pending(&gateway, session).await.unwrap();
    assert_eq!(ledger.outstanding_minor(student), 4000);
}

#[tokio::test]
async fn student_delete_is_refused_while_sessions_remain() {
    let gateway = FakeGateway::new();
    let mut ledger = TutoringLedger::new(Uuid::new_v4());

    let student = ledger
        .create_student(&gateway, &draft("Marco", 4000))
        .await
        .unwrap();
    let session = ledger
        .log_session(
            &gateway,
            student,
            date(2026, 3, 14),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            60,
            "",
        )
        .await
        .unwrap();

    let err = ledger.delete_student(&gateway, student).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::InUse {
            entity: "student",
            dependents: "sessions"
        }
    ));

    ledger.delete_session(&gateway, session).await.unwrap();
    ledger.delete_student(&gateway, student).await.unwrap();
    assert!(ledger.students.is_empty());
}

#[tokio::test]
async fn zero_length_sessions_are_rejected() {
    let gateway = FakeGateway::new();
    let mut ledger = TutoringLedger::new(Uuid::new_v4());
    let student = ledger
        .create_student(&gateway, &draft("Marco", 4000))
        .await
        .unwrap();

    let err = ledger
        .log_session(
            &gateway,
            student,
            date(2026, 3, 14),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            0,
            "",
        )
        .await
        .unwrap_err();
    assert!(err.is_validation());
}
