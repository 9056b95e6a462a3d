use axum::http::StatusCode;
use axum::response::IntoResponse;
use rstest::rstest;
use workshop_api::config::parse_log_level;
use workshop_api::middleware::auth::{hash_password, verify_password, AdminGate};
use workshop_api::middleware::error_handling::AppError;
use workshop_core::{errors::BookingError, schedule::Slot};

#[rstest]
#[case(BookingError::Validation("bad".to_string()), StatusCode::BAD_REQUEST)]
#[case(BookingError::Conflict { hour: Slot::at(11) }, StatusCode::CONFLICT)]
#[case(BookingError::NotFound("gone".to_string()), StatusCode::NOT_FOUND)]
#[case(BookingError::Authentication("nope".to_string()), StatusCode::UNAUTHORIZED)]
#[case(BookingError::StoreUnavailable(eyre::eyre!("down")), StatusCode::SERVICE_UNAVAILABLE)]
#[case(BookingError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    assert_eq!(AppError(error).into_response().status(), expected);
}

#[test]
fn test_eyre_reports_map_to_service_unavailable() {
    let error: AppError = eyre::eyre!("pool timed out").into();
    assert_eq!(error.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[test]
fn test_password_hash_verifies() {
    let hash = hash_password("kiln").unwrap();

    assert_ne!(hash, "kiln");
    assert!(verify_password("kiln", &hash).unwrap());
    assert!(!verify_password("glaze", &hash).unwrap());
}

#[test]
fn test_hashes_are_salted() {
    assert_ne!(hash_password("kiln").unwrap(), hash_password("kiln").unwrap());
}

#[tokio::test]
async fn test_admin_gate() {
    let gate = AdminGate::new("kiln").unwrap();

    assert!(gate.verify("kiln").await);
    assert!(!gate.verify("Kiln").await);
    assert!(!gate.verify("").await);
}

#[tokio::test(flavor = "current_thread")]
async fn test_admin_gate_check_leaves_runtime_free() {
    let gate = AdminGate::new("kiln").unwrap();
    let check = gate.verify("kiln");
    tokio::pin!(check);

    // Other tasks keep running on the single runtime thread while the hash is checked
    let mut ticks = 0;
    loop {
        tokio::select! {
            biased;
            valid = &mut check => {
                assert!(valid);
                break;
            }
            _ = tokio::task::yield_now() => ticks += 1,
        }
    }

    assert!(ticks > 0);
}

#[test]
fn test_garbage_hash_is_an_error() {
    assert!(verify_password("kiln", "not-a-phc-string").is_err());
}

#[rstest]
#[case("debug", tracing::Level::DEBUG)]
#[case("WARN", tracing::Level::WARN)]
#[case("verbose", tracing::Level::INFO)]
fn test_log_level_parsing(#[case] raw: &str, #[case] expected: tracing::Level) {
    assert_eq!(parse_log_level(raw), expected);
}
