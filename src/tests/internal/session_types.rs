use crate::internal::session::structs::download_session::percentage_of;
use crate::session::{
    DownloadError, DownloadSession, DownloadStatus, SessionConfig, SinkError, TransportError,
};

use DownloadStatus::*;

#[test]
fn idle_session_serializes_in_camel_case() {
    let json = serde_json::to_value(DownloadSession::idle()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "status": "idle",
            "bytesDownloaded": 0,
            "totalBytes": 0,
            "percentage": 0
        })
    );
}

#[test]
fn failed_session_serializes_error_and_start_time() {
    let mut session = DownloadSession::preparing(chrono::Utc::now());
    session.status = Error;
    session.error = Some("Download failed".to_string());

    let json = serde_json::to_value(&session).unwrap();
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"], "Download failed");
    assert!(json["startTime"].is_string());
}

#[test]
fn config_fills_missing_fields_with_defaults() {
    let config: SessionConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, SessionConfig::default());
    assert_eq!(config.content_type, "application/pdf");
    assert_eq!(config.idle_timeout(), None);

    let config: SessionConfig = serde_json::from_str(r#"{"idle_timeout_ms": 30000}"#).unwrap();
    assert_eq!(config.content_type, "application/pdf");
    assert_eq!(config.idle_timeout(), Some(std::time::Duration::from_secs(30)));
}

#[test]
fn status_transitions_only_move_forward() {
    assert!(Idle.can_advance_to(Preparing));
    assert!(Preparing.can_advance_to(Downloading));
    assert!(Preparing.can_advance_to(Cancelled));
    assert!(Preparing.can_advance_to(Error));
    assert!(Downloading.can_advance_to(Downloading));
    assert!(Downloading.can_advance_to(Complete));

    assert!(!Idle.can_advance_to(Downloading));
    assert!(!Preparing.can_advance_to(Complete));
    assert!(!Downloading.can_advance_to(Preparing));
    for terminal in [Complete, Error, Cancelled] {
        assert!(terminal.is_terminal());
        for next in [Idle, Preparing, Downloading, Complete, Error, Cancelled] {
            assert!(!terminal.can_advance_to(next), "{terminal} -> {next}");
        }
    }
}

#[test]
fn active_statuses_are_cancellable() {
    assert!(Preparing.is_active());
    assert!(Downloading.is_active());
    assert!(!Idle.is_active());
    assert!(!Idle.is_terminal());
}

#[test]
fn percentage_rounds_and_caps() {
    assert_eq!(percentage_of(0, 0), 0);
    assert_eq!(percentage_of(500, 0), 0);
    assert_eq!(percentage_of(1, 3), 33);
    assert_eq!(percentage_of(2, 3), 67);
    assert_eq!(percentage_of(1000, 1000), 100);
    assert_eq!(percentage_of(1500, 1000), 100);
}

#[test]
fn record_chunk_accumulates() {
    let mut session = DownloadSession::preparing(chrono::Utc::now());
    session.status = Downloading;
    session.total_bytes = 400;

    session.record_chunk(100);
    session.record_chunk(100);

    assert_eq!(session.bytes_downloaded, 200);
    assert_eq!(session.percentage, 50);
    assert!(!session.is_indeterminate());
}

#[test]
fn error_messages_are_user_facing() {
    let status = DownloadError::HttpStatus {
        status: 404,
        reason: Some("Not Found".to_string()),
    };
    assert_eq!(status.session_message(), "Download failed with status 404 Not Found");

    let bare = DownloadError::HttpStatus {
        status: 599,
        reason: None,
    };
    assert_eq!(bare.session_message(), "Download failed with status 599");

    let empty = DownloadError::Transport(TransportError::Other(String::new()));
    assert_eq!(empty.session_message(), "Download failed");

    let save = DownloadError::from(SinkError::NoDirectory);
    assert_eq!(save.session_message(), "No download directory available");

    assert!(DownloadError::Cancelled.is_cancelled());
    assert!(!DownloadError::MissingBody.is_cancelled());
}
