//! Tests for error types

use std::error::Error as _;

use cue_sweep::Error;

#[test]
fn test_data_access_error() {
    let error = Error::DataAccess("log.csv unreadable".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Data access error"));
    assert!(error_str.contains("log.csv unreadable"));
    assert!(error.is_data_access());
}

#[test]
fn test_missing_columns_error() {
    let error = Error::MissingColumns {
        missing: vec!["init_cost".to_string(), "update_cost".to_string()],
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("missing required columns: init_cost, update_cost"));
    assert!(error.is_data_access());
}

#[test]
fn test_simulation_error_keeps_source() {
    let error = Error::Simulation {
        tuple: "(1.5, 0.03, true, 0.5)".to_string(),
        source: "session 4 diverged".into(),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("Simulation failed for (1.5, 0.03, true, 0.5)"));
    assert_eq!(error.source().unwrap().to_string(), "session 4 diverged");
    assert!(!error.is_data_access());
}

#[test]
fn test_invalid_domain_error() {
    let error = Error::InvalidDomain {
        axis: "update_cost".to_string(),
        reason: "domain has no values".to_string(),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("Invalid domain 'update_cost'"));
    assert!(error_str.contains("no values"));
}

#[test]
fn test_config_error() {
    let error = Error::Config("n_session must be at least 1".to_string());
    assert!(format!("{error}").contains("Configuration error"));
}

#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error: Error = io_error.into();
    let error_str = format!("{error}");
    assert!(error_str.contains("IO error"));
    assert!(error_str.contains("file not found"));
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: Error = json_error.into();
    assert!(format!("{error}").contains("JSON error"));
}

#[test]
fn test_error_debug_format() {
    let error = Error::DataAccess("debug test".to_string());
    let debug_str = format!("{error:?}");
    assert!(debug_str.contains("DataAccess"));
}
