// C ABI for a host process (the upload server) that keeps the HTTP side.
// Every call is self-contained; panics are caught before the boundary.
use crate::config::GraderConfig;
use crate::persistence::parse_expected;
use crate::recognizer::RecognizerMode;
use crate::GradingEngine;
use std::ffi::{c_char, CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;

const MISSING_DATA_JSON: &str = r#"{"error":"Données manquantes"}"#;
const UNKNOWN_MODE_MESSAGE: &str = "Mode inconnu";
const SERVER_ERROR_JSON: &str = r#"{"error":"Erreur serveur"}"#;

unsafe fn read_str<'a>(s: *const c_char) -> &'a str {
    if s.is_null() {
        return "";
    }
    CStr::from_ptr(s).to_str().unwrap_or("")
}

fn grade_json(expected_json: &str, payload: &str, mode: &str) -> String {
    let expected = match parse_expected(expected_json) {
        Ok(list) => list,
        Err(e) => {
            tracing::debug!(error = %e, "rejecting expected list");
            return MISSING_DATA_JSON.to_string();
        }
    };
    let mode = match mode.parse::<RecognizerMode>() {
        Ok(mode) => mode,
        Err(e) => {
            tracing::warn!(error = %e, "rejecting recognizer mode");
            return serde_json::json!({ "error": UNKNOWN_MODE_MESSAGE, "mode": mode }).to_string();
        }
    };
    let engine = GradingEngine::new(GraderConfig::default().with_env_overrides());
    let report = engine.reconcile_raw(&expected, mode, payload);
    serde_json::to_string(&report).unwrap_or_else(|_| SERVER_ERROR_JSON.to_string())
}

/// Returns the `{ "items": [...] }` report as a string owned by Rust.
/// Release it with `harakat_free_string`.
///
/// # Safety
/// Each pointer must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn harakat_grade_json(
    expected_json: *const c_char,
    payload: *const c_char,
    mode: *const c_char,
) -> *mut c_char {
    let expected_json = read_str(expected_json);
    let payload = read_str(payload);
    let mode = read_str(mode);

    let json = catch_unwind(AssertUnwindSafe(|| grade_json(expected_json, payload, mode)))
        .unwrap_or_else(|_| {
            tracing::error!("panic in harakat_grade_json");
            SERVER_ERROR_JSON.to_string()
        });
    CString::new(json).map_or(ptr::null_mut(), CString::into_raw)
}

/// # Safety
/// `s` must be null or a pointer returned by `harakat_grade_json`.
#[no_mangle]
pub unsafe extern "C" fn harakat_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
