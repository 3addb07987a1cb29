//! OCSF (Open Cybersecurity Schema Framework) structured event logging.
//!
//! Events are emitted via `tracing::info!` on the `ocsf` target as JSON.
//! Never panics; serialization failures are dropped.

use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};

// OCSF event class UIDs
pub const CLASS_AUTHENTICATION: u32 = 3001;

// Activity IDs
pub const ACTIVITY_LOGON: u32 = 1;
pub const ACTIVITY_LOGOFF: u32 = 2;
pub const ACTIVITY_OTHER: u32 = 99; // Access decisions

// Status IDs
pub const STATUS_SUCCESS: u32 = 1;
pub const STATUS_FAILURE: u32 = 2;

// Severity IDs
pub const SEVERITY_INFORMATIONAL: u32 = 1;
pub const SEVERITY_LOW: u32 = 2;
pub const SEVERITY_MEDIUM: u32 = 3;
pub const SEVERITY_HIGH: u32 = 4;

// Auth protocol IDs
pub const AUTH_PROTOCOL_UNKNOWN: u32 = 0;
pub const AUTH_PROTOCOL_PASSWORD: u32 = 2;

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn severity_name(id: u32) -> &'static str {
    match id {
        SEVERITY_INFORMATIONAL => "Informational",
        SEVERITY_LOW => "Low",
        SEVERITY_MEDIUM => "Medium",
        SEVERITY_HIGH => "High",
        5 => "Critical",
        _ => "Unknown",
    }
}

fn status_name(id: u32) -> &'static str {
    match id {
        STATUS_SUCCESS => "Success",
        _ => "Failure",
    }
}

fn product() -> serde_json::Value {
    json!({
        "name": "contest-auth",
        "version": env!("CARGO_PKG_VERSION"),
        "vendor_name": "Contest Platform"
    })
}

fn actor(email: &str) -> serde_json::Value {
    json!({
        "user": {
            "email_addr": email,
            "type_id": 1,
            "type": "User"
        }
    })
}

fn emit(event: &serde_json::Value) {
    if let Ok(json) = serde_json::to_string(event) {
        tracing::info!(target: "ocsf", "{}", json);
    }
}

/// Build an OCSF Authentication (3001) event.
#[allow(clippy::too_many_arguments)]
pub fn authentication_record(
    activity_id: u32,
    activity_name: &str,
    status_id: u32,
    severity_id: u32,
    user_email: Option<&str>,
    auth_protocol_id: u32,
    auth_protocol: &str,
    message: &str,
) -> serde_json::Value {
    let mut event = json!({
        "class_uid": CLASS_AUTHENTICATION,
        "class_name": "Authentication",
        "activity_id": activity_id,
        "activity_name": activity_name,
        "severity_id": severity_id,
        "severity": severity_name(severity_id),
        "status_id": status_id,
        "status": status_name(status_id),
        "time": now_millis(),
        "metadata": { "product": product() },
        "auth_protocol_id": auth_protocol_id,
        "auth_protocol": auth_protocol,
        "message": message,
    });

    if let Some(email) = user_email {
        event["actor"] = actor(email);
    }
    event
}

/// Emit an OCSF Authentication (3001) event.
#[allow(clippy::too_many_arguments)]
pub fn authentication_event(
    activity_id: u32,
    activity_name: &str,
    status_id: u32,
    severity_id: u32,
    user_email: Option<&str>,
    auth_protocol_id: u32,
    auth_protocol: &str,
    message: &str,
) {
    emit(&authentication_record(
        activity_id,
        activity_name,
        status_id,
        severity_id,
        user_email,
        auth_protocol_id,
        auth_protocol,
        message,
    ));
}

/// Build an access-decision event (class 3001, activity 99/Other).
///
/// `enforcer` names the layer that decided (`route_guard`, `role_guard`).
pub fn access_record(
    enforcer: &str,
    path: &str,
    decision: &str,
    reason: &str,
    user_email: Option<&str>,
) -> serde_json::Value {
    let allowed = decision == "permit";
    let status_id = if allowed { STATUS_SUCCESS } else { STATUS_FAILURE };
    let severity_id = if allowed {
        SEVERITY_INFORMATIONAL
    } else {
        SEVERITY_MEDIUM
    };

    let mut event = json!({
        "class_uid": CLASS_AUTHENTICATION,
        "class_name": "Authentication",
        "activity_id": ACTIVITY_OTHER,
        "activity_name": "Other",
        "severity_id": severity_id,
        "severity": severity_name(severity_id),
        "status_id": status_id,
        "status": status_name(status_id),
        "time": now_millis(),
        "metadata": {
            "product": product(),
            "authorization": {
                "enforcer": enforcer,
                "path": path,
                "decision": decision,
                "reason": reason,
            }
        },
        "message": format!("Access {} for {}", decision, path),
    });

    if let Some(email) = user_email {
        event["actor"] = actor(email);
    }
    event
}

pub fn access_event(
    enforcer: &str,
    path: &str,
    decision: &str,
    reason: &str,
    user_email: Option<&str>,
) {
    emit(&access_record(enforcer, path, decision, reason, user_email));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_record_with_actor() {
        let event = authentication_record(
            ACTIVITY_LOGON,
            "Logon",
            STATUS_SUCCESS,
            SEVERITY_INFORMATIONAL,
            Some("v@example.com"),
            AUTH_PROTOCOL_PASSWORD,
            "Password",
            "Signed in",
        );
        assert_eq!(event["class_uid"], 3001);
        assert_eq!(event["status"], "Success");
        assert_eq!(event["severity"], "Informational");
        assert_eq!(event["actor"]["user"]["email_addr"], "v@example.com");
        assert_eq!(event["metadata"]["product"]["name"], "contest-auth");
    }

    #[test]
    fn test_authentication_record_without_actor() {
        let event = authentication_record(
            ACTIVITY_LOGON,
            "Logon",
            STATUS_FAILURE,
            SEVERITY_HIGH,
            None,
            AUTH_PROTOCOL_UNKNOWN,
            "Unknown",
            "Bad password",
        );
        assert_eq!(event["status"], "Failure");
        assert_eq!(event["severity"], "High");
        assert!(event.get("actor").is_none());
    }

    #[test]
    fn test_access_record_deny() {
        let event = access_record("route_guard", "/admin", "deny", "role voter", Some("v@x.io"));
        assert_eq!(event["activity_id"], ACTIVITY_OTHER);
        assert_eq!(event["status_id"], STATUS_FAILURE);
        assert_eq!(event["severity_id"], SEVERITY_MEDIUM);
        assert_eq!(event["metadata"]["authorization"]["path"], "/admin");
        assert_eq!(event["metadata"]["authorization"]["enforcer"], "route_guard");
        assert_eq!(event["message"], "Access deny for /admin");
    }

    #[test]
    fn test_severity_names() {
        assert_eq!(severity_name(SEVERITY_LOW), "Low");
        assert_eq!(severity_name(5), "Critical");
        assert_eq!(severity_name(42), "Unknown");
    }
}
