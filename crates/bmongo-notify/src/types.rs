use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    /// Error toasts linger a beat longer than success toasts.
    pub fn display_duration(self) -> chrono::Duration {
        match self {
            ToastKind::Success => chrono::Duration::seconds(3),
            ToastKind::Error => chrono::Duration::seconds(4),
        }
    }
}

/// A transient, dismissible notification. Purely UI state: no retry
/// semantics, no effect on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub shown_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            kind,
            message: message.into(),
            shown_at: now,
            expires_at: now + kind.display_duration(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::{Toast, ToastKind};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn toast_kinds_serialize_in_snake_case() {
        assert_eq!(
            serde_json::to_string(&ToastKind::Success).expect("serialize"),
            "\"success\""
        );
        assert_eq!(
            serde_json::to_string(&ToastKind::Error).expect("serialize"),
            "\"error\""
        );
    }

    #[test]
    fn success_expires_after_three_seconds_error_after_four() {
        let now = Utc
            .with_ymd_and_hms(2026, 8, 7, 12, 0, 0)
            .single()
            .expect("valid timestamp");

        let success = Toast::new(ToastKind::Success, "ok", now);
        assert!(!success.is_expired(now + Duration::milliseconds(2999)));
        assert!(success.is_expired(now + Duration::seconds(3)));

        let error = Toast::new(ToastKind::Error, "falhou", now);
        assert!(!error.is_expired(now + Duration::milliseconds(3999)));
        assert!(error.is_expired(now + Duration::seconds(4)));
    }
}
