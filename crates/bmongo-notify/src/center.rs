use chrono::{DateTime, Utc};

use crate::types::{Toast, ToastKind};

/// Holds the currently visible toasts. The UI calls `purge_expired` each
/// tick; everything else is append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastCenter {
    toasts: Vec<Toast>,
}

impl ToastCenter {
    pub fn push_success(&mut self, message: impl Into<String>, now: DateTime<Utc>) {
        self.toasts.push(Toast::new(ToastKind::Success, message, now));
    }

    pub fn push_error(&mut self, message: impl Into<String>, now: DateTime<Utc>) {
        self.toasts.push(Toast::new(ToastKind::Error, message, now));
    }

    pub fn purge_expired(&mut self, now: DateTime<Utc>) {
        self.toasts.retain(|toast| !toast.is_expired(now));
    }

    pub fn active(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn dismiss_all(&mut self) {
        self.toasts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::ToastCenter;
    use crate::types::ToastKind;
    use chrono::{Duration, TimeZone, Utc};

    fn t0() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 15, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn pushes_keep_arrival_order() {
        let mut center = ToastCenter::default();
        center.push_success("✅ Zerar TODO Estoque concluído com sucesso!", t0());
        center.push_error("❌ Falha ao reconectar ao banco de dados", t0());

        let kinds: Vec<ToastKind> = center.active().iter().map(|toast| toast.kind).collect();
        assert_eq!(kinds, vec![ToastKind::Success, ToastKind::Error]);
    }

    #[test]
    fn purge_drops_success_before_error_for_same_instant() {
        let mut center = ToastCenter::default();
        center.push_success("ok", t0());
        center.push_error("falhou", t0());

        center.purge_expired(t0() + Duration::milliseconds(3500));
        assert_eq!(center.active().len(), 1);
        assert_eq!(center.active()[0].kind, ToastKind::Error);

        center.purge_expired(t0() + Duration::seconds(4));
        assert!(center.is_empty());
    }

    #[test]
    fn dismiss_all_clears_without_waiting_for_expiry() {
        let mut center = ToastCenter::default();
        center.push_success("ok", t0());
        center.dismiss_all();
        assert!(center.is_empty());
    }
}
