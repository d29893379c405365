use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded failure: where it happened and what the error said.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticEntry {
    pub at: DateTime<Utc>,
    pub context: String,
    pub message: String,
}

/// Bounded FIFO of failures surfaced from backend calls. Nothing in the
/// console treats these as fatal; the ring exists so an operator (or a test)
/// can inspect what went wrong after the toast is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticLog {
    entries: Vec<DiagnosticEntry>,
    max_size: usize,
}

impl DiagnosticLog {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_size,
        }
    }

    pub fn record(
        &mut self,
        context: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        if self.max_size == 0 {
            return;
        }
        if self.entries.len() >= self.max_size {
            self.entries.remove(0);
        }
        self.entries.push(DiagnosticEntry {
            at: now,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[DiagnosticEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::new(200)
    }
}

#[cfg(test)]
mod tests {
    use super::DiagnosticLog;
    use chrono::Utc;

    #[test]
    fn record_keeps_arrival_order() {
        let mut log = DiagnosticLog::default();
        log.record("undo", "operação não encontrada", Utc::now());
        log.record("execute zerar_estoque", "sem conexão", Utc::now());

        let contexts: Vec<&str> = log
            .entries()
            .iter()
            .map(|entry| entry.context.as_str())
            .collect();
        assert_eq!(contexts, vec!["undo", "execute zerar_estoque"]);
    }

    #[test]
    fn ring_drops_the_oldest_entry_at_capacity() {
        let mut log = DiagnosticLog::new(2);
        log.record("a", "1", Utc::now());
        log.record("b", "2", Utc::now());
        log.record("c", "3", Utc::now());

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].context, "b");
        assert_eq!(log.entries()[1].context, "c");
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let mut log = DiagnosticLog::new(0);
        log.record("a", "1", Utc::now());
        assert!(log.is_empty());
    }
}
