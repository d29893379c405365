//! Dispatcher runtime: the composition root between the UI loop and the
//! backend.
//!
//! The UI thread never blocks on the backend. Confirmed operations go
//! through a single long-lived worker fed by a channel, so at most one is
//! in flight at a time by construction. Lookups, undo calls and the
//! reconnect probe run on short-lived threads whose results replace state
//! wholesale. Cancellation is written straight out fire-and-forget. Every
//! backend failure comes back over the event channel as a value; nothing
//! here can take the process down.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use bmongo_backend::api::{AdminBackend, OperationRequest};
use bmongo_backend::error::BackendError;
use bmongo_core::types::OperationKind;

use crate::event::{BackendCommand, PrefetchData, UiEvent};

struct ExecJob {
    title: String,
    request: OperationRequest,
}

pub struct Runtime {
    backend: Arc<dyn AdminBackend>,
    events_tx: Sender<UiEvent>,
    events_rx: Receiver<UiEvent>,
    exec_tx: Sender<ExecJob>,
}

impl Runtime {
    pub fn start(backend: Arc<dyn AdminBackend>) -> Self {
        let (events_tx, events_rx) = mpsc::channel();

        // One-shot log subscription: the receiver can only be taken once,
        // so repeated construction attempts cannot create a second
        // forwarder. Receipt order is display order.
        if let Some(log_rx) = backend.take_log_events() {
            let tx = events_tx.clone();
            thread::spawn(move || {
                for message in log_rx.iter() {
                    if tx.send(UiEvent::LogLine { message }).is_err() {
                        break;
                    }
                }
            });
        }

        // Serial execute lane for operator-confirmed operations.
        let (exec_tx, exec_rx) = mpsc::channel::<ExecJob>();
        {
            let backend = Arc::clone(&backend);
            let tx = events_tx.clone();
            thread::spawn(move || {
                for job in exec_rx.iter() {
                    let event = match backend.execute(&job.request) {
                        Ok(outcome) => UiEvent::OperationSucceeded {
                            title: job.title,
                            affected: outcome.affected,
                        },
                        Err(err) => UiEvent::OperationFailed {
                            title: job.title,
                            error: err.to_string(),
                        },
                    };
                    if tx.send(event).is_err() {
                        break;
                    }
                }
            });
        }

        Self {
            backend,
            events_tx,
            events_rx,
            exec_tx,
        }
    }

    /// Startup work: one connection probe and the one-time history pull.
    /// History failure degrades to a status line; live lines still flow.
    pub fn bootstrap(&self) {
        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        thread::spawn(move || {
            match backend.check_connection() {
                Ok(connected) => {
                    let _ = tx.send(UiEvent::ConnectionChecked { connected });
                }
                Err(err) => {
                    let _ = tx.send(UiEvent::StatusLine {
                        message: format!("falha ao verificar conexão: {err}"),
                    });
                }
            }
            match backend.get_logs() {
                Ok(lines) => {
                    let _ = tx.send(UiEvent::HistoryLoaded { lines });
                }
                Err(err) => {
                    let _ = tx.send(UiEvent::StatusLine {
                        message: format!("falha ao carregar histórico de log: {err}"),
                    });
                }
            }
        });
    }

    pub fn submit(&self, command: BackendCommand) {
        match command {
            BackendCommand::Execute { title, request } => {
                let _ = self.exec_tx.send(ExecJob { title, request });
            }
            BackendCommand::Cancel => {
                // Fire-and-forget; an acknowledgment, if any, arrives as a
                // log line. Only a transport failure is surfaced.
                let backend = Arc::clone(&self.backend);
                let tx = self.events_tx.clone();
                thread::spawn(move || {
                    if let Err(err) = backend.cancel_operation() {
                        let _ = tx.send(UiEvent::StatusLine {
                            message: format!("falha ao enviar cancelamento: {err}"),
                        });
                    }
                });
            }
            BackendCommand::FetchUndoList => {
                let backend = Arc::clone(&self.backend);
                let tx = self.events_tx.clone();
                thread::spawn(move || {
                    let event = match backend.get_undoable_operations() {
                        Ok(ops) => UiEvent::UndoListLoaded { ops },
                        Err(err) => UiEvent::UndoListFailed {
                            error: err.to_string(),
                        },
                    };
                    let _ = tx.send(event);
                });
            }
            BackendCommand::Undo { id } => {
                let backend = Arc::clone(&self.backend);
                let tx = self.events_tx.clone();
                thread::spawn(move || {
                    // The re-fetch after a successful undo is authoritative;
                    // the client never splices the entry out locally.
                    let refreshed = backend
                        .undo_operation(&id)
                        .and_then(|()| backend.get_undoable_operations());
                    let event = match refreshed {
                        Ok(ops) => UiEvent::UndoApplied { ops },
                        Err(err) => UiEvent::UndoFailed {
                            error: err.to_string(),
                        },
                    };
                    let _ = tx.send(event);
                });
            }
            BackendCommand::Prefetch { target } => {
                let backend = Arc::clone(&self.backend);
                let tx = self.events_tx.clone();
                thread::spawn(move || {
                    let event = match prefetch(backend.as_ref(), target) {
                        Ok(data) => UiEvent::PrefetchReady { target, data },
                        Err(err) => UiEvent::PrefetchFailed {
                            target,
                            error: err.to_string(),
                        },
                    };
                    let _ = tx.send(event);
                });
            }
            BackendCommand::Reconnect => {
                let backend = Arc::clone(&self.backend);
                let tx = self.events_tx.clone();
                thread::spawn(move || {
                    let event = match backend
                        .retry_connection()
                        .and_then(|()| backend.check_connection())
                    {
                        Ok(connected) => UiEvent::ReconnectFinished {
                            connected,
                            error: None,
                        },
                        Err(err) => UiEvent::ReconnectFinished {
                            connected: false,
                            error: Some(err.to_string()),
                        },
                    };
                    let _ = tx.send(event);
                });
            }
        }
    }

    /// Drain everything the workers have produced since the last tick.
    pub fn poll_events(&self) -> Vec<UiEvent> {
        let mut out = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            out.push(event);
        }
        out
    }

    /// Blocking receive, for headless embedding and tests.
    pub fn recv_event_timeout(&self, timeout: Duration) -> Option<UiEvent> {
        self.events_rx.recv_timeout(timeout).ok()
    }
}

fn prefetch(
    backend: &dyn AdminBackend,
    target: OperationKind,
) -> Result<PrefetchData, BackendError> {
    match target {
        OperationKind::Gerenciador => backend
            .get_total_product_count()
            .map(|total| PrefetchData::ProductCount { total }),
        OperationKind::Tributacao => backend
            .get_tributations()
            .map(|options| PrefetchData::Tributations { options }),
        OperationKind::ApagarEmitente => backend
            .list_emitentes()
            .map(|list| PrefetchData::Emitentes { list }),
        OperationKind::AlterarChave => backend
            .get_invoice_types()
            .map(|types| PrefetchData::InvoiceTypes { types }),
        OperationKind::AlterarSituacao => {
            let types = backend.get_invoice_types()?;
            let statuses = backend.get_invoice_statuses()?;
            Ok(PrefetchData::InvoiceLookups { types, statuses })
        }
        _ => Ok(PrefetchData::None),
    }
}
