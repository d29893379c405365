//! JSON-lines TCP client for the administrative backend.
//!
//! One socket carries both directions of traffic: the console writes
//! `RequestFrame` lines, a dedicated reader thread routes `response` frames
//! to the caller waiting on that id and `log` frames to the push channel.
//! Requests block their own calling thread only; the UI loop never calls
//! into here directly.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde::de::DeserializeOwned;

use bmongo_core::types::{EmitenteSummary, UndoableOperation};

use crate::api::{AdminBackend, OperationOutcome, OperationRequest, TributationOption};
use crate::error::BackendError;
use crate::wire::{BackendCall, RequestFrame, ServerFrame};

/// Generous budget: offline repairs and restores legitimately run for
/// minutes.
const RPC_TIMEOUT: Duration = Duration::from_secs(300);

type PendingMap = Mutex<HashMap<u64, Sender<Result<serde_json::Value, String>>>>;

#[derive(Debug)]
pub struct WireClient {
    writer: Mutex<TcpStream>,
    pending: Arc<PendingMap>,
    next_id: AtomicU64,
    log_rx: Mutex<Option<Receiver<String>>>,
}

impl WireClient {
    pub fn connect(addr: &str) -> Result<Self, BackendError> {
        let stream = TcpStream::connect(addr).map_err(|source| BackendError::Connect {
            addr: addr.to_string(),
            source,
        })?;
        let reader_stream = stream.try_clone()?;
        let (log_tx, log_rx) = mpsc::channel();
        let pending: Arc<PendingMap> = Arc::new(Mutex::new(HashMap::new()));

        let reader_pending = Arc::clone(&pending);
        thread::spawn(move || read_loop(reader_stream, reader_pending, log_tx));

        Ok(Self {
            writer: Mutex::new(stream),
            pending,
            next_id: AtomicU64::new(1),
            log_rx: Mutex::new(Some(log_rx)),
        })
    }

    fn send_frame(&self, frame: &RequestFrame) -> Result<(), BackendError> {
        let mut line = serde_json::to_string(frame).map_err(|err| BackendError::Protocol {
            message: format!("failed to encode request: {err}"),
        })?;
        line.push('\n');
        let mut writer = self.writer.lock().expect("stream writer lock");
        writer.write_all(line.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn call(&self, call: BackendCall) -> Result<serde_json::Value, BackendError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel();
        self.pending
            .lock()
            .expect("pending request map lock")
            .insert(id, tx);

        if let Err(err) = self.send_frame(&RequestFrame { id: Some(id), call }) {
            self.pending
                .lock()
                .expect("pending request map lock")
                .remove(&id);
            return Err(err);
        }

        match rx.recv_timeout(RPC_TIMEOUT) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(message)) => Err(BackendError::Rpc { message }),
            Err(mpsc::RecvTimeoutError::Timeout) => {
                self.pending
                    .lock()
                    .expect("pending request map lock")
                    .remove(&id);
                Err(BackendError::Timeout {
                    seconds: RPC_TIMEOUT.as_secs(),
                })
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(BackendError::Protocol {
                message: "connection closed before response".to_string(),
            }),
        }
    }

    fn call_decoded<T: DeserializeOwned>(&self, call: BackendCall) -> Result<T, BackendError> {
        decode(self.call(call)?)
    }

    fn call_unit(&self, call: BackendCall) -> Result<(), BackendError> {
        self.call(call).map(|_| ())
    }
}

fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, BackendError> {
    serde_json::from_value(value).map_err(|err| BackendError::Protocol {
        message: format!("unexpected response shape: {err}"),
    })
}

fn read_loop(stream: TcpStream, pending: Arc<PendingMap>, log_tx: Sender<String>) {
    let reader = BufReader::new(stream);
    for line in reader.lines() {
        let Ok(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        // A malformed frame poisons one line, not the connection.
        let Ok(frame) = serde_json::from_str::<ServerFrame>(&line) else {
            continue;
        };
        match frame {
            ServerFrame::Log { message } => {
                let _ = log_tx.send(message);
            }
            ServerFrame::Response { id, error, result } => {
                let waiter = pending
                    .lock()
                    .expect("pending request map lock")
                    .remove(&id);
                if let Some(tx) = waiter {
                    let reply = match error {
                        Some(message) => Err(message),
                        None => Ok(result),
                    };
                    let _ = tx.send(reply);
                }
            }
        }
    }

    // Connection gone: dropping the senders unblocks every waiter with a
    // disconnect, which call() maps to a protocol error.
    pending
        .lock()
        .expect("pending request map lock")
        .clear();
}

impl AdminBackend for WireClient {
    fn check_connection(&self) -> Result<bool, BackendError> {
        self.call_decoded(BackendCall::CheckConnection)
    }

    fn retry_connection(&self) -> Result<(), BackendError> {
        self.call_unit(BackendCall::RetryConnection)
    }

    fn get_logs(&self) -> Result<Vec<String>, BackendError> {
        self.call_decoded(BackendCall::GetLogs)
    }

    fn cancel_operation(&self) -> Result<(), BackendError> {
        self.send_frame(&RequestFrame {
            id: None,
            call: BackendCall::CancelOperation,
        })
    }

    fn get_undoable_operations(&self) -> Result<Vec<UndoableOperation>, BackendError> {
        self.call_decoded(BackendCall::GetUndoableOperations)
    }

    fn undo_operation(&self, id: &str) -> Result<(), BackendError> {
        self.call_unit(BackendCall::UndoOperation {
            operation_id: id.to_string(),
        })
    }

    fn list_emitentes(&self) -> Result<Vec<EmitenteSummary>, BackendError> {
        self.call_decoded(BackendCall::ListEmitentes)
    }

    fn get_invoice_types(&self) -> Result<Vec<String>, BackendError> {
        self.call_decoded(BackendCall::GetInvoiceTypes)
    }

    fn get_invoice_statuses(&self) -> Result<Vec<String>, BackendError> {
        self.call_decoded(BackendCall::GetInvoiceStatuses)
    }

    fn get_tributations(&self) -> Result<Vec<TributationOption>, BackendError> {
        self.call_decoded(BackendCall::GetTributations)
    }

    fn get_total_product_count(&self) -> Result<i64, BackendError> {
        self.call_decoded(BackendCall::GetTotalProductCount)
    }

    fn execute(&self, request: &OperationRequest) -> Result<OperationOutcome, BackendError> {
        self.call_decoded(BackendCall::Execute {
            request: request.clone(),
        })
    }

    fn take_log_events(&self) -> Option<Receiver<String>> {
        self.log_rx.lock().expect("log receiver lock").take()
    }
}
