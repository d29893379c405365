//! Events flowing from the dispatcher runtime into the application state,
//! and commands flowing the other way. Both sides are tagged values so a
//! queued piece of work can be logged and asserted on.

use serde::{Deserialize, Serialize};

use bmongo_backend::api::{OperationRequest, TributationOption};
use bmongo_core::types::{EmitenteSummary, OperationKind, UndoableOperation};

/// Work the application asks the runtime to perform against the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendCommand {
    /// Run a confirmed (or confirmation-exempt) operation.
    Execute {
        title: String,
        request: OperationRequest,
    },
    /// Load the lookup data an operation's form needs before it opens.
    Prefetch { target: OperationKind },
    FetchUndoList,
    Undo { id: String },
    /// Global best-effort abort of the backend's current work.
    Cancel,
    Reconnect,
}

/// Lookup payloads delivered to a form when its prefetch resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "data", rename_all = "snake_case")]
pub enum PrefetchData {
    None,
    ProductCount { total: i64 },
    Tributations { options: Vec<TributationOption> },
    Emitentes { list: Vec<EmitenteSummary> },
    InvoiceTypes { types: Vec<String> },
    InvoiceLookups {
        types: Vec<String>,
        statuses: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UiEvent {
    /// A live backend log line, in receipt order.
    LogLine { message: String },
    /// The one-time pull of historical log lines.
    HistoryLoaded { lines: Vec<String> },
    ConnectionChecked { connected: bool },
    ReconnectFinished {
        connected: bool,
        error: Option<String>,
    },
    OperationSucceeded {
        title: String,
        affected: Option<i64>,
    },
    OperationFailed { title: String, error: String },
    PrefetchReady {
        target: OperationKind,
        data: PrefetchData,
    },
    PrefetchFailed {
        target: OperationKind,
        error: String,
    },
    UndoListLoaded { ops: Vec<UndoableOperation> },
    UndoListFailed { error: String },
    /// Undo plus the authoritative re-fetch that follows it.
    UndoApplied { ops: Vec<UndoableOperation> },
    UndoFailed { error: String },
    StatusLine { message: String },
}
