//! Wire frames exchanged with the backend: one JSON object per line.

use serde::{Deserialize, Serialize};

use crate::api::OperationRequest;

/// Request frame sent by the console. `id` is absent on fire-and-forget
/// calls (cancellation), which the backend must not answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestFrame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(flatten)]
    pub call: BackendCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum BackendCall {
    CheckConnection,
    RetryConnection,
    GetLogs,
    CancelOperation,
    GetUndoableOperations,
    UndoOperation { operation_id: String },
    ListEmitentes,
    GetInvoiceTypes,
    GetInvoiceStatuses,
    GetTributations,
    GetTotalProductCount,
    Execute { request: OperationRequest },
}

/// Frame pushed by the backend: either a progress log line (may arrive at
/// any time, unordered with respect to requests) or the response to a
/// request, matched by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServerFrame {
    Log {
        message: String,
    },
    Response {
        id: u64,
        #[serde(default)]
        error: Option<String>,
        #[serde(default)]
        result: serde_json::Value,
    },
}
