//! Contract with the administrative backend.
//!
//! The backend is the process that actually mutates the database, drives
//! mongodump/mongorestore and controls host services. The console only ever
//! talks to it through this trait: one method per auxiliary RPC plus a single
//! `execute` entry point taking a tagged request. Keeping the pending action
//! as a tagged value (rather than a captured closure) is what makes queued
//! and confirmed work inspectable and serializable.

use serde::{Deserialize, Serialize};
use std::sync::mpsc::Receiver;

use bmongo_core::types::{EmitenteSummary, UndoableOperation};

use crate::error::BackendError;

/// Tax-code option used to populate the tributation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TributationOption {
    pub id: String,
    pub label: String,
}

/// One variant per catalog action that reaches the backend, carrying the
/// typed arguments that action needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum OperationRequest {
    InactivateZeroProducts,
    BulkActivateByFilter {
        ncm_prefix: String,
        activate: bool,
    },
    ChangeTributationByNcm {
        ncms: Vec<String>,
        tributation_id: String,
        federal: bool,
    },
    EnableMei,
    CleanMovements,
    CleanDatabaseByDate {
        before_date: String,
    },
    CleanDatabase,
    CreateNewDatabase,
    CleanRegistry,
    FindObjectId {
        search_id: String,
    },
    GenerateInventoryReport {
        cutoff_date: String,
        target_value: f64,
        format: String,
    },
    ZeroAllStock,
    ZeroNegativeStock,
    ZeroAllPrices,
    UpdateEmitenteFromFile {
        file_path: String,
    },
    DeleteEmitente {
        emitente_id: String,
    },
    ChangeInvoiceKey {
        invoice_type: String,
        old_key: String,
        new_key: String,
    },
    ChangeInvoiceStatus {
        invoice_type: String,
        serie: String,
        numero: String,
        new_status: String,
    },
    BackupDatabase {
        output_dir: String,
    },
    RestoreDatabase {
        backup_path: String,
        drop_existing: bool,
    },
    StopServices,
    StartServices,
    KillProcesses,
    RepairOffline,
    RepairOnline,
    ReleaseFirewallPorts,
    AllowSecurityExclusions,
}

/// Result of an executed operation. The backend reports an affected-record
/// count where it has one; detailed progress arrives through the log stream,
/// not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OperationOutcome {
    #[serde(default)]
    pub affected: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

pub trait AdminBackend: Send + Sync {
    fn check_connection(&self) -> Result<bool, BackendError>;
    fn retry_connection(&self) -> Result<(), BackendError>;

    /// Pull-based fetch of the backend's historical log lines.
    fn get_logs(&self) -> Result<Vec<String>, BackendError>;

    /// Best-effort global abort of whatever is currently running on the
    /// backend. Carries no operation identifier; the outcome is observable
    /// only through the log stream.
    fn cancel_operation(&self) -> Result<(), BackendError>;

    fn get_undoable_operations(&self) -> Result<Vec<UndoableOperation>, BackendError>;
    fn undo_operation(&self, id: &str) -> Result<(), BackendError>;

    // Lookups that populate forms before they are shown.
    fn list_emitentes(&self) -> Result<Vec<EmitenteSummary>, BackendError>;
    fn get_invoice_types(&self) -> Result<Vec<String>, BackendError>;
    fn get_invoice_statuses(&self) -> Result<Vec<String>, BackendError>;
    fn get_tributations(&self) -> Result<Vec<TributationOption>, BackendError>;
    fn get_total_product_count(&self) -> Result<i64, BackendError>;

    fn execute(&self, request: &OperationRequest) -> Result<OperationOutcome, BackendError>;

    /// Hand out the push-event receiver for backend log lines. Returns
    /// `Some` exactly once per client; later calls get `None`, which is what
    /// makes a second subscription structurally impossible.
    fn take_log_events(&self) -> Option<Receiver<String>>;
}
