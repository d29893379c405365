#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("failed to connect to backend at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("backend connection i/o error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("backend protocol error: {message}")]
    Protocol { message: String },
    #[error("backend call failed: {message}")]
    Rpc { message: String },
    #[error("backend call timed out after {seconds}s")]
    Timeout { seconds: u64 },
}
