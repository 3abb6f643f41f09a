//! Postings engine: HTTP calls to the ingestion and query endpoints, run off
//! the caller's thread, plus small file-system helpers.
mod client;
mod engine;
mod filename;
mod persist;
mod types;

pub use client::{
    ClientSettings, ReqwestApi, SearchApi, PROCESS_CSV_PATH, QUERY_PATH, UPLOAD_FIELD,
};
pub use engine::{EngineError, EngineHandle};
pub use filename::csv_copy_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{
    ApiError, EngineEvent, FailureKind, UploadAck, UploadBody, UploadRequest, WireId,
    WireRankedResult,
};
