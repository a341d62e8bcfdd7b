//! Client side of the log triage service
//!
//! - [`uploader`]: collects log text from editing, file picking and drops
//! - [`api`]: submits text to the triage API
//! - [`view`]: renders the analysis for display

pub mod api;
pub mod uploader;
pub mod view;

pub use api::{ApiClient, ApiClientError};
pub use uploader::{DragState, EventDisposition, LogUploader, ReadOutcome, ReadTicket, UploadError};
pub use view::ResultPanel;
