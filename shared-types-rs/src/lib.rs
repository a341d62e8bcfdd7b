//! Wire types shared by the triage API server and its clients.

pub mod analysis;
pub mod envelope;

pub use analysis::{AnalysisRequest, AnalysisResult};
pub use envelope::{ErrorEnvelope, ResponseMeta, SummarizeResponse, ValidationIssue};
