// ATS alignment: tokenization, resume vocabulary extraction, keyword overlap scoring.
// Everything here is pure and synchronous, recomputed on every edit.

pub mod handlers;
pub mod keywords;
pub mod scoring;
pub mod tokenizer;

pub use keywords::extract_resume_keywords;
pub use scoring::{compute_ats_report, AtsReport};
