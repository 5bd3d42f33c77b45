//! clearsight — decision transparency log library.
//!
//! Records why an AI assistant made each decision (reasoning, confidence,
//! input factors) and reads them back per session. The binary entrypoint is
//! in `main.rs`.

pub mod cli;
pub mod config;
pub mod decision;
pub mod page;
pub mod store;
