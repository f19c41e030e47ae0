//! Wire contract shared by the summarizer client and the summarize server.

pub mod error;
pub mod protocol;
