#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! SparkPost mail backend
//!
//! Translates [`EmailMessage`](domain::communication::mailer::EmailMessage)s into
//! SparkPost transmissions and reports how many recipients were accepted.

pub mod domain;
pub mod infrastructure;
