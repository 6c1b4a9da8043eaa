//! Response decoder module
//!
//! Supports: JSON arrays (listing pages), JSON objects (single records),
//! plain-text scalars (counts, ids, populations)
//!
//! # Overview
//!
//! The web services answer `index.json` with JSON and `index.txt` with a
//! bare value. These helpers turn either into typed data and report
//! `Error::Decode` on anything else. The [`flag`] and [`list`] modules
//! smooth over loosely typed record fields.

mod decoders;
pub mod flag;
pub mod list;
mod types;

pub use decoders::{decode_page, decode_record, decode_scalar};
pub use types::ResponseFormat;
