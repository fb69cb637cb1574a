//! Types shared by the try-on client crates: wire payloads exchanged with the
//! processing backend, measurement labelling, and the upload allowlist.

pub mod domain;
pub mod error;
pub mod protocol;
pub mod upload;
