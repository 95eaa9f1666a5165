//! Login handshakes for the supported services.
//!
//! Each function performs exactly one connection plus authentication try
//! and reports `Ok(true)` for an accepted login, `Ok(false)` for a
//! rejected one, and `Err` when the service could not be spoken to at all.

pub mod ftp;
pub mod ssh;
