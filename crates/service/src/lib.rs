//! Forwarding layer shared by both proxy services.
//! - `domain` validates the inbound request shapes before anything leaves the process.
//! - `email` and `intake` own the outbound calls and classify upstream statuses.
//! - `errors` is the tagged result every operation returns; the HTTP layer maps it.

pub mod domain;
pub mod email;
pub mod errors;
pub mod intake;
pub mod upstream;

pub use errors::ServiceError;
