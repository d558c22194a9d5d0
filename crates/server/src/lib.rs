pub mod errors;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::{run_email, run_lookup};
