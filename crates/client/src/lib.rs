//! trackhub_client - CLI client for the trackhub API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::TrackhubClient;
pub use error::{ClientError, Result};
