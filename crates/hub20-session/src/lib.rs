//! JSON session for the hub20 REST API.
//!
//! [`HttpSession`] is the contract API clients depend on; [`Session`] is the
//! reqwest implementation used against a real server.

mod client;
mod error;
mod session;

pub use client::Session;
pub use error::SessionError;
pub use session::HttpSession;
