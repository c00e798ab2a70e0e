//! hub20 funding API client.
//!
//! [`FundingClient`] shapes payment order and transfer requests and sends
//! them through any [`HttpSession`]:
//!
//! ```text
//! create_payment_order      POST   /api/payment/orders
//! get_payment_order         GET    /api/payment/orders/{id}
//! cancel_payment_order      DELETE /api/payment/orders/{id}
//! schedule_external_transfer POST  /api/transfers
//! ```
//!
//! Responses and errors come back exactly as the session produced them.
//! [`PaymentOrder`] and [`Transfer`] can decode a response when a typed view
//! is wanted.

mod client;
mod options;
mod types;

pub use client::{FundingClient, PAYMENT_ORDERS_PATH, TRANSFERS_PATH};
pub use hub20_session::{HttpSession, SessionError};
pub use options::{merge_fields, TransferOptions};
pub use types::*;
