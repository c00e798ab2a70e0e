//! Funding operations over an injected hub20 session.

use crate::options::{merge_fields, TransferOptions};
use crate::types::{Amount, Token};
use hub20_session::{HttpSession, SessionError};
use serde_json::{json, Map, Value};
use tracing::{debug, instrument};
use urlencoding::encode;

pub const PAYMENT_ORDERS_PATH: &str = "/api/payment/orders";
pub const TRANSFERS_PATH: &str = "/api/transfers";

/// Transfer fields set from the call arguments, in body order.
const FIXED_TRANSFER_FIELDS: [&str; 3] = ["amount", "token", "address"];

/// Client for payment orders and external transfers.
///
/// Each operation issues exactly one request through the session and hands
/// back whatever the session produced, errors included.
#[derive(Clone, Debug)]
pub struct FundingClient<S> {
    session: S,
}

impl<S: HttpSession> FundingClient<S> {
    pub fn new(session: S) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Open a payment order for `amount` of `token`.
    #[instrument(skip(self, token, amount), fields(token = %token.address))]
    pub async fn create_payment_order(
        &self,
        token: &Token,
        amount: impl Into<Amount>,
    ) -> Result<Value, SessionError> {
        let amount: Amount = amount.into();
        let body = json!({
            "amount": Value::from(amount),
            "token": token.address,
        });

        self.session.post(PAYMENT_ORDERS_PATH, &body).await
    }

    #[instrument(skip(self))]
    pub async fn get_payment_order(&self, order_id: &str) -> Result<Value, SessionError> {
        self.session.get(&order_path(order_id)).await
    }

    #[instrument(skip(self))]
    pub async fn cancel_payment_order(&self, order_id: &str) -> Result<Value, SessionError> {
        self.session.delete(&order_path(order_id)).await
    }

    /// Send `amount` of `token` to an external `address`.
    ///
    /// `options` are merged after the fixed fields, so an option named
    /// `amount`, `token` or `address` replaces the argument value.
    #[instrument(skip(self, token, amount, options), fields(token = %token.address))]
    pub async fn schedule_external_transfer(
        &self,
        token: &Token,
        amount: impl Into<Amount>,
        address: &str,
        options: &TransferOptions,
    ) -> Result<Value, SessionError> {
        let amount: Amount = amount.into();
        let mut fixed = Map::new();
        fixed.insert("amount".into(), Value::from(amount));
        fixed.insert("token".into(), Value::String(token.address.clone()));
        fixed.insert("address".into(), Value::String(address.to_string()));

        for field in FIXED_TRANSFER_FIELDS {
            if options.contains_key(field) {
                debug!("Transfer option overrides {}", field);
            }
        }

        let body = Value::Object(merge_fields(fixed, options.as_map()));
        self.session.post(TRANSFERS_PATH, &body).await
    }
}

/// The id is percent-encoded rather than interpolated raw, so reserved
/// characters in an id stay inside the one path segment.
fn order_path(order_id: &str) -> String {
    format!("{}/{}", PAYMENT_ORDERS_PATH, encode(order_id))
}
