//! Funding data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;

/// A currency or asset known to hub20.
///
/// Only `address` goes on the wire when creating orders or transfers. The
/// other fields are filled in when the token comes from the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// On-chain or ledger identifier of the token.
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,

    #[serde(default, alias = "network_id", skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
}

impl Token {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            code: None,
            name: None,
            decimals: None,
            chain_id: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// A token amount as sent to and read from the API.
///
/// The number literal is kept exactly as written: integers stay integers on
/// the wire (`100`, not `100.0`) and 18-decimal token values are not rounded
/// through `f64`. The server may also answer with decimal strings, which are
/// accepted on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Amount(Number);

impl Amount {
    /// Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Self)
    }

    pub fn as_number(&self) -> &Number {
        &self.0
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.0.as_f64()
    }
}

macro_rules! amount_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Amount {
                fn from(value: $t) -> Self {
                    Self(Number::from(value))
                }
            }
        )*
    };
}

amount_from_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl From<Number> for Amount {
    fn from(value: Number) -> Self {
        Self(value)
    }
}

impl From<Amount> for Value {
    fn from(amount: Amount) -> Self {
        Value::Number(amount.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Amount {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str::<Number>(s.trim()).map(Self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Through `Value` so exact numbers survive buffering (flatten)
        match Value::deserialize(deserializer)? {
            Value::Number(n) => Ok(Self(n)),
            Value::String(s) => s.parse().map_err(serde::de::Error::custom),
            other => Err(serde::de::Error::custom(format!(
                "expected a number or decimal string, got {}",
                other
            ))),
        }
    }
}

/// A way to pay a payment order, as offered by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRoute {
    #[serde(rename = "type")]
    pub route_type: String,

    pub address: Option<String>,
    pub network_id: Option<u64>,
    pub start_block: Option<u64>,
    pub expiration_block: Option<u64>,
    pub expiration_time: Option<DateTime<Utc>>,
    pub identifier: Option<Value>,
    pub recipient: Option<String>,
}

/// A payment received against an order.
#[derive(Debug, Clone, Deserialize)]
pub struct Payment {
    pub id: String,
    pub amount: Amount,
    pub identifier: Option<String>,
    #[serde(default)]
    pub confirmed: bool,
    pub created: Option<DateTime<Utc>>,

    /// Route-specific fields (transaction, block, raiden...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Server representation of a payment order.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentOrder {
    pub url: Option<String>,
    pub id: String,
    pub amount: Amount,
    pub token: Value,
    pub created: Option<DateTime<Utc>>,
    pub status: Option<String>,
    #[serde(default)]
    pub routes: Vec<PaymentRoute>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl PaymentOrder {
    /// Decode an order out of a raw API response.
    pub fn from_response(response: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(response)
    }
}

/// Server representation of a scheduled transfer.
#[derive(Debug, Clone, Deserialize)]
pub struct Transfer {
    pub url: Option<String>,
    pub amount: Amount,
    pub token: Value,
    pub memo: Option<String>,
    pub identifier: Option<String>,
    pub status: Option<String>,
    pub target: Option<String>,
}

impl Transfer {
    /// Decode a transfer out of a raw API response.
    pub fn from_response(response: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(response)
    }
}
