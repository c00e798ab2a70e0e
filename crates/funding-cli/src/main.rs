//! hub20 funding CLI - Main entry point.

mod config;
mod error;

use crate::config::Config;
use crate::error::AppResult;
use anyhow::Context;
use clap::{Parser, Subcommand};
use funding_client::{Amount, FundingClient, PaymentOrder, Token, Transfer, TransferOptions};
use hub20_session::{HttpSession, Session};
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "funding", version, about = "Manage hub20 payment orders and transfers")]
struct Cli {
    /// hub20 API base URL (overrides HUB20__BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open a payment order
    CreateOrder {
        /// Token address
        #[arg(long)]
        token: String,
        #[arg(long)]
        amount: Amount,
    },
    /// Show a payment order
    GetOrder { order_id: String },
    /// Cancel a payment order
    CancelOrder { order_id: String },
    /// Schedule a transfer to an external address
    Transfer {
        /// Token address
        #[arg(long)]
        token: String,
        #[arg(long)]
        amount: Amount,
        /// Destination address
        #[arg(long)]
        address: String,
        #[arg(long)]
        memo: Option<String>,
        #[arg(long)]
        identifier: Option<String>,
        /// hub20 username to credit
        #[arg(long)]
        recipient: Option<String>,
        /// Extra body field as key=value; JSON values are parsed, anything else is a string
        #[arg(long = "option", value_parser = parse_option)]
        options: Vec<(String, Value)>,
    },
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.logging.level);

    let base_url = cli.base_url.unwrap_or(config.hub20.base_url);
    let mut session = Session::with_timeout(&base_url, config.hub20.timeout)
        .context("Failed to create hub20 session")?;
    if let Some(token) = config.hub20.api_token {
        session = session.with_token(token);
    } else {
        warn!("No HUB20__API_TOKEN set - requests are anonymous");
    }

    check_reachable(&session).await;

    let client = FundingClient::new(session);
    let response = run(&client, cli.command).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Non-fatal: a failed check only logs, the command still runs.
async fn check_reachable(session: &Session) -> bool {
    let healthy = session.health_check().await;
    if !healthy {
        warn!(
            "hub20 health check failed at {} - trying the request anyway",
            session.base_url()
        );
    }
    healthy
}

/// Execute one command and return the raw server response.
async fn run<S: HttpSession>(client: &FundingClient<S>, command: Command) -> AppResult<Value> {
    let response = match command {
        Command::CreateOrder { token, amount } => {
            let response = client
                .create_payment_order(&Token::new(token), amount)
                .await?;
            log_order(&response);
            response
        }
        Command::GetOrder { order_id } => {
            let response = client.get_payment_order(&order_id).await?;
            log_order(&response);
            response
        }
        Command::CancelOrder { order_id } => {
            let response = client.cancel_payment_order(&order_id).await?;
            info!("Payment order {} cancelled", order_id);
            response
        }
        Command::Transfer {
            token,
            amount,
            address,
            memo,
            identifier,
            recipient,
            options,
        } => {
            let mut extra: TransferOptions = options.into_iter().collect();
            if let Some(memo) = memo {
                extra = extra.memo(memo);
            }
            if let Some(identifier) = identifier {
                extra = extra.identifier(identifier);
            }
            if let Some(recipient) = recipient {
                extra = extra.recipient(recipient);
            }

            let response = client
                .schedule_external_transfer(&Token::new(token), amount, &address, &extra)
                .await?;
            match Transfer::from_response(response.clone()) {
                Ok(transfer) => info!(
                    "Transfer to {} is {}",
                    transfer.target.as_deref().unwrap_or(&address),
                    transfer.status.as_deref().unwrap_or("submitted")
                ),
                Err(e) => warn!("Unrecognized transfer response: {}", e),
            }
            response
        }
    };

    Ok(response)
}

fn log_order(response: &Value) {
    match PaymentOrder::from_response(response.clone()) {
        Ok(order) => info!(
            "Payment order {} ({} routes, {} payments) status={}",
            order.id,
            order.routes.len(),
            order.payments.len(),
            order.status.as_deref().unwrap_or("unknown")
        ),
        Err(e) => warn!("Unrecognized payment order response: {}", e),
    }
}

/// Parse a `key=value` transfer option.
fn parse_option(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{}`", raw))?;

    if key.is_empty() {
        return Err(format!("empty key in `{}`", raw));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries the JSON response
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
