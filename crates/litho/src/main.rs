mod cli;

use std::time::Duration;

use clap::Parser;
use eyre::WrapErr;
use serde::Serialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use cli::{Cli, Command};
use litho_core::{ClientConfig, LithoClient, WaitOptions};

/// Log filter used when `RUST_LOG` is unset. Logs go to stderr so stdout
/// stays machine-readable JSON.
const DEFAULT_LOG_FILTER: &str = "info";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let config = build_config(&args).wrap_err("invalid client configuration")?;
    let client = LithoClient::new(config).wrap_err("create RPC client")?;
    tracing::debug!(
        rpc_url = %client.config().rpc_url,
        version = litho_core::VERSION,
        "client ready"
    );

    match args.command {
        Command::Balance { address, block } => {
            let balance = client
                .get_balance(&address, litho_core::CallOptions { block_tag: block })
                .await?;
            print_json(&balance)
        }
        Command::BlockNumber => {
            let block_number = client.get_block_number().await?;
            print_json(&json!({ "blockNumber": block_number }))
        }
        Command::ChainId => {
            let chain_id = client.get_chain_id().await?;
            print_json(&json!({ "chainId": chain_id }))
        }
        Command::Tx { hash } => {
            let tx = client.get_transaction(&hash).await?;
            print_json(&tx)
        }
        Command::Receipt { hash } => {
            let receipt = client.get_transaction_receipt(&hash).await?;
            print_json(&receipt)
        }
        Command::Wait {
            hash,
            confirmations,
            wait_timeout_ms,
            poll_interval_ms,
        } => {
            let options = WaitOptions::default()
                .with_confirmations(confirmations)
                .with_timeout(Duration::from_millis(wait_timeout_ms))
                .with_poll_interval(Duration::from_millis(poll_interval_ms));

            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("interrupted; cancelling wait");
                    on_interrupt.cancel();
                }
            });

            tracing::info!(tx = %hash, confirmations, wait_timeout_ms, "waiting for confirmations");
            let receipt = client
                .wait_for_transaction_with_cancel(&hash, options, &cancel)
                .await?;
            print_json(&receipt)
        }
        Command::Network => print_json(&client.get_network_config()),
    }
}

fn build_config(args: &Cli) -> eyre::Result<ClientConfig> {
    let mut config = ClientConfig::new(&args.rpc)?
        .with_timeout(Duration::from_millis(args.timeout_ms))
        .with_retry(args.retry_count, Duration::from_millis(args.retry_delay_ms));
    if let Some(chain_id) = args.chain_id {
        config = config.with_chain_id(chain_id);
    }
    if let Some(limit) = args.requests_per_second {
        config = config.with_requests_per_second(limit);
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> eyre::Result<()> {
    let out = serde_json::to_string_pretty(value).context("encode output as JSON")?;
    println!("{out}");
    Ok(())
}
