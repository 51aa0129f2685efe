//! batchswap - Main executable
//!
//! Replays a JSON script of user intents against a single session: batched
//! token transfers, cross-chain swaps and saved templates. Submission goes
//! through the simulated submitter, so no real chain is contacted.
use anyhow::Context;
use batchswap::{create_application, AppConfig, Intent};
use dotenv::dotenv;
use log::info;
use std::env;
use std::fs;

const DEMO_SCRIPT: &str = r#"[
    {"intent": "navigate", "view": "transfer"},
    {"intent": "submit_transfer", "form": {"token": "USDC", "recipients": [
        {"address": "0x1111111111111111111111111111111111111111", "amount": "100", "label": "Alice"},
        {"address": "0x2222222222222222222222222222222222222222", "amount": "50"}
    ]}},
    {"intent": "save_transfer_template", "name": "Payroll", "form": {"token": "USDC", "recipients": [
        {"address": "0x1111111111111111111111111111111111111111", "amount": "100", "label": "Alice"},
        {"address": "0x2222222222222222222222222222222222222222", "amount": "50"}
    ]}},
    {"intent": "navigate", "view": "swap"},
    {"intent": "submit_swap", "form": {"from_token": "USDC", "to_token": "USDC",
        "from_chain": "Base", "to_chain": "Ethereum", "amount": "10"}},
    {"intent": "submit_swap", "form": {"from_token": "USDC", "to_token": "ETH",
        "from_chain": "Base", "to_chain": "Ethereum", "amount": "10", "slippage_tolerance": 1.0}},
    {"intent": "list_templates"},
    {"intent": "use_template", "template": "Payroll"},
    {"intent": "refresh"},
    {"intent": "show_dashboard", "filter": "failed"}
]"#;

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!("Starting batchswap v{}", batchswap::VERSION);

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Optional intent script, the built-in demo otherwise
    let script = match env::args().nth(1) {
        Some(path) => {
            info!("Replaying intents from {}", path);
            fs::read_to_string(&path)
                .with_context(|| format!("Failed to read intent script {}", path))?
        }
        None => {
            info!("No intent script given, replaying the demo script");
            DEMO_SCRIPT.to_string()
        }
    };

    let intents: Vec<Intent> =
        serde_json::from_str(&script).context("Failed to parse intent script")?;

    info!("Initializing application...");
    let (services, router) =
        create_application(config).context("Failed to initialize application")?;

    router
        .dispatch_all(intents)
        .await
        .context("Failed to replay intent script")?;

    let snapshot = services.session().snapshot().await;
    info!(
        "Session finished with {} batch(es), {} transaction(s) and {} template(s)",
        snapshot.batches.len(),
        snapshot.transactions.len(),
        snapshot.templates.len()
    );

    Ok(())
}
