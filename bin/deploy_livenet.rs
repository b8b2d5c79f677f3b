//! Deploy contracts to Casper livenet/testnet using Odra livenet environment.
//!
//! Usage:
//!   cargo run --bin deploy_livenet --release
//!
//! Requires .env file with:
//!   ODRA_CASPER_LIVENET_SECRET_KEY_PATH=/path/to/secret_key.pem
//!   ODRA_CASPER_LIVENET_NODE_ADDRESS=https://node.testnet.casper.network
//!   ODRA_CASPER_LIVENET_CHAIN_NAME=casper-test
//!   ODRA_CASPER_LIVENET_PAYMENT_AMOUNT=200000000000

use odra::host::{Deployer, HostRef, NoArgs};

use cspr_leverage_contracts::leverage::{
    CollateralizedLeverage, CollateralizedLeverageInitArgs,
};
use cspr_leverage_contracts::stable_token::StableUsd;

fn main() {
    // Load environment from .env file
    dotenv::dotenv().ok();

    println!("=== CSPR-Leverage Livenet Deployment ===");
    println!();

    // Initialize Odra livenet environment
    let env = odra_casper_livenet_env::env();

    // Configure payment amount for deployments/calls (required for Casper 2.0 txs)
    let payment_amount: u64 = std::env::var("ODRA_CASPER_LIVENET_PAYMENT_AMOUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(200_000_000_000);
    env.set_gas(payment_amount);

    // Get deployer address
    let deployer = env.caller();
    println!("Deployer: {:?}", deployer);
    println!();

    // 1. Stable token
    println!("Deploying StableUsd...");
    let stable_token = StableUsd::deploy(&env, NoArgs);
    let stable_token_addr = stable_token.address().clone();
    println!("StableUsd deployed at: {:?}", stable_token_addr);

    // 2. Lending contract
    println!("Deploying CollateralizedLeverage...");
    let leverage = CollateralizedLeverage::deploy(
        &env,
        CollateralizedLeverageInitArgs {
            stable_token: stable_token_addr,
        },
    );
    println!(
        "CollateralizedLeverage deployed at: {:?}",
        leverage.address().clone()
    );

    println!();
    println!("=== Deployment Complete ===");
    println!();
    println!("Contract Addresses:");
    println!("  StableUsd:              {:?}", stable_token_addr);
    println!("  CollateralizedLeverage: {:?}", leverage.address().clone());
    println!();
    println!("Protocol Parameters:");
    println!("  Monthly interest rate:  {}%", leverage.monthly_interest_rate());
    println!(
        "  Delayed interest rate:  {}%",
        leverage.monthly_delayed_interest_rate()
    );
    println!("  sUSD/CSPR multiplier:   {}", leverage.susd_cspr_multiplier());
    println!("  Minimum collateral:     {} motes", leverage.min_collateral());
    println!("  Minimum period:         {} year(s)", leverage.min_period_in_years());
}
