//! End-to-end escrow demo against a running cluster.
//!
//! Reads the fee payer keypair from the path in `PAYER_PK` and the
//! cluster from `ANCHOR_PROVIDER_URL` (localnet when unset), then runs
//! the canonical scenario: the initializer deposits 20 Token A expecting
//! 10 Token B, and the taker settles the exchange.

use std::env;
use std::error::Error;
use std::rc::Rc;

use anchor_client::solana_sdk::{
    native_token::LAMPORTS_PER_SOL,
    signature::{read_keypair_file, Keypair},
    signer::Signer,
};
use escrow_client::{cluster_from_url, EscrowClient};

const INITIALIZER_TOKEN_A: u64 = 1000;
const TAKER_TOKEN_B: u64 = 1000;
const DEPOSIT_AMOUNT: u64 = 20;
const EXPECTED_AMOUNT: u64 = 10;

fn main() -> Result<(), Box<dyn Error>> {
    let payer_path = env::var("PAYER_PK")
        .map_err(|_| "set PAYER_PK to the path of the fee payer keypair file")?;
    let payer = read_keypair_file(&payer_path)
        .map_err(|e| format!("failed to read keypair from {payer_path}: {e}"))?;

    let url = env::var("ANCHOR_PROVIDER_URL").ok();
    let cluster = cluster_from_url(url.as_deref())?;
    let client = EscrowClient::new(cluster, Rc::new(payer))?;
    println!("program: {}", client.program_id());

    let initializer = Keypair::new();
    let taker = Keypair::new();
    let mint_authority = Keypair::new();

    client.airdrop(&initializer.pubkey(), 10 * LAMPORTS_PER_SOL)?;

    let mint_a = client.create_mint(&mint_authority.pubkey())?;
    let mint_b = client.create_mint(&mint_authority.pubkey())?;
    println!("token A mint: {mint_a}");
    println!("token B mint: {mint_b}");

    let initializer_token_a = client.create_token_account(&mint_a, &initializer.pubkey())?;
    let initializer_token_b = client.create_token_account(&mint_b, &initializer.pubkey())?;
    let taker_token_a = client.create_token_account(&mint_a, &taker.pubkey())?;
    let taker_token_b = client.create_token_account(&mint_b, &taker.pubkey())?;

    client.mint_to(&mint_a, &initializer_token_a, &mint_authority, INITIALIZER_TOKEN_A)?;
    client.mint_to(&mint_b, &taker_token_b, &mint_authority, TAKER_TOKEN_B)?;

    let escrow = Keypair::new();
    let vault = Keypair::new();
    client.init_escrow(
        &initializer,
        &escrow,
        &vault,
        &mint_a,
        &initializer_token_a,
        &initializer_token_b,
        DEPOSIT_AMOUNT,
        EXPECTED_AMOUNT,
    )?;
    println!("vault balance: {}", client.token_balance(&vault.pubkey())?);

    client.exchange(
        &taker,
        &escrow.pubkey(),
        &initializer.pubkey(),
        &initializer_token_b,
        &taker_token_a,
        &taker_token_b,
        &vault.pubkey(),
    )?;

    println!(
        "initializer token B balance: {}",
        client.token_balance(&initializer_token_b)?
    );
    println!(
        "taker token A balance: {}",
        client.token_balance(&taker_token_a)?
    );
    println!("done");

    Ok(())
}
