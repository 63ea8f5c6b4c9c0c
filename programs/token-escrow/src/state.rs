use anchor_lang::prelude::*;

/// Seed for the vault authority PDA. The deployed program derives its
/// signing authority from this exact seed, so it must never change.
pub const ESCROW_PDA_SEED: &[u8] = b"escrow";

/// Escrow record that stores the terms of one open exchange offer.
///
/// Field order is the on-chain layout of the deployed program and is
/// load-bearing; new fields may only ever be appended.
#[account]
#[derive(InitSpace)]
pub struct Escrow {
    /// Set once at init; guards against acting on a garbage account
    pub is_initialized: bool,
    /// The depositor's wallet address
    pub initializer: Pubkey,
    /// Custodial token account holding the deposited Token A
    pub vault_account: Pubkey,
    /// Initializer's token account that receives Token B on exchange
    pub initializer_receive_account: Pubkey,
    /// Exact amount of Token B the initializer demands
    pub expected_amount: u64,
}
