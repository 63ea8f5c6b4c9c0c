use anchor_lang::prelude::*;

pub mod errors;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("HKu3iNjUuQbimNN4W6qZahvXn4rchaESwcPvsV1sdQsW");

#[program]
pub mod token_escrow {
    use super::*;

    /// Create a new escrow: record the exchange terms and move the vault
    /// under the program's authority. The Token A deposit itself is made
    /// by the caller in a preceding instruction of the same transaction.
    pub fn init_escrow(ctx: Context<InitEscrow>, expected_amount: u64) -> Result<()> {
        instructions::init_escrow::handler(ctx, expected_amount)
    }

    /// Settle the escrow: taker pays Token B, receives the vaulted
    /// Token A, and both the vault and the record are closed.
    pub fn exchange(ctx: Context<Exchange>) -> Result<()> {
        instructions::exchange::handler(ctx)
    }

    /// Cancel the escrow: initializer reclaims the vaulted Token A and
    /// both the vault and the record are closed.
    pub fn cancel(ctx: Context<Cancel>) -> Result<()> {
        instructions::cancel::handler(ctx)
    }
}
