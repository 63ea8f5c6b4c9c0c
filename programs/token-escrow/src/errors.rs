use anchor_lang::prelude::*;

// The first three variants keep the deployed program's code order.
#[error_code]
pub enum EscrowError {
    #[msg("Account does not match the escrow record")]
    InvalidAccount,
    #[msg("Taker deposit does not cover the expected amount")]
    InvalidExchangeAmount,
    #[msg("Escrow record is already initialized")]
    AlreadyInitialized,
    #[msg("Escrow record is not initialized")]
    NotInitialized,
    #[msg("Expected amount must be greater than zero")]
    InvalidAmount,
}
