use anchor_lang::prelude::*;
use anchor_spl::token::{close_account, transfer, CloseAccount, Token, TokenAccount, Transfer};

use crate::errors::EscrowError;
use crate::state::{Escrow, ESCROW_PDA_SEED};

#[derive(Accounts)]
pub struct Exchange<'info> {
    /// The taker accepting the exchange terms
    pub taker: Signer<'info>,

    /// The original depositor; receives Token B and the rent refunds
    #[account(mut)]
    pub initializer: SystemAccount<'info>,

    /// Escrow record storing the terms (closed on success)
    #[account(
        mut,
        close = initializer,
        has_one = initializer @ EscrowError::InvalidAccount,
        has_one = initializer_receive_account @ EscrowError::InvalidAccount,
        has_one = vault_account @ EscrowError::InvalidAccount,
        constraint = escrow_info.is_initialized @ EscrowError::NotInitialized,
    )]
    pub escrow_info: Box<Account<'info, Escrow>>,

    /// Initializer's Token B account named in the record
    #[account(mut)]
    pub initializer_receive_account: Box<Account<'info, TokenAccount>>,

    /// Taker's Token A account (receives the vault balance)
    #[account(mut)]
    pub taker_receive_account: Box<Account<'info, TokenAccount>>,

    /// Taker's Token B account (source of the counter-deposit)
    #[account(mut)]
    pub taker_deposit_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,

    /// Vault holding the Token A deposit (closed on success)
    #[account(mut)]
    pub vault_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: compared against the canonical seed derivation in the handler
    pub vault_pda: UncheckedAccount<'info>,
}

impl<'info> Exchange<'info> {
    /// Transfer exactly the expected Token B amount from taker to initializer
    fn pay_initializer(&self) -> Result<()> {
        let cpi_accounts = Transfer {
            from: self.taker_deposit_account.to_account_info(),
            to: self.initializer_receive_account.to_account_info(),
            authority: self.taker.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), cpi_accounts);

        transfer(cpi_ctx, self.escrow_info.expected_amount)
    }

    /// Move the full vault balance to the taker, then close the vault
    /// back to the initializer; both signed by the vault authority PDA
    fn release_and_close_vault(&self, vault_authority_bump: u8) -> Result<()> {
        let signer_seeds: &[&[&[u8]]] = &[&[ESCROW_PDA_SEED, &[vault_authority_bump]]];

        let cpi_accounts = Transfer {
            from: self.vault_account.to_account_info(),
            to: self.taker_receive_account.to_account_info(),
            authority: self.vault_pda.to_account_info(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            cpi_accounts,
            signer_seeds,
        );

        transfer(cpi_ctx, self.vault_account.amount)?;

        let cpi_accounts = CloseAccount {
            account: self.vault_account.to_account_info(),
            destination: self.initializer.to_account_info(),
            authority: self.vault_pda.to_account_info(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            cpi_accounts,
            signer_seeds,
        );

        close_account(cpi_ctx)
    }
}

/// Handler for the exchange instruction
pub fn handler(ctx: Context<Exchange>) -> Result<()> {
    let (vault_authority, vault_authority_bump) =
        Pubkey::find_program_address(&[ESCROW_PDA_SEED], ctx.program_id);
    require_keys_eq!(
        ctx.accounts.vault_pda.key(),
        vault_authority,
        EscrowError::InvalidAccount
    );
    require_gte!(
        ctx.accounts.taker_deposit_account.amount,
        ctx.accounts.escrow_info.expected_amount,
        EscrowError::InvalidExchangeAmount
    );

    msg!("Send Token B to initializer");
    ctx.accounts.pay_initializer()?;

    msg!("Release vault to taker and close it");
    ctx.accounts.release_and_close_vault(vault_authority_bump)
}
