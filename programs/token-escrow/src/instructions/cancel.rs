use anchor_lang::prelude::*;
use anchor_spl::token::{close_account, transfer, CloseAccount, Token, TokenAccount, Transfer};

use crate::errors::EscrowError;
use crate::state::{Escrow, ESCROW_PDA_SEED};

#[derive(Accounts)]
pub struct Cancel<'info> {
    /// The depositor reclaiming the offer (only the initializer may cancel)
    #[account(mut)]
    pub initializer: Signer<'info>,

    /// Escrow record storing the terms (closed on success)
    #[account(
        mut,
        close = initializer,
        has_one = initializer @ EscrowError::InvalidAccount,
        has_one = vault_account @ EscrowError::InvalidAccount,
        constraint = escrow_info.is_initialized @ EscrowError::NotInitialized,
    )]
    pub escrow_info: Account<'info, Escrow>,

    /// Initializer's Token A account that takes back the deposit
    #[account(mut)]
    pub token_deposit_account: Account<'info, TokenAccount>,

    /// Vault holding the Token A deposit (closed on success)
    #[account(mut)]
    pub vault_account: Account<'info, TokenAccount>,

    /// CHECK: compared against the canonical seed derivation in the handler
    pub vault_pda: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

impl<'info> Cancel<'info> {
    /// Return the full vault balance to the initializer, then close the
    /// vault; both signed by the vault authority PDA
    fn refund_and_close_vault(&self, vault_authority_bump: u8) -> Result<()> {
        let signer_seeds: &[&[&[u8]]] = &[&[ESCROW_PDA_SEED, &[vault_authority_bump]]];

        let cpi_accounts = Transfer {
            from: self.vault_account.to_account_info(),
            to: self.token_deposit_account.to_account_info(),
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

/// Handler for the cancel instruction
pub fn handler(ctx: Context<Cancel>) -> Result<()> {
    let (vault_authority, vault_authority_bump) =
        Pubkey::find_program_address(&[ESCROW_PDA_SEED], ctx.program_id);
    require_keys_eq!(
        ctx.accounts.vault_pda.key(),
        vault_authority,
        EscrowError::InvalidAccount
    );

    msg!("Return vault balance to initializer and close it");
    ctx.accounts.refund_and_close_vault(vault_authority_bump)
}
