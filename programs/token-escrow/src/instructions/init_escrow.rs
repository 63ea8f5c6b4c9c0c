use anchor_lang::prelude::*;
use anchor_spl::token::{
    set_authority, spl_token::instruction::AuthorityType, SetAuthority, Token, TokenAccount,
};

use crate::errors::EscrowError;
use crate::state::{Escrow, ESCROW_PDA_SEED};

#[derive(Accounts)]
pub struct InitEscrow<'info> {
    /// Escrow record; a fresh caller-funded keypair account
    #[account(init, payer = initializer, space = 8 + Escrow::INIT_SPACE)]
    pub escrow_info: Account<'info, Escrow>,

    /// The depositor who sets the exchange terms
    #[account(mut)]
    pub initializer: Signer<'info>,

    /// Initializer's Token B account, credited at exchange time
    pub initializer_receive_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,

    pub rent: Sysvar<'info, Rent>,

    pub system_program: Program<'info, System>,

    /// Vault holding the Token A deposit. The caller creates and funds
    /// it earlier in the same transaction; authority moves to the
    /// program PDA here so only program logic can release the funds.
    #[account(mut, rent_exempt = enforce)]
    pub vault_account: Account<'info, TokenAccount>,
}

impl<'info> InitEscrow<'info> {
    /// Populate the escrow record with the exchange terms
    fn record_terms(&mut self, expected_amount: u64) {
        self.escrow_info.set_inner(Escrow {
            is_initialized: true,
            initializer: self.initializer.key(),
            vault_account: self.vault_account.key(),
            initializer_receive_account: self.initializer_receive_account.key(),
            expected_amount,
        });
    }

    /// Reassign vault ownership from the initializer to the program PDA
    fn assign_vault_to_program(&self, vault_authority: Pubkey) -> Result<()> {
        let cpi_accounts = SetAuthority {
            account_or_mint: self.vault_account.to_account_info(),
            current_authority: self.initializer.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), cpi_accounts);

        set_authority(cpi_ctx, AuthorityType::AccountOwner, Some(vault_authority))
    }
}

/// Handler for the init_escrow instruction
pub fn handler(ctx: Context<InitEscrow>, expected_amount: u64) -> Result<()> {
    require_gt!(expected_amount, 0, EscrowError::InvalidAmount);
    require!(
        !ctx.accounts.escrow_info.is_initialized,
        EscrowError::AlreadyInitialized
    );

    ctx.accounts.record_terms(expected_amount);

    let (vault_authority, _bump) = Pubkey::find_program_address(&[ESCROW_PDA_SEED], ctx.program_id);
    msg!("Assign vault authority to {}", vault_authority);
    ctx.accounts.assign_vault_to_program(vault_authority)
}
