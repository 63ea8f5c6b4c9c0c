//! Off-chain orchestration for the token-escrow program.
//!
//! Everything goes through an explicitly constructed [`EscrowClient`]
//! context; there is no ambient provider or process-wide singleton.

use std::rc::Rc;
use std::str::FromStr;

use anchor_client::solana_sdk::{
    commitment_config::CommitmentConfig,
    program_error::ProgramError,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    system_instruction, system_program, sysvar,
};
use anchor_client::{Client, Cluster, Program};
use anchor_spl::token::spl_token;
use thiserror::Error;

use token_escrow::state::ESCROW_PDA_SEED;

/// Both demo mints are created with 6 decimals
pub const MINT_DECIMALS: u8 = 6;

#[derive(Debug, Error)]
pub enum EscrowClientError {
    #[error("anchor client error: {0}")]
    Anchor(#[from] anchor_client::ClientError),
    #[error("rpc error: {0}")]
    Rpc(#[from] solana_rpc_client_api::client_error::Error),
    #[error("instruction build error: {0}")]
    Instruction(#[from] ProgramError),
    #[error("invalid token balance value: {0}")]
    Balance(#[from] std::num::ParseIntError),
    #[error("invalid cluster: {0}")]
    Cluster(String),
}

/// Resolve the target cluster from an optional URL (typically the
/// `ANCHOR_PROVIDER_URL` environment variable), defaulting to localnet.
pub fn cluster_from_url(url: Option<&str>) -> Result<Cluster, EscrowClientError> {
    match url {
        Some(url) => Cluster::from_str(url).map_err(|e| EscrowClientError::Cluster(e.to_string())),
        None => Ok(Cluster::Localnet),
    }
}

/// Client context for one escrow program deployment: cluster, fee payer
/// and program handle, passed explicitly to every call.
pub struct EscrowClient {
    program: Program<Rc<Keypair>>,
    payer: Rc<Keypair>,
}

impl EscrowClient {
    pub fn new(cluster: Cluster, payer: Rc<Keypair>) -> Result<Self, EscrowClientError> {
        let client = Client::new_with_options(cluster, payer.clone(), CommitmentConfig::confirmed());
        let program = client.program(token_escrow::ID)?;
        Ok(Self { program, payer })
    }

    pub fn program_id(&self) -> Pubkey {
        self.program.id()
    }

    /// The PDA that owns every vault of this program deployment
    pub fn vault_authority(&self) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[ESCROW_PDA_SEED], &self.program.id())
    }

    /// Request an airdrop and wait for it to land
    pub fn airdrop(&self, to: &Pubkey, lamports: u64) -> Result<(), EscrowClientError> {
        let rpc = self.program.rpc();
        let signature = rpc.request_airdrop(to, lamports)?;
        rpc.poll_for_signature(&signature)?;
        Ok(())
    }

    /// Create a new mint with the given authority, funded by the payer
    pub fn create_mint(&self, authority: &Pubkey) -> Result<Pubkey, EscrowClientError> {
        let mint = Keypair::new();
        let span = anchor_spl::token::Mint::LEN;
        let lamports = self
            .program
            .rpc()
            .get_minimum_balance_for_rent_exemption(span)?;

        let create_ix = system_instruction::create_account(
            &self.payer.pubkey(),
            &mint.pubkey(),
            lamports,
            span as u64,
            &spl_token::ID,
        );
        let init_ix = spl_token::instruction::initialize_mint(
            &spl_token::ID,
            &mint.pubkey(),
            authority,
            Some(authority),
            MINT_DECIMALS,
        )?;

        self.program
            .request()
            .instruction(create_ix)
            .instruction(init_ix)
            .signer(&mint)
            .send()?;

        Ok(mint.pubkey())
    }

    /// Create a plain (non-associated) token account owned by `owner`
    pub fn create_token_account(
        &self,
        mint: &Pubkey,
        owner: &Pubkey,
    ) -> Result<Pubkey, EscrowClientError> {
        let account = Keypair::new();
        let span = anchor_spl::token::TokenAccount::LEN;
        let lamports = self
            .program
            .rpc()
            .get_minimum_balance_for_rent_exemption(span)?;

        let create_ix = system_instruction::create_account(
            &self.payer.pubkey(),
            &account.pubkey(),
            lamports,
            span as u64,
            &spl_token::ID,
        );
        let init_ix = spl_token::instruction::initialize_account(
            &spl_token::ID,
            &account.pubkey(),
            mint,
            owner,
        )?;

        self.program
            .request()
            .instruction(create_ix)
            .instruction(init_ix)
            .signer(&account)
            .send()?;

        Ok(account.pubkey())
    }

    pub fn mint_to(
        &self,
        mint: &Pubkey,
        account: &Pubkey,
        authority: &Keypair,
        amount: u64,
    ) -> Result<(), EscrowClientError> {
        let ix = spl_token::instruction::mint_to(
            &spl_token::ID,
            mint,
            account,
            &authority.pubkey(),
            &[],
            amount,
        )?;

        self.program.request().instruction(ix).signer(authority).send()?;
        Ok(())
    }

    pub fn token_balance(&self, account: &Pubkey) -> Result<u64, EscrowClientError> {
        let balance = self.program.rpc().get_token_account_balance(account)?;
        Ok(balance.amount.parse()?)
    }

    /// Open an escrow in one atomic transaction: create the vault,
    /// initialize it as a Token A account, move `deposit` into it, then
    /// call `init_escrow(expected_amount)`.
    #[allow(clippy::too_many_arguments)]
    pub fn init_escrow(
        &self,
        initializer: &Keypair,
        escrow: &Keypair,
        vault: &Keypair,
        mint_a: &Pubkey,
        deposit_account: &Pubkey,
        receive_account: &Pubkey,
        deposit: u64,
        expected_amount: u64,
    ) -> Result<Signature, EscrowClientError> {
        let span = anchor_spl::token::TokenAccount::LEN;
        let lamports = self
            .program
            .rpc()
            .get_minimum_balance_for_rent_exemption(span)?;

        let create_vault_ix = system_instruction::create_account(
            &initializer.pubkey(),
            &vault.pubkey(),
            lamports,
            span as u64,
            &spl_token::ID,
        );
        let init_vault_ix = spl_token::instruction::initialize_account(
            &spl_token::ID,
            &vault.pubkey(),
            mint_a,
            &initializer.pubkey(),
        )?;
        let fund_vault_ix = spl_token::instruction::transfer(
            &spl_token::ID,
            deposit_account,
            &vault.pubkey(),
            &initializer.pubkey(),
            &[],
            deposit,
        )?;

        let signature = self
            .program
            .request()
            .instruction(create_vault_ix)
            .instruction(init_vault_ix)
            .instruction(fund_vault_ix)
            .accounts(token_escrow::accounts::InitEscrow {
                escrow_info: escrow.pubkey(),
                initializer: initializer.pubkey(),
                initializer_receive_account: *receive_account,
                token_program: spl_token::ID,
                rent: sysvar::rent::ID,
                system_program: system_program::ID,
                vault_account: vault.pubkey(),
            })
            .args(token_escrow::instruction::InitEscrow { expected_amount })
            .signer(escrow)
            .signer(vault)
            .signer(initializer)
            .send()?;

        Ok(signature)
    }

    /// Settle an open escrow as the taker
    #[allow(clippy::too_many_arguments)]
    pub fn exchange(
        &self,
        taker: &Keypair,
        escrow: &Pubkey,
        initializer: &Pubkey,
        initializer_receive_account: &Pubkey,
        taker_receive_account: &Pubkey,
        taker_deposit_account: &Pubkey,
        vault_account: &Pubkey,
    ) -> Result<Signature, EscrowClientError> {
        let (vault_pda, _bump) = self.vault_authority();

        let signature = self
            .program
            .request()
            .accounts(token_escrow::accounts::Exchange {
                taker: taker.pubkey(),
                initializer: *initializer,
                escrow_info: *escrow,
                initializer_receive_account: *initializer_receive_account,
                taker_receive_account: *taker_receive_account,
                taker_deposit_account: *taker_deposit_account,
                token_program: spl_token::ID,
                vault_account: *vault_account,
                vault_pda,
            })
            .args(token_escrow::instruction::Exchange {})
            .signer(taker)
            .send()?;

        Ok(signature)
    }

    /// Cancel an open escrow as the initializer, reclaiming the deposit
    pub fn cancel(
        &self,
        initializer: &Keypair,
        escrow: &Pubkey,
        deposit_account: &Pubkey,
        vault_account: &Pubkey,
    ) -> Result<Signature, EscrowClientError> {
        let (vault_pda, _bump) = self.vault_authority();

        let signature = self
            .program
            .request()
            .accounts(token_escrow::accounts::Cancel {
                initializer: initializer.pubkey(),
                escrow_info: *escrow,
                token_deposit_account: *deposit_account,
                vault_account: *vault_account,
                vault_pda,
                token_program: spl_token::ID,
            })
            .args(token_escrow::instruction::Cancel {})
            .signer(initializer)
            .send()?;

        Ok(signature)
    }
}
