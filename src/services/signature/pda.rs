//! Solana program derived addresses.
//!
//! Derivation goes through `Pubkey::find_program_address`: the bump seed is
//! searched downward from 255 until the hash of
//! `seeds || bump || program_id || "ProgramDerivedAddress"` is off the ed25519
//! curve. Seed limits are checked up front so bad input surfaces as
//! `InvalidSeeds` instead of an exhausted search.

use std::str::FromStr;

use solana_sdk::pubkey::{Pubkey, PubkeyError};

use crate::{
	services::signature::SignatureError,
	utils::constants::{ASSOCIATED_TOKEN_PROGRAM_ID, METADATA_PROGRAM_ID, TOKEN_PROGRAM_ID},
};

pub const MAX_SEEDS: usize = 16;
pub const MAX_SEED_LEN: usize = 32;

/// Parses a base58 public key
pub fn decode_pubkey(address: &str) -> Result<Pubkey, SignatureError> {
	Pubkey::from_str(address).map_err(|_| SignatureError::invalid_address(address))
}

fn check_seeds(seeds: &[&[u8]], max_seeds: usize) -> Result<(), SignatureError> {
	if seeds.len() > max_seeds {
		return Err(SignatureError::InvalidSeeds(format!(
			"{} seeds exceed the maximum of {}",
			seeds.len(),
			max_seeds
		)));
	}
	if let Some(seed) = seeds.iter().find(|seed| seed.len() > MAX_SEED_LEN) {
		return Err(SignatureError::InvalidSeeds(format!(
			"seed of {} bytes exceeds the maximum of {}",
			seed.len(),
			MAX_SEED_LEN
		)));
	}
	Ok(())
}

/// Derives the address for an exact seed list, bump included if any.
/// An on-curve result is rejected.
pub fn create_program_address(
	seeds: &[&[u8]],
	program_id: &Pubkey,
) -> Result<Pubkey, SignatureError> {
	check_seeds(seeds, MAX_SEEDS)?;
	Pubkey::create_program_address(seeds, program_id).map_err(|e| match e {
		PubkeyError::InvalidSeeds => SignatureError::InvalidSeeds(
			"derived address lies on the ed25519 curve".to_string(),
		),
		other => SignatureError::InvalidSeeds(other.to_string()),
	})
}

/// Finds the first off-curve address and its bump seed
pub fn find_program_address(
	seeds: &[&[u8]],
	program_id: &Pubkey,
) -> Result<(Pubkey, u8), SignatureError> {
	// One slot is reserved for the bump
	check_seeds(seeds, MAX_SEEDS - 1)?;
	Pubkey::try_find_program_address(seeds, program_id)
		.ok_or_else(|| SignatureError::InvalidSeeds("no viable bump seed found".to_string()))
}

/// Associated token account of `wallet` for `mint`
pub fn associated_token_address(wallet: &str, mint: &str) -> Result<String, SignatureError> {
	let wallet = decode_pubkey(wallet)?;
	let mint = decode_pubkey(mint)?;
	let token_program = decode_pubkey(TOKEN_PROGRAM_ID)?;
	let ata_program = decode_pubkey(ASSOCIATED_TOKEN_PROGRAM_ID)?;

	let (address, _) = find_program_address(
		&[wallet.as_ref(), token_program.as_ref(), mint.as_ref()],
		&ata_program,
	)?;
	Ok(address.to_string())
}

/// Metaplex metadata account of `mint`
pub fn metadata_address(mint: &str) -> Result<String, SignatureError> {
	let mint = decode_pubkey(mint)?;
	let program = decode_pubkey(METADATA_PROGRAM_ID)?;

	let (address, _) = find_program_address(
		&[b"metadata".as_slice(), program.as_ref(), mint.as_ref()],
		&program,
	)?;
	Ok(address.to_string())
}
