use crate::properties::strategies::seeds_strategy;

use proptest::{prelude::*, test_runner::Config};
use solana_sdk::pubkey::Pubkey;
use wallet_verifier::services::signature::{
	pda::{create_program_address, find_program_address},
	SolanaSignatureVerifier,
};

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_found_address_is_off_curve_and_stable(
		seeds in seeds_strategy(),
		program in any::<[u8; 32]>()
	) {
		let program = Pubkey::new_from_array(program);
		let seeds: Vec<&[u8]> = seeds.iter().map(Vec::as_slice).collect();
		let (address, bump) = find_program_address(&seeds, &program).unwrap();

		prop_assert!(!address.is_on_curve());
		prop_assert_eq!(find_program_address(&seeds, &program).unwrap(), (address, bump));

		let bump_seed = [bump];
		let mut with_bump = seeds.clone();
		with_bump.push(&bump_seed);
		prop_assert_eq!(create_program_address(&with_bump, &program).unwrap(), address);
	}

	#[test]
	fn test_verify_pda_matches_derivation(
		seeds in seeds_strategy(),
		program in any::<[u8; 32]>(),
		other_program in any::<[u8; 32]>()
	) {
		prop_assume!(program != other_program);
		let program = Pubkey::new_from_array(program);
		let seeds: Vec<&[u8]> = seeds.iter().map(Vec::as_slice).collect();
		let (address, _) = find_program_address(&seeds, &program).unwrap();

		let verifier = SolanaSignatureVerifier::new();
		let address = address.to_string();
		prop_assert!(verifier
			.verify_pda(&address, &seeds, &program.to_string())
			.unwrap());
		prop_assert!(!verifier
			.verify_pda(&address, &seeds, &Pubkey::new_from_array(other_program).to_string())
			.unwrap());
	}
}
