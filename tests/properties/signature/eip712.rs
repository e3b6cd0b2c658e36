use crate::properties::strategies::{permit_strategy, uint256_strategy};

use alloy::primitives::U256;
use proptest::{prelude::*, test_runner::Config};
use wallet_verifier::services::signature::{hash_typed_data, TypedDataEncoder};

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_digest_is_deterministic(typed_data in permit_strategy()) {
		let first = hash_typed_data(&typed_data).unwrap();
		let second = hash_typed_data(&typed_data.clone()).unwrap();
		prop_assert_eq!(first, second);
	}

	#[test]
	fn test_digest_survives_json_round_trip(typed_data in permit_strategy()) {
		let json = serde_json::to_value(&typed_data).unwrap();
		let reparsed = serde_json::from_value(json).unwrap();
		prop_assert_eq!(
			hash_typed_data(&typed_data).unwrap(),
			hash_typed_data(&reparsed).unwrap()
		);
	}

	#[test]
	fn test_value_change_changes_digest(
		typed_data in permit_strategy(),
		other in uint256_strategy()
	) {
		let current = typed_data.message["value"]
			.as_str()
			.and_then(|v| v.parse::<U256>().ok())
			.unwrap();
		prop_assume!(current != other);

		let mut changed = typed_data.clone();
		changed.message.insert("value".to_string(), other.to_string().into());
		prop_assert_ne!(
			hash_typed_data(&typed_data).unwrap(),
			hash_typed_data(&changed).unwrap()
		);
	}

	#[test]
	fn test_chain_id_separates_domains(typed_data in permit_strategy()) {
		let mut other_chain = typed_data.clone();
		other_chain.domain.chain_id = typed_data.domain.chain_id.map(|id| id + 1);

		let encoder = TypedDataEncoder::new(&typed_data);
		let other_encoder = TypedDataEncoder::new(&other_chain);
		prop_assert_eq!(encoder.message_hash().unwrap(), other_encoder.message_hash().unwrap());
		prop_assert_ne!(encoder.domain_separator().unwrap(), other_encoder.domain_separator().unwrap());
	}
}
