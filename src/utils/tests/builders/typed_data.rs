//! Test helper utilities for typed structured data
//!
//! - `TypedDataBuilder`: Builder for creating test TypedData instances

use serde_json::{Map, Value};

use crate::models::{TypedData, TypedDataDomain, TypedDataField, TypedDataTypes};

/// Builder for creating test TypedData instances
pub struct TypedDataBuilder {
	types: TypedDataTypes,
	primary_type: String,
	domain: TypedDataDomain,
	message: Map<String, Value>,
}

impl Default for TypedDataBuilder {
	fn default() -> Self {
		Self {
			types: TypedDataTypes::new(),
			primary_type: String::new(),
			domain: TypedDataDomain {
				name: Some("Test".to_string()),
				version: Some("1".to_string()),
				chain_id: Some(1),
				verifying_contract: Some("0x0".to_string()),
				salt: None,
			},
			message: Map::new(),
		}
	}
}

impl TypedDataBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// `Permit{owner,spender,value,nonce,deadline}` with fixed sample values
	pub fn permit() -> Self {
		Self::new()
			.struct_type(
				"Permit",
				&[
					("owner", "address"),
					("spender", "address"),
					("value", "uint256"),
					("nonce", "uint256"),
					("deadline", "uint256"),
				],
			)
			.primary_type("Permit")
			.field("owner", "0x1111111111111111111111111111111111111111")
			.field("spender", "0x2222222222222222222222222222222222222222")
			.field("value", "1000000000000000000")
			.field("nonce", 0)
			.field("deadline", 1_700_000_000u64)
	}

	pub fn struct_type(mut self, name: &str, fields: &[(&str, &str)]) -> Self {
		self.types.insert(
			name.to_string(),
			fields
				.iter()
				.map(|(n, t)| TypedDataField::new(*n, *t))
				.collect(),
		);
		self
	}

	pub fn primary_type(mut self, name: &str) -> Self {
		self.primary_type = name.to_string();
		self
	}

	pub fn domain(mut self, domain: TypedDataDomain) -> Self {
		self.domain = domain;
		self
	}

	pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
		self.message.insert(name.to_string(), value.into());
		self
	}

	pub fn build(self) -> TypedData {
		TypedData {
			types: self.types,
			primary_type: self.primary_type,
			domain: self.domain,
			message: self.message,
		}
	}
}
