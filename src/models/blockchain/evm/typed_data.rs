//! Typed structured data payloads (EIP-712 JSON shape).

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Name of the reserved domain type
pub const EIP712_DOMAIN_TYPE: &str = "EIP712Domain";

/// A single member of a struct type definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedDataField {
	pub name: String,
	#[serde(rename = "type")]
	pub type_name: String,
}

impl TypedDataField {
	pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			type_name: type_name.into(),
		}
	}
}

/// Struct type definitions keyed by type name. Member order is declaration order.
pub type TypedDataTypes = BTreeMap<String, Vec<TypedDataField>>;

/// Signing domain of a typed-data payload
///
/// Every member is optional; only the members that are present take part in the
/// domain type and the domain separator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDataDomain {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub version: Option<String>,
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		deserialize_with = "deserialize_chain_id"
	)]
	pub chain_id: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub verifying_contract: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub salt: Option<String>,
}

impl TypedDataDomain {
	/// Member list of the domain type, derived from the members that are set
	pub fn fields(&self) -> Vec<TypedDataField> {
		let mut fields = Vec::with_capacity(5);
		if self.name.is_some() {
			fields.push(TypedDataField::new("name", "string"));
		}
		if self.version.is_some() {
			fields.push(TypedDataField::new("version", "string"));
		}
		if self.chain_id.is_some() {
			fields.push(TypedDataField::new("chainId", "uint256"));
		}
		if self.verifying_contract.is_some() {
			fields.push(TypedDataField::new("verifyingContract", "address"));
		}
		if self.salt.is_some() {
			fields.push(TypedDataField::new("salt", "bytes32"));
		}
		fields
	}

	/// Domain members as a JSON object, keyed by their typed-data member names
	pub fn values(&self) -> Map<String, Value> {
		let mut values = Map::new();
		if let Some(name) = &self.name {
			values.insert("name".into(), Value::String(name.clone()));
		}
		if let Some(version) = &self.version {
			values.insert("version".into(), Value::String(version.clone()));
		}
		if let Some(chain_id) = self.chain_id {
			values.insert("chainId".into(), Value::from(chain_id));
		}
		if let Some(contract) = &self.verifying_contract {
			values.insert("verifyingContract".into(), Value::String(contract.clone()));
		}
		if let Some(salt) = &self.salt {
			values.insert("salt".into(), Value::String(salt.clone()));
		}
		values
	}
}

/// Complete typed-data payload as presented for signing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedData {
	pub types: TypedDataTypes,
	pub primary_type: String,
	#[serde(default)]
	pub domain: TypedDataDomain,
	pub message: Map<String, Value>,
}

/// Accepts a chain id given as a JSON number, a decimal string or a `0x` hex string
fn deserialize_chain_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;
	match value {
		None | Some(Value::Null) => Ok(None),
		Some(Value::Number(n)) => n
			.as_u64()
			.map(Some)
			.ok_or_else(|| de::Error::custom(format!("invalid chainId: {}", n))),
		Some(Value::String(s)) => {
			let parsed = match s.strip_prefix("0x") {
				Some(hex) => u64::from_str_radix(hex, 16),
				None => s.parse::<u64>(),
			};
			parsed
				.map(Some)
				.map_err(|_| de::Error::custom(format!("invalid chainId: {}", s)))
		}
		Some(other) => Err(de::Error::custom(format!("invalid chainId: {}", other))),
	}
}
