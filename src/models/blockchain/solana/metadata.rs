//! Metaplex NFT metadata.
//!
//! `MetadataAccount` is the Borsh-encoded account owned by the token metadata
//! program; `MetaplexMetadata` is the JSON document referenced by its `uri`.

use borsh::BorshDeserialize;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Off-chain metadata document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaplexMetadata {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub symbol: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub seller_fee_basis_points: u16,
	#[serde(default)]
	pub image: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub external_url: Option<String>,
	#[serde(default)]
	pub attributes: Vec<MetadataAttribute>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub properties: Option<MetadataProperties>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub collection: Option<MetadataCollection>,
}

impl MetaplexMetadata {
	/// Field comparison against an expected document.
	///
	/// Compares name, symbol, description, royalty basis points, image and the
	/// attribute list. Attributes must match pairwise in declared order.
	pub fn matches(&self, expected: &MetaplexMetadata) -> bool {
		self.name == expected.name
			&& self.symbol == expected.symbol
			&& self.description == expected.description
			&& self.seller_fee_basis_points == expected.seller_fee_basis_points
			&& self.image == expected.image
			&& self.attributes == expected.attributes
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataAttribute {
	pub trait_type: String,
	pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataProperties {
	#[serde(default)]
	pub creators: Vec<MetadataCreator>,
	#[serde(default)]
	pub files: Vec<MetadataFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataCreator {
	pub address: String,
	#[serde(default)]
	pub share: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataFile {
	pub uri: String,
	#[serde(rename = "type", default)]
	pub file_type: String,
	#[serde(default)]
	pub cdn: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataCollection {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub family: String,
}

/// Creator entry stored in the on-chain metadata account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnChainCreator {
	pub address: String,
	pub verified: bool,
	pub share: u8,
}

/// Collection entry stored in the on-chain metadata account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnChainCollection {
	pub verified: bool,
	pub key: String,
}

/// Decoded token metadata program account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataAccount {
	pub key: u8,
	pub update_authority: String,
	pub mint: String,
	pub name: String,
	pub symbol: String,
	pub uri: String,
	pub seller_fee_basis_points: u16,
	pub creators: Vec<OnChainCreator>,
	pub primary_sale_happened: bool,
	pub is_mutable: bool,
	pub edition_nonce: Option<u8>,
	pub token_standard: Option<u8>,
	pub collection: Option<OnChainCollection>,
}

#[derive(BorshDeserialize)]
struct RawCreator {
	address: [u8; 32],
	verified: bool,
	share: u8,
}

#[derive(BorshDeserialize)]
struct RawData {
	name: String,
	symbol: String,
	uri: String,
	seller_fee_basis_points: u16,
	creators: Option<Vec<RawCreator>>,
}

#[derive(BorshDeserialize)]
struct RawHeader {
	key: u8,
	update_authority: [u8; 32],
	mint: [u8; 32],
	data: RawData,
	primary_sale_happened: bool,
	is_mutable: bool,
}

#[derive(BorshDeserialize)]
struct RawCollection {
	verified: bool,
	key: [u8; 32],
}

fn trim_padding(value: String) -> String {
	value.trim_end_matches('\0').to_string()
}

impl MetadataAccount {
	/// Decodes raw account data.
	///
	/// The fixed header must be present. Later optional members (edition nonce,
	/// token standard, collection) were appended in later program versions and are
	/// read while the buffer allows.
	pub fn from_account_data(data: &[u8]) -> Result<Self, std::io::Error> {
		let mut buf = data;
		let header = <RawHeader as BorshDeserialize>::deserialize(&mut buf)?;

		let edition_nonce = <Option<u8> as BorshDeserialize>::deserialize(&mut buf)
			.ok()
			.flatten();
		let token_standard = if buf.is_empty() {
			None
		} else {
			<Option<u8> as BorshDeserialize>::deserialize(&mut buf)
				.ok()
				.flatten()
		};
		let collection = if buf.is_empty() {
			None
		} else {
			<Option<RawCollection> as BorshDeserialize>::deserialize(&mut buf)
				.ok()
				.flatten()
				.map(|c| OnChainCollection {
					verified: c.verified,
					key: bs58::encode(c.key).into_string(),
				})
		};

		Ok(Self {
			key: header.key,
			update_authority: bs58::encode(header.update_authority).into_string(),
			mint: bs58::encode(header.mint).into_string(),
			name: trim_padding(header.data.name),
			symbol: trim_padding(header.data.symbol),
			uri: trim_padding(header.data.uri),
			seller_fee_basis_points: header.data.seller_fee_basis_points,
			creators: header
				.data
				.creators
				.unwrap_or_default()
				.into_iter()
				.map(|c| OnChainCreator {
					address: bs58::encode(c.address).into_string(),
					verified: c.verified,
					share: c.share,
				})
				.collect(),
			primary_sale_happened: header.primary_sale_happened,
			is_mutable: header.is_mutable,
			edition_nonce,
			token_standard,
			collection,
		})
	}

	/// Whether `creator` is listed and has signed the metadata
	pub fn has_verified_creator(&self, creator: &str) -> bool {
		self.creators
			.iter()
			.any(|c| c.address == creator && c.verified)
	}
}
