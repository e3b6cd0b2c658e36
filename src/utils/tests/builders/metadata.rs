//! Test helper utilities for Metaplex metadata accounts
//!
//! - `MetadataAccountBuilder`: Builds raw token metadata program account data

use crate::services::signature::pda::decode_pubkey;

/// Builder for raw, Borsh-encoded metadata account data
pub struct MetadataAccountBuilder {
	update_authority: [u8; 32],
	mint: [u8; 32],
	name: String,
	symbol: String,
	uri: String,
	seller_fee_basis_points: u16,
	creators: Vec<([u8; 32], bool, u8)>,
	collection: Option<(bool, [u8; 32])>,
}

impl Default for MetadataAccountBuilder {
	fn default() -> Self {
		Self {
			update_authority: [1u8; 32],
			mint: [2u8; 32],
			name: "Test NFT".to_string(),
			symbol: "TST".to_string(),
			uri: "https://example.com/1.json".to_string(),
			seller_fee_basis_points: 500,
			creators: vec![],
			collection: None,
		}
	}
}

fn pubkey(address: &str) -> [u8; 32] {
	decode_pubkey(address)
		.map(|key| key.to_bytes())
		.unwrap_or_default()
}

fn write_string(out: &mut Vec<u8>, value: &str) {
	out.extend_from_slice(&(value.len() as u32).to_le_bytes());
	out.extend_from_slice(value.as_bytes());
}

impl MetadataAccountBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn mint(mut self, mint: &str) -> Self {
		self.mint = pubkey(mint);
		self
	}

	pub fn name(mut self, name: &str) -> Self {
		self.name = name.to_string();
		self
	}

	pub fn symbol(mut self, symbol: &str) -> Self {
		self.symbol = symbol.to_string();
		self
	}

	pub fn uri(mut self, uri: &str) -> Self {
		self.uri = uri.to_string();
		self
	}

	pub fn creator(mut self, address: &str, verified: bool, share: u8) -> Self {
		self.creators.push((pubkey(address), verified, share));
		self
	}

	pub fn collection(mut self, key: &str, verified: bool) -> Self {
		self.collection = Some((verified, pubkey(key)));
		self
	}

	/// Account data as stored on chain, with the name padded the way the program pads it
	pub fn build(self) -> Vec<u8> {
		let mut out = vec![4u8];
		out.extend_from_slice(&self.update_authority);
		out.extend_from_slice(&self.mint);
		write_string(&mut out, &format!("{}\0\0\0\0", self.name));
		write_string(&mut out, &self.symbol);
		write_string(&mut out, &self.uri);
		out.extend_from_slice(&self.seller_fee_basis_points.to_le_bytes());

		if self.creators.is_empty() {
			out.push(0);
		} else {
			out.push(1);
			out.extend_from_slice(&(self.creators.len() as u32).to_le_bytes());
			for (address, verified, share) in &self.creators {
				out.extend_from_slice(address);
				out.push(u8::from(*verified));
				out.push(*share);
			}
		}

		// primary sale happened, is mutable
		out.push(0);
		out.push(1);
		// edition nonce
		out.push(1);
		out.push(255);
		// token standard
		out.push(1);
		out.push(0);

		match self.collection {
			Some((verified, key)) => {
				out.push(1);
				out.push(u8::from(verified));
				out.extend_from_slice(&key);
			}
			None => out.push(0),
		}
		out
	}
}
