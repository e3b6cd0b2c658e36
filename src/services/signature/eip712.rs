//! Typed structured data hashing.
//!
//! Produces the 32-byte digest that wallets sign for typed-data requests:
//! `keccak256(0x19 0x01 || hashStruct(domain) || hashStruct(primaryType, message))`.
//!
//! A type string is the struct's own `Name(type1 name1,...)` in declaration
//! order, followed by every struct type it references, sorted by name. The
//! type hash covers that whole string, so nested structs hash the same way a
//! wallet does. `bytesN` values are truncated to N bytes before hashing.

use std::collections::HashSet;

use alloy::primitives::{keccak256, B256, I256, U256};
use serde_json::{Map, Value};

use crate::{
	models::{TypedData, TypedDataField, EIP712_DOMAIN_TYPE},
	services::signature::SignatureError,
};

/// Classified member type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind<'a> {
	Address,
	Bool,
	String,
	Bytes,
	FixedBytes(usize),
	Uint(usize),
	Int(usize),
	Array(&'a str),
	Struct(&'a str),
}

/// Parses the bit size of `uintN` / `intN`; a bare `uint` / `int` means 256
fn int_size(suffix: &str, type_name: &str) -> Result<usize, SignatureError> {
	if suffix.is_empty() {
		return Ok(256);
	}
	match suffix.parse::<usize>() {
		Ok(bits) if bits > 0 && bits <= 256 && bits % 8 == 0 => Ok(bits),
		_ => Err(SignatureError::unsupported(type_name)),
	}
}

fn is_digits(s: &str) -> bool {
	!s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Encoder bound to one typed-data payload
pub struct TypedDataEncoder<'a> {
	typed_data: &'a TypedData,
	domain_fields: Vec<TypedDataField>,
}

impl<'a> TypedDataEncoder<'a> {
	pub fn new(typed_data: &'a TypedData) -> Self {
		Self {
			typed_data,
			domain_fields: typed_data.domain.fields(),
		}
	}

	/// Member list of a struct type. The domain type falls back to the members
	/// present in the domain when the payload does not declare it.
	fn fields_of(&self, type_name: &str) -> Option<&[TypedDataField]> {
		match self.typed_data.types.get(type_name) {
			Some(fields) => Some(fields.as_slice()),
			None if type_name == EIP712_DOMAIN_TYPE => Some(self.domain_fields.as_slice()),
			None => None,
		}
	}

	fn is_struct(&self, type_name: &str) -> bool {
		self.fields_of(type_name).is_some()
	}

	fn classify<'t>(&self, type_name: &'t str) -> Result<FieldKind<'t>, SignatureError> {
		if let Some(inner) = type_name.strip_suffix(']') {
			let open = inner
				.rfind('[')
				.ok_or_else(|| SignatureError::unsupported(type_name))?;
			let length = &inner[open + 1..];
			if !length.is_empty() && !is_digits(length) {
				return Err(SignatureError::unsupported(type_name));
			}
			return Ok(FieldKind::Array(&inner[..open]));
		}

		match type_name {
			"address" => return Ok(FieldKind::Address),
			"bool" => return Ok(FieldKind::Bool),
			"string" => return Ok(FieldKind::String),
			"bytes" => return Ok(FieldKind::Bytes),
			_ => {}
		}

		if let Some(suffix) = type_name.strip_prefix("bytes") {
			if is_digits(suffix) {
				return match suffix.parse::<usize>() {
					Ok(n) if (1..=32).contains(&n) => Ok(FieldKind::FixedBytes(n)),
					_ => Err(SignatureError::unsupported(type_name)),
				};
			}
		}
		if let Some(suffix) = type_name.strip_prefix("uint") {
			if suffix.is_empty() || is_digits(suffix) {
				return int_size(suffix, type_name).map(FieldKind::Uint);
			}
		}
		if let Some(suffix) = type_name.strip_prefix("int") {
			if suffix.is_empty() || is_digits(suffix) {
				return int_size(suffix, type_name).map(FieldKind::Int);
			}
		}

		if self.is_struct(type_name) {
			Ok(FieldKind::Struct(type_name))
		} else {
			Err(SignatureError::unsupported(type_name))
		}
	}

	/// `Name(type1 name1,type2 name2,...)` for the type's own members
	pub fn encode_struct(&self, type_name: &str) -> Result<String, SignatureError> {
		let fields = self.fields_of(type_name).ok_or_else(|| {
			SignatureError::malformed(format!("type {} is not defined", type_name))
		})?;
		let members = fields
			.iter()
			.map(|f| format!("{} {}", f.type_name, f.name))
			.collect::<Vec<_>>()
			.join(",");
		Ok(format!("{}({})", type_name, members))
	}

	/// The type's own encoding followed by its dependencies sorted by name
	pub fn encode_type(&self, type_name: &str) -> Result<String, SignatureError> {
		let mut encoded = self.encode_struct(type_name)?;
		let mut dependencies = self.dependencies(type_name)?;
		dependencies.sort();
		for dependency in dependencies {
			encoded.push_str(&self.encode_struct(&dependency)?);
		}
		Ok(encoded)
	}

	pub fn type_hash(&self, type_name: &str) -> Result<B256, SignatureError> {
		Ok(keccak256(self.encode_type(type_name)?.as_bytes()))
	}

	/// Struct types reachable from `type_name`, each once, in discovery order.
	/// The type itself is not included.
	pub fn dependencies(&self, type_name: &str) -> Result<Vec<String>, SignatureError> {
		let mut visited = HashSet::new();
		let mut found = Vec::new();
		visited.insert(type_name.to_string());
		self.collect_dependencies(type_name, &mut visited, &mut found)?;
		Ok(found)
	}

	fn collect_dependencies(
		&self,
		type_name: &str,
		visited: &mut HashSet<String>,
		found: &mut Vec<String>,
	) -> Result<(), SignatureError> {
		let fields = self.fields_of(type_name).ok_or_else(|| {
			SignatureError::malformed(format!("type {} is not defined", type_name))
		})?;

		for field in fields {
			let mut kind = self.classify(&field.type_name)?;
			while let FieldKind::Array(inner) = kind {
				kind = self.classify(inner)?;
			}
			if let FieldKind::Struct(name) = kind {
				if visited.insert(name.to_string()) {
					found.push(name.to_string());
					self.collect_dependencies(name, visited, found)?;
				}
			}
		}
		Ok(())
	}

	/// Encoded dependencies in discovery order, followed by the encoded type itself
	pub fn find_dependencies(&self, type_name: &str) -> Result<String, SignatureError> {
		let mut encoded = String::new();
		for dependency in self.dependencies(type_name)? {
			encoded.push_str(&self.encode_struct(&dependency)?);
		}
		encoded.push_str(&self.encode_struct(type_name)?);
		Ok(encoded)
	}

	/// 32-byte encoding of one member value
	pub fn hash_value(&self, type_name: &str, value: &Value) -> Result<B256, SignatureError> {
		match self.classify(type_name)? {
			FieldKind::Address => encode_address(value),
			FieldKind::Bool => match value {
				Value::Bool(b) => Ok(B256::from(U256::from(*b as u8))),
				Value::String(s) if s == "true" || s == "false" => {
					Ok(B256::from(U256::from((s == "true") as u8)))
				}
				other => Err(SignatureError::malformed(format!("expected bool, got {}", other))),
			},
			FieldKind::String => match value {
				Value::String(s) => Ok(keccak256(s.as_bytes())),
				other => Err(SignatureError::malformed(format!(
					"expected string, got {}",
					other
				))),
			},
			FieldKind::Bytes => Ok(keccak256(decode_hex_bytes(value)?)),
			FieldKind::FixedBytes(size) => {
				let bytes = decode_hex_bytes(value)?;
				Ok(keccak256(&bytes[..bytes.len().min(size)]))
			}
			FieldKind::Uint(bits) => encode_uint(value, bits),
			FieldKind::Int(_) => encode_int(value),
			FieldKind::Array(inner) => {
				let items = value.as_array().ok_or_else(|| {
					SignatureError::malformed(format!("expected array for {}", type_name))
				})?;
				let mut buffer = Vec::with_capacity(items.len() * 32);
				for item in items {
					buffer.extend_from_slice(self.hash_value(inner, item)?.as_slice());
				}
				Ok(keccak256(buffer))
			}
			FieldKind::Struct(name) => {
				let values = value.as_object().ok_or_else(|| {
					SignatureError::malformed(format!("expected object for {}", name))
				})?;
				self.hash_struct(name, values)
			}
		}
	}

	/// `keccak256(typeHash || encoded members in declaration order)`
	pub fn hash_struct(
		&self,
		type_name: &str,
		values: &Map<String, Value>,
	) -> Result<B256, SignatureError> {
		let fields = self.fields_of(type_name).ok_or_else(|| {
			SignatureError::malformed(format!("type {} is not defined", type_name))
		})?;

		let mut buffer = Vec::with_capacity((fields.len() + 1) * 32);
		buffer.extend_from_slice(self.type_hash(type_name)?.as_slice());

		for field in fields {
			let value = match values.get(&field.name) {
				Some(Value::Null) | None => {
					return Err(SignatureError::malformed(format!(
						"missing value for {}.{}",
						type_name, field.name
					)))
				}
				Some(value) => value,
			};
			buffer.extend_from_slice(self.hash_value(&field.type_name, value)?.as_slice());
		}

		Ok(keccak256(buffer))
	}

	pub fn domain_separator(&self) -> Result<B256, SignatureError> {
		self.hash_struct(EIP712_DOMAIN_TYPE, &self.typed_data.domain.values())
	}

	/// Struct hash of the primary message
	pub fn message_hash(&self) -> Result<B256, SignatureError> {
		self.hash_struct(&self.typed_data.primary_type, &self.typed_data.message)
	}

	/// Final digest to be signed
	pub fn hash(&self) -> Result<B256, SignatureError> {
		let mut buffer = Vec::with_capacity(66);
		buffer.extend_from_slice(&[0x19, 0x01]);
		buffer.extend_from_slice(self.domain_separator()?.as_slice());
		buffer.extend_from_slice(self.message_hash()?.as_slice());
		Ok(keccak256(buffer))
	}
}

/// Digest of a typed-data payload
pub fn hash_typed_data(typed_data: &TypedData) -> Result<B256, SignatureError> {
	TypedDataEncoder::new(typed_data).hash()
}

fn encode_address(value: &Value) -> Result<B256, SignatureError> {
	let raw = value
		.as_str()
		.ok_or_else(|| SignatureError::malformed(format!("expected address, got {}", value)))?;
	let hex = raw.strip_prefix("0x").unwrap_or(raw);
	if hex.is_empty() || hex.len() > 40 {
		return Err(SignatureError::malformed(format!("invalid address: {}", raw)));
	}
	U256::from_str_radix(hex, 16)
		.map(B256::from)
		.map_err(|_| SignatureError::malformed(format!("invalid address: {}", raw)))
}

fn decode_hex_bytes(value: &Value) -> Result<Vec<u8>, SignatureError> {
	let raw = value
		.as_str()
		.ok_or_else(|| SignatureError::malformed(format!("expected hex bytes, got {}", value)))?;
	hex::decode(raw.strip_prefix("0x").unwrap_or(raw))
		.map_err(|e| SignatureError::malformed(format!("invalid hex bytes {}: {}", raw, e)))
}

/// Splits a numeric member into (negative, digits, radix)
fn numeric_parts(value: &Value) -> Result<(bool, String, u64), SignatureError> {
	let text = match value {
		Value::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
		Value::String(s) => s.trim().to_string(),
		other => {
			return Err(SignatureError::malformed(format!(
				"expected integer, got {}",
				other
			)))
		}
	};

	let (negative, unsigned) = match text.strip_prefix('-') {
		Some(rest) => (true, rest.to_string()),
		None => (false, text),
	};
	match unsigned.strip_prefix("0x") {
		Some(hex) => Ok((negative, hex.to_string(), 16)),
		None => Ok((negative, unsigned, 10)),
	}
}

fn parse_magnitude(digits: &str, radix: u64) -> Result<U256, SignatureError> {
	if digits.is_empty() {
		return Err(SignatureError::malformed("empty integer"));
	}
	U256::from_str_radix(digits, radix)
		.map_err(|_| SignatureError::malformed(format!("invalid integer: {}", digits)))
}

fn encode_uint(value: &Value, bits: usize) -> Result<B256, SignatureError> {
	let (negative, digits, radix) = numeric_parts(value)?;
	if negative {
		return Err(SignatureError::malformed(format!(
			"negative value for uint{}",
			bits
		)));
	}
	let magnitude = parse_magnitude(&digits, radix)?;
	if magnitude.bit_len() > bits {
		return Err(SignatureError::malformed(format!(
			"value {} overflows uint{}",
			magnitude, bits
		)));
	}
	Ok(B256::from(magnitude))
}

fn encode_int(value: &Value) -> Result<B256, SignatureError> {
	let (negative, digits, radix) = numeric_parts(value)?;
	let magnitude = parse_magnitude(&digits, radix)?;
	let signed = I256::from_raw(magnitude);
	let signed = if negative { -signed } else { signed };
	Ok(B256::from(signed.into_raw()))
}
