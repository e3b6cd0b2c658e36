//! Ethereum Virtual Machine (EVM) specific data structures.
//!
//! This module contains the structured-data (typed data) payloads used for EVM
//! typed-data signatures.

mod typed_data;

pub use typed_data::{
	TypedData, TypedDataDomain, TypedDataField, TypedDataTypes, EIP712_DOMAIN_TYPE,
};
