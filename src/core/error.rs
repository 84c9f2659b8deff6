// Copyright 2022 Parity Technologies (UK) Ltd.
//
// Permission is hereby granted, free of charge, to any person obtaining a
// copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS
// OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

//! Error handling.

use super::Address;
use thiserror::Error;

/// Onion overlay error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
	/// Keypair or key generation failed.
	#[error("Key generation failed: {0}")]
	KeyGeneration(String),
	/// Exported key material could not be decoded.
	#[error("Bad key encoding: {0}")]
	KeyImport(String),
	/// Payload too large for the key, or cipher failure.
	#[error("Encryption failed: {0}")]
	Encryption(String),
	/// Wrong key, corrupted ciphertext or truncated layer.
	#[error("Decryption failed: {0}")]
	Decryption(String),
	/// Not enough nodes in the directory to build a circuit.
	#[error("Need {required} nodes to build a circuit, directory has {available}")]
	InsufficientNodes { required: usize, available: usize },
	/// Nothing listens at the next hop address.
	#[error("Could not deliver to {0}")]
	ForwardDelivery(Address),
	/// Address does not fit the fixed width, or does not parse.
	#[error("Invalid address {0:?}")]
	InvalidAddress(String),
	/// No user is known under this id.
	#[error("Unknown user {0}")]
	UnknownUser(u32),
}

impl Error {
	/// Cryptographic errors abort a single message; delivery errors are
	/// reported separately.
	pub fn is_crypto(&self) -> bool {
		matches!(
			self,
			Error::KeyGeneration(_) |
				Error::KeyImport(_) |
				Error::Encryption(_) |
				Error::Decryption(_)
		)
	}
}
