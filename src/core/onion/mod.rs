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

//! Onion message format.
//!
//! A layer is `base64(rsa(symmetric key)) || aes(payload)`. The wrapped key has a fixed length
//! determined by the recipient's modulus. The payload decrypts to a fixed width next hop address
//! followed by either the next layer or, at the last hop, the plaintext message.


use super::{
	crypto::{
		asymmetric::{self, PrivateKey, PublicKey},
		encoded_len,
		symmetric::{self, SymmetricKey},
	},
	Address, Error,
};
use rand::{CryptoRng, Rng};

/// Width of an encoded address. Routers parse it positionally, so every hop must agree.
pub const ADDRESS_WIDTH: usize = 10;
/// Largest address that fits in `ADDRESS_WIDTH` digits.
pub const MAX_ADDRESS: u64 = 9_999_999_999;

/// Zero-padded decimal encoding of an address.
pub fn encode_address(address: Address) -> Result<String, Error> {
	if address.port() > MAX_ADDRESS {
		return Err(Error::InvalidAddress(address.to_string()))
	}
	Ok(format!("{:0width$}", address.port(), width = ADDRESS_WIDTH))
}

/// Parse exactly `ADDRESS_WIDTH` decimal digits.
pub fn decode_address(encoded: &str) -> Result<Address, Error> {
	if encoded.len() != ADDRESS_WIDTH || !encoded.bytes().all(|b| b.is_ascii_digit()) {
		return Err(Error::InvalidAddress(encoded.into()))
	}
	encoded
		.parse()
		.map(Address::new)
		.map_err(|_| Error::InvalidAddress(encoded.into()))
}

/// One relay of a circuit, as seen by the sender.
#[derive(Clone, Debug)]
pub struct Hop {
	pub address: Address,
	pub public_key: PublicKey,
}

/// Result of peeling one layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Peeled {
	/// Where `remainder` must go next.
	pub next_hop: Address,
	/// Next layer, or the plaintext message if this was the last hop.
	pub remainder: String,
}

fn wrap_layer(
	rng: &mut (impl Rng + CryptoRng),
	content: &str,
	public_key: &PublicKey,
) -> Result<String, Error> {
	let key = symmetric::generate_key(rng);
	let encrypted_payload = symmetric::encrypt(rng, &key, content)?;
	let encrypted_key =
		asymmetric::encrypt(rng, symmetric::export_key(&key).as_bytes(), public_key)?;
	let mut layer = asymmetric::encode_ciphertext(&encrypted_key);
	layer.push_str(&encrypted_payload);
	Ok(layer)
}

/// Build the onion for `hops`, first hop first. The returned blob is meant for
/// `hops[0].address`.
pub fn build_onion(
	rng: &mut (impl Rng + CryptoRng),
	message: &str,
	destination: Address,
	hops: &[Hop],
) -> Result<String, Error> {
	let mut content = encode_address(destination)?;
	content.push_str(message);

	let mut hops = hops.iter().rev().peekable();
	while let Some(hop) = hops.next() {
		let layer = wrap_layer(rng, &content, &hop.public_key)?;
		content = match hops.peek() {
			// The previous hop learns this hop's address along with the layer.
			Some(_) => {
				let mut outer = encode_address(hop.address)?;
				outer.push_str(&layer);
				outer
			},
			None => layer,
		};
	}
	Ok(content)
}

fn unwrap_key(encrypted_key: &str, private_key: &PrivateKey) -> Result<SymmetricKey, Error> {
	let encrypted_key = asymmetric::decode_ciphertext(encrypted_key)?;
	let exported = asymmetric::decrypt(&encrypted_key, private_key)?;
	let exported = std::str::from_utf8(&exported)
		.map_err(|_| Error::Decryption("wrapped key is not text".into()))?;
	symmetric::import_key(exported).map_err(|e| Error::Decryption(e.to_string()))
}

/// Peel the outermost layer with this router's private key.
pub fn peel(layer: &str, private_key: &PrivateKey) -> Result<Peeled, Error> {
	let key_len = encoded_len(asymmetric::ciphertext_len(private_key));
	if layer.len() <= key_len || !layer.is_char_boundary(key_len) {
		return Err(Error::Decryption(format!("truncated layer of {} bytes", layer.len())))
	}
	let (encrypted_key, encrypted_payload) = layer.split_at(key_len);

	let key = unwrap_key(encrypted_key, private_key)?;
	let mut plaintext = symmetric::decrypt(&key, encrypted_payload)?;
	if plaintext.len() < ADDRESS_WIDTH || !plaintext.is_char_boundary(ADDRESS_WIDTH) {
		return Err(Error::Decryption("payload shorter than next hop address".into()))
	}
	let remainder = plaintext.split_off(ADDRESS_WIDTH);
	let next_hop = decode_address(&plaintext).map_err(|e| Error::Decryption(e.to_string()))?;
	Ok(Peeled { next_hop, remainder })
}
