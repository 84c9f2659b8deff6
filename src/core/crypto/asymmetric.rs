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

//! RSA-OAEP keypairs used to wrap the per-layer symmetric keys.

use super::{decode, encode};
use crate::core::Error;
use rand::{CryptoRng, Rng};
use rsa::{
	pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey},
	traits::PublicKeyParts,
	Oaep, RsaPrivateKey, RsaPublicKey,
};
use sha2::Sha256;

pub type PublicKey = RsaPublicKey;
pub type PrivateKey = RsaPrivateKey;

/// Bytes of the OAEP-SHA256 padding overhead.
const OAEP_OVERHEAD: usize = 2 * 32 + 2;

fn padding() -> Oaep {
	Oaep::new::<Sha256>()
}

pub struct KeyPair {
	public: PublicKey,
	private: PrivateKey,
}

impl KeyPair {
	pub fn public(&self) -> &PublicKey {
		&self.public
	}

	pub fn private(&self) -> &PrivateKey {
		&self.private
	}
}

impl From<PrivateKey> for KeyPair {
	fn from(private: PrivateKey) -> Self {
		let public = private.to_public_key();
		Self { public, private }
	}
}

/// Generate a keypair with a `bits` sized modulus.
pub fn generate_keypair(rng: &mut (impl Rng + CryptoRng), bits: usize) -> Result<KeyPair, Error> {
	let private =
		PrivateKey::new(rng, bits).map_err(|e| Error::KeyGeneration(e.to_string()))?;
	Ok(private.into())
}

/// Base64 of the SPKI DER encoding.
pub fn export_public(key: &PublicKey) -> Result<String, Error> {
	let der = key.to_public_key_der().map_err(|e| Error::KeyImport(e.to_string()))?;
	Ok(encode(der.as_bytes()))
}

/// Base64 of the PKCS#8 DER encoding. A missing key exports as `None`.
pub fn export_private(key: Option<&PrivateKey>) -> Result<Option<String>, Error> {
	key.map(|key| -> Result<String, Error> {
		let der = key.to_pkcs8_der().map_err(|e| Error::KeyImport(e.to_string()))?;
		Ok(encode(der.as_bytes()))
	})
	.transpose()
}

pub fn import_public(encoded: &str) -> Result<PublicKey, Error> {
	let der = decode(encoded).map_err(|e| Error::KeyImport(e.to_string()))?;
	PublicKey::from_public_key_der(&der).map_err(|e| Error::KeyImport(e.to_string()))
}

pub fn import_private(encoded: &str) -> Result<PrivateKey, Error> {
	let der = decode(encoded).map_err(|e| Error::KeyImport(e.to_string()))?;
	PrivateKey::from_pkcs8_der(&der).map_err(|e| Error::KeyImport(e.to_string()))
}

/// Size in bytes of every ciphertext produced with `key`, or for the public half of `key`.
pub fn ciphertext_len(key: &impl PublicKeyParts) -> usize {
	key.size()
}

/// Text form of a ciphertext, `encoded_len(ciphertext_len(key))` characters long.
pub fn encode_ciphertext(ciphertext: &[u8]) -> String {
	encode(ciphertext)
}

pub fn decode_ciphertext(encoded: &str) -> Result<Vec<u8>, Error> {
	decode(encoded).map_err(|e| Error::Decryption(format!("bad ciphertext encoding: {e}")))
}

/// Largest payload a single `encrypt` call accepts for `key`.
pub fn max_payload_len(key: &PublicKey) -> usize {
	key.size().saturating_sub(OAEP_OVERHEAD)
}

/// Encrypt a single block. No chunking: payloads above `max_payload_len` are rejected.
pub fn encrypt(
	rng: &mut (impl Rng + CryptoRng),
	plaintext: &[u8],
	key: &PublicKey,
) -> Result<Vec<u8>, Error> {
	let max = max_payload_len(key);
	if plaintext.len() > max {
		return Err(Error::Encryption(format!(
			"payload of {} bytes exceeds key capacity of {max} bytes",
			plaintext.len()
		)))
	}
	key.encrypt(rng, padding(), plaintext)
		.map_err(|e| Error::Encryption(e.to_string()))
}

pub fn decrypt(ciphertext: &[u8], key: &PrivateKey) -> Result<Vec<u8>, Error> {
	key.decrypt(padding(), ciphertext).map_err(|e| Error::Decryption(e.to_string()))
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use parking_lot::Mutex;
	use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
	use std::sync::OnceLock;

	pub const TEST_KEY_BITS: usize = 1024;

	/// Key generation is slow in debug builds; share a small pool between tests.
	pub fn test_keypairs(count: usize) -> Vec<PrivateKey> {
		static POOL: OnceLock<Mutex<Vec<PrivateKey>>> = OnceLock::new();
		let mut pool = POOL.get_or_init(|| Mutex::new(Vec::new())).lock();
		let mut rng = ChaCha8Rng::seed_from_u64(pool.len() as u64);
		while pool.len() < count {
			pool.push(PrivateKey::new(&mut rng, TEST_KEY_BITS).unwrap());
		}
		pool[..count].to_vec()
	}

	#[test]
	fn basic_operation() {
		let mut rng = rand::thread_rng();
		let pair: KeyPair = test_keypairs(1).remove(0).into();
		let ciphertext = encrypt(&mut rng, b"symmetric key material", pair.public()).unwrap();
		assert_eq!(ciphertext.len(), ciphertext_len(pair.public()));
		assert_eq!(decrypt(&ciphertext, pair.private()).unwrap(), b"symmetric key material");
	}

	#[test]
	fn export_import() {
		let pair: KeyPair = test_keypairs(1).remove(0).into();
		let public = export_public(pair.public()).unwrap();
		assert_eq!(&import_public(&public).unwrap(), pair.public());
		let private = export_private(Some(pair.private())).unwrap().unwrap();
		assert_eq!(&import_private(&private).unwrap(), pair.private());
		assert_eq!(export_private(None), Ok(None));
	}

	#[test]
	fn bad_encoding() {
		assert!(matches!(import_public("not base64!"), Err(Error::KeyImport(_))));
		assert!(matches!(import_private("AAAA"), Err(Error::KeyImport(_))));
	}

	#[test]
	fn oversized_payload() {
		let mut rng = rand::thread_rng();
		let pair: KeyPair = test_keypairs(1).remove(0).into();
		let payload = vec![0; max_payload_len(pair.public()) + 1];
		assert!(matches!(encrypt(&mut rng, &payload, pair.public()), Err(Error::Encryption(_))));
		let payload = vec![0; max_payload_len(pair.public())];
		assert!(encrypt(&mut rng, &payload, pair.public()).is_ok());
	}

	#[test]
	fn wrong_key() {
		let mut rng = rand::thread_rng();
		let keys = test_keypairs(2);
		let ciphertext = encrypt(&mut rng, b"key", &keys[0].to_public_key()).unwrap();
		assert!(matches!(decrypt(&ciphertext, &keys[1]), Err(Error::Decryption(_))));
	}
}
