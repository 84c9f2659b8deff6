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

//! AES-256 keys for layer payloads.
//!
//! Ciphertexts are self-contained: `base64(iv) || base64(ciphertext)`. The IV is 16 random bytes
//! drawn per call, so its base64 prefix always spans `IV_PREFIX_LEN` characters. GCM
//! authenticates the payload; a flipped byte fails decryption instead of yielding garbage.

use super::{decode, encode, encoded_len};
use crate::core::Error;
use aes_gcm::{
	aead::{
		generic_array::{typenum::U16, GenericArray},
		Aead, KeyInit,
	},
	aes::Aes256,
	AesGcm,
};
use rand::{CryptoRng, Rng};
use zeroize::Zeroizing;

/// Size in bytes of a [`SymmetricKey`].
pub const KEY_SIZE: usize = 32;
/// Size in bytes of the IV.
pub const IV_SIZE: usize = 16;
/// Length of the base64 IV prefix of every ciphertext.
pub const IV_PREFIX_LEN: usize = encoded_len(IV_SIZE);

type Cipher = AesGcm<Aes256, U16>;

#[derive(Clone)]
pub struct SymmetricKey(Zeroizing<[u8; KEY_SIZE]>);

impl SymmetricKey {
	fn cipher(&self) -> Cipher {
		Cipher::new(GenericArray::from_slice(&self.0[..]))
	}
}

impl PartialEq for SymmetricKey {
	fn eq(&self, other: &Self) -> bool {
		*self.0 == *other.0
	}
}

impl Eq for SymmetricKey {}

impl std::fmt::Debug for SymmetricKey {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.write_str("SymmetricKey(..)")
	}
}

pub fn generate_key(rng: &mut (impl Rng + CryptoRng)) -> SymmetricKey {
	let mut key = Zeroizing::new([0; KEY_SIZE]);
	rng.fill_bytes(&mut key[..]);
	SymmetricKey(key)
}

pub fn export_key(key: &SymmetricKey) -> String {
	encode(&key.0[..])
}

pub fn import_key(encoded: &str) -> Result<SymmetricKey, Error> {
	let raw = Zeroizing::new(decode(encoded).map_err(|e| Error::KeyImport(e.to_string()))?);
	let raw: [u8; KEY_SIZE] = raw
		.as_slice()
		.try_into()
		.map_err(|_| Error::KeyImport(format!("expected {KEY_SIZE} byte key, got {}", raw.len())))?;
	Ok(SymmetricKey(Zeroizing::new(raw)))
}

pub fn encrypt(
	rng: &mut (impl Rng + CryptoRng),
	key: &SymmetricKey,
	plaintext: &str,
) -> Result<String, Error> {
	let mut iv = [0; IV_SIZE];
	rng.fill_bytes(&mut iv);
	let ciphertext = key
		.cipher()
		.encrypt(GenericArray::from_slice(&iv), plaintext.as_bytes())
		.map_err(|e| Error::Encryption(e.to_string()))?;
	let mut out = encode(&iv);
	out.push_str(&encode(&ciphertext));
	Ok(out)
}

pub fn decrypt(key: &SymmetricKey, iv_and_ciphertext: &str) -> Result<String, Error> {
	if iv_and_ciphertext.len() < IV_PREFIX_LEN || !iv_and_ciphertext.is_char_boundary(IV_PREFIX_LEN)
	{
		return Err(Error::Decryption("ciphertext shorter than IV prefix".into()))
	}
	let (iv, ciphertext) = iv_and_ciphertext.split_at(IV_PREFIX_LEN);
	let iv = decode(iv).map_err(|e| Error::Decryption(format!("bad IV: {e}")))?;
	if iv.len() != IV_SIZE {
		return Err(Error::Decryption(format!("IV of {} bytes", iv.len())))
	}
	let ciphertext = decode(ciphertext).map_err(|e| Error::Decryption(e.to_string()))?;
	let plaintext = key
		.cipher()
		.decrypt(GenericArray::from_slice(&iv), ciphertext.as_slice())
		.map_err(|_| Error::Decryption("authentication failed".into()))?;
	String::from_utf8(plaintext).map_err(|e| Error::Decryption(e.to_string()))
}
