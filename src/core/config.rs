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

//! Overlay configuration.

use super::{circuit::MAX_HOPS, Address, NodeId, UserId};

/// Default port of the registry.
pub const DEFAULT_REGISTRY_PORT: u64 = 8080;
/// Router `n` listens on `DEFAULT_ROUTER_BASE_PORT + n`.
pub const DEFAULT_ROUTER_BASE_PORT: u64 = 4000;
/// User `n` listens on `DEFAULT_USER_BASE_PORT + n`.
pub const DEFAULT_USER_BASE_PORT: u64 = 3000;
/// Number of relays a message traverses.
pub const DEFAULT_CIRCUIT_LENGTH: usize = 3;
/// RSA modulus size for router keypairs.
pub const DEFAULT_KEY_BITS: usize = 2048;

/// Configuration shared by every participant of the overlay.
#[derive(Clone, Debug)]
pub struct Config {
	/// Log target for all log messages.
	pub log_target: &'static str,
	/// Port of the registry.
	pub registry_port: u64,
	/// Base of router addresses.
	pub router_base_port: u64,
	/// Base of user addresses.
	pub user_base_port: u64,
	/// Number of relays in a circuit. Clamped to `1..=MAX_HOPS`.
	pub circuit_length: usize,
	/// RSA modulus size in bits for router keypairs. Must leave room for an exported symmetric
	/// key plus OAEP overhead; 1024 is the smallest workable size.
	pub key_bits: usize,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			log_target: "onion",
			registry_port: DEFAULT_REGISTRY_PORT,
			router_base_port: DEFAULT_ROUTER_BASE_PORT,
			user_base_port: DEFAULT_USER_BASE_PORT,
			circuit_length: DEFAULT_CIRCUIT_LENGTH,
			key_bits: DEFAULT_KEY_BITS,
		}
	}
}

impl Config {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn registry_address(&self) -> Address {
		Address::new(self.registry_port)
	}

	pub fn router_address(&self, id: NodeId) -> Address {
		Address::new(self.router_base_port + u64::from(id))
	}

	pub fn user_address(&self, id: UserId) -> Address {
		Address::new(self.user_base_port + u64::from(id))
	}

	pub(crate) fn circuit_length(&self) -> usize {
		self.circuit_length.clamp(1, MAX_HOPS)
	}
}
