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

//! Relay node.
//!
//! A router peels one layer off every message it receives and relays the remainder to the
//! address found inside. It keeps no session between messages; the only state is a snapshot of
//! the last message handled, for introspection.

use super::{
	crypto::asymmetric::{self, KeyPair},
	onion::{peel, Peeled},
	Address, Config, Error, NodeId, Registry, STATUS_LIVE,
};
use crate::traits::Transport;
use parking_lot::Mutex;
use rand::{CryptoRng, Rng};

/// Last message seen by a router. Overwritten by every successfully peeled message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouterState {
	pub last_received_encrypted_message: Option<String>,
	pub last_received_decrypted_message: Option<String>,
	pub last_message_source: Option<Address>,
	pub last_message_destination: Option<Address>,
}

pub struct Router {
	id: NodeId,
	address: Address,
	log_target: &'static str,
	keys: KeyPair,
	/// Held for the whole of `handle_forward`, so messages are processed one at a time and the
	/// snapshot always describes a single message.
	state: Mutex<RouterState>,
}

impl Router {
	/// Create router `id` with a fresh keypair.
	pub fn new(
		rng: &mut (impl Rng + CryptoRng),
		config: &Config,
		id: NodeId,
	) -> Result<Self, Error> {
		let keys = asymmetric::generate_keypair(rng, config.key_bits)?;
		Ok(Self::with_keys(config, id, keys))
	}

	pub fn with_keys(config: &Config, id: NodeId, keys: KeyPair) -> Self {
		Self {
			id,
			address: config.router_address(id),
			log_target: config.log_target,
			keys,
			state: Mutex::new(RouterState::default()),
		}
	}

	pub fn id(&self) -> NodeId {
		self.id
	}

	pub fn address(&self) -> Address {
		self.address
	}

	pub fn status(&self) -> &'static str {
		STATUS_LIVE
	}

	/// Exported public key, as published in the registry.
	pub fn public_key(&self) -> Result<String, Error> {
		asymmetric::export_public(self.keys.public())
	}

	/// Exported private key, for operator debugging.
	pub fn private_key(&self) -> Result<Option<String>, Error> {
		asymmetric::export_private(Some(self.keys.private()))
	}

	/// Publish this router's id and public key.
	pub fn register(&self, registry: &Registry) -> Result<(), Error> {
		registry.register(self.id, self.public_key()?);
		Ok(())
	}

	/// Peel one layer off `body` and relay the remainder. Returns the next hop.
	///
	/// Peeling failures abort this message only. A failed relay is logged and dropped; the
	/// recorded state is kept either way.
	pub fn handle_forward(&self, body: &str, transport: &dyn Transport) -> Result<Address, Error> {
		let mut state = self.state.lock();
		let Peeled { next_hop, remainder } = peel(body, self.keys.private()).map_err(|e| {
			log::debug!(target: self.log_target, "Router {}: dropping message: {e}", self.id);
			e
		})?;

		*state = RouterState {
			last_received_encrypted_message: Some(body.into()),
			last_received_decrypted_message: Some(remainder.clone()),
			last_message_source: Some(self.address),
			last_message_destination: Some(next_hop),
		};

		log::trace!(target: self.log_target, "Router {}: forwarding to {next_hop}", self.id);
		if let Err(e) = transport.send(next_hop, remainder) {
			log::warn!(target: self.log_target, "Router {}: {e}", self.id);
		}
		Ok(next_hop)
	}

	pub fn state(&self) -> RouterState {
		self.state.lock().clone()
	}

	pub fn last_received_encrypted_message(&self) -> Option<String> {
		self.state.lock().last_received_encrypted_message.clone()
	}

	pub fn last_received_decrypted_message(&self) -> Option<String> {
		self.state.lock().last_received_decrypted_message.clone()
	}

	pub fn last_message_source(&self) -> Option<Address> {
		self.state.lock().last_message_source
	}

	pub fn last_message_destination(&self) -> Option<Address> {
		self.state.lock().last_message_destination
	}
}
