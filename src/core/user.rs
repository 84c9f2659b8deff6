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

//! Sending and receiving endpoint.

use super::{
	circuit::build_circuit,
	crypto::asymmetric,
	onion::{build_onion, Hop},
	Address, Config, Error, NodeId, Registry, UserId, STATUS_LIVE,
};
use crate::traits::Transport;
use parking_lot::Mutex;
use rand::{CryptoRng, Rng};

/// Last messages seen by a user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserState {
	pub last_received_message: Option<String>,
	pub last_sent_message: Option<String>,
	/// Node ids of the circuit used by the last send, first hop first.
	pub last_circuit: Vec<NodeId>,
}

pub struct User {
	id: UserId,
	address: Address,
	config: Config,
	state: Mutex<UserState>,
}

impl User {
	pub fn new(config: &Config, id: UserId) -> Self {
		Self {
			id,
			address: config.user_address(id),
			config: config.clone(),
			state: Mutex::new(UserState::default()),
		}
	}

	pub fn id(&self) -> UserId {
		self.id
	}

	pub fn address(&self) -> Address {
		self.address
	}

	pub fn status(&self) -> &'static str {
		STATUS_LIVE
	}

	/// Send `message` to user `destination` through a random circuit picked from `registry`.
	///
	/// Returns once the onion is handed to the first hop; delivery is not confirmed.
	pub fn send_message(
		&self,
		rng: &mut (impl Rng + CryptoRng),
		registry: &Registry,
		transport: &dyn Transport,
		message: &str,
		destination: UserId,
	) -> Result<(), Error> {
		let nodes = registry.list_nodes();
		let circuit = build_circuit(rng, &nodes, self.config.circuit_length())?;
		let hops = circuit
			.iter()
			.map(|node| -> Result<Hop, Error> {
				Ok(Hop {
					address: self.config.router_address(node.id),
					public_key: asymmetric::import_public(&node.public_key)?,
				})
			})
			.collect::<Result<Vec<_>, _>>()?;
		let circuit_ids: Vec<_> = circuit.iter().map(|node| node.id).collect();
		log::debug!(
			target: self.config.log_target,
			"User {}: sending to user {destination} through {circuit_ids:?}",
			self.id
		);

		let onion = build_onion(rng, message, self.config.user_address(destination), &hops)?;
		let first_hop = hops.first().map(|hop| hop.address).ok_or(Error::InsufficientNodes {
			required: self.config.circuit_length(),
			available: nodes.len(),
		})?;

		{
			let mut state = self.state.lock();
			state.last_sent_message = Some(message.into());
			state.last_circuit = circuit_ids;
		}
		transport.send(first_hop, onion)
	}

	/// Final delivery from the last relay of a circuit.
	pub fn receive(&self, message: String) {
		log::trace!(target: self.config.log_target, "User {}: message received", self.id);
		self.state.lock().last_received_message = Some(message);
	}

	pub fn state(&self) -> UserState {
		self.state.lock().clone()
	}

	pub fn last_received_message(&self) -> Option<String> {
		self.state.lock().last_received_message.clone()
	}

	pub fn last_sent_message(&self) -> Option<String> {
		self.state.lock().last_sent_message.clone()
	}

	pub fn last_circuit(&self) -> Vec<NodeId> {
		self.state.lock().last_circuit.clone()
	}
}
