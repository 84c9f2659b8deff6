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

//! In-process network hosting a registry, routers and users.
//!
//! [`LocalNetwork`] stands in for the HTTP transport between participants. Messages are one-way
//! envelopes pushed onto a FIFO queue by [`Transport::send`] and dispatched by
//! [`LocalNetwork::run_until_idle`]. A participant handles one envelope at a time.

use crate::{
	core::{Address, Config, Error, NodeId, Registry, Router, User, UserId},
	traits::Transport,
};
use parking_lot::Mutex;
use rand::{CryptoRng, Rng};
use std::collections::{HashMap, VecDeque};

struct Envelope {
	to: Address,
	body: String,
}

pub struct LocalNetwork {
	config: Config,
	registry: Registry,
	routers: HashMap<Address, Router>,
	users: HashMap<Address, User>,
	queue: Mutex<VecDeque<Envelope>>,
}

impl LocalNetwork {
	pub fn new(config: Config) -> Self {
		Self {
			registry: Registry::new(config.log_target),
			config,
			routers: HashMap::new(),
			users: HashMap::new(),
			queue: Mutex::new(VecDeque::new()),
		}
	}

	/// Network with routers `0..num_routers`, all registered, and users `0..num_users`.
	pub fn launch(
		rng: &mut (impl Rng + CryptoRng),
		config: Config,
		num_routers: NodeId,
		num_users: UserId,
	) -> Result<Self, Error> {
		let mut network = Self::new(config);
		for id in 0..num_routers {
			let router = Router::new(rng, &network.config, id)?;
			network.add_router(router)?;
		}
		for id in 0..num_users {
			network.add_user(User::new(&network.config, id));
		}
		Ok(network)
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	/// Host `router` at its address and publish it in the registry. A router replacing another
	/// one at the same address is registered again.
	pub fn add_router(&mut self, router: Router) -> Result<(), Error> {
		router.register(&self.registry)?;
		if self.routers.insert(router.address(), router).is_some() {
			log::warn!(target: self.config.log_target, "Replaced a router already hosted");
		}
		Ok(())
	}

	pub fn add_user(&mut self, user: User) {
		if self.users.insert(user.address(), user).is_some() {
			log::warn!(target: self.config.log_target, "Replaced a user already hosted");
		}
	}

	pub fn router(&self, id: NodeId) -> Option<&Router> {
		self.routers.get(&self.config.router_address(id))
	}

	pub fn user(&self, id: UserId) -> Option<&User> {
		self.users.get(&self.config.user_address(id))
	}

	/// Ask user `from` to send `message` to user `to`. Returns once the onion is queued for the
	/// first hop.
	pub fn send_message(
		&self,
		rng: &mut (impl Rng + CryptoRng),
		from: UserId,
		to: UserId,
		message: &str,
	) -> Result<(), Error> {
		let user = self.user(from).ok_or(Error::UnknownUser(from))?;
		user.send_message(rng, &self.registry, self, message, to)
	}

	/// Number of envelopes waiting to be dispatched.
	pub fn pending(&self) -> usize {
		self.queue.lock().len()
	}

	/// Dispatch queued envelopes, including those queued while dispatching, until the queue is
	/// empty. Returns the number of envelopes dispatched.
	pub fn run_until_idle(&self) -> usize {
		let mut dispatched = 0;
		while let Some(envelope) = self.pop_envelope() {
			self.dispatch(envelope);
			dispatched += 1;
		}
		dispatched
	}

	/// The queue lock must not be held while dispatching, routers push onto it.
	fn pop_envelope(&self) -> Option<Envelope> {
		self.queue.lock().pop_front()
	}

	fn dispatch(&self, Envelope { to, body }: Envelope) {
		if let Some(router) = self.routers.get(&to) {
			// Errors abort this message only, the router already logged them
			let _ = router.handle_forward(&body, self);
		} else if let Some(user) = self.users.get(&to) {
			user.receive(body);
		} else {
			log::warn!(target: self.config.log_target, "{}", Error::ForwardDelivery(to));
		}
	}
}

impl Transport for LocalNetwork {
	fn send(&self, to: Address, body: String) -> Result<(), Error> {
		if !self.routers.contains_key(&to) && !self.users.contains_key(&to) {
			return Err(Error::ForwardDelivery(to))
		}
		log::trace!(target: self.config.log_target, "Queued {} bytes for {to}", body.len());
		self.queue.lock().push_back(Envelope { to, body });
		Ok(())
	}
}
