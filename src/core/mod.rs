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

//! Onion overlay core logic. This module is transport agnostic: participants hand outgoing
//! messages to a [`Transport`](crate::Transport) and are fed incoming ones by whoever hosts them.

mod circuit;
mod config;
pub mod crypto;
mod error;
mod onion;
mod registry;
mod router;
mod user;

pub use self::{
	circuit::{build_circuit, Circuit, MAX_HOPS},
	config::{
		Config, DEFAULT_CIRCUIT_LENGTH, DEFAULT_KEY_BITS, DEFAULT_REGISTRY_PORT,
		DEFAULT_ROUTER_BASE_PORT, DEFAULT_USER_BASE_PORT,
	},
	error::Error,
	onion::{
		build_onion, decode_address, encode_address, peel, Hop, Peeled, ADDRESS_WIDTH,
		MAX_ADDRESS,
	},
	registry::{Node, Registry},
	router::{Router, RouterState},
	user::{User, UserState},
};
use std::fmt;

/// Relay node identifier.
pub type NodeId = u32;
/// Endpoint identifier.
pub type UserId = u32;

/// Reply to status queries from a running participant.
pub const STATUS_LIVE: &str = "live";

/// Network address of a participant, derived as `base port + id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(u64);

impl Address {
	pub const fn new(port: u64) -> Self {
		Self(port)
	}

	pub fn port(&self) -> u64 {
		self.0
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}
