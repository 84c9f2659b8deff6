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

//! Node directory.
//!
//! The directory is append-only and keeps insertion order. Registering an id twice adds a second
//! entry; both entries stay selectable when building circuits.

use super::NodeId;
use parking_lot::RwLock;

/// A registered relay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
	pub id: NodeId,
	/// Base64 SPKI DER public key.
	pub public_key: String,
}

pub struct Registry {
	log_target: &'static str,
	nodes: RwLock<Vec<Node>>,
}

impl Registry {
	pub fn new(log_target: &'static str) -> Self {
		Self { log_target, nodes: RwLock::new(Vec::new()) }
	}

	pub fn register(&self, id: NodeId, public_key: String) {
		let mut nodes = self.nodes.write();
		if nodes.iter().any(|node| node.id == id) {
			log::debug!(target: self.log_target, "Node {id} registered again");
		} else {
			log::debug!(target: self.log_target, "Node {id} registered");
		}
		nodes.push(Node { id, public_key });
	}

	/// Snapshot of the directory, in registration order.
	pub fn list_nodes(&self) -> Vec<Node> {
		self.nodes.read().clone()
	}

	pub fn len(&self) -> usize {
		self.nodes.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.read().is_empty()
	}
}

impl Default for Registry {
	fn default() -> Self {
		Self::new("onion")
	}
}
