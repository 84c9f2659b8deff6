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

//! A simplified onion routing overlay.
//!
//! A [`Registry`] lists relay nodes and their public keys. A [`User`] picks a random circuit of
//! relays from it, wraps a message in one encryption layer per relay and hands it to the first
//! relay. Each [`Router`] peels its layer, learns only the next hop address, and relays the rest.
//! The last relay delivers the plaintext to the destination user.

pub mod core;
mod network;
mod traits;

pub use crate::core::{
	build_circuit, build_onion, crypto, decode_address, encode_address, peel, Address, Circuit,
	Config, Error, Hop, Node, NodeId, Peeled, Registry, Router, RouterState, User, UserId,
	UserState, ADDRESS_WIDTH, MAX_ADDRESS, MAX_HOPS, STATUS_LIVE,
};
pub use network::LocalNetwork;
pub use traits::Transport;
