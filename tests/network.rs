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

//! End to end tests over the in-process network.

#[path = "util.rs"]
mod util;

use itertools::Itertools;
use onionnet::{
	build_circuit, peel, Address, Config, Error, LocalNetwork, Router, RouterState, Transport,
	User, STATUS_LIVE,
};
use parking_lot::Mutex;
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use util::test_config;

/// Captures the onion a user hands to its first hop instead of delivering it.
#[derive(Default)]
struct Capture(Mutex<Vec<(Address, String)>>);

impl Transport for Capture {
	fn send(&self, to: Address, body: String) -> Result<(), Error> {
		self.0.lock().push((to, body));
		Ok(())
	}
}

fn launch(network_index: usize, seed: u64) -> (LocalNetwork, ChaCha8Rng) {
	let _ = env_logger::try_init();
	let mut rng = ChaCha8Rng::seed_from_u64(seed);
	let mut network = LocalNetwork::launch(&mut rng, test_config(network_index), 5, 0).unwrap();
	for id in [0, 7] {
		network.add_user(User::new(&test_config(network_index), id));
	}
	(network, rng)
}

#[test]
fn hello_through_three_relays() {
	let (network, mut rng) = launch(0, 0);
	assert_eq!(network.registry().len(), 5);

	network.send_message(&mut rng, 0, 7, "hello").unwrap();
	assert_eq!(network.pending(), 1);
	assert_eq!(network.run_until_idle(), 4);

	let sender = network.user(0).unwrap();
	let circuit = sender.last_circuit();
	assert_eq!(circuit.len(), 3);
	assert!(circuit.iter().all_unique());
	assert!(circuit.iter().all(|id| *id < 5));
	assert_eq!(sender.last_sent_message().as_deref(), Some("hello"));
	assert_eq!(network.user(7).unwrap().last_received_message().as_deref(), Some("hello"));

	// Each relay saw only its neighbours, and recorded the remainder at its depth
	let config = network.config();
	let mut expected_body = None;
	for (i, id) in circuit.iter().enumerate() {
		let router = network.router(*id).unwrap();
		let state = router.state();
		let next_hop = match circuit.get(i + 1) {
			Some(next) => config.router_address(*next),
			None => config.user_address(7),
		};
		assert_eq!(state.last_message_destination, Some(next_hop));
		assert_eq!(state.last_message_source, Some(router.address()));
		if let Some(expected_body) = &expected_body {
			assert_eq!(state.last_received_encrypted_message.as_ref(), Some(expected_body));
		}
		expected_body = state.last_received_decrypted_message.clone();
	}
	assert_eq!(expected_body.as_deref(), Some("hello"));

	for id in (0..5).filter(|id| !circuit.contains(id)) {
		assert_eq!(network.router(id).unwrap().state(), RouterState::default());
	}
}

#[test]
fn peeling_by_hand_matches_relays() {
	let (network, mut rng) = launch(1, 1);
	let capture = Capture::default();
	let sender = network.user(0).unwrap();
	sender.send_message(&mut rng, network.registry(), &capture, "by hand", 7).unwrap();

	let config = network.config();
	let (first_hop, mut body) = capture.0.lock().remove(0);
	assert_eq!(first_hop, config.router_address(sender.last_circuit()[0]));
	for id in sender.last_circuit() {
		let private_key = network.router(id).unwrap().private_key().unwrap().unwrap();
		let private_key = onionnet::crypto::asymmetric::import_private(&private_key).unwrap();
		body = peel(&body, &private_key).unwrap().remainder;
	}
	assert_eq!(body, "by hand");
}

#[test]
fn latest_message_wins() {
	let (network, mut rng) = launch(2, 2);
	network.send_message(&mut rng, 0, 7, "first").unwrap();
	network.send_message(&mut rng, 0, 7, "second").unwrap();
	assert_eq!(network.run_until_idle(), 8);
	assert_eq!(network.user(7).unwrap().last_received_message().as_deref(), Some("second"));
	assert_eq!(network.user(0).unwrap().last_sent_message().as_deref(), Some("second"));
}

#[test]
fn tampered_onion_goes_nowhere() {
	let (network, mut rng) = launch(3, 3);
	let capture = Capture::default();
	let sender = network.user(0).unwrap();
	sender.send_message(&mut rng, network.registry(), &capture, "hello", 7).unwrap();
	let (first_hop, body) = capture.0.lock().remove(0);

	let mut bytes = body.into_bytes();
	let last = bytes.len() - 1;
	bytes[last / 2] ^= 1;
	network.send(first_hop, String::from_utf8(bytes).unwrap()).unwrap();
	assert_eq!(network.run_until_idle(), 1);

	assert_eq!(network.user(7).unwrap().last_received_message(), None);
	for id in 0..5 {
		assert_eq!(network.router(id).unwrap().state(), RouterState::default());
	}
}

#[test]
fn unknown_destination_is_dropped() {
	let (network, mut rng) = launch(4, 4);
	network.send_message(&mut rng, 0, 42, "lost").unwrap();
	assert_eq!(network.run_until_idle(), 3);

	let last_router = network.router(*network.user(0).unwrap().last_circuit().last().unwrap());
	assert_eq!(
		last_router.unwrap().last_message_destination(),
		Some(network.config().user_address(42))
	);
	assert!(matches!(
		network.send(network.config().user_address(42), String::new()),
		Err(Error::ForwardDelivery(_))
	));
}

#[test]
fn unknown_sender() {
	let (network, mut rng) = launch(5, 5);
	assert_eq!(network.send_message(&mut rng, 3, 7, "hi"), Err(Error::UnknownUser(3)));
}

#[test]
fn too_few_routers() {
	let _ = env_logger::try_init();
	let mut rng = ChaCha8Rng::seed_from_u64(6);
	let network = LocalNetwork::launch(&mut rng, test_config(6), 2, 8).unwrap();
	assert_eq!(
		network.send_message(&mut rng, 0, 7, "hello"),
		Err(Error::InsufficientNodes { required: 3, available: 2 })
	);
	assert_eq!(network.pending(), 0);
}

#[test]
fn duplicate_registration() {
	let _ = env_logger::try_init();
	let mut rng = ChaCha8Rng::seed_from_u64(7);
	let config = test_config(7);
	let mut network = LocalNetwork::launch(&mut rng, config.clone(), 3, 8).unwrap();
	// Router 2 restarts with a new keypair and registers again
	network.add_router(Router::new(&mut rng, &config, 2).unwrap()).unwrap();

	let nodes = network.registry().list_nodes();
	assert_eq!(nodes.iter().map(|node| node.id).collect_vec(), vec![0, 1, 2, 2]);
	assert_ne!(nodes[2].public_key, nodes[3].public_key);

	// Both entries are selectable
	let mut seen = [false; 4];
	for _ in 0..200 {
		for node in build_circuit(&mut rng, &nodes, 3).unwrap() {
			if let Some(i) = nodes.iter().position(|n| n == &node) {
				seen[i] = true;
			}
		}
	}
	assert_eq!(seen, [true; 4]);
}

#[test]
fn status_and_defaults() {
	let (network, _) = launch(8, 8);
	assert_eq!(network.router(0).unwrap().status(), STATUS_LIVE);
	assert_eq!(network.user(7).unwrap().status(), STATUS_LIVE);
	assert!(network.router(5).is_none());

	let config = Config::default();
	assert_eq!(config.circuit_length, 3);
	assert_eq!(config.key_bits, 2048);
}
