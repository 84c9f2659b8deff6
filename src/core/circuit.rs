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

//! Circuit selection.

use super::{registry::Node, Error};
use arrayvec::ArrayVec;
use rand::{seq::index, Rng};

/// Maximum number of relays in a circuit.
pub const MAX_HOPS: usize = 5;

/// Relays a message traverses, first hop first.
pub type Circuit = ArrayVec<Node, MAX_HOPS>;

/// Pick `num_hops` distinct directory entries uniformly at random. Entries are distinct by
/// position in the directory, so two registrations sharing an id may both be chosen.
///
/// `num_hops` above `MAX_HOPS` is truncated to `MAX_HOPS`.
pub fn build_circuit(
	rng: &mut impl Rng,
	directory: &[Node],
	num_hops: usize,
) -> Result<Circuit, Error> {
	let num_hops = num_hops.min(MAX_HOPS);
	if directory.len() < num_hops {
		return Err(Error::InsufficientNodes { required: num_hops, available: directory.len() })
	}
	Ok(index::sample(rng, directory.len(), num_hops)
		.into_iter()
		.map(|i| directory[i].clone())
		.collect())
}
