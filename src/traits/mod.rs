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

//! Interfaces between the overlay core and the outside world.

use crate::core::{Address, Error};

/// One-way message passing between participants.
///
/// `send` returns once the message is handed over, not once it is processed. Nothing flows back
/// to the sender.
pub trait Transport {
	/// Hand `body` over for delivery to `to`. Fails with [`Error::ForwardDelivery`] if nothing
	/// is reachable at `to`.
	fn send(&self, to: Address, body: String) -> Result<(), Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
	fn send(&self, to: Address, body: String) -> Result<(), Error> {
		(**self).send(to, body)
	}
}
