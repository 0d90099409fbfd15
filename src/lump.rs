// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::fmt::{Debug, Formatter};
use std::ops::{Deref, DerefMut};

/// A fixed-capacity block of FIFO storage. Lumps are owned by exactly one
/// [`Fifo`](crate::Fifo) and are only ever recycled through its spare slot,
/// never shared.
///
/// Allocation failure aborts the process; the FIFO cannot make progress
/// without storage and never reports it as a recoverable error.
pub(crate) struct Lump(Box<[u8]>);

impl Lump {
	pub fn new(size: usize) -> Self {
		Self(vec![0; size].into_boxed_slice())
	}

	/// Capacity in bytes. Every lump of a FIFO has the same capacity.
	pub fn size(&self) -> usize {
		self.0.len()
	}
}

impl Deref for Lump {
	type Target = [u8];
	fn deref(&self) -> &[u8] {
		&self.0
	}
}

impl DerefMut for Lump {
	fn deref_mut(&mut self) -> &mut [u8] {
		&mut self.0
	}
}

impl Debug for Lump {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Lump")
			.field("size", &self.size())
			.finish_non_exhaustive()
	}
}
