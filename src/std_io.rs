// SPDX-License-Identifier: Apache-2.0

//! Standard-library trait adapters, so a [`Fifo`] drops into code written
//! against `std::io` and `std::fmt`.

use std::fmt;
use std::io;
use std::io::{BufRead, Read, Write};
use crate::Fifo;

impl Read for Fifo {
	/// Delegates to [`Fifo::get_bytes`]; only visible bytes are read, and a
	/// return of zero means none are left.
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		Ok(self.get_bytes(buf))
	}
}

impl BufRead for Fifo {
	/// Returns the visible bytes of the get cursor's current lump. An empty
	/// slice means nothing is visible; more may appear after the producer
	/// commits.
	fn fill_buf(&mut self) -> io::Result<&[u8]> {
		Ok(self.get_slice())
	}

	fn consume(&mut self, amt: usize) {
		self.step_get(amt);
		self.verify();
	}
}

impl Write for Fifo {
	/// Delegates to [`Fifo::put_bytes`]; the whole slice is always taken.
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.put_bytes(buf);
		Ok(buf.len())
	}

	/// Nothing to do: bytes land in lump storage as they are written.
	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl fmt::Write for Fifo {
	fn write_str(&mut self, s: &str) -> fmt::Result {
		self.put_bytes(s.as_bytes());
		Ok(())
	}
}
