// SPDX-License-Identifier: Apache-2.0

//! The get path: draining bytes to slices, non-blocking writers and blocking
//! sinks.

use std::cmp::min;
use std::io;
use std::io::{ErrorKind, Write};
use all_asserts::debug_assert_le;
use super::{Cursor, Fifo};

/// Outcome of [`Fifo::write_to`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrainOutcome {
	/// Everything asked for was written: all visible bytes, or all whole
	/// lumps when the still-filling one was left for a later call.
	Drained,
	/// The writer took a partial write or reported it would block; call
	/// again when it is ready.
	Blocked,
}

impl Fifo {
	/// Copies up to `dst.len()` visible bytes out of the FIFO, crossing lump
	/// boundaries as needed. Returns the number of bytes copied, which is
	/// zero when nothing is visible.
	pub fn get_bytes(&mut self, dst: &mut [u8]) -> usize {
		let mut copied = 0;
		while copied < dst.len() {
			let take = min(self.get_limit() - self.get.pos, dst.len() - copied);
			if take == 0 {
				break;
			}

			let pos = self.get.pos;
			dst[copied..copied + take]
				.copy_from_slice(&self.lumps[self.get.lump][pos..pos + take]);
			copied += take;
			self.step_get(take);
		}

		self.verify();
		copied
	}

	/// Drains visible bytes to a non-blocking writer, lump by lump. Unless
	/// `flush_all` is given, the lump holding the effective end is not
	/// written — so a producer interleaving [`put_bytes`](Fifo::put_bytes)
	/// with `write_to` sends whole lumps in single writes.
	///
	/// `ErrorKind::Interrupted` is retried; `ErrorKind::WouldBlock` and
	/// partial writes report [`DrainOutcome::Blocked`].
	///
	/// # Errors
	///
	/// Any other writer error is returned as-is; the get cursor has consumed
	/// exactly the bytes the writer accepted.
	pub fn write_to<W: Write + ?Sized>(
		&mut self,
		sink: &mut W,
		flush_all: bool,
	) -> io::Result<DrainOutcome> {
		let outcome = loop {
			if !flush_all && self.get.lump == self.end_lump_index() {
				break DrainOutcome::Drained;
			}

			let have = self.get_limit() - self.get.pos;
			if have == 0 {
				break DrainOutcome::Drained;
			}

			let pos = self.get.pos;
			let done = match sink.write(&self.lumps[self.get.lump][pos..pos + have]) {
				Ok(done) => done,
				Err(e) if e.kind() == ErrorKind::Interrupted => continue,
				Err(e) if e.kind() == ErrorKind::WouldBlock =>
					break DrainOutcome::Blocked,
				Err(e) => return Err(e),
			};

			self.step_get(done);
			if done < have {
				break DrainOutcome::Blocked;
			}
		};

		self.verify();
		Ok(outcome)
	}

	/// Drains every visible byte to a blocking sink.
	///
	/// # Errors
	///
	/// The sink is expected to accept each write in full; a short write is
	/// reported as [`ErrorKind::WriteZero`] rather than retried, with the get
	/// cursor advanced past only the bytes the sink took. Other writer errors
	/// are returned as-is.
	pub fn write_blocking<W: Write + ?Sized>(&mut self, sink: &mut W) -> io::Result<()> {
		loop {
			let have = self.get_limit() - self.get.pos;
			if have == 0 {
				break;
			}

			let pos = self.get.pos;
			let done = match sink.write(&self.lumps[self.get.lump][pos..pos + have]) {
				Ok(done) => done,
				Err(e) if e.kind() == ErrorKind::Interrupted => continue,
				Err(e) => return Err(e),
			};

			self.step_get(done);
			if done < have {
				return Err(io::Error::new(
					ErrorKind::WriteZero,
					"blocking sink accepted a short write",
				));
			}
		}

		self.verify();
		Ok(())
	}

	/// Moves the get cursor directly to the effective end, discarding unread
	/// visible bytes without copying. Hold and end marks keep their settings;
	/// only the get cursor moves (though a hold mark retains the skipped
	/// bytes for rewinding).
	pub fn skip_to_end(&mut self) {
		self.get = Cursor { lump: self.end_lump_index(), pos: self.end_pos() };
		if self.hold.is_none() {
			self.release_through(self.get.lump);
		}
		self.sync_get();

		self.verify();
	}

	/// Advances the get cursor by `n` bytes within its current lump, running
	/// the advance-get protocol when it reaches the visible limit.
	pub(crate) fn step_get(&mut self, n: usize) {
		self.get.pos += n;
		debug_assert_le!(self.get.pos, self.get_limit());

		if self.get.pos == self.get_limit() {
			self.sync_get();
		}
	}
}
