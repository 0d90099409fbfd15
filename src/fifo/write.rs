// SPDX-License-Identifier: Apache-2.0

//! The put path: appending bytes, formatted text and non-blocking reader
//! contents to a [`Fifo`].

use std::cmp::min;
use std::fmt;
use std::io;
use std::io::{ErrorKind, Read};
use super::Fifo;

/// Outcome of [`Fifo::read_from`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FillOutcome {
	/// Bytes read before the request was satisfied, the reader would have
	/// blocked, or end-of-input followed some data. `Bytes(0)` means the
	/// reader had nothing to give right now.
	Bytes(usize),
	/// End-of-input met immediately, with nothing read this call.
	Eof,
}

impl Fifo {
	/// Appends `src` in full, growing the lump list as needed.
	pub fn put_bytes(&mut self, mut src: &[u8]) {
		while !src.is_empty() {
			if self.put == self.size {
				self.grow();
			}

			let take = min(self.size - self.put, src.len());
			let pos = self.put;
			self.tail_mut()[pos..pos + take].copy_from_slice(&src[..take]);
			self.put += take;
			src = &src[take..];
		}

		self.verify();
	}

	/// Renders `args` into lump storage, growing as needed so a single
	/// formatted value spans lump boundaries transparently. Returns the
	/// number of bytes appended.
	///
	/// `Fifo` also implements [`fmt::Write`], so `write!(fifo, ...)` does the
	/// same without the count.
	///
	/// # Errors
	///
	/// Fails only if a `Display` implementation among `args` fails; the FIFO
	/// itself never rejects output.
	pub fn put_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<usize, fmt::Error> {
		struct Counted<'f> {
			fifo: &'f mut Fifo,
			done: usize,
		}

		impl fmt::Write for Counted<'_> {
			fn write_str(&mut self, s: &str) -> fmt::Result {
				self.fifo.put_bytes(s.as_bytes());
				self.done += s.len();
				Ok(())
			}
		}

		let mut out = Counted { fifo: self, done: 0 };
		fmt::write(&mut out, args)?;
		Ok(out.done)
	}

	/// Fills the FIFO from a non-blocking reader: up to the end of the
	/// current lump, then as many whole further lumps as `request` asks for.
	/// A request of zero reads into the current lump only. Stops early when
	/// the reader would block, hits end-of-input, or fails.
	///
	/// `ErrorKind::Interrupted` is retried; `ErrorKind::WouldBlock` ends the
	/// call with the bytes read so far.
	///
	/// # Errors
	///
	/// Any other reader error is returned as-is. The FIFO keeps every byte
	/// read before the failure and its cursors stay consistent, so the caller
	/// may retry, close, or escalate.
	pub fn read_from<R: Read + ?Sized>(
		&mut self,
		src: &mut R,
		mut request: usize,
	) -> io::Result<FillOutcome> {
		let mut total = 0;

		let outcome = loop {
			if self.put == self.size {
				self.grow();
				request = request.saturating_sub(1);
			}

			let pos = self.put;
			let got = match src.read(&mut self.tail_mut()[pos..]) {
				Ok(got) => got,
				Err(e) if e.kind() == ErrorKind::Interrupted => continue,
				Err(e) if e.kind() == ErrorKind::WouldBlock =>
					break FillOutcome::Bytes(total),
				Err(e) => return Err(e),
			};

			if got == 0 {
				break if total > 0 { FillOutcome::Bytes(total) } else { FillOutcome::Eof };
			}

			self.put += got;
			total += got;

			if request == 0 {
				break FillOutcome::Bytes(total);
			}
		};

		self.verify();
		Ok(outcome)
	}
}
