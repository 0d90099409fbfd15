// SPDX-License-Identifier: Apache-2.0

pub(crate) mod marks;
pub(crate) mod read;
pub(crate) mod verify;
pub(crate) mod write;

use std::collections::VecDeque;
use std::fmt;
use std::fmt::{Debug, Formatter};
use crate::lump::Lump;
use crate::{DEFAULT_LUMP_SIZE, LUMP_SIZE_ALIGN};

/// A position within a FIFO: a lump index (oldest lump is `0`) and a byte
/// offset within that lump.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Cursor {
	pub lump: usize,
	pub pos: usize,
}

impl Cursor {
	/// Start of the oldest lump; where every cursor rests in an empty FIFO.
	pub const ZERO: Cursor = Cursor { lump: 0, pos: 0 };
}

/// A chunked, mark-aware byte FIFO.
///
/// See the [crate docs](crate) for the full picture. Internally the FIFO is an
/// ordered, never-empty list of equally-sized [`Lump`]s. The put cursor lives
/// in the newest lump and the get cursor trails it; the optional hold mark
/// lives in the oldest lump (everything before it has been discarded) and the
/// optional end mark sits between the get and put cursors.
pub struct Fifo {
	/// Oldest lump at the front, newest (where `put` lives) at the back.
	lumps: VecDeque<Lump>,
	/// Capacity of every lump, fixed at creation.
	size: usize,
	/// Next byte to be consumed.
	get: Cursor,
	/// Next byte to be written; an offset in the back lump.
	put: usize,
	/// Hold mark: an offset in the front lump, when set.
	hold: Option<usize>,
	/// End mark: bytes past it are invisible to the consumer, when set.
	end: Option<Cursor>,
	/// One released lump kept for reuse, bounding allocator churn.
	spare: Option<Lump>,
	/// Lumps allocated over the FIFO's lifetime; spare reuse does not count.
	allocated: u64,
}

impl Default for Fifo {
	fn default() -> Self {
		Self::new(0)
	}
}

impl Fifo {
	/// Creates a FIFO whose lumps hold `lump_size` bytes each, rounded up to a
	/// 128-byte boundary. A size of zero selects [`DEFAULT_LUMP_SIZE`].
	pub fn new(lump_size: usize) -> Self {
		let size = if lump_size == 0 { DEFAULT_LUMP_SIZE } else { lump_size };
		Self::with_exact_lump_size(size.div_ceil(LUMP_SIZE_ALIGN) * LUMP_SIZE_ALIGN)
	}

	/// Creates a FIFO with lumps of exactly `lump_size` bytes, skipping the
	/// rounding [`new`](Fifo::new) applies. Chiefly useful when the chunking
	/// itself matters, as in tests.
	///
	/// # Panics
	///
	/// Panics if `lump_size` is zero.
	pub fn with_exact_lump_size(lump_size: usize) -> Self {
		assert!(lump_size > 0, "lump size must be non-zero");

		let mut lumps = VecDeque::with_capacity(2);
		lumps.push_back(Lump::new(lump_size));
		Self {
			lumps,
			size: lump_size,
			get: Cursor::ZERO,
			put: 0,
			hold: None,
			end: None,
			spare: None,
			allocated: 1,
		}
	}

	/// Returns the capacity of each lump.
	pub fn lump_size(&self) -> usize {
		self.size
	}

	/// Returns the number of lumps currently strung into the FIFO, not
	/// counting the spare.
	pub fn lump_count(&self) -> usize {
		self.lumps.len()
	}

	/// Returns `true` if a released lump is being kept for reuse.
	pub fn has_spare(&self) -> bool {
		self.spare.is_some()
	}

	/// Returns the number of lumps allocated over the FIFO's lifetime,
	/// including the one it was created with. Stays flat while the spare lump
	/// absorbs growth.
	pub fn allocations(&self) -> u64 {
		self.allocated
	}

	/// Returns `true` if there is nothing between the effective start and the
	/// put cursor. A FIFO with an end mark and only provisional bytes after it
	/// is *not* empty.
	pub fn is_empty(&self) -> bool {
		self.start_cursor() == self.put_cursor()
	}

	/// Returns the number of bytes the consumer may currently read: from the
	/// get cursor to the end mark, or to the put cursor if no mark is set.
	pub fn readable(&self) -> usize {
		let end_lump = self.end_lump_index();
		if self.get.lump == end_lump {
			self.end_pos() - self.get.pos
		} else {
			(self.size - self.get.pos)
				+ (end_lump - self.get.lump - 1) * self.size
				+ self.end_pos()
		}
	}

	/// Returns the number of provisional bytes: written past the end mark but
	/// not yet committed. Zero when no end mark is set.
	pub fn provisional(&self) -> usize {
		let Some(end) = self.end else { return 0 };
		let tail = self.tail_index();
		if end.lump == tail {
			self.put - end.pos
		} else {
			(self.size - end.pos) + (tail - end.lump - 1) * self.size + self.put
		}
	}

	/// Empties the FIFO, keeping one lump (plus at most the spare). Hold and
	/// end marks survive, pointing at the reset position, unless `clear_marks`
	/// is given.
	pub fn clear(&mut self, clear_marks: bool) {
		let excess = self.tail_index();
		self.get = Cursor { lump: excess, pos: 0 };
		if let Some(end) = &mut self.end {
			end.lump = excess;
		}
		self.release_through(excess);
		self.reset_cursors();

		if clear_marks {
			self.hold = None;
			self.end = None;
		}

		self.verify();
	}

	/// Appends every visible byte of this FIFO — get cursor to end mark or
	/// put cursor — to `dst`, without consuming anything here.
	pub fn copy_to(&self, dst: &mut Fifo) {
		let end_lump = self.end_lump_index();
		let Cursor { mut lump, mut pos } = self.get;
		loop {
			let end = if lump == end_lump { self.end_pos() } else { self.size };
			dst.put_bytes(&self.lumps[lump][pos..end]);

			if lump == end_lump {
				break;
			}
			lump += 1;
			pos = 0;
		}
	}

	/// Returns a new FIFO, sized like this one, holding a copy of every
	/// visible byte. Shorthand for [`copy_to`](Fifo::copy_to) into a fresh
	/// FIFO.
	pub fn copy(&self) -> Fifo {
		let mut dst = Fifo::with_exact_lump_size(self.size);
		self.copy_to(&mut dst);
		dst
	}

	/// Appends the provisional region — end mark to put cursor — to `dst`,
	/// without consuming anything here. Does nothing when no end mark is set.
	pub fn copy_tail_to(&self, dst: &mut Fifo) {
		let Some(Cursor { mut lump, mut pos }) = self.end else { return };
		let tail = self.tail_index();
		loop {
			let end = if lump == tail { self.put } else { self.size };
			dst.put_bytes(&self.lumps[lump][pos..end]);

			if lump == tail {
				break;
			}
			lump += 1;
			pos = 0;
		}
	}

	/// Returns a new FIFO, sized like this one, holding a copy of the
	/// provisional region. Empty when no end mark is set.
	pub fn copy_tail(&self) -> Fifo {
		let mut dst = Fifo::with_exact_lump_size(self.size);
		self.copy_tail_to(&mut dst);
		dst
	}
}

// Cursor selectors and lump management. Everything below is the
// invariant-preserving core the public operations are built on.
impl Fifo {
	pub(crate) fn tail_index(&self) -> usize {
		self.lumps.len() - 1
	}

	/// The lump containing the effective end: the end mark's lump when set,
	/// else the tail.
	pub(crate) fn end_lump_index(&self) -> usize {
		self.end.map_or(self.tail_index(), |end| end.lump)
	}

	/// Offset of the effective end within [`end_lump_index`]'s lump: the end
	/// mark when set, else the put cursor.
	///
	/// [`end_lump_index`]: Fifo::end_lump_index
	pub(crate) fn end_pos(&self) -> usize {
		self.end.map_or(self.put, |end| end.pos)
	}

	pub(crate) fn end_cursor(&self) -> Cursor {
		Cursor { lump: self.end_lump_index(), pos: self.end_pos() }
	}

	/// The effective start: the hold mark (always in the front lump) when
	/// set, else the get cursor.
	pub(crate) fn start_cursor(&self) -> Cursor {
		match self.hold {
			Some(pos) => Cursor { lump: 0, pos },
			None => self.get,
		}
	}

	pub(crate) fn put_cursor(&self) -> Cursor {
		Cursor { lump: self.tail_index(), pos: self.put }
	}

	/// Offset the get cursor may read up to within its lump: the effective
	/// end when the get cursor shares a lump with it, else the lump's
	/// physical end.
	pub(crate) fn get_limit(&self) -> usize {
		if self.get.lump == self.end_lump_index() {
			self.end_pos()
		} else {
			self.size
		}
	}

	/// Collapses all cursors to the start of the sole remaining lump. Called
	/// whenever the FIFO transitions to empty. Marks that are set stay set,
	/// pointing at the reset position.
	pub(crate) fn reset_cursors(&mut self) {
		debug_assert_eq!(self.lumps.len(), 1, "reset with more than one lump");

		self.get = Cursor::ZERO;
		self.put = 0;
		if let Some(hold) = &mut self.hold {
			*hold = 0;
		}
		if let Some(end) = &mut self.end {
			*end = Cursor::ZERO;
		}
	}

	/// Advance-get protocol, called when the get cursor reaches its visible
	/// limit. Either nothing beyond exists (reset if that leaves the FIFO
	/// empty), or the get cursor steps to the start of the next lump and the
	/// lumps it left behind are released — unless a hold mark retains them.
	pub(crate) fn sync_get(&mut self) {
		debug_assert_eq!(self.get.pos, self.get_limit());

		if self.get.lump == self.end_lump_index() {
			if self.is_empty() {
				self.reset_cursors();
			}
		} else {
			self.get.lump += 1;
			self.get.pos = 0;
			if self.hold.is_none() {
				self.release_through(self.get.lump);
			}
		}
	}

	/// Pops `count` lumps off the front and shifts the lump indices of the
	/// cursors left behind. Callers guarantee the get cursor and any end mark
	/// sit at or beyond lump `count`.
	pub(crate) fn release_through(&mut self, count: usize) {
		for _ in 0..count {
			if let Some(lump) = self.lumps.pop_front() {
				self.release_lump(lump);
			}
		}

		self.get.lump -= count;
		if let Some(end) = &mut self.end {
			end.lump -= count;
		}
	}

	/// Recycles a lump that is no longer strung into the FIFO: kept as the
	/// spare if the slot is free, dropped otherwise.
	pub(crate) fn release_lump(&mut self, lump: Lump) {
		if self.spare.is_none() {
			self.spare = Some(lump);
		}
	}

	/// Appends a lump for the put cursor to continue into, taking the spare
	/// when one is held. Called only when the tail lump is full; the FIFO
	/// cannot be empty here, or the cursors would have been reset.
	///
	/// A get cursor or end mark sitting exactly at the put cursor moves to
	/// the start of the new lump too: neither is ever left at the ambiguous
	/// end-of-one-lump/start-of-the-next position.
	pub(crate) fn grow(&mut self) {
		debug_assert_eq!(self.put, self.size, "grow below the tail lump's end");
		debug_assert!(!self.is_empty(), "grow on an empty fifo");

		let lump = match self.spare.take() {
			Some(spare) => spare,
			None => {
				self.allocated += 1;
				Lump::new(self.size)
			}
		};

		let old_put = self.put_cursor();
		self.lumps.push_back(lump);
		let new_tail = self.tail_index();

		// Only possible with a hold mark retaining earlier data.
		if self.get == old_put {
			self.get = Cursor { lump: new_tail, pos: 0 };
		}
		if let Some(end) = &mut self.end {
			if *end == old_put {
				*end = Cursor { lump: new_tail, pos: 0 };
			}
		}

		self.put = 0;
		self.verify();
	}

	pub(crate) fn tail_mut(&mut self) -> &mut Lump {
		let tail = self.tail_index();
		&mut self.lumps[tail]
	}

	/// The bytes the get cursor may read without stepping between lumps.
	pub(crate) fn get_slice(&self) -> &[u8] {
		&self.lumps[self.get.lump][self.get.pos..self.get_limit()]
	}
}

impl Debug for Fifo {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Fifo")
			.field("lump_size", &self.size)
			.field("lumps", &self.lumps.len())
			.field("get", &self.get)
			.field("put", &self.put)
			.field("hold", &self.hold)
			.field("end", &self.end)
			.field("spare", &self.spare.is_some())
			.finish_non_exhaustive()
	}
}
