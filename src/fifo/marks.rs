// SPDX-License-Identifier: Apache-2.0

//! Hold and end mark operations.
//!
//! The end mark only ever moves forward to the put cursor, and the hold mark
//! is only ever placed at the get cursor — both inherit the unambiguous
//! positioning those cursors maintain, so neither is ever left at the shared
//! boundary between two lumps.

use super::{Cursor, Fifo};

impl Fifo {
	/// Returns `true` if a hold mark is set.
	pub fn has_hold_mark(&self) -> bool {
		self.hold.is_some()
	}

	/// Returns `true` if an end mark is set.
	pub fn has_end_mark(&self) -> bool {
		self.end.is_some()
	}

	/// Sets the end mark at the current put cursor. An existing mark moves
	/// forward, committing everything written since it was set.
	pub fn set_end_mark(&mut self) {
		self.end = Some(self.put_cursor());
		self.verify();
	}

	/// Advances an existing end mark to the current put cursor, committing
	/// everything written since it was set. Does nothing without a mark.
	pub fn step_end_mark(&mut self) {
		if self.end.is_some() {
			self.end = Some(self.put_cursor());
		}
		self.verify();
	}

	/// Clears the end mark; provisional bytes become permanently visible.
	pub fn clear_end_mark(&mut self) {
		self.end = None;
		self.verify();
	}

	/// Discards the provisional region, moving the put cursor back to the end
	/// mark and releasing lumps that only held discarded bytes. Does nothing
	/// without a mark. The mark survives when `keep` is given, otherwise it
	/// is cleared along the way.
	pub fn rollback_to_end_mark(&mut self, keep: bool) {
		// An unset mark and a mark sitting at the put cursor both mean there
		// is nothing to discard.
		if self.end_cursor() != self.put_cursor() {
			let end_lump = self.end_lump_index();
			while self.tail_index() > end_lump {
				if let Some(lump) = self.lumps.pop_back() {
					self.release_lump(lump);
				}
			}

			if self.start_cursor() == self.end_cursor() {
				self.reset_cursors();
			} else {
				self.put = self.end_pos();
			}
		}

		if !keep {
			self.end = None;
		}

		self.verify();
	}

	/// Sets the hold mark at the current get cursor, first permanently
	/// discarding everything before it (including whatever an earlier hold
	/// mark had retained).
	pub fn set_hold_mark(&mut self) {
		self.release_through(self.get.lump);

		if self.get == self.put_cursor() {
			self.hold = Some(0);
			self.reset_cursors();
		} else {
			self.hold = Some(self.get.pos);
		}

		self.verify();
	}

	/// Clears the hold mark, discarding everything before the current get
	/// cursor. Does nothing beyond the discard if no mark was set.
	pub fn clear_hold_mark(&mut self) {
		self.release_through(self.get.lump);
		self.hold = None;

		if self.get == self.put_cursor() {
			self.reset_cursors();
		}

		self.verify();
	}

	/// Moves the get cursor back to the hold mark so retained bytes can be
	/// read again. The mark survives when `keep` is given, otherwise it is
	/// cleared. With no mark set, `keep` places one at the current position.
	pub fn rewind_to_hold_mark(&mut self, keep: bool) {
		match self.hold {
			Some(hold) => {
				self.get = Cursor { lump: 0, pos: hold };
				if !keep {
					self.hold = None;
					if self.get == self.put_cursor() {
						self.reset_cursors();
					}
				}
			}
			None if keep => return self.set_hold_mark(),
			None => {}
		}

		self.verify();
	}
}
