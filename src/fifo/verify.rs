// SPDX-License-Identifier: Apache-2.0

//! Internal consistency checking. Only an internal defect can make
//! [`check_invariants`](Fifo::check_invariants) fail; it exists to catch that
//! defect at the operation that introduced it rather than at a distant
//! symptom. Every mutating operation runs it in debug builds, and the test
//! suite runs it pervasively.

use super::{Cursor, Fifo};

/// A broken structural invariant, identifying what an internal defect
/// corrupted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
	#[error("lump list is empty")]
	NoLumps,
	#[error("a lump's capacity differs from the configured lump size")]
	LumpSize,
	#[error("put cursor is outside the tail lump")]
	PutOutOfBounds,
	#[error("get cursor is past the end mark's lump")]
	GetPastEndLump,
	#[error("get cursor is past its visible limit")]
	GetPastLimit,
	#[error("hold mark is outside the head lump")]
	HoldOutOfBounds,
	#[error("hold mark is past the get cursor")]
	HoldPastGet,
	#[error("no hold mark, yet lumps linger before the get cursor's lump")]
	UnreleasedLumps,
	#[error("end mark's lump is past the tail")]
	EndPastTail,
	#[error("end mark is outside its lump")]
	EndOutOfBounds,
	#[error("end mark is past the put cursor")]
	EndPastPut,
	#[error("get cursor stalled at its limit with data left and no marks")]
	GetStalled,
	#[error("fifo is empty but the cursors were not reset")]
	NotReset,
}

impl Fifo {
	/// Checks every structural invariant, reporting the first violation
	/// found. `Ok` after every public operation unless the crate itself has a
	/// defect.
	pub fn check_invariants(&self) -> Result<(), Violation> {
		use Violation::*;

		if self.lumps.is_empty() {
			return Err(NoLumps);
		}
		if self.lumps.iter().any(|lump| lump.size() != self.size)
			|| self.spare.as_ref().is_some_and(|lump| lump.size() != self.size)
		{
			return Err(LumpSize);
		}

		let tail = self.tail_index();
		let end_lump = self.end_lump_index();

		if self.put > self.size {
			return Err(PutOutOfBounds);
		}
		if end_lump > tail {
			return Err(EndPastTail);
		}
		if self.get.lump > end_lump {
			return Err(GetPastEndLump);
		}
		if self.get.pos > self.get_limit() {
			return Err(GetPastLimit);
		}

		match self.hold {
			Some(hold) => {
				if hold > self.size {
					return Err(HoldOutOfBounds);
				}
				if self.get.lump == 0 && hold > self.get.pos {
					return Err(HoldPastGet);
				}
			}
			// Fully-read lumps are released as the get cursor advances, so
			// without a hold mark it lives in the head lump.
			None if self.get.lump != 0 => return Err(UnreleasedLumps),
			None => {}
		}

		if let Some(end) = self.end {
			if end.pos > self.size {
				return Err(EndOutOfBounds);
			}
			if end.lump == tail && end.pos > self.put {
				return Err(EndPastPut);
			}
		}

		// A get cursor resting at its limit means either the fifo is empty
		// (and about to be caught by the reset check) or a mark is pinning
		// unreadable data around it. Anything else is a missed sync.
		if self.get.pos == self.get_limit()
			&& !self.is_empty()
			&& self.hold.is_none()
			&& self.end.is_none()
		{
			return Err(GetStalled);
		}

		if self.is_empty() {
			let reset = self.lumps.len() == 1
				&& self.get == Cursor::ZERO
				&& self.put == 0
				&& self.hold.map_or(true, |hold| hold == 0)
				&& self.end.map_or(true, |end| end == Cursor::ZERO);
			if !reset {
				return Err(NotReset);
			}
		}

		Ok(())
	}

	/// Debug-build trap: panics with the violation diagnostic. Release builds
	/// skip the check.
	pub(crate) fn verify(&self) {
		if cfg!(debug_assertions) {
			if let Err(violation) = self.check_invariants() {
				panic!("fifo invariant violated: {violation}\n{self:?}");
			}
		}
	}
}
