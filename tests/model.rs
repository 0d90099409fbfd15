// SPDX-License-Identifier: Apache-2.0

//! Randomized operation sequences checked against a reference model built
//! from plain vectors. The model tracks the three byte regions a FIFO can
//! hold — replay (behind the get cursor, retained by a hold mark), visible
//! (readable now), and provisional (past the end mark) — with none of the
//! lump machinery, so any divergence points at the lump bookkeeping.

use quickcheck_macros::quickcheck;
use lumpfifo::Fifo;

mod common;
use common::drain;

#[derive(Default)]
struct Model {
	replay: Vec<u8>,
	visible: Vec<u8>,
	provisional: Vec<u8>,
	hold: bool,
	end: bool,
}

impl Model {
	fn put(&mut self, data: &[u8]) {
		if self.end {
			self.provisional.extend_from_slice(data);
		} else {
			self.visible.extend_from_slice(data);
		}
	}

	fn get(&mut self, want: usize) -> Vec<u8> {
		let take = want.min(self.visible.len());
		let taken: Vec<u8> = self.visible.drain(..take).collect();
		if self.hold {
			self.replay.extend_from_slice(&taken);
		}
		taken
	}

	/// Bytes past the mark become visible; used for set, step and clear.
	fn commit(&mut self) {
		self.visible.append(&mut self.provisional);
	}

	fn rollback(&mut self, keep: bool) {
		self.provisional.clear();
		if !keep {
			self.end = false;
		}
	}

	fn set_hold(&mut self) {
		self.replay.clear();
		self.hold = true;
	}

	fn clear_hold(&mut self) {
		self.replay.clear();
		self.hold = false;
	}

	fn rewind(&mut self, keep: bool) {
		if self.hold {
			let mut replayed = std::mem::take(&mut self.replay);
			replayed.append(&mut self.visible);
			self.visible = replayed;
			self.hold = keep;
		} else if keep {
			self.hold = true;
		}
	}

	fn skip(&mut self) {
		let skipped: Vec<u8> = self.visible.drain(..).collect();
		if self.hold {
			self.replay.extend_from_slice(&skipped);
		}
	}

	fn clear(&mut self, clear_marks: bool) {
		self.replay.clear();
		self.visible.clear();
		self.provisional.clear();
		if clear_marks {
			self.hold = false;
			self.end = false;
		}
	}

	fn is_empty(&self) -> bool {
		self.replay.is_empty() && self.visible.is_empty() && self.provisional.is_empty()
	}
}

/// Applies one decoded operation to both sides.
fn apply(fifo: &mut Fifo, model: &mut Model, op: u8, arg: u8, seed: &mut u8) {
	match op % 13 {
		0 => {
			let data: Vec<u8> = (0..usize::from(arg) % 17)
				.map(|_| {
					*seed = seed.wrapping_mul(31).wrapping_add(7);
					*seed
				})
				.collect();
			fifo.put_bytes(&data);
			model.put(&data);
		}
		1 => {
			let mut buf = vec![0; usize::from(arg) % 13];
			let n = fifo.get_bytes(&mut buf);
			assert_eq!(buf[..n], model.get(buf.len())[..]);
		}
		2 => {
			fifo.set_end_mark();
			model.commit();
			model.end = true;
		}
		3 => {
			fifo.step_end_mark();
			if model.end {
				model.commit();
			}
		}
		4 => {
			fifo.clear_end_mark();
			model.commit();
			model.end = false;
		}
		5 => {
			fifo.rollback_to_end_mark(arg & 1 == 1);
			model.rollback(arg & 1 == 1);
		}
		6 => {
			fifo.set_hold_mark();
			model.set_hold();
		}
		7 => {
			fifo.clear_hold_mark();
			model.clear_hold();
		}
		8 => {
			fifo.rewind_to_hold_mark(arg & 1 == 1);
			model.rewind(arg & 1 == 1);
		}
		9 => {
			fifo.skip_to_end();
			model.skip();
		}
		10 => {
			fifo.clear(arg & 1 == 1);
			model.clear(arg & 1 == 1);
		}
		11 => {
			let mut snapshot = fifo.copy();
			assert_eq!(drain(&mut snapshot), model.visible);
		}
		12 => {
			let mut tail = fifo.copy_tail();
			assert_eq!(drain(&mut tail), model.provisional);
		}
		_ => unreachable!(),
	}
}

fn check(fifo: &Fifo, model: &Model) {
	fifo.check_invariants().unwrap();
	assert_eq!(fifo.readable(), model.visible.len());
	assert_eq!(fifo.provisional(), model.provisional.len());
	assert_eq!(fifo.has_hold_mark(), model.hold);
	assert_eq!(fifo.has_end_mark(), model.end);
	assert_eq!(fifo.is_empty(), model.is_empty());
}

fn run(ops: &[(u8, u8)], lump_size: usize) {
	let mut fifo = Fifo::with_exact_lump_size(lump_size);
	let mut model = Model::default();
	let mut seed = 0u8;

	for &(op, arg) in ops {
		apply(&mut fifo, &mut model, op, arg, &mut seed);
		check(&fifo, &model);
	}

	// Whatever the sequence left behind must read back intact.
	fifo.clear_end_mark();
	model.commit();
	model.end = false;
	assert_eq!(drain(&mut fifo), model.visible);
}

#[quickcheck]
fn matches_the_reference_model(ops: Vec<(u8, u8)>, size_sel: u8) {
	run(&ops, usize::from(size_sel % 61) + 1);
}

#[test]
fn long_deterministic_sequence() {
	// A fixed pseudo-random walk, long enough to exercise growth, release,
	// spare reuse and every mark transition with tiny lumps.
	let mut x = 0x2545_f491u32;
	let ops: Vec<(u8, u8)> = (0..5000)
		.map(|_| {
			x ^= x << 13;
			x ^= x >> 17;
			x ^= x << 5;
			((x >> 8) as u8, (x >> 16) as u8)
		})
		.collect();

	for size in [1, 3, 8, 61] {
		run(&ops, size);
	}
}
