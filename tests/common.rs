// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use lumpfifo::Fifo;

/// Deterministic non-repeating-ish byte pattern for round-trip checks.
pub fn pattern(len: usize) -> Vec<u8> {
	(0..len).map(|i| (i % 251) as u8).collect()
}

/// Reads the FIFO dry through `get_bytes`, with a deliberately awkward
/// buffer size so reads straddle lump boundaries.
pub fn drain(fifo: &mut Fifo) -> Vec<u8> {
	let mut out = Vec::new();
	let mut buf = [0u8; 7];
	loop {
		let n = fifo.get_bytes(&mut buf);
		if n == 0 {
			break;
		}
		out.extend_from_slice(&buf[..n]);
	}
	out
}
