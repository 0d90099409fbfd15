// SPDX-License-Identifier: Apache-2.0

//! ## How it works
//!
//! Bytes live in fixed-size blocks of memory called *lumps*, strung together
//! oldest-to-newest. A producer appends at the **put** cursor, which always
//! sits in the newest lump; when that lump fills, another is taken from a
//! one-slot spare cache or freshly allocated. A consumer drains at the **get**
//! cursor; lumps it finishes with are released, and one released lump is kept
//! spare so a FIFO that oscillates around a lump boundary never touches the
//! allocator. A FIFO always holds at least one lump, and whenever it drains
//! empty every cursor collapses back to the start of the sole remaining lump.
//!
//! ### Marks
//!
//! Two optional bookmarks extend the plain queue:
//!
//! * A **hold mark** is a consumer checkpoint. While set, drained lumps are
//!   retained instead of released, and [`Fifo::rewind_to_hold_mark`] moves the
//!   get cursor back so the same bytes can be read again. Setting the mark
//!   discards everything before the current get cursor first.
//! * An **end mark** is a producer commit boundary. Bytes appended past it are
//!   physically present but invisible to the consumer until the mark is
//!   stepped forward or cleared; [`Fifo::rollback_to_end_mark`] discards them
//!   instead, releasing any lumps that only held provisional data.
//!
//! The region a consumer may currently read runs from the effective start
//! (the hold mark if set, else the get cursor) to the effective end (the end
//! mark if set, else the put cursor).
//!
//! ### I/O
//!
//! [`Fifo::read_from`] fills whole lumps from a non-blocking reader and
//! [`Fifo::write_to`] drains whole lumps to a non-blocking writer, reporting
//! would-block, end-of-input and errors as distinct outcomes so a poll loop
//! can resume later. `Fifo` also implements [`std::io::Read`],
//! [`std::io::Write`], [`std::io::BufRead`] and [`std::fmt::Write`], so
//! `write!(fifo, ...)` renders formatted text straight into lump storage,
//! spanning lump boundaries transparently.
//!
//! A `Fifo` is owned and driven by one logical thread of control; callers
//! embedding one in a concurrent system serialize access externally.

mod fifo;
mod lump;
mod std_io;

pub use fifo::read::DrainOutcome;
pub use fifo::verify::Violation;
pub use fifo::write::FillOutcome;
pub use fifo::Fifo;

/// Lump size used when [`Fifo::new`] is given zero.
pub const DEFAULT_LUMP_SIZE: usize = 4096;

/// Requested lump sizes are rounded up to this boundary by [`Fifo::new`].
pub(crate) const LUMP_SIZE_ALIGN: usize = 128;
