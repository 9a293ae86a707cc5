//! NDR (Network Data Representation) transfer syntax runtime
//!
//! Implements the subset of DCE 1.1 NDR needed by ORPC stubs: a streaming
//! writer/reader pair with position tracking, natural alignment, selectable
//! endianness, conformant arrays, and `[unique]` pointers with deferred
//! pointee emission.
//!
//! NDR defers the pointee of an embedded pointer to the end of its embedding
//! construction. The writer models this with an explicit queue: marshaling a
//! non-null unique pointer emits a 4-byte referent id and queues the pointee,
//! and [`NdrWriter::write_deferred`] drains the queue in referent order.
//! ORPC stubs drain after every top-level parameter, so on the wire each
//! referent id is immediately followed by its payload and decoding can
//! proceed sequentially.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{NdrError, Result};
pub use reader::{NdrReader, NdrUnmarshal};
pub use writer::{NdrMarshal, NdrWriter};

// Re-export bytes since it appears in the public API.
pub use bytes;

/// Upper bound on any single allocation driven by a decoded conformance
/// count. Counts above this are rejected rather than allocated.
pub const MAX_NDR_ALLOCATION: usize = 16 * 1024 * 1024;

/// Padding needed to bring `position` up to `alignment` (a power of two).
pub fn align_padding(position: usize, alignment: usize) -> usize {
    debug_assert!(alignment.is_power_of_two());
    position.wrapping_neg() & (alignment - 1)
}
