//! Streaming NDR encoder

use crate::error::Result;
use crate::align_padding;
use bytes::{BufMut, Bytes, BytesMut};

/// First referent id handed out for non-null unique pointers.
///
/// MIDL-generated stubs start at 0x20000 and step by 4; receivers only
/// distinguish zero from non-zero, but matching the conventional values keeps
/// captures comparable.
const REFERENT_BASE: u32 = 0x0002_0000;

/// A type that can marshal itself into an [`NdrWriter`].
pub trait NdrMarshal {
    fn ndr_marshal(&self, w: &mut NdrWriter) -> Result<()>;
}

/// Streaming NDR encoder.
///
/// Owns the output buffer; the write position is the buffer length, so
/// alignment is always relative to the start of the stub. Non-null unique
/// pointers queue their pointees, which [`NdrWriter::write_deferred`] drains.
pub struct NdrWriter {
    buf: BytesMut,
    little_endian: bool,
    next_referent: u32,
    deferred: Vec<Box<dyn NdrMarshal>>,
}

impl NdrWriter {
    /// Little-endian writer, the representation this crate's clients present
    /// in their PDU data-representation label.
    pub fn new() -> Self {
        Self::with_endianness(true)
    }

    pub fn with_endianness(little_endian: bool) -> Self {
        Self {
            buf: BytesMut::with_capacity(256),
            little_endian,
            next_referent: REFERENT_BASE,
            deferred: Vec::new(),
        }
    }

    pub fn is_little_endian(&self) -> bool {
        self.little_endian
    }

    /// Current write position, relative to the start of the stub.
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// Consume the writer, returning the encoded stub.
    ///
    /// Any still-queued pointees are a stub bug; they are asserted empty in
    /// debug builds.
    pub fn finish(self) -> Bytes {
        debug_assert!(self.deferred.is_empty(), "undrained deferred pointees");
        self.buf.freeze()
    }

    /// Pad with zero bytes to the given natural alignment.
    pub fn align(&mut self, alignment: usize) {
        let pad = align_padding(self.buf.len(), alignment);
        self.buf.put_bytes(0, pad);
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.put_u8(v);
    }

    pub fn write_i8(&mut self, v: i8) {
        self.buf.put_i8(v);
    }

    pub fn write_u16(&mut self, v: u16) {
        self.align(2);
        if self.little_endian {
            self.buf.put_u16_le(v);
        } else {
            self.buf.put_u16(v);
        }
    }

    pub fn write_i16(&mut self, v: i16) {
        self.write_u16(v as u16);
    }

    pub fn write_u32(&mut self, v: u32) {
        self.align(4);
        if self.little_endian {
            self.buf.put_u32_le(v);
        } else {
            self.buf.put_u32(v);
        }
    }

    pub fn write_i32(&mut self, v: i32) {
        self.write_u32(v as u32);
    }

    pub fn write_u64(&mut self, v: u64) {
        self.align(8);
        if self.little_endian {
            self.buf.put_u64_le(v);
        } else {
            self.buf.put_u64(v);
        }
    }

    pub fn write_i64(&mut self, v: i64) {
        self.write_u64(v as u64);
    }

    pub fn write_f32(&mut self, v: f32) {
        self.align(4);
        if self.little_endian {
            self.buf.put_f32_le(v);
        } else {
            self.buf.put_f32(v);
        }
    }

    pub fn write_f64(&mut self, v: f64) {
        self.align(8);
        if self.little_endian {
            self.buf.put_f64_le(v);
        } else {
            self.buf.put_f64(v);
        }
    }

    /// Raw bytes, no alignment.
    pub fn write_bytes(&mut self, v: &[u8]) {
        self.buf.put_slice(v);
    }

    /// Allocate the next referent id.
    pub fn alloc_referent(&mut self) -> u32 {
        let id = self.next_referent;
        self.next_referent = self.next_referent.wrapping_add(4);
        id
    }

    /// Marshal a `[unique]` pointer: a referent id (0 for null), with the
    /// pointee queued for the next [`write_deferred`](Self::write_deferred).
    pub fn write_unique_ptr<T>(&mut self, value: Option<&T>) -> Result<()>
    where
        T: NdrMarshal + Clone + 'static,
    {
        match value {
            Some(v) => {
                let id = self.alloc_referent();
                self.write_u32(id);
                self.deferred.push(Box::new(v.clone()));
            }
            None => self.write_u32(0),
        }
        Ok(())
    }

    /// Drain queued pointees in referent order. Pointees that themselves
    /// contain pointers queue further work, which is drained in turn.
    pub fn write_deferred(&mut self) -> Result<()> {
        while !self.deferred.is_empty() {
            let batch = std::mem::take(&mut self.deferred);
            for item in batch {
                item.ndr_marshal(self)?;
            }
        }
        Ok(())
    }

    /// Conformant byte array: max_count followed by the raw bytes.
    pub fn write_conformant_bytes(&mut self, data: &[u8]) {
        self.write_u32(data.len() as u32);
        self.write_bytes(data);
    }
}

impl Default for NdrWriter {
    fn default() -> Self {
        Self::new()
    }
}
