//! Streaming NDR decoder

use crate::error::{NdrError, Result};
use crate::{align_padding, MAX_NDR_ALLOCATION};

/// A type that can unmarshal itself from an [`NdrReader`].
pub trait NdrUnmarshal: Sized {
    fn ndr_unmarshal(r: &mut NdrReader<'_>) -> Result<Self>;
}

/// Streaming NDR decoder over a received stub.
///
/// Every read is bounds-checked; alignment skips count from the start of the
/// stub. Decoding is sequential: because stubs drain deferred pointees after
/// each top-level parameter, a non-null referent id is always immediately
/// followed by its pointee.
pub struct NdrReader<'a> {
    buf: &'a [u8],
    pos: usize,
    little_endian: bool,
}

impl<'a> NdrReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_endianness(buf, true)
    }

    pub fn with_endianness(buf: &'a [u8], little_endian: bool) -> Self {
        Self {
            buf,
            pos: 0,
            little_endian,
        }
    }

    pub fn is_little_endian(&self) -> bool {
        self.little_endian
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(NdrError::BufferUnderflow {
                needed: n,
                have: self.remaining(),
            });
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    /// Skip padding up to the given natural alignment.
    pub fn align(&mut self, alignment: usize) -> Result<()> {
        let pad = align_padding(self.pos, alignment);
        self.take(pad)?;
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.align(2)?;
        let b: [u8; 2] = self.take(2)?.try_into().unwrap_or_default();
        Ok(if self.little_endian {
            u16::from_le_bytes(b)
        } else {
            u16::from_be_bytes(b)
        })
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.align(4)?;
        let b: [u8; 4] = self.take(4)?.try_into().unwrap_or_default();
        Ok(if self.little_endian {
            u32::from_le_bytes(b)
        } else {
            u32::from_be_bytes(b)
        })
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.align(8)?;
        let b: [u8; 8] = self.take(8)?.try_into().unwrap_or_default();
        Ok(if self.little_endian {
            u64::from_le_bytes(b)
        } else {
            u64::from_be_bytes(b)
        })
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(self.read_u64()? as i64)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// Raw bytes, no alignment.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.take(n)
    }

    /// Validate a decoded conformance count against the allocation cap
    /// before it drives an allocation of `count * elem_size` bytes.
    pub fn check_allocation(&self, count: u32, elem_size: usize) -> Result<usize> {
        let requested = (count as usize)
            .checked_mul(elem_size)
            .unwrap_or(usize::MAX);
        if requested > MAX_NDR_ALLOCATION {
            return Err(NdrError::AllocationLimitExceeded {
                requested,
                limit: MAX_NDR_ALLOCATION,
            });
        }
        Ok(requested)
    }

    /// Unmarshal a `[unique]` pointer whose pointee immediately follows its
    /// referent id (the per-parameter deferral drain guarantees this).
    pub fn read_unique_ptr<T: NdrUnmarshal>(&mut self) -> Result<Option<T>> {
        let referent = self.read_u32()?;
        if referent == 0 {
            Ok(None)
        } else {
            Ok(Some(T::ndr_unmarshal(self)?))
        }
    }

    /// Conformant byte array: max_count followed by the raw bytes.
    pub fn read_conformant_bytes(&mut self) -> Result<Vec<u8>> {
        let max_count = self.read_u32()?;
        self.check_allocation(max_count, 1)?;
        Ok(self.take(max_count as usize)?.to_vec())
    }
}
