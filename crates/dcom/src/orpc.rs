//! ORPC call headers (MS-DCOM 2.2.13)
//!
//! Every ORPC request stub begins with ORPCTHIS; every response stub begins
//! with ORPCTHAT. Both may carry an optional array of extents behind a
//! `[unique]` pointer; this client never sends extents but decodes them.

use crate::identifiers::{read_uuid, write_uuid};
use dcerpc::Uuid;
use ndr::{NdrError, NdrMarshal, NdrReader, NdrUnmarshal, NdrWriter, Result};

/// COM version negotiated by the ORPC layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComVersion {
    pub major: u16,
    pub minor: u16,
}

impl ComVersion {
    /// DCOM 5.7, the version current MSMQ servers speak.
    pub const DCOM_5_7: ComVersion = ComVersion { major: 5, minor: 7 };
}

impl Default for ComVersion {
    fn default() -> Self {
        Self::DCOM_5_7
    }
}

/// One ORPC extent: a tagged blob of out-of-band data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrpcExtent {
    pub id: Uuid,
    pub data: Vec<u8>,
}

impl OrpcExtent {
    /// Payload size rounded up to the 8-byte wire granularity.
    fn rounded_len(&self) -> usize {
        (self.data.len() + 7) & !7
    }
}

impl NdrMarshal for OrpcExtent {
    fn ndr_marshal(&self, w: &mut NdrWriter) -> Result<()> {
        w.write_u32(self.rounded_len() as u32);
        write_uuid(w, &self.id);
        w.write_u32(self.data.len() as u32);
        w.write_bytes(&self.data);
        let pad = self.rounded_len() - self.data.len();
        w.write_bytes(&vec![0u8; pad]);
        Ok(())
    }
}

impl NdrUnmarshal for OrpcExtent {
    fn ndr_unmarshal(r: &mut NdrReader<'_>) -> Result<Self> {
        let rounded = r.read_u32()?;
        let id = read_uuid(r)?;
        let size = r.read_u32()?;
        if rounded != ((size + 7) & !7) {
            return Err(NdrError::ConformanceMismatch {
                max_count: rounded,
                actual_count: size,
            });
        }
        r.check_allocation(rounded, 1)?;
        let mut data = r.read_bytes(rounded as usize)?.to_vec();
        data.truncate(size as usize);
        Ok(Self { id, data })
    }
}

/// Extent array: count, reserved word, then a pointer to an array of extent
/// pointers padded to an even count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrpcExtentArray {
    pub extents: Vec<OrpcExtent>,
}

impl NdrMarshal for OrpcExtentArray {
    fn ndr_marshal(&self, w: &mut NdrWriter) -> Result<()> {
        let size = self.extents.len() as u32;
        let padded = (size + 1) & !1;
        w.write_u32(size);
        w.write_u32(0);
        let array_ref = w.alloc_referent();
        w.write_u32(array_ref);
        w.write_u32(padded);
        for _ in &self.extents {
            let referent = w.alloc_referent();
            w.write_u32(referent);
        }
        for _ in size..padded {
            w.write_u32(0);
        }
        for extent in &self.extents {
            extent.ndr_marshal(w)?;
        }
        Ok(())
    }
}

impl NdrUnmarshal for OrpcExtentArray {
    fn ndr_unmarshal(r: &mut NdrReader<'_>) -> Result<Self> {
        let size = r.read_u32()?;
        let _reserved = r.read_u32()?;
        let array_ref = r.read_u32()?;
        if array_ref == 0 {
            if size != 0 {
                return Err(NdrError::InvalidData(
                    "extent array count non-zero but array pointer null".into(),
                ));
            }
            return Ok(Self::default());
        }
        let padded = r.read_u32()?;
        if padded < size {
            return Err(NdrError::ConformanceMismatch {
                max_count: padded,
                actual_count: size,
            });
        }
        r.check_allocation(padded, 4)?;
        let mut present = Vec::with_capacity(size as usize);
        for i in 0..padded {
            let referent = r.read_u32()?;
            if i < size {
                present.push(referent != 0);
            }
        }
        let mut extents = Vec::with_capacity(size as usize);
        for has_extent in present {
            if has_extent {
                extents.push(OrpcExtent::ndr_unmarshal(r)?);
            }
        }
        Ok(Self { extents })
    }
}

/// ORPCTHIS: leads every ORPC request stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrpcThis {
    pub version: ComVersion,
    pub flags: u32,
    pub reserved1: u32,
    pub causality_id: Uuid,
    pub extensions: Option<OrpcExtentArray>,
}

impl OrpcThis {
    pub fn new(causality_id: Uuid) -> Self {
        Self {
            version: ComVersion::default(),
            flags: 0,
            reserved1: 0,
            causality_id,
            extensions: None,
        }
    }
}

impl Default for OrpcThis {
    fn default() -> Self {
        Self::new(Uuid::NIL)
    }
}

impl NdrMarshal for OrpcThis {
    fn ndr_marshal(&self, w: &mut NdrWriter) -> Result<()> {
        w.align(4);
        w.write_u16(self.version.major);
        w.write_u16(self.version.minor);
        w.write_u32(self.flags);
        w.write_u32(self.reserved1);
        write_uuid(w, &self.causality_id);
        w.write_unique_ptr(self.extensions.as_ref())
    }
}

impl NdrUnmarshal for OrpcThis {
    fn ndr_unmarshal(r: &mut NdrReader<'_>) -> Result<Self> {
        r.align(4)?;
        let version = ComVersion {
            major: r.read_u16()?,
            minor: r.read_u16()?,
        };
        let flags = r.read_u32()?;
        let reserved1 = r.read_u32()?;
        let causality_id = read_uuid(r)?;
        let extensions = r.read_unique_ptr()?;
        Ok(Self {
            version,
            flags,
            reserved1,
            causality_id,
            extensions,
        })
    }
}

/// ORPCTHAT: leads every ORPC response stub.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrpcThat {
    pub flags: u32,
    pub extensions: Option<OrpcExtentArray>,
}

impl NdrMarshal for OrpcThat {
    fn ndr_marshal(&self, w: &mut NdrWriter) -> Result<()> {
        w.write_u32(self.flags);
        w.write_unique_ptr(self.extensions.as_ref())
    }
}

impl NdrUnmarshal for OrpcThat {
    fn ndr_unmarshal(r: &mut NdrReader<'_>) -> Result<Self> {
        let flags = r.read_u32()?;
        let extensions = r.read_unique_ptr()?;
        Ok(Self { flags, extensions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::generate_uuid;

    fn marshal<T: NdrMarshal>(value: &T) -> Vec<u8> {
        let mut w = NdrWriter::new();
        value.ndr_marshal(&mut w).unwrap();
        w.write_deferred().unwrap();
        w.finish().to_vec()
    }

    #[test]
    fn test_orpc_this_wire_layout() {
        let this = OrpcThis::default();
        let out = marshal(&this);
        // version 5.7, flags, reserved, nil causality, null extension ptr
        assert_eq!(out.len(), 32);
        assert_eq!(&out[0..4], &[5, 0, 7, 0]);
        assert_eq!(&out[28..32], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_orpc_this_roundtrip() {
        let this = OrpcThis::new(generate_uuid());
        let out = marshal(&this);
        let mut r = NdrReader::new(&out);
        assert_eq!(OrpcThis::ndr_unmarshal(&mut r).unwrap(), this);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_orpc_that_wire_layout() {
        let that = OrpcThat::default();
        assert_eq!(marshal(&that), vec![0u8; 8]);
    }

    #[test]
    fn test_extent_array_roundtrip() {
        let this = OrpcThis {
            extensions: Some(OrpcExtentArray {
                extents: vec![OrpcExtent {
                    id: generate_uuid(),
                    data: vec![1, 2, 3, 4, 5],
                }],
            }),
            ..OrpcThis::default()
        };
        let out = marshal(&this);
        let mut r = NdrReader::new(&out);
        let decoded = OrpcThis::ndr_unmarshal(&mut r).unwrap();
        assert_eq!(decoded, this);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_extent_padding_is_stripped() {
        let extent = OrpcExtent {
            id: Uuid::NIL,
            data: vec![9; 3],
        };
        let out = marshal(&extent);
        // 3 data bytes padded to 8
        assert_eq!(out.len(), 4 + 16 + 4 + 8);
        let mut r = NdrReader::new(&out);
        let decoded = OrpcExtent::ndr_unmarshal(&mut r).unwrap();
        assert_eq!(decoded.data, vec![9; 3]);
    }
}
