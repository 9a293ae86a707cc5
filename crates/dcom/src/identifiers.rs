//! DCOM identifier types and UUID wire helpers

use dcerpc::Uuid;
use ndr::{NdrReader, NdrWriter, Result};

/// NDR-encode a UUID: three aligned integer fields plus eight raw bytes.
pub fn write_uuid(w: &mut NdrWriter, uuid: &Uuid) {
    w.write_u32(uuid.time_low);
    w.write_u16(uuid.time_mid);
    w.write_u16(uuid.time_hi_and_version);
    w.write_u8(uuid.clock_seq_hi_and_reserved);
    w.write_u8(uuid.clock_seq_low);
    w.write_bytes(&uuid.node);
}

pub fn read_uuid(r: &mut NdrReader<'_>) -> Result<Uuid> {
    let time_low = r.read_u32()?;
    let time_mid = r.read_u16()?;
    let time_hi_and_version = r.read_u16()?;
    let clock_seq_hi_and_reserved = r.read_u8()?;
    let clock_seq_low = r.read_u8()?;
    let mut node = [0u8; 6];
    node.copy_from_slice(r.read_bytes(6)?);
    Ok(Uuid {
        time_low,
        time_mid,
        time_hi_and_version,
        clock_seq_hi_and_reserved,
        clock_seq_low,
        node,
    })
}

/// Random v4 UUID, used for causality ids.
pub fn generate_uuid() -> Uuid {
    Uuid::from_bytes(*uuid::Uuid::new_v4().as_bytes())
}

/// Interface pointer identifier: addresses one interface on one object.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipid(pub Uuid);

impl Ipid {
    pub fn nil() -> Self {
        Self(Uuid::NIL)
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    pub fn write(&self, w: &mut NdrWriter) {
        write_uuid(w, &self.0);
    }

    pub fn read(r: &mut NdrReader<'_>) -> Result<Self> {
        Ok(Self(read_uuid(r)?))
    }
}

impl std::fmt::Display for Ipid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for Ipid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IPID({})", self.0)
    }
}

impl From<Uuid> for Ipid {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Object exporter identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Oxid(pub u64);

impl std::fmt::Debug for Oxid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OXID(0x{:016x})", self.0)
    }
}

/// Object identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Oid(pub u64);

impl std::fmt::Debug for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OID(0x{:016x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_roundtrip() {
        let uuid = Uuid::parse("eba96b1a-2168-11d3-898c-00e02c074f6b").unwrap();
        let mut w = NdrWriter::new();
        write_uuid(&mut w, &uuid);
        let out = w.finish();
        assert_eq!(out.len(), 16);

        let mut r = NdrReader::new(&out);
        assert_eq!(read_uuid(&mut r).unwrap(), uuid);
    }

    #[test]
    fn test_uuid_wire_bytes() {
        let uuid = Uuid::parse("eba96b1a-2168-11d3-898c-00e02c074f6b").unwrap();
        let mut w = NdrWriter::new();
        write_uuid(&mut w, &uuid);
        let out = w.finish();
        assert_eq!(
            &out[..],
            &[
                0x1a, 0x6b, 0xa9, 0xeb, 0x68, 0x21, 0xd3, 0x11, 0x89, 0x8c, 0x00, 0xe0, 0x2c,
                0x07, 0x4f, 0x6b
            ]
        );
    }

    #[test]
    fn test_generate_uuid_not_nil() {
        let a = generate_uuid();
        let b = generate_uuid();
        assert!(!a.is_nil());
        assert_ne!(a, b);
    }

    #[test]
    fn test_ipid_display() {
        let ipid = Ipid(Uuid::parse("00000001-0002-0003-0405-060708090a0b").unwrap());
        assert_eq!(format!("{:?}", ipid), "IPID(00000001-0002-0003-0405-060708090a0b)");
        assert!(!ipid.is_nil());
        assert!(Ipid::nil().is_nil());
    }
}
