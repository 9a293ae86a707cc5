//! Marshaled interface references (MS-DCOM 2.2.18/2.2.19)
//!
//! An interface pointer travels as an MInterfacePointer: a conformant byte
//! blob containing an OBJREF. Only the OBJREF_STANDARD form is parsed; it is
//! what MSMQ servers hand back and it carries the IPID needed to call the
//! returned object.

use crate::error::{DcomError, Result};
use crate::identifiers::{read_uuid, write_uuid, Ipid, Oid, Oxid};
use dcerpc::Uuid;
use ndr::{NdrError, NdrMarshal, NdrReader, NdrUnmarshal, NdrWriter};

/// "MEOW" little-endian.
pub const OBJREF_SIGNATURE: u32 = 0x574f_454d;

pub const OBJREF_STANDARD: u32 = 0x1;
pub const OBJREF_HANDLER: u32 = 0x2;
pub const OBJREF_CUSTOM: u32 = 0x4;

/// STDOBJREF: the standard marshaled object reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StdObjRef {
    pub flags: u32,
    pub public_refs: u32,
    pub oxid: Oxid,
    pub oid: Oid,
    pub ipid: Ipid,
}

impl StdObjRef {
    fn write(&self, w: &mut NdrWriter) {
        w.write_u32(self.flags);
        w.write_u32(self.public_refs);
        w.write_u64(self.oxid.0);
        w.write_u64(self.oid.0);
        self.ipid.write(w);
    }

    fn read(r: &mut NdrReader<'_>) -> ndr::Result<Self> {
        Ok(Self {
            flags: r.read_u32()?,
            public_refs: r.read_u32()?,
            oxid: Oxid(r.read_u64()?),
            oid: Oid(r.read_u64()?),
            ipid: Ipid::read(r)?,
        })
    }
}

/// A parsed OBJREF (standard form).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjRef {
    pub iid: Uuid,
    pub std: StdObjRef,
}

impl ObjRef {
    pub fn new(iid: Uuid, std: StdObjRef) -> Self {
        Self { iid, std }
    }

    pub fn ipid(&self) -> Ipid {
        self.std.ipid
    }

    /// Serialize as OBJREF_STANDARD. The resolver address list is left empty;
    /// callers of this form already hold a connection to the exporter.
    pub fn encode(&self) -> Vec<u8> {
        let mut w = NdrWriter::new();
        w.write_u32(OBJREF_SIGNATURE);
        w.write_u32(OBJREF_STANDARD);
        write_uuid(&mut w, &self.iid);
        self.std.write(&mut w);
        // DUALSTRINGARRAY: entry and security offsets, no bindings
        w.write_u16(0);
        w.write_u16(0);
        w.finish().to_vec()
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut r = NdrReader::new(data);
        let signature = r.read_u32().map_err(DcomError::Ndr)?;
        if signature != OBJREF_SIGNATURE {
            return Err(DcomError::InvalidObjRef(format!(
                "bad signature 0x{signature:08x}"
            )));
        }
        let flags = r.read_u32().map_err(DcomError::Ndr)?;
        let iid = read_uuid(&mut r).map_err(DcomError::Ndr)?;
        match flags {
            OBJREF_STANDARD => {
                let std = StdObjRef::read(&mut r).map_err(DcomError::Ndr)?;
                Ok(Self { iid, std })
            }
            OBJREF_HANDLER | OBJREF_CUSTOM => Err(DcomError::InvalidObjRef(format!(
                "unsupported OBJREF form 0x{flags:x}"
            ))),
            other => Err(DcomError::InvalidObjRef(format!(
                "unknown OBJREF flags 0x{other:x}"
            ))),
        }
    }
}

/// MInterfacePointer: opaque OBJREF bytes as they travel inside a VARIANT or
/// an interface-pointer parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterfacePointer {
    pub data: Vec<u8>,
}

impl InterfacePointer {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn from_objref(objref: &ObjRef) -> Self {
        Self {
            data: objref.encode(),
        }
    }

    pub fn object_ref(&self) -> Result<ObjRef> {
        ObjRef::decode(&self.data)
    }

    /// IPID of the referenced interface instance.
    pub fn ipid(&self) -> Result<Ipid> {
        Ok(self.object_ref()?.ipid())
    }
}

impl NdrMarshal for InterfacePointer {
    fn ndr_marshal(&self, w: &mut NdrWriter) -> ndr::Result<()> {
        // conformant blob: hoisted max count, then ulCntData
        w.write_u32(self.data.len() as u32);
        w.write_u32(self.data.len() as u32);
        w.write_bytes(&self.data);
        Ok(())
    }
}

impl NdrUnmarshal for InterfacePointer {
    fn ndr_unmarshal(r: &mut NdrReader<'_>) -> ndr::Result<Self> {
        let max_count = r.read_u32()?;
        let count = r.read_u32()?;
        if max_count != count {
            return Err(NdrError::ConformanceMismatch {
                max_count,
                actual_count: count,
            });
        }
        r.check_allocation(count, 1)?;
        Ok(Self {
            data: r.read_bytes(count as usize)?.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_objref() -> ObjRef {
        ObjRef::new(
            Uuid::parse("d7d6e076-dccd-11d0-aa4b-0060970debae").unwrap(),
            StdObjRef {
                flags: 0,
                public_refs: 5,
                oxid: Oxid(0x1111_2222_3333_4444),
                oid: Oid(0x5555_6666_7777_8888),
                ipid: Ipid(Uuid::parse("aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee").unwrap()),
            },
        )
    }

    #[test]
    fn test_objref_roundtrip() {
        let objref = sample_objref();
        let decoded = ObjRef::decode(&objref.encode()).unwrap();
        assert_eq!(decoded, objref);
    }

    #[test]
    fn test_objref_bad_signature() {
        let mut data = sample_objref().encode();
        data[0] = 0;
        assert!(matches!(
            ObjRef::decode(&data),
            Err(DcomError::InvalidObjRef(_))
        ));
    }

    #[test]
    fn test_objref_custom_form_rejected() {
        let mut data = sample_objref().encode();
        data[4] = OBJREF_CUSTOM as u8;
        match ObjRef::decode(&data) {
            Err(DcomError::InvalidObjRef(msg)) => assert!(msg.contains("unsupported")),
            other => panic!("expected invalid OBJREF, got {:?}", other),
        }
    }

    #[test]
    fn test_interface_pointer_roundtrip() {
        let pointer = InterfacePointer::from_objref(&sample_objref());
        let mut w = NdrWriter::new();
        pointer.ndr_marshal(&mut w).unwrap();
        let out = w.finish();

        let mut r = NdrReader::new(&out);
        let decoded = InterfacePointer::ndr_unmarshal(&mut r).unwrap();
        assert_eq!(decoded, pointer);
        assert_eq!(decoded.ipid().unwrap(), sample_objref().ipid());
    }

    #[test]
    fn test_interface_pointer_conformance_check() {
        let mut w = NdrWriter::new();
        w.write_u32(8);
        w.write_u32(4);
        w.write_bytes(&[0; 8]);
        let out = w.finish();
        let mut r = NdrReader::new(&out);
        assert!(matches!(
            InterfacePointer::ndr_unmarshal(&mut r),
            Err(NdrError::ConformanceMismatch { .. })
        ));
    }
}
