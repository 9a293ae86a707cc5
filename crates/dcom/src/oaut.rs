//! OLE automation wire types (MS-OAUT)
//!
//! BSTR travels as a FLAGGED_WORD_BLOB, VARIANT as a wireVARIANT, and byte
//! arrays as a one-dimensional SAFEARRAY of VT_UI1. Only the VT types the
//! MSMQ automation surface exchanges are supported; anything else decodes to
//! an error rather than being silently skipped.

use crate::objref::InterfacePointer;
use ndr::{NdrError, NdrMarshal, NdrReader, NdrUnmarshal, NdrWriter, Result};

/// VARENUM values used on the wire.
pub mod vt {
    pub const EMPTY: u16 = 0;
    pub const NULL: u16 = 1;
    pub const I2: u16 = 2;
    pub const I4: u16 = 3;
    pub const R4: u16 = 4;
    pub const R8: u16 = 5;
    pub const CY: u16 = 6;
    pub const DATE: u16 = 7;
    pub const BSTR: u16 = 8;
    pub const DISPATCH: u16 = 9;
    pub const ERROR: u16 = 10;
    pub const BOOL: u16 = 11;
    pub const UNKNOWN: u16 = 13;
    pub const I1: u16 = 16;
    pub const UI1: u16 = 17;
    pub const UI2: u16 = 18;
    pub const UI4: u16 = 19;
    pub const I8: u16 = 20;
    pub const UI8: u16 = 21;
    pub const INT: u16 = 22;
    pub const UINT: u16 = 23;
    pub const ARRAY: u16 = 0x2000;
}

/// VARIANT_BOOL truth value.
pub const VARIANT_TRUE: i16 = -1;
pub const VARIANT_FALSE: i16 = 0;

/// BSTR wire form: FLAGGED_WORD_BLOB (MS-OAUT 2.2.23.1).
///
/// Conformant layout: hoisted character count, byte length, character count
/// again, then the UTF-16 code units with no terminator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BString(pub String);

impl BString {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for BString {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for BString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for BString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl NdrMarshal for BString {
    fn ndr_marshal(&self, w: &mut NdrWriter) -> Result<()> {
        let units: Vec<u16> = self.0.encode_utf16().collect();
        w.write_u32(units.len() as u32);
        w.write_u32(units.len() as u32 * 2);
        w.write_u32(units.len() as u32);
        for unit in units {
            w.write_u16(unit);
        }
        Ok(())
    }
}

impl NdrUnmarshal for BString {
    fn ndr_unmarshal(r: &mut NdrReader<'_>) -> Result<Self> {
        let max_count = r.read_u32()?;
        let byte_len = r.read_u32()?;
        let count = r.read_u32()?;
        if max_count != count || byte_len != count * 2 {
            return Err(NdrError::ConformanceMismatch {
                max_count,
                actual_count: count,
            });
        }
        r.check_allocation(count, 2)?;
        let mut units = Vec::with_capacity(count as usize);
        for _ in 0..count {
            units.push(r.read_u16()?);
        }
        let s = String::from_utf16(&units).map_err(|_| NdrError::Utf16Error)?;
        Ok(Self(s))
    }
}

/// One-dimensional SAFEARRAY of VT_UI1 (MS-OAUT 2.2.30.10), the wire form of
/// MSMQ message bodies, sender ids and certificates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct SafeArrayUi1(Vec<u8>);

const FADF_HAVEVARTYPE: u16 = 0x80;

impl NdrMarshal for SafeArrayUi1 {
    fn ndr_marshal(&self, w: &mut NdrWriter) -> Result<()> {
        let len = self.0.len() as u32;
        w.write_u32(1); // hoisted bound count (cDims)
        w.write_u16(1); // cDims
        w.write_u16(FADF_HAVEVARTYPE);
        w.write_u32(1); // cbElements
        w.write_u32(0); // cLocks
        w.write_u32(vt::UI1 as u32); // union discriminant
        w.write_u32(len); // BYTE_SIZEDARR clSize
        let data_ref = w.alloc_referent();
        w.write_u32(data_ref);
        w.write_u32(len); // bound: cElements
        w.write_i32(0); // bound: lLbound
        // deferred pData: conformant byte array
        w.write_conformant_bytes(&self.0);
        Ok(())
    }
}

impl NdrUnmarshal for SafeArrayUi1 {
    fn ndr_unmarshal(r: &mut NdrReader<'_>) -> Result<Self> {
        let _bounds = r.read_u32()?;
        let dims = r.read_u16()?;
        if dims != 1 {
            return Err(NdrError::InvalidData(format!(
                "unsupported SAFEARRAY dimension count {dims}"
            )));
        }
        let _features = r.read_u16()?;
        let _elem_size = r.read_u32()?;
        let _locks = r.read_u32()?;
        let sf_type = r.read_u32()?;
        if sf_type != vt::UI1 as u32 {
            return Err(NdrError::InvalidEnumValue(sf_type));
        }
        let size = r.read_u32()?;
        let data_ref = r.read_u32()?;
        let _elements = r.read_u32()?;
        let _lbound = r.read_i32()?;
        if data_ref == 0 {
            return Ok(Self(Vec::new()));
        }
        let data = r.read_conformant_bytes()?;
        if data.len() != size as usize {
            return Err(NdrError::ConformanceMismatch {
                max_count: size,
                actual_count: data.len() as u32,
            });
        }
        Ok(Self(data))
    }
}

/// A decoded VARIANT value.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Empty,
    Null,
    I2(i16),
    I4(i32),
    R4(f32),
    R8(f64),
    /// CURRENCY: fixed-point scaled by 10^4.
    Currency(i64),
    /// DATE: days since 1899-12-30.
    Date(f64),
    BStr(BString),
    Dispatch(Option<InterfacePointer>),
    Error(u32),
    Bool(bool),
    Unknown(Option<InterfacePointer>),
    I1(i8),
    UI1(u8),
    UI2(u16),
    UI4(u32),
    I8(i64),
    UI8(u64),
    Int(i32),
    UInt(u32),
    /// VT_ARRAY | VT_UI1.
    ByteArray(Vec<u8>),
}

impl Variant {
    pub fn bstr(s: impl Into<String>) -> Self {
        Self::BStr(BString::new(s))
    }

    pub fn vt(&self) -> u16 {
        match self {
            Variant::Empty => vt::EMPTY,
            Variant::Null => vt::NULL,
            Variant::I2(_) => vt::I2,
            Variant::I4(_) => vt::I4,
            Variant::R4(_) => vt::R4,
            Variant::R8(_) => vt::R8,
            Variant::Currency(_) => vt::CY,
            Variant::Date(_) => vt::DATE,
            Variant::BStr(_) => vt::BSTR,
            Variant::Dispatch(_) => vt::DISPATCH,
            Variant::Error(_) => vt::ERROR,
            Variant::Bool(_) => vt::BOOL,
            Variant::Unknown(_) => vt::UNKNOWN,
            Variant::I1(_) => vt::I1,
            Variant::UI1(_) => vt::UI1,
            Variant::UI2(_) => vt::UI2,
            Variant::UI4(_) => vt::UI4,
            Variant::I8(_) => vt::I8,
            Variant::UI8(_) => vt::UI8,
            Variant::Int(_) => vt::INT,
            Variant::UInt(_) => vt::UINT,
            Variant::ByteArray(_) => vt::ARRAY | vt::UI1,
        }
    }

    fn marshal_arm(&self, w: &mut NdrWriter) -> Result<()> {
        match self {
            Variant::Empty | Variant::Null => {}
            Variant::I2(v) => w.write_i16(*v),
            Variant::I4(v) => w.write_i32(*v),
            Variant::R4(v) => w.write_f32(*v),
            Variant::R8(v) => w.write_f64(*v),
            Variant::Currency(v) => w.write_i64(*v),
            Variant::Date(v) => w.write_f64(*v),
            Variant::BStr(s) => w.write_unique_ptr(Some(s))?,
            Variant::Dispatch(p) | Variant::Unknown(p) => w.write_unique_ptr(p.as_ref())?,
            Variant::Error(v) => w.write_u32(*v),
            Variant::Bool(v) => w.write_i16(if *v { VARIANT_TRUE } else { VARIANT_FALSE }),
            Variant::I1(v) => w.write_i8(*v),
            Variant::UI1(v) => w.write_u8(*v),
            Variant::UI2(v) => w.write_u16(*v),
            Variant::UI4(v) => w.write_u32(*v),
            Variant::I8(v) => w.write_i64(*v),
            Variant::UI8(v) => w.write_u64(*v),
            Variant::Int(v) => w.write_i32(*v),
            Variant::UInt(v) => w.write_u32(*v),
            Variant::ByteArray(data) => {
                w.write_unique_ptr(Some(&SafeArrayUi1(data.clone())))?
            }
        }
        Ok(())
    }
}

impl NdrMarshal for Variant {
    fn ndr_marshal(&self, w: &mut NdrWriter) -> Result<()> {
        w.align(8);
        // measure the union arm (with its deferred pointees) to fill clSize;
        // the arm starts 8-aligned in both the scratch and the real stream
        let mut scratch = NdrWriter::with_endianness(w.is_little_endian());
        self.marshal_arm(&mut scratch)?;
        scratch.write_deferred()?;
        let arm = scratch.finish();

        let header_size = 16;
        w.write_u32(((header_size + arm.len() + 7) / 8) as u32); // clSize in quad words
        w.write_u32(0); // rpcReserved
        w.write_u16(self.vt());
        w.write_u16(0);
        w.write_u16(0);
        w.write_u16(0);
        w.write_bytes(&arm);
        Ok(())
    }
}

impl NdrUnmarshal for Variant {
    fn ndr_unmarshal(r: &mut NdrReader<'_>) -> Result<Self> {
        r.align(8)?;
        let _cl_size = r.read_u32()?;
        let _reserved = r.read_u32()?;
        let vt_tag = r.read_u16()?;
        let _w1 = r.read_u16()?;
        let _w2 = r.read_u16()?;
        let _w3 = r.read_u16()?;
        match vt_tag {
            vt::EMPTY => Ok(Variant::Empty),
            vt::NULL => Ok(Variant::Null),
            vt::I2 => Ok(Variant::I2(r.read_i16()?)),
            vt::I4 => Ok(Variant::I4(r.read_i32()?)),
            vt::R4 => Ok(Variant::R4(r.read_f32()?)),
            vt::R8 => Ok(Variant::R8(r.read_f64()?)),
            vt::CY => Ok(Variant::Currency(r.read_i64()?)),
            vt::DATE => Ok(Variant::Date(r.read_f64()?)),
            vt::BSTR => {
                let s = r.read_unique_ptr::<BString>()?;
                Ok(Variant::BStr(s.unwrap_or_default()))
            }
            vt::DISPATCH => Ok(Variant::Dispatch(r.read_unique_ptr()?)),
            vt::ERROR => Ok(Variant::Error(r.read_u32()?)),
            vt::BOOL => Ok(Variant::Bool(r.read_i16()? != VARIANT_FALSE)),
            vt::UNKNOWN => Ok(Variant::Unknown(r.read_unique_ptr()?)),
            vt::I1 => Ok(Variant::I1(r.read_i8()?)),
            vt::UI1 => Ok(Variant::UI1(r.read_u8()?)),
            vt::UI2 => Ok(Variant::UI2(r.read_u16()?)),
            vt::UI4 => Ok(Variant::UI4(r.read_u32()?)),
            vt::I8 => Ok(Variant::I8(r.read_i64()?)),
            vt::UI8 => Ok(Variant::UI8(r.read_u64()?)),
            vt::INT => Ok(Variant::Int(r.read_i32()?)),
            vt::UINT => Ok(Variant::UInt(r.read_u32()?)),
            tag if tag == (vt::ARRAY | vt::UI1) => {
                let array = r.read_unique_ptr::<SafeArrayUi1>()?;
                Ok(Variant::ByteArray(array.unwrap_or_default().0))
            }
            other => Err(NdrError::InvalidEnumValue(other as u32)),
        }
    }
}
