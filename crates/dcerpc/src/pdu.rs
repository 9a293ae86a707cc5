//! Connection-oriented DCE/RPC PDUs (C706 ch. 12, MS-RPCE)
//!
//! Covers the PDU types a client exchanges: `bind`, `bind_ack`, `bind_nak`,
//! `request`, `response` and `fault`. Encoding always emits the little-endian
//! NDR data representation; decoding honors the representation label in the
//! received header.

use crate::error::{FaultStatus, Result, RpcError};
use bytes::{BufMut, Bytes, BytesMut};

pub const DCE_RPC_VERSION: u8 = 5;
pub const DCE_RPC_VERSION_MINOR: u8 = 0;

/// NDR transfer syntax presented at bind time.
pub const NDR_SYNTAX_UUID: &str = "8a885d04-1ceb-11c9-9fe8-08002b104860";
pub const NDR_SYNTAX_VERSION: u16 = 2;

/// Connection-oriented packet types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PacketType {
    Request = 0,
    Response = 2,
    Fault = 3,
    Bind = 11,
    BindAck = 12,
    BindNak = 13,
    Shutdown = 17,
}

impl PacketType {
    pub fn from_u8(v: u8) -> Result<Self> {
        match v {
            0 => Ok(Self::Request),
            2 => Ok(Self::Response),
            3 => Ok(Self::Fault),
            11 => Ok(Self::Bind),
            12 => Ok(Self::BindAck),
            13 => Ok(Self::BindNak),
            17 => Ok(Self::Shutdown),
            other => Err(RpcError::InvalidPacketType(other)),
        }
    }
}

/// PFC flags from the common header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PacketFlags(pub u8);

impl PacketFlags {
    pub const FIRST_FRAG: u8 = 0x01;
    pub const LAST_FRAG: u8 = 0x02;
    pub const DID_NOT_EXECUTE: u8 = 0x20;
    pub const OBJECT_UUID: u8 = 0x80;

    pub fn complete() -> Self {
        Self(Self::FIRST_FRAG | Self::LAST_FRAG)
    }

    pub fn contains(&self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    pub fn insert(&mut self, flag: u8) {
        self.0 |= flag;
    }

    pub fn is_first(&self) -> bool {
        self.contains(Self::FIRST_FRAG)
    }

    pub fn is_last(&self) -> bool {
        self.contains(Self::LAST_FRAG)
    }
}

/// Data representation label: integer byte order, character set, float format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataRepresentation(pub [u8; 4]);

impl DataRepresentation {
    /// Little-endian integers, ASCII characters, IEEE floats.
    pub fn ndr() -> Self {
        Self([0x10, 0, 0, 0])
    }

    pub fn is_little_endian(&self) -> bool {
        self.0[0] >> 4 == 1
    }
}

impl Default for DataRepresentation {
    fn default() -> Self {
        Self::ndr()
    }
}

/// Wire-format UUID (fields stored in host order, encoded per the PDU's
/// data representation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uuid {
    pub time_low: u32,
    pub time_mid: u16,
    pub time_hi_and_version: u16,
    pub clock_seq_hi_and_reserved: u8,
    pub clock_seq_low: u8,
    pub node: [u8; 6],
}

impl Uuid {
    pub const NIL: Uuid = Uuid {
        time_low: 0,
        time_mid: 0,
        time_hi_and_version: 0,
        clock_seq_hi_and_reserved: 0,
        clock_seq_low: 0,
        node: [0; 6],
    };

    pub const SIZE: usize = 16;

    /// Parse the canonical 8-4-4-4-12 form.
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 5
            || parts[0].len() != 8
            || parts[1].len() != 4
            || parts[2].len() != 4
            || parts[3].len() != 4
            || parts[4].len() != 12
        {
            return Err(RpcError::InvalidPdu(format!("invalid UUID: {s}")));
        }
        let invalid = || RpcError::InvalidPdu(format!("invalid UUID: {s}"));
        let time_low = u32::from_str_radix(parts[0], 16).map_err(|_| invalid())?;
        let time_mid = u16::from_str_radix(parts[1], 16).map_err(|_| invalid())?;
        let time_hi = u16::from_str_radix(parts[2], 16).map_err(|_| invalid())?;
        let clock_seq = u16::from_str_radix(parts[3], 16).map_err(|_| invalid())?;
        let mut node = [0u8; 6];
        for (i, chunk) in node.iter_mut().enumerate() {
            *chunk = u8::from_str_radix(&parts[4][i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Self {
            time_low,
            time_mid,
            time_hi_and_version: time_hi,
            clock_seq_hi_and_reserved: (clock_seq >> 8) as u8,
            clock_seq_low: clock_seq as u8,
            node,
        })
    }

    /// Build from the 16 big-endian (RFC 4122) bytes.
    pub fn from_bytes(b: [u8; 16]) -> Self {
        Self {
            time_low: u32::from_be_bytes([b[0], b[1], b[2], b[3]]),
            time_mid: u16::from_be_bytes([b[4], b[5]]),
            time_hi_and_version: u16::from_be_bytes([b[6], b[7]]),
            clock_seq_hi_and_reserved: b[8],
            clock_seq_low: b[9],
            node: [b[10], b[11], b[12], b[13], b[14], b[15]],
        }
    }

    pub fn is_nil(&self) -> bool {
        *self == Self::NIL
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B, little_endian: bool) {
        if little_endian {
            buf.put_u32_le(self.time_low);
            buf.put_u16_le(self.time_mid);
            buf.put_u16_le(self.time_hi_and_version);
        } else {
            buf.put_u32(self.time_low);
            buf.put_u16(self.time_mid);
            buf.put_u16(self.time_hi_and_version);
        }
        buf.put_u8(self.clock_seq_hi_and_reserved);
        buf.put_u8(self.clock_seq_low);
        buf.put_slice(&self.node);
    }

    fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            time_low: cur.u32()?,
            time_mid: cur.u16()?,
            time_hi_and_version: cur.u16()?,
            clock_seq_hi_and_reserved: cur.u8()?,
            clock_seq_low: cur.u8()?,
            node: cur.array::<6>()?,
        })
    }
}

impl std::fmt::Display for Uuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            self.time_low,
            self.time_mid,
            self.time_hi_and_version,
            self.clock_seq_hi_and_reserved,
            self.clock_seq_low,
            self.node[0],
            self.node[1],
            self.node[2],
            self.node[3],
            self.node[4],
            self.node[5],
        )
    }
}

/// Interface or transfer syntax identifier: UUID plus packed version
/// (`major | minor << 16`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxId {
    pub uuid: Uuid,
    pub version: u32,
}

impl SyntaxId {
    pub const SIZE: usize = Uuid::SIZE + 4;

    pub fn new(uuid: Uuid, major: u16, minor: u16) -> Self {
        Self {
            uuid,
            version: (major as u32) | ((minor as u32) << 16),
        }
    }

    /// The NDR transfer syntax, v2.0.
    pub fn ndr() -> Self {
        // The constant parses; failure would be a typo caught by tests.
        let uuid = Uuid::parse(NDR_SYNTAX_UUID).unwrap_or(Uuid::NIL);
        Self::new(uuid, NDR_SYNTAX_VERSION, 0)
    }

    pub fn major(&self) -> u16 {
        self.version as u16
    }

    pub fn minor(&self) -> u16 {
        (self.version >> 16) as u16
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B, little_endian: bool) {
        self.uuid.encode(buf, little_endian);
        if little_endian {
            buf.put_u32_le(self.version);
        } else {
            buf.put_u32(self.version);
        }
    }

    fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            uuid: Uuid::decode(cur)?,
            version: cur.u32()?,
        })
    }
}

impl std::fmt::Display for SyntaxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{}.{}", self.uuid, self.major(), self.minor())
    }
}

/// Common 16-byte PDU header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PduHeader {
    pub rpc_vers: u8,
    pub rpc_vers_minor: u8,
    pub packet_type: PacketType,
    pub flags: PacketFlags,
    pub data_rep: DataRepresentation,
    pub frag_length: u16,
    pub auth_length: u16,
    pub call_id: u32,
}

impl PduHeader {
    pub const SIZE: usize = 16;

    pub fn new(packet_type: PacketType, flags: PacketFlags, call_id: u32) -> Self {
        Self {
            rpc_vers: DCE_RPC_VERSION,
            rpc_vers_minor: DCE_RPC_VERSION_MINOR,
            packet_type,
            flags,
            data_rep: DataRepresentation::ndr(),
            frag_length: 0,
            auth_length: 0,
            call_id,
        }
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.rpc_vers);
        buf.put_u8(self.rpc_vers_minor);
        buf.put_u8(self.packet_type as u8);
        buf.put_u8(self.flags.0);
        buf.put_slice(&self.data_rep.0);
        if self.data_rep.is_little_endian() {
            buf.put_u16_le(self.frag_length);
            buf.put_u16_le(self.auth_length);
            buf.put_u32_le(self.call_id);
        } else {
            buf.put_u16(self.frag_length);
            buf.put_u16(self.auth_length);
            buf.put_u32(self.call_id);
        }
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(RpcError::TruncatedPdu {
                needed: Self::SIZE,
                have: data.len(),
            });
        }
        let rpc_vers = data[0];
        if rpc_vers != DCE_RPC_VERSION {
            return Err(RpcError::VersionMismatch {
                expected: DCE_RPC_VERSION,
                got: rpc_vers,
            });
        }
        let data_rep = DataRepresentation([data[4], data[5], data[6], data[7]]);
        let le = data_rep.is_little_endian();
        let mut cur = Cursor::new(&data[8..], le);
        Ok(Self {
            rpc_vers,
            rpc_vers_minor: data[1],
            packet_type: PacketType::from_u8(data[2])?,
            flags: PacketFlags(data[3]),
            data_rep,
            frag_length: cur.u16()?,
            auth_length: cur.u16()?,
            call_id: cur.u32()?,
        })
    }
}

/// Presentation context offered in a `bind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextElement {
    pub context_id: u16,
    pub abstract_syntax: SyntaxId,
    pub transfer_syntaxes: Vec<SyntaxId>,
}

impl ContextElement {
    pub fn new(context_id: u16, abstract_syntax: SyntaxId) -> Self {
        Self {
            context_id,
            abstract_syntax,
            transfer_syntaxes: vec![SyntaxId::ndr()],
        }
    }
}

/// Per-context negotiation result in a `bind_ack`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ContextResult {
    Acceptance = 0,
    UserRejection = 1,
    ProviderRejection = 2,
    NegotiateAck = 3,
}

impl ContextResult {
    pub fn from_u16(v: u16) -> Result<Self> {
        match v {
            0 => Ok(Self::Acceptance),
            1 => Ok(Self::UserRejection),
            2 => Ok(Self::ProviderRejection),
            3 => Ok(Self::NegotiateAck),
            other => Err(RpcError::InvalidPdu(format!(
                "invalid context result: {other}"
            ))),
        }
    }
}

/// Default fragment limits advertised at bind time.
pub const DEFAULT_MAX_FRAG: u16 = 4280;

/// `bind` PDU.
#[derive(Debug, Clone)]
pub struct BindPdu {
    pub header: PduHeader,
    pub max_xmit_frag: u16,
    pub max_recv_frag: u16,
    pub assoc_group_id: u32,
    pub contexts: Vec<ContextElement>,
}

impl BindPdu {
    pub fn new(call_id: u32, interface: SyntaxId) -> Self {
        Self {
            header: PduHeader::new(PacketType::Bind, PacketFlags::complete(), call_id),
            max_xmit_frag: DEFAULT_MAX_FRAG,
            max_recv_frag: DEFAULT_MAX_FRAG,
            assoc_group_id: 0,
            contexts: vec![ContextElement::new(0, interface)],
        }
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(128);
        self.header.encode(&mut buf);
        buf.put_u16_le(self.max_xmit_frag);
        buf.put_u16_le(self.max_recv_frag);
        buf.put_u32_le(self.assoc_group_id);
        buf.put_u8(self.contexts.len() as u8);
        buf.put_u8(0);
        buf.put_u16_le(0);
        for ctx in &self.contexts {
            buf.put_u16_le(ctx.context_id);
            buf.put_u8(ctx.transfer_syntaxes.len() as u8);
            buf.put_u8(0);
            ctx.abstract_syntax.encode(&mut buf, true);
            for ts in &ctx.transfer_syntaxes {
                ts.encode(&mut buf, true);
            }
        }
        finalize(buf)
    }

    pub fn decode(header: PduHeader, body: &[u8]) -> Result<Self> {
        let mut cur = Cursor::new(body, header.data_rep.is_little_endian());
        let max_xmit_frag = cur.u16()?;
        let max_recv_frag = cur.u16()?;
        let assoc_group_id = cur.u32()?;
        let n_contexts = cur.u8()?;
        cur.skip(3)?;
        let mut contexts = Vec::with_capacity(n_contexts as usize);
        for _ in 0..n_contexts {
            let context_id = cur.u16()?;
            let n_syntaxes = cur.u8()?;
            cur.skip(1)?;
            let abstract_syntax = SyntaxId::decode(&mut cur)?;
            let mut transfer_syntaxes = Vec::with_capacity(n_syntaxes as usize);
            for _ in 0..n_syntaxes {
                transfer_syntaxes.push(SyntaxId::decode(&mut cur)?);
            }
            contexts.push(ContextElement {
                context_id,
                abstract_syntax,
                transfer_syntaxes,
            });
        }
        Ok(Self {
            header,
            max_xmit_frag,
            max_recv_frag,
            assoc_group_id,
            contexts,
        })
    }
}

/// `bind_ack` PDU.
#[derive(Debug, Clone)]
pub struct BindAckPdu {
    pub header: PduHeader,
    pub max_xmit_frag: u16,
    pub max_recv_frag: u16,
    pub assoc_group_id: u32,
    pub secondary_addr: String,
    pub results: Vec<(ContextResult, SyntaxId)>,
}

impl BindAckPdu {
    pub fn new(call_id: u32, assoc_group_id: u32) -> Self {
        Self {
            header: PduHeader::new(PacketType::BindAck, PacketFlags::complete(), call_id),
            max_xmit_frag: DEFAULT_MAX_FRAG,
            max_recv_frag: DEFAULT_MAX_FRAG,
            assoc_group_id,
            secondary_addr: String::new(),
            results: vec![(ContextResult::Acceptance, SyntaxId::ndr())],
        }
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(128);
        self.header.encode(&mut buf);
        buf.put_u16_le(self.max_xmit_frag);
        buf.put_u16_le(self.max_recv_frag);
        buf.put_u32_le(self.assoc_group_id);
        // port_any_t: length including the terminating NUL
        let addr = self.secondary_addr.as_bytes();
        buf.put_u16_le(addr.len() as u16 + 1);
        buf.put_slice(addr);
        buf.put_u8(0);
        // pad the result list to a 4-byte boundary within the PDU
        while buf.len() % 4 != 0 {
            buf.put_u8(0);
        }
        buf.put_u8(self.results.len() as u8);
        buf.put_u8(0);
        buf.put_u16_le(0);
        for (result, syntax) in &self.results {
            buf.put_u16_le(*result as u16);
            buf.put_u16_le(0);
            syntax.encode(&mut buf, true);
        }
        finalize(buf)
    }

    pub fn decode(header: PduHeader, body: &[u8]) -> Result<Self> {
        let mut cur = Cursor::new(body, header.data_rep.is_little_endian());
        let max_xmit_frag = cur.u16()?;
        let max_recv_frag = cur.u16()?;
        let assoc_group_id = cur.u32()?;
        let addr_len = cur.u16()? as usize;
        let addr_bytes = cur.bytes(addr_len)?;
        let secondary_addr = addr_bytes
            .split(|&b| b == 0)
            .next()
            .map(|s| String::from_utf8_lossy(s).into_owned())
            .unwrap_or_default();
        // position within the PDU includes the 16-byte header
        let pdu_pos = PduHeader::SIZE + cur.position();
        cur.skip((4 - pdu_pos % 4) % 4)?;
        let n_results = cur.u8()?;
        cur.skip(3)?;
        let mut results = Vec::with_capacity(n_results as usize);
        for _ in 0..n_results {
            let result = ContextResult::from_u16(cur.u16()?)?;
            cur.skip(2)?;
            results.push((result, SyntaxId::decode(&mut cur)?));
        }
        Ok(Self {
            header,
            max_xmit_frag,
            max_recv_frag,
            assoc_group_id,
            secondary_addr,
            results,
        })
    }
}

/// `bind_nak` PDU. Only the reject reason is of interest to a client.
#[derive(Debug, Clone)]
pub struct BindNakPdu {
    pub header: PduHeader,
    pub reject_reason: u16,
}

impl BindNakPdu {
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(32);
        self.header.encode(&mut buf);
        buf.put_u16_le(self.reject_reason);
        // protocol version list: empty
        buf.put_u8(0);
        finalize(buf)
    }

    pub fn decode(header: PduHeader, body: &[u8]) -> Result<Self> {
        let mut cur = Cursor::new(body, header.data_rep.is_little_endian());
        let reject_reason = cur.u16()?;
        Ok(Self {
            header,
            reject_reason,
        })
    }
}

/// `request` PDU. The optional object UUID (PFC_OBJECT_UUID) is how ORPC
/// addresses a specific interface instance (IPID).
#[derive(Debug, Clone)]
pub struct RequestPdu {
    pub header: PduHeader,
    pub alloc_hint: u32,
    pub context_id: u16,
    pub opnum: u16,
    pub object: Option<Uuid>,
    pub stub_data: Bytes,
}

impl RequestPdu {
    pub fn new(call_id: u32, opnum: u16, stub_data: Bytes) -> Self {
        Self {
            header: PduHeader::new(PacketType::Request, PacketFlags::complete(), call_id),
            alloc_hint: stub_data.len() as u32,
            context_id: 0,
            opnum,
            object: None,
            stub_data,
        }
    }

    pub fn with_object(mut self, object: Uuid) -> Self {
        self.header.flags.insert(PacketFlags::OBJECT_UUID);
        self.object = Some(object);
        self
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(24 + self.stub_data.len());
        let mut header = self.header;
        if self.object.is_some() {
            header.flags.insert(PacketFlags::OBJECT_UUID);
        }
        header.encode(&mut buf);
        buf.put_u32_le(self.alloc_hint);
        buf.put_u16_le(self.context_id);
        buf.put_u16_le(self.opnum);
        if let Some(object) = &self.object {
            object.encode(&mut buf, true);
        }
        buf.put_slice(&self.stub_data);
        finalize(buf)
    }

    pub fn decode(header: PduHeader, body: &[u8]) -> Result<Self> {
        let mut cur = Cursor::new(body, header.data_rep.is_little_endian());
        let alloc_hint = cur.u32()?;
        let context_id = cur.u16()?;
        let opnum = cur.u16()?;
        let object = if header.flags.contains(PacketFlags::OBJECT_UUID) {
            Some(Uuid::decode(&mut cur)?)
        } else {
            None
        };
        let stub_data = Bytes::copy_from_slice(cur.rest());
        Ok(Self {
            header,
            alloc_hint,
            context_id,
            opnum,
            object,
            stub_data,
        })
    }
}

/// `response` PDU.
#[derive(Debug, Clone)]
pub struct ResponsePdu {
    pub header: PduHeader,
    pub alloc_hint: u32,
    pub context_id: u16,
    pub cancel_count: u8,
    pub stub_data: Bytes,
}

impl ResponsePdu {
    pub fn new(call_id: u32, context_id: u16, stub_data: Bytes) -> Self {
        Self {
            header: PduHeader::new(PacketType::Response, PacketFlags::complete(), call_id),
            alloc_hint: stub_data.len() as u32,
            context_id,
            cancel_count: 0,
            stub_data,
        }
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(24 + self.stub_data.len());
        self.header.encode(&mut buf);
        buf.put_u32_le(self.alloc_hint);
        buf.put_u16_le(self.context_id);
        buf.put_u8(self.cancel_count);
        buf.put_u8(0);
        buf.put_slice(&self.stub_data);
        finalize(buf)
    }

    pub fn decode(header: PduHeader, body: &[u8]) -> Result<Self> {
        let mut cur = Cursor::new(body, header.data_rep.is_little_endian());
        let alloc_hint = cur.u32()?;
        let context_id = cur.u16()?;
        let cancel_count = cur.u8()?;
        cur.skip(1)?;
        let stub_data = Bytes::copy_from_slice(cur.rest());
        Ok(Self {
            header,
            alloc_hint,
            context_id,
            cancel_count,
            stub_data,
        })
    }
}

/// `fault` PDU.
#[derive(Debug, Clone)]
pub struct FaultPdu {
    pub header: PduHeader,
    pub alloc_hint: u32,
    pub context_id: u16,
    pub cancel_count: u8,
    pub status: FaultStatus,
}

impl FaultPdu {
    pub fn new(call_id: u32, context_id: u16, status: u32) -> Self {
        Self {
            header: PduHeader::new(PacketType::Fault, PacketFlags::complete(), call_id),
            alloc_hint: 0,
            context_id,
            cancel_count: 0,
            status: FaultStatus(status),
        }
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(32);
        self.header.encode(&mut buf);
        buf.put_u32_le(self.alloc_hint);
        buf.put_u16_le(self.context_id);
        buf.put_u8(self.cancel_count);
        buf.put_u8(0);
        buf.put_u32_le(self.status.0);
        buf.put_u32_le(0);
        finalize(buf)
    }

    pub fn decode(header: PduHeader, body: &[u8]) -> Result<Self> {
        let mut cur = Cursor::new(body, header.data_rep.is_little_endian());
        let alloc_hint = cur.u32()?;
        let context_id = cur.u16()?;
        let cancel_count = cur.u8()?;
        cur.skip(1)?;
        let status = FaultStatus(cur.u32()?);
        Ok(Self {
            header,
            alloc_hint,
            context_id,
            cancel_count,
            status,
        })
    }
}

/// A decoded PDU.
#[derive(Debug, Clone)]
pub enum Pdu {
    Bind(BindPdu),
    BindAck(BindAckPdu),
    BindNak(BindNakPdu),
    Request(RequestPdu),
    Response(ResponsePdu),
    Fault(FaultPdu),
    Shutdown(PduHeader),
}

impl Pdu {
    /// Decode one complete PDU (header plus body, as framed by frag_length).
    pub fn decode(data: &[u8]) -> Result<Self> {
        let header = PduHeader::decode(data)?;
        let frag_length = header.frag_length as usize;
        if data.len() < frag_length {
            return Err(RpcError::TruncatedPdu {
                needed: frag_length,
                have: data.len(),
            });
        }
        if header.auth_length != 0 {
            return Err(RpcError::InvalidPdu(
                "authenticated PDUs are not supported".into(),
            ));
        }
        let body = &data[PduHeader::SIZE..frag_length];
        match header.packet_type {
            PacketType::Bind => Ok(Pdu::Bind(BindPdu::decode(header, body)?)),
            PacketType::BindAck => Ok(Pdu::BindAck(BindAckPdu::decode(header, body)?)),
            PacketType::BindNak => Ok(Pdu::BindNak(BindNakPdu::decode(header, body)?)),
            PacketType::Request => Ok(Pdu::Request(RequestPdu::decode(header, body)?)),
            PacketType::Response => Ok(Pdu::Response(ResponsePdu::decode(header, body)?)),
            PacketType::Fault => Ok(Pdu::Fault(FaultPdu::decode(header, body)?)),
            PacketType::Shutdown => Ok(Pdu::Shutdown(header)),
        }
    }

    pub fn header(&self) -> &PduHeader {
        match self {
            Pdu::Bind(p) => &p.header,
            Pdu::BindAck(p) => &p.header,
            Pdu::BindNak(p) => &p.header,
            Pdu::Request(p) => &p.header,
            Pdu::Response(p) => &p.header,
            Pdu::Fault(p) => &p.header,
            Pdu::Shutdown(h) => h,
        }
    }
}

/// Patch frag_length into an encoded PDU and freeze it.
fn finalize(mut buf: BytesMut) -> Bytes {
    let len = buf.len() as u16;
    buf[8..10].copy_from_slice(&len.to_le_bytes());
    buf.freeze()
}

/// Bounds-checked reader over a PDU body.
struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
    little_endian: bool,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8], little_endian: bool) -> Self {
        Self {
            buf,
            pos: 0,
            little_endian,
        }
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(RpcError::TruncatedPdu {
                needed: n,
                have: self.remaining(),
            });
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    fn skip(&mut self, n: usize) -> Result<()> {
        self.bytes(n)?;
        Ok(())
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.bytes(1)?[0])
    }

    fn u16(&mut self) -> Result<u16> {
        let b: [u8; 2] = self.array()?;
        Ok(if self.little_endian {
            u16::from_le_bytes(b)
        } else {
            u16::from_be_bytes(b)
        })
    }

    fn u32(&mut self) -> Result<u32> {
        let b: [u8; 4] = self.array()?;
        Ok(if self.little_endian {
            u32::from_le_bytes(b)
        } else {
            u32::from_be_bytes(b)
        })
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let b = self.bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(b);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_parse_display() {
        let s = "8a885d04-1ceb-11c9-9fe8-08002b104860";
        let uuid = Uuid::parse(s).unwrap();
        assert_eq!(uuid.time_low, 0x8a885d04);
        assert_eq!(uuid.time_mid, 0x1ceb);
        assert_eq!(uuid.to_string(), s);
        assert!(Uuid::parse("not-a-uuid").is_err());
    }

    #[test]
    fn test_uuid_wire_encoding() {
        let uuid = Uuid::parse("12345678-9abc-def0-1122-334455667788").unwrap();
        let mut buf = BytesMut::new();
        uuid.encode(&mut buf, true);
        assert_eq!(
            &buf[..],
            &[
                0x78, 0x56, 0x34, 0x12, 0xbc, 0x9a, 0xf0, 0xde, 0x11, 0x22, 0x33, 0x44, 0x55,
                0x66, 0x77, 0x88
            ]
        );
    }

    #[test]
    fn test_syntax_id_version_packing() {
        let syntax = SyntaxId::new(Uuid::NIL, 2, 1);
        assert_eq!(syntax.version, 0x0001_0002);
        assert_eq!(syntax.major(), 2);
        assert_eq!(syntax.minor(), 1);
    }

    #[test]
    fn test_header_roundtrip() {
        let mut header = PduHeader::new(PacketType::Request, PacketFlags::complete(), 42);
        header.frag_length = 100;
        let mut buf = BytesMut::new();
        header.encode(&mut buf);
        assert_eq!(buf.len(), PduHeader::SIZE);
        let decoded = PduHeader::decode(&buf).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn test_header_rejects_wrong_version() {
        let mut data = [0u8; 16];
        data[0] = 4;
        match PduHeader::decode(&data) {
            Err(RpcError::VersionMismatch {
                expected: 5,
                got: 4,
            }) => {}
            other => panic!("expected version mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_bind_roundtrip() {
        let interface = SyntaxId::new(
            Uuid::parse("eba96b1a-2168-11d3-898c-00e02c074f6b").unwrap(),
            0,
            0,
        );
        let bind = BindPdu::new(1, interface);
        let encoded = bind.encode();
        assert_eq!(
            u16::from_le_bytes([encoded[8], encoded[9]]) as usize,
            encoded.len()
        );
        match Pdu::decode(&encoded).unwrap() {
            Pdu::Bind(decoded) => {
                assert_eq!(decoded.max_xmit_frag, DEFAULT_MAX_FRAG);
                assert_eq!(decoded.contexts.len(), 1);
                assert_eq!(decoded.contexts[0].abstract_syntax, interface);
                assert_eq!(decoded.contexts[0].transfer_syntaxes, vec![SyntaxId::ndr()]);
            }
            other => panic!("expected bind, got {:?}", other),
        }
    }

    #[test]
    fn test_bind_ack_roundtrip() {
        let mut ack = BindAckPdu::new(1, 0x1234);
        ack.secondary_addr = "135".into();
        let encoded = ack.encode();
        match Pdu::decode(&encoded).unwrap() {
            Pdu::BindAck(decoded) => {
                assert_eq!(decoded.assoc_group_id, 0x1234);
                assert_eq!(decoded.secondary_addr, "135");
                assert_eq!(decoded.results.len(), 1);
                assert_eq!(decoded.results[0].0, ContextResult::Acceptance);
            }
            other => panic!("expected bind_ack, got {:?}", other),
        }
    }

    #[test]
    fn test_request_with_object_uuid() {
        let object = Uuid::parse("00000000-0000-0000-c000-000000000046").unwrap();
        let request =
            RequestPdu::new(7, 17, Bytes::from_static(b"stub")).with_object(object);
        let encoded = request.encode();
        match Pdu::decode(&encoded).unwrap() {
            Pdu::Request(decoded) => {
                assert!(decoded.header.flags.contains(PacketFlags::OBJECT_UUID));
                assert_eq!(decoded.opnum, 17);
                assert_eq!(decoded.object, Some(object));
                assert_eq!(decoded.stub_data.as_ref(), b"stub");
            }
            other => panic!("expected request, got {:?}", other),
        }
    }

    #[test]
    fn test_request_without_object_uuid() {
        let request = RequestPdu::new(7, 3, Bytes::from_static(b"abc"));
        let encoded = request.encode();
        match Pdu::decode(&encoded).unwrap() {
            Pdu::Request(decoded) => {
                assert_eq!(decoded.object, None);
                assert_eq!(decoded.stub_data.as_ref(), b"abc");
            }
            other => panic!("expected request, got {:?}", other),
        }
    }

    #[test]
    fn test_response_roundtrip() {
        let response = ResponsePdu::new(9, 0, Bytes::from_static(&[1, 2, 3]));
        let encoded = response.encode();
        match Pdu::decode(&encoded).unwrap() {
            Pdu::Response(decoded) => {
                assert_eq!(decoded.header.call_id, 9);
                assert_eq!(decoded.stub_data.as_ref(), &[1, 2, 3]);
            }
            other => panic!("expected response, got {:?}", other),
        }
    }

    #[test]
    fn test_fault_roundtrip() {
        let fault = FaultPdu::new(3, 0, FaultStatus::OP_RNG_ERROR);
        let encoded = fault.encode();
        match Pdu::decode(&encoded).unwrap() {
            Pdu::Fault(decoded) => {
                assert_eq!(decoded.status.0, FaultStatus::OP_RNG_ERROR);
                assert_eq!(decoded.status.name(), Some("nca_s_op_rng_error"));
            }
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[test]
    fn test_authenticated_pdu_rejected() {
        let mut request = RequestPdu::new(1, 0, Bytes::new());
        request.header.auth_length = 8;
        let mut encoded = BytesMut::from(&request.encode()[..]);
        // auth_length lives at offset 10
        encoded[10..12].copy_from_slice(&8u16.to_le_bytes());
        assert!(matches!(
            Pdu::decode(&encoded),
            Err(RpcError::InvalidPdu(_))
        ));
    }
}
