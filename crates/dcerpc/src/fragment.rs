//! Request fragmentation and response reassembly
//!
//! A call whose stub exceeds the negotiated max transmit fragment is split
//! across several `request` PDUs carrying FIRST_FRAG/LAST_FRAG flags;
//! multi-fragment responses are stitched back together by the assembler.

use crate::error::{Result, RpcError};
use crate::pdu::{PacketFlags, PduHeader, RequestPdu, ResponsePdu, Uuid};
use bytes::{Bytes, BytesMut};

/// Fixed request PDU overhead: common header plus alloc_hint, context id and
/// opnum, plus the object UUID when present.
pub fn request_overhead(has_object: bool) -> usize {
    PduHeader::SIZE + 8 + if has_object { Uuid::SIZE } else { 0 }
}

/// Largest stub slice that fits a single request fragment.
pub fn max_stub_size(max_frag: u16, has_object: bool) -> usize {
    (max_frag as usize).saturating_sub(request_overhead(has_object))
}

/// Split a request into wire-ready fragments. The object UUID, when present,
/// is carried on every fragment; alloc_hint advertises the full stub size.
pub fn fragment_request(
    call_id: u32,
    context_id: u16,
    opnum: u16,
    object: Option<Uuid>,
    stub: Bytes,
    max_frag: u16,
) -> Result<Vec<RequestPdu>> {
    let chunk = max_stub_size(max_frag, object.is_some());
    if chunk == 0 {
        return Err(RpcError::InvalidPdu(format!(
            "negotiated fragment size {max_frag} leaves no room for stub data"
        )));
    }

    let total = stub.len();
    let n_frags = total.div_ceil(chunk).max(1);
    let mut fragments = Vec::with_capacity(n_frags);
    for i in 0..n_frags {
        let start = i * chunk;
        let end = (start + chunk).min(total);
        let mut flags = PacketFlags::default();
        if i == 0 {
            flags.insert(PacketFlags::FIRST_FRAG);
        }
        if i == n_frags - 1 {
            flags.insert(PacketFlags::LAST_FRAG);
        }
        let mut pdu = RequestPdu::new(call_id, opnum, stub.slice(start..end));
        pdu.header.flags = flags;
        pdu.alloc_hint = total as u32;
        pdu.context_id = context_id;
        if let Some(object) = object {
            pdu = pdu.with_object(object);
        }
        fragments.push(pdu);
    }
    Ok(fragments)
}

/// Reassembles a fragmented response for one call.
pub struct FragmentAssembler {
    call_id: u32,
    context_id: Option<u16>,
    started: bool,
    buf: BytesMut,
}

impl FragmentAssembler {
    pub fn new(call_id: u32) -> Self {
        Self {
            call_id,
            context_id: None,
            started: false,
            buf: BytesMut::new(),
        }
    }

    /// Add one response fragment. Returns the complete stub once the
    /// LAST_FRAG fragment has arrived.
    pub fn push(&mut self, response: ResponsePdu) -> Result<Option<Bytes>> {
        if response.header.call_id != self.call_id {
            return Err(RpcError::CallIdMismatch {
                expected: self.call_id,
                got: response.header.call_id,
            });
        }
        if let Some(context_id) = self.context_id {
            if response.context_id != context_id {
                return Err(RpcError::ContextIdMismatch {
                    expected: context_id,
                    got: response.context_id,
                });
            }
        } else {
            self.context_id = Some(response.context_id);
        }

        let flags = response.header.flags;
        if !self.started {
            if !flags.is_first() {
                return Err(RpcError::FragmentOutOfOrder(
                    "first fragment missing FIRST_FRAG".into(),
                ));
            }
            self.started = true;
        } else if flags.is_first() {
            return Err(RpcError::FragmentOutOfOrder(
                "unexpected FIRST_FRAG in mid-stream fragment".into(),
            ));
        }

        self.buf.extend_from_slice(&response.stub_data);
        if flags.is_last() {
            Ok(Some(self.buf.split().freeze()))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reassemble(fragments: Vec<RequestPdu>) -> Bytes {
        // requests and responses share the flag discipline; rebuild via the
        // response-side assembler
        let mut assembler = FragmentAssembler::new(fragments[0].header.call_id);
        let mut out = None;
        for frag in fragments {
            let response = ResponsePdu {
                header: frag.header,
                alloc_hint: frag.alloc_hint,
                context_id: frag.context_id,
                cancel_count: 0,
                stub_data: frag.stub_data,
            };
            out = assembler.push(response).unwrap();
        }
        out.expect("missing last fragment")
    }

    #[test]
    fn test_small_request_single_fragment() {
        let fragments =
            fragment_request(1, 0, 7, None, Bytes::from_static(b"tiny"), 4280).unwrap();
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].header.flags.is_first());
        assert!(fragments[0].header.flags.is_last());
        assert_eq!(fragments[0].stub_data.as_ref(), b"tiny");
    }

    #[test]
    fn test_empty_stub_still_one_fragment() {
        let fragments = fragment_request(1, 0, 55, None, Bytes::new(), 4280).unwrap();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].alloc_hint, 0);
    }

    #[test]
    fn test_large_request_fragments_and_reassembles() {
        let stub: Bytes = (0..10_000u32).map(|i| i as u8).collect::<Vec<_>>().into();
        let object = Uuid::parse("eba96b1a-2168-11d3-898c-00e02c074f6b").unwrap();
        let fragments =
            fragment_request(42, 3, 28, Some(object), stub.clone(), 1024).unwrap();
        assert!(fragments.len() > 1);
        assert!(fragments[0].header.flags.is_first());
        assert!(!fragments[0].header.flags.is_last());
        assert!(fragments.last().unwrap().header.flags.is_last());
        for frag in &fragments {
            assert_eq!(frag.object, Some(object));
            assert_eq!(frag.alloc_hint, stub.len() as u32);
            assert!(frag.encode().len() <= 1024);
        }
        assert_eq!(reassemble(fragments), stub);
    }

    #[test]
    fn test_assembler_rejects_wrong_call_id() {
        let mut assembler = FragmentAssembler::new(1);
        let response = ResponsePdu::new(2, 0, Bytes::from_static(b"x"));
        assert!(matches!(
            assembler.push(response),
            Err(RpcError::CallIdMismatch {
                expected: 1,
                got: 2
            })
        ));
    }

    #[test]
    fn test_assembler_rejects_missing_first_frag() {
        let mut assembler = FragmentAssembler::new(1);
        let mut response = ResponsePdu::new(1, 0, Bytes::from_static(b"x"));
        response.header.flags = PacketFlags(PacketFlags::LAST_FRAG);
        assert!(matches!(
            assembler.push(response),
            Err(RpcError::FragmentOutOfOrder(_))
        ));
    }

    #[test]
    fn test_assembler_rejects_context_change() {
        let mut assembler = FragmentAssembler::new(1);
        let mut first = ResponsePdu::new(1, 0, Bytes::from_static(b"x"));
        first.header.flags = PacketFlags(PacketFlags::FIRST_FRAG);
        assert!(assembler.push(first).unwrap().is_none());

        let mut second = ResponsePdu::new(1, 9, Bytes::from_static(b"y"));
        second.header.flags = PacketFlags(PacketFlags::LAST_FRAG);
        assert!(matches!(
            assembler.push(second),
            Err(RpcError::ContextIdMismatch { .. })
        ));
    }
}
