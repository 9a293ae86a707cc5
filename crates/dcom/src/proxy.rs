//! ORPC object proxy

use crate::error::{DcomError, Result};
use crate::identifiers::{generate_uuid, Ipid};
use crate::orpc::OrpcThis;
use bytes::Bytes;
use dcerpc::RpcClient;
use std::sync::Arc;
use tracing::debug;

/// Addresses one interface instance over a bound RPC connection.
///
/// The IPID rides in the request PDU's object UUID field; the causality id
/// is minted once per proxy and stamped into every ORPCTHIS.
pub struct ObjectProxy {
    client: Arc<RpcClient>,
    ipid: Option<Ipid>,
    causality_id: dcerpc::Uuid,
}

impl ObjectProxy {
    /// Proxy with no interface instance attached yet; every invoke fails
    /// until an IPID is set.
    pub fn new(client: Arc<RpcClient>) -> Self {
        Self {
            client,
            ipid: None,
            causality_id: generate_uuid(),
        }
    }

    pub fn with_ipid(client: Arc<RpcClient>, ipid: Ipid) -> Self {
        let mut proxy = Self::new(client);
        proxy.ipid = Some(ipid);
        proxy
    }

    pub fn ipid(&self) -> Option<Ipid> {
        self.ipid
    }

    pub fn set_ipid(&mut self, ipid: Ipid) {
        self.ipid = Some(ipid);
    }

    pub fn client(&self) -> &Arc<RpcClient> {
        &self.client
    }

    /// ORPCTHIS for the next call.
    pub fn orpc_this(&self) -> OrpcThis {
        OrpcThis::new(self.causality_id)
    }

    /// Issue one ORPC call. `method` names the operation for diagnostics.
    pub async fn invoke(&self, opnum: u16, method: &'static str, stub: Bytes) -> Result<Bytes> {
        let ipid = self.ipid.ok_or(DcomError::MissingIpid { method })?;
        debug!(%ipid, opnum, method, "invoking");
        let response = self.client.call_object(opnum, Some(ipid.0), stub).await?;
        Ok(response)
    }
}
