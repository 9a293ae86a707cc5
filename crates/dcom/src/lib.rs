//! ORPC (MS-DCOM) wire types and object proxy
//!
//! The layer between raw DCE/RPC and generated interface bindings:
//!
//! ```text
//! +--------------------------------------+
//! |  interface bindings (mqac, ...)      |
//! +--------------------------------------+
//! |  dcom: ORPCTHIS/THAT, IPID, OBJREF,  |
//! |        VARIANT/BSTR, ObjectProxy     |
//! +--------------------------------------+
//! |  dcerpc: bind, request/response PDUs |
//! +--------------------------------------+
//! ```
//!
//! [`ObjectProxy`] carries the two pieces of per-object state an ORPC call
//! needs beyond the bound connection: the IPID of the interface instance
//! (sent as the request PDU's object UUID) and the causality id stamped into
//! every ORPCTHIS.

pub mod error;
pub mod identifiers;
pub mod oaut;
pub mod objref;
pub mod orpc;
pub mod proxy;

pub use error::{hresult, DcomError, Result};
pub use identifiers::{generate_uuid, read_uuid, write_uuid, Ipid, Oid, Oxid};
pub use oaut::{vt, BString, Variant, VARIANT_FALSE, VARIANT_TRUE};
pub use objref::{InterfacePointer, ObjRef, StdObjRef};
pub use orpc::{ComVersion, OrpcExtent, OrpcExtentArray, OrpcThat, OrpcThis};
pub use proxy::ObjectProxy;
