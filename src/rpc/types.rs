// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Wire request/reply structures. Every method takes a single request
//! object; payload bytes cross the wire base64-encoded. Core errors are
//! carried in the reply's `error` field, mirroring the original protocol,
//! so a reply with `error: None` and an empty payload is how an
//! over-quota request looks to a client.

use serde::{Deserialize, Serialize};

pub use crate::disk::FileInfo;

/// Base64 (standard alphabet) serde adapter for payload bytes.
pub mod base64_standard {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        STANDARD.encode(bytes).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestHeader {
    pub client_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteRequest {
    pub header: RequestHeader,
    pub name: String,
    pub offset: i64,
    #[serde(with = "base64_standard")]
    pub data: Vec<u8>,
    pub append: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteReply {
    pub bytes_written: i64,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadRequest {
    pub header: RequestHeader,
    pub name: String,
    pub offset: i64,
    pub length: i64,
    pub expected_checksum: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadReply {
    pub bytes_read: i64,
    #[serde(with = "base64_standard")]
    pub data: Vec<u8>,
    /// CRC-32C of the returned bytes.
    pub checksum: u32,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameRequest {
    pub header: RequestHeader,
    pub oldname: String,
    pub newname: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameReply {
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoveRequest {
    pub header: RequestHeader,
    pub name: String,
    pub all: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoveReply {
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadDirRequest {
    pub header: RequestHeader,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadDirReply {
    pub file_infos: Vec<FileInfo>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MkdirRequest {
    pub header: RequestHeader,
    pub name: String,
    pub all: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MkdirReply {
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatRequest {
    pub header: RequestHeader,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatReply {
    pub file_info: Option<FileInfo>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncRequest {
    pub header: RequestHeader,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncReply {
    /// One entry per requested name, in order.
    pub errors: Vec<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskInfo {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisksReply {
    pub disks: Vec<DiskInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerInfoReply {
    /// Opaque JSON document describing the serving process.
    pub info: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsReply {
    pub counters: Vec<crate::stats::Metric>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_bytes_cross_as_base64() {
        let req = WriteRequest {
            name: "cfs0/f".to_string(),
            data: b"hello world!".to_vec(),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["data"], "aGVsbG8gd29ybGQh");

        let back: WriteRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back.data, req.data);
    }

    #[test]
    fn missing_request_fields_default() {
        let req: WriteRequest = serde_json::from_str(r#"{"name":"cfs0/f","data":""}"#).unwrap();
        assert_eq!(req.header.client_id, 0);
        assert_eq!(req.offset, 0);
        assert!(!req.append);
        assert!(req.data.is_empty());
    }
}
