//! Binary container format for compiled grammar tables.
//!
//! Container layout (44-byte header + payload):
//!
//! ```text
//! [4B magic "PGTB"] [4B ABI version u32 LE] [32B SHA-256 of payload] [4B payload length u32 LE]
//! [payload: bincode bytes]
//! ```
//!
//! The external scanner hook is not part of the payload; reattach it with
//! [`GrammarTable::with_scanner`] after decoding.

use sha2::{Digest, Sha256};

use super::GrammarTable;
use crate::diagnostics::LanguageError;
use crate::language::{LANGUAGE_VERSION, MIN_COMPATIBLE_LANGUAGE_VERSION};

/// Magic bytes identifying a grammar table artifact.
pub const MAGIC: &[u8; 4] = b"PGTB";

const CHECKSUM_SIZE: usize = 32;

/// Header size in bytes: magic (4) + version (4) + checksum (32) + payload length (4).
pub const HEADER_SIZE: usize = 4 + 4 + CHECKSUM_SIZE + 4;

/// The header stores the payload length as a `u32`.
fn header_len(len: usize) -> Result<u32, LanguageError> {
    u32::try_from(len)
        .map_err(|_| LanguageError::encode(format!("payload of {len} bytes exceeds the 4 GiB limit")))
}

impl GrammarTable {
    /// Serialize this table into the binary container format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, LanguageError> {
        let config = bincode::config::standard();
        let payload = bincode::serde::encode_to_vec(self, config)
            .map_err(|e| LanguageError::encode(e.to_string()))?;
        let len = header_len(payload.len())?;
        let checksum = Sha256::digest(&payload);

        let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
        buf.extend_from_slice(MAGIC);
        buf.extend_from_slice(&self.version.to_le_bytes());
        buf.extend_from_slice(&checksum);
        buf.extend_from_slice(&len.to_le_bytes());
        buf.extend_from_slice(&payload);
        Ok(buf)
    }

    /// Decode a table from the binary container format.
    ///
    /// Checks the magic number, the ABI version, the payload length and the
    /// checksum, in that order, before decoding. The result is not validated;
    /// pass it to [`crate::Language::load`].
    pub fn from_bytes(data: &[u8]) -> Result<GrammarTable, LanguageError> {
        if data.len() < MAGIC.len() {
            return Err(LanguageError::truncated(HEADER_SIZE, data.len()));
        }
        if &data[..4] != MAGIC {
            return Err(LanguageError::InvalidMagic);
        }
        if data.len() < HEADER_SIZE {
            return Err(LanguageError::truncated(HEADER_SIZE, data.len()));
        }

        let version = read_u32(data, 4);
        if !(MIN_COMPATIBLE_LANGUAGE_VERSION..=LANGUAGE_VERSION).contains(&version) {
            return Err(LanguageError::incompatible(version));
        }

        let checksum = &data[8..8 + CHECKSUM_SIZE];
        let payload_len = read_u32(data, 8 + CHECKSUM_SIZE) as usize;
        let payload = &data[HEADER_SIZE..];
        if payload.len() != payload_len {
            return Err(LanguageError::malformed(format!(
                "payload length mismatch: header says {payload_len} bytes, found {}",
                payload.len()
            )));
        }
        if Sha256::digest(payload).as_slice() != checksum {
            return Err(LanguageError::malformed("payload checksum mismatch"));
        }

        let config = bincode::config::standard();
        let (table, read): (GrammarTable, usize) = bincode::serde::decode_from_slice(payload, config)
            .map_err(|e| LanguageError::decode(e.to_string()))?;
        if read != payload.len() {
            return Err(LanguageError::decode(format!(
                "{} trailing bytes after table",
                payload.len() - read
            )));
        }
        if table.version != version {
            return Err(LanguageError::malformed(format!(
                "header version {version} does not match table version {}",
                table.version
            )));
        }
        Ok(table)
    }
}

/// Check whether a byte slice starts with the grammar table magic number.
pub fn is_table_artifact(data: &[u8]) -> bool {
    data.len() >= 4 && &data[..4] == MAGIC
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}
