//! The fixed lexicon header.
//!
//! The header is the map of the file: the magic signature followed by
//! fourteen little-endian `i64` fields locating the complex data block and
//! the six fixed-record arrays.

use crate::dictionary::dawg::{
    EDGE_RECORD_LEN, MORPH_RECORD_LEN, NODE_RECORD_LEN, PREDICT_RECORD_LEN,
};
use crate::dictionary::MAGIC;
use crate::errors::{Result, RumorphError};

/// Byte length of the on-disk header: magic plus 14 `i64` fields.
pub(crate) const HEADER_LEN: usize = 4 + 14 * 8;

/// Location of one fixed-record array inside the file.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Region {
    /// Byte offset of the first record.
    pub offset: usize,
    /// Number of records.
    pub count: usize,
}

impl Region {
    /// The byte range this region occupies given its record size.
    ///
    /// Returns `None` on arithmetic overflow.
    pub fn byte_range(&self, record_len: usize) -> Option<std::ops::Range<usize>> {
        let len = self.count.checked_mul(record_len)?;
        let end = self.offset.checked_add(len)?;
        Some(self.offset..end)
    }
}

/// The parsed header of a lexicon file.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Header {
    /// Byte offset of the gzip complex data block.
    pub complex_offset: usize,
    /// Byte length of the gzip complex data block.
    pub complex_len: usize,
    pub nodes: Region,
    pub edges: Region,
    pub payloads: Region,
    pub predict_nodes: Region,
    pub predict_edges: Region,
    pub predict_payloads: Region,
}

impl Header {
    /// Reads and validates the header from the start of the mapped file.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(RumorphError::HeaderTooShort { len: bytes.len() });
        }
        if &bytes[..4] != MAGIC {
            return Err(RumorphError::BadMagic);
        }

        let mut fields = [0usize; 14];
        for (i, field) in fields.iter_mut().enumerate() {
            let at = 4 + i * 8;
            let raw = i64::from_le_bytes([
                bytes[at],
                bytes[at + 1],
                bytes[at + 2],
                bytes[at + 3],
                bytes[at + 4],
                bytes[at + 5],
                bytes[at + 6],
                bytes[at + 7],
            ]);
            *field = usize::try_from(raw).map_err(|_| {
                RumorphError::corrupt_layout(format!("negative header field #{i} ({raw})"))
            })?;
        }

        let header = Self {
            complex_offset: fields[0],
            complex_len: fields[1],
            nodes: Region { offset: fields[2], count: fields[3] },
            edges: Region { offset: fields[4], count: fields[5] },
            payloads: Region { offset: fields[6], count: fields[7] },
            predict_nodes: Region { offset: fields[8], count: fields[9] },
            predict_edges: Region { offset: fields[10], count: fields[11] },
            predict_payloads: Region { offset: fields[12], count: fields[13] },
        };
        header.validate(bytes.len())?;
        Ok(header)
    }

    /// Checks that every region lies within the file and that its byte
    /// length is exactly `count * record size`.
    fn validate(&self, file_len: usize) -> Result<()> {
        let complex_end = self
            .complex_offset
            .checked_add(self.complex_len)
            .ok_or_else(|| RumorphError::corrupt_layout("complex block overflows"))?;
        if complex_end > file_len {
            return Err(RumorphError::corrupt_layout(format!(
                "complex block [{}..{complex_end}] exceeds file length {file_len}",
                self.complex_offset
            )));
        }

        let regions: [(&str, Region, usize); 6] = [
            ("nodes", self.nodes, NODE_RECORD_LEN),
            ("edges", self.edges, EDGE_RECORD_LEN),
            ("payloads", self.payloads, MORPH_RECORD_LEN),
            ("predict nodes", self.predict_nodes, NODE_RECORD_LEN),
            ("predict edges", self.predict_edges, EDGE_RECORD_LEN),
            ("predict payloads", self.predict_payloads, PREDICT_RECORD_LEN),
        ];
        for (name, region, record_len) in regions {
            let range = region.byte_range(record_len).ok_or_else(|| {
                RumorphError::corrupt_layout(format!("{name} region overflows"))
            })?;
            if range.end > file_len {
                return Err(RumorphError::corrupt_layout(format!(
                    "{name} region [{}..{}] exceeds file length {file_len}",
                    range.start, range.end
                )));
            }
        }
        Ok(())
    }
}
