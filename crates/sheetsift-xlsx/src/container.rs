//! ZIP container reader
//!
//! Parses the archive structure of an OOXML package directly from a byte
//! slice. Only what a spreadsheet package needs is supported: stored and
//! deflated entries, no encryption, no ZIP64, no spanning.
//!
//! The central directory is authoritative for entry sizes and compression
//! method. Local headers are only used to locate the entry data.

use std::collections::HashMap;

use log::{debug, trace, warn};

use crate::error::{XlsxError, XlsxResult};
use crate::inflate::{self, InflateError};

const EOCD_SIGNATURE: u32 = 0x0605_4b50;
const CENTRAL_SIGNATURE: u32 = 0x0201_4b50;
const LOCAL_SIGNATURE: u32 = 0x0403_4b50;

const EOCD_LEN: usize = 22;
const CENTRAL_HEADER_LEN: usize = 46;
const LOCAL_HEADER_LEN: usize = 30;
const MAX_COMMENT_LEN: usize = 0xFFFF;

/// General purpose flag bit 3: sizes follow the data in a descriptor
const FLAG_DATA_DESCRIPTOR: u16 = 0x0008;

/// One file in the archive, as described by the central directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry name (path inside the archive)
    pub name: String,
    /// Size of the stored data
    pub compressed_size: u32,
    /// Size after decompression
    pub uncompressed_size: u32,
    /// 0 = stored, 8 = deflate
    pub compression_method: u16,
    /// Offset of the local file header from the start of the archive
    pub local_header_offset: u32,
    /// General purpose bit flags
    pub flags: u16,
}

impl ArchiveEntry {
    /// Check if sizes were deferred to a data descriptor
    pub fn has_data_descriptor(&self) -> bool {
        self.flags & FLAG_DATA_DESCRIPTOR != 0
    }
}

/// A parsed ZIP archive borrowing its bytes
#[derive(Debug, Clone)]
pub struct ZipContainer<'a> {
    data: &'a [u8],
    entries: Vec<ArchiveEntry>,
    index: HashMap<String, usize>,
}

impl<'a> ZipContainer<'a> {
    /// Parse the central directory of `data`
    pub fn parse(data: &'a [u8]) -> XlsxResult<Self> {
        let eocd = find_eocd(data)?;

        let total_entries = read_u16(data, eocd + 10)? as usize;
        let directory_size = read_u32(data, eocd + 12)? as usize;
        let directory_offset = read_u32(data, eocd + 16)? as usize;
        debug!(
            "central directory: {} entries, {} bytes at offset {}",
            total_entries, directory_size, directory_offset
        );

        let mut entries = Vec::with_capacity(total_entries.min(4096));
        let mut index = HashMap::new();
        let mut offset = directory_offset;

        for _ in 0..total_entries {
            let signature = read_u32(data, offset)?;
            if signature != CENTRAL_SIGNATURE {
                return Err(XlsxError::corrupt(
                    offset,
                    format!("expected central directory signature, found {:#010x}", signature),
                ));
            }

            let flags = read_u16(data, offset + 8)?;
            let compression_method = read_u16(data, offset + 10)?;
            let compressed_size = read_u32(data, offset + 20)?;
            let uncompressed_size = read_u32(data, offset + 24)?;
            let name_len = read_u16(data, offset + 28)? as usize;
            let extra_len = read_u16(data, offset + 30)? as usize;
            let comment_len = read_u16(data, offset + 32)? as usize;
            let local_header_offset = read_u32(data, offset + 42)?;

            let name_bytes = slice(data, offset + CENTRAL_HEADER_LEN, name_len)?;
            let name = String::from_utf8_lossy(name_bytes).into_owned();

            trace!(
                "entry '{}': method {}, {} -> {} bytes, local header at {}",
                name,
                compression_method,
                compressed_size,
                uncompressed_size,
                local_header_offset
            );

            // Duplicate names: the first one wins
            index.entry(name.clone()).or_insert(entries.len());
            entries.push(ArchiveEntry {
                name,
                compressed_size,
                uncompressed_size,
                compression_method,
                local_header_offset,
                flags,
            });

            offset += CENTRAL_HEADER_LEN + name_len + extra_len + comment_len;
        }

        Ok(Self {
            data,
            entries,
            index,
        })
    }

    /// All entries in central directory order
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the archive has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by name; a leading `/` is ignored
    pub fn entry(&self, name: &str) -> Option<&ArchiveEntry> {
        let normalized = name.strip_prefix('/').unwrap_or(name);
        let found = self.index.get(normalized).map(|&i| &self.entries[i]);
        debug!("lookup '{}': {}", normalized, if found.is_some() { "found" } else { "absent" });
        found
    }

    /// Check if an entry exists
    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// The entry's stored bytes, still compressed
    pub fn raw_data(&self, entry: &ArchiveEntry) -> XlsxResult<&'a [u8]> {
        let data = self.data;
        let header = entry.local_header_offset as usize;

        let signature = read_u32(data, header)?;
        if signature != LOCAL_SIGNATURE {
            return Err(XlsxError::corrupt(
                header,
                format!(
                    "expected local header signature for '{}', found {:#010x}",
                    entry.name, signature
                ),
            ));
        }

        let local_method = read_u16(data, header + 8)?;
        let local_compressed = read_u32(data, header + 18)?;
        let local_uncompressed = read_u32(data, header + 22)?;
        let name_len = read_u16(data, header + 26)? as usize;
        let extra_len = read_u16(data, header + 28)? as usize;

        if local_method != entry.compression_method {
            warn!(
                "'{}': local header method {} disagrees with central directory method {}",
                entry.name, local_method, entry.compression_method
            );
        }

        let sizes_deferred =
            entry.has_data_descriptor() && local_compressed == 0 && local_uncompressed == 0;
        if sizes_deferred {
            debug!("'{}': sizes deferred to a data descriptor", entry.name);
        } else if local_compressed != entry.compressed_size
            || local_uncompressed != entry.uncompressed_size
        {
            warn!(
                "'{}': local header sizes {}/{} disagree with central directory {}/{}",
                entry.name,
                local_compressed,
                local_uncompressed,
                entry.compressed_size,
                entry.uncompressed_size
            );
        }

        let start = header + LOCAL_HEADER_LEN + name_len + extra_len;
        slice(data, start, entry.compressed_size as usize)
    }

    /// Read and decompress an entry by name
    pub fn read_entry(&self, name: &str) -> XlsxResult<Vec<u8>> {
        let entry = self
            .entry(name)
            .ok_or_else(|| XlsxError::MissingEntry(name.to_string()))?;
        let raw = self.raw_data(entry)?;

        inflate::decompress(raw, entry.compression_method, entry.uncompressed_size as usize)
            .map_err(|e| match e {
                InflateError::UnsupportedMethod(method) => XlsxError::UnsupportedCompression {
                    entry: entry.name.clone(),
                    method,
                },
                InflateError::Exhausted(cause) => XlsxError::Decompress {
                    entry: entry.name.clone(),
                    reason: cause.to_string(),
                },
            })
    }

    /// Read an entry if it exists
    pub fn read_optional(&self, name: &str) -> XlsxResult<Option<Vec<u8>>> {
        if self.contains(name) {
            self.read_entry(name).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Read and decompress a single entry from an archive buffer
pub fn read_entry(buffer: &[u8], name: &str) -> XlsxResult<Vec<u8>> {
    ZipContainer::parse(buffer)?.read_entry(name)
}

/// Locate the end-of-central-directory record, scanning back over a comment
fn find_eocd(data: &[u8]) -> XlsxResult<usize> {
    if data.len() < EOCD_LEN {
        return Err(XlsxError::corrupt(
            0,
            format!("{} bytes is too short for an end of central directory record", data.len()),
        ));
    }

    let last = data.len() - EOCD_LEN;
    let first = last.saturating_sub(MAX_COMMENT_LEN);

    (first..=last)
        .rev()
        .find(|&pos| data[pos..pos + 4] == EOCD_SIGNATURE.to_le_bytes())
        .ok_or_else(|| XlsxError::corrupt(last, "end of central directory record not found"))
}

fn slice(data: &[u8], offset: usize, len: usize) -> XlsxResult<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or_else(|| {
            XlsxError::corrupt(
                offset,
                format!("read of {} bytes runs past the end of the archive ({} bytes)", len, data.len()),
            )
        })
}

fn read_u16(data: &[u8], offset: usize) -> XlsxResult<u16> {
    let bytes = slice(data, offset, 2)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn read_u32(data: &[u8], offset: usize) -> XlsxResult<u32> {
    let bytes = slice(data, offset, 4)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
