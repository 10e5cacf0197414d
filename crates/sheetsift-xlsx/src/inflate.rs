//! DEFLATE decoding for archive entries
//!
//! Producers disagree about how entry data is framed, so method 8 entries go
//! through an ordered list of decoding strategies and the first one that
//! succeeds wins.

use std::io::{self, Read};

use flate2::read::{DeflateDecoder, ZlibDecoder};
use flate2::{Decompress, FlushDecompress, Status};
use log::{debug, warn};
use thiserror::Error;

/// Compression method: no compression
pub const METHOD_STORED: u16 = 0;

/// Compression method: DEFLATE
pub const METHOD_DEFLATED: u16 = 8;

/// A single way of decoding a compressed byte stream
pub type Strategy = fn(&[u8]) -> io::Result<Vec<u8>>;

/// Strategies tried for DEFLATE entries, in order
pub const DEFAULT_STRATEGIES: [(&str, Strategy); 3] = [
    ("raw deflate", inflate_raw),
    ("raw deflate, window bits -15", inflate_windowed),
    ("zlib", inflate_zlib),
];

/// Errors from [`decompress`]
#[derive(Debug, Error)]
pub enum InflateError {
    /// Method is neither stored nor deflate
    #[error("unsupported compression method {0}")]
    UnsupportedMethod(u16),

    /// No strategy could decode the data
    #[error("{0}")]
    Exhausted(#[source] io::Error),
}

/// Decode entry data according to its compression method
///
/// A result whose length differs from `expected_len` is logged and returned
/// anyway.
pub fn decompress(data: &[u8], method: u16, expected_len: usize) -> Result<Vec<u8>, InflateError> {
    let out = match method {
        METHOD_STORED => data.to_vec(),
        METHOD_DEFLATED => inflate_with(&DEFAULT_STRATEGIES, data).map_err(InflateError::Exhausted)?,
        other => return Err(InflateError::UnsupportedMethod(other)),
    };

    if out.len() != expected_len {
        warn!(
            "decoded {} bytes but the archive declares {} (method {})",
            out.len(),
            expected_len,
            method
        );
    }

    Ok(out)
}

/// Run `strategies` in order and return the first successful decode
///
/// When all fail, the last error is returned.
pub fn inflate_with(strategies: &[(&str, Strategy)], data: &[u8]) -> io::Result<Vec<u8>> {
    let mut last_error = None;

    for (name, strategy) in strategies {
        match strategy(data) {
            Ok(out) => return Ok(out),
            Err(e) => {
                debug!("inflate strategy '{}' failed: {}", name, e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no inflate strategies")))
}

/// Raw DEFLATE stream (the normal ZIP framing)
pub fn inflate_raw(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len().saturating_mul(4));
    DeflateDecoder::new(data).read_to_end(&mut out)?;
    Ok(out)
}

/// Raw DEFLATE driven through a decompressor configured with an explicit
/// 15-bit window and no zlib header
pub fn inflate_windowed(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = Decompress::new_with_window_bits(false, 15);
    let mut out: Vec<u8> = Vec::with_capacity(data.len().saturating_mul(4).max(64));

    loop {
        if out.len() == out.capacity() {
            out.reserve(out.capacity().max(4096));
        }

        let consumed = decoder.total_in() as usize;
        let produced = decoder.total_out();
        let input = data.get(consumed..).unwrap_or(&[]);

        let status = decoder
            .decompress_vec(input, &mut out, FlushDecompress::Finish)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        match status {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError => {
                let stalled =
                    decoder.total_in() as usize == consumed && decoder.total_out() == produced;
                if stalled && out.len() < out.capacity() {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "deflate stream ends before its final block",
                    ));
                }
            }
        }
    }
}

/// zlib-wrapped DEFLATE (two-byte header, Adler-32 trailer)
pub fn inflate_zlib(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len().saturating_mul(4));
    ZlibDecoder::new(data).read_to_end(&mut out)?;
    Ok(out)
}
