//! Order-preserving payload chunking.

use std::slice::Chunks;

use j1_core::{J1Error, J1Result};

/// Records per upload request; keeps each request under the service's size limit.
pub const DEFAULT_CHUNK_SIZE: usize = 150;

/// Split `records` into consecutive chunks of at most `size` records.
///
/// Every chunk is full except possibly the last, and an empty input yields
/// no chunks at all.
pub fn chunks<T>(records: &[T], size: usize) -> J1Result<Chunks<'_, T>> {
    check_chunk_size(size)?;
    Ok(records.chunks(size))
}

/// Reject a chunk size that cannot make progress.
pub fn check_chunk_size(size: usize) -> J1Result<()> {
    if size == 0 {
        return Err(J1Error::config("chunk size must be greater than zero"));
    }
    Ok(())
}

/// Number of upload requests needed for `len` records.
pub fn chunk_count(len: usize, size: usize) -> usize {
    if size == 0 {
        0
    } else {
        len.div_ceil(size)
    }
}
