//! Return-area wire layout.
//!
//! A vector-returning export yields the address of a 16-byte record:
//!
//! ```text
//! offset 0: buffer pointer   (one machine word)
//! offset 8: element count    (one machine word)
//! ```
//!
//! On wasm32 a word is 4 bytes and the upper half of each 8-byte slot is
//! padding. Native builds use 8-byte words. Words are little-endian.
//!
//! The host-side helpers here bounds-check every access against the guest's
//! linear memory before reading.

use crate::error::{DfError, DfResult};
use crate::types::{RET_AREA_LEN_OFFSET, RET_AREA_PTR_OFFSET, RET_AREA_SIZE};

/// Width of a pointer-sized word in the guest address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordSize {
    /// 4-byte words (wasm32).
    W32,
    /// 8-byte words (64-bit native targets).
    W64,
}

impl WordSize {
    /// Word size of the target this crate is compiled for.
    #[cfg(target_pointer_width = "32")]
    pub const NATIVE: Self = Self::W32;

    /// Word size of the target this crate is compiled for.
    #[cfg(target_pointer_width = "64")]
    pub const NATIVE: Self = Self::W64;

    pub const fn bytes(self) -> usize {
        match self {
            Self::W32 => 4,
            Self::W64 => 8,
        }
    }
}

/// Decoded contents of a return-area record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetRecord {
    pub ptr: u64,
    pub len: u64,
}

impl RetRecord {
    pub const fn new(ptr: u64, len: u64) -> Self {
        Self { ptr, len }
    }

    /// True for the `[null, 0]` record written when no output was produced.
    pub fn is_empty(&self) -> bool {
        self.ptr == 0 && self.len == 0
    }
}

/// Encode a record into its 16-byte wire form. Padding bytes are zero.
///
/// Values wider than the word size are truncated, matching a store of the
/// low word.
pub fn encode_ret_area(word: WordSize, record: RetRecord) -> [u8; RET_AREA_SIZE] {
    let mut out = [0u8; RET_AREA_SIZE];
    let n = word.bytes();
    out[RET_AREA_PTR_OFFSET..RET_AREA_PTR_OFFSET + n]
        .copy_from_slice(&record.ptr.to_le_bytes()[..n]);
    out[RET_AREA_LEN_OFFSET..RET_AREA_LEN_OFFSET + n]
        .copy_from_slice(&record.len.to_le_bytes()[..n]);
    out
}

/// Decode a record from its 16-byte wire form. Padding bytes are ignored.
pub fn decode_ret_area(word: WordSize, bytes: &[u8; RET_AREA_SIZE]) -> RetRecord {
    RetRecord {
        ptr: read_word(word, &bytes[RET_AREA_PTR_OFFSET..]),
        len: read_word(word, &bytes[RET_AREA_LEN_OFFSET..]),
    }
}

/// Read the return-area record at `addr` in a linear-memory image.
///
/// Returns `OutOfBounds` if `[addr, addr + 16)` is not inside `mem`.
pub fn read_ret_area(mem: &[u8], addr: usize, word: WordSize) -> DfResult<RetRecord> {
    let bytes = checked_range(mem, addr, RET_AREA_SIZE)?;
    let mut buf = [0u8; RET_AREA_SIZE];
    buf.copy_from_slice(bytes);
    Ok(decode_ret_area(word, &buf))
}

/// Read the `i64` elements described by `record` from a linear-memory image.
pub fn read_list(mem: &[u8], record: RetRecord) -> DfResult<alloc::vec::Vec<i64>> {
    if record.len == 0 {
        return Ok(alloc::vec::Vec::new());
    }
    let oob = || DfError::OutOfBounds {
        addr: record.ptr as usize,
        len: usize::MAX,
        memory: mem.len(),
    };
    let addr = usize::try_from(record.ptr).map_err(|_| oob())?;
    let len = usize::try_from(record.len)
        .ok()
        .and_then(crate::types::list_byte_size)
        .ok_or_else(oob)?;
    let bytes = checked_range(mem, addr, len)?;
    Ok(bytes
        .chunks_exact(8)
        .map(|c| i64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
        .collect())
}

fn read_word(word: WordSize, bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    let n = word.bytes();
    buf[..n].copy_from_slice(&bytes[..n]);
    u64::from_le_bytes(buf)
}

fn checked_range(mem: &[u8], addr: usize, len: usize) -> DfResult<&[u8]> {
    let oob = DfError::OutOfBounds {
        addr,
        len,
        memory: mem.len(),
    };
    let end = addr.checked_add(len).ok_or(oob.clone())?;
    mem.get(addr..end).ok_or(oob)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasm32_layout_matches_two_i32_stores() {
        let bytes = encode_ret_area(WordSize::W32, RetRecord::new(0x1000, 3));
        assert_eq!(&bytes[0..4], &0x1000u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &[0, 0, 0, 0]);
        assert_eq!(&bytes[8..12], &3u32.to_le_bytes());
        assert_eq!(&bytes[12..16], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_decode_ignores_padding() {
        let mut bytes = encode_ret_area(WordSize::W32, RetRecord::new(64, 2));
        bytes[4] = 0xFF;
        bytes[15] = 0xFF;
        assert_eq!(decode_ret_area(WordSize::W32, &bytes), RetRecord::new(64, 2));
    }

    #[test]
    fn test_w64_uses_full_words() {
        let record = RetRecord::new(0x0000_7fff_0000_1000, 5);
        let bytes = encode_ret_area(WordSize::W64, record);
        assert_eq!(decode_ret_area(WordSize::W64, &bytes), record);
        assert_eq!(WordSize::W64.bytes(), 8);
    }

    #[test]
    fn test_read_ret_area_from_memory() {
        let mut mem = alloc::vec![0u8; 64];
        let bytes = encode_ret_area(WordSize::W32, RetRecord::new(32, 2));
        mem[16..32].copy_from_slice(&bytes);
        mem[32..40].copy_from_slice(&7i64.to_le_bytes());
        mem[40..48].copy_from_slice(&(-9i64).to_le_bytes());

        let record = read_ret_area(&mem, 16, WordSize::W32).unwrap();
        assert_eq!(record, RetRecord::new(32, 2));
        assert_eq!(read_list(&mem, record).unwrap(), alloc::vec![7, -9]);
    }

    #[test]
    fn test_read_ret_area_out_of_bounds() {
        let mem = alloc::vec![0u8; 20];
        assert!(matches!(
            read_ret_area(&mem, 8, WordSize::W32),
            Err(DfError::OutOfBounds { addr: 8, len: 16, memory: 20 })
        ));
        assert!(read_ret_area(&mem, usize::MAX, WordSize::W32).is_err());
    }

    #[test]
    fn test_read_list_out_of_bounds() {
        let mem = alloc::vec![0u8; 16];
        assert!(read_list(&mem, RetRecord::new(8, 2)).is_err());
        assert!(read_list(&mem, RetRecord::new(0, u64::MAX)).is_err());
        assert!(read_list(&mem, RetRecord::default()).unwrap().is_empty());
    }

    #[test]
    fn test_empty_record() {
        assert!(RetRecord::default().is_empty());
        assert!(!RetRecord::new(8, 0).is_empty());
    }
}
