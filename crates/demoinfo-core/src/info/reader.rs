use time::OffsetDateTime;

use super::error::DecodeError;
use super::layout;

/// Byte cursor over a match-info stream.
///
/// All reads advance the cursor and fail with `TruncatedStream` instead of
/// reading past the end of the buffer.
pub struct InfoReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> InfoReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn end_offset(&self) -> usize {
        self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub fn require_len(&self, needed: usize) -> Result<(), DecodeError> {
        if self.remaining() < needed {
            return Err(DecodeError::TruncatedStream {
                offset: self.pos,
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let byte = self
            .data
            .get(self.pos)
            .copied()
            .ok_or(DecodeError::TruncatedStream {
                offset: self.pos,
                needed: 1,
                available: 0,
            })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Decode a base-128 varint, low group first.
    ///
    /// The chain length is not bounded; groups landing past bit 63 are
    /// dropped. The accumulated bits are reinterpreted as `i64`.
    pub fn read_varint(&mut self) -> Result<i64, DecodeError> {
        let mut value: u64 = 0;
        let mut shift: u32 = 0;
        loop {
            let byte = self.read_u8()?;
            let group = u64::from(byte & layout::VARINT_PAYLOAD_MASK);
            value |= group.checked_shl(shift).unwrap_or(0);
            shift = shift.saturating_add(7);
            if byte & layout::VARINT_CONTINUATION == 0 {
                return Ok(value as i64);
            }
        }
    }

    /// Decode an unsigned big-endian integer of `width` bytes.
    pub fn read_fixed_be(&mut self, width: usize) -> Result<u64, DecodeError> {
        let bytes = self.read_bytes(width)?;
        Ok(bytes
            .iter()
            .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte)))
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        self.require_len(n)?;
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Read `n` bytes as ASCII; bytes outside the ASCII range become U+FFFD.
    pub fn read_ascii_string(&mut self, n: usize) -> Result<String, DecodeError> {
        let bytes = self.read_bytes(n)?;
        Ok(bytes
            .iter()
            .map(|b| {
                if b.is_ascii() {
                    char::from(*b)
                } else {
                    char::REPLACEMENT_CHARACTER
                }
            })
            .collect())
    }

    /// Fixed-point timestamp: varint / 2^31 seconds since the Unix epoch.
    pub fn read_timestamp_scaled(&mut self) -> Result<OffsetDateTime, DecodeError> {
        let offset = self.pos;
        let raw = self.read_varint()?;
        scaled_to_datetime(raw).ok_or(DecodeError::TimestampOutOfRange { value: raw, offset })
    }

    /// Plain timestamp: varint seconds since the Unix epoch.
    pub fn read_timestamp_seconds(&mut self) -> Result<OffsetDateTime, DecodeError> {
        let offset = self.pos;
        let raw = self.read_varint()?;
        OffsetDateTime::from_unix_timestamp(raw)
            .map_err(|_| DecodeError::TimestampOutOfRange { value: raw, offset })
    }
}

fn scaled_to_datetime(raw: i64) -> Option<OffsetDateTime> {
    let nanos = (i128::from(raw) * 1_000_000_000) >> layout::TIMESTAMP_SCALE_BITS;
    OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
}
