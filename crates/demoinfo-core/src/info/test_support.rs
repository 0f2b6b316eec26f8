//! Byte-level encoder for building match-info fixtures in unit tests.

use super::layout;

#[derive(Debug, Default)]
pub struct InfoBuilder {
    bytes: Vec<u8>,
    tag_offsets: Vec<usize>,
}

impl InfoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: u8) -> Self {
        self.tag_offsets.push(self.bytes.len());
        self.bytes.push(tag);
        self
    }

    pub fn byte(mut self, value: u8) -> Self {
        self.bytes.push(value);
        self
    }

    pub fn varint(mut self, mut value: u64) -> Self {
        loop {
            let group = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                self.bytes.push(group);
                return self;
            }
            self.bytes.push(group | 0x80);
        }
    }

    /// Valid preamble with both start timestamps set to `start_secs`.
    pub fn header(self, start_secs: u64, server_id: u64, match_id: u64, hash: u64) -> Self {
        self.tag(layout::TAG_TIMESTAMP)
            .varint(start_secs << layout::TIMESTAMP_SCALE_BITS)
            .tag(layout::TAG_TIMESTAMP_SECONDS)
            .varint(start_secs)
            .tag(layout::TAG_FIRST_ROUND_OFFSET)
            .byte(0)
            .tag(layout::TAG_SERVER_ID)
            .varint(server_id)
            .tag(layout::TAG_MATCH_ID)
            .varint(match_id)
            .tag(layout::TAG_HEADER_UNKNOWN)
            .varint(0)
            .tag(layout::TAG_HASH)
            .varint(hash)
    }

    pub fn tag_varint(self, tag: u8, value: u64) -> Self {
        self.tag(tag).varint(value)
    }

    pub fn tag_wide(mut self, tag: u8, width: u8, value: u64) -> Self {
        self = self.tag(tag).byte(width);
        let be = value.to_be_bytes();
        self.bytes.extend_from_slice(&be[be.len() - width as usize..]);
        self
    }

    pub fn tag_string(mut self, tag: u8, value: &str) -> Self {
        self = self.tag(tag).varint(value.len() as u64);
        self.bytes.extend_from_slice(value.as_bytes());
        self
    }

    pub fn tag_offsets(&self) -> &[usize] {
        &self.tag_offsets
    }

    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}
