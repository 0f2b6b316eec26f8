//! Encoder for synthetic match-info streams.

use demoinfo_core::info::layout;

pub fn varint(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let group = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(group);
            return;
        }
        out.push(group | 0x80);
    }
}

/// Preamble bytes plus the offsets of its seven tag bytes.
pub fn header(start_secs: u64, server_id: u64, match_id: u64, hash: u64) -> (Vec<u8>, Vec<usize>) {
    let mut out = Vec::new();
    let mut tags = Vec::new();
    let mut tag = |out: &mut Vec<u8>, value: u8| {
        tags.push(out.len());
        out.push(value);
    };

    tag(&mut out, layout::TAG_TIMESTAMP);
    varint(&mut out, start_secs << layout::TIMESTAMP_SCALE_BITS);
    tag(&mut out, layout::TAG_TIMESTAMP_SECONDS);
    varint(&mut out, start_secs);
    tag(&mut out, layout::TAG_FIRST_ROUND_OFFSET);
    out.push(0x2c);
    tag(&mut out, layout::TAG_SERVER_ID);
    varint(&mut out, server_id);
    tag(&mut out, layout::TAG_MATCH_ID);
    varint(&mut out, match_id);
    tag(&mut out, layout::TAG_HEADER_UNKNOWN);
    varint(&mut out, 3);
    tag(&mut out, layout::TAG_HASH);
    varint(&mut out, hash);

    (out, tags)
}

pub fn field(out: &mut Vec<u8>, tag: u8, value: u64) {
    out.push(tag);
    varint(out, value);
}

pub fn wide(out: &mut Vec<u8>, tag: u8, width: u8, value: u64) {
    out.push(tag);
    out.push(width);
    let be = value.to_be_bytes();
    out.extend_from_slice(&be[be.len() - width as usize..]);
}

pub fn string(out: &mut Vec<u8>, tag: u8, value: &str) {
    field(out, tag, value.len() as u64);
    out.extend_from_slice(value.as_bytes());
}
