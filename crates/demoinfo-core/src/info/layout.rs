//! Tag bytes and fixed constants of the match-info format.

/// Scaled start/end timestamps.
pub const TAG_TIMESTAMP: u8 = 0x08;
/// Plain-seconds start timestamp (preamble only).
pub const TAG_TIMESTAMP_SECONDS: u8 = 0x10;
/// Length-delimited first round offset (preamble only).
pub const TAG_FIRST_ROUND_OFFSET: u8 = 0x1a;
pub const TAG_SERVER_ID: u8 = 0x08;
pub const TAG_MATCH_ID: u8 = 0x10;
pub const TAG_HEADER_UNKNOWN: u8 = 0x18;
pub const TAG_HASH: u8 = 0x38;

pub const TAG_ROUND_TERMINATOR: u8 = 0x00;
/// Player identity, or the match end time when seen before a round header length.
pub const TAG_PLAYER_OR_END_TIME: u8 = 0x08;
pub const TAG_ROUND_UNKNOWN: u8 = 0x10;
pub const TAG_ROUND_HEADER_LENGTH: u8 = 0x12;
pub const TAG_DEMO_URL: u8 = 0x1a;
pub const TAG_KILLS: u8 = 0x28;
pub const TAG_ROUND_DATA_LENGTH: u8 = 0x2a;
pub const TAG_ASSISTS: u8 = 0x30;
pub const TAG_DEATHS: u8 = 0x38;
pub const TAG_SCORE: u8 = 0x40;
pub const TAG_OUTCOME: u8 = 0x58;
pub const TAG_TEAM_SCORE: u8 = 0x60;
pub const TAG_GAME_TIME: u8 = 0x78;
pub const TAG_ENEMY_KILLS: u8 = 0x80;
pub const TAG_HEADSHOTS: u8 = 0x88;
pub const TAG_MVPS: u8 = 0xa8;

pub const PLAYER_SLOTS: usize = 10;
pub const TEAM_SLOTS: usize = 2;

/// Fractional bits of the scaled timestamp encoding.
pub const TIMESTAMP_SCALE_BITS: u32 = 31;

pub const VARINT_CONTINUATION: u8 = 0x80;
pub const VARINT_PAYLOAD_MASK: u8 = 0x7f;
