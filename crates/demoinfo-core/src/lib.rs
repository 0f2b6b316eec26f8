//! Decoder for match-info (`.info`) files written by the game client at the
//! end of a match.
//!
//! The file is an undocumented tag/length/varint stream. This crate decodes
//! it into a [`DemoInfo`] record: match metadata, per-round team scores and
//! per-player statistics. Decoding is byte-oriented and side-effect free;
//! file access is isolated in [`decode_info_file`] and [`batch`].
//!
//! Invariants:
//! - A file either decodes completely or yields an error; there is no
//!   partial record.
//! - Player and team slots are fixed-size arrays (10 and 2); a stream that
//!   addresses a slot past capacity is rejected.
//! - Absent fields are `None` and are omitted from serialized output, so a
//!   decoded zero is never confused with a missing value.
//!
//! Several fields (`hash`, `unknown0`, `unknown1`, `first_round_offset`)
//! have unconfirmed semantics and are carried through verbatim.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use demoinfo_core::decode_info_file;
//!
//! let info = decode_info_file(Path::new("match730_003.info"))?;
//! println!("rounds: {}", info.rounds.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub mod batch;
mod decode;
pub mod info;
mod steamid;

pub use batch::{BatchSummary, RecordSink, decode_batch};
pub use decode::{DecodeFileError, decode_info_bytes, decode_info_file, decode_info_reader};
pub use info::error::DecodeError;
pub use info::layout::{PLAYER_SLOTS, TEAM_SLOTS};
pub use steamid::{SteamId, SteamIdError};

/// File extension of match-info files.
pub const INFO_EXTENSION: &str = "info";

/// Decoded match-info record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoInfo {
    /// Start time from the fixed-point encoding (varint / 2^31 seconds).
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    /// Start time from the plain-seconds encoding. Which of the two is
    /// authoritative is unconfirmed.
    #[serde(with = "time::serde::rfc3339")]
    pub start_time2: OffsetDateTime,
    /// Raw byte following the preamble's length-delimited tag.
    pub first_round_offset: u8,
    pub server_id: i64,
    pub match_id: i64,
    /// Opaque preamble varint.
    pub unknown0: i64,
    /// 64-bit value of unconfirmed meaning.
    pub hash: i64,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<OffsetDateTime>,
    /// Opaque varint found inside round data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unknown1: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    /// Outcome of the last round that carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub was_tie: Option<bool>,
    pub rounds: Vec<RoundRecord>,
}

/// One played round.
///
/// Slot positions follow decode order within the round; slot 3 in one round
/// is not necessarily the same player as slot 3 in the next.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Elapsed game time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_time_s: Option<i64>,
    /// `Some(true)` when the round's outcome tag marked a tie.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub was_tie: Option<bool>,
    pub teams: [TeamStat; TEAM_SLOTS],
    pub players: [PlayerStat; PLAYER_SLOTS],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
}

/// Per-player statistics for one round. Every field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<SteamId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kills: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assists: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deaths: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enemy_kills: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headshots: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mvps: Option<i32>,
}
