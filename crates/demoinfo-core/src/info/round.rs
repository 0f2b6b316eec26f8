use time::OffsetDateTime;

use super::error::DecodeError;
use super::layout;
use super::reader::InfoReader;
use super::tag::{Tag, TagRouter};
use crate::steamid::SteamId;
use crate::{PlayerStat, RoundRecord};

/// Match-level fields that are only found inside round frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchExtras {
    pub end_time: Option<OffsetDateTime>,
    pub unknown1: Option<i64>,
    pub demo_url: Option<String>,
    pub was_tie: Option<bool>,
}

/// Decode one round frame starting at the reader's position.
///
/// The frame is bounded by the end of the stream until a round data length
/// tag narrows it. A terminator tag marks the start of a round: as the first
/// tag of a frame it is skipped, later in the frame it ends the frame so the
/// caller can start the next one right after it.
pub fn parse_round(
    reader: &mut InfoReader<'_>,
    extras: &mut MatchExtras,
) -> Result<RoundRecord, DecodeError> {
    let mut round = RoundRecord::default();
    let mut router = TagRouter::new();
    let mut data_end = reader.end_offset();
    let mut header_seen = false;
    let mut has_fields = false;

    while reader.position() < data_end && !reader.is_at_end() {
        let offset = reader.position();
        let raw = reader.read_u8()?;
        match router.route(raw, offset)? {
            Tag::RoundTerminator if !has_fields => continue,
            Tag::RoundTerminator => break,
            Tag::RoundDataLength => {
                let length = read_length(reader)?;
                data_end = reader.position().saturating_add(length);
            }
            Tag::RoundHeaderLength => {
                // Only its presence matters: it switches 0x08 from end time to player id.
                read_length(reader)?;
                header_seen = true;
            }
            Tag::PlayerOrEndTime if !header_seen => {
                extras.end_time = Some(reader.read_timestamp_scaled()?);
            }
            Tag::PlayerOrEndTime => {
                let slot = router.next_slot(layout::PLAYER_SLOTS, offset)?;
                let account_id = reader.read_varint()? as u32;
                round.players[slot].player = Some(SteamId::new(account_id, 1, 1, 1));
            }
            Tag::RoundUnknown => {
                extras.unknown1 = Some(reader.read_varint()?);
            }
            Tag::DemoUrl => {
                let length = read_length(reader)?;
                extras.demo_url = Some(reader.read_ascii_string(length)?);
            }
            Tag::Kills => {
                let player = player_slot(&mut round, &mut router, offset)?;
                player.kills = Some(reader.read_varint()? as i32);
            }
            Tag::Assists => {
                let player = player_slot(&mut round, &mut router, offset)?;
                player.assists = Some(reader.read_varint()? as i32);
            }
            Tag::Deaths => {
                let player = player_slot(&mut round, &mut router, offset)?;
                player.deaths = Some(reader.read_varint()? as i32);
            }
            Tag::Score => {
                let player = player_slot(&mut round, &mut router, offset)?;
                player.score = Some(reader.read_varint()? as i32);
            }
            Tag::EnemyKills => {
                let player = player_slot(&mut round, &mut router, offset)?;
                player.enemy_kills = Some(read_wide(reader)?);
            }
            Tag::Headshots => {
                let player = player_slot(&mut round, &mut router, offset)?;
                player.headshots = Some(read_wide(reader)?);
            }
            Tag::Mvps => {
                let player = player_slot(&mut round, &mut router, offset)?;
                player.mvps = Some(read_wide(reader)?);
            }
            Tag::TeamScore => {
                let slot = router.next_slot(layout::TEAM_SLOTS, offset)?;
                round.teams[slot].score = Some(reader.read_varint()? as i32);
            }
            Tag::Outcome => {
                let was_tie = reader.read_u8()? == 0;
                round.was_tie = Some(was_tie);
                extras.was_tie = Some(was_tie);
            }
            Tag::GameTime => {
                round.game_time_s = Some(reader.read_varint()?);
            }
        }
        has_fields = true;
    }

    Ok(round)
}

fn player_slot<'r>(
    round: &'r mut RoundRecord,
    router: &mut TagRouter,
    offset: usize,
) -> Result<&'r mut PlayerStat, DecodeError> {
    let slot = router.next_slot(layout::PLAYER_SLOTS, offset)?;
    Ok(&mut round.players[slot])
}

fn read_length(reader: &mut InfoReader<'_>) -> Result<usize, DecodeError> {
    let raw = reader.read_varint()? as u64;
    Ok(usize::try_from(raw).unwrap_or(usize::MAX))
}

/// One width byte, then a big-endian integer of that many bytes.
fn read_wide(reader: &mut InfoReader<'_>) -> Result<i32, DecodeError> {
    let width = reader.read_u8()?;
    Ok(reader.read_fixed_be(usize::from(width))? as i32)
}
