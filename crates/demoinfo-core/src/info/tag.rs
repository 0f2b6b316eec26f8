use super::error::DecodeError;
use super::layout;

/// Field kinds that may appear inside a round frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    RoundTerminator,
    PlayerOrEndTime,
    RoundUnknown,
    RoundHeaderLength,
    DemoUrl,
    Kills,
    RoundDataLength,
    Assists,
    Deaths,
    Score,
    Outcome,
    TeamScore,
    GameTime,
    EnemyKills,
    Headshots,
    Mvps,
}

impl TryFrom<u8> for Tag {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            layout::TAG_ROUND_TERMINATOR => Ok(Self::RoundTerminator),
            layout::TAG_PLAYER_OR_END_TIME => Ok(Self::PlayerOrEndTime),
            layout::TAG_ROUND_UNKNOWN => Ok(Self::RoundUnknown),
            layout::TAG_ROUND_HEADER_LENGTH => Ok(Self::RoundHeaderLength),
            layout::TAG_DEMO_URL => Ok(Self::DemoUrl),
            layout::TAG_KILLS => Ok(Self::Kills),
            layout::TAG_ROUND_DATA_LENGTH => Ok(Self::RoundDataLength),
            layout::TAG_ASSISTS => Ok(Self::Assists),
            layout::TAG_DEATHS => Ok(Self::Deaths),
            layout::TAG_SCORE => Ok(Self::Score),
            layout::TAG_OUTCOME => Ok(Self::Outcome),
            layout::TAG_TEAM_SCORE => Ok(Self::TeamScore),
            layout::TAG_GAME_TIME => Ok(Self::GameTime),
            layout::TAG_ENEMY_KILLS => Ok(Self::EnemyKills),
            layout::TAG_HEADSHOTS => Ok(Self::Headshots),
            layout::TAG_MVPS => Ok(Self::Mvps),
            unknown => Err(unknown),
        }
    }
}

/// Tracks the implicit slot index of repeated fields.
///
/// A run of N consecutive identical tags addresses slots `0..N`; any other
/// tag in between starts a new run at slot 0. The stream carries no explicit
/// index.
#[derive(Debug, Default)]
pub struct TagRouter {
    last_tag: Option<u8>,
    slot: usize,
}

impl TagRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a raw tag byte read at `offset` and update the run state.
    pub fn route(&mut self, raw: u8, offset: usize) -> Result<Tag, DecodeError> {
        let tag = Tag::try_from(raw).map_err(|tag| DecodeError::UnknownTag { tag, offset })?;
        if self.last_tag != Some(raw) {
            self.last_tag = Some(raw);
            self.slot = 0;
        }
        Ok(tag)
    }

    /// Claim the current slot of the active run, bounded by `capacity`.
    pub fn next_slot(&mut self, capacity: usize, offset: usize) -> Result<usize, DecodeError> {
        let slot = self.slot;
        if slot >= capacity {
            return Err(DecodeError::SlotOverflow {
                tag: self.last_tag.unwrap_or_default(),
                slot,
                capacity,
                offset,
            });
        }
        self.slot += 1;
        Ok(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::{Tag, TagRouter};
    use crate::info::error::DecodeError;
    use crate::info::layout;

    #[test]
    fn resolves_known_tags() {
        assert_eq!(Tag::try_from(layout::TAG_KILLS), Ok(Tag::Kills));
        assert_eq!(Tag::try_from(layout::TAG_MVPS), Ok(Tag::Mvps));
        assert_eq!(Tag::try_from(layout::TAG_ROUND_TERMINATOR), Ok(Tag::RoundTerminator));
    }

    #[test]
    fn rejects_unknown_tag_with_byte() {
        let mut router = TagRouter::new();
        let err = router.route(0x99, 7).unwrap_err();
        assert_eq!(err, DecodeError::UnknownTag { tag: 0x99, offset: 7 });
    }

    #[test]
    fn consecutive_tags_advance_slot() {
        let mut router = TagRouter::new();
        for expected in 0..3 {
            router.route(layout::TAG_KILLS, 0).unwrap();
            assert_eq!(router.next_slot(layout::PLAYER_SLOTS, 0).unwrap(), expected);
        }
    }

    #[test]
    fn different_tag_resets_slot() {
        let mut router = TagRouter::new();
        router.route(layout::TAG_KILLS, 0).unwrap();
        router.next_slot(layout::PLAYER_SLOTS, 0).unwrap();
        router.route(layout::TAG_KILLS, 0).unwrap();
        router.next_slot(layout::PLAYER_SLOTS, 0).unwrap();

        router.route(layout::TAG_DEATHS, 0).unwrap();
        assert_eq!(router.next_slot(layout::PLAYER_SLOTS, 0).unwrap(), 0);

        router.route(layout::TAG_KILLS, 0).unwrap();
        assert_eq!(router.next_slot(layout::PLAYER_SLOTS, 0).unwrap(), 0);
    }

    #[test]
    fn slot_past_capacity_fails() {
        let mut router = TagRouter::new();
        for _ in 0..layout::TEAM_SLOTS {
            router.route(layout::TAG_TEAM_SCORE, 0).unwrap();
            router.next_slot(layout::TEAM_SLOTS, 0).unwrap();
        }
        router.route(layout::TAG_TEAM_SCORE, 4).unwrap();
        let err = router.next_slot(layout::TEAM_SLOTS, 4).unwrap_err();
        assert_eq!(
            err,
            DecodeError::SlotOverflow {
                tag: layout::TAG_TEAM_SCORE,
                slot: 2,
                capacity: 2,
                offset: 4
            }
        );
    }
}
