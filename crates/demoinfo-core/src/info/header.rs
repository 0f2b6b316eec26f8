use time::OffsetDateTime;

use super::error::DecodeError;
use super::layout;
use super::reader::InfoReader;

/// Match-level fields decoded from the fixed preamble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchHeader {
    pub start_time: OffsetDateTime,
    pub start_time2: OffsetDateTime,
    pub first_round_offset: u8,
    pub server_id: i64,
    pub match_id: i64,
    pub unknown0: i64,
    pub hash: i64,
}

/// Decode the preamble, leaving the reader positioned at the first round.
///
/// Every tag byte is positional and must match exactly; the first mismatch
/// fails the whole file.
pub fn parse_header(reader: &mut InfoReader<'_>) -> Result<MatchHeader, DecodeError> {
    expect_tag(reader, layout::TAG_TIMESTAMP)?;
    let start_time = reader.read_timestamp_scaled()?;
    expect_tag(reader, layout::TAG_TIMESTAMP_SECONDS)?;
    let start_time2 = reader.read_timestamp_seconds()?;
    expect_tag(reader, layout::TAG_FIRST_ROUND_OFFSET)?;
    let first_round_offset = reader.read_u8()?;
    expect_tag(reader, layout::TAG_SERVER_ID)?;
    let server_id = reader.read_varint()?;
    expect_tag(reader, layout::TAG_MATCH_ID)?;
    let match_id = reader.read_varint()?;
    expect_tag(reader, layout::TAG_HEADER_UNKNOWN)?;
    let unknown0 = reader.read_varint()?;
    expect_tag(reader, layout::TAG_HASH)?;
    let hash = reader.read_varint()?;

    Ok(MatchHeader {
        start_time,
        start_time2,
        first_round_offset,
        server_id,
        match_id,
        unknown0,
        hash,
    })
}

fn expect_tag(reader: &mut InfoReader<'_>, expected: u8) -> Result<(), DecodeError> {
    let offset = reader.position();
    let actual = reader.read_u8()?;
    if actual != expected {
        return Err(DecodeError::UnexpectedTag {
            expected,
            actual,
            offset,
        });
    }
    Ok(())
}
