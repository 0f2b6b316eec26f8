use super::error::DecodeError;
use super::header::parse_header;
use super::reader::InfoReader;
use super::round::{MatchExtras, parse_round};
use crate::DemoInfo;

/// Decode a complete match-info stream.
///
/// The preamble is decoded first, then round frames until the stream is
/// exhausted. Any error discards the whole record.
pub fn parse_info(data: &[u8]) -> Result<DemoInfo, DecodeError> {
    let mut reader = InfoReader::new(data);
    let header = parse_header(&mut reader)?;

    let mut extras = MatchExtras::default();
    let mut rounds = Vec::new();
    while !reader.is_at_end() {
        rounds.push(parse_round(&mut reader, &mut extras)?);
    }

    Ok(DemoInfo {
        start_time: header.start_time,
        start_time2: header.start_time2,
        first_round_offset: header.first_round_offset,
        server_id: header.server_id,
        match_id: header.match_id,
        unknown0: header.unknown0,
        hash: header.hash,
        end_time: extras.end_time,
        unknown1: extras.unknown1,
        demo_url: extras.demo_url,
        was_tie: extras.was_tie,
        rounds,
    })
}
