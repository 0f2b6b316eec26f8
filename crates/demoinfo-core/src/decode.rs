use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::DemoInfo;
use crate::info::error::DecodeError;
use crate::info::parse_info;

#[derive(Debug, Error)]
pub enum DecodeFileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Decode a match-info record from an in-memory buffer.
///
/// # Examples
/// ```
/// use demoinfo_core::{DecodeError, decode_info_bytes};
///
/// let err = decode_info_bytes(&[0x09]).unwrap_err();
/// assert!(matches!(err, DecodeError::UnexpectedTag { expected: 0x08, actual: 0x09, offset: 0 }));
/// ```
pub fn decode_info_bytes(data: &[u8]) -> Result<DemoInfo, DecodeError> {
    parse_info(data)
}

/// Read `source` to its end, then decode it.
pub fn decode_info_reader<R: Read>(mut source: R) -> Result<DemoInfo, DecodeFileError> {
    let mut data = Vec::new();
    source.read_to_end(&mut data)?;
    Ok(decode_info_bytes(&data)?)
}

pub fn decode_info_file(path: &Path) -> Result<DemoInfo, DecodeFileError> {
    let file = File::open(path)?;
    decode_info_reader(file)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{DecodeFileError, decode_info_file, decode_info_reader};
    use crate::info::error::DecodeError;
    use crate::info::test_support::InfoBuilder;

    #[test]
    fn decode_from_reader() {
        let bytes = InfoBuilder::new().header(1_600_000_000, 7, 8, 9).finish();
        let info = decode_info_reader(Cursor::new(bytes)).unwrap();
        assert_eq!(info.server_id, 7);
        assert_eq!(info.match_id, 8);
        assert_eq!(info.hash, 9);
    }

    #[test]
    fn decode_error_is_wrapped() {
        let err = decode_info_reader(Cursor::new(vec![0x08, 0x80])).unwrap_err();
        assert!(matches!(
            err,
            DecodeFileError::Decode(DecodeError::TruncatedStream { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = decode_info_file(&dir.path().join("missing.info")).unwrap_err();
        assert!(matches!(err, DecodeFileError::Io(_)));
    }
}
