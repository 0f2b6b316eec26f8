//! Packed 64-bit player identifiers.
//!
//! Layout, least significant bits first: 32-bit account id, 20-bit
//! instance, 4-bit account type, 8-bit universe. Two text renderings are
//! supported: legacy `STEAM_{universe}:{id & 1}:{id >> 1}` and modern
//! `U:{universe}:{id}`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ACCOUNT_ID_MASK: u64 = 0xffff_ffff;
const INSTANCE_SHIFT: u32 = 32;
const INSTANCE_MASK: u64 = 0xf_ffff;
const TYPE_SHIFT: u32 = 52;
const TYPE_MASK: u64 = 0xf;
const UNIVERSE_SHIFT: u32 = 56;
const UNIVERSE_MASK: u64 = 0xff;

/// Instance and account type assumed for ids parsed from text.
const DEFAULT_INSTANCE: u32 = 1;
const DEFAULT_TYPE: u8 = 1;

static LEGACY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^STEAM_(?<universe>[0-5]):(?<bit>[0-1]):(?<id>[0-9]+)$").unwrap()
});
static MODERN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^U:(?<universe>[0-5]):(?<id>[0-9]+)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SteamIdError {
    #[error("invalid SteamID format: {input:?}")]
    InvalidSteamIdFormat { input: String },
}

/// Packed player identifier.
///
/// Serializes as `{ "steam_id64", "steam_id", "steam_id3" }`; deserialization
/// only reads `steam_id64`.
///
/// # Examples
/// ```
/// use demoinfo_core::SteamId;
///
/// let id = SteamId::new(22202, 1, 1, 1);
/// assert_eq!(id.raw(), 76561197960287930);
/// assert_eq!(id.to_legacy_string(), "STEAM_1:0:11101");
/// assert_eq!(id.to_modern_string(), "U:1:22202");
/// assert_eq!("STEAM_1:0:11101".parse::<SteamId>().unwrap(), id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "SteamIdRepr", from = "SteamIdRepr")]
pub struct SteamId(u64);

impl SteamId {
    /// Pack the four components; bits above each field's width are dropped.
    pub fn new(account_id: u32, instance: u32, account_type: u8, universe: u8) -> Self {
        let value = u64::from(account_id)
            | ((u64::from(instance) & INSTANCE_MASK) << INSTANCE_SHIFT)
            | ((u64::from(account_type) & TYPE_MASK) << TYPE_SHIFT)
            | (u64::from(universe) << UNIVERSE_SHIFT);
        Self(value)
    }

    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn account_id(&self) -> u32 {
        (self.0 & ACCOUNT_ID_MASK) as u32
    }

    pub fn instance(&self) -> u32 {
        ((self.0 >> INSTANCE_SHIFT) & INSTANCE_MASK) as u32
    }

    pub fn account_type(&self) -> u8 {
        ((self.0 >> TYPE_SHIFT) & TYPE_MASK) as u8
    }

    pub fn universe(&self) -> u8 {
        ((self.0 >> UNIVERSE_SHIFT) & UNIVERSE_MASK) as u8
    }

    /// `(account_id, instance, account_type, universe)`
    pub fn unpack(&self) -> (u32, u32, u8, u8) {
        (
            self.account_id(),
            self.instance(),
            self.account_type(),
            self.universe(),
        )
    }

    pub fn to_legacy_string(&self) -> String {
        let id = self.account_id();
        format!("STEAM_{}:{}:{}", self.universe(), id & 1, id >> 1)
    }

    pub fn to_modern_string(&self) -> String {
        format!("U:{}:{}", self.universe(), self.account_id())
    }

    /// Parse either text rendering; instance and type are set to 1.
    pub fn parse(text: &str) -> Result<Self, SteamIdError> {
        let invalid = || SteamIdError::InvalidSteamIdFormat {
            input: text.to_string(),
        };

        if let Some(caps) = LEGACY_RE.captures(text) {
            let universe: u8 = caps["universe"].parse().map_err(|_| invalid())?;
            let bit: u64 = caps["bit"].parse().map_err(|_| invalid())?;
            let id: u64 = caps["id"].parse().map_err(|_| invalid())?;
            let account_id = id
                .checked_mul(2)
                .and_then(|shifted| u32::try_from(shifted | bit).ok())
                .ok_or_else(invalid)?;
            return Ok(Self::new(account_id, DEFAULT_INSTANCE, DEFAULT_TYPE, universe));
        }

        if let Some(caps) = MODERN_RE.captures(text) {
            let universe: u8 = caps["universe"].parse().map_err(|_| invalid())?;
            let account_id: u32 = caps["id"].parse().map_err(|_| invalid())?;
            return Ok(Self::new(account_id, DEFAULT_INSTANCE, DEFAULT_TYPE, universe));
        }

        Err(invalid())
    }
}

impl FromStr for SteamId {
    type Err = SteamIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_legacy_string())
    }
}

#[derive(Serialize, Deserialize)]
struct SteamIdRepr {
    steam_id64: u64,
    #[serde(default)]
    steam_id: String,
    #[serde(default)]
    steam_id3: String,
}

impl From<SteamId> for SteamIdRepr {
    fn from(id: SteamId) -> Self {
        Self {
            steam_id64: id.raw(),
            steam_id: id.to_legacy_string(),
            steam_id3: id.to_modern_string(),
        }
    }
}

impl From<SteamIdRepr> for SteamId {
    fn from(repr: SteamIdRepr) -> Self {
        Self::from_raw(repr.steam_id64)
    }
}
