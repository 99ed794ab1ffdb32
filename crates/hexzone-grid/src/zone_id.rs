//! Canonical zone identifiers.
//!
//! A zone is named by its spiral index, rendered `zone-<n>`. Older override
//! tables keyed cells by the raw axial pair `axial:<q>,<r>`; those strings
//! still parse and are converted to the same canonical id, so a stored
//! override matches no matter which form it was written in.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::axial::Axial;
use crate::error::GridError;
use crate::spiral::{axial_at, spiral_index};

const SPIRAL_PREFIX: &str = "zone-";
const AXIAL_PREFIX: &str = "axial:";
const AXIAL_ID_LIMIT: u32 = 1_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZoneIdError {
    #[error("empty zone id")]
    Empty,

    #[error("unrecognized zone id {0:?}")]
    Unrecognized(String),

    #[error("zone id {0:?} does not name a cell")]
    OutOfRange(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZoneId(u64);

/// How a zone id string was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneIdScheme {
    Spiral,
    LegacyAxial,
}

impl ZoneId {
    /// The origin cell.
    pub const ORIGIN: ZoneId = ZoneId(1);

    /// Wrap a spiral index. Returns `None` for index zero or indices past the ring limit.
    #[must_use]
    pub fn from_index(index: u64) -> Option<Self> {
        axial_at(index).map(|_| Self(index))
    }

    /// For callers already walking the spiral in order.
    pub(crate) const fn from_spiral_position(index: u64) -> Self {
        Self(index)
    }

    /// # Errors
    ///
    /// Returns [`GridError::IndexNotFound`] if the cell has no spiral index.
    pub fn from_axial(cell: Axial) -> Result<Self, GridError> {
        spiral_index(cell).map(Self)
    }

    #[must_use]
    pub const fn index(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn axial(self) -> Axial {
        // Every constructed id names a cell.
        axial_at(self.0).unwrap_or(Axial::ORIGIN)
    }

    #[must_use]
    pub fn ring(self) -> u32 {
        self.axial().ring()
    }

    /// Parse either form, reporting which one was used.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneIdError`] when the string is in neither form or names no cell.
    pub fn parse_with_scheme(raw: &str) -> Result<(Self, ZoneIdScheme), ZoneIdError> {
        let s = raw.trim();
        if s.is_empty() {
            return Err(ZoneIdError::Empty);
        }

        if let Some(rest) = s.strip_prefix(SPIRAL_PREFIX) {
            let index = canonical_digits(rest, raw)?;
            let id =
                Self::from_index(index).ok_or_else(|| ZoneIdError::OutOfRange(raw.to_string()))?;
            return Ok((id, ZoneIdScheme::Spiral));
        }

        if let Some(rest) = s.strip_prefix(AXIAL_PREFIX) {
            let (q, r) = rest
                .split_once(',')
                .ok_or_else(|| ZoneIdError::Unrecognized(raw.to_string()))?;
            let cell = Axial::new(axial_component(q, raw)?, axial_component(r, raw)?);
            let id =
                Self::from_axial(cell).map_err(|_| ZoneIdError::OutOfRange(raw.to_string()))?;
            return Ok((id, ZoneIdScheme::LegacyAxial));
        }

        Err(ZoneIdError::Unrecognized(raw.to_string()))
    }
}

/// Plain decimal digits with no sign and no leading zero, so every number has
/// exactly one spelling.
fn canonical_digits(digits: &str, raw: &str) -> Result<u64, ZoneIdError> {
    let well_formed = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'));
    if !well_formed {
        return Err(ZoneIdError::Unrecognized(raw.to_string()));
    }
    digits
        .parse::<u64>()
        .map_err(|_| ZoneIdError::OutOfRange(raw.to_string()))
}

/// One signed axial component. Zero is written `0`, never `-0`.
fn axial_component(component: &str, raw: &str) -> Result<i32, ZoneIdError> {
    let (negative, digits) = match component.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, component),
    };
    let magnitude = canonical_digits(digits, raw)?;
    if negative && magnitude == 0 {
        return Err(ZoneIdError::Unrecognized(raw.to_string()));
    }
    if magnitude > u64::from(AXIAL_ID_LIMIT) {
        return Err(ZoneIdError::OutOfRange(raw.to_string()));
    }
    let value = i32::try_from(magnitude).map_err(|_| ZoneIdError::OutOfRange(raw.to_string()))?;
    Ok(if negative { -value } else { value })
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{SPIRAL_PREFIX}{}", self.0)
    }
}

impl FromStr for ZoneId {
    type Err = ZoneIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_scheme(s).map(|(id, _)| id)
    }
}

impl TryFrom<String> for ZoneId {
    type Error = ZoneIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ZoneId> for String {
    fn from(id: ZoneId) -> Self {
        id.to_string()
    }
}

/// Raw axial id of a cell, `axial:<q>,<r>`. Diagnostic only; never a key.
#[must_use]
pub fn hex_id(cell: Axial) -> String {
    format!("{AXIAL_PREFIX}{},{}", cell.q, cell.r)
}
