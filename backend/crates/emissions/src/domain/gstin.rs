//! GSTIN Value Object
//!
//! Indian GST identification number, used to attach a verified business
//! identity to emission reports.
//!
//! Layout (15 characters):
//! `SS PPPPPNNNNP E Z C`
//! - `SS` state code `01`..=`38`
//! - PAN: 5 letters, 4 digits, 1 letter
//! - `E` entity number within the PAN (`1-9`, `A-Z`)
//! - literal `Z`
//! - `C` base-36 check character

use crate::error::{EmissionsError, EmissionsResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const GSTIN_LENGTH: usize = 15;
const CHECKSUM_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const STATE_CODE_MAX: u8 = 38;

/// Why a GSTIN was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GstinRejection {
    /// Not exactly 15 characters after trimming
    Length { length: usize },
    /// Character outside `0-9A-Z`
    InvalidCharacter { char: char, position: usize },
    /// First two characters are not a state code in `01..=38`
    StateCode,
    /// Characters 3..=12 are not a PAN
    Pan,
    /// Entity character is `0`
    EntityCode,
    /// Character 14 is not `Z`
    MissingZ,
    /// Check character does not match
    Checksum { expected: char, found: char },
}

impl fmt::Display for GstinRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length { length } => {
                write!(f, "expected {GSTIN_LENGTH} characters, got {length}")
            }
            Self::InvalidCharacter { char, position } => {
                write!(f, "invalid character '{char}' at position {position}")
            }
            Self::StateCode => write!(f, "state code must be between 01 and {STATE_CODE_MAX}"),
            Self::Pan => write!(f, "PAN section must be 5 letters, 4 digits and 1 letter"),
            Self::EntityCode => write!(f, "entity code must be 1-9 or A-Z"),
            Self::MissingZ => write!(f, "14th character must be 'Z'"),
            Self::Checksum { expected, found } => {
                write!(f, "check character should be '{expected}', found '{found}'")
            }
        }
    }
}

impl std::error::Error for GstinRejection {}

/// Validated GSTIN, stored uppercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Gstin(String);

impl Gstin {
    /// Normalize (trim, uppercase) and validate
    pub fn new(input: impl AsRef<str>) -> EmissionsResult<Self> {
        let normalized = input.as_ref().trim().to_ascii_uppercase();
        Self::validate(&normalized).map_err(EmissionsError::InvalidGstin)?;
        Ok(Self(normalized))
    }

    fn validate(gstin: &str) -> Result<(), GstinRejection> {
        let bytes = gstin.as_bytes();
        let length = gstin.chars().count();
        if length != GSTIN_LENGTH || bytes.len() != GSTIN_LENGTH {
            return Err(GstinRejection::Length { length });
        }

        if let Some(position) = bytes
            .iter()
            .position(|b| !(b.is_ascii_digit() || b.is_ascii_uppercase()))
        {
            return Err(GstinRejection::InvalidCharacter {
                char: bytes[position] as char,
                position: position + 1,
            });
        }

        let state = &bytes[0..2];
        let state_code = state
            .iter()
            .all(u8::is_ascii_digit)
            .then(|| (state[0] - b'0') * 10 + (state[1] - b'0'));
        if !matches!(state_code, Some(1..=STATE_CODE_MAX)) {
            return Err(GstinRejection::StateCode);
        }

        let pan = &bytes[2..12];
        let pan_ok = pan[0..5].iter().all(u8::is_ascii_uppercase)
            && pan[5..9].iter().all(u8::is_ascii_digit)
            && pan[9].is_ascii_uppercase();
        if !pan_ok {
            return Err(GstinRejection::Pan);
        }

        if bytes[12] == b'0' {
            return Err(GstinRejection::EntityCode);
        }

        if bytes[13] != b'Z' {
            return Err(GstinRejection::MissingZ);
        }

        let expected = check_character(&bytes[0..14]);
        let found = bytes[14] as char;
        if expected != found {
            return Err(GstinRejection::Checksum { expected, found });
        }

        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Two-digit GST state code
    pub fn state_code(&self) -> &str {
        &self.0[0..2]
    }

    /// PAN of the registered business
    pub fn pan(&self) -> &str {
        &self.0[2..12]
    }
}

/// Base-36 check character over the first 14 characters
///
/// Weights alternate 1, 2 from the left; each product contributes
/// `p / 36 + p % 36`.
fn check_character(body: &[u8]) -> char {
    let sum: u32 = body
        .iter()
        .enumerate()
        .map(|(i, &b)| {
            let value = alphabet_index(b);
            let product = value * if i % 2 == 0 { 1 } else { 2 };
            product / 36 + product % 36
        })
        .sum();
    let check = (36 - sum % 36) % 36;
    CHECKSUM_ALPHABET[check as usize] as char
}

/// Index of an already validated `0-9A-Z` byte
fn alphabet_index(b: u8) -> u32 {
    match b {
        b'0'..=b'9' => u32::from(b - b'0'),
        _ => u32::from(b - b'A') + 10,
    }
}

impl FromStr for Gstin {
    type Err = EmissionsError;

    fn from_str(s: &str) -> EmissionsResult<Self> {
        Gstin::new(s)
    }
}

impl TryFrom<String> for Gstin {
    type Error = EmissionsError;

    fn try_from(s: String) -> EmissionsResult<Self> {
        Gstin::new(s)
    }
}

impl From<Gstin> for String {
    fn from(gstin: Gstin) -> Self {
        gstin.0
    }
}

impl fmt::Display for Gstin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Gstin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
