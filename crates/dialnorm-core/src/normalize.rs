use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::debug;

use crate::canonical::CanonicalNumber;
use crate::error::Result;
use crate::libphone::LibPhoneOracle;
use crate::oracle::{ParsedNumber, PhoneOracle};
use crate::region_tz::RegionTimezoneIndex;

pub const DEFAULT_MAX_RECOVERY_DEPTH: u8 = 2;

const MIN_RECOVERY_LENGTH: usize = 10;
const ZERO_LOOKALIKES: [char; 2] = ['o', 'O'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Canonical(CanonicalNumber),
    Unchanged(String),
}

impl Normalized {
    pub fn is_canonical(&self) -> bool {
        matches!(self, Normalized::Canonical(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Normalized::Canonical(number) => number.as_str(),
            Normalized::Unchanged(raw) => raw,
        }
    }

    pub fn into_parts(self) -> (bool, String) {
        match self {
            Normalized::Canonical(number) => (true, number.into_string()),
            Normalized::Unchanged(raw) => (false, raw),
        }
    }
}

impl Serialize for Normalized {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Normalized", 2)?;
        state.serialize_field("success", &self.is_canonical())?;
        state.serialize_field("normalized", self.as_str())?;
        state.end()
    }
}

pub struct Normalizer<O> {
    oracle: O,
    index: &'static RegionTimezoneIndex,
    max_recovery_depth: u8,
}

impl Normalizer<LibPhoneOracle> {
    pub fn libphonenumber() -> Self {
        Self::new(LibPhoneOracle::new())
    }
}

impl<O: PhoneOracle> Normalizer<O> {
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            index: RegionTimezoneIndex::builtin(),
            max_recovery_depth: DEFAULT_MAX_RECOVERY_DEPTH,
        }
    }

    pub fn with_max_recovery_depth(mut self, depth: u8) -> Self {
        self.max_recovery_depth = depth;
        self
    }

    pub fn index(&self) -> &'static RegionTimezoneIndex {
        self.index
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn normalize_by_region(&self, phone_number: &str, region: Option<&str>) -> Normalized {
        if phone_number.trim().is_empty() {
            return Normalized::Unchanged(phone_number.to_string());
        }

        match self.normalize_at_depth(phone_number, region, 0) {
            Some(number) => Normalized::Canonical(number),
            None => Normalized::Unchanged(phone_number.to_string()),
        }
    }

    pub fn normalize_by_timezone(
        &self,
        phone_number: &str,
        timezone: Option<&str>,
    ) -> Result<Normalized> {
        let region = self.index.region_for(timezone)?;
        Ok(self.normalize_by_region(phone_number, region))
    }

    pub fn is_valid_number(&self, phone_number: &str) -> bool {
        match self.oracle.parse(phone_number, None) {
            Ok(number) => self.oracle.is_valid(&number),
            Err(fault) => {
                debug!(%fault, "validity check could not parse number");
                false
            }
        }
    }

    fn normalize_at_depth(
        &self,
        phone_number: &str,
        region: Option<&str>,
        depth: u8,
    ) -> Option<CanonicalNumber> {
        let repaired = repair_zero_lookalikes(phone_number);

        let number = match self.oracle.parse(&repaired, region) {
            Ok(number) => number,
            Err(fault) => {
                debug!(%fault, depth, "phone number rejected");
                return None;
            }
        };
        if self.oracle.is_valid(&number) {
            return Some(number.canonical());
        }

        if depth >= self.max_recovery_depth {
            debug!(depth, "recovery depth exhausted");
            return None;
        }
        let calling_code = self.missing_prefix_code(&repaired)?;
        debug!(calling_code, depth, "retrying with international prefix");
        self.normalize_at_depth(&format!("+{}", repaired), region, depth + 1)
    }

    fn missing_prefix_code(&self, text: &str) -> Option<u16> {
        let length = text.chars().count();
        if length < MIN_RECOVERY_LENGTH || !text.starts_with(|ch: char| ch.is_ascii_digit()) {
            return None;
        }

        self.oracle
            .supported_calling_codes()
            .iter()
            .copied()
            .find(|&code| {
                let prefix = code.to_string();
                if !text.starts_with(&prefix) {
                    return false;
                }
                let Some(region) = self.oracle.region_for_calling_code(code) else {
                    return false;
                };
                match self.oracle.example_mobile_number(&region) {
                    Some(example) => prefix.len() + example.len() == length,
                    None => false,
                }
            })
    }
}

pub fn repair_zero_lookalikes(raw: &str) -> String {
    raw.replace(ZERO_LOOKALIKES, "0")
}
