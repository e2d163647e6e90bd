use thiserror::Error;

use crate::canonical::CanonicalNumber;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OracleFault {
    #[error("parser rejected input: {0}")]
    Rejected(String),
    #[error("parser panicked: {0}")]
    Panicked(String),
}

pub trait ParsedNumber {
    fn country_code(&self) -> u16;
    fn national_number(&self) -> u64;

    fn canonical(&self) -> CanonicalNumber {
        CanonicalNumber::new(self.country_code(), self.national_number())
    }
}

pub trait PhoneOracle: Send + Sync {
    type Number: ParsedNumber;

    fn parse(&self, text: &str, region: Option<&str>) -> Result<Self::Number, OracleFault>;

    fn is_valid(&self, number: &Self::Number) -> bool;

    fn example_mobile_number(&self, region: &str) -> Option<String>;

    fn supported_calling_codes(&self) -> &[u16];

    fn region_for_calling_code(&self, calling_code: u16) -> Option<String>;
}
