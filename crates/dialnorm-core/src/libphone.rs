use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use phonenumber::country::Id;
use phonenumber::metadata::DATABASE;
use phonenumber::PhoneNumber;
use tracing::error;

use crate::oracle::{OracleFault, ParsedNumber, PhoneOracle};

const MAX_CALLING_CODE: u16 = 999;
const NON_GEOGRAPHIC_REGION: &str = "001";

#[derive(Debug, Clone)]
pub struct LibPhoneOracle {
    calling_codes: Vec<u16>,
}

impl LibPhoneOracle {
    pub fn new() -> Self {
        let calling_codes = (1..=MAX_CALLING_CODE)
            .filter(|code| DATABASE.by_code(code).is_some())
            .collect();
        Self { calling_codes }
    }
}

impl Default for LibPhoneOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl ParsedNumber for PhoneNumber {
    fn country_code(&self) -> u16 {
        self.code().value()
    }

    fn national_number(&self) -> u64 {
        self.national().value()
    }
}

impl PhoneOracle for LibPhoneOracle {
    type Number = PhoneNumber;

    fn parse(&self, text: &str, region: Option<&str>) -> Result<PhoneNumber, OracleFault> {
        // Unknown region ids behave like no region: only national-format
        // input needs one.
        let country = region.and_then(|value| value.parse::<Id>().ok());

        // The phonenumber crate can panic on some malformed input.
        match panic::catch_unwind(move || phonenumber::parse(country, text)) {
            Ok(Ok(number)) => Ok(number),
            Ok(Err(err)) => Err(OracleFault::Rejected(format!("{:?}", err))),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(panic = %message, "phonenumber crate panicked while parsing");
                Err(OracleFault::Panicked(message))
            }
        }
    }

    fn is_valid(&self, number: &PhoneNumber) -> bool {
        match panic::catch_unwind(AssertUnwindSafe(|| phonenumber::is_valid(number))) {
            Ok(valid) => valid,
            Err(payload) => {
                error!(
                    panic = %panic_message(payload.as_ref()),
                    "phonenumber crate panicked while validating"
                );
                false
            }
        }
    }

    fn example_mobile_number(&self, region: &str) -> Option<String> {
        if region == NON_GEOGRAPHIC_REGION {
            return None;
        }
        let example = DATABASE
            .by_id(region)?
            .descriptors()
            .mobile()?
            .example()?;
        // Report digits the way a parsed national number would.
        example.parse::<u64>().ok().map(|digits| digits.to_string())
    }

    fn supported_calling_codes(&self) -> &[u16] {
        &self.calling_codes
    }

    fn region_for_calling_code(&self, calling_code: u16) -> Option<String> {
        DATABASE
            .by_code(&calling_code)?
            .first()
            .map(|metadata| metadata.id().to_string())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
