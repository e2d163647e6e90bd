pub mod canonical;
pub mod error;
pub mod libphone;
pub mod normalize;
pub mod oracle;
pub mod region_tz;

pub use canonical::CanonicalNumber;
pub use error::CoreError;
pub use libphone::LibPhoneOracle;
pub use normalize::{repair_zero_lookalikes, Normalized, Normalizer, DEFAULT_MAX_RECOVERY_DEPTH};
pub use oracle::{OracleFault, ParsedNumber, PhoneOracle};
pub use region_tz::{is_region_code, RegionTimezoneIndex};
