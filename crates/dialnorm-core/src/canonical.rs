use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalNumber(String);

impl CanonicalNumber {
    pub fn new(country_code: u16, national_number: u64) -> Self {
        Self(format!("+{}{}", country_code, national_number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::CanonicalNumber;

    #[test]
    fn canonical_number_joins_parts_without_separators() {
        let number = CanonicalNumber::new(966, 501_111_111);
        assert_eq!(number.as_str(), "+966501111111");
        assert_eq!(number.to_string(), "+966501111111");
    }
}
