use serde::{Deserialize, Serialize};

/// Warehouse code, canonicalised to trimmed ASCII uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarehouseCode(String);

impl WarehouseCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Display for WarehouseCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WarehouseCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Static warehouse reference data. Never mutated after seeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub code: WarehouseCode,
    pub name: String,
    pub city: String,
    pub country: String,
}

impl Warehouse {
    pub fn new(
        code: impl AsRef<str>,
        name: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            code: WarehouseCode::new(code),
            name: name.into(),
            city: city.into(),
            country: country.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_canonicalised() {
        assert_eq!(WarehouseCode::new("  blr-a "), WarehouseCode::new("BLR-A"));
        assert_eq!(WarehouseCode::new("pnq-c").as_str(), "PNQ-C");
        assert!(WarehouseCode::new("   ").is_blank());
    }
}
