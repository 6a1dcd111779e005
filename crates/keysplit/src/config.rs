//! sharing configuration loaded from toml
//!
//! ```toml
//! threshold = 3
//! participants = 5
//! verify_extra_shares = true
//!
//! [field]
//! kind = "prime"
//! modulus = "1125899906842679"
//! ```

use std::path::Path;

use keysplit_fields::FieldVariant;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::reconstruct::ReconstructOptions;
use crate::share::SplitParams;
use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharingConfig {
    /// shares needed to reconstruct
    pub threshold: usize,
    /// shares handed out
    pub participants: usize,
    /// check shares beyond the threshold for consistency
    #[serde(default = "default_verify")]
    pub verify_extra_shares: bool,
    pub field: FieldConfig,
}

/// Field selection. The prime modulus is a decimal string so it is not
/// limited to toml's 64-bit integers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldConfig {
    Gf8,
    Gf16,
    Prime { modulus: String },
}

fn default_verify() -> bool {
    true
}

impl SharingConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// The configured field; a prime modulus is parsed and checked here.
    pub fn field_variant(&self) -> Result<FieldVariant> {
        match &self.field {
            FieldConfig::Gf8 => Ok(FieldVariant::Gf8),
            FieldConfig::Gf16 => Ok(FieldVariant::Gf16),
            FieldConfig::Prime { modulus } => {
                let modulus = BigUint::parse_bytes(modulus.trim().as_bytes(), 10).ok_or_else(|| {
                    Error::Config(format!("modulus {:?} is not a decimal integer", modulus))
                })?;
                Ok(FieldVariant::prime(modulus)?)
            }
        }
    }

    /// Threshold and participant count, validated against the field.
    pub fn split_params(&self) -> Result<SplitParams> {
        let params = SplitParams::new(self.threshold, self.participants);
        params.validate(&self.field_variant()?)?;
        Ok(params)
    }

    pub fn reconstruct_options(&self) -> ReconstructOptions {
        ReconstructOptions {
            verify_extra_shares: self.verify_extra_shares,
        }
    }
}
