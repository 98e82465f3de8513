//! Per-run configuration: vendor identity, jurisdiction, enabled checkers,
//! and policy thresholds.
use crate::report::ValidatorName;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Jurisdiction selected for the run. Drives the expected state code of
/// the tax-identifier check.
///
/// # Examples
/// ```rust
/// use std::str::FromStr;
/// use asnval_core::config::Jurisdiction;
///
/// let state = Jurisdiction::from_str("maharashtra")?;
/// assert_eq!(state.code(), "27");
/// # Ok::<(), asnval_core::config::JurisdictionParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Jurisdiction {
    Maharashtra,
    Gujarat,
    Karnataka,
    TamilNadu,
    Telangana,
    AndhraPradesh,
    WestBengal,
    UttarPradesh,
    Rajasthan,
    Haryana,
    Delhi,
    Punjab,
}

/// Error returned when parsing a [`Jurisdiction`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JurisdictionParseError {
    #[error("unknown jurisdiction: {input}")]
    Unknown { input: String },
}

impl FromStr for Jurisdiction {
    type Err = JurisdictionParseError;
    fn from_str(s: &str) -> Result<Jurisdiction, JurisdictionParseError> {
        match s.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "maharashtra" => Ok(Jurisdiction::Maharashtra),
            "gujarat" => Ok(Jurisdiction::Gujarat),
            "karnataka" => Ok(Jurisdiction::Karnataka),
            "tamil_nadu" => Ok(Jurisdiction::TamilNadu),
            "telangana" => Ok(Jurisdiction::Telangana),
            "andhra_pradesh" => Ok(Jurisdiction::AndhraPradesh),
            "west_bengal" => Ok(Jurisdiction::WestBengal),
            "uttar_pradesh" => Ok(Jurisdiction::UttarPradesh),
            "rajasthan" => Ok(Jurisdiction::Rajasthan),
            "haryana" => Ok(Jurisdiction::Haryana),
            "delhi" => Ok(Jurisdiction::Delhi),
            "punjab" => Ok(Jurisdiction::Punjab),
            _ => Err(JurisdictionParseError::Unknown {
                input: s.to_string(),
            }),
        }
    }
}

impl Jurisdiction {
    /// Two-digit GST state code embedded in tax identifiers.
    pub fn code(&self) -> &'static str {
        match self {
            Jurisdiction::Maharashtra => "27",
            Jurisdiction::Gujarat => "24",
            Jurisdiction::Karnataka => "29",
            Jurisdiction::TamilNadu => "33",
            Jurisdiction::Telangana => "36",
            Jurisdiction::AndhraPradesh => "37",
            Jurisdiction::WestBengal => "19",
            Jurisdiction::UttarPradesh => "09",
            Jurisdiction::Rajasthan => "08",
            Jurisdiction::Haryana => "06",
            Jurisdiction::Delhi => "07",
            Jurisdiction::Punjab => "03",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Jurisdiction::Maharashtra => "Maharashtra",
            Jurisdiction::Gujarat => "Gujarat",
            Jurisdiction::Karnataka => "Karnataka",
            Jurisdiction::TamilNadu => "Tamil Nadu",
            Jurisdiction::Telangana => "Telangana",
            Jurisdiction::AndhraPradesh => "Andhra Pradesh",
            Jurisdiction::WestBengal => "West Bengal",
            Jurisdiction::UttarPradesh => "Uttar Pradesh",
            Jurisdiction::Rajasthan => "Rajasthan",
            Jurisdiction::Haryana => "Haryana",
            Jurisdiction::Delhi => "Delhi",
            Jurisdiction::Punjab => "Punjab",
        }
    }
}

/// Full GST state-code registry (01-38). Used to tell "valid state code
/// that does not match the configured jurisdiction" apart from "not a
/// state code at all".
pub fn state_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "01" => "Jammu and Kashmir",
        "02" => "Himachal Pradesh",
        "03" => "Punjab",
        "04" => "Chandigarh",
        "05" => "Uttarakhand",
        "06" => "Haryana",
        "07" => "Delhi",
        "08" => "Rajasthan",
        "09" => "Uttar Pradesh",
        "10" => "Bihar",
        "11" => "Sikkim",
        "12" => "Arunachal Pradesh",
        "13" => "Nagaland",
        "14" => "Manipur",
        "15" => "Mizoram",
        "16" => "Tripura",
        "17" => "Meghalaya",
        "18" => "Assam",
        "19" => "West Bengal",
        "20" => "Jharkhand",
        "21" => "Odisha",
        "22" => "Chhattisgarh",
        "23" => "Madhya Pradesh",
        "24" => "Gujarat",
        "25" => "Daman and Diu",
        "26" => "Dadra and Nagar Haveli",
        "27" => "Maharashtra",
        "28" => "Andhra Pradesh",
        "29" => "Karnataka",
        "30" => "Goa",
        "31" => "Lakshadweep",
        "32" => "Kerala",
        "33" => "Tamil Nadu",
        "34" => "Puducherry",
        "35" => "Andaman and Nicobar Islands",
        "36" => "Telangana",
        "37" => "Andhra Pradesh",
        "38" => "Ladakh",
        _ => return None,
    };
    Some(name)
}

bitflags! {
    /// The set of checkers enabled for a run.
    ///
    /// # Examples
    /// ```rust
    /// use asnval_core::config::ValidatorSet;
    ///
    /// let set = ValidatorSet::all() - ValidatorSet::CERTIFICATE;
    /// assert!(set.contains(ValidatorSet::STRUCTURE));
    /// assert!(!set.contains(ValidatorSet::CERTIFICATE));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ValidatorSet: u8 {
        const STRUCTURE = 0b00001;
        const TAX_ID = 0b00010;
        const PRODUCT = 0b00100;
        const TIMING = 0b01000;
        const CERTIFICATE = 0b10000;
    }
}

impl ValidatorSet {
    pub fn contains_validator(&self, name: ValidatorName) -> bool {
        let flag = match name {
            ValidatorName::Structure => ValidatorSet::STRUCTURE,
            ValidatorName::TaxId => ValidatorSet::TAX_ID,
            ValidatorName::Product => ValidatorSet::PRODUCT,
            ValidatorName::Timing => ValidatorSet::TIMING,
            ValidatorName::Certificate => ValidatorSet::CERTIFICATE,
        };
        self.contains(flag)
    }
}

impl Default for ValidatorSet {
    fn default() -> Self {
        ValidatorSet::all()
    }
}

/// Submission-timing thresholds, in hours.
///
/// A shipment notice must be submitted within `window_hours` before the
/// ship time. Earlier submission is advisory up to `hard_ceiling_hours`,
/// beyond which it blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingPolicy {
    pub window_hours: i64,
    pub hard_ceiling_hours: i64,
}

impl Default for TimingPolicy {
    fn default() -> Self {
        TimingPolicy {
            window_hours: 24,
            hard_ceiling_hours: 48,
        }
    }
}

/// Transmission-certificate expiry thresholds, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificatePolicy {
    pub warning_horizon_days: i64,
}

impl Default for CertificatePolicy {
    fn default() -> Self {
        CertificatePolicy {
            warning_horizon_days: 7,
        }
    }
}

/// Invalid or missing configuration, rejected before any checker runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("configuration field '{field}' must not be blank")]
    BlankField { field: &'static str },
    #[error("timing hard ceiling ({ceiling_hours}h) must not be below the window ({window_hours}h)")]
    CeilingBelowWindow {
        window_hours: i64,
        ceiling_hours: i64,
    },
}

/// Configuration for one validation run. Immutable once handed to the
/// pipeline.
///
/// # Examples
/// ```rust
/// use asnval_core::config::{Jurisdiction, ValidationConfig, ValidatorSet};
///
/// let config = ValidationConfig::new("WMTIN-REL100", "SHP202403150800", Jurisdiction::Maharashtra)
///     .with_enabled(ValidatorSet::all() - ValidatorSet::TIMING);
/// config.validate()?;
/// # Ok::<(), asnval_core::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    vendor_id: String,
    shipment_id: String,
    jurisdiction: Jurisdiction,
    enabled: ValidatorSet,
    expected_category: Option<String>,
    timing: TimingPolicy,
    certificate: CertificatePolicy,
}

impl ValidationConfig {
    pub fn new(
        vendor_id: impl Into<String>,
        shipment_id: impl Into<String>,
        jurisdiction: Jurisdiction,
    ) -> Self {
        ValidationConfig {
            vendor_id: vendor_id.into(),
            shipment_id: shipment_id.into(),
            jurisdiction,
            enabled: ValidatorSet::default(),
            expected_category: None,
            timing: TimingPolicy::default(),
            certificate: CertificatePolicy::default(),
        }
    }

    pub fn with_enabled(mut self, enabled: ValidatorSet) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_expected_category(mut self, category: impl Into<String>) -> Self {
        self.expected_category = Some(category.into());
        self
    }

    pub fn with_timing(mut self, timing: TimingPolicy) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_certificate(mut self, certificate: CertificatePolicy) -> Self {
        self.certificate = certificate;
        self
    }

    /// Reject configurations the pipeline must not run with.
    ///
    /// # Errors
    /// Returns [`ConfigError`] for blank identifiers or a timing ceiling
    /// below the window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vendor_id.trim().is_empty() {
            return Err(ConfigError::BlankField { field: "vendor_id" });
        }
        if self.shipment_id.trim().is_empty() {
            return Err(ConfigError::BlankField {
                field: "shipment_id",
            });
        }
        if self.timing.hard_ceiling_hours < self.timing.window_hours {
            return Err(ConfigError::CeilingBelowWindow {
                window_hours: self.timing.window_hours,
                ceiling_hours: self.timing.hard_ceiling_hours,
            });
        }
        Ok(())
    }

    pub fn vendor_id(&self) -> &str {
        &self.vendor_id
    }

    pub fn shipment_id(&self) -> &str {
        &self.shipment_id
    }

    pub fn jurisdiction(&self) -> Jurisdiction {
        self.jurisdiction
    }

    pub fn enabled(&self) -> ValidatorSet {
        self.enabled
    }

    pub fn expected_category(&self) -> Option<&str> {
        self.expected_category.as_deref()
    }

    pub fn timing(&self) -> TimingPolicy {
        self.timing
    }

    pub fn certificate(&self) -> CertificatePolicy {
        self.certificate
    }
}
