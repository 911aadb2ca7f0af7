use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PixError, Result};
use crate::ids::DEFAULT_MERCHANT_CITY;

pub const CENTAVOS_PER_REAL: u64 = 100;
/// Largest amount that fits the 13-character EMV amount field
/// ("9999999999.99").
pub const CENTAVOS_MAX: u64 = 999_999_999_999;

/// Monetary value in BRL, held as integer centavos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_centavos(centavos: u64) -> Result<Self> {
        if centavos > CENTAVOS_MAX {
            return Err(PixError::invalid_amount(format!(
                "{centavos} centavos exceeds the maximum of {CENTAVOS_MAX}"
            )));
        }
        Ok(Self(centavos))
    }

    /// Rounds `reais` to two decimals the way `{:.2}` formatting does:
    /// from the exact binary value, ties to even.
    pub fn from_reais(reais: f64) -> Result<Self> {
        if !reais.is_finite() {
            return Err(PixError::invalid_amount("amount must be a finite number"));
        }
        if reais < 0.0 {
            return Err(PixError::invalid_amount("amount must not be negative"));
        }
        if reais == 0.0 {
            // Also catches -0.0, which formats with a sign.
            return Ok(Self::ZERO);
        }

        Self::from_decimal_str(&format!("{reais:.2}"))
    }

    /// Parses a decimal string such as `"12"`, `"12.5"` or `"12.50"`.
    pub fn from_decimal_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PixError::invalid_amount("amount is empty"));
        }
        if trimmed.starts_with('-') || trimmed.starts_with('+') {
            return Err(PixError::invalid_amount("amount must not carry a sign"));
        }

        let (whole_str, frac_str) = match trimmed.split_once('.') {
            Some((whole, frac)) => (whole, Some(frac)),
            None => (trimmed, None),
        };
        if whole_str.is_empty() || !all_digits(whole_str) {
            return Err(PixError::invalid_amount(format!(
                "'{trimmed}' is not a decimal number"
            )));
        }

        let frac = match frac_str {
            None => 0,
            Some(frac) => {
                if frac.is_empty() || !all_digits(frac) {
                    return Err(PixError::invalid_amount(format!(
                        "'{trimmed}' is not a decimal number"
                    )));
                }
                if frac.len() > 2 {
                    return Err(PixError::invalid_amount(format!(
                        "'{trimmed}' has more than 2 decimal places"
                    )));
                }
                let padded = format!("{frac:0<2}");
                parse_digits(&padded)?
            }
        };

        let whole = parse_digits(whole_str)?;
        let centavos = whole
            .checked_mul(CENTAVOS_PER_REAL)
            .and_then(|value| value.checked_add(frac))
            .ok_or_else(|| PixError::invalid_amount("amount overflows"))?;
        Self::from_centavos(centavos)
    }

    pub const fn as_centavos(&self) -> u64 {
        self.0
    }

    pub fn as_reais(&self) -> f64 {
        self.0 as f64 / CENTAVOS_PER_REAL as f64
    }

    /// Two-decimal rendering with a `.` separator, e.g. `"12.00"`.
    pub fn to_decimal_string(&self) -> String {
        format!(
            "{}.{:02}",
            self.0 / CENTAVOS_PER_REAL,
            self.0 % CENTAVOS_PER_REAL
        )
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl FromStr for Amount {
    type Err = PixError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_decimal_str(s)
    }
}

impl TryFrom<String> for Amount {
    type Error = PixError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_decimal_str(&value)
    }
}

impl From<Amount> for String {
    fn from(value: Amount) -> Self {
        value.to_decimal_string()
    }
}

impl TryFrom<f64> for Amount {
    type Error = PixError;

    fn try_from(value: f64) -> Result<Self> {
        Self::from_reais(value)
    }
}

/// Point of initiation method (tag `01`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitiationMethod {
    /// Reusable code.
    Static,
    /// Single-use code.
    Dynamic,
}

impl InitiationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            InitiationMethod::Static => "11",
            InitiationMethod::Dynamic => "12",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "11" => Some(InitiationMethod::Static),
            "12" => Some(InitiationMethod::Dynamic),
            _ => None,
        }
    }
}

/// Everything the encoder needs to build one PIX code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Merchant PIX key: phone, e-mail, CPF/CNPJ or random key.
    pub address: String,
    pub amount: Amount,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_city")]
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiation: Option<InitiationMethod>,
}

impl PaymentRequest {
    pub fn new(address: impl Into<String>, amount: Amount) -> Self {
        Self {
            address: address.into(),
            amount,
            name: String::new(),
            city: default_city(),
            txid: None,
            label: None,
            postal_code: None,
            initiation: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_txid(mut self, txid: impl Into<String>) -> Self {
        self.txid = Some(txid.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    pub fn with_initiation(mut self, initiation: InitiationMethod) -> Self {
        self.initiation = Some(initiation);
        self
    }
}

/// The three fields `decode` pulls out of a code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedPix {
    pub address: String,
    pub amount: f64,
    pub name: String,
}

impl DecodedPix {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Every known field of a PIX code, as returned by `decoder::parse`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedPix {
    pub payload_format: String,
    pub initiation: Option<InitiationMethod>,
    pub gui: String,
    pub address: String,
    pub description: Option<String>,
    pub category_code: String,
    pub currency: String,
    pub amount: Option<f64>,
    pub country: String,
    pub name: String,
    pub city: String,
    pub postal_code: Option<String>,
    pub txid: Option<String>,
    pub checksum: Option<String>,
}

fn default_city() -> String {
    DEFAULT_MERCHANT_CITY.to_string()
}

fn all_digits(input: &str) -> bool {
    input.bytes().all(|byte| byte.is_ascii_digit())
}

fn parse_digits(input: &str) -> Result<u64> {
    input
        .parse::<u64>()
        .map_err(|_| PixError::invalid_amount("amount overflows"))
}
