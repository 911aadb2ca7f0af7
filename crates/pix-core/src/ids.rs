//! Field identifiers and fixed values of the PIX code layout.
//!
//! Tags are two-digit decimal strings as assigned by the Banco Central do
//! Brasil on top of the EMV QR Code merchant-presented layout.

pub const ID_PAYLOAD_FORMAT_INDICATOR: &str = "00";
pub const ID_POINT_OF_INITIATION_METHOD: &str = "01";
pub const ID_MERCHANT_ACCOUNT_INFORMATION: &str = "26";
pub const ID_MERCHANT_ACCOUNT_INFORMATION_GUI: &str = "00";
pub const ID_MERCHANT_ACCOUNT_INFORMATION_KEY: &str = "01";
pub const ID_MERCHANT_ACCOUNT_INFORMATION_DESCRIPTION: &str = "02";
pub const ID_MERCHANT_CATEGORY_CODE: &str = "52";
pub const ID_TRANSACTION_CURRENCY: &str = "53";
pub const ID_TRANSACTION_AMOUNT: &str = "54";
pub const ID_COUNTRY_CODE: &str = "58";
pub const ID_MERCHANT_NAME: &str = "59";
pub const ID_MERCHANT_CITY: &str = "60";
pub const ID_POSTAL_CODE: &str = "61";
pub const ID_ADDITIONAL_DATA_FIELD_TEMPLATE: &str = "62";
pub const ID_ADDITIONAL_DATA_FIELD_TEMPLATE_TXID: &str = "05";
pub const ID_CRC16: &str = "63";

/// Payload format indicator value; always "01".
pub const PAYLOAD_FORMAT_VERSION: &str = "01";
/// Globally unique identifier of the PIX arrangement.
pub const PIX_GUI: &str = "BR.GOV.BCB.PIX";
/// Category code used when the merchant has none.
pub const MERCHANT_CATEGORY_CODE: &str = "0000";
/// ISO 4217 numeric code for BRL.
pub const CURRENCY_BRL: &str = "986";
pub const COUNTRY_CODE_BR: &str = "BR";
pub const DEFAULT_MERCHANT_CITY: &str = "SP";
/// Transaction id placeholder meaning "no reference".
pub const TXID_PLACEHOLDER: &str = "***";
/// Tag and fixed length of the trailing checksum field.
pub const CRC16_PREFIX: &str = "6304";

/// Largest value length a two-digit length field can declare.
pub const MAX_VALUE_LEN: usize = 99;
/// Merchant names are cut to this many characters before casing.
pub const MERCHANT_NAME_MAX_CHARS: usize = 25;
