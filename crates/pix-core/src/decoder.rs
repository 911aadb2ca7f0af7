//! Reads fields back out of a PIX code.
//!
//! The code is first tokenized into top-level fields by consuming declared
//! lengths; lookups then run against those fields. When a top-level tag
//! appears more than once the last occurrence wins.

use std::ops::RangeInclusive;

use crate::error::{PixError, Result};
use crate::ids::*;
use crate::tlv::{find_last, parse_fields, Field};
use crate::types::{DecodedPix, InitiationMethod, ParsedPix};

/// Tags the EMV layout reserves for merchant account information
/// templates. PIX normally uses 26.
const MERCHANT_ACCOUNT_TAGS: RangeInclusive<u8> = 26..=51;

/// Extracts the PIX key, the amount and the merchant name.
///
/// The checksum is not checked here; see [`crate::crc::verify`].
#[cfg_attr(feature = "tracing", tracing::instrument(skip(code), fields(code_len = code.len())))]
pub fn decode(code: &str) -> Result<DecodedPix> {
    let fields = parse_fields(code)?;
    let decoded = DecodedPix {
        address: account_information(&fields)?.address.to_string(),
        amount: amount_of(&fields)?,
        name: name_of(&fields)?.to_string(),
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(fields = fields.len(), "decoded pix code");

    Ok(decoded)
}

/// PIX key stored next to the `BR.GOV.BCB.PIX` identifier, matched
/// without regard to case.
pub fn get_address(code: &str) -> Result<String> {
    let fields = parse_fields(code)?;
    Ok(account_information(&fields)?.address.to_string())
}

pub fn get_amount(code: &str) -> Result<f64> {
    amount_of(&parse_fields(code)?)
}

pub fn get_name(code: &str) -> Result<String> {
    Ok(name_of(&parse_fields(code)?)?.to_string())
}

/// Reads every known field of `code`.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(code), fields(code_len = code.len())))]
pub fn parse(code: &str) -> Result<ParsedPix> {
    let fields = parse_fields(code)?;
    let account = account_information(&fields)?;

    let initiation = find_last(&fields, ID_POINT_OF_INITIATION_METHOD)
        .map(|field| {
            InitiationMethod::from_code(field.value).ok_or_else(|| {
                PixError::malformed(
                    field.offset,
                    format!("unknown point of initiation method '{}'", field.value),
                )
            })
        })
        .transpose()?;

    let amount = match find_last(&fields, ID_TRANSACTION_AMOUNT) {
        Some(field) => Some(parse_amount(field)?),
        None => None,
    };

    let txid = match find_last(&fields, ID_ADDITIONAL_DATA_FIELD_TEMPLATE) {
        Some(template) => find_last(&template.children()?, ID_ADDITIONAL_DATA_FIELD_TEMPLATE_TXID)
            .map(|field| field.value.to_string()),
        None => None,
    };

    Ok(ParsedPix {
        payload_format: required(&fields, ID_PAYLOAD_FORMAT_INDICATOR, "payload format indicator")?
            .value
            .to_string(),
        initiation,
        gui: account.gui.to_string(),
        address: account.address.to_string(),
        description: account.description.map(str::to_string),
        category_code: required(&fields, ID_MERCHANT_CATEGORY_CODE, "merchant category code")?
            .value
            .to_string(),
        currency: required(&fields, ID_TRANSACTION_CURRENCY, "transaction currency")?
            .value
            .to_string(),
        amount,
        country: required(&fields, ID_COUNTRY_CODE, "country code")?
            .value
            .to_string(),
        name: name_of(&fields)?.to_string(),
        city: required(&fields, ID_MERCHANT_CITY, "merchant city")?
            .value
            .to_string(),
        postal_code: find_last(&fields, ID_POSTAL_CODE).map(|field| field.value.to_string()),
        txid,
        checksum: find_last(&fields, ID_CRC16).map(|field| field.value.to_string()),
    })
}

struct AccountInformation<'a> {
    gui: &'a str,
    address: &'a str,
    description: Option<&'a str>,
}

fn account_information<'a>(fields: &[Field<'a>]) -> Result<AccountInformation<'a>> {
    for template in fields.iter().rev().filter(|field| is_merchant_account_tag(field.tag)) {
        let nested = template.children()?;
        let Some(gui) = find_last(&nested, ID_MERCHANT_ACCOUNT_INFORMATION_GUI)
            .filter(|gui| gui.value.eq_ignore_ascii_case(PIX_GUI))
        else {
            continue;
        };

        let address = find_last(&nested, ID_MERCHANT_ACCOUNT_INFORMATION_KEY)
            .ok_or(PixError::NotFound { field: "address" })?;
        return Ok(AccountInformation {
            gui: gui.value,
            address: address.value,
            description: find_last(&nested, ID_MERCHANT_ACCOUNT_INFORMATION_DESCRIPTION)
                .map(|field| field.value),
        });
    }

    Err(PixError::NotFound { field: "address" })
}

fn is_merchant_account_tag(tag: &str) -> bool {
    tag.parse::<u8>()
        .is_ok_and(|tag| MERCHANT_ACCOUNT_TAGS.contains(&tag))
}

fn amount_of(fields: &[Field<'_>]) -> Result<f64> {
    parse_amount(required(fields, ID_TRANSACTION_AMOUNT, "amount")?)
}

fn name_of<'a>(fields: &[Field<'a>]) -> Result<&'a str> {
    Ok(required(fields, ID_MERCHANT_NAME, "name")?.value)
}

fn required<'a>(fields: &[Field<'a>], tag: &str, field: &'static str) -> Result<Field<'a>> {
    find_last(fields, tag).ok_or(PixError::NotFound { field })
}

/// Accepts `digits`, `digits.digits` and `.digits`.
fn parse_amount(field: Field<'_>) -> Result<f64> {
    let value = field.value;
    let well_formed = match value.split_once('.') {
        Some((whole, frac)) => all_digits(whole) && !frac.is_empty() && all_digits(frac),
        None => !value.is_empty() && all_digits(value),
    };
    if !well_formed {
        return Err(PixError::malformed(
            field.offset + 4,
            format!("amount '{value}' is not a decimal number"),
        ));
    }

    value
        .parse::<f64>()
        .map_err(|err| PixError::malformed(field.offset + 4, format!("amount '{value}': {err}")))
}

fn all_digits(input: &str) -> bool {
    input.bytes().all(|byte| byte.is_ascii_digit())
}
