//! Builds PIX code strings from a [`PaymentRequest`].

use crate::crc::checksum_hex;
use crate::error::Result;
use crate::ids::*;
use crate::normalize::normalize_merchant_name;
use crate::tlv::frame;
use crate::types::{Amount, PaymentRequest};

/// Encodes `request` into a PIX code, checksum included.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip(request), fields(address_len = request.address.len(), amount = %request.amount))
)]
pub fn encode(request: &PaymentRequest) -> Result<String> {
    let mut code = frame(ID_PAYLOAD_FORMAT_INDICATOR, PAYLOAD_FORMAT_VERSION)?;
    if let Some(initiation) = request.initiation {
        code += &frame(ID_POINT_OF_INITIATION_METHOD, initiation.as_str())?;
    }

    code += &frame(
        ID_MERCHANT_ACCOUNT_INFORMATION,
        &merchant_account_information(request)?,
    )?;
    code += &frame(ID_MERCHANT_CATEGORY_CODE, MERCHANT_CATEGORY_CODE)?;
    code += &frame(ID_TRANSACTION_CURRENCY, CURRENCY_BRL)?;
    code += &frame(ID_TRANSACTION_AMOUNT, &request.amount.to_decimal_string())?;
    code += &frame(ID_COUNTRY_CODE, COUNTRY_CODE_BR)?;
    code += &frame(ID_MERCHANT_NAME, &normalize_merchant_name(&request.name))?;
    code += &frame(ID_MERCHANT_CITY, &request.city)?;
    if let Some(postal_code) = &request.postal_code {
        code += &frame(ID_POSTAL_CODE, postal_code)?;
    }
    code += &frame(
        ID_ADDITIONAL_DATA_FIELD_TEMPLATE,
        &additional_data_field_template(request.txid.as_deref())?,
    )?;
    code += CRC16_PREFIX;

    let crc = checksum_hex(&code);
    code += &crc;

    #[cfg(feature = "tracing")]
    tracing::debug!(code_len = code.len(), crc = %crc, "encoded pix code");

    Ok(code)
}

/// Positional form of [`encode`]: address, amount in reais, name, city,
/// transaction id and label.
pub fn encode_pix(
    address: &str,
    amount: f64,
    name: &str,
    city: &str,
    txid: Option<&str>,
    label: Option<&str>,
) -> Result<String> {
    let mut request = PaymentRequest::new(address, Amount::from_reais(amount)?)
        .with_name(name)
        .with_city(city);
    request.txid = txid.map(str::to_string);
    request.label = label.map(str::to_string);
    encode(&request)
}

fn merchant_account_information(request: &PaymentRequest) -> Result<String> {
    let mut value = frame(ID_MERCHANT_ACCOUNT_INFORMATION_GUI, PIX_GUI)?;
    value += &frame(ID_MERCHANT_ACCOUNT_INFORMATION_KEY, &request.address)?;
    if let Some(label) = request.label.as_deref().filter(|label| !label.is_empty()) {
        value += &frame(ID_MERCHANT_ACCOUNT_INFORMATION_DESCRIPTION, label)?;
    }
    Ok(value)
}

fn additional_data_field_template(txid: Option<&str>) -> Result<String> {
    let txid = txid.filter(|txid| !txid.is_empty()).unwrap_or(TXID_PLACEHOLDER);
    frame(ID_ADDITIONAL_DATA_FIELD_TEMPLATE_TXID, txid)
}
