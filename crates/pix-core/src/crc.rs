//! Trailing CRC-16 field of a PIX code.
//!
//! The register is the XModem one (poly 0x1021, no reflection, no final
//! XOR) seeded with 0xFFFF instead of zero, which the catalogue lists as
//! CRC-16/IBM-3740.

use crc::{Crc, CRC_16_IBM_3740};

use crate::error::{PixError, Result};
use crate::ids::CRC16_PREFIX;

const PIX_CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

const CHECKSUM_HEX_LEN: usize = 4;

/// CRC over the UTF-8 bytes of `data`.
pub fn checksum(data: &str) -> u16 {
    PIX_CRC.checksum(data.as_bytes())
}

/// [`checksum`] rendered as four uppercase hex digits.
pub fn checksum_hex(data: &str) -> String {
    format!("{:04X}", checksum(data))
}

/// Checks that `code` ends with a `6304` field whose value matches the CRC
/// of everything before it.
pub fn verify(code: &str) -> Result<()> {
    let split = code
        .len()
        .checked_sub(CHECKSUM_HEX_LEN)
        .filter(|&at| code.is_char_boundary(at))
        .ok_or(PixError::NotFound { field: "checksum" })?;
    let (covered, found) = code.split_at(split);

    if !covered.ends_with(CRC16_PREFIX) {
        return Err(PixError::NotFound { field: "checksum" });
    }
    if !found.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(PixError::malformed(
            split,
            format!("checksum '{found}' is not hexadecimal"),
        ));
    }

    let expected = checksum_hex(covered);
    if !expected.eq_ignore_ascii_case(found) {
        return Err(PixError::ChecksumMismatch {
            expected,
            found: found.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{checksum, checksum_hex, verify};
    use crate::error::PixError;

    #[test]
    fn matches_catalogue_check_value() {
        assert_eq!(checksum("123456789"), 0x29B1);
    }

    #[test]
    fn empty_input_returns_seed() {
        assert_eq!(checksum(""), 0xFFFF);
    }

    #[test]
    fn renders_uppercase_zero_padded() {
        let hex = checksum_hex("123456789");
        assert_eq!(hex, "29B1");

        for sample in ["", "a", "6304", "000201"] {
            let hex = checksum_hex(sample);
            assert_eq!(hex.len(), 4);
            assert!(hex
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn single_character_edit_changes_checksum() {
        let base = "00020126360014BR.GOV.BCB.PIX0114+55119999999996304";
        let original = checksum(base);
        for index in 0..base.len() {
            let mut edited = base.as_bytes().to_vec();
            edited[index] = if edited[index] == b'0' { b'1' } else { b'0' };
            let edited = String::from_utf8(edited).unwrap();
            assert_ne!(checksum(&edited), original, "edit at {index} collided");
        }
    }

    #[test]
    fn verify_accepts_matching_trailer() {
        let covered = "0002015802BR6304";
        let code = format!("{covered}{}", checksum_hex(covered));
        assert!(verify(&code).is_ok());
    }

    #[test]
    fn verify_accepts_lowercase_hex() {
        let covered = "0002015802BR6304";
        let code = format!("{covered}{}", checksum_hex(covered).to_ascii_lowercase());
        assert!(verify(&code).is_ok());
    }

    #[test]
    fn verify_reports_mismatch() {
        let covered = "0002015802BR6304";
        let good = checksum_hex(covered);
        let bad = if good == "0000" { "0001" } else { "0000" };
        let err = verify(&format!("{covered}{bad}")).unwrap_err();
        assert!(matches!(
            err,
            PixError::ChecksumMismatch { ref expected, ref found } if *expected == good && found == bad
        ));
    }

    #[test]
    fn verify_requires_trailer() {
        assert!(matches!(
            verify("0002015802BR"),
            Err(PixError::NotFound { field: "checksum" })
        ));
        assert!(matches!(
            verify("abc"),
            Err(PixError::NotFound { field: "checksum" })
        ));
        assert!(matches!(
            verify("0002016304ZZZZ"),
            Err(PixError::Malformed { offset: 10, .. })
        ));
    }
}
