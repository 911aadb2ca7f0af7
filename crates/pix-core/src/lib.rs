//! # PIX Core
//!
//! Encoder and decoder for PIX payment codes, the EMV QR merchant-presented
//! text format used by Brazil's instant payment scheme.
//!
//! ## Example
//!
//! ```
//! use pix_core::{decode, encode, Amount, PaymentRequest};
//!
//! let request = PaymentRequest::new("key@example.com", Amount::from_reais(10.5)?)
//!     .with_name("john silva");
//! let code = encode(&request)?;
//! assert!(code.starts_with("000201"));
//!
//! let decoded = decode(&code)?;
//! assert_eq!(decoded.address, "key@example.com");
//! assert_eq!(decoded.amount, 10.5);
//! assert_eq!(decoded.name, "John Silva");
//! # Ok::<(), pix_core::PixError>(())
//! ```

#![forbid(unsafe_code)]

pub mod crc;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod ids;
pub mod normalize;
pub mod tlv;
pub mod types;

pub use decoder::{decode, get_address, get_amount, get_name, parse};
pub use encoder::{encode, encode_pix};
pub use error::{PixError, Result};
pub use normalize::normalize_merchant_name;
pub use types::{Amount, DecodedPix, InitiationMethod, ParsedPix, PaymentRequest};
