use thiserror::Error;

#[derive(Debug, Error)]
pub enum PixError {
    #[error("value for tag {tag} is {length} characters; a two-digit length field holds at most 99")]
    ValueTooLong { tag: String, length: usize },

    #[error("invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("{field} not found in PIX code")]
    NotFound { field: &'static str },

    #[error("malformed PIX code at offset {offset}: {reason}")]
    Malformed { offset: usize, reason: String },

    #[error("checksum mismatch: computed {expected}, code carries {found}")]
    ChecksumMismatch { expected: String, found: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PixError {
    pub(crate) fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            offset,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_amount(reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ValueTooLong { .. } => "E_VALUE_TOO_LONG",
            Self::InvalidAmount { .. } => "E_INVALID_AMOUNT",
            Self::NotFound { .. } => "E_NOT_FOUND",
            Self::Malformed { .. } => "E_MALFORMED",
            Self::ChecksumMismatch { .. } => "E_CHECKSUM_MISMATCH",
            Self::Json(_) => "E_JSON",
        }
    }
}

pub type Result<T> = std::result::Result<T, PixError>;

#[cfg(test)]
mod tests {
    use super::PixError;

    #[test]
    fn codes_are_stable() {
        let err = PixError::NotFound { field: "amount" };
        assert_eq!(err.code(), "E_NOT_FOUND");
        assert_eq!(err.to_string(), "amount not found in PIX code");

        let err = PixError::malformed(4, "length is not numeric");
        assert_eq!(err.code(), "E_MALFORMED");
        assert_eq!(
            err.to_string(),
            "malformed PIX code at offset 4: length is not numeric"
        );
    }
}
