//! Password reset code value object.

use argon2::password_hash::rand_core::{OsRng, RngCore};

use crate::config::{RESET_CODE_ALPHABET, RESET_CODE_LENGTH};

/// Short code emailed to a user during the password reset flow.
///
/// Always `RESET_CODE_LENGTH` characters drawn from `[0-9A-Z]`. Bytes come
/// from the OS random source; the modulo mapping onto the 36-symbol
/// alphabet carries a negligible bias at this alphabet size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetCode(String);

impl ResetCode {
    /// Generate a fresh code.
    pub fn generate() -> Self {
        let mut bytes = [0u8; RESET_CODE_LENGTH];
        OsRng.fill_bytes(&mut bytes);

        let code = bytes
            .iter()
            .map(|b| RESET_CODE_ALPHABET[*b as usize % RESET_CODE_ALPHABET.len()] as char)
            .collect();

        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ResetCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_have_fixed_length() {
        for _ in 0..64 {
            assert_eq!(ResetCode::generate().as_str().len(), RESET_CODE_LENGTH);
        }
    }

    #[test]
    fn codes_only_use_digits_and_uppercase_letters() {
        for _ in 0..64 {
            let code = ResetCode::generate();
            assert!(code
                .as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        }
    }
}
