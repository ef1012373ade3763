//! Short code generation.

use rand::{Rng, distr::Alphanumeric};

use crate::utils::validation::CODE_LENGTH;

/// Generates a random six-character code from `[A-Za-z0-9]`.
///
/// Draws from the thread-local CSPRNG, giving 62^6 (about 5.7e10) possible codes.
///
/// # Examples
///
/// ```
/// use linkgate::utils::code_generator::generate_code;
/// use linkgate::utils::validation::is_valid_code;
///
/// let code = generate_code();
/// assert!(is_valid_code(&code));
/// ```
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::is_valid_code;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        assert_eq!(generate_code().len(), CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_alphabet() {
        for _ in 0..200 {
            let code = generate_code();
            assert!(is_valid_code(&code), "generated invalid code {code}");
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code()).collect();
        // Birthday bound for 1000 draws over 62^6 is ~1e-5.
        assert!(codes.len() >= 999);
    }
}
