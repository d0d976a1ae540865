use std::fmt;
use std::str::FromStr;
use num_bigint::BigUint;
use crate::paillier::p_keygen::p_keys::parse_decimal;
use crate::crypto_error::CryptoError;

/// Chiffré Paillier : élément de Z/n²Z.
///
/// Échangé tel quel ou sous sa forme décimale canonique (`Display` / `FromStr`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ciphertext(BigUint);

impl Ciphertext {
    pub fn new(value: BigUint) -> Self {
        Ciphertext(value)
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }
}

impl From<BigUint> for Ciphertext {
    fn from(value: BigUint) -> Self {
        Ciphertext(value)
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Ciphertext {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s).map(Ciphertext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_round_trip() {
        let c: Ciphertext = "123456789012345678901234567890".parse().unwrap();
        assert_eq!(c.to_string(), "123456789012345678901234567890");
        assert_eq!(c.clone().into_inner(), *c.value());
    }

    #[test]
    fn test_rejects_non_decimal() {
        assert!(matches!("0xFF".parse::<Ciphertext>(), Err(CryptoError::Parse(_))));
        assert!(matches!("-12".parse::<Ciphertext>(), Err(CryptoError::Parse(_))));
    }
}
