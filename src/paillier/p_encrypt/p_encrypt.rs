use log::trace;
use num_bigint::{BigInt, BigUint, RandBigInt};
use num_traits::One;
use rand_core::{CryptoRng, OsRng, RngCore};
use crate::paillier::ciphertext::Ciphertext;
use crate::paillier::math::reduce_mod;
use crate::paillier::p_keygen::PublicKey;
use crate::crypto_error::CryptoError;

impl PublicKey {
    /// Plus grande valeur absolue chiffrable : floor(n/2).
    pub fn max_plaintext(&self) -> BigUint {
        &self.n >> 1u32
    }

    /// m est dans (-n/2, n/2), c'est-à-dire |m| <= floor(n/2) pour n impair.
    ///
    /// On applique n/2 et non n/4 : les valeurs entre n/4 et n/2 sont
    /// acceptées, mais une somme homomorphe qui sort de (-n/2, n/2) se
    /// replie modulo n au déchiffrement.
    pub fn in_plaintext_range(&self, m: &BigInt) -> bool {
        m.magnitude() <= &self.max_plaintext()
    }

    // -----------------------------------------------------------------------
    // Chiffrement Paillier : c = g^m * r^n  mod n²
    //
    // Retourne Err(CryptoError::MessageOutOfRange) si m est hors de
    // (-n/2, n/2). Deux appels avec le même m donnent des chiffrés distincts.
    // -----------------------------------------------------------------------
    pub fn encrypt(&self, m: &BigInt) -> Result<Ciphertext, CryptoError> {
        let mut rng = OsRng;
        self.encrypt_with_rng(m, &mut rng)
    }

    pub fn encrypt_with_rng<R: RngCore + CryptoRng + ?Sized>(
        &self,
        m: &BigInt,
        rng: &mut R,
    ) -> Result<Ciphertext, CryptoError> {
        if !self.in_plaintext_range(m) {
            return Err(CryptoError::MessageOutOfRange);
        }

        // r = 0 et r = 1 ne masquent rien
        let r = loop {
            let candidate = rng.gen_biguint_below(&self.n);
            if candidate > BigUint::one() {
                break candidate;
            }
            trace!("facteur d'aveuglement r = {} rejeté", candidate);
        };

        // Plaintext négatif : exposant ramené dans [0, n)
        let exponent = reduce_mod(m, &self.n);

        let g_m = self.g.modpow(&exponent, &self.n_squared);
        let r_n = r.modpow(&self.n, &self.n_squared);

        Ok(Ciphertext::from((g_m * r_n) % &self.n_squared))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::paillier::p_keygen::KeyPair;

    fn fixed_keypair(simple: bool) -> KeyPair {
        let mut rng = StdRng::seed_from_u64(17);
        KeyPair::from_primes_with_rng(
            BigUint::from(u64::MAX - 58),
            BigUint::from(u64::MAX - 82),
            simple,
            &mut rng,
        )
        .unwrap()
    }

    #[test]
    fn test_encrypt_is_probabilistic() {
        let kp = fixed_keypair(false);
        let m = BigInt::from(5);
        let c1 = kp.public_key.encrypt(&m).unwrap();
        let c2 = kp.public_key.encrypt(&m).unwrap();

        assert_ne!(c1, c2);
        assert_eq!(kp.private_key.decrypt(&c1), m);
        assert_eq!(kp.private_key.decrypt(&c2), m);
    }

    #[test]
    fn test_encrypt_output_in_ciphertext_space() {
        let kp = fixed_keypair(true);
        for v in [-3i64, 0, 1, 1 << 40] {
            let c = kp.public_key.encrypt(&BigInt::from(v)).unwrap();
            assert!(c.value() < kp.public_key.n_squared());
        }
    }

    #[test]
    fn test_encrypt_with_seeded_rng_is_reproducible() {
        let kp = fixed_keypair(false);
        let m = BigInt::from(-7);
        let c1 = kp.public_key.encrypt_with_rng(&m, &mut StdRng::seed_from_u64(1)).unwrap();
        let c2 = kp.public_key.encrypt_with_rng(&m, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(c1, c2);
    }

    #[test]
    fn test_range_boundaries() {
        let kp = fixed_keypair(false);
        let pk = &kp.public_key;
        let half = BigInt::from(pk.max_plaintext());
        let one = BigInt::from(1);

        // floor(n/2) et -floor(n/2) sont dans (-n/2, n/2)
        for m in [half.clone(), -half.clone()] {
            let c = pk.encrypt(&m).unwrap();
            assert_eq!(kp.private_key.decrypt(&c), m);
        }

        assert_eq!(pk.encrypt(&(&half + &one)), Err(CryptoError::MessageOutOfRange));
        assert_eq!(pk.encrypt(&(-&half - &one)), Err(CryptoError::MessageOutOfRange));
    }

    #[test]
    fn test_values_between_quarter_and_half_are_accepted() {
        // Certaines documentations annoncent (-n/4, n/4) ; la borne appliquée est n/2
        let kp = fixed_keypair(true);
        let pk = &kp.public_key;
        let quarter = BigInt::from(pk.n() >> 2u32);
        let m = &quarter + BigInt::from(12345);
        assert!(m < BigInt::from(pk.max_plaintext()));

        let c = pk.encrypt(&m).unwrap();
        assert_eq!(kp.private_key.decrypt(&c), m);
        let c = pk.encrypt(&-&m).unwrap();
        assert_eq!(kp.private_key.decrypt(&c), -m);
    }
}
