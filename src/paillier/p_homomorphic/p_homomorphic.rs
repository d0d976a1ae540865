use log::debug;
use num_bigint::{BigInt, BigUint};
use num_traits::One;
use crate::paillier::ciphertext::Ciphertext;
use crate::paillier::math::{mod_inverse, reduce_mod};
use crate::paillier::p_keygen::PublicKey;
use crate::crypto_error::CryptoError;

// ============================================================================
// Opérations homomorphes — clé publique uniquement, sans déchiffrement
//
//   Enc(m1) · Enc(m2)        -> Enc(m1 + m2)
//   Enc(m1) · Enc(m2)^-1     -> Enc(m1 - m2)
//   Enc(m)^k                 -> Enc(k · m)
//
// Les résultats se lisent modulo n puis recentrés : une somme qui sort de
// (-n/2, n/2) se replie.
// ============================================================================
impl PublicKey {
    /// Produit de tous les chiffrés mod n², en partant de 1.
    ///
    /// Sans opérande, renvoie 1 : cas dégénéré (1 ne chiffre 0 qu'avec r = 1,
    /// jamais tiré par `encrypt`).
    pub fn addition(&self, ciphertexts: &[Ciphertext]) -> Ciphertext {
        if ciphertexts.is_empty() {
            debug!("addition homomorphe sans opérande : identité 1 renvoyée");
        }

        let product = ciphertexts
            .iter()
            .fold(BigUint::one(), |acc, c| (acc * c.value()) % &self.n_squared);

        Ciphertext::from(product)
    }

    /// c1 · c2^-1 mod n².
    ///
    /// Err(NoModularInverse) si c2 n'est pas inversible mod n² (chiffré
    /// corrompu ou produit avec une autre clé).
    pub fn subtraction(&self, c1: &Ciphertext, c2: &Ciphertext) -> Result<Ciphertext, CryptoError> {
        let c2_inv = mod_inverse(c2.value(), &self.n_squared)?;
        Ok(Ciphertext::from((c1.value() * c2_inv) % &self.n_squared))
    }

    /// c^(k mod n) mod n², k scalaire en clair.
    ///
    /// Aucun contrôle de plage sur k : il est réduit modulo n, un k négatif
    /// ou hors plage se replie donc silencieusement. Pour k hors de [0, n),
    /// le chiffré diffère de c^k mod n² mais se déchiffre en la même valeur.
    pub fn multiply(&self, c: &Ciphertext, k: &BigInt) -> Ciphertext {
        let exponent = reduce_mod(k, &self.n);
        Ciphertext::from(c.value().modpow(&exponent, &self.n_squared))
    }
}
