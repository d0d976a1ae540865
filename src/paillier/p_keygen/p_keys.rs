use std::fmt;
use std::sync::Arc;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{Num, One, Zero};
use zeroize::Zeroize;
use crate::paillier::math::l_function;
use crate::crypto_error::CryptoError;

// ============================================================================
// Clé publique Paillier — immuable après construction
//
// n_squared est calculé une seule fois ici ; aucun champ n'est modifiable,
// donc le cache ne peut jamais diverger de n*n.
// ============================================================================
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) n:         BigUint,
    pub(crate) g:         BigUint,
    pub(crate) n_squared: BigUint,
}

impl PublicKey {
    /// Construit une clé publique à partir de (n, g).
    ///
    /// Retourne :
    ///   Err(InvalidModulus)    si n est pair ou < 3
    ///   Err(InvalidGenerator)  si g n'est pas dans ]0, n²[
    pub fn new(n: BigUint, g: BigUint) -> Result<Self, CryptoError> {
        if n.is_even() || n < BigUint::from(3u32) {
            return Err(CryptoError::InvalidModulus);
        }

        let n_squared = &n * &n;
        if g.is_zero() || g >= n_squared {
            return Err(CryptoError::InvalidGenerator);
        }

        Ok(PublicKey { n, g, n_squared })
    }

    /// Même chose que `new`, à partir des représentations décimales canoniques.
    pub fn from_decimal(n: &str, g: &str) -> Result<Self, CryptoError> {
        Self::new(parse_decimal(n)?, parse_decimal(g)?)
    }

    // Réservé à la génération de clés : n impair et g < n² déjà garantis
    pub(crate) fn from_parts(n: BigUint, g: BigUint, n_squared: BigUint) -> Self {
        debug_assert_eq!(n_squared, &n * &n);
        PublicKey { n, g, n_squared }
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    pub fn g(&self) -> &BigUint {
        &self.g
    }

    pub fn n_squared(&self) -> &BigUint {
        &self.n_squared
    }

    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }
}

// ============================================================================
// Helper : efface les mots internes d'un BigUint
//
// assign_from_slice réécrit le buffer existant avec des zéros avant de le
// tronquer. Au mieux : num-bigint ne donne pas accès direct aux chiffres.
// ============================================================================
fn zeroize_biguint(value: &mut BigUint) {
    let words = value.bits().div_ceil(32) as usize;
    if words > 0 {
        value.assign_from_slice(&vec![0u32; words]);
    }
    value.set_zero();
}

// ============================================================================
// Facteurs premiers p et q — conservés à titre informatif uniquement.
// Le déchiffrement ne les utilise jamais. ZEROISÉS À LA DESTRUCTION.
// ============================================================================
#[derive(Clone, PartialEq, Eq)]
pub struct Factors {
    p: BigUint,
    q: BigUint,
}

impl Factors {
    pub fn new(p: BigUint, q: BigUint) -> Self {
        Factors { p, q }
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn q(&self) -> &BigUint {
        &self.q
    }
}

impl Zeroize for Factors {
    fn zeroize(&mut self) {
        zeroize_biguint(&mut self.p);
        zeroize_biguint(&mut self.q);
    }
}

impl Drop for Factors {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Debug for Factors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factors").finish_non_exhaustive()
    }
}

// ============================================================================
// Clé privée Paillier — ZEROISÉE À LA DESTRUCTION
//
// La clé publique est partagée via Arc : plusieurs détenteurs de la même
// paire peuvent la lire, la clé privée ne la modifie jamais.
// ============================================================================
#[derive(Clone)]
pub struct PrivateKey {
    pub(crate) lambda:     BigUint,
    pub(crate) mu:         BigUint,
    pub(crate) public_key: Arc<PublicKey>,
    pub(crate) factors:    Option<Factors>,
}

impl PrivateKey {
    /// Reconstruit une clé privée à partir de (lambda, mu).
    ///
    /// Vérifie L(g^lambda mod n², n) · mu ≡ 1 (mod n) : une clé qui ne
    /// satisfait pas cette identité ne déchiffre rien correctement.
    pub fn new(
        lambda: BigUint,
        mu: BigUint,
        public_key: Arc<PublicKey>,
        factors: Option<Factors>,
    ) -> Result<Self, CryptoError> {
        let key = PrivateKey { lambda, mu, public_key, factors };
        if !key.is_coherent() {
            return Err(CryptoError::KeyCoherence);
        }
        Ok(key)
    }

    pub(crate) fn from_parts(
        lambda: BigUint,
        mu: BigUint,
        public_key: Arc<PublicKey>,
        factors: Option<Factors>,
    ) -> Self {
        PrivateKey { lambda, mu, public_key, factors }
    }

    fn is_coherent(&self) -> bool {
        let pk = &self.public_key;
        let g_lambda = pk.g.modpow(&self.lambda, &pk.n_squared);
        let check = (l_function(&g_lambda, &pk.n) * &self.mu) % &pk.n;
        check.is_one()
    }

    pub fn public_key(&self) -> &Arc<PublicKey> {
        &self.public_key
    }

    pub fn factors(&self) -> Option<&Factors> {
        self.factors.as_ref()
    }

    pub fn n(&self) -> &BigUint {
        &self.public_key.n
    }

    pub fn bit_length(&self) -> u64 {
        self.public_key.bit_length()
    }
}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        zeroize_biguint(&mut self.lambda);
        zeroize_biguint(&mut self.mu);
        if let Some(factors) = self.factors.as_mut() {
            factors.zeroize();
        }
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

// lambda, mu, p et q ne doivent jamais finir dans des logs
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("bit_length", &self.bit_length())
            .field("has_factors", &self.factors.is_some())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Paire de clés — simple couple remis à l'appelant par la génération
// ============================================================================
#[derive(Clone, Debug)]
pub struct KeyPair {
    pub public_key:  Arc<PublicKey>,
    pub private_key: PrivateKey,
}

impl KeyPair {
    pub fn into_parts(self) -> (Arc<PublicKey>, PrivateKey) {
        (self.public_key, self.private_key)
    }
}

pub(crate) fn parse_decimal(text: &str) -> Result<BigUint, CryptoError> {
    BigUint::from_str_radix(text.trim(), 10)
        .map_err(|e| CryptoError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn test_public_key_caches_n_squared() {
        let pk = PublicKey::new(big(77), big(78)).unwrap();
        assert_eq!(pk.n_squared(), &big(5929));
        assert_eq!(pk.bit_length(), 7);
    }

    #[test]
    fn test_public_key_rejects_bad_modulus_and_generator() {
        assert_eq!(PublicKey::new(big(76), big(2)), Err(CryptoError::InvalidModulus));
        assert_eq!(PublicKey::new(big(1), big(1)), Err(CryptoError::InvalidModulus));
        assert_eq!(PublicKey::new(big(77), big(0)), Err(CryptoError::InvalidGenerator));
        assert_eq!(PublicKey::new(big(77), big(5929)), Err(CryptoError::InvalidGenerator));
    }

    #[test]
    fn test_public_key_from_decimal() {
        let pk = PublicKey::from_decimal("77", " 78 ").unwrap();
        assert_eq!(pk, PublicKey::new(big(77), big(78)).unwrap());
        assert!(matches!(PublicKey::from_decimal("7x7", "78"), Err(CryptoError::Parse(_))));
    }

    #[test]
    fn test_private_key_coherence_check() {
        // n = 7·11, g = n+1, lambda = phi = 60, mu = 60^-1 mod 77 = 9
        let pk = Arc::new(PublicKey::new(big(77), big(78)).unwrap());
        assert!(PrivateKey::new(big(60), big(9), Arc::clone(&pk), None).is_ok());
        assert!(matches!(
            PrivateKey::new(big(60), big(10), pk, None),
            Err(CryptoError::KeyCoherence)
        ));
    }

    #[test]
    fn test_private_key_zeroize_clears_secrets() {
        let pk = Arc::new(PublicKey::new(big(77), big(78)).unwrap());
        let factors = Some(Factors::new(big(7), big(11)));
        let mut sk = PrivateKey::new(big(60), big(9), pk, factors).unwrap();

        sk.zeroize();
        assert!(sk.lambda.is_zero());
        assert!(sk.mu.is_zero());
        let factors = sk.factors().unwrap();
        assert!(factors.p().is_zero() && factors.q().is_zero());
        // La clé publique n'est pas secrète et reste intacte
        assert_eq!(sk.n(), &big(77));
    }

    #[test]
    fn test_private_key_debug_hides_secrets() {
        let pk = Arc::new(PublicKey::new(big(77), big(78)).unwrap());
        let sk = PrivateKey::new(big(60), big(9), pk, Some(Factors::new(big(7), big(11)))).unwrap();
        let printed = format!("{:?}", sk);
        assert!(printed.contains("bit_length"));
        assert!(!printed.contains("60"));
    }

    #[test]
    fn test_keypair_into_parts_keeps_shared_public_key() {
        let pk = Arc::new(PublicKey::new(big(77), big(78)).unwrap());
        let sk = PrivateKey::new(big(60), big(9), Arc::clone(&pk), None).unwrap();
        let kp = KeyPair { public_key: pk, private_key: sk };

        let (public_key, private_key) = kp.into_parts();
        assert!(Arc::ptr_eq(&public_key, private_key.public_key()));
        assert_eq!(public_key.n(), &big(77));
        assert!(private_key.factors().is_none());
    }
}
