use std::sync::Arc;
use log::{debug, info};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use rand_core::{CryptoRng, OsRng, RngCore};
use crate::paillier::math::{l_function, gcd, lcm, mod_inverse, generate_prime, select_generator};
use crate::paillier::p_keygen::p_keys::{Factors, KeyPair, PrivateKey, PublicKey};
use crate::crypto_error::CryptoError;

// Taille de module par défaut
pub const DEFAULT_KEY_BITS: u64 = 4096;

// Taille minimale acceptée : en dessous, les premiers de 16 bits rendent
// la boucle de rejet et le crible peu significatifs
pub const MIN_KEY_BITS: u64 = 32;

// ============================================================================
// Paramètres de génération
// ============================================================================
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeygenConfig {
    /// Taille exacte de n en bits
    pub bits: u64,
    /// g = n+1, lambda = phi(n) ; exige p et q de même taille
    pub simple_variant: bool,
}

impl Default for KeygenConfig {
    fn default() -> Self {
        KeygenConfig {
            bits: DEFAULT_KEY_BITS,
            simple_variant: false,
        }
    }
}

impl KeygenConfig {
    pub fn new(bits: u64) -> Self {
        KeygenConfig { bits, ..Default::default() }
    }

    pub fn simple_variant(mut self, enabled: bool) -> Self {
        self.simple_variant = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), CryptoError> {
        if self.bits < MIN_KEY_BITS {
            return Err(CryptoError::KeySizeTooSmall {
                requested: self.bits,
                minimum: MIN_KEY_BITS,
            });
        }
        if self.simple_variant && self.bits.is_odd() {
            return Err(CryptoError::OddSimpleKeySize { requested: self.bits });
        }
        Ok(())
    }
}

// ============================================================================
// Génération de clés Paillier
//
// Boucle de rejet : deux premiers de k bits donnent un n de 2k-1 ou 2k bits.
// On rééchantillonne jusqu'à obtenir exactement `bits` bits, avec p != q
// et gcd(n, phi(n)) = 1.
// Pour une taille impaire, p reçoit le bit supplémentaire.
//
// Aucune autre erreur n'est rattrapée : un mu non inversible remonte tel quel.
// ============================================================================
pub fn generate_keys(config: &KeygenConfig) -> Result<KeyPair, CryptoError> {
    let mut rng = OsRng;
    generate_keys_with_rng(config, &mut rng)
}

pub fn generate_keys_with_rng<R: RngCore + CryptoRng + ?Sized>(
    config: &KeygenConfig,
    rng: &mut R,
) -> Result<KeyPair, CryptoError> {
    config.validate()?;

    let bits = config.bits;
    let q_bits = bits / 2;
    let p_bits = bits - q_bits;

    info!(
        "génération d'une clé Paillier de {} bits (variante {})",
        bits,
        if config.simple_variant { "simple" } else { "standard" }
    );

    let mut attempts: u32 = 0;
    let (p, q) = loop {
        attempts += 1;
        let p = generate_prime(p_bits, rng)?;
        let q = generate_prime(q_bits, rng)?;

        if p == q {
            debug!("tentative {} : p == q, rééchantillonnage", attempts);
            continue;
        }

        let n = &p * &q;
        let n_bits = n.bits();
        if n_bits != bits {
            debug!("tentative {} : n a {} bits, {} attendus", attempts, n_bits, bits);
            continue;
        }

        // Tailles inégales (bits impair) : q peut diviser p-1
        let phi_n = (&p - BigUint::one()) * (&q - BigUint::one());
        if gcd(&n, &phi_n).is_one() {
            break (p, q);
        }
        debug!("tentative {} : gcd(n, phi(n)) != 1, rééchantillonnage", attempts);
    };

    debug!("premiers acceptés après {} tentative(s)", attempts);
    build_keypair(p, q, config.simple_variant, rng)
}

impl KeyPair {
    /// Construit la paire à partir de premiers fournis par l'appelant.
    ///
    /// La variante simple suppose p et q de même taille ; ce n'est pas
    /// revérifié ici.
    pub fn from_primes(p: BigUint, q: BigUint, simple_variant: bool) -> Result<KeyPair, CryptoError> {
        let mut rng = OsRng;
        Self::from_primes_with_rng(p, q, simple_variant, &mut rng)
    }

    pub fn from_primes_with_rng<R: RngCore + CryptoRng + ?Sized>(
        p: BigUint,
        q: BigUint,
        simple_variant: bool,
        rng: &mut R,
    ) -> Result<KeyPair, CryptoError> {
        build_keypair(p, q, simple_variant, rng)
    }
}

fn build_keypair<R: RngCore + CryptoRng + ?Sized>(
    p: BigUint,
    q: BigUint,
    simple_variant: bool,
    rng: &mut R,
) -> Result<KeyPair, CryptoError> {
    if p == q {
        return Err(CryptoError::IdenticalPrimes);
    }

    let n = &p * &q;
    if n.is_even() || n < BigUint::from(3u32) {
        return Err(CryptoError::InvalidModulus);
    }
    let n_squared = &n * &n;

    let p_minus_1 = &p - BigUint::one();
    let q_minus_1 = &q - BigUint::one();
    let phi_n = &p_minus_1 * &q_minus_1;

    if gcd(&n, &phi_n) != BigUint::one() {
        return Err(CryptoError::NoModularInverse);
    }

    let (g, lambda, mu) = if simple_variant {
        // (n+1)^m mod n² = 1 + m·n, donc L(g^phi mod n²) = phi mod n
        let g = &n + BigUint::one();
        let mu = mod_inverse(&phi_n, &n)?;
        (g, phi_n, mu)
    } else {
        let g = select_generator(&n, &n_squared, rng);
        let lambda = lcm(&p_minus_1, &q_minus_1);
        let g_lambda = g.modpow(&lambda, &n_squared);
        let mu = mod_inverse(&l_function(&g_lambda, &n), &n)?;
        (g, lambda, mu)
    };

    let public_key = Arc::new(PublicKey::from_parts(n, g, n_squared));
    let private_key = PrivateKey::from_parts(
        lambda,
        mu,
        Arc::clone(&public_key),
        Some(Factors::new(p, q)),
    );

    Ok(KeyPair { public_key, private_key })
}
