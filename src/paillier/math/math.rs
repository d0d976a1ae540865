use num_bigint::{BigInt, BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::RngCore;
use crate::crypto_error::CryptoError;

// Nombre de témoins Miller-Rabin par candidat premier
pub const MILLER_RABIN_ROUNDS: u32 = 25;

// ---------------------------------------------------------------------------
// Table de petits premiers (crible préliminaire, couvre jusqu'à 997)
// ---------------------------------------------------------------------------
const SMALL_PRIMES: &[u32] = &[
      3,   5,   7,  11,  13,  17,  19,  23,  29,  31,  37,  41,
     43,  47,  53,  59,  61,  67,  71,  73,  79,  83,  89,  97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157,
    163, 167, 173, 179, 181, 191, 193, 197, 199, 211, 223, 227,
    229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283,
    293, 307, 311, 313, 317, 331, 337, 347, 349, 353, 359, 367,
    373, 379, 383, 389, 397, 401, 409, 419, 421, 431, 433, 439,
    443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503, 509,
    521, 523, 541, 547, 557, 563, 569, 571, 577, 587, 593, 599,
    601, 607, 613, 617, 619, 631, 641, 643, 647, 653, 659, 661,
    673, 677, 683, 691, 701, 709, 719, 727, 733, 739, 743, 751,
    757, 761, 769, 773, 787, 797, 809, 811, 821, 823, 827, 829,
    839, 853, 857, 859, 863, 877, 881, 883, 887, 907, 911, 919,
    929, 937, 941, 947, 953, 967, 971, 977, 983, 991, 997,
];

/// Fonction L(u) = (u-1)/n, division entière.
///
/// L(0) vaut 0 (troncature vers zéro), ce qui garde `decrypt` total sur
/// des chiffrés malformés.
pub fn l_function(u: &BigUint, n: &BigUint) -> BigUint {
    if u.is_zero() {
        return BigUint::zero();
    }
    (u - BigUint::one()) / n
}

// Calcule le pgcd de deux nombres
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

pub fn lcm(a: &BigUint, b: &BigUint) -> BigUint {
    a.lcm(b)
}

// ---------------------------------------------------------------------------
// Représentant centré : [0, n) -> (-n/2, n/2]
//
//   ((x + floor(n/2)) mod n) - floor(n/2)
//
// Pour n impair l'image est exactement [-floor(n/2), floor(n/2)].
// ---------------------------------------------------------------------------
pub fn centered_residue(x: &BigUint, n: &BigUint) -> BigInt {
    let half = n >> 1u32;
    let shifted = (x + &half) % n;
    BigInt::from(shifted) - BigInt::from(half)
}

// Réduit un entier signé dans [0, n) (plaintexts et scalaires négatifs)
pub fn reduce_mod(x: &BigInt, n: &BigUint) -> BigUint {
    let modulus = BigInt::from(n.clone());
    x.mod_floor(&modulus).into_parts().1
}

// ---------------------------------------------------------------------------
// Générateur de la variante standard :
//
//   g = ((alpha·n + 1) · beta^n) mod n²,   alpha, beta uniformes dans [0, n)
//
// (alpha·n + 1) est d'ordre divisant n et beta^n est un résidu n-ième,
// donc L(g^lambda mod n²) = alpha·lambda mod n.
// ---------------------------------------------------------------------------
pub fn select_generator<R: RngCore + ?Sized>(n: &BigUint, n2: &BigUint, rng: &mut R) -> BigUint {
    let alpha = rng.gen_biguint_below(n);
    let beta = rng.gen_biguint_below(n);

    let first = alpha * n + BigUint::one();
    let second = beta.modpow(n, n2);

    (first * second) % n2
}

// ---------------------------------------------------------------------------
// Calcule l'inverse modulaire de a mod n.
// Retourne Err(CryptoError::NoModularInverse) si gcd(a, n) != 1.
// ---------------------------------------------------------------------------
pub fn mod_inverse(a: &BigUint, n: &BigUint) -> Result<BigUint, CryptoError> {
    if n.is_zero() {
        return Err(CryptoError::NoModularInverse);
    }

    let modulus = BigInt::from(n.clone());
    let reduced = BigInt::from(a % n);

    let egcd = reduced.extended_gcd(&modulus);
    if !egcd.gcd.is_one() {
        return Err(CryptoError::NoModularInverse);
    }

    egcd.x
        .mod_floor(&modulus)
        .to_biguint()
        .ok_or(CryptoError::NoModularInverse)
}

// ---------------------------------------------------------------------------
// Premier probable d'exactement `nbits` bits.
//
// Bit de poids fort et bit de poids faible forcés à 1, puis crible sur
// SMALL_PRIMES et Miller-Rabin. Ne termine qu'avec un premier.
// ---------------------------------------------------------------------------
pub fn generate_prime<R: RngCore + ?Sized>(nbits: u64, rng: &mut R) -> Result<BigUint, CryptoError> {
    if nbits < 2 {
        return Err(CryptoError::KeySizeTooSmall {
            requested: nbits,
            minimum: 2,
        });
    }

    loop {
        let mut candidate = rng.gen_biguint(nbits);
        candidate.set_bit(nbits - 1, true);
        candidate.set_bit(0, true);

        if is_probable_prime(&candidate, MILLER_RABIN_ROUNDS, rng) {
            debug_assert_eq!(candidate.bits(), nbits);
            return Ok(candidate);
        }
    }
}

pub fn is_probable_prime<R: RngCore + ?Sized>(n: &BigUint, rounds: u32, rng: &mut R) -> bool {
    let two = BigUint::from(2u32);
    if n < &two { return false; }
    if n == &two { return true; }
    if n.is_even() { return false; }

    for &sp in SMALL_PRIMES {
        let bp = BigUint::from(sp);
        if n == &bp {
            return true;
        }
        if (n % &bp).is_zero() {
            return false;
        }
    }

    // Ici n > 997, donc l'intervalle des témoins [2, n-1) est non vide
    let n_minus_1 = n - BigUint::one();
    let mut d = n_minus_1.clone();
    let mut r = 0u32;
    while d.is_even() {
        d >>= 1u32;
        r += 1;
    }

    'witness: for _ in 0..rounds {
        let a = rng.gen_biguint_range(&two, &n_minus_1);
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_1 {
            continue 'witness;
        }
        for _ in 1..r {
            x = (&x * &x) % n;
            if x == n_minus_1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn test_l_function_floor_division() {
        // (36 - 1) / 5 = 7
        assert_eq!(l_function(&big(36), &big(5)), big(7));
        // (38 - 1) / 5 = 7 (plancher)
        assert_eq!(l_function(&big(38), &big(5)), big(7));
        assert_eq!(l_function(&big(1), &big(5)), big(0));
        assert_eq!(l_function(&big(0), &big(5)), big(0));
    }

    #[test]
    fn test_lcm_and_gcd() {
        assert_eq!(lcm(&big(4), &big(6)), big(12));
        assert_eq!(lcm(&big(10), &big(12)), big(60));
        assert_eq!(gcd(&big(10), &big(12)), big(2));
    }

    #[test]
    fn test_mod_inverse() {
        assert_eq!(mod_inverse(&big(3), &big(7)).unwrap(), big(5));
        assert_eq!(mod_inverse(&big(10), &big(7)).unwrap(), big(5));
        assert_eq!(mod_inverse(&big(2), &big(4)), Err(CryptoError::NoModularInverse));
        assert_eq!(mod_inverse(&big(0), &big(9)), Err(CryptoError::NoModularInverse));
        assert_eq!(mod_inverse(&big(3), &big(0)), Err(CryptoError::NoModularInverse));
    }

    #[test]
    fn test_centered_residue_maps_into_signed_range() {
        let n = big(7);
        let expected: [i64; 7] = [0, 1, 2, 3, -3, -2, -1];
        for (x, want) in expected.iter().enumerate() {
            assert_eq!(centered_residue(&big(x as u64), &n), BigInt::from(*want));
        }
    }

    #[test]
    fn test_reduce_mod_handles_negatives() {
        let n = big(7);
        assert_eq!(reduce_mod(&BigInt::from(-1), &n), big(6));
        assert_eq!(reduce_mod(&BigInt::from(-14), &n), big(0));
        assert_eq!(reduce_mod(&BigInt::from(23), &n), big(2));
    }

    #[test]
    fn test_is_probable_prime_known_values() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(is_probable_prime(&big(2), MILLER_RABIN_ROUNDS, &mut rng));
        assert!(is_probable_prime(&big(997), MILLER_RABIN_ROUNDS, &mut rng));
        assert!(is_probable_prime(&big(1009), MILLER_RABIN_ROUNDS, &mut rng));
        assert!(is_probable_prime(&big((1 << 61) - 1), MILLER_RABIN_ROUNDS, &mut rng));
        assert!(is_probable_prime(&big(u64::MAX - 58), MILLER_RABIN_ROUNDS, &mut rng));

        assert!(!is_probable_prime(&big(0), MILLER_RABIN_ROUNDS, &mut rng));
        assert!(!is_probable_prime(&big(1), MILLER_RABIN_ROUNDS, &mut rng));
        assert!(!is_probable_prime(&big(561), MILLER_RABIN_ROUNDS, &mut rng));
        // Composé sans facteur dans la table : seul Miller-Rabin le rejette
        assert!(!is_probable_prime(&big(1009 * 1013), MILLER_RABIN_ROUNDS, &mut rng));
    }

    #[test]
    fn test_generate_prime_exact_bit_length() {
        let mut rng = StdRng::seed_from_u64(42);
        for nbits in [2u64, 8, 17, 64, 128] {
            let p = generate_prime(nbits, &mut rng).unwrap();
            assert_eq!(p.bits(), nbits);
            assert!(is_probable_prime(&p, MILLER_RABIN_ROUNDS, &mut rng));
        }
    }

    #[test]
    fn test_generate_prime_rejects_one_bit() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            generate_prime(1, &mut rng),
            Err(CryptoError::KeySizeTooSmall { requested: 1, .. })
        ));
    }

    #[test]
    fn test_select_generator_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let n = big(1009 * 1013);
        let n2 = &n * &n;
        let lambda = lcm(&big(1008), &big(1012));
        for _ in 0..20 {
            let g = select_generator(&n, &n2, &mut rng);
            assert!(g < n2);
            // g ≡ beta^n (mod n), donc g^lambda ≡ 1 (mod n) dès que g est inversible
            if gcd(&g, &n).is_one() {
                assert!((g.modpow(&lambda, &n2) % &n).is_one());
            }
        }
    }
}
