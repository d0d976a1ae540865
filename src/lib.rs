// Déclaration des modules
pub mod crypto_error;
pub mod paillier;

pub use crate::paillier::math;
pub use crate::paillier::p_keygen;
pub use crate::paillier::p_encrypt;
pub use crate::paillier::p_decrypt;
pub use crate::paillier::p_homomorphic;

// Fonctions mathématiques principales
pub use crate::paillier::math::{
    l_function, gcd, lcm, centered_residue, select_generator, mod_inverse,
};

// Types et génération de clés
pub use p_keygen::{
    PublicKey, PrivateKey, Factors, KeyPair, KeygenConfig, KeygenTask,
    generate_keys, generate_keys_with_rng, generate_keys_async,
    DEFAULT_KEY_BITS, MIN_KEY_BITS,
};

pub use crate::paillier::Ciphertext;

// Erreur centralisée
pub use crypto_error::CryptoError;
