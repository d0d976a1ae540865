// Types de clés, génération synchrone et différée

pub mod p_keys;
#[allow(clippy::module_inception)]
pub mod p_keygen;
pub mod p_keygen_async;

pub use p_keys::{PublicKey, PrivateKey, Factors, KeyPair};
pub use p_keygen::{
    generate_keys, generate_keys_with_rng, KeygenConfig,
    DEFAULT_KEY_BITS, MIN_KEY_BITS,
};
pub use p_keygen_async::{generate_keys_async, KeygenTask};
