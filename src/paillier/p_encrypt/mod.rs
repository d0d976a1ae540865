#[allow(clippy::module_inception)]
pub mod p_encrypt;
