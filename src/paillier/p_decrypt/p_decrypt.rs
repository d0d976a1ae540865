use num_bigint::BigInt;
use crate::paillier::ciphertext::Ciphertext;
use crate::paillier::math::{centered_residue, l_function};
use crate::paillier::p_keygen::PrivateKey;

impl PrivateKey {
    // -----------------------------------------------------------------------
    // Déchiffrement Paillier modifié :
    //
    //   x = L(c^lambda mod n²) · mu  mod n
    //   m = représentant centré de x dans (-n/2, n/2]
    //
    // Le recentrage permet aux plaintexts négatifs de faire l'aller-retour.
    // Aucune validation de c : un chiffré hors image donne une valeur
    // déterministe, pas une erreur.
    // -----------------------------------------------------------------------
    pub fn decrypt(&self, ciphertext: &Ciphertext) -> BigInt {
        let pk = &self.public_key;

        let c_lambda = ciphertext.value().modpow(&self.lambda, &pk.n_squared);
        let u = l_function(&c_lambda, &pk.n);
        let x = (u * &self.mu) % &pk.n;

        centered_residue(&x, &pk.n)
    }
}
