// Réexporte toutes les fonctions arithmétiques

#[allow(clippy::module_inception)]
mod math;

pub use math::{
    l_function, gcd, lcm, centered_residue, reduce_mod, select_generator,
    mod_inverse, generate_prime, is_probable_prime, MILLER_RABIN_ROUNDS,
};
