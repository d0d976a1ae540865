// =========================================================
// Métriques — Mesures de durée du cryptosystème de Paillier
// Génération, chiffrement, opérations homomorphes, déchiffrement
// =========================================================

use paillier_core::{
    generate_keys, generate_keys_async, Ciphertext, CryptoError, KeyPair, KeygenConfig,
};

use clap::Parser;
use log::{info, warn};
use num_bigint::{BigInt, BigUint};
use num_traits::ToPrimitive;
use rand::Rng;
use std::time::{Duration, Instant};
use thiserror::Error;

// ─────────────────────────────────────────────────────────
// Arguments
// ─────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "paillier_metrics", about = "Mesures de durée du cryptosystème de Paillier")]
struct Args {
    /// Taille exacte du module n en bits
    #[arg(long, default_value_t = 1024)]
    bits: u64,

    /// Variante simple : g = n+1, lambda = phi(n)
    #[arg(long)]
    simple: bool,

    /// Génère les clés sur un thread dédié
    #[arg(long)]
    async_keygen: bool,

    /// Nombre de plaintexts aléatoires chiffrés puis additionnés
    #[arg(long, default_value_t = 8)]
    samples: usize,
}

// Plafond des plaintexts de démonstration, abaissé pour les petits modules
const SAMPLE_BOUND: i64 = 1 << 40;

// Scalaire de la multiplication tiré dans (-SCALAR_BOUND, SCALAR_BOUND)
const SCALAR_BOUND: i64 = 1000;

#[derive(Debug, Error)]
enum MetricsError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("module trop petit pour {samples} plaintexts de démonstration")]
    ModulusTooSmall { samples: usize },

    #[error("résultat incorrect pour {0}")]
    Mismatch(String),
}

// ─────────────────────────────────────────────────────────
// Point d'entrée
// ─────────────────────────────────────────────────────────

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = demonstration_paillier(&args) {
        eprintln!("\n[ERREUR] {}\n", e);
        std::process::exit(1);
    }
}

// ─────────────────────────────────────────────────────────
// Génération des clés (synchrone ou différée)
// ─────────────────────────────────────────────────────────

fn generer_cles(args: &Args) -> Result<(KeyPair, Duration), CryptoError> {
    let config = KeygenConfig::new(args.bits).simple_variant(args.simple);

    let t = Instant::now();
    let kp = if args.async_keygen {
        let task = generate_keys_async(config);
        info!("génération lancée en arrière-plan");
        task.join()?
    } else {
        generate_keys(&config)?
    };
    Ok((kp, t.elapsed()))
}

fn afficher_cles(kp: &KeyPair) {
    println!("--- CLÉ PUBLIQUE ---");
    println!("  |n|         = {} bits", kp.public_key.bit_length());
    println!("  |g|         = {} bits", kp.public_key.g().bits());
    println!("  |n_squared| = {} bits", kp.public_key.n_squared().bits());
    println!("--- CLÉ PRIVÉE ---");
    println!("  {:?}", kp.private_key);
}

// Borne B des plaintexts : samples·B et B·SCALAR_BOUND ne dépassent pas
// floor(n/2), donc somme, différence et produit restent déchiffrables
fn borne_echantillons(max_plaintext: &BigUint, samples: usize) -> Option<i64> {
    let diviseur = BigUint::from(samples as u64) * BigUint::from(SCALAR_BOUND as u64);
    let plafond = BigUint::from(SAMPLE_BOUND as u64);
    let borne = (max_plaintext / diviseur).min(plafond).to_i64()?;
    if borne < 1 {
        return None;
    }
    Some(borne)
}

fn verifier(libelle: &str, obtenu: &BigInt, attendu: &BigInt) -> Result<(), MetricsError> {
    if obtenu == attendu {
        println!("  {} vérifié : {}", libelle, obtenu);
        Ok(())
    } else {
        warn!("{} : obtenu {}, attendu {}", libelle, obtenu, attendu);
        Err(MetricsError::Mismatch(libelle.to_string()))
    }
}

// ─────────────────────────────────────────────────────────
// Démonstration — homomorphisme additif
// ─────────────────────────────────────────────────────────

fn demonstration_paillier(args: &Args) -> Result<(), MetricsError> {
    println!("\n==============================================");
    println!("    Cryptosystème de Paillier — Métriques");
    println!("==============================================");

    let (kp, duree_keygen) = generer_cles(args)?;
    afficher_cles(&kp);

    let pk = &kp.public_key;
    let sk = &kp.private_key;

    let samples = args.samples.max(2);
    let borne = borne_echantillons(&pk.max_plaintext(), samples)
        .ok_or(MetricsError::ModulusTooSmall { samples })?;
    info!("plaintexts tirés dans ]-{}, {}[", borne, borne);

    let mut rng = rand::thread_rng();
    let messages: Vec<BigInt> = (0..samples)
        .map(|_| BigInt::from(rng.gen_range(-borne..borne)))
        .collect();
    let somme_claire: BigInt = messages.iter().sum();

    let t = Instant::now();
    let chiffres = messages
        .iter()
        .map(|m| pk.encrypt(m))
        .collect::<Result<Vec<Ciphertext>, CryptoError>>()?;
    let duree_enc = t.elapsed();

    let t = Instant::now();
    let c_somme = pk.addition(&chiffres);
    let duree_add = t.elapsed();

    let t = Instant::now();
    let c_diff = pk.subtraction(&chiffres[0], &chiffres[1])?;
    let duree_sub = t.elapsed();

    let scalaire = BigInt::from(rng.gen_range(-SCALAR_BOUND..SCALAR_BOUND));
    let t = Instant::now();
    let c_produit = pk.multiply(&chiffres[0], &scalaire);
    let duree_mul = t.elapsed();

    let t = Instant::now();
    let dec_somme = sk.decrypt(&c_somme);
    let duree_dec = t.elapsed();

    println!();
    verifier("Addition", &dec_somme, &somme_claire)?;
    verifier("Soustraction", &sk.decrypt(&c_diff), &(&messages[0] - &messages[1]))?;
    verifier("Multiplication scalaire", &sk.decrypt(&c_produit), &(&messages[0] * &scalaire))?;

    println!("\n==============================================");
    println!("    RÉSUMÉ DES TEMPS — Paillier");
    println!("==============================================");
    println!("  Génération des clés    : {:.3?}", duree_keygen);
    println!("  Chiffrement ({:>3} msg) : {:.3?}", chiffres.len(), duree_enc);
    println!("  Addition homomorphique : {:.3?}", duree_add);
    println!("  Soustraction           : {:.3?}", duree_sub);
    println!("  Multiplication         : {:.3?}", duree_mul);
    println!("  Déchiffrement          : {:.3?}", duree_dec);
    println!("==============================================");

    Ok(())
}
