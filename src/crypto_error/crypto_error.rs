// ===========================================================================
// Gestion centralisée des erreurs cryptographiques
//
// Tous les modules renvoient ce type au lieu de panic!/assert!/unwrap().
// Aucune opération ne réessaie après une erreur : seules les deux boucles
// de rejet (taille de n, facteur r) rééchantillonnent.
// ===========================================================================

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    // --- Erreurs de paramètres d'entrée ---
    /// Le message m est hors de (-n/2, n/2)
    #[error("valeur hors de la plage chiffrable : le message doit être dans (-n/2, n/2)")]
    MessageOutOfRange,
    /// La taille de clé demandée est trop petite (< MIN_KEY_BITS)
    #[error("taille de clé {requested} bits insuffisante, minimum requis : {minimum} bits")]
    KeySizeTooSmall { requested: u64, minimum: u64 },
    /// La variante simple exige p et q de même taille, donc un n de taille paire
    #[error("la variante simple exige une taille de clé paire ({requested} bits demandés)")]
    OddSimpleKeySize { requested: u64 },
    /// p == q : n serait un carré parfait
    #[error("les facteurs premiers p et q doivent être distincts")]
    IdenticalPrimes,
    /// n doit être impair et >= 3
    #[error("module n invalide : impair et >= 3 attendu")]
    InvalidModulus,
    /// g doit être dans ]0, n²[
    #[error("générateur g invalide : doit être dans ]0, n²[")]
    InvalidGenerator,
    /// Représentation décimale invalide
    #[error("entier décimal invalide : {0}")]
    Parse(String),

    // --- Erreurs mathématiques ---
    /// L'inverse modulaire n'existe pas (gcd != 1)
    #[error("impossible de calculer l'inverse modulaire (gcd != 1)")]
    NoModularInverse,
    /// L(g^lambda mod n²) * mu != 1 mod n : clé corrompue ou falsifiée
    #[error("clé privée incohérente : L(g^lambda mod n²) * mu != 1 (mod n)")]
    KeyCoherence,

    // --- Génération asynchrone ---
    #[error("le thread de génération de clés a paniqué")]
    KeygenWorkerPanicked,
}
