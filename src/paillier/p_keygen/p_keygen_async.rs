use std::thread::{self, JoinHandle};
use log::debug;
use crate::paillier::p_keygen::p_keygen::{generate_keys, KeygenConfig};
use crate::paillier::p_keygen::p_keys::KeyPair;
use crate::crypto_error::CryptoError;

// ============================================================================
// Génération de clés différée
//
// Exécute exactement generate_keys sur un thread dédié : mêmes entrées,
// mêmes sorties, seule la complétion est différée. Le travail est purement
// CPU (recherche de premiers), il n'y a donc rien à annuler ni de timeout.
// ============================================================================
pub struct KeygenTask {
    handle: JoinHandle<Result<KeyPair, CryptoError>>,
}

impl KeygenTask {
    /// Vrai si le thread de génération a terminé (succès ou échec).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Attend la fin de la génération.
    pub fn join(self) -> Result<KeyPair, CryptoError> {
        self.handle
            .join()
            .map_err(|_| CryptoError::KeygenWorkerPanicked)?
    }
}

pub fn generate_keys_async(config: KeygenConfig) -> KeygenTask {
    debug!("génération de clés {} bits déléguée à un thread dédié", config.bits);
    let handle = thread::spawn(move || generate_keys(&config));
    KeygenTask { handle }
}
