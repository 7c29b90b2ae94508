use super::IdProvider;
use crate::model::kind::ProviderKind;
use rand::RngCore;
use sha2::{Digest, Sha256};

const SEED_LEN: usize = 32;

/// Hex SHA-256 of 32 fresh random bytes. Used as an opaque token only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Provider;

impl IdProvider for Sha256Provider {
    fn name(&self) -> &'static str {
        ProviderKind::Sha256.as_str()
    }

    fn generate_id(&self) -> String {
        let mut seed = [0u8; SEED_LEN];
        rand::rng().fill_bytes(&mut seed);
        hex::encode(Sha256::digest(seed))
    }
}
