use super::IdProvider;
use crate::model::kind::ProviderKind;
use ::ulid::Ulid;

/// 48-bit millisecond timestamp plus 80 random bits, Crockford base-32.
#[derive(Debug, Clone, Copy, Default)]
pub struct UlidProvider;

impl IdProvider for UlidProvider {
    fn name(&self) -> &'static str {
        ProviderKind::Ulid.as_str()
    }

    fn generate_id(&self) -> String {
        Ulid::new().to_string()
    }
}
