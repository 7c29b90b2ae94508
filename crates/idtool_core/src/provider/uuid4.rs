use super::IdProvider;
use crate::model::kind::ProviderKind;
use uuid::Uuid;

/// Random UUID v4 in canonical hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uuid4Provider;

impl IdProvider for Uuid4Provider {
    fn name(&self) -> &'static str {
        ProviderKind::Uuid4.as_str()
    }

    fn generate_id(&self) -> String {
        Uuid::new_v4().hyphenated().to_string()
    }
}
