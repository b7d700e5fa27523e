use crate::domain::{accessories::ScaffoldingAccessories, error::DomainError};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across call sites.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_accessories(accessories: &ScaffoldingAccessories) -> Result<(), DomainError> {
        accessories.validate()
    }
}
