use crate::domain::{
    entities::{FileSystemSnapshot, GenerationSettings},
    error::DomainError,
    registry::{DialectDescriptor, FormatRegistry},
};

/// Centralized pre-generation checks.
///
/// Everything that can be rejected before a single statement is emitted is
/// rejected here.
pub struct DomainValidator;

impl DomainValidator {
    /// Validate `settings` and resolve its dialect for its platform scope.
    pub fn validate_settings(
        registry: &FormatRegistry,
        settings: &GenerationSettings,
    ) -> Result<&'static DialectDescriptor, DomainError> {
        settings.validate()?;
        registry.resolve_for(settings.dialect, settings.platform)
    }

    pub fn validate_snapshot(snapshot: &FileSystemSnapshot) -> Result<(), DomainError> {
        snapshot.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{DialectId, PlatformScope};

    #[test]
    fn settings_are_checked_before_scope() {
        let settings = GenerationSettings {
            script_name: "bad name".into(),
            platform: PlatformScope::Windows,
            ..Default::default()
        };
        let err = DomainValidator::validate_settings(FormatRegistry::builtin(), &settings)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidScriptName { .. }));
    }

    #[test]
    fn scope_mismatch_is_unsupported() {
        let settings = GenerationSettings {
            dialect: DialectId::Fish,
            platform: PlatformScope::CrossPlatform,
            ..Default::default()
        };
        let err = DomainValidator::validate_settings(FormatRegistry::builtin(), &settings)
            .unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedDialect { .. }));
    }

    #[test]
    fn defaults_resolve_to_bash() {
        let descriptor =
            DomainValidator::validate_settings(FormatRegistry::builtin(), &Default::default())
                .unwrap();
        assert_eq!(descriptor.id, DialectId::Bash);
    }
}
