// crates/profile-gate-core/tests/common/mod.rs
// =============================================================================
// Module: Core Test Fixtures
// Description: In-code role tables shared by integration tests.
// Purpose: Exercise resolvers without going through configuration loading.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use profile_gate_core::Capability;
use profile_gate_core::ConfigRegistry;
use profile_gate_core::FieldDefinition;
use profile_gate_core::FieldMetadata;
use profile_gate_core::FieldType;
use profile_gate_core::PermissionSet;
use profile_gate_core::Role;
use profile_gate_core::RoleConfig;
use profile_gate_core::SectionKey;
use profile_gate_core::SectionMeta;
use profile_gate_core::ValidationRule;

/// Every field name any fixture role declares.
pub const FIELD_NAMES: [&str; 9] = [
    "first_name",
    "email",
    "role",
    "bio",
    "business_name",
    "certifications",
    "password",
    "password_confirm",
    "notes",
];

/// Builds a section entry.
pub fn section(key: &str, label: &str, roles: &[Role]) -> SectionMeta {
    SectionMeta {
        key: SectionKey::new(key),
        label: label.to_string(),
        icon: key.to_string(),
        description: format!("{label} details"),
        roles: roles.to_vec(),
    }
}

/// Section catalog shared by every fixture role.
pub fn sections() -> Vec<SectionMeta> {
    vec![
        section("personal", "Personal", &Role::ALL),
        section("business", "Business", &[Role::ServiceProvider]),
        section("security", "Security", &[Role::Admin, Role::ServiceProvider, Role::Client]),
        section("system", "System", &[Role::Admin]),
    ]
}

/// Fields shared by every role.
fn common_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::new("first_name", FieldType::Text, "First Name", "personal")
            .required()
            .rule(ValidationRule::MinLength(2))
            .rule(ValidationRule::MaxLength(50)),
        FieldDefinition::new("email", FieldType::Email, "Email", "personal")
            .required()
            .rule(ValidationRule::Email),
        FieldDefinition::new("role", FieldType::Select, "Role", "personal").metadata(FieldMetadata {
            options: Role::ALL.iter().map(|role| role.as_str().to_string()).collect(),
            ..FieldMetadata::default()
        }),
    ]
}

/// Password pair with a confirmation rule.
fn password_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::new("password", FieldType::Password, "Password", "security")
            .rule(ValidationRule::MinLength(8)),
        FieldDefinition::new("password_confirm", FieldType::Password, "Confirm", "security")
            .rule(ValidationRule::Confirm("password".into())),
    ]
}

/// Client: edits its name and password, sees role and email locked.
pub fn client() -> RoleConfig {
    let mut config = RoleConfig::new(Role::Client);
    config.sections = vec![SectionKey::new("personal"), SectionKey::new("security")];
    config.fields = common_fields();
    config.fields.extend(password_fields());
    config.permissions = PermissionSet::from_lists(
        ["first_name", "password", "password_confirm"],
        ["first_name", "email", "role", "password", "password_confirm"],
        ["email", "role"],
    )
    .with_capability(Capability::CanUploadImage, true)
    .with_capability(Capability::CanDelete, false);
    config
}

/// Service provider: business details, certifications, and a long bio.
pub fn service_provider() -> Result<RoleConfig, String> {
    let mut config = RoleConfig::new(Role::ServiceProvider);
    config.sections =
        vec![SectionKey::new("personal"), SectionKey::new("business"), SectionKey::new("security")];
    config.fields = common_fields();
    config.fields.push(
        FieldDefinition::new("bio", FieldType::Textarea, "Bio", "personal")
            .required()
            .rule(ValidationRule::MinLength(50))
            .rule(ValidationRule::MaxLength(500)),
    );
    config.fields.push(
        FieldDefinition::new("business_name", FieldType::Text, "Business", "business")
            .rule(ValidationRule::pattern("[A-Za-z0-9 &'-]+").map_err(|err| err.to_string())?),
    );
    config.fields.push(
        FieldDefinition::new("certifications", FieldType::File, "Certifications", "business")
            .rule(ValidationRule::file_type(["pdf", ".PNG"]).map_err(|err| err.to_string())?)
            .rule(ValidationRule::FileSize(5120))
            .metadata(FieldMetadata {
                max_files: Some(5),
                multiple: true,
                ..FieldMetadata::default()
            }),
    );
    config.fields.extend(password_fields());
    config.permissions = PermissionSet::from_lists(
        ["first_name", "bio", "business_name", "certifications", "password", "password_confirm", "role"],
        [
            "first_name",
            "email",
            "role",
            "bio",
            "business_name",
            "certifications",
            "password",
            "password_confirm",
        ],
        ["email", "role"],
    )
    .with_capability(Capability::CanUploadImage, true)
    .with_capability(Capability::CanExportData, true);
    Ok(config)
}

/// Admin: everything except business, plus system notes.
pub fn admin() -> RoleConfig {
    let mut config = RoleConfig::new(Role::Admin);
    config.sections = vec![
        SectionKey::new("personal"),
        SectionKey::new("security"),
        SectionKey::new("system"),
    ];
    config.fields = common_fields();
    config.fields.push(FieldDefinition::new("notes", FieldType::Textarea, "Notes", "system"));
    config.permissions = PermissionSet::from_lists(
        ["first_name", "email", "role", "notes"],
        ["first_name", "email", "role", "notes"],
        Vec::<&str>::new(),
    )
    .with_capability(Capability::CanManageSystem, true)
    .with_capability(Capability::CanChangeRole, true);
    config
}

/// Registry with admin, service provider, and client; staff falls back to client.
pub fn fixture_registry() -> Result<ConfigRegistry, String> {
    ConfigRegistry::new(sections(), vec![admin(), service_provider()?, client()])
        .map_err(|err| err.to_string())
}
