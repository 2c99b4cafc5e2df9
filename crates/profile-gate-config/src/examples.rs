// crates/profile-gate-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Built-in marketplace role table.
// Purpose: Deterministic default configuration for hosts, docs, and tests.
// Dependencies: profile-gate-core
// ============================================================================

//! ## Overview
//! The marketplace configuration declares four roles over nine sections.
//! Every section/role pairing is declared on both sides, so the table loads
//! under strict section checking.

use profile_gate_core::ConfigRegistry;

use crate::audit::NoopAuditSink;
use crate::config::ConfigError;
use crate::config::ProfileGateConfig;

/// Builds the registry for the built-in marketplace configuration.
///
/// # Errors
///
/// Returns [`ConfigError`] if the built-in configuration fails validation.
pub fn default_registry() -> Result<ConfigRegistry, ConfigError> {
    ProfileGateConfig::from_toml(&marketplace_config_toml())?.build_registry(&NoopAuditSink)
}

/// Returns the built-in marketplace `profile-gate.toml` configuration.
#[must_use]
pub fn marketplace_config_toml() -> String {
    String::from(
        r#"[validation]
strict_section_roles = true

# ---------------------------------------------------------------------------
# Sections
# ---------------------------------------------------------------------------

[sections.personal]
label = "Personal Information"
icon = "user"
description = "Name, photo, and short bio"
roles = ["admin", "staff", "service_provider", "client"]

[sections.contact]
label = "Contact Details"
icon = "phone"
description = "How to reach you"
roles = ["admin", "staff", "service_provider", "client"]

[sections.business]
label = "Business Information"
icon = "briefcase"
description = "Business identity and service area"
roles = ["staff", "service_provider"]

[sections.documents]
label = "Documents"
icon = "file-text"
description = "Certifications and identity documents"
roles = ["staff", "service_provider"]

[sections.preferences]
label = "Preferences"
icon = "sliders"
description = "Language, timezone, and marketing choices"
roles = ["admin", "staff", "service_provider", "client"]

[sections.security]
label = "Security"
icon = "lock"
description = "Password and two-factor settings"
roles = ["admin", "staff", "service_provider", "client"]

[sections.permissions]
label = "Permissions"
icon = "shield"
description = "Account status and provider verification"
roles = ["admin"]

[sections.system]
label = "System"
icon = "settings"
description = "Internal notes and activity"
roles = ["admin"]

[sections.notifications]
label = "Notifications"
icon = "bell"
description = "Delivery channels and frequency"
roles = ["admin", "staff", "service_provider", "client"]

# ---------------------------------------------------------------------------
# Field catalog
# ---------------------------------------------------------------------------

[fields.first_name]
type = "text"
label = "First Name"
required = true
section = "personal"
validation = { required = true, min_length = 2, max_length = 50 }

[fields.last_name]
type = "text"
label = "Last Name"
required = true
section = "personal"
validation = { required = true, min_length = 2, max_length = 50 }

[fields.date_of_birth]
type = "date"
label = "Date of Birth"
section = "personal"

[fields.avatar]
type = "image"
label = "Profile Photo"
section = "personal"
accept = ["jpg", "jpeg", "png", "webp"]
max_files = 1
validation = { file_size = 2048, file_type = ["jpg", "jpeg", "png", "webp"] }

[fields.bio]
type = "textarea"
label = "Bio"
section = "personal"
rows = 4
placeholder = "Tell us about yourself"
validation = { max_length = 500 }

[fields.role]
type = "select"
label = "Account Type"
section = "personal"
options = ["admin", "staff", "service_provider", "client"]

[fields.email]
type = "email"
label = "Email Address"
required = true
section = "contact"
validation = { required = true, email = true }

[fields.phone]
type = "phone"
label = "Phone Number"
section = "contact"
validation = { pattern = '\+?[0-9 ()-]{7,20}' }

[fields.address]
type = "text"
label = "Street Address"
section = "contact"
validation = { max_length = 200 }

[fields.city]
type = "text"
label = "City"
section = "contact"
validation = { max_length = 100 }

[fields.website]
type = "url"
label = "Website"
section = "contact"
validation = { pattern = 'https?://\S+' }

[fields.business_name]
type = "text"
label = "Business Name"
section = "business"
validation = { min_length = 2, max_length = 100 }

[fields.tax_id]
type = "text"
label = "Tax ID"
section = "business"
validation = { pattern = '[A-Z0-9-]{5,20}' }

[fields.service_area]
type = "text"
label = "Service Area"
section = "business"
validation = { max_length = 200 }

[fields.hourly_rate]
type = "number"
label = "Hourly Rate"
section = "business"
step = 0.5
validation = { min = 0, max = 10000 }

[fields.certifications]
type = "file"
label = "Certifications"
section = "documents"
accept = ["pdf", "jpg", "png"]
multiple = true
max_files = 5
validation = { file_type = ["pdf", "jpg", "png"], file_size = 5120 }

[fields.id_document]
type = "file"
label = "Identity Document"
section = "documents"
accept = ["pdf", "jpg", "png"]
max_files = 1
validation = { file_type = ["pdf", "jpg", "png"], file_size = 5120 }

[fields.language]
type = "select"
label = "Language"
section = "preferences"
options = ["en", "es", "fr", "de"]

[fields.timezone]
type = "text"
label = "Timezone"
section = "preferences"
validation = { max_length = 64 }

[fields.marketing_opt_in]
type = "boolean"
label = "Receive Marketing Emails"
section = "preferences"

[fields.current_password]
type = "password"
label = "Current Password"
section = "security"

[fields.new_password]
type = "password"
label = "New Password"
section = "security"
validation = { min_length = 8, max_length = 128, pattern = '.*[0-9].*' }

[fields.confirm_password]
type = "password"
label = "Confirm New Password"
section = "security"
validation = { confirm = "new_password" }

[fields.two_factor_enabled]
type = "boolean"
label = "Two-Factor Authentication"
section = "security"

[fields.verified]
type = "boolean"
label = "Verified Provider"
section = "permissions"

[fields.account_status]
type = "select"
label = "Account Status"
section = "permissions"
options = ["active", "suspended", "deactivated"]

[fields.internal_notes]
type = "textarea"
label = "Internal Notes"
section = "system"
rows = 6
validation = { max_length = 2000 }

[fields.last_login]
type = "date"
label = "Last Login"
section = "system"

[fields.email_notifications]
type = "boolean"
label = "Email Notifications"
section = "notifications"

[fields.sms_notifications]
type = "boolean"
label = "SMS Notifications"
section = "notifications"

[fields.notification_frequency]
type = "select"
label = "Notification Frequency"
section = "notifications"
options = ["immediate", "daily", "weekly"]

# ---------------------------------------------------------------------------
# Roles
# ---------------------------------------------------------------------------

[roles.admin]
sections = ["personal", "contact", "preferences", "security", "permissions", "system", "notifications"]
fields = [
    "first_name", "last_name", "avatar", "role",
    "email", "phone",
    "language", "timezone",
    "current_password", "new_password", "confirm_password", "two_factor_enabled",
    "verified", "account_status",
    "internal_notes", "last_login",
    "email_notifications", "notification_frequency",
]

[roles.admin.overrides.role]
required = true

[roles.admin.permissions]
can_edit = [
    "first_name", "last_name", "avatar", "role", "email", "phone", "language", "timezone",
    "current_password", "new_password", "confirm_password", "two_factor_enabled",
    "verified", "account_status", "internal_notes", "email_notifications",
    "notification_frequency",
]
can_view = [
    "first_name", "last_name", "avatar", "role", "email", "phone", "language", "timezone",
    "current_password", "new_password", "confirm_password", "two_factor_enabled",
    "verified", "account_status", "internal_notes", "last_login", "email_notifications",
    "notification_frequency",
]
read_only = ["last_login"]
can_delete = true
can_change_email = true
can_upload_image = true
can_deactivate = true
can_manage_system = true
can_change_role = true
can_manage_permissions = true
can_view_audit_log = true
can_export_data = true
can_verify_providers = true

[roles.staff]
sections = ["personal", "contact", "business", "documents", "preferences", "security", "notifications"]
fields = [
    "first_name", "last_name", "role",
    "email", "phone", "city",
    "business_name", "tax_id", "service_area",
    "certifications", "id_document",
    "language", "timezone",
    "current_password", "new_password", "confirm_password", "two_factor_enabled",
    "email_notifications", "notification_frequency",
]

[roles.staff.permissions]
can_edit = [
    "first_name", "last_name", "email", "phone", "city", "language", "timezone",
    "current_password", "new_password", "confirm_password", "two_factor_enabled",
    "email_notifications", "notification_frequency",
]
can_view = [
    "first_name", "last_name", "role", "email", "phone", "city",
    "business_name", "tax_id", "service_area", "certifications", "id_document",
    "language", "timezone", "current_password", "new_password", "confirm_password",
    "two_factor_enabled", "email_notifications", "notification_frequency",
]
read_only = [
    "role", "email", "business_name", "tax_id", "service_area", "certifications", "id_document",
]
can_delete = false
can_change_email = false
can_upload_image = true
can_deactivate = false
can_manage_system = false
can_view_audit_log = true
can_verify_providers = true

[roles.service_provider]
sections = ["personal", "contact", "business", "documents", "preferences", "security", "notifications"]
fields = [
    "first_name", "last_name", "date_of_birth", "avatar", "bio", "role",
    "email", "phone", "address", "city", "website",
    "business_name", "tax_id", "service_area", "hourly_rate",
    "certifications", "id_document",
    "language", "timezone", "marketing_opt_in",
    "current_password", "new_password", "confirm_password", "two_factor_enabled",
    "email_notifications", "sms_notifications", "notification_frequency",
]

[roles.service_provider.overrides.bio]
label = "Professional Bio"
required = true
rows = 6
placeholder = "Describe your services and experience"
validation = { required = true, min_length = 50, max_length = 1000 }

[roles.service_provider.permissions]
can_edit = [
    "first_name", "last_name", "date_of_birth", "avatar", "bio",
    "phone", "address", "city", "website",
    "business_name", "tax_id", "service_area", "hourly_rate",
    "certifications", "id_document",
    "language", "timezone", "marketing_opt_in",
    "current_password", "new_password", "confirm_password", "two_factor_enabled",
    "email_notifications", "sms_notifications", "notification_frequency",
]
can_view = [
    "first_name", "last_name", "date_of_birth", "avatar", "bio", "role",
    "email", "phone", "address", "city", "website",
    "business_name", "tax_id", "service_area", "hourly_rate",
    "certifications", "id_document",
    "language", "timezone", "marketing_opt_in",
    "current_password", "new_password", "confirm_password", "two_factor_enabled",
    "email_notifications", "sms_notifications", "notification_frequency",
]
read_only = ["role", "email"]
can_delete = false
can_change_email = false
can_upload_image = true
can_deactivate = true
can_manage_system = false
can_export_data = true

[roles.client]
sections = ["personal", "contact", "preferences", "security", "notifications"]
fields = [
    "first_name", "last_name", "date_of_birth", "avatar", "bio", "role",
    "email", "phone", "address", "city",
    "language", "timezone", "marketing_opt_in",
    "current_password", "new_password", "confirm_password", "two_factor_enabled",
    "email_notifications", "sms_notifications", "notification_frequency",
]

[roles.client.permissions]
can_edit = [
    "first_name", "last_name", "date_of_birth", "avatar", "bio",
    "phone", "address", "city",
    "language", "timezone", "marketing_opt_in",
    "current_password", "new_password", "confirm_password", "two_factor_enabled",
    "email_notifications", "sms_notifications", "notification_frequency",
]
can_view = [
    "first_name", "last_name", "date_of_birth", "avatar", "bio", "role",
    "email", "phone", "address", "city",
    "language", "timezone", "marketing_opt_in",
    "current_password", "new_password", "confirm_password", "two_factor_enabled",
    "email_notifications", "sms_notifications", "notification_frequency",
]
read_only = ["role", "email"]
can_delete = false
can_change_email = false
can_upload_image = true
can_deactivate = true
can_manage_system = false
"#,
    )
}
