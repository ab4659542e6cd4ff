use itertools::Itertools;

use crate::Result;
use crate::SettingKey;
use crate::Settings;
use crate::Status;

/// Whether a destructive sync may start.
///
/// Only checks that the destination is configured.  It does not look at the
/// filesystem: existence, permissions and overlap with the vault are the sync
/// engine's problem.
pub fn is_syncable(settings: &Settings) -> bool {
    !(settings.blog_dir.is_empty() || settings.site_dir.is_empty())
}

/// Required fields that are still empty.
pub fn missing_fields(settings: &Settings) -> Vec<SettingKey> {
    let mut missing = Vec::new();
    if settings.site_dir.is_empty() {
        missing.push(SettingKey::SiteDir);
    }
    if settings.blog_dir.is_empty() {
        missing.push(SettingKey::BlogDir);
    }
    missing
}

/// [`is_syncable`], reporting what is missing.
pub fn check_syncable(settings: &Settings) -> Result<()> {
    let missing = missing_fields(settings);
    if missing.is_empty() {
        return Ok(());
    }
    Err(Status::new("Sync not permitted")
        .context_with(|c| c.insert("Missing", missing.iter().join(", "))))
}
