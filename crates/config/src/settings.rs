use std::fmt;
use std::path;
use std::str::FromStr;

use crate::Result;
use crate::Status;

/// Default name of the persisted settings file.
pub const SETTINGS_FILE_NAME: &str = "_hugo_publish.yml";

/// Everything a sync needs to know, exactly as the user typed it.
///
/// Derived values (absolute directories, exclusion list, keep patterns) are not
/// stored here; see [`crate::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Settings {
    /// Notes carrying this tag are published.  Empty publishes everything.
    pub blog_tag: String,
    /// Write `blog_tag` into the exported front matter.
    pub export_blog_tag: bool,
    /// Comma-separated, vault-relative directories.
    pub exclude_dir: String,
    /// Absolute path to the Hugo site root.
    pub site_dir: String,
    /// Relative to `site_dir`.  Wiped before each sync.
    pub blog_dir: String,
    /// Export posts as page bundles instead of sharing a static tree.
    pub page_bundle: bool,
    /// Relative to `site_dir/static`.  Wiped before each sync unless `page_bundle`.
    pub static_dir: String,
    /// Comma-separated regular expressions for files the pre-sync wipe must keep.
    pub keep_list: String,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            blog_tag: "blog".to_owned(),
            export_blog_tag: true,
            exclude_dir: String::new(),
            site_dir: String::new(),
            blog_dir: String::new(),
            page_bundle: false,
            static_dir: "ob".to_owned(),
            keep_list: String::new(),
        }
    }
}

impl Settings {
    pub fn from_file<P: Into<path::PathBuf>>(path: P) -> Result<Settings> {
        Self::from_file_internal(path.into())
    }

    fn from_file_internal(path: path::PathBuf) -> Result<Settings> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Status::new("Failed to read settings")
                .with_source(e)
                .context_with(|c| c.insert("Path", path.display().to_string()))
        })?;

        let settings = if content.trim().is_empty() {
            Settings::default()
        } else {
            serde_yaml::from_str(&content).map_err(|e| {
                Status::new("Failed to parse settings")
                    .with_source(e)
                    .context_with(|c| c.insert("Path", path.display().to_string()))
            })?
        };

        Ok(settings)
    }

    pub fn from_cwd<P: Into<path::PathBuf>>(cwd: P) -> Result<Settings> {
        Self::from_cwd_internal(cwd.into())
    }

    fn from_cwd_internal(cwd: path::PathBuf) -> Result<Settings> {
        let file_path = find_project_file(&cwd, SETTINGS_FILE_NAME);
        let settings = file_path
            .map(|p| {
                log::debug!("Using settings file `{}`", p.display());
                Self::from_file(&p)
            })
            .unwrap_or_else(|| {
                log::warn!(
                    "No {SETTINGS_FILE_NAME} file found in current directory, using default settings."
                );
                Ok(Settings::default())
            })?;
        Ok(settings)
    }

    /// Persist the settings, replacing whatever is at `path`.
    pub fn to_file<P: AsRef<path::Path>>(&self, path: P) -> Result<()> {
        self.to_file_internal(path.as_ref())
    }

    fn to_file_internal(&self, path: &path::Path) -> Result<()> {
        let content = serde_yaml::to_string(self).map_err(|e| {
            Status::new("Failed to serialize settings")
                .with_source(e)
                .context_with(|c| c.insert("Path", path.display().to_string()))
        })?;
        std::fs::write(path, content).map_err(|e| {
            Status::new("Failed to write settings")
                .with_source(e)
                .context_with(|c| c.insert("Path", path.display().to_string()))
        })?;
        log::debug!("Saved settings to `{}`", path.display());
        Ok(())
    }

    /// Raw form value of a single field.
    pub fn get(&self, key: SettingKey) -> String {
        match key {
            SettingKey::BlogTag => self.blog_tag.clone(),
            SettingKey::ExportBlogTag => self.export_blog_tag.to_string(),
            SettingKey::ExcludeDir => self.exclude_dir.clone(),
            SettingKey::SiteDir => self.site_dir.clone(),
            SettingKey::BlogDir => self.blog_dir.clone(),
            SettingKey::PageBundle => self.page_bundle.to_string(),
            SettingKey::StaticDir => self.static_dir.clone(),
            SettingKey::KeepList => self.keep_list.clone(),
        }
    }

    /// Apply one edit from the settings surface.
    ///
    /// Text fields are stored verbatim; nothing is trimmed or validated here.
    pub fn set(&mut self, key: SettingKey, value: &str) -> Result<()> {
        match key {
            SettingKey::BlogTag => self.blog_tag = value.to_owned(),
            SettingKey::ExportBlogTag => self.export_blog_tag = parse_flag(key, value)?,
            SettingKey::ExcludeDir => self.exclude_dir = value.to_owned(),
            SettingKey::SiteDir => self.site_dir = value.to_owned(),
            SettingKey::BlogDir => self.blog_dir = value.to_owned(),
            SettingKey::PageBundle => self.page_bundle = parse_flag(key, value)?,
            SettingKey::StaticDir => self.static_dir = value.to_owned(),
            SettingKey::KeepList => self.keep_list = value.to_owned(),
        }
        Ok(())
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converted = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", converted.trim_end())
    }
}

fn parse_flag(key: SettingKey, value: &str) -> Result<bool> {
    value.parse::<bool>().map_err(|e| {
        Status::new("Invalid value")
            .with_source(e)
            .context_with(|c| {
                c.insert("Setting", key.to_string())
                    .insert("Value", value.to_owned())
            })
    })
}

/// Names a single [`Settings`] field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SettingKey {
    BlogTag,
    ExportBlogTag,
    ExcludeDir,
    SiteDir,
    BlogDir,
    PageBundle,
    StaticDir,
    KeepList,
}

impl SettingKey {
    pub const ALL: [SettingKey; 8] = [
        SettingKey::BlogTag,
        SettingKey::ExportBlogTag,
        SettingKey::ExcludeDir,
        SettingKey::SiteDir,
        SettingKey::BlogDir,
        SettingKey::PageBundle,
        SettingKey::StaticDir,
        SettingKey::KeepList,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::BlogTag => "blog_tag",
            SettingKey::ExportBlogTag => "export_blog_tag",
            SettingKey::ExcludeDir => "exclude_dir",
            SettingKey::SiteDir => "site_dir",
            SettingKey::BlogDir => "blog_dir",
            SettingKey::PageBundle => "page_bundle",
            SettingKey::StaticDir => "static_dir",
            SettingKey::KeepList => "keep_list",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = Status;

    fn from_str(s: &str) -> Result<Self> {
        SettingKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                Status::new("Unknown setting").context_with(|c| c.insert("Setting", s.to_owned()))
            })
    }
}

pub fn find_project_file<P: Into<path::PathBuf>>(dir: P, name: &str) -> Option<path::PathBuf> {
    find_project_file_internal(dir.into(), name)
}

fn find_project_file_internal(dir: path::PathBuf, name: &str) -> Option<path::PathBuf> {
    let mut file_path = dir;
    file_path.push(name);
    while !file_path.exists() {
        file_path.pop(); // filename
        let hit_bottom = !file_path.pop();
        if hit_bottom {
            return None;
        }
        file_path.push(name);
    }
    Some(file_path)
}

#[cfg(test)]
mod test {
    use super::*;

    fn write_settings(dir: &path::Path, content: &str) -> path::PathBuf {
        let path = dir.join(SETTINGS_FILE_NAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.blog_tag, "blog");
        assert!(settings.export_blog_tag);
        assert_eq!(settings.exclude_dir, "");
        assert_eq!(settings.blog_dir, "");
        assert!(!settings.page_bundle);
        assert_eq!(settings.static_dir, "ob");
        assert_eq!(settings.site_dir, "");
        assert_eq!(settings.keep_list, "");
    }

    #[test]
    fn from_file_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(
            dir.path(),
            "site_dir: /home/me/site\nblog_dir: content/posts\npage_bundle: true\n",
        );
        let actual = Settings::from_file(path).unwrap();
        assert_eq!(actual.site_dir, "/home/me/site");
        assert_eq!(actual.blog_dir, "content/posts");
        assert!(actual.page_bundle);
        // Untouched fields keep their defaults
        assert_eq!(actual.blog_tag, "blog");
        assert_eq!(actual.static_dir, "ob");
    }

    #[test]
    fn from_file_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(dir.path(), "\n");
        let actual = Settings::from_file(path).unwrap();
        assert_eq!(actual, Settings::default());
    }

    #[test]
    fn from_file_invalid_syntax() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(dir.path(), "site_dir: [unclosed\n");
        let result = Settings::from_file(path);
        assert!(result.is_err());
    }

    #[test]
    fn from_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = Settings::from_file(dir.path().join("does_not_exist.yml"));
        assert!(result.is_err());
    }

    #[test]
    fn to_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        let mut expected = Settings::default();
        expected.site_dir = "/site".to_owned();
        expected.keep_list = r".*\.html,.*\.toml".to_owned();
        expected.to_file(&path).unwrap();

        let actual = Settings::from_file(&path).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn from_cwd_ok() {
        let dir = tempfile::tempdir().unwrap();
        write_settings(dir.path(), "blog_tag: published\n");
        let child = dir.path().join("child");
        std::fs::create_dir(&child).unwrap();

        let actual = Settings::from_cwd(&child).unwrap();
        assert_eq!(actual.blog_tag, "published");
    }

    #[test]
    fn from_cwd_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let actual = Settings::from_cwd(dir.path()).unwrap();
        assert_eq!(actual, Settings::default());
    }

    #[test]
    fn find_project_file_same_dir() {
        let dir = tempfile::tempdir().unwrap();
        let expected = write_settings(dir.path(), "");
        let actual = find_project_file(dir.path(), SETTINGS_FILE_NAME).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn find_project_file_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let expected = write_settings(dir.path(), "");
        let child = dir.path().join("a").join("b");
        std::fs::create_dir_all(&child).unwrap();
        let actual = find_project_file(&child, SETTINGS_FILE_NAME).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn set_text_field_verbatim() {
        let mut settings = Settings::default();
        settings.set(SettingKey::ExcludeDir, "templates, tmp,").unwrap();
        assert_eq!(settings.exclude_dir, "templates, tmp,");
        assert_eq!(settings.get(SettingKey::ExcludeDir), "templates, tmp,");
    }

    #[test]
    fn set_flag() {
        let mut settings = Settings::default();
        settings.set(SettingKey::PageBundle, "true").unwrap();
        assert!(settings.page_bundle);
        settings.set(SettingKey::ExportBlogTag, "false").unwrap();
        assert!(!settings.export_blog_tag);
        assert_eq!(settings.get(SettingKey::ExportBlogTag), "false");
    }

    #[test]
    fn set_flag_invalid() {
        let mut settings = Settings::default();
        let result = settings.set(SettingKey::PageBundle, "yes");
        assert!(result.is_err());
        assert!(!settings.page_bundle);
    }

    #[test]
    fn setting_key_parse() {
        for key in SettingKey::ALL {
            assert_eq!(key.as_str().parse::<SettingKey>().unwrap(), key);
        }
        assert!("vault_dir".parse::<SettingKey>().is_err());
    }
}
