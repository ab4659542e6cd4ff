use std::path;

use anyhow::Context as _;
use hugo_publish_config::SettingKey;
use hugo_publish_config::Settings;

use crate::args;

/// Write a settings file with the default values
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct InitArgs {
    /// Target directory
    #[arg(default_value = "./", value_hint = clap::ValueHint::DirPath)]
    directory: path::PathBuf,
}

impl InitArgs {
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.directory)
            .with_context(|| format!("Could not create {}", self.directory.display()))?;
        let path = self.directory.join(hugo_publish_config::SETTINGS_FILE_NAME);
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }

        Settings::default().to_file(&path)?;
        log::info!("Created {}", path.display());

        Ok(())
    }
}

/// Print a single setting
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct GetArgs {
    /// Setting name, e.g. `blog_dir`
    #[arg(value_parser = parse_key)]
    key: SettingKey,

    #[command(flatten, next_help_heading = "CONFIG")]
    config: args::ConfigArgs,
}

impl GetArgs {
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        let settings = self.config.load_settings()?;
        println!("{}", settings.get(self.key));
        Ok(())
    }
}

/// Change a single setting and save it
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct SetArgs {
    /// Setting name, e.g. `blog_dir`
    #[arg(value_parser = parse_key)]
    key: SettingKey,

    /// New value, stored as given (use `true`/`false` for toggles)
    #[arg(allow_hyphen_values = true)]
    value: String,

    #[command(flatten, next_help_heading = "CONFIG")]
    config: args::ConfigArgs,
}

impl SetArgs {
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        let path = self.config.settings_path()?;
        let mut settings = if path.exists() {
            Settings::from_file(&path)?
        } else {
            Settings::default()
        };

        settings.set(self.key, &self.value)?;
        if self.key == SettingKey::PageBundle && settings.page_bundle {
            log::info!("static_dir is unused while page_bundle is enabled");
        }
        settings.to_file(&path)?;
        log::info!("Set {} in {}", self.key, path.display());

        if self.key == SettingKey::KeepList {
            if let Err(err) = hugo_publish_config::resolve::resolved_keep_patterns(&settings) {
                let err = anyhow::Error::new(err).context(format!(
                    "keep_list `{}` will be rejected at sync time",
                    settings.keep_list
                ));
                log::warn!("{err:#}");
            }
        }

        Ok(())
    }
}

fn parse_key(raw: &str) -> Result<SettingKey, String> {
    raw.parse::<SettingKey>().map_err(|_| {
        let known = SettingKey::ALL.map(|k| k.as_str()).join(", ");
        format!("unknown setting `{raw}`, expected one of: {known}")
    })
}
