use std::env;
use std::path;

use hugo_publish_config::SETTINGS_FILE_NAME;
use hugo_publish_config::Settings;
use hugo_publish_config::find_project_file;

#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ConfigArgs {
    /// Settings file to use [default: nearest _hugo_publish.yml]
    #[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    config: Option<path::PathBuf>,
}

impl ConfigArgs {
    /// Where settings are read from and saved to.
    ///
    /// Falls back to `./_hugo_publish.yml` when nothing exists yet.
    pub(crate) fn settings_path(&self) -> anyhow::Result<path::PathBuf> {
        if let Some(config) = self.config.as_ref() {
            return Ok(config.clone());
        }
        let cwd = env::current_dir()?;
        let path = find_project_file(&cwd, SETTINGS_FILE_NAME)
            .unwrap_or_else(|| cwd.join(SETTINGS_FILE_NAME));
        Ok(path)
    }

    pub(crate) fn load_settings(&self) -> anyhow::Result<Settings> {
        let settings = if let Some(config) = self.config.as_deref() {
            log::debug!("Using settings file `{}`", config.display());
            Settings::from_file(config)?
        } else {
            let cwd = env::current_dir()?;
            Settings::from_cwd(cwd)?
        };
        Ok(settings)
    }
}
