use anyhow::Context as _;
use hugo_publish_config::resolve;

use crate::args;

/// Verify a sync may run and list the directories it would clear
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct CheckArgs {
    #[command(flatten, next_help_heading = "CONFIG")]
    config: args::ConfigArgs,
}

impl CheckArgs {
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        let settings = self.config.load_settings()?;

        hugo_publish_config::check_syncable(&settings)?;

        let keep = resolve::resolved_keep_patterns(&settings)
            .with_context(|| format!("keep_list `{}` is invalid", settings.keep_list))?;

        for target in resolve::wipe_targets(&settings) {
            println!("{}", target.display());
        }
        log::info!(
            "Ready to sync; {} keep pattern(s) protect existing files",
            keep.len()
        );

        Ok(())
    }
}
