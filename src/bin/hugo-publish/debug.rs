use hugo_publish_config::resolve;

use crate::args;

/// Print settings debug information
#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
pub(crate) enum DebugCommands {
    /// Prints the settings as stored
    Config {
        #[command(flatten, next_help_heading = "CONFIG")]
        config: args::ConfigArgs,
    },

    /// Prints the values a sync would use
    Resolved {
        #[command(flatten, next_help_heading = "CONFIG")]
        config: args::ConfigArgs,
    },

    /// Prints whether the pre-sync wipe keeps each path
    Keep {
        /// Filenames or site-relative paths
        #[arg(required = true)]
        paths: Vec<String>,

        #[command(flatten, next_help_heading = "CONFIG")]
        config: args::ConfigArgs,
    },
}

impl DebugCommands {
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        match self {
            Self::Config { config } => {
                let settings = config.load_settings()?;
                println!("{settings}");
            }
            Self::Resolved { config } => {
                let settings = config.load_settings()?;
                println!("exclude_dirs:");
                for dir in resolve::resolved_exclude_dirs(&settings) {
                    println!("  - {dir:?}");
                }
                println!(
                    "blog_dir: {}",
                    resolve::resolved_blog_dir(&settings).display()
                );
                println!(
                    "static_dir: {}",
                    resolve::resolved_static_dir(&settings).display()
                );
                println!("keep_patterns:");
                for pattern in &resolve::resolved_keep_patterns(&settings)? {
                    println!("  - {:?}", pattern.as_str());
                }
                println!(
                    "syncable: {}",
                    hugo_publish_config::is_syncable(&settings)
                );
            }
            Self::Keep { paths, config } => {
                let settings = config.load_settings()?;
                let keep = resolve::resolved_keep_patterns(&settings)?;
                for path in paths {
                    let verdict = if keep.is_match(path) { "keep" } else { "delete" };
                    println!("{verdict}\t{path}");
                }
            }
        }

        Ok(())
    }
}
