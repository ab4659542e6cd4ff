mod args;
mod check;
mod debug;
mod edit;

use std::io::Write as _;

use clap::Parser;

fn main() {
    human_panic::setup_panic!();
    let result = run();
    proc_exit::exit(result);
}

fn run() -> proc_exit::ExitResult {
    let cli = Cli::parse();

    cli.color.write_global();
    let colored_stderr = !matches!(
        anstream::AutoStream::choice(&std::io::stderr()),
        anstream::ColorChoice::Never
    );
    init_logging(cli.verbose.log_level_filter(), colored_stderr);

    match cli.command.run() {
        Ok(()) => Ok(()),
        Err(err) => {
            log::error!("{err:#}");
            proc_exit::Code::FAILURE.ok()
        }
    }
}

/// Keep a Hugo site in sync with the tagged notes of a vault
#[derive(Clone, Debug, clap::Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
enum Command {
    Init(edit::InitArgs),
    Get(edit::GetArgs),
    Set(edit::SetArgs),
    Check(check::CheckArgs),
    #[command(subcommand)]
    Debug(debug::DebugCommands),
}

impl Command {
    fn run(&self) -> anyhow::Result<()> {
        match self {
            Self::Init(cmd) => cmd.run(),
            Self::Get(cmd) => cmd.run(),
            Self::Set(cmd) => cmd.run(),
            Self::Check(cmd) => cmd.run(),
            Self::Debug(cmd) => cmd.run(),
        }
    }
}

fn init_logging(level: log::LevelFilter, colored: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter(None, level);
    builder.write_style(if colored {
        env_logger::WriteStyle::Always
    } else {
        env_logger::WriteStyle::Never
    });

    if level == log::LevelFilter::Trace || level == log::LevelFilter::Debug {
        builder.format_timestamp_secs();
    } else {
        builder.format(move |f, record| {
            let style = if colored {
                level_style(record.level())
            } else {
                anstyle::Style::new()
            };
            writeln!(
                f,
                "{style}{}{style:#}: {}",
                record.level().as_str().to_lowercase(),
                record.args()
            )
        });
    }

    builder.init();
}

fn level_style(level: log::Level) -> anstyle::Style {
    match level {
        log::Level::Error => anstyle::AnsiColor::Red.on_default().bold(),
        log::Level::Warn => anstyle::AnsiColor::Yellow.on_default().bold(),
        log::Level::Info => anstyle::AnsiColor::Green.on_default(),
        log::Level::Debug | log::Level::Trace => anstyle::Style::new().dimmed(),
    }
}

#[test]
fn verify_app() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
