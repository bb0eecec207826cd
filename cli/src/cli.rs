use std::path::PathBuf;

use clap::builder::{PossibleValue, PossibleValuesParser};
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Parser, Subcommand};

use crate::toggles::registry;
use crate::toggles::{Toggle, ToggleKind};

/// Id of the argument group holding every per-toggle flag.
pub const TOGGLES_GROUP: &str = "toggles";

/// Utility to edit the Rolling Rhino Remix configuration.
///
/// rhino-config customises what rhino-update installs and keeps updated,
/// such as an alternate kernel or an additional package manager.
///
/// Some settings can cause issues; read the documentation before
/// enabling them.
#[derive(Parser, Debug)]
#[command(name = "rhino-config", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Check toggle states and report what would change, without running anything
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Override the configuration root (default: ~/.rhino/config)
    #[arg(long, global = true, env = "RHINO_CONFIG_ROOT")]
    pub root: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Enable a config option, manually or interactively
    ///
    /// This lets rhino-update download, install and keep a specific option
    /// updated, such as the latest Linux kernel
    Enable(EnableOpts),
    /// Disable config options enabled through this utility
    Disable(DisableOpts),
    /// Switch to an alternate kernel
    #[command(subcommand)]
    SwitchKernel(SwitchKernelCommand),
    /// Show the state of every toggle
    Status,
    /// Print a shell completion script to stdout
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the log file of this run.
    #[must_use]
    pub const fn log_name(&self) -> &'static str {
        match self {
            Self::Enable(_) => "enable",
            Self::Disable(_) => "disable",
            Self::SwitchKernel(_) => "switch-kernel",
            Self::Status => "status",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}

/// Options for the `enable` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct EnableOpts {
    /// Run interactively
    ///
    /// Steps through each option one by one, asking before enabling it
    #[arg(
        short,
        long,
        conflicts_with = TOGGLES_GROUP,
        required_unless_present = TOGGLES_GROUP
    )]
    pub interactive: bool,

    #[command(flatten)]
    pub toggles: EnableFlags,
}

/// Options for the `disable` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct DisableOpts {
    #[command(flatten)]
    pub toggles: DisableFlags,
}

/// `switch-kernel` actions.
#[derive(Subcommand, Debug, Clone)]
pub enum SwitchKernelCommand {
    /// Switch to an alternate kernel
    Enable(KernelArg),
    /// Stop using an alternate kernel
    Disable(KernelArg),
}

/// Kernel selected on the command line.
#[derive(Parser, Debug, Clone)]
pub struct KernelArg {
    /// Kernel to switch
    #[arg(value_parser = kernel_values())]
    pub kernel: String,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

fn kernel_values() -> PossibleValuesParser {
    PossibleValuesParser::new(registry::kernels().map(|t| PossibleValue::new(t.id).help(t.name)))
}

/// One `--<id>` flag per feature toggle, generated from the registry.
///
/// `DISABLE` selects the disable wording and makes at least one flag
/// required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToggleFlags<const DISABLE: bool> {
    selected: Vec<&'static str>,
}

/// Flags of `enable`.
pub type EnableFlags = ToggleFlags<false>;
/// Flags of `disable`.
pub type DisableFlags = ToggleFlags<true>;

impl<const DISABLE: bool> ToggleFlags<DISABLE> {
    /// Requested toggles, in registry order.
    pub fn selected(&self) -> impl Iterator<Item = &'static Toggle> + '_ {
        registry::features().filter(|t| self.selected.contains(&t.id))
    }

    /// Whether no flag was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

impl<const DISABLE: bool> clap::FromArgMatches for ToggleFlags<DISABLE> {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let mut flags = Self::default();
        flags.update_from_arg_matches(matches)?;
        Ok(flags)
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        for toggle in registry::features() {
            if matches!(matches.try_get_one::<bool>(toggle.id), Ok(Some(true)))
                && !self.selected.contains(&toggle.id)
            {
                self.selected.push(toggle.id);
            }
        }
        Ok(())
    }
}

impl<const DISABLE: bool> clap::Args for ToggleFlags<DISABLE> {
    fn group_id() -> Option<clap::Id> {
        Some(clap::Id::from(TOGGLES_GROUP))
    }

    fn augment_args(cmd: clap::Command) -> clap::Command {
        let cmd = registry::features().fold(cmd, |cmd, toggle| {
            let help = if DISABLE {
                toggle.disable_help
            } else {
                toggle.enable_help
            };
            let arg = Arg::new(toggle.id)
                .long(toggle.id)
                .action(ArgAction::SetTrue)
                .help(help);
            cmd.arg(match toggle.short {
                Some(short) => arg.short(short),
                None => arg,
            })
        });
        cmd.group(
            ArgGroup::new(TOGGLES_GROUP)
                .multiple(true)
                .required(DISABLE)
                .args(registry::ids(ToggleKind::Feature)),
        )
    }

    fn augment_args_for_update(cmd: clap::Command) -> clap::Command {
        Self::augment_args(cmd)
    }
}
