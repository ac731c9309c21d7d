use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docksetup")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(
    about = "Install the AutoDock docking toolchain and the PyMOL viewer",
    long_about = "Downloads the AutoDock 4.2.6 suite for this OS, installs autodock4 and \
                  autogrid4 into a binary directory, then installs PyMOL with conda \
                  (or pip when conda is not available)."
)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Flags for the default `install` command
    #[command(flatten)]
    pub install: InstallArgs,
}

#[derive(Subcommand)]
pub enum Command {
    /// Install the toolchain and the viewer (default)
    Install(InstallArgs),

    /// Show what would be installed on this machine, without changing anything
    Detect(DetectArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct InstallArgs {
    /// Directory to place autodock4 and autogrid4 in [default: ~/.local/bin]
    #[arg(long, env = "DOCKSETUP_INSTALL_DIR", value_name = "DIR")]
    pub install_dir: Option<PathBuf>,

    /// Treat the host as this OS (macos, linux, windows) instead of detecting it
    #[arg(long, value_name = "OS")]
    pub os: Option<String>,

    /// Keep the temporary download directory for inspection
    #[arg(long)]
    pub keep_temp: bool,

    /// Check the installed binaries and package afterwards
    #[arg(long)]
    pub verify: bool,

    /// Skip the AutoDock toolchain
    #[arg(long)]
    pub skip_toolchain: bool,

    /// Skip the PyMOL viewer
    #[arg(long)]
    pub skip_viewer: bool,

    /// Package manager used for the viewer [default: conda]
    #[arg(long, env = "DOCKSETUP_PACKAGE_MANAGER", value_name = "PROGRAM")]
    pub package_manager: Option<String>,

    /// Channel the viewer is installed from [default: schrodinger]
    #[arg(long, value_name = "NAME")]
    pub channel: Option<String>,

    /// Python interpreter for the pip fallback [default: python3 or python on PATH]
    #[arg(long, value_name = "PATH")]
    pub python: Option<PathBuf>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct DetectArgs {
    /// Treat the host as this OS instead of detecting it
    #[arg(long, value_name = "OS")]
    pub os: Option<String>,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective settings (file merged with defaults)
    Show,

    /// Print the config file location
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["docksetup"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_install_flags() {
        let cli = Cli::try_parse_from([
            "docksetup",
            "-vv",
            "install",
            "--install-dir",
            "/opt/bin",
            "--os",
            "linux",
            "--keep-temp",
            "--skip-viewer",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Install(args)) => {
                assert_eq!(args.install_dir, Some(PathBuf::from("/opt/bin")));
                assert_eq!(args.os.as_deref(), Some("linux"));
                assert!(args.keep_temp);
                assert!(args.skip_viewer);
                assert!(!args.skip_toolchain);
            }
            _ => panic!("Expected install command"),
        }
    }

    #[test]
    fn test_bare_invocation_takes_install_flags() {
        let cli = Cli::try_parse_from(["docksetup", "--skip-toolchain", "--channel", "conda-forge"])
            .unwrap();
        assert!(cli.command.is_none());
        assert!(cli.install.skip_toolchain);
        assert_eq!(cli.install.channel.as_deref(), Some("conda-forge"));
    }

    #[test]
    fn test_detect_json() {
        let cli = Cli::try_parse_from(["docksetup", "detect", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Detect(DetectArgs { json: true, .. }))));
    }
}
