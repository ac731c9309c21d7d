use crate::Context;
use crate::cli::{ConfigCommand, InstallArgs};
use crate::config::{self, Settings};
use anyhow::{Context as _, Result};

pub fn run(_ctx: &Context, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show(),
        ConfigCommand::Path => {
            println!("{}", config::config_file()?.display());
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let resolved = Settings::load()?.resolve(&InstallArgs::default());
    let rendered =
        toml::to_string_pretty(&resolved).context("Could not render settings as TOML")?;
    print!("{}", rendered);
    Ok(())
}
