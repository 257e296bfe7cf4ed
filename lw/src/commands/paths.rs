use clap::Args;
use eyre::Result;

use super::{ModuleArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct PathsCommand {
    #[command(flatten)]
    pub modules: ModuleArgs,

    /// Include read-only (state) paths
    #[arg(long)]
    pub all: bool,
}

impl PathsCommand {
    pub fn run(&self) -> Result<()> {
        let tree = self.modules.load().unwrap_or_exit();
        let report = ops::paths(&tree, self.modules.filter(), self.all)?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
