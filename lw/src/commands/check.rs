use clap::Args;
use eyre::Result;

use super::{ModuleArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub modules: ModuleArgs,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let tree = self.modules.load().unwrap_or_exit();
        let report = ops::check(&tree, &self.modules.files, self.modules.filter());

        report.render(&mut TerminalOutput::new());
        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
