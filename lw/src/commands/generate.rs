use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use leafwise_schema::{DEFAULT_DESCRIPTION, DEFAULT_ID, DEFAULT_SCHEMA, DEFAULT_TITLE, DocumentMeta};

use super::{ModuleArgs, UnwrapOrExit};
use crate::{
    ops::{self, generate::GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub modules: ModuleArgs,

    /// Output file for the schema document
    #[arg(short, long, default_value = "schema.json")]
    pub outfile: PathBuf,

    /// Value of the document's `$id`
    #[arg(long, default_value = DEFAULT_ID)]
    pub id: String,

    /// Value of the document's `title`
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Value of the document's `description`
    #[arg(long, default_value = DEFAULT_DESCRIPTION)]
    pub description: String,

    /// Print the document instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Do not replace an existing output file
    #[arg(long)]
    pub no_clobber: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let tree = self.modules.load().unwrap_or_exit();

        let report = ops::generate(
            &tree,
            GenerateOptions {
                filter: self.modules.filter(),
                meta: self.meta(),
                outfile: &self.outfile,
                dry_run: self.dry_run,
                no_clobber: self.no_clobber,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }

    fn meta(&self) -> DocumentMeta {
        DocumentMeta {
            id: self.id.clone(),
            schema: DEFAULT_SCHEMA.to_string(),
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}
