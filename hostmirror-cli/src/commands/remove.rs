use anyhow::bail;
use colored::Colorize;

use crate::mappings_file::MappingsFile;

#[derive(clap::Args)]
pub struct Args {
    #[arg(help = "Position of the mapping as shown by 'list', starting at 1")]
    position: usize,
}

pub fn remove(args: &Args, config_arg: &Option<String>) -> anyhow::Result<()> {
    let mut file = MappingsFile::load(config_arg)?;

    if args.position == 0 || args.position > file.store.len() {
        bail!(
            "no mapping at position {}, the list has {} entries",
            args.position,
            file.store.len()
        );
    }

    let removed = file.store.remove(args.position - 1)?;
    file.save()?;

    println!(
        "{}",
        format!("Removed mapping {} -> {}", removed.source, removed.proxy).green()
    );

    Ok(())
}
