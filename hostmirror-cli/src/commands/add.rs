use colored::Colorize;

use crate::mappings_file::MappingsFile;

#[derive(clap::Args)]
pub struct Args {
    #[arg(help = "Domain of the site to mirror, e.g. claude.ai")]
    source: String,

    #[arg(help = "Domain the mirror is served from, e.g. claude.hubp.de")]
    proxy: String,
}

pub fn add(args: &Args, config_arg: &Option<String>) -> anyhow::Result<()> {
    let mut file = MappingsFile::load(config_arg)?;

    let mapping = file.store.add(&args.source, &args.proxy)?;
    let added = format!("Added mapping {} -> {}", mapping.source, mapping.proxy);

    file.save()?;

    println!("{}", added.green());
    println!("{} mapping(s) in {}", file.store.len(), file.path().display());

    Ok(())
}
