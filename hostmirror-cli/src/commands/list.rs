use colored::Colorize;

use crate::mappings_file::MappingsFile;

#[derive(clap::Args)]
pub struct Args {
    // Output the mappings in JSON format
    #[arg(long)]
    json: bool,
}

pub fn list(args: &Args, config_arg: &Option<String>) -> anyhow::Result<()> {
    let file = MappingsFile::load(config_arg)?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(file.store.mappings())
                .expect("Failed to serialize mappings")
        );

        return Ok(());
    }

    if file.store.is_empty() {
        println!(
            "{}",
            "No domain mappings yet. Add one with 'hostmirror add <source> <proxy>'.".yellow()
        );

        return Ok(());
    }

    println!("{} mapping(s) in {}", file.store.len(), file.path().display());
    for (index, mapping) in file.store.mappings().iter().enumerate() {
        println!("{:>3}. {} -> {}", index + 1, mapping.source, mapping.proxy);
    }

    Ok(())
}
