use anyhow::bail;
use colored::Colorize;

use crate::mappings_file::MappingsFile;

#[derive(clap::Args)]
pub struct Args {
    #[arg(help = "Position of the mapping as shown by 'list', starting at 1")]
    position: usize,
}

pub fn move_up(args: &Args, config_arg: &Option<String>) -> anyhow::Result<()> {
    let mut file = MappingsFile::load(config_arg)?;
    let position = checked_position(args.position, file.store.len())?;

    if position == 0 {
        println!("{}", "Mapping is already first".yellow());
        return Ok(());
    }

    file.store.move_up(position);
    file.save()?;
    print_order(&file);

    Ok(())
}

pub fn move_down(args: &Args, config_arg: &Option<String>) -> anyhow::Result<()> {
    let mut file = MappingsFile::load(config_arg)?;
    let position = checked_position(args.position, file.store.len())?;

    if position + 1 == file.store.len() {
        println!("{}", "Mapping is already last".yellow());
        return Ok(());
    }

    file.store.move_down(position);
    file.save()?;
    print_order(&file);

    Ok(())
}

fn checked_position(position: usize, len: usize) -> anyhow::Result<usize> {
    if position == 0 || position > len {
        bail!("no mapping at position {position}, the list has {len} entries");
    }

    Ok(position - 1)
}

fn print_order(file: &MappingsFile) {
    for (index, mapping) in file.store.mappings().iter().enumerate() {
        println!("{:>3}. {} -> {}", index + 1, mapping.source, mapping.proxy);
    }
}
