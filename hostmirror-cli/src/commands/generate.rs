use anyhow::{bail, Context};
use colored::Colorize;
use hostmirror::{render_all, render_mapping};

use crate::clipboard;
use crate::mappings_file::MappingsFile;

#[derive(clap::Args)]
pub struct Args {
    #[arg(
        short,
        long,
        conflicts_with = "position",
        help = "Render only the mapping for this source domain"
    )]
    source: Option<String>,

    #[arg(
        short,
        long,
        help = "Render only the mapping at this list position, starting at 1"
    )]
    position: Option<usize>,

    #[arg(
        long,
        help = "Copy the rendered configuration to the clipboard instead of printing it"
    )]
    copy: bool,
}

pub fn generate(args: &Args, config_arg: &Option<String>) -> anyhow::Result<()> {
    let mut file = MappingsFile::load(config_arg)?;

    if file.store.is_empty() {
        bail!("there are no mappings to render yet, add one with 'hostmirror add'");
    }

    if let Some(domain) = &args.source {
        let position = file
            .store
            .mappings()
            .iter()
            .position(|m| m.source == *domain)
            .with_context(|| format!("no mapping with source domain {domain}"))?;
        file.store.select(position)?;
    } else if let Some(position) = args.position {
        if position == 0 || position > file.store.len() {
            bail!(
                "no mapping at position {}, the list has {} entries",
                position,
                file.store.len()
            );
        }
        file.store.select(position - 1)?;
    }

    // Without a selection the whole list is rendered, in display order.
    let rendered = match file.store.selected() {
        Some(mapping) => render_mapping(mapping),
        None => render_all(file.store.mappings()),
    };

    if args.copy {
        clipboard::copy(&rendered).context("Failed to hand the configuration to the clipboard")?;

        let copied = match file.store.selected() {
            Some(mapping) => format!("Copied the configuration for {}", mapping.source),
            None => format!(
                "Copied the configuration for {} mapping(s)",
                file.store.len()
            ),
        };
        println!("{}", copied.green());
    } else {
        println!("{rendered}");
    }

    Ok(())
}
