use colored::Colorize;

use crate::mappings_file::MappingsFile;

pub fn check(config_arg: &Option<String>) -> anyhow::Result<()> {
    let file = MappingsFile::load(config_arg)?;

    println!(
        "{}",
        format!(
            "{}: {} valid mapping(s)",
            file.path().display(),
            file.store.len()
        )
        .green()
    );

    Ok(())
}
