use crate::{
    CommandContext, ConfigCommands,
    config_manager::{ConfigError, ConfigManager},
    output::{
        create_table, format_key_value, format_success, header_cell, print_json,
        print_section_header, regular_cell,
    },
};
use anyhow::{Result, bail};

pub fn handle(
    cmd: ConfigCommands,
    manager: &mut ConfigManager,
    ctx: &CommandContext,
) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(manager, ctx),
        ConfigCommands::Set { key, value } => set_config(manager, key, value, ctx),
        ConfigCommands::Get { key } => get_config(manager, &key, ctx),
        ConfigCommands::Reset { yes } => reset_config(manager, yes, ctx),
    }
}

fn show_config(manager: &ConfigManager, ctx: &CommandContext) -> Result<()> {
    let config = manager.get_all();

    if ctx.is_json() {
        print_json(
            &serde_json::json!({
                "config_path": manager.config_path(),
                "values": config,
                "data_paths": ctx.paths,
            }),
            ctx.format,
        )?;
        return Ok(());
    }

    let style = &ctx.style;
    print_section_header("Current Configuration", style);
    println!(
        "{}",
        format_key_value("File", &manager.config_path().display().to_string(), style)
    );

    let mut table = create_table();
    table.set_header(vec![header_cell("Key", style), header_cell("Value", style)]);
    for (key, value) in &config {
        table.add_row(vec![regular_cell(key), regular_cell(value)]);
    }
    println!("{table}");

    print_section_header("Data Files", style);
    for (name, path) in [
        ("Courses", &ctx.paths.courses),
        ("Enrollments", &ctx.paths.enrollments),
        ("Content", &ctx.paths.content),
    ] {
        println!("{}", format_key_value(name, &path.display().to_string(), style));
    }
    Ok(())
}

fn set_config(
    manager: &mut ConfigManager,
    key: String,
    value: String,
    ctx: &CommandContext,
) -> Result<()> {
    manager.set(key.clone(), value.clone())?;

    if !print_json(
        &serde_json::json!({
            "success": true,
            "key": key,
            "value": value,
        }),
        ctx.format,
    )? {
        println!(
            "{}",
            format_success(&format!("✓ Set {key} = {value}"), &ctx.style)
        );
    }
    Ok(())
}

fn get_config(manager: &ConfigManager, key: &str, ctx: &CommandContext) -> Result<()> {
    let value = match manager.get(key) {
        Ok(value) => Some(value),
        Err(ConfigError::KeyNotFound { .. }) if ctx.is_json() => None,
        Err(e) => return Err(e.into()),
    };

    if !print_json(
        &serde_json::json!({
            "key": key,
            "value": value,
            "found": value.is_some(),
        }),
        ctx.format,
    )? && let Some(value) = value
    {
        println!("{value}");
    }
    Ok(())
}

fn reset_config(manager: &mut ConfigManager, yes: bool, ctx: &CommandContext) -> Result<()> {
    if !yes {
        bail!("Reset requires confirmation. Use --yes to confirm.");
    }

    manager.reset()?;

    if !print_json(
        &serde_json::json!({
            "success": true,
            "message": "Configuration reset to defaults",
        }),
        ctx.format,
    )? {
        println!(
            "{}",
            format_success("✓ Configuration reset to defaults", &ctx.style)
        );
    }
    Ok(())
}
