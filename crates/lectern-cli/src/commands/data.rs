use crate::{
    CommandContext, DataCommands,
    output::{
        OutputStyle, create_table, format_error, format_success, format_warning, header_cell,
        numeric_cell, print_json, print_section_header, regular_cell,
    },
    session::{LoadReport, LoadStatus},
};
use anyhow::{Result, bail};
use std::path::Path;

pub fn handle(cmd: DataCommands, ctx: &CommandContext) -> Result<()> {
    match cmd {
        DataCommands::Check => check(ctx),
    }
}

fn check(ctx: &CommandContext) -> Result<()> {
    let report = LoadReport::probe(&ctx.paths);

    if !print_json(&report, ctx.format)? {
        let style = &ctx.style;
        print_section_header("Data Files", style);

        let mut table = create_table();
        table.set_header(vec![
            header_cell("File", style),
            header_cell("Path", style),
            header_cell("Status", style),
            header_cell("Entries", style),
        ]);
        for (name, path, status) in [
            ("courses", &ctx.paths.courses, &report.courses),
            ("enrollments", &ctx.paths.enrollments, &report.enrollments),
            ("content", &ctx.paths.content, &report.content),
        ] {
            table.add_row(status_row(name, path, status, style));
        }
        println!("{table}");
    }

    if !report.all_ok() {
        bail!("One or more data files failed to load");
    }
    Ok(())
}

fn status_row(
    name: &str,
    path: &Path,
    status: &LoadStatus,
    style: &OutputStyle,
) -> Vec<comfy_table::Cell> {
    let (label, entries) = match status {
        LoadStatus::Loaded { entries } => (format_success("ok", style), entries.to_string()),
        LoadStatus::Missing => (format_warning("missing", style), "-".to_string()),
        LoadStatus::Failed { error } => (format_error(error, style), "-".to_string()),
    };
    vec![
        regular_cell(name),
        regular_cell(&path.display().to_string()),
        regular_cell(&label),
        numeric_cell(&entries),
    ]
}
