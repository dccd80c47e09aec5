use crate::{
    CommandContext, ContentCommands,
    output::{format_count_badge, format_success, print_json, print_section_header},
    session::Session,
};
use anyhow::{Result, bail};
use lectern_catalog::ContentKind;

pub fn handle(cmd: ContentCommands, ctx: &CommandContext) -> Result<()> {
    match cmd {
        ContentCommands::Add { kind, item } => add_item(kind, &item, ctx),
        ContentCommands::Show => show(ctx),
    }
}

/// Items are stored one per line and a leading `#` starts a new section
fn check_item(item: &str) -> Result<()> {
    if item.starts_with('#') {
        bail!("Content items cannot start with '#'");
    }
    if item.contains(['\n', '\r']) {
        bail!("Content items must be a single line");
    }
    Ok(())
}

fn add_item(kind: ContentKind, item: &str, ctx: &CommandContext) -> Result<()> {
    check_item(item)?;

    let mut session = Session::open(ctx.paths.clone())?;
    session.content.add(kind, item);
    session.save_content()?;

    if !print_json(
        &serde_json::json!({
            "success": true,
            "section": kind.tag(),
            "item": item,
        }),
        ctx.format,
    )? {
        println!(
            "{}",
            format_success(&format!("✓ Added to {kind}: {item}"), &ctx.style)
        );
    }
    Ok(())
}

fn show(ctx: &CommandContext) -> Result<()> {
    let session = Session::open(ctx.paths.clone())?;

    if print_json(&session.content, ctx.format)? {
        return Ok(());
    }

    for (kind, items) in session.content.sections() {
        print_section_header(
            &format!(
                "{kind} {}",
                format_count_badge(items.len(), "item", &ctx.style)
            ),
            &ctx.style,
        );
        if items.is_empty() {
            println!("  (none)");
        }
        for item in items {
            println!("  - {item}");
        }
    }
    Ok(())
}
