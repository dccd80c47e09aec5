use crate::{
    CommandContext, CourseArgs, CourseCommands,
    output::{
        create_table, format_count_badge, format_success, format_warning, header_cell,
        numeric_cell, print_json, print_section_header, regular_cell,
    },
    session::Session,
};
use anyhow::{Result, bail};
use lectern_catalog::{Course, Segment};
use tracing::{info, warn};

/// Segment every new course starts with unless told otherwise
pub fn intro_segment() -> Segment {
    Segment::video("Intro Video", 10, "https://example.com/intro")
}

pub fn handle(cmd: CourseCommands, ctx: &CommandContext) -> Result<()> {
    match cmd {
        CourseCommands::Add(args) => add_course(args, ctx),
        CourseCommands::Show { id } => show_course(&id, ctx),
        CourseCommands::List => list_courses(ctx),
        CourseCommands::Summary => show_summary(ctx),
        CourseCommands::Remove { id } => remove_course(&id, ctx),
    }
}

fn build_course(args: CourseArgs) -> Course {
    let mut course = Course::new(args.id)
        .with_title(args.title)
        .with_duration_label(args.duration)
        .with_price(args.price)
        .with_offer(args.offer)
        .with_topic(args.topic)
        .with_outline(args.outline)
        .with_progress_label(args.progress)
        .with_certificate(args.certificate);
    if !args.no_intro {
        course.add_segment(intro_segment());
    }
    course
}

fn add_course(args: CourseArgs, ctx: &CommandContext) -> Result<()> {
    let course = build_course(args);
    course.validate()?;

    let mut session = Session::open(ctx.paths.clone())?;
    let id = course.id().to_string();
    let replaced = session.store.add_or_replace(course);
    if replaced.is_some() {
        warn!("Replaced existing course {id}");
    }
    session.save_courses()?;
    info!("Course {id} saved to {}", ctx.paths.courses.display());

    if !print_json(
        &serde_json::json!({
            "success": true,
            "id": id,
            "replaced": replaced.is_some(),
        }),
        ctx.format,
    )? {
        let message = if replaced.is_some() {
            format_warning(&format!("✓ Course {id} replaced"), &ctx.style)
        } else {
            format_success(&format!("✓ Course {id} created"), &ctx.style)
        };
        println!("{message}");
    }
    Ok(())
}

fn show_course(id: &str, ctx: &CommandContext) -> Result<()> {
    let session = Session::open(ctx.paths.clone())?;
    let Some(course) = session.store.get(id) else {
        bail!("Course '{id}' not found");
    };

    if !print_json(course, ctx.format)? {
        println!("{course}");
    }
    Ok(())
}

fn list_courses(ctx: &CommandContext) -> Result<()> {
    let session = Session::open(ctx.paths.clone())?;

    if ctx.is_json() {
        let courses: Vec<_> = session
            .store
            .titles()
            .map(|(id, title)| serde_json::json!({ "id": id, "title": title }))
            .collect();
        print_json(&courses, ctx.format)?;
        return Ok(());
    }

    let style = &ctx.style;
    print_section_header(
        &format!(
            "Courses {}",
            format_count_badge(session.store.len(), "course", style)
        ),
        style,
    );
    if session.store.is_empty() {
        println!("No courses found.");
        return Ok(());
    }

    let mut table = create_table();
    table.set_header(vec![
        header_cell("Id", style),
        header_cell("Title", style),
        header_cell("Price", style),
        header_cell("Segments", style),
    ]);
    for course in session.store.iter() {
        table.add_row(vec![
            regular_cell(course.id()),
            regular_cell(course.title()),
            numeric_cell(&course.price().to_string()),
            numeric_cell(&course.segments().len().to_string()),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn show_summary(ctx: &CommandContext) -> Result<()> {
    let session = Session::open(ctx.paths.clone())?;
    let summary = session.store.summary();

    if !print_json(&summary, ctx.format)? {
        print_section_header("Course Summary", &ctx.style);
        println!("{summary}");
    }
    Ok(())
}

fn remove_course(id: &str, ctx: &CommandContext) -> Result<()> {
    let mut session = Session::open(ctx.paths.clone())?;
    if session.store.remove(id).is_none() {
        bail!("Course '{id}' not found");
    }
    session.save_courses()?;

    if !print_json(
        &serde_json::json!({ "success": true, "id": id }),
        ctx.format,
    )? {
        println!(
            "{}",
            format_success(&format!("✓ Course {id} removed"), &ctx.style)
        );
    }
    Ok(())
}
