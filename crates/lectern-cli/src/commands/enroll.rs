use crate::{
    CommandContext, EnrollCommands,
    output::{
        create_table, format_count_badge, format_success, format_warning, header_cell, print_json,
        print_section_header, regular_cell,
    },
    session::Session,
};
use anyhow::Result;
use lectern_catalog::ensure_no_delimiter;
use tracing::warn;

pub fn handle(cmd: EnrollCommands, ctx: &CommandContext) -> Result<()> {
    match cmd {
        EnrollCommands::Add { student, course } => enroll(&student, &course, ctx),
        EnrollCommands::List { student } => list(student.as_deref(), ctx),
        EnrollCommands::Check { student, course } => check(&student, &course, ctx),
    }
}

fn enroll(student: &str, course: &str, ctx: &CommandContext) -> Result<()> {
    ensure_no_delimiter("student_id", student)?;
    ensure_no_delimiter("course_id", course)?;

    let mut session = Session::open(ctx.paths.clone())?;
    let known_course = session.store.contains(course);
    if !known_course {
        warn!("Enrolling {student} in unknown course {course}");
    }
    session.enrollments.enroll(student, course);
    session.save_enrollments()?;

    if !print_json(
        &serde_json::json!({
            "success": true,
            "student": student,
            "course": course,
            "known_course": known_course,
        }),
        ctx.format,
    )? {
        println!(
            "{}",
            format_success(&format!("✓ Enrolled {student} in {course}"), &ctx.style)
        );
        if !known_course {
            println!(
                "{}",
                format_warning(&format!("Course {course} is not in the catalog"), &ctx.style)
            );
        }
    }
    Ok(())
}

fn list(student: Option<&str>, ctx: &CommandContext) -> Result<()> {
    let session = Session::open(ctx.paths.clone())?;
    let entries: Vec<_> = session
        .enrollments
        .entries()
        .iter()
        .filter(|e| student.is_none_or(|s| e.student_id == s))
        .collect();

    if print_json(&entries, ctx.format)? {
        return Ok(());
    }

    let style = &ctx.style;
    print_section_header(
        &format!(
            "Enrollments {}",
            format_count_badge(entries.len(), "enrollment", style)
        ),
        style,
    );
    if entries.is_empty() {
        println!("No enrollments found.");
        return Ok(());
    }

    let mut table = create_table();
    table.set_header(vec![
        header_cell("Student", style),
        header_cell("Course", style),
        header_cell("Title", style),
    ]);
    for entry in entries {
        let title = session
            .store
            .get(&entry.course_id)
            .map_or("-", |course| course.title());
        table.add_row(vec![
            regular_cell(&entry.student_id),
            regular_cell(&entry.course_id),
            regular_cell(title),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn check(student: &str, course: &str, ctx: &CommandContext) -> Result<()> {
    let session = Session::open(ctx.paths.clone())?;
    let enrolled = session.enrollments.is_enrolled(student, course);

    if !print_json(
        &serde_json::json!({
            "student": student,
            "course": course,
            "enrolled": enrolled,
        }),
        ctx.format,
    )? {
        if enrolled {
            println!(
                "{}",
                format_success(&format!("{student} is enrolled in {course}"), &ctx.style)
            );
        } else {
            println!(
                "{}",
                format_warning(
                    &format!("{student} is not enrolled in {course}"),
                    &ctx.style
                )
            );
        }
    }
    Ok(())
}
