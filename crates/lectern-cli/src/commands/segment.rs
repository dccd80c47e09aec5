use crate::{
    CommandContext, SegmentCommands,
    output::{format_success, print_json},
    session::Session,
};
use anyhow::{Result, bail};
use lectern_catalog::Segment;
use tracing::debug;

pub fn handle(cmd: SegmentCommands, ctx: &CommandContext) -> Result<()> {
    match cmd {
        SegmentCommands::Add {
            course,
            title,
            minutes,
            video_url,
            questions,
        } => {
            let segment = build_segment(title, minutes, video_url, questions);
            add_segment(&course, segment, ctx)
        }
    }
}

fn build_segment(
    title: String,
    minutes: i32,
    video_url: Option<String>,
    questions: Option<i32>,
) -> Segment {
    match (video_url, questions) {
        (Some(url), _) => Segment::video(title, minutes, url),
        (None, Some(count)) => Segment::quiz(title, minutes, count),
        (None, None) => Segment::generic(title, minutes),
    }
}

fn add_segment(course_id: &str, segment: Segment, ctx: &CommandContext) -> Result<()> {
    segment.validate()?;

    let mut session = Session::open(ctx.paths.clone())?;
    let Some(count) = session.store.update(course_id, |course| {
        course.add_segment(segment.clone());
        course.segments().len()
    }) else {
        bail!("Course '{course_id}' not found");
    };
    session.save_courses()?;
    debug!("Course {course_id} now has {count} segments");

    if !print_json(
        &serde_json::json!({
            "success": true,
            "course": course_id,
            "segment": segment,
            "segment_count": count,
        }),
        ctx.format,
    )? {
        println!(
            "{}",
            format_success(&format!("✓ Added {segment} to {course_id}"), &ctx.style)
        );
    }
    Ok(())
}
