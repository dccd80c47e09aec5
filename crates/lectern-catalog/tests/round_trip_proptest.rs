//! Property tests for the segment and course block codecs

#![allow(clippy::expect_used, clippy::unwrap_used)]

use lectern_catalog::{Course, CourseStore, Segment, parse};
use proptest::prelude::*;

/// Free text without the field separator or line breaks
fn field_text() -> impl Strategy<Value = String> {
    "[^|\r\n]{0,24}"
}

/// Short lowercase keys so generated stores share ids now and then
fn course_id() -> impl Strategy<Value = String> {
    "[a-c0-9]{1,2}"
}

fn segment() -> impl Strategy<Value = Segment> {
    prop_oneof![
        (field_text(), any::<i32>()).prop_map(|(t, d)| Segment::generic(t, d)),
        (field_text(), any::<i32>(), field_text()).prop_map(|(t, d, u)| Segment::video(t, d, u)),
        (field_text(), any::<i32>(), any::<i32>()).prop_map(|(t, d, q)| Segment::quiz(t, d, q)),
    ]
}

prop_compose! {
    fn course()(
        id in course_id(),
        title in field_text(),
        duration in field_text(),
        price in any::<i32>(),
        offer in field_text(),
        topic in field_text(),
        outline in field_text(),
        progress in field_text(),
        certificate in any::<bool>(),
        segments in prop::collection::vec(segment(), 0..8),
    ) -> Course {
        let mut course = Course::new(id)
            .with_title(title)
            .with_duration_label(duration)
            .with_price(price)
            .with_offer(offer)
            .with_topic(topic)
            .with_outline(outline)
            .with_progress_label(progress)
            .with_certificate(certificate);
        for segment in segments {
            course.add_segment(segment);
        }
        course
    }
}

proptest! {
    /// Any segment without a separator in its text decodes to itself
    #[test]
    fn segment_round_trip(segment in segment()) {
        let decoded = Segment::decode(&segment.encode()).expect("Test operation should succeed");
        prop_assert_eq!(decoded, segment);
    }

    /// A course block decodes to an equal course, segments in order
    #[test]
    fn course_block_round_trip(course in course()) {
        let parsed = parse(&course.to_block()).expect("Test operation should succeed");
        prop_assert_eq!(parsed.len(), 1);
        prop_assert_eq!(&parsed[0], &course);
    }

    /// Saving and reloading a store yields the same store
    #[test]
    fn store_save_load_idempotent(courses in prop::collection::vec(course(), 0..6)) {
        let store: CourseStore = courses.into_iter().collect();

        let dir = tempfile::tempdir().expect("Test operation should succeed");
        let path = dir.path().join("courses.db");
        store.save_all(&path).expect("Test operation should succeed");

        let mut reloaded = CourseStore::new();
        reloaded.load_all(&path).expect("Test operation should succeed");
        prop_assert_eq!(reloaded, store);
    }
}
