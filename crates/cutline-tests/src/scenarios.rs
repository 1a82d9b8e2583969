//! End-to-end editing scenarios across the timeline, effects and compositor.

use cutline_compositor::Compositor;
use cutline_core::ErrorKind;
use cutline_timeline::{ClipKind, Timeline, TimelineFrameInfo, Track};

use crate::support::{clip, clip_ids, init_tracing, invariant_violation, timeline_with_tracks};

fn frame(clip_id: &str, local: f64, global: f64) -> TimelineFrameInfo {
    TimelineFrameInfo {
        clip_id: clip_id.to_string(),
        local_time: local,
        global_time: global,
    }
}

// ── Placement ──────────────────────────────────────────────────

#[test]
fn overlapping_upsert_is_rejected() {
    init_tracing();
    let mut timeline = timeline_with_tracks(&["v1"]);
    timeline.upsert_clip(clip("a", "v1", 0.0, 5.0)).unwrap();

    let before = timeline.serialize().unwrap();
    let err = timeline.upsert_clip(clip("b", "v1", 3.0, 4.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(timeline.serialize().unwrap(), before);

    assert_eq!(timeline.duration(), 5.0);
    assert_eq!(timeline.frame_at(4.0), Some(frame("a", 4.0, 4.0)));
}

#[test]
fn touching_clips_do_not_overlap() {
    let mut timeline = timeline_with_tracks(&["v1"]);
    timeline.upsert_clip(clip("a", "v1", 0.0, 5.0)).unwrap();
    timeline.upsert_clip(clip("b", "v1", 5.0, 1.0)).unwrap();
    // Within tolerance of touching.
    timeline.upsert_clip(clip("c", "v1", 6.0 - 5e-7, 1.0)).unwrap();
    assert_eq!(clip_ids(&timeline, "v1"), ["a", "b", "c"]);
    assert!(invariant_violation(&timeline).is_none());
}

// ── Split ──────────────────────────────────────────────────────

#[test]
fn split_keeps_timeline_length() {
    init_tracing();
    let mut timeline = timeline_with_tracks(&["v1"]);
    timeline.upsert_clip(clip("a", "v1", 0.0, 5.0)).unwrap();

    assert_eq!(timeline.split_clip("a", 2.0).unwrap(), "a_b");
    assert_eq!(clip_ids(&timeline, "v1"), ["a", "a_b"]);

    let a = timeline.clip("a").unwrap();
    let b = timeline.clip("a_b").unwrap();
    assert_eq!((a.start, a.duration), (0.0, 2.0));
    assert_eq!((b.start, b.duration), (2.0, 3.0));
    assert_eq!(timeline.duration(), 5.0);

    // Both halves contain t = 2; the earlier one wins.
    assert_eq!(timeline.frame_at(2.0).unwrap().clip_id, "a");
}

// ── Ripple delete ──────────────────────────────────────────────

#[test]
fn ripple_delete_closes_gap() {
    init_tracing();
    let mut timeline = timeline_with_tracks(&["v1"]);
    timeline.upsert_clip(clip("x", "v1", 0.0, 2.0)).unwrap();
    timeline.upsert_clip(clip("y", "v1", 2.0, 3.0)).unwrap();
    timeline.upsert_clip(clip("z", "v1", 5.0, 1.0)).unwrap();

    timeline.ripple_delete("x").unwrap();
    assert_eq!(clip_ids(&timeline, "v1"), ["y", "z"]);
    let y = timeline.clip("y").unwrap();
    let z = timeline.clip("z").unwrap();
    assert_eq!((y.start, y.duration), (0.0, 3.0));
    assert_eq!((z.start, z.duration), (3.0, 1.0));
    assert_eq!(timeline.duration(), 4.0);
}

// ── Trim ───────────────────────────────────────────────────────

#[test]
fn trim_only_shrinks() {
    let mut timeline = timeline_with_tracks(&["v1"]);
    timeline.upsert_clip(clip("c", "v1", 0.0, 4.0)).unwrap();

    timeline.trim_clip("c", 1.0, 1.0).unwrap();
    let c = timeline.clip("c").unwrap();
    assert_eq!(c.duration, 2.0);
    assert_eq!((c.trim_start, c.trim_end), (1.0, 1.0));
    assert_eq!(c.start, 0.0);

    let before = timeline.serialize().unwrap();
    let err = timeline.trim_clip("c", 5.0, 0.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(timeline.serialize().unwrap(), before);
}

// ── Move ───────────────────────────────────────────────────────

#[test]
fn move_across_tracks() {
    init_tracing();
    let mut timeline = timeline_with_tracks(&["v1", "v2"]);
    timeline.upsert_clip(clip("p", "v1", 0.0, 2.0)).unwrap();
    timeline.upsert_clip(clip("q", "v2", 1.0, 2.0)).unwrap();

    let err = timeline.move_clip("p", "v2", 0.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(timeline.clip_location("p").unwrap().track, 0);

    timeline.move_clip("p", "v2", 3.0).unwrap();
    let v2 = timeline.track_position("v2").unwrap();
    assert_eq!(timeline.clip_location("p").unwrap().track, v2);
    assert_eq!(clip_ids(&timeline, "v2"), ["q", "p"]);
    assert!(clip_ids(&timeline, "v1").is_empty());
    assert_eq!(timeline.duration(), 5.0);
}

// ── Compositor ─────────────────────────────────────────────────

#[test]
fn compositor_stacks_video_tracks_in_order() {
    let mut timeline = timeline_with_tracks(&["v1", "v2"]);
    timeline.add_track(Track::new_audio("a1")).unwrap();
    timeline.upsert_clip(clip("low", "v1", 0.0, 2.0)).unwrap();
    timeline.upsert_clip(clip("high", "v2", 0.5, 2.0)).unwrap();
    timeline
        .upsert_clip(clip("music", "a1", 0.0, 10.0).with_kind(ClipKind::Audio))
        .unwrap();

    let frame = Compositor::new().compose(timeline.sequence(), 1.0);
    assert_eq!(frame.time, 1.0);
    assert_eq!(frame.clip_stack, ["low", "high"]);
}

#[test]
fn frame_at_and_compositor_agree_on_bottom_video_layer() {
    let mut timeline = timeline_with_tracks(&["v1", "v2"]);
    timeline.upsert_clip(clip("a", "v1", 0.0, 4.0)).unwrap();
    timeline.upsert_clip(clip("b", "v2", 2.0, 4.0)).unwrap();

    for t in [0.0, 1.0, 3.0, 5.0, 7.0] {
        let info = timeline.frame_at(t).map(|i| i.clip_id);
        let stack = Compositor::new().compose(timeline.sequence(), t).clip_stack;
        assert_eq!(info, stack.first().cloned(), "t = {t}");
    }
}

// ── Effects ────────────────────────────────────────────────────

#[test]
fn effects_evaluate_clip_from_timeline() {
    use cutline_effects::EffectsProcessor;
    use cutline_timeline::Effect;

    let mut timeline = timeline_with_tracks(&["v1"]);
    timeline
        .upsert_clip(
            clip("a", "v1", 0.0, 5.0)
                .with_effect(Effect::new("blur", "gaussian").with_param("radius", 8.0)),
        )
        .unwrap();

    let info = timeline.frame_at(3.0).unwrap();
    let clip = timeline.clip(&info.clip_id).unwrap();

    let mut processor = EffectsProcessor::new();
    let modulated = processor.evaluate(clip, info.local_time);
    assert_eq!(modulated.values, vec![8.0 * (1.5f64).sin()]);

    processor.set_modulation_enabled(false);
    assert_eq!(processor.evaluate(clip, info.local_time).values, vec![8.0]);
}

// ── Tracks ─────────────────────────────────────────────────────

#[test]
fn removing_track_forgets_its_clips() {
    let mut timeline = timeline_with_tracks(&["v1", "v2"]);
    timeline.upsert_clip(clip("a", "v1", 0.0, 1.0)).unwrap();
    timeline.remove_track("v1").unwrap();

    assert_eq!(
        timeline.move_clip("a", "v2", 0.0).unwrap_err().kind(),
        ErrorKind::NotFound
    );
    // The id is free again.
    timeline.upsert_clip(clip("a", "v2", 0.0, 1.0)).unwrap();
    assert!(invariant_violation(&timeline).is_none());
}

#[test]
fn undo_keeps_metadata_set_before_the_edit() {
    let mut timeline = Timeline::new();
    timeline.set_sequence_metadata(3840, 2160, 23.976, 96_000);
    timeline.add_track(Track::new_video("v1")).unwrap();
    assert_eq!(timeline.sequence().width, 3840);
    assert!(timeline.undo());
    // The snapshot was taken after the metadata change.
    assert_eq!(timeline.sequence().fps, 23.976);
}
