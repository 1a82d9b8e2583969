//! Property tests over random edit sequences.

use cutline_timeline::{Timeline, Track, TrackKind, DEFAULT_HISTORY_DEPTH};
use proptest::prelude::*;

use crate::support::{clip, clip_ids, invariant_violation};

const TRACKS: [&str; 3] = ["v1", "v2", "fx"];

/// One host call against the timeline.
#[derive(Debug, Clone)]
enum Op {
    Upsert { clip: u8, track: u8, start: u16, duration: u8 },
    Move { clip: u8, track: u8, start: u16 },
    Trim { clip: u8, head: u8, tail: u8 },
    Split { clip: u8, offset: u8 },
    Ripple { clip: u8 },
    RemoveTrack { track: u8 },
    AddTrack { track: u8 },
    Undo,
    Redo,
}

fn clip_name(n: u8) -> String {
    // Every third id refers to a split product so splits and their
    // descendants get edited too.
    match n % 3 {
        0 => format!("c{}", n / 3),
        1 => format!("c{}_b", n / 3),
        _ => format!("c{}", n),
    }
}

/// Half-second grid so collisions and touching clips are common.
fn secs(units: impl Into<f64>) -> f64 {
    units.into() * 0.5
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..12, 0u8..3, 0u16..60, 1u8..12)
            .prop_map(|(clip, track, start, duration)| Op::Upsert { clip, track, start, duration }),
        2 => (0u8..12, 0u8..3, 0u16..60).prop_map(|(clip, track, start)| Op::Move { clip, track, start }),
        1 => (0u8..12, 0u8..4, 0u8..4).prop_map(|(clip, head, tail)| Op::Trim { clip, head, tail }),
        2 => (0u8..12, 0u8..8).prop_map(|(clip, offset)| Op::Split { clip, offset }),
        1 => (0u8..12).prop_map(|clip| Op::Ripple { clip }),
        1 => (0u8..3).prop_map(|track| Op::RemoveTrack { track }),
        1 => (0u8..3).prop_map(|track| Op::AddTrack { track }),
        1 => Just(Op::Undo),
        1 => Just(Op::Redo),
    ]
}

fn fresh_track(n: u8) -> Track {
    let id = TRACKS[n as usize];
    if id == "fx" {
        Track::new(id, TrackKind::Fx).with_overlap(true)
    } else {
        Track::new_video(id)
    }
}

fn starting_timeline() -> Timeline {
    let mut timeline = Timeline::new();
    for n in 0..TRACKS.len() as u8 {
        timeline.add_track(fresh_track(n)).unwrap();
    }
    timeline
}

/// Apply `op`; `true` when the timeline accepted it.
fn apply(timeline: &mut Timeline, op: &Op) -> bool {
    match *op {
        Op::Upsert { clip: c, track, start, duration } => timeline
            .upsert_clip(clip(
                &clip_name(c),
                TRACKS[track as usize],
                secs(start),
                secs(duration),
            ))
            .is_ok(),
        Op::Move { clip: c, track, start } => timeline
            .move_clip(&clip_name(c), TRACKS[track as usize], secs(start))
            .is_ok(),
        Op::Trim { clip: c, head, tail } => timeline
            .trim_clip(&clip_name(c), secs(head), secs(tail))
            .is_ok(),
        Op::Split { clip: c, offset } => timeline.split_clip(&clip_name(c), secs(offset)).is_ok(),
        Op::Ripple { clip: c } => timeline.ripple_delete(&clip_name(c)).is_ok(),
        Op::RemoveTrack { track } => timeline.remove_track(TRACKS[track as usize]).is_ok(),
        Op::AddTrack { track } => timeline.add_track(fresh_track(track)).is_ok(),
        Op::Undo => timeline.undo(),
        Op::Redo => timeline.redo(),
    }
}

proptest! {
    /// Placement, ordering, duration, index agreement and history bound hold
    /// after every call, and a rejected call changes nothing.
    #[test]
    fn invariants_hold_after_every_call(ops in prop::collection::vec(op_strategy(), 1..80)) {
        let mut timeline = starting_timeline();
        for op in &ops {
            let before = timeline.serialize().unwrap();
            let undo_before = timeline.undo_depth();
            let accepted = apply(&mut timeline, op);

            if let Some(violation) = invariant_violation(&timeline) {
                prop_assert!(false, "after {:?}: {}", op, violation);
            }
            if !accepted {
                prop_assert_eq!(timeline.serialize().unwrap(), before, "after {:?}", op);
                prop_assert_eq!(timeline.undo_depth(), undo_before);
            }
        }
    }

    /// Splitting preserves the clip's total length and leaves the halves
    /// touching.
    #[test]
    fn split_preserves_length(
        start in 0u32..1000,
        duration in 1u32..1000,
        fraction in 0.01f64..0.99,
    ) {
        let start = start as f64 / 8.0;
        let duration = duration as f64 / 8.0;
        let offset = duration * fraction;

        let mut timeline = starting_timeline();
        timeline.upsert_clip(clip("s", "v1", start, duration)).unwrap();
        let second = timeline.split_clip("s", offset).unwrap();

        let first = timeline.clip("s").unwrap();
        let second = timeline.clip(&second).unwrap();
        prop_assert!((first.duration + second.duration - duration).abs() < 1e-9);
        prop_assert_eq!(first.end_time(), second.start);
        prop_assert_eq!(second.trim_start - first.trim_start, offset);
    }

    /// Ripple delete keeps the surviving clips in order and leaves other
    /// tracks alone.
    #[test]
    fn ripple_delete_keeps_order(
        gaps in prop::collection::vec((0u8..6, 1u8..6), 2..12),
        victim in any::<prop::sample::Index>(),
    ) {
        let mut timeline = starting_timeline();
        let mut cursor = 0.0;
        for (i, (gap, len)) in gaps.iter().enumerate() {
            cursor += secs(*gap);
            timeline.upsert_clip(clip(&format!("r{i}"), "v1", cursor, secs(*len))).unwrap();
            cursor += secs(*len);
        }
        timeline.upsert_clip(clip("other", "v2", 1.0, 3.0)).unwrap();
        let untouched = timeline.track("v2").unwrap().clone();

        let mut expected = clip_ids(&timeline, "v1");
        let removed = expected.remove(victim.index(expected.len()));
        timeline.ripple_delete(&removed).unwrap();

        prop_assert_eq!(clip_ids(&timeline, "v1"), expected);
        prop_assert_eq!(timeline.track("v2").unwrap(), &untouched);
        prop_assert!(invariant_violation(&timeline).is_none());
    }

    /// Moving a clip to where it already is changes nothing.
    #[test]
    fn move_in_place_is_noop(
        clips in prop::collection::vec((0u8..4, 1u8..6), 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut timeline = starting_timeline();
        let mut cursor = 0.0;
        for (i, (gap, len)) in clips.iter().enumerate() {
            cursor += secs(*gap);
            timeline.upsert_clip(clip(&format!("m{i}"), "v1", cursor, secs(*len))).unwrap();
            cursor += secs(*len);
        }
        let ids = clip_ids(&timeline, "v1");
        let id = &ids[pick.index(ids.len())];
        let start = timeline.clip(id).unwrap().start;

        let before = timeline.serialize().unwrap();
        timeline.move_clip(id, "v1", start).unwrap();
        prop_assert_eq!(timeline.serialize().unwrap(), before);
    }

    /// The undo buffer never grows past its bound.
    #[test]
    fn undo_depth_is_bounded(edits in 0usize..100) {
        let mut timeline = starting_timeline();
        for i in 0..edits {
            timeline.upsert_clip(clip(&format!("u{i}"), "v1", i as f64, 1.0)).unwrap();
        }
        prop_assert_eq!(timeline.undo_depth(), (edits + TRACKS.len()).min(DEFAULT_HISTORY_DEPTH));
    }
}
