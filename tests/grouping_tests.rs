//! Measure grouping tests: measure counts, chords, rests, validation.

use pretty_assertions::assert_eq;
use staffscroll::{
    frame_from_input_json, group_into_measures, group_into_measures_default, measure_count,
    DurationKind, NotatedDuration, NoteEvent, Staff, StaffError, MAX_MEASURES,
};

fn treble(id: &str, midi: u8, label: &str, start: f64, dur: f64) -> NoteEvent {
    NoteEvent::new(id, midi, label, start, dur, Staff::Treble)
}

fn bass(id: &str, midi: u8, label: &str, start: f64, dur: f64) -> NoteEvent {
    NoteEvent::new(id, midi, label, start, dur, Staff::Bass)
}

#[test]
fn single_whole_note_fills_one_measure() {
    let notes = vec![treble("a", 60, "c", 0.0, 4.0)];
    let measures = group_into_measures_default(&notes).unwrap();

    assert_eq!(measures.len(), 1);
    let m = &measures[0];
    assert_eq!(m.treble.len(), 1);
    assert_eq!(m.treble[0].start_beat, 0.0);
    assert_eq!(m.treble[0].duration.name(), "whole");
    assert_eq!(m.treble[0].notes[0].id, "a");

    assert_eq!(m.bass.len(), 1);
    assert!(m.bass[0].is_rest());
}

#[test]
fn empty_input_gives_no_measures() {
    assert!(group_into_measures_default(&[]).unwrap().is_empty());
    assert_eq!(measure_count(&[], 4), 0);
}

#[test]
fn measure_count_follows_last_note_end() {
    let notes = vec![
        treble("a", 60, "C4", 0.0, 1.0),
        bass("b", 48, "C3", 5.0, 1.5), // ends at 6.5 → measure 1
    ];
    assert_eq!(measure_count(&notes, 4), 2);

    // a note held past the barline opens the next measure
    let held = vec![treble("h", 60, "C4", 3.0, 6.0)]; // ends at 9.0
    assert_eq!(measure_count(&held, 4), 3);
    let measures = group_into_measures_default(&held).unwrap();
    assert_eq!(measures.len(), 3);
    assert!(measures[1].treble[0].is_rest());
    assert!(measures[2].treble[0].is_rest());
}

#[test]
fn tiny_duration_on_barline_still_gets_its_measure() {
    // 4.0 + 1e-20 rounds back to 4.0, so the end alone would ask for one measure
    let notes = vec![treble("a", 60, "C4", 4.0, 1e-20)];
    assert_eq!(measure_count(&notes, 4), 2);

    let measures = group_into_measures_default(&notes).unwrap();
    assert_eq!(measures.len(), 2);
    assert!(measures[0].treble[0].is_rest());
    assert_eq!(measures[1].treble[0].notes[0].id, "a");
}

#[test]
fn notes_past_the_measure_limit_are_rejected() {
    let far = vec![treble("ok", 60, "C4", 0.0, 1.0), treble("far", 60, "C4", 1e18, 1.0)];
    match group_into_measures_default(&far) {
        Err(StaffError::InvalidInput { id, .. }) => assert_eq!(id, "far"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }

    let held = vec![treble("held", 60, "C4", 0.0, 1e18)];
    assert!(matches!(
        group_into_measures_default(&held),
        Err(StaffError::InvalidInput { .. })
    ));

    // the last measure inside the limit still groups
    let last_start = (MAX_MEASURES - 1) as f64 * 4.0;
    let edge = vec![treble("edge", 60, "C4", last_start, 4.0)];
    assert_eq!(group_into_measures_default(&edge).unwrap().len(), MAX_MEASURES);

    let json = r#"{"notes":[{"id":"j","midi":60,"label":"C4","startBeat":1e18,"durationBeats":1,"staff":"bass"}]}"#;
    assert!(matches!(
        frame_from_input_json(json),
        Err(StaffError::InvalidInput { .. })
    ));
}

#[test]
fn every_note_lands_in_exactly_one_chord() {
    let notes = vec![
        treble("t1", 72, "C5", 0.0, 1.0),
        treble("t2", 76, "E5", 0.0, 1.0),
        treble("t3", 74, "D5", 1.0, 1.0),
        bass("b1", 48, "C3", 0.0, 2.0),
        treble("t4", 77, "F5", 4.5, 0.5),
        bass("b2", 43, "G2", 7.0, 1.0),
    ];
    let measures = group_into_measures_default(&notes).unwrap();
    assert_eq!(measures.len(), 2);

    let mut seen: Vec<String> = measures
        .iter()
        .flat_map(|m| m.treble.iter().chain(m.bass.iter()))
        .flat_map(|c| c.notes.iter().map(|n| n.id.clone()))
        .collect();
    seen.sort();
    let mut expected: Vec<String> = notes.iter().map(|n| n.id.clone()).collect();
    expected.sort();
    assert_eq!(seen, expected);

    for m in &measures {
        for n in m.treble.iter().chain(m.bass.iter()).flat_map(|c| c.notes.iter()) {
            assert_eq!(n.measure_index(4), m.index);
        }
    }
}

#[test]
fn same_onset_and_staff_merge_into_chord() {
    let notes = vec![
        treble("c", 60, "C4", 1.0, 2.0),
        treble("e", 64, "E4", 1.0, 0.5),
        treble("g", 67, "G4", 1.0, 1.0),
        bass("low", 48, "C3", 1.0, 2.0),
    ];
    let measures = group_into_measures_default(&notes).unwrap();
    let treble_chords = &measures[0].treble;

    assert_eq!(treble_chords.len(), 1);
    let ids: Vec<&str> = treble_chords[0].notes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "e", "g"]);
    // duration comes from the first member
    assert_eq!(treble_chords[0].duration, NotatedDuration::plain(DurationKind::Half));

    // same onset on the other staff stays separate
    assert_eq!(measures[0].bass.len(), 1);
    assert_eq!(measures[0].bass[0].notes[0].id, "low");
}

#[test]
fn interleaved_onsets_keep_member_order() {
    let notes = vec![
        treble("c", 60, "C4", 2.0, 1.0),
        treble("x", 62, "D4", 0.0, 1.0),
        treble("e", 64, "E4", 2.0, 1.0),
        treble("y", 65, "F4", 0.0, 1.0),
        treble("g", 67, "G4", 2.0, 1.0),
    ];
    let measures = group_into_measures_default(&notes).unwrap();
    let chords: Vec<Vec<&str>> = measures[0]
        .treble
        .iter()
        .map(|c| c.notes.iter().map(|n| n.id.as_str()).collect())
        .collect();
    assert_eq!(chords, vec![vec!["x", "y"], vec!["c", "e", "g"]]);
}

#[test]
fn chords_are_sorted_by_onset() {
    let notes = vec![
        treble("late", 67, "G4", 3.0, 1.0),
        treble("early", 60, "C4", 0.0, 1.0),
        treble("mid", 64, "E4", 1.5, 0.5),
    ];
    let measures = group_into_measures_default(&notes).unwrap();
    let starts: Vec<f64> = measures[0].treble.iter().map(|c| c.start_beat).collect();
    assert_eq!(starts, vec![0.0, 1.5, 3.0]);
}

#[test]
fn empty_staff_gets_exactly_one_rest_per_measure() {
    let notes = vec![
        treble("a", 60, "C4", 0.0, 1.0),
        bass("b", 40, "E2", 9.0, 1.0),
    ];
    let measures = group_into_measures_default(&notes).unwrap();
    assert_eq!(measures.len(), 3);

    assert!(!measures[0].treble[0].is_rest());
    assert_eq!(measures[0].bass.len(), 1);
    assert!(measures[0].bass[0].is_rest());

    assert_eq!(measures[1].treble.len(), 1);
    assert!(measures[1].treble[0].is_rest());
    assert_eq!(measures[1].treble[0].start_beat, 4.0);
    assert_eq!(measures[1].bass.len(), 1);
    assert!(measures[1].bass[0].is_rest());

    assert!(measures[2].treble[0].is_rest());
    assert!(!measures[2].bass[0].is_rest());
}

#[test]
fn grouping_is_idempotent() {
    let notes = vec![
        treble("a", 61, "C#4", 0.0, 0.75),
        treble("b", 61, "Db4", 0.75, 0.25),
        bass("c", 36, "C2", 0.0, 3.0),
        bass("d", 38, "D2", 6.0, 0.5),
    ];
    let first = group_into_measures_default(&notes).unwrap();
    let second = group_into_measures_default(&notes).unwrap();
    assert_eq!(first, second);
}

#[test]
fn custom_quantizer_and_meter() {
    let notes = vec![treble("a", 60, "C4", 4.0, 1.0)];
    let eighths = |_: f64| NotatedDuration::plain(DurationKind::Eighth);
    let measures = group_into_measures(&notes, 3, &eighths).unwrap();

    // beat 4 in 3/4 is the second measure
    assert_eq!(measures.len(), 2);
    assert_eq!(measures[1].start_beat, 3.0);
    assert_eq!(measures[1].treble[0].duration.name(), "eighth");
}

#[test]
fn malformed_notes_are_rejected_before_grouping() {
    let negative = vec![treble("ok", 60, "C4", 0.0, 1.0), treble("neg", 60, "C4", -1.0, 1.0)];
    match group_into_measures_default(&negative) {
        Err(StaffError::InvalidInput { id, .. }) => assert_eq!(id, "neg"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }

    let zero_len = vec![treble("zero", 60, "C4", 0.0, 0.0)];
    assert!(matches!(
        group_into_measures_default(&zero_len),
        Err(StaffError::InvalidInput { .. })
    ));

    let not_finite = vec![treble("nan", 60, "C4", f64::NAN, 1.0)];
    assert!(matches!(
        group_into_measures_default(&not_finite),
        Err(StaffError::InvalidInput { .. })
    ));

    let bad_pitch = vec![treble("hi", 200, "?", 0.0, 1.0)];
    assert!(matches!(
        group_into_measures_default(&bad_pitch),
        Err(StaffError::InvalidInput { .. })
    ));
}

#[test]
fn zero_beats_per_measure_is_invalid_parameter() {
    let notes = vec![treble("a", 60, "C4", 0.0, 1.0)];
    let err = group_into_measures(&notes, 0, &staffscroll::NearestDuration).unwrap_err();
    assert!(matches!(err, StaffError::InvalidParameter(_)));
}

#[test]
fn notes_deserialize_from_camel_case_json() {
    let json = r#"[{"id":"n1","midi":62,"name":"D4","startBeat":2,"durationBeats":0.5,"staff":"treble"}]"#;
    let notes: Vec<NoteEvent> = serde_json::from_str(json).unwrap();
    assert_eq!(notes[0], treble("n1", 62, "D4", 2.0, 0.5));
}
