//! Rendering tests — build frames and render them to SVG.

use staffscroll::{
    build_frame, render_frame, render_frame_to_svg, render_input_json_to_svg, AnnotatedMeasure,
    MeasureGrid, NoteEvent, Staff, StaffError, StaffRenderer, ViewConfig, ViewFrame, ViewInput,
};
use std::path::PathBuf;

fn output_dir() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    std::fs::create_dir_all(&dir).ok();
    dir
}

fn scale_frame(show_labels: bool, selected: Option<&str>) -> ViewFrame {
    let labels = ["C4", "D4", "E4", "F4", "G4", "A4", "B4", "C5"];
    let midis = [60, 62, 64, 65, 67, 69, 71, 72];
    let mut notes: Vec<NoteEvent> = labels
        .iter()
        .zip(midis)
        .enumerate()
        .map(|(i, (label, midi))| {
            NoteEvent::new(format!("t{i}"), midi, *label, i as f64, 1.0, Staff::Treble)
        })
        .collect();
    notes.push(NoteEvent::new("b0", 48, "C3", 0.0, 2.0, Staff::Bass));
    notes.push(NoteEvent::new("b1", 55, "G3", 0.0, 2.0, Staff::Bass));
    notes.push(NoteEvent::new("b2", 54, "F#3", 2.0, 1.5, Staff::Bass));
    notes.push(NoteEvent::new("b3", 58, "Bb3", 3.5, 0.5, Staff::Bass));

    let mut input = ViewInput::new(notes);
    input.current_time = 1.5;
    input.show_labels = show_labels;
    input.selected_id = selected.map(String::from);
    build_frame(&ViewConfig::default(), &input).expect("frame should build")
}

fn count_tag(doc: &roxmltree::Document, tag: &str) -> usize {
    doc.descendants().filter(|n| n.has_tag_name(tag)).count()
}

#[test]
fn render_scale_svg() {
    let frame = scale_frame(true, Some("t3"));
    let svg = render_frame_to_svg(&frame).expect("render should succeed");

    assert!(svg.starts_with("<svg"), "Output should be SVG");
    assert!(svg.contains("</svg>"), "SVG should be closed");

    let doc = roxmltree::Document::parse(&svg).expect("SVG should be well-formed XML");
    // 8 treble notes + 4 bass notes, one ellipse each
    assert_eq!(count_tag(&doc, "ellipse"), 12);

    let highlighted: Vec<_> = doc
        .descendants()
        .filter(|n| n.attribute("class") == Some("chord highlighted"))
        .collect();
    assert_eq!(highlighted.len(), 1);
    assert_eq!(highlighted[0].attribute("data-note-id"), Some("t3"));

    let playheads: Vec<_> = doc
        .descendants()
        .filter(|n| n.attribute("class") == Some("playhead"))
        .collect();
    assert_eq!(playheads.len(), 1);
    assert_eq!(playheads[0].attribute("x1"), Some("207.5"));

    assert!(svg.contains(">C4</text>"), "labels should be drawn");
    assert!(svg.contains("\u{266F}"), "F#3 should get a sharp");
    assert!(svg.contains("\u{266D}"), "Bb3 should get a flat");

    let out = output_dir().join("scale.svg");
    std::fs::write(&out, &svg).expect("Failed to write SVG");
    println!("✓ Rendered scale.svg ({} bytes)", svg.len());
}

#[test]
fn rests_fill_empty_staves() {
    let notes = vec![NoteEvent::new("a", 60, "c", 0.0, 4.0, Staff::Treble)];
    let frame = build_frame(&ViewConfig::default(), &ViewInput::new(notes)).unwrap();
    let svg = render_frame_to_svg(&frame).unwrap();

    let doc = roxmltree::Document::parse(&svg).unwrap();
    let rests = doc
        .descendants()
        .filter(|n| n.attribute("class") == Some("rest"))
        .count();
    assert_eq!(rests, 1);
    // whole note: one hollow head, no stem
    assert_eq!(count_tag(&doc, "ellipse"), 1);
}

#[test]
fn rendering_is_idempotent() {
    let a = render_frame_to_svg(&scale_frame(true, Some("b2"))).unwrap();
    let b = render_frame_to_svg(&scale_frame(true, Some("b2"))).unwrap();
    assert_eq!(a, b);
}

#[test]
fn no_notes_renders_placeholder() {
    let frame = build_frame(&ViewConfig::default(), &ViewInput::new(Vec::new())).unwrap();
    let svg = render_frame_to_svg(&frame).unwrap();
    assert!(svg.contains("No notes to display"));
}

struct Recorder {
    measures: Vec<usize>,
    playhead: Option<f64>,
}

impl StaffRenderer for Recorder {
    type Output = (Vec<usize>, Option<f64>);

    fn draw_measure(&mut self, grid: &MeasureGrid, measure: &AnnotatedMeasure) {
        assert_eq!(grid.index, measure.index);
        self.measures.push(measure.index);
    }

    fn draw_playhead(&mut self, x: f64, _height: f64) {
        self.playhead = Some(x);
    }

    fn finish(self) -> Self::Output {
        (self.measures, self.playhead)
    }
}

#[test]
fn custom_renderer_sees_every_measure_in_order() {
    let frame = scale_frame(false, None);
    let (measures, playhead) = render_frame(&frame, |_, _| {
        Ok(Recorder {
            measures: Vec::new(),
            playhead: None,
        })
    })
    .unwrap();
    assert_eq!(measures, vec![0, 1]);
    assert_eq!(playhead, Some(frame.playhead_x));
}

#[test]
fn unavailable_renderer_leaves_frame_usable() {
    let frame = scale_frame(false, None);
    let result = render_frame(&frame, |_, _| -> Result<Recorder, StaffError> {
        Err(StaffError::RenderingUnavailable("no surface".into()))
    });
    assert!(matches!(result, Err(StaffError::RenderingUnavailable(_))));
    assert_eq!(frame.measures.len(), 2);
}

#[test]
fn invalid_surface_size_is_rendering_unavailable() {
    let frame = build_frame(&ViewConfig::default(), &ViewInput::new(Vec::new())).unwrap();
    let result = render_frame(&frame, |w, _| staffscroll::SvgStaffRenderer::new(w, 0.0));
    assert!(matches!(result, Err(StaffError::RenderingUnavailable(_))));
}

#[test]
fn render_from_json_input() {
    let json = r#"{"notes":[{"id":"x","midi":62,"label":"D4","startBeat":0.5,"durationBeats":0.5,"staff":"treble"}],"bpm":90}"#;
    let svg = render_input_json_to_svg(json).unwrap();
    assert!(roxmltree::Document::parse(&svg).is_ok());
}
