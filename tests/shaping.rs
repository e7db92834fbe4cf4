mod common;

use common::{utf16, MockFont, PassthroughLayout};
use textshaper::layout::NoLayout;
use textshaper::tag;
use textshaper::{ShapeBuffers, ShapeContext, ShapingError, TextRun};

#[test]
fn arabic_presentation_forms_without_layout() {
    // Beh + Alef: beh takes the initial form, alef the final form
    let text = utf16("\u{0628}\u{0627}");
    let run = TextRun::new(&text, 0, 2, tag::ARAB, 1);
    let font = MockFont::full();
    let ctx = ShapeContext::new(&font, &NoLayout);
    let selection = ctx.selection(tag::ARAB);
    let mut buffers = ShapeBuffers::with_capacity(2);
    ctx.shape(&run, &selection, &mut buffers).unwrap();

    // Visual order is right to left
    assert_eq!(buffers.glyphs, vec![0xFE8E, 0xFE91]);
    assert_eq!(buffers.clusters, vec![1, 0]);
}

#[test]
fn arabic_keeps_base_characters_under_layout() {
    let text = utf16("\u{0628}\u{0627}");
    let run = TextRun::new(&text, 0, 2, tag::ARAB, 1);
    let font = MockFont::full();
    let ctx = ShapeContext::new(&font, &PassthroughLayout);
    let selection = ctx.selection(tag::ARAB);
    let mut buffers = ShapeBuffers::with_capacity(2);
    ctx.shape(&run, &selection, &mut buffers).unwrap();

    // The layout collaborator owns contextual forms; the engine passes
    // base codepoints through
    assert_eq!(buffers.glyphs, vec![0x0627, 0x0628]);
}

#[test]
fn lam_alef_ligature_consumes_two_characters() {
    let text = utf16("\u{0644}\u{0627}");
    let run = TextRun::new(&text, 0, 2, tag::ARAB, 1);
    let font = MockFont::full();
    let ctx = ShapeContext::new(&font, &NoLayout);
    let selection = ctx.selection(tag::ARAB);
    let mut buffers = ShapeBuffers::with_capacity(2);
    ctx.shape(&run, &selection, &mut buffers).unwrap();

    assert_eq!(buffers.glyphs, vec![0xFEFB]);
    // Both input units account to the one output unit
    assert_eq!(buffers.clusters, vec![0, 0]);
}

#[test]
fn hangul_jamo_compose_arithmetically() {
    let text = utf16("\u{1100}\u{1161}\u{11A8}");
    let run = TextRun::new(&text, 0, 3, tag::HANG, 0);
    let font = MockFont::full();
    let ctx = ShapeContext::new(&font, &NoLayout);
    let selection = ctx.selection(tag::HANG);
    let mut buffers = ShapeBuffers::with_capacity(3);
    ctx.shape(&run, &selection, &mut buffers).unwrap();

    assert_eq!(buffers.glyphs, vec![0xAC01]);
    assert_eq!(buffers.clusters, vec![0, 0, 0]);
}

#[test]
fn hangul_keeps_jamo_when_syllable_missing() {
    let text = utf16("\u{1100}\u{1161}\u{11A8}");
    let run = TextRun::new(&text, 0, 3, tag::HANG, 0);
    let font = MockFont::without(&['\u{AC01}']);
    let ctx = ShapeContext::new(&font, &NoLayout);
    let selection = ctx.selection(tag::HANG);
    let mut buffers = ShapeBuffers::with_capacity(3);
    ctx.shape(&run, &selection, &mut buffers).unwrap();

    assert_eq!(buffers.glyphs, vec![0x1100, 0x1161, 0x11A8]);
}

#[test]
fn khmer_lone_vowel_gets_a_dotted_circle() {
    // Dependent vowel AA with no consonant to attach to
    let text = utf16("\u{17B6}");
    let run = TextRun::new(&text, 0, 1, tag::KHMR, 0);
    let font = MockFont::full();
    let ctx = ShapeContext::new(&font, &NoLayout);
    let selection = ctx.selection(tag::KHMR);
    let mut buffers = ShapeBuffers::with_capacity(2);
    ctx.shape(&run, &selection, &mut buffers).unwrap();

    assert_eq!(buffers.glyphs[0], 0x25CC);
    assert_eq!(buffers.glyphs[1], 0x17B6);
    assert!(buffers.attributes[0].is_cluster_start());
}

#[test]
fn greek_composes_when_renderable() {
    let text = utf16("\u{03B1}\u{0301}");
    let run = TextRun::new(&text, 0, 2, tag::GREK, 0);
    let font = MockFont::full();
    let ctx = ShapeContext::new(&font, &NoLayout);
    let selection = ctx.selection(tag::GREK);
    let mut buffers = ShapeBuffers::with_capacity(2);
    ctx.shape(&run, &selection, &mut buffers).unwrap();

    assert_eq!(buffers.glyphs, vec![0x03AC]);
}

#[test]
fn greek_keeps_the_mark_when_not_renderable() {
    let text = utf16("\u{03B1}\u{0301}");
    let run = TextRun::new(&text, 0, 2, tag::GREK, 0);
    let font = MockFont::without(&['\u{03AC}']);
    let ctx = ShapeContext::new(&font, &NoLayout);
    let selection = ctx.selection(tag::GREK);
    let mut buffers = ShapeBuffers::with_capacity(2);
    ctx.shape(&run, &selection, &mut buffers).unwrap();

    assert_eq!(buffers.glyphs, vec![0x03B1, 0x0301]);
    assert!(buffers.attributes[1].is_mark());
    assert_eq!(buffers.advances[1], 0);
}

#[test]
fn capacity_error_reports_a_working_size() {
    let text = utf16("abcdef");
    let run = TextRun::new(&text, 0, 6, tag::LATN, 0);
    let font = MockFont::full();
    let ctx = ShapeContext::new(&font, &NoLayout);
    let selection = ctx.selection(tag::LATN);

    let mut buffers = ShapeBuffers::with_capacity(3);
    let required = match ctx.shape(&run, &selection, &mut buffers) {
        Err(ShapingError::Capacity { required }) => required,
        other => panic!("expected capacity error, got {:?}", other),
    };
    assert!(buffers.is_empty());

    let mut buffers = ShapeBuffers::with_capacity(required);
    ctx.shape(&run, &selection, &mut buffers).unwrap();
    assert_eq!(buffers.len(), 6);
}

#[test]
fn rtl_cluster_map_is_monotonic_in_visual_order() {
    let text = utf16("\u{05D0}\u{05D1}\u{05D2}");
    let run = TextRun::new(&text, 0, 3, tag::HEBR, 1);
    let font = MockFont::full();
    let ctx = ShapeContext::new(&font, &NoLayout);
    let selection = ctx.selection(tag::HEBR);
    let mut buffers = ShapeBuffers::with_capacity(3);
    ctx.shape(&run, &selection, &mut buffers).unwrap();

    // Later input units sit earlier on the line
    assert_eq!(buffers.clusters, vec![2, 1, 0]);
}

#[test]
fn every_input_unit_has_a_cluster_entry() {
    let text = utf16("\u{0644}\u{0627}\u{0020}\u{0628}");
    let run = TextRun::new(&text, 0, 4, tag::ARAB, 1);
    let font = MockFont::full();
    let ctx = ShapeContext::new(&font, &NoLayout);
    let selection = ctx.selection(tag::ARAB);
    let mut buffers = ShapeBuffers::with_capacity(4);
    ctx.shape(&run, &selection, &mut buffers).unwrap();

    assert_eq!(buffers.clusters.len(), 4);
    for &idx in &buffers.clusters {
        assert!(idx < buffers.len());
    }

    // Every cluster representative is a cluster start, and cluster starts
    // are not duplicated
    let starts = buffers
        .attributes
        .iter()
        .filter(|a| a.is_cluster_start())
        .count();
    let mut reps: Vec<usize> = buffers.clusters.clone();
    reps.sort_unstable();
    reps.dedup();
    assert_eq!(starts, reps.len());
    for &rep in &reps {
        assert!(buffers.attributes[rep].is_cluster_start());
    }
}
