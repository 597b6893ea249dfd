/// Property tests over generated transcriptions.

use proptest::prelude::*;
use yijing_table::{parse_text, read_json_table, TableEmitter, TableFormat};

const LABELS: [&str; 14] = [
    "初九", "初六", "九二", "六二", "九三", "六三", "九四", "六四", "九五", "六五", "上九", "上六",
    "用九", "用六",
];

/// Free text starting with a fixed glyph, with no `《`, `，` or whitespace.
fn body_text() -> impl Strategy<Value = String> {
    "[a-z'\"\\\\{}$龙马之贞吉凶亨利]{0,12}".prop_map(|s| format!("曰{}", s))
}

#[derive(Debug, Clone)]
struct GenLine {
    label: usize,
    text: String,
    commentary: Option<String>,
}

#[derive(Debug, Clone)]
struct GenFigure {
    ordinal: u8,
    maxim: String,
    commentary: Option<String>,
    image: Option<String>,
    lines: Vec<GenLine>,
}

fn gen_line() -> impl Strategy<Value = GenLine> {
    (0..LABELS.len(), body_text(), proptest::option::of(body_text()))
        .prop_map(|(label, text, commentary)| GenLine { label, text, commentary })
}

fn gen_figure(ordinal: u8) -> impl Strategy<Value = GenFigure> {
    (
        Just(ordinal),
        body_text(),
        proptest::option::of(body_text()),
        proptest::option::of(body_text()),
        proptest::collection::vec(gen_line(), 0..8),
    )
        .prop_map(|(ordinal, maxim, commentary, image, lines)| GenFigure {
            ordinal,
            maxim,
            commentary,
            image,
            lines,
        })
}

/// Figures with distinct ordinals in arbitrary order.
fn gen_figures(max: usize) -> impl Strategy<Value = Vec<GenFigure>> {
    proptest::sample::subsequence((1u8..=64).collect::<Vec<_>>(), 0..max)
        .prop_shuffle()
        .prop_flat_map(|ordinals| ordinals.into_iter().map(gen_figure).collect::<Vec<_>>())
}

fn render_source(figures: &[GenFigure], noise: &[String]) -> String {
    let mut out = String::new();
    for (i, f) in figures.iter().enumerate() {
        if let Some(n) = noise.get(i) {
            out.push_str(n);
            out.push('\n');
        }
        out.push_str(&format!("{}　X，{}\n", f.ordinal, f.maxim));
        if let Some(c) = &f.commentary {
            out.push_str(&format!("《彖》曰：{}\n", c));
        }
        if let Some(c) = &f.image {
            out.push_str(&format!("《象》曰：{}\n", c));
        }
        for line in &f.lines {
            out.push_str(&format!("{}，{}\n", LABELS[line.label], line.text));
            if let Some(c) = &line.commentary {
                out.push_str(&format!("《象》曰：{}\n", c));
            }
        }
    }
    out
}

proptest! {
    #[test]
    fn header_and_line_counts(
        figures in gen_figures(10),
        noise in proptest::collection::vec("[a-z ]{0,10}", 0..10),
    ) {
        let parsed = parse_text(&render_source(&figures, &noise));
        prop_assert_eq!(parsed.figures.len(), figures.len());

        for (got, want) in parsed.figures.iter().zip(&figures) {
            prop_assert_eq!(got.ordinal, want.ordinal);
            prop_assert_eq!(&got.maxim, &want.maxim);
            prop_assert_eq!(got.lines.len(), want.lines.len());
            prop_assert_eq!(&got.commentary, &want.commentary.clone().unwrap_or_default());
            prop_assert_eq!(&got.image_commentary, &want.image.clone().unwrap_or_default());
            for (gl, wl) in got.lines.iter().zip(&want.lines) {
                prop_assert_eq!(gl.label.to_string(), LABELS[wl.label]);
                prop_assert_eq!(&gl.text, &wl.text);
                prop_assert_eq!(&gl.line_commentary, &wl.commentary.clone().unwrap_or_default());
            }
        }
    }

    #[test]
    fn json_round_trip(figures in gen_figures(6)) {
        let parsed = parse_text(&render_source(&figures, &[]));
        let emitter = TableEmitter::new(TableFormat::Json);
        let out = emitter.render(&parsed.figures).unwrap();
        prop_assert_eq!(read_json_table(&out).unwrap(), parsed.figures.clone());

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        prop_assert_eq!(value.as_object().map(|m| m.len()), Some(parsed.figures.len()));
        prop_assert_eq!(out, emitter.render(&parsed.figures).unwrap());
    }

    #[test]
    fn repeated_headers_keep_first_figure(figures in gen_figures(6)) {
        let mut source = render_source(&figures, &[]);
        source.push_str(&render_source(&figures, &[]));
        let parsed = parse_text(&source);

        prop_assert_eq!(parsed.figures.len(), figures.len());
        prop_assert_eq!(parsed.stats.duplicate_headers, figures.len());
        for (got, want) in parsed.figures.iter().zip(&figures) {
            prop_assert_eq!(got.ordinal, want.ordinal);
            prop_assert_eq!(got.lines.len(), want.lines.len());
        }
    }
}
