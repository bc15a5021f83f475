//! SVG builder — accumulates SVG elements and produces the final string.

use super::constants::*;

pub(super) struct SvgBuilder {
    elements: Vec<String>,
    width: f64,
    height: f64,
}

fn escape(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl SvgBuilder {
    pub(super) fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
        }
    }

    pub(super) fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub(super) fn build(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}" style="font-family: 'Georgia', 'Times New Roman', serif;">"#,
            self.width, self.height, self.width, self.height
        );
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    pub(super) fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64) {
        self.elements.push(format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}" stroke-linecap="round"/>"#,
            x1, y1, x2, y2, color, width
        ));
    }

    /// Line tagged with a class so hosts can restyle or move it.
    pub(super) fn classed_line(&mut self, class: &str, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64) {
        self.elements.push(format!(
            r#"<line class="{}" x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}"/>"#,
            class, x1, y1, x2, y2, color, width
        ));
    }

    pub(super) fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        self.elements.push(format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            x, y, w, h, fill
        ));
    }

    pub(super) fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
        self.elements.push(format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
            cx, cy, r, fill
        ));
    }

    pub(super) fn text(&mut self, x: f64, y: f64, content: &str, size: f64, fill: &str, anchor: &str) {
        self.elements.push(format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="{:.0}" fill="{}" text-anchor="{}">{}</text>"#,
            x, y, size, fill, anchor, escape(content)
        ));
    }

    pub(super) fn path(&mut self, d: &str, fill: &str, stroke: &str, stroke_width: f64) {
        self.elements.push(format!(
            r#"<path d="{}" fill="{}" stroke="{}" stroke-width="{:.1}" stroke-linecap="round"/>"#,
            d, fill, stroke, stroke_width
        ));
    }

    /// Tilted ellipse; hollow heads are drawn as a stroked outline.
    pub(super) fn notehead(&mut self, cx: f64, cy: f64, filled: bool, color: &str) {
        let rx = NOTEHEAD_RX;
        let ry = NOTEHEAD_RY;
        if filled {
            self.elements.push(format!(
                r#"<ellipse cx="{:.1}" cy="{:.1}" rx="{:.1}" ry="{:.1}" fill="{}" transform="rotate(-15,{:.1},{:.1})"/>"#,
                cx, cy, rx, ry, color, cx, cy
            ));
        } else {
            let sw = 2.0;
            self.elements.push(format!(
                r#"<ellipse cx="{:.1}" cy="{:.1}" rx="{:.1}" ry="{:.1}" fill="none" stroke="{}" stroke-width="{:.1}" transform="rotate(-15,{:.1},{:.1})"/>"#,
                cx, cy, rx - sw / 2.0, ry - sw / 2.0, color, sw, cx, cy
            ));
        }
    }

    /// Open a group; must be balanced by `end_group`.
    pub(super) fn begin_group(&mut self, class: &str, id: Option<&str>) {
        match id {
            Some(id) => self.elements.push(format!(
                r#"<g class="{}" data-note-id="{}">"#,
                class,
                escape(id).replace('"', "&quot;")
            )),
            None => self.elements.push(format!(r#"<g class="{}">"#, class)),
        }
    }

    pub(super) fn end_group(&mut self) {
        self.elements.push("</g>".to_string());
    }
}

/// Placeholder surface for a view with nothing to draw.
pub(super) fn empty_svg(message: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 400 100\">\
         <text x=\"200\" y=\"50\" text-anchor=\"middle\" font-size=\"14\" fill=\"gray\">{}</text>\
         </svg>",
        escape(message)
    )
}
