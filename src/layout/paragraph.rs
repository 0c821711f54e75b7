use crate::foundation::core::{Affine, Rect, Vec2};

/// Opaque visual artifact produced by a clip renderer.
///
/// The layout only needs to measure, move and scale artifacts; geometry stays with the
/// implementor.
pub trait Pen {
    fn bounds(&self) -> Rect;

    fn transform(&mut self, affine: Affine);

    /// Merge self-overlapping contours. Default is a no-op.
    fn remove_overlap(&mut self) {}
}

/// Horizontal alignment of each line inside the layout rect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AlignX {
    Start,
    #[default]
    Center,
    End,
}

/// Vertical alignment of the paragraph inside the layout rect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AlignY {
    Start,
    #[default]
    Center,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParagraphStyle {
    /// Gap between stacked lines.
    #[serde(default)]
    pub leading: f64,
    /// Gap between clips that are not joined.
    #[serde(default)]
    pub word_space: f64,
    #[serde(default)]
    pub align_x: AlignX,
    #[serde(default)]
    pub align_y: AlignY,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            leading: 10.0,
            word_space: 20.0,
            align_x: AlignX::Center,
            align_y: AlignY::Center,
        }
    }
}

/// A rendered clip waiting for placement.
#[derive(Clone, Debug)]
pub struct PlacedClip<A> {
    pub pen: A,
    /// No word gap before this clip.
    pub joins_prev: bool,
}

/// Lay out lines of pens top to bottom inside `rect` (y grows downward).
///
/// Within a line pens run left to right. Lines wider than `fit` are scaled down uniformly.
pub fn layout_paragraph<A: Pen>(
    lines: Vec<Vec<PlacedClip<A>>>,
    rect: Rect,
    style: &ParagraphStyle,
    fit: Option<f64>,
) -> Vec<Vec<A>> {
    let mut laid = Vec::<(Vec<A>, f64, f64)>::with_capacity(lines.len());
    for line in lines {
        let mut x = 0.0;
        let mut h = 0.0f64;
        let mut pens = Vec::with_capacity(line.len());
        for (i, placed) in line.into_iter().enumerate() {
            let mut pen = placed.pen;
            if i > 0 && !placed.joins_prev {
                x += style.word_space;
            }
            let b = pen.bounds();
            pen.transform(Affine::translate(Vec2::new(x - b.x0, -b.y0)));
            x += b.width();
            h = h.max(b.height());
            pens.push(pen);
        }
        let mut w = x;
        if let Some(max_w) = fit
            && w > max_w
            && w > 0.0
        {
            let s = max_w / w;
            for pen in &mut pens {
                pen.transform(Affine::scale(s));
            }
            w *= s;
            h *= s;
        }
        laid.push((pens, w, h));
    }

    let total_h = laid.iter().map(|(_, _, h)| *h).sum::<f64>()
        + (laid.len().saturating_sub(1) as f64) * style.leading;
    let mut y = rect.y0 + align_offset(rect.height(), total_h, style.align_y);

    laid.into_iter()
        .map(|(mut pens, w, h)| {
            let x = rect.x0 + align_offset(rect.width(), w, style.align_x);
            for pen in &mut pens {
                pen.transform(Affine::translate(Vec2::new(x, y)));
                pen.remove_overlap();
            }
            y += h + style.leading;
            pens
        })
        .collect()
}

fn align_offset<A: Into<AlignKind>>(container: f64, content: f64, align: A) -> f64 {
    let rem = (container - content).max(0.0);
    match align.into() {
        AlignKind::Start => 0.0,
        AlignKind::Center => rem * 0.5,
        AlignKind::End => rem,
    }
}

enum AlignKind {
    Start,
    Center,
    End,
}

impl From<AlignX> for AlignKind {
    fn from(value: AlignX) -> Self {
        match value {
            AlignX::Start => AlignKind::Start,
            AlignX::Center => AlignKind::Center,
            AlignX::End => AlignKind::End,
        }
    }
}

impl From<AlignY> for AlignKind {
    fn from(value: AlignY) -> Self {
        match value {
            AlignY::Start => AlignKind::Start,
            AlignY::Center => AlignKind::Center,
            AlignY::End => AlignKind::End,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/paragraph.rs"]
mod tests;
