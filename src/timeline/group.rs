use crate::{
    foundation::core::Rect,
    layout::{
        cache::{GroupPens, PenCache},
        paragraph::{ParagraphStyle, Pen, PlacedClip, layout_paragraph},
    },
    timeline::clip::{Clip, ClipType, Position},
};

/// Contiguous run of clips on one track, bounded by `ClearScreen` breaks.
///
/// The group owns its clips. Join links are indices into [`ClipGroup::clips`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ClipGroup {
    pub index: usize,
    pub track: usize,
    pub clips: Vec<Clip>,
}

/// Split a track's clips into groups, assigning indices and join links.
pub fn group_clips(clips: Vec<Clip>, track: usize) -> Vec<ClipGroup> {
    let mut groups = Vec::new();
    let mut buffer: Vec<Clip> = Vec::new();

    let seal = |groups: &mut Vec<ClipGroup>, buffer: &mut Vec<Clip>| {
        if !buffer.is_empty() {
            groups.push(ClipGroup {
                index: groups.len(),
                track,
                clips: std::mem::take(buffer),
            });
        }
    };

    for mut clip in clips {
        if clip.kind == ClipType::ClearScreen {
            seal(&mut groups, &mut buffer);
        }
        let idx = buffer.len();
        clip.idx = idx;
        clip.track = track;
        clip.group = Some(groups.len());
        clip.join_prev = None;
        clip.join_next = None;
        if clip.kind == ClipType::JoinPrev
            && let Some(last) = buffer.last_mut()
        {
            last.join_next = Some(idx);
            clip.join_prev = Some(idx - 1);
        }
        buffer.push(clip);
    }
    seal(&mut groups, &mut buffer);

    tracing::debug!(track, groups = groups.len(), "grouped clips");
    groups
}

impl ClipGroup {
    pub fn start(&self) -> i64 {
        self.clips.first().map_or(0, |c| c.start)
    }

    pub fn end(&self) -> i64 {
        self.clips.last().map_or(0, |c| c.end)
    }

    /// Sub-sequences of clips split before every `NewLine` clip.
    pub fn lines(&self) -> Lines<'_> {
        Lines {
            clips: &self.clips,
            pos: 0,
        }
    }

    /// Recompute per-clip query state for `frame`.
    ///
    /// Clips of `overlays` (groups on style tracks) that fully cover a clip contribute their
    /// trimmed text to its `styles`. At most one clip becomes [`Position::Current`]: when
    /// clips overlap, the one with the largest `start` wins (the later clip in track order on
    /// ties) and the others count as already passed.
    pub fn position(&mut self, frame: i64, overlays: &[&ClipGroup]) -> &mut Self {
        for clip in &mut self.clips {
            clip.joined = false;
            clip.styles.clear();
            for overlay in overlays {
                for style in &overlay.clips {
                    if clip.covered_by(style.start, style.end) {
                        clip.styles.push(style.text.trim().to_string());
                    }
                }
            }
        }

        let current = self
            .clips
            .iter()
            .enumerate()
            .filter(|(_, c)| c.start <= frame && frame < c.end)
            .max_by_key(|(_, c)| c.start)
            .map(|(i, _)| i);
        for (i, clip) in self.clips.iter_mut().enumerate() {
            clip.position = if Some(i) == current {
                Position::Current
            } else if clip.start > frame {
                Position::After
            } else {
                Position::Before
            };
        }

        if let Some(cur) = current {
            let (head, tail) = self.chain_bounds(cur);
            if head != tail {
                for clip in &mut self.clips[head..=tail] {
                    clip.joined = true;
                }
            }
        }
        self
    }

    /// First and last index of the join chain through `idx`.
    ///
    /// Links only ever point at the adjacent clip, so each walk is bounded by the group size.
    fn chain_bounds(&self, idx: usize) -> (usize, usize) {
        let mut head = idx;
        for _ in 0..self.clips.len() {
            match self.clips[head].join_prev {
                Some(prev) if prev < head => head = prev,
                _ => break,
            }
        }
        let mut tail = idx;
        for _ in 0..self.clips.len() {
            match self.clips[tail].join_next {
                Some(next) if next > tail && next < self.clips.len() => tail = next,
                _ => break,
            }
        }
        (head, tail)
    }

    fn current_index(&self) -> Option<usize> {
        self.clips
            .iter()
            .position(|c| c.position == Position::Current)
    }

    pub fn current_syllable(&self) -> Option<&Clip> {
        self.current_index().map(|i| &self.clips[i])
    }

    /// The current clip plus its whole join chain, in original order.
    pub fn current_word(&self) -> Vec<&Clip> {
        let Some(cur) = self.current_index() else {
            return Vec::new();
        };
        let (head, tail) = self.chain_bounds(cur);
        self.clips[head..=tail].iter().collect()
    }

    pub fn current_line(&self) -> Option<&[Clip]> {
        let cur = self.current_index()?;
        self.lines().find(|line| line.iter().any(|c| c.idx == cur))
    }

    /// Neighbor of clip `idx` at `direction` steps; wraps around the group when `wrap` is set.
    pub fn sibling(&self, idx: usize, direction: isize, wrap: bool) -> Option<&Clip> {
        let len = self.clips.len() as isize;
        if len == 0 {
            return None;
        }
        let target = idx as isize + direction;
        if (0..len).contains(&target) {
            self.clips.get(target as usize)
        } else if wrap {
            self.clips.get(target.rem_euclid(len) as usize)
        } else {
            None
        }
    }

    /// Group text with boundary markers: `*` clear-screen, space isolated, `+` join,
    /// newline for line breaks. For debugging, not rendering.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for clip in &self.clips {
            match clip.kind {
                ClipType::ClearScreen => out.push('*'),
                ClipType::Isolated => out.push(' '),
                ClipType::JoinPrev => out.push('+'),
                ClipType::NewLine => out.push('\n'),
            }
            out.push_str(&clip.text);
        }
        out
    }

    /// Render every clip with `render_clip` and lay the results out line by line in `rect`.
    ///
    /// With a cache the layout is computed once per `(track, index)` until the caller
    /// invalidates it; later calls return the stored result even if clips changed.
    pub fn pens<A, F>(
        &self,
        render_clip: F,
        rect: Rect,
        style: &ParagraphStyle,
        fit: Option<f64>,
        cache: Option<&PenCache<A>>,
    ) -> GroupPens<A>
    where
        A: Pen,
        F: FnMut(&Clip) -> A,
    {
        match cache {
            Some(cache) => cache.get_or_render(self.track, self.index, || {
                self.layout_pens(render_clip, rect, style, fit)
            }),
            None => GroupPens::new(self.layout_pens(render_clip, rect, style, fit)),
        }
    }

    fn layout_pens<A, F>(
        &self,
        mut render_clip: F,
        rect: Rect,
        style: &ParagraphStyle,
        fit: Option<f64>,
    ) -> Vec<Vec<A>>
    where
        A: Pen,
        F: FnMut(&Clip) -> A,
    {
        let lines = self
            .lines()
            .map(|line| {
                line.iter()
                    .enumerate()
                    .map(|(i, clip)| PlacedClip {
                        pen: render_clip(clip),
                        joins_prev: i > 0 && clip.join_prev.is_some(),
                    })
                    .collect()
            })
            .collect();
        layout_paragraph(lines, rect, style, fit)
    }
}

/// Iterator over a group's lines; see [`ClipGroup::lines`].
#[derive(Clone, Debug)]
pub struct Lines<'a> {
    clips: &'a [Clip],
    pos: usize,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [Clip];

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.clips.len() {
            return None;
        }
        let start = self.pos;
        let end = self.clips[start + 1..]
            .iter()
            .position(|c| c.kind == ClipType::NewLine)
            .map_or(self.clips.len(), |off| start + 1 + off);
        self.pos = end;
        Some(&self.clips[start..end])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/group.rs"]
mod tests;
