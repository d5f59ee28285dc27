use smallvec::SmallVec;

use crate::core::{AxisId, AxisSide};

pub type AxisSideList = SmallVec<[AxisId; 4]>;

/// A horizontal band of the chart surface.
///
/// The panel owns the ordering of its left/right axis lists; axis records
/// themselves live in the arena.
#[derive(Debug, Clone)]
pub struct Panel {
    pub(crate) name: String,
    pub(crate) chart_name: String,
    pub(crate) primary_axis: AxisId,
    pub(crate) lhs: AxisSideList,
    pub(crate) rhs: AxisSideList,
    pub(crate) hidden: bool,
    pub(crate) percent: f64,
    pub(crate) old_percent: Option<f64>,
    pub(crate) soloing: bool,
    pub(crate) top: f64,
    pub(crate) bottom: f64,
    pub(crate) left: f64,
    pub(crate) right: f64,
    pub(crate) width: f64,
    pub(crate) total_width_left: f64,
    pub(crate) total_width_right: f64,
    pub(crate) padding_left: f64,
    pub(crate) padding_right: f64,
}

impl Panel {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        chart_name: impl Into<String>,
        primary_axis: AxisId,
        percent: f64,
    ) -> Self {
        Self {
            name: name.into(),
            chart_name: chart_name.into(),
            primary_axis,
            lhs: AxisSideList::new(),
            rhs: AxisSideList::new(),
            hidden: false,
            percent,
            old_percent: None,
            soloing: false,
            top: 0.0,
            bottom: 0.0,
            left: 0.0,
            right: 0.0,
            width: 0.0,
            total_width_left: 0.0,
            total_width_right: 0.0,
            padding_left: 0.0,
            padding_right: 0.0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn chart_name(&self) -> &str {
        &self.chart_name
    }

    /// True when the panel hosts its chart rather than overlaying it.
    #[must_use]
    pub fn hosts_chart(&self) -> bool {
        self.name == self.chart_name
    }

    #[must_use]
    pub fn primary_axis(&self) -> AxisId {
        self.primary_axis
    }

    #[must_use]
    pub fn left_axes(&self) -> &[AxisId] {
        &self.lhs
    }

    #[must_use]
    pub fn right_axes(&self) -> &[AxisId] {
        &self.rhs
    }

    /// Left axes followed by right axes.
    pub fn axes(&self) -> impl Iterator<Item = AxisId> + '_ {
        self.lhs.iter().chain(self.rhs.iter()).copied()
    }

    #[must_use]
    pub fn axis_count(&self) -> usize {
        self.lhs.len() + self.rhs.len()
    }

    #[must_use]
    pub fn contains_axis(&self, axis: AxisId) -> bool {
        self.lhs.contains(&axis) || self.rhs.contains(&axis)
    }

    #[must_use]
    pub fn side_of(&self, axis: AxisId) -> Option<AxisSide> {
        if self.lhs.contains(&axis) {
            Some(AxisSide::Left)
        } else if self.rhs.contains(&axis) {
            Some(AxisSide::Right)
        } else {
            None
        }
    }

    /// Removes `axis` from both side lists; returns whether it was present.
    pub(crate) fn detach_axis(&mut self, axis: AxisId) -> bool {
        let before = self.axis_count();
        self.lhs.retain(|id| *id != axis);
        self.rhs.retain(|id| *id != axis);
        before != self.axis_count()
    }

    pub(crate) fn mount_axis(&mut self, axis: AxisId, side: AxisSide) {
        if self.contains_axis(axis) {
            return;
        }
        match side {
            AxisSide::Left => self.lhs.push(axis),
            AxisSide::Right => self.rhs.push(axis),
        }
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    #[must_use]
    pub fn is_soloing(&self) -> bool {
        self.soloing
    }

    #[must_use]
    pub fn percent(&self) -> f64 {
        self.percent
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.top
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.left
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.right
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Sum of the visible left axis widths from the last layout pass.
    #[must_use]
    pub fn total_width_left(&self) -> f64 {
        self.total_width_left
    }

    #[must_use]
    pub fn total_width_right(&self) -> f64 {
        self.total_width_right
    }

    #[must_use]
    pub fn padding_left(&self) -> f64 {
        self.padding_left
    }

    #[must_use]
    pub fn padding_right(&self) -> f64 {
        self.padding_right
    }
}

/// Splits `[top, bottom]` into consecutive regions proportional to `weights`.
///
/// Non-positive or non-finite weights collapse to zero height; if every weight
/// is unusable the space is shared equally. The last region always ends at
/// `bottom`.
#[must_use]
pub fn split_vertical_regions(weights: &[f64], top: f64, bottom: f64) -> Vec<(f64, f64)> {
    if weights.is_empty() {
        return Vec::new();
    }

    let safe_top = if top.is_finite() { top.max(0.0) } else { 0.0 };
    let safe_bottom = if bottom.is_finite() {
        bottom.max(safe_top)
    } else {
        safe_top
    };
    let total_height = safe_bottom - safe_top;
    if total_height <= 0.0 {
        return vec![(safe_top, safe_top); weights.len()];
    }

    let mut normalized: Vec<f64> = weights
        .iter()
        .map(|weight| {
            if weight.is_finite() && *weight > 0.0 {
                *weight
            } else {
                0.0
            }
        })
        .collect();
    let sum: f64 = normalized.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        normalized.fill(1.0 / weights.len() as f64);
    } else {
        for weight in &mut normalized {
            *weight /= sum;
        }
    }

    let mut regions = Vec::with_capacity(weights.len());
    let mut cursor = safe_top;
    let last_index = weights.len() - 1;
    for (index, weight) in normalized.iter().enumerate() {
        let next_bottom = if index == last_index {
            safe_bottom
        } else {
            (cursor + total_height * weight).clamp(cursor, safe_bottom)
        };
        regions.push((cursor, next_bottom));
        cursor = next_bottom;
    }
    regions
}
