use std::collections::BTreeMap;

use crate::data::model::LongTable;

/// Total width around a category center shared by all groups.
const DODGE_WIDTH: f64 = 0.6;
/// Spread of replicates inside one group's slot.
const JITTER_WIDTH: f64 = 0.2;

// ---------------------------------------------------------------------------
// Categorical strip layout
// ---------------------------------------------------------------------------

/// One plotted point. `x` is the category position plus dodge and jitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripPoint {
    pub x: f64,
    pub y: f64,
    pub group: usize,
}

/// Point positions for a categorical scatter, shared by the interactive
/// viewer and the figure writer.
///
/// Feature `i` is centered at `x = i`. Groups are dodged side by side
/// around the center and replicates of a (feature, group) pair are spread
/// evenly across the group's slot, so the layout is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct StripLayout {
    pub features: Vec<String>,
    pub groups: Vec<String>,
    pub points: Vec<StripPoint>,
}

impl StripLayout {
    pub fn from_table(table: &LongTable) -> Self {
        let features = table.features();
        let groups = table.groups();

        let feature_pos: BTreeMap<&str, usize> =
            features.iter().enumerate().map(|(i, f)| (f.as_str(), i)).collect();
        let group_pos: BTreeMap<&str, usize> =
            groups.iter().enumerate().map(|(i, g)| (g.as_str(), i)).collect();

        let keyed: Vec<(usize, usize, f64)> = table
            .records
            .iter()
            .filter(|r| r.intensity.is_finite())
            .map(|r| {
                (
                    feature_pos[r.feature_label.as_str()],
                    group_pos[r.sample_group.as_str()],
                    r.intensity,
                )
            })
            .collect();

        let skipped = table.len() - keyed.len();
        if skipped > 0 {
            log::warn!("{skipped} non-finite intensities not plotted");
        }

        let mut totals: BTreeMap<(usize, usize), usize> = BTreeMap::new();
        for &(f, g, _) in &keyed {
            *totals.entry((f, g)).or_default() += 1;
        }

        let slot = DODGE_WIDTH / groups.len().max(1) as f64;
        let mut seen: BTreeMap<(usize, usize), usize> = BTreeMap::new();
        let points = keyed
            .into_iter()
            .map(|(f, g, y)| {
                let j = seen.entry((f, g)).or_default();
                let k = totals[&(f, g)];
                let jitter = if k > 1 {
                    (*j as f64 / (k - 1) as f64 - 0.5) * JITTER_WIDTH
                } else {
                    0.0
                };
                *j += 1;
                let dodge = (g as f64 + 0.5) * slot - DODGE_WIDTH / 2.0;
                StripPoint {
                    x: f as f64 + dodge + jitter,
                    y,
                    group: g,
                }
            })
            .collect();

        StripLayout {
            features,
            groups,
            points,
        }
    }

    /// Feature name at a tick position, if it sits on a category center.
    pub fn feature_at(&self, x: f64) -> Option<&str> {
        category_at(&self.features, x)
    }

    /// Y extent of all points with 5% padding. Falls back to `0..1`.
    pub fn y_range(&self) -> (f64, f64) {
        let min = self.points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max = self.points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        if !min.is_finite() || !max.is_finite() {
            return (0.0, 1.0);
        }
        let range = max - min;
        let pad = if range.abs() < f64::EPSILON {
            min.abs().max(1.0) * 0.05
        } else {
            range * 0.05
        };
        (min - pad, max + pad)
    }

    /// Points of one group as `[x, y]` pairs.
    pub fn group_points(&self, group: usize) -> Vec<[f64; 2]> {
        self.points
            .iter()
            .filter(|p| p.group == group)
            .map(|p| [p.x, p.y])
            .collect()
    }
}

/// Category name at `x` when `x` is (numerically) a category index.
pub fn category_at(categories: &[String], x: f64) -> Option<&str> {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return None;
    }
    categories.get(rounded as usize).map(String::as_str)
}
