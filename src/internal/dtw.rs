use std::cmp;

/// Selects the template columns evaluated for each input row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Corridor {
    FullRow,
    /// Columns within half the window of the row index. The window is widened
    /// to twice the length difference so the last cell stays reachable.
    FixedWindow { window_size: usize },
    /// Columns within half the window of the row projected onto the template length.
    /// The window is widened to the length difference.
    DiagonalWindow { window_size: usize },
}
impl Corridor {
    fn half_width(&self, m: usize, n: usize) -> usize {
        match *self {
            Corridor::FullRow => n,
            Corridor::FixedWindow { window_size } => cmp::max(window_size, 2 * m.abs_diff(n)) / 2,
            Corridor::DiagonalWindow { window_size } => cmp::max(window_size, m.abs_diff(n)) / 2,
        }
    }
    /// Inclusive column range for the row, none when the corridor falls outside the grid.
    fn columns(&self, row_index: usize, m: usize, n: usize, half_width: usize) -> Option<(usize, usize)> {
        let center = match *self {
            Corridor::FullRow => return Some((1, n)),
            Corridor::FixedWindow { .. } => row_index,
            Corridor::DiagonalWindow { .. } => diagonal_column(row_index, m, n),
        };
        let start_index = cmp::max(1, center.saturating_sub(half_width));
        let end_index = cmp::min(n, center + half_width);
        if start_index > end_index {
            None
        } else {
            Some((start_index, end_index))
        }
    }
}
fn diagonal_column(row_index: usize, m: usize, n: usize) -> usize {
    (row_index as f64 * n as f64 / m as f64).round_ties_even() as usize
}

/// Predecessor cells a grid cell can be reached from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Transitions {
    /// (i-1, j-1), (i-1, j) and (i-1, j-2): the template frame is matched,
    /// stretched or shrunk.
    TemplateWarp,
    /// (i-1, j-1), (i-1, j) and, from the third row on, (i-2, j-2).
    TwoRowLookBack,
}
impl Transitions {
    /// Rows kept in the rolling buffer.
    fn depth(&self) -> usize {
        match self {
            Transitions::TemplateWarp => 2,
            Transitions::TwoRowLookBack => 3,
        }
    }
}

/// Step applied to every row once its corridor is computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum RowPruning {
    None,
    /// Drops cells costing more than the row minimum plus the threshold.
    Beam { threshold: f32 },
}
impl RowPruning {
    fn apply(&self, cells: &mut [f32], row_min: f32) {
        if let RowPruning::Beam { threshold } = *self {
            let limit = row_min + threshold;
            for cell in cells.iter_mut() {
                if *cell > limit {
                    *cell = f32::INFINITY;
                }
            }
        }
    }
}

pub(crate) struct Dtw<T: Copy> {
    distance_fn: fn(T, T) -> f32,
    corridor: Corridor,
    transitions: Transitions,
    pruning: RowPruning,
}
impl<T: Copy> Dtw<T> {
    pub fn new(
        distance_fn: fn(T, T) -> f32,
        corridor: Corridor,
        transitions: Transitions,
        pruning: RowPruning,
    ) -> Dtw<T> {
        Dtw {
            distance_fn,
            corridor,
            transitions,
            pruning,
        }
    }
    /// Cost of the cheapest warping path from (0, 0) to (M, N),
    /// infinite when no path survives the corridor and pruning.
    pub fn compute_cost(&self, input: &[T], template: &[T]) -> f32 {
        self.compute_cost_inspecting_rows(input, template, |_, _| {})
    }
    /// Same as [`Dtw::compute_cost`], handing every finished row (columns 0..=N) to `on_row`.
    pub fn compute_cost_inspecting_rows<F>(&self, input: &[T], template: &[T], mut on_row: F) -> f32
    where
        F: FnMut(usize, &[f32]),
    {
        let m = input.len();
        let n = template.len();
        if m == 0 || n == 0 {
            return f32::INFINITY;
        }
        let width = n + 1;
        let depth = self.transitions.depth();
        let half_width = self.corridor.half_width(m, n);
        // rolling rows, row i lives at (i % depth) * width
        let mut cells = vec![f32::INFINITY; depth * width].into_boxed_slice();
        cells[0] = 0.;
        for row_index in 1..=m {
            let current = (row_index % depth) * width;
            let previous = ((row_index - 1) % depth) * width;
            let before_previous = ((row_index + depth - 2) % depth) * width;
            cells[current..current + width].fill(f32::INFINITY);
            let Some((start_index, end_index)) =
                self.corridor.columns(row_index, m, n, half_width)
            else {
                on_row(row_index, &cells[current..current + width]);
                continue;
            };
            let input_item = input[row_index - 1];
            let mut row_min = f32::INFINITY;
            for column_index in start_index..=end_index {
                let cost = (self.distance_fn)(input_item, template[column_index - 1]);
                let matches = cells[previous + column_index - 1];
                let stretch = cells[previous + column_index];
                let shrink = match self.transitions {
                    Transitions::TemplateWarp if column_index >= 2 => {
                        cells[previous + column_index - 2]
                    }
                    Transitions::TwoRowLookBack if row_index >= 3 && column_index >= 2 => {
                        cells[before_previous + column_index - 2]
                    }
                    _ => f32::INFINITY,
                };
                let total = cost + matches.min(stretch).min(shrink);
                cells[current + column_index] = total;
                row_min = row_min.min(total);
            }
            self.pruning.apply(
                &mut cells[current + start_index..=current + end_index],
                row_min,
            );
            on_row(row_index, &cells[current..current + width]);
        }
        cells[(m % depth) * width + n]
    }
}
