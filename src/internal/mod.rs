mod distance;
mod dtw;
pub(crate) use distance::euclidean_distance;
pub(crate) use dtw::{Corridor, Dtw, RowPruning, Transitions};
