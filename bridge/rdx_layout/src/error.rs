use rdx_ir::RKind;
use thiserror::Error;

/// Layout and reconstruction failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("buffer of length {found} does not match dimensions {dims:?} (expected {expected})")]
    LengthMismatch {
        dims: Vec<usize>,
        expected: usize,
        found: usize,
    },
    #[error("{names} names given for {columns} columns")]
    ColumnCountMismatch { names: usize, columns: usize },
    #[error("column '{name}' has {found} rows, expected {expected}")]
    ColumnLengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("a dimension vector needs at least one entry")]
    RankTooSmall,
    #[error("cannot stack a {found} buffer into a {expected} array")]
    KindMismatch { expected: RKind, found: RKind },
}

#[cold]
pub(crate) fn length_mismatch(dims: &[usize], found: usize) -> LayoutError {
    LayoutError::LengthMismatch {
        dims: dims.to_vec(),
        expected: dims.iter().product(),
        found,
    }
}
