//! Shape inspection for source arrays.
//!
//! An array is rectangular when every sub-array at one depth is present and
//! shares one length. The candidate dimensions come from walking the first
//! row at every level; the remaining rows are then checked against them.
//!
//! A zero-length level ends the walk: every deeper dimension is zero and is
//! never checked, so `int[0][]` and `int[2][0][]` are rectangular with
//! dimensions `[0, 0]` and `[2, 0, 0]`. A null sub-array anywhere else makes
//! the array ragged.

use rdx_ir::{Dims, ElementClass, HostArray, HostValue, Slots};
use smallvec::smallvec;

/// Dimensions and base element class of a rectangular array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    /// Extent of each level, outermost first (nested order).
    pub dims: Dims,
    pub element: ElementClass,
}

impl Shape {
    #[inline]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Number of leaves.
    #[inline]
    pub fn len(&self) -> usize {
        self.dims.iter().product()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Measure `array`, or `None` if it is ragged.
pub fn inspect(array: &HostArray) -> Option<Shape> {
    let dims = spine_dims(array);
    if !is_rectangular(array, &dims, 0) {
        return None;
    }
    Some(Shape {
        dims,
        element: array.element(),
    })
}

/// Candidate dimensions from the first row of every level.
fn spine_dims(array: &HostArray) -> Dims {
    let mut dims: Dims = smallvec![0; array.rank()];
    let mut level = array;
    for dim in dims.iter_mut() {
        let len = level.len();
        if len == 0 {
            break;
        }
        *dim = len;
        match level.slots() {
            Slots::Rows(rows) => match rows.first() {
                Some(Some(row)) => level = row,
                _ => break,
            },
            Slots::Leaves(_) => break,
        }
    }
    dims
}

fn is_rectangular(array: &HostArray, dims: &[usize], depth: usize) -> bool {
    if depth + 1 >= dims.len() {
        return true;
    }
    let Slots::Rows(rows) = array.slots() else {
        return true;
    };
    let sub_len = dims[depth + 1];
    rows.iter().all(|row| match row {
        Some(row) => row.len() == sub_len && is_rectangular(row, dims, depth + 1),
        None => false,
    })
}

/// Leaves of a rectangular array in nested order.
pub fn leaves(array: &HostArray) -> Vec<&HostValue> {
    let mut out = Vec::new();
    collect_leaves(array, &mut out);
    out
}

fn collect_leaves<'a>(array: &'a HostArray, out: &mut Vec<&'a HostValue>) {
    match array.slots() {
        Slots::Leaves(values) => out.extend(values),
        Slots::Rows(rows) => {
            for row in rows.iter().flatten() {
                collect_leaves(row, out);
            }
        }
    }
}

#[cfg(test)]
mod tests;
