//! Flat-buffer layouts.
//!
//! Every layout is a strided permutation of the nested order. For nested
//! dimensions `[d0, .., dk]` and a nested index `(i0, .., ik)`, the element
//! lands at `sum(i_j * stride_j)` where the strides are:
//!
//! ```text
//! RowMajor     1, d0, d0*d1, ..                      (first index fastest)
//! ColumnMajor  .., d(k-1)*dk, dk, 1                  (last index fastest)
//! ColumnMinor  .., R*C*d(k-2), R*C, 1, R             (R = d(k-1), C = dk)
//! ```
//!
//! `permute_dims` gives the dimension vector under which the flattened
//! buffer reads back in `RowMajor` semantics, which is what the target
//! expects. `restore_dims` undoes it.

use rdx_ir::{ArrayOrder, Buffer, Dims, RKind};
use smallvec::SmallVec;

use crate::error::{length_mismatch, LayoutError};

type Strides = SmallVec<[usize; 4]>;

fn strides(dims: &[usize], order: ArrayOrder) -> Strides {
    let rank = dims.len();
    let mut strides: Strides = SmallVec::from_elem(1, rank);
    match order {
        ArrayOrder::RowMajor => {
            for axis in 1..rank {
                strides[axis] = strides[axis - 1] * dims[axis - 1];
            }
        }
        ArrayOrder::ColumnMajor => {
            for axis in (0..rank.saturating_sub(1)).rev() {
                strides[axis] = strides[axis + 1] * dims[axis + 1];
            }
        }
        ArrayOrder::ColumnMinor if rank >= 2 => {
            let rows = dims[rank - 2];
            let cols = dims[rank - 1];
            strides[rank - 2] = 1;
            strides[rank - 1] = rows;
            if rank >= 3 {
                strides[rank - 3] = rows * cols;
                for axis in (0..rank - 3).rev() {
                    strides[axis] = strides[axis + 1] * dims[axis + 1];
                }
            }
        }
        ArrayOrder::ColumnMinor => {}
    }
    strides
}

/// Destination offset of every nested position, in nested order.
fn offsets(dims: &[usize], order: ArrayOrder) -> Vec<usize> {
    let total: usize = dims.iter().product();
    let strides = strides(dims, order);
    let mut index: Dims = SmallVec::from_elem(0, dims.len());
    let mut out = Vec::with_capacity(total);
    let mut offset = 0;
    for _ in 0..total {
        out.push(offset);
        // Odometer step, last axis fastest.
        for axis in (0..dims.len()).rev() {
            index[axis] += 1;
            offset += strides[axis];
            if index[axis] < dims[axis] {
                break;
            }
            offset -= strides[axis] * index[axis];
            index[axis] = 0;
        }
    }
    out
}

fn check(dims: &[usize], len: usize) -> Result<(), LayoutError> {
    if dims.is_empty() {
        return Err(LayoutError::RankTooSmall);
    }
    if dims.iter().product::<usize>() != len {
        return Err(length_mismatch(dims, len));
    }
    Ok(())
}

/// Dimension vector of a buffer flattened from nested `dims` under `order`,
/// read with the first index varying fastest.
pub fn permute_dims(dims: &[usize], order: ArrayOrder) -> Dims {
    let mut out = Dims::from_slice(dims);
    match order {
        ArrayOrder::RowMajor => {}
        ArrayOrder::ColumnMajor => out.reverse(),
        ArrayOrder::ColumnMinor => {
            let rank = out.len();
            if rank >= 2 {
                out.swap(rank - 1, rank - 2);
            }
            out.reverse();
        }
    }
    out
}

/// Inverse of [`permute_dims`].
pub fn restore_dims(dims: &[usize], order: ArrayOrder) -> Dims {
    let mut out = Dims::from_slice(dims);
    match order {
        ArrayOrder::RowMajor => {}
        ArrayOrder::ColumnMajor => out.reverse(),
        ArrayOrder::ColumnMinor => {
            out.reverse();
            let rank = out.len();
            if rank >= 2 {
                out.swap(rank - 1, rank - 2);
            }
        }
    }
    out
}

/// Lay out `nested` (nested order, shape `dims`) under `order`.
///
/// Returns the buffer and its permuted dimension vector.
pub fn flatten<T: Clone>(
    nested: &[T],
    dims: &[usize],
    order: ArrayOrder,
) -> Result<(Vec<T>, Dims), LayoutError> {
    check(dims, nested.len())?;
    let offsets = offsets(dims, order);
    let mut source = vec![0; nested.len()];
    for (position, &offset) in offsets.iter().enumerate() {
        source[offset] = position;
    }
    let flat = source.iter().map(|&p| nested[p].clone()).collect();
    Ok((flat, permute_dims(dims, order)))
}

/// Read a buffer laid out under `order` back into nested order. `dims` is the
/// nested shape, as passed to [`flatten`].
pub fn unflatten<T: Clone>(
    flat: &[T],
    dims: &[usize],
    order: ArrayOrder,
) -> Result<Vec<T>, LayoutError> {
    check(dims, flat.len())?;
    Ok(offsets(dims, order)
        .into_iter()
        .map(|offset| flat[offset].clone())
        .collect())
}

/// Combine `n` buffers, each already laid out under `order` with permuted
/// dimensions `sub_dims`, into one array with an extra dimension of extent
/// `n`. The result equals flattening the nested `[n][sub..]` array.
pub fn stack<T: Clone>(
    parts: &[Vec<T>],
    sub_dims: &[usize],
    order: ArrayOrder,
) -> Result<(Vec<T>, Dims), LayoutError> {
    if sub_dims.is_empty() {
        return Err(LayoutError::RankTooSmall);
    }
    let sub_len: usize = sub_dims.iter().product();
    if let Some(part) = parts.iter().find(|p| p.len() != sub_len) {
        return Err(length_mismatch(sub_dims, part.len()));
    }
    let n = parts.len();
    let count_leads = match order {
        ArrayOrder::RowMajor => true,
        ArrayOrder::ColumnMajor => false,
        ArrayOrder::ColumnMinor => sub_dims.len() == 1,
    };
    let mut dims = Dims::with_capacity(sub_dims.len() + 1);
    if count_leads {
        dims.push(n);
        dims.extend_from_slice(sub_dims);
        let mut flat = Vec::with_capacity(n * sub_len);
        for j in 0..sub_len {
            for part in parts {
                flat.push(part[j].clone());
            }
        }
        Ok((flat, dims))
    } else {
        dims.extend_from_slice(sub_dims);
        dims.push(n);
        Ok((parts.concat(), dims))
    }
}

macro_rules! per_kind {
    ($buffer:expr, $v:ident => $body:expr) => {
        match $buffer {
            Buffer::Numeric($v) => Buffer::Numeric($body),
            Buffer::Integer($v) => Buffer::Integer($body),
            Buffer::Character($v) => Buffer::Character($body),
            Buffer::Logical($v) => Buffer::Logical($body),
            Buffer::Raw($v) => Buffer::Raw($body),
        }
    };
}

/// [`flatten`] over a typed buffer.
pub fn flatten_buffer(
    nested: &Buffer,
    dims: &[usize],
    order: ArrayOrder,
) -> Result<(Buffer, Dims), LayoutError> {
    let permuted = permute_dims(dims, order);
    let flat = per_kind!(nested, v => flatten(v, dims, order)?.0);
    Ok((flat, permuted))
}

/// [`unflatten`] over a typed buffer.
pub fn unflatten_buffer(
    flat: &Buffer,
    dims: &[usize],
    order: ArrayOrder,
) -> Result<Buffer, LayoutError> {
    Ok(per_kind!(flat, v => unflatten(v, dims, order)?))
}

/// [`stack`] over typed buffers that all hold `kind`.
pub fn stack_buffers(
    kind: RKind,
    parts: Vec<Buffer>,
    sub_dims: &[usize],
    order: ArrayOrder,
) -> Result<(Buffer, Dims), LayoutError> {
    fn take<T>(
        kind: RKind,
        parts: Vec<Buffer>,
        extract: impl Fn(Buffer) -> Result<Vec<T>, Buffer>,
    ) -> Result<Vec<Vec<T>>, LayoutError> {
        parts
            .into_iter()
            .map(|part| {
                extract(part).map_err(|other| LayoutError::KindMismatch {
                    expected: kind,
                    found: other.kind(),
                })
            })
            .collect()
    }

    match kind {
        RKind::Numeric => {
            let parts = take(kind, parts, |b| match b {
                Buffer::Numeric(v) => Ok(v),
                other => Err(other),
            })?;
            let (flat, dims) = stack(&parts, sub_dims, order)?;
            Ok((Buffer::Numeric(flat), dims))
        }
        RKind::Integer => {
            let parts = take(kind, parts, |b| match b {
                Buffer::Integer(v) => Ok(v),
                other => Err(other),
            })?;
            let (flat, dims) = stack(&parts, sub_dims, order)?;
            Ok((Buffer::Integer(flat), dims))
        }
        RKind::Character => {
            let parts = take(kind, parts, |b| match b {
                Buffer::Character(v) => Ok(v),
                other => Err(other),
            })?;
            let (flat, dims) = stack(&parts, sub_dims, order)?;
            Ok((Buffer::Character(flat), dims))
        }
        RKind::Logical => {
            let parts = take(kind, parts, |b| match b {
                Buffer::Logical(v) => Ok(v),
                other => Err(other),
            })?;
            let (flat, dims) = stack(&parts, sub_dims, order)?;
            Ok((Buffer::Logical(flat), dims))
        }
        RKind::Raw => {
            let parts = take(kind, parts, |b| match b {
                Buffer::Raw(v) => Ok(v),
                other => Err(other),
            })?;
            let (flat, dims) = stack(&parts, sub_dims, order)?;
            Ok((Buffer::Raw(flat), dims))
        }
    }
}
