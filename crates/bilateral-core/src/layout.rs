//! Buffer layout helpers shared by every grid-shaped container
//!
//! Rasters and integral histograms are both row-major grids of fixed-size
//! cells (`channels` bytes per pixel, `bins` counters per histogram cell).
//! They are independent types; the indexing and allocation rules they share
//! live here as free functions.

use crate::error::{Error, Result};

/// Number of elements in a `width x height` grid of `stride`-sized cells.
///
/// # Errors
///
/// Returns [`Error::AllocationFailed`] if the size does not fit in `usize`.
pub fn grid_len(width: u32, height: u32, stride: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(stride as usize))
        .ok_or(Error::AllocationFailed { bytes: usize::MAX })
}

/// Offset of the first element of cell `(x, y)`, or `None` when the
/// coordinate lies outside the grid.
#[inline]
pub fn cell_index(width: u32, height: u32, stride: u32, x: u32, y: u32) -> Option<usize> {
    if x < width && y < height {
        Some((y as usize * width as usize + x as usize) * stride as usize)
    } else {
        None
    }
}

/// Offset of cell `(x, y)` without bounds checking.
///
/// The caller guarantees `x < width` and `y < height`.
#[inline]
pub fn cell_index_unchecked(width: u32, stride: u32, x: u32, y: u32) -> usize {
    (y as usize * width as usize + x as usize) * stride as usize
}

/// Allocate a zero-filled buffer of `len` elements.
///
/// Allocation failure is reported instead of aborting the process.
///
/// # Errors
///
/// Returns [`Error::AllocationFailed`] if the memory cannot be reserved.
pub fn try_zeroed_vec<T: Copy + Default>(len: usize) -> Result<Vec<T>> {
    let bytes = len.saturating_mul(std::mem::size_of::<T>());
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailed { bytes })?;
    buf.resize(len, T::default());
    Ok(buf)
}

/// Allocate a copy of `src`, reporting allocation failure.
///
/// # Errors
///
/// Returns [`Error::AllocationFailed`] if the memory cannot be reserved.
pub fn try_clone_slice<T: Copy>(src: &[T]) -> Result<Vec<T>> {
    let bytes = std::mem::size_of_val(src);
    let mut buf = Vec::new();
    buf.try_reserve_exact(src.len())
        .map_err(|_| Error::AllocationFailed { bytes })?;
    buf.extend_from_slice(src);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_index_in_range() {
        assert_eq!(cell_index(4, 3, 2, 0, 0), Some(0));
        assert_eq!(cell_index(4, 3, 2, 1, 0), Some(2));
        assert_eq!(cell_index(4, 3, 2, 0, 1), Some(8));
        assert_eq!(cell_index(4, 3, 2, 3, 2), Some(22));
    }

    #[test]
    fn test_cell_index_out_of_range() {
        assert_eq!(cell_index(4, 3, 2, 4, 0), None);
        assert_eq!(cell_index(4, 3, 2, 0, 3), None);
    }

    #[test]
    fn test_grid_len() {
        assert_eq!(grid_len(4, 3, 2).unwrap(), 24);
        assert_eq!(grid_len(0, 3, 2).unwrap(), 0);
    }

    #[test]
    fn test_try_zeroed_vec() {
        let v: Vec<u32> = try_zeroed_vec(10).unwrap();
        assert_eq!(v.len(), 10);
        assert!(v.iter().all(|&x| x == 0));
    }

    #[test]
    fn test_try_zeroed_vec_huge_fails() {
        let r: Result<Vec<u64>> = try_zeroed_vec(usize::MAX / 2);
        assert!(matches!(r, Err(Error::AllocationFailed { .. })));
    }
}
