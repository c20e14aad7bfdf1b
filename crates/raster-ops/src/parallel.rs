//! Row scheduling for per-pixel passes.
//!
//! Every operation in this crate writes its output one row at a time and
//! never reads from the buffer it writes, so rows are independent. With the
//! `parallel` feature the rows are distributed over the rayon pool; without
//! it they run in order on the calling thread. Output is identical either
//! way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(y, row)` for every `stride`-sized row of `dst`.
pub(crate) fn for_each_row<F>(dst: &mut [u8], stride: usize, f: F)
where
    F: Fn(usize, &mut [u8]) + Send + Sync,
{
    if stride == 0 {
        return;
    }

    #[cfg(feature = "parallel")]
    dst.par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| f(y, row));

    #[cfg(not(feature = "parallel"))]
    dst.chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visits_every_row_once() {
        let mut dst = vec![0u8; 4 * 5];
        for_each_row(&mut dst, 4, |y, row| {
            for b in row.iter_mut() {
                *b += y as u8 + 1;
            }
        });
        for (y, row) in dst.chunks(4).enumerate() {
            assert!(row.iter().all(|&b| b == y as u8 + 1));
        }
    }

    #[test]
    fn zero_stride_is_noop() {
        let mut dst: Vec<u8> = Vec::new();
        for_each_row(&mut dst, 0, |_, _| panic!("no rows expected"));
    }
}
