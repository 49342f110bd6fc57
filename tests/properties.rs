//! Property-based tests for the tile kernel.
//!
//! Uses proptest to check invariants that must hold for all inputs:
//! - splitting the reduction range splits the tile additively
//! - strides change where values land, never the values
//! - the result is independent of the gather geometry that produced the same B values

use igemm::{compute_tile_8x4, compute_tile_8x4_with, DenseStrided, MR, NR};
use proptest::prelude::*;

const F32_BYTES: isize = std::mem::size_of::<f32>() as isize;
const B_LEN: usize = 64;

fn small_ints(len: usize) -> impl Strategy<Value = Vec<f32>> {
    // small integers keep every partial sum exact in f32
    prop::collection::vec((-8i32..=8).prop_map(|v| v as f32), len)
}

fn run(a: &[f32], b: &[f32], tops: [usize; NR], offsets: &[isize]) -> [f32; MR * NR] {
    let b_tops = tops.map(|i| unsafe { b.as_ptr().add(i) });
    let mut c = [f32::NAN; MR * NR];
    unsafe {
        compute_tile_8x4(
            offsets.len(),
            a.as_ptr(),
            &b_tops,
            offsets.as_ptr(),
            c.as_mut_ptr(),
            NR as isize,
            1,
        );
    }
    c
}

proptest! {
    /// tile(k = m + n) == tile(prefix of m steps) + tile(suffix of n steps)
    #[test]
    fn prop_reduction_splits_additively(
        (m, n) in (0usize..12, 0usize..12),
        a in small_ints(MR * 24),
        b in small_ints(B_LEN),
        tops in prop::array::uniform4(0usize..32),
        steps in prop::collection::vec(0isize..32, 24),
    ) {
        let offsets: Vec<isize> = steps[..m + n].iter().map(|s| s * F32_BYTES).collect();

        let whole = run(&a, &b, tops, &offsets);
        let prefix = run(&a, &b, tops, &offsets[..m]);
        let suffix = run(&a[MR * m..], &b, tops, &offsets[m..]);

        for i in 0..MR * NR {
            prop_assert_eq!(whole[i], prefix[i] + suffix[i], "cell {}", i);
        }
    }

    /// Any non-overlapping layout receives the same 32 values.
    #[test]
    fn prop_strides_only_move_values(
        k in 0usize..10,
        a in small_ints(MR * 10),
        b in small_ints(B_LEN),
        (rsc, csc) in prop_oneof![
            Just((NR as isize, 1isize)),
            Just((1isize, MR as isize)),
            (NR as isize..10).prop_map(|r| (r, 1)),
            (MR as isize..12).prop_map(|c| (1, c)),
        ],
    ) {
        let offsets: Vec<isize> = (0..k as isize).map(|s| s * 5 * F32_BYTES).collect();
        let tops = [0, 3, 6, 9];
        let reference = run(&a, &b, tops, &offsets);

        let b_tops = tops.map(|i| unsafe { b.as_ptr().add(i) });
        let mut c = vec![f32::NAN; 12 * 12];
        unsafe {
            compute_tile_8x4(k, a.as_ptr(), &b_tops, offsets.as_ptr(), c.as_mut_ptr(), rsc, csc);
        }

        for row in 0..MR {
            for col in 0..NR {
                let index = row as isize * rsc + col as isize * csc;
                prop_assert_eq!(c[index as usize], reference[row * NR + col]);
            }
        }
    }

    /// A dense stride and the equivalent explicit offset table agree exactly.
    #[test]
    fn prop_dense_matches_table(
        k in 0usize..12,
        stride in 0isize..5,
        a in small_ints(MR * 12),
        b in small_ints(B_LEN),
    ) {
        let tops = [0, 1, 2, 3];
        let offsets: Vec<isize> = (0..k as isize).map(|s| s * stride * F32_BYTES).collect();
        let table = run(&a, &b, tops, &offsets);

        let b_tops = tops.map(|i| unsafe { b.as_ptr().add(i) });
        let dense = DenseStrided::from_element_stride(b_tops, stride);
        let mut c = [f32::NAN; MR * NR];
        unsafe {
            compute_tile_8x4_with(k, a.as_ptr(), &dense, c.as_mut_ptr(), NR as isize, 1);
        }

        prop_assert_eq!(c.map(f32::to_bits), table.map(f32::to_bits));
    }
}
