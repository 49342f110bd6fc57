//! Concurrent kernel calls on disjoint destination tiles.
//!
//! The kernel holds no shared state, so a caller may fan tiles out across a
//! thread pool as long as destinations do not overlap. Here a `MR x N` product
//! is stored tile-major (each 8×4 tile is a contiguous, column-major block of
//! 32 values) and every tile is computed from a rayon worker.

use igemm::{compute_tile_8x4_checked, TileSources, MR, NR};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

const F32_BYTES: isize = std::mem::size_of::<f32>() as isize;

#[test]
fn test_par_tiles_match_sequential_matmul() {
    let mut rng = StdRng::seed_from_u64(2024);
    let (k, n) = (48, 64 * NR);

    let a = Array2::<f32>::from_shape_fn((MR, k), |_| rng.random_range(-1.0..1.0));
    let b = Array2::<f32>::from_shape_fn((k, n), |_| rng.random_range(-1.0..1.0));
    let expected = a.dot(&b);

    let packed: Vec<f32> = (0..k).flat_map(|p| a.column(p).to_vec()).collect();
    let b_flat = b.as_slice().expect("row-major B");
    // plain matmul: step p moves one B row down
    let offsets: Vec<isize> = (0..k as isize).map(|p| p * n as isize * F32_BYTES).collect();

    let mut tiles = vec![f32::NAN; MR * n];
    tiles
        .par_chunks_mut(MR * NR)
        .enumerate()
        .for_each(|(tile, dest)| {
            let j0 = tile * NR;
            let sources = TileSources::new([
                &b_flat[j0..],
                &b_flat[j0 + 1..],
                &b_flat[j0 + 2..],
                &b_flat[j0 + 3..],
            ]);
            compute_tile_8x4_checked(k, &packed, &sources, &offsets, dest, 1, MR as isize)
                .expect("valid tile geometry");
        });

    for tile in 0..n / NR {
        for col in 0..NR {
            for row in 0..MR {
                let got = tiles[tile * MR * NR + col * MR + row];
                let want = expected[[row, tile * NR + col]];
                assert!(
                    (got - want).abs() < 1e-4,
                    "tile {tile} ({row}, {col}): {got} vs {want}"
                );
            }
        }
    }
}

#[test]
fn test_par_calls_are_deterministic() {
    let a: Vec<f32> = (0..MR * 16).map(|i| (i as f32).sin()).collect();
    let b: Vec<f32> = (0..16 * NR).map(|i| (i as f32).cos()).collect();
    let offsets: Vec<isize> = (0..16).map(|p| p * NR as isize * F32_BYTES).collect();
    let sources = TileSources::new([&b[0..], &b[1..], &b[2..], &b[3..]]);

    let mut reference = [0.0f32; MR * NR];
    compute_tile_8x4_checked(16, &a, &sources, &offsets, &mut reference, NR as isize, 1).unwrap();

    let results: Vec<[f32; MR * NR]> = (0..256)
        .into_par_iter()
        .map(|_| {
            let mut c = [f32::NAN; MR * NR];
            compute_tile_8x4_checked(16, &a, &sources, &offsets, &mut c, NR as isize, 1).unwrap();
            c
        })
        .collect();

    for c in results {
        assert_eq!(c.map(f32::to_bits), reference.map(f32::to_bits));
    }
}
