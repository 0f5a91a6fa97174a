#[allow(dead_code)]
mod common;

use terraprep_core::align::{
    find_best_shift, find_best_shift_with_progress, mse_rasters, register, shift_raster,
    SearchParams,
};
use terraprep_core::error::TerraprepError;
use terraprep_core::raster::{Shift, Window};

use common::{constant_raster, raster16_from_fn, raster_from_fn, translated, with_block};

fn gradient(width: usize, height: usize) -> terraprep_core::raster::Raster {
    raster_from_fn(width, height, |row, col| {
        ((row * 31 + col * 17) % 251) as u16
    })
}

#[test]
fn test_mse_identical_patches_is_zero() {
    let a = gradient(16, 16);
    assert_eq!(mse_rasters(&a, &a).unwrap(), 0.0);
}

#[test]
fn test_mse_known_value() {
    let a = constant_raster(2, 2, 10);
    let b = raster_from_fn(2, 2, |row, col| if row == 0 && col == 0 { 16 } else { 10 });
    // One pixel differs by 6: MSE = 36 / 4 = 9.
    assert_eq!(mse_rasters(&a, &b).unwrap(), 9.0);
}

#[test]
fn test_mse_is_symmetric() {
    let a = gradient(12, 9);
    let b = with_block(&a, 2, 3, 4, 200);
    let ab = mse_rasters(&a, &b).unwrap();
    let ba = mse_rasters(&b, &a).unwrap();
    assert_eq!(ab, ba);
}

#[test]
fn test_mse_shape_mismatch_is_an_error() {
    let a = constant_raster(4, 4, 1);
    let b = constant_raster(5, 4, 1);
    let result = mse_rasters(&a, &b);
    assert!(matches!(
        result,
        Err(TerraprepError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_mse_extreme_16bit_values_stay_exact() {
    let a = raster16_from_fn(8, 8, |_, _| 0);
    let b = raster16_from_fn(8, 8, |_, _| u16::MAX);
    // 65535^2 = 4294836225, exactly representable in f64.
    assert_eq!(mse_rasters(&a, &b).unwrap(), 4_294_836_225.0);
}

#[test]
fn test_shift_zero_is_identity() {
    let a = gradient(10, 7);
    assert_eq!(shift_raster(&a, Shift::new(0, 0)), a);
}

#[test]
fn test_shift_matches_direct_translation() {
    let a = gradient(12, 10);
    for &(dx, dy) in &[(3, 2), (-2, 4), (5, -3), (-1, -1)] {
        let shifted = shift_raster(&a, Shift::new(dx, dy));
        assert_eq!(
            shifted,
            translated(&a, dx, dy),
            "shift ({dx}, {dy}) disagrees with direct translation"
        );
    }
}

#[test]
fn test_shift_past_edges_discards_everything() {
    let a = gradient(6, 6);
    let shifted = shift_raster(&a, Shift::new(6, 0));
    assert!(shifted.data.iter().all(|&v| v == 0));
    let shifted = shift_raster(&a, Shift::new(0, -6));
    assert!(shifted.data.iter().all(|&v| v == 0));
}

#[test]
fn test_register_undoes_a_known_displacement() {
    let reference = gradient(30, 30);
    let target = translated(&reference, 3, 2);

    let aligned = register(&target, Shift::new(3, 2));

    // Rows pushed past the bottom and columns past the right are lost,
    // the rest must match exactly.
    for row in 0..28 {
        for col in 0..27 {
            assert_eq!(
                aligned.data[[row, col]],
                reference.data[[row, col]],
                "mismatch at ({row}, {col})"
            );
        }
    }
}

#[test]
fn test_search_identical_rasters_returns_zero_shift() {
    let reference = gradient(30, 30);
    let params = SearchParams {
        window: Window::square(10, 10, 8),
        shift_range: 4,
    };
    let report = find_best_shift(&reference, &reference, &params).unwrap();
    assert_eq!(report.best.shift, Shift::new(0, 0));
    assert_eq!(report.best.error, 0.0);
}

#[test]
fn test_search_recovers_known_translation() {
    let reference = gradient(40, 40);
    let target = translated(&reference, 3, 2);
    let params = SearchParams {
        window: Window::square(12, 12, 10),
        shift_range: 5,
    };

    let report = find_best_shift(&reference, &target, &params).unwrap();
    assert_eq!(
        report.best.shift,
        Shift::new(3, 2),
        "search reports the displacement of the target relative to the reference"
    );
    assert_eq!(report.best.error, 0.0);

    // Applying the negated shift registers the target onto the reference.
    let aligned = register(&target, report.best.shift);
    for row in 0..38 {
        for col in 0..37 {
            assert_eq!(aligned.data[[row, col]], reference.data[[row, col]]);
        }
    }
}

#[test]
fn test_search_counts_every_candidate() {
    let reference = gradient(30, 30);
    let params = SearchParams {
        window: Window::square(10, 10, 8),
        shift_range: 3,
    };
    let report = find_best_shift(&reference, &reference, &params).unwrap();
    // 7 * 7 candidates, window stays inside at every shift.
    assert_eq!(report.evaluated + report.skipped, 49);
    assert_eq!(report.skipped, 0);
}

#[test]
fn test_search_ties_keep_the_first_enumerated_shift() {
    // A constant raster scores 0 for every candidate, so the winner pins
    // the enumeration order: dx outer, dy inner, both ascending.
    let flat = constant_raster(20, 20, 77);
    let params = SearchParams {
        window: Window::square(8, 8, 4),
        shift_range: 2,
    };
    let report = find_best_shift(&flat, &flat, &params).unwrap();
    assert_eq!(report.best.shift, Shift::new(-2, -2));
    assert_eq!(report.best.error, 0.0);
    assert_eq!(report.improvements.len(), 1);
}

#[test]
fn test_search_improvements_strictly_decrease() {
    let reference = gradient(40, 40);
    let target = translated(&reference, -2, 3);
    let params = SearchParams {
        window: Window::square(12, 12, 10),
        shift_range: 4,
    };
    let report = find_best_shift(&reference, &target, &params).unwrap();

    assert!(!report.improvements.is_empty());
    for pair in report.improvements.windows(2) {
        assert!(
            pair[1].error < pair[0].error,
            "improvements must strictly decrease: {} then {}",
            pair[0].error,
            pair[1].error
        );
    }
    let last = report.improvements.last().unwrap();
    assert_eq!(last.shift, report.best.shift);
    assert_eq!(last.error, report.best.error);
}

#[test]
fn test_search_full_frame_window_leaves_one_candidate() {
    // With the window covering the whole frame, every nonzero shift falls
    // outside the target and only (0, 0) survives.
    let reference = constant_raster(10, 10, 5);
    let target = with_block(&reference, 3, 3, 3, 200);
    let params = SearchParams {
        window: Window::square(0, 0, 10),
        shift_range: 2,
    };

    let report = find_best_shift(&reference, &target, &params).unwrap();
    assert_eq!(report.best.shift, Shift::new(0, 0));
    assert_eq!(report.evaluated, 1);
    assert_eq!(report.skipped, 24);
    // 9 pixels differ by 195: MSE = 9 * 195^2 / 100.
    assert_eq!(report.best.error, 3422.25);
    assert_eq!(
        report.best.error,
        mse_rasters(&reference, &target).unwrap()
    );
}

#[test]
fn test_search_range_zero_evaluates_only_the_identity() {
    let reference = gradient(20, 20);
    let target = translated(&reference, 1, 0);
    let params = SearchParams {
        window: Window::square(5, 5, 8),
        shift_range: 0,
    };
    let report = find_best_shift(&reference, &target, &params).unwrap();
    assert_eq!(report.best.shift, Shift::new(0, 0));
    assert_eq!(report.evaluated, 1);
    assert!(report.best.error > 0.0);
}

#[test]
fn test_search_no_valid_candidate() {
    // The window fits the reference but never the smaller target.
    let reference = gradient(30, 30);
    let target = gradient(8, 8);
    let params = SearchParams {
        window: Window::square(10, 10, 12),
        shift_range: 2,
    };
    let result = find_best_shift(&reference, &target, &params);
    assert!(matches!(
        result,
        Err(TerraprepError::NoValidCandidate {
            shift_range: 2,
            skipped: 25
        })
    ));
}

#[test]
fn test_search_rejects_reference_window_out_of_bounds() {
    let reference = gradient(20, 20);
    let params = SearchParams {
        window: Window::square(15, 15, 10),
        shift_range: 1,
    };
    let result = find_best_shift(&reference, &reference, &params);
    assert!(matches!(
        result,
        Err(TerraprepError::WindowOutOfBounds { .. })
    ));
}

#[test]
fn test_search_rejects_zero_window() {
    let reference = gradient(20, 20);
    let params = SearchParams {
        window: Window::square(5, 5, 0),
        shift_range: 1,
    };
    let result = find_best_shift(&reference, &reference, &params);
    assert!(matches!(
        result,
        Err(TerraprepError::InvalidParameter(_))
    ));
}

#[test]
fn test_progress_callback_sees_every_candidate() {
    let reference = gradient(30, 30);
    let target = translated(&reference, 1, -1);
    let params = SearchParams {
        window: Window::square(10, 10, 8),
        shift_range: 2,
    };

    let mut calls = Vec::new();
    let mut improvement_count = 0;
    let report = find_best_shift_with_progress(&reference, &target, &params, |done, total, improved| {
        calls.push((done, total));
        if improved.is_some() {
            improvement_count += 1;
        }
    })
    .unwrap();

    assert_eq!(calls.len(), 25);
    assert_eq!(calls.first(), Some(&(1, 25)));
    assert_eq!(calls.last(), Some(&(25, 25)));
    assert_eq!(improvement_count, report.improvements.len());
}

#[test]
fn test_parallel_search_matches_sequential() {
    // 25 candidates * 210x210 window crosses the parallel work threshold.
    let reference = raster_from_fn(220, 220, |row, col| ((row * 31 + col * 17) % 251) as u16);
    let target = translated(&reference, -1, 2);
    let params = SearchParams {
        window: Window::square(5, 5, 210),
        shift_range: 2,
    };

    let parallel = find_best_shift(&reference, &target, &params).unwrap();
    let sequential =
        find_best_shift_with_progress(&reference, &target, &params, |_, _, _| {}).unwrap();

    assert_eq!(parallel.best.shift, sequential.best.shift);
    assert_eq!(parallel.best.error, sequential.best.error);
    assert_eq!(parallel.evaluated, sequential.evaluated);
    assert_eq!(parallel.skipped, sequential.skipped);
    assert_eq!(parallel.improvements, sequential.improvements);
}

#[test]
fn test_parallel_search_preserves_tie_break() {
    // Constant input makes every candidate a tie; the parallel reduction
    // must still pick the first enumerated shift.
    let flat = constant_raster(220, 220, 42);
    let params = SearchParams {
        window: Window::square(5, 5, 210),
        shift_range: 2,
    };
    let report = find_best_shift(&flat, &flat, &params).unwrap();
    assert_eq!(report.best.shift, Shift::new(-2, -2));
}
