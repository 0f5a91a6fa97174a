use ndarray::ArrayView2;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::consts::PARALLEL_SEARCH_THRESHOLD;
use crate::error::{Result, TerraprepError};
use crate::raster::{Raster, Shift, Window};

use super::mse::mse;

/// Parameters for the exhaustive shift search.
#[derive(Clone, Copy, Debug)]
pub struct SearchParams {
    /// Reference window the displaced target windows are compared against.
    pub window: Window,
    /// Maximum displacement searched in each direction.
    pub shift_range: u32,
}

/// One evaluated shift candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub shift: Shift,
    pub error: f64,
}

/// Outcome of a shift search.
#[derive(Clone, Debug)]
pub struct SearchReport {
    /// Winning candidate: lowest error, earliest in enumeration order on
    /// ties.
    pub best: Candidate,
    /// Candidates whose window fit inside the target.
    pub evaluated: usize,
    /// Candidates skipped because their window fell outside the target.
    pub skipped: usize,
    /// Strictly improving candidates in discovery order; the last entry
    /// equals `best`.
    pub improvements: Vec<Candidate>,
}

/// Find the displacement of `target` relative to `reference` that
/// minimizes MSE over the comparison window.
///
/// Every shift in `[-shift_range, +shift_range]` on both axes is tried,
/// `dx` in the outer loop and `dy` in the inner, both ascending. Large
/// searches are evaluated in parallel, then reduced in enumeration order,
/// so the result is identical to the sequential search.
pub fn find_best_shift(
    reference: &Raster,
    target: &Raster,
    params: &SearchParams,
) -> Result<SearchReport> {
    let reference_patch = reference.view(&params.window)?;
    let shifts = candidate_shifts(params.shift_range);
    let total = shifts.len();

    let work = total * params.window.width * params.window.height;
    if work < PARALLEL_SEARCH_THRESHOLD {
        return find_best_shift_with_progress(reference, target, params, |_, _, _| {});
    }

    let outcomes: Vec<(Shift, Option<f64>)> = shifts
        .par_iter()
        .map(|&shift| {
            Ok((
                shift,
                evaluate_candidate(&reference_patch, target, &params.window, shift)?,
            ))
        })
        .collect::<Result<_>>()?;

    let report = fold_candidates(
        outcomes.into_iter().map(Ok),
        params.shift_range,
        total,
        |_, _, _| {},
    )?;
    log_report(&report);
    Ok(report)
}

/// Sequential variant of [`find_best_shift`] that reports progress.
///
/// `on_candidate(done, total, improved)` runs after every candidate;
/// `improved` carries the new best when this candidate lowered the error.
pub fn find_best_shift_with_progress(
    reference: &Raster,
    target: &Raster,
    params: &SearchParams,
    on_candidate: impl FnMut(usize, usize, Option<&Candidate>),
) -> Result<SearchReport> {
    let reference_patch = reference.view(&params.window)?;
    let shifts = candidate_shifts(params.shift_range);
    let total = shifts.len();

    let report = fold_candidates(
        shifts.iter().map(|&shift| {
            Ok((
                shift,
                evaluate_candidate(&reference_patch, target, &params.window, shift)?,
            ))
        }),
        params.shift_range,
        total,
        on_candidate,
    )?;
    log_report(&report);
    Ok(report)
}

/// All candidate shifts in fixed enumeration order: `dx` outer, `dy`
/// inner, both ascending.
fn candidate_shifts(shift_range: u32) -> Vec<Shift> {
    let r = shift_range as i64;
    let side = (2 * r + 1) as usize;
    let mut shifts = Vec::with_capacity(side * side);
    for dx in -r..=r {
        for dy in -r..=r {
            shifts.push(Shift::new(dx, dy));
        }
    }
    shifts
}

/// MSE of the target window displaced by `shift` against the reference
/// patch, or `None` when the displaced window does not fit in the target.
fn evaluate_candidate(
    reference_patch: &ArrayView2<u16>,
    target: &Raster,
    window: &Window,
    shift: Shift,
) -> Result<Option<f64>> {
    let candidate_window = window.offset(shift);
    match target.view(&candidate_window) {
        Ok(patch) => Ok(Some(mse(reference_patch, &patch)?)),
        Err(TerraprepError::WindowOutOfBounds { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Reduce candidate outcomes in enumeration order.
///
/// Only a strictly lower error replaces the running best, so an equal
/// error keeps the earlier shift.
fn fold_candidates<I>(
    candidates: I,
    shift_range: u32,
    total: usize,
    mut on_candidate: impl FnMut(usize, usize, Option<&Candidate>),
) -> Result<SearchReport>
where
    I: IntoIterator<Item = Result<(Shift, Option<f64>)>>,
{
    let mut best: Option<Candidate> = None;
    let mut improvements = Vec::new();
    let mut evaluated = 0usize;
    let mut skipped = 0usize;

    for (index, item) in candidates.into_iter().enumerate() {
        let (shift, outcome) = item?;
        let mut new_best = None;
        match outcome {
            Some(error) => {
                evaluated += 1;
                if best.map_or(true, |b| error < b.error) {
                    let candidate = Candidate { shift, error };
                    debug!(dx = shift.dx, dy = shift.dy, error, "Better shift found");
                    best = Some(candidate);
                    improvements.push(candidate);
                    new_best = Some(candidate);
                }
            }
            None => skipped += 1,
        }
        on_candidate(index + 1, total, new_best.as_ref());
    }

    match best {
        Some(best) => Ok(SearchReport {
            best,
            evaluated,
            skipped,
            improvements,
        }),
        None => Err(TerraprepError::NoValidCandidate {
            shift_range,
            skipped,
        }),
    }
}

fn log_report(report: &SearchReport) {
    info!(
        dx = report.best.shift.dx,
        dy = report.best.shift.dy,
        error = report.best.error,
        evaluated = report.evaluated,
        skipped = report.skipped,
        "Shift search complete"
    );
}
