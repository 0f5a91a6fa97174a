use crate::raster::Raster;

/// Sample value histogram over the raster's bit-depth range, one bin per
/// representable value.
pub fn histogram(raster: &Raster) -> Vec<u64> {
    let mut counts = vec![0u64; raster.max_value() as usize + 1];
    let top = counts.len() - 1;
    for &v in raster.data.iter() {
        counts[(v as usize).min(top)] += 1;
    }
    counts
}

/// Classic histogram equalization over the raster's bit-depth range.
///
/// The first occupied bin maps to zero, the cumulative mapping is
/// monotone, and a constant raster is returned unchanged.
pub fn equalize(raster: &Raster) -> Raster {
    let counts = histogram(raster);
    let total = raster.data.len() as u64;

    let first = match counts.iter().position(|&c| c > 0) {
        Some(i) => i,
        None => return raster.clone(),
    };
    if counts[first] == total {
        return raster.clone();
    }

    let scale = (counts.len() - 1) as f64 / (total - counts[first]) as f64;
    let mut lut = vec![0u16; counts.len()];
    let mut acc = 0u64;
    for (value, &count) in counts.iter().enumerate().skip(first + 1) {
        acc += count;
        lut[value] = (acc as f64 * scale).round() as u16;
    }

    apply_lut(raster, &lut, raster.bit_depth)
}

/// Remap `source` samples so its histogram matches `reference`'s.
///
/// Each source value maps to the smallest reference value whose cumulative
/// frequency reaches the source quantile. The output takes the reference's
/// bit depth, so a 16-bit scene can be matched onto an 8-bit one.
pub fn match_histograms(source: &Raster, reference: &Raster) -> Raster {
    let source_cdf = normalized_cdf(&histogram(source), source.data.len() as f64);
    let reference_cdf = normalized_cdf(&histogram(reference), reference.data.len() as f64);

    let mut lut = vec![0u16; source_cdf.len()];
    let mut r = 0usize;
    for (value, &quantile) in source_cdf.iter().enumerate() {
        while r + 1 < reference_cdf.len() && reference_cdf[r] < quantile {
            r += 1;
        }
        lut[value] = r as u16;
    }

    apply_lut(source, &lut, reference.bit_depth)
}

fn normalized_cdf(counts: &[u64], total: f64) -> Vec<f64> {
    let mut cdf = Vec::with_capacity(counts.len());
    let mut acc = 0u64;
    for &count in counts {
        acc += count;
        cdf.push(acc as f64 / total);
    }
    cdf
}

fn apply_lut(raster: &Raster, lut: &[u16], bit_depth: u8) -> Raster {
    let top = lut.len() - 1;
    Raster {
        data: raster.data.mapv(|v| lut[(v as usize).min(top)]),
        bit_depth,
    }
}
