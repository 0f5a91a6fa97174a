use std::collections::HashMap;

use ndarray::Array2;

use crate::raster::Window;

/// Statistics for a single connected component of a binary mask.
#[derive(Clone, Debug)]
pub struct ComponentStats {
    /// Resolved label, matching the returned label map.
    pub label: u32,
    /// Number of pixels in the component.
    pub area: usize,
    /// Tight bounding box.
    pub bbox: Window,
    /// Pixel-space centroid as (col, row).
    pub centroid: (f64, f64),
}

struct Accumulator {
    area: usize,
    min_row: usize,
    max_row: usize,
    min_col: usize,
    max_col: usize,
    sum_row: u64,
    sum_col: u64,
}

/// Label connected components of a binary mask using two-pass labeling
/// with union-find and 4-connectivity (left and upper neighbors).
///
/// Returns the resolved label map (0 is background, component labels
/// start at 1) and per-component statistics sorted by area descending,
/// ties broken by ascending label.
pub fn label_components(mask: &Array2<bool>) -> (Array2<u32>, Vec<ComponentStats>) {
    let (h, w) = mask.dim();
    let mut labels = Array2::<u32>::zeros((h, w));
    if h == 0 || w == 0 {
        return (labels, Vec::new());
    }

    let mut next_label: u32 = 1;
    // Union-find parent array. Index 0 unused; labels start at 1.
    let mut parent: Vec<u32> = vec![0; h * w / 2 + 2];

    // Pass 1: assign provisional labels.
    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }

            let up = if row > 0 { labels[[row - 1, col]] } else { 0 };
            let left = if col > 0 { labels[[row, col - 1]] } else { 0 };

            match (up > 0, left > 0) {
                (false, false) => {
                    if next_label as usize >= parent.len() {
                        parent.resize(parent.len() * 2, 0);
                    }
                    parent[next_label as usize] = next_label;
                    labels[[row, col]] = next_label;
                    next_label += 1;
                }
                (true, false) => {
                    labels[[row, col]] = up;
                }
                (false, true) => {
                    labels[[row, col]] = left;
                }
                (true, true) => {
                    let smaller = up.min(left);
                    labels[[row, col]] = smaller;
                    if up != left {
                        union(&mut parent, up, left);
                    }
                }
            }
        }
    }

    // Flatten parent references.
    for i in 1..next_label as usize {
        parent[i] = find(&parent, i as u32);
    }

    // Pass 2: resolve the map in place and accumulate statistics.
    let mut accumulators = HashMap::<u32, Accumulator>::new();

    for row in 0..h {
        for col in 0..w {
            let lbl = labels[[row, col]];
            if lbl == 0 {
                continue;
            }
            let root = parent[lbl as usize];
            labels[[row, col]] = root;

            let entry = accumulators.entry(root).or_insert(Accumulator {
                area: 0,
                min_row: row,
                max_row: row,
                min_col: col,
                max_col: col,
                sum_row: 0,
                sum_col: 0,
            });
            entry.area += 1;
            entry.min_row = entry.min_row.min(row);
            entry.max_row = entry.max_row.max(row);
            entry.min_col = entry.min_col.min(col);
            entry.max_col = entry.max_col.max(col);
            entry.sum_row += row as u64;
            entry.sum_col += col as u64;
        }
    }

    let mut components: Vec<ComponentStats> = accumulators
        .into_iter()
        .map(|(label, acc)| ComponentStats {
            label,
            area: acc.area,
            bbox: Window::new(
                acc.min_col as i64,
                acc.min_row as i64,
                acc.max_col - acc.min_col + 1,
                acc.max_row - acc.min_row + 1,
            ),
            centroid: (
                acc.sum_col as f64 / acc.area as f64,
                acc.sum_row as f64 / acc.area as f64,
            ),
        })
        .collect();
    components.sort_unstable_by(|a, b| b.area.cmp(&a.area).then(a.label.cmp(&b.label)));
    (labels, components)
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        // Merge the larger root into the smaller to keep labels stable.
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}
