//! Fusion of near-duplicate line detections.
//!
//! A thick physical line produces a bundle of Hough peaks with close
//! `(rho, theta)` and nearly identical image-border crossings. Each bundle is
//! collapsed into one representative. Fused entries are tombstoned in place
//! ([`Line::TOMBSTONE`]) so indices stay stable during the nested scan;
//! nothing is ever removed from the slice.

use sudoku_grid_core::Line;

use crate::params::MergeParams;

/// Fuse duplicate detections in `lines`, in place. Returns the number of
/// fusions performed.
///
/// For every live line `current`, its two border points are computed once,
/// from its value at the start of its turn. Every other live line `pos`
/// whose `(rho, theta)` lies within the tolerances of the *current* value of
/// `current`, and whose border points are both within
/// `max_endpoint_distance` of `current`'s, is fused: `current` becomes the
/// mean of the pair and `pos` is tombstoned. Repeated fusions within one turn
/// average pairwise rather than computing a centroid.
///
/// `width`/`height` are the image bounds used for the border projection.
pub fn merge_related_lines(
    lines: &mut [Line],
    width: usize,
    height: usize,
    params: &MergeParams,
) -> usize {
    let max_theta = params.max_theta_delta_deg.to_radians();
    let max_d2 = (params.max_endpoint_distance as f64).powi(2);
    let mut merged = 0;

    for i in 0..lines.len() {
        if lines[i].is_tombstone() {
            continue;
        }
        let [c1, c2] = lines[i].border_points(width, height);

        for j in 0..lines.len() {
            if j == i || lines[j].is_tombstone() {
                continue;
            }
            let current = lines[i];
            let pos = lines[j];
            if (pos.rho - current.rho).abs() >= params.max_rho_delta
                || (pos.theta - current.theta).abs() >= max_theta
            {
                continue;
            }

            let [p1, p2] = pos.border_points(width, height);
            if (p1 - c1).norm_squared() < max_d2 && (p2 - c2).norm_squared() < max_d2 {
                lines[i] = current.averaged_with(&pos);
                lines[j] = Line::TOMBSTONE;
                merged += 1;
            }
        }
    }

    log::debug!("merged {merged} of {} line candidates", lines.len());
    merged
}

/// Live (non-tombstoned) entries, in their original order.
pub fn live_lines(lines: &[Line]) -> Vec<Line> {
    lines.iter().filter(|l| !l.is_tombstone()).copied().collect()
}
