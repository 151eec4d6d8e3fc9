//! Largest connected component isolation.

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::binarize::{BACKGROUND, FOREGROUND};

/// Intermediate label for components that have been counted but not yet
/// resolved to foreground or background.
const VISITED: u8 = 64;

/// Fill the 4-connected region of pixels equal to the seed's value with
/// `fill`, in place. Returns the number of pixels filled.
pub fn flood_fill(raster: &mut GrayImage, seed: (u32, u32), fill: u8) -> usize {
    let (w, h) = raster.dimensions();
    if seed.0 >= w || seed.1 >= h {
        return 0;
    }
    let (w, h) = (w as usize, h as usize);
    let data: &mut [u8] = raster;

    let start = seed.1 as usize * w + seed.0 as usize;
    let target = data[start];
    if target == fill {
        return 0;
    }

    let mut filled = 0usize;
    let mut stack = vec![start];
    data[start] = fill;
    while let Some(idx) = stack.pop() {
        filled += 1;
        let (x, y) = (idx % w, idx / w);
        let mut visit = |n: usize| {
            if data[n] == target {
                data[n] = fill;
                stack.push(n);
            }
        };
        if x > 0 {
            visit(idx - 1);
        }
        if x + 1 < w {
            visit(idx + 1);
        }
        if y > 0 {
            visit(idx - w);
        }
        if y + 1 < h {
            visit(idx + w);
        }
    }
    filled
}

/// Outcome of [`isolate_largest_blob`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobStats {
    /// First pixel (raster order) of the surviving component.
    pub seed: (u32, u32),
    /// Pixel count of the surviving component.
    pub area: usize,
    /// Number of foreground components found in the input.
    pub components: usize,
}

/// Keep only the largest 4-connected foreground component of `mask`.
///
/// Returns `None` (and leaves the mask empty) when there is no foreground.
/// Of two equally large components the one found first in raster order wins.
pub fn isolate_largest_blob(mask: &mut GrayImage) -> Option<BlobStats> {
    let (w, h) = mask.dimensions();
    let mut best: Option<BlobStats> = None;
    let mut components = 0usize;

    for y in 0..h {
        for x in 0..w {
            if mask.get_pixel(x, y)[0] >= 128 {
                let area = flood_fill(mask, (x, y), VISITED);
                components += 1;
                if best.map_or(true, |b| area > b.area) {
                    best = Some(BlobStats {
                        seed: (x, y),
                        area,
                        components: 0,
                    });
                }
            }
        }
    }

    let mut best = best?;
    best.components = components;
    flood_fill(mask, best.seed, FOREGROUND);

    for y in 0..h {
        for x in 0..w {
            if mask.get_pixel(x, y)[0] == VISITED {
                flood_fill(mask, (x, y), BACKGROUND);
            }
        }
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn paint(mask: &mut GrayImage, x0: u32, y0: u32, w: u32, h: u32) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                mask.put_pixel(x, y, Luma([FOREGROUND]));
            }
        }
    }

    #[test]
    fn flood_fill_counts_four_connected_region() {
        let mut img = GrayImage::new(5, 5);
        paint(&mut img, 0, 0, 2, 2);
        // Diagonal neighbour only: not 4-connected.
        img.put_pixel(2, 2, Luma([FOREGROUND]));

        let n = flood_fill(&mut img, (0, 0), 7);
        assert_eq!(n, 4);
        assert_eq!(img.get_pixel(1, 1)[0], 7);
        assert_eq!(img.get_pixel(2, 2)[0], FOREGROUND);
    }

    #[test]
    fn flood_fill_with_same_value_is_noop() {
        let mut img = GrayImage::new(3, 3);
        assert_eq!(flood_fill(&mut img, (1, 1), 0), 0);
        assert_eq!(flood_fill(&mut img, (9, 9), 5), 0);
    }

    #[test]
    fn largest_component_survives_alone() {
        let mut mask = GrayImage::new(30, 30);
        paint(&mut mask, 1, 1, 3, 3); // 9 px
        paint(&mut mask, 10, 10, 15, 2); // 30 px
        paint(&mut mask, 26, 26, 2, 2); // 4 px

        let stats = isolate_largest_blob(&mut mask).expect("foreground present");
        assert_eq!(stats.area, 30);
        assert_eq!(stats.components, 3);
        assert_eq!(stats.seed, (10, 10));

        let survivors = mask.pixels().filter(|p| p[0] == FOREGROUND).count();
        assert_eq!(survivors, 30);
        assert!(mask.pixels().all(|p| p[0] == FOREGROUND || p[0] == BACKGROUND));
        assert_eq!(mask.get_pixel(2, 2)[0], BACKGROUND);
    }

    #[test]
    fn empty_mask_has_no_blob() {
        let mut mask = GrayImage::new(8, 8);
        assert!(isolate_largest_blob(&mut mask).is_none());
    }

    #[test]
    fn first_of_equal_components_wins() {
        let mut mask = GrayImage::new(20, 5);
        paint(&mut mask, 0, 0, 3, 3);
        paint(&mut mask, 10, 0, 3, 3);

        let stats = isolate_largest_blob(&mut mask).expect("foreground present");
        assert_eq!(stats.seed, (0, 0));
        assert_eq!(mask.get_pixel(11, 1)[0], BACKGROUND);
        assert_eq!(mask.get_pixel(1, 1)[0], FOREGROUND);
    }
}
