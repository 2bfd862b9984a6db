//! Speckle removal by connected-component size.

use std::collections::VecDeque;

use tracing::debug;

use crate::Raster;

const NEIGHBOURS_8: [(isize, isize); 8] =
    [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];

/// Return a copy of `raster` in which every 8-connected hazard component
/// with fewer than `min_pixels` cells is set to zero.  Surviving cells keep
/// their original values.  `raster` itself is untouched.
pub fn filter_components(raster: &Raster, min_pixels: usize) -> Raster {
    let (width, height) = (raster.width(), raster.height());
    let mut out = raster.clone();
    let mut seen = vec![false; width * height];
    let mut queue = VecDeque::new();
    let mut component = Vec::new();
    let (mut kept, mut removed) = (0usize, 0usize);

    for start in 0..width * height {
        let (col, row) = (start % width, start / width);
        if seen[start] || !raster.is_hazard(col, row) {
            continue;
        }

        seen[start] = true;
        queue.push_back((col, row));
        component.clear();

        while let Some((c, r)) = queue.pop_front() {
            component.push((c, r));
            for (dc, dr) in NEIGHBOURS_8 {
                let (Some(nc), Some(nr)) = (c.checked_add_signed(dc), r.checked_add_signed(dr)) else {
                    continue;
                };
                if raster.is_hazard(nc, nr) && !seen[nr * width + nc] {
                    seen[nr * width + nc] = true;
                    queue.push_back((nc, nr));
                }
            }
        }

        if component.len() < min_pixels {
            for &(c, r) in &component {
                out.set(c, r, 0.0);
            }
            removed += 1;
        } else {
            kept += 1;
        }
    }

    debug!(kept, removed, min_pixels, "hazard components filtered");
    out
}
