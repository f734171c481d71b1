//! Separable Gaussian blur

use super::raster::PixelBuffer;

/// Kernel size for a region `w` pixels wide: odd, at least 3
pub fn kernel_size(w: i64) -> usize {
    let w = w.max(0) as usize;
    ((w / 7) | 1).max(3)
}

/// Sigma derived from the kernel size when none is given
pub fn sigma_for_kernel(k: usize) -> f64 {
    0.3 * ((k as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Odd kernel size covering +/- 3 sigma
pub fn kernel_for_sigma(sigma: f64) -> usize {
    ((sigma * 6.0 + 1.0).round() as usize | 1).max(3)
}

/// Normalized 1-D Gaussian weights
pub fn gaussian_kernel(k: usize, sigma: f64) -> Vec<f64> {
    let half = (k / 2) as f64;
    let weights: Vec<f64> = (0..k)
        .map(|i| {
            let d = i as f64 - half;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / sum).collect()
}

/// Reflect-101 border: `gfedcb|abcdefgh|gfedcba`
fn reflect_101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let n = n as isize;
    let mut i = i;
    while i < 0 || i >= n {
        if i < 0 {
            i = -i;
        }
        if i >= n {
            i = 2 * n - 2 - i;
        }
    }
    i as usize
}

/// Blurs the clipped region `(x0, y0, x1, y1)` with a `k`x`k` kernel
///
/// Only pixels inside the region are read or written; the region border is
/// extended by reflection.
pub fn blur_region(buffer: &mut PixelBuffer, (x0, y0, x1, y1): (usize, usize, usize, usize), k: usize) {
    let sigma = sigma_for_kernel(k);
    blur_with(buffer, (x0, y0, x1, y1), &gaussian_kernel(k, sigma));
}

/// Whole-image Gaussian blur
pub fn blur_image(buffer: &mut PixelBuffer, sigma: f64) {
    let k = kernel_for_sigma(sigma);
    let bounds = (0, 0, buffer.width() as usize, buffer.height() as usize);
    blur_with(buffer, bounds, &gaussian_kernel(k, sigma));
}

fn blur_with(buffer: &mut PixelBuffer, (x0, y0, x1, y1): (usize, usize, usize, usize), kernel: &[f64]) {
    let w = x1.saturating_sub(x0);
    let h = y1.saturating_sub(y0);
    if w == 0 || h == 0 {
        return;
    }
    let c = buffer.channels() as usize;
    let half = (kernel.len() / 2) as isize;

    let mut src = Vec::with_capacity(w * h * c);
    for y in y0..y1 {
        for x in x0..x1 {
            src.extend(buffer.pixel_at(x, y).iter().map(|&v| f64::from(v)));
        }
    }

    let at = |x: usize, y: usize, ch: usize| (y * w + x) * c + ch;

    let mut horizontal = vec![0.0; src.len()];
    for y in 0..h {
        for x in 0..w {
            for ch in 0..c {
                let mut acc = 0.0;
                for (i, weight) in kernel.iter().enumerate() {
                    let sx = reflect_101(x as isize + i as isize - half, w);
                    acc += weight * src[at(sx, y, ch)];
                }
                horizontal[at(x, y, ch)] = acc;
            }
        }
    }

    for y in 0..h {
        for x in 0..w {
            let px = buffer.pixel_mut(x0 + x, y0 + y);
            for (ch, value) in px.iter_mut().enumerate().take(c) {
                let mut acc = 0.0;
                for (i, weight) in kernel.iter().enumerate() {
                    let sy = reflect_101(y as isize + i as isize - half, h);
                    acc += weight * horizontal[at(x, sy, ch)];
                }
                *value = acc.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}
