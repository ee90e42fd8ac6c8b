//! Pure dimension math, testable without images.

/// Scale `source` down so its height is at most `max_height`, keeping the
/// aspect ratio. Images already short enough keep their size.
///
/// Width is truncated, not rounded, and never drops below 1.
///
/// ```text
/// (800, 400), 200 → (400, 200)
/// (100, 50),  200 → (100, 50)
/// ```
pub fn fit_to_height(source: (u32, u32), max_height: u32) -> (u32, u32) {
    let (width, height) = source;
    if height == 0 || width == 0 {
        return (width.max(1), height.max(1));
    }
    let new_height = height.min(max_height).max(1);
    let new_width = (new_height as f64 * width as f64 / height as f64) as u32;
    (new_width.max(1), new_height)
}
