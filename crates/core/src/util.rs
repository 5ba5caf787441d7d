/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs how long it took, and evaluates to the value of the
/// expression.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}

/// Get the number of cells in a hex grid of the given radius. A radius-0 grid
/// is a single cell, and each ring adds 6 more cells than the last.
pub fn grid_len(radius: u16) -> usize {
    // 3r^2+3r+1
    let r = radius as usize;
    3 * r * r + 3 * r + 1
}
