pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Piecewise-linear mapping of `value` through matching input/output stops,
/// clamped to the first and last output outside the input range.
///
/// Input stops must be non-decreasing. Mismatched lengths use the shorter of
/// the two; with no stops the result is 0.
pub fn map_range(value: f64, input: &[f64], output: &[f64]) -> f64 {
    let n = input.len().min(output.len());
    if n == 0 {
        return 0.0;
    }
    let (input, output) = (&input[..n], &output[..n]);
    if value.is_nan() || value <= input[0] {
        return output[0];
    }
    if value >= input[n - 1] {
        return output[n - 1];
    }
    // first stop strictly above value; value > input[0] so seg >= 1
    let seg = input.partition_point(|stop| *stop <= value);
    let (x0, x1) = (input[seg - 1], input[seg]);
    let (y0, y1) = (output[seg - 1], output[seg]);
    let span = x1 - x0;
    if span <= 0.0 {
        return y1;
    }
    lerp(y0, y1, (value - x0) / span)
}
