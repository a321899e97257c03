/// d3 `schemeCategory10`.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Color used for a category that did not carry its own, keyed by declaration position.
pub fn fallback_color(position: usize) -> &'static str {
    CATEGORY10[position % CATEGORY10.len()]
}
