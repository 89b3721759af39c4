/// Quintic ease-out: `1 - (1 - x)^5`, input clamped to [0, 1].
///
/// Starts fast and decelerates to a standstill at `x = 1`.
pub fn ease_out_quint(x: f64) -> f64 {
    let x = x.clamp(0.0, 1.0);
    1.0 - (1.0 - x).powi(5)
}
