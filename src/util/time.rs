/// Formats seconds as `MM:SS`. Unknown or invalid times render as `00:00`.
pub fn format_time(seconds: Option<f64>) -> String {
    let total_seconds = match seconds {
        Some(s) if s.is_finite() && s > 0.0 => s.floor() as u64,
        _ => 0,
    };
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}
