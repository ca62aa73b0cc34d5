/// Format elapsed recording time as `MM:SS`.
///
/// Minutes are not wrapped into hours, so an hour reads `60:00`.
pub fn format_time(elapsed_seconds: u64) -> String {
    let minutes = elapsed_seconds / 60;
    let seconds = elapsed_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}
