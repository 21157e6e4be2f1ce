/// Format seconds as zero-padded `MM:SS`.
///
/// Minutes are not wrapped into hours, so a full 60 minute phase renders
/// as `60:00`.
pub fn format_mm_ss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
