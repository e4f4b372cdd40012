/// Format milliseconds as `MM:SS`, truncating to whole seconds.
///
/// Minutes are not wrapped at 60, so an hour-long position reads `61:01`.
pub fn format_mmss(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
