use crate::player::TrackSnapshot;

/// `M:SS`, minutes unpadded.
pub fn format_time(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Keep a field on one wire line.
fn one_line(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}

/// The four display lines for a snapshot, each newline-terminated.
pub fn display_lines(snap: &TrackSnapshot) -> [String; 4] {
    [
        format!("TRACK:Now Playing: {}\n", one_line(&snap.name)),
        format!("ARTIST:Artist: {}\n", one_line(&snap.artist)),
        format!("PROGRESS:{}\n", snap.progress_percent),
        format!(
            "TIME:{} / {}\n",
            format_time(snap.progress_ms),
            format_time(snap.duration_ms)
        ),
    ]
}
