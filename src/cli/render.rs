//! Plain-text output of rendered views

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::core::query::RenderedView;
use crate::models::Track;
use crate::utils::dates::seconds_to_human_readable;

/// Format one track row, marking liked tracks
pub fn track_line(track: &Track, liked: bool) -> String {
    format!(
        "{:>5} {} {:<32} {:<20} {:<28} {:>6}",
        track.id,
        if liked { "♥" } else { " " },
        truncate(&track.title, 32),
        truncate(&track.artist, 20),
        truncate(&track.album, 28),
        track.duration()
    )
}

/// Format a whole view
pub fn view_text(view: &RenderedView<'_>, likes: &BTreeSet<u64>) -> String {
    if view.is_empty() {
        return "No songs found.".to_string();
    }

    let mut out = String::new();

    match view {
        RenderedView::Flat(tracks) => {
            for track in tracks {
                let _ = writeln!(out, "{}", track_line(track, likes.contains(&track.id)));
            }
        }
        RenderedView::Grouped(groups) => {
            for group in groups {
                let _ = writeln!(out, "{} ({})", group.key, group.tracks.len());
                for track in &group.tracks {
                    let _ = writeln!(out, "{}", track_line(track, likes.contains(&track.id)));
                }
            }
        }
    }

    let total: i64 = view
        .tracks()
        .iter()
        .map(|t| i64::from(t.duration_secs))
        .sum();
    let _ = write!(
        out,
        "{} track(s), {}",
        view.track_count(),
        seconds_to_human_readable(total)
    );

    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
