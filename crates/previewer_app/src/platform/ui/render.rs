use previewer_core::{AppViewModel, EntryRowView, LoadMoreView, PreviewStatus};

/// Turns the view model into terminal lines, top to bottom.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::with_capacity(view.rows.len() * 2 + 4);

    lines.push(format!("History ({})", view.rows.len()));
    if view.rows.is_empty() && !view.loading {
        lines.push("  (no submissions yet)".to_string());
    }
    for (position, row) in view.rows.iter().enumerate() {
        lines.extend(format_row(position + 1, row));
    }

    match view.load_more {
        LoadMoreView::Hidden => {}
        LoadMoreView::Enabled => lines.push("[Load More] type :more".to_string()),
        LoadMoreView::Busy => lines.push("[Loading...]".to_string()),
    }

    if let Some(failure) = &view.last_failure {
        lines.push(format!("Last error: {}", failure.user_message()));
    }
    lines.push(format!("[{}] enter a URL:", view.submit_label));
    lines
}

fn format_row(position: usize, row: &EntryRowView) -> Vec<String> {
    let mut lines = vec![format!("{position:>3}. {}", row.url)];
    if let Some(image_url) = &row.image_url {
        lines.push(format!("     image: {image_url}"));
    }
    match row.status {
        Some(PreviewStatus::Pending) => lines.push("     (preview pending)".to_string()),
        Some(PreviewStatus::Failed) => lines.push("     (no preview found)".to_string()),
        Some(PreviewStatus::Success) | None => {}
    }
    lines
}
