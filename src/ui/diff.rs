//! Unified line diff with line numbers

use crossterm::style::Stylize;
use similar::{ChangeTag, TextDiff};

use crate::ui::theme;

/// Line counts of a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
}

impl DiffStats {
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

pub fn diff_stats(old: &str, new: &str) -> DiffStats {
    let diff = TextDiff::from_lines(old, new);
    diff.iter_all_changes()
        .fold(DiffStats::default(), |mut stats, change| {
            match change.tag() {
                ChangeTag::Insert => stats.added += 1,
                ChangeTag::Delete => stats.removed += 1,
                ChangeTag::Equal => {}
            }
            stats
        })
}

/// Render only the hunks around changes, `context` lines each side
pub fn render_unified_diff(
    path: &str,
    old: &str,
    new: &str,
    context: usize,
    supports_color: bool,
) -> String {
    let diff = TextDiff::from_lines(old, new);
    let width = old
        .lines()
        .count()
        .max(new.lines().count())
        .max(1)
        .to_string()
        .len();

    let mut out = String::new();
    push_line(&mut out, &format!("--- a/{}", path), LineStyle::Header, supports_color);
    push_line(&mut out, &format!("+++ b/{}", path), LineStyle::Header, supports_color);

    for group in diff.grouped_ops(context) {
        if let (Some(first), Some(last)) = (group.first(), group.last()) {
            let old_range = first.old_range().start..last.old_range().end;
            let new_range = first.new_range().start..last.new_range().end;
            let hunk = format!(
                "@@ -{},{} +{},{} @@",
                old_range.start + 1,
                old_range.len(),
                new_range.start + 1,
                new_range.len()
            );
            push_line(&mut out, &hunk, LineStyle::Hunk, supports_color);
        }

        for op in &group {
            for change in diff.iter_changes(op) {
                let (old_no, new_no, sign) = match change.tag() {
                    ChangeTag::Delete => (change.old_index().map(|i| i + 1), None, "-"),
                    ChangeTag::Insert => (None, change.new_index().map(|i| i + 1), "+"),
                    ChangeTag::Equal => (
                        change.old_index().map(|i| i + 1),
                        change.new_index().map(|i| i + 1),
                        " ",
                    ),
                };

                let old_col = old_no
                    .map(|n| format!("{:>width$}", n, width = width))
                    .unwrap_or_else(|| " ".repeat(width));
                let new_col = new_no
                    .map(|n| format!("{:>width$}", n, width = width))
                    .unwrap_or_else(|| " ".repeat(width));

                let value = change.value().trim_end_matches('\n');
                let line = format!("{old_col} {new_col} {sign} {value}");
                push_line(&mut out, &line, LineStyle::Body(change.tag()), supports_color);
            }
        }
    }

    out
}

#[derive(Debug, Clone, Copy)]
enum LineStyle {
    Header,
    Hunk,
    Body(ChangeTag),
}

fn push_line(out: &mut String, s: &str, style: LineStyle, supports_color: bool) {
    if supports_color {
        let styled = match style {
            LineStyle::Header => s.with(theme::colors::INFO),
            LineStyle::Hunk => s.with(theme::colors::DIM),
            LineStyle::Body(ChangeTag::Delete) => s.with(theme::colors::ERROR),
            LineStyle::Body(ChangeTag::Insert) => s.with(theme::colors::SUCCESS),
            LineStyle::Body(ChangeTag::Equal) => s.with(theme::colors::DIM),
        };
        out.push_str(&styled.to_string());
    } else {
        out.push_str(s);
    }
    out.push('\n');
}
