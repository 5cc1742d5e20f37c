/*!
format.rs

Terminal formatting helpers for human-readable `tz` output.

  - StyleOptions::detect() -> StyleOptions   (NO_COLOR / NO_EMOJI / COLUMNS)
  - color(role, text, &StyleOptions) -> String
  - emoji(tag, &StyleOptions) -> &'static str
  - heading(title, subtitle_opt, &StyleOptions) -> String
  - table(headers, rows, &StyleOptions) -> String

These return strings and never print. JSON output paths must not use them.
*/

use std::borrow::Cow;

/* -------------------------------------------------------------------------- */
/* Style Options                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    pub use_emoji: bool,
    pub term_width: usize,
}

impl StyleOptions {
    pub fn detect() -> Self {
        let width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .map(|w| w.clamp(40, 220))
            .unwrap_or(100);

        StyleOptions {
            use_color: std::env::var_os("NO_COLOR").is_none(),
            use_emoji: std::env::var_os("NO_EMOJI").is_none(),
            term_width: width,
        }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        StyleOptions {
            use_color: false,
            use_emoji: false,
            term_width: 100,
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Color / Emoji                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Primary,
    Accent,
    Success,
    Warning,
    Error,
    Dim,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Primary => "38;5;45",
        Role::Accent => "38;5;213",
        Role::Success => "38;5;82",
        Role::Warning => "38;5;214",
        Role::Error => "38;5;196",
        Role::Dim => "2",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

pub fn emoji(tag: &str, style: &StyleOptions) -> &'static str {
    if !style.use_emoji {
        return match tag {
            "success" => "+",
            "warn" => "!",
            _ => "",
        };
    }
    match tag {
        "success" => "✓",
        "warn" => "⚠",
        "info" => "ℹ",
        "clone" => "📦",
        _ => "",
    }
}

/* -------------------------------------------------------------------------- */
/* Heading                                                                    */
/* -------------------------------------------------------------------------- */

/// Title line, optional dim subtitle, and a rule sized to the wider of the two.
pub fn heading(
    title: impl AsRef<str>,
    subtitle: Option<impl AsRef<str>>,
    style: &StyleOptions,
) -> String {
    let title = title.as_ref();
    let sub = subtitle.as_ref().map(|s| s.as_ref());
    let width = sub
        .map(display_width)
        .unwrap_or(0)
        .max(display_width(title))
        .min(style.term_width);

    let mut out = color(Role::Primary, title, style);
    if let Some(s) = sub {
        out.push('\n');
        out.push_str(&color(Role::Dim, s, style));
    }
    out.push('\n');
    out.push_str(&color(Role::Dim, "─".repeat(width), style));
    out
}

/* -------------------------------------------------------------------------- */
/* Table Rendering                                                             */
/* -------------------------------------------------------------------------- */

/// Left-aligned columns separated by two spaces. The last column is never
/// padded; earlier columns are truncated with `…` when the row would overflow.
pub fn table(headers: &[&str], rows: &[Vec<String>], style: &StyleOptions) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let cols = headers.len();

    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(cols) {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    // Shrink leading columns first; the last column (usually a command) keeps its text.
    let total: usize = widths.iter().sum::<usize>() + (cols - 1) * 2;
    if total > style.term_width && cols > 1 {
        let mut overflow = total - style.term_width;
        for w in widths.iter_mut().take(cols - 1) {
            let shrink = w.saturating_sub(4).min(overflow);
            *w -= shrink;
            overflow -= shrink;
            if overflow == 0 {
                break;
            }
        }
    }

    let render_row = |cells: Vec<&str>, role: Option<Role>| -> String {
        let mut line = String::new();
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            let text = if i + 1 == cols {
                cell.to_string()
            } else {
                fit(cell, widths[i])
            };
            match role {
                Some(r) => line.push_str(&color(r, text, style)),
                None => line.push_str(&text),
            }
        }
        line.trim_end().to_string()
    };

    let mut lines = vec![render_row(headers.to_vec(), Some(Role::Accent))];
    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    lines.push(render_row(
        sep.iter().map(String::as_str).collect(),
        Some(Role::Dim),
    ));
    for row in rows {
        let cells = (0..cols)
            .map(|c| row.get(c).map(String::as_str).unwrap_or(""))
            .collect();
        lines.push(render_row(cells, None));
    }
    lines.join("\n")
}

fn fit(s: &str, width: usize) -> String {
    let len = display_width(s);
    if len <= width {
        return format!("{s}{}", " ".repeat(width - len));
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = strip_ansi(s).chars().take(width - 1).collect();
    out.push('…');
    out
}

/* -------------------------------------------------------------------------- */
/* ANSI / Width Utilities                                                      */
/* -------------------------------------------------------------------------- */

fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\x1b') {
        return Cow::Borrowed(s);
    }
    let mut buf = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for n in chars.by_ref() {
                if n.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        buf.push(c);
    }
    Cow::Owned(buf)
}

fn display_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                       */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_color_is_identity() {
        assert_eq!(color(Role::Error, "boom", &StyleOptions::plain()), "boom");
    }

    #[test]
    fn heading_with_rule() {
        let h = heading("Mappings", Some("/tmp/project"), &StyleOptions::plain());
        let lines: Vec<&str> = h.lines().collect();
        assert_eq!(lines[0], "Mappings");
        assert_eq!(lines[1], "/tmp/project");
        assert_eq!(lines[2].chars().count(), "/tmp/project".len());
    }

    #[test]
    fn table_alignment() {
        let t = table(
            &["VERB", "COMMAND"],
            &[
                vec!["install".into(), "npm install".into()],
                vec!["t".into(), "npm test".into()],
            ],
            &StyleOptions::plain(),
        );
        let lines: Vec<&str> = t.lines().collect();
        assert_eq!(lines[0], "VERB     COMMAND");
        assert_eq!(lines[2], "install  npm install");
        assert_eq!(lines[3], "t        npm test");
    }

    #[test]
    fn narrow_table_truncates_leading_columns() {
        let mut style = StyleOptions::plain();
        style.term_width = 20;
        let t = table(
            &["VERB", "COMMAND"],
            &[vec!["a-very-long-custom-verb-name".into(), "echo hi".into()]],
            &style,
        );
        assert!(t.contains('…'));
        assert!(t.contains("echo hi"));
    }

    #[test]
    fn strip_ansi_codes() {
        assert_eq!(strip_ansi("\x1b[31mRED\x1b[0m"), "RED");
        assert_eq!(display_width("\x1b[2mab\x1b[0m"), 2);
    }

    #[test]
    fn emoji_fallbacks() {
        let plain = StyleOptions::plain();
        assert_eq!(emoji("success", &plain), "+");
        assert_eq!(emoji("info", &plain), "");
        assert_eq!(emoji("warn", &plain), "!");
    }
}
