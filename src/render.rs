use crate::present::{stats, DiffStats, HighlightedText, RenderRow, Side};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub trait ToHtml {
    fn to_html(&self) -> String;
}

pub trait ToText {
    fn to_text(&self) -> String;
}

/// Which column a piece of text is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Old,
    New,
}

/// Rows plus what is needed to lay them out in two columns.
#[derive(Debug, Clone)]
pub struct SideBySide<'a> {
    pub rows: &'a [RenderRow],
    pub old_title: &'a str,
    pub new_title: &'a str,
    /// Width of the left column in text output, in terminal columns.
    pub width: usize,
}

#[derive(Serialize)]
struct Report<'a> {
    rows: &'a [RenderRow],
    stats: DiffStats,
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Escapes prefix, highlight and suffix separately, then wraps the
/// highlight, so markup never lands inside an entity.
pub fn marked_html(text: &HighlightedText, column: Column) -> String {
    let class = match column {
        Column::Old => "hl-del",
        Column::New => "hl-ins",
    };
    let (before, mid, after) = text.parts();
    match mid {
        Some(mid) => format!(
            "{}<span class=\"{}\">{}</span>{}",
            escape_html(before),
            class,
            escape_html(mid),
            escape_html(after)
        ),
        None => escape_html(before),
    }
}

pub fn marked_text(text: &HighlightedText, column: Column) -> String {
    let (open, close) = match column {
        Column::Old => ("[-", "-]"),
        Column::New => ("{+", "+}"),
    };
    let (before, mid, after) = text.parts();
    match mid {
        Some(mid) => format!("{}{}{}{}{}", before, open, mid, close, after),
        None => before.to_string(),
    }
}

fn kind(row: &RenderRow) -> &'static str {
    match row {
        RenderRow::Keep { .. } => "keep",
        RenderRow::Change { .. } => "change",
        RenderRow::Delete { .. } => "del",
        RenderRow::Insert { .. } => "add",
    }
}

fn glyph(row: &RenderRow, column: Column) -> &'static str {
    match (row, column) {
        (RenderRow::Keep { .. } | RenderRow::Change { .. }, _) => " ",
        (RenderRow::Delete { .. }, Column::Old) => "−",
        (RenderRow::Insert { .. }, Column::New) => "+",
        _ => "",
    }
}

fn html_line(row: &RenderRow, side: Option<&Side>, column: Column) -> String {
    let (line, code) = match side {
        Some(s) => (s.line.to_string(), marked_html(&s.content, column)),
        None => (String::new(), String::new()),
    };
    format!(
        "<div class=\"diff-line {}\"><span class=\"ln\">{}</span><span class=\"sym\">{}</span><code>{}</code></div>",
        kind(row),
        line,
        glyph(row, column),
        code
    )
}

impl ToHtml for SideBySide<'_> {
    fn to_html(&self) -> String {
        let old_col = self
            .rows
            .iter()
            .map(|r| html_line(r, r.left(), Column::Old))
            .collect::<String>();
        let new_col = self
            .rows
            .iter()
            .map(|r| html_line(r, r.right(), Column::New))
            .collect::<String>();

        format!(
            "<div class=\"diff-grid\">\
             <div class=\"diff-col\"><div class=\"diff-col-head\">{}</div>{}</div>\
             <div class=\"diff-col\"><div class=\"diff-col-head\">{}</div>{}</div>\
             </div>",
            escape_html(self.old_title),
            old_col,
            escape_html(self.new_title),
            new_col
        )
    }
}

/// Pads or cuts `s` to exactly `width` terminal columns.
/// Wide chars count as two columns; a cut never splits a char and ends in `…`.
fn fit(s: &str, width: usize) -> String {
    let len = UnicodeWidthStr::width(s);
    if len <= width {
        return format!("{}{}", s, " ".repeat(width - len));
    }
    if width == 0 {
        return String::new();
    }

    let mut cut = String::with_capacity(width);
    let mut used = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width - 1 {
            break;
        }
        cut.push(ch);
        used += ch_width;
    }
    cut.push('…');
    used += 1;
    cut.push_str(&" ".repeat(width - used));
    cut
}

fn text_cell(row: &RenderRow, side: Option<&Side>, column: Column) -> String {
    match side {
        Some(s) => format!(
            "{:>4} {} {}",
            s.line,
            glyph(row, column),
            marked_text(&s.content, column)
        ),
        None => String::new(),
    }
}

impl ToText for SideBySide<'_> {
    fn to_text(&self) -> String {
        // 4-wide gutter, glyph and two spaces precede the content
        let left_width = self.width + 7;
        let header = format!("{} | {}", fit(self.old_title, left_width), self.new_title);
        let body = self.rows.iter().map(|r| {
            let left = text_cell(r, r.left(), Column::Old);
            let right = text_cell(r, r.right(), Column::New);
            format!("{} | {}", fit(&left, left_width), right)
                .trim_end()
                .to_string()
        });

        std::iter::once(header.trim_end().to_string())
            .chain(body)
            .collect::<Vec<String>>()
            .join("\n")
    }
}

/// Rows and their counts as a JSON document.
pub fn to_json(rows: &[RenderRow]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Report {
        rows,
        stats: stats(rows),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare;
    use proptest::prelude::*;

    fn view(rows: &[RenderRow]) -> SideBySide<'_> {
        SideBySide {
            rows,
            old_title: "Original T-SQL",
            new_title: "Snowflake SQL",
            width: 20,
        }
    }

    proptest! {
        #[test]
        fn test_escaped_has_no_markup_chars(s in "\\PC*") {
            let escaped = escape_html(&s);
            prop_assert!(!escaped.contains(['<', '>', '"', '\'']));
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"a & b < c > "d" 'e'"#),
            "a &amp; b &lt; c &gt; &quot;d&quot; &#39;e&#39;"
        );
    }

    #[test]
    fn test_marked_html_escapes_each_part() {
        let text = HighlightedText {
            text: "a<b>c".to_string(),
            highlight: Some(1..4),
        };
        assert_eq!(
            marked_html(&text, Column::Old),
            "a<span class=\"hl-del\">&lt;b&gt;</span>c"
        );
        assert_eq!(
            marked_html(&HighlightedText::plain("x&y"), Column::New),
            "x&amp;y"
        );
    }

    #[test]
    fn test_script_tag_is_escaped() {
        let rows = compare("<script>", "<script>alert(1)</script>");
        let html = view(&rows).to_html();
        let code: Vec<&str> = html
            .split("<code>")
            .skip(1)
            .map(|c| c.split("</code>").next().unwrap_or(""))
            .collect();
        assert!(!code.is_empty());
        for c in code {
            let stripped = c
                .replace("<span class=\"hl-del\">", "")
                .replace("<span class=\"hl-ins\">", "")
                .replace("</span>", "");
            assert!(!stripped.contains('<') && !stripped.contains('>'), "{}", c);
        }
    }

    #[test]
    fn test_html_layout() {
        let rows = compare("a\nb", "a\nc\nd");
        let html = view(&rows).to_html();
        assert!(html.starts_with("<div class=\"diff-grid\"><div class=\"diff-col\"><div class=\"diff-col-head\">Original T-SQL</div>"));
        assert!(html.contains(
            "<div class=\"diff-line keep\"><span class=\"ln\">1</span><span class=\"sym\"> </span><code>a</code></div>"
        ));
        assert!(html.contains(
            "<div class=\"diff-line change\"><span class=\"ln\">2</span><span class=\"sym\"> </span><code><span class=\"hl-del\">b</span></code></div>"
        ));
        assert!(html.contains(
            "<div class=\"diff-line add\"><span class=\"ln\"></span><span class=\"sym\"></span><code></code></div>"
        ));
        assert!(html.contains(
            "<div class=\"diff-line add\"><span class=\"ln\">3</span><span class=\"sym\">+</span><code><span class=\"hl-ins\">d</span></code></div>"
        ));
    }

    #[test]
    fn test_text_layout() {
        let rows = compare("keep\nold", "keep\nnew\nmore");
        let text = view(&rows).to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Original T-SQL"));
        assert!(lines[0].ends_with("| Snowflake SQL"));
        assert_eq!(lines[1], format!("{:<27} |    1   keep", "   1   keep"));
        assert_eq!(lines[2], format!("{:<27} |    2   {{+new+}}", "   2   [-old-]"));
        assert_eq!(lines[3], format!("{:<27} |    3 + {{+more+}}", ""));
    }

    #[test]
    fn test_text_truncates_long_lines() {
        let rows = compare("x".repeat(40).as_str(), "y");
        let text = view(&rows).to_text();
        let row = text.lines().nth(1).unwrap_or_default();
        let (left, _) = row.split_once(" | ").unwrap_or_default();
        assert_eq!(left.chars().count(), 27);
        assert!(left.ends_with('…'));
    }

    #[test]
    fn test_text_aligns_wide_chars() {
        let rows = compare("SELECT '日本語テキスト'\nab", "x\nab");
        let text = view(&rows).to_text();
        let columns: Vec<usize> = text
            .lines()
            .map(|l| l.split(" | ").next().map(|left| left.width()).unwrap_or_default())
            .collect();
        assert_eq!(columns, vec![27, 27, 27]);
    }

    #[test]
    fn test_fit_cuts_on_char_boundary() {
        // a wide char that would straddle the edge is dropped whole
        let cut = fit("ab日本", 4);
        assert_eq!(cut, "ab… ");
        assert_eq!(UnicodeWidthStr::width(cut.as_str()), 4);
        assert_eq!(fit("日本", 4), "日本");
        assert_eq!(fit("e\u{301}", 3), "e\u{301}  ");
    }

    #[test]
    fn test_json_report() {
        let rows = compare("a", "a\nb");
        let json: serde_json::Value = serde_json::from_str(&to_json(&rows).unwrap()).unwrap();
        assert_eq!(json["rows"][0]["kind"], "keep");
        assert_eq!(json["rows"][1]["kind"], "insert");
        assert_eq!(json["rows"][1]["new"]["line"], 2);
        assert_eq!(json["stats"]["inserted"], 1);
    }
}
