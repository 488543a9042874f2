//! Markdown to HTML rendering for report sections
//!
//! Supports only the markdown features the report service emits: headings,
//! unordered and ordered lists, bold and italic emphasis, inline code,
//! tables, horizontal rules, blockquotes, and the emoji call-out lines the
//! service prefixes its advice with. Line-oriented; no external parser.

/// Escape text for safe embedding in HTML.
pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Replace paired delimiters with open/close tags. Unmatched delimiters are
/// left as literal text.
fn replace_pairs(input: &str, delimiter: &str, open: &str, close: &str) -> String {
    let parts: Vec<&str> = input.split(delimiter).collect();
    let delimiters = parts.len() - 1;
    if delimiters < 2 {
        return input.to_string();
    }
    // A trailing unpaired delimiter stays literal.
    let paired = delimiters - (delimiters % 2);
    let mut out = String::with_capacity(input.len());
    for (index, part) in parts.iter().enumerate() {
        out.push_str(part);
        if index < delimiters {
            if index < paired {
                out.push_str(if index % 2 == 0 { open } else { close });
            } else {
                out.push_str(delimiter);
            }
        }
    }
    out
}

/// Inline formatting: bold, italic, inline code. Input must already be
/// HTML-escaped.
fn inline_to_html(input: &str) -> String {
    let with_code = replace_pairs(input, "`", "<code>", "</code>");
    let with_bold = replace_pairs(&with_code, "**", "<strong>", "</strong>");
    replace_pairs(&with_bold, "*", "<em>", "</em>")
}

fn parse_unordered_item(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
}

fn parse_ordered_item(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    trimmed[digits..].strip_prefix(". ")
}

fn is_horizontal_rule(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-')
}

/// Emoji prefixes the report service uses for call-out lines, with the
/// CSS class each maps to.
const CALLOUT_PREFIXES: &[(&str, &str)] = &[
    ("⚠️", "callout-warning"),
    ("✅", "callout-success"),
    ("❌", "callout-error"),
    ("💡", "callout-tip"),
];

fn parse_callout(line: &str) -> Option<(&'static str, &str)> {
    let trimmed = line.trim_start();
    CALLOUT_PREFIXES.iter().find_map(|(emoji, class)| {
        trimmed
            .strip_prefix(emoji)
            .map(|rest| (*class, rest.trim_start()))
    })
}

fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|') && trimmed.ends_with('|') && trimmed.len() > 1
}

fn is_table_separator(line: &str) -> bool {
    let trimmed = line.trim();
    is_table_row(trimmed)
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

fn table_cells(line: &str) -> Vec<String> {
    line.trim()
        .trim_matches('|')
        .split('|')
        .map(|cell| inline_to_html(&html_escape(cell.trim())))
        .collect()
}

/// Render report-section markdown to an HTML fragment.
pub fn markdown_to_html(input: &str) -> String {
    let lines: Vec<&str> = input.lines().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    // Open list element, if any: "ul" or "ol".
    let mut open_list: Option<&'static str> = None;
    let mut paragraph: Vec<String> = Vec::new();

    fn close_list(out: &mut String, open_list: &mut Option<&'static str>) {
        if let Some(tag) = open_list.take() {
            out.push_str(&format!("</{tag}>\n"));
        }
    }

    fn flush_paragraph(out: &mut String, paragraph: &mut Vec<String>) {
        if !paragraph.is_empty() {
            out.push_str(&format!("<p>{}</p>\n", paragraph.join(" ")));
            paragraph.clear();
        }
    }

    while i < lines.len() {
        let line = lines[i];

        if line.trim().is_empty() {
            close_list(&mut out, &mut open_list);
            flush_paragraph(&mut out, &mut paragraph);
            i += 1;
            continue;
        }

        if line.starts_with('#') {
            close_list(&mut out, &mut open_list);
            flush_paragraph(&mut out, &mut paragraph);
            let level = line.chars().take_while(|&c| c == '#').count().min(6);
            let text = inline_to_html(&html_escape(line[level..].trim()));
            out.push_str(&format!("<h{level}>{text}</h{level}>\n"));
            i += 1;
            continue;
        }

        if is_horizontal_rule(line) {
            close_list(&mut out, &mut open_list);
            flush_paragraph(&mut out, &mut paragraph);
            out.push_str("<hr />\n");
            i += 1;
            continue;
        }

        if let Some((class, content)) = parse_callout(line) {
            close_list(&mut out, &mut open_list);
            flush_paragraph(&mut out, &mut paragraph);
            out.push_str(&format!(
                "<p class=\"{class}\">{}</p>\n",
                inline_to_html(&html_escape(content))
            ));
            i += 1;
            continue;
        }

        // Blockquote callout: consecutive "> " lines become one aside.
        if line.starts_with('>') {
            close_list(&mut out, &mut open_list);
            flush_paragraph(&mut out, &mut paragraph);
            let mut quoted: Vec<String> = Vec::new();
            while i < lines.len() && lines[i].starts_with('>') {
                let content = lines[i]
                    .strip_prefix("> ")
                    .unwrap_or_else(|| lines[i].strip_prefix('>').unwrap_or(lines[i]));
                quoted.push(content.to_string());
                i += 1;
            }
            out.push_str("<blockquote>\n");
            out.push_str(&markdown_to_html(&quoted.join("\n")));
            out.push_str("</blockquote>\n");
            continue;
        }

        if is_table_row(line) && lines.get(i + 1).map(|l| is_table_separator(l)).unwrap_or(false) {
            close_list(&mut out, &mut open_list);
            flush_paragraph(&mut out, &mut paragraph);
            out.push_str("<table>\n<thead><tr>");
            for cell in table_cells(line) {
                out.push_str(&format!("<th>{cell}</th>"));
            }
            out.push_str("</tr></thead>\n<tbody>\n");
            i += 2;
            while i < lines.len() && is_table_row(lines[i]) {
                out.push_str("<tr>");
                for cell in table_cells(lines[i]) {
                    out.push_str(&format!("<td>{cell}</td>"));
                }
                out.push_str("</tr>\n");
                i += 1;
            }
            out.push_str("</tbody>\n</table>\n");
            continue;
        }

        if let Some(content) = parse_unordered_item(line) {
            flush_paragraph(&mut out, &mut paragraph);
            if open_list != Some("ul") {
                close_list(&mut out, &mut open_list);
                out.push_str("<ul>\n");
                open_list = Some("ul");
            }
            out.push_str(&format!("<li>{}</li>\n", inline_to_html(&html_escape(content))));
            i += 1;
            continue;
        }

        if let Some(content) = parse_ordered_item(line) {
            flush_paragraph(&mut out, &mut paragraph);
            if open_list != Some("ol") {
                close_list(&mut out, &mut open_list);
                out.push_str("<ol>\n");
                open_list = Some("ol");
            }
            out.push_str(&format!("<li>{}</li>\n", inline_to_html(&html_escape(content))));
            i += 1;
            continue;
        }

        close_list(&mut out, &mut open_list);
        paragraph.push(inline_to_html(&html_escape(line.trim())));
        i += 1;
    }

    close_list(&mut out, &mut open_list);
    flush_paragraph(&mut out, &mut paragraph);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings() {
        let html = markdown_to_html("# Executive Summary\n## Findings");
        assert!(html.contains("<h1>Executive Summary</h1>"));
        assert!(html.contains("<h2>Findings</h2>"));
    }

    #[test]
    fn test_paragraph_and_emphasis() {
        let html = markdown_to_html("The **carbon footprint** is *moderate*.");
        assert_eq!(
            html,
            "<p>The <strong>carbon footprint</strong> is <em>moderate</em>.</p>\n"
        );
    }

    #[test]
    fn test_unordered_list() {
        let html = markdown_to_html("- first\n- second\n\nafter");
        assert!(html.contains("<ul>\n<li>first</li>\n<li>second</li>\n</ul>"));
        assert!(html.contains("<p>after</p>"));
    }

    #[test]
    fn test_ordered_list() {
        let html = markdown_to_html("1. plant\n2. harvest");
        assert!(html.contains("<ol>\n<li>plant</li>\n<li>harvest</li>\n</ol>"));
    }

    #[test]
    fn test_table() {
        let md = "| Category | Value |\n| --- | --- |\n| Climate | 2.5 |";
        let html = markdown_to_html(md);
        assert!(html.contains("<th>Category</th>"));
        assert!(html.contains("<td>Climate</td>"));
        assert!(html.contains("<td>2.5</td>"));
    }

    #[test]
    fn test_blockquote_callout() {
        let html = markdown_to_html("> Data quality is limited.\n> Use with care.");
        assert!(html.starts_with("<blockquote>"));
        assert!(html.contains("Data quality is limited."));
    }

    #[test]
    fn test_html_is_escaped() {
        let html = markdown_to_html("value < 5 & <script>alert(1)</script>");
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&amp;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_unmatched_bold_left_literal() {
        let html = markdown_to_html("a ** b");
        assert!(html.contains("** b") || html.contains("a **"));
        assert!(!html.contains("<strong>"));
    }

    #[test]
    fn test_horizontal_rule() {
        let html = markdown_to_html("before\n\n---\n\nafter");
        assert!(html.contains("<hr />"));
        assert!(html.contains("<p>before</p>"));
        assert!(html.contains("<p>after</p>"));
    }

    #[test]
    fn test_emoji_callouts() {
        let html = markdown_to_html("⚠️ High fertilizer use detected.\n💡 Consider split applications.");
        assert!(html.contains("<p class=\"callout-warning\">High fertilizer use detected.</p>"));
        assert!(html.contains("<p class=\"callout-tip\">Consider split applications.</p>"));
    }

    #[test]
    fn test_inline_code() {
        let html = markdown_to_html("run `flca submit` to start");
        assert!(html.contains("<code>flca submit</code>"));
    }
}
