//! Markdown-to-HTML rendering for the rich-text clipboard path.
//!
//! Generated notes use a small Markdown subset: headings, paragraphs,
//! unordered and ordered lists, horizontal rules, and inline bold / italic /
//! code. That subset is parsed line by line here; anything else renders as a
//! plain paragraph.

#[derive(Clone, Debug, PartialEq)]
enum Block {
    Heading(u8, String),
    Paragraph(String),
    UnorderedList(Vec<String>),
    OrderedList(Vec<String>),
    HorizontalRule,
}

/// Render a Markdown note as an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut html = String::new();
    for block in parse_blocks(markdown) {
        match block {
            Block::Heading(level, text) => {
                html.push_str(&format!(
                    "<h{level}>{}</h{level}>\n",
                    render_inline(&text)
                ));
            }
            Block::Paragraph(text) => {
                html.push_str(&format!("<p>{}</p>\n", render_inline(&text)));
            }
            Block::UnorderedList(items) => {
                html.push_str("<ul>\n");
                for item in items {
                    html.push_str(&format!("<li>{}</li>\n", render_inline(&item)));
                }
                html.push_str("</ul>\n");
            }
            Block::OrderedList(items) => {
                html.push_str("<ol>\n");
                for item in items {
                    html.push_str(&format!("<li>{}</li>\n", render_inline(&item)));
                }
                html.push_str("</ol>\n");
            }
            Block::HorizontalRule => html.push_str("<hr>\n"),
        }
    }
    html
}

fn parse_blocks(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let lines: Vec<&str> = content.lines().collect();
    let mut i = 0;

    while i < lines.len() {
        let trimmed = lines[i].trim();

        if trimmed.is_empty() {
            i += 1;
            continue;
        }

        if trimmed == "---" || trimmed == "***" || trimmed == "___" {
            blocks.push(Block::HorizontalRule);
            i += 1;
            continue;
        }

        if trimmed.starts_with('#') {
            let level = trimmed.chars().take_while(|&c| c == '#').count();
            if level <= 6 && trimmed.chars().nth(level) == Some(' ') {
                let text = trimmed[level..].trim().to_string();
                blocks.push(Block::Heading(level as u8, text));
                i += 1;
                continue;
            }
        }

        if trimmed.starts_with("- ") || trimmed.starts_with("* ") {
            let mut items = Vec::new();
            while i < lines.len() {
                let l = lines[i].trim();
                if l.starts_with("- ") || l.starts_with("* ") {
                    items.push(l[2..].trim().to_string());
                    i += 1;
                } else {
                    break;
                }
            }
            blocks.push(Block::UnorderedList(items));
            continue;
        }

        if is_ordered_item(trimmed) {
            let mut items = Vec::new();
            while i < lines.len() {
                let l = lines[i].trim();
                if is_ordered_item(l) {
                    items.push(strip_ordered_marker(l));
                    i += 1;
                } else {
                    break;
                }
            }
            blocks.push(Block::OrderedList(items));
            continue;
        }

        // Paragraph: consecutive plain lines joined with spaces
        let mut paragraph = Vec::new();
        while i < lines.len() {
            let l = lines[i].trim();
            if l.is_empty()
                || l.starts_with('#')
                || l.starts_with("- ")
                || l.starts_with("* ")
                || is_ordered_item(l)
                || l == "---"
            {
                break;
            }
            paragraph.push(l);
            i += 1;
        }
        blocks.push(Block::Paragraph(paragraph.join(" ")));
    }

    blocks
}

fn is_ordered_item(line: &str) -> bool {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && line[digits..].starts_with(". ")
}

fn strip_ordered_marker(line: &str) -> String {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    line[digits + 2..].trim().to_string()
}

/// Render inline bold / italic / code with HTML escaping.
fn render_inline(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut html = String::new();
    let mut i = 0;

    while i < chars.len() {
        // Inline code `...`
        if chars[i] == '`' {
            if let Some(close) = chars[i + 1..].iter().position(|&c| c == '`') {
                let code: String = chars[i + 1..i + 1 + close].iter().collect();
                html.push_str(&format!("<code>{}</code>", escape_html(&code)));
                i += close + 2;
                continue;
            }
        }

        // Bold **...**
        if chars[i] == '*' && chars.get(i + 1) == Some(&'*') {
            if let Some(close) = find_double_star(&chars, i + 2) {
                let inner: String = chars[i + 2..close].iter().collect();
                html.push_str(&format!("<strong>{}</strong>", escape_html(&inner)));
                i = close + 2;
                continue;
            }
        }

        // Italic *...*
        if chars[i] == '*' && chars.get(i + 1).is_some_and(|&c| c != '*' && c != ' ') {
            if let Some(close) = chars[i + 1..].iter().position(|&c| c == '*') {
                let inner: String = chars[i + 1..i + 1 + close].iter().collect();
                html.push_str(&format!("<em>{}</em>", escape_html(&inner)));
                i += close + 2;
                continue;
            }
        }

        html.push_str(&escape_html(&chars[i].to_string()));
        i += 1;
    }

    html
}

fn find_double_star(chars: &[char], from: usize) -> Option<usize> {
    let mut i = from;
    while i + 1 < chars.len() {
        if chars[i] == '*' && chars[i + 1] == '*' {
            return Some(i);
        }
        i += 1;
    }
    None
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_and_paragraphs() {
        let html = markdown_to_html("## Assessment\n\nStable angina.");
        assert_eq!(html, "<h2>Assessment</h2>\n<p>Stable angina.</p>\n");
    }

    #[test]
    fn unordered_list() {
        let html = markdown_to_html("- aspirin\n- statin");
        assert_eq!(html, "<ul>\n<li>aspirin</li>\n<li>statin</li>\n</ul>\n");
    }

    #[test]
    fn ordered_list() {
        let html = markdown_to_html("1. ECG\n2. Troponin");
        assert_eq!(html, "<ol>\n<li>ECG</li>\n<li>Troponin</li>\n</ol>\n");
    }

    #[test]
    fn inline_bold_and_code() {
        let html = markdown_to_html("**BP** 120/80, `hb 140`");
        assert_eq!(
            html,
            "<p><strong>BP</strong> 120/80, <code>hb 140</code></p>\n"
        );
    }

    #[test]
    fn italic_inside_paragraph() {
        let html = markdown_to_html("patient *denies* chest pain");
        assert_eq!(html, "<p>patient <em>denies</em> chest pain</p>\n");
    }

    #[test]
    fn html_is_escaped() {
        let html = markdown_to_html("temp <38 & rising");
        assert_eq!(html, "<p>temp &lt;38 &amp; rising</p>\n");
    }

    #[test]
    fn horizontal_rule() {
        let html = markdown_to_html("before\n\n---\n\nafter");
        assert_eq!(html, "<p>before</p>\n<hr>\n<p>after</p>\n");
    }

    #[test]
    fn multiline_paragraph_joins_lines() {
        let html = markdown_to_html("first line\nsecond line");
        assert_eq!(html, "<p>first line second line</p>\n");
    }

    #[test]
    fn unclosed_markers_render_literally() {
        let html = markdown_to_html("a ** b");
        assert_eq!(html, "<p>a ** b</p>\n");
        let html = markdown_to_html("a `b");
        assert_eq!(html, "<p>a `b</p>\n");
    }

    #[test]
    fn hash_without_space_is_a_paragraph() {
        let html = markdown_to_html("#tag");
        assert_eq!(html, "<p>#tag</p>\n");
    }
}
