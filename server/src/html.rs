use aiseek_core::SearchResult;
use regex::{Regex, RegexBuilder};

const HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>AISeek Search!</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
        body { font-family: Arial, sans-serif; margin: 0; padding: 20px; background: #f5f5f5; }
        .container { max-width: 800px; margin: 0 auto; text-align: center; }
        .logo img { max-width: 200px; height: auto; margin: 20px 0; }
        .search-box { display: flex; justify-content: center; margin: 20px 0; }
        .search-input { width: 70%; max-width: 500px; padding: 12px; font-size: 16px; border: 1px solid #dfe1e5; border-radius: 24px 0 0 24px; }
        .search-button { padding: 12px 20px; font-size: 16px; background: #ff4500; color: white; border: none; border-radius: 0 24px 24px 0; cursor: pointer; }
        .results { text-align: left; margin-top: 20px; }
        .result { background: white; padding: 15px; margin-bottom: 10px; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
        .result h3 { font-size: 18px; margin: 0 0 5px; color: #ff4500; }
        .result p { font-size: 14px; color: #333; margin: 5px 0; }
        .result a { color: #00b7ff; text-decoration: none; }
        .footer { margin-top: 20px; font-size: 12px; color: #666; }
    </style>
</head>
<body>
    <div class="container">
        <div class="logo"><img src="/static/aiseek_logo.png" alt="AISeek Search!"></div>
"#;

const FOOT: &str = r#"        <div class="footer">No ads, just answers</div>
    </div>
</body>
</html>
"#;

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Case-insensitive whole-word matcher for the expanded query terms.
pub fn term_matcher<'a, I: IntoIterator<Item = &'a str>>(terms: I) -> Option<Regex> {
    let alternation: Vec<String> = terms.into_iter().map(regex::escape).collect();
    if alternation.is_empty() {
        return None;
    }
    RegexBuilder::new(&format!(r"\b(?:{})\b", alternation.join("|")))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Escape `text`, wrapping every match of `matcher` in `<em>`.
pub fn highlight(text: &str, matcher: Option<&Regex>) -> String {
    let Some(re) = matcher else { return escape_html(text) };
    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for m in re.find_iter(text) {
        out.push_str(&escape_html(&text[last..m.start()]));
        out.push_str("<em>");
        out.push_str(&escape_html(m.as_str()));
        out.push_str("</em>");
        last = m.end();
    }
    out.push_str(&escape_html(&text[last..]));
    out
}

pub fn render_page(query: Option<&str>, results: &[SearchResult], matcher: Option<&Regex>) -> String {
    let mut page = String::from(HEAD);
    page.push_str(&format!(
        r#"        <form method="POST" class="search-box">
            <input type="text" name="query" class="search-input" placeholder="Search the AI way..." value="{}" autofocus>
            <button type="submit" class="search-button">Seek</button>
        </form>
"#,
        escape_html(query.unwrap_or_default())
    ));
    if !results.is_empty() {
        page.push_str("        <div class=\"results\">\n");
        for r in results {
            page.push_str("            <div class=\"result\">\n");
            let title = if r.is_no_results() { escape_html(&r.content) } else { highlight(&r.content, matcher) };
            page.push_str(&format!("                <h3>{title}</h3>\n"));
            if let Some(why) = &r.explanation {
                page.push_str(&format!("                <p>{}</p>\n", escape_html(why)));
            }
            if let Some(url) = r.url.as_deref().filter(|u| !u.is_empty()) {
                let url = escape_html(url);
                page.push_str(&format!("                <p><a href=\"https://{url}\" target=\"_blank\">{url}</a></p>\n"));
            }
            page.push_str("            </div>\n");
        }
        page.push_str("        </div>\n");
    }
    page.push_str(FOOT);
    page
}
