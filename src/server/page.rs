//! 首页渲染

/// 首页展示的数据
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    pub az: Option<&'a str>,
    pub code_hash: Option<&'a str>,
    pub text: &'a str,
    pub crystal: &'a str,
}

pub fn render(view: &PageView<'_>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>ECS Demo Frontend</title>
</head>
<body>
  <h1>Rails Frontend: Hello! from {az}</h1>
  <p>commit: {code_hash}</p>
  <h2>Node.js backend</h2>
  <pre id="nodejs">{text}</pre>
  <h2>Crystal backend</h2>
  <pre id="crystal">{crystal}</pre>
</body>
</html>
"#,
        az = escape_html(view.az.unwrap_or("unknown")),
        code_hash = escape_html(view.code_hash.unwrap_or("unknown")),
        text = escape_html(view.text),
        crystal = escape_html(view.crystal),
    )
}

/// 转义后端返回的原始文本
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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
