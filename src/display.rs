//! HTML rendering of the controller's [`View`].

use crate::app::View;
use crate::models::PromptLanguage;
use crate::upload::ACCEPTED_MIME_TYPES;
use std::fmt::Write;

const SPINNER: &str = r#"<svg class="spinner" viewBox="0 0 24 24" aria-hidden="true"><circle cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4" fill="none" opacity="0.25"></circle><path fill="currentColor" d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4z"></path></svg>"#;

pub fn escape_html(input: &str) -> String {
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

pub fn render_uploader(view: &View) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<input type="file" id="file-input" accept="{}" hidden>"#,
        ACCEPTED_MIME_TYPES.join(", ")
    );
    html.push_str(r#"<label id="drop-zone" class="drop-zone" for="file-input">"#);
    match &view.image {
        Some(image) => {
            let _ = write!(
                html,
                r#"<img src="{}" alt="Preview" class="preview">"#,
                escape_html(image.as_str())
            );
        }
        None => html.push_str(
            r#"<div class="placeholder"><p><span class="accent">Click to upload</span> or drag and drop</p><p class="hint">PNG, JPG, or WEBP</p></div>"#,
        ),
    }
    html.push_str("</label>");
    html
}

pub fn render_generate_button(view: &View) -> String {
    let disabled = if view.can_generate { "" } else { " disabled" };
    let label = if view.is_loading {
        format!("{}Generating...", SPINNER)
    } else {
        "&#10024; Generate Prompts".to_string()
    };
    format!(
        r#"<button id="generate" class="generate"{}>{}</button>"#,
        disabled, label
    )
}

pub fn render_error(view: &View) -> String {
    match &view.error {
        Some(message) => format!(
            r#"<div class="error" role="alert"><span class="label">Error:</span> {}</div>"#,
            escape_html(message)
        ),
        None => String::new(),
    }
}

fn render_card(language: PromptLanguage, content: &str, copied: bool) -> String {
    let (aria, glyph) = if copied {
        ("Copied", "&#10003;")
    } else {
        ("Copy prompt", "&#128203;")
    };
    format!(
        r#"<div class="card lang-{code}"><div class="card-head"><h3>{title}</h3><button class="copy" data-lang="{code}" aria-label="{aria}">{glyph}</button></div><p class="prompt">{content}</p></div>"#,
        code = language.code(),
        title = language.title(),
        aria = aria,
        glyph = glyph,
        content = escape_html(content),
    )
}

fn render_skeleton() -> &'static str {
    r#"<div class="card skeleton"><div class="bar title"></div><div class="bar"></div><div class="bar w5"></div><div class="bar w4"></div><div class="bar w3"></div></div>"#
}

/// Loading skeletons while generating, result cards once prompts exist,
/// nothing otherwise. Never both.
pub fn render_results(view: &View) -> String {
    if view.is_loading {
        return format!(
            r#"<div class="results">{}{}</div>"#,
            render_skeleton(),
            render_skeleton()
        );
    }

    match &view.prompts {
        Some(prompts) => {
            let cards: String = PromptLanguage::ALL
                .iter()
                .map(|&lang| render_card(lang, prompts.get(lang), view.is_copied(lang)))
                .collect();
            format!(r#"<div class="results">{}</div>"#, cards)
        }
        None => String::new(),
    }
}

pub fn render_panel(view: &View) -> String {
    format!(
        r#"<div class="box">{}<div class="actions">{}</div></div>{}{}"#,
        render_uploader(view),
        render_generate_button(view),
        render_error(view),
        render_results(view)
    )
}

pub fn render_page(view: &View) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Image-to-Video Prompt Generator</title>
<style>{style}</style>
</head>
<body>
<header>
<h1>Image-to-Video Prompt Generator</h1>
<p class="lead">Tải ảnh lên để AI tạo prompt giúp chuyển ảnh tĩnh thành video động với các chuyển động tự nhiên.</p>
</header>
<main id="panel">{panel}</main>
<footer>Powered by Google Gemini API</footer>
<script>{script}</script>
</body>
</html>"#,
        style = STYLE,
        panel = render_panel(view),
        script = SCRIPT,
    )
}

const STYLE: &str = r#"
body{margin:0;min-height:100vh;background:#111827;color:#e5e7eb;font-family:system-ui,sans-serif;display:flex;flex-direction:column;align-items:center;padding:2rem}
header,main,footer{width:100%;max-width:56rem}
header{text-align:center;margin-bottom:2rem}h1{font-size:2.5rem;color:#fff;margin:0}.lead{color:#9ca3af}
.box{background:#1f2937;border:1px solid #374151;border-radius:.75rem;padding:1.5rem}
.drop-zone{display:flex;aspect-ratio:16/9;align-items:center;justify-content:center;border:2px dashed #4b5563;border-radius:.5rem;cursor:pointer}
.drop-zone:hover{border-color:#6366f1}.preview{width:100%;height:100%;object-fit:contain}
.placeholder{text-align:center}.accent{color:#818cf8;font-weight:600}.hint{color:#6b7280;font-size:.875rem}
.actions{display:flex;justify-content:center;margin-top:1.5rem}
.generate{display:flex;gap:.5rem;align-items:center;padding:.75rem 2rem;background:#4f46e5;color:#fff;border:0;border-radius:.5rem;font-weight:600;cursor:pointer}
.generate:disabled{background:#4b5563;cursor:not-allowed}
.spinner{width:1.25rem;height:1.25rem;animation:spin 1s linear infinite}@keyframes spin{to{transform:rotate(360deg)}}
.error{margin-top:1.5rem;background:rgba(127,29,29,.5);border:1px solid #b91c1c;color:#fca5a5;padding:.75rem 1rem;border-radius:.5rem;text-align:center}
.results{display:flex;flex-wrap:wrap;gap:1.5rem;margin-top:1.5rem}
.card{flex:1;min-width:300px;background:#1f2937;border:1px solid #374151;border-radius:.5rem;padding:1rem}
.card-head{display:flex;justify-content:space-between;align-items:center}
.copy{background:#374151;border:0;border-radius:.375rem;color:#9ca3af;padding:.5rem;cursor:pointer}
.prompt{white-space:pre-wrap;font-size:.875rem;line-height:1.6}.lang-en .prompt{font-family:monospace}
.skeleton{animation:pulse 2s infinite}.bar{height:1rem;background:#374151;border-radius:.25rem;margin:.5rem 0}
.bar.title{height:1.5rem;width:33%}.w5{width:83%}.w4{width:66%}.w3{width:75%}
@keyframes pulse{50%{opacity:.5}}
footer{text-align:center;color:#6b7280;font-size:.875rem;margin-top:3rem}
"#;

const SCRIPT: &str = r#"
const panel = document.getElementById('panel');
const swap = (r) => r.text().then((html) => { panel.innerHTML = html; });
const refresh = () => fetch('/panel').then(swap);
const send = (file) => {
  if (!file) return;
  fetch('/api/image?name=' + encodeURIComponent(file.name), {
    method: 'POST',
    headers: { 'Content-Type': file.type || 'application/octet-stream' },
    body: file,
  }).then(swap);
};
document.addEventListener('change', (e) => {
  if (e.target.id === 'file-input') send(e.target.files[0]);
});
document.addEventListener('dragover', (e) => e.preventDefault());
document.addEventListener('drop', (e) => {
  if (!e.target.closest('#drop-zone')) return;
  e.preventDefault();
  send(e.dataTransfer.files[0]);
});
document.addEventListener('click', (e) => {
  const generate = e.target.closest('#generate');
  if (generate) {
    const pending = fetch('/api/generate', { method: 'POST' });
    setTimeout(refresh, 50);
    pending.then(swap);
    return;
  }
  const copy = e.target.closest('.copy');
  if (copy) {
    fetch('/api/copy/' + copy.dataset.lang, { method: 'POST' }).then(swap);
    setTimeout(refresh, 2050);
  }
});
"#;
