//! HTML rendering for the demonstration pages and the form-route responses.
//! Presentation only; nothing here carries request semantics.

use crate::diagnostics::FieldMeta;
use crate::dto::account::AccountCreated;

/// Demonstration page: the same email/password pair submitted through fetch,
/// XHR, and same-origin / cross-origin form POSTs targeting an iframe.
pub fn form_test_page(segment: Option<&str>) -> String {
    FORM_TEST_TEMPLATE.replace("__PREFIX__", &prefix(segment))
}

/// Variant whose form submissions navigate the whole page instead of an
/// iframe, including a debug-mode target.
pub fn form_test_navigate_page(segment: Option<&str>) -> String {
    FORM_TEST_NAVIGATE_TEMPLATE.replace("__PREFIX__", &prefix(segment))
}

pub fn success_page(ack: &AccountCreated) -> String {
    let segment_line = ack
        .path_segment
        .as_deref()
        .map(|s| format!("<p>Path segment: <code>{}</code></p>\n", escape_html(s)))
        .unwrap_or_default();

    page(
        "Account created",
        &format!(
            "<h1>{}</h1>\n<p>Email: <code>{}</code></p>\n{}",
            escape_html(&ack.message),
            escape_html(&ack.email),
            segment_line
        ),
    )
}

pub fn error_page(message: &str) -> String {
    page(
        "Submission failed",
        &format!(
            "<h1>Submission failed</h1>\n<p>{}</p>\n<p><a href=\"/form-test.html\">back to the test page</a></p>",
            escape_html(message)
        ),
    )
}

/// Diagnostics page for `debug=1` submissions. Headers arrive pre-redacted;
/// fields are reported as name and length only.
pub fn debug_page(
    content_type: &str,
    body_len: usize,
    headers: &[(String, String)],
    fields: &[FieldMeta],
) -> String {
    let mut rows = String::new();
    for (name, value) in headers {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape_html(name),
            escape_html(value)
        ));
    }

    let mut field_rows = String::new();
    for meta in fields {
        field_rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>present</td></tr>\n",
            escape_html(&meta.name),
            meta.len
        ));
    }
    if field_rows.is_empty() {
        field_rows.push_str("<tr><td colspan=\"3\">no fields parsed</td></tr>\n");
    }

    page(
        "Submission diagnostics",
        &format!(
            "<h1>Submission diagnostics</h1>\n\
             <p>Declared content type: <code>{}</code></p>\n\
             <p>Body length: {} bytes</p>\n\
             <h2>Headers (redacted)</h2>\n\
             <table border=\"1\"><tr><th>name</th><th>value</th></tr>\n{}</table>\n\
             <h2>Parsed fields</h2>\n\
             <table border=\"1\"><tr><th>name</th><th>length</th><th>state</th></tr>\n{}</table>\n",
            escape_html(content_type),
            body_len,
            rows,
            field_rows
        ),
    )
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn prefix(segment: Option<&str>) -> String {
    segment.map(|s| format!("/{s}")).unwrap_or_default()
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        body
    )
}

const FORM_TEST_TEMPLATE: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Form transport test</title></head>
<body>
<h1>Account-creation transport test</h1>
<p>Every control below submits the same two fields through a different transport.
Responses from the forms land in the iframe at the bottom.</p>

<h2>fetch (JSON) and XHR (urlencoded)</h2>
<label>Email <input id="email" type="email" value="test@example.com"></label>
<label>Password <input id="password" type="password" value="hunter2"></label>
<button onclick="viaFetch()">fetch JSON</button>
<button onclick="viaXhr()">XHR urlencoded</button>
<pre id="out"></pre>

<h2>Same-origin form POST, multipart</h2>
<form method="post" action="__PREFIX__/__forms/create-account" enctype="multipart/form-data" target="result">
  <input type="email" name="email" value="test@example.com">
  <input type="password" name="password" value="hunter2">
  <input type="hidden" name="fp-data" value="demo-fingerprint">
  <button type="submit">submit multipart</button>
</form>

<h2>Same-origin form POST, urlencoded</h2>
<form method="post" action="__PREFIX__/__forms/create-account" target="result">
  <input type="email" name="email" value="test@example.com">
  <input type="password" name="password" value="hunter2">
  <button type="submit">submit urlencoded</button>
</form>

<h2>Cross-origin form POST</h2>
<p>Point this page at a different origin than the server to exercise the
cross-origin path; the target endpoint allows any origin.</p>
<form method="post" action="/form-api/create-account" enctype="multipart/form-data" target="result">
  <input type="email" name="email" value="test@example.com">
  <input type="password" name="password" value="hunter2">
  <input type="hidden" name="fp-data" value="demo-fingerprint">
  <button type="submit">submit cross-origin</button>
</form>

<iframe name="result" title="result" style="width:100%;height:12em"></iframe>

<script>
async function viaFetch() {
  const body = JSON.stringify({
    email: document.getElementById('email').value,
    password: document.getElementById('password').value,
  });
  const res = await fetch('__PREFIX__/api/create-account', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: body,
  });
  document.getElementById('out').textContent = res.status + ' ' + await res.text();
}

function viaXhr() {
  const xhr = new XMLHttpRequest();
  xhr.open('POST', '__PREFIX__/__forms/create-account');
  xhr.setRequestHeader('Content-Type', 'application/x-www-form-urlencoded');
  xhr.onload = function () {
    document.getElementById('out').textContent = xhr.status + ' ' + xhr.responseText;
  };
  xhr.send(
    'email=' + encodeURIComponent(document.getElementById('email').value) +
    '&password=' + encodeURIComponent(document.getElementById('password').value)
  );
}
</script>
</body>
</html>
"#;

const FORM_TEST_NAVIGATE_TEMPLATE: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Form transport test (navigation)</title></head>
<body>
<h1>Account-creation transport test, full-page navigation</h1>
<p>These forms navigate the whole page, the way a plain HTML form submission
does without any script involved.</p>

<h2>Same-origin, multipart</h2>
<form method="post" action="__PREFIX__/__forms/create-account" enctype="multipart/form-data">
  <input type="email" name="email" value="test@example.com">
  <input type="password" name="password" value="hunter2">
  <input type="hidden" name="fp-data" value="demo-fingerprint">
  <button type="submit">submit multipart</button>
</form>

<h2>Same-origin, urlencoded</h2>
<form method="post" action="__PREFIX__/__forms/create-account">
  <input type="email" name="email" value="test@example.com">
  <input type="password" name="password" value="hunter2">
  <button type="submit">submit urlencoded</button>
</form>

<h2>Debug mode</h2>
<form method="post" action="__PREFIX__/__forms/create-account?debug=1" enctype="multipart/form-data">
  <input type="email" name="email" value="test@example.com">
  <input type="password" name="password" value="hunter2">
  <button type="submit">submit with diagnostics</button>
</form>

<h2>Cross-origin</h2>
<form method="post" action="/form-api/create-account">
  <input type="email" name="email" value="test@example.com">
  <input type="password" name="password" value="hunter2">
  <button type="submit">submit cross-origin</button>
</form>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_pages_prefix_their_form_targets() {
        let html = form_test_page(Some("tenant-a"));
        assert!(html.contains("action=\"/tenant-a/__forms/create-account\""));
        assert!(html.contains("'/tenant-a/api/create-account'"));
        assert!(!html.contains("__PREFIX__"));

        let html = form_test_page(None);
        assert!(html.contains("action=\"/__forms/create-account\""));
    }

    #[test]
    fn success_page_escapes_the_echoed_email() {
        let ack = AccountCreated {
            message: "Account created".to_string(),
            email: "<script>@b.com".to_string(),
            path_segment: None,
        };
        let html = success_page(&ack);
        assert!(html.contains("&lt;script&gt;@b.com"));
        assert!(!html.contains("<script>@b.com"));
    }

    #[test]
    fn debug_page_shows_lengths_not_values() {
        let meta = vec![
            FieldMeta { name: "email".to_string(), len: 7 },
            FieldMeta { name: "password".to_string(), len: 6 },
        ];
        let html = debug_page("application/x-www-form-urlencoded", 42, &[], &meta);
        assert!(html.contains("email"));
        assert!(html.contains("42 bytes"));
        assert!(html.contains("<td>7</td>"));
    }
}
