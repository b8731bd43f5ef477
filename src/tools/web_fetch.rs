// ABOUTME: WebFetchTool - fetches content from URLs. The URL is guarded by
// ABOUTME: the SSRF validator; HTML responses are reduced to plain text.

use async_trait::async_trait;
use serde::Deserialize;

use crate::tool::{ArgGuard, GuardKind, Tool, ToolResult};

/// Tool for fetching web content from URLs.
pub struct WebFetchTool {
    client: reqwest::Client,
}

const GUARDS: &[ArgGuard] = &[ArgGuard {
    field: "url",
    kind: GuardKind::Url,
}];

impl Default for WebFetchTool {
    fn default() -> Self {
        Self::new()
    }
}

impl WebFetchTool {
    /// Create a new WebFetchTool with default settings.
    ///
    /// Redirects are not followed: only the requested URL has passed
    /// validation, so a redirect target must come back through the
    /// caller and be validated on its own.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("skillet/0.1.0")
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }

    /// Create with a custom reqwest client. The client should keep
    /// redirects disabled; a followed redirect bypasses URL validation.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Truncate to at most `max` bytes, backing up to a char boundary
    /// so multibyte content never splits mid-character.
    fn truncate_content(content: String, max: usize) -> String {
        if content.len() <= max {
            return content;
        }
        let mut cut = max;
        while !content.is_char_boundary(cut) {
            cut -= 1;
        }
        format!(
            "{}...\n\n[Content truncated at {} characters, total {} characters]",
            &content[..cut],
            cut,
            content.len()
        )
    }

    /// Crude HTML-to-text: drops script/style blocks, strips tags,
    /// decodes a handful of entities, collapses whitespace.
    fn html_to_text(html: &str) -> String {
        let mut result = html.to_string();
        for (open, close) in [("<script", "</script>"), ("<style", "</style>")] {
            while let Some(start) = result.find(open) {
                match result[start..].find(close) {
                    Some(end) => result.replace_range(start..start + end + close.len(), ""),
                    None => break,
                }
            }
        }

        let mut text = String::new();
        let mut in_tag = false;
        for ch in result.chars() {
            match ch {
                '<' => in_tag = true,
                '>' => {
                    in_tag = false;
                    text.push(' ');
                }
                _ if !in_tag => text.push(ch),
                _ => {}
            }
        }

        let text = text
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let mut collapsed = String::new();
        for ch in text.chars() {
            if ch.is_whitespace() {
                if !collapsed.ends_with(' ') {
                    collapsed.push(' ');
                }
            } else {
                collapsed.push(ch);
            }
        }
        collapsed.trim().to_string()
    }
}

#[async_trait]
impl Tool for WebFetchTool {
    fn name(&self) -> &str {
        "web_fetch"
    }

    fn description(&self) -> &str {
        "Fetch content from a URL. Returns the page content as text, converting HTML to plain text."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "The URL to fetch (http or https)"
                },
                "max_length": {
                    "type": "integer",
                    "description": "Maximum content length to return (default: 50000)",
                    "default": 50000
                }
            },
            "required": ["url"]
        })
    }

    fn requires_approval(&self, _params: &serde_json::Value) -> bool {
        true
    }

    fn guards(&self) -> &[ArgGuard] {
        GUARDS
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            url: String,
            #[serde(default = "default_max_length")]
            max_length: usize,
        }

        fn default_max_length() -> usize {
            50000
        }

        let params: Params = serde_json::from_value(params)?;

        let response = match self.client.get(&params.url).send().await {
            Ok(resp) => resp,
            Err(e) => return Ok(ToolResult::error(format!("Failed to fetch URL: {}", e))),
        };

        let status = response.status();
        if status.is_redirection() {
            let location = response
                .headers()
                .get("location")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("<missing Location header>");
            return Ok(ToolResult::error(format!(
                "Redirected ({}) to {}; fetch that URL directly so it can be validated",
                status.as_u16(),
                location
            )));
        }
        if !status.is_success() {
            return Ok(ToolResult::error(format!(
                "HTTP error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_lowercase();

        let body = match response.text().await {
            Ok(text) => text,
            Err(e) => return Ok(ToolResult::error(format!("Failed to read response: {}", e))),
        };

        let content = if content_type.contains("text/html") {
            Self::html_to_text(&body)
        } else {
            body
        };

        Ok(ToolResult::text(Self::truncate_content(
            content,
            params.max_length,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text() {
        let html = "<html><body><h1>Title</h1><p>Hello <b>world</b>!</p></body></html>";
        let text = WebFetchTool::html_to_text(html);
        assert!(text.contains("Title"));
        assert!(text.contains("Hello"));
        assert!(text.contains("world"));
        assert!(!text.contains("<"));
    }

    #[test]
    fn test_html_to_text_strips_scripts() {
        let html = "<html><script>alert('xss')</script><body>Content</body></html>";
        let text = WebFetchTool::html_to_text(html);
        assert!(text.contains("Content"));
        assert!(!text.contains("alert"));
    }

    #[test]
    fn test_html_entities() {
        let html = "&lt;tag&gt; &amp; &quot;quoted&quot;";
        let text = WebFetchTool::html_to_text(html);
        assert!(text.contains("<tag>"));
        assert!(text.contains("&"));
        assert!(text.contains("\"quoted\""));
    }

    #[test]
    fn test_declares_url_guard() {
        let tool = WebFetchTool::new();
        let guards = tool.guards();
        assert_eq!(guards[0].kind, GuardKind::Url);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 10 bytes of two-byte chars; a cut at byte 5 must back up to 4.
        let out = WebFetchTool::truncate_content("ééééé".to_string(), 5);
        assert!(out.starts_with("éé..."));
        assert!(out.contains("truncated at 4 characters"));
    }

    #[test]
    fn test_truncation_leaves_short_content_alone() {
        let out = WebFetchTool::truncate_content("short".to_string(), 50000);
        assert_eq!(out, "short");
    }

    #[tokio::test]
    async fn test_redirects_are_not_followed() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;
            stream
                .write_all(
                    b"HTTP/1.1 302 Found\r\n\
                      Location: http://169.254.169.254/latest/meta-data\r\n\
                      Content-Length: 0\r\n\
                      Connection: close\r\n\r\n",
                )
                .await
                .unwrap();
        });

        let tool = WebFetchTool::new();
        let result = tool
            .execute(serde_json::json!({"url": format!("http://{}/", addr)}))
            .await
            .unwrap();
        assert!(result.is_error);
        assert!(result.content.contains("Redirected (302)"));
        assert!(result.content.contains("169.254.169.254"));
    }
}
