//! Status message rendering (success/info/warning/danger boxes).

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::http::OutgoingResponse;

/// Options for [`get_message`]. Unset fields fall back to defaults.
#[derive(Debug, Clone, Default)]
pub struct MessageOptions {
    /// Auto-hide timeout in milliseconds. 0 keeps the message visible.
    pub timeout: u64,
    /// Template file. Defaults to the configured message template (`sub/misc`).
    pub tpl_file: Option<String>,
    /// Template block within `tpl_file`. Defaults to `message`.
    pub template: Option<String>,
    /// success|info|warning|danger. Defaults to `danger`.
    pub msg_class: Option<String>,
    /// Use `text` as HTML without escaping.
    pub safe_html: bool,
    /// Extra template variables.
    pub extra: Map<String, Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageContext<'a> {
    text: String,
    timeout: u64,
    tpl_file: &'a str,
    template: &'a str,
    msg_class: &'a str,
    safe_html: bool,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

/// Render a status message and return its HTML.
pub async fn get_message(
    res: &OutgoingResponse,
    text: &str,
    options: &MessageOptions,
) -> Result<String> {
    let tpl_file = options
        .tpl_file
        .as_deref()
        .unwrap_or(&res.app().config().views.message_template);

    let context = MessageContext {
        text: if options.safe_html {
            text.to_string()
        } else {
            escape_html(text)
        },
        timeout: options.timeout,
        tpl_file,
        template: options.template.as_deref().unwrap_or("message"),
        msg_class: options.msg_class.as_deref().unwrap_or("danger"),
        safe_html: options.safe_html,
        extra: &options.extra,
    };

    super::render(res, tpl_file, &context).await
}

pub fn escape_html(input: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}
