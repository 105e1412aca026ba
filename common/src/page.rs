pub const RESPONSE_HEADER: &str = "HTTP/1.0 200 OK\r\nContent-type: text/html\r\n\r\n";
pub const SHUTDOWN_PAGE: &str = "<h1>Shutting down</h1>";

#[derive(Debug, Clone, PartialEq)]
pub struct StatusPage {
    pub last_sample: u8,
    pub indicator: &'static str,
    pub celsius: f32,
    pub fahrenheit: f32,
    pub address: String,
}

impl StatusPage {
    pub fn to_html(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <title>Pico Web Server</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
        body {{ font-family: Arial, sans-serif; margin: 20px; }}
        h1 {{ color: #333; }}
        form {{ margin-bottom: 10px; }}
    </style>
</head>
<body>
    <h1>Raspberry Pi Pico Web Server</h1>
    <h2>Information</h2>
    <p>IP address: {address}</p>
    <h2>LED Control</h2>
    <form action="./lighton">
        <input type="submit" value="Light on" />
    </form>
    <form action="./lightoff">
        <input type="submit" value="Light off" />
    </form>
    <form action="./lightblink">
        <input type="submit" value="Light blink" />
    </form>
    <p>LED state: {state}</p>
    <h2>Fetch New Value</h2>
    <form action="./value">
        <input type="submit" value="Fetch value" />
    </form>
    <p>Fetched value: {value}</p>
    <h2>Temperature Measurement</h2>
    <p>Temperature in Celsius: {celsius:.2}</p>
    <p>Temperature in Fahrenheit: {fahrenheit:.2}</p>
    <h2>Shutdown</h2>
    <form action="./shutdown">
        <input type="submit" value="Shutdown" />
    </form>
</body>
</html>
"#,
            address = escape_html(&self.address),
            state = self.indicator,
            value = self.last_sample,
            celsius = self.celsius,
            fahrenheit = self.fahrenheit,
        )
    }
}

// The address is the only interpolated field that can carry
// network-influenced text; escape it rather than trusting resolution data.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page() -> StatusPage {
        StatusPage {
            last_sample: 13,
            indicator: "ON",
            celsius: 21.456,
            fahrenheit: 70.621,
            address: "192.168.1.50".to_string(),
        }
    }

    #[test]
    fn renders_state_value_and_address() {
        let html = page().to_html();

        assert!(html.contains("<p>IP address: 192.168.1.50</p>"));
        assert!(html.contains("<p>LED state: ON</p>"));
        assert!(html.contains("<p>Fetched value: 13</p>"));
        assert!(html.contains("form action=\"./shutdown\""));
    }

    #[test]
    fn temperatures_use_two_decimal_precision() {
        let html = page().to_html();

        assert!(html.contains("<p>Temperature in Celsius: 21.46</p>"));
        assert!(html.contains("<p>Temperature in Fahrenheit: 70.62</p>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let page = page();
        assert_eq!(page.to_html(), page.to_html());
    }

    #[test]
    fn address_markup_is_escaped() {
        let mut page = page();
        page.address = "<script>\"x\"&'y'</script>".to_string();

        let html = page.to_html();
        assert!(html.contains("&lt;script&gt;&quot;x&quot;&amp;&#39;y&#39;&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn escape_leaves_plain_addresses_alone() {
        assert_eq!(escape_html("10.0.0.2"), "10.0.0.2");
    }
}
