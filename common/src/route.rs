#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    LightOn,
    LightOff,
    LightBlink,
    FetchValue,
    Shutdown,
}

impl Route {
    // Exact literal matching, trailing `?` included; the GET forms on the
    // status page submit with an empty query string.
    pub fn from_path_token(token: &str) -> Option<Self> {
        match token {
            "/lighton?" => Some(Self::LightOn),
            "/lightoff?" => Some(Self::LightOff),
            "/lightblink?" => Some(Self::LightBlink),
            "/value?" => Some(Self::FetchValue),
            "/shutdown?" => Some(Self::Shutdown),
            _ => None,
        }
    }
}

// Second whitespace-delimited field of the request line; requests with
// fewer than two fields degrade to a no-op route.
pub fn path_token(request: &str) -> Option<&str> {
    request.split_whitespace().nth(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_the_second_request_field() {
        assert_eq!(
            path_token("GET /lighton? HTTP/1.1\r\nHost: panel\r\n\r\n"),
            Some("/lighton?")
        );
    }

    #[test]
    fn short_requests_have_no_token() {
        assert_eq!(path_token(""), None);
        assert_eq!(path_token("GET"), None);
        assert_eq!(path_token("   \r\n"), None);
    }

    #[test]
    fn recognized_tokens_map_to_routes() {
        assert_eq!(Route::from_path_token("/lighton?"), Some(Route::LightOn));
        assert_eq!(Route::from_path_token("/lightoff?"), Some(Route::LightOff));
        assert_eq!(
            Route::from_path_token("/lightblink?"),
            Some(Route::LightBlink)
        );
        assert_eq!(Route::from_path_token("/value?"), Some(Route::FetchValue));
        assert_eq!(Route::from_path_token("/shutdown?"), Some(Route::Shutdown));
    }

    #[test]
    fn near_misses_are_rejected() {
        assert_eq!(Route::from_path_token("/lighton"), None);
        assert_eq!(Route::from_path_token("/lighton?extra"), None);
        assert_eq!(Route::from_path_token("/LIGHTON?"), None);
        assert_eq!(Route::from_path_token("/"), None);
        assert_eq!(Route::from_path_token("favicon.ico"), None);
    }
}
