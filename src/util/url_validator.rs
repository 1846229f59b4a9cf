use url::Url;

/// Validates a URL before handing it to the system opener.
///
/// `open::that` shells out on some platforms, so only well-formed http(s)
/// URLs are allowed through. Returns a user-facing error string on
/// rejection.
pub fn validate_url_for_open(url_str: &str) -> Result<(), String> {
    let url = Url::parse(url_str).map_err(|_| format!("Invalid URL: {}", url_str))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("Refusing to open {} URL", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_allowed() {
        assert!(validate_url_for_open("https://example.com/page").is_ok());
    }

    #[test]
    fn test_http_allowed() {
        assert!(validate_url_for_open("http://127.0.0.1:5001/quiz?topic=x").is_ok());
    }

    #[test]
    fn test_file_scheme_rejected() {
        assert!(validate_url_for_open("file:///etc/passwd").is_err());
    }

    #[test]
    fn test_javascript_scheme_rejected() {
        assert!(validate_url_for_open("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(validate_url_for_open("not a url at all").is_err());
    }
}
