//! Locating a bearer token in a URL.

use url::Url;
use url::form_urlencoded;

const QUERY_PRECEDENCE: [&str; 2] = ["token", "access_token"];
const FRAGMENT_PRECEDENCE: [&str; 2] = ["access_token", "token"];

/// Finds a token in `url`.
///
/// Precedence: query `token`, query `access_token`, then the fragment parsed as
/// a query string (`access_token`, then `token`). Empty values are ignored.
pub fn extract_token(url: &Url) -> Option<String> {
    let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    if let Some(token) = first_match(&query, &QUERY_PRECEDENCE) {
        return Some(token);
    }

    let fragment = url.fragment()?;
    let fragment = fragment.trim_start_matches(['#', '?', '/']);
    let pairs: Vec<(String, String)> = form_urlencoded::parse(fragment.as_bytes())
        .into_owned()
        .collect();
    first_match(&pairs, &FRAGMENT_PRECEDENCE)
}

fn first_match(pairs: &[(String, String)], names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        pairs
            .iter()
            .find(|(key, value)| key == name && !value.is_empty())
            .map(|(_, value)| value.clone())
    })
}

/// Origin and path only: no query, no fragment.
pub fn scrub_url(url: &Url) -> String {
    let mut scrubbed = url.clone();
    scrubbed.set_query(None);
    scrubbed.set_fragment(None);
    scrubbed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_query_token_wins_over_access_token() {
        let url = parse("https://rentai.et/?access_token=A&token=T");
        assert_eq!(extract_token(&url).as_deref(), Some("T"));
    }

    #[test]
    fn test_query_access_token() {
        let url = parse("https://rentai.et/auth/callback?access_token=A");
        assert_eq!(extract_token(&url).as_deref(), Some("A"));
    }

    #[test]
    fn test_query_beats_fragment() {
        let url = parse("https://rentai.et/?access_token=Q#token=F");
        assert_eq!(extract_token(&url).as_deref(), Some("Q"));
    }

    #[test]
    fn test_fragment_prefers_access_token() {
        let url = parse("https://rentai.et/#token=T&access_token=A");
        assert_eq!(extract_token(&url).as_deref(), Some("A"));
        let url = parse("https://rentai.et/#token=T&state=xyz");
        assert_eq!(extract_token(&url).as_deref(), Some("T"));
    }

    #[test]
    fn test_percent_encoded_token_is_decoded() {
        let url = parse("https://rentai.et/?token=a%2Bb");
        assert_eq!(extract_token(&url).as_deref(), Some("a+b"));
    }

    #[test]
    fn test_no_token() {
        assert!(extract_token(&parse("https://rentai.et/?q=bole")).is_none());
        assert!(extract_token(&parse("https://rentai.et/?token=")).is_none());
        assert!(extract_token(&parse("https://rentai.et/#section")).is_none());
    }

    #[test]
    fn test_scrub_url_keeps_origin_and_path() {
        let url = parse("https://rentai.et:8443/auth/callback?token=T&x=1#access_token=A");
        assert_eq!(scrub_url(&url), "https://rentai.et:8443/auth/callback");
    }
}
