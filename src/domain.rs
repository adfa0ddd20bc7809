/// Decide whether `domain` is a subdomain such as
/// `blog.example.com`.
///
/// Only exactly three labels count (`<label>.<label>.<tld>`),
/// optionally behind a lowercase scheme like `http://`. The
/// first two labels may contain ASCII letters, digits, `_` and
/// `-`; the last one may not contain `-`. Bare domains
/// (`example.com`) and deeper names (`a.b.example.com`) are not
/// subdomains.
///
/// ```
/// use addsite::domain::is_subdomain;
///
/// assert!(is_subdomain("blog.example.com"));
/// assert!(!is_subdomain("example.com"));
/// ```
#[must_use]
pub fn is_subdomain(domain: &str) -> bool {
    let host = strip_scheme(domain);
    let labels: Vec<&str> = host.split('.').collect();

    match labels.as_slice() {
        [first, second, tld] => is_label(first) && is_label(second) && is_word(tld),
        _ => false,
    }
}

fn strip_scheme(domain: &str) -> &str {
    match domain.split_once("://") {
        Some((scheme, rest))
            if !scheme.is_empty() && scheme.bytes().all(|b| b.is_ascii_lowercase()) =>
        {
            rest
        }
        _ => domain,
    }
}

fn is_label(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| is_word_byte(b) || b == b'-')
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_word_byte)
}

const fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
