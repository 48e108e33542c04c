//! Page navigation links for GitHub search responses.
//!
//! GitHub advertises further pages through a `link` response header holding a
//! comma-separated list of `<url>; rel="reltype"` entries. The pagination
//! client follows `rel="next"` and logs `rel="last"` so a run shows how far
//! through a result set it is. Other relations are ignored.

/// Relation links parsed from a single `link` header.
///
/// # Example
///
/// ```
/// use daigest::github::pagination::PageLinks;
///
/// let links = PageLinks::parse(
///     "<https://api.github.com/search/issues?page=2>; rel=\"next\", \
///      <https://api.github.com/search/issues?page=5>; rel=\"last\"",
/// );
/// assert_eq!(links.next(), Some("https://api.github.com/search/issues?page=2"));
/// assert_eq!(links.last(), Some("https://api.github.com/search/issues?page=5"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    next: Option<String>,
    last: Option<String>,
}

impl PageLinks {
    /// Parses a `link` header value.
    ///
    /// Entries that do not look like `<url>; rel="..."` are skipped. When a
    /// relation appears more than once the first occurrence wins.
    #[must_use]
    pub fn parse(header: &str) -> Self {
        let mut links = Self::default();

        for entry in header.split(',') {
            let Some((url, relations)) = parse_entry(entry) else {
                continue;
            };
            for relation in relations.split_whitespace() {
                let slot = match relation {
                    "next" => &mut links.next,
                    "last" => &mut links.last,
                    _ => continue,
                };
                if slot.is_none() {
                    *slot = Some(url.to_owned());
                }
            }
        }

        links
    }

    /// URL of the next page, if any.
    #[must_use]
    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// URL of the last page, if any.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

/// Splits one `<url>; rel="a b"` entry into its URL and relation list.
fn parse_entry(entry: &str) -> Option<(&str, &str)> {
    let mut parts = entry.split(';');
    let target = parts.next()?.trim();
    let url = target.strip_prefix('<')?.strip_suffix('>')?;

    parts.find_map(|parameter| {
        let (name, value) = parameter.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("rel") {
            Some((url, value.trim().trim_matches('"')))
        } else {
            None
        }
    })
}
