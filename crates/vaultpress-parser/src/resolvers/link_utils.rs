//! Shared helpers for splitting `[[...]]` bodies and building anchors.

/// Split on the first `|`. Both sides are trimmed; an empty right side is
/// treated as absent.
///
/// # Examples
///
/// ```
/// use vaultpress_parser::resolvers::link_utils::split_pipe;
///
/// assert_eq!(split_pipe("photo.png | 300"), ("photo.png", Some("300")));
/// assert_eq!(split_pipe("Note"), ("Note", None));
/// assert_eq!(split_pipe("Note|"), ("Note", None));
/// ```
pub fn split_pipe(inner: &str) -> (&str, Option<&str>) {
    match inner.split_once('|') {
        Some((left, right)) => {
            let right = right.trim();
            (left.trim(), (!right.is_empty()).then_some(right))
        }
        None => (inner.trim(), None),
    }
}

/// Parsed body of a wiki-link: `page#anchor|display`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WikiTarget<'a> {
    /// Target note; `None` for same-document anchors (`[[#Heading]]`)
    pub page: Option<&'a str>,
    /// Heading text after `#`, trimmed
    pub anchor: Option<&'a str>,
    /// Text after `|`, trimmed and non-empty
    pub display: Option<&'a str>,
}

/// Parse the inside of `[[...]]`.
///
/// # Examples
///
/// ```
/// use vaultpress_parser::resolvers::link_utils::parse_wikilink;
///
/// let target = parse_wikilink("Some Note#Intro|see intro");
/// assert_eq!(target.page, Some("Some Note"));
/// assert_eq!(target.anchor, Some("Intro"));
/// assert_eq!(target.display, Some("see intro"));
///
/// let same_doc = parse_wikilink("#Heading Text");
/// assert_eq!(same_doc.page, None);
/// assert_eq!(same_doc.anchor, Some("Heading Text"));
/// ```
pub fn parse_wikilink(inner: &str) -> WikiTarget<'_> {
    let (target, display) = split_pipe(inner);

    let (page, anchor) = match target.split_once('#') {
        Some(("", anchor)) => (None, Some(anchor.trim())),
        Some((page, anchor)) => (Some(page.trim()), Some(anchor.trim())),
        None => (Some(target), None),
    };

    WikiTarget {
        page: page.filter(|p| !p.is_empty()),
        anchor,
        display,
    }
}

/// Convert heading text to a URL fragment.
///
/// Lowercases, drops everything except ASCII word characters, whitespace and
/// hyphens, turns whitespace runs into single hyphens, collapses repeated
/// hyphens and trims them from both ends.
///
/// # Examples
///
/// ```
/// use vaultpress_parser::resolvers::link_utils::slugify_anchor;
///
/// assert_eq!(slugify_anchor("Heading Text"), "heading-text");
/// assert_eq!(slugify_anchor("  What's new -- v2?  "), "whats-new-v2");
/// assert_eq!(slugify_anchor("snake_case stays"), "snake_case-stays");
/// ```
pub fn slugify_anchor(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                Some(c)
            } else if c.is_whitespace() || c == '-' {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Whether `s` is non-empty and made only of ASCII digits
pub fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
