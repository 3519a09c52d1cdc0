//! Individual legacy-URL rules.
//!
//! # Responsibilities
//! - Match one legacy URL shape against a normalized path
//! - Build the locale-prefixed replacement path
//!
//! # Design Decisions
//! - Each rule is a predicate + transform over the path component only
//!   (the query string participates only in the legacy contact rule)
//! - Language prefixes match whole segments: `/russia` is not `/ru`
//! - Rules carry stable names used as tracing fields and metric labels

/// A single legacy-URL rule: match the request, produce the new path.
pub trait RedirectRule: Send + Sync + std::fmt::Debug {
    /// Stable rule name for logs and the `gateway_redirects_total` label.
    fn name(&self) -> &'static str;

    /// Returns the target path if the request matches this rule.
    fn apply(&self, req: &RequestLine<'_>) -> Option<String>;
}

/// Borrowed view of one inbound request, scoped to one redirect decision.
///
/// `path` is already normalized (trailing slashes stripped, root preserved).
#[derive(Debug, Clone, Copy)]
pub struct RequestLine<'a> {
    pub path: &'a str,
    pub query: &'a str,
}

/// Map a legacy language code onto the current locale set.
/// `ru` and `ua` collapse onto `uk`; unknown codes do not match.
fn map_legacy_lang(lang: &str) -> Option<&'static str> {
    match lang {
        "ru" | "ua" | "uk" => Some("uk"),
        "en" => Some("en"),
        _ => None,
    }
}

/// True if `path` is exactly `prefix` or starts with `prefix` followed by a
/// segment boundary. Plain `starts_with` would make `/russia` match `/ru`.
fn has_segment_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Strip a `.html` suffix, rejecting the bare `.html` segment.
fn html_stem(segment: &str) -> Option<&str> {
    segment.strip_suffix(".html").filter(|stem| !stem.is_empty())
}

/// Legacy-language post URL: `/{lang}/{slug}.html` → `/{mapped}/{slug}`.
#[derive(Debug)]
pub struct LegacyHtmlPost;

impl RedirectRule for LegacyHtmlPost {
    fn name(&self) -> &'static str {
        "legacy_html_post"
    }

    fn apply(&self, req: &RequestLine<'_>) -> Option<String> {
        let (lang, rest) = req.path.strip_prefix('/')?.split_once('/')?;
        let mapped = map_legacy_lang(lang)?;
        if rest.contains('/') {
            return None;
        }
        let slug = html_stem(rest)?;
        Some(format!("/{mapped}/{slug}"))
    }
}

/// Root-level post URL: `/{slug}.html` → `/uk/{slug}`.
///
/// Slugs with an internal `.` are skipped so asset-like paths are not
/// misclassified, and `index` is skipped so the root mapping stays with the
/// root rules.
#[derive(Debug)]
pub struct RootHtmlPost;

impl RedirectRule for RootHtmlPost {
    fn name(&self) -> &'static str {
        "root_html_post"
    }

    fn apply(&self, req: &RequestLine<'_>) -> Option<String> {
        let segment = req.path.strip_prefix('/')?;
        if segment.contains('/') {
            return None;
        }
        let slug = html_stem(segment)?;
        if slug == "index" || slug.contains('.') {
            return None;
        }
        Some(format!("/uk/{slug}"))
    }
}

/// Legacy language prefix rewrite: `/ru/...` → `/uk/...` (also `/ua`).
/// The remainder of the path is preserved as-is.
#[derive(Debug)]
pub struct LangPrefixRewrite {
    from: &'static str,
    to: &'static str,
    name: &'static str,
}

impl LangPrefixRewrite {
    pub fn new(from: &'static str, to: &'static str, name: &'static str) -> Self {
        Self { from, to, name }
    }
}

impl RedirectRule for LangPrefixRewrite {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, req: &RequestLine<'_>) -> Option<String> {
        if !has_segment_prefix(req.path, self.from) {
            return None;
        }
        let remainder = &req.path[self.from.len()..];
        Some(format!("{}{}", self.to, remainder))
    }
}

/// Legacy category listing: `/category/{slug...}` → `/uk/blog/category/{slug...}`.
#[derive(Debug)]
pub struct CategoryListing;

impl RedirectRule for CategoryListing {
    fn name(&self) -> &'static str {
        "category_listing"
    }

    fn apply(&self, req: &RequestLine<'_>) -> Option<String> {
        let rest = req.path.strip_prefix("/category/")?;
        if rest.is_empty() {
            return None;
        }
        Some(format!("/uk/blog/category/{rest}"))
    }
}

/// Blog root: `/blog` → `/uk/blog`.
#[derive(Debug)]
pub struct BlogRoot;

impl RedirectRule for BlogRoot {
    fn name(&self) -> &'static str {
        "blog_root"
    }

    fn apply(&self, req: &RequestLine<'_>) -> Option<String> {
        (req.path == "/blog").then(|| "/uk/blog".to_string())
    }
}

/// Attachment URL: `/{postSlug}.html/{anything}` → `/uk/{postSlug}`.
/// The attachment segment is discarded.
#[derive(Debug)]
pub struct AttachmentUrl;

impl RedirectRule for AttachmentUrl {
    fn name(&self) -> &'static str {
        "attachment_url"
    }

    fn apply(&self, req: &RequestLine<'_>) -> Option<String> {
        let (first, rest) = req.path.strip_prefix('/')?.split_once('/')?;
        if rest.is_empty() {
            return None;
        }
        let slug = html_stem(first)?;
        Some(format!("/uk/{slug}"))
    }
}

/// Legacy query-based contact route: `/?post_type=...` → `/uk/`.
#[derive(Debug)]
pub struct ContactQuery;

impl RedirectRule for ContactQuery {
    fn name(&self) -> &'static str {
        "contact_query"
    }

    fn apply(&self, req: &RequestLine<'_>) -> Option<String> {
        (req.path == "/" && req.query.contains("post_type=")).then(|| "/uk/".to_string())
    }
}

/// Bare root with no query: `/` → `/uk`.
#[derive(Debug)]
pub struct BareRoot;

impl RedirectRule for BareRoot {
    fn name(&self) -> &'static str {
        "bare_root"
    }

    fn apply(&self, req: &RequestLine<'_>) -> Option<String> {
        (req.path == "/" && req.query.is_empty()).then(|| "/uk".to_string())
    }
}

/// Fallback for paths with no recognized language prefix: `/{path}` → `/uk{path}`.
///
/// Skips reserved internal prefixes (API routes, admin paths, static assets)
/// and anything whose final segment carries a file extension.
#[derive(Debug)]
pub struct UnprefixedFallback {
    internal_prefixes: Vec<String>,
}

impl UnprefixedFallback {
    pub fn new(internal_prefixes: Vec<String>) -> Self {
        Self { internal_prefixes }
    }

    fn is_internal(&self, path: &str) -> bool {
        self.internal_prefixes
            .iter()
            .any(|prefix| has_segment_prefix(path, prefix))
    }
}

impl RedirectRule for UnprefixedFallback {
    fn name(&self) -> &'static str {
        "unprefixed_fallback"
    }

    fn apply(&self, req: &RequestLine<'_>) -> Option<String> {
        if req.path == "/" {
            return None;
        }
        if has_segment_prefix(req.path, "/en") || has_segment_prefix(req.path, "/uk") {
            return None;
        }
        if self.is_internal(req.path) {
            return None;
        }
        let last = req.path.rsplit('/').next().unwrap_or("");
        if last.contains('.') {
            return None;
        }
        Some(format!("/uk{}", req.path))
    }
}
