//! Rule table evaluation.
//!
//! # Responsibilities
//! - Normalize the inbound path (trailing slash, root guard)
//! - Walk the priority-ordered rule table, first match wins
//! - Return the redirect decision or explicit pass-through
//!
//! # Design Decisions
//! - The table is built once from config and never mutated
//! - Evaluation is a total function: empty or malformed paths pass through

use crate::config::RedirectConfig;
use crate::redirect::rules::{
    AttachmentUrl, BareRoot, BlogRoot, CategoryListing, ContactQuery, LangPrefixRewrite,
    LegacyHtmlPost, RedirectRule, RequestLine, RootHtmlPost, UnprefixedFallback,
};

/// All legacy redirects are permanent: clients and crawlers should treat the
/// new URL as canonical.
pub const MOVED_PERMANENTLY: u16 = 301;

/// One redirect decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectAction {
    /// Replacement path (query string re-attached by the HTTP layer).
    pub target: String,
    /// HTTP status to respond with.
    pub status: u16,
    /// Name of the rule that matched, for logs and metrics.
    pub rule: &'static str,
}

/// Priority-ordered legacy-URL rule table, immutable after construction.
#[derive(Debug)]
pub struct RedirectEngine {
    rules: Vec<Box<dyn RedirectRule>>,
}

impl RedirectEngine {
    /// Build the rule table. Order matters: the `.html` post rules must be
    /// tried before the language-prefix and generic fallback rules, or
    /// overlapping patterns would mis-redirect.
    pub fn from_config(config: &RedirectConfig) -> Self {
        let rules: Vec<Box<dyn RedirectRule>> = vec![
            Box::new(LegacyHtmlPost),
            Box::new(RootHtmlPost),
            Box::new(LangPrefixRewrite::new("/ru", "/uk", "lang_prefix_ru")),
            Box::new(LangPrefixRewrite::new("/ua", "/uk", "lang_prefix_ua")),
            Box::new(CategoryListing),
            Box::new(BlogRoot),
            Box::new(AttachmentUrl),
            Box::new(ContactQuery),
            Box::new(BareRoot),
            Box::new(UnprefixedFallback::new(config.internal_prefixes.clone())),
        ];
        Self { rules }
    }

    /// Decide whether the request should be redirected.
    ///
    /// Returns `None` when no rule matches, meaning the caller proceeds with
    /// normal locale routing. Never fails: an empty or malformed path is
    /// treated as no match.
    pub fn evaluate(&self, path: &str, query: &str) -> Option<RedirectAction> {
        if path.is_empty() || !path.starts_with('/') {
            return None;
        }
        let req = RequestLine {
            path: normalize_path(path),
            query,
        };
        for rule in &self.rules {
            if let Some(target) = rule.apply(&req) {
                return Some(RedirectAction {
                    target,
                    status: MOVED_PERMANENTLY,
                    rule: rule.name(),
                });
            }
        }
        None
    }
}

/// Strip trailing slashes; the root path stays `/`.
fn normalize_path(path: &str) -> &str {
    if path.len() <= 1 {
        return path;
    }
    let stripped = path.trim_end_matches('/');
    if stripped.is_empty() {
        "/"
    } else {
        stripped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> RedirectEngine {
        RedirectEngine::from_config(&RedirectConfig::default())
    }

    fn target(path: &str, query: &str) -> Option<String> {
        engine().evaluate(path, query).map(|a| a.target)
    }

    #[test]
    fn test_legacy_language_html_posts() {
        assert_eq!(target("/ru/som.html", ""), Some("/uk/som".to_string()));
        assert_eq!(target("/ua/som.html", ""), Some("/uk/som".to_string()));
        assert_eq!(target("/uk/som.html", ""), Some("/uk/som".to_string()));
        assert_eq!(target("/en/som.html", ""), Some("/en/som".to_string()));
    }

    #[test]
    fn test_root_level_html_post() {
        assert_eq!(
            target("/tilyapiya-test.html", ""),
            Some("/uk/tilyapiya-test".to_string())
        );
        // index and multi-dot slugs are excluded, and the extension also
        // blocks the generic fallback
        assert_eq!(target("/index.html", ""), None);
        assert_eq!(target("/report.v2.html", ""), None);
    }

    #[test]
    fn test_language_prefix_rewrite() {
        assert_eq!(target("/ru", ""), Some("/uk".to_string()));
        assert_eq!(target("/ru/pro-nas", ""), Some("/uk/pro-nas".to_string()));
        assert_eq!(
            target("/ua/poslugy/ribnitstvo", ""),
            Some("/uk/poslugy/ribnitstvo".to_string())
        );
        // whole-segment match only: /russia falls through to the fallback
        assert_eq!(target("/russia", ""), Some("/uk/russia".to_string()));
    }

    #[test]
    fn test_category_and_blog() {
        assert_eq!(
            target("/category/novini", ""),
            Some("/uk/blog/category/novini".to_string())
        );
        assert_eq!(
            target("/category/novini/akvakultura", ""),
            Some("/uk/blog/category/novini/akvakultura".to_string())
        );
        assert_eq!(target("/blog", ""), Some("/uk/blog".to_string()));
        assert_eq!(target("/blog/", ""), Some("/uk/blog".to_string()));
    }

    #[test]
    fn test_attachment_url() {
        assert_eq!(
            target("/prefiltr-ultrasieve.html/ultrasieveextra", ""),
            Some("/uk/prefiltr-ultrasieve".to_string())
        );
    }

    #[test]
    fn test_root_paths() {
        assert_eq!(target("/", ""), Some("/uk".to_string()));
        assert_eq!(target("/", "post_type=contact"), Some("/uk/".to_string()));
        // root with an unrelated query passes through
        assert_eq!(target("/", "utm_source=x"), None);
    }

    #[test]
    fn test_unprefixed_fallback() {
        assert_eq!(target("/about", ""), Some("/uk/about".to_string()));
        assert_eq!(
            target("/poslugy/proektuvannya", ""),
            Some("/uk/poslugy/proektuvannya".to_string())
        );
    }

    #[test]
    fn test_pass_through() {
        assert_eq!(target("/en/about", ""), None);
        assert_eq!(target("/uk/blog", ""), None);
        assert_eq!(target("/api/related/5", ""), None);
        assert_eq!(target("/logo.svg", ""), None);
        assert_eq!(target("", ""), None);
        assert_eq!(target("no-leading-slash", ""), None);
    }

    #[test]
    fn test_trailing_slash_stripped_before_matching() {
        assert_eq!(target("/ru/som.html/", ""), Some("/uk/som".to_string()));
        assert_eq!(target("/about/", ""), Some("/uk/about".to_string()));
        assert_eq!(target("//", ""), Some("/uk".to_string()));
    }

    #[test]
    fn test_rule_priority_ordering() {
        // the .html rule must win over the bare language-prefix rewrite
        assert_eq!(target("/ru/som.html", ""), Some("/uk/som".to_string()));
        // a nested path under /ru goes to the prefix rewrite, not the post rule
        assert_eq!(
            target("/ru/blog/som.html", ""),
            Some("/uk/blog/som.html".to_string())
        );
    }

    #[test]
    fn test_no_redirect_loops() {
        let engine = engine();
        let inputs = [
            ("/ru/som.html", ""),
            ("/tilyapiya-test.html", ""),
            ("/ru/pro-nas", ""),
            ("/ua", ""),
            ("/category/novini", ""),
            ("/blog", ""),
            ("/prefiltr-ultrasieve.html/extra", ""),
            ("/", "post_type=contact"),
            ("/", ""),
            ("/about", ""),
        ];
        for (path, query) in inputs {
            let action = engine.evaluate(path, query).expect("input should redirect");
            assert_eq!(
                engine.evaluate(&action.target, ""),
                None,
                "target {} of {} must not redirect again",
                action.target,
                path
            );
        }
    }
}
