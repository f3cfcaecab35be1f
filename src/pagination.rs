/// Limit/offset pagination for list endpoints
///
/// Pagination is opt-in: a request without `limit` gets the plain JSON
/// array, a request with `limit` gets a `{count, next, previous, results}`
/// envelope whose links are absolute URLs pointing at the adjacent pages.
use actix_web::HttpRequest;
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

/// Query parameters accepted by paginated list endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PaginationParams {
    /// Page size; enables the envelope when present
    pub limit: Option<i64>,
    /// Number of records to skip, defaults to 0
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Effective page size. Non-positive values disable pagination the
    /// same way an absent parameter does.
    pub fn limit(&self) -> Option<i64> {
        self.limit.filter(|l| *l > 0)
    }

    /// Effective offset, never negative.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Paginated response envelope
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(base_url: &str, limit: i64, offset: i64, count: i64, results: Vec<T>) -> Self {
        // Saturate: limit and offset arrive straight from the query string
        let end = offset.saturating_add(limit);
        let next = if end < count {
            Some(format!("{base_url}?limit={limit}&offset={end}"))
        } else {
            None
        };

        let previous = if offset > 0 {
            Some(format!(
                "{base_url}?limit={limit}&offset={}",
                (offset - limit).max(0)
            ))
        } else {
            None
        };

        Self {
            count,
            next,
            previous,
            results,
        }
    }
}

/// Absolute URL of the current request path, for page links.
pub fn request_base_url(req: &HttpRequest) -> String {
    let conn = req.connection_info();
    format!("{}://{}{}", conn.scheme(), conn.host(), req.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://testserver/v1/posts/";

    #[test]
    fn test_first_page_has_next_only() {
        let page = Page::new(BASE, 2, 0, 5, vec![1, 2]);
        assert_eq!(page.count, 5);
        assert_eq!(
            page.next.as_deref(),
            Some("http://testserver/v1/posts/?limit=2&offset=2")
        );
        assert!(page.previous.is_none());
    }

    #[test]
    fn test_middle_page_has_both_links() {
        let page = Page::new(BASE, 2, 2, 5, vec![3, 4]);
        assert_eq!(
            page.next.as_deref(),
            Some("http://testserver/v1/posts/?limit=2&offset=4")
        );
        assert_eq!(
            page.previous.as_deref(),
            Some("http://testserver/v1/posts/?limit=2&offset=0")
        );
    }

    #[test]
    fn test_last_page_has_previous_only() {
        let page = Page::new(BASE, 2, 4, 5, vec![5]);
        assert!(page.next.is_none());
        assert_eq!(
            page.previous.as_deref(),
            Some("http://testserver/v1/posts/?limit=2&offset=2")
        );
    }

    #[test]
    fn test_previous_offset_never_negative() {
        let page = Page::new(BASE, 10, 3, 20, vec![1]);
        assert_eq!(
            page.previous.as_deref(),
            Some("http://testserver/v1/posts/?limit=10&offset=0")
        );
    }

    #[test]
    fn test_offset_beyond_count_yields_no_next() {
        let page: Page<i32> = Page::new(BASE, 2, 10, 5, vec![]);
        assert!(page.next.is_none());
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_max_limit_and_offset_have_no_next() {
        let page: Page<i32> = Page::new(BASE, i64::MAX, i64::MAX, 5, vec![]);
        assert!(page.next.is_none());
        let expected = format!("{BASE}?limit={}&offset=0", i64::MAX);
        assert_eq!(page.previous.as_deref(), Some(expected.as_str()));
    }

    #[test]
    fn test_params_sanitized() {
        let params = PaginationParams {
            limit: Some(0),
            offset: Some(-3),
        };
        assert_eq!(params.limit(), None);
        assert_eq!(params.offset(), 0);

        let params = PaginationParams {
            limit: Some(5),
            offset: None,
        };
        assert_eq!(params.limit(), Some(5));
        assert_eq!(params.offset(), 0);
    }
}
