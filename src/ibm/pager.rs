//! Cursor-based pager shared by every list operation

use futures::stream::{self, Stream};
use reqwest::Url;

use crate::config::api::START_PARAM;
use crate::error::{PsError, Result};
use crate::ibm::traits::{Page, PageFetcher, PagedRequest};

/// Item type produced by a fetcher for a request type
pub type PageItem<C, Q> = <<C as PageFetcher<Q>>::Page as Page>::Item;

/// Walks a list endpoint page by page, following `_start` cursors
///
/// `get_next` takes `&mut self`, so one pager serves one caller at a time.
pub struct Pager<'c, C, Q>
where
    C: PageFetcher<Q>,
    Q: PagedRequest,
{
    client: &'c C,
    request: Q,
    has_next: bool,
}

impl<'c, C, Q> Pager<'c, C, Q>
where
    C: PageFetcher<Q>,
    Q: PagedRequest,
{
    /// Create a pager over a private copy of `request`
    ///
    /// Fails if the request already carries a cursor.
    pub fn new(client: &'c C, request: &Q) -> Result<Self> {
        if request.start().is_some_and(|s| !s.is_empty()) {
            return Err(PsError::invalid("the 'start' field should not be set"));
        }
        let mut request = request.clone();
        request.set_start(None);
        Ok(Self {
            client,
            request,
            has_next: true,
        })
    }

    /// Whether another page may be fetched
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Fetch the next page and advance the cursor
    ///
    /// On error nothing is advanced, so calling again retries the same page.
    pub async fn get_next(&mut self) -> Result<Vec<PageItem<C, Q>>> {
        if !self.has_next {
            return Err(PsError::Exhausted);
        }

        let page = self
            .client
            .fetch_page(&self.request)
            .await?
            .ok_or_else(|| PsError::Pagination("empty response body".to_string()))?;

        let next = match page.next_link() {
            Some(link) => start_from_link(link)?,
            None => None,
        };

        self.has_next = next.is_some();
        self.request.set_start(next);
        Ok(page.into_items())
    }

    /// Fetch every remaining page and concatenate the items
    pub async fn get_all(&mut self) -> Result<Vec<PageItem<C, Q>>> {
        let mut all = Vec::new();
        while self.has_next {
            all.extend(self.get_next().await?);
        }
        Ok(all)
    }

    /// Turn the pager into a stream of pages
    ///
    /// The stream ends after the terminal page, or after yielding the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<PageItem<C, Q>>>> + 'c
    where
        Q: 'c,
    {
        stream::unfold(Some(self), |state| async move {
            let mut pager = state?;
            if !pager.has_next() {
                return None;
            }
            match pager.get_next().await {
                Ok(items) => Some((Ok(items), Some(pager))),
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}

/// Extract the `_start` cursor from a `next` link
///
/// Relative links (`/v1/things?_start=x`, `ibm.com?_start=x`) are accepted.
/// `Ok(None)` means the link carries no cursor; an empty `_start=` counts
/// as none. A cursor with a malformed percent-escape is rejected.
pub fn start_from_link(link: &str) -> Result<Option<String>> {
    let url = Url::parse("http://localhost/")
        .and_then(|base| base.join(link))
        .map_err(|e| PsError::Pagination(format!("invalid next link '{}': {}", link, e)))?;

    let raw = url.query().unwrap_or_default().split('&').find_map(|pair| {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        (name == START_PARAM).then_some(value)
    });
    if raw.is_some_and(has_invalid_escape) {
        return Err(PsError::Pagination(format!(
            "invalid '{}' value in next link '{}'",
            START_PARAM, link
        )));
    }

    Ok(url
        .query_pairs()
        .find(|(name, _)| name == START_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty()))
}

/// `%` not followed by two hex digits
fn has_invalid_escape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Clone, Default, Debug)]
    struct TestRequest {
        account_id: String,
        start: Option<String>,
    }

    impl PagedRequest for TestRequest {
        fn start(&self) -> Option<&str> {
            self.start.as_deref()
        }

        fn set_start(&mut self, start: Option<String>) {
            self.start = start;
        }
    }

    struct TestPage {
        next: Option<String>,
        items: Vec<&'static str>,
    }

    impl Page for TestPage {
        type Item = &'static str;

        fn next_link(&self) -> Option<&str> {
            self.next.as_deref()
        }

        fn into_items(self) -> Vec<&'static str> {
            self.items
        }
    }

    /// Replays scripted responses and records the cursor of every call
    #[derive(Default)]
    struct ScriptedFetcher {
        responses: Mutex<VecDeque<Result<Option<TestPage>>>>,
        calls: Mutex<Vec<Option<String>>>,
    }

    impl ScriptedFetcher {
        fn with(responses: Vec<Result<Option<TestPage>>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Option<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl PageFetcher<TestRequest> for ScriptedFetcher {
        type Page = TestPage;

        async fn fetch_page(&self, request: &TestRequest) -> Result<Option<TestPage>> {
            self.calls.lock().unwrap().push(request.start.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected fetch")
        }
    }

    fn page(next: Option<&str>, items: &[&'static str]) -> Result<Option<TestPage>> {
        Ok(Some(TestPage {
            next: next.map(str::to_string),
            items: items.to_vec(),
        }))
    }

    fn request() -> TestRequest {
        TestRequest {
            account_id: "testString".to_string(),
            start: None,
        }
    }

    #[test]
    fn test_start_from_absolute_link() {
        assert_eq!(
            start_from_link("https://myhost.com/somePath?_start=1").unwrap(),
            Some("1".to_string())
        );
    }

    #[test]
    fn test_start_from_host_without_scheme() {
        assert_eq!(
            start_from_link("ibm.com?_start=abc-123").unwrap(),
            Some("abc-123".to_string())
        );
    }

    #[test]
    fn test_start_from_relative_link_without_cursor() {
        let link = "/v1/billing-reports-snapshots?_limit=10&account_id=272b9a4f73e11030d0ba037daee47a35&month=2023-06";
        assert_eq!(start_from_link(link).unwrap(), None);
        assert_eq!(start_from_link("ibm.com").unwrap(), None);
    }

    #[test]
    fn test_start_from_link_decodes_value() {
        assert_eq!(
            start_from_link("/v2/accounts/a/users?limit=1&_start=a%2Fb%3D").unwrap(),
            Some("a/b=".to_string())
        );
    }

    #[test]
    fn test_start_from_unparseable_link() {
        assert!(matches!(
            start_from_link("http://[::1"),
            Err(PsError::Pagination(_))
        ));
    }

    #[test]
    fn test_start_from_link_empty_cursor() {
        assert_eq!(start_from_link("/x?_start=").unwrap(), None);
        assert_eq!(
            start_from_link("/v2/accounts/a/users?limit=1&_start=").unwrap(),
            None
        );
        assert_eq!(start_from_link("/x?_start").unwrap(), None);
    }

    #[test]
    fn test_start_from_link_malformed_escape() {
        for link in ["/x?_start=%zz", "/x?limit=1&_start=abc%2", "/x?_start=%"] {
            assert!(
                matches!(start_from_link(link), Err(PsError::Pagination(_))),
                "{} should be rejected",
                link
            );
        }
        // Malformed escapes in other parameters are not our concern
        assert_eq!(
            start_from_link("/x?search=%zz&_start=ok").unwrap(),
            Some("ok".to_string())
        );
    }

    #[tokio::test]
    async fn test_empty_cursor_in_next_link_terminates() {
        let fetcher = ScriptedFetcher::with(vec![page(
            Some("/v2/accounts/a/users?limit=1&_start="),
            &["a"],
        )]);
        let mut pager = Pager::new(&fetcher, &request()).unwrap();

        assert_eq!(pager.get_all().await.unwrap(), vec!["a"]);
        assert!(!pager.has_next());
        assert!(matches!(pager.get_next().await, Err(PsError::Exhausted)));
        assert_eq!(fetcher.calls(), vec![None]);
    }

    #[test]
    fn test_new_rejects_preset_start() {
        let fetcher = ScriptedFetcher::default();
        let mut req = request();
        req.start = Some("abc".to_string());
        match Pager::new(&fetcher, &req) {
            Err(PsError::InvalidArgument(msg)) => assert!(msg.contains("'start'")),
            Err(e) => panic!("Expected InvalidArgument, got {:?}", e),
            Ok(_) => panic!("Expected InvalidArgument"),
        }
        assert!(fetcher.calls().is_empty());
    }

    #[test]
    fn test_new_accepts_empty_start() {
        let fetcher = ScriptedFetcher::default();
        let mut req = request();
        req.start = Some(String::new());
        let pager = Pager::new(&fetcher, &req).unwrap();
        assert!(pager.has_next());
    }

    #[tokio::test]
    async fn test_get_next_two_pages_then_exhausted() {
        let fetcher = ScriptedFetcher::with(vec![
            page(Some("https://myhost.com/somePath?_start=1"), &["a"]),
            page(None, &["b"]),
        ]);
        let req = request();
        let mut pager = Pager::new(&fetcher, &req).unwrap();

        assert!(pager.has_next());
        assert_eq!(pager.get_next().await.unwrap(), vec!["a"]);
        assert!(pager.has_next());
        assert_eq!(pager.get_next().await.unwrap(), vec!["b"]);
        assert!(!pager.has_next());

        assert!(matches!(pager.get_next().await, Err(PsError::Exhausted)));
        assert_eq!(fetcher.calls(), vec![None, Some("1".to_string())]);
        assert!(req.start.is_none());
    }

    #[tokio::test]
    async fn test_get_all_concatenates_in_order() {
        let fetcher = ScriptedFetcher::with(vec![
            page(Some("ibm.com?_start=p2"), &["a", "b"]),
            page(Some("ibm.com?_start=p3"), &[]),
            page(Some("ibm.com?_start=p4"), &["c"]),
            page(None, &["d", "e"]),
        ]);
        let mut pager = Pager::new(&fetcher, &request()).unwrap();

        let all = pager.get_all().await.unwrap();
        assert_eq!(all, vec!["a", "b", "c", "d", "e"]);
        assert!(!pager.has_next());
        assert_eq!(
            fetcher.calls(),
            vec![
                None,
                Some("p2".to_string()),
                Some("p3".to_string()),
                Some("p4".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_single_page_without_next() {
        let fetcher = ScriptedFetcher::with(vec![page(None, &["x", "y", "z"])]);
        let mut pager = Pager::new(&fetcher, &request()).unwrap();

        assert!(pager.has_next());
        assert_eq!(pager.get_next().await.unwrap().len(), 3);
        assert!(!pager.has_next());
    }

    #[tokio::test]
    async fn test_next_link_without_start_terminates() {
        let fetcher = ScriptedFetcher::with(vec![page(
            Some("/v1/billing-reports-snapshots?_limit=10&month=2023-06"),
            &["a"],
        )]);
        let mut pager = Pager::new(&fetcher, &request()).unwrap();

        assert_eq!(pager.get_all().await.unwrap(), vec!["a"]);
        assert!(!pager.has_next());
        assert_eq!(fetcher.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_retries_same_cursor() {
        let fetcher = ScriptedFetcher::with(vec![
            page(Some("ibm.com?_start=next-1"), &["a"]),
            Err(PsError::Api {
                status: 500,
                message: "boom".to_string(),
            }),
            page(None, &["b"]),
        ]);
        let mut pager = Pager::new(&fetcher, &request()).unwrap();

        pager.get_next().await.unwrap();
        assert!(matches!(
            pager.get_next().await,
            Err(PsError::Api { status: 500, .. })
        ));
        assert!(pager.has_next());
        assert_eq!(pager.get_next().await.unwrap(), vec!["b"]);
        assert_eq!(
            fetcher.calls(),
            vec![
                None,
                Some("next-1".to_string()),
                Some("next-1".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_get_all_returns_first_error() {
        let fetcher = ScriptedFetcher::with(vec![
            page(Some("ibm.com?_start=2"), &["a"]),
            Err(PsError::Json("bad".to_string())),
        ]);
        let mut pager = Pager::new(&fetcher, &request()).unwrap();

        assert!(matches!(pager.get_all().await, Err(PsError::Json(_))));
        assert!(pager.has_next());
    }

    #[tokio::test]
    async fn test_empty_body_is_pagination_error() {
        let fetcher = ScriptedFetcher::with(vec![Ok(None)]);
        let mut pager = Pager::new(&fetcher, &request()).unwrap();

        assert!(matches!(
            pager.get_next().await,
            Err(PsError::Pagination(_))
        ));
        assert!(pager.has_next());
    }

    #[tokio::test]
    async fn test_unparseable_next_link_keeps_state() {
        let fetcher = ScriptedFetcher::with(vec![
            page(Some("http://[::1"), &["a"]),
            page(None, &["a"]),
        ]);
        let mut pager = Pager::new(&fetcher, &request()).unwrap();

        assert!(matches!(
            pager.get_next().await,
            Err(PsError::Pagination(_))
        ));
        assert!(pager.has_next());
        pager.get_next().await.unwrap();
        assert_eq!(fetcher.calls(), vec![None, None]);
    }

    #[tokio::test]
    async fn test_into_stream_yields_pages() {
        let fetcher = ScriptedFetcher::with(vec![
            page(Some("ibm.com?_start=2"), &["a", "b"]),
            page(None, &["c"]),
        ]);
        let pager = Pager::new(&fetcher, &request()).unwrap();

        let pages: Vec<_> = pager.into_stream().collect().await;
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].as_ref().unwrap(), &vec!["a", "b"]);
        assert_eq!(pages[1].as_ref().unwrap(), &vec!["c"]);
    }

    #[tokio::test]
    async fn test_into_stream_stops_after_error() {
        let fetcher = ScriptedFetcher::with(vec![
            page(Some("ibm.com?_start=2"), &["a"]),
            Err(PsError::Json("bad".to_string())),
        ]);
        let pager = Pager::new(&fetcher, &request()).unwrap();

        let pages: Vec<_> = pager.into_stream().collect().await;
        assert_eq!(pages.len(), 2);
        assert!(pages[0].is_ok());
        assert!(pages[1].is_err());
        assert_eq!(fetcher.calls().len(), 2);
    }

    #[test]
    fn test_request_fields_untouched() {
        let fetcher = ScriptedFetcher::default();
        let req = request();
        let pager = Pager::new(&fetcher, &req).unwrap();
        assert_eq!(pager.request.account_id, "testString");
    }
}
