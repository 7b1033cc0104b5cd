//! Common traits for paginated list operations

use crate::error::Result;

/// Options for a list operation that accepts a `_start` cursor
///
/// The pager clones the caller's request once and only ever touches the
/// cursor on its own copy.
pub trait PagedRequest: Clone {
    fn start(&self) -> Option<&str>;
    fn set_start(&mut self, start: Option<String>);
}

/// One decoded page of a list response
pub trait Page {
    type Item;

    /// The `next` link, if the server sent one
    fn next_link(&self) -> Option<&str>;

    /// Consume the page and return its items in server order
    fn into_items(self) -> Vec<Self::Item>;
}

/// Something that can fetch one page for a request
///
/// Service clients implement this once per list operation. `Ok(None)`
/// means the server answered with an empty body.
#[allow(async_fn_in_trait)]
pub trait PageFetcher<Q: PagedRequest> {
    type Page: Page;

    async fn fetch_page(&self, request: &Q) -> Result<Option<Self::Page>>;
}
