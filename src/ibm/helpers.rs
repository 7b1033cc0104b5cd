//! Helpers shared by the command handlers

use futures::StreamExt;
use indicatif::ProgressBar;
use log::debug;

use crate::error::Result;
use crate::ibm::pager::{PageItem, Pager};
use crate::ibm::traits::{PageFetcher, PagedRequest};
use crate::ui::update_spinner;

/// Drain a pager, reporting the running item count on the spinner
///
/// Stops at the first failing page; items already fetched are discarded.
pub async fn collect_pages<'c, C, Q>(
    pager: Pager<'c, C, Q>,
    spinner: Option<&ProgressBar>,
    resource_name: &str,
) -> Result<Vec<PageItem<C, Q>>>
where
    C: PageFetcher<Q>,
    Q: PagedRequest + 'c,
{
    let mut pages = std::pin::pin!(pager.into_stream());
    let mut items = Vec::new();
    let mut page_count = 0usize;

    while let Some(page) = pages.next().await {
        items.extend(page?);
        page_count += 1;
        update_spinner(
            spinner,
            format!("Fetched {} {}...", items.len(), resource_name),
        );
    }

    debug!(
        "Fetched {} {} in {} page(s)",
        items.len(),
        resource_name,
        page_count
    );
    Ok(items)
}
