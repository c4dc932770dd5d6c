//! Resource types and the page-token stream shared by every list endpoint.

use crate::error::Result;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};

/// One page of a list response: the items plus the cursor for the next page.
#[derive(Debug)]
pub struct Page<T> {
    pub items: VecDeque<T>,
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    /// Build a page from a raw list response. A response without `items`
    /// ends the listing even if it carries a token, and an empty token
    /// counts as no token.
    pub fn from_response(items: Option<VecDeque<T>>, next_page_token: Option<String>) -> Self {
        match items {
            Some(items) => Self {
                items,
                next_page_token: next_page_token.filter(|t| !t.is_empty()),
            },
            None => Self {
                items: VecDeque::new(),
                next_page_token: None,
            },
        }
    }
}

type OneFuturePage<'a, F, T> =
    Pin<Box<dyn Future<Output = Result<(F, Page<T>)>> + 'a + Send>>;

/// A paginated stream that fetches subsequent pages of a list endpoint on demand.
///
/// Items are yielded one by one; the next page is requested only once the
/// current one is drained. Forward-only: a new stream starts again from the
/// first page. An error is yielded once and ends the stream.
pub struct PagedStream<'a, T, F> {
    current_items: VecDeque<T>,
    pending_request: Option<OneFuturePage<'a, F, T>>,
    is_done: bool,
}

impl<'a, T, F> PagedStream<'a, T, F> {
    pub fn new<Fut>(fetcher: F) -> Self
    where
        F: Fn(Option<String>) -> Fut,
        F: Send + 'a,
        Fut: Future<Output = Result<Page<T>>> + Send + 'a,
    {
        let first_page = async move {
            let page = fetcher(None).await?;
            Ok((fetcher, page))
        };
        Self {
            pending_request: Some(Box::pin(first_page)),
            current_items: VecDeque::new(),
            is_done: false,
        }
    }
}

impl<'a, T: Unpin, F> Unpin for PagedStream<'a, T, F> {}

impl<'a, T: Unpin, F, Fut> Stream for PagedStream<'a, T, F>
where
    F: Fn(Option<String>) -> Fut,
    F: Send + 'a,
    Fut: Future<Output = Result<Page<T>>> + Send + 'a,
{
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(item) = self.current_items.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if self.is_done {
                return Poll::Ready(None);
            }

            let Some(pending) = self.pending_request.as_mut() else {
                self.is_done = true;
                return Poll::Ready(None);
            };

            match pending.as_mut().poll(cx) {
                Poll::Ready(Ok((fetcher, page))) => {
                    self.current_items.extend(page.items);

                    if let Some(next_token) = page.next_page_token {
                        // queued, polled once the current items are drained
                        self.pending_request = Some(Box::pin(async move {
                            let page = fetcher(Some(next_token)).await?;
                            Ok((fetcher, page))
                        }));
                    } else {
                        self.is_done = true;
                        self.pending_request = None;
                    }
                }
                Poll::Ready(Err(e)) => {
                    self.pending_request = None;
                    self.is_done = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Paging details for lists of resources.
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "totalResults", default)]
    pub total_results: u32,
    #[serde(rename = "resultsPerPage", default)]
    pub results_per_page: u32,
}

/// Identifies the resource a search result or playlist item points at.
/// Exactly one of the ID fields is set, depending on `kind`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceId {
    #[serde(default)]
    pub kind: String,
    #[serde(rename = "videoId", skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(rename = "channelId", skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(rename = "playlistId", skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<String>,
}
