//! Lazy, single-pass iteration over paginated API collections.
//!
//! Every list endpoint of the Property Validation API returns entities in
//! pages linked by `_links.next`. [`EntityListIterator`] hides the page
//! boundaries: it buffers exactly one page, hands out its entities one at a
//! time, and only invokes the page continuation once the buffer is drained.
//!
//! The iterator knows nothing about HTTP. Each page is produced by a
//! [`PageFetcher`] supplied by the operation layer, which decides how the
//! request is made and how the continuation for the following page is built.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use futures_util::stream::{self, Stream};
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Page types
// ---------------------------------------------------------------------------

/// Boxed future resolving to one entity page.
pub type PageFuture<T, E> = Pin<Box<dyn Future<Output = Result<EntityPage<T, E>, E>> + Send>>;

/// One-shot continuation producing a page.
///
/// `FnOnce` because a continuation is invoked at most once: the page it
/// produces replaces the page that owned it.
pub type PageFetcher<T, E> = Box<dyn FnOnce() -> PageFuture<T, E> + Send>;

/// A single page of entities returned by a list endpoint.
pub struct EntityPage<T, E> {
    /// Entities of this page, in server order.
    pub entities: Vec<T>,
    /// Continuation fetching the following page. `None` marks the last page.
    pub next: Option<PageFetcher<T, E>>,
}

impl<T, E> EntityPage<T, E> {
    /// Creates a page with no continuation.
    #[must_use]
    pub fn last(entities: Vec<T>) -> Self {
        Self {
            entities,
            next: None,
        }
    }

    /// Creates a page whose successor is produced by `next`.
    pub fn with_next<F, Fut>(entities: Vec<T>, next: F) -> Self
    where
        T: Send + 'static,
        E: Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<EntityPage<T, E>, E>> + Send + 'static,
    {
        Self {
            entities,
            next: Some(boxed_fetcher(next)),
        }
    }

    /// Returns `true` if no page follows this one.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

impl<T: fmt::Debug, E> fmt::Debug for EntityPage<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityPage")
            .field("entities", &self.entities)
            .field("has_next", &self.next.is_some())
            .finish()
    }
}

fn boxed_fetcher<T, E, F, Fut>(fetch: F) -> PageFetcher<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<EntityPage<T, E>, E>> + Send + 'static,
{
    Box::new(move || -> PageFuture<T, E> { Box::pin(fetch()) })
}

// ---------------------------------------------------------------------------
// EntityListIterator
// ---------------------------------------------------------------------------

enum State<T, E> {
    /// No page requested yet.
    Unfetched(PageFetcher<T, E>),
    /// A page is buffered; the `IntoIter` position is the cursor.
    Buffered {
        entities: std::vec::IntoIter<T>,
        next: Option<PageFetcher<T, E>>,
    },
    /// Last page consumed. Terminal.
    Exhausted,
    /// A fetch failed or was dropped mid-flight. Terminal.
    Poisoned,
}

/// Lazy sequence of entities spread across API pages.
///
/// The iterator is single-pass: once [`next`](Self::next) reports the end of
/// the sequence it keeps doing so without issuing further requests. A fresh
/// iterator has to be obtained from the owning operation to traverse the
/// collection again.
///
/// After a fetch error the iterator is poisoned. The error is returned from
/// the pull that triggered the fetch; later pulls report the end of the
/// sequence. Callers should discard the iterator and repeat the list call.
pub struct EntityListIterator<T, E> {
    state: State<T, E>,
    pages_fetched: usize,
}

impl<T, E> EntityListIterator<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Creates an iterator whose first page is produced by `fetch_first`.
    ///
    /// Nothing is fetched until the first pull.
    pub fn new<F, Fut>(fetch_first: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<EntityPage<T, E>, E>> + Send + 'static,
    {
        Self {
            state: State::Unfetched(boxed_fetcher(fetch_first)),
            pages_fetched: 0,
        }
    }

    /// Creates an iterator over already materialised pages.
    ///
    /// Each page still counts as one fetch, so the laziness of the iterator
    /// can be observed through [`pages_fetched`](Self::pages_fetched).
    #[must_use]
    pub fn from_pages(pages: Vec<Vec<T>>) -> Self {
        let mut pages = pages.into_iter().rev();
        let mut page = EntityPage::last(pages.next().unwrap_or_default());
        for entities in pages {
            let following = page;
            page = EntityPage::with_next(entities, move || async move { Ok(following) });
        }
        Self::new(move || async move { Ok(page) })
    }
}

impl<T, E> EntityListIterator<T, E> {
    /// Returns the next entity, fetching pages as needed.
    ///
    /// Resolves without suspending while the buffered page has unread
    /// entities. Empty pages that carry a continuation are skipped.
    ///
    /// # Errors
    ///
    /// Returns the page fetcher's error unchanged. The iterator is poisoned
    /// afterwards.
    pub async fn next(&mut self) -> Result<Option<T>, E> {
        loop {
            match &mut self.state {
                State::Buffered { entities, .. } => {
                    if let Some(entity) = entities.next() {
                        return Ok(Some(entity));
                    }
                }
                State::Exhausted | State::Poisoned => return Ok(None),
                State::Unfetched(_) => {}
            }
            self.advance().await?;
        }
    }

    /// Returns the unread remainder of the buffered page, or the next page.
    ///
    /// Unlike [`next`](Self::next), empty pages are returned as they come
    /// from the server. `None` marks the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns the page fetcher's error unchanged. The iterator is poisoned
    /// afterwards.
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>, E> {
        if let State::Buffered { entities, .. } = &mut self.state {
            if !entities.as_slice().is_empty() {
                return Ok(Some(entities.by_ref().collect()));
            }
        }
        self.advance().await?;
        match &mut self.state {
            State::Buffered { entities, .. } => Ok(Some(entities.by_ref().collect())),
            _ => Ok(None),
        }
    }

    /// Number of page fetches issued so far, including a failed one.
    #[must_use]
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Number of entities buffered and not yet handed out.
    #[must_use]
    pub fn buffered(&self) -> usize {
        match &self.state {
            State::Buffered { entities, .. } => entities.len(),
            _ => 0,
        }
    }

    /// Returns `true` once the last page has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, State::Exhausted)
    }

    /// Returns `true` if a fetch failed or was cancelled mid-flight.
    #[must_use]
    pub fn is_poisoned(&self) -> bool {
        matches!(self.state, State::Poisoned)
    }

    /// Converts the iterator into a [`Stream`] of entities.
    ///
    /// The stream ends after yielding the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<T, E>> {
        stream::unfold(Some(self), |iterator| async move {
            let mut iterator = iterator?;
            match iterator.next().await {
                Ok(Some(entity)) => Some((Ok(entity), Some(iterator))),
                Ok(None) => None,
                Err(err) => Some((Err(err), None)),
            }
        })
    }

    /// Replaces the buffered page with the next one, if a continuation exists.
    ///
    /// The state stays `Poisoned` while the fetch is in flight, so a dropped
    /// or failed fetch leaves the iterator terminal.
    async fn advance(&mut self) -> Result<(), E> {
        let fetch = match std::mem::replace(&mut self.state, State::Poisoned) {
            State::Unfetched(fetch) | State::Buffered { next: Some(fetch), .. } => fetch,
            State::Buffered { next: None, .. } | State::Exhausted => {
                self.state = State::Exhausted;
                return Ok(());
            }
            State::Poisoned => return Ok(()),
        };

        self.pages_fetched += 1;
        let page = match fetch().await {
            Ok(page) => page,
            Err(err) => {
                warn!(
                    pages_fetched = self.pages_fetched,
                    "entity page fetch failed, iterator poisoned"
                );
                return Err(err);
            }
        };

        debug!(
            page = self.pages_fetched,
            entities = page.entities.len(),
            has_next = page.next.is_some(),
            "fetched entity page"
        );
        self.state = State::Buffered {
            entities: page.entities.into_iter(),
            next: page.next,
        };
        Ok(())
    }
}

impl<T, E> fmt::Debug for EntityListIterator<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            State::Unfetched(_) => "unfetched",
            State::Buffered { .. } => "buffered",
            State::Exhausted => "exhausted",
            State::Poisoned => "poisoned",
        };
        f.debug_struct("EntityListIterator")
            .field("state", &state)
            .field("buffered", &self.buffered())
            .field("pages_fetched", &self.pages_fetched)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Bulk helpers
// ---------------------------------------------------------------------------

/// Drains the iterator into a `Vec`, preserving server order.
///
/// Entities read before a failing page are dropped together with the
/// iterator. Callers that need them should pull with
/// [`EntityListIterator::next`] instead.
///
/// # Errors
///
/// Returns the first page fetch error.
pub async fn to_array<T, E>(mut iterator: EntityListIterator<T, E>) -> Result<Vec<T>, E> {
    let mut entities = Vec::new();
    while let Some(entity) = iterator.next().await? {
        entities.push(entity);
    }
    Ok(entities)
}

/// Pulls at most `count` entities, preserving server order.
///
/// No page is fetched once `count` entities have been produced. Entities
/// left in an already fetched page stay buffered in the iterator.
///
/// # Errors
///
/// Returns the first page fetch error.
pub async fn take<T, E>(
    iterator: &mut EntityListIterator<T, E>,
    count: usize,
) -> Result<Vec<T>, E> {
    let mut entities = Vec::with_capacity(count.min(iterator.buffered()));
    while entities.len() < count {
        match iterator.next().await? {
            Some(entity) => entities.push(entity),
            None => break,
        }
    }
    Ok(entities)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
