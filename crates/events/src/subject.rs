//! Event publishing/subscription (mechanics only).
//!
//! A [`Subject`] is a hot event source: every value published is delivered, in
//! publish order, to every subscription that is alive at that moment. Late
//! subscribers do not see earlier values; use [`crate::Multicast`] when they must.
//!
//! ## Delivery
//!
//! - **Ordered**: values reach each subscriber in the order they were published.
//! - **Unbounded**: publishing never waits on a slow consumer; values queue per subscriber.
//! - **Self-cleaning**: dropped subscriptions are pruned on the next publish.

use std::future::{Future, poll_fn};
use std::pin::Pin;
use std::sync::Mutex;
use std::task::{Context, Poll};

use thiserror::Error;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{mpsc, watch};
use tokio_stream::Stream;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// Publish failed due to internal lock poisoning.
    #[error("subscriber list lock poisoned")]
    Poisoned,
}

type Changed<M> = Pin<Box<dyn Future<Output = Option<watch::Receiver<Option<M>>>> + Send>>;

enum Feed<M> {
    /// Every value, in publish order ([`Subject`]).
    Queue(mpsc::UnboundedReceiver<M>),
    /// Only the newest unread value ([`crate::Multicast`]).
    Latest {
        rx: watch::Receiver<Option<M>>,
        changed: Option<Changed<M>>,
    },
}

/// A subscription to an event stream.
///
/// Implements [`Stream`], so it can be driven with `StreamExt::next` or handed to
/// anything that consumes streams.
///
/// A subscription to a [`Subject`] queues every value until it is read. A
/// subscription to a [`crate::Multicast`] holds at most one unread value: a
/// reader that falls behind skips straight to the newest one.
///
/// ## Usage Pattern
///
/// ```ignore
/// let mut products = service.products_reconciled();
/// while let Some(collection) = products.recv().await {
///     render(&collection);
/// }
/// ```
///
/// The stream ends once the publishing side has been dropped.
pub struct Subscription<M> {
    feed: Feed<M>,
}

impl<M> Subscription<M> {
    pub(crate) fn queued(receiver: mpsc::UnboundedReceiver<M>) -> Self {
        Self {
            feed: Feed::Queue(receiver),
        }
    }

    pub(crate) fn latest_of(rx: watch::Receiver<Option<M>>) -> Self {
        Self {
            feed: Feed::Latest { rx, changed: None },
        }
    }
}

impl<M> Subscription<M>
where
    M: Clone + Send + Sync + 'static,
{
    /// Wait for the next value. `None` once the source is gone and nothing is left to read.
    pub async fn recv(&mut self) -> Option<M> {
        poll_fn(|cx| self.poll_value(cx)).await
    }

    /// Take the next unread value without waiting.
    pub fn try_recv(&mut self) -> Result<M, TryRecvError> {
        match &mut self.feed {
            Feed::Queue(receiver) => receiver.try_recv(),
            Feed::Latest { rx, changed } => {
                // A pending stream wait watches the same version; reading here supersedes it.
                *changed = None;
                match rx.has_changed() {
                    Ok(true) => rx.borrow_and_update().clone().ok_or(TryRecvError::Empty),
                    Ok(false) => Err(TryRecvError::Empty),
                    Err(_) => Err(TryRecvError::Disconnected),
                }
            }
        }
    }

    /// Everything unread so far, oldest first.
    pub fn drain(&mut self) -> Vec<M> {
        let mut out = Vec::new();
        while let Ok(message) = self.try_recv() {
            out.push(message);
        }
        out
    }

    /// Most recent unread value, discarding the older ones.
    pub fn latest(&mut self) -> Option<M> {
        self.drain().pop()
    }

    fn poll_value(&mut self, cx: &mut Context<'_>) -> Poll<Option<M>> {
        match &mut self.feed {
            Feed::Queue(receiver) => receiver.poll_recv(cx),
            Feed::Latest { rx, changed } => loop {
                let wait = changed.get_or_insert_with(|| wait_for_change(rx.clone()));
                let seen = match wait.as_mut().poll(cx) {
                    Poll::Pending => return Poll::Pending,
                    Poll::Ready(seen) => seen,
                };
                *changed = None;

                let Some(seen) = seen else {
                    return Poll::Ready(None);
                };
                *rx = seen;
                if let Some(value) = rx.borrow_and_update().clone() {
                    return Poll::Ready(Some(value));
                }
            },
        }
    }
}

fn wait_for_change<M>(mut rx: watch::Receiver<Option<M>>) -> Changed<M>
where
    M: Send + Sync + 'static,
{
    Box::pin(async move { rx.changed().await.ok().map(|()| rx) })
}

impl<M> Stream for Subscription<M>
where
    M: Clone + Send + Sync + 'static,
{
    type Item = M;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<M>> {
        self.get_mut().poll_value(cx)
    }
}

impl<M> std::fmt::Debug for Subscription<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let feed = match &self.feed {
            Feed::Queue(_) => "queue",
            Feed::Latest { .. } => "latest",
        };
        f.debug_struct("Subscription")
            .field("feed", &feed)
            .finish_non_exhaustive()
    }
}

/// In-memory hot event source.
///
/// - No IO, no runtime required to publish
/// - Values published before a subscription are not replayed
#[derive(Debug)]
pub struct Subject<M> {
    senders: Mutex<Vec<mpsc::UnboundedSender<M>>>,
}

impl<M: Clone> Subject<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `message` to all current subscribers.
    ///
    /// Returns the number of subscribers that received it.
    pub fn publish(&self, message: M) -> Result<usize, ChannelError> {
        let mut senders = self.senders.lock().map_err(|_| ChannelError::Poisoned)?;
        // Drop any dead subscribers while publishing.
        senders.retain(|tx| tx.send(message.clone()).is_ok());
        Ok(senders.len())
    }

    pub fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::unbounded_channel();
        match self.senders.lock() {
            Ok(mut senders) => senders.push(tx),
            // A poisoned list never delivers again; the subscription is closed as soon as `tx` drops.
            Err(_) => drop(tx),
        }
        Subscription::queued(rx)
    }

    /// Number of subscriptions still alive.
    pub fn subscriber_count(&self) -> usize {
        self.senders
            .lock()
            .map(|senders| senders.iter().filter(|tx| !tx.is_closed()).count())
            .unwrap_or(0)
    }
}

impl<M: Clone> Default for Subject<M> {
    fn default() -> Self {
        Self {
            senders: Mutex::new(Vec::new()),
        }
    }
}
