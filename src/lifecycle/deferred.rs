/*
 * A single-shot deferred value, used wherever a lifecycle step may complete
 * later than the call that started it (base initialization, asynchronous
 * style factories). It is a thin wrapper around a `futures` oneshot channel:
 * the producing side holds a `Resolver`, the consuming side a `Deferred`.
 *
 * Failures travel through the same channel as successes, so a caller that
 * awaits (or polls) a `Deferred` sees the producer's `LifecycleError`
 * unchanged. A producer that is dropped without resolving yields
 * `LifecycleError::Abandoned`.
 */
use super::error::{LifecycleError, Result as LifecycleResult};
use futures::channel::oneshot;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

#[derive(Debug)]
pub struct Deferred<T> {
    receiver: oneshot::Receiver<LifecycleResult<T>>,
}

/// The producing half of a `Deferred`.
#[derive(Debug)]
pub struct Resolver<T> {
    sender: oneshot::Sender<LifecycleResult<T>>,
}

impl<T> Deferred<T> {
    pub fn channel() -> (Resolver<T>, Deferred<T>) {
        let (sender, receiver) = oneshot::channel::<LifecycleResult<T>>();
        (Resolver { sender }, Deferred { receiver })
    }

    pub fn ready(value: T) -> Self {
        Self::settled(Ok(value))
    }

    pub fn failed(error: LifecycleError) -> Self {
        Self::settled(Err(error))
    }

    fn settled(result: LifecycleResult<T>) -> Self {
        let (resolver, deferred) = Self::channel();
        resolver.settle(result);
        deferred
    }

    /*
     * Checks for a settled value without blocking.
     * Returns `Ok(None)` while the producer has not resolved yet. Once a value
     * (or error) has been returned, the deferred is spent and any further call
     * reports `Abandoned`.
     */
    pub fn try_take(&mut self) -> LifecycleResult<Option<T>> {
        match self.receiver.try_recv() {
            Ok(Some(result)) => result.map(Some),
            Ok(None) => Ok(None),
            Err(oneshot::Canceled) => Err(LifecycleError::Abandoned),
        }
    }
}

impl<T> Resolver<T> {
    pub fn resolve(self, value: T) {
        self.settle(Ok(value));
    }

    pub fn reject(self, error: LifecycleError) {
        self.settle(Err(error));
    }

    /// True once the consuming `Deferred` has been dropped.
    pub fn is_abandoned(&self) -> bool {
        self.sender.is_canceled()
    }

    fn settle(self, result: LifecycleResult<T>) {
        if self.sender.send(result).is_err() {
            log::debug!("Resolver: receiving side already dropped, discarding result.");
        }
    }
}

impl<T> Future for Deferred<T> {
    type Output = LifecycleResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Err(LifecycleError::Abandoned)),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_ready_value_is_immediately_available() {
        let mut deferred = Deferred::ready(7u32);
        assert_eq!(deferred.try_take(), Ok(Some(7)));
    }

    #[test]
    fn test_pending_until_resolved() {
        let (resolver, mut deferred) = Deferred::<String>::channel();
        assert_eq!(deferred.try_take(), Ok(None));

        resolver.resolve("done".to_string());
        assert_eq!(deferred.try_take(), Ok(Some("done".to_string())));
    }

    #[test]
    fn test_rejection_travels_through_the_channel() {
        let (resolver, deferred) = Deferred::<u8>::channel();
        resolver.reject(LifecycleError::EngineRejected("bad radius".to_string()));
        assert_eq!(
            block_on(deferred),
            Err(LifecycleError::EngineRejected("bad radius".to_string()))
        );
    }

    #[test]
    fn test_dropped_resolver_abandons() {
        let (resolver, mut deferred) = Deferred::<u8>::channel();
        drop(resolver);
        assert_eq!(deferred.try_take(), Err(LifecycleError::Abandoned));
    }

    #[test]
    fn test_resolver_sees_dropped_receiver() {
        let (resolver, deferred) = Deferred::<u8>::channel();
        assert!(!resolver.is_abandoned());
        drop(deferred);
        assert!(resolver.is_abandoned());
        // Resolving after the receiver is gone must not panic.
        resolver.resolve(1);
    }

    #[test]
    fn test_await_resolved_from_another_thread() {
        let (resolver, deferred) = Deferred::<u32>::channel();
        let worker = std::thread::spawn(move || resolver.resolve(42));
        assert_eq!(block_on(deferred), Ok(42));
        worker.join().unwrap();
    }
}
