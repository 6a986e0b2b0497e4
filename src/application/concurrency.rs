//! Bounded fan-out for registry calls
//!
//! Runs a fallible function over a slice on at most `limit` scoped worker
//! threads. Results come back in input order. The first failure stops
//! workers from picking up new items and is returned once every in-flight
//! call has finished.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use crate::config::{MAX_CONCURRENCY, MIN_CONCURRENCY};

pub fn bounded_map<T, R, E, F>(items: &[T], limit: usize, f: F) -> Result<Vec<R>, E>
where
    T: Sync,
    R: Send,
    E: Send,
    F: Fn(&T) -> Result<R, E> + Sync,
{
    let workers = limit
        .clamp(MIN_CONCURRENCY, MAX_CONCURRENCY)
        .min(items.len());
    if workers <= 1 {
        return items.iter().map(&f).collect();
    }

    let next = AtomicUsize::new(0);
    let failed = AtomicBool::new(false);
    let (next, failed, f) = (&next, &failed, &f);

    let outcomes: Vec<thread::Result<Result<Vec<(usize, R)>, E>>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(move |_| {
                scope.spawn(move || {
                    let mut done = Vec::new();
                    while !failed.load(Ordering::Acquire) {
                        let i = next.fetch_add(1, Ordering::AcqRel);
                        let Some(item) = items.get(i) else {
                            break;
                        };
                        match f(item) {
                            Ok(r) => done.push((i, r)),
                            Err(e) => {
                                failed.store(true, Ordering::Release);
                                return Err(e);
                            }
                        }
                    }
                    Ok(done)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join()).collect()
    });

    let mut indexed = Vec::with_capacity(items.len());
    let mut first_error = None;
    for outcome in outcomes {
        match outcome {
            Ok(Ok(done)) => indexed.extend(done),
            Ok(Err(e)) => {
                first_error.get_or_insert(e);
            }
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
    if let Some(e) = first_error {
        return Err(e);
    }

    indexed.sort_unstable_by_key(|(i, _)| *i);
    Ok(indexed.into_iter().map(|(_, r)| r).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn results_keep_input_order() {
        let items: Vec<u64> = (0..40).collect();
        let out = bounded_map(&items, 4, |n| {
            thread::sleep(Duration::from_millis(40 - *n));
            Ok::<_, ()>(n * 2)
        })
        .unwrap();
        assert_eq!(out, items.iter().map(|n| n * 2).collect::<Vec<_>>());
    }

    #[test]
    fn never_exceeds_the_limit() {
        let active = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        let items: Vec<u32> = (0..30).collect();

        bounded_map(&items, 3, |_| {
            let now = active.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(5));
            active.fetch_sub(1, Ordering::SeqCst);
            Ok::<_, ()>(())
        })
        .unwrap();

        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[test]
    fn limit_is_clamped() {
        let calls = AtomicUsize::new(0);
        let items = vec![1, 2, 3];
        let out = bounded_map(&items, 0, |n| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>(*n)
        })
        .unwrap();
        assert_eq!(out, vec![1, 2, 3]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn first_failure_stops_new_work() {
        let calls = AtomicUsize::new(0);
        let items: Vec<u32> = (0..1000).collect();

        let err = bounded_map(&items, 2, |n| {
            calls.fetch_add(1, Ordering::SeqCst);
            if *n == 3 {
                Err(format!("item {n} failed"))
            } else {
                thread::sleep(Duration::from_millis(1));
                Ok(*n)
            }
        })
        .unwrap_err();

        assert_eq!(err, "item 3 failed");
        assert!(calls.load(Ordering::SeqCst) < items.len());
    }

    #[test]
    fn empty_input() {
        let items: Vec<u8> = Vec::new();
        let out: Vec<u8> = bounded_map(&items, 5, |n| Ok::<_, ()>(*n)).unwrap();
        assert!(out.is_empty());
    }
}
