use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn renders_once_until_invalidated() {
    let cache = PenCache::<u32>::new();
    let calls = AtomicUsize::new(0);
    let render = || {
        calls.fetch_add(1, Ordering::SeqCst);
        vec![vec![1, 2], vec![3]]
    };

    let a = cache.get_or_render(0, 1, render);
    let b = cache.get_or_render(0, 1, render);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(0, 1).as_deref(), Some(&vec![vec![1, 2], vec![3]]));

    assert!(cache.invalidate(0, 1));
    assert!(!cache.invalidate(0, 1));
    assert!(cache.get(0, 1).is_none());
    cache.get_or_render(0, 1, render);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn keys_are_track_and_group() {
    let cache = PenCache::<u32>::new();
    cache.get_or_render(0, 0, || vec![vec![1]]);
    cache.get_or_render(1, 0, || vec![vec![2]]);
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get(1, 0).unwrap()[0][0], 2);
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn concurrent_population_is_at_most_once() {
    let cache = PenCache::<u32>::new();
    let calls = AtomicUsize::new(0);
    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                cache.get_or_render(3, 4, || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    std::thread::sleep(std::time::Duration::from_millis(5));
                    vec![vec![7]]
                });
            });
        }
    });
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.get(3, 4).unwrap()[0], vec![7]);
}
