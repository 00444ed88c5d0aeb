//! Paginated object-key listing
//!
//! The storage backend is abstracted behind [`ObjectLister`], a single-method
//! trait for "list one page of keys". Any conforming implementation works,
//! which keeps tests free of real network calls.

use crate::error::Result;
use crate::progress::ProgressObserver;

/// One page of results from a paginated listing request
///
/// `next_token` carries the backend's continuation token when more results
/// exist; `None` means the listing is exhausted.
#[derive(Debug, Clone, Default)]
pub struct ObjectPage {
    /// Object keys in the order the backend returned them
    pub keys: Vec<String>,

    /// Continuation token for the next request, if any
    pub next_token: Option<String>,
}

/// Trait for storage backends that list object keys page by page
///
/// Exactly one capability: fetch a single page of keys for a bucket and
/// prefix, optionally resuming from a continuation token. Pagination policy
/// lives in [`list_keys`], not in implementations.
pub trait ObjectLister {
    /// Fetch one page of object keys
    ///
    /// The first request of a listing passes `continuation_token = None`;
    /// follow-up requests pass the token from the previous page.
    fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<&str>,
    ) -> impl std::future::Future<Output = Result<ObjectPage>> + Send;
}

/// Fetch every object key under a prefix, following pagination to exhaustion
///
/// Keys are accumulated in the order each page returns them. An empty prefix
/// lists the whole bucket. An empty result is valid, not an error.
///
/// The observer is told the cumulative key count after each page; it never
/// affects the result. Backend errors propagate unchanged, with no retry.
///
/// # Example
///
/// ```no_run
/// use dupescan::cloud::S3Lister;
/// use dupescan::lister::list_keys;
/// use dupescan::progress::NoProgress;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let lister = S3Lister::builder().region("us-east-1").build().await?;
///     let keys = list_keys("backup/", &lister, "my-bucket", &NoProgress).await?;
///     println!("{} objects under backup/", keys.len());
///     Ok(())
/// }
/// ```
pub async fn list_keys<L: ObjectLister>(
    prefix: &str,
    lister: &L,
    bucket: &str,
    progress: &dyn ProgressObserver,
) -> Result<Vec<String>> {
    let mut keys = Vec::new();
    let mut continuation_token: Option<String> = None;

    loop {
        let page = lister
            .list_page(bucket, prefix, continuation_token.as_deref())
            .await?;

        keys.extend(page.keys);
        progress.objects_fetched(keys.len());

        continuation_token = page.next_token;
        if continuation_token.is_none() {
            break;
        }
    }

    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoProgress;
    use std::sync::Mutex;

    /// Serves a fixed script of pages, checking that each request carries
    /// the token the previous page handed out.
    struct ScriptedLister {
        pages: Vec<ObjectPage>,
        cursor: Mutex<usize>,
    }

    impl ScriptedLister {
        fn new(pages: Vec<ObjectPage>) -> Self {
            Self {
                pages,
                cursor: Mutex::new(0),
            }
        }
    }

    impl ObjectLister for ScriptedLister {
        fn list_page(
            &self,
            _bucket: &str,
            _prefix: &str,
            continuation_token: Option<&str>,
        ) -> impl std::future::Future<Output = Result<ObjectPage>> + Send {
            let page = {
                let mut cursor = self.cursor.lock().unwrap();
                let index = *cursor;
                *cursor += 1;

                let expected = if index == 0 {
                    None
                } else {
                    self.pages[index - 1].next_token.as_deref()
                };
                assert_eq!(continuation_token, expected);

                self.pages[index].clone()
            };
            async move { Ok(page) }
        }
    }

    fn page(keys: &[&str], next_token: Option<&str>) -> ObjectPage {
        ObjectPage {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            next_token: next_token.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn collects_keys_across_pages_in_order() {
        let lister = ScriptedLister::new(vec![
            page(&["a/1.txt", "a/2.txt"], Some("t1")),
            page(&["b/3.txt"], Some("t2")),
            page(&["c/4.txt", "c/5.txt"], None),
        ]);

        let keys = list_keys("", &lister, "bucket", &NoProgress).await.unwrap();
        assert_eq!(keys, vec!["a/1.txt", "a/2.txt", "b/3.txt", "c/4.txt", "c/5.txt"]);
    }

    #[tokio::test]
    async fn terminates_on_single_page() {
        let lister = ScriptedLister::new(vec![page(&["only.txt"], None)]);

        let keys = list_keys("", &lister, "bucket", &NoProgress).await.unwrap();
        assert_eq!(keys, vec!["only.txt"]);
        assert_eq!(*lister.cursor.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn empty_listing_is_not_an_error() {
        let lister = ScriptedLister::new(vec![page(&[], None)]);

        let keys = list_keys("nothing/here", &lister, "bucket", &NoProgress)
            .await
            .unwrap();
        assert!(keys.is_empty());
    }

    #[tokio::test]
    async fn reports_cumulative_counts_per_page() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        struct CountingProgress {
            last: AtomicUsize,
            calls: AtomicUsize,
        }

        impl ProgressObserver for CountingProgress {
            fn objects_fetched(&self, total: usize) {
                self.last.store(total, Ordering::SeqCst);
                self.calls.fetch_add(1, Ordering::SeqCst);
            }
        }

        let lister = ScriptedLister::new(vec![
            page(&["x", "y"], Some("t1")),
            page(&["z"], None),
        ]);
        let progress = CountingProgress {
            last: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        };

        list_keys("", &lister, "bucket", &progress).await.unwrap();
        assert_eq!(progress.calls.load(Ordering::SeqCst), 2);
        assert_eq!(progress.last.load(Ordering::SeqCst), 3);
    }
}
