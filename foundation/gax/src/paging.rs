use std::future::Future;

use futures_util::Stream;

use crate::error::Error;

/// A single page of a list response.
pub trait Paginated {
    type Item;

    /// Token of the following page. `None` or an empty string ends the listing.
    fn next_page_token(&self) -> Option<&str>;

    fn into_items(self) -> Vec<Self::Item>;
}

fn continuation(token: Option<&str>) -> Option<String> {
    match token {
        Some(t) if !t.is_empty() => Some(t.to_string()),
        _ => None,
    }
}

/// Fetches every page starting from `page_token` and concatenates the items.
pub async fn collect_all<P, F, A>(page_token: Option<String>, mut fetch: F) -> Result<Vec<P::Item>, Error>
where
    P: Paginated,
    F: FnMut(Option<String>) -> A,
    A: Future<Output = Result<P, Error>>,
{
    let mut page_token = page_token;
    let mut items = vec![];
    loop {
        let page = fetch(page_token).await?;
        page_token = continuation(page.next_page_token());
        items.extend(page.into_items());
        if page_token.is_none() {
            return Ok(items);
        }
    }
}

/// Lazily yields items page by page. The next page is requested only when the current one is drained.
pub fn stream<P, F, A>(page_token: Option<String>, mut fetch: F) -> impl Stream<Item = Result<P::Item, Error>>
where
    P: Paginated,
    F: FnMut(Option<String>) -> A,
    A: Future<Output = Result<P, Error>>,
{
    async_stream::try_stream! {
        let mut page_token = page_token;
        loop {
            let page = fetch(page_token).await?;
            page_token = continuation(page.next_page_token());
            for item in page.into_items() {
                yield item;
            }
            if page_token.is_none() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Mutex;

    use futures_util::{pin_mut, StreamExt};

    use crate::error::Error;
    use crate::paging::{collect_all, stream, Paginated};

    struct Page {
        items: Vec<i32>,
        next: Option<String>,
    }

    impl Paginated for Page {
        type Item = i32;

        fn next_page_token(&self) -> Option<&str> {
            self.next.as_deref()
        }

        fn into_items(self) -> Vec<i32> {
            self.items
        }
    }

    fn page(token: Option<String>) -> Result<Page, Error> {
        match token.as_deref() {
            None => Ok(Page {
                items: vec![1, 2],
                next: Some("p2".to_string()),
            }),
            Some("p2") => Ok(Page {
                items: vec![3],
                next: Some("p3".to_string()),
            }),
            Some("p3") => Ok(Page {
                items: vec![4, 5],
                next: Some("".to_string()),
            }),
            Some(other) => Err(Error::InvalidArgument(other.to_string())),
        }
    }

    #[tokio::test]
    async fn test_collect_all() {
        let requested = Mutex::new(vec![]);
        let items = collect_all(None, |token| {
            requested.lock().unwrap().push(token.clone());
            async move { page(token) }
        })
        .await
        .unwrap();
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert_eq!(requested.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_stream_is_lazy() {
        let requested = Mutex::new(0);
        let s = stream(None, |token| {
            *requested.lock().unwrap() += 1;
            async move { page(token) }
        });
        pin_mut!(s);
        assert_eq!(s.next().await.unwrap().unwrap(), 1);
        assert_eq!(s.next().await.unwrap().unwrap(), 2);
        assert_eq!(*requested.lock().unwrap(), 1);
        assert_eq!(s.next().await.unwrap().unwrap(), 3);
        assert_eq!(*requested.lock().unwrap(), 2);
        let rest: Vec<i32> = s.map(|v| v.unwrap()).collect().await;
        assert_eq!(rest, vec![4, 5]);
    }

    #[tokio::test]
    async fn test_stream_error() {
        let s = stream(Some("broken".to_string()), |token| async move { page(token) });
        pin_mut!(s);
        assert!(s.next().await.unwrap().is_err());
        assert!(s.next().await.is_none());
    }
}
