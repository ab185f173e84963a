use crate::twitter::traits::TwitterRead;
use futures::future::join_all;
use inkling_common::Fetched;

/// Everything after the last `/`. No URL normalization: a trailing query
/// string stays part of the id and a trailing slash yields an empty id.
pub fn post_id_from_url(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Text of the post behind `url`.
///
/// Never errors: a failed lookup becomes [`Fetched::Failed`] and is logged.
pub async fn fetch_post_text(api: &dyn TwitterRead, url: &str) -> Fetched<String> {
    let post_id = post_id_from_url(url);
    if post_id.is_empty() {
        tracing::warn!(%url, "post url has no trailing id");
        return Fetched::Failed(format!("no post id in {url}"));
    }

    match api.status(post_id).await {
        Ok(status) if status.body().is_empty() => Fetched::Absent,
        Ok(status) => Fetched::Found(status.body().to_string()),
        Err(e) => {
            tracing::warn!(%url, %post_id, error = %e, "post text unavailable");
            Fetched::Failed(e.to_string())
        }
    }
}

/// Fetch every url concurrently; output position matches input position.
pub async fn fetch_post_texts(api: &dyn TwitterRead, urls: &[String]) -> Vec<Fetched<String>> {
    let outcomes = join_all(urls.iter().map(|url| fetch_post_text(api, url))).await;
    let failed = outcomes.iter().filter(|o| o.is_failed()).count();
    tracing::info!(total = urls.len(), failed, "post texts fetched");
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_last_path_segment() {
        assert_eq!(
            post_id_from_url("https://twitter.com/alice/status/123456"),
            "123456"
        );
        assert_eq!(
            post_id_from_url("https://twitter.com/alice/status/9?s=20"),
            "9?s=20"
        );
        assert_eq!(post_id_from_url("https://twitter.com/alice/status/9/"), "");
        assert_eq!(post_id_from_url("123"), "123");
    }
}
