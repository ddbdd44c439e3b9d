
use crate::statistic::{Scope, Snapshot, Statistic};
use crate::word::Word;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Feed `words` to a fresh listener and return the value once every word has
/// been applied.
pub(crate) async fn apply_words<S: Statistic>(statistic: &Arc<S>, words: &[&str]) -> Snapshot {
    let feed = statistic
        .clone()
        .listen(Scope::new(CancellationToken::new()))
        .expect("listen");

    for w in words {
        feed.send(Word::normalize(w)).await.expect("send");
    }

    feed.release().await;
    statistic.retrieve()
}
