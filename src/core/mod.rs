pub mod cancel;
pub mod preview;
pub mod reply;
pub mod search;

#[cfg(test)]
pub mod testing;

use crate::config::SoundCloudConfig;
use crate::error::Result;
use crate::models::Card;
use crate::sources::{TrackQuery, TrackSource};

use self::cancel::CancellationToken;
use self::reply::{PreviewReply, SearchReply};

/// SoundCloud 검색/미리보기 스코프.
///
/// 설정은 생성 시 받아 이후 바꾸지 않으며, 호출 사이에 공유하는 상태가 없다.
pub struct SoundCloudScope<S> {
    config: SoundCloudConfig,
    source: S,
}

impl<S: TrackSource> SoundCloudScope<S> {
    pub fn new(config: SoundCloudConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 검색어로 인기순 트랙을 찾아 카드로 넘긴다.
    pub fn search<R>(&self, query: &str, reply: &mut R, cancelled: &CancellationToken) -> Result<()>
    where
        R: SearchReply + ?Sized,
    {
        self.search_with(&TrackQuery::hot(query), reply, cancelled)
    }

    /// 장르 필터 등 검색 조건을 직접 지정한다.
    pub fn search_with<R>(
        &self,
        query: &TrackQuery,
        reply: &mut R,
        cancelled: &CancellationToken,
    ) -> Result<()>
    where
        R: SearchReply + ?Sized,
    {
        search::search(&self.source, query, reply, cancelled)
    }

    /// 이전 검색에서 만든 카드로 미리보기 위젯을 넘긴다.
    /// 미리보기는 중간에 취소를 확인하지 않는다.
    pub fn preview<R>(&self, card: &Card, reply: &mut R, _cancelled: &CancellationToken) -> Result<()>
    where
        R: PreviewReply + ?Sized,
    {
        preview::preview(card, &self.config.client_id, reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reply::{PreviewResults, SearchResults};
    use crate::core::testing::{sample_track, FakeSource};
    use crate::models::WidgetKind;

    fn scope_with(tracks: Vec<crate::models::Track>) -> SoundCloudScope<FakeSource> {
        let config = SoundCloudConfig {
            client_id: "test-client".to_string(),
            ..Default::default()
        };
        SoundCloudScope::new(config, FakeSource::with_tracks(tracks))
    }

    #[test]
    fn test_search_then_preview() {
        let scope = scope_with((1..=3).map(sample_track).collect());
        let token = CancellationToken::new();

        let mut results = SearchResults::new();
        scope.search("lofi", &mut results, &token).unwrap();
        assert_eq!(results.cards.len(), 3);

        let query = scope.source().last_query().unwrap();
        assert_eq!(query.limit, 30);
        assert_eq!(query.order.as_deref(), Some("hotness"));

        // 호스트가 카드를 직렬화했다가 돌려주는 경우
        let json = serde_json::to_string(&results.cards[1]).unwrap();
        let card: Card = serde_json::from_str(&json).unwrap();

        let mut widgets = PreviewResults::new();
        scope.preview(&card, &mut widgets, &token).unwrap();
        assert_eq!(widgets.widgets.len(), 5);
        match &widgets.widgets[2].kind {
            WidgetKind::Audio { tracks } => {
                assert_eq!(
                    tracks[0].source,
                    "https://api.soundcloud.com/tracks/2/stream?client_id=test-client"
                );
            }
            other => panic!("audio 위젯이 아님: {:?}", other),
        }
    }

    #[test]
    fn test_empty_query() {
        let scope = scope_with(vec![sample_track(1)]);
        let mut results = SearchResults::new();
        scope
            .search("", &mut results, &CancellationToken::new())
            .unwrap();
        assert!(results.is_empty());
        assert_eq!(scope.source().calls(), 0);
    }

    #[test]
    fn test_search_with_genre() {
        let scope = scope_with(vec![sample_track(1)]);
        let query = TrackQuery::hot("lofi").with_genre(Some("jazz".to_string()));
        let mut results = SearchResults::new();
        scope
            .search_with(&query, &mut results, &CancellationToken::new())
            .unwrap();
        assert_eq!(
            scope.source().last_query().unwrap().genre.as_deref(),
            Some("jazz")
        );
    }
}
