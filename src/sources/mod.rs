pub mod soundcloud;

use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::Track;

/// 스코프 검색 한 번에 가져오는 최대 트랙 수.
pub const SEARCH_LIMIT: u32 = 30;

/// 트랙 검색 조건.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackQuery {
    pub query: String,
    pub limit: u32,
    pub order: Option<String>,
    pub genre: Option<String>,
}

impl TrackQuery {
    /// 인기순(hotness)으로 최대 30개를 가져오는 기본 검색.
    pub fn hot(query: &str) -> Self {
        Self {
            query: query.to_string(),
            limit: SEARCH_LIMIT,
            order: Some("hotness".to_string()),
            genre: None,
        }
    }

    pub fn with_genre(mut self, genre: Option<String>) -> Self {
        self.genre = genre.filter(|g| !g.is_empty());
        self
    }

    /// API 쿼리 파라미터로 변환한다.
    pub fn params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("q".to_string(), self.query.clone());
        params.insert("limit".to_string(), self.limit.to_string());
        if let Some(ref order) = self.order {
            params.insert("order".to_string(), order.clone());
        }
        if let Some(ref genre) = self.genre {
            params.insert("genres".to_string(), genre.clone());
        }
        params
    }
}

/// 트랙 검색 소스 트레이트.
/// 스코프는 이 트레이트만 알고, HTTP/JSON 처리는 구현체가 맡는다.
pub trait TrackSource {
    fn name(&self) -> &str;
    /// 조건에 맞는 트랙을 API 응답 순서대로 반환한다.
    fn search_tracks(&self, query: &TrackQuery) -> Result<Vec<Track>>;
}
