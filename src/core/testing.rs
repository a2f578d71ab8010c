//! 테스트용 가짜 소스와 싱크.

use std::cell::{Cell, RefCell};

use crate::core::cancel::CancellationToken;
use crate::core::reply::{PreviewReply, SearchReply};
use crate::error::{Result, ScopeError};
use crate::models::{Card, Category, PreviewWidget, Track, User, WidgetKind};
use crate::sources::{TrackQuery, TrackSource};

pub fn sample_track(n: u64) -> Track {
    Track {
        id: n,
        kind: Some("track".to_string()),
        created_at: "2014/05/01 12:00:00 +0000".to_string(),
        user: User {
            id: 100 + n,
            username: format!("artist{}", n),
            uri: format!("https://api.soundcloud.com/users/{}", 100 + n),
            avatar_url: format!("https://i1.sndcdn.com/avatars-{}-large.jpg", n),
        },
        streamable: true,
        downloadable: false,
        permalink_url: format!("https://soundcloud.com/artist{}/track-{}", n, n),
        purchase_url: format!("https://shop.example.com/{}", n),
        artwork_url: format!("https://i1.sndcdn.com/artworks-{}-large.jpg", n),
        stream_url: format!("https://api.soundcloud.com/tracks/{}/stream", n),
        download_url: String::new(),
        video_url: String::new(),
        title: format!("Track {}", n),
        description: format!("Description {}", n),
        label_name: "Label".to_string(),
        duration: 185_999,
        license: "all-rights-reserved".to_string(),
    }
}

/// `key` 속성을 뺀 카드 사본. 호스트가 속성을 잃어버린 경우를 흉내 낸다.
pub fn without(card: &Card, key: &str) -> Card {
    let mut value = serde_json::to_value(card).unwrap();
    value.as_object_mut().unwrap().remove(key);
    serde_json::from_value(value).unwrap()
}

pub fn widget_type(widget: &PreviewWidget) -> &'static str {
    match widget.kind {
        WidgetKind::Header { .. } => "header",
        WidgetKind::Image { .. } => "image",
        WidgetKind::Audio { .. } => "audio",
        WidgetKind::Actions { .. } => "actions",
        WidgetKind::Text { .. } => "text",
    }
}

/// 미리 정해 둔 트랙을 돌려주거나 항상 실패하는 소스.
pub struct FakeSource {
    tracks: Option<Vec<Track>>,
    calls: Cell<usize>,
    last_query: RefCell<Option<TrackQuery>>,
}

impl FakeSource {
    pub fn with_tracks(tracks: Vec<Track>) -> Self {
        Self {
            tracks: Some(tracks),
            calls: Cell::new(0),
            last_query: RefCell::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            tracks: None,
            calls: Cell::new(0),
            last_query: RefCell::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn last_query(&self) -> Option<TrackQuery> {
        self.last_query.borrow().clone()
    }
}

impl TrackSource for FakeSource {
    fn name(&self) -> &str {
        "Fake"
    }

    fn search_tracks(&self, query: &TrackQuery) -> Result<Vec<Track>> {
        self.calls.set(self.calls.get() + 1);
        *self.last_query.borrow_mut() = Some(query.clone());
        match self.tracks {
            Some(ref tracks) => Ok(tracks.clone()),
            None => Err(ScopeError::Status {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                message: "Service Unavailable".to_string(),
            }),
        }
    }
}

/// 정해진 개수만 받고 그 다음부터 거부하는 싱크.
pub struct RejectingReply {
    limit: usize,
    pub accepted: usize,
}

impl RejectingReply {
    pub fn after(limit: usize) -> Self {
        Self { limit, accepted: 0 }
    }
}

impl SearchReply for RejectingReply {
    fn register_category(&mut self, _category: Category) {}

    fn push(&mut self, _card: Card) -> Result<()> {
        if self.accepted >= self.limit {
            return Err(ScopeError::Reply("search reply closed".to_string()));
        }
        self.accepted += 1;
        Ok(())
    }
}

impl PreviewReply for RejectingReply {
    fn push_widgets(&mut self, widgets: Vec<PreviewWidget>) -> Result<()> {
        if self.accepted + widgets.len() > self.limit {
            return Err(ScopeError::Reply("preview reply closed".to_string()));
        }
        self.accepted += widgets.len();
        Ok(())
    }
}

/// 카드를 정해진 개수만큼 받은 뒤 취소 신호를 올리는 싱크.
pub struct CancellingReply {
    token: CancellationToken,
    cancel_after: usize,
    pub cards: Vec<Card>,
}

impl CancellingReply {
    pub fn new(token: CancellationToken, cancel_after: usize) -> Self {
        Self {
            token,
            cancel_after,
            cards: Vec::new(),
        }
    }
}

impl SearchReply for CancellingReply {
    fn register_category(&mut self, _category: Category) {}

    fn push(&mut self, card: Card) -> Result<()> {
        self.cards.push(card);
        if self.cards.len() >= self.cancel_after {
            self.token.cancel();
        }
        Ok(())
    }
}
