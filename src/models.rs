use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::error::{Result, ScopeError};

/// API 응답에서 `null`인 값을 기본값으로 바꾼다.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// SoundCloud 사용자 정보 (트랙 안에 포함됨).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "nullable")]
    pub id: u64,
    #[serde(deserialize_with = "nullable")]
    pub username: String,
    #[serde(deserialize_with = "nullable")]
    pub uri: String,
    #[serde(deserialize_with = "nullable")]
    pub avatar_url: String,
}

/// SoundCloud `/tracks` 응답의 트랙 하나.
/// 없는 값은 빈 문자열/0/false로 채워진다.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Track {
    #[serde(deserialize_with = "nullable")]
    pub id: u64,
    #[serde(deserialize_with = "nullable")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub created_at: String,
    #[serde(deserialize_with = "nullable")]
    pub user: User,
    #[serde(deserialize_with = "nullable")]
    pub streamable: bool,
    #[serde(deserialize_with = "nullable")]
    pub downloadable: bool,

    #[serde(deserialize_with = "nullable")]
    pub permalink_url: String,
    #[serde(deserialize_with = "nullable")]
    pub purchase_url: String,
    #[serde(deserialize_with = "nullable")]
    pub artwork_url: String,
    #[serde(deserialize_with = "nullable")]
    pub stream_url: String,
    #[serde(deserialize_with = "nullable")]
    pub download_url: String,
    #[serde(deserialize_with = "nullable")]
    pub video_url: String,

    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub label_name: String,
    /// 재생 시간 (밀리초)
    #[serde(deserialize_with = "nullable")]
    pub duration: u64,
    #[serde(deserialize_with = "nullable")]
    pub license: String,
}

impl Track {
    /// 앨범 아트가 없으면 업로더의 아바타를 사용한다.
    pub fn art_url(&self) -> &str {
        if self.artwork_url.is_empty() {
            &self.user.avatar_url
        } else {
            &self.artwork_url
        }
    }

    /// `kind`가 없거나 "track"이면 트랙으로 본다.
    pub fn is_track(&self) -> bool {
        self.kind.as_deref().map_or(true, |k| k == "track")
    }
}

/// 검색 결과 카드.
///
/// 호스트가 그대로 직렬화했다가 미리보기 때 돌려주므로,
/// 여기 기록된 속성 키와 타입이 검색과 미리보기 사이의 계약이 된다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card {
    attributes: BTreeMap<String, Value>,
}

impl Card {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.attributes.insert(key.to_string(), value.into());
    }

    /// 속성을 읽어 지정한 타입으로 변환한다.
    /// 속성이 없거나 타입이 다르면 에러.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .attributes
            .get(key)
            .ok_or_else(|| ScopeError::MissingAttribute(key.to_string()))?;
        serde_json::from_value(value.clone()).map_err(|source| ScopeError::AttributeType {
            key: key.to_string(),
            source,
        })
    }

    fn str_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    pub fn uri(&self) -> Option<&str> {
        self.str_attr("uri")
    }

    pub fn title(&self) -> Option<&str> {
        self.str_attr("title")
    }

    pub fn set_uri(&mut self, uri: &str) {
        self.set("uri", uri);
    }

    pub fn set_title(&mut self, title: &str) {
        self.set("title", title);
    }

    pub fn set_art(&mut self, art: &str) {
        self.set("art", art);
    }
}

/// 검색 결과를 묶는 카테고리와 렌더링 템플릿.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub renderer_template: Value,
}

impl Category {
    /// SoundCloud 검색 결과 카테고리 (그리드, 작은 카드).
    pub fn soundcloud() -> Self {
        Self {
            id: "soundcloud".to_string(),
            title: "SoundCloud".to_string(),
            icon: String::new(),
            renderer_template: json!({
                "schema-version": 1,
                "template": {
                    "category-layout": "grid",
                    "card-size": "small"
                },
                "components": {
                    "title": "title",
                    "art": "art",
                    "subtitle": "username"
                }
            }),
        }
    }
}

/// 위젯 필드 → 카드 속성 매핑.
pub type Components = BTreeMap<String, String>;

/// 미리보기 화면을 구성하는 위젯 하나.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewWidget {
    pub id: String,
    #[serde(flatten)]
    pub kind: WidgetKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WidgetKind {
    Header { components: Components },
    Image { components: Components },
    Audio { tracks: Vec<AudioTrack> },
    Actions { actions: Vec<Action> },
    Text { components: Components },
}

impl PreviewWidget {
    pub fn new(id: &str, kind: WidgetKind) -> Self {
        Self {
            id: id.to_string(),
            kind,
        }
    }
}

/// 오디오 위젯의 재생 항목. `length`는 초 단위.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioTrack {
    pub title: String,
    pub length: u64,
    pub source: String,
}

/// 미리보기 버튼 하나.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}
