use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::form_urlencoded;

use crate::config::SoundCloudConfig;
use crate::error::{Result, ScopeError};
use crate::models::Track;
use crate::sources::{TrackQuery, TrackSource};

/// SoundCloud 공개 REST API 클라이언트.
/// 인증 없이 고정된 client_id만 쿼리에 붙여 요청한다.
pub struct SoundCloudClient {
    client: reqwest::blocking::Client,
    config: SoundCloudConfig,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorItem>,
}

#[derive(Deserialize)]
struct ErrorItem {
    error_message: Option<String>,
}

/// 리소스 경로와 파라미터로 요청 URL을 만든다.
///
/// `client_id`는 항상 들어가며 다른 파라미터로 덮어쓸 수 없다.
/// 파라미터는 키 순으로 정렬되어 같은 입력이면 항상 같은 URL이 나온다.
pub fn build_url(
    config: &SoundCloudConfig,
    resource: &str,
    params: &BTreeMap<String, String>,
) -> String {
    let mut pairs: BTreeMap<&str, &str> = params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    pairs.insert("client_id", &config.client_id);

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();

    let separator = if resource.starts_with('/') { "" } else { "/" };
    format!(
        "{}{}{}.json?{}",
        config.base_uri.trim_end_matches('/'),
        separator,
        resource,
        query
    )
}

/// 실패 응답 본문에서 에러 메시지를 꺼낸다. 없으면 상태 코드 설명을 쓴다.
fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    let from_body = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|resp| {
            resp.error.or_else(|| {
                resp.errors
                    .into_iter()
                    .find_map(|item| item.error_message)
            })
        })
        .filter(|msg| !msg.is_empty());

    from_body.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    })
}

impl SoundCloudClient {
    pub fn new(config: SoundCloudConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    pub fn build_url(&self, resource: &str, params: &BTreeMap<String, String>) -> String {
        build_url(&self.config, resource, params)
    }

    /// GET 요청 하나를 보내고 JSON 본문을 `T`로 디코딩한다.
    /// 재시도나 별도 타임아웃은 없다.
    pub fn get<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<T> {
        let url = self.build_url(resource, params);
        log::debug!("GET {}", url);

        let resp = self.client.get(&url).send()?;
        let status = resp.status();
        let body = resp.text()?;

        if !status.is_success() {
            return Err(ScopeError::Status {
                status,
                message: error_message(&body, status),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl TrackSource for SoundCloudClient {
    fn name(&self) -> &str {
        "SoundCloud"
    }

    fn search_tracks(&self, query: &TrackQuery) -> Result<Vec<Track>> {
        let tracks: Vec<Track> = self.get("/tracks", &query.params())?;
        Ok(tracks.into_iter().filter(Track::is_track).collect())
    }
}
