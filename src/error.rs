use thiserror::Error;

/// 스코프 검색/미리보기에서 발생하는 에러.
///
/// `Transport`, `Status`, `Decode`는 모두 "가져오기 실패"로 취급된다.
/// 호출자는 셋을 구분하지 않고 결과 없음으로 처리하면 된다.
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("SoundCloud 연결에 실패했습니다: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("SoundCloud 요청이 실패했습니다 ({status}): {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("SoundCloud 응답 파싱에 실패했습니다: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("결과에 '{0}' 속성이 없습니다")]
    MissingAttribute(String),

    #[error("결과의 '{key}' 속성 형식이 잘못되었습니다: {source}")]
    AttributeType {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("결과 전달에 실패했습니다: {0}")]
    Reply(String),
}

impl ScopeError {
    /// 네트워크/HTTP 상태/JSON 디코딩 실패인지 확인한다.
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            ScopeError::Transport(_) | ScopeError::Status { .. } | ScopeError::Decode(_)
        )
    }

    /// 미리보기에 필요한 속성이 없거나 형식이 맞지 않는 경우인지 확인한다.
    pub fn is_missing_attribute(&self) -> bool {
        matches!(
            self,
            ScopeError::MissingAttribute(_) | ScopeError::AttributeType { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ScopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_is_fetch() {
        let err = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        let err = ScopeError::from(err);
        assert!(err.is_fetch());
        assert!(!err.is_missing_attribute());
    }

    #[test]
    fn test_status_error_message() {
        let err = ScopeError::Status {
            status: reqwest::StatusCode::UNAUTHORIZED,
            message: "invalid client_id".to_string(),
        };
        assert!(err.is_fetch());
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("invalid client_id"));
    }

    #[test]
    fn test_missing_attribute_kind() {
        let err = ScopeError::MissingAttribute("stream-url".to_string());
        assert!(err.is_missing_attribute());
        assert!(!err.is_fetch());
        assert!(err.to_string().contains("stream-url"));
    }
}
