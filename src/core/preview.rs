use crate::core::reply::PreviewReply;
use crate::error::Result;
use crate::models::{Action, AudioTrack, Card, Components, PreviewWidget, WidgetKind};

pub const PROVIDER_ICON: &str =
    "/usr/share/icons/unity-icon-theme/places/svg/service-soundcloud.svg";

fn components(pairs: &[(&str, &str)]) -> Components {
    pairs
        .iter()
        .map(|(field, attr)| (field.to_string(), attr.to_string()))
        .collect()
}

/// 선택 속성을 읽는다. 없거나 비어 있거나 형식이 다르면 None.
fn optional_url(card: &Card, key: &str) -> Option<String> {
    card.get::<String>(key).ok().filter(|url| !url.is_empty())
}

/// 재생/구매/영상 버튼 목록. 재생은 항상 첫 번째.
pub fn build_actions(purchase_url: Option<String>, video_url: Option<String>) -> Vec<Action> {
    let mut actions = vec![Action {
        id: "play".to_string(),
        label: "Play".to_string(),
        icon: Some(PROVIDER_ICON.to_string()),
        uri: None,
    }];
    if let Some(uri) = purchase_url {
        actions.push(Action {
            id: "buy".to_string(),
            label: "Buy".to_string(),
            icon: None,
            uri: Some(uri),
        });
    }
    if let Some(uri) = video_url {
        actions.push(Action {
            id: "video".to_string(),
            label: "Watch video".to_string(),
            icon: None,
            uri: Some(uri),
        });
    }
    actions
}

/// 카드에서 미리보기 위젯 다섯 개를 만든다.
///
/// `title`, `duration`, `stream-url` 중 하나라도 없거나 형식이 다르면 에러.
pub fn build_widgets(card: &Card, client_id: &str) -> Result<Vec<PreviewWidget>> {
    let title: String = card.get("title")?;
    let duration: u64 = card.get("duration")?;
    let stream_url: String = card.get("stream-url")?;

    let header = PreviewWidget::new(
        "header",
        WidgetKind::Header {
            components: components(&[("title", "title"), ("subtitle", "username")]),
        },
    );

    let art = PreviewWidget::new(
        "art",
        WidgetKind::Image {
            components: components(&[("source", "art")]),
        },
    );

    let tracks = PreviewWidget::new(
        "tracks",
        WidgetKind::Audio {
            tracks: vec![AudioTrack {
                title,
                length: duration / 1000,
                source: format!("{}?client_id={}", stream_url, client_id),
            }],
        },
    );

    let actions = PreviewWidget::new(
        "actions",
        WidgetKind::Actions {
            actions: build_actions(
                optional_url(card, "purchase-url"),
                optional_url(card, "video-url"),
            ),
        },
    );

    let description = PreviewWidget::new(
        "description",
        WidgetKind::Text {
            components: components(&[("text", "description")]),
        },
    );

    Ok(vec![header, art, tracks, actions, description])
}

/// 미리보기 위젯을 만들어 `reply`에 한 번에 넘긴다.
/// 필수 속성을 읽지 못하면 아무것도 넘기지 않는다.
pub fn preview<R>(card: &Card, client_id: &str, reply: &mut R) -> Result<()>
where
    R: PreviewReply + ?Sized,
{
    let widgets = build_widgets(card, client_id)?;
    reply.push_widgets(widgets)
}
