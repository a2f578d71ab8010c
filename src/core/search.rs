use crate::core::cancel::CancellationToken;
use crate::core::reply::SearchReply;
use crate::error::Result;
use crate::models::{Card, Category, Track};
use crate::sources::{TrackQuery, TrackSource};

/// 트랙 하나를 검색 결과 카드로 변환한다.
/// 값은 검증이나 자르기 없이 그대로 기록한다.
pub fn track_to_card(track: &Track) -> Card {
    let mut card = Card::new();
    card.set_uri(&track.permalink_url);
    card.set_title(&track.title);
    card.set_art(track.art_url());
    card.set("duration", track.duration);
    card.set("username", track.user.username.as_str());
    card.set("label", track.label_name.as_str());
    card.set("description", track.description.as_str());
    card.set("stream-url", track.stream_url.as_str());
    card.set("purchase-url", track.purchase_url.as_str());
    card.set("video-url", track.video_url.as_str());
    card
}

/// 검색어로 트랙을 가져와 카드로 변환해 `reply`에 넘긴다.
///
/// 빈 검색어는 결과 없이 바로 끝난다. 가져오기에 실패하면 카테고리를
/// 등록하기 전에 에러를 반환한다. 카드를 넘기기 전마다 취소 여부를 확인하고,
/// 취소되었으면 에러 없이 중단한다.
pub fn search<S, R>(
    source: &S,
    query: &TrackQuery,
    reply: &mut R,
    cancelled: &CancellationToken,
) -> Result<()>
where
    S: TrackSource + ?Sized,
    R: SearchReply + ?Sized,
{
    if query.query.is_empty() {
        return Ok(());
    }

    let tracks = source.search_tracks(query)?;

    reply.register_category(Category::soundcloud());
    for track in &tracks {
        if cancelled.is_cancelled() {
            break;
        }
        reply.push(track_to_card(track))?;
    }
    Ok(())
}
