use std::io::Write;

use crate::core::cancel::CancellationToken;
use crate::error::{Result, ScopeError};
use crate::models::{Card, Category, PreviewWidget};

/// 검색 결과를 받는 호스트 측 싱크.
pub trait SearchReply {
    fn register_category(&mut self, category: Category);
    /// 카드 하나를 넘긴다. 호스트가 더 받을 수 없으면 에러.
    fn push(&mut self, card: Card) -> Result<()>;
}

/// 미리보기 위젯을 받는 호스트 측 싱크.
pub trait PreviewReply {
    fn push_widgets(&mut self, widgets: Vec<PreviewWidget>) -> Result<()>;
}

/// 넘겨받은 카테고리와 카드를 그대로 모아 두는 싱크.
#[derive(Debug, Default)]
pub struct SearchResults {
    pub category: Option<Category>,
    pub cards: Vec<Card>,
}

impl SearchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl SearchReply for SearchResults {
    fn register_category(&mut self, category: Category) {
        self.category = Some(category);
    }

    fn push(&mut self, card: Card) -> Result<()> {
        self.cards.push(card);
        Ok(())
    }
}

/// 카드를 받는 즉시 한 줄짜리 JSON으로 쓰는 싱크.
/// 쓰기에 실패하면 (예: 닫힌 파이프) 검색을 중단시킨다.
pub struct JsonLinesReply<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesReply<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SearchReply for JsonLinesReply<W> {
    fn register_category(&mut self, _category: Category) {}

    fn push(&mut self, card: Card) -> Result<()> {
        let line = serde_json::to_string(&card).map_err(|e| ScopeError::Reply(e.to_string()))?;
        writeln!(self.out, "{}", line)
            .and_then(|_| self.out.flush())
            .map_err(|e| ScopeError::Reply(e.to_string()))
    }
}

/// 다른 싱크를 감싸 `max`개를 넘긴 뒤 취소 신호를 올린다.
pub struct LimitedReply<'a, R: ?Sized> {
    inner: &'a mut R,
    remaining: usize,
    cancel: CancellationToken,
}

impl<'a, R: SearchReply + ?Sized> LimitedReply<'a, R> {
    pub fn new(inner: &'a mut R, max: usize, cancel: CancellationToken) -> Self {
        if max == 0 {
            cancel.cancel();
        }
        Self {
            inner,
            remaining: max,
            cancel,
        }
    }
}

impl<R: SearchReply + ?Sized> SearchReply for LimitedReply<'_, R> {
    fn register_category(&mut self, category: Category) {
        self.inner.register_category(category);
    }

    fn push(&mut self, card: Card) -> Result<()> {
        self.inner.push(card)?;
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.cancel.cancel();
        }
        Ok(())
    }
}

/// 넘겨받은 위젯을 순서대로 모아 두는 싱크.
#[derive(Debug, Default)]
pub struct PreviewResults {
    pub widgets: Vec<PreviewWidget>,
}

impl PreviewResults {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreviewReply for PreviewResults {
    fn push_widgets(&mut self, widgets: Vec<PreviewWidget>) -> Result<()> {
        self.widgets.extend(widgets);
        Ok(())
    }
}
