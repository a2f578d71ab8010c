use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{Cell, Table};
use dialoguer::Input;

use crate::config::{self, SoundCloudConfig};
use crate::core::cancel::CancellationToken;
use crate::core::reply::{JsonLinesReply, LimitedReply, PreviewResults, SearchReply, SearchResults};
use crate::core::SoundCloudScope;
use crate::models::Card;
use crate::sources::soundcloud::SoundCloudClient;
use crate::sources::{TrackQuery, TrackSource};

#[derive(Parser)]
#[command(name = "soundcloud-scope", about = "SoundCloud 트랙 검색/미리보기 스코프")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// SoundCloud에서 트랙 검색
    Search {
        /// 검색어
        query: String,
        /// 장르 필터
        #[arg(long)]
        genre: Option<String>,
        /// 이 개수만큼 받은 뒤 검색 중단
        #[arg(long)]
        max: Option<usize>,
        /// 결과 카드를 한 줄에 하나씩 JSON으로 출력
        #[arg(long)]
        json: bool,
    },
    /// 검색 결과 카드(JSON)의 미리보기 위젯 출력
    Preview {
        /// 카드 JSON 파일 (없으면 표준 입력)
        file: Option<PathBuf>,
    },
    /// SoundCloud API 설정
    Config,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Search {
            query,
            genre,
            max,
            json,
        }) => cmd_search(&query, genre, max, json),
        Some(Commands::Preview { file }) => cmd_preview(file),
        Some(Commands::Config) => cmd_config(),
        None => {
            println!("사용법: soundcloud-scope <명령어>");
            println!("자세한 정보는 soundcloud-scope --help를 실행하세요.");
            Ok(())
        }
    }
}

fn build_scope() -> Result<SoundCloudScope<SoundCloudClient>> {
    let cfg = config::load_config();
    let client = SoundCloudClient::new(cfg.soundcloud.clone())
        .context("HTTP 클라이언트 생성에 실패했습니다")?;
    Ok(SoundCloudScope::new(cfg.soundcloud, client))
}

/// 밀리초를 `m:ss` 형식으로 바꾼다.
fn format_duration(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn card_row(card: &Card) -> Vec<Cell> {
    let text = |key: &str| card.get::<String>(key).unwrap_or_default();
    let duration = card
        .get::<u64>("duration")
        .map(format_duration)
        .unwrap_or_else(|_| "-".to_string());

    vec![
        Cell::new(card.title().unwrap_or("-")),
        Cell::new(text("username")),
        Cell::new(duration),
        Cell::new(card.uri().unwrap_or("-")),
    ]
}

/// 장르가 없으면 기본 검색, 있으면 장르 필터를 붙여 검색한다.
/// `max`가 주어지면 그만큼 받은 뒤 취소 신호로 검색을 멈춘다.
fn run_search<S, R>(
    scope: &SoundCloudScope<S>,
    query: &str,
    genre: Option<String>,
    max: Option<usize>,
    reply: &mut R,
) -> Result<()>
where
    S: TrackSource,
    R: SearchReply,
{
    let cancelled = CancellationToken::new();
    let mut limited;
    let reply: &mut dyn SearchReply = match max {
        Some(max) => {
            limited = LimitedReply::new(reply, max, cancelled.clone());
            &mut limited
        }
        None => reply,
    };

    let outcome = match genre.filter(|g| !g.is_empty()) {
        Some(genre) => {
            let query = TrackQuery::hot(query).with_genre(Some(genre));
            scope.search_with(&query, reply, &cancelled)
        }
        None => scope.search(query, reply, &cancelled),
    };
    outcome.context("SoundCloud 검색에 실패했습니다")
}

fn cmd_search(query: &str, genre: Option<String>, max: Option<usize>, json: bool) -> Result<()> {
    let scope = build_scope()?;

    if json {
        let mut reply = JsonLinesReply::new(std::io::stdout().lock());
        return run_search(&scope, query, genre, max, &mut reply);
    }

    let mut results = SearchResults::new();
    run_search(&scope, query, genre, max, &mut results)?;

    if results.is_empty() {
        println!("검색 결과가 없습니다.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["제목", "아티스트", "길이", "URL"]);
    for card in &results.cards {
        table.add_row(card_row(card));
    }

    println!("{table}");
    println!("\n{}: 총 {}개 트랙", scope.source().name(), results.cards.len());
    Ok(())
}

fn read_card(file: Option<PathBuf>) -> Result<Card> {
    let content = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("파일을 읽을 수 없습니다: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("표준 입력을 읽을 수 없습니다")?;
            buf
        }
    };
    serde_json::from_str(content.trim()).context("카드 JSON 파싱에 실패했습니다")
}

fn cmd_preview(file: Option<PathBuf>) -> Result<()> {
    let scope = build_scope()?;
    let card = read_card(file)?;

    let mut results = PreviewResults::new();
    if let Err(e) = scope.preview(&card, &mut results, &CancellationToken::new()) {
        if e.is_missing_attribute() {
            anyhow::bail!("검색 결과 카드가 아닙니다 ({}). 'search --json' 출력을 사용하세요.", e);
        }
        return Err(e).context("미리보기를 만들 수 없습니다");
    }

    println!("{}", serde_json::to_string_pretty(&results.widgets)?);
    Ok(())
}

fn cmd_config() -> Result<()> {
    let mut cfg = config::load_stored_config();

    println!("SoundCloud API 설정");
    println!("(client_id는 https://soundcloud.com/you/apps 에서 발급받으세요)\n");

    let client_id: String = Input::new()
        .with_prompt("Client ID")
        .with_initial_text(cfg.soundcloud.client_id.clone())
        .interact_text()?;

    let base_uri: String = Input::new()
        .with_prompt("API 주소")
        .with_initial_text(cfg.soundcloud.base_uri.clone())
        .interact_text()?;

    cfg.soundcloud = SoundCloudConfig {
        client_id,
        base_uri,
        ..cfg.soundcloud
    };

    config::save_config(&cfg)?;
    println!("\n설정이 저장되었습니다!");
    Ok(())
}
