//! Static report page. Pure formatting: the same report and copy always give
//! the same document.

use super::history::HistoryRow;
use crate::domain::model::{CatchRecord, Recommendation, Report, SpotReport, TideSnapshot};
use crate::utils::error::{CatchError, Result};
use std::fmt::Write;

/// Literal strings the page shows around the data.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCopy {
    pub title: String,
    pub footer: String,
    pub data_credit: String,
}

const STYLE: &str = r#"
body { font-family: -apple-system, "Hiragino Sans", "Noto Sans JP", sans-serif; margin: 0; background: #eef4f8; color: #1d2b36; }
header { background: #0b4f6c; color: #fff; padding: 16px 20px; }
header h1 { margin: 0 0 4px; font-size: 1.5em; }
main { max-width: 960px; margin: 0 auto; padding: 12px; }
section { background: #fff; border-radius: 8px; padding: 12px 16px; margin: 12px 0; }
.tides { display: flex; flex-wrap: wrap; gap: 12px; }
.tide { flex: 1 1 260px; border: 1px solid #cfe0ea; border-radius: 6px; padding: 8px 12px; }
.pick { border-left: 4px solid #f29e4c; padding: 4px 12px; margin: 8px 0; }
.confidence { float: right; font-weight: bold; color: #b35c00; }
table { width: 100%; border-collapse: collapse; font-size: 0.9em; }
th, td { border-bottom: 1px solid #e3ebf0; padding: 4px; text-align: left; }
.seasonal { color: #6b7f8c; }
.live { background: #0b4f6c; color: #fff; border-radius: 4px; padding: 0 6px; font-size: 0.8em; }
footer { text-align: center; font-size: 0.8em; color: #6b7f8c; padding: 16px; }
"#;

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn join_times<T: ToString>(times: &[T]) -> String {
    if times.is_empty() {
        return "-".to_string();
    }
    times.iter().map(ToString::to_string).collect::<Vec<_>>().join(" / ")
}

fn tide_box(out: &mut String, heading: &str, snap: &TideSnapshot) -> std::fmt::Result {
    writeln!(out, r#"<div class="tide">"#)?;
    writeln!(out, "<h3>{} {}</h3>", escape(heading), escape(&snap.date_label))?;
    writeln!(
        out,
        "<p>{} {} (月齢 {:.1}) ・ <strong>{}</strong></p>",
        snap.moon_phase.glyph(),
        snap.moon_phase.name(),
        snap.lunar_age,
        snap.tide_type
    )?;
    writeln!(out, "<p>満潮 {}<br>干潮 {}</p>", join_times(&snap.high_tides), join_times(&snap.low_tides))?;
    writeln!(out, "<p>日の出 {} ・ 日の入 {}</p>", snap.sunrise, snap.sunset)?;
    writeln!(out, "<p>朝まずめ {}<br>夕まずめ {}</p>", snap.dawn, snap.dusk)?;
    writeln!(out, "</div>")
}

fn picks(out: &mut String, recommendations: &[Recommendation]) -> std::fmt::Result {
    if recommendations.is_empty() {
        return writeln!(out, "<p>おすすめできる釣り場がありません</p>");
    }
    for pick in recommendations {
        writeln!(out, r#"<div class="pick">"#)?;
        writeln!(out, r#"<span class="confidence">{}%</span>"#, pick.confidence)?;
        writeln!(
            out,
            "<h3>{}. {} <small>{}</small></h3>",
            pick.rank,
            escape(&pick.location_id),
            escape(&pick.area)
        )?;
        writeln!(
            out,
            "<p>{} {} ・ {} ・ {}</p>",
            escape(&pick.icon),
            escape(&pick.species),
            escape(&pick.size_hint),
            escape(&pick.count_hint)
        )?;
        writeln!(out, "<p>{} ({})</p>", escape(&pick.best_time), pick.tide_type)?;
        writeln!(out, "<p>{}</p>", escape(&pick.description))?;
        writeln!(out, "</div>")?;
    }
    Ok(())
}

fn catch_row(out: &mut String, catch: &CatchRecord) -> std::fmt::Result {
    let class = if catch.is_seasonal() { r#" class="seasonal""# } else { "" };
    writeln!(
        out,
        "<tr{}><td>{} {}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        class,
        escape(&catch.icon),
        escape(&catch.species),
        escape(&catch.size_description),
        escape(&catch.count.to_string()),
        escape(&catch.method),
        escape(&catch.timestamp),
        escape(&catch.reporter_label)
    )
}

fn spot(out: &mut String, spot: &SpotReport) -> std::fmt::Result {
    writeln!(out, "<section>")?;
    write!(
        out,
        "<h3>{} <small>{} ・ {:.1}km</small>",
        escape(&spot.id),
        escape(&spot.area),
        spot.distance_km
    )?;
    if spot.live_count > 0 {
        write!(out, r#" <span class="live">最新 {}件</span>"#, spot.live_count)?;
    }
    writeln!(out, "</h3>")?;
    if !spot.info.is_empty() {
        writeln!(out, "<p>{}</p>", escape(&spot.info))?;
    }

    if spot.catches.is_empty() {
        writeln!(out, "<p>釣果情報なし</p>")?;
    } else {
        writeln!(
            out,
            "<table><tr><th>魚種</th><th>サイズ</th><th>数</th><th>釣り方</th><th>日時</th><th>報告</th></tr>"
        )?;
        for catch in &spot.catches {
            catch_row(out, catch)?;
        }
        writeln!(out, "</table>")?;
    }
    writeln!(out, "</section>")
}

fn history(out: &mut String, rows: &[HistoryRow]) -> std::fmt::Result {
    writeln!(out, "<section>\n<h2>📜 最近の釣果</h2>")?;
    writeln!(
        out,
        "<table><tr><th>日時</th><th>釣り場</th><th>魚種</th><th>サイズ</th><th>数</th></tr>"
    )?;
    for row in rows {
        writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&row.timestamp),
            escape(&row.location),
            escape(&row.species),
            escape(&row.size),
            escape(&row.count)
        )?;
    }
    writeln!(out, "</table>\n</section>")
}

fn document(report: &Report, copy: &PageCopy, recent: &[HistoryRow]) -> std::result::Result<String, std::fmt::Error> {
    let mut out = String::with_capacity(32 * 1024);

    writeln!(out, "<!DOCTYPE html>\n<html lang=\"ja\">\n<head>")?;
    writeln!(out, r#"<meta charset="UTF-8">"#)?;
    writeln!(out, r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#)?;
    writeln!(out, "<title>{}</title>", escape(&copy.title))?;
    writeln!(out, "<style>{}</style>\n</head>\n<body>", STYLE)?;

    writeln!(out, "<header>\n<h1>{}</h1>", escape(&copy.title))?;
    writeln!(
        out,
        "<p>{} ・ 最終更新 {}</p>\n</header>\n<main>",
        escape(&report.date_label),
        escape(&report.last_updated)
    )?;

    writeln!(out, "<section>\n<h2>🌊 潮汐</h2>\n<div class=\"tides\">")?;
    tide_box(&mut out, "今日", &report.today)?;
    tide_box(&mut out, "明日", &report.tomorrow)?;
    writeln!(out, "</div>\n</section>")?;

    writeln!(out, "<section>\n<h2>⭐ 明日のおすすめ</h2>")?;
    picks(&mut out, &report.recommendations)?;
    writeln!(out, "</section>")?;

    writeln!(out, "<section>\n<h2>📅 週末 {}</h2>", escape(&report.weekend.label))?;
    writeln!(out, "<div class=\"tides\">")?;
    tide_box(&mut out, "土曜", &report.weekend.saturday)?;
    writeln!(out, "</div>")?;
    picks(&mut out, &report.weekend.picks)?;
    writeln!(out, "</section>")?;

    writeln!(out, "<h2>📍 釣り場別の釣果</h2>")?;
    for s in &report.spots {
        spot(&mut out, s)?;
    }

    history(&mut out, recent)?;

    writeln!(out, "</main>\n<footer>\n<p>{}</p>", escape(&copy.data_credit))?;
    for source in &report.sources {
        writeln!(
            out,
            "<p>{}: {}件{}</p>",
            escape(&source.tag),
            source.records,
            if source.diagnostics.is_empty() { "" } else { " (一部取得失敗)" }
        )?;
    }
    writeln!(out, "<p>{}</p>\n</footer>\n</body>\n</html>", escape(&copy.footer))?;

    Ok(out)
}

/// Render the whole page. `recent` is the history list shown near the bottom.
pub fn render_page(report: &Report, copy: &PageCopy, recent: &[HistoryRow]) -> Result<String> {
    document(report, copy, recent).map_err(|e| CatchError::RenderError {
        message: format!("page formatting failed: {}", e),
    })
}
