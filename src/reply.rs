use serde_json::{json, Value};

use crate::{line::message::ReplyMessage, stats::PrefectureStats};

pub const PROMPT_TEXT: &str = "「東京都」のように都道府県名を入力してください。";

pub struct Link {
    pub label: &'static str,
    pub uri: &'static str,
}

/// Buttons shown in the card footer.
pub const LINKS: [Link; 2] = [
    Link {
        label: "厚生労働省",
        uri: "https://www.mhlw.go.jp/stf/seisakunitsuite/bunya/0000164708_00001.html",
    },
    Link {
        label: "NHK 特設サイト",
        uri: "https://www3.nhk.or.jp/news/special/coronavirus/",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyFormat {
    Text,
    Flex,
}

impl ReplyFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Some(ReplyFormat::Text),
            "flex" | "card" => Some(ReplyFormat::Flex),
            _ => None,
        }
    }
}

pub fn prompt() -> ReplyMessage {
    ReplyMessage::text(PROMPT_TEXT)
}

pub fn stats_reply(format: ReplyFormat, stats: &PrefectureStats) -> ReplyMessage {
    match format {
        ReplyFormat::Text => ReplyMessage::text(stats_text(stats)),
        ReplyFormat::Flex => ReplyMessage::Flex {
            alt_text: headline(stats),
            contents: stats_card(stats),
        },
    }
}

fn headline(stats: &PrefectureStats) -> String {
    format!("{}時点の{}の状況", stats.updated_label(), stats.name)
}

fn rows(stats: &PrefectureStats) -> [(&'static str, u64); 4] {
    [
        ("現在の感染者数", stats.infected),
        ("累計感染者数", stats.cases),
        ("重症者数", stats.severe),
        ("死亡者数", stats.deaths),
    ]
}

fn stats_text(stats: &PrefectureStats) -> String {
    let mut lines = vec![headline(stats)];
    lines.extend(
        rows(stats)
            .iter()
            .map(|(label, count)| format!("{label}: {count}人")),
    );
    lines.join("\n")
}

fn stats_card(stats: &PrefectureStats) -> Value {
    let mut body = vec![json!({
        "type": "text",
        "text": format!("{} 更新", stats.updated_label()),
        "size": "xs",
        "color": "#aaaaaa",
    })];
    body.extend(rows(stats).iter().map(|(label, count)| {
        json!({
            "type": "box",
            "layout": "baseline",
            "contents": [
                {"type": "text", "text": label, "size": "sm", "color": "#555555", "flex": 3},
                {"type": "text", "text": format!("{count}人"), "size": "sm", "align": "end", "flex": 2},
            ],
        })
    }));

    let buttons: Vec<Value> = LINKS
        .iter()
        .map(|link| {
            json!({
                "type": "button",
                "style": "link",
                "height": "sm",
                "action": {"type": "uri", "label": link.label, "uri": link.uri},
            })
        })
        .collect();

    json!({
        "type": "bubble",
        "header": {
            "type": "box",
            "layout": "vertical",
            "contents": [
                {"type": "text", "text": format!("{}の感染状況", stats.name), "weight": "bold", "size": "lg"},
            ],
        },
        "body": {
            "type": "box",
            "layout": "vertical",
            "spacing": "sm",
            "contents": body,
        },
        "footer": {
            "type": "box",
            "layout": "vertical",
            "spacing": "sm",
            "contents": buttons,
        },
    })
}
