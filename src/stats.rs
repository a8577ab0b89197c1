use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use tokio::time::{timeout, Duration};

use crate::{error::BotError, prefecture::Prefecture};

const STATS_REQUEST_TIMEOUT_MS: u64 = 5000;

/// One element of the statistics API's per-prefecture array.
#[derive(Clone, Debug, Deserialize)]
pub struct PrefectureRecord {
    pub name_ja: String,
    #[serde(default)]
    pub last_updated: LastUpdated,
    pub cases: Option<u64>,
    pub deaths: Option<u64>,
    pub severe: Option<u64>,
    pub discharge: Option<u64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LastUpdated {
    #[serde(default, deserialize_with = "deserialize_api_date")]
    pub cases_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Number(u64),
    Text(String),
}

/// Accepts `20201118`, `"20201118"`, `"2020-11-18"` and `"2020/11/18"`.
/// Anything else, including `null`, becomes `None`.
fn deserialize_api_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawDate>::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| match raw {
        RawDate::Number(n) => date_from_number(n),
        RawDate::Text(s) => parse_date_text(&s),
    }))
}

fn date_from_number(n: u64) -> Option<NaiveDate> {
    let year = i32::try_from(n / 10_000).ok()?;
    let month = u32::try_from((n / 100) % 100).ok()?;
    let day = u32::try_from(n % 100).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    ["%Y%m%d", "%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Figures shown to the user for one prefecture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefectureStats {
    pub name: &'static str,
    pub updated: Option<NaiveDate>,
    pub cases: u64,
    pub deaths: u64,
    pub severe: u64,
    pub discharged: u64,
    pub infected: u64,
}

impl PrefectureStats {
    pub fn from_record(prefecture: &Prefecture, record: &PrefectureRecord) -> Self {
        let cases = record.cases.unwrap_or(0);
        let deaths = record.deaths.unwrap_or(0);
        let discharged = record.discharge.unwrap_or(0);

        Self {
            name: prefecture.name,
            updated: record.last_updated.cases_date,
            cases,
            deaths,
            severe: record.severe.unwrap_or(0),
            discharged,
            infected: cases.saturating_sub(discharged).saturating_sub(deaths),
        }
    }

    /// `YYYY/MM/DD`, or `不明` when the API did not provide a usable date.
    pub fn updated_label(&self) -> String {
        match self.updated {
            Some(date) => date.format("%Y/%m/%d").to_string(),
            None => "不明".to_string(),
        }
    }
}

pub fn find_prefecture(
    records: &[PrefectureRecord],
    prefecture: &Prefecture,
) -> Option<PrefectureStats> {
    records
        .iter()
        .find(|record| record.name_ja == prefecture.api_name)
        .map(|record| PrefectureStats::from_record(prefecture, record))
}

#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<PrefectureRecord>, BotError>;
}

pub struct HttpStatsSource {
    client: reqwest::Client,
    url: String,
}

impl HttpStatsSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl StatsSource for HttpStatsSource {
    async fn fetch(&self) -> Result<Vec<PrefectureRecord>, BotError> {
        let request = self.client.get(&self.url).send();

        let response = match timeout(Duration::from_millis(STATS_REQUEST_TIMEOUT_MS), request).await
        {
            Ok(result) => result?,
            Err(_) => return Err(BotError::Upstream("statistics request timed out".into())),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(BotError::Upstream(format!(
                "statistics API returned {}",
                status.as_u16()
            )));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| BotError::Upstream(format!("malformed statistics response: {e}")))
    }
}
