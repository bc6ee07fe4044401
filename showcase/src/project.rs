use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// A survey row as the gateway returns it. Field names mirror the wire
/// keys, mixed-case artifacts included. Unknown keys are ignored and the
/// optional columns default so partially filled rows still deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,

    #[serde(rename = "projectTitle", default)]
    pub project_title: String,

    #[serde(rename = "projectDescription", default)]
    pub project_description: String,

    #[serde(default)]
    pub sponsor: String,

    #[serde(rename = "teamMemberNames", default)]
    pub team_member_names: String,

    #[serde(default)]
    pub major: String,

    #[serde(
        rename = "submitDate",
        serialize_with = "serialize_submit_date",
        deserialize_with = "deserialize_submit_date"
    )]
    pub submit_date: NaiveDateTime,

    #[serde(default)]
    pub position: Option<i32>,

    #[serde(rename = "winning_pic", default)]
    pub winning_pic: Option<String>,

    #[serde(rename = "teamPicturePath", default)]
    pub team_picture_path: Option<String>,

    #[serde(rename = "posterPicturePath", default)]
    pub poster_picture_path: Option<String>,

    #[serde(rename = "youtubeLink", default)]
    pub youtube_link: Option<String>,
}

/// The picture columns hold comma-joined relative storage paths.
pub fn split_paths(joined: &str) -> impl Iterator<Item = &str> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|path| !path.is_empty())
}

/// The store emits `YYYY-MM-DD HH:MM:SS`; rows that passed through a JSON
/// layer arrive as RFC 3339 with a trailing `Z`. Both must parse.
pub fn parse_submit_date(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
}

fn deserialize_submit_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_submit_date(&raw).map_err(de::Error::custom)
}

fn serialize_submit_date<S: Serializer>(
    date: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.format("%Y-%m-%d %H:%M:%S").to_string())
}
