use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use super::model::EventRecord;
use crate::links::SOCIAL_PLATFORMS;

/// Source used when nothing is given on the command line.
pub const DEFAULT_SOURCE: &str = "lookups.json";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("expected a top-level JSON array of events")]
    NotAnArray,
    #[error("row {0} is not a JSON object")]
    RowNotObject(usize),
    #[error("{url} answered with HTTP {status}")]
    HttpStatus { url: String, status: u16 },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load events from a path or an `http(s)://` URL.  Files dispatch by
/// extension.
///
/// Supported sources:
/// * `http://…`, `https://…` – JSON document fetched once
/// * `.json` – `[{ "name": ..., "category": ..., "keywords": [...], ... }, ...]`
/// * `.csv`  – header row, `keywords` column holds semicolon-separated values
pub fn load_source(source: &str) -> Result<Vec<EventRecord>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        return fetch_json(source);
    }
    load_file(Path::new(source))
}

pub fn load_file(path: &Path) -> Result<Vec<EventRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json(&text)
        }
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            parse_csv(file)
        }
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
}

fn fetch_json(url: &str) -> Result<Vec<EventRecord>> {
    let response = reqwest::blocking::get(url).with_context(|| format!("fetching {url}"))?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        }
        .into());
    }
    let text = response.text().context("reading response body")?;
    parse_json(&text)
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Parse a records-oriented JSON document.
///
/// Fields are read leniently: missing or `null` values become empty,
/// numbers are stringified and non-string keyword entries are skipped.
pub fn parse_json(text: &str) -> Result<Vec<EventRecord>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().ok_or(LoadError::NotAnArray)?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| -> Result<EventRecord> {
            let obj = row.as_object().ok_or(LoadError::RowNotObject(i))?;
            Ok(record_from_json(i, obj))
        })
        .collect()
}

fn record_from_json(row: usize, obj: &Map<String, JsonValue>) -> EventRecord {
    let text = |key: &str| obj.get(key).and_then(json_to_text).unwrap_or_default();

    let keywords = match obj.get("keywords") {
        Some(JsonValue::Array(items)) => items
            .iter()
            .filter_map(|k| {
                let keyword = k.as_str();
                if keyword.is_none() {
                    log::warn!("Row {row}: skipping non-string keyword {k}");
                }
                keyword.map(str::to_string)
            })
            .collect(),
        Some(JsonValue::Null) | None => Vec::new(),
        Some(other) => {
            log::warn!("Row {row}: 'keywords' is not an array: {other}");
            Vec::new()
        }
    };

    let social_media = obj
        .get("social_media")
        .and_then(JsonValue::as_object)
        .map(|platforms| {
            platforms
                .iter()
                .filter_map(|(name, url)| Some((name.clone(), url.as_str()?.to_string())))
                .collect()
        })
        .unwrap_or_default();

    EventRecord {
        uid: obj.get("uid").and_then(json_to_text),
        name: text("name"),
        category: text("category"),
        keywords,
        city: text("city"),
        month: text("month"),
        description: text("description"),
        zip_code: text("zip_code"),
        website: obj
            .get("website")
            .and_then(JsonValue::as_str)
            .map(str::to_string),
        social_media,
    }
}

fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names (`name`, `category`,
/// `keywords`, `city`, `month`, `description`, `zip_code`, `website`,
/// `uid`, plus one column per social platform such as `instagram`).
/// Missing columns, and trailing cells left off a short row, read as empty.
pub fn parse_csv<R: Read>(input: R) -> Result<Vec<EventRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_ascii_lowercase())
        .collect();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let name_idx = column("name");
    let category_idx = column("category");
    let keywords_idx = column("keywords");
    let city_idx = column("city");
    let month_idx = column("month");
    let description_idx = column("description");
    let zip_idx = column("zip_code");
    let website_idx = column("website");
    let uid_idx = column("uid");
    let social_idx: Vec<(&str, usize)> = SOCIAL_PLATFORMS
        .iter()
        .filter_map(|(key, _)| Some((*key, column(key)?)))
        .collect();

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };
        let non_empty = |s: String| (!s.is_empty()).then_some(s);

        let keywords = cell(keywords_idx)
            .split(';')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect();

        let social_media = social_idx
            .iter()
            .filter_map(|(key, i)| Some((key.to_string(), non_empty(cell(Some(*i)))?)))
            .collect();

        records.push(EventRecord {
            uid: non_empty(cell(uid_idx)),
            name: cell(name_idx),
            category: cell(category_idx),
            keywords,
            city: cell(city_idx),
            month: cell(month_idx),
            description: cell(description_idx),
            zip_code: cell(zip_idx),
            website: non_empty(cell(website_idx)),
            social_media,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    const EVENTS_JSON: &str = r#"[
        {
            "uid": 17,
            "name": "Austin Anime Fest",
            "category": "Anime",
            "keywords": ["cosplay", "artists"],
            "city": "Austin",
            "month": "June",
            "description": "Three days of anime.",
            "zip_code": 78701,
            "website": "https://anime.example",
            "social_media": { "instagram": "https://instagram.com/aaf", "twitter": null }
        },
        {
            "name": "Dallas Comic Show",
            "category": "Comics",
            "keywords": ["signing", 4, null],
            "city": "Dallas",
            "month": "July"
        }
    ]"#;

    #[test]
    fn test_parse_json_full_record() {
        let records = parse_json(EVENTS_JSON).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.uid.as_deref(), Some("17"));
        assert_eq!(first.zip_code, "78701");
        assert_eq!(first.keywords, ["cosplay", "artists"]);
        assert_eq!(first.website.as_deref(), Some("https://anime.example"));
        assert_eq!(first.social_media.len(), 1);
        assert_eq!(first.social_media["instagram"], "https://instagram.com/aaf");
    }

    #[test]
    fn test_parse_json_tolerates_missing_fields() {
        let records = parse_json(EVENTS_JSON).unwrap();
        let second = &records[1];
        assert_eq!(second.keywords, ["signing"]);
        assert_eq!(second.description, "");
        assert_eq!(second.zip_code, "");
        assert!(second.uid.is_none());
        assert!(second.website.is_none());
        assert!(second.social_media.is_empty());
    }

    #[test]
    fn test_parse_json_rejects_non_array() {
        let err = parse_json(r#"{"events": []}"#).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::NotAnArray)
        ));
    }

    #[test]
    fn test_parse_json_names_bad_row() {
        let err = parse_json(r#"[{"name": "ok"}, 3]"#).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::RowNotObject(1))
        ));
    }

    #[test]
    fn test_parse_json_empty_array() {
        assert!(parse_json("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_csv() {
        let data = "name,category,keywords,city,month,zip_code,instagram,website\n\
                    Fest,Anime,cosplay; artists ;,Austin,June,78701,https://ig.example,\n\
                    Show,Comics,,Dallas,July,,,https://show.example\n";
        let records = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].keywords, ["cosplay", "artists"]);
        assert_eq!(records[0].social_media["instagram"], "https://ig.example");
        assert!(records[0].website.is_none());
        assert!(records[1].keywords.is_empty());
        assert_eq!(records[1].website.as_deref(), Some("https://show.example"));
        assert_eq!(records[1].description, "");
    }

    #[test]
    fn test_parse_csv_short_row_reads_missing_cells_as_empty() {
        let data = "name,category,keywords,city,month,description,website\n\
                    Fest,Anime,cosplay,Austin,June\n\
                    Show,Comics,signing,Dallas,July,Comic show,https://show.example\n";
        let records = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].month, "June");
        assert_eq!(records[0].description, "");
        assert!(records[0].website.is_none());
        assert_eq!(records[1].description, "Comic show");
    }

    /// Serve a single canned HTTP response on a loopback port and return its URL.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            write!(
                stream,
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
        });
        format!("http://{addr}/lookups.json")
    }

    #[test]
    fn test_load_source_fetches_url() {
        let url = serve_once("200 OK", EVENTS_JSON);
        let records = load_source(&url).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Austin Anime Fest");
        assert_eq!(records[1].city, "Dallas");
    }

    #[test]
    fn test_load_source_reports_http_status() {
        let url = serve_once("404 Not Found", "not here");
        let err = load_source(&url).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::HttpStatus { status: 404, .. })
        ));
    }

    #[test]
    fn test_load_file_dispatches_by_extension() {
        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        json.write_all(EVENTS_JSON.as_bytes()).unwrap();
        assert_eq!(load_source(json.path().to_str().unwrap()).unwrap().len(), 2);

        let mut csv_file = tempfile::Builder::new().suffix(".CSV").tempfile().unwrap();
        writeln!(csv_file, "name,category,city,month").unwrap();
        writeln!(csv_file, "Fest,Anime,Austin,June").unwrap();
        assert_eq!(load_file(csv_file.path()).unwrap()[0].city, "Austin");
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".xml").tempfile().unwrap();
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::UnsupportedExtension(ext)) if ext == "xml"
        ));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(load_source("/definitely/not/here/lookups.json").is_err());
    }
}
