use url::form_urlencoded;

use crate::data::model::EventRecord;

// ---------------------------------------------------------------------------
// Social links shown on each card
// ---------------------------------------------------------------------------

/// Social platforms in card order: (key in `social_media`, display name).
pub const SOCIAL_PLATFORMS: [(&str, &str); 7] = [
    ("instagram", "Instagram"),
    ("threads", "Threads"),
    ("facebook", "Facebook"),
    ("twitter", "Twitter"),
    ("reddit", "Reddit"),
    ("tiktok", "Tiktok"),
    ("youtube", "YouTube"),
];

const UTM_SOURCE: &str = "texascomicon";
const UTM_MEDIUM: &str = "website";
const UTM_CAMPAIGN: &str = "comicon_event";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub name: &'static str,
    /// Target with tracking parameters appended.
    pub url: String,
}

/// Non-blank social links of a record followed by its website.
pub fn social_links(record: &EventRecord) -> Vec<SocialLink> {
    let social = SOCIAL_PLATFORMS
        .iter()
        .map(|(key, name)| (*name, record.social_media.get(*key).map(String::as_str)));
    let website = std::iter::once(("Website", record.website.as_deref()));

    social
        .chain(website)
        .filter_map(|(name, url)| {
            let url = url?.trim();
            if url.is_empty() {
                return None;
            }
            Some(SocialLink {
                name,
                url: add_utm_params(url, &name.to_lowercase()),
            })
        })
        .collect()
}

/// Append campaign tracking parameters to `url`. A blank URL becomes `#`.
pub fn add_utm_params(url: &str, content: &str) -> String {
    if url.trim().is_empty() {
        return "#".to_string();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("utm_source", UTM_SOURCE)
        .append_pair("utm_medium", UTM_MEDIUM)
        .append_pair("utm_campaign", UTM_CAMPAIGN)
        .append_pair("utm_content", content)
        .finish();
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utm_params_appended_with_question_mark() {
        assert_eq!(
            add_utm_params("https://example.com/con", "website"),
            "https://example.com/con?utm_source=texascomicon&utm_medium=website\
             &utm_campaign=comicon_event&utm_content=website"
        );
    }

    #[test]
    fn test_utm_params_extend_existing_query() {
        let url = add_utm_params("https://example.com/?ref=a", "instagram");
        assert!(url.starts_with("https://example.com/?ref=a&utm_source=texascomicon&"));
        assert!(url.ends_with("utm_content=instagram"));
    }

    #[test]
    fn test_utm_content_is_form_encoded() {
        let url = add_utm_params("https://example.com", "a b&c");
        assert!(url.ends_with("utm_content=a+b%26c"));
    }

    #[test]
    fn test_blank_url_becomes_placeholder() {
        assert_eq!(add_utm_params("  ", "website"), "#");
    }

    #[test]
    fn test_social_links_order_and_blank_skipped() {
        let mut record = EventRecord {
            website: Some("https://con.example".into()),
            ..Default::default()
        };
        record
            .social_media
            .insert("youtube".into(), "https://youtube.com/con".into());
        record
            .social_media
            .insert("instagram".into(), "https://instagram.com/con".into());
        record.social_media.insert("threads".into(), "   ".into());
        record
            .social_media
            .insert("myspace".into(), "https://myspace.com/con".into());

        let links = social_links(&record);
        let names: Vec<&str> = links.iter().map(|l| l.name).collect();
        assert_eq!(names, ["Instagram", "YouTube", "Website"]);
        assert!(links[0].url.ends_with("utm_content=instagram"));
        assert!(links[1].url.ends_with("utm_content=youtube"));
    }

    #[test]
    fn test_no_links() {
        assert!(social_links(&EventRecord::default()).is_empty());
    }
}
