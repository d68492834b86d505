//! Practo search page scraping via a headless renderer.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::{DoctorDirectory, DoctorRecord, manual_search_url};
use crate::error::SearchError;
use crate::render::{RenderOptions, Renderer};

const CARD_SELECTOR: &str = r#"div[data-qa-id="doctor_card"]"#;
const NAME_SELECTOR: &str = "h2";
const SPECIALTY_SELECTOR: &str = "p";
const LOCATION_SELECTOR: &str = r#"[data-qa-id="practice_locality"]"#;
const LINK_SELECTOR: &str = "a[href]";

/// Doctor directory backed by rendered Practo search pages.
pub struct PractoDirectory<R> {
    renderer: R,
    base_url: Url,
    options: RenderOptions,
}

impl<R: Renderer> PractoDirectory<R> {
    /// Renders stop settling as soon as a doctor card appears unless
    /// `options` already names another selector.
    pub fn new(renderer: R, base_url: &str, mut options: RenderOptions) -> Result<Self, SearchError> {
        let base_url = Url::parse(base_url).map_err(|e| SearchError::InvalidUrl(format!("{base_url}: {e}")))?;
        options.wait_for.get_or_insert_with(|| CARD_SELECTOR.to_string());
        Ok(Self { renderer, base_url, options })
    }
}

#[async_trait::async_trait]
impl<R: Renderer> DoctorDirectory for PractoDirectory<R> {
    async fn find_doctors(&self, role: &str, city: &str, limit: usize) -> Result<Vec<DoctorRecord>, SearchError> {
        let url = self.search_url(role, city);
        tracing::debug!("rendering directory search: {}", url);

        let page = self.renderer.render(&url, &self.options).await?;
        let records = parse_doctor_cards(&page.html, &page.final_url, limit);

        tracing::debug!(role, city, found = records.len(), "directory search completed in {}ms", page.render_time_ms);
        Ok(records)
    }

    fn search_url(&self, role: &str, city: &str) -> Url {
        manual_search_url(&self.base_url, role, city)
    }
}

/// Extract up to `limit` doctor cards from a rendered search page.
///
/// Cards without a name are skipped. Missing fields become empty strings;
/// a missing link falls back to the page URL.
pub fn parse_doctor_cards(html: &str, page_url: &Url, limit: usize) -> Vec<DoctorRecord> {
    let document = Html::parse_document(html);
    let card_sel = Selector::parse(CARD_SELECTOR).expect("invalid selector");
    let name_sel = Selector::parse(NAME_SELECTOR).expect("invalid selector");
    let specialty_sel = Selector::parse(SPECIALTY_SELECTOR).expect("invalid selector");
    let location_sel = Selector::parse(LOCATION_SELECTOR).expect("invalid selector");
    let link_sel = Selector::parse(LINK_SELECTOR).expect("invalid selector");

    document
        .select(&card_sel)
        .filter_map(|card| {
            let name = first_text(card, &name_sel).filter(|n| !n.is_empty())?;
            let link = card
                .select(&link_sel)
                .next()
                .and_then(|a| a.value().attr("href"))
                .and_then(|href| page_url.join(href).ok())
                .unwrap_or_else(|| page_url.clone());

            Some(DoctorRecord {
                name,
                specialty: first_text(card, &specialty_sel).unwrap_or_default(),
                location: first_text(card, &location_sel).unwrap_or_default(),
                link: link.to_string(),
            })
        })
        .take(limit)
        .collect()
}

fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(|el| {
        el.text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ")
    })
}
