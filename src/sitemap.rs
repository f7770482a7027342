//! Sitemap Module
//!
//! Builds `sitemap.xml` from the static routes plus one page per machine.
//! When the store can't be asked, a fixed list of well-known machine pages
//! stands in so crawlers always get something useful.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{error, warn};

use crate::remote::MachineSource;

/// Routes that exist regardless of catalog contents.
pub const STATIC_PATHS: &[&str] = &["/", "/compare/"];

/// Machine pages listed when the store is unreachable or not configured.
pub const FALLBACK_MACHINE_IDS: &[&str] = &[
    "breville-barista-express-impress",
    "gaggia-classic-pro",
    "breville-bambino-plus",
    "rancilio-silvia",
    "la-pavoni-europiccola",
];

/// Every page URL for the sitemap, static routes first.
///
/// `configured` is false when the store has no credentials, in which case it
/// is not contacted at all.
pub async fn sitemap_urls(
    source: &dyn MachineSource,
    configured: bool,
    site_url: &str,
) -> Vec<String> {
    let ids = if !configured {
        warn!("Store credentials missing, using fallback machine pages");
        fallback_ids()
    } else {
        match source.fetch_machine_ids().await {
            Ok(ids) => ids,
            Err(e) => {
                error!(error = %e, "Error fetching machines for sitemap");
                fallback_ids()
            }
        }
    };

    STATIC_PATHS
        .iter()
        .map(|path| format!("{}{}", site_url, path))
        .chain(ids.iter().map(|id| format!("{}/machines/{}", site_url, id)))
        .collect()
}

fn fallback_ids() -> Vec<String> {
    FALLBACK_MACHINE_IDS.iter().map(|id| id.to_string()).collect()
}

/// Renders the urlset document; every entry shares `lastmod`.
pub fn render_sitemap(urls: &[String], lastmod: DateTime<Utc>) -> String {
    let lastmod = lastmod.to_rfc3339_opts(SecondsFormat::Millis, true);
    let entries: Vec<String> = urls
        .iter()
        .map(|url| {
            format!(
                "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>weekly</changefreq>\n    <priority>0.8</priority>\n  </url>",
                escape_xml(url),
                lastmod
            )
        })
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}\n</urlset>",
        entries.join("\n")
    )
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
