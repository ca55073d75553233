//! Sitemap parsing.

use data_model_smap::{Priority, UrlEntry, parse_timestamp};
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::errors::{Result, SitemapError};

#[derive(Debug, Clone, Copy)]
enum Field {
    Loc,
    LastMod,
    ChangeFreq,
    Priority,
}

#[derive(Debug, Default)]
struct PartialEntry {
    location: Option<String>,
    last_modified: Option<String>,
    change_frequency: Option<String>,
    priority: Option<String>,
}

impl PartialEntry {
    fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Loc => &mut self.location,
            Field::LastMod => &mut self.last_modified,
            Field::ChangeFreq => &mut self.change_frequency,
            Field::Priority => &mut self.priority,
        };
        *slot = Some(value);
    }

    fn finish(self) -> Result<UrlEntry> {
        let location = self
            .location
            .ok_or_else(|| SitemapError::ParseError("<url> without <loc>".to_string()))?;
        let mut entry = UrlEntry::new(location).map_err(invalid)?;

        if let Some(last_modified) = self.last_modified {
            entry = entry.with_last_modified(parse_timestamp(&last_modified).map_err(invalid)?);
        }
        if let Some(change_frequency) = self.change_frequency {
            entry = entry.with_change_frequency(change_frequency.parse().map_err(invalid)?);
        }
        if let Some(priority) = self.priority {
            let value = priority.parse::<f64>().map_err(invalid)?;
            entry = entry.with_priority(Priority::new(value).map_err(invalid)?);
        }
        Ok(entry)
    }
}

fn invalid(e: impl std::fmt::Display) -> SitemapError {
    SitemapError::ParseError(e.to_string())
}

/// Parses sitemap XML content into its entries, in document order.
///
/// Supports XML sitemaps in the standard format:
/// ```xml
/// <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url>
///     <loc>https://example.com/page</loc>
///     <lastmod>2024-01-01</lastmod>
///   </url>
/// </urlset>
/// ```
///
/// # Errors
///
/// Returns [`SitemapError::XmlError`] if the XML is malformed, and
/// [`SitemapError::ParseError`] if:
/// - A `<url>` has no `<loc>`
/// - A `<lastmod>`, `<changefreq>` or `<priority>` value is not valid
pub fn parse_sitemap(xml: &str) -> Result<Vec<UrlEntry>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut current: Option<PartialEntry> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"url" => current = Some(PartialEntry::default()),
                b"loc" => field = Some(Field::Loc),
                b"lastmod" => field = Some(Field::LastMod),
                b"changefreq" => field = Some(Field::ChangeFreq),
                b"priority" => field = Some(Field::Priority),
                _ => field = None,
            },
            Ok(Event::Text(text)) => {
                if let (Some(entry), Some(field)) = (current.as_mut(), field) {
                    let value = text.unescape()?;
                    entry.set(field, value.trim().to_string());
                }
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"url" {
                    if let Some(entry) = current.take() {
                        entries.push(entry.finish()?);
                    }
                }
                field = None;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }

    Ok(entries)
}
