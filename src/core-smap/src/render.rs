//! Sitemap XML rendering.

use data_model_smap::{UrlEntry, format_timestamp};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::errors::Result;

/// Namespace of the sitemap protocol.
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Content type the rendered document is served with.
pub const SITEMAP_CONTENT_TYPE: &str = "application/xml";

/// Renders entries, in the given order, into a UTF-8 sitemap document:
///
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url>
///     <loc>https://example.com/page</loc>
///     <lastmod>2025-01-01T00:00:00+00:00</lastmod>
///     <changefreq>monthly</changefreq>
///     <priority>0.5</priority>
///   </url>
/// </urlset>
/// ```
///
/// Absent hints are left out. Text is XML-escaped.
pub fn render(entries: &[UrlEntry]) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NAMESPACE)]),
    ))?;

    for entry in entries {
        write_url(&mut writer, entry)?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    let mut xml = writer.into_inner();
    xml.push(b'\n');
    Ok(xml)
}

fn write_url(writer: &mut Writer<Vec<u8>>, entry: &UrlEntry) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("url")))?;

    write_text_element(writer, "loc", &entry.location)?;
    if let Some(last_modified) = &entry.last_modified {
        write_text_element(writer, "lastmod", &format_timestamp(last_modified))?;
    }
    if let Some(change_frequency) = &entry.change_frequency {
        write_text_element(writer, "changefreq", change_frequency.as_str())?;
    }
    if let Some(priority) = &entry.priority {
        write_text_element(writer, "priority", &priority.to_string())?;
    }

    writer.write_event(Event::End(BytesEnd::new("url")))?;
    Ok(())
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_sitemap;
    use crate::test_helpers::timestamp;
    use data_model_smap::{ChangeFrequency, Priority};
    use indoc::indoc;

    fn render_str(entries: &[UrlEntry]) -> String {
        String::from_utf8(render(entries).unwrap()).unwrap()
    }

    #[test]
    fn test_render_full_entry() {
        let entry = UrlEntry::new("https://example.com/page")
            .unwrap()
            .with_last_modified(timestamp("2025-01-01"))
            .with_change_frequency(ChangeFrequency::Monthly)
            .with_priority(Priority::new(0.5).unwrap());

        let expected = indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
              <url>
                <loc>https://example.com/page</loc>
                <lastmod>2025-01-01T00:00:00+00:00</lastmod>
                <changefreq>monthly</changefreq>
                <priority>0.5</priority>
              </url>
            </urlset>
        "#};
        assert_eq!(render_str(&[entry]), expected);
    }

    #[test]
    fn test_render_empty_urlset() {
        let xml = render_str(&[]);
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert!(xml.trim_end().ends_with("</urlset>"));
        assert!(!xml.contains("<url>"));
        assert!(parse_sitemap(&xml).unwrap().is_empty());
    }

    #[test]
    fn test_absent_hints_are_omitted() {
        let xml = render_str(&[UrlEntry::new("https://example.com/bare").unwrap()]);
        assert!(xml.contains("<loc>https://example.com/bare</loc>"));
        assert!(!xml.contains("<lastmod>"));
        assert!(!xml.contains("<changefreq>"));
        assert!(!xml.contains("<priority>"));
    }

    #[test]
    fn test_zero_priority_is_rendered() {
        let entry = UrlEntry::new("https://example.com/low")
            .unwrap()
            .with_priority(Priority::new(0.0).unwrap());
        assert!(render_str(&[entry]).contains("<priority>0.0</priority>"));
    }

    #[test]
    fn test_priority_has_one_decimal_digit() {
        for (value, expected) in [(0.0, "0.0"), (0.5, "0.5"), (1.0, "1.0"), (0.123, "0.1")] {
            let entry = UrlEntry::new("https://example.com/")
                .unwrap()
                .with_priority(Priority::new(value).unwrap());
            let xml = render_str(&[entry]);
            assert!(
                xml.contains(&format!("<priority>{expected}</priority>")),
                "{value} should render as {expected}:\n{xml}"
            );
        }
    }

    #[test]
    fn test_location_is_escaped() {
        let entry = UrlEntry::new("https://example.com/search?q=a&b=<c>").unwrap();
        let xml = render_str(&[entry]);
        assert!(xml.contains("<loc>https://example.com/search?q=a&amp;b=&lt;c&gt;</loc>"));

        let parsed = parse_sitemap(&xml).unwrap();
        assert_eq!(parsed[0].location, "https://example.com/search?q=a&b=<c>");
    }

    #[test]
    fn test_entries_keep_given_order() {
        let entries: Vec<UrlEntry> = ["https://example.com/z", "https://example.com/a", "https://example.com/m"]
            .into_iter()
            .map(|loc| UrlEntry::new(loc).unwrap())
            .collect();

        let parsed = parse_sitemap(&render_str(&entries)).unwrap();
        assert_eq!(parsed, entries);
    }
}
