//! HTML to plain text
//!
//! Produces the same text a browser reports as `textContent` for a fragment:
//! tags and comments are dropped, character references are decoded and
//! whitespace is kept as written.

use quick_xml::escape::unescape;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Longest reference we try to decode (`&CounterClockwiseContourIntegral;`)
const MAX_REFERENCE_LEN: usize = 34;

/// Strip markup from an HTML fragment, keeping only its text
pub fn strip_tags(html: &str) -> String {
    let mut reader = Reader::from_str(html);
    // Void elements (<br>, <img>) never close
    reader.check_end_names(false);

    let mut out = String::with_capacity(html.len());
    loop {
        match reader.read_event() {
            Ok(Event::Text(text)) => push_decoded(&mut out, &String::from_utf8_lossy(&text)),
            Ok(Event::CData(data)) => out.push_str(&String::from_utf8_lossy(&data)),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                log::debug!("Stopped reading html at byte {}: {}", reader.buffer_position(), e);
                break;
            }
        }
    }
    out
}

/// Decode character references one at a time; an unknown one stays literal
fn push_decoded(out: &mut String, text: &str) {
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= MAX_REFERENCE_LEN)
            .and_then(|semi| unescape(&tail[..=semi]).ok().map(|s| (s.into_owned(), semi)));

        match decoded {
            Some((text, semi)) => {
                out.push_str(&text);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
}
