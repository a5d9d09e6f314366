//! Timeline poll parser using quick-xml SAX-style parsing

use crate::plexamp::api::PlexampError;
use crate::plexamp::models::{clamp_volume, PlaybackState, TimelineSnapshot};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

/// Finds the `Timeline` entry whose `itemType` is `music` in a poll body.
///
/// Returns `Ok(None)` for a well-formed body without a music timeline.
pub fn parse_music_timeline(content: &[u8]) -> Result<Option<TimelineSnapshot>, PlexampError> {
    let mut reader = Reader::from_reader(content);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"Timeline" {
                    if let Some(snapshot) = parse_timeline_entry(&e, &reader)? {
                        return Ok(Some(snapshot));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(PlexampError::Xml(format!(
                    "XML parse error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(None)
}

/// Reads one timeline element, `None` unless it describes music.
fn parse_timeline_entry(
    e: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
) -> Result<Option<TimelineSnapshot>, PlexampError> {
    let mut item_type = None;
    let mut state = None;
    let mut volume = None;

    for attr in e.attributes() {
        let attr = attr.map_err(|e| PlexampError::Xml(format!("Attr error: {}", e)))?;
        let value = reader
            .decoder()
            .decode(&attr.value)
            .map_err(|e| PlexampError::Xml(format!("Decode error: {}", e)))?
            .to_string();

        match attr.key.as_ref() {
            b"itemType" => item_type = Some(value),
            b"state" => state = Some(value),
            b"volume" => volume = Some(value),
            _ => {}
        }
    }

    if item_type.as_deref() != Some("music") {
        return Ok(None);
    }

    Ok(Some(TimelineSnapshot {
        state: state
            .as_deref()
            .map_or(PlaybackState::Unknown, PlaybackState::from_timeline),
        volume: volume
            .and_then(|v| v.trim().parse::<i32>().ok())
            .map(clamp_volume),
    }))
}
