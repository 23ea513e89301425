use log::{debug, info, trace};
use path_clean::clean;
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use std::{fs, io, path::Path};

use crate::{
    constants::ENTRY_ELEMENT,
    error::DescriptorError,
    types::{ClasspathEntry, EntryKind},
};

/// Read the descriptor `file_name` from `dir`.
pub fn load_descriptor(dir: &Path, file_name: &str) -> Result<Vec<ClasspathEntry>, DescriptorError> {
    let path = clean(dir.join(file_name));
    info!("Using working directory: {} and file: {}", dir.display(), file_name);

    let content = fs::read_to_string(&path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => DescriptorError::NotFound(path.clone()),
        _ => DescriptorError::Io { path: path.clone(), source },
    })?;

    let entries = parse_descriptor(&content).map_err(|e| match e {
        DescriptorError::Malformed(message) => {
            DescriptorError::Malformed(format!("{}: {}", path.display(), message))
        }
        other => other,
    })?;
    debug!("Classpath descriptor {} loaded", path.display());
    Ok(entries)
}

/// Extract the `classpathentry` children of the document root, in order.
pub fn parse_descriptor(xml: &str) -> Result<Vec<ClasspathEntry>, DescriptorError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            DescriptorError::Malformed(format!("at byte {}: {}", reader.error_position(), e))
        })?;

        match event {
            Event::Start(e) => {
                if depth == 0 {
                    check_single_root(&mut seen_root)?;
                } else if depth == 1 && e.name().as_ref() == ENTRY_ELEMENT.as_bytes() {
                    entries.push(read_entry(&e)?);
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if depth == 0 {
                    check_single_root(&mut seen_root)?;
                } else if depth == 1 && e.name().as_ref() == ENTRY_ELEMENT.as_bytes() {
                    entries.push(read_entry(&e)?);
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(DescriptorError::Malformed("missing root element".to_string()));
    }
    if depth != 0 {
        return Err(DescriptorError::Malformed("unexpected end of document".to_string()));
    }

    debug!("Found {} entries in classpath file", entries.len());
    Ok(entries)
}

fn check_single_root(seen_root: &mut bool) -> Result<(), DescriptorError> {
    if *seen_root {
        return Err(DescriptorError::Malformed("multiple root elements".to_string()));
    }
    *seen_root = true;
    Ok(())
}

fn read_entry(element: &BytesStart<'_>) -> Result<ClasspathEntry, DescriptorError> {
    let mut kind = None;
    let mut path = None;

    for attr in element.attributes() {
        let attr = attr.map_err(|e| DescriptorError::Malformed(e.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|e| DescriptorError::Malformed(e.to_string()))?
            .into_owned();
        match attr.key.as_ref() {
            b"kind" => kind = Some(value),
            b"path" => path = Some(value),
            _ => {}
        }
    }

    match (kind, path) {
        (Some(kind), Some(path)) => {
            trace!("Read {} entry with path {}", kind, path);
            Ok(ClasspathEntry::new(EntryKind::parse(&kind), path))
        }
        (None, _) => Err(DescriptorError::Malformed(format!(
            "{} element without a kind attribute",
            ENTRY_ELEMENT
        ))),
        (_, None) => Err(DescriptorError::Malformed(format!(
            "{} element without a path attribute",
            ENTRY_ELEMENT
        ))),
    }
}
