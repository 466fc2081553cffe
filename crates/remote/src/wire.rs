//! Wire-format parsing for the store's flat key/value responses.
//!
//! Responses are `&`-delimited, percent-encoded `key=value` pairs. A
//! `success` field (`"true"`/`"false"`, case-insensitive) gates whether the
//! `error` field (failure) or the `data` field (success) is meaningful.
//!
//! The `data` payload of a listing is itself a comma-delimited sequence of
//! field/value pairs — `name,<value>,item,<id>,type,<type>,…` — where values
//! may be quoted to protect embedded commas. Real payloads are sometimes
//! malformed: an unterminated quoted value is tolerated by treating it as
//! continuing until a closing quote is found (or the payload ends).

use crate::entity::{Entity, EntityKind};
use std::borrow::Cow;
use std::collections::HashMap;

/// A parsed flat key/value response.
#[derive(Debug, Default)]
pub struct Response {
    fields: HashMap<String, String>,
}

impl Response {
    /// Parses the raw response body. Never fails: pairs without `=` are
    /// skipped, and undecodable percent-sequences fall back to the raw text.
    pub fn parse(raw: &str) -> Self {
        let mut fields = HashMap::new();
        for pair in raw.split('&') {
            if let Some((key, value)) = pair.split_once('=') {
                fields.insert(decode(key).into_owned(), decode(value).into_owned());
            }
        }
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Whether the store reported success. Absent or unrecognized values
    /// count as failure.
    pub fn success(&self) -> bool {
        self.get("success").is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    /// The store's error message, when `success` is false.
    pub fn error(&self) -> Option<&str> {
        self.get("error")
    }

    /// The payload, when `success` is true.
    pub fn data(&self) -> Option<&str> {
        self.get("data")
    }
}

/// Percent-decodes a value, falling back to the raw text when the encoding
/// is broken. Tolerance over strictness: a garbled name still beats a
/// dropped entity.
fn decode(value: &str) -> Cow<'_, str> {
    match urlencoding::decode(value) {
        Ok(decoded) => decoded,
        Err(_) => Cow::Borrowed(value),
    }
}

/// Decodes a listing value that uses `+` for spaces on top of
/// percent-encoding (the store encodes entity names this way).
fn decode_plus(value: &str) -> String {
    decode(&value.replace('+', " ")).into_owned()
}

/// Parses a listing payload into entities.
///
/// Walks the comma-delimited field/value pairs, starting a new entity at
/// each `name` field and completing the previous one once both its name and
/// identifier are known. Unknown fields (permissions, timestamps, …) are
/// skipped. Partially-quoted values are tolerated as documented at module
/// level.
pub fn parse_listing(data: &str, parent: &str) -> Vec<Entity> {
    let mut entities = Vec::new();
    if data.is_empty() {
        return entities;
    }

    let parts: Vec<&str> = data.split(',').collect();
    let mut current: Option<PartialEntity> = None;
    let mut i = 0;
    while i + 1 < parts.len() {
        let field = parts[i].trim().to_lowercase();
        let raw = parts[i + 1].trim();

        // Re-join a quoted value that was split on its embedded commas,
        // keeping the untrimmed tail parts so `"a, b"` survives intact. An
        // unterminated quote consumes the rest of the payload.
        let value = if let Some(stripped) = raw.strip_prefix('"') {
            match stripped.strip_suffix('"') {
                Some(inner) => {
                    i += 2;
                    inner.to_string()
                },
                None => {
                    let mut value = stripped.to_string();
                    i += 2;
                    while i < parts.len() && !value.ends_with('"') {
                        value.push(',');
                        value.push_str(parts[i]);
                        i += 1;
                    }
                    value.trim_end().trim_end_matches('"').to_string()
                },
            }
        } else {
            i += 2;
            raw.to_string()
        };

        match field.as_str() {
            "name" => {
                if let Some(done) = current.take().and_then(PartialEntity::build) {
                    entities.push(done);
                }
                current = Some(PartialEntity { name: Some(decode_plus(&value)), ..Default::default() });
            },
            "item" => {
                if let Some(entity) = current.as_mut() {
                    entity.id = Some(value);
                }
            },
            "type" => {
                if let Some(entity) = current.as_mut() {
                    entity.kind = Some(value);
                }
            },
            _ => {},
        }
    }
    if let Some(done) = current.and_then(PartialEntity::build) {
        entities.push(done);
    }

    for entity in &mut entities {
        entity.parent = Some(parent.to_string());
    }
    entities
}

#[derive(Default)]
struct PartialEntity {
    name: Option<String>,
    id: Option<String>,
    kind: Option<String>,
}

impl PartialEntity {
    /// An entity needs at least a name and an identifier; anything else is
    /// listing noise.
    fn build(self) -> Option<Entity> {
        let name = self.name.filter(|n| !n.is_empty())?;
        let id = self.id?;
        // Infallible parse: unknown kinds are items.
        let kind: EntityKind = self.kind.as_deref().unwrap_or("item").parse().unwrap();
        Some(Entity::new(id, name, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_success_response() {
        let response = Response::parse("success=true&data=name%2Cfoo");
        assert!(response.success());
        assert_eq!(response.data(), Some("name,foo"));
        assert_eq!(response.error(), None);
    }

    #[test]
    fn test_success_is_case_insensitive() {
        assert!(Response::parse("success=True").success());
        assert!(Response::parse("success=TRUE").success());
        assert!(!Response::parse("success=False").success());
        assert!(!Response::parse("success=yes").success());
        assert!(!Response::parse("data=whatever").success());
    }

    #[test]
    fn test_failure_carries_error() {
        let response = Response::parse("success=false&error=path%20not%20found");
        assert!(!response.success());
        assert_eq!(response.error(), Some("path not found"));
    }

    #[test]
    fn test_skips_malformed_pairs() {
        let response = Response::parse("success=true&garbage&data=x");
        assert!(response.success());
        assert_eq!(response.data(), Some("x"));
    }

    #[test]
    fn test_parses_listing_triples() {
        let data = "name,Sadie+Hair,item,aaaa-1111,type,Object,name,Hair,item,bbbb-2222,type,folder";
        let entities = parse_listing(data, "Inbox Zone");
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].name, "Sadie Hair");
        assert_eq!(entities[0].id, "aaaa-1111");
        assert_eq!(entities[0].kind, EntityKind::Item);
        assert_eq!(entities[1].kind, EntityKind::Folder);
        assert_eq!(entities[1].parent.as_deref(), Some("Inbox Zone"));
    }

    #[test]
    fn test_quoted_value_with_commas() {
        let data = r#"name,"Sadie, Deluxe Edition",item,cccc-3333,type,Object"#;
        let entities = parse_listing(data, "");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].name, "Sadie, Deluxe Edition");
    }

    #[test]
    fn test_unterminated_quote_is_tolerated() {
        // The quoted name never closes: it swallows the rest of the payload
        // instead of panicking or dropping the whole listing.
        let data = r#"name,"Broken Name,item,dddd-4444"#;
        let entities = parse_listing(data, "");
        assert!(entities.is_empty()); // no id survives, so no entity — but no panic either

        // A later closing quote terminates the run normally.
        let data = r#"name,"A, B",item,eeee-5555,type,Object,name,"unterminated tail"#;
        let entities = parse_listing(data, "");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].name, "A, B");
    }

    #[test]
    fn test_entities_without_id_are_dropped() {
        let data = "name,Orphan,type,Object,name,Kept,item,ffff-6666,type,Object";
        let entities = parse_listing(data, "");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].name, "Kept");
    }

    #[test]
    fn test_empty_payload() {
        assert!(parse_listing("", "").is_empty());
    }
}
