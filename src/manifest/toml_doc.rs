//! Lossless TOML lookups and edits
//!
//! Only the targeted string value changes; comments, key order, whitespace and
//! the value's own trailing comment survive the round trip.

use super::KeyPath;
use crate::core::error::ReleaseResult;
use toml_edit::{DocumentMut, Item, Value};

fn parse(content: &str) -> ReleaseResult<DocumentMut> {
  Ok(content.parse::<DocumentMut>()?)
}

fn lookup<'a>(doc: &'a DocumentMut, path: KeyPath) -> Option<&'a str> {
  let mut item: &Item = doc.as_item();
  for key in path.keys() {
    item = item.get(*key)?;
  }
  item.as_str()
}

fn lookup_mut<'a>(doc: &'a mut DocumentMut, path: KeyPath) -> Option<&'a mut Value> {
  let mut item: &mut Item = doc.as_item_mut();
  for key in path.keys() {
    item = item.get_mut(*key)?;
  }
  item.as_value_mut().filter(|value| value.is_str())
}

/// First key path holding a string, with the string
pub fn find_string(content: &str, order: &[KeyPath]) -> ReleaseResult<Option<(KeyPath, String)>> {
  let doc = parse(content)?;
  Ok(
    order
      .iter()
      .find_map(|path| lookup(&doc, *path).map(|s| (*path, s.to_string()))),
  )
}

/// Replace the string at the first key path holding one
///
/// Returns the re-rendered document, or `None` when no path matched.
pub fn replace_string(content: &str, order: &[KeyPath], new_value: &str) -> ReleaseResult<Option<String>> {
  let mut doc = parse(content)?;

  let Some(path) = order.iter().copied().find(|path| lookup(&doc, *path).is_some()) else {
    return Ok(None);
  };

  if let Some(value) = lookup_mut(&mut doc, path) {
    let decor = value.decor().clone();
    *value = Value::from(new_value);
    *value.decor_mut() = decor;
  }

  Ok(Some(doc.to_string()))
}
