//! package.json lookups and edits
//!
//! JSON has no lossless editor in our stack, so edits re-serialize the whole
//! document: original key order, 2-space indentation, trailing newline.

use super::KeyPath;
use crate::core::error::ReleaseResult;
use serde_json::Value;

fn lookup<'a>(doc: &'a Value, path: KeyPath) -> Option<&'a str> {
  let mut value = doc;
  for key in path.keys() {
    value = value.get(*key)?;
  }
  value.as_str()
}

fn lookup_mut<'a>(doc: &'a mut Value, path: KeyPath) -> Option<&'a mut Value> {
  let mut value = doc;
  for key in path.keys() {
    value = value.get_mut(*key)?;
  }
  value.is_string().then_some(value)
}

/// Serialize with the fixed manifest layout
pub fn to_manifest_string(doc: &Value) -> ReleaseResult<String> {
  let mut out = serde_json::to_string_pretty(doc)?;
  out.push('\n');
  Ok(out)
}

/// First key path holding a string, with the string
pub fn find_string(content: &str, order: &[KeyPath]) -> ReleaseResult<Option<(KeyPath, String)>> {
  let doc: Value = serde_json::from_str(content)?;
  Ok(
    order
      .iter()
      .find_map(|path| lookup(&doc, *path).map(|s| (*path, s.to_string()))),
  )
}

/// Replace the string at the first key path holding one
///
/// Returns the re-serialized document, or `None` when no path matched.
pub fn replace_string(content: &str, order: &[KeyPath], new_value: &str) -> ReleaseResult<Option<String>> {
  let mut doc: Value = serde_json::from_str(content)?;

  let Some(path) = order.iter().copied().find(|path| lookup(&doc, *path).is_some()) else {
    return Ok(None);
  };

  if let Some(value) = lookup_mut(&mut doc, path) {
    *value = Value::String(new_value.to_string());
  }

  to_manifest_string(&doc).map(Some)
}
