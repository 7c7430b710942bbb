//! Operations on translation trees addressed by dotted keys

use serde_yaml::{Mapping, Value};

/// Look up a dotted key
pub fn get<'a>(tree: &'a Mapping, key: &str) -> Option<&'a Value> {
    let (head, rest) = split_key(key);
    let value = tree.get(&find_key(tree, head)?)?;
    match (rest, value) {
        (None, value) => Some(value),
        (Some(rest), Value::Mapping(child)) => get(child, rest),
        _ => None,
    }
}

/// Set a dotted key, creating intermediate mappings and replacing scalars in the way
///
/// Existing keys keep their YAML type; new keys are strings.
pub fn set(tree: &mut Mapping, key: &str, value: Value) {
    let (head, rest) = split_key(key);
    let head = find_key(tree, head).unwrap_or_else(|| Value::String(head.to_string()));
    match rest {
        None => {
            tree.insert(head, value);
        }
        Some(rest) => {
            if let Some(child) = child_mut(tree, head) {
                set(child, rest, value);
            }
        }
    }
}

/// Set a value at a path of raw mapping keys, as returned by [`leaf_paths`]
pub fn set_path(tree: &mut Mapping, path: &[Value], value: Value) {
    match path {
        [] => {}
        [last] => {
            tree.insert(last.clone(), value);
        }
        [head, rest @ ..] => {
            if let Some(child) = child_mut(tree, head.clone()) {
                set_path(child, rest, value);
            }
        }
    }
}

/// Remove a dotted key, pruning mappings the removal leaves empty
pub fn remove(tree: &mut Mapping, key: &str) -> Option<Value> {
    let (head, rest) = split_key(key);
    let head = find_key(tree, head)?;
    let Some(rest) = rest else {
        return tree.shift_remove(&head);
    };

    let (removed, now_empty) = match tree.get_mut(&head) {
        Some(Value::Mapping(child)) => {
            let removed = remove(child, rest);
            (removed, child.is_empty())
        }
        _ => return None,
    };
    if removed.is_some() && now_empty {
        tree.shift_remove(&head);
    }
    removed
}

/// Every leaf as `(dotted key, value)`, depth first in document order
///
/// Sequences and scalars are leaves; empty mappings contribute nothing.
pub fn leaves(tree: &Mapping) -> Vec<(String, &Value)> {
    leaf_paths(tree)
        .into_iter()
        .map(|(key, _, value)| (key, value))
        .collect()
}

/// Like [`leaves`], with the raw mapping keys leading to each leaf
pub fn leaf_paths(tree: &Mapping) -> Vec<(String, Vec<Value>, &Value)> {
    let mut out = Vec::new();
    collect_leaves(tree, None, &[], &mut out);
    out
}

fn collect_leaves<'a>(
    tree: &'a Mapping,
    prefix: Option<&str>,
    path: &[Value],
    out: &mut Vec<(String, Vec<Value>, &'a Value)>,
) {
    for (k, v) in tree {
        let Some(segment) = key_to_string(k) else {
            continue;
        };
        let key = match prefix {
            Some(p) => format!("{}.{}", p, segment),
            None => segment,
        };
        let mut key_path = path.to_vec();
        key_path.push(k.clone());
        match v {
            Value::Mapping(child) => collect_leaves(child, Some(key.as_str()), &key_path, out),
            _ => out.push((key, key_path, v)),
        }
    }
}

fn split_key(key: &str) -> (&str, Option<&str>) {
    match key.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (key, None),
    }
}

/// The mapping key whose text is `segment`; `404` matches both `404:` and `'404':`
fn find_key(tree: &Mapping, segment: &str) -> Option<Value> {
    let string_key = Value::String(segment.to_string());
    if tree.contains_key(&string_key) {
        return Some(string_key);
    }
    tree.keys()
        .find(|k| key_to_string(k).as_deref() == Some(segment))
        .cloned()
}

/// Child mapping under `key`, replacing a non-mapping value
fn child_mut(tree: &mut Mapping, key: Value) -> Option<&mut Mapping> {
    if !matches!(tree.get(&key), Some(Value::Mapping(_))) {
        tree.insert(key.clone(), Value::Mapping(Mapping::new()));
    }
    match tree.get_mut(&key) {
        Some(Value::Mapping(child)) => Some(child),
        _ => None,
    }
}

/// Recursively sort keys lexicographically
pub fn sort(tree: Mapping) -> Mapping {
    let mut entries: Vec<(Value, Value)> = tree.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| key_to_string(a).cmp(&key_to_string(b)));
    entries
        .into_iter()
        .map(|(k, v)| match v {
            Value::Mapping(child) => (k, Value::Mapping(sort(child))),
            other => (k, other),
        })
        .collect()
}

/// Merge `from` into `into`; nested mappings merge, anything else is replaced
pub fn deep_merge(into: &mut Mapping, from: Mapping) {
    for (k, v) in from {
        match v {
            Value::Mapping(incoming) => {
                if let Some(Value::Mapping(existing)) = into.get_mut(&k) {
                    deep_merge(existing, incoming);
                    continue;
                }
                into.insert(k, Value::Mapping(incoming));
            }
            other => {
                into.insert(k, other);
            }
        }
    }
}

/// Null, whitespace-only strings, and empty collections are blank
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Sequence(seq) => seq.is_empty(),
        Value::Mapping(map) => map.is_empty(),
        _ => false,
    }
}

/// Render a leaf for reports
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_get_nested() {
        let t = tree("users:\n  show:\n    title: Profile\n");
        assert_eq!(get(&t, "users.show.title"), Some(&Value::from("Profile")));
        assert!(get(&t, "users.show.missing").is_none());
        assert!(get(&t, "users.show.title.deeper").is_none());
    }

    #[test]
    fn test_set_creates_and_replaces() {
        let mut t = tree("users: plain\n");
        set(&mut t, "users.index.title", Value::from("Users"));
        assert_eq!(get(&t, "users.index.title"), Some(&Value::from("Users")));
    }

    #[test]
    fn test_remove_prunes_empty_parents() {
        let mut t = tree("a:\n  b:\n    c: x\n  d: y\n");
        assert_eq!(remove(&mut t, "a.b.c"), Some(Value::from("x")));
        assert!(get(&t, "a.b").is_none());
        assert_eq!(get(&t, "a.d"), Some(&Value::from("y")));
        assert!(remove(&mut t, "a.nope").is_none());
    }

    #[test]
    fn test_numeric_keys_keep_their_type() {
        let mut t = tree("errors:\n  404: Not found\n  500: ''\n");
        assert_eq!(get(&t, "errors.404"), Some(&Value::from("Not found")));

        set(&mut t, "errors.500", Value::from("Server error"));
        assert_eq!(
            serde_yaml::to_string(&t).unwrap(),
            "errors:\n  404: Not found\n  500: Server error\n"
        );

        assert_eq!(remove(&mut t, "errors.404"), Some(Value::from("Not found")));
        assert!(get(&t, "errors.404").is_none());
    }

    #[test]
    fn test_set_path_rebuilds_raw_keys() {
        let t = tree("errors:\n  404: Not found\n");
        let mut rebuilt = Mapping::new();
        for (key, path, value) in leaf_paths(&t) {
            assert_eq!(key, "errors.404");
            set_path(&mut rebuilt, &path, value.clone());
        }
        assert_eq!(rebuilt, t);
    }

    #[test]
    fn test_leaves_order_and_sequences() {
        let t = tree("b:\n  y: 1\n  x: [a, b]\na: text\nempty: {}\n");
        let keys: Vec<String> = leaves(&t).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b.y", "b.x", "a"]);
    }

    #[test]
    fn test_sort_recursive() {
        let t = sort(tree("b:\n  z: 1\n  a: 2\na: 3\n"));
        let keys: Vec<String> = leaves(&t).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b.a", "b.z"]);
    }

    #[test]
    fn test_deep_merge() {
        let mut t = tree("a:\n  x: 1\nb: old\n");
        deep_merge(&mut t, tree("a:\n  y: 2\nb: new\n"));
        assert_eq!(get(&t, "a.x"), Some(&Value::from(1)));
        assert_eq!(get(&t, "a.y"), Some(&Value::from(2)));
        assert_eq!(get(&t, "b"), Some(&Value::from("new")));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&Value::Null));
        assert!(is_blank(&Value::from("  ")));
        assert!(!is_blank(&Value::from("x")));
        assert!(!is_blank(&Value::from(false)));
    }

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(&Value::from("Hi")), "Hi");
        assert_eq!(value_to_string(&Value::from(3)), "3");
        let seq: Value = serde_yaml::from_str("[a, b]").unwrap();
        assert_eq!(value_to_string(&seq), "[\"a\",\"b\"]");
    }
}
