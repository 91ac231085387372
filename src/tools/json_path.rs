//! JSONPath filtering over parsed JSON, plus the recent-expression history.
//!
//! Expressions follow RFC 9535: `$.a.b`, `$['a']`, `[n]` and `[-n]`, `[*]`,
//! `..` descent, `[0, 2]` / `['a', 'b']` unions, slices, and filters such as
//! `[?(@.age > 25)]` or `[?@.admin]`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json_path::JsonPath;

use crate::error::{Result, ToolError};
use crate::tools::json_format;

pub const MAX_HISTORY: usize = 20;

/// Example expressions offered in the UI, with a short description.
pub const EXAMPLES: &[(&str, &str)] = &[
    ("$.items[*]", "All items"),
    ("$.user.name", "Field"),
    ("$.users[0]", "Index"),
    ("$.users[?(@.age > 25)]", "Filter"),
    ("$..['name', 'email']", "Multi"),
    ("$", "Root"),
];

/// Values matched by one filter run.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMatches(pub Vec<Value>);

impl PathMatches {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A single match renders as itself, several as an array, none as `[]`.
    pub fn render(&self) -> String {
        match self.0.as_slice() {
            [] => "[]".to_string(),
            [one] => json_format::render_pretty(one, 2),
            many => json_format::render_pretty(&Value::Array(many.to_vec()), 2),
        }
    }

    pub fn summary(&self) -> String {
        match self.len() {
            0 => "No matches found for this expression".to_string(),
            1 => "Found 1 match".to_string(),
            n => format!("Found {n} matches"),
        }
    }
}

/// Compiles an expression; surrounding whitespace is ignored.
pub fn compile(expression: &str) -> Result<JsonPath> {
    JsonPath::parse(expression.trim()).map_err(|e| {
        log::warn!("json path {expression:?} rejected: {e}");
        ToolError::InvalidPath(e.to_string())
    })
}

pub fn filter(input: &str, expression: &str) -> Result<PathMatches> {
    let root = json_format::parse(input)?;
    let path = compile(expression)?;
    let found: Vec<Value> = path.query(&root).all().into_iter().cloned().collect();
    log::debug!("json path {expression:?} matched {} node(s)", found.len());
    Ok(PathMatches(found))
}

/// Recently applied expressions, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathHistory {
    entries: Vec<String>,
}

#[derive(Serialize)]
struct HistoryFile {
    version: u32,
    history: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredHistory {
    Versioned { history: Vec<String> },
    Bare(Vec<String>),
}

impl PathHistory {
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Moves `expr` to the front, evicting the oldest entry past [`MAX_HISTORY`].
    pub fn record(&mut self, expr: &str) {
        let expr = expr.trim();
        if expr.is_empty() {
            return;
        }
        self.entries.retain(|e| e != expr);
        self.entries.insert(0, expr.to_string());
        self.entries.truncate(MAX_HISTORY);
    }

    /// Unreadable data yields an empty history.
    pub fn from_json(raw: &str) -> Self {
        let entries = match serde_json::from_str::<StoredHistory>(raw) {
            Ok(StoredHistory::Versioned { history }) | Ok(StoredHistory::Bare(history)) => history,
            Err(e) => {
                log::warn!("discarding unreadable path history: {e}");
                Vec::new()
            }
        };
        let mut h = PathHistory::default();
        for e in entries.iter().rev() {
            h.record(e);
        }
        h
    }

    pub fn to_json(&self) -> String {
        let file = HistoryFile {
            version: 1,
            history: self.entries.clone(),
        };
        serde_json::to_string_pretty(&file).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DOC: &str = r#"{
        "user": {"name": "ada", "email": "ada@example.com"},
        "users": [
            {"name": "bob", "age": 22, "email": "bob@example.com"},
            {"name": "cy", "age": 31},
            {"name": "di", "age": 40, "admin": true}
        ],
        "items": [1, 2, 3]
    }"#;

    fn values(expr: &str) -> Vec<Value> {
        filter(DOC, expr).unwrap().0
    }

    #[test]
    fn root_and_members() {
        assert_eq!(values("$").len(), 1);
        assert_eq!(values("$.user.name"), vec![json!("ada")]);
        assert_eq!(values("$['user']['email']"), vec![json!("ada@example.com")]);
        assert!(values("$.nope").is_empty());
    }

    #[test]
    fn indices_and_wildcards() {
        assert_eq!(values("$.items[*]"), vec![json!(1), json!(2), json!(3)]);
        assert_eq!(values("$.items[-1]"), vec![json!(3)]);
        assert_eq!(values("$.items[0, 2]"), vec![json!(1), json!(3)]);
        assert_eq!(values("$.users[0].name"), vec![json!("bob")]);
        assert_eq!(values("$.users.*.name").len(), 3);
        assert!(values("$.items[9]").is_empty());
    }

    #[test]
    fn recursive_descent_and_union() {
        let names = values("$..name");
        assert_eq!(names, vec![json!("ada"), json!("bob"), json!("cy"), json!("di")]);
        let multi = values("$..['name', 'email']");
        assert!(multi.contains(&json!("ada@example.com")));
        assert!(multi.contains(&json!("di")));
    }

    #[test]
    fn filters() {
        let older = values("$.users[?(@.age > 25)].name");
        assert_eq!(older, vec![json!("cy"), json!("di")]);
        assert_eq!(values("$.users[?(@.admin)].name"), vec![json!("di")]);
        assert_eq!(values("$.users[?(@.name == 'bob')].age"), vec![json!(22)]);
        assert_eq!(values("$.users[?(@.age <= 31)]").len(), 2);
    }

    #[test]
    fn every_example_compiles() {
        for (expr, _) in EXAMPLES {
            assert!(compile(expr).is_ok(), "{expr}");
        }
        assert!(compile("  $.user  ").is_ok());
    }

    #[test]
    fn rendering() {
        assert_eq!(filter(DOC, "$.missing").unwrap().render(), "[]");
        assert_eq!(filter(DOC, "$.user.name").unwrap().render(), "\"ada\"");
        assert_eq!(filter(DOC, "$.items[0,1]").unwrap().render(), "[\n  1,\n  2\n]");
        assert_eq!(filter(DOC, "$.items[*]").unwrap().summary(), "Found 3 matches");
    }

    #[test]
    fn rejects_bad_expressions() {
        for bad in ["user", "$.", "$[", "$['x", "$[?(@.a ~ 1)]", "$.a b", "$..[name, email]"] {
            assert!(matches!(filter(DOC, bad), Err(ToolError::InvalidPath(_))), "{bad}");
        }
        assert!(matches!(filter("{", "$"), Err(ToolError::ParseError { .. })));
    }

    #[test]
    fn history_is_lru_and_bounded() {
        let mut h = PathHistory::default();
        for i in 0..25 {
            h.record(&format!("$.a{i}"));
        }
        assert_eq!(h.entries().len(), MAX_HISTORY);
        assert_eq!(h.entries()[0], "$.a24");
        h.record("$.a10");
        assert_eq!(h.entries()[0], "$.a10");
        assert_eq!(h.entries().iter().filter(|e| *e == "$.a10").count(), 1);
        h.record("   ");
        assert_eq!(h.entries()[0], "$.a10");
    }

    #[test]
    fn history_persistence_formats() {
        let mut h = PathHistory::default();
        h.record("$.b");
        h.record("$.a");
        let stored = h.to_json();
        assert!(stored.contains("\"version\": 1"));
        assert_eq!(PathHistory::from_json(&stored), h);
        assert_eq!(PathHistory::from_json(r#"["$.a", "$.b"]"#), h);
        assert!(PathHistory::from_json("not json").entries().is_empty());
    }
}
