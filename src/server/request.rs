use std::collections::HashMap;

use http::Method;
use serde_json::Value;
use tracing::debug;
use url::form_urlencoded;

/// Parsed HTTP request data handed to the dispatcher by the host runtime.
///
/// Header names are stored lowercase so lookups are case-insensitive.
/// Query, form and JSON input merge into one view (see [`Request::all`]);
/// later sources win: a JSON field overrides a form field overrides a
/// query parameter of the same name.
pub struct Request {
    method: Method,
    path: String,
    headers: HashMap<String, String>,
    query: HashMap<String, String>,
    form: HashMap<String, String>,
    json: Option<Value>,
}

impl Request {
    /// Build a request from the pieces a host runtime has at hand.
    ///
    /// `target` is the request target, query string included. The body is
    /// interpreted by content type: `application/json` parses as JSON
    /// input, `application/x-www-form-urlencoded` as form input, anything
    /// else is ignored. A malformed JSON body is treated as absent.
    pub fn from_parts(
        method: Method,
        target: &str,
        headers: HashMap<String, String>,
        body: &[u8],
    ) -> Self {
        let headers: HashMap<String, String> = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();

        let (path, query_str) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target, None),
        };
        let query = query_str.map(parse_query).unwrap_or_default();

        let content_type = headers
            .get("content-type")
            .map(String::as_str)
            .unwrap_or("");
        let mut form = HashMap::new();
        let mut json = None;
        if !body.is_empty() {
            if content_type.contains("application/json") {
                match serde_json::from_slice::<Value>(body) {
                    Ok(value) => json = Some(value),
                    Err(err) => debug!(error = %err, "request body is not valid JSON"),
                }
            } else if content_type.contains("application/x-www-form-urlencoded") {
                form = form_urlencoded::parse(body)
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect();
            }
        }

        Self {
            method,
            path: path.to_string(),
            headers,
            query,
            form,
            json,
        }
    }

    /// Bare request without headers or body.
    pub fn new(method: Method, target: &str) -> Self {
        Self::from_parts(method, target, HashMap::new(), &[])
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Raw request path, query stripped. The dispatcher normalizes before
    /// matching, so trailing slashes are preserved here.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Parsed JSON body, if the request carried one.
    pub fn json_body(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    /// Single merged-input lookup. JSON wins over form wins over query.
    pub fn input(&self, key: &str) -> Option<Value> {
        if let Some(Value::Object(map)) = &self.json {
            if let Some(value) = map.get(key) {
                return Some(value.clone());
            }
        }
        if let Some(value) = self.form.get(key) {
            return Some(Value::String(value.clone()));
        }
        self.query.get(key).map(|value| Value::String(value.clone()))
    }

    pub fn has(&self, key: &str) -> bool {
        self.input(key).is_some()
    }

    /// The full merged input map: query, then form, then JSON object
    /// fields, later sources overriding earlier ones.
    pub fn all(&self) -> HashMap<String, Value> {
        let mut merged: HashMap<String, Value> = self
            .query
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        merged.extend(
            self.form
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone()))),
        );
        if let Some(Value::Object(map)) = &self.json {
            merged.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged
    }

    /// Merged input restricted to the given keys.
    pub fn only(&self, keys: &[&str]) -> HashMap<String, Value> {
        keys.iter()
            .filter_map(|key| self.input(key).map(|value| ((*key).to_string(), value)))
            .collect()
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
