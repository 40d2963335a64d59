use regex::Regex;
use smallvec::SmallVec;

/// Positional capture values extracted from a matched path.
///
/// Stack-allocated for the common case of a handful of placeholders.
pub type CaptureVec = SmallVec<[String; 4]>;

/// Normalize a path or template before compilation or matching.
///
/// Leading and trailing slashes are trimmed and a single leading slash is
/// re-applied, so `/users/`, `users` and `//users//` all normalize to
/// `/users`. The root normalizes to `/` itself, never the empty string.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// A compiled route template.
///
/// Templates use `{name}` placeholders, each matching exactly one non-empty
/// path segment (`[^/]+`; a placeholder never spans a `/`). Every other
/// segment is matched literally. The root template `/` matches only the
/// literal root.
#[derive(Debug, Clone)]
pub struct PathPattern {
    template: String,
    regex: Regex,
    param_names: Vec<String>,
}

impl PathPattern {
    /// Compile a template. The template is normalized first, so `/users/`
    /// and `users` compile to the same pattern.
    #[allow(clippy::expect_used)]
    pub fn compile(template: &str) -> Self {
        let template = normalize_path(template);
        if template == "/" {
            return Self {
                template,
                regex: Regex::new("^/$").expect("root pattern is a valid regex"),
                param_names: Vec::new(),
            };
        }

        let mut pattern = String::with_capacity(template.len() + 8);
        pattern.push('^');
        let mut param_names = Vec::with_capacity(template.matches('{').count());

        // The normalized template always starts with '/', so the first
        // split element is empty and skipped.
        for segment in template.split('/').skip(1) {
            pattern.push('/');
            if segment.len() > 2 && segment.starts_with('{') && segment.ends_with('}') {
                param_names.push(segment[1..segment.len() - 1].to_string());
                pattern.push_str("([^/]+)");
            } else {
                pattern.push_str(&regex::escape(segment));
            }
        }
        pattern.push('$');

        // Literal segments are escaped above, so compilation cannot fail.
        let regex = Regex::new(&pattern).expect("escaped template is a valid regex");
        Self {
            template,
            regex,
            param_names,
        }
    }

    /// Test a normalized path, returning the captured placeholder values in
    /// template left-to-right order. Captures are raw strings; parsing is
    /// the handler's job. A non-match is `None`, never an error.
    ///
    /// The path must already be normalized (see [`normalize_path`]); the
    /// router does that once per dispatch.
    pub fn matches(&self, path: &str) -> Option<CaptureVec> {
        let caps = self.regex.captures(path)?;
        let mut values = CaptureVec::new();
        for i in 1..caps.len() {
            if let Some(m) = caps.get(i) {
                values.push(m.as_str().to_string());
            }
        }
        Some(values)
    }

    /// The normalized template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Placeholder names in order of appearance.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }
}
