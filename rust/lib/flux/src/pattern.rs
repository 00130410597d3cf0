/// A compiled MQTT-style path pattern.
///
/// - `+` matches exactly one level
/// - `#` matches the remaining levels, including none (last segment only)
///
/// Levels are separated by `/`.
///
/// ```ignore
/// let p = Pattern::parse("inbox/panel/+/#");
/// assert!(p.matches("inbox/panel/comment/17"));
/// assert!(!p.matches("inbox/comments"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Exact(String),
    Single,
    Rest,
}

impl Pattern {
    /// Compile a pattern string. A `#` anywhere but last is treated literally.
    pub fn parse(raw: &str) -> Self {
        let parts: Vec<&str> = raw.split('/').collect();
        let last = parts.len() - 1;
        let segments = parts
            .iter()
            .enumerate()
            .map(|(i, part)| match *part {
                "+" => Segment::Single,
                "#" if i == last => Segment::Rest,
                other => Segment::Exact(other.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// Whether the concrete path `topic` matches.
    pub fn matches(&self, topic: &str) -> bool {
        let mut levels = topic.split('/');
        for segment in &self.segments {
            match segment {
                Segment::Rest => return true,
                Segment::Single => {
                    if levels.next().is_none() {
                        return false;
                    }
                }
                Segment::Exact(want) => match levels.next() {
                    Some(level) if level == want => {}
                    _ => return false,
                },
            }
        }
        levels.next().is_none()
    }
}
