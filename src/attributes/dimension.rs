//! Width/height value normalization

/// Which dimension a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    #[must_use]
    pub fn attribute(self) -> &'static str {
        match self {
            Axis::Width => "width",
            Axis::Height => "height",
        }
    }

    #[must_use]
    pub fn from_attribute(name: &str) -> Option<Self> {
        match name {
            "width" => Some(Axis::Width),
            "height" => Some(Axis::Height),
            _ => None,
        }
    }
}

/// Normalize an authored width/height into a concrete pixel count
///
/// Accepted forms: a plain integer (`300`), a pixel length (`300px`, decimals
/// truncate), and for widths only a percentage of `content_max_width` when one
/// is configured. Everything else, including zero, yields `None` and is
/// treated as an absent attribute.
#[must_use]
pub fn normalize_dimension(value: &str, axis: Axis, content_max_width: Option<u32>) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let pixels: Option<f64> = if let Some(px) = value.strip_suffix("px") {
        parse_length(px.trim_end())
    } else if let Some(percent) = value.strip_suffix('%') {
        match (axis, content_max_width) {
            (Axis::Width, Some(max_width)) => {
                let ratio = parse_length(percent.trim_end())?;
                Some((ratio / 100.0 * f64::from(max_width)).round())
            }
            _ => None,
        }
    } else {
        value.parse::<u32>().ok().map(f64::from)
    };
    let pixels = pixels?;

    if pixels < 1.0 || pixels > f64::from(u32::MAX) {
        return None;
    }
    Some(pixels as u32)
}

fn parse_length(raw: &str) -> Option<f64> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    let value: f64 = raw.parse().ok()?;
    value.is_finite().then_some(value.trunc())
}
