//! The shopper's chosen variant (color + size).

use serde::{Deserialize, Serialize};

/// Externally chosen color/size pair.  Either half may be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSelection {
    pub color: Option<String>,
    pub size: Option<String>,
}

impl VariantSelection {
    pub fn new(color: Option<&str>, size: Option<&str>) -> Self {
        Self {
            color: color.map(str::to_owned),
            size: size.map(str::to_owned),
        }
    }

    /// Copy with the color advanced to the next entry of `options`.
    pub fn with_next_color(&self, options: &[String]) -> Self {
        Self {
            color: cycle(self.color.as_deref(), options),
            size: self.size.clone(),
        }
    }

    /// Copy with the size advanced to the next entry of `options`.
    pub fn with_next_size(&self, options: &[String]) -> Self {
        Self {
            color: self.color.clone(),
            size: cycle(self.size.as_deref(), options),
        }
    }

    /// Short label for status lines, e.g. `"Black / M"`.
    pub fn label(&self) -> String {
        match (&self.color, &self.size) {
            (Some(c), Some(s)) => format!("{c} / {s}"),
            (Some(c), None) => c.clone(),
            (None, Some(s)) => s.clone(),
            (None, None) => "no selection".into(),
        }
    }
}

/// Next option after `current`, wrapping.  Unset or unknown values start at
/// the first option.
fn cycle(current: Option<&str>, options: &[String]) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let next = current
        .and_then(|c| options.iter().position(|o| o == c))
        .map_or(0, |i| (i + 1) % options.len());
    Some(options[next].clone())
}
