//! Introduction profile: the typed form data behind the generated page.
//!
//! Profiles are TOML documents. Loading trims every string field, drops
//! rows that carry no data (empty bullets, all-empty course rows, links
//! missing either half) and fills the divider/picture defaults, so the
//! generators can assume clean values.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_DIVIDER: &str = "|";
const DEFAULT_PICTURE: &str = "images/me-and-girlfriend.jpg";

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("failed to read profile {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse profile {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub name: Name,
    #[serde(default)]
    pub mascot: Mascot,
    #[serde(default)]
    pub divider: String,
    #[serde(default)]
    pub picture: Picture,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default, rename = "course")]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub quote: Option<Quote>,
    #[serde(default, rename = "link")]
    pub links: Vec<Link>,
    #[serde(default)]
    pub acknowledgment: Acknowledgment,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Name {
    pub first: String,
    #[serde(default)]
    pub middle: String,
    #[serde(default)]
    pub preferred: String,
    pub last: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Mascot {
    #[serde(default)]
    pub adjective: String,
    #[serde(default)]
    pub animal: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Picture {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub caption: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Course {
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Quote {
    pub text: String,
    #[serde(default)]
    pub author: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Acknowledgment {
    #[serde(default)]
    pub statement: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub initials: String,
}

impl Profile {
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let raw = fs::read_to_string(path).map_err(|source| ProfileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw).map_err(|source| ProfileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        let mut profile: Self = toml::from_str(raw)?;
        profile.normalize();
        Ok(profile)
    }

    /// Trim every field, drop empty rows and apply defaults.
    pub fn normalize(&mut self) {
        trim_in_place(&mut self.name.first);
        trim_in_place(&mut self.name.middle);
        trim_in_place(&mut self.name.preferred);
        trim_in_place(&mut self.name.last);

        trim_in_place(&mut self.mascot.adjective);
        trim_in_place(&mut self.mascot.animal);

        trim_in_place(&mut self.divider);
        if self.divider.is_empty() {
            self.divider = DEFAULT_DIVIDER.to_string();
        }

        trim_in_place(&mut self.picture.source);
        trim_in_place(&mut self.picture.caption);
        if self.picture.source.is_empty() {
            self.picture.source = DEFAULT_PICTURE.to_string();
        }

        self.paragraphs.iter_mut().for_each(trim_in_place);

        self.bullets.iter_mut().for_each(trim_in_place);
        self.bullets.retain(|bullet| !bullet.is_empty());

        for course in &mut self.courses {
            trim_in_place(&mut course.department);
            trim_in_place(&mut course.number);
            trim_in_place(&mut course.name);
            trim_in_place(&mut course.reason);
        }
        self.courses.retain(|course| !course.is_empty());

        if let Some(quote) = &mut self.quote {
            trim_in_place(&mut quote.text);
            trim_in_place(&mut quote.author);
        }

        for link in &mut self.links {
            trim_in_place(&mut link.text);
            trim_in_place(&mut link.url);
        }
        self.links
            .retain(|link| !link.text.is_empty() && !link.url.is_empty());

        trim_in_place(&mut self.acknowledgment.statement);
        trim_in_place(&mut self.acknowledgment.date);
        trim_in_place(&mut self.acknowledgment.initials);
    }

    /// The first two paragraphs joined with a space; either alone when the
    /// other is missing.
    pub fn personal_statement(&self) -> String {
        let first = self.paragraphs.first().map(String::as_str).unwrap_or("");
        let second = self.paragraphs.get(1).map(String::as_str).unwrap_or("");
        if !first.is_empty() && !second.is_empty() {
            format!("{first} {second}")
        } else if !first.is_empty() {
            first.to_string()
        } else {
            second.to_string()
        }
    }

    pub fn bullet(&self, index: usize) -> &str {
        self.bullets.get(index).map(String::as_str).unwrap_or("")
    }
}

impl Name {
    pub fn middle_initial(&self) -> String {
        self.middle
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default()
    }
}

impl Course {
    fn is_empty(&self) -> bool {
        self.department.is_empty()
            && self.number.is_empty()
            && self.name.is_empty()
            && self.reason.is_empty()
    }

    /// One-line course description. Interior spacing is kept even for
    /// empty fields; only the ends are trimmed.
    pub fn summary(&self, divider: &str) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.department, self.number, divider, self.name, divider, self.reason
        )
        .trim()
        .to_string()
    }
}

impl Acknowledgment {
    pub fn formatted_date(&self) -> String {
        format_date(&self.date)
    }

    /// The explicit initials override when present, otherwise derived from
    /// the name.
    pub fn resolved_initials(&self, name: &Name) -> String {
        if self.initials.is_empty() {
            initials(&name.first, &name.last)
        } else {
            self.initials.clone()
        }
    }
}

/// `"MM-DD-YYYY"` to `"M/D/YYYY"`, dropping leading zeros from month and
/// day. Anything that does not split into three dash-parts with numeric
/// month and day is returned unchanged.
pub fn format_date(raw: &str) -> String {
    let parts: Vec<&str> = raw.split('-').collect();
    if parts.len() == 3 {
        if let (Ok(month), Ok(day)) = (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
            return format!("{month}/{day}/{}", parts[2]);
        }
    }
    raw.to_string()
}

/// First character of the first and last name, uppercased.
pub fn initials(first: &str, last: &str) -> String {
    let mut out = String::new();
    if let Some(c) = first.chars().next() {
        out.extend(c.to_uppercase());
    }
    if let Some(c) = last.chars().next() {
        out.extend(c.to_uppercase());
    }
    out
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}
