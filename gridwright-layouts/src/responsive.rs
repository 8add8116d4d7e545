use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::ops::Deref;
use std::ops::DerefMut;
use std::path::Path;

use color_eyre::Result;
use color_eyre::eyre::bail;
use serde::Deserialize;
use serde::Serialize;

use super::Arrangement;
use super::Breakpoints;
use super::LayoutItem;
use super::Rect;
use super::Size;
use super::Violation;

#[derive(Debug, Default, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(transparent)]
/// One dashboard's arrangements, keyed by breakpoint name
pub struct ResponsiveLayout(BTreeMap<String, Vec<LayoutItem>>);

impl Deref for ResponsiveLayout {
    type Target = BTreeMap<String, Vec<LayoutItem>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ResponsiveLayout {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<BTreeMap<String, Vec<LayoutItem>>> for ResponsiveLayout {
    fn from(layouts: BTreeMap<String, Vec<LayoutItem>>) -> Self {
        Self(layouts)
    }
}

impl ResponsiveLayout {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let layout: Self = match path.extension() {
            Some(extension) if extension == "yaml" || extension == "yml" => {
                serde_yaml::from_reader(BufReader::new(File::open(path)?))?
            }
            Some(extension) if extension == "json" => {
                serde_json::from_reader(BufReader::new(File::open(path)?))?
            }
            _ => bail!("responsive layouts must be json or yaml files"),
        };

        Ok(layout)
    }

    /// Compact every breakpoint's arrangement.
    #[must_use]
    pub fn tidy(&self, breakpoints: &Breakpoints) -> Self {
        Self(
            self.iter()
                .map(|(breakpoint, items)| {
                    (
                        breakpoint.clone(),
                        breakpoints.tidy_layout(items.as_slice(), breakpoint),
                    )
                })
                .collect(),
        )
    }

    /// Place a new widget on every tier of `breakpoints` and add it to the
    /// arrangements, returning where it went on each tier.
    ///
    /// Tiers without an arrangement yet get one containing only the new widget.
    pub fn insert_widget(
        &mut self,
        id: &str,
        size: Size,
        breakpoints: &Breakpoints,
    ) -> BTreeMap<String, Rect> {
        let mut placements = BTreeMap::new();

        for breakpoint in breakpoints.names() {
            let items = self.entry(breakpoint.to_string()).or_default();
            let rect = breakpoints.place_new_widget(items.as_slice(), size, breakpoint);

            tracing::debug!(
                "placing '{}' on '{}' at ({}, {}) with size {}x{}",
                id,
                breakpoint,
                rect.x,
                rect.y,
                rect.w,
                rect.h
            );

            items.push(LayoutItem::new(id, rect.x, rect.y, rect.w, rect.h));
            placements.insert(breakpoint.to_string(), rect);
        }

        placements
    }

    /// Broken invariants per breakpoint; breakpoints without any are omitted.
    #[must_use]
    pub fn violations(&self, breakpoints: &Breakpoints) -> BTreeMap<String, Vec<Violation>> {
        self.iter()
            .map(|(breakpoint, items)| {
                (
                    breakpoint.clone(),
                    breakpoints.violations(items.as_slice(), breakpoint),
                )
            })
            .filter(|(_, violations)| !violations.is_empty())
            .collect()
    }
}
