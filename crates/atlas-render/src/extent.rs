//! Map extent: world, one named region, or a custom bounding box.

use anyhow::{Context, Result, bail};
use geo::{BoundingRect, Rect, coord};

use atlas_model::{FeatureSet, Territory};

/// Region names accepted for a regional extent.
pub const REGION_NAMES: [&str; 9] = [
    "The Americas",
    "Eurasia and Africa",
    "East Asia and Pacific",
    "Eastern Europe and Central Asia",
    "EU, EFTA, and North America",
    "Latin America and Caribbean",
    "Middle East and North Africa",
    "South Asia",
    "Sub-Saharan Africa",
];

/// The visible window of the output map.
#[derive(Debug, Clone, PartialEq)]
pub enum Extent {
    /// Every territory in the dataset.
    World,
    /// Territories whose World Bank region falls under the named region.
    Region(String),
    /// A fixed lon/lat window.
    Bbox(Rect<f64>),
}

impl Extent {
    /// Validate a region name against the accepted list.
    pub fn region(name: &str) -> Result<Self> {
        let wanted = normalize(name);
        let matched = REGION_NAMES
            .iter()
            .find(|candidate| normalize(candidate) == wanted)
            .with_context(|| {
                format!(
                    "unknown region '{name}'; expected one of: {}",
                    REGION_NAMES.join(", ")
                )
            })?;
        Ok(Extent::Region((*matched).to_string()))
    }

    /// A bbox extent from `min_lon,min_lat,max_lon,max_lat`.
    pub fn bbox(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Result<Self> {
        if min_lon >= max_lon || min_lat >= max_lat {
            bail!("degenerate bbox: ({min_lon}, {min_lat}) .. ({max_lon}, {max_lat})");
        }
        Ok(Extent::Bbox(Rect::new(
            coord! { x: min_lon, y: min_lat },
            coord! { x: max_lon, y: max_lat },
        )))
    }

    /// True when the record falls inside this extent.
    pub fn includes(&self, record: &Territory) -> bool {
        match self {
            Extent::World => true,
            Extent::Region(name) => record.region_wb.as_deref().is_some_and(|region| {
                let region = normalize(region);
                let labels = wb_labels(name);
                if labels.is_empty() {
                    // Direct label match for names outside the accepted list.
                    normalize(name) == region
                } else {
                    labels.iter().any(|label| normalize(label) == region)
                }
            }),
            Extent::Bbox(window) => record
                .geometry
                .bounding_rect()
                .is_some_and(|rect| rects_overlap(&rect, window)),
        }
    }

    /// The lon/lat window this extent resolves to for the given set.
    pub fn window(&self, set: &FeatureSet) -> Result<Rect<f64>> {
        if let Extent::Bbox(window) = self {
            return Ok(*window);
        }
        let mut min = coord! { x: f64::INFINITY, y: f64::INFINITY };
        let mut max = coord! { x: f64::NEG_INFINITY, y: f64::NEG_INFINITY };
        let mut any = false;
        for record in set.iter().filter(|record| self.includes(record)) {
            let Some(rect) = record.geometry.bounding_rect() else {
                continue;
            };
            any = true;
            min.x = min.x.min(rect.min().x);
            min.y = min.y.min(rect.min().y);
            max.x = max.x.max(rect.max().x);
            max.y = max.y.max(rect.max().y);
        }
        if !any {
            bail!("no territories fall inside extent {self:?}");
        }
        Ok(Rect::new(min, max))
    }
}

/// World Bank `REGION_WB` labels covered by an accepted region name.
///
/// The attribute table carries seven labels; the composite names span
/// several of them. The two European splits cannot be told apart from
/// `REGION_WB` alone, so both cover the whole Europe & Central Asia label
/// and differ only in whether North America joins the window.
fn wb_labels(name: &str) -> &'static [&'static str] {
    match name {
        "The Americas" => &["North America", "Latin America & Caribbean"],
        "Eurasia and Africa" => &[
            "Europe & Central Asia",
            "East Asia & Pacific",
            "Middle East & North Africa",
            "South Asia",
            "Sub-Saharan Africa",
        ],
        "East Asia and Pacific" => &["East Asia & Pacific"],
        "Eastern Europe and Central Asia" => &["Europe & Central Asia"],
        "EU, EFTA, and North America" => &["Europe & Central Asia", "North America"],
        "Latin America and Caribbean" => &["Latin America & Caribbean"],
        "Middle East and North Africa" => &["Middle East & North Africa"],
        "South Asia" => &["South Asia"],
        "Sub-Saharan Africa" => &["Sub-Saharan Africa"],
        _ => &[],
    }
}

/// Region labels in the data use `&` where the accepted names spell `and`.
fn normalize(name: &str) -> String {
    name.to_ascii_lowercase()
        .replace('&', "and")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn rects_overlap(a: &Rect<f64>, b: &Rect<f64>) -> bool {
    a.min().x <= b.max().x
        && a.max().x >= b.min().x
        && a.min().y <= b.max().y
        && a.max().y >= b.min().y
}

#[cfg(test)]
mod tests {
    use geo::{MultiPolygon, polygon};

    use super::*;

    fn record(code: &str, region_wb: Option<&str>, x: f64) -> Territory {
        let mut record = Territory::new(
            code,
            MultiPolygon(vec![polygon![
                (x: x, y: 0.0),
                (x: x + 1.0, y: 0.0),
                (x: x + 1.0, y: 1.0),
                (x: x, y: 1.0),
                (x: x, y: 0.0),
            ]]),
        );
        record.region_wb = region_wb.map(str::to_string);
        record
    }

    #[test]
    fn unknown_region_lists_the_valid_names() {
        let err = Extent::region("Atlantis").unwrap_err();
        assert!(format!("{err:#}").contains("South Asia"));
    }

    #[test]
    fn region_matching_tolerates_ampersands() {
        let extent = Extent::region("Latin America and Caribbean").unwrap();
        let inside = record("MEX", Some("Latin America & Caribbean"), 0.0);
        let outside = record("DEU", Some("Europe & Central Asia"), 10.0);
        assert!(extent.includes(&inside));
        assert!(!extent.includes(&outside));
    }

    const WB_REGION_LABELS: [&str; 7] = [
        "East Asia & Pacific",
        "Europe & Central Asia",
        "Latin America & Caribbean",
        "Middle East & North Africa",
        "North America",
        "South Asia",
        "Sub-Saharan Africa",
    ];

    #[test]
    fn every_accepted_region_selects_territories() {
        let records = WB_REGION_LABELS
            .iter()
            .copied()
            .enumerate()
            .map(|(i, label)| {
                let code = format!("A{i:02}");
                record(&code, Some(label), i as f64 * 5.0)
            })
            .collect();
        let set = FeatureSet::new(records);
        for name in REGION_NAMES {
            let extent = Extent::region(name).unwrap();
            assert!(extent.window(&set).is_ok(), "{name} selects nothing");
        }
    }

    #[test]
    fn composite_regions_cover_their_member_labels() {
        let americas = Extent::region("The Americas").unwrap();
        assert!(americas.includes(&record("CAN", Some("North America"), 0.0)));
        assert!(americas.includes(&record("MEX", Some("Latin America & Caribbean"), 0.0)));
        assert!(!americas.includes(&record("IND", Some("South Asia"), 0.0)));

        let eurasia = Extent::region("Eurasia and Africa").unwrap();
        assert!(eurasia.includes(&record("NGA", Some("Sub-Saharan Africa"), 0.0)));
        assert!(eurasia.includes(&record("JPN", Some("East Asia & Pacific"), 0.0)));
        assert!(!eurasia.includes(&record("CAN", Some("North America"), 0.0)));
    }

    #[test]
    fn world_window_covers_everything() {
        let set = FeatureSet::new(vec![record("AAA", None, 0.0), record("BBB", None, 10.0)]);
        let window = Extent::World.window(&set).unwrap();
        assert_eq!(window.min().x, 0.0);
        assert_eq!(window.max().x, 11.0);
    }

    #[test]
    fn degenerate_bbox_is_rejected() {
        assert!(Extent::bbox(10.0, 0.0, 10.0, 1.0).is_err());
    }

    #[test]
    fn empty_region_window_is_an_error() {
        let set = FeatureSet::new(vec![record("AAA", None, 0.0)]);
        let extent = Extent::region("South Asia").unwrap();
        assert!(extent.window(&set).is_err());
    }
}
