#![forbid(unsafe_code)]

use qm_core::{
    Color, FilterId, FilterType, FilterValue, Geometry, Info, LabelFont, LayerId, Operator,
    Predicate, ShapeKind, Stroke, Style,
};
use sha2::Digest as _;
use std::fmt::Write as _;

#[derive(Clone, Debug)]
pub struct Feature {
    pub(crate) geometry: Geometry,
    pub(crate) info: Info,
    pub(crate) filter_id: Option<FilterId>,
    pub(crate) style: Style,
}

impl Feature {
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    /// The filter currently owning this feature's fill, if any.
    pub fn filter_id(&self) -> Option<FilterId> {
        self.filter_id
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

#[derive(Clone, Debug)]
pub struct Layer {
    pub(crate) id: LayerId,
    pub(crate) query: String,
    pub(crate) shape: ShapeKind,
    pub(crate) size: f64,
    pub(crate) color: Color,
    pub(crate) stroke: Stroke,
    pub(crate) label_field: Option<String>,
    pub(crate) label_color: Color,
    pub(crate) label_font: LabelFont,
    pub(crate) labels: Vec<String>,
    pub(crate) features: Vec<Feature>,
}

impl Layer {
    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn stroke(&self) -> Stroke {
        self.stroke
    }

    pub fn label_field(&self) -> Option<&str> {
        self.label_field.as_deref()
    }

    pub fn label_color(&self) -> Color {
        self.label_color
    }

    pub fn label_font(&self) -> &LabelFont {
        &self.label_font
    }

    /// Attribute names that can be used as on-map labels, in result column order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Hex SHA-256 over every feature's owning filter and resolved style, in feature order.
    pub fn style_digest(&self) -> String {
        let mut hasher = sha2::Sha256::new();
        for feature in &self.features {
            let owner = feature.filter_id.map(|id| id.get() as i64).unwrap_or(-1);
            hasher.update(owner.to_le_bytes());
            let encoded = serde_json::to_vec(&feature.style).unwrap_or_default();
            hasher.update((encoded.len() as u64).to_le_bytes());
            hasher.update(&encoded);
        }
        let digest = hasher.finalize();
        let mut out = String::with_capacity(64);
        for b in digest {
            let _ = write!(&mut out, "{:02x}", b);
        }
        out
    }
}

#[derive(Clone, Debug)]
pub struct Filter {
    pub(crate) id: FilterId,
    pub(crate) layer: LayerId,
    pub(crate) label: Option<String>,
    pub(crate) value_type: Option<FilterType>,
    pub(crate) value: Option<FilterValue>,
    pub(crate) operator: Operator,
    pub(crate) color: Color,
    /// Indices into the layer's features. Derived; refreshed by every recomposition.
    pub(crate) filtered: Vec<usize>,
}

impl Filter {
    pub fn id(&self) -> FilterId {
        self.id
    }

    pub fn layer(&self) -> LayerId {
        self.layer
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn value_type(&self) -> Option<FilterType> {
        self.value_type
    }

    pub fn value(&self) -> Option<&FilterValue> {
        self.value.as_ref()
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Feature indices matched by the last recomposition of this filter's layer.
    pub fn filtered_features(&self) -> &[usize] {
        &self.filtered
    }

    pub fn predicate(&self) -> Predicate<'_> {
        Predicate {
            label: self.label.as_deref(),
            operator: self.operator,
            value: self.value.as_ref(),
            value_type: self.value_type,
        }
    }
}
