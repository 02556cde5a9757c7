//! Property values

use crate::ValueType;
use kifu_board::{Color, Point, PointList};
use serde::{Deserialize, Serialize};

/// Strength of an annotation such as "good for black" (`GB[1]` / `GB[2]`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emphasis {
    Normal,
    Emphasized,
}

/// Text shown at a board point (`LB`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    pub point: Point,
    pub text: String,
}

/// Labels ordered by point, at most one per point
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LabelList(Vec<Label>);

impl LabelList {
    pub fn new(mut labels: Vec<Label>) -> Self {
        labels.sort_by_key(|label| label.point);
        labels.dedup_by_key(|label| label.point);
        Self(labels)
    }

    pub fn labels(&self) -> &[Label] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, point: Point) -> Option<&str> {
        self.0
            .binary_search_by_key(&point, |label| label.point)
            .ok()
            .map(|index| self.0[index].text.as_str())
    }
}

/// Figure (diagram) descriptor (`FG`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Figure {
    pub flags: u32,
    pub diagram_name: Option<String>,
}

/// Value of a single property
///
/// Complex values are owned by the property holding them and move, never
/// copy, between the store and the undo log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    None,
    Number(i32),
    Real(f64),
    Double(Emphasis),
    Color(Color),
    SimpleText(String),
    Text(String),
    PointList(PointList),
    VectorList(Vec<(Point, Point)>),
    LabelList(LabelList),
    Figure(Figure),
    /// Raw values of a property this store does not understand; the
    /// first string is the property identifier.
    Unknown(Vec<String>),
}

impl PropertyValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            PropertyValue::None => ValueType::None,
            PropertyValue::Number(_) => ValueType::Number,
            PropertyValue::Real(_) => ValueType::Real,
            PropertyValue::Double(_) => ValueType::Double,
            PropertyValue::Color(_) => ValueType::Color,
            PropertyValue::SimpleText(_) => ValueType::SimpleText,
            PropertyValue::Text(_) => ValueType::Text,
            PropertyValue::PointList(_) => ValueType::PointList,
            PropertyValue::VectorList(_) => ValueType::VectorList,
            PropertyValue::LabelList(_) => ValueType::LabelList,
            PropertyValue::Figure(_) => ValueType::Figure,
            PropertyValue::Unknown(_) => ValueType::Unknown,
        }
    }

    pub fn as_number(&self) -> Option<i32> {
        match self {
            PropertyValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            PropertyValue::Real(real) => Some(*real),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::SimpleText(text) | PropertyValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_point_list(&self) -> Option<&PointList> {
        match self {
            PropertyValue::PointList(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_label_list(&self) -> Option<&LabelList> {
        match self {
            PropertyValue::LabelList(list) => Some(list),
            _ => None,
        }
    }

    /// Identifier of an unknown property, kept as its first raw value
    pub fn unknown_identifier(&self) -> Option<&str> {
        match self {
            PropertyValue::Unknown(raw) => raw.first().map(String::as_str),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            PropertyValue::Color(color) => Some(*color),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<Emphasis> {
        match self {
            PropertyValue::Double(emphasis) => Some(*emphasis),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_list_one_label_per_point() {
        let labels = LabelList::new(vec![
            Label { point: Point::new(4, 4), text: "B".into() },
            Label { point: Point::new(1, 1), text: "A".into() },
            Label { point: Point::new(4, 4), text: "C".into() },
        ]);

        assert_eq!(labels.len(), 2);
        assert_eq!(labels.labels()[0].point, Point::new(1, 1));
        assert_eq!(labels.get(Point::new(1, 1)), Some("A"));
        assert_eq!(labels.get(Point::new(2, 2)), None);
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(PropertyValue::Number(7).as_number(), Some(7));
        assert_eq!(PropertyValue::Text("hi".into()).as_text(), Some("hi"));
        assert_eq!(PropertyValue::Real(1.5).as_number(), None);
        assert_eq!(PropertyValue::Unknown(vec!["XX".into()]).value_type(), ValueType::Unknown);
    }
}
