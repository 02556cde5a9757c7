//! Nodes and their property lists

use crate::{Property, PropertyType, PropertyValue, SgfError};
use kifu_board::{Color, MovePayload, MovePoint, PointList, SetupChanges};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle of a node inside a [`NodeStore`](crate::NodeStore)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What kind of position a node records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MoveColor {
    /// Annotation only
    #[default]
    None,
    Black,
    White,
    /// Places or removes content without playing a move
    Setup,
}

impl MoveColor {
    pub fn color(self) -> Option<Color> {
        match self {
            MoveColor::Black => Some(Color::Black),
            MoveColor::White => Some(Color::White),
            MoveColor::None | MoveColor::Setup => None,
        }
    }

    pub fn is_move(self) -> bool {
        self.color().is_some()
    }
}

impl From<Color> for MoveColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => MoveColor::Black,
            Color::White => MoveColor::White,
        }
    }
}

/// Where a property of some type lives, or would live, in a node's list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertySlot {
    Occupied(usize),
    Vacant(usize),
}

/// Edit needed to give a property a new value
///
/// Computed without touching the node so the caller can record the edit
/// before performing it.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyEdit {
    Unchanged,
    Insert { index: usize, property: Property },
    Replace { index: usize, value: PropertyValue },
    Remove { index: usize },
}

#[derive(Debug, Clone, Default)]
pub struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    pub(crate) current_variation: Option<NodeId>,

    pub move_color: MoveColor,
    pub move_point: MovePoint,
    pub payload: Option<MovePayload>,
    /// Explicit color to play after this node
    pub to_play: Option<Color>,
    /// Subtree folded in graphical tree views
    pub collapsed: bool,

    /// Sorted by property type, unknown properties by identifier
    properties: Vec<Property>,
}

impl Node {
    pub(crate) fn with_parent(parent: Option<NodeId>) -> Self {
        Self {
            parent,
            ..Default::default()
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    pub fn current_variation(&self) -> Option<NodeId> {
        self.current_variation
    }

    pub fn is_move(&self) -> bool {
        self.move_color.is_move()
    }

    pub fn is_setup(&self) -> bool {
        self.move_color == MoveColor::Setup
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Slot of the property of type `ty`
    ///
    /// A node may hold several [`PropertyType::Unknown`] properties; for
    /// that type this finds the first one. Use
    /// [`find_unknown_property`](Self::find_unknown_property) to address
    /// one by identifier.
    pub fn find_property(&self, ty: PropertyType) -> PropertySlot {
        let index = self.properties.partition_point(|property| property.ty < ty);
        match self.properties.get(index) {
            Some(property) if property.ty == ty => PropertySlot::Occupied(index),
            _ => PropertySlot::Vacant(index),
        }
    }

    pub fn find_unknown_property(&self, identifier: &str) -> PropertySlot {
        let index = self.properties.partition_point(|property| {
            property.ty < PropertyType::Unknown
                || (property.ty == PropertyType::Unknown && unknown_identifier(property) < identifier)
        });
        match self.properties.get(index) {
            Some(property) if property.ty == PropertyType::Unknown && unknown_identifier(property) == identifier => {
                PropertySlot::Occupied(index)
            }
            _ => PropertySlot::Vacant(index),
        }
    }

    /// Raw values of the unknown property `identifier`, identifier first
    pub fn unknown_property(&self, identifier: &str) -> Option<&[String]> {
        match self.find_unknown_property(identifier) {
            PropertySlot::Occupied(index) => match &self.properties[index].value {
                PropertyValue::Unknown(raw) => Some(raw),
                _ => None,
            },
            PropertySlot::Vacant(_) => None,
        }
    }

    pub fn property(&self, ty: PropertyType) -> Option<&PropertyValue> {
        match self.find_property(ty) {
            PropertySlot::Occupied(index) => Some(&self.properties[index].value),
            PropertySlot::Vacant(_) => None,
        }
    }

    pub fn has_property(&self, ty: PropertyType) -> bool {
        matches!(self.find_property(ty), PropertySlot::Occupied(_))
    }

    /// Work out how to make `ty` hold `value` (`None` removes it)
    ///
    /// `same` decides whether the current value already equals the new
    /// one, in which case nothing needs to change. Unknown values are
    /// matched against the unknown property with the same identifier.
    pub fn plan_property_edit<F>(
        &self,
        ty: PropertyType,
        value: Option<PropertyValue>,
        same: F,
    ) -> Result<PropertyEdit, SgfError>
    where
        F: Fn(&PropertyValue, &PropertyValue) -> bool,
    {
        let slot = match value.as_ref().and_then(PropertyValue::unknown_identifier) {
            Some(identifier) if ty == PropertyType::Unknown => self.find_unknown_property(identifier),
            _ => self.find_property(ty),
        };

        let edit = match (slot, value) {
            (PropertySlot::Vacant(_), None) => PropertyEdit::Unchanged,
            (PropertySlot::Occupied(index), None) => PropertyEdit::Remove { index },
            (PropertySlot::Vacant(index), Some(value)) => PropertyEdit::Insert {
                index,
                property: Property::new(ty, value)?,
            },
            (PropertySlot::Occupied(index), Some(value)) => {
                if same(&self.properties[index].value, &value) {
                    PropertyEdit::Unchanged
                } else {
                    let property = Property::new(ty, value)?;
                    PropertyEdit::Replace {
                        index,
                        value: property.into_value(),
                    }
                }
            }
        };

        Ok(edit)
    }

    /// Edit removing the unknown property `identifier`, if present
    pub fn plan_unknown_property_removal(&self, identifier: &str) -> PropertyEdit {
        match self.find_unknown_property(identifier) {
            PropertySlot::Occupied(index) => PropertyEdit::Remove { index },
            PropertySlot::Vacant(_) => PropertyEdit::Unchanged,
        }
    }

    pub fn insert_property(&mut self, index: usize, property: Property) {
        let lower = self.properties.partition_point(|existing| existing.ty < property.ty);
        let upper = self.properties.partition_point(|existing| existing.ty <= property.ty);
        debug_assert!(
            (lower..=upper).contains(&index),
            "property {:?} inserted out of order",
            property.ty
        );
        self.properties.insert(index, property);
    }

    pub fn remove_property(&mut self, index: usize) -> Property {
        self.properties.remove(index)
    }

    /// Swap in a new value, returning the old one
    pub fn replace_property_value(&mut self, index: usize, value: PropertyValue) -> PropertyValue {
        std::mem::replace(&mut self.properties[index].value, value)
    }

    /// Set a property directly, bypassing any undo tracking
    pub fn set_property(&mut self, ty: PropertyType, value: Option<PropertyValue>) -> Result<bool, SgfError> {
        match self.plan_property_edit(ty, value, |old, new| old == new)? {
            PropertyEdit::Unchanged => return Ok(false),
            PropertyEdit::Insert { index, property } => self.insert_property(index, property),
            PropertyEdit::Replace { index, value } => {
                self.replace_property_value(index, value);
            }
            PropertyEdit::Remove { index } => {
                self.remove_property(index);
            }
        }

        Ok(true)
    }

    pub fn number(&self, ty: PropertyType) -> Option<i32> {
        self.property(ty).and_then(PropertyValue::as_number)
    }

    pub fn real(&self, ty: PropertyType) -> Option<f64> {
        self.property(ty).and_then(PropertyValue::as_real)
    }

    /// Emphasis of a "double" annotation such as `GB` or `TE`
    pub fn double(&self, ty: PropertyType) -> Option<crate::Emphasis> {
        self.property(ty).and_then(PropertyValue::as_double)
    }

    pub fn text(&self, ty: PropertyType) -> Option<&str> {
        self.property(ty).and_then(PropertyValue::as_text)
    }

    pub fn point_list(&self, ty: PropertyType) -> Option<&PointList> {
        self.property(ty).and_then(PropertyValue::as_point_list)
    }

    pub fn label_list(&self, ty: PropertyType) -> Option<&crate::LabelList> {
        self.property(ty).and_then(PropertyValue::as_label_list)
    }

    pub fn is_game_info_node(&self) -> bool {
        self.properties.iter().any(|property| property.ty.is_game_info())
    }

    /// Board changes encoded by the `AE`/`AB`/`AW`/`AA` properties
    pub fn setup_changes(&self) -> SetupChanges {
        let list = |ty| self.point_list(ty).cloned().unwrap_or_default();
        SetupChanges {
            remove: list(PropertyType::AddEmpty),
            black: list(PropertyType::AddBlack),
            white: list(PropertyType::AddWhite),
            arrows: list(PropertyType::AddArrows),
        }
    }
}

fn unknown_identifier(property: &Property) -> &str {
    property.value.unknown_identifier().unwrap_or_default()
}
