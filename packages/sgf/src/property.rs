//! Property types and typed property values

use crate::{PropertyValue, SgfError};
use serde::{Deserialize, Serialize};

/// Shape of the values a property type holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    None,
    Number,
    Real,
    Double,
    Color,
    SimpleText,
    Text,
    PointList,
    /// Point list that may legitimately be empty (`VW[]`, `TB[]`)
    EmptyPointList,
    VectorList,
    LabelList,
    /// Figure descriptor, or no value at all (`FG[]`)
    Figure,
    Unknown,
}

impl ValueType {
    /// Whether a value of type `found` may be stored under this type
    pub fn accepts(self, found: ValueType) -> bool {
        match self {
            ValueType::EmptyPointList => found == ValueType::PointList,
            ValueType::Figure => matches!(found, ValueType::Figure | ValueType::None),
            expected => expected == found,
        }
    }
}

macro_rules! property_types {
    ($($variant:ident => ($id:literal, $value:ident)),+ $(,)?) => {
        /// Annotation kinds a node can carry
        ///
        /// Variants are declared in the order properties are kept on a
        /// node.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum PropertyType {
            $($variant,)+
            /// Property not known to this store; raw values are kept
            Unknown,
        }

        impl PropertyType {
            pub const ALL: &'static [PropertyType] = &[$(PropertyType::$variant,)+ PropertyType::Unknown];

            /// SGF identifier, empty for [`PropertyType::Unknown`]
            pub fn sgf_id(self) -> &'static str {
                match self {
                    $(PropertyType::$variant => $id,)+
                    PropertyType::Unknown => "",
                }
            }

            pub fn value_type(self) -> ValueType {
                match self {
                    $(PropertyType::$variant => ValueType::$value,)+
                    PropertyType::Unknown => ValueType::Unknown,
                }
            }

            pub fn from_sgf_id(id: &str) -> Result<Self, SgfError> {
                match id {
                    $($id => Ok(PropertyType::$variant),)+
                    _ => Err(SgfError::UnknownIdentifier(id.to_string())),
                }
            }
        }
    };
}

property_types! {
    // Setup
    AddBlack => ("AB", PointList),
    AddWhite => ("AW", PointList),
    AddEmpty => ("AE", PointList),
    AddArrows => ("AA", PointList),

    // Move related
    Ko => ("KO", None),
    MoveNumber => ("MN", Number),

    // Node annotation
    Comment => ("C", Text),
    EvenPosition => ("DM", Double),
    GoodForBlack => ("GB", Double),
    GoodForWhite => ("GW", Double),
    Hotspot => ("HO", Double),
    NodeName => ("N", SimpleText),
    Unclear => ("UC", Double),
    Value => ("V", Real),

    // Move annotation
    BadMove => ("BM", Double),
    Doubtful => ("DO", None),
    Interesting => ("IT", None),
    Tesuji => ("TE", Double),

    // Markup
    Arrow => ("AR", VectorList),
    Circle => ("CR", PointList),
    Dim => ("DD", EmptyPointList),
    Label => ("LB", LabelList),
    Line => ("LN", VectorList),
    Cross => ("MA", PointList),
    Selected => ("SL", PointList),
    Square => ("SQ", PointList),
    Triangle => ("TR", PointList),

    // Root
    Application => ("AP", SimpleText),
    Charset => ("CA", SimpleText),
    FileFormat => ("FF", Number),
    GameType => ("GM", Number),
    Style => ("ST", Number),
    BoardSize => ("SZ", Number),

    // Game info
    Annotator => ("AN", SimpleText),
    BlackRank => ("BR", SimpleText),
    BlackTeam => ("BT", SimpleText),
    Copyright => ("CP", SimpleText),
    Date => ("DT", SimpleText),
    Event => ("EV", SimpleText),
    GameName => ("GN", SimpleText),
    GameComment => ("GC", Text),
    Opening => ("ON", SimpleText),
    Overtime => ("OT", SimpleText),
    PlayerBlack => ("PB", SimpleText),
    Place => ("PC", SimpleText),
    PlayerWhite => ("PW", SimpleText),
    Result => ("RE", SimpleText),
    Round => ("RO", SimpleText),
    Rules => ("RU", SimpleText),
    Source => ("SO", SimpleText),
    TimeLimit => ("TM", Real),
    User => ("US", SimpleText),
    WhiteRank => ("WR", SimpleText),
    WhiteTeam => ("WT", SimpleText),
    Handicap => ("HA", Number),
    Komi => ("KM", Real),

    // Timing
    BlackTimeLeft => ("BL", Real),
    WhiteTimeLeft => ("WL", Real),
    BlackMovesLeft => ("OB", Number),
    WhiteMovesLeft => ("OW", Number),

    // Miscellaneous
    Figure => ("FG", Figure),
    PrintMoveMode => ("PM", Number),
    View => ("VW", EmptyPointList),
    BlackTerritory => ("TB", EmptyPointList),
    WhiteTerritory => ("TW", EmptyPointList),
}

impl PropertyType {
    /// Properties describing the whole game rather than one position
    pub fn is_game_info(self) -> bool {
        (PropertyType::Annotator..=PropertyType::Komi).contains(&self)
    }

    pub fn is_setup(self) -> bool {
        (PropertyType::AddBlack..=PropertyType::AddArrows).contains(&self)
    }

    pub fn is_markup(self) -> bool {
        (PropertyType::Arrow..=PropertyType::Triangle).contains(&self)
    }
}

/// A typed annotation attached to a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub(crate) ty: PropertyType,
    pub(crate) value: PropertyValue,
}

impl Property {
    pub fn new(ty: PropertyType, value: PropertyValue) -> Result<Self, SgfError> {
        let found = value.value_type();
        if !ty.value_type().accepts(found) {
            return Err(SgfError::ValueMismatch {
                property: ty,
                expected: ty.value_type(),
                found,
            });
        }

        Ok(Self { ty, value })
    }

    pub fn ty(&self) -> PropertyType {
        self.ty
    }

    pub fn value(&self) -> &PropertyValue {
        &self.value
    }

    pub fn into_value(self) -> PropertyValue {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kifu_board::{Point, PointList};

    #[test]
    fn test_identifier_lookup() {
        for ty in PropertyType::ALL.iter().filter(|ty| **ty != PropertyType::Unknown) {
            assert_eq!(PropertyType::from_sgf_id(ty.sgf_id()), Ok(*ty));
        }

        assert_eq!(
            PropertyType::from_sgf_id("XX"),
            Err(SgfError::UnknownIdentifier("XX".to_string()))
        );
    }

    #[test]
    fn test_game_info_range() {
        assert!(PropertyType::PlayerBlack.is_game_info());
        assert!(PropertyType::Komi.is_game_info());
        assert!(PropertyType::Handicap.is_game_info());
        assert!(!PropertyType::BoardSize.is_game_info());
        assert!(!PropertyType::BlackTimeLeft.is_game_info());
        assert!(PropertyType::AddArrows.is_setup());
        assert!(PropertyType::Label.is_markup());
    }

    #[test]
    fn test_value_type_validation() {
        assert!(Property::new(PropertyType::Komi, PropertyValue::Real(6.5)).is_ok());
        assert!(Property::new(PropertyType::Figure, PropertyValue::None).is_ok());
        assert!(Property::new(
            PropertyType::View,
            PropertyValue::PointList(PointList::default())
        )
        .is_ok());

        let error = Property::new(
            PropertyType::AddBlack,
            PropertyValue::Text("(3, 3)".into()),
        )
        .unwrap_err();
        assert_eq!(
            error,
            SgfError::ValueMismatch {
                property: PropertyType::AddBlack,
                expected: ValueType::PointList,
                found: ValueType::Text,
            }
        );

        let stones = PointList::new(vec![Point::new(3, 3)]);
        let property = Property::new(PropertyType::AddBlack, PropertyValue::PointList(stones.clone())).unwrap();
        assert_eq!(property.value().as_point_list(), Some(&stones));
    }
}
