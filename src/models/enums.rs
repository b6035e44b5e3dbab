use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a listing enum that is stored as a lower-case string in the backend.
///
/// Generates `as_str`, a case-insensitive `parse` and `Display`.
macro_rules! listing_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// The backend spelling of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }

            /// Case-insensitive parse of the backend spelling. Unknown input yields `None`.
            pub fn parse(input: &str) -> Option<Self> {
                let lowered = input.trim().to_lowercase();
                match lowered.as_str() {
                    $( $text => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

listing_enum! {
    /// Kind of property being advertised
    pub enum PropertyType {
        Apartment => "apartment",
        House => "house",
        Studio => "studio",
        Room => "room",
        Commercial => "commercial",
        Land => "land",
        #[default]
        Other => "other",
    }
}

listing_enum! {
    /// Lifecycle state of a listing
    pub enum PropertyStatus {
        /// Not yet published
        #[default]
        Draft => "draft",
        /// Active and visible
        Published => "published",
        /// Has been rented
        Rented => "rented",
        /// Manually archived by the owner
        Archived => "archived",
        /// Listing duration has ended
        Expired => "expired",
    }
}

listing_enum! {
    /// Advertisement tier
    pub enum AdType {
        #[default]
        Standard => "standard",
        Featured => "featured",
    }
}

listing_enum! {
    /// Paid promotion state
    pub enum PromotionStatus {
        Active => "active",
        #[default]
        Inactive => "inactive",
        Expired => "expired",
    }
}

listing_enum! {
    /// Who can see a listing
    pub enum Visibility {
        /// Visible to everyone
        #[default]
        Public => "public",
        /// Only visible to the owner
        Private => "private",
        /// Not shown in listings but reachable by direct link
        Unlisted => "unlisted",
    }
}
