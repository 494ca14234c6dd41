//! Record types for the three collections, with their draft (create) and
//! patch (partial update) companions.

/// Declares a label vocabulary: the known labels as unit variants plus an
/// `Other` variant that keeps any other label verbatim. Values serialize as
/// their label.
macro_rules! status_vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            /// A label outside the known set.
            Other(String),
        }

        impl $name {
            /// Exact label lookup; an unknown label becomes `Other`.
            pub fn from_label(label: impl Into<String>) -> Self {
                let label = label.into();
                $(
                    if label == $label {
                        return $name::$variant;
                    }
                )+
                $name::Other(label)
            }

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Other(label) => label.as_str(),
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Other(_))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        /// Known labels match case-insensitively; any other non-blank label
        /// is kept as `Other`.
        impl std::str::FromStr for $name {
            type Err = $crate::core::ConsoleError;

            fn from_str(s: &str) -> $crate::core::Result<Self> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($label) {
                        return Ok($name::$variant);
                    }
                )+
                if s.is_empty() {
                    return Err($crate::core::ConsoleError::Config(format!(
                        "{} label must not be blank",
                        stringify!($name)
                    )));
                }
                Ok($name::Other(s.to_string()))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                <String as ::serde::Deserialize>::deserialize(deserializer).map($name::from_label)
            }
        }
    };
}

pub mod ai_log;
pub mod app;
pub mod user;

pub use ai_log::{AiLog, AiLogPatch, LogLevel, NewAiLog};
pub use app::{App, AppPatch, AppStatus, NewApp, ScoreBand};
pub use user::{NewUser, StatusFilter, User, UserPatch, UserStatus};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::{EntityKind, RecordId};

/// A record kind that can live in a [`crate::storage::RecordTable`].
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    const KIND: EntityKind;

    /// Caller-supplied fields for `create`; never carries an `Id`.
    type Draft: Send + 'static;

    /// Named top-level fields for `update`; `None` leaves a field untouched.
    type Patch: Send + 'static;

    fn id(&self) -> RecordId;

    /// Build a fresh record from a draft, filling kind-specific defaults.
    fn from_draft(id: RecordId, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Shallow merge: replace exactly the fields present in `patch`.
    fn apply_patch(&mut self, patch: Self::Patch);
}
