//! Closed tag tables for platforms, form factors and optional booleans
//!
//! Configs name platforms and form factors with lowercase tags; generated
//! code refers to them by symbolic constants. Both directions are exhaustive
//! matches so a tag added to config data without a table entry is rejected
//! instead of silently mapped.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Error returned when a tag is not part of a closed table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag {
    /// Which table was consulted ("platform", "form factor")
    pub kind: &'static str,
    /// The rejected tag
    pub tag: String,
    /// Every tag the table accepts
    pub accepted: Vec<&'static str>,
}

impl UnknownTag {
    /// Accepted tags as a comma separated list
    pub fn accepted_list(&self) -> String {
        self.accepted.join(", ")
    }
}

impl fmt::Display for UnknownTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown {} tag '{}' (expected one of: {})",
            self.kind,
            self.tag,
            self.accepted_list()
        )
    }
}

impl std::error::Error for UnknownTag {}

/// Target platform of a study
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    Windows,
    Mac,
    Linux,
    ChromeOs,
    Android,
    AndroidWebview,
    Ios,
    Fuchsia,
}

impl Platform {
    /// Every supported platform, in table order
    pub const ALL: [Platform; 8] = [
        Platform::Windows,
        Platform::Mac,
        Platform::Linux,
        Platform::ChromeOs,
        Platform::Android,
        Platform::AndroidWebview,
        Platform::Ios,
        Platform::Fuchsia,
    ];

    /// Tag used in config documents
    pub fn tag(self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Mac => "mac",
            Platform::Linux => "linux",
            Platform::ChromeOs => "chromeos",
            Platform::Android => "android",
            Platform::AndroidWebview => "android_webview",
            Platform::Ios => "ios",
            Platform::Fuchsia => "fuchsia",
        }
    }

    /// Symbolic constant used in generated code
    pub fn symbol(self) -> &'static str {
        match self {
            Platform::Windows => "PLATFORM_WINDOWS",
            Platform::Mac => "PLATFORM_MAC",
            Platform::Linux => "PLATFORM_LINUX",
            Platform::ChromeOs => "PLATFORM_CHROMEOS",
            Platform::Android => "PLATFORM_ANDROID",
            Platform::AndroidWebview => "PLATFORM_ANDROID_WEBVIEW",
            Platform::Ios => "PLATFORM_IOS",
            Platform::Fuchsia => "PLATFORM_FUCHSIA",
        }
    }
}

impl FromStr for Platform {
    type Err = UnknownTag;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "windows" => Ok(Platform::Windows),
            "mac" => Ok(Platform::Mac),
            "linux" => Ok(Platform::Linux),
            "chromeos" => Ok(Platform::ChromeOs),
            "android" => Ok(Platform::Android),
            "android_webview" => Ok(Platform::AndroidWebview),
            "ios" => Ok(Platform::Ios),
            "fuchsia" => Ok(Platform::Fuchsia),
            other => Err(UnknownTag {
                kind: "platform",
                tag: other.to_string(),
                accepted: Platform::ALL.iter().map(|p| p.tag()).collect(),
            }),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Device class a study is restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormFactor {
    Desktop,
    Phone,
    Tablet,
}

impl FormFactor {
    pub const ALL: [FormFactor; 3] = [FormFactor::Desktop, FormFactor::Phone, FormFactor::Tablet];

    pub fn tag(self) -> &'static str {
        match self {
            FormFactor::Desktop => "desktop",
            FormFactor::Phone => "phone",
            FormFactor::Tablet => "tablet",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            FormFactor::Desktop => "DESKTOP",
            FormFactor::Phone => "PHONE",
            FormFactor::Tablet => "TABLET",
        }
    }
}

impl FromStr for FormFactor {
    type Err = UnknownTag;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "desktop" => Ok(FormFactor::Desktop),
            "phone" => Ok(FormFactor::Phone),
            "tablet" => Ok(FormFactor::Tablet),
            other => Err(UnknownTag {
                kind: "form factor",
                tag: other.to_string(),
                accepted: FormFactor::ALL.iter().map(|f| f.tag()).collect(),
            }),
        }
    }
}

impl fmt::Display for FormFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Tri-state flag: declared true, declared false, or not declared at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OptionalBool {
    #[default]
    Missing,
    True,
    False,
}

impl OptionalBool {
    pub fn symbol(self) -> &'static str {
        match self {
            OptionalBool::Missing => "OPTIONAL_BOOL_MISSING",
            OptionalBool::True => "OPTIONAL_BOOL_TRUE",
            OptionalBool::False => "OPTIONAL_BOOL_FALSE",
        }
    }
}

impl From<Option<bool>> for OptionalBool {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => OptionalBool::Missing,
            Some(true) => OptionalBool::True,
            Some(false) => OptionalBool::False,
        }
    }
}

// Output models serialize the symbol, not the tag.
macro_rules! serialize_as_symbol {
    ($($ty:ty),*) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.symbol())
                }
            }
        )*
    };
}

serialize_as_symbol!(Platform, FormFactor, OptionalBool);
