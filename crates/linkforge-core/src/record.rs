//! # Link Record Data Model
//!
//! Defines [`LinkRecord`] — one validated entry in the compiled corpus —
//! together with the closed [`InputType`] and [`PayWall`] enumerations.
//!
//! The `Serialize` derive on `LinkRecord` is load-bearing: the output
//! artifact's per-record key order is the field declaration order below,
//! so reordering fields changes the emitted JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One validated link entry.
///
/// Constructed only by the record validator in `linkforge-build`; the
/// fields are public for read access but a `LinkRecord` in a corpus has
/// already had every schema check applied: non-empty required fields,
/// enum membership, deduplicated `types`, and a parseable `url` template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Opaque numeric identifier from the upstream source, globally
    /// unique across the corpus. Kept as a string so leading zeros and
    /// very large values survive unchanged.
    pub id: String,
    /// Short service slug, no internal whitespace.
    pub provider: String,
    /// Human-readable name shown to the user.
    pub display: String,
    /// URL template; placeholder syntax validated at build time.
    pub url: String,
    /// Input types this service accepts, deduplicated, source order.
    pub types: Vec<InputType>,
    #[serde(rename = "payWall")]
    pub pay_wall: PayWall,
    /// Coverage region; `"Global"` when the source omits it.
    pub region: String,
    /// Sort weight for the consumer; no uniqueness constraint.
    pub priority: i64,
    pub description: String,
    /// Whether the consumer may open this link without confirmation.
    pub autorun: bool,
}

/// Default region applied when a source record omits `region`.
pub const DEFAULT_REGION: &str = "Global";

/// All input types a link can declare.
///
/// Matching is exact and case-sensitive: `IPV6` and `VIN` are upper-case
/// by upstream convention while every other value is lower-case, and no
/// normalization rule is inferred from that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputType {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "alias")]
    Alias,
    #[serde(rename = "domain")]
    Domain,
    #[serde(rename = "email-address")]
    EmailAddress,
    #[serde(rename = "ip-address")]
    IpAddress,
    #[serde(rename = "IPV6")]
    Ipv6,
    #[serde(rename = "phone-number")]
    PhoneNumber,
    #[serde(rename = "hashtag")]
    Hashtag,
    #[serde(rename = "url")]
    Url,
    #[serde(rename = "gps-coordinates")]
    GpsCoordinates,
    #[serde(rename = "crypto-address")]
    CryptoAddress,
    #[serde(rename = "VIN")]
    Vin,
    #[serde(rename = "hash")]
    Hash,
    #[serde(rename = "any")]
    Any,
}

impl InputType {
    /// Returns every input type in declaration order.
    pub fn all() -> &'static [InputType] {
        &[
            Self::Name,
            Self::Alias,
            Self::Domain,
            Self::EmailAddress,
            Self::IpAddress,
            Self::Ipv6,
            Self::PhoneNumber,
            Self::Hashtag,
            Self::Url,
            Self::GpsCoordinates,
            Self::CryptoAddress,
            Self::Vin,
            Self::Hash,
            Self::Any,
        ]
    }

    /// The exact string form used in source YAML and in the artifact.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Alias => "alias",
            Self::Domain => "domain",
            Self::EmailAddress => "email-address",
            Self::IpAddress => "ip-address",
            Self::Ipv6 => "IPV6",
            Self::PhoneNumber => "phone-number",
            Self::Hashtag => "hashtag",
            Self::Url => "url",
            Self::GpsCoordinates => "gps-coordinates",
            Self::CryptoAddress => "crypto-address",
            Self::Vin => "VIN",
            Self::Hash => "hash",
            Self::Any => "any",
        }
    }
}

impl FromStr for InputType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputType::all()
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or(())
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paywall status of the service behind a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayWall {
    /// No payment required.
    Free,
    /// Usable for free with paid tiers.
    Freemium,
    /// Payment required.
    Paid,
}

impl PayWall {
    pub fn all() -> &'static [PayWall] {
        &[Self::Free, Self::Freemium, Self::Paid]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Freemium => "Freemium",
            Self::Paid => "Paid",
        }
    }
}

impl FromStr for PayWall {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PayWall::all()
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or(())
    }
}

impl fmt::Display for PayWall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
