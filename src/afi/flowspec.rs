// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module describes flowspec NLRI as a list of typed components.
//!
//! Components are built from already parsed data, see
//! draft-ietf-idr-rfc5575bis and draft-ietf-idr-flow-spec-v6.
use crate::afi::*;
use crate::order::{flow_rule_cmp, FSPrecedence};
#[cfg(feature = "serialization")]
use serde::de::{self, Visitor};
#[cfg(feature = "serialization")]
use serde::Serialize;

pub const FS_TYPE_DST_PREFIX: u8 = 1;
pub const FS_TYPE_SRC_PREFIX: u8 = 2;
/// IP protocol for ipv4, next header for ipv6
pub const FS_TYPE_PROTO: u8 = 3;
pub const FS_TYPE_PORT: u8 = 4;
pub const FS_TYPE_DST_PORT: u8 = 5;
pub const FS_TYPE_SRC_PORT: u8 = 6;
pub const FS_TYPE_ICMP_TYPE: u8 = 7;
pub const FS_TYPE_ICMP_CODE: u8 = 8;
pub const FS_TYPE_TCP_FLAGS: u8 = 9;
pub const FS_TYPE_PACKET_LENGTH: u8 = 10;
pub const FS_TYPE_DSCP: u8 = 11;
pub const FS_TYPE_FRAGMENT: u8 = 12;
/// ipv6 only
pub const FS_TYPE_FLOW_LABEL: u8 = 13;

/// Returns component type name for diagnostics
pub fn fs_type_name(typecode: u8) -> &'static str {
    match typecode {
        FS_TYPE_DST_PREFIX => "dst",
        FS_TYPE_SRC_PREFIX => "src",
        FS_TYPE_PROTO => "proto",
        FS_TYPE_PORT => "port",
        FS_TYPE_DST_PORT => "dport",
        FS_TYPE_SRC_PORT => "sport",
        FS_TYPE_ICMP_TYPE => "icmp-type",
        FS_TYPE_ICMP_CODE => "icmp-code",
        FS_TYPE_TCP_FLAGS => "tcp-flags",
        FS_TYPE_PACKET_LENGTH => "pkt-len",
        FS_TYPE_DSCP => "dscp",
        FS_TYPE_FRAGMENT => "fragment",
        FS_TYPE_FLOW_LABEL => "flow-label",
        _ => "unknown",
    }
}
/// Checks that component type carries ip prefix
pub fn fs_type_is_prefix(typecode: u8) -> bool {
    typecode == FS_TYPE_DST_PREFIX || typecode == FS_TYPE_SRC_PREFIX
}

/// FlowSpec prefix component item
pub trait FSItem: Clone + std::fmt::Debug + std::fmt::Display {
    /// Address width in bits, 32 or 128
    fn width(&self) -> u8;
    /// Leading bits which are not encoded in NLRI
    fn offset(&self) -> u8 {
        0
    }
    fn prefixlen(&self) -> usize;
    /// Address as unsigned number with all bits outside the pattern cleared
    fn norm_value(&self) -> u128;
    /// Checks that truncated to the shorter length both prefixes are equal
    fn overlaps(&self, other: &Self) -> bool;
}
impl FSItem for BgpAddrV4 {
    fn width(&self) -> u8 {
        32
    }
    fn prefixlen(&self) -> usize {
        self.prefixlen as usize
    }
    fn norm_value(&self) -> u128 {
        self.norm_subnet_u32() as u128
    }
    fn overlaps(&self, other: &Self) -> bool {
        BgpAddrV4::overlaps(self, other)
    }
}

/// FlowSpec ipv6 prefix with offset.
///
/// Pattern occupies bits offset..offset+prefixlen, leading offset bits must be zero.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FS6 {
    ipv6: BgpAddrV6,
    offset: u8,
}
impl FS6 {
    /// Constructs offset-aware prefix, bits set in the offset are rejected.
    /// ```
    /// use zettafs::prelude::*;
    ///
    /// assert!(FS6::new(4, "0200::/8".parse().unwrap()).is_ok());
    /// assert!(FS6::new(8, "0200::/8".parse().unwrap()).unwrap_err().is_invalid_prefix_encoding());
    /// ```
    pub fn new(ofs: u8, v6: BgpAddrV6) -> Result<FS6, FSError> {
        if ofs > 128 || v6.prefixlen > 128 {
            return Err(FSError::invalid_prefix_encoding(ofs, v6.prefixlen));
        }
        if v6.addr_u128() & mask_u128(ofs) != 0 {
            return Err(FSError::invalid_prefix_encoding(ofs, v6.prefixlen));
        }
        Ok(FS6 {
            ipv6: v6,
            offset: ofs,
        })
    }
    /// Constructs prefix without offset
    pub fn new_nofs(v6: BgpAddrV6) -> Result<FS6, FSError> {
        FS6::new(0, v6)
    }
    pub fn prefix(&self) -> &BgpAddrV6 {
        &self.ipv6
    }
    pub fn offset(&self) -> u8 {
        self.offset
    }
    /// pattern end bit
    fn pattern_end(&self) -> u8 {
        std::cmp::min(self.offset as u16 + self.ipv6.prefixlen as u16, 128) as u8
    }
}
impl FSItem for FS6 {
    fn width(&self) -> u8 {
        128
    }
    fn offset(&self) -> u8 {
        self.offset
    }
    fn prefixlen(&self) -> usize {
        self.ipv6.prefixlen as usize
    }
    fn norm_value(&self) -> u128 {
        self.ipv6.addr_u128() & mask_u128(self.pattern_end())
    }
    fn overlaps(&self, other: &Self) -> bool {
        let common = std::cmp::min(self.pattern_end(), other.pattern_end());
        (self.ipv6.addr_u128() & mask_u128(common)) == (other.ipv6.addr_u128() & mask_u128(common))
    }
}
impl std::fmt::Display for FS6 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.offset == 0 {
            write!(f, "{}", self.ipv6)
        } else {
            write!(f, "{} offset {}", self.ipv6, self.offset)
        }
    }
}
impl std::str::FromStr for FS6 {
    type Err = FSError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let pfx = match parts.next() {
            None => return Err(FSError::static_str("Empty ipv6 flowspec prefix")),
            Some(p) => p.parse::<BgpAddrV6>()?,
        };
        let ofs = match (parts.next(), parts.next()) {
            (None, _) => 0,
            (Some("offset"), Some(n)) => n.parse::<u8>()?,
            _ => {
                return Err(FSError::from_string(format!(
                    "Invalid ipv6 flowspec prefix: {:?}",
                    s
                )))
            }
        };
        if parts.next().is_some() {
            return Err(FSError::from_string(format!(
                "Invalid ipv6 flowspec prefix: {:?}",
                s
            )));
        }
        FS6::new(ofs, pfx)
    }
}

/// Component value - opaque binary string or prefix
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub enum FSValue<T: FSItem> {
    Bytes(Vec<u8>),
    Prefix(T),
}
impl<T: FSItem> std::fmt::Display for FSValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            FSValue::Prefix(p) => write!(f, "{}", p),
            FSValue::Bytes(b) => {
                write!(f, "0x")?;
                for c in b.iter() {
                    write!(f, "{:02x}", c)?;
                }
                Ok(())
            }
        }
    }
}

/// FlowSpec NLRI component
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct FSComponent<T: FSItem> {
    /// component type code
    pub typecode: u8,
    pub value: FSValue<T>,
}
impl<T: FSItem> FSComponent<T> {
    pub fn new(typecode: u8, value: FSValue<T>) -> FSComponent<T> {
        FSComponent { typecode, value }
    }
    /// Constructs prefix component
    pub fn prefix(typecode: u8, pfx: T) -> FSComponent<T> {
        FSComponent::new(typecode, FSValue::Prefix(pfx))
    }
    /// Constructs component with opaque binary value
    pub fn bytes(typecode: u8, v: Vec<u8>) -> FSComponent<T> {
        FSComponent::new(typecode, FSValue::Bytes(v))
    }
    /// Constructs component from numeric operators list
    /// ```
    /// use zettafs::prelude::*;
    ///
    /// let c = FS4Component::numeric(FS_TYPE_PROTO, &[FSOperValItem::equal(6)]).unwrap();
    /// assert_eq!(c.value, FSValue::Bytes(vec![0x81, 6]));
    /// ```
    pub fn numeric(typecode: u8, opers: &[FSOperValItem]) -> Result<FSComponent<T>, FSError> {
        Ok(FSComponent::bytes(typecode, encode_opers(opers)?))
    }
    /// Constructs component from bitmask operators list
    pub fn bitmask(typecode: u8, opers: &[FSOperMaskItem]) -> Result<FSComponent<T>, FSError> {
        Ok(FSComponent::bytes(typecode, encode_opers(opers)?))
    }
    pub fn is_prefix(&self) -> bool {
        matches!(self.value, FSValue::Prefix(_))
    }
}
impl<T: FSItem> std::fmt::Display for FSComponent<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", fs_type_name(self.typecode), self.value)
    }
}

/// FlowSpec NLRI - rule as a list of components in ascending type order
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct FSNlri<T: FSItem> {
    components: Vec<FSComponent<T>>,
}
impl<T: FSItem> FSNlri<T> {
    pub fn new(components: Vec<FSComponent<T>>) -> FSNlri<T> {
        FSNlri { components }
    }
    pub fn components(&self) -> &[FSComponent<T>] {
        &self.components
    }
    pub fn len(&self) -> usize {
        self.components.len()
    }
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
    /// Checks that component types are ascending, repeated types are tolerated
    pub fn is_ordered(&self) -> bool {
        self.components
            .windows(2)
            .all(|w| w[0].typecode <= w[1].typecode)
    }
    /// Compares precedence with another rule
    pub fn compare(&self, other: &FSNlri<T>) -> FSPrecedence {
        flow_rule_cmp(self, other)
    }
    /// Strict ordering predicate for sorting: true when other rule has precedence,
    /// so ascending sort puts rules with higher precedence at the end.
    /// ```
    /// use zettafs::prelude::*;
    ///
    /// let a = FS4Nlri::new(vec![FSComponent::prefix(FS_TYPE_DST_PREFIX, "10.0.0.0/8".parse().unwrap())]);
    /// let b = FS4Nlri::new(vec![FSComponent::prefix(FS_TYPE_DST_PREFIX, "10.1.0.0/16".parse().unwrap())]);
    /// assert!(a.precedes(&b));
    /// assert!(!b.precedes(&a));
    /// ```
    pub fn precedes(&self, other: &FSNlri<T>) -> bool {
        flow_rule_cmp(self, other) == FSPrecedence::BHasPrecedence
    }
}
impl<T: FSItem> From<Vec<FSComponent<T>>> for FSNlri<T> {
    fn from(v: Vec<FSComponent<T>>) -> Self {
        FSNlri::new(v)
    }
}
impl<T: FSItem> std::iter::FromIterator<FSComponent<T>> for FSNlri<T> {
    fn from_iter<I: IntoIterator<Item = FSComponent<T>>>(iter: I) -> Self {
        FSNlri::new(iter.into_iter().collect())
    }
}
impl<T: FSItem> std::fmt::Display for FSNlri<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut first: bool = true;
        for c in self.components.iter() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", c)?;
            first = false;
        }
        Ok(())
    }
}

pub type FS4Component = FSComponent<BgpAddrV4>;
pub type FS6Component = FSComponent<FS6>;
/// FlowSpec ipv4 NLRI
pub type FS4Nlri = FSNlri<BgpAddrV4>;
/// FlowSpec ipv6 NLRI
pub type FS6Nlri = FSNlri<FS6>;

#[cfg(feature = "serialization")]
impl serde::Serialize for FS6 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}
#[cfg(feature = "serialization")]
struct FS6Visitor;

#[cfg(feature = "serialization")]
impl<'de> Visitor<'de> for FS6Visitor {
    type Value = FS6;
    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a ipv6 prefix with optional offset")
    }
    fn visit_str<E>(self, value: &str) -> Result<FS6, E>
    where
        E: serde::de::Error,
    {
        value.parse::<FS6>().map_err(de::Error::custom)
    }
}
#[cfg(feature = "serialization")]
impl<'de> serde::Deserialize<'de> for FS6 {
    fn deserialize<D>(deserializer: D) -> Result<FS6, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_string(FS6Visitor)
    }
}
