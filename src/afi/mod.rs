// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module describes flowspec NLRI data structures for ipv4 and ipv6 address families
use crate::error::*;
use crate::util::*;

pub mod ipv4;
pub use ipv4::*;
pub mod ipv6;
pub use ipv6::*;
pub mod fsoper;
pub use fsoper::*;
pub mod flowspec;
pub use flowspec::*;

/// Flowspec rule of any supported address family
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum FSRule {
    /// AFI 1 SAFI 133
    IPv4(FS4Nlri),
    /// AFI 2 SAFI 133
    IPv6(FS6Nlri),
}
impl FSRule {
    /// Compares rules of the same address family.
    /// Rules of different families never compete, so it is an error.
    pub fn compare(&self, other: &FSRule) -> Result<crate::order::FSPrecedence, FSError> {
        match (self, other) {
            (FSRule::IPv4(a), FSRule::IPv4(b)) => Ok(a.compare(b)),
            (FSRule::IPv6(a), FSRule::IPv6(b)) => Ok(a.compare(b)),
            _ => Err(FSError::static_str("Flowspec rules address family mismatch")),
        }
    }
    pub fn len(&self) -> usize {
        match self {
            FSRule::IPv4(r) => r.len(),
            FSRule::IPv6(r) => r.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
impl From<FS4Nlri> for FSRule {
    fn from(r: FS4Nlri) -> Self {
        FSRule::IPv4(r)
    }
}
impl From<FS6Nlri> for FSRule {
    fn from(r: FS6Nlri) -> Self {
        FSRule::IPv6(r)
    }
}
impl std::fmt::Display for FSRule {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            FSRule::IPv4(r) => write!(f, "ipv4 flowspec {}", r),
            FSRule::IPv6(r) => write!(f, "ipv6 flowspec {}", r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::FSPrecedence;

    #[test]
    fn test_rule_families() {
        let r4: FSRule = FS4Nlri::new(vec![FSComponent::prefix(
            FS_TYPE_DST_PREFIX,
            "10.0.0.0/8".parse().unwrap(),
        )])
        .into();
        let r6: FSRule = FS6Nlri::new(vec![FSComponent::prefix(
            FS_TYPE_DST_PREFIX,
            "2a02::/32".parse().unwrap(),
        )])
        .into();
        assert_eq!(r4.compare(&r4.clone()).unwrap(), FSPrecedence::Equal);
        assert_eq!(r6.compare(&r6.clone()).unwrap(), FSPrecedence::Equal);
        assert!(r4.compare(&r6).is_err());
        assert_eq!(r4.len(), 1);
        assert!(!r6.is_empty());
        assert_eq!(r4.to_string(), "ipv4 flowspec dst:10.0.0.0/8");
        assert_eq!(r6.to_string(), "ipv6 flowspec dst:2a02::/32");
    }
}
