// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module describes ipv6 prefix used in flowspec prefix components

use crate::afi::*;
#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};
use std::net::Ipv6Addr;

/// ipv6 prefix
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct BgpAddrV6 {
    /// network prefix
    pub addr: Ipv6Addr,
    /// prefix length 0..128
    pub prefixlen: u8,
}
impl Default for BgpAddrV6 {
    fn default() -> Self {
        BgpAddrV6 {
            addr: Ipv6Addr::UNSPECIFIED,
            prefixlen: 0,
        }
    }
}
impl BgpAddrV6 {
    /// Constructs new ipv6 prefix
    /// ```
    /// use std::net::Ipv6Addr;
    /// use zettafs::prelude::BgpAddrV6;
    ///
    /// let pfx = BgpAddrV6::new(Ipv6Addr::new(0x2a02,0,0,0,0,0,0,0),32);
    /// ```
    pub fn new(address: Ipv6Addr, prefix_len: u8) -> BgpAddrV6 {
        BgpAddrV6 {
            addr: address,
            prefixlen: prefix_len,
        }
    }
    pub(crate) fn addr_u128(&self) -> u128 {
        getn_u128(&self.addr.octets())
    }
    fn norm_subnet_u128(&self) -> u128 {
        self.addr_u128() & mask_u128(self.prefixlen)
    }
    /// if given subnet is in this subnet
    /// ```
    /// use std::net::Ipv6Addr;
    /// use zettafs::prelude::BgpAddrV6;
    ///
    /// assert!(BgpAddrV6::new(Ipv6Addr::new(0x2a02,0,0,0,0,0,0,0),32).contains(&BgpAddrV6::new(Ipv6Addr::new(0x2a02,0,0,0,0,0,0,1),128)));
    /// ```
    pub fn contains(&self, a: &BgpAddrV6) -> bool {
        self.prefixlen <= a.prefixlen && self.in_subnet(&a.addr)
    }
    /// Check if two subnets have common addresses
    pub fn overlaps(&self, a: &BgpAddrV6) -> bool {
        self.contains(a) || a.contains(self)
    }
    /// Check if IP in this subnet
    /// ```
    /// use zettafs::prelude::BgpAddrV6;
    /// use std::net::Ipv6Addr;
    ///
    /// assert!(BgpAddrV6::new(Ipv6Addr::new(0x2a02,0,0,0,0,0,0,0),32).in_subnet(&Ipv6Addr::new(0x2a02,0,0,0,0,0,0,1)));
    /// ```
    pub fn in_subnet(&self, a: &std::net::Ipv6Addr) -> bool {
        (getn_u128(&a.octets()) & mask_u128(self.prefixlen)) == self.norm_subnet_u128()
    }
    /// Returns first IP address (network address) from subnet
    /// ```
    /// use std::net::Ipv6Addr;
    /// use zettafs::prelude::BgpAddrV6;
    ///
    /// assert_eq!(BgpAddrV6::new(Ipv6Addr::new(0x2a02,0,0,0,0,0,0,0x100),32).range_first() , Ipv6Addr::new(0x2a02,0,0,0,0,0,0,0) );
    /// ```
    pub fn range_first(&self) -> std::net::Ipv6Addr {
        Ipv6Addr::from(self.norm_subnet_u128())
    }
}
impl std::str::FromStr for BgpAddrV6 {
    type Err = FSError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        let addr = parts[0].trim().parse::<Ipv6Addr>()?;
        let prefixlen = if parts.len() < 2 {
            128
        } else {
            parts[1].trim().parse::<u8>()?
        };
        if prefixlen > 128 {
            return Err(FSError::from_string(format!(
                "Invalid ipv6 prefix length: {:?}",
                prefixlen
            )));
        }
        Ok(BgpAddrV6 { addr, prefixlen })
    }
}
impl std::fmt::Display for BgpAddrV6 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefixlen)
    }
}
