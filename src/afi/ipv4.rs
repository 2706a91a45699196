// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module describes ipv4 prefix used in flowspec prefix components

use crate::afi::*;
#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// ipv4 prefix
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct BgpAddrV4 {
    /// network prefix
    pub addr: Ipv4Addr,
    /// prefix length 0..32
    pub prefixlen: u8,
}
impl Default for BgpAddrV4 {
    fn default() -> Self {
        BgpAddrV4 {
            addr: Ipv4Addr::new(0, 0, 0, 0),
            prefixlen: 0,
        }
    }
}
impl BgpAddrV4 {
    /// Constructs new ipv4 prefix
    /// ```
    /// use zettafs::prelude::BgpAddrV4;
    /// use std::net::Ipv4Addr;
    ///
    /// let pfx = BgpAddrV4::new(Ipv4Addr::new(192,168,0,0),16);
    /// ```
    pub fn new(address: Ipv4Addr, prefix_len: u8) -> BgpAddrV4 {
        BgpAddrV4 {
            addr: address,
            prefixlen: prefix_len,
        }
    }
    pub(crate) fn norm_subnet_u32(&self) -> u32 {
        getn_u32(&self.addr.octets()) & mask_u32(self.prefixlen)
    }
    /// Check if IP in subnet
    /// ```
    /// use zettafs::prelude::BgpAddrV4;
    /// use std::net::Ipv4Addr;
    ///
    /// assert!(BgpAddrV4::new(Ipv4Addr::new(192,168,0,0),16).in_subnet(&Ipv4Addr::new(192,168,0,1)))
    /// ```
    pub fn in_subnet(&self, a: &Ipv4Addr) -> bool {
        (getn_u32(&a.octets()) & mask_u32(self.prefixlen)) == self.norm_subnet_u32()
    }
    /// Returns first IP address (network address) from subnet
    /// ```
    /// use std::net::Ipv4Addr;
    /// use zettafs::prelude::BgpAddrV4;
    ///
    /// assert_eq!(BgpAddrV4::new(Ipv4Addr::new(192,168,120,130),16).range_first() , Ipv4Addr::new(192,168,0,0) );
    /// ```
    pub fn range_first(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.norm_subnet_u32())
    }
    /// Check if given subnet is in this subnet
    /// ```
    /// use std::net::Ipv4Addr;
    /// use zettafs::prelude::BgpAddrV4;
    ///
    /// assert!(BgpAddrV4::new(Ipv4Addr::new(192,168,0,0),16).contains(&BgpAddrV4::new(Ipv4Addr::new(192,168,0,0),24)));
    /// ```
    pub fn contains(&self, a: &BgpAddrV4) -> bool {
        self.prefixlen <= a.prefixlen && self.in_subnet(&a.addr)
    }
    /// Check if two subnets have common addresses, i.e. one of them contains another.
    /// ```
    /// use std::net::Ipv4Addr;
    /// use zettafs::prelude::BgpAddrV4;
    ///
    /// assert!(BgpAddrV4::new(Ipv4Addr::new(10,1,0,0),16).overlaps(&BgpAddrV4::new(Ipv4Addr::new(10,0,0,0),8)));
    /// assert!(!BgpAddrV4::new(Ipv4Addr::new(11,1,0,0),16).overlaps(&BgpAddrV4::new(Ipv4Addr::new(10,0,0,0),8)));
    /// ```
    pub fn overlaps(&self, a: &BgpAddrV4) -> bool {
        self.contains(a) || a.contains(self)
    }
}
impl std::str::FromStr for BgpAddrV4 {
    type Err = FSError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        let addr = parts[0].trim().parse::<Ipv4Addr>()?;
        let prefixlen = if parts.len() < 2 {
            32
        } else {
            parts[1].trim().parse::<u8>()?
        };
        if prefixlen > 32 {
            return Err(FSError::from_string(format!(
                "Invalid ipv4 prefix length: {:?}",
                prefixlen
            )));
        }
        Ok(BgpAddrV4 { addr, prefixlen })
    }
}
impl std::fmt::Display for BgpAddrV4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefixlen)
    }
}
