// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This is a BGP FlowSpec rules ordering library for Rust.
//!
//! Several flowspec rules may match the same packet, so rules must be applied
//! in well defined order. This library implements that order:
//!  * draft-ietf-idr-rfc5575bis, section 5.1 - ipv4 flowspec
//!  * draft-ietf-idr-flow-spec-v6 - ipv6 flowspec with prefix offsets
//!
//! ## Supported components
//!  * Destination prefix
//!  * Source prefix
//!  * IP protocol / next header
//!  * Port, destination port, source port
//!  * ICMP type and code
//!  * TCP flags
//!  * Packet length
//!  * DSCP
//!  * Fragment
//!  * Flow label
//!
//! Non-prefix components are kept as encoded operator lists, since they are compared
//! as binary strings. Operator lists can be built with [`afi::fsoper`].
//!
//! # Quick Start
//!
//! ```
//! use zettafs::prelude::*;
//!
//! let mut rules = vec![
//!   FS4Nlri::new(vec![
//!     FSComponent::prefix(FS_TYPE_DST_PREFIX, "10.0.0.0/8".parse().unwrap()),
//!   ]),
//!   FS4Nlri::new(vec![
//!     FSComponent::prefix(FS_TYPE_DST_PREFIX, "10.0.0.0/8".parse().unwrap()),
//!     FSComponent::numeric(FS_TYPE_PROTO, &[FSOperValItem::equal(6)]).unwrap(),
//!   ]),
//!   FS4Nlri::new(vec![
//!     FSComponent::prefix(FS_TYPE_DST_PREFIX, "10.1.0.0/16".parse().unwrap()),
//!   ]),
//! ];
//! sort_for_evaluation(&mut rules);
//! assert_eq!(rules[0].to_string(), "dst:10.1.0.0/16");
//! assert_eq!(rules[1].to_string(), "dst:10.0.0.0/8 proto:0x8106");
//! assert_eq!(flow_rule_cmp(&rules[1], &rules[2]), FSPrecedence::AHasPrecedence);
//! ```
//!
#[cfg(feature = "serialization")]
extern crate serde;

pub mod afi;
pub mod error;
pub mod order;
pub mod prelude;
pub mod util;
