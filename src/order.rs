// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module contains flowspec rules ordering.
//!
//! When several flowspec rules match the same traffic, the rule with higher precedence
//! must be applied first. Precedence is a total order over NLRIs defined in
//! draft-ietf-idr-rfc5575bis section 5.1 and extended for ipv6 offsets
//! in draft-ietf-idr-flow-spec-v6.
//!
//! ```
//! use zettafs::prelude::*;
//!
//! let a = FS4Nlri::new(vec![FSComponent::bytes(FS_TYPE_PORT, vec![0, 1, 2, 3, 4, 5, 6, 7])]);
//! let b = FS4Nlri::new(vec![FSComponent::bytes(FS_TYPE_PORT, vec![0, 1, 2, 3, 4, 3, 6])]);
//! assert_eq!(flow_rule_cmp(&a, &b), FSPrecedence::BHasPrecedence);
//! assert_eq!(flow_rule_cmp(&b, &a), FSPrecedence::AHasPrecedence);
//! ```
use crate::afi::flowspec::*;
use std::cmp::Ordering;

/// Result of rules comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FSPrecedence {
    /// Rules are equal
    Equal,
    /// First rule must be applied before second one
    AHasPrecedence,
    /// Second rule must be applied before first one
    BHasPrecedence,
}

impl FSPrecedence {
    /// Result for swapped arguments
    pub fn reverse(self) -> FSPrecedence {
        match self {
            FSPrecedence::Equal => FSPrecedence::Equal,
            FSPrecedence::AHasPrecedence => FSPrecedence::BHasPrecedence,
            FSPrecedence::BHasPrecedence => FSPrecedence::AHasPrecedence,
        }
    }
    /// Sort ordering: rule with lower precedence is less.
    ///
    /// Ascending sort by this ordering leaves highest precedence rule at the end,
    /// see [`sort_for_evaluation`] for the opposite.
    pub fn ordering(self) -> Ordering {
        match self {
            FSPrecedence::Equal => Ordering::Equal,
            FSPrecedence::AHasPrecedence => Ordering::Greater,
            FSPrecedence::BHasPrecedence => Ordering::Less,
        }
    }
    /// Lower value wins
    fn lower_wins(o: Ordering) -> FSPrecedence {
        match o {
            Ordering::Less => FSPrecedence::AHasPrecedence,
            Ordering::Greater => FSPrecedence::BHasPrecedence,
            Ordering::Equal => FSPrecedence::Equal,
        }
    }
    /// Greater value wins
    fn greater_wins(o: Ordering) -> FSPrecedence {
        FSPrecedence::lower_wins(o).reverse()
    }
}
impl std::fmt::Display for FSPrecedence {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            FSPrecedence::Equal => write!(f, "equal"),
            FSPrecedence::AHasPrecedence => write!(f, "a has precedence"),
            FSPrecedence::BHasPrecedence => write!(f, "b has precedence"),
        }
    }
}

/// Compares two flowspec rules.
///
/// Components are compared pairwise in order, first difference decides.
/// Rule which lacks a component at some position has lower precedence.
pub fn flow_rule_cmp<T: FSItem>(a: &FSNlri<T>, b: &FSNlri<T>) -> FSPrecedence {
    let ca = a.components();
    let cb = b.components();
    for i in 0..std::cmp::max(ca.len(), cb.len()) {
        let (r, typecode) = match (ca.get(i), cb.get(i)) {
            (Some(x), Some(y)) => (cmp_component(x, y), std::cmp::min(x.typecode, y.typecode)),
            (None, Some(y)) => (FSPrecedence::BHasPrecedence, y.typecode),
            (Some(x), None) => (FSPrecedence::AHasPrecedence, x.typecode),
            (None, None) => break,
        };
        if r != FSPrecedence::Equal {
            log::trace!(
                "flowspec rules decided at component {} ({}): {}",
                i,
                fs_type_name(typecode),
                r
            );
            return r;
        }
    }
    FSPrecedence::Equal
}

/// Compares two components. Lower type code has precedence,
/// same type codes are compared by value.
pub fn cmp_component<T: FSItem>(a: &FSComponent<T>, b: &FSComponent<T>) -> FSPrecedence {
    match a.typecode.cmp(&b.typecode) {
        Ordering::Less => FSPrecedence::AHasPrecedence,
        Ordering::Greater => FSPrecedence::BHasPrecedence,
        Ordering::Equal => match (&a.value, &b.value) {
            (FSValue::Prefix(pa), FSValue::Prefix(pb)) => cmp_prefix(pa, pb),
            (FSValue::Bytes(ba), FSValue::Bytes(bb)) => cmp_bytes(ba, bb),
            (FSValue::Prefix(_), FSValue::Bytes(_)) => {
                log::debug!("flowspec component {} kind mismatch", a.typecode);
                FSPrecedence::AHasPrecedence
            }
            (FSValue::Bytes(_), FSValue::Prefix(_)) => {
                log::debug!("flowspec component {} kind mismatch", a.typecode);
                FSPrecedence::BHasPrecedence
            }
        },
    }
}

/// Compares prefix components.
///
/// Lower offset wins. For overlapping prefixes the more specific one wins,
/// otherwise the lowest address wins.
pub fn cmp_prefix<T: FSItem>(a: &T, b: &T) -> FSPrecedence {
    if a.offset() != b.offset() {
        log::debug!("flowspec prefixes {} and {} offsets differ", a, b);
        return FSPrecedence::lower_wins(a.offset().cmp(&b.offset()));
    }
    if a.overlaps(b) {
        FSPrecedence::greater_wins(a.prefixlen().cmp(&b.prefixlen()))
    } else {
        FSPrecedence::lower_wins(a.norm_value().cmp(&b.norm_value()))
    }
}

/// Compares binary components like memcmp, on equal common part longer string wins.
pub fn cmp_bytes(a: &[u8], b: &[u8]) -> FSPrecedence {
    let common = std::cmp::min(a.len(), b.len());
    match a[..common].cmp(&b[..common]) {
        Ordering::Equal => FSPrecedence::greater_wins(a.len().cmp(&b.len())),
        o => FSPrecedence::lower_wins(o),
    }
}

/// Sorts rules ascending by [`FSNlri::precedes`], highest precedence last.
pub fn sort_rules<T: FSItem>(rules: &mut [FSNlri<T>]) {
    rules.sort_by(|a, b| flow_rule_cmp(a, b).ordering());
}
/// Sorts rules in evaluation order, highest precedence first.
pub fn sort_for_evaluation<T: FSItem>(rules: &mut [FSNlri<T>]) {
    rules.sort_by(|a, b| flow_rule_cmp(a, b).reverse().ordering());
}
/// Inserts rule into the table kept in evaluation order, after equal rules.
/// Returns insert position.
pub fn insert_for_evaluation<T: FSItem>(table: &mut Vec<FSNlri<T>>, rule: FSNlri<T>) -> usize {
    let pos = table.partition_point(|r| flow_rule_cmp(r, &rule) != FSPrecedence::BHasPrecedence);
    table.insert(pos, rule);
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::afi::*;
    use super::FSPrecedence::*;

    fn init_log() {
        let _ = env_logger::builder().is_test(true).try_init();
    }
    fn b4(typecode: u8, v: &[u8]) -> FS4Component {
        FSComponent::bytes(typecode, v.to_vec())
    }
    fn p4(typecode: u8, s: &str) -> FS4Component {
        FSComponent::prefix(typecode, s.parse().unwrap())
    }
    fn b6(typecode: u8, v: &[u8]) -> FS6Component {
        FSComponent::bytes(typecode, v.to_vec())
    }
    fn p6(typecode: u8, s: &str, ofs: u8) -> FS6Component {
        FSComponent::prefix(typecode, FS6::new(ofs, s.parse().unwrap()).unwrap())
    }
    /// checks verdict and its mirror
    fn check<T: FSItem>(a: Vec<FSComponent<T>>, b: Vec<FSComponent<T>>, r: FSPrecedence) {
        let a = FSNlri::new(a);
        let b = FSNlri::new(b);
        assert_eq!(flow_rule_cmp(&a, &b), r, "{} vs {}", a, b);
        assert_eq!(flow_rule_cmp(&b, &a), r.reverse(), "{} vs {}", b, a);
    }

    #[test]
    fn test_different_listlength() {
        init_log();
        check(
            vec![b4(4, &[0, 1, 2, 3, 4, 5, 6]), b4(5, &[0, 1, 2, 3, 4, 5, 6])],
            vec![b4(4, &[0, 1, 2, 3, 4, 5, 6])],
            AHasPrecedence,
        );
        check(
            vec![b6(4, &[0, 1, 2, 3, 4, 5, 6]), b6(5, &[0, 1, 2, 3, 4, 5, 6])],
            vec![b6(4, &[0, 1, 2, 3, 4, 5, 6])],
            AHasPrecedence,
        );
    }
    #[test]
    fn test_different_component_types() {
        check(
            vec![b4(4, &[0, 1, 2, 3, 4, 5, 6])],
            vec![b4(5, &[0, 1, 2, 3, 4, 5, 6]), b4(6, &[0, 1, 2, 3, 4, 5, 6])],
            AHasPrecedence,
        );
        check(
            vec![b6(4, &[0, 1, 2, 3, 4, 5, 6])],
            vec![b6(5, &[0, 1, 2, 3, 4, 5, 6]), b6(6, &[0, 1, 2, 3, 4, 5, 6])],
            AHasPrecedence,
        );
    }
    #[test]
    fn test_type_dominance() {
        // lower type wins whatever follows
        check(
            vec![p4(FS_TYPE_SRC_PREFIX, "0.0.0.0/0")],
            vec![
                p4(FS_TYPE_DST_PREFIX, "10.1.2.3/32"),
                b4(FS_TYPE_PROTO, &[0x81, 6]),
            ],
            BHasPrecedence,
        );
        check(
            vec![p4(FS_TYPE_DST_PREFIX, "10.0.0.0/8"), b4(FS_TYPE_PORT, &[0x81, 80])],
            vec![p4(FS_TYPE_DST_PREFIX, "10.0.0.0/8"), b4(FS_TYPE_DST_PORT, &[0x81, 80])],
            AHasPrecedence,
        );
    }
    #[test]
    fn test_equal_fs() {
        let a = vec![
            p4(FS_TYPE_DST_PREFIX, "10.1.0.0/16"),
            p4(FS_TYPE_SRC_PREFIX, "10.2.0.0/16"),
            b4(4, &[0, 1, 2, 3, 4, 5, 6]),
            b4(5, &[0, 1, 2, 3, 4, 5, 6]),
        ];
        check(a.clone(), a, Equal);
        let a = vec![
            p6(FS_TYPE_DST_PREFIX, "0200::/16", 4),
            p6(FS_TYPE_SRC_PREFIX, "0100::/16", 4),
            b6(4, &[0, 1, 2, 3, 4, 5, 6]),
            b6(5, &[0, 1, 2, 3, 4, 5, 6]),
        ];
        check(a.clone(), a, Equal);
        check::<BgpAddrV4>(Vec::new(), Vec::new(), Equal);
    }
    #[test]
    fn test_host_bits_ignored() {
        check(
            vec![p4(FS_TYPE_DST_PREFIX, "10.1.2.3/16")],
            vec![p4(FS_TYPE_DST_PREFIX, "10.1.0.0/16")],
            Equal,
        );
    }
    #[test]
    fn test_empty_rule() {
        check(Vec::new(), vec![b4(FS_TYPE_PROTO, &[])], BHasPrecedence);
        check(Vec::new(), vec![b6(FS_TYPE_PROTO, &[0x81, 6])], BHasPrecedence);
    }
    #[test]
    fn test_ip_prefix_same_common() {
        for t in [FS_TYPE_DST_PREFIX, FS_TYPE_SRC_PREFIX] {
            check(
                vec![p4(t, "10.0.0.0/8")],
                vec![p4(t, "10.1.0.0/16")],
                BHasPrecedence,
            );
            check(
                vec![p6(t, "0200::/8", 4)],
                vec![p6(t, "0201::/16", 4)],
                BHasPrecedence,
            );
        }
    }
    #[test]
    fn test_ip_prefix_different_common() {
        for t in [FS_TYPE_DST_PREFIX, FS_TYPE_SRC_PREFIX] {
            check(
                vec![p4(t, "10.0.0.0/8")],
                vec![p4(t, "11.1.0.0/16")],
                AHasPrecedence,
            );
            check(
                vec![p6(t, "0200::/8", 4)],
                vec![p6(t, "0301::/16", 4)],
                AHasPrecedence,
            );
        }
    }
    #[test]
    fn test_ip_prefix_different_offset() {
        for t in [FS_TYPE_DST_PREFIX, FS_TYPE_SRC_PREFIX] {
            check(
                vec![p6(t, "0200::/8", 3)],
                vec![p6(t, "0301::/16", 4)],
                AHasPrecedence,
            );
            // offset decides before prefix length and value
            check(
                vec![p6(t, "::/0", 0)],
                vec![p6(t, "0000::/128", 4)],
                AHasPrecedence,
            );
        }
    }
    #[test]
    fn test_ip_prefix_default_route() {
        check(
            vec![p4(FS_TYPE_DST_PREFIX, "0.0.0.0/0")],
            vec![p4(FS_TYPE_DST_PREFIX, "192.168.1.1/32")],
            BHasPrecedence,
        );
        check(
            vec![p4(FS_TYPE_DST_PREFIX, "255.255.255.255/32")],
            vec![p4(FS_TYPE_DST_PREFIX, "255.255.255.254/32")],
            BHasPrecedence,
        );
    }
    #[test]
    fn test_other_component_memcmp() {
        check(
            vec![b4(4, &[0, 1, 2, 3, 4, 5, 7])],
            vec![b4(4, &[0, 1, 2, 3, 4, 5, 6])],
            BHasPrecedence,
        );
        check(
            vec![b6(4, &[0, 1, 2, 3, 4, 5, 7])],
            vec![b6(4, &[0, 1, 2, 3, 4, 5, 6])],
            BHasPrecedence,
        );
    }
    #[test]
    fn test_other_component_same_common() {
        check(
            vec![b4(4, &[0, 1, 2, 3, 4, 5, 6, 7])],
            vec![b4(4, &[0, 1, 2, 3, 4, 5, 6])],
            AHasPrecedence,
        );
        check(
            vec![b4(4, &[0])],
            vec![b4(4, &[])],
            AHasPrecedence,
        );
        check(vec![b4(4, &[])], vec![b4(4, &[])], Equal);
    }
    #[test]
    fn test_other_component_different_common() {
        check(
            vec![b4(4, &[0, 1, 2, 3, 4, 5, 6, 7])],
            vec![b4(4, &[0, 1, 2, 3, 4, 3, 6])],
            BHasPrecedence,
        );
        check(
            vec![b4(4, &[0, 1, 2, 3, 4, 5, 6, 7])],
            vec![b4(4, &[0, 1, 2, 3, 4, 6, 6])],
            AHasPrecedence,
        );
        check(
            vec![b6(4, &[0, 1, 2, 3, 4, 5, 6, 7])],
            vec![b6(4, &[0, 1, 2, 3, 4, 3, 6])],
            BHasPrecedence,
        );
    }
    #[test]
    fn test_kind_mismatch() {
        check(
            vec![p4(FS_TYPE_DST_PREFIX, "10.0.0.0/8")],
            vec![b4(FS_TYPE_DST_PREFIX, &[8, 10])],
            AHasPrecedence,
        );
    }
    #[test]
    fn test_precedence_helpers() {
        assert_eq!(Equal.reverse(), Equal);
        assert_eq!(AHasPrecedence.reverse(), BHasPrecedence);
        assert_eq!(BHasPrecedence.ordering(), Ordering::Less);
        assert_eq!(AHasPrecedence.ordering(), Ordering::Greater);
        assert_eq!(AHasPrecedence.to_string(), "a has precedence");
        assert_eq!(cmp_bytes(&[1, 2], &[1, 2]), Equal);
        assert_eq!(cmp_bytes(&[1, 2, 0], &[1, 2]), AHasPrecedence);
        assert_eq!(cmp_bytes(&[0, 9], &[1]), AHasPrecedence);
    }

    fn sample_rules() -> Vec<FS4Nlri> {
        vec![
            FSNlri::new(vec![b4(FS_TYPE_PORT, &[0x81, 80])]),
            FSNlri::new(vec![p4(FS_TYPE_DST_PREFIX, "10.0.0.0/8")]),
            FSNlri::new(vec![
                p4(FS_TYPE_DST_PREFIX, "10.0.0.0/8"),
                b4(FS_TYPE_PROTO, &[0x81, 6]),
            ]),
            FSNlri::new(vec![p4(FS_TYPE_DST_PREFIX, "10.1.0.0/16")]),
            FSNlri::new(vec![p4(FS_TYPE_DST_PREFIX, "11.0.0.0/8")]),
            FSNlri::new(vec![p4(FS_TYPE_SRC_PREFIX, "10.0.0.0/8")]),
            FSNlri::new(vec![b4(FS_TYPE_PORT, &[0x81, 25])]),
            FSNlri::new(Vec::new()),
        ]
    }
    #[test]
    fn test_total_order_properties() {
        let rules = sample_rules();
        for a in rules.iter() {
            assert_eq!(flow_rule_cmp(a, a), Equal);
            for b in rules.iter() {
                assert_eq!(flow_rule_cmp(a, b), flow_rule_cmp(b, a).reverse());
                for c in rules.iter() {
                    if a.precedes(b) && b.precedes(c) {
                        assert!(a.precedes(c), "{} / {} / {}", a, b, c);
                    }
                }
            }
        }
    }
    #[test]
    fn test_sort_for_evaluation() {
        init_log();
        let mut rules = sample_rules();
        sort_for_evaluation(&mut rules);
        let order: Vec<String> = rules.iter().map(|r| r.to_string()).collect();
        assert_eq!(
            order,
            vec![
                "dst:10.1.0.0/16",
                "dst:10.0.0.0/8 proto:0x8106",
                "dst:10.0.0.0/8",
                "dst:11.0.0.0/8",
                "src:10.0.0.0/8",
                "port:0x8119",
                "port:0x8150",
                "",
            ]
        );
        let mut asc = sample_rules();
        sort_rules(&mut asc);
        rules.reverse();
        assert_eq!(asc, rules);
    }
    #[test]
    fn test_insert_for_evaluation() {
        let mut table: Vec<FS4Nlri> = Vec::new();
        for r in sample_rules() {
            insert_for_evaluation(&mut table, r);
        }
        let mut sorted = sample_rules();
        sort_for_evaluation(&mut sorted);
        assert_eq!(table, sorted);
        let pos = insert_for_evaluation(
            &mut table,
            FSNlri::new(vec![p4(FS_TYPE_DST_PREFIX, "10.0.0.0/8")]),
        );
        // after the equal one
        assert_eq!(pos, 3);
        let pos = insert_for_evaluation(
            &mut table,
            FSNlri::new(vec![p4(FS_TYPE_DST_PREFIX, "10.1.2.0/24")]),
        );
        assert_eq!(pos, 0);
    }
    #[test]
    fn test_sort_v6() {
        let mut rules: Vec<FS6Nlri> = vec![
            FSNlri::new(vec![p6(FS_TYPE_DST_PREFIX, "0301::/16", 4)]),
            FSNlri::new(vec![p6(FS_TYPE_DST_PREFIX, "0200::/8", 4)]),
            FSNlri::new(vec![p6(FS_TYPE_DST_PREFIX, "0201::/16", 4)]),
            FSNlri::new(vec![p6(FS_TYPE_DST_PREFIX, "0200::/8", 3)]),
        ];
        sort_for_evaluation(&mut rules);
        let order: Vec<String> = rules.iter().map(|r| r.to_string()).collect();
        assert_eq!(
            order,
            vec![
                "dst:200::/8 offset 3",
                "dst:201::/16 offset 4",
                "dst:200::/8 offset 4",
                "dst:301::/16 offset 4",
            ]
        );
    }
}
