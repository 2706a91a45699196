// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module contains flowspec operator lists, which are payload of non-prefix components.
//!
//! Precedence of such components is decided by binary comparison of encoded operator list,
//! so here is only encoding part.
use crate::afi::*;
#[cfg(feature = "serialization")]
use serde::Serialize;

/// Item of operator list
pub trait FSOperItem: Clone + PartialEq + Eq + PartialOrd + Ord {
    /// Returns encoded length, operator byte included.
    fn getbyteslen(&self) -> usize;
    /// Encodes item into the buffer. Returns consumed buffer length, or error.
    fn encode_to(&self, buf: &mut [u8]) -> Result<usize, FSError>;
}

/// Operator byte length bits and value bytes count for given value
fn value_len_bits(value: u32) -> (u8, usize) {
    if value > 0xffff {
        (2 << 4, 4)
    } else if value > 0xff {
        (1 << 4, 2)
    } else {
        (0, 1)
    }
}
fn encode_value_to(opbyte: u8, value: u32, buf: &mut [u8]) -> Result<usize, FSError> {
    let (lenbits, vlen) = value_len_bits(value);
    if buf.len() < vlen + 1 {
        return Err(FSError::insufficient_buffer_size());
    }
    buf[0] = opbyte | lenbits;
    match vlen {
        4 => setn_u32(value, &mut buf[1..]),
        2 => setn_u16(value as u16, &mut buf[1..]),
        _ => buf[1] = value as u8,
    }
    Ok(vlen + 1)
}

/// Numeric operator (rfc5575bis 4.2.1.1)
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct FSOperValItem {
    pub and_bit: bool,
    pub lt_cmp: bool,
    pub gt_cmp: bool,
    pub eq_cmp: bool,
    pub value: u32,
}
impl FSOperValItem {
    pub fn new(v: u32, b_and: bool, b_lt: bool, b_gt: bool, b_eq: bool) -> FSOperValItem {
        FSOperValItem {
            and_bit: b_and,
            lt_cmp: b_lt,
            gt_cmp: b_gt,
            eq_cmp: b_eq,
            value: v,
        }
    }
    /// Shortcut for "== value"
    pub fn equal(v: u32) -> FSOperValItem {
        FSOperValItem::new(v, false, false, false, true)
    }
}
impl std::fmt::Display for FSOperValItem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}{} {}",
            if self.and_bit { "&&" } else { "||" },
            if self.lt_cmp { "<" } else { "" },
            if self.gt_cmp { ">" } else { "" },
            if self.eq_cmp { "=" } else { "" },
            self.value
        )
    }
}
impl FSOperItem for FSOperValItem {
    fn getbyteslen(&self) -> usize {
        1 + value_len_bits(self.value).1
    }
    fn encode_to(&self, buf: &mut [u8]) -> Result<usize, FSError> {
        let mut opbyte: u8 = 0;
        if self.and_bit {
            opbyte |= 64;
        }
        if self.lt_cmp {
            opbyte |= 4;
        }
        if self.gt_cmp {
            opbyte |= 2;
        }
        if self.eq_cmp {
            opbyte |= 1;
        }
        encode_value_to(opbyte, self.value, buf)
    }
}

/// Bitmask operator (rfc5575bis 4.2.1.2)
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct FSOperMaskItem {
    pub and_bit: bool,
    pub bit_not: bool,
    pub bit_match: bool,
    pub value: u32,
}
impl FSOperMaskItem {
    pub fn new(v: u32, b_and: bool, b_not: bool, b_match: bool) -> FSOperMaskItem {
        FSOperMaskItem {
            and_bit: b_and,
            bit_not: b_not,
            bit_match: b_match,
            value: v,
        }
    }
}
impl std::fmt::Display for FSOperMaskItem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}{}{} {}",
            if self.and_bit { "&&" } else { "||" },
            if self.bit_not { "!" } else { "" },
            if self.bit_match { "==" } else { "" },
            self.value
        )
    }
}
impl FSOperItem for FSOperMaskItem {
    fn getbyteslen(&self) -> usize {
        1 + value_len_bits(self.value).1
    }
    fn encode_to(&self, buf: &mut [u8]) -> Result<usize, FSError> {
        let mut opbyte: u8 = 0;
        if self.and_bit {
            opbyte |= 64;
        }
        if self.bit_not {
            opbyte |= 2;
        }
        if self.bit_match {
            opbyte |= 1;
        }
        encode_value_to(opbyte, self.value, buf)
    }
}

/// Encodes operator list, marking last item with end-of-list bit.
/// ```
/// use zettafs::prelude::*;
///
/// let enc = encode_opers(&[FSOperValItem::equal(6), FSOperValItem::equal(17)]).unwrap();
/// assert_eq!(enc, vec![0x01, 6, 0x81, 17]);
/// ```
pub fn encode_opers<T: FSOperItem>(items: &[T]) -> Result<Vec<u8>, FSError> {
    let total: usize = items.iter().map(|i| i.getbyteslen()).sum();
    let mut buf = vec![0_u8; total];
    let mut pos: usize = 0;
    let mut lpos: usize = 0;
    for i in items {
        lpos = pos;
        pos += i.encode_to(&mut buf[pos..])?;
    }
    if !items.is_empty() {
        buf[lpos] |= 128;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operval_encode() {
        let op = FSOperValItem::new(80, true, true, false, true);
        assert_eq!(op.getbyteslen(), 2);
        let mut buf = [0_u8; 8];
        assert_eq!(op.encode_to(&mut buf).unwrap(), 2);
        assert_eq!(&buf[0..2], &[0x45, 80]);
        let op = FSOperValItem::equal(8080);
        assert_eq!(op.getbyteslen(), 3);
        assert_eq!(op.encode_to(&mut buf).unwrap(), 3);
        assert_eq!(&buf[0..3], &[0x11, 0x1f, 0x90]);
        let op = FSOperValItem::equal(0x10000);
        assert_eq!(op.getbyteslen(), 5);
        assert_eq!(op.encode_to(&mut buf).unwrap(), 5);
        assert_eq!(&buf[0..5], &[0x21, 0, 1, 0, 0]);
        assert!(op.encode_to(&mut buf[0..4]).is_err());
    }
    #[test]
    fn test_opermask_encode() {
        let enc = encode_opers(&[FSOperMaskItem::new(0x02, false, false, true)]).unwrap();
        assert_eq!(enc, vec![0x81, 0x02]);
        let enc = encode_opers(&[
            FSOperMaskItem::new(0x12, false, true, false),
            FSOperMaskItem::new(0x100, true, false, true),
        ])
        .unwrap();
        assert_eq!(enc, vec![0x02, 0x12, 0xd1, 0x01, 0x00]);
    }
    #[test]
    fn test_opers_empty() {
        let v: Vec<FSOperValItem> = Vec::new();
        assert!(encode_opers(&v).unwrap().is_empty());
    }
    #[test]
    fn test_opers_display() {
        assert_eq!(FSOperValItem::new(80, true, true, false, true).to_string(), "&&<= 80");
        assert_eq!(FSOperMaskItem::new(2, false, true, true).to_string(), "||!== 2");
    }
}
