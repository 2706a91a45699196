// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module contains some internal utilities

pub fn setn_u16(s: u16, a: &mut [u8]) {
    a[0] = (s >> 8) as u8;
    a[1] = (s & 0xff) as u8;
}
pub fn getn_u16(a: &[u8]) -> u16 {
    (a[0] as u16) << 8 | (a[1] as u16)
}
pub fn getn_u32(a: &[u8]) -> u32 {
    (a[0] as u32) << 24 | (a[1] as u32) << 16 | (a[2] as u32) << 8 | (a[3] as u32)
}
pub fn setn_u32(s: u32, a: &mut [u8]) {
    a[0] = (s >> 24) as u8;
    a[1] = ((s >> 16) & 0xff) as u8;
    a[2] = ((s >> 8) & 0xff) as u8;
    a[3] = (s & 0xff) as u8;
}
pub fn getn_u64(a: &[u8]) -> u64 {
    ((getn_u32(a) as u64) << 32) | (getn_u32(&a[4..8]) as u64)
}
pub fn getn_u128(a: &[u8]) -> u128 {
    ((getn_u64(a) as u128) << 64) | (getn_u64(&a[8..16]) as u128)
}
/// Netmask with `bits` leading ones. Saturates at 32.
pub fn mask_u32(bits: u8) -> u32 {
    if bits >= 32 {
        u32::MAX
    } else {
        !(u32::MAX >> bits)
    }
}
/// Netmask with `bits` leading ones. Saturates at 128.
pub fn mask_u128(bits: u8) -> u128 {
    if bits >= 128 {
        u128::MAX
    } else {
        !(u128::MAX >> bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks() {
        assert_eq!(mask_u32(0), 0);
        assert_eq!(mask_u32(8), 0xff000000);
        assert_eq!(mask_u32(32), 0xffffffff);
        assert_eq!(mask_u32(40), 0xffffffff);
        assert_eq!(mask_u128(0), 0);
        assert_eq!(mask_u128(4), 0xf_u128 << 124);
        assert_eq!(mask_u128(128), u128::MAX);
    }
    #[test]
    fn test_getn() {
        let mut buf = [0_u8; 16];
        setn_u32(0x0a010203, &mut buf);
        assert_eq!(getn_u32(&buf), 0x0a010203);
        setn_u16(0x1234, &mut buf[4..]);
        assert_eq!(getn_u16(&buf[4..]), 0x1234);
        assert_eq!(getn_u128(&buf) >> 80, 0x0a0102031234);
    }
}
