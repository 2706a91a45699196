// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This is an example of usage zettafs.
//! Application sorts flowspec rules given in command line and prints them in evaluation order.
//!
//! Rule is a comma separated list of components, like
//! `dst=10.0.0.0/8,proto=6|17,dport=53`. Prefix components take a prefix,
//! ipv6 prefix offset is given after `@`: `dst=0200::/8@4`.
//! Other components take `|`-separated values.

extern crate zettafs;

use std::env;
use zettafs::prelude::*;

fn type_by_name(name: &str) -> Result<u8, FSError> {
    (FS_TYPE_DST_PREFIX..=FS_TYPE_FLOW_LABEL)
        .find(|t| fs_type_name(*t) == name)
        .ok_or_else(|| FSError::from_string(format!("Unknown component {:?}", name)))
}

fn parse_values(s: &str) -> Result<Vec<FSOperValItem>, FSError> {
    s.split('|')
        .map(|v| -> Result<FSOperValItem, FSError> {
            Ok(FSOperValItem::equal(v.trim().parse::<u32>()?))
        })
        .collect()
}

fn parse_component<T: FSItem, F>(s: &str, mkprefix: F) -> Result<FSComponent<T>, FSError>
where
    F: Fn(&str) -> Result<T, FSError>,
{
    let (name, value) = match s.split_once('=') {
        Some(p) => p,
        None => return Err(FSError::from_string(format!("Invalid component {:?}", s))),
    };
    let typecode = type_by_name(name.trim())?;
    if fs_type_is_prefix(typecode) {
        Ok(FSComponent::prefix(typecode, mkprefix(value.trim())?))
    } else {
        FSComponent::numeric(typecode, &parse_values(value)?)
    }
}

fn parse_rule<T: FSItem, F>(s: &str, mkprefix: F) -> Result<FSNlri<T>, FSError>
where
    F: Fn(&str) -> Result<T, FSError> + Copy,
{
    let mut components = s
        .split(',')
        .filter(|c| !c.trim().is_empty())
        .map(|c| parse_component(c, mkprefix))
        .collect::<Result<Vec<FSComponent<T>>, FSError>>()?;
    components.sort_by_key(|c| c.typecode);
    Ok(FSNlri::new(components))
}

fn parse_v4(s: &str) -> Result<BgpAddrV4, FSError> {
    s.parse()
}
fn parse_v6(s: &str) -> Result<FS6, FSError> {
    match s.split_once('@') {
        None => FS6::new_nofs(s.parse()?),
        Some((pfx, ofs)) => FS6::new(ofs.parse()?, pfx.parse()?),
    }
}

fn sort_and_print<T: FSItem>(mut rules: Vec<FSNlri<T>>) {
    sort_for_evaluation(&mut rules);
    for (n, r) in rules.iter().enumerate() {
        println!("{:>3}: {}", n + 1, r);
    }
}

fn run(args: &[String]) -> Result<(), FSError> {
    let v6 = args.iter().any(|a| a.contains(':') || a.contains('@'));
    if v6 {
        let rules = args
            .iter()
            .map(|a| parse_rule(a, parse_v6))
            .collect::<Result<Vec<FS6Nlri>, FSError>>()?;
        log::debug!("parsed {} ipv6 rules", rules.len());
        sort_and_print(rules);
    } else {
        let rules = args
            .iter()
            .map(|a| parse_rule(a, parse_v4))
            .collect::<Result<Vec<FS4Nlri>, FSError>>()?;
        log::debug!("parsed {} ipv4 rules", rules.len());
        sort_and_print(rules);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let mut vargs: Vec<String> = env::args().skip(1).collect();
    if vargs.is_empty() {
        eprintln!("Usage: fssort RULE [RULE...]");
        eprintln!("No rules given, using sample set");
        vargs = vec![
            "dst=10.0.0.0/8".to_string(),
            "dst=10.1.0.0/16,proto=6".to_string(),
            "dst=10.0.0.0/8,proto=6|17,dport=53".to_string(),
            "src=192.168.0.0/16".to_string(),
            "port=80|443".to_string(),
            "dst=11.0.0.0/8".to_string(),
        ];
    }
    if let Err(e) = run(&vargs) {
        eprintln!("fssort failed: {}", e);
        std::process::exit(1);
    }
}
