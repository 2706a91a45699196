// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Convenience re-export of common members
//!
//! Like the standard library's prelude, this module simplifies importing of
//! common items. Unlike the standard prelude, the contents of this module must
//! be imported manually:
//!
//! ```
//! use zettafs::prelude::*;
//! ```

pub use crate::afi::flowspec::*;
pub use crate::afi::fsoper::*;
pub use crate::afi::ipv4::*;
pub use crate::afi::ipv6::*;
pub use crate::afi::*;
pub use crate::error::*;
pub use crate::order::*;
pub use crate::util::*;
