// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod anvil;
mod bytecode;
mod local_backend;
mod utils;

pub use anvil::*;
pub use bytecode::*;
pub use local_backend::*;
pub use utils::*;
