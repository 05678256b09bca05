// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod chart_impl;
mod display;

pub use chart_impl::*;
pub use display::*;
