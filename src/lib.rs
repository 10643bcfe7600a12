// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! System, hardware and account information viewer for the 3DS.
//!
//! All system access goes through [`platform::Platform`]. [`sim::SimPlatform`] is a
//! deterministic implementation for hosts and tests.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod app;
pub mod console;
pub mod context;
pub mod convert;
pub mod debug;
pub mod heap;
pub mod os;
pub mod platform;
pub mod poll;
pub mod report;
pub mod result;
pub mod services;
pub mod session;
pub mod sim;
