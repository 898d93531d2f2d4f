//! Shared test doubles for the capability traits.
#![allow(dead_code)]

pub mod fakes;
