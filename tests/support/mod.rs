#![allow(dead_code)]

pub mod quakecast_env;
pub mod stubs;
